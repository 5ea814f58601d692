//! Human-readable error descriptions and structured JSON error formatting.

use holdwatch_core::{BuildError, HoldwatchError};
use holdwatch_traits::{AuthError, StoreError};

/// Map an eyre::Report to a human-readable explanation with likely causes and fix hints.
pub fn humanize(err: &eyre::Report) -> String {
    // Typed matches first
    if let Some(be) = err.downcast_ref::<BuildError>() {
        return match be {
            BuildError::MissingStore => {
                "What happened: No data store was provided to the dashboard.\nLikely causes: The store failed to initialize or was not wired into the builder.\nHow to fix: Pass a store via with_store(...).".to_string()
            }
            BuildError::InvalidConfig(msg) => format!(
                "What happened: Invalid configuration ({msg}).\nLikely causes: Conflicting values in the [store] or [window] sections.\nHow to fix: Edit the config file, then rerun."
            ),
        };
    }

    if let Some(he) = err.downcast_ref::<HoldwatchError>() {
        return match he {
            HoldwatchError::Config(msg) => format!(
                "What happened: Invalid configuration.\nDetails: {msg}\nHow to fix: Edit the TOML config (see etc/holdwatch.toml) and try again."
            ),
            HoldwatchError::Auth(AuthError::InvalidCredentials) => {
                "What happened: Sign-in was rejected.\nLikely causes: Wrong or malformed email address.\nHow to fix: Pass a valid address with --email.".to_string()
            }
            HoldwatchError::Store(StoreError::InvalidPath(p)) => format!(
                "What happened: The store rejected path '{p}'.\nLikely causes: Empty path or empty segment in [store] paths.\nHow to fix: Use slash-separated, non-empty path segments."
            ),
            HoldwatchError::Decode(msg) => format!(
                "What happened: Input could not be decoded ({msg}).\nLikely causes: The file is not the JSON the command expects.\nHow to fix: Check the file contents; see --help for the expected format."
            ),
            HoldwatchError::Io(msg) | HoldwatchError::Export(msg) => format!(
                "What happened: File operation failed ({msg}).\nLikely causes: Missing directory or insufficient permissions.\nHow to fix: Check the path exists and is writable."
            ),
            other => format!(
                "What happened: {other}.\nLikely causes: See logs.\nHow to fix: Re-run with --log-level=debug or set RUST_LOG for more detail."
            ),
        };
    }

    // Generic fallback
    let msg = err.to_string();
    let mut cause = String::new();
    if let Some(src) = err.source() {
        cause = format!(" Cause: {src}");
    }
    format!(
        "Something went wrong.{cause}\nHow to fix: Re-run with --log-level=debug for details. Original: {msg}"
    )
}

/// Stable exit codes: configuration problems are 2, everything else 1.
pub fn exit_code_for_error(err: &eyre::Report) -> i32 {
    match err.downcast_ref::<HoldwatchError>() {
        Some(HoldwatchError::Config(_)) => return 2,
        Some(_) => return 1,
        None => {}
    }
    if matches!(
        err.downcast_ref::<BuildError>(),
        Some(BuildError::InvalidConfig(_))
    ) {
        return 2;
    }
    1
}

fn reason_name(err: &eyre::Report) -> &'static str {
    if let Some(he) = err.downcast_ref::<HoldwatchError>() {
        return match he {
            HoldwatchError::Store(_) => "Store",
            HoldwatchError::Auth(_) => "Auth",
            HoldwatchError::Config(_) => "Config",
            HoldwatchError::Decode(_) => "Decode",
            HoldwatchError::Export(_) => "Export",
            HoldwatchError::Io(_) => "Io",
        };
    }
    if err.downcast_ref::<BuildError>().is_some() {
        return "Build";
    }
    "Error"
}

/// Structured JSON for errors when --json is enabled.
pub fn format_error_json(err: &eyre::Report) -> String {
    serde_json::json!({
        "reason": reason_name(err),
        "exit_code": exit_code_for_error(err),
        "message": humanize(err),
    })
    .to_string()
}
