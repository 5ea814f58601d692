#![no_main]
use libfuzzer_sys::fuzz_target;

fuzz_target!(|data: &str| {
    let Ok(value) = serde_json::from_str::<serde_json::Value>(data) else {
        return;
    };
    if let Ok(snapshot) = holdwatch_core::decode_snapshot(&value) {
        let _ = holdwatch_core::display::format_temperature(
            snapshot.temperature,
            snapshot.decimal_precision,
        );
    }
    let entries = holdwatch_core::decode_log_entries(&value);
    // Fields are written verbatim, so only check that rendering never panics.
    let _ = holdwatch_core::to_csv(&entries);
});
