#![no_main]
use libfuzzer_sys::fuzz_target;

fuzz_target!(|data: &str| {
    // Parse and validate errors are both fine; panics are not.
    if let Ok(cfg) = holdwatch_config::load_toml(data) {
        if cfg.validate().is_ok() {
            // A config that validates must convert cleanly into runtime types.
            let window: holdwatch_core::WindowCfg = (&cfg.window).into();
            assert!(window.capacity >= 1);
            assert!(window.floor < window.ceiling);
        }
    }
});
