//! Fuzz target: `config_file::parse`
//!
//! Arbitrary text must either be rejected with a typed error or produce
//! a config that passes validation.
//!
//! cargo fuzz run fuzz_config_json

#![no_main]

use appleslice::adapters::config_file::parse;
use libfuzzer_sys::fuzz_target;

fuzz_target!(|data: &[u8]| {
    let Ok(text) = core::str::from_utf8(data) else {
        return;
    };
    if let Ok(config) = parse(text) {
        assert!(config.validate().is_ok(), "parse returned an invalid config");
    }
});
