#![no_main]
use libfuzzer_sys::fuzz_target;
use xmldict::{parse_with_config, Config};

fuzz_target!(|data: &[u8]| {
    if let Ok(s) = std::str::from_utf8(data) {
        let _ = parse_with_config(s, &Config::limited());
        let _ = parse_with_config(s, &Config::default().lenient().with_cdata_as_text(true));
    }
});
