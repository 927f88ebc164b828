#![no_main]

use libfuzzer_sys::fuzz_target;

fuzz_target!(|data: &[u8]| {
    if let Ok(s) = std::str::from_utf8(data) {
        if let Some(value) = fakturka::parse_decimal(s) {
            assert_eq!(fakturka::parse_decimal(&value.to_string()), Some(value));
        }
    }
});
