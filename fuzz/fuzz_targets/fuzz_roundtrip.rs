#![no_main]
use libfuzzer_sys::fuzz_target;
use xmlnav::parser::parse_str;
use xmlnav::serial::debug::format_debug_tree;
use xmlnav::serial::serialize;

fuzz_target!(|data: &[u8]| {
    if let Ok(s) = std::str::from_utf8(data) {
        // Anything that parses must print to markup that parses to the same tree
        if let Ok(doc) = parse_str(s) {
            let output = serialize(&doc);
            let again = parse_str(&output).unwrap_or_else(|e| panic!("reparse failed: {e}"));
            assert_eq!(format_debug_tree(&doc), format_debug_tree(&again));
        }
    }
});
