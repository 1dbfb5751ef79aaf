#![no_main]
use libfuzzer_sys::fuzz_target;
use xmlnav::parser::{ParseOptions, Scanner, TreeBuilder};

fuzz_target!(|data: &[u8]| {
    if let Ok(s) = std::str::from_utf8(data) {
        // The scanner yields nothing after its first error
        let scanned: Vec<_> = Scanner::new(s).collect();
        if let Some(pos) = scanned.iter().position(Result::is_err) {
            assert_eq!(pos, scanned.len() - 1);
        }
        let _ = TreeBuilder::new(&ParseOptions::default()).build(scanned);
    }
});
