#![no_main]
use libfuzzer_sys::fuzz_target;
use xmlnav::xpath::evaluate;
use xmlnav::Document;

fuzz_target!(|data: &[u8]| {
    if let Ok(expr) = std::str::from_utf8(data) {
        if let Ok(doc) = Document::parse_str("<P><O K='1'/><S><O K='2'/><S><O/></S></S></P>") {
            // Path evaluation should never panic, and results stay in document order
            if let Ok(found) = evaluate(&doc, doc.root(), expr) {
                for pair in found.windows(2) {
                    assert_eq!(doc.is_before(pair[0], pair[1]), Ok(true));
                }
            }
        }
    }
});
