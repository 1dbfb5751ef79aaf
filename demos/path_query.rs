//! Path query examples.
//!
//! Run with: `cargo run --example path_query`
#![allow(clippy::expect_used)]

use xmlnav::xpath::{compile, evaluate, render, QueryContext};
use xmlnav::Document;

fn main() {
    let xml = "<Portfolio>
  <Option K='100' Exp='2019-01-01' />
  <Strategy name='calendar'>
    <Option K='110' Exp='2019-01-01' />
    <Option K='100' Exp='2020-01-01' />
  </Strategy>
</Portfolio>";

    let doc = Document::parse_str(xml).expect("failed to parse");
    let root = doc.root_element().expect("no root element");

    for path in ["Portfolio", "/Portfolio", "Portfolio/Strategy", "//Option", "/Portfolio/*"] {
        let matches = evaluate(&doc, doc.root(), path).expect("path failed");
        println!("{path:<20} -> {} match(es)", matches.len());
    }

    // An absolute path works from anywhere in the tree
    let nested = doc
        .descendant_elements(root, Some("Option"))
        .last()
        .expect("no options");
    let top = evaluate(&doc, nested, "/Portfolio").expect("path failed");
    println!("\n/Portfolio from a nested option finds the root: {}", top == [root]);

    // Reuse one compiled path across several contexts
    let options = compile("Option").expect("compile failed");
    for strategy in doc.element_children(root, Some("Strategy")) {
        let count = QueryContext::new(&doc, strategy).select(&options).len();
        println!(
            "strategy {} holds {count} option(s)",
            doc.attribute(strategy, "name").unwrap_or("?")
        );
    }

    println!("\nAll options:");
    print!("{}", render(&doc, doc.root(), "//Option").expect("path failed"));

    match evaluate(&doc, doc.root(), "Option[@K='100']") {
        Ok(_) => println!("unexpected success"),
        Err(e) => println!("\nrejected: {e}"),
    }
}
