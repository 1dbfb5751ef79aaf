//! Navigation and composition walkthrough over a small option portfolio.
//!
//! Run with: `cargo run --example cheat_sheet`
#![allow(clippy::expect_used)]

use xmlnav::parser::ParseOptions;
use xmlnav::serial::{serialize_with_options, SerializeOptions};
use xmlnav::{Document, ElementBuilder};

const PORTFOLIO: &str = "<Portfolio>
    <!-- Some Options -->
    <Option K='100' Exp='2019-01-01' />
    <Strategy>
        <Option K='110' Exp='2019-01-01' />
        <Option K='100' Exp='2020-01-01' />
    </Strategy>
</Portfolio>";

fn main() {
    let opts = ParseOptions::default().trim_whitespace(true);
    let doc = Document::parse_str_with_options(PORTFOLIO, &opts).expect("failed to parse");
    let root = doc.root_element().expect("no root element");

    // First child is the comment, first element child is the loose option
    let first = doc.first_child(root).expect("no children");
    println!("first node: {}", doc.node(first).kind.type_name());
    let option = doc
        .first_element_child(root, Some("Option"))
        .expect("no option");
    println!("first option K={}", doc.attribute(option, "K").unwrap_or("?"));

    // Every option in document order
    let strikes: Vec<&str> = doc
        .descendant_elements(root, Some("Option"))
        .filter_map(|id| doc.attribute(id, "K"))
        .collect();
    println!("all strikes: {strikes:?}");

    // Walk up from a nested option
    let nested = doc
        .descendant_elements(root, Some("Option"))
        .last()
        .expect("no nested option");
    let path: Vec<&str> = doc
        .ancestors(nested, true)
        .filter_map(|id| doc.node_name(id))
        .collect();
    println!("ancestors of last option: {path:?}");

    // Siblings on either side of the strategy
    let strategy = doc
        .first_element_child(root, Some("Strategy"))
        .expect("no strategy");
    let before = doc.siblings_before(strategy, true, None).count();
    let after = doc.siblings_after(strategy, true, None).count();
    println!("strategy has {before} element(s) before, {after} after");
    println!(
        "option before strategy: {}",
        doc.is_before(option, strategy).expect("same tree")
    );

    // Compose a new portfolio functionally
    let composed = ElementBuilder::new("Portfolio")
        .comment("Composed")
        .children(
            [("100", "2019-01-01"), ("110", "2020-01-01")]
                .into_iter()
                .map(|(k, exp)| ElementBuilder::new("Option").attr("K", k).attr("Exp", exp)),
        )
        .build()
        .expect("failed to compose");

    let pretty = SerializeOptions::default().indent(true);
    print!("\n{}", serialize_with_options(&composed, &pretty));
}
