//! # xmlnav
//!
//! A small XML-like tree with LINQ-style navigation, functional
//! composition, and a restricted path-query subset.
//!
//! The crate covers five concerns:
//!
//! - [`parser`]: a lazy [`Scanner`](parser::Scanner) token stream and a
//!   [`TreeBuilder`](parser::TreeBuilder) that folds it into a tree.
//! - [`tree`]: the arena-backed [`Document`], its navigation queries, and
//!   [`ElementBuilder`] for composing trees in code.
//! - [`xpath`]: child, descendant and wildcard steps, evaluated in
//!   document order.
//! - [`serial`]: markup output and a structural debug dump.
//! - [`error`]: the error types shared by all of the above.
//!
//! ## Quick Start
//!
//! ```
//! use xmlnav::Document;
//!
//! let doc = Document::parse_str(
//!     "<Portfolio><Option K='100'/><Strategy><Option K='110'/></Strategy></Portfolio>",
//! )
//! .unwrap();
//! let root = doc.root_element().unwrap();
//! assert_eq!(doc.node_name(root), Some("Portfolio"));
//!
//! let strikes: Vec<&str> = doc
//!     .descendant_elements(root, Some("Option"))
//!     .filter_map(|id| doc.attribute(id, "K"))
//!     .collect();
//! assert_eq!(strikes, ["100", "110"]);
//! ```

pub mod error;
pub mod parser;
pub mod serial;
pub mod tree;
pub mod xpath;

// Re-export primary types at the crate root for convenience.
pub use error::{Error, ParseError, Result, SourceLocation, TreeError};
pub use parser::ParseOptions;
pub use tree::{Attribute, Document, ElementBuilder, NodeId, NodeKind};
pub use xpath::PathError;
