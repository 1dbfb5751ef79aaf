//! Tree serialization.
//!
//! [`xml`] writes a tree (or any subtree) back to markup, and [`debug`]
//! produces a one-line-per-node structural dump.

pub mod debug;
pub mod xml;

pub use xml::{
    serialize, serialize_node, serialize_node_with_options, serialize_with_options, QuoteStyle,
    SerializeOptions,
};
