//! Compiled form of a path expression.
//!
//! A [`LocationPath`] is a list of [`Step`]s, each pairing an [`Axis`]
//! (how to move from the current candidates) with a [`NodeTest`] (which of
//! the reached elements to keep).

use std::fmt;

/// A parsed path expression.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LocationPath {
    /// Whether evaluation starts at the top of the context's tree rather
    /// than at the context node.
    pub absolute: bool,
    /// The steps, evaluated left to right. Never empty.
    pub steps: Vec<Step>,
}

/// One step of a location path.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Step {
    /// How the step moves from each candidate.
    pub axis: Axis,
    /// Which reached elements the step keeps.
    pub test: NodeTest,
}

/// The direction of a step.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Axis {
    /// Element children of each candidate (`/name` or a leading `name`).
    Child,
    /// Element descendants of each candidate, at any depth (`//name`).
    Descendant,
}

/// Which elements a step keeps.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum NodeTest {
    /// Elements with exactly this tag name.
    Name(String),
    /// Any element (`*`).
    Any,
}

impl NodeTest {
    /// Returns `true` if an element named `name` passes the test.
    #[must_use]
    pub fn matches(&self, name: &str) -> bool {
        match self {
            Self::Name(expected) => expected == name,
            Self::Any => true,
        }
    }
}

impl fmt::Display for LocationPath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, step) in self.steps.iter().enumerate() {
            match step.axis {
                Axis::Descendant => f.write_str("//")?,
                Axis::Child if i > 0 || self.absolute => f.write_str("/")?,
                Axis::Child => {}
            }
            match &step.test {
                NodeTest::Name(name) => f.write_str(name)?,
                NodeTest::Any => f.write_str("*")?,
            }
        }
        Ok(())
    }
}
