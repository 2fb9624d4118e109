//! Split
//!
//! The decision rule stored on every internal node of a tree.
use crate::constants::{SPLIT_MARKER, THRESHOLD_MARKER};
use crate::data::Classifiable;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Routes an example to the left child when its value for `feature`
/// is below `threshold`, and to the right child otherwise.
#[derive(Deserialize, Serialize, Clone, Debug, PartialEq)]
pub struct Split {
    /// Feature key the rule reads.
    pub feature: String,
    /// Values strictly below go left.
    pub threshold: f64,
}

impl Split {
    pub fn new(feature: impl Into<String>, threshold: f64) -> Self {
        Split {
            feature: feature.into(),
            threshold,
        }
    }

    /// `true` sends the example left, `false` sends it right.
    #[inline]
    pub fn evaluate<E: Classifiable + ?Sized>(&self, example: &E) -> bool {
        example.value(&self.feature) < self.threshold
    }

    pub fn feature(&self) -> &str {
        &self.feature
    }
}

impl fmt::Display for Split {
    // Two lines, without a trailing newline. `{:?}` keeps the decimal point
    // on whole numbers and prints the shortest text that parses back exactly.
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(
            f,
            "{}: {}\n{}: {:?}",
            SPLIT_MARKER, self.feature, THRESHOLD_MARKER, self.threshold
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::Example;

    #[test]
    fn test_split_evaluate() {
        let split = Split::new("f", 3.0);
        assert!(split.evaluate(&Example::from_iter([("f", 1.0)])));
        assert!(!split.evaluate(&Example::from_iter([("f", 3.0)])));
        assert!(!split.evaluate(&Example::from_iter([("f", 4.5)])));
        // Absent features read as zero.
        assert!(split.evaluate(&Example::from_iter([("g", 10.0)])));
    }

    #[test]
    fn test_split_display() {
        assert_eq!(Split::new("f", 3.0).to_string(), "Feature: f\nThreshold: 3.0");
        assert_eq!(Split::new("free", 0.1).to_string(), "Feature: free\nThreshold: 0.1");
        assert_eq!(Split::new("x", -2.5).to_string(), "Feature: x\nThreshold: -2.5");
    }
}
