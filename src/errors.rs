//! Errors
//!
//! Custom error types used throughout the `classification_tree` crate.
use thiserror::Error;

/// Errors that can occur while building, loading or using a classification tree.
#[derive(Debug, Error)]
pub enum ClassificationError {
    /// Examples and labels differ in length, or both are empty.
    #[error("Examples and labels must be non-empty and of equal length, got {0} examples and {1} labels.")]
    MismatchedInput(usize, usize),
    /// The example lacks a feature used by a split somewhere in the tree.
    #[error("Example does not contain feature {0}, which is used by the tree.")]
    CannotClassify(String),
    /// Two examples with different labels could not be separated by any feature.
    #[error("Unable to partition examples, no feature separates {0} from {1}.")]
    Inseparable(String, String),
    /// A node was expected, but the input ended.
    #[error("Tree description ended early, expected a node after line {0}.")]
    TruncatedInput(usize),
    /// A split or threshold line without a `:` separator.
    #[error("Malformed line {0}: {1}")]
    MalformedLine(usize, String),
    /// The threshold line could not be parsed as a floating point number.
    #[error("Invalid threshold on line {0}: {1}")]
    InvalidThreshold(usize, String),
    /// Unable to write a tree.
    #[error("Unable to write tree: {0}")]
    UnableToWrite(String),
    /// Unable to read a tree.
    #[error("Unable to read tree: {0}")]
    UnableToRead(String),
    /// First value is the name of the parameter, second is expected, third is what was passed.
    #[error("Invalid parameter value passed for {0}, expected {1} but {2} provided.")]
    InvalidParameter(String, String, String),
}

impl ClassificationError {
    /// Whether the error was caused by the arguments handed to the tree,
    /// rather than by the tree description or the underlying IO.
    pub fn is_invalid_argument(&self) -> bool {
        matches!(
            self,
            ClassificationError::MismatchedInput(..)
                | ClassificationError::CannotClassify(_)
                | ClassificationError::Inseparable(..)
        )
    }
}
