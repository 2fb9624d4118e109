mod node;

// Modules
pub mod classifier;
pub mod constants;
pub mod data;
pub mod errors;
pub mod grower;
pub mod split;
pub mod tree;

// Individual classes, and functions
pub use classifier::config::{TreeConfig, TreeIO};
pub use classifier::Classifier;
pub use data::{Classifiable, Example};
pub use errors::ClassificationError;
pub use grower::Inducer;
pub use node::Node;
pub use split::Split;
pub use tree::tree::ClassificationTree;
