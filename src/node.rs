use crate::split::Split;
use std::fmt;

/// A node of a classification tree.
#[derive(Clone, Debug, PartialEq)]
pub enum Node {
    /// Terminal node holding the predicted label.
    Leaf { label: String },
    /// Internal node, examples the split evaluates to `true` go left.
    Split {
        split: Split,
        left: Box<Node>,
        right: Box<Node>,
    },
}

impl Node {
    pub fn leaf(label: impl Into<String>) -> Self {
        Node::Leaf { label: label.into() }
    }

    pub fn split(split: Split, left: Node, right: Node) -> Self {
        Node::Split {
            split,
            left: Box::new(left),
            right: Box::new(right),
        }
    }

    pub fn is_leaf(&self) -> bool {
        matches!(self, Node::Leaf { .. })
    }
}

impl fmt::Display for Node {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            Node::Leaf { label } => write!(f, "leaf={}", label),
            Node::Split { split, .. } => write!(f, "[{} < {:?}]", split.feature, split.threshold),
        }
    }
}

/// Node used while a tree is grown from examples. Leaves refer to the examples
/// that reached them by their insertion index: `rep` created the leaf and is
/// partitioned against conflicting examples, `absorbed` arrived later with the same label.
#[derive(Debug)]
pub(crate) enum GrowNode {
    Leaf {
        rep: usize,
        absorbed: Vec<usize>,
    },
    Split {
        split: Split,
        left: Box<GrowNode>,
        right: Box<GrowNode>,
    },
}

impl GrowNode {
    pub(crate) fn leaf(rep: usize) -> Self {
        GrowNode::Leaf {
            rep,
            absorbed: Vec::new(),
        }
    }

    /// Drop the example indices, labeling each leaf after its `rep`.
    pub(crate) fn into_node(self, labels: &[String]) -> Node {
        match self {
            GrowNode::Leaf { rep, .. } => Node::leaf(labels[rep].as_str()),
            GrowNode::Split { split, left, right } => {
                Node::split(split, left.into_node(labels), right.into_node(labels))
            }
        }
    }
}
