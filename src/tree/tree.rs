use crate::classifier::config::{TreeConfig, TreeIO};
use crate::constants::{SPLIT_MARKER, THRESHOLD_MARKER, VALUE_SEPARATOR};
use crate::data::Classifiable;
use crate::errors::ClassificationError;
use crate::grower::Inducer;
use crate::node::Node;
use crate::split::Split;
use hashbrown::HashSet;
use log::{info, log_enabled, warn, Level};
use serde::{Deserialize, Serialize};
use std::fmt::{self, Display};
use std::io::{self, BufRead, Write};

/// A binary classification tree, either loaded from its pre-order text form
/// or grown from labeled examples.
///
/// Serialized as a flat list of nodes, so deep trees do not nest.
#[derive(Deserialize, Serialize, Clone, Debug, PartialEq)]
#[serde(into = "TreeRecord", try_from = "TreeRecord")]
pub struct ClassificationTree {
    pub(crate) root: Node,
    pub cfg: TreeConfig,
}

impl ClassificationTree {
    pub fn new(root: Node) -> Self {
        ClassificationTree {
            root,
            cfg: TreeConfig::default(),
        }
    }

    /// Grow a tree so that every example is classified to its paired label.
    ///
    /// * `examples` - Examples, in insertion order.
    /// * `labels` - Label of each example.
    ///
    /// Fails with `ClassificationError::MismatchedInput` if the two differ in
    /// length or are empty.
    pub fn from_examples<E, S>(examples: Vec<E>, labels: Vec<S>) -> Result<Self, ClassificationError>
    where
        E: Classifiable,
        S: Into<String>,
    {
        if examples.len() != labels.len() || examples.is_empty() {
            return Err(ClassificationError::MismatchedInput(examples.len(), labels.len()));
        }
        let mut inducer = Inducer::new();
        for (example, label) in examples.into_iter().zip(labels) {
            inducer.insert(example, label)?;
        }
        inducer.finish()
    }

    /// Load a tree from its pre-order text form, see [`ClassificationTree::save`].
    /// Only the lines making up the tree are consumed from `reader`.
    pub fn from_reader<R: BufRead>(reader: R) -> Result<Self, ClassificationError> {
        Self::from_reader_with_config(reader, TreeConfig::default())
    }

    pub fn from_reader_with_config<R: BufRead>(reader: R, cfg: TreeConfig) -> Result<Self, ClassificationError> {
        let (tree, _) = Self::load(reader, cfg)?;
        Ok(tree)
    }

    /// Load a tree from a string holding its text form. Lines after the
    /// last node are ignored.
    pub fn from_text(text: &str) -> Result<Self, ClassificationError> {
        let (tree, consumed) = Self::load(text.as_bytes(), TreeConfig::default())?;
        let trailing = text.lines().count().saturating_sub(consumed);
        if trailing > 0 {
            warn!("Ignoring {} lines after the end of the tree.", trailing);
        }
        Ok(tree)
    }

    fn load<R: BufRead>(reader: R, cfg: TreeConfig) -> Result<(Self, usize), ClassificationError> {
        let mut lines = TreeLines {
            lines: reader.lines(),
            line_no: 0,
            strict_thresholds: cfg.strict_thresholds,
        };
        let root = lines.parse_node()?;
        let tree = ClassificationTree { root, cfg };
        if log_enabled!(Level::Info) {
            info!(
                "Loaded tree from {} lines, {} splits, {} leaves, depth {}.",
                lines.line_no,
                tree.n_splits(),
                tree.n_leaves(),
                tree.depth()
            );
        }
        Ok((tree, lines.line_no))
    }

    pub fn root(&self) -> &Node {
        &self.root
    }

    /// Nodes in pre-order, each with its depth.
    pub fn iter(&self) -> PreOrder<'_> {
        PreOrder {
            stack: vec![(&self.root, 0)],
        }
    }

    /// Length of the longest path from the root to a leaf.
    pub fn depth(&self) -> usize {
        self.iter().map(|(_, depth)| depth).max().unwrap_or(0)
    }

    pub fn n_leaves(&self) -> usize {
        self.iter().filter(|(node, _)| node.is_leaf()).count()
    }

    pub fn n_splits(&self) -> usize {
        self.iter().filter(|(node, _)| !node.is_leaf()).count()
    }

    /// Feature keys read by the splits of the tree.
    pub fn features(&self) -> HashSet<&str> {
        self.iter()
            .filter_map(|(node, _)| match node {
                Node::Split { split, .. } => Some(split.feature()),
                Node::Leaf { .. } => None,
            })
            .collect()
    }

    /// Labels the tree can predict.
    pub fn labels(&self) -> HashSet<&str> {
        self.iter()
            .filter_map(|(node, _)| match node {
                Node::Leaf { label } => Some(label.as_str()),
                Node::Split { .. } => None,
            })
            .collect()
    }

    /// Write the tree in pre-order, one line per leaf and two per split.
    ///
    /// Fails with `ClassificationError::UnableToWrite` before writing anything
    /// if a label or feature key would not load back as written: a label
    /// holding the split marker or a line break, or a feature key holding a
    /// line break.
    pub(crate) fn write_text<W: Write>(&self, sink: &mut W) -> Result<(), ClassificationError> {
        if let Some(reason) = self.iter().find_map(|(node, _)| unwritable(node)) {
            return Err(ClassificationError::UnableToWrite(reason));
        }
        for (node, _) in self.iter() {
            match node {
                Node::Leaf { label } => writeln!(sink, "{}", label),
                Node::Split { split, .. } => writeln!(sink, "{}", split),
            }
            .map_err(|e| ClassificationError::UnableToWrite(e.to_string()))?;
        }
        Ok(())
    }

    /// The text form of the tree as a string.
    pub fn to_text(&self) -> Result<String, ClassificationError> {
        let mut buf = Vec::new();
        self.write_text(&mut buf)?;
        String::from_utf8(buf).map_err(|e| ClassificationError::UnableToWrite(e.to_string()))
    }
}

impl TreeIO for ClassificationTree {}

fn has_line_break(text: &str) -> bool {
    text.contains(['\n', '\r'])
}

fn unwritable(node: &Node) -> Option<String> {
    match node {
        Node::Leaf { label } if label.contains(SPLIT_MARKER) || has_line_break(label) => {
            Some(format!("label {:?} cannot be written as a leaf line", label))
        }
        Node::Split { split, .. } if has_line_break(split.feature()) => {
            Some(format!("feature {:?} cannot be written on one line", split.feature()))
        }
        _ => None,
    }
}

/// Serialized form of a node. Children are referred to by their position in
/// [`TreeRecord::nodes`], which is always after their parent's.
#[derive(Deserialize, Serialize)]
enum NodeRecord {
    Leaf {
        label: String,
    },
    Split {
        split: Split,
        left_child: usize,
        right_child: usize,
    },
}

/// Serialized form of a tree, nodes listed from the root.
#[derive(Deserialize, Serialize)]
struct TreeRecord {
    nodes: Vec<NodeRecord>,
    #[serde(default)]
    cfg: TreeConfig,
}

impl From<ClassificationTree> for TreeRecord {
    fn from(tree: ClassificationTree) -> Self {
        let mut slots: Vec<Option<NodeRecord>> = vec![None];
        let mut stack = vec![(tree.root, 0)];
        while let Some((node, num)) = stack.pop() {
            slots[num] = Some(match node {
                Node::Leaf { label } => NodeRecord::Leaf { label },
                Node::Split { split, left, right } => {
                    let left_child = slots.len();
                    let right_child = left_child + 1;
                    slots.push(None);
                    slots.push(None);
                    stack.push((*right, right_child));
                    stack.push((*left, left_child));
                    NodeRecord::Split {
                        split,
                        left_child,
                        right_child,
                    }
                }
            });
        }
        TreeRecord {
            nodes: slots.into_iter().flatten().collect(),
            cfg: tree.cfg,
        }
    }
}

impl TryFrom<TreeRecord> for ClassificationTree {
    type Error = ClassificationError;

    // Children come after their parent, so building from the back has every
    // child ready when its parent is reached.
    fn try_from(record: TreeRecord) -> Result<Self, Self::Error> {
        let mut built: Vec<Option<Node>> = Vec::with_capacity(record.nodes.len());
        built.resize_with(record.nodes.len(), || None);
        for (num, node) in record.nodes.into_iter().enumerate().rev() {
            built[num] = Some(match node {
                NodeRecord::Leaf { label } => Node::Leaf { label },
                NodeRecord::Split {
                    split,
                    left_child,
                    right_child,
                } => {
                    let left = take_child(&mut built, num, left_child)?;
                    let right = take_child(&mut built, num, right_child)?;
                    Node::split(split, left, right)
                }
            });
        }
        let root = built
            .first_mut()
            .and_then(Option::take)
            .ok_or_else(|| ClassificationError::UnableToRead("tree has no nodes".to_string()))?;
        if let Some(orphan) = built.iter().position(Option::is_some) {
            return Err(ClassificationError::UnableToRead(format!(
                "node {} is not reachable from the root",
                orphan
            )));
        }
        Ok(ClassificationTree { root, cfg: record.cfg })
    }
}

fn take_child(built: &mut [Option<Node>], parent: usize, child: usize) -> Result<Node, ClassificationError> {
    if child <= parent {
        return Err(ClassificationError::UnableToRead(format!(
            "node {} has child {} listed before it",
            parent, child
        )));
    }
    built.get_mut(child).and_then(Option::take).ok_or_else(|| {
        ClassificationError::UnableToRead(format!("node {} has missing or shared child {}", parent, child))
    })
}

/// Pre-order walk over the nodes of a tree, left subtree before right.
pub struct PreOrder<'a> {
    stack: Vec<(&'a Node, usize)>,
}

impl<'a> Iterator for PreOrder<'a> {
    type Item = (&'a Node, usize);

    fn next(&mut self) -> Option<Self::Item> {
        let (node, depth) = self.stack.pop()?;
        if let Node::Split { left, right, .. } = node {
            self.stack.push((right.as_ref(), depth + 1));
            self.stack.push((left.as_ref(), depth + 1));
        }
        Some((node, depth))
    }
}

/// Line source for the loader, keeps count of the lines consumed.
struct TreeLines<I> {
    lines: I,
    line_no: usize,
    strict_thresholds: bool,
}

impl<I: Iterator<Item = io::Result<String>>> TreeLines<I> {
    fn next_line(&mut self) -> Result<String, ClassificationError> {
        let line = self
            .lines
            .next()
            .ok_or(ClassificationError::TruncatedInput(self.line_no))?;
        self.line_no += 1;
        line.map_err(|e| ClassificationError::UnableToRead(e.to_string()))
    }

    // Node first, then the left subtree, then the right subtree.
    fn parse_node(&mut self) -> Result<Node, ClassificationError> {
        let line = self.next_line()?;
        if !line.contains(SPLIT_MARKER) {
            return Ok(Node::Leaf { label: line });
        }
        let feature = value_of(&line)
            .ok_or_else(|| ClassificationError::MalformedLine(self.line_no, line.clone()))?
            .to_string();

        let threshold_line = self.next_line()?;
        if self.strict_thresholds && !threshold_line.contains(THRESHOLD_MARKER) {
            return Err(ClassificationError::MalformedLine(self.line_no, threshold_line));
        }
        let threshold = value_of(&threshold_line)
            .ok_or_else(|| ClassificationError::MalformedLine(self.line_no, threshold_line.clone()))?
            .trim()
            .parse::<f64>()
            .map_err(|_| ClassificationError::InvalidThreshold(self.line_no, threshold_line.clone()))?;

        let left = self.parse_node()?;
        let right = self.parse_node()?;
        Ok(Node::split(Split::new(feature, threshold), left, right))
    }
}

/// Text after the first separator, minus one leading space.
fn value_of(line: &str) -> Option<&str> {
    line.split_once(VALUE_SEPARATOR)
        .map(|(_, rest)| rest.strip_prefix(' ').unwrap_or(rest))
}

impl Display for ClassificationTree {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        let mut r = String::new();
        for (node, depth) in self.iter() {
            r += format!("{}{}\n", "      ".repeat(depth).as_str(), node).as_str();
        }
        write!(f, "{}", r)
    }
}
