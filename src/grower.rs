//! Grower
//!
//! Incremental induction of a tree from labeled examples. Every example either
//! lands on a leaf with its own label, or splits that leaf in two.
use crate::data::Classifiable;
use crate::errors::ClassificationError;
use crate::node::GrowNode;
use crate::tree::tree::ClassificationTree;
use log::{debug, info, log_enabled, Level};

/// Folds a stream of `(example, label)` pairs into a tree.
///
/// The examples are kept until [`Inducer::finish`], leaves of the growing
/// tree refer to them by insertion index.
#[derive(Debug)]
pub struct Inducer<E> {
    root: Option<GrowNode>,
    examples: Vec<E>,
    labels: Vec<String>,
    n_splits: usize,
}

impl<E: Classifiable> Default for Inducer<E> {
    fn default() -> Self {
        Self::new()
    }
}

impl<E: Classifiable> Inducer<E> {
    pub fn new() -> Self {
        Inducer {
            root: None,
            examples: Vec::new(),
            labels: Vec::new(),
            n_splits: 0,
        }
    }

    /// Number of examples inserted so far.
    pub fn len(&self) -> usize {
        self.examples.len()
    }

    pub fn is_empty(&self) -> bool {
        self.examples.is_empty()
    }

    /// Number of splits created so far.
    pub fn n_splits(&self) -> usize {
        self.n_splits
    }

    /// Add one labeled example. Returns `true` if the leaf the example reached
    /// carried a different label and was split, `false` if it joined the leaf.
    ///
    /// If no split separates the example from the leaf's examples, the tree
    /// is left as it was and `ClassificationError::Inseparable` is returned.
    pub fn insert(&mut self, example: E, label: impl Into<String>) -> Result<bool, ClassificationError> {
        let idx = self.examples.len();
        self.examples.push(example);
        self.labels.push(label.into());

        let Some(root) = self.root.as_mut() else {
            self.root = Some(GrowNode::leaf(idx));
            return Ok(false);
        };
        match place(root, idx, &self.examples, &self.labels) {
            Ok(n_splits) => {
                self.n_splits += n_splits;
                Ok(n_splits > 0)
            }
            Err(e) => {
                self.examples.pop();
                self.labels.pop();
                Err(e)
            }
        }
    }

    /// Freeze the grown tree, dropping the retained examples.
    pub fn finish(self) -> Result<ClassificationTree, ClassificationError> {
        let root = self.root.ok_or(ClassificationError::MismatchedInput(0, 0))?;
        let tree = ClassificationTree::new(root.into_node(&self.labels));
        if log_enabled!(Level::Info) {
            info!(
                "Grew tree from {} examples, {} splits, {} leaves, depth {}.",
                self.examples.len(),
                self.n_splits,
                tree.n_leaves(),
                tree.depth()
            );
        }
        Ok(tree)
    }
}

/// Route example `idx` down from `node` to a leaf. A leaf with the same label
/// absorbs it, any other leaf is rebuilt in place. Returns the number of splits created.
fn place<E: Classifiable>(
    node: &mut GrowNode,
    idx: usize,
    examples: &[E],
    labels: &[String],
) -> Result<usize, ClassificationError> {
    match node {
        GrowNode::Split { split, left, right } => {
            if split.evaluate(&examples[idx]) {
                place(left, idx, examples, labels)
            } else {
                place(right, idx, examples, labels)
            }
        }
        GrowNode::Leaf { rep, absorbed } => {
            if labels[*rep] == labels[idx] {
                absorbed.push(idx);
                return Ok(0);
            }
            let (subtree, n_splits) = split_leaf(*rep, absorbed, idx, examples, labels)?;
            *node = subtree;
            Ok(n_splits)
        }
    }
}

/// Subtree replacing the leaf of `rep` once example `idx` conflicts with it.
///
/// `rep` partitions against the new example, which lands left if the split
/// evaluates it to `true` and right otherwise, with the old leaf opposite.
/// Absorbed examples the split sends to the new example's side are placed
/// again below the new split, so they keep their label.
fn split_leaf<E: Classifiable>(
    rep: usize,
    absorbed: &[usize],
    idx: usize,
    examples: &[E],
    labels: &[String],
) -> Result<(GrowNode, usize), ClassificationError> {
    let split = examples[rep]
        .partition(&examples[idx])
        .filter(|s| s.evaluate(&examples[rep]) != s.evaluate(&examples[idx]))
        .ok_or_else(|| ClassificationError::Inseparable(labels[rep].clone(), labels[idx].clone()))?;
    debug!(
        "Splitting leaf {} on [{} < {:?}] for conflicting label {}.",
        labels[rep], split.feature, split.threshold, labels[idx]
    );

    let goes_left = split.evaluate(&examples[idx]);
    let (displaced, stay): (Vec<usize>, Vec<usize>) = absorbed
        .iter()
        .copied()
        .partition(|&m| split.evaluate(&examples[m]) == goes_left);

    let fresh = Box::new(GrowNode::leaf(idx));
    let old = Box::new(GrowNode::Leaf { rep, absorbed: stay });
    let (left, right) = if goes_left { (fresh, old) } else { (old, fresh) };
    let mut subtree = GrowNode::Split { split, left, right };

    let mut n_splits = 1;
    for m in displaced {
        n_splits += place(&mut subtree, m, examples, labels)?;
    }
    Ok((subtree, n_splits))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::classifier::Classifier;
    use crate::data::Example;
    use crate::node::Node;
    use crate::split::Split;

    fn ex(f: f64) -> Example {
        Example::from_iter([("f", f)])
    }

    #[test]
    fn test_first_insert_seeds_leaf() {
        let mut inducer = Inducer::new();
        assert!(inducer.is_empty());
        assert!(!inducer.insert(ex(5.0), "spam").unwrap());
        assert_eq!(inducer.len(), 1);
        let tree = inducer.finish().unwrap();
        assert_eq!(tree.root(), &Node::leaf("spam"));
    }

    #[test]
    fn test_conflict_splits_leaf() {
        let mut inducer = Inducer::new();
        inducer.insert(ex(5.0), "spam").unwrap();
        assert!(inducer.insert(ex(1.0), "ham").unwrap());
        let tree = inducer.finish().unwrap();
        let expected = Node::split(Split::new("f", 3.0), Node::leaf("ham"), Node::leaf("spam"));
        assert_eq!(tree.root(), &expected);
    }

    #[test]
    fn test_new_leaf_goes_right() {
        let mut inducer = Inducer::new();
        inducer.insert(ex(1.0), "ham").unwrap();
        inducer.insert(ex(5.0), "spam").unwrap();
        let tree = inducer.finish().unwrap();
        let expected = Node::split(Split::new("f", 3.0), Node::leaf("ham"), Node::leaf("spam"));
        assert_eq!(tree.root(), &expected);
    }

    #[test]
    fn test_old_leaf_can_split_again() {
        let mut inducer = Inducer::new();
        inducer.insert(ex(5.0), "spam").unwrap();
        inducer.insert(ex(1.0), "ham").unwrap();
        // Reaches the "spam" leaf (f >= 3), whose example is still around.
        assert!(inducer.insert(ex(9.0), "eggs").unwrap());
        assert_eq!(inducer.n_splits(), 2);
        let tree = inducer.finish().unwrap();
        let expected = Node::split(
            Split::new("f", 3.0),
            Node::leaf("ham"),
            Node::split(Split::new("f", 7.0), Node::leaf("spam"), Node::leaf("eggs")),
        );
        assert_eq!(tree.root(), &expected);
    }

    #[test]
    fn test_same_label_no_change() {
        let mut inducer = Inducer::new();
        inducer.insert(ex(5.0), "spam").unwrap();
        inducer.insert(ex(1.0), "ham").unwrap();
        assert!(!inducer.insert(ex(6.0), "spam").unwrap());
        assert_eq!(inducer.n_splits(), 1);
        assert_eq!(inducer.len(), 3);
    }

    #[test]
    fn test_absorbed_example_is_placed_again() {
        let mut inducer = Inducer::new();
        inducer.insert(ex(5.0), "a").unwrap();
        inducer.insert(ex(1.0), "a").unwrap();
        // Partitions 5 against 2 at 3.5, which would send the absorbed 1 to "b".
        assert!(inducer.insert(ex(2.0), "b").unwrap());
        assert_eq!(inducer.n_splits(), 2);
        let tree = inducer.finish().unwrap();
        let expected = Node::split(
            Split::new("f", 3.5),
            Node::split(Split::new("f", 1.5), Node::leaf("a"), Node::leaf("b")),
            Node::leaf("a"),
        );
        assert_eq!(tree.root(), &expected);
        assert_eq!(tree.classify(&ex(1.0)).unwrap(), "a");
        assert_eq!(tree.classify(&ex(2.0)).unwrap(), "b");
        assert_eq!(tree.classify(&ex(5.0)).unwrap(), "a");
    }

    #[test]
    fn test_inseparable_keeps_tree() {
        let mut inducer = Inducer::new();
        inducer.insert(ex(5.0), "spam").unwrap();
        let err = inducer.insert(ex(5.0), "ham").unwrap_err();
        assert!(matches!(err, ClassificationError::Inseparable(ref a, ref b) if a == "spam" && b == "ham"));
        assert_eq!(inducer.len(), 1);
        assert_eq!(inducer.n_splits(), 0);
        let tree = inducer.finish().unwrap();
        assert_eq!(tree.root(), &Node::leaf("spam"));
    }

    #[test]
    fn test_inseparable_absorbed_keeps_tree() {
        let mut inducer = Inducer::new();
        inducer.insert(ex(5.0), "a").unwrap();
        inducer.insert(ex(1.0), "a").unwrap();
        // Separable from the leaf's first example, but not from the absorbed one.
        let err = inducer.insert(ex(1.0), "b").unwrap_err();
        assert!(matches!(err, ClassificationError::Inseparable(..)));
        assert_eq!(inducer.len(), 2);
        assert_eq!(inducer.n_splits(), 0);
        assert!(!inducer.insert(ex(3.0), "a").unwrap());
        let tree = inducer.finish().unwrap();
        assert_eq!(tree.root(), &Node::leaf("a"));
    }

    #[test]
    fn test_finish_empty() {
        let inducer: Inducer<Example> = Inducer::new();
        assert!(matches!(inducer.finish(), Err(ClassificationError::MismatchedInput(0, 0))));
    }
}
