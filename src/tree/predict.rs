use crate::classifier::Classifier;
use crate::data::Classifiable;
use crate::errors::ClassificationError;
use crate::node::Node;
use crate::tree::tree::ClassificationTree;
use rayon::prelude::*;
use std::io::Write;

impl ClassificationTree {
    /// First feature (in pre-order) used by a split anywhere in the tree that
    /// the example does not carry. Splits off the example's own path count too.
    pub fn missing_feature<E: Classifiable>(&self, example: &E) -> Option<&str> {
        let features = example.features();
        self.iter().find_map(|(node, _)| match node {
            Node::Split { split, .. } if !features.contains(split.feature()) => Some(split.feature()),
            _ => None,
        })
    }

    /// Classify every example, in parallel when `cfg.parallel` is set.
    /// Fails on the first example the tree cannot classify.
    pub fn classify_all<E: Classifiable + Sync>(&self, examples: &[E]) -> Result<Vec<&str>, ClassificationError> {
        if !self.cfg.parallel {
            return examples.iter().map(|e| self.classify(e)).collect();
        }
        match self.cfg.num_threads {
            None => examples.par_iter().map(|e| self.classify(e)).collect(),
            Some(0) => Err(ClassificationError::InvalidParameter(
                "num_threads".to_string(),
                "a positive number of threads".to_string(),
                "0".to_string(),
            )),
            Some(num_threads) => {
                let pool = rayon::ThreadPoolBuilder::new()
                    .num_threads(num_threads)
                    .build()
                    .map_err(|e| {
                        ClassificationError::InvalidParameter(
                            "num_threads".to_string(),
                            "a buildable thread pool".to_string(),
                            e.to_string(),
                        )
                    })?;
                pool.install(|| examples.par_iter().map(|e| self.classify(e)).collect())
            }
        }
    }
}

impl Classifier for ClassificationTree {
    fn can_classify<E: Classifiable>(&self, example: &E) -> bool {
        self.missing_feature(example).is_none()
    }

    fn classify<E: Classifiable>(&self, example: &E) -> Result<&str, ClassificationError> {
        if let Some(feature) = self.missing_feature(example) {
            return Err(ClassificationError::CannotClassify(feature.to_string()));
        }
        let mut node = &self.root;
        loop {
            node = match node {
                Node::Leaf { label } => return Ok(label.as_str()),
                Node::Split { split, left, right } => {
                    if split.evaluate(example) {
                        left.as_ref()
                    } else {
                        right.as_ref()
                    }
                }
            };
        }
    }

    fn save<W: Write>(&self, sink: &mut W) -> Result<(), ClassificationError> {
        self.write_text(sink)
    }
}
