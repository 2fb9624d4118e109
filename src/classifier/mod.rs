//! Classifier
//!
//! The surface every classifier in the crate exposes: coverage checking,
//! classification, saving, and accuracy evaluation on labeled data.
use crate::data::Classifiable;
use crate::errors::ClassificationError;
use hashbrown::HashMap;
use std::io::Write;

// public modules
pub mod config;

// private modules
mod setters;

pub trait Classifier {
    /// Whether `classify` can handle the example.
    fn can_classify<E: Classifiable>(&self, example: &E) -> bool;

    /// Predicted label of the example.
    fn classify<E: Classifiable>(&self, example: &E) -> Result<&str, ClassificationError>;

    /// Write the classifier to `sink` in a form it can be loaded back from.
    fn save<W: Write>(&self, sink: &mut W) -> Result<(), ClassificationError>;

    /// Share of the examples of each true label that are classified correctly.
    ///
    /// * `examples` - Examples to classify.
    /// * `labels` - True label of each example.
    fn calculate_accuracy<E, S>(&self, examples: &[E], labels: &[S]) -> Result<HashMap<String, f64>, ClassificationError>
    where
        E: Classifiable,
        S: AsRef<str>,
    {
        if examples.len() != labels.len() {
            return Err(ClassificationError::MismatchedInput(examples.len(), labels.len()));
        }
        let mut counts: HashMap<String, (usize, usize)> = HashMap::new();
        for (example, label) in examples.iter().zip(labels) {
            let predicted = self.classify(example)?;
            let (correct, total) = counts.entry(label.as_ref().to_string()).or_insert((0, 0));
            *total += 1;
            if predicted == label.as_ref() {
                *correct += 1;
            }
        }
        Ok(counts
            .into_iter()
            .map(|(label, (correct, total))| (label, correct as f64 / total as f64))
            .collect())
    }
}
