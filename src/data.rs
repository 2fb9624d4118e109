//! Data
//!
//! The contract examples have to fulfil to be classified by, or grow, a tree,
//! and a feature-map implementation of it.
use crate::constants::ABSENT_FEATURE_VALUE;
use crate::split::Split;
use hashbrown::{HashMap, HashSet};
use serde::{Deserialize, Serialize};

/// Something a tree can classify.
pub trait Classifiable {
    /// The feature keys this example carries.
    fn features(&self) -> HashSet<&str>;
    /// Value of a feature, features the example does not carry read as zero.
    fn value(&self, feature: &str) -> f64;
    /// A split that sends `self` and `other` to different sides,
    /// or `None` if no feature tells them apart.
    fn partition(&self, other: &Self) -> Option<Split>
    where
        Self: Sized;
}

/// An example made of named numeric features.
#[derive(Deserialize, Serialize, Clone, Debug, Default, PartialEq)]
pub struct Example {
    values: HashMap<String, f64>,
}

impl Example {
    pub fn new(values: HashMap<String, f64>) -> Self {
        Example { values }
    }

    /// Build an example from free text. Every lowercase alphanumeric word is a
    /// feature, valued by its relative frequency in the text.
    pub fn from_text(text: &str) -> Self {
        let mut counts: HashMap<String, usize> = HashMap::new();
        let mut total = 0_usize;
        for word in text.split(|c: char| !c.is_alphanumeric()).filter(|w| !w.is_empty()) {
            *counts.entry(word.to_lowercase()).or_insert(0) += 1;
            total += 1;
        }
        counts
            .into_iter()
            .map(|(word, count)| (word, count as f64 / total as f64))
            .collect()
    }

    pub fn get(&self, feature: &str) -> Option<f64> {
        self.values.get(feature).copied()
    }

    pub fn insert(&mut self, feature: impl Into<String>, value: f64) -> Option<f64> {
        self.values.insert(feature.into(), value)
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }
}

impl<K: Into<String>> FromIterator<(K, f64)> for Example {
    fn from_iter<I: IntoIterator<Item = (K, f64)>>(iter: I) -> Self {
        Example {
            values: iter.into_iter().map(|(k, v)| (k.into(), v)).collect(),
        }
    }
}

impl Classifiable for Example {
    fn features(&self) -> HashSet<&str> {
        self.values.keys().map(String::as_str).collect()
    }

    fn value(&self, feature: &str) -> f64 {
        self.get(feature).unwrap_or(ABSENT_FEATURE_VALUE)
    }

    /// Split on the feature where the two examples differ the most, with the
    /// threshold halfway between them. Ties go to the smallest feature key.
    fn partition(&self, other: &Self) -> Option<Split> {
        let mut keys: Vec<&str> = self
            .values
            .keys()
            .chain(other.values.keys())
            .map(String::as_str)
            .collect();
        keys.sort_unstable();
        keys.dedup();

        let mut best: Option<(&str, f64)> = None;
        for key in keys {
            let diff = (self.value(key) - other.value(key)).abs();
            if diff > best.map_or(0.0, |(_, d)| d) {
                best = Some((key, diff));
            }
        }

        best.map(|(key, _)| {
            let (lo, hi) = if self.value(key) < other.value(key) {
                (self.value(key), other.value(key))
            } else {
                (other.value(key), self.value(key))
            };
            let mid = lo + (hi - lo) / 2.0;
            // Neighbouring floats can round the midpoint down onto `lo`.
            let threshold = if lo < mid { mid } else { hi };
            Split::new(key, threshold)
        })
    }
}
