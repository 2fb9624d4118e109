use crate::classifier::config::TreeConfig;
use crate::tree::tree::ClassificationTree;

impl ClassificationTree {
    // Set methods for parameters

    /// Replace the whole configuration of the tree.
    /// * `cfg` - The new configuration.
    pub fn set_cfg(mut self, cfg: TreeConfig) -> Self {
        self.cfg = cfg;
        self
    }

    /// Set whether batch classification runs in parallel.
    /// * `parallel` - Classify batches with rayon.
    pub fn set_parallel(mut self, parallel: bool) -> Self {
        self.cfg.parallel = parallel;
        self
    }

    /// Set the number of threads on the tree.
    /// * `num_threads` - Threads used by parallel batch classification, `None` uses
    ///   the global rayon pool.
    pub fn set_num_threads(mut self, num_threads: Option<usize>) -> Self {
        self.cfg.num_threads = num_threads;
        self
    }

    /// Set whether loading requires the `Threshold` marker on threshold lines.
    /// * `strict_thresholds` - Reject threshold lines without the marker.
    pub fn set_strict_thresholds(mut self, strict_thresholds: bool) -> Self {
        self.cfg.strict_thresholds = strict_thresholds;
        self
    }
}
