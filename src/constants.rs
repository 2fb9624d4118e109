/// Marker that identifies the first line of a split in the text format.
pub const SPLIT_MARKER: &str = "Feature";
/// Marker for the second line of a split in the text format.
pub const THRESHOLD_MARKER: &str = "Threshold";
/// Separator between a marker and its value.
pub const VALUE_SEPARATOR: char = ':';
/// Value of a feature an example does not carry.
pub const ABSENT_FEATURE_VALUE: f64 = 0.0;
