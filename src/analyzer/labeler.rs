use crate::model::Label;

pub const DEFAULT_THRESHOLD: f64 = 0.0;

/// Positive only when polarity is strictly above the threshold.
pub fn label(polarity: f64, threshold: f64) -> Label {
    if polarity > threshold {
        Label::Positive
    } else {
        Label::Negative
    }
}
