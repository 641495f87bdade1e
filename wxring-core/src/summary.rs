//! Aggregate statistics over a window of samples

/// Average, minimum, maximum and sum of a window, plus how many samples it held.
///
/// An empty window is all zeros with `count == 0`. Callers that need to tell
/// "no data yet" from a genuine zero reading check [`Summary::is_empty`].
#[derive(Debug, Clone, Copy, PartialEq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct Summary {
    /// Arithmetic mean of the raw samples
    pub average: f64,
    /// Smallest sample
    pub min: f64,
    /// Largest sample
    pub max: f64,
    /// Sum of all samples
    pub sum: f64,
    /// Number of samples in the window
    pub count: usize,
}

impl Summary {
    /// Aggregates a sequence of samples in one pass.
    pub fn from_values<I>(values: I) -> Self
    where
        I: IntoIterator<Item = f64>,
    {
        let mut count = 0usize;
        let mut sum = 0.0;
        let mut min = f64::INFINITY;
        let mut max = f64::NEG_INFINITY;

        for value in values {
            count += 1;
            sum += value;
            min = min.min(value);
            max = max.max(value);
        }

        if count == 0 {
            return Self::default();
        }

        Self {
            average: sum / count as f64,
            min,
            max,
            sum,
            count,
        }
    }

    /// True when the window held no samples
    pub fn is_empty(&self) -> bool {
        self.count == 0
    }
}
