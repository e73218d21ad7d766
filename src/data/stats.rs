/// Min, max and mean over a non-empty series.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Statistics {
    min: f64,
    max: f64,
    mean: f64,
}

impl Statistics {
    /// Returns `None` for an empty series.
    pub fn new(values: &[f64]) -> Option<Self> {
        let (&first, rest) = values.split_first()?;

        let (min, max, sum) = rest
            .iter()
            .fold((first, first, first), |(min, max, sum), &v| {
                (min.min(v), max.max(v), sum + v)
            });

        Some(Self {
            min,
            max,
            mean: sum / values.len() as f64,
        })
    }

    pub fn min(&self) -> f64 {
        self.min
    }

    pub fn max(&self) -> f64 {
        self.max
    }

    pub fn mean(&self) -> f64 {
        self.mean
    }
}
