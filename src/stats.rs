use std::fmt;

/// Descriptive statistics over a non-empty sequence of values.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Statistics {
    pub geometric_mean: f64,
    pub mean: f64,
    pub max: f64,
    pub min: f64,
    pub sum: f64,
    /// Sample variance, zero for a single value.
    pub variance: f64,
}

impl Statistics {
    pub fn compute(data: &[f64]) -> Option<Statistics> {
        if data.is_empty() {
            return None;
        }
        let count = data.len() as f64;
        let sum: f64 = data.iter().sum();
        let mean = sum / count;
        let min = data.iter().copied().fold(f64::INFINITY, f64::min);
        let max = data.iter().copied().fold(f64::NEG_INFINITY, f64::max);

        // not guarded: a zero value gives a geometric mean of 0, a negative value gives NaN
        let geometric_mean = (data.iter().map(|value| value.ln()).sum::<f64>() / count).exp();

        let variance = if data.len() == 1 {
            0.
        } else {
            data.iter()
                .map(|value| (value - mean).powi(2))
                .sum::<f64>()
                / (count - 1.)
        };

        Some(Statistics {
            geometric_mean,
            mean,
            max,
            min,
            sum,
            variance,
        })
    }
}

impl fmt::Display for Statistics {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Geometric mean: {:.6}", self.geometric_mean)?;
        writeln!(f, "Arithmetic mean: {:.6}", self.mean)?;
        writeln!(f, "Max: {:.6}", self.max)?;
        writeln!(f, "Min: {:.6}", self.min)?;
        writeln!(f, "Sum: {:.6}", self.sum)?;
        writeln!(f, "Variance: {:.6}", self.variance)
    }
}
