use crate::error::{PlotError, Result};
use serde::{Deserialize, Serialize};

/// Closed interval `[lower, upper]` over data values.
///
/// A `Range` is immutable once built. Zero length is allowed; a negative
/// length is rejected by the constructor.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "(f64, f64)", into = "(f64, f64)")]
pub struct Range {
    lower: f64,
    upper: f64,
}

impl Range {
    pub fn new(lower: f64, upper: f64) -> Result<Self> {
        if lower.is_nan() || upper.is_nan() {
            return Err(PlotError::invalid_argument("range bounds must not be NaN"));
        }
        if lower > upper {
            return Err(PlotError::invalid_argument(format!(
                "range lower bound {lower} exceeds upper bound {upper}"
            )));
        }
        Ok(Self { lower, upper })
    }

    /// Builds a range whose length must be strictly positive (dial and log
    /// scales need this).
    pub fn new_positive_length(lower: f64, upper: f64) -> Result<Self> {
        let range = Self::new(lower, upper)?;
        if range.length() <= 0.0 {
            return Err(PlotError::invalid_argument(format!(
                "range [{lower}, {upper}] must have a positive length"
            )));
        }
        Ok(range)
    }

    /// Smallest range containing every finite value of the iterator.
    pub fn from_values(values: impl IntoIterator<Item = f64>) -> Option<Self> {
        let mut lower = f64::INFINITY;
        let mut upper = f64::NEG_INFINITY;
        for v in values.into_iter().filter(|v| v.is_finite()) {
            lower = lower.min(v);
            upper = upper.max(v);
        }
        (lower <= upper).then_some(Self { lower, upper })
    }

    pub fn lower(&self) -> f64 {
        self.lower
    }

    pub fn upper(&self) -> f64 {
        self.upper
    }

    pub fn length(&self) -> f64 {
        self.upper - self.lower
    }

    pub fn central_value(&self) -> f64 {
        self.lower / 2.0 + self.upper / 2.0
    }

    pub fn contains(&self, value: f64) -> bool {
        value >= self.lower && value <= self.upper
    }

    pub fn intersects(&self, other: &Range) -> bool {
        self.lower <= other.upper && other.lower <= self.upper
    }

    /// Returns the value clamped into this range.
    pub fn constrain(&self, value: f64) -> f64 {
        value.clamp(self.lower, self.upper)
    }

    /// `combine(None, b) == b`; otherwise the smallest range containing both.
    pub fn combine(a: Option<Range>, b: Option<Range>) -> Option<Range> {
        match (a, b) {
            (None, b) => b,
            (a, None) => a,
            (Some(a), Some(b)) => Some(Self {
                lower: a.lower.min(b.lower),
                upper: a.upper.max(b.upper),
            }),
        }
    }

    pub fn expand_to_include(range: Option<Range>, value: f64) -> Option<Range> {
        if !value.is_finite() {
            return range;
        }
        Self::combine(
            range,
            Some(Self {
                lower: value,
                upper: value,
            }),
        )
    }

    /// Grows the range by a fraction of its length on each side.
    pub fn expand(&self, lower_margin: f64, upper_margin: f64) -> Result<Range> {
        let length = self.length();
        let mut lower = self.lower - length * lower_margin;
        let mut upper = self.upper + length * upper_margin;
        if lower > upper {
            let mid = lower / 2.0 + upper / 2.0;
            lower = mid;
            upper = mid;
        }
        Self::new(lower, upper)
    }

    pub fn shift(&self, delta: f64) -> Range {
        Self {
            lower: self.lower + delta,
            upper: self.upper + delta,
        }
    }

    /// Range of the given length centred on `center`.
    pub fn centered(center: f64, length: f64) -> Result<Range> {
        let half = length.abs() / 2.0;
        Self::new(center - half, center + half)
    }
}

impl Default for Range {
    fn default() -> Self {
        Self {
            lower: 0.0,
            upper: 1.0,
        }
    }
}

impl std::fmt::Display for Range {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "[{}, {}]", self.lower, self.upper)
    }
}

impl TryFrom<(f64, f64)> for Range {
    type Error = PlotError;

    fn try_from((lower, upper): (f64, f64)) -> Result<Self> {
        Self::new(lower, upper)
    }
}

impl From<Range> for (f64, f64) {
    fn from(range: Range) -> Self {
        (range.lower, range.upper)
    }
}
