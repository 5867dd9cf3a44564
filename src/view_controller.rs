use crate::data_types::Range;

/// ViewController holds the zoom and pan arithmetic, independent of any axis
/// or plot, to keep it testable on plain ranges.
pub struct ViewController;

const MIN_SPAN: f64 = 1e-9;

impl ViewController {
    /// Shifts a range by a fraction of its length. Positive percentages move
    /// the visible window towards higher values.
    pub fn pan(range: Range, percent: f64) -> Range {
        range.shift(range.length() * percent)
    }

    /// Scales a range around `anchor`, keeping the anchor at the same relative
    /// position. A factor below 1 zooms in.
    ///
    /// Returns `None` for a non-positive factor, which means "back to
    /// auto-range".
    pub fn resize(range: Range, factor: f64, anchor: f64) -> Option<Range> {
        if factor <= 0.0 || !factor.is_finite() {
            return None;
        }
        let mut new_factor = factor;
        if range.length() * factor < MIN_SPAN {
            new_factor = if range.length() > 0.0 {
                MIN_SPAN / range.length()
            } else {
                1.0
            };
        }
        let lower = anchor - (anchor - range.lower()) * new_factor;
        let upper = anchor + (range.upper() - anchor) * new_factor;
        if lower > upper {
            return Some(range);
        }
        Range::new(lower, upper).ok()
    }

    /// Same as [`resize`](Self::resize) but in log10 space, for log axes.
    /// The anchor must be positive.
    pub fn resize_log(range: Range, factor: f64, anchor: f64) -> Option<Range> {
        if anchor <= 0.0 || range.lower() <= 0.0 {
            return Self::resize(range, factor, anchor);
        }
        let log_range = Range::new(range.lower().log10(), range.upper().log10()).ok()?;
        let resized = Self::resize(log_range, factor, anchor.log10())?;
        Range::new(10f64.powf(resized.lower()), 10f64.powf(resized.upper())).ok()
    }

    pub fn pan_log(range: Range, percent: f64) -> Range {
        if range.lower() <= 0.0 {
            return Self::pan(range, percent);
        }
        let (lo, hi) = (range.lower().log10(), range.upper().log10());
        let delta = (hi - lo) * percent;
        Range::new(10f64.powf(lo + delta), 10f64.powf(hi + delta)).unwrap_or(range)
    }

    /// Zoom factor for a scroll delta; scrolling up (positive) zooms in.
    pub fn compute_zoom_factor(delta: f64, sensitivity: f64) -> f64 {
        let factor = 1.0 + delta.abs() / sensitivity;
        if delta > 0.0 {
            1.0 / factor
        } else {
            factor
        }
    }

    /// Splits `total` into consecutive spans proportional to `weights`, with
    /// `gap` between neighbours. Returns `(offset, length)` pairs.
    pub fn split_by_weight(total: f64, weights: &[f64], gap: f64) -> Vec<(f64, f64)> {
        if weights.is_empty() {
            return Vec::new();
        }
        let available = (total - gap * (weights.len() - 1) as f64).max(0.0);
        let sum: f64 = weights.iter().sum();
        let mut offset = 0.0;
        weights
            .iter()
            .map(|w| {
                let length = if sum > 0.0 { available * w / sum } else { 0.0 };
                let span = (offset, length);
                offset += length + gap;
                span
            })
            .collect()
    }
}
