//! Trend deltas between a flow's current value and its rolling windows.
//!
//! Deltas are recomputed from scratch each render; NaN and infinities pass
//! through unchanged and classify as neutral.

use crate::types::FlowSeries;

/// Magnitude beyond which a delta is highlighted.
pub const TREND_THRESHOLD: f64 = 0.1;

/// Direction of a delta relative to [`TREND_THRESHOLD`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TrendLevel {
    /// Below `-TREND_THRESHOLD`
    Negative,
    /// Within `[-TREND_THRESHOLD, TREND_THRESHOLD]`
    Neutral,
    /// Above `TREND_THRESHOLD`
    Positive,
}

impl TrendLevel {
    /// Classify a delta. Values exactly on the threshold are neutral.
    pub fn classify(delta: f64) -> Self {
        if delta < -TREND_THRESHOLD {
            TrendLevel::Negative
        } else if delta > TREND_THRESHOLD {
            TrendLevel::Positive
        } else {
            TrendLevel::Neutral
        }
    }
}

/// Signed differences `current - window` for one flow series.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Trend {
    pub vs_lifetime: f64,
    pub vs_1_minute: f64,
    pub vs_15_minutes: f64,
}

impl Trend {
    /// Compute all deltas for a flow series.
    pub fn of(series: &FlowSeries) -> Self {
        Self {
            vs_lifetime: series.delta(),
            vs_1_minute: series.current - series.last_1_minute,
            vs_15_minutes: series.current - series.last_15_minutes,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn series(current: f64, lifetime: f64, last_1_minute: f64, last_15_minutes: f64) -> FlowSeries {
        FlowSeries {
            current,
            lifetime,
            last_1_minute,
            last_15_minutes,
            ..FlowSeries::default()
        }
    }

    #[test]
    fn test_lifetime_delta_positive_one_minute_neutral() {
        let trend = Trend::of(&series(1.0, 0.85, 1.05, 0.0));

        assert!((trend.vs_lifetime - 0.15).abs() < 1e-9);
        assert_eq!(TrendLevel::classify(trend.vs_lifetime), TrendLevel::Positive);

        assert!((trend.vs_1_minute + 0.05).abs() < 1e-9);
        assert_eq!(TrendLevel::classify(trend.vs_1_minute), TrendLevel::Neutral);
    }

    #[test]
    fn test_fifteen_minute_delta() {
        let trend = Trend::of(&series(2.0, 2.0, 2.0, 2.5));
        assert_eq!(trend.vs_15_minutes, -0.5);
        assert_eq!(TrendLevel::classify(trend.vs_15_minutes), TrendLevel::Negative);
    }

    #[test]
    fn test_zero_delta_when_current_matches_windows() {
        let trend = Trend::of(&series(3.25, 3.25, 3.25, 3.25));
        assert_eq!(trend.vs_lifetime, 0.0);
        assert_eq!(trend.vs_1_minute, 0.0);
        assert_eq!(trend.vs_15_minutes, 0.0);
    }

    #[test]
    fn test_classify_threshold_boundaries() {
        assert_eq!(TrendLevel::classify(0.1), TrendLevel::Neutral);
        assert_eq!(TrendLevel::classify(-0.1), TrendLevel::Neutral);
        assert_eq!(TrendLevel::classify(0.1001), TrendLevel::Positive);
        assert_eq!(TrendLevel::classify(-0.1001), TrendLevel::Negative);
        assert_eq!(TrendLevel::classify(0.0), TrendLevel::Neutral);
    }

    #[test]
    fn test_non_finite_values_pass_through() {
        let trend = Trend::of(&series(f64::NAN, 1.0, 1.0, 1.0));
        assert!(trend.vs_lifetime.is_nan());
        assert_eq!(TrendLevel::classify(trend.vs_lifetime), TrendLevel::Neutral);

        let trend = Trend::of(&series(f64::INFINITY, 1.0, 1.0, 1.0));
        assert_eq!(trend.vs_1_minute, f64::INFINITY);
        assert_eq!(TrendLevel::classify(trend.vs_1_minute), TrendLevel::Positive);
        assert_eq!(TrendLevel::classify(f64::NEG_INFINITY), TrendLevel::Negative);
    }
}
