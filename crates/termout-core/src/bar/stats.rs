//! Point-in-time bar counters and the rate/ETA math derived from them.

/// Snapshot of an active bar, taken by the ticker before each redraw.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BarStats {
    /// Units (bytes or items) reported so far. May exceed `total`.
    pub current: u64,
    /// Expected total units.
    pub total: u64,
    /// Seconds since the bar was started.
    pub elapsed_secs: f64,
}

impl BarStats {
    /// Units per second (0 if elapsed is 0).
    pub fn per_sec(&self) -> f64 {
        if self.elapsed_secs <= 0.0 {
            return 0.0;
        }
        self.current as f64 / self.elapsed_secs
    }

    /// Estimated seconds remaining (None if nothing has moved yet).
    pub fn eta_secs(&self) -> Option<f64> {
        let remaining = self.total.saturating_sub(self.current);
        if remaining == 0 {
            return Some(0.0);
        }
        let rate = self.per_sec();
        if rate <= 0.0 {
            return None;
        }
        Some(remaining as f64 / rate)
    }

    /// Fraction complete in [0.0, 1.0]; a zero total counts as done.
    pub fn fraction(&self) -> f64 {
        if self.total == 0 {
            return 1.0;
        }
        (self.current as f64 / self.total as f64).min(1.0)
    }

    /// Percentage without clamping, so overshoot stays visible.
    pub fn percent(&self) -> f64 {
        if self.total == 0 {
            return 100.0;
        }
        self.current as f64 * 100.0 / self.total as f64
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn stats(current: u64, total: u64, elapsed_secs: f64) -> BarStats {
        BarStats {
            current,
            total,
            elapsed_secs,
        }
    }

    #[test]
    fn rate_and_eta() {
        let s = stats(50, 200, 5.0);
        assert!((s.per_sec() - 10.0).abs() < 1e-9);
        assert!((s.eta_secs().unwrap() - 15.0).abs() < 1e-9);
        assert!((s.fraction() - 0.25).abs() < 1e-9);
    }

    #[test]
    fn no_elapsed_means_no_rate() {
        let s = stats(10, 100, 0.0);
        assert_eq!(s.per_sec(), 0.0);
        assert!(s.eta_secs().is_none());
    }

    #[test]
    fn overshoot_clamps_fraction_not_percent() {
        let s = stats(250, 100, 1.0);
        assert_eq!(s.fraction(), 1.0);
        assert!((s.percent() - 250.0).abs() < 1e-9);
        assert_eq!(s.eta_secs(), Some(0.0));
    }

    #[test]
    fn zero_total_is_complete() {
        let s = stats(0, 0, 1.0);
        assert_eq!(s.fraction(), 1.0);
        assert_eq!(s.percent(), 100.0);
    }
}
