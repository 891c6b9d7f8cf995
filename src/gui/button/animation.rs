use strum::Display;

/// Progress while expanding. Starts at `from` for `t = 0` and reaches 1 at `t = 1`.
pub fn expand(from: f64, t: f64) -> f64 {
    (from + (1.0 - from) * t).min(1.0)
}

/// Progress while collapsing. Starts at `from` for `t = 0` and reaches 0 at `t = 1`.
pub fn collapse(from: f64, t: f64) -> f64 {
    (from * (1.0 - t)).max(0.0)
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Display)]
#[strum(serialize_all = "lowercase")]
pub enum AnimationKind {
    Expand,
    Collapse,
}

impl AnimationKind {
    pub fn apply(self, from: f64, t: f64) -> f64 {
        match self {
            Self::Expand => expand(from, t),
            Self::Collapse => collapse(from, t),
        }
    }
}

/// A running expand or collapse. The clock starts on the first frame that
/// samples it, so a freshly started animation always begins at `t = 0`.
#[derive(Debug, Clone)]
pub struct Animation {
    pub kind: AnimationKind,
    pub from_progress: f64,
    duration_us: i64,
    started_at: Option<i64>,
}

impl Animation {
    pub fn new(kind: AnimationKind, from_progress: f64, duration_ms: u32) -> Self {
        Self {
            kind,
            from_progress,
            duration_us: i64::from(duration_ms.max(1)) * 1000,
            started_at: None,
        }
    }

    /// Interpolated time in [0, 1] for a frame timestamp in microseconds.
    pub fn fraction(&mut self, now_us: i64) -> f64 {
        let start = *self.started_at.get_or_insert(now_us);
        ((now_us - start) as f64 / self.duration_us as f64).clamp(0.0, 1.0)
    }

    pub fn progress_at(&mut self, now_us: i64) -> (f64, bool) {
        let t = self.fraction(now_us);
        (self.kind.apply(self.from_progress, t), t >= 1.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_expand_endpoints() {
        assert_eq!(expand(0.3, 0.0), 0.3);
        assert!((expand(0.3, 1.0) - 1.0).abs() < 1e-12);
        assert_eq!(expand(1.0, 0.5), 1.0);
    }

    #[test]
    fn test_expand_is_monotonic() {
        let mut last = expand(0.3, 0.0);
        for step in 1..=100 {
            let p = expand(0.3, step as f64 / 100.0);
            assert!(p >= last, "expand went backwards at step {}", step);
            assert!(p <= 1.0);
            last = p;
        }
    }

    #[test]
    fn test_collapse_endpoints() {
        assert_eq!(collapse(0.7, 0.0), 0.7);
        assert_eq!(collapse(0.7, 1.0), 0.0);
        assert_eq!(collapse(0.0, 0.5), 0.0);
    }

    #[test]
    fn test_collapse_is_monotonic() {
        let mut last = collapse(0.7, 0.0);
        for step in 1..=100 {
            let p = collapse(0.7, step as f64 / 100.0);
            assert!(p <= last, "collapse went forwards at step {}", step);
            assert!(p >= 0.0);
            last = p;
        }
    }

    #[test]
    fn test_clock_starts_on_first_frame() {
        let mut animation = Animation::new(AnimationKind::Expand, 0.0, 300);
        assert_eq!(animation.fraction(5_000_000), 0.0);
        assert!((animation.fraction(5_150_000) - 0.5).abs() < 1e-9);
        assert_eq!(animation.fraction(5_300_000), 1.0);
        assert_eq!(animation.fraction(9_000_000), 1.0);
    }

    #[test]
    fn test_progress_reports_completion() {
        let mut animation = Animation::new(AnimationKind::Collapse, 0.8, 300);
        assert_eq!(animation.progress_at(0), (0.8, false));
        let (progress, finished) = animation.progress_at(300_000);
        assert_eq!(progress, 0.0);
        assert!(finished);
    }

    #[test]
    fn test_kind_display() {
        assert_eq!(AnimationKind::Expand.to_string(), "expand");
        assert_eq!(AnimationKind::Collapse.to_string(), "collapse");
    }
}
