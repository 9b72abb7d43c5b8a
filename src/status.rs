//! # Connection health classification.
//!
//! [`Severity`] is derived purely from a session's consecutive close count and is
//! attached to every provider view, independently of how fresh the data is.

use std::fmt;

/// Three-level health indicator.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Severity {
    /// Connected, or never failed.
    Healthy,
    /// One consecutive failure.
    Degraded,
    /// Two or more consecutive failures.
    Unhealthy,
}

impl Severity {
    /// Short stable label.
    pub fn as_label(&self) -> &'static str {
        match self {
            Severity::Healthy => "healthy",
            Severity::Degraded => "degraded",
            Severity::Unhealthy => "unhealthy",
        }
    }
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_label())
    }
}

/// Maps a consecutive-close count to a [`Severity`].
///
/// ```
/// use tickerboard::{classify, Severity};
///
/// assert_eq!(classify(0), Severity::Healthy);
/// assert_eq!(classify(1), Severity::Degraded);
/// assert_eq!(classify(7), Severity::Unhealthy);
/// ```
#[inline]
pub fn classify(attempts: u32) -> Severity {
    match attempts {
        0 => Severity::Healthy,
        1 => Severity::Degraded,
        _ => Severity::Unhealthy,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn mapping() {
        assert_eq!(classify(0), Severity::Healthy);
        assert_eq!(classify(1), Severity::Degraded);
        for n in [2, 3, 100, u32::MAX] {
            assert_eq!(classify(n), Severity::Unhealthy);
        }
    }

    #[test]
    fn ordering_follows_badness() {
        assert!(Severity::Healthy < Severity::Degraded);
        assert!(Severity::Degraded < Severity::Unhealthy);
    }
}
