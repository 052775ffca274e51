use destructure::Destructure;
use serde::{Deserialize, Serialize};
use time::Duration;
use vodca::{AsRefln, Fromln, References};

use crate::entity::FilmDuration;

/// How long a rental grants access after it is created.
#[derive(Debug, Clone, Copy, Eq, PartialEq, Fromln, AsRefln)]
pub struct RentalWindow(Duration);

impl RentalWindow {
    /// Longest window a policy may configure.
    pub const MAX: Duration = Duration::days(365);

    pub fn new(window: impl Into<Duration>) -> Self {
        Self(window.into())
    }

    pub fn is_valid(&self) -> bool {
        self.0.is_positive() && self.0 <= Self::MAX
    }
}

impl Default for RentalWindow {
    fn default() -> Self {
        Self(Duration::hours(48))
    }
}

/// Share of a film, in percent, that must be watched before reviewing it.
#[derive(Debug, Clone, Copy, Eq, PartialEq, Serialize, Deserialize, Fromln, AsRefln)]
pub struct ReviewThreshold(u8);

impl ReviewThreshold {
    pub fn new(percent: impl Into<u8>) -> Self {
        Self(percent.into())
    }

    pub fn is_valid(&self) -> bool {
        self.0 <= 100
    }

    pub fn required_seconds(&self, duration: &FilmDuration) -> i64 {
        duration.as_ref().saturating_mul(i64::from(self.0)) / 100
    }
}

impl Default for ReviewThreshold {
    fn default() -> Self {
        Self(50)
    }
}

#[derive(Debug, Clone, Default, Eq, PartialEq, References, Destructure)]
pub struct RentalPolicy {
    rental_window: RentalWindow,
    review_threshold: ReviewThreshold,
}

impl RentalPolicy {
    pub fn new(rental_window: RentalWindow, review_threshold: ReviewThreshold) -> Self {
        Self {
            rental_window,
            review_threshold,
        }
    }
}

#[cfg(test)]
mod test {
    use time::Duration;

    use crate::entity::{FilmDuration, RentalPolicy, RentalWindow, ReviewThreshold};

    #[test]
    fn default_policy() {
        let policy = RentalPolicy::default();
        assert_eq!(policy.rental_window(), &RentalWindow::new(Duration::hours(48)));
        assert_eq!(policy.review_threshold(), &ReviewThreshold::new(50));
    }

    #[test]
    fn required_seconds_is_floored_share_of_duration() {
        let threshold = ReviewThreshold::new(50);
        assert_eq!(threshold.required_seconds(&FilmDuration::new(3600)), 1800);
        assert_eq!(threshold.required_seconds(&FilmDuration::new(3601)), 1800);
        assert_eq!(ReviewThreshold::new(0).required_seconds(&FilmDuration::new(3600)), 0);
        assert_eq!(ReviewThreshold::new(100).required_seconds(&FilmDuration::new(3600)), 3600);
    }

    #[test]
    fn validity() {
        assert!(RentalWindow::new(Duration::hours(1)).is_valid());
        assert!(!RentalWindow::new(Duration::ZERO).is_valid());
        assert!(RentalWindow::new(RentalWindow::MAX).is_valid());
        assert!(!RentalWindow::new(RentalWindow::MAX + Duration::SECOND).is_valid());
        assert!(ReviewThreshold::new(100).is_valid());
        assert!(!ReviewThreshold::new(101).is_valid());
    }
}
