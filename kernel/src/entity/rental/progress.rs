use error_stack::Report;
use serde::{Deserialize, Serialize};
use vodca::{AsRefln, Fromln};

use crate::entity::FilmDuration;
use crate::KernelError;

/// Furthest playback position reached, in whole seconds.
#[derive(
    Debug, Clone, Copy, Default, Eq, PartialEq, Ord, PartialOrd, Serialize, Deserialize, Fromln, AsRefln,
)]
pub struct RentalProgress(i64);

impl RentalProgress {
    pub fn new(seconds: impl Into<i64>) -> Self {
        Self(seconds.into())
    }

    /// Accepts a position reported by a player. Fractions of a second are dropped.
    pub fn parse(seconds: f64) -> error_stack::Result<Self, KernelError> {
        if !seconds.is_finite() || seconds < 0.0 {
            return Err(Report::new(KernelError::InvalidProgress)
                .attach_printable(format!("progress must be a non-negative number, got {seconds}")));
        }
        // `as` saturates, anything past i64::MAX is clamped later anyway
        Ok(Self(seconds.trunc() as i64))
    }

    pub fn clamp_to(self, duration: &FilmDuration) -> Self {
        Self(self.0.clamp(0, (*duration.as_ref()).max(0)))
    }

    pub fn furthest(self, other: Self) -> Self {
        self.max(other)
    }
}

#[cfg(test)]
mod test {
    use crate::entity::{FilmDuration, RentalProgress};
    use crate::KernelError;

    #[test]
    fn parse_accepts_finite_non_negative() {
        assert_eq!(RentalProgress::parse(0.0).unwrap(), RentalProgress::new(0));
        assert_eq!(RentalProgress::parse(1500.9).unwrap(), RentalProgress::new(1500));
        assert_eq!(RentalProgress::parse(-0.0).unwrap(), RentalProgress::new(0));
        assert_eq!(RentalProgress::parse(1e300).unwrap(), RentalProgress::new(i64::MAX));
    }

    #[test]
    fn parse_rejects_garbage() {
        for value in [-1.0, -0.5, f64::NAN, f64::INFINITY, f64::NEG_INFINITY] {
            let report = RentalProgress::parse(value).unwrap_err();
            assert_eq!(report.current_context(), &KernelError::InvalidProgress);
        }
    }

    #[test]
    fn clamp_into_duration() {
        let duration = FilmDuration::new(3600);
        assert_eq!(RentalProgress::new(4000).clamp_to(&duration), RentalProgress::new(3600));
        assert_eq!(RentalProgress::new(3600).clamp_to(&duration), RentalProgress::new(3600));
        assert_eq!(RentalProgress::new(12).clamp_to(&duration), RentalProgress::new(12));
    }

    #[test]
    fn sequence_keeps_running_maximum() {
        let duration = FilmDuration::new(100);
        let reported = [10, 40, 20, 150, 30];
        let expected = [10, 40, 40, 100, 100];
        let mut stored = RentalProgress::default();
        for (value, expected) in reported.into_iter().zip(expected) {
            stored = stored.furthest(RentalProgress::new(value).clamp_to(&duration));
            assert_eq!(stored, RentalProgress::new(expected));
        }
    }
}
