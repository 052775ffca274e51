use serde::{Deserialize, Serialize};
use time::OffsetDateTime;

use crate::entity::{Film, Rental, RentalPolicy, RentalProgress};

/// Whether a user may review a film, derived from the rentals they made of it.
///
/// This is recomputed on every request from stored rental progress and the
/// current time. Nothing like a persisted "watched" flag exists, so the
/// answer can never disagree with the progress it is based on.
#[derive(Debug, Clone, Copy, Eq, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ReviewEligibility {
    NeverRented,
    KeepWatching,
    ExpiredWithoutViewing,
    Watched,
}

impl ReviewEligibility {
    /// `rentals` must all belong to the same user and `film`.
    ///
    /// Consumption counts across every rental of the film: once the threshold
    /// was reached under any of them the user stays eligible, whether or not
    /// that rental has since expired.
    pub fn evaluate<'a, I>(
        rentals: I,
        film: &Film,
        policy: &RentalPolicy,
        now: &OffsetDateTime,
    ) -> Self
    where
        I: IntoIterator<Item = &'a Rental>,
    {
        let required = policy.review_threshold().required_seconds(film.duration());

        let mut any_rental = false;
        let mut any_active = false;
        let mut furthest = RentalProgress::default();
        for rental in rentals {
            any_rental = true;
            any_active |= rental.is_active(now);
            furthest = furthest.furthest(*rental.progress());
        }

        if !any_rental {
            Self::NeverRented
        } else if *furthest.as_ref() >= required {
            Self::Watched
        } else if any_active {
            Self::KeepWatching
        } else {
            Self::ExpiredWithoutViewing
        }
    }

    pub fn is_allowed(&self) -> bool {
        matches!(self, Self::Watched)
    }

    pub fn reason(&self) -> &'static str {
        match self {
            Self::NeverRented => "never rented",
            Self::KeepWatching => "keep watching",
            Self::ExpiredWithoutViewing => "rental expired without sufficient viewing",
            Self::Watched => "watched",
        }
    }
}

#[cfg(test)]
mod test {
    use time::{Duration, OffsetDateTime};
    use uuid::Uuid;

    use crate::entity::{
        ExternalFilmId, Film, FilmDuration, FilmId, FilmTitle, Rental, RentalId, RentalPolicy,
        RentalPrice, RentalProgress, ReviewEligibility, UserId,
    };

    fn film() -> Film {
        Film::new(
            FilmId::new(Uuid::new_v4()),
            ExternalFilmId::new("tt0000002"),
            FilmTitle::new("Film"),
            FilmDuration::new(3600),
            RentalPrice::new(10),
        )
    }

    fn rental(film: &Film, start: OffsetDateTime, progress: i64) -> Rental {
        Rental::start(
            RentalId::new(Uuid::new_v4()),
            UserId::new(Uuid::new_v4()),
            film,
            &RentalPolicy::default(),
            start,
        )
        .reconstruct(|r| r.progress = RentalProgress::new(progress))
    }

    #[test]
    fn never_rented() {
        let film = film();
        let now = OffsetDateTime::now_utc();
        let eligibility = ReviewEligibility::evaluate(
            std::iter::empty(),
            &film,
            &RentalPolicy::default(),
            &now,
        );
        assert_eq!(eligibility, ReviewEligibility::NeverRented);
        assert!(!eligibility.is_allowed());
        assert_eq!(eligibility.reason(), "never rented");
    }

    #[test]
    fn below_threshold_while_active() {
        let film = film();
        let now = OffsetDateTime::now_utc();
        let rentals = [rental(&film, now, 1500)];
        let eligibility =
            ReviewEligibility::evaluate(&rentals, &film, &RentalPolicy::default(), &now);
        assert_eq!(eligibility, ReviewEligibility::KeepWatching);
        assert_eq!(eligibility.reason(), "keep watching");
    }

    #[test]
    fn below_threshold_after_expiry() {
        let film = film();
        let start = OffsetDateTime::now_utc();
        let rentals = [rental(&film, start, 1799)];
        let later = start + Duration::hours(49);
        let eligibility =
            ReviewEligibility::evaluate(&rentals, &film, &RentalPolicy::default(), &later);
        assert_eq!(eligibility, ReviewEligibility::ExpiredWithoutViewing);
        assert_eq!(eligibility.reason(), "rental expired without sufficient viewing");
    }

    #[test]
    fn threshold_reached_before_and_after_expiry() {
        let film = film();
        let start = OffsetDateTime::now_utc();
        let rentals = [rental(&film, start, 1800)];
        let policy = RentalPolicy::default();

        let during = ReviewEligibility::evaluate(&rentals, &film, &policy, &start);
        let after = ReviewEligibility::evaluate(
            &rentals,
            &film,
            &policy,
            &(start + Duration::days(365)),
        );
        assert!(during.is_allowed());
        assert!(after.is_allowed());
    }

    #[test]
    fn consumption_of_an_older_rental_counts() {
        let film = film();
        let start = OffsetDateTime::now_utc();
        let old = rental(&film, start - Duration::days(10), 3000);
        let current = rental(&film, start, 0);
        let eligibility = ReviewEligibility::evaluate(
            [&old, &current],
            &film,
            &RentalPolicy::default(),
            &start,
        );
        assert_eq!(eligibility, ReviewEligibility::Watched);
    }
}
