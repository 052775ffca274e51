use serde::{Deserialize, Serialize};
use vodca::{AsRefln, Fromln};

use crate::entity::RentalPrice;

/// Credit balance of a user. Never negative once stored.
#[derive(Debug, Clone, Copy, Eq, PartialEq, Ord, PartialOrd, Serialize, Deserialize, Fromln, AsRefln)]
pub struct UserCredits(i64);

impl UserCredits {
    pub fn new(credits: impl Into<i64>) -> Self {
        Self(credits.into())
    }

    pub fn is_valid(&self) -> bool {
        self.0 >= 0
    }

    /// Balance left after paying `price`, or `None` when it would go negative.
    pub fn debit(&self, price: &RentalPrice) -> Option<UserCredits> {
        self.0
            .checked_sub(*price.as_ref())
            .filter(|remaining| *remaining >= 0)
            .map(Self)
    }
}

#[cfg(test)]
mod test {
    use crate::entity::{RentalPrice, UserCredits};

    #[test]
    fn debit_within_balance() {
        let credits = UserCredits::new(10);
        assert_eq!(credits.debit(&RentalPrice::new(4)), Some(UserCredits::new(6)));
        assert_eq!(credits.debit(&RentalPrice::new(10)), Some(UserCredits::new(0)));
    }

    #[test]
    fn debit_beyond_balance() {
        let credits = UserCredits::new(9);
        assert_eq!(credits.debit(&RentalPrice::new(10)), None);
        assert_eq!(UserCredits::new(0).debit(&RentalPrice::new(1)), None);
    }

    #[test]
    fn free_film_leaves_balance() {
        let credits = UserCredits::new(0);
        assert_eq!(credits.debit(&RentalPrice::new(0)), Some(UserCredits::new(0)));
    }
}
