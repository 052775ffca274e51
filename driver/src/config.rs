use std::env::VarError;
use std::str::FromStr;

use error_stack::Report;
use time::Duration;

use kernel::prelude::entity::{RentalPolicy, RentalWindow, ReviewThreshold};
use kernel::KernelError;

static RENTAL_WINDOW_HOURS: &str = "RENTAL_WINDOW_HOURS";
static REVIEW_THRESHOLD_PERCENT: &str = "REVIEW_THRESHOLD_PERCENT";
static SERVER_PORT: &str = "SERVER_PORT";

const DEFAULT_RENTAL_WINDOW_HOURS: i64 = 48;
const DEFAULT_REVIEW_THRESHOLD_PERCENT: u8 = 50;
const DEFAULT_SERVER_PORT: u16 = 8080;

const SECONDS_PER_HOUR: i64 = 3600;

pub fn rental_policy() -> error_stack::Result<RentalPolicy, KernelError> {
    let hours = env_or(RENTAL_WINDOW_HOURS, DEFAULT_RENTAL_WINDOW_HOURS)?;
    let percent = env_or(REVIEW_THRESHOLD_PERCENT, DEFAULT_REVIEW_THRESHOLD_PERCENT)?;
    build_rental_policy(hours, percent)
}

pub fn server_port() -> error_stack::Result<u16, KernelError> {
    env_or(SERVER_PORT, DEFAULT_SERVER_PORT)
}

fn build_rental_policy(hours: i64, percent: u8) -> error_stack::Result<RentalPolicy, KernelError> {
    let window = hours
        .checked_mul(SECONDS_PER_HOUR)
        .map(|seconds| RentalWindow::new(Duration::seconds(seconds)))
        .filter(RentalWindow::is_valid)
        .ok_or_else(|| {
            Report::new(KernelError::Internal).attach_printable(format!(
                "{RENTAL_WINDOW_HOURS} must be within 1..={}, got {hours}",
                RentalWindow::MAX.whole_hours()
            ))
        })?;
    let threshold = ReviewThreshold::new(percent);
    if !threshold.is_valid() {
        return Err(Report::new(KernelError::Internal).attach_printable(format!(
            "{REVIEW_THRESHOLD_PERCENT} must be within 0..=100, got {percent}"
        )));
    }
    Ok(RentalPolicy::new(window, threshold))
}

fn env_or<T: FromStr>(key: &str, default: T) -> error_stack::Result<T, KernelError> {
    match dotenvy::var(key) {
        Ok(value) => parse_value(key, &value),
        Err(dotenvy::Error::EnvVar(VarError::NotPresent)) => Ok(default),
        Err(error) => Err(Report::from(error)
            .change_context(KernelError::Internal)
            .attach_printable(format!("failed to read {key}"))),
    }
}

fn parse_value<T: FromStr>(key: &str, value: &str) -> error_stack::Result<T, KernelError> {
    value.trim().parse::<T>().map_err(|_| {
        Report::new(KernelError::Internal)
            .attach_printable(format!("{key} has an invalid value {value:?}"))
    })
}

#[cfg(test)]
mod test {
    use time::Duration;

    use kernel::prelude::entity::{RentalWindow, ReviewThreshold};
    use kernel::KernelError;

    use super::{build_rental_policy, parse_value};

    #[test]
    fn parses_trimmed_values() -> error_stack::Result<(), KernelError> {
        assert_eq!(parse_value::<i64>("KEY", " 72 ")?, 72);
        assert_eq!(parse_value::<u16>("KEY", "3000")?, 3000);
        Ok(())
    }

    #[test]
    fn rejects_malformed_values() {
        assert!(parse_value::<i64>("KEY", "two days").is_err());
        assert!(parse_value::<u8>("KEY", "-1").is_err());
        assert!(parse_value::<u8>("KEY", "300").is_err());
    }

    #[test]
    fn policy_bounds() -> error_stack::Result<(), KernelError> {
        let policy = build_rental_policy(24, 80)?;
        assert_eq!(policy.rental_window(), &RentalWindow::new(Duration::hours(24)));
        assert_eq!(policy.review_threshold(), &ReviewThreshold::new(80));

        assert!(build_rental_policy(0, 50).is_err());
        assert!(build_rental_policy(-4, 50).is_err());
        assert!(build_rental_policy(48, 101).is_err());
        Ok(())
    }

    #[test]
    fn oversized_window_is_an_error() -> error_stack::Result<(), KernelError> {
        let max = RentalWindow::MAX.whole_hours();
        assert!(build_rental_policy(max, 50).is_ok());
        for hours in [max + 1, i64::MAX / 3600 + 1, i64::MAX] {
            let result = build_rental_policy(hours, 50);
            assert_eq!(
                result.map_err(|report| *report.current_context()),
                Err(KernelError::Internal)
            );
        }
        Ok(())
    }
}
