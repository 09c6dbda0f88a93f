//! Internal helpers for model validation and conversion.
//!
//! These utilities are **not** part of the public API.

use chrono::{DateTime, Duration, SubsecRound, Utc};
use uuid::Uuid;

use crate::{EngineError, ResultEngine};

/// Current time at the precision the database keeps (microseconds).
pub(crate) fn now() -> DateTime<Utc> {
    Utc::now().trunc_subsecs(6)
}

/// Next `updated_at` for a record last touched at `previous`.
///
/// Always strictly after `previous`, even if the wall clock went backwards.
pub(crate) fn next_updated_at(previous: DateTime<Utc>) -> DateTime<Utc> {
    let now = now();
    let floor = previous + Duration::microseconds(1);
    now.max(floor)
}

/// Parse a UUID from storage and return a labeled error on failure.
pub(crate) fn parse_uuid(value: &str, label: &str) -> ResultEngine<Uuid> {
    Uuid::parse_str(value).map_err(|_| EngineError::InvalidId(format!("invalid {label} id")))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn next_updated_at_moves_forward_from_future_timestamps() {
        let future = now() + Duration::hours(1);
        let next = next_updated_at(future);
        assert!(next > future);
        assert_eq!(next - future, Duration::microseconds(1));
    }

    #[test]
    fn next_updated_at_uses_wall_clock_when_ahead() {
        let past = now() - Duration::hours(1);
        let next = next_updated_at(past);
        assert!(next - past > Duration::minutes(59));
    }

    #[test]
    fn parse_uuid_labels_errors() {
        assert_eq!(
            parse_uuid("nope", "expense"),
            Err(EngineError::InvalidId("invalid expense id".to_string()))
        );
    }
}
