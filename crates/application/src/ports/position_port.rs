//! Device position stream port
//!
//! Push-only: the platform emits coordinate updates, nothing is requested.
//! The location tracker service consumes this port and keeps only the most
//! recent fix.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use domain::value_objects::GeoLocation;
#[cfg(test)]
use mockall::automock;

/// A single position update from the device
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PositionFix {
    /// Reported position
    pub location: GeoLocation,
    /// When the fix was recorded
    pub recorded_at: DateTime<Utc>,
}

impl PositionFix {
    /// Create a fix stamped with the current time
    #[must_use]
    pub fn now(location: GeoLocation) -> Self {
        Self {
            location,
            recorded_at: Utc::now(),
        }
    }
}

/// Port for the device position stream
#[cfg_attr(test, automock)]
#[async_trait]
pub trait PositionStreamPort: Send + Sync {
    /// Wait for the next fix
    ///
    /// Returns `None` when the stream has ended.
    async fn next_fix(&self) -> Option<PositionFix>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn trait_is_send_sync() {
        fn assert_send_sync<T: Send + Sync + ?Sized>() {}
        assert_send_sync::<dyn PositionStreamPort>();
    }

    #[test]
    fn fix_now_carries_location() {
        let fix = PositionFix::now(GeoLocation::london());
        assert_eq!(fix.location, GeoLocation::london());
        assert!(fix.recorded_at <= Utc::now());
    }
}
