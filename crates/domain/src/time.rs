//! Time and timestamp helpers.

use chrono::{DateTime, Utc};

/// UTC timestamp recorded whenever a device's status or setting changes.
pub type Timestamp = DateTime<Utc>;

/// Return the current UTC time.
#[must_use]
pub fn now() -> Timestamp {
    Utc::now()
}
