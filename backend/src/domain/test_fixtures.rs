//! Shared fixtures for domain service unit tests.

use std::sync::Arc;

use chrono::{DateTime, Local, TimeZone, Utc};
use mockable::Clock;

use super::{TripDuration, TripParameters, UserProfile, Username};

pub(crate) fn fixture_timestamp() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2026, 5, 14, 9, 0, 0)
        .single()
        .expect("valid fixture timestamp")
}

struct FixtureClock {
    utc_now: DateTime<Utc>,
}

impl Clock for FixtureClock {
    fn local(&self) -> DateTime<Local> {
        self.utc_now.with_timezone(&Local)
    }

    fn utc(&self) -> DateTime<Utc> {
        self.utc_now
    }
}

pub(crate) fn fixture_clock() -> Arc<dyn Clock> {
    Arc::new(FixtureClock {
        utc_now: fixture_timestamp(),
    })
}

pub(crate) fn username(raw: &str) -> Username {
    Username::new(raw).expect("valid fixture username")
}

pub(crate) fn sample_profile() -> UserProfile {
    UserProfile {
        gender: "male".to_owned(),
        age: "35-44".to_owned(),
        ethnicity: "prefer not to say".to_owned(),
    }
}

pub(crate) fn sample_parameters() -> TripParameters {
    TripParameters {
        budget: "budget".to_owned(),
        group_type: "friends".to_owned(),
        group_size: "3-4".to_owned(),
        duration: TripDuration::new(2).expect("positive duration"),
        trip_location: "Porto".to_owned(),
        current_location: "Ribeira".to_owned(),
        child_friendly: false,
    }
}
