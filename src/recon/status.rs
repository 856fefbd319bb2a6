use chrono::{DateTime, Utc};

use crate::model::attendance::{AttendanceSource, DayStatus};

pub const HALF_DAY_THRESHOLD_HOURS: f64 = 4.0;

#[derive(Debug, Copy, Clone, PartialEq)]
pub struct StatusPolicy {
    /// Worked hours strictly below this are a half day.
    pub half_day_hours: f64,
}

impl Default for StatusPolicy {
    fn default() -> Self {
        Self {
            half_day_hours: HALF_DAY_THRESHOLD_HOURS,
        }
    }
}

#[derive(Debug, Copy, Clone, PartialEq)]
pub struct Derived {
    pub status: DayStatus,
    pub work_hours: f64,
    pub source: AttendanceSource,
}

/// Decide one employee-day. Leave wins over swipes, swipes over nothing.
///
/// With a single swipe the missing side is taken to be the same instant, so
/// the day counts zero hours and lands on `HalfDay`. Kept as-is for parity
/// with existing attendance data even though a lone swipe is probably an
/// incomplete day rather than a short one.
pub fn derive_status(
    on_leave: bool,
    first_swipe: Option<DateTime<Utc>>,
    last_swipe: Option<DateTime<Utc>>,
    policy: &StatusPolicy,
) -> Derived {
    if on_leave {
        return Derived {
            status: DayStatus::Leave,
            work_hours: 0.0,
            source: AttendanceSource::Leave,
        };
    }

    let (first, last) = match (first_swipe, last_swipe) {
        (Some(first), Some(last)) => (first, last),
        (Some(only), None) | (None, Some(only)) => (only, only),
        (None, None) => {
            return Derived {
                status: DayStatus::Absent,
                work_hours: 0.0,
                source: AttendanceSource::None,
            };
        }
    };

    let hours = elapsed_hours(first, last);
    let status = if hours < policy.half_day_hours {
        DayStatus::HalfDay
    } else {
        DayStatus::Present
    };

    Derived {
        status,
        work_hours: round_hours(hours),
        source: AttendanceSource::Device,
    }
}

fn elapsed_hours(first: DateTime<Utc>, last: DateTime<Utc>) -> f64 {
    let millis = (last - first).num_milliseconds().abs();
    millis as f64 / 3_600_000.0
}

/// Two decimal places, as stored in `attendance_status.work_hours`.
fn round_hours(hours: f64) -> f64 {
    (hours * 100.0).round() / 100.0
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn at(h: u32, m: u32) -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2024, 4, 1, h, m, 0).unwrap()
    }

    #[test]
    fn leave_beats_swipes() {
        let d = derive_status(true, Some(at(9, 0)), Some(at(18, 0)), &StatusPolicy::default());
        assert_eq!(d.status, DayStatus::Leave);
        assert_eq!(d.source, AttendanceSource::Leave);
        assert_eq!(d.work_hours, 0.0);
    }

    #[test]
    fn four_hours_is_present_just_under_is_half_day() {
        let policy = StatusPolicy::default();

        let d = derive_status(false, Some(at(9, 0)), Some(at(12, 59)), &policy);
        assert_eq!(d.status, DayStatus::HalfDay);
        assert_eq!(d.work_hours, 3.98);
        assert_eq!(d.source, AttendanceSource::Device);

        let d = derive_status(false, Some(at(9, 0)), Some(at(13, 0)), &policy);
        assert_eq!(d.status, DayStatus::Present);
        assert_eq!(d.work_hours, 4.0);
    }

    #[test]
    fn threshold_uses_unrounded_hours() {
        let first = at(9, 0);
        let last = first + chrono::Duration::seconds(4 * 3600 - 1);
        let d = derive_status(false, Some(first), Some(last), &StatusPolicy::default());
        assert_eq!(d.status, DayStatus::HalfDay);
        assert_eq!(d.work_hours, 4.0);
    }

    #[test]
    fn no_swipes_is_absent() {
        let d = derive_status(false, None, None, &StatusPolicy::default());
        assert_eq!(d.status, DayStatus::Absent);
        assert_eq!(d.work_hours, 0.0);
        assert_eq!(d.source, AttendanceSource::None);
    }

    #[test]
    fn single_swipe_counts_zero_hours() {
        let policy = StatusPolicy::default();
        for (first, last) in [(Some(at(9, 0)), None), (None, Some(at(17, 0)))] {
            let d = derive_status(false, first, last, &policy);
            assert_eq!(d.status, DayStatus::HalfDay);
            assert_eq!(d.work_hours, 0.0);
            assert_eq!(d.source, AttendanceSource::Device);
        }
    }

    #[test]
    fn reversed_swipes_use_absolute_difference() {
        let d = derive_status(false, Some(at(17, 30)), Some(at(9, 0)), &StatusPolicy::default());
        assert_eq!(d.status, DayStatus::Present);
        assert_eq!(d.work_hours, 8.5);
    }

    #[test]
    fn custom_threshold() {
        let policy = StatusPolicy { half_day_hours: 6.0 };
        let d = derive_status(false, Some(at(9, 0)), Some(at(14, 0)), &policy);
        assert_eq!(d.status, DayStatus::HalfDay);
    }
}
