use chrono::{DateTime, Duration, FixedOffset, NaiveDate, Utc};

use crate::recon::error::ReconError;

/// Inclusive calendar date range a reconciliation run covers.
#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub struct DateWindow {
    pub start: NaiveDate,
    pub end: NaiveDate,
}

impl DateWindow {
    pub fn new(start: NaiveDate, end: NaiveDate) -> Result<Self, ReconError> {
        if start > end {
            return Err(ReconError::InvalidWindow { start, end });
        }
        Ok(Self { start, end })
    }

    /// Fill in whatever the caller left out.
    ///
    /// With no dates the window is the trailing `default_days` calendar days
    /// ending `today`, both ends included. A lone start runs up to `today`; a
    /// lone end reaches back `default_days` days.
    pub fn resolve(
        start: Option<NaiveDate>,
        end: Option<NaiveDate>,
        today: NaiveDate,
        default_days: u32,
    ) -> Result<Self, ReconError> {
        let span = Duration::days(i64::from(default_days.max(1)) - 1);
        let reach_back = |end: NaiveDate| {
            end.checked_sub_signed(span).ok_or_else(|| {
                ReconError::InvalidRequest(format!(
                    "a {default_days}-day window ending {end} is out of range"
                ))
            })
        };
        match (start, end) {
            (Some(start), Some(end)) => Self::new(start, end),
            (Some(start), None) => Self::new(start, today),
            (None, Some(end)) => Self::new(reach_back(end)?, end),
            (None, None) => Self::new(reach_back(today)?, today),
        }
    }

    #[cfg(test)]
    pub fn contains(&self, date: NaiveDate) -> bool {
        self.start <= date && date <= self.end
    }
}

/// Civil date at `now` in the fixed attendance timezone.
pub fn today_in(offset: FixedOffset, now: DateTime<Utc>) -> NaiveDate {
    now.with_timezone(&offset).date_naive()
}
