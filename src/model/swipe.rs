use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

/// First and last badge swipe of an employee on one day, as delivered by the
/// access-control device feed.
#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
pub struct SwipeRecord {
    pub employee_code: String,
    pub date: NaiveDate,
    pub first_swipe: Option<DateTime<Utc>>,
    pub last_swipe: Option<DateTime<Utc>>,
}
