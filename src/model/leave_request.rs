use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// An approved leave request. Both ends are inclusive.
#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
pub struct LeaveGrant {
    pub employee_id: u64,
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
}
