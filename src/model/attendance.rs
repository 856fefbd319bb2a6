use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use strum_macros::{Display, EnumString};

#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash, Serialize, Deserialize, Display, EnumString)]
pub enum DayStatus {
    Present,
    Absent,
    HalfDay,
    Leave,
}

impl DayStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            DayStatus::Present => "Present",
            DayStatus::Absent => "Absent",
            DayStatus::HalfDay => "HalfDay",
            DayStatus::Leave => "Leave",
        }
    }
}

/// Where a derived status came from.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Serialize, Deserialize, Display, EnumString)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum AttendanceSource {
    Device,
    Leave,
    None,
}

impl AttendanceSource {
    pub fn as_str(&self) -> &'static str {
        match self {
            AttendanceSource::Device => "device",
            AttendanceSource::Leave => "leave",
            AttendanceSource::None => "none",
        }
    }
}

/// One row of the `attendance_status` table, keyed by (employee_id, date).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AttendanceStatus {
    pub employee_id: u64,
    pub date: NaiveDate,
    pub status: DayStatus,
    pub work_hours: f64,
    pub source: AttendanceSource,
}
