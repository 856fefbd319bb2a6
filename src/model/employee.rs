use serde::{Deserialize, Serialize};

/// Directory entry mapping a badge / HR employee code to the internal id.
#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
pub struct EmployeeIdentity {
    pub employee_code: String,
    pub employee_id: u64,
}
