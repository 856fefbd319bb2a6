use async_trait::async_trait;
use sqlx::{MySql, MySqlPool, QueryBuilder};

use crate::model::attendance::AttendanceStatus;
use crate::model::employee::EmployeeIdentity;
use crate::model::leave_request::LeaveGrant;
use crate::model::swipe::SwipeRecord;
use crate::recon::window::DateWindow;

/// Rows per INSERT statement; keeps each statement well under the MySQL
/// placeholder limit.
const UPSERT_CHUNK_ROWS: usize = 1000;

/// Everything the reconciliation job reads and writes.
#[async_trait]
pub trait AttendanceStore: Send + Sync {
    async fn swipes_between(&self, window: DateWindow) -> Result<Vec<SwipeRecord>, sqlx::Error>;

    /// Full (employee_code, employee_id) snapshot.
    async fn employee_directory(&self) -> Result<Vec<EmployeeIdentity>, sqlx::Error>;

    /// Every approved leave grant, no date filter.
    async fn approved_leaves(&self) -> Result<Vec<LeaveGrant>, sqlx::Error>;

    /// Insert or overwrite by (employee_id, date), all or nothing. Returns the
    /// number of rows written.
    async fn upsert_statuses(&self, rows: &[AttendanceStatus]) -> Result<u64, sqlx::Error>;
}

pub struct MySqlStore {
    pool: MySqlPool,
}

impl MySqlStore {
    pub fn new(pool: MySqlPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl AttendanceStore for MySqlStore {
    async fn swipes_between(&self, window: DateWindow) -> Result<Vec<SwipeRecord>, sqlx::Error> {
        sqlx::query_as::<_, SwipeRecord>(
            r#"
            SELECT employee_code, date, first_swipe, last_swipe
            FROM attendance_swipes
            WHERE date BETWEEN ? AND ?
            ORDER BY date, employee_code
            "#,
        )
        .bind(window.start)
        .bind(window.end)
        .fetch_all(&self.pool)
        .await
    }

    async fn employee_directory(&self) -> Result<Vec<EmployeeIdentity>, sqlx::Error> {
        sqlx::query_as::<_, EmployeeIdentity>(
            r#"
            SELECT employee_code, id AS employee_id
            FROM employees
            "#,
        )
        .fetch_all(&self.pool)
        .await
    }

    async fn approved_leaves(&self) -> Result<Vec<LeaveGrant>, sqlx::Error> {
        sqlx::query_as::<_, LeaveGrant>(
            r#"
            SELECT employee_id, start_date, end_date
            FROM leave_requests
            WHERE status = 'approved'
            "#,
        )
        .fetch_all(&self.pool)
        .await
    }

    async fn upsert_statuses(&self, rows: &[AttendanceStatus]) -> Result<u64, sqlx::Error> {
        if rows.is_empty() {
            return Ok(0);
        }

        let mut tx = self.pool.begin().await?;

        for chunk in rows.chunks(UPSERT_CHUNK_ROWS) {
            let mut builder: QueryBuilder<MySql> = QueryBuilder::new(
                "INSERT INTO attendance_status (employee_id, date, status, work_hours, source) ",
            );
            builder.push_values(chunk, |mut b, row| {
                b.push_bind(row.employee_id)
                    .push_bind(row.date)
                    .push_bind(row.status.as_str())
                    .push_bind(row.work_hours)
                    .push_bind(row.source.as_str());
            });
            builder.push(
                r#"
                ON DUPLICATE KEY UPDATE
                    status = VALUES(status),
                    work_hours = VALUES(work_hours),
                    source = VALUES(source),
                    updated_at = CURRENT_TIMESTAMP
                "#,
            );

            builder.build().execute(&mut *tx).await?;
        }

        tx.commit().await?;
        Ok(rows.len() as u64)
    }
}
