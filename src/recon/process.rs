//! The attendance reconciliation batch.
//!
//! One run loads the swipe rows of a date window, the employee directory and
//! all approved leave, derives a status per employee-day and writes them back
//! with a single upsert. Reads and the write are not isolated from concurrent
//! edits to leave or swipes; a run reflects the data as read at call time.

use chrono::NaiveDate;
use serde::Serialize;
use std::collections::BTreeMap;
use tracing::{Instrument, error, info, info_span, warn};
use utoipa::ToSchema;
use uuid::Uuid;

use crate::model::attendance::{AttendanceStatus, DayStatus};
use crate::model::swipe::SwipeRecord;
use crate::recon::error::ReconError;
use crate::recon::identity::{Directory, UnmatchedCodes};
use crate::recon::leave_index::LeaveIndex;
use crate::recon::status::{StatusPolicy, derive_status};
use crate::recon::store::AttendanceStore;
use crate::recon::window::DateWindow;

/// Read-only inputs shared by every row of one run.
pub struct ReconContext {
    pub directory: Directory,
    pub leave: LeaveIndex,
    pub policy: StatusPolicy,
}

#[derive(Debug, Default)]
pub struct Reconciliation {
    /// Sorted by (employee_id, date), one row per key.
    pub rows: Vec<AttendanceStatus>,
    pub unmatched_employee_codes: Vec<String>,
}

#[derive(Debug, Default, Clone, PartialEq, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct StatusBreakdown {
    pub present: usize,
    pub half_day: usize,
    pub absent: usize,
    pub leave: usize,
}

impl StatusBreakdown {
    fn of(rows: &[AttendanceStatus]) -> Self {
        let mut breakdown = Self::default();
        for row in rows {
            match row.status {
                DayStatus::Present => breakdown.present += 1,
                DayStatus::HalfDay => breakdown.half_day += 1,
                DayStatus::Absent => breakdown.absent += 1,
                DayStatus::Leave => breakdown.leave += 1,
            }
        }
        breakdown
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct ReconSummary {
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
    pub rows_processed: usize,
    pub rows_upserted: u64,
    pub unmatched_employee_codes: Vec<String>,
    pub breakdown: StatusBreakdown,
}

/// Derive output rows for every swipe record. Pure; never fails.
pub fn reconcile(ctx: &ReconContext, swipes: &[SwipeRecord]) -> Reconciliation {
    let mut unmatched = UnmatchedCodes::default();
    let mut rows: BTreeMap<(u64, NaiveDate), AttendanceStatus> = BTreeMap::new();

    for swipe in swipes {
        let Some(employee_id) = ctx.directory.resolve(&swipe.employee_code) else {
            unmatched.record(&swipe.employee_code);
            continue;
        };

        let derived = derive_status(
            ctx.leave.is_on_leave(employee_id, swipe.date),
            swipe.first_swipe,
            swipe.last_swipe,
            &ctx.policy,
        );

        // a later row for the same employee-day replaces the earlier one
        rows.insert(
            (employee_id, swipe.date),
            AttendanceStatus {
                employee_id,
                date: swipe.date,
                status: derived.status,
                work_hours: derived.work_hours,
                source: derived.source,
            },
        );
    }

    Reconciliation {
        rows: rows.into_values().collect(),
        unmatched_employee_codes: unmatched.into_vec(),
    }
}

/// Run the whole batch for `window` against `store`.
pub async fn run_reconciliation<S>(
    store: &S,
    window: DateWindow,
    policy: StatusPolicy,
) -> Result<ReconSummary, ReconError>
where
    S: AttendanceStore + ?Sized,
{
    let span = info_span!(
        "attendance_process",
        run_id = %Uuid::new_v4(),
        start = %window.start,
        end = %window.end
    );

    async move {
        let swipes = store.swipes_between(window).await.map_err(|e| {
            error!(error = %e, "Failed to load swipe rows");
            ReconError::fetch("attendance_swipes", e)
        })?;

        let identities = store.employee_directory().await.map_err(|e| {
            error!(error = %e, "Failed to load employee directory");
            ReconError::fetch("employees", e)
        })?;

        let grants = store.approved_leaves().await.map_err(|e| {
            error!(error = %e, "Failed to load approved leave");
            ReconError::fetch("leave_requests", e)
        })?;

        let ctx = ReconContext {
            directory: Directory::from_identities(&identities),
            leave: LeaveIndex::from_grants_within(&grants, window),
            policy,
        };
        info!(
            swipes = swipes.len(),
            employees = ctx.directory.len(),
            grants = grants.len(),
            "Inputs loaded"
        );

        let outcome = reconcile(&ctx, &swipes);

        if !outcome.unmatched_employee_codes.is_empty() {
            warn!(
                count = outcome.unmatched_employee_codes.len(),
                codes = ?outcome.unmatched_employee_codes,
                "Swipe rows with unknown employee codes were skipped"
            );
        }

        let rows_upserted = if outcome.rows.is_empty() {
            0
        } else {
            store.upsert_statuses(&outcome.rows).await.map_err(|e| {
                error!(error = %e, rows = outcome.rows.len(), "Attendance upsert failed");
                ReconError::Upsert(e.to_string())
            })?
        };

        let summary = ReconSummary {
            start_date: window.start,
            end_date: window.end,
            rows_processed: swipes.len(),
            rows_upserted,
            breakdown: StatusBreakdown::of(&outcome.rows),
            unmatched_employee_codes: outcome.unmatched_employee_codes,
        };

        info!(
            processed = summary.rows_processed,
            upserted = summary.rows_upserted,
            unmatched = summary.unmatched_employee_codes.len(),
            "Attendance reconciliation finished"
        );

        Ok::<_, ReconError>(summary)
    }
    .instrument(span)
    .await
}
