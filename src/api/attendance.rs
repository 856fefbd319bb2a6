use crate::auth::auth::AuthUser;
use crate::config::Config;
use crate::recon::error::ReconError;
use crate::recon::process::{ReconSummary, StatusBreakdown, run_reconciliation};
use crate::recon::status::StatusPolicy;
use crate::recon::store::MySqlStore;
use crate::recon::window::{DateWindow, today_in};
use actix_web::{HttpResponse, Responder, web};
use chrono::{NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use sqlx::MySqlPool;
use tracing::{error, info};
use utoipa::ToSchema;

#[derive(Debug, Default, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ProcessRequest {
    /// First day to reconcile, inclusive
    #[schema(example = "2024-04-01", value_type = Option<String>)]
    pub start_date: Option<NaiveDate>,
    /// Last day to reconcile, inclusive
    #[schema(example = "2024-04-30", value_type = Option<String>)]
    pub end_date: Option<NaiveDate>,
}

#[derive(Debug, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ProcessResponse {
    #[schema(example = true)]
    pub success: bool,
    #[schema(example = 42)]
    pub processed_rows: usize,
    #[schema(example = 40)]
    pub inserted_or_updated: u64,
    #[schema(example = json!(["E404"]))]
    pub unmatched_employee_codes: Vec<String>,
    pub message: String,
    #[schema(example = "2024-04-01", value_type = String)]
    pub start_date: NaiveDate,
    #[schema(example = "2024-04-30", value_type = String)]
    pub end_date: NaiveDate,
    pub breakdown: StatusBreakdown,
}

impl From<ReconSummary> for ProcessResponse {
    fn from(summary: ReconSummary) -> Self {
        let message = format!(
            "Processed {} swipe rows from {} to {}, upserted {} attendance rows",
            summary.rows_processed, summary.start_date, summary.end_date, summary.rows_upserted
        );
        Self {
            success: true,
            processed_rows: summary.rows_processed,
            inserted_or_updated: summary.rows_upserted,
            unmatched_employee_codes: summary.unmatched_employee_codes,
            message,
            start_date: summary.start_date,
            end_date: summary.end_date,
            breakdown: summary.breakdown,
        }
    }
}

/// An empty body (or JSON `null`) means "use the default window".
pub fn parse_process_request(body: &[u8]) -> Result<ProcessRequest, ReconError> {
    if body.iter().all(u8::is_ascii_whitespace) {
        return Ok(ProcessRequest::default());
    }
    serde_json::from_slice::<Option<ProcessRequest>>(body)
        .map(Option::unwrap_or_default)
        .map_err(|e| ReconError::InvalidRequest(e.to_string()))
}

/// Reconcile swipes and approved leave into daily attendance status
#[utoipa::path(
    post,
    path = "/api/attendance/process",
    request_body(
        content = ProcessRequest,
        description = "Optional date window; defaults to the trailing 31 days",
        content_type = "application/json"
    ),
    responses(
        (status = 200, description = "Attendance reconciled", body = ProcessResponse),
        (status = 400, description = "Invalid date window", body = Object, example = json!({
            "success": false,
            "error": "startDate 2024-03-12 is after endDate 2024-03-10"
        })),
        (status = 401, description = "Unauthorized"),
        (status = 403, description = "Forbidden"),
        (status = 500, description = "Store read or write failed", body = Object, example = json!({
            "success": false,
            "error": "failed to read leave_requests: pool timed out while waiting for an open connection"
        }))
    ),
    security(
        ("bearer_auth" = [])
    ),
    tag = "Attendance"
)]
pub async fn process_attendance(
    auth: AuthUser,
    pool: web::Data<MySqlPool>,
    config: web::Data<Config>,
    body: web::Bytes,
) -> actix_web::Result<impl Responder> {
    auth.require_attendance_job_role()?;

    let request = parse_process_request(&body)?;

    let offset = config.attendance_offset().map_err(|e| {
        error!(error = %e, "Attendance timezone misconfigured");
        actix_web::error::ErrorInternalServerError("Internal Server Error")
    })?;
    let window = DateWindow::resolve(
        request.start_date,
        request.end_date,
        today_in(offset, Utc::now()),
        config.attendance_default_window_days,
    )?;

    info!(
        user_id = auth.user_id,
        username = %auth.username,
        start = %window.start,
        end = %window.end,
        "Attendance processing requested"
    );

    let store = MySqlStore::new(pool.get_ref().clone());
    let policy = StatusPolicy {
        half_day_hours: config.attendance_half_day_hours,
    };
    let summary = run_reconciliation(&store, window, policy).await?;

    Ok(HttpResponse::Ok().json(ProcessResponse::from(summary)))
}
