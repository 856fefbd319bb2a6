use crate::api::attendance::{ProcessRequest, ProcessResponse};
use crate::recon::process::StatusBreakdown;
use utoipa::openapi::security::{HttpAuthScheme, HttpBuilder, SecurityScheme};
use utoipa::{Modify, OpenApi};

#[derive(OpenApi)]
#[openapi(
    info(
        title = "HRM Attendance API",
        version = "1.0.0",
        description = r#"
## Attendance reconciliation

Turns raw badge swipes and approved leave into one attendance status per
employee and day.

### 🔹 Rules
- A day covered by approved leave is **Leave**, whatever the swipes say
- Otherwise the hours between first and last swipe decide:
  under **4.0h** is **HalfDay**, 4.0h or more is **Present**
- No swipes and no leave is **Absent**
- Swipes from unknown employee codes are skipped and reported

### 🔐 Security
Requires a JWT access token for an **Admin**, **HR** or **System** user.

### 🕒 Default window
Without dates the job covers the trailing 31 days ending today, where
"today" is taken in a fixed timezone (+05:30 unless configured).

---
Built with **Rust**, **Actix Web**, **SQLx**, and **Utoipa**.
"#,
    ),
    paths(crate::api::attendance::process_attendance),
    components(schemas(ProcessRequest, ProcessResponse, StatusBreakdown)),
    modifiers(&SecurityAddon),
    tags(
        (name = "Attendance", description = "Attendance management APIs"),
    )
)]
pub struct ApiDoc;

struct SecurityAddon;

impl Modify for SecurityAddon {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        if let Some(components) = openapi.components.as_mut() {
            components.add_security_scheme(
                "bearer_auth",
                SecurityScheme::Http(
                    HttpBuilder::new()
                        .scheme(HttpAuthScheme::Bearer)
                        .bearer_format("JWT")
                        .build(),
                ),
            );
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn openapi_lists_the_process_endpoint() {
        let doc = serde_json::to_value(ApiDoc::openapi()).unwrap();
        assert!(doc["paths"]["/api/attendance/process"]["post"].is_object());
        assert!(doc["components"]["securitySchemes"]["bearer_auth"].is_object());
    }
}
