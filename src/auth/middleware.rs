use crate::auth::auth::AuthUser;
use crate::auth::jwt::verify_access_token;
use crate::config::Config;
use crate::model::role::Role;
use actix_web::middleware::Next;
use actix_web::{
    Error, HttpMessage, HttpResponse,
    body::BoxBody,
    dev::{ServiceRequest, ServiceResponse},
    http::header::{AUTHORIZATION, HeaderValue},
    web::Data,
};
use serde_json::json;
use tracing::debug;

/// Turn an `Authorization` header into the caller, or the reason it was refused.
pub fn authenticate(header: Option<&HeaderValue>, secret: &str) -> Result<AuthUser, String> {
    let value = header
        .ok_or("missing Authorization header")?
        .to_str()
        .map_err(|_| "Authorization header is not valid ASCII")?;

    let token = value
        .strip_prefix("Bearer ")
        .ok_or("Authorization header must start with Bearer")?;

    let claims = verify_access_token(token, secret)
        .map_err(|e| format!("invalid or expired token: {e}"))?;

    let role = Role::from_id(claims.role).ok_or_else(|| format!("unknown role {}", claims.role))?;

    Ok(AuthUser {
        user_id: claims.user_id,
        username: claims.sub,
        role,
    })
}

pub async fn auth_middleware(
    req: ServiceRequest,
    next: Next<BoxBody>,
) -> Result<ServiceResponse<BoxBody>, Error> {
    let secret = req
        .app_data::<Data<Config>>()
        .map(|c| c.jwt_secret.clone())
        .ok_or_else(|| actix_web::error::ErrorInternalServerError("App config missing"))?;

    match authenticate(req.headers().get(AUTHORIZATION), &secret) {
        Ok(user) => {
            req.extensions_mut().insert(user);
            next.call(req).await
        }
        Err(reason) => {
            debug!(path = req.path(), reason = %reason, "Rejected unauthenticated request");
            let resp = HttpResponse::Unauthorized().json(json!({
                "success": false,
                "error": reason,
            }));
            Ok(req.into_response(resp.map_into_boxed_body()))
        }
    }
}
