use crate::{api::attendance, auth::middleware::auth_middleware, config::Config};
use actix_governor::{
    Governor, GovernorConfig, GovernorConfigBuilder, PeerIpKeyExtractor,
    governor::middleware::NoOpMiddleware,
};
use actix_web::{middleware::from_fn, web};

pub type RateLimit = GovernorConfig<PeerIpKeyExtractor, NoOpMiddleware>;

/// Per-IP limiter shared by every worker; `None` if the numbers are unusable.
pub fn build_limiter(requests_per_min: u32) -> Option<RateLimit> {
    let per_ms = if requests_per_min == 0 {
        1
    } else {
        (60_000 / requests_per_min as u64).max(1)
    };
    GovernorConfigBuilder::default()
        .milliseconds_per_request(per_ms)
        .burst_size(requests_per_min.max(1))
        .key_extractor(PeerIpKeyExtractor)
        .finish()
}

pub fn configure(cfg: &mut web::ServiceConfig, config: &Config, limiter: &RateLimit) {
    // Protected routes
    cfg.service(
        web::scope(&config.api_prefix)
            .wrap(from_fn(auth_middleware)) // authentication
            .wrap(Governor::new(limiter)) // rate limiting
            .service(
                web::scope("/attendance")
                    // /attendance/process
                    .service(
                        web::resource("/process")
                            .route(web::post().to(attendance::process_attendance)),
                    ),
            ),
    );
}

// SCHEDULER / HR
//  └─ POST /api/attendance/process  (Authorization: Bearer access_token)
//       ├─ body {} or empty  -> trailing 31 days ending today (+05:30)
//       └─ body {startDate, endDate}
