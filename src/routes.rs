use crate::{
    api::{leaves, users},
    auth::{handlers, middleware::identity_middleware},
    config::Config,
};
use actix_governor::{
    Governor, GovernorConfigBuilder, PeerIpKeyExtractor, governor::middleware::NoOpMiddleware,
};
use actix_web::{HttpResponse, Responder, middleware::from_fn, web};
use serde_json::json;

/// Liveness probe.
pub async fn health() -> impl Responder {
    HttpResponse::Ok().json(json!({ "status": "OK" }))
}

// Helper to build per-route limiter
fn build_limiter(requests_per_min: u32) -> Governor<PeerIpKeyExtractor, NoOpMiddleware> {
    let per_ms = if requests_per_min == 0 {
        1
    } else {
        60_000 / requests_per_min as u64
    };
    let cfg = GovernorConfigBuilder::default()
        .per_millisecond(per_ms)
        .burst_size(requests_per_min)
        .key_extractor(PeerIpKeyExtractor)
        .finish()
        .unwrap();
    Governor::new(&cfg)
}

pub fn configure(cfg: &mut web::ServiceConfig, config: &Config) {
    // Public routes
    cfg.service(web::resource("/health").route(web::get().to(health)));
    cfg.service(
        web::scope("/auth").service(
            web::resource("/login")
                .wrap(build_limiter(config.rate_login_per_min))
                .route(web::post().to(handlers::login)),
        ),
    );

    // Protected routes: identity headers required, trusted as asserted
    cfg.service(
        web::scope(&config.api_prefix)
            .wrap(from_fn(identity_middleware))
            .wrap(build_limiter(config.rate_protected_per_min))
            .service(
                web::scope("/users")
                    // /users
                    .service(
                        web::resource("")
                            .route(web::post().to(users::create_user))
                            .route(web::get().to(users::list_users)),
                    )
                    // /users/{id}
                    .service(
                        web::resource("/{id}")
                            .route(web::get().to(users::get_user))
                            .route(web::patch().to(users::update_user))
                            .route(web::delete().to(users::delete_user)),
                    ),
            )
            .service(
                web::scope("/leaves")
                    // /leaves
                    .service(
                        web::resource("")
                            .route(web::get().to(leaves::list_leaves))
                            .route(web::post().to(leaves::submit_leave)),
                    )
                    // /leaves/{id}
                    .service(web::resource("/{id}").route(web::get().to(leaves::get_leave)))
                    // /leaves/{id}/approve
                    .service(
                        web::resource("/{id}/approve")
                            .route(web::put().to(leaves::approve_leave)),
                    )
                    // /leaves/{id}/reject
                    .service(
                        web::resource("/{id}/reject").route(web::put().to(leaves::reject_leave)),
                    )
                    // /leaves/{id}/cancel
                    .service(
                        web::resource("/{id}/cancel").route(web::put().to(leaves::cancel_leave)),
                    ),
            ),
    );
}
