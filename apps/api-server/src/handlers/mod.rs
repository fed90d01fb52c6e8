//! HTTP handlers and route configuration.

mod auth;
mod groups;
mod health;
mod posts;
mod profiles;

use actix_web::web;

/// Configure all application routes.
pub fn configure_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/api")
            // Public routes
            .route("/health", web::get().to(health::health_check))
            // Auth routes
            .service(
                web::scope("/auth")
                    .route("/register", web::post().to(auth::register))
                    .route("/login", web::post().to(auth::login))
                    .route("/me", web::get().to(auth::me)),
            )
            // Post routes
            .service(
                web::scope("/posts")
                    .route("", web::get().to(posts::list))
                    .route("", web::post().to(posts::create))
                    .route("/{id}", web::get().to(posts::detail))
                    .route("/{id}", web::put().to(posts::edit))
                    .route("/{id}/image", web::get().to(posts::image)),
            )
            // Group routes
            .service(
                web::scope("/groups")
                    .route("", web::get().to(groups::list))
                    .route("", web::post().to(groups::create))
                    .route("/{slug}", web::get().to(groups::feed))
                    .route("/{slug}", web::delete().to(groups::delete)),
            )
            // Author profile feeds
            .route(
                "/users/{username}/posts",
                web::get().to(profiles::author_feed),
            ),
    );
}
