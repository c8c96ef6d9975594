//! HTTP handlers and route configuration.

mod authors;
mod health;
mod posts;


use actix_web::error::UrlencodedError;
use actix_web::{HttpResponse, web};

use crate::middleware::error::AppError;
use crate::views::{POST_LIST_PATH, redirect};

/// Largest urlencoded form body accepted (2.5 MiB). Post content has no
/// length limit of its own, so this is the effective ceiling.
pub const FORM_BODY_LIMIT: usize = 2_621_440;

/// Configure all application routes.
pub fn configure_routes(cfg: &mut web::ServiceConfig) {
    // Malformed ids get the same HTML 404 as unknown ones.
    cfg.app_data(web::PathConfig::default().error_handler(|err, _req| {
        AppError::NotFound(format!("Invalid identifier: {}", err)).into()
    }));
    cfg.app_data(
        web::FormConfig::default()
            .limit(FORM_BODY_LIMIT)
            .error_handler(|err, _req| match err {
                UrlencodedError::Overflow { size, limit } => AppError::PayloadTooLarge(format!(
                    "Form body of {size} bytes exceeds the {limit} byte limit"
                ))
                .into(),
                other => AppError::BadRequest(format!("Invalid form submission: {other}")).into(),
            }),
    );

    cfg.route("/", web::get().to(index))
        .route("/health", web::get().to(health::health_check))
        .service(
            web::scope("/posts")
                .route("/", web::get().to(posts::post_list))
                .service(
                    web::resource("/new/")
                        .route(web::get().to(posts::post_new))
                        .route(web::post().to(posts::post_create)),
                )
                .route("/{id}/", web::get().to(posts::post_detail))
                .service(
                    web::resource("/{id}/edit/")
                        .route(web::get().to(posts::post_edit))
                        .route(web::post().to(posts::post_update)),
                )
                .route("/{id}/delete/", web::post().to(posts::post_delete)),
        )
        .service(
            web::scope("/authors")
                .service(
                    web::resource("/")
                        .route(web::get().to(authors::author_list))
                        .route(web::post().to(authors::author_create)),
                )
                .route("/{id}/delete/", web::post().to(authors::author_delete)),
        );
}

/// GET / - the board lives under /posts/.
async fn index() -> HttpResponse {
    redirect(POST_LIST_PATH)
}
