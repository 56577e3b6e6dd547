//! # ds-api
//!
//! The web routing and orchestration layer for Diskuss.

pub mod handlers;

use actix_web::web;

/// Configures the routes for the board.
///
/// Registration order matters: `submit` and `thread/{id}` must be mounted
/// before the `{page}` catch-all so they are not swallowed by it.
pub fn configure_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("")
            // The board directory
            .route("/", web::get().to(handlers::home))
            // New-thread form (e.g., /abc/submit)
            .route("/{board}/submit", web::get().to(handlers::submit_form))
            .route("/{board}/submit", web::post().to(handlers::submit_thread))
            // Thread view and comment posting (e.g., /abc/thread/3)
            .route("/{board}/thread/{id}", web::get().to(handlers::view_thread))
            .route("/{board}/thread/{id}", web::post().to(handlers::post_comment))
            // Thread listing, first page then explicit pages (e.g., /abc/2)
            .route("/{board}", web::get().to(handlers::board_index))
            .route("/{board}/{page}", web::get().to(handlers::board_page)),
    );
}
