use actix_web::web;

pub mod decide;
pub mod health;

/// Configure application routes.
///
/// Shared by `main.rs` and the HTTP tests so both serve the same paths
/// with the same JSON error handling.
pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.app_data(web::JsonConfig::default().error_handler(decide::json_error_handler));

    // Health check: /health
    cfg.configure(health::configure_routes);

    // Decisions: /attack, /defend
    cfg.configure(decide::configure_routes);
}
