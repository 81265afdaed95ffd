use actix_web::{web, App, HttpServer};
use durak_backend::config::server::ServerConfig;
use durak_backend::routes;
use durak_backend::state::app_state::AppState;
use tracing::info;

mod telemetry;

#[actix_web::main]
async fn main() -> std::io::Result<()> {
    telemetry::init_tracing();

    let config = match ServerConfig::from_env() {
        Ok(config) => config,
        Err(e) => {
            eprintln!("❌ {e}");
            std::process::exit(1);
        }
    };

    info!(
        host = %config.host,
        port = config.port,
        time_budget_ms = config.search.time_budget_ms,
        "Starting Durak AI backend"
    );

    let data = web::Data::new(AppState::new(config.search.clone()));

    HttpServer::new(move || {
        App::new()
            .app_data(data.clone())
            .configure(routes::configure)
    })
    .bind((config.host.as_str(), config.port))?
    .run()
    .await
}
