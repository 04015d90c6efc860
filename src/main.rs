use actix_cors::Cors;
use actix_web::{App, HttpServer, web};
use dotenv::dotenv;
use freelancebot_backend::config::AppConfig;
use freelancebot_backend::handlers;
use freelancebot_backend::state::AppState;
use migration::{Migrator, MigratorTrait};
use std::io;
use tracing_subscriber::EnvFilter;

#[actix_web::main]
async fn main() -> io::Result<()> {
    dotenv().ok();

    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env().add_directive(tracing::Level::INFO.into()))
        .init();

    let config = AppConfig::from_env().map_err(|e| io::Error::other(e.to_string()))?;
    let bind_addr = config.bind_addr();
    let run_migrations = config.run_migrations;

    let state = AppState::init(config)
        .await
        .map_err(|e| io::Error::other(e.to_string()))?;

    if run_migrations {
        Migrator::up(&state.db, None)
            .await
            .map_err(|e| io::Error::other(format!("Migration failed: {e}")))?;
        tracing::info!("Migrations applied");
    }

    let state = web::Data::new(state);
    let app_state = state.clone();

    tracing::info!("Server running at http://{bind_addr}");

    HttpServer::new(move || {
        let cors = Cors::default()
            .allow_any_origin()
            .allowed_methods(vec!["GET", "POST", "PUT", "PATCH", "DELETE", "OPTIONS"])
            .allowed_headers(vec![
                actix_web::http::header::AUTHORIZATION,
                actix_web::http::header::CONTENT_TYPE,
                actix_web::http::header::ACCEPT,
            ])
            .max_age(3600);

        App::new()
            .wrap(cors)
            .app_data(app_state.clone())
            .service(web::scope("/api").configure(handlers::init_routes))
    })
    .bind(&bind_addr)?
    .run()
    .await?;

    state.shutdown().await;
    tracing::info!("Server stopped");
    Ok(())
}
