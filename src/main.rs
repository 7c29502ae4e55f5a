// src/main.rs
use std::sync::Arc;

use actix_web::{App, HttpServer, middleware, web};
use anyhow::Context;
use log::info;

use atelier::AppState;
use atelier::config::Config;
use atelier::handlers;
use atelier::orchestrator::Orchestrator;
use atelier::services::GeminiService;

#[actix_web::main]
async fn main() -> anyhow::Result<()> {
    env_logger::init_from_env(env_logger::Env::new().default_filter_or("info"));

    info!("Starting Atelier editor...");

    let config = Config::from_env().context("failed to load configuration")?;
    let backend = GeminiService::new(&config).context("failed to create the Gemini client")?;
    info!(
        "Using image model {} and text model {}",
        config.image_model, config.text_model
    );

    let app_state = AppState::new(Orchestrator::new(Arc::new(backend)));
    let shutdown_state = app_state.clone();
    let static_dir = config.static_dir.clone();
    if let Some(dir) = &static_dir {
        info!("Serving front end from {}", dir.display());
    }

    info!("Starting HTTP server on {}", config.bind);

    HttpServer::new(move || {
        let app = App::new()
            .app_data(web::Data::new(app_state.clone()))
            .app_data(web::JsonConfig::default().limit(4 * 1024 * 1024))
            .wrap(middleware::Logger::default())
            .configure(handlers::configure);
        match &static_dir {
            Some(dir) => app.service(actix_files::Files::new("/", dir).index_file("index.html")),
            None => app,
        }
    })
    .bind(&config.bind)
    .with_context(|| format!("failed to bind {}", config.bind))?
    .run()
    .await?;

    shutdown_state.orchestrator.shutdown();
    info!("Atelier editor stopped");
    Ok(())
}
