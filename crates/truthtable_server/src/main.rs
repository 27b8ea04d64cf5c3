use actix_web::{middleware, web, App, HttpResponse, HttpServer, Responder};
use chrono::Utc;
use serde_json::json;

mod config;
mod store;
mod validation;

use config::CONFIG;
use store::AnalysisStore;

async fn index() -> impl Responder {
    HttpResponse::Ok().body(
        "Truthtable API Server

Available endpoints:
POST /validate-logic
POST /analyses
GET  /analyses
GET  /stats
GET  /health",
    )
}

async fn health() -> impl Responder {
    HttpResponse::Ok().json(json!({
        "status": "ok",
        "timestamp": Utc::now().to_rfc3339(),
    }))
}

fn routes(cfg: &mut web::ServiceConfig) {
    cfg.route("/", web::get().to(index))
        .route("/health", web::get().to(health))
        .route("/validate-logic", web::post().to(validation::validate_logic))
        .route("/analyses", web::post().to(validation::create_analysis))
        .route("/analyses", web::get().to(validation::recent_analyses))
        .route("/stats", web::get().to(validation::stats));
}

#[actix_web::main]
async fn main() -> std::io::Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let store = web::Data::new(AnalysisStore::new(&CONFIG.state_path));
    log::info!(
        "Listening on {}, enumerating at most {} atoms",
        CONFIG.bind,
        CONFIG.params.atom_limit()
    );

    HttpServer::new(move || {
        App::new()
            .wrap(middleware::Logger::default())
            .wrap(middleware::DefaultHeaders::new().add(("Access-Control-Allow-Origin", "*")))
            .app_data(store.clone())
            .configure(routes)
    })
    .bind(CONFIG.bind.as_str())?
    .run()
    .await
}
