use actix_web::{error, web, HttpResponse, Result};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use truthtable::{validate_with, ValidationResult};

use crate::{
    config::CONFIG,
    store::{check_input, AnalysisStore},
};

const RECENT_COUNT: usize = 10;

#[derive(Deserialize)]
pub(crate) struct ArgumentForm {
    premises: Vec<String>,
    conclusion: Option<String>,
}

#[derive(Serialize)]
struct AnalysisResponse {
    id: u64,
    #[serde(rename = "createdAt")]
    created_at: DateTime<Utc>,
    logic: ValidationResult,
}

pub(crate) async fn validate_logic(form: web::Json<ArgumentForm>) -> Result<HttpResponse> {
    let ArgumentForm {
        premises,
        conclusion,
    } = form.into_inner();
    check_input(&premises, conclusion.as_deref()).map_err(error::ErrorBadRequest)?;

    let res =
        web::block(move || validate_with(&premises, conclusion.as_deref(), &CONFIG.params)).await?;

    Ok(HttpResponse::Ok().json(res))
}

pub(crate) async fn create_analysis(
    store: web::Data<AnalysisStore>,
    form: web::Json<ArgumentForm>,
) -> Result<HttpResponse> {
    let ArgumentForm {
        premises,
        conclusion,
    } = form.into_inner();
    check_input(&premises, conclusion.as_deref()).map_err(error::ErrorBadRequest)?;

    let (stored, logic) = web::block(move || {
        let logic = validate_with(&premises, conclusion.as_deref(), &CONFIG.params);
        store.add(premises, conclusion, &logic).map(|s| (s, logic))
    })
    .await?
    .map_err(error::ErrorInternalServerError)?;

    Ok(HttpResponse::Ok().json(AnalysisResponse {
        id: stored.id,
        created_at: stored.created_at,
        logic,
    }))
}

pub(crate) async fn recent_analyses(store: web::Data<AnalysisStore>) -> impl actix_web::Responder {
    HttpResponse::Ok().json(store.recent(RECENT_COUNT))
}

pub(crate) async fn stats(store: web::Data<AnalysisStore>) -> impl actix_web::Responder {
    HttpResponse::Ok().json(store.stats())
}
