use actix_web::{middleware, web, App, HttpResponse, HttpServer, Result};
use serde::{Deserialize, Serialize};
use std::sync::Mutex;
use tracing::{info, warn};

use crate::budget::parse_budget;
use crate::catalog::{Catalog, GuestPreferences};
use crate::display::{remaining_lines, PlanSummary};
use crate::parser::{load_catalog, DataPaths};
use crate::plan::{Allocation, Purchase, RoundSummary};
use rust_decimal::Decimal;

/// Catalog shared by every request; each plan runs on its own copy
pub struct AppState {
    pub catalog: Mutex<Catalog>,
    pub paths: DataPaths,
}

impl AppState {
    pub fn new(catalog: Catalog, paths: DataPaths) -> Self {
        Self {
            catalog: Mutex::new(catalog),
            paths,
        }
    }

    fn snapshot(&self) -> Result<Catalog> {
        self.catalog
            .lock()
            .map(|catalog| catalog.clone())
            .map_err(|_| actix_web::error::ErrorInternalServerError("catalog lock poisoned"))
    }
}

#[derive(Deserialize)]
pub struct PlanRequest {
    budget: String,
}

#[derive(Serialize)]
pub struct PlanResponse {
    success: bool,
    budget: Decimal,
    purchases: Vec<Purchase>,
    remaining: Vec<GuestPreferences>,
    remaining_lines: Vec<String>,
    summary: PlanSummary,
    rounds: Vec<RoundSummary>,
    generated_at: String,
}

impl PlanResponse {
    pub fn new(budget: Decimal, allocation: Allocation) -> Self {
        let summary = PlanSummary::new(budget, &allocation);
        Self {
            success: true,
            budget,
            purchases: allocation.purchases.iter().cloned().collect(),
            remaining_lines: remaining_lines(&allocation.remaining),
            remaining: allocation.remaining.iter().cloned().collect(),
            summary,
            rounds: allocation.rounds,
            generated_at: chrono::Utc::now().to_rfc3339(),
        }
    }
}

#[derive(Serialize)]
pub struct CatalogResponse {
    guests: Vec<GuestPreferences>,
    items: Vec<CatalogItem>,
}

#[derive(Serialize)]
pub struct CatalogItem {
    name: String,
    price: Decimal,
}

// Plan endpoint
async fn plan(req: web::Json<PlanRequest>, state: web::Data<AppState>) -> Result<HttpResponse> {
    let budget = match parse_budget(&req.budget) {
        Ok(budget) => budget,
        Err(e) => {
            return Ok(HttpResponse::BadRequest().json(serde_json::json!({
                "success": false,
                "error": e.to_string()
            })))
        }
    };

    let catalog = state.snapshot()?;
    let allocation = catalog.plan(budget);
    Ok(HttpResponse::Ok().json(PlanResponse::new(budget, allocation)))
}

// Catalog endpoint
async fn get_catalog(state: web::Data<AppState>) -> Result<HttpResponse> {
    let catalog = state.snapshot()?;
    let items = catalog
        .prices
        .sorted()
        .into_iter()
        .map(|(name, price)| CatalogItem {
            name: name.to_string(),
            price,
        })
        .collect();

    Ok(HttpResponse::Ok().json(CatalogResponse {
        guests: catalog.preferences.iter().cloned().collect(),
        items,
    }))
}

// Reload endpoint: re-read the data files, keeping the old catalog on failure
async fn reload(state: web::Data<AppState>) -> Result<HttpResponse> {
    match load_catalog(&state.paths) {
        Ok(catalog) => {
            let guests = catalog.preferences.len();
            let items = catalog.prices.len();
            let mut current = state
                .catalog
                .lock()
                .map_err(|_| actix_web::error::ErrorInternalServerError("catalog lock poisoned"))?;
            *current = catalog;
            drop(current);
            info!(guests, items, "catalog reloaded");
            Ok(HttpResponse::Ok().json(serde_json::json!({
                "success": true,
                "guests": guests,
                "items": items
            })))
        }
        Err(e) => {
            warn!(error = %e, "catalog reload failed");
            Ok(HttpResponse::InternalServerError().json(serde_json::json!({
                "success": false,
                "error": format!("Failed to load data files: {}", e)
            })))
        }
    }
}

// HTML page handler
async fn index() -> Result<HttpResponse> {
    let html = include_str!("../templates/index.html");
    Ok(HttpResponse::Ok().content_type("text/html").body(html))
}

/// Registers every route; shared by the server and the tests
pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.route("/", web::get().to(index))
        .route("/api/catalog", web::get().to(get_catalog))
        .route("/api/plan", web::post().to(plan))
        .route("/api/reload", web::post().to(reload));
}

pub async fn start_server(port: u16, catalog: Catalog, paths: DataPaths) -> std::io::Result<()> {
    let app_state = web::Data::new(AppState::new(catalog, paths));

    HttpServer::new(move || {
        App::new()
            .app_data(app_state.clone())
            .wrap(middleware::Logger::default())
            .configure(configure)
    })
    .bind(("0.0.0.0", port))?
    .run()
    .await
}
