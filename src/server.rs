// src/server.rs

use serde::Serialize;
use std::{convert::Infallible, sync::Arc, time::Instant};
use tracing::{error, info};
use warp::{http::StatusCode, reply::Response, Filter, Rejection, Reply};

use crate::candidates::{self, Filters};
use crate::sheet::RowSource;

pub const SERVICE_NAME: &str = "warmpool";
pub const CACHE_CONTROL: &str = "public, max-age=60, stale-while-revalidate=300";
const FAILURE_MESSAGE: &str = "Failed to fetch candidates";

#[derive(Serialize)]
struct ErrorResponse {
    error: &'static str,
}

async fn health_check() -> Result<impl Reply, Rejection> {
    Ok(warp::reply::json(&serde_json::json!({
        "status": "healthy",
        "service": SERVICE_NAME
    })))
}

async fn get_candidates<S: RowSource>(
    filters: Filters,
    source: Arc<S>,
) -> Result<Response, Infallible> {
    let start = Instant::now();
    info!(?filters, "candidates request");

    match source.fetch_rows().await {
        Ok(rows) => {
            let body = candidates::query(&rows, &filters, &mut rand::thread_rng());
            info!(
                rows = rows.len(),
                pool = body.counts.total(),
                matches = body.total_matches,
                shown = body.profiles.len(),
                elapsed = ?start.elapsed(),
                "served candidates"
            );
            let reply = warp::reply::json(&body);
            Ok(warp::reply::with_header(reply, "cache-control", CACHE_CONTROL).into_response())
        }
        Err(e) => {
            error!(error = %e, elapsed = ?start.elapsed(), "failed to fetch candidates");
            let reply = warp::reply::json(&ErrorResponse {
                error: FAILURE_MESSAGE,
            });
            Ok(warp::reply::with_status(reply, StatusCode::INTERNAL_SERVER_ERROR).into_response())
        }
    }
}

fn with_source<S: RowSource>(
    source: Arc<S>,
) -> impl Filter<Extract = (Arc<S>,), Error = Infallible> + Clone {
    warp::any().map(move || Arc::clone(&source))
}

/// `GET /health` and `GET /api/candidates?seniority=&tech=&skill=`.
pub fn routes<S: RowSource>(
    source: Arc<S>,
) -> impl Filter<Extract = (impl Reply,), Error = Rejection> + Clone {
    let health = warp::path("health")
        .and(warp::path::end())
        .and(warp::get())
        .and_then(health_check);

    let candidates = warp::path!("api" / "candidates")
        .and(warp::get())
        .and(warp::query::<Vec<(String, String)>>())
        .map(|pairs: Vec<(String, String)>| Filters::from_pairs(pairs))
        .and(with_source(source))
        .and_then(get_candidates::<S>);

    health.or(candidates)
}

pub async fn serve<S: RowSource>(source: Arc<S>, port: u16) {
    info!("Server starting on port {}", port);
    info!("Health check: http://localhost:{}/health", port);
    info!("Candidates endpoint: GET http://localhost:{}/api/candidates", port);

    let routes = routes(source).with(warp::trace::request());
    warp::serve(routes).run(([0, 0, 0, 0], port)).await;
}
