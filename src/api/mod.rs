use axum::{
    Router,
    extract::{Json, rejection::JsonRejection},
    http::{HeaderValue, StatusCode, header},
    response::{IntoResponse, Response},
    routing::post,
};
use serde::Serialize;
use std::any::Any;
use std::net::SocketAddr;
use tokio::net::TcpListener;
use tower_http::{catch_panic::CatchPanicLayer, trace::TraceLayer};

mod error;
mod payload;
mod response;

pub use error::ApiError;
pub use payload::{
    GoalPayload, LumpsumPayload, RetirementPayload, SipPayload, goal_inputs, lumpsum_inputs,
    retirement_inputs, sip_inputs,
};
pub use response::{
    DelayRow, GoalResponse, LumpsumResponse, MonthlyGoal, RetirementResponse, SipResponse,
    YearlyGoal,
};

use crate::core::{calculate_goal, calculate_lumpsum, calculate_retirement, calculate_sip};

#[derive(Debug, Serialize)]
struct ErrorResponse {
    error: String,
}

pub fn run_sip(payload: &SipPayload) -> Result<SipResponse, ApiError> {
    let inputs = sip_inputs(payload)?;
    let result = calculate_sip(&inputs);
    response::build_sip_response(payload, &result)
}

pub fn run_lumpsum(payload: &LumpsumPayload) -> Result<LumpsumResponse, ApiError> {
    let inputs = lumpsum_inputs(payload)?;
    let result = calculate_lumpsum(&inputs);
    response::build_lumpsum_response(payload, &inputs, &result)
}

pub fn run_goal(payload: &GoalPayload) -> Result<GoalResponse, ApiError> {
    let inputs = goal_inputs(payload)?;
    let result = calculate_goal(&inputs);
    response::build_goal_response(payload, &result)
}

pub fn run_retirement(payload: &RetirementPayload) -> Result<RetirementResponse, ApiError> {
    let inputs = retirement_inputs(payload)?;
    let result = calculate_retirement(&inputs);
    Ok(response::build_retirement_response(&result))
}

pub fn router() -> Router {
    Router::new()
        .route("/api/calculator/sip", post(sip_handler))
        .route("/api/calculator/lumpsum", post(lumpsum_handler))
        .route("/api/calculator/goal", post(goal_handler))
        .route("/api/calculator/retirement", post(retirement_handler))
        .fallback(not_found_handler)
        .layer(CatchPanicLayer::custom(panic_response))
        .layer(TraceLayer::new_for_http())
}

pub async fn run_http_server(addr: SocketAddr) -> std::io::Result<()> {
    let listener = TcpListener::bind(addr).await?;
    tracing::info!("wealthcalc HTTP API listening on http://{addr}");
    tracing::info!("Local access: http://127.0.0.1:{}/", addr.port());

    axum::serve(listener, router())
        .with_graceful_shutdown(wait_for_shutdown_signal())
        .await
}

async fn wait_for_shutdown_signal() {
    #[cfg(unix)]
    {
        use tokio::signal::unix::{SignalKind, signal};
        match signal(SignalKind::terminate()) {
            Ok(mut sigterm) => {
                tokio::select! {
                    _ = sigterm.recv() => {}
                    _ = tokio::signal::ctrl_c() => {}
                }
            }
            Err(e) => {
                tracing::warn!("cannot listen for SIGTERM: {e}");
                let _ = tokio::signal::ctrl_c().await;
            }
        }
    }
    #[cfg(not(unix))]
    {
        let _ = tokio::signal::ctrl_c().await;
    }
    tracing::info!("shutdown signal received, draining in-flight requests");
}

async fn sip_handler(
    payload: Result<Json<SipPayload>, JsonRejection>,
) -> Result<Response, ApiError> {
    let Json(payload) = payload?;
    let response = run_sip(&payload)?;
    tracing::debug!(maturity = response.maturity_amount, "sip calculated");
    Ok(json_response(StatusCode::OK, response))
}

async fn lumpsum_handler(
    payload: Result<Json<LumpsumPayload>, JsonRejection>,
) -> Result<Response, ApiError> {
    let Json(payload) = payload?;
    let response = run_lumpsum(&payload)?;
    tracing::debug!(maturity = response.maturity_amount, "lumpsum calculated");
    Ok(json_response(StatusCode::OK, response))
}

async fn goal_handler(
    payload: Result<Json<GoalPayload>, JsonRejection>,
) -> Result<Response, ApiError> {
    let Json(payload) = payload?;
    let response = run_goal(&payload)?;
    tracing::debug!(
        monthly = response.monthly_goal.is_some(),
        yearly = response.yearly_goal.is_some(),
        "goal calculated"
    );
    Ok(json_response(StatusCode::OK, response))
}

async fn retirement_handler(
    payload: Result<Json<RetirementPayload>, JsonRejection>,
) -> Result<Response, ApiError> {
    let Json(payload) = payload?;
    let response = run_retirement(&payload)?;
    tracing::debug!(corpus = ?response.corpus_required, "retirement calculated");
    Ok(json_response(StatusCode::OK, response))
}

async fn not_found_handler() -> Response {
    error_response(StatusCode::NOT_FOUND, "Not found")
}

fn panic_response(_panic: Box<dyn Any + Send + 'static>) -> Response {
    tracing::error!("calculator handler panicked");
    error_response(StatusCode::INTERNAL_SERVER_ERROR, "Internal server error")
}

fn json_response<T: Serialize>(status: StatusCode, body: T) -> Response {
    let mut response = (status, Json(body)).into_response();
    response
        .headers_mut()
        .insert(header::CACHE_CONTROL, HeaderValue::from_static("no-store"));
    response
}

fn error_response(status: StatusCode, msg: &str) -> Response {
    json_response(
        status,
        ErrorResponse {
            error: msg.to_string(),
        },
    )
}
