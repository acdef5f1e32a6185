//! Axum route handlers for the Pulse API.

use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::{Deserialize, Serialize};
use tracing::{info, warn};

use crate::errors::AppError;
use crate::models::customer::{Customer, CustomerPatch};
use crate::models::signal::NewsSignal;
use crate::pulse::brief::{compose_brief, BriefOutline};
use crate::pulse::diagram::generate_diagram;
use crate::pulse::events::{apply_event, CustomerEvent};
use crate::pulse::news::fetch_news_signal;
use crate::pulse::seed::build_customers;
use crate::pulse::store;
use crate::state::AppState;
use crate::talent::matching::{BRIEF_TOP_N, CARD_TOP_N};
use crate::talent::store as talent_store;

// ────────────────────────────────────────────────────────────────────────────
// Request / Response types
// ────────────────────────────────────────────────────────────────────────────

#[derive(Debug, Serialize)]
pub struct SeedCustomersResponse {
    pub customers: usize,
}

#[derive(Debug, Serialize)]
pub struct EventResponse {
    pub event: &'static str,
    pub customer: Customer,
}

#[derive(Debug, Deserialize)]
pub struct NewsRequest {
    pub company: String,
}

/// Only the name is read; a full customer object is accepted.
#[derive(Debug, Deserialize)]
pub struct CustomerRef {
    pub name: String,
}

#[derive(Debug, Deserialize)]
pub struct DiagramRequest {
    pub customer: CustomerRef,
    pub brief: BriefOutline,
}

#[derive(Debug, Serialize)]
pub struct DiagramResponse {
    pub svg: String,
}

async fn load_customer(state: &AppState, id: &str) -> Result<Customer, AppError> {
    store::get_customer(&state.db, id)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("customer {id}")))
}

async fn save_customer(state: &AppState, customer: &Customer) -> Result<(), AppError> {
    if store::update_customer(&state.db, customer).await? {
        Ok(())
    } else {
        Err(AppError::NotFound(format!("customer {}", customer.id)))
    }
}

// ────────────────────────────────────────────────────────────────────────────
// Handlers
// ────────────────────────────────────────────────────────────────────────────

/// GET /api/v1/customers
pub async fn handle_list_customers(
    State(state): State<AppState>,
) -> Result<Json<Vec<Customer>>, AppError> {
    Ok(Json(store::list_customers(&state.db).await?))
}

/// POST /api/v1/customers/seed
///
/// Replaces every customer with the reference set.
pub async fn handle_seed_customers(
    State(state): State<AppState>,
) -> Result<(StatusCode, Json<SeedCustomersResponse>), AppError> {
    let customers = build_customers();
    store::replace_customers(&state.db, &customers).await?;
    Ok((
        StatusCode::CREATED,
        Json(SeedCustomersResponse {
            customers: customers.len(),
        }),
    ))
}

/// GET /api/v1/customers/:id
pub async fn handle_get_customer(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<Customer>, AppError> {
    Ok(Json(load_customer(&state, &id).await?))
}

/// PATCH /api/v1/customers/:id
pub async fn handle_update_customer(
    State(state): State<AppState>,
    Path(id): Path<String>,
    Json(patch): Json<CustomerPatch>,
) -> Result<Json<Customer>, AppError> {
    if patch.name.as_deref().is_some_and(|n| n.trim().is_empty()) {
        return Err(AppError::Validation("name cannot be empty".to_string()));
    }
    if patch.consumption.is_some_and(|c| c > 100) {
        return Err(AppError::Validation(
            "consumption must be between 0 and 100".to_string(),
        ));
    }

    let current = load_customer(&state, &id).await?;
    let next = patch.apply_to(&current);
    save_customer(&state, &next).await?;
    Ok(Json(next))
}

/// POST /api/v1/customers/:id/events
///
/// Applies a simulated DEAL_CLOSE / RISK_ALERT / USAGE_SPIKE event.
pub async fn handle_customer_event(
    State(state): State<AppState>,
    Path(id): Path<String>,
    Json(event): Json<CustomerEvent>,
) -> Result<Json<EventResponse>, AppError> {
    let current = load_customer(&state, &id).await?;
    let next = apply_event(&current, &event).apply_to(&current);
    save_customer(&state, &next).await?;

    info!("Applied {} to customer {}", event.kind(), next.id);
    Ok(Json(EventResponse {
        event: event.kind(),
        customer: next,
    }))
}

/// GET /api/v1/customers/:id/talent
///
/// Top suggestions for the customer card.
pub async fn handle_customer_talent(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Response, AppError> {
    let customer = load_customer(&state, &id).await?;
    let pool = talent_store::list_members(&state.db).await?;
    let matches = state
        .talent_matcher
        .suggest(&customer, None, &pool, CARD_TOP_N)
        .await?;
    Ok(Json(matches).into_response())
}

/// POST /api/v1/customers/:id/brief
///
/// Builds an intelligence brief. A news lookup failure degrades to a brief without a signal.
pub async fn handle_customer_brief(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Response, AppError> {
    let customer = load_customer(&state, &id).await?;

    let signal: Option<NewsSignal> = match fetch_news_signal(
        &state.news,
        &state.llm,
        &state.redis,
        &customer.name,
        state.config.news_cache_ttl_secs,
    )
    .await
    {
        Ok(signal) => Some(signal),
        Err(e) => {
            warn!("Brief for {} continues without news: {e}", customer.name);
            None
        }
    };

    let pool = talent_store::list_members(&state.db).await?;
    let matches = state
        .talent_matcher
        .suggest(&customer, signal.as_ref(), &pool, BRIEF_TOP_N)
        .await?;

    let brief = compose_brief(&customer, signal.as_ref(), matches);
    info!(
        "Brief for {} via {} matcher: {} matches, {} actions",
        customer.name,
        state.talent_matcher.backend(),
        brief.matches.len(),
        brief.actions.len()
    );
    Ok(Json(brief).into_response())
}

/// POST /api/v1/pulse/news
pub async fn handle_news_signal(
    State(state): State<AppState>,
    Json(request): Json<NewsRequest>,
) -> Result<Json<NewsSignal>, AppError> {
    let signal = fetch_news_signal(
        &state.news,
        &state.llm,
        &state.redis,
        &request.company,
        state.config.news_cache_ttl_secs,
    )
    .await?;
    Ok(Json(signal))
}

/// POST /api/v1/pulse/diagram
pub async fn handle_generate_diagram(
    State(state): State<AppState>,
    Json(request): Json<DiagramRequest>,
) -> Result<Json<DiagramResponse>, AppError> {
    let name = request.customer.name.trim();
    if name.is_empty() || request.brief.headline.trim().is_empty() {
        return Err(AppError::Validation(
            "Missing brief or customer data".to_string(),
        ));
    }
    let svg = generate_diagram(&state.llm, name, &request.brief).await?;
    Ok(Json(DiagramResponse { svg }))
}
