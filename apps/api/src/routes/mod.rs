pub mod health;

use axum::{
    routing::{get, patch, post},
    Router,
};

use crate::pulse::handlers as pulse;
use crate::state::AppState;
use crate::talent::handlers as talent;

pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health::health_handler))
        // Pulse API
        .route("/api/v1/customers", get(pulse::handle_list_customers))
        .route("/api/v1/customers/seed", post(pulse::handle_seed_customers))
        .route(
            "/api/v1/customers/:id",
            get(pulse::handle_get_customer).patch(pulse::handle_update_customer),
        )
        .route(
            "/api/v1/customers/:id/events",
            post(pulse::handle_customer_event),
        )
        .route(
            "/api/v1/customers/:id/talent",
            get(pulse::handle_customer_talent),
        )
        .route(
            "/api/v1/customers/:id/brief",
            post(pulse::handle_customer_brief),
        )
        .route("/api/v1/pulse/news", post(pulse::handle_news_signal))
        .route("/api/v1/pulse/diagram", post(pulse::handle_generate_diagram))
        // Talent API
        .route("/api/v1/skills", get(talent::handle_list_skills))
        .route(
            "/api/v1/team",
            get(talent::handle_list_team).post(talent::handle_upsert_member),
        )
        .route("/api/v1/team/dedupe", post(talent::handle_dedupe_team))
        .route(
            "/api/v1/team/:id",
            patch(talent::handle_update_member).delete(talent::handle_delete_member),
        )
        .route("/api/v1/talent/seed", post(talent::handle_seed_talent))
        .route("/api/v1/talent/reset", post(talent::handle_reset_talent))
        .route(
            "/api/v1/talent/normalize",
            post(talent::handle_normalize_skills),
        )
        .route(
            "/api/v1/talent/analyze-profile",
            post(talent::handle_analyze_profile),
        )
        .with_state(state)
}
