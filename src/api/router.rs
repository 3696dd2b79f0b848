use axum::http::header::{AUTHORIZATION, CONTENT_TYPE};
use axum::http::Method;
use axum::routing::get;
use axum::Router;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;

use crate::AppState;
use super::handlers;

pub fn create_router(state: AppState) -> Router {
    let api = Router::new()
        .route("/health", get(handlers::health::health_check))
        // Accounts
        .route(
            "/account",
            get(handlers::accounts::list).post(handlers::accounts::create),
        )
        .route("/account/:id", get(handlers::accounts::detail))
        // Trades
        .route(
            "/trade",
            get(handlers::trades::list_or_detail)
                .post(handlers::trades::create)
                .patch(handlers::trades::update),
        )
        // Analytics
        .route("/analytics/:account_id", get(handlers::analytics::summary))
        // Insights
        .route(
            "/insights",
            get(handlers::insights::get).put(handlers::insights::enqueue),
        );

    // Permissive CORS for the journal frontend; the layer also answers
    // OPTIONS preflights for every route.
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_headers([CONTENT_TYPE, AUTHORIZATION])
        .allow_methods([
            Method::GET,
            Method::POST,
            Method::PUT,
            Method::DELETE,
            Method::PATCH,
            Method::OPTIONS,
        ]);

    api.layer(cors)
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
