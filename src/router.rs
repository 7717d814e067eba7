use axum::{routing::get, Router};
use tower_http::trace::TraceLayer;
use utoipa_swagger_ui::SwaggerUi;

use crate::api_doc;
use crate::handlers::{endpoint_router, health_handler, index_handler};
use crate::routes::{self, ENDPOINTS};
use crate::state::AppState;

/// Assemble the full application: relay table, landing page, health and docs
pub fn build_router(state: AppState) -> Router {
    let mut router = Router::new()
        .route(routes::INDEX, get(index_handler))
        .route(routes::HEALTH, get(health_handler));

    // Rows sharing a path merge into one method router
    for endpoint in ENDPOINTS {
        router = router.route(&endpoint.route_path(), endpoint_router(endpoint));
    }

    router
        .merge(SwaggerUi::new(routes::SWAGGER_UI).url(routes::OPENAPI_JSON, api_doc::openapi()))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
