use axum::response::Html;

const LANDING_PAGE: &str = include_str!("../../static/index.html");

/// GET / handler - static landing page
pub async fn index_handler() -> Html<&'static str> {
    Html(LANDING_PAGE)
}
