use serde::{Deserialize, Serialize};

pub const DEFAULT_PAGE: &str = "1";
pub const DEFAULT_PER_PAGE: &str = "10";

/// Query parameters accepted by the list endpoints
///
/// Values are kept as the caller sent them and forwarded verbatim; the
/// upstream API owns their validation.
#[derive(Debug, Default, Deserialize, utoipa::IntoParams)]
#[into_params(parameter_in = Query)]
pub struct PageQuery {
    /// Page number (default 1)
    pub page: Option<String>,
    /// Page size (default 10)
    #[serde(rename = "perPage")]
    pub per_page: Option<String>,
}

impl PageQuery {
    /// Query pairs sent upstream, with defaults for missing or empty values
    pub fn upstream_params(&self) -> [(&'static str, String); 2] {
        [
            ("page", or_default(&self.page, DEFAULT_PAGE)),
            ("perPage", or_default(&self.per_page, DEFAULT_PER_PAGE)),
        ]
    }
}

fn or_default(value: &Option<String>, default: &str) -> String {
    match value.as_deref() {
        Some(v) if !v.is_empty() => v.to_string(),
        _ => default.to_string(),
    }
}

/// Response type for health check endpoint
#[derive(Serialize, Deserialize, utoipa::ToSchema)]
pub struct HealthResponse {
    pub status: String,
}
