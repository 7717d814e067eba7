use crate::error::ApiError;
use crate::models::PageQuery;
use crate::routes::{Endpoint, Operation};
use crate::state::AppState;
use axum::{
    body::Bytes,
    extract::{
        rejection::{BytesRejection, QueryRejection},
        Path, Query, State,
    },
    http::{header::CONTENT_TYPE, HeaderMap, StatusCode},
    routing::{on, MethodFilter, MethodRouter},
    Json,
};
use serde_json::value::RawValue;

type RawJson = Json<Box<RawValue>>;
type RawBody = Result<Bytes, BytesRejection>;

/// Forwarded in place of a body that is absent or not declared as JSON
const EMPTY_OBJECT: &str = "{}";

/// Build the method router serving one row of the relay table
pub fn endpoint_router(endpoint: Endpoint) -> MethodRouter<AppState> {
    let filter = method_filter(endpoint.operation);

    match endpoint.operation {
        Operation::List => on(
            filter,
            move |State(state): State<AppState>,
                  query: Result<Query<PageQuery>, QueryRejection>| {
                list(state, endpoint, query)
            },
        ),
        Operation::Create => on(
            filter,
            move |State(state): State<AppState>, headers: HeaderMap, body: RawBody| {
                create(state, endpoint, headers, body)
            },
        ),
        Operation::Fetch | Operation::Delete => on(
            filter,
            move |State(state): State<AppState>, Path(id): Path<String>| {
                item(state, endpoint, id)
            },
        ),
        Operation::Update => on(
            filter,
            move |State(state): State<AppState>,
                  Path(id): Path<String>,
                  headers: HeaderMap,
                  body: RawBody| {
                update(state, endpoint, id, headers, body)
            },
        ),
    }
}

fn method_filter(operation: Operation) -> MethodFilter {
    match operation {
        Operation::List | Operation::Fetch => MethodFilter::GET,
        Operation::Create => MethodFilter::POST,
        Operation::Update => MethodFilter::PUT,
        Operation::Delete => MethodFilter::DELETE,
    }
}

/// Unparseable query strings fall back to the default page
async fn list(
    state: AppState,
    endpoint: Endpoint,
    query: Result<Query<PageQuery>, QueryRejection>,
) -> Result<RawJson, ApiError> {
    let query = match query {
        Ok(Query(query)) => query,
        Err(rejection) => {
            tracing::debug!("Ignoring query string: {}", rejection.body_text());
            PageQuery::default()
        }
    };
    let params = query.upstream_params();
    relay_endpoint(&state, endpoint, None, Some(params.as_slice()), None).await
}

async fn create(
    state: AppState,
    endpoint: Endpoint,
    headers: HeaderMap,
    body: RawBody,
) -> Result<RawJson, ApiError> {
    let payload = json_payload(&headers, body?)?;
    relay_endpoint(&state, endpoint, None, None, Some(payload.as_str())).await
}

async fn item(state: AppState, endpoint: Endpoint, id: String) -> Result<RawJson, ApiError> {
    relay_endpoint(&state, endpoint, Some(id.as_str()), None, None).await
}

async fn update(
    state: AppState,
    endpoint: Endpoint,
    id: String,
    headers: HeaderMap,
    body: RawBody,
) -> Result<RawJson, ApiError> {
    let payload = json_payload(&headers, body?)?;
    relay_endpoint(&state, endpoint, Some(id.as_str()), None, Some(payload.as_str())).await
}

/// JSON text to forward for a create or update
///
/// Only a body declared as JSON is parsed, and only a declared body that
/// fails to parse is refused. A missing, empty or differently typed body is
/// forwarded as `{}`.
fn json_payload(headers: &HeaderMap, body: Bytes) -> Result<String, ApiError> {
    if !declares_json(headers) || body.iter().all(u8::is_ascii_whitespace) {
        return Ok(EMPTY_OBJECT.to_string());
    }

    let raw: Box<RawValue> =
        serde_json::from_slice(&body).map_err(|err| ApiError::InvalidBody {
            status: StatusCode::BAD_REQUEST,
            reason: err.to_string(),
        })?;
    Ok(raw.get().to_string())
}

fn declares_json(headers: &HeaderMap) -> bool {
    headers
        .get(CONTENT_TYPE)
        .and_then(|value| value.to_str().ok())
        .map(|value| {
            let essence = value.split(';').next().unwrap_or_default().trim();
            essence.eq_ignore_ascii_case("application/json")
                || essence.to_ascii_lowercase().ends_with("+json")
        })
        .unwrap_or(false)
}

/// Forward one inbound request and pass the upstream JSON straight back
pub async fn relay_endpoint(
    state: &AppState,
    endpoint: Endpoint,
    id: Option<&str>,
    query: Option<&[(&'static str, String)]>,
    body: Option<&str>,
) -> Result<RawJson, ApiError> {
    let segments = endpoint.upstream_segments(id);

    match state
        .upstream
        .relay(endpoint.operation.method(), &segments, query, body)
        .await
    {
        Ok(data) => {
            tracing::info!(
                "Relayed {} /{}",
                endpoint.operation.method(),
                segments.join("/")
            );
            Ok(Json(data))
        }
        Err(source) => Err(ApiError::Upstream { endpoint, source }),
    }
}
