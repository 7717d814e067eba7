use utoipa::openapi::content::ContentBuilder;
use utoipa::openapi::path::{
    HttpMethod, OperationBuilder, ParameterBuilder, ParameterIn, PathItem, PathItemBuilder, Paths,
    PathsBuilder,
};
use utoipa::openapi::request_body::RequestBodyBuilder;
use utoipa::openapi::response::ResponseBuilder;
use utoipa::openapi::schema::{ObjectBuilder, Schema, Type};
use utoipa::openapi::{OpenApiBuilder, Ref, RefOr, Required};
use utoipa::{IntoParams, OpenApi};

use crate::error::ErrorResponse;
use crate::handlers;
use crate::models::{HealthResponse, PageQuery};
use crate::routes::{Endpoint, Operation, Resource, ENDPOINTS};

/// OpenAPI documentation for the routes declared with `#[utoipa::path]`
#[derive(OpenApi)]
#[openapi(
    info(
        title = "signing-relay API",
        version = "1.0.0",
        description = "Authenticated relay for the Documenso document-signing API"
    ),
    paths(handlers::health::health_handler),
    components(schemas(ErrorResponse, HealthResponse)),
    tags(
        (name = "health", description = "Health check operations"),
        (name = "documents", description = "Relayed document operations"),
        (name = "templates", description = "Relayed template operations"),
        (name = "users", description = "Relayed user operations")
    )
)]
pub struct ApiDoc;

/// Full document: annotated routes plus every row of the relay table
pub fn openapi() -> utoipa::openapi::OpenApi {
    let mut doc = ApiDoc::openapi();
    doc.merge(OpenApiBuilder::new().paths(relay_paths()).build());
    doc
}

fn relay_paths() -> Paths {
    let mut paths = PathsBuilder::new();

    // Methods sharing a path must land in the same PathItem
    for resource in Resource::ALL {
        for targets_item in [false, true] {
            let mut route = None;
            let mut item = PathItemBuilder::new();
            for endpoint in ENDPOINTS.iter().filter(|e| {
                e.resource == resource && e.operation.targets_item() == targets_item
            }) {
                route = Some(endpoint.route_path());
                item = item.operation(http_method(endpoint.operation), operation(*endpoint));
            }
            if let Some(route) = route {
                let item: PathItem = item.build();
                paths = paths.path(route, item);
            }
        }
    }

    paths.build()
}

fn http_method(operation: Operation) -> HttpMethod {
    match operation {
        Operation::List | Operation::Fetch => HttpMethod::Get,
        Operation::Create => HttpMethod::Post,
        Operation::Update => HttpMethod::Put,
        Operation::Delete => HttpMethod::Delete,
    }
}

fn operation(endpoint: Endpoint) -> utoipa::openapi::path::Operation {
    let segment = endpoint.resource.segment();
    let mut builder = OperationBuilder::new()
        .tags(Some(vec![segment]))
        .operation_id(Some(endpoint.operation_id()))
        .summary(Some(format!(
            "{} {}",
            endpoint.operation.method(),
            endpoint.route_path()
        )))
        .response(
            "200",
            ResponseBuilder::new()
                .description("Upstream JSON body, passed through unchanged")
                .content("application/json", ContentBuilder::new().build())
                .build(),
        )
        .response(
            "500",
            ResponseBuilder::new()
                .description(endpoint.failure_message())
                .content(
                    "application/json",
                    ContentBuilder::new()
                        .schema(Some(Ref::from_schema_name("ErrorResponse")))
                        .build(),
                )
                .build(),
        );

    if endpoint.operation.targets_item() {
        builder = builder.parameter(
            ParameterBuilder::new()
                .name("id")
                .parameter_in(ParameterIn::Path)
                .required(Required::True)
                .description(Some(format!("Upstream {} id", endpoint.resource.singular())))
                .schema(Some(RefOr::T(Schema::Object(
                    ObjectBuilder::new().schema_type(Type::String).build(),
                ))))
                .build(),
        );
    }

    if endpoint.operation.forwards_page_query() {
        builder = builder.parameters(Some(PageQuery::into_params(|| Some(ParameterIn::Query))));
    }

    if endpoint.operation.forwards_body() {
        builder = builder
            .request_body(Some(
                RequestBodyBuilder::new()
                    .description(Some(
                        "Opaque JSON payload forwarded upstream; a missing or non-JSON body is sent as {}",
                    ))
                    .content("application/json", ContentBuilder::new().build())
                    .required(Some(Required::False))
                    .build(),
            ))
            .response(
                "400",
                ResponseBuilder::new()
                    .description("Body declared as application/json does not parse")
                    .content(
                        "application/json",
                        ContentBuilder::new()
                            .schema(Some(Ref::from_schema_name("ErrorResponse")))
                            .build(),
                    )
                    .build(),
            );
    }

    builder.build()
}
