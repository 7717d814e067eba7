// Route path constants and the relay table - single source of truth for all API paths

use axum::http::Method;

pub const INDEX: &str = "/";
pub const HEALTH: &str = "/health";
pub const OPENAPI_JSON: &str = "/api-docs/openapi.json";
pub const SWAGGER_UI: &str = "/swagger-ui";

/// The nouns the upstream API exposes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Resource {
    Document,
    Template,
    User,
}

impl Resource {
    pub const ALL: [Resource; 3] = [Resource::Document, Resource::Template, Resource::User];

    /// Path segment, identical inbound and upstream
    pub fn segment(self) -> &'static str {
        match self {
            Resource::Document => "documents",
            Resource::Template => "templates",
            Resource::User => "users",
        }
    }

    pub fn singular(self) -> &'static str {
        match self {
            Resource::Document => "document",
            Resource::Template => "template",
            Resource::User => "user",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Operation {
    List,
    Create,
    Fetch,
    Update,
    Delete,
}

impl Operation {
    pub fn method(self) -> Method {
        match self {
            Operation::List | Operation::Fetch => Method::GET,
            Operation::Create => Method::POST,
            Operation::Update => Method::PUT,
            Operation::Delete => Method::DELETE,
        }
    }

    /// Whether the route addresses a single item by `{id}`
    pub fn targets_item(self) -> bool {
        matches!(self, Operation::Fetch | Operation::Update | Operation::Delete)
    }

    pub fn forwards_body(self) -> bool {
        matches!(self, Operation::Create | Operation::Update)
    }

    pub fn forwards_page_query(self) -> bool {
        self == Operation::List
    }
}

/// One row of the relay table: a resource and what is done to it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Endpoint {
    pub resource: Resource,
    pub operation: Operation,
}

impl Endpoint {
    pub const fn new(resource: Resource, operation: Operation) -> Self {
        Self { resource, operation }
    }

    /// Inbound route in axum syntax, e.g. `/documents/{id}`
    pub fn route_path(self) -> String {
        if self.operation.targets_item() {
            format!("/{}/{{id}}", self.resource.segment())
        } else {
            format!("/{}", self.resource.segment())
        }
    }

    /// Upstream path segments below the base URL
    pub fn upstream_segments<'a>(self, id: Option<&'a str>) -> Vec<&'a str> {
        let mut segments = vec![self.resource.segment()];
        if let Some(id) = id {
            segments.push(id);
        }
        segments
    }

    /// Fixed message returned to the caller whenever the relay fails
    pub fn failure_message(self) -> String {
        let noun = self.resource.singular();
        let action = match self.operation {
            Operation::List => format!("fetching {}", self.resource.segment()),
            Operation::Create => format!("creating a {}", noun),
            Operation::Fetch => format!("fetching the {}", noun),
            Operation::Update => format!("updating the {}", noun),
            Operation::Delete => format!("deleting the {}", noun),
        };
        format!("An error occurred while {}", action)
    }

    pub fn operation_id(self) -> String {
        let verb = match self.operation {
            Operation::List => "list",
            Operation::Create => "create",
            Operation::Fetch => "get",
            Operation::Update => "update",
            Operation::Delete => "delete",
        };
        if self.operation == Operation::List {
            format!("{}_{}", verb, self.resource.segment())
        } else {
            format!("{}_{}", verb, self.resource.singular())
        }
    }
}

/// Every relayed route: five operations for each resource kind.
pub const ENDPOINTS: [Endpoint; 15] = {
    use Operation::*;
    use Resource::*;
    [
        Endpoint::new(Document, List),
        Endpoint::new(Document, Create),
        Endpoint::new(Document, Fetch),
        Endpoint::new(Document, Update),
        Endpoint::new(Document, Delete),
        Endpoint::new(Template, List),
        Endpoint::new(Template, Create),
        Endpoint::new(Template, Fetch),
        Endpoint::new(Template, Update),
        Endpoint::new(Template, Delete),
        Endpoint::new(User, List),
        Endpoint::new(User, Create),
        Endpoint::new(User, Fetch),
        Endpoint::new(User, Update),
        Endpoint::new(User, Delete),
    ]
};
