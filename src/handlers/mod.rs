pub mod health;
pub mod index;
pub mod relay;

pub use health::health_handler;
pub use index::index_handler;
pub use relay::endpoint_router;
