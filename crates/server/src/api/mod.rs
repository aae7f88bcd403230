pub mod chat;
pub mod handlers;
pub mod middleware;
pub mod query;
pub mod routes;

pub use routes::create_router;
