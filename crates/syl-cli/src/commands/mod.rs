pub mod aggregate;
pub mod resolve;
pub mod schema;
