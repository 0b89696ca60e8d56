pub mod config;
pub mod error;
pub mod http;
pub mod model;
pub mod observability;
pub mod seed;
pub mod store;
