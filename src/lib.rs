pub mod api;
pub mod config;
pub mod data;
pub mod error;
pub mod route;
pub mod samples;
pub mod view;

#[cfg(test)]
mod test_server;

pub use api::{ApiClient, ListParams, RequestOptions, RestaurantSource};
pub use config::ApiConfig;
pub use error::{ApiError, Result};
