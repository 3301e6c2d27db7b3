pub mod error;
pub mod rest_api;
pub mod service;
pub mod state;
pub mod validate;
