//! HTTP request handlers for the API.

pub mod cars;
pub mod health;
