//! Core domain types for routes, requests, and responses.

pub mod response;
pub mod route;
