//! Control-layer surface of the client registry.
//!
//! Converts the external client document to and from domain clients and maps
//! registry outcomes to [`ApiError`]s carrying an HTTP-style status code. The
//! transport that carries these documents lives outside this crate.
pub mod controllers;
pub mod dto;
pub mod errors;

pub use controllers::ClientsController;
pub use errors::ApiError;
