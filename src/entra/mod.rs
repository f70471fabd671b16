pub mod endpoints;
pub mod service;

pub use service::{EntraTokenService, TokenSource};
