//! Network layer - API client and the actor that runs it
//!
//! The Network actor receives fetch commands and sends back responses.

pub mod actor;
pub mod client;
pub mod error;

pub use actor::NetworkActor;
pub use client::ApiClient;
pub use error::ApiError;
