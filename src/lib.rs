//! Client library for the GatePass visitor and contractor management system.
//!
//! Two halves: a typed API client over the backend's REST surfaces
//! ([`api`]), and the camera-driven QR scan pipeline ([`services`]). Shared
//! wire types live in [`models`]; session teardown on token expiry is handled
//! by [`session`].

pub mod api;
pub mod config;
pub mod error;
pub mod logging;
pub mod models;
pub mod services;
pub mod session;

pub use api::ApiClient;
pub use config::ClientConfig;
pub use error::{ApiError, GENERIC_SERVER_ERROR, ScanError};
pub use logging::{get_subscriber, init_subscriber};
pub use session::{SessionManager, SessionStore};
