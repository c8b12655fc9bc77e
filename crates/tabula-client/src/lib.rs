//! tabula-client: the remote gateway and the session layer.
//!
//! The [`gateway::Gateway`] trait is the seam between session logic and
//! HTTP; [`http::HttpGateway`] is the `ureq`-backed production
//! implementation, and tests substitute an in-memory fake.
//!
//! [`session::Session`] owns all per-login state (projects, users,
//! departments, authentication), mutates the in-memory model optimistically,
//! and reconciles with the backend: loads degrade to the previous state
//! with a logged warning, mutations propagate failures so callers can
//! react.

pub mod auth;
pub mod directory;
pub mod error;
pub mod gateway;
pub mod http;
pub mod session;

pub use error::{ClientError, TransportError};
pub use gateway::Gateway;
pub use http::HttpGateway;
pub use session::Session;
