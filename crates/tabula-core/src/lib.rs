//! tabula-core: the project/table state model.
//!
//! A project is a set of typed column definitions ("blocks"), an ordered
//! subset of those columns materialized as table headers (the workspace
//! order), and task rows whose cell maps stay synchronized with the active
//! column set as blocks are added, activated, reordered, or removed.
//!
//! All mutation goes through [`store::ProjectStore`]; the wire module maps
//! between the backend's flat representation (positional `order` integers,
//! `{value, type}` cells) and this model.
//!
//! # Conventions
//!
//! - **Errors**: library code returns [`error::StoreError`]; bad input never
//!   panics.
//! - **Logging**: `tracing` macros (`debug!`, `warn!`) — never direct stdout.

pub mod error;
pub mod event;
pub mod id;
pub mod model;
pub mod store;
pub mod wire;

pub use error::StoreError;
pub use store::ProjectStore;
