//! Typed client for the parcel-logistics REST backend.
//!
//! The two load-bearing pieces are [`session::SessionStore`], which owns the
//! authenticated-identity lifecycle backed by a persisted key-value store,
//! and [`query::ListController`], which owns the search/sort/page state of
//! one paginated remote collection and refetches whenever that state
//! changes. [`api::ApiClient`] covers the full REST surface (auth, users,
//! parcels, feedback, notifications) and attaches the session's bearer
//! token to every request.

pub mod api;
pub mod config;
pub mod error;
pub mod kv;
pub mod models;
pub mod query;
pub mod session;

pub use api::ApiClient;
pub use error::ApiError;
pub use session::{Session, SessionStore};
