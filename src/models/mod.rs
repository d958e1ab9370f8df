//! Wire types for the logistics backend. Field names follow the backend's
//! camelCase JSON; decoding failures surface as [`crate::ApiError::Decode`]
//! rather than silently defaulting.

pub mod auth;
pub mod feedback;
pub mod notification;
pub mod parcel;
pub mod user;

pub use auth::{AuthRequest, AuthResponse, RegisterRequest};
pub use feedback::{Feedback, FeedbackRequest};
pub use notification::Notification;
pub use parcel::{Parcel, ParcelRequest, ParcelStatus};
pub use user::{Role, User, UserUpdate};
