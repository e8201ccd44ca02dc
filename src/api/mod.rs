//! Transport boundary: request/response plumbing for the remote ticketing
//! API. Per-resource modules expose free async functions over `ApiClient`;
//! envelope unwrapping and wire→domain conversion live in `wire`.

pub mod areas;
pub mod auth;
pub mod client;
pub mod notifications;
pub mod repairs;
pub mod wire;

pub use client::ApiClient;
pub use notifications::NotificationQuery;
pub use repairs::{FeedbackForm, ImageAttachment, RepairForm};
pub use wire::{ApiError, MutationOutcome};
