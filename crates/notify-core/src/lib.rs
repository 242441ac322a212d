//! Maps a CI/CD event context onto a chat-webhook embed.
//!
//! Everything in this crate is pure: no I/O, no environment access. The only
//! non-deterministic input is the wall clock read by [`build_notification`].

pub mod builder;
pub mod color;
pub mod embed;
pub mod metadata;
pub mod model;
pub mod status;
pub mod truncate;

pub use builder::{build_notification, build_notification_at, display_ref};
pub use color::parse_hex_color;
pub use embed::{EmbedField, EmbedFooter, NotificationPayload, WebhookMessage};
pub use metadata::{EventMetadata, event_metadata};
pub use model::{EventContext, EventPayload, Overrides, Repository};
pub use status::{JobStatus, StatusStyle, status_styling};
