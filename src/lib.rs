//! A minimal two-party chat client for an HTTP/JSON backend.
//!
//! [`sync::ChatSession`] holds the interesting part: it finds or creates the
//! conversation with a contact, echoes sent messages locally and merges what
//! the server returns without duplicating them.

pub mod api;
pub mod app;
pub mod contacts;
pub mod error;
pub mod events;
pub mod sync;
pub mod ui;
pub mod utils;

pub use api::{ApiClient, Contact, Message};
pub use app::AppConfig;
pub use error::{AppError, ClientError, ConfigError};
pub use events::{ChatEvent, EventSink};
pub use sync::ChatSession;
