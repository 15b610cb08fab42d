pub mod client;
pub mod models;

pub use client::ApiClient;
pub use models::{ApiUser, Contact, ConversationRef, Message, NewUser, TwoConversation};
