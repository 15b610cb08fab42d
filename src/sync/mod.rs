//! Conversation synchronization: directory lookups, conversation resolution
//! and the local message list.

pub mod directory;
pub mod messages;
pub mod resolver;
pub mod session;

pub use directory::DirectoryService;
pub use messages::{merge_fetched, IdentityMode, MessageLog};
pub use resolver::{first_shared, ConversationResolver};
pub use session::ChatSession;
