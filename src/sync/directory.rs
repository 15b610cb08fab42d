use crate::api::models::{Contact, NewUser};
use crate::api::ApiClient;
use crate::events::{ChatEvent, EventSink};

/// Which phone numbers have accounts on the backend.
#[derive(Debug, Clone)]
pub struct DirectoryService {
    client: ApiClient,
    events: EventSink,
    default_password: String,
}

impl DirectoryService {
    pub fn new(client: ApiClient, events: EventSink, default_password: impl Into<String>) -> Self {
        Self {
            client,
            events,
            default_password: default_password.into(),
        }
    }

    /// Scans the full user list for `phone_number`.
    ///
    /// A failed lookup raises an alert and counts as "not registered".
    pub async fn is_registered(&self, phone_number: &str) -> bool {
        match self.client.users().await {
            Ok(users) => users
                .iter()
                .any(|u| u.phone_number.as_deref() == Some(phone_number)),
            Err(e) => {
                log::error!("user lookup for {} failed: {}", phone_number, e);
                self.events.emit(ChatEvent::Alert(e.to_string()));
                false
            }
        }
    }

    /// Creates an account for `contact`. Failures are logged and otherwise ignored.
    pub async fn register(&self, contact: &Contact) {
        let user = NewUser {
            phone_number: contact.phone_number.clone(),
            name: contact.display_name.clone(),
            password: self.default_password.clone(),
        };
        match self.client.create_user(&user).await {
            Ok(()) => log::info!("registered {}", contact.phone_number),
            Err(e) => log::error!("registering {} failed: {}", contact.phone_number, e),
        }
    }
}
