use crate::api::models::{Contact, TwoConversation};
use crate::api::ApiClient;
use crate::sync::directory::DirectoryService;

/// The first id of `mine` that also appears in `theirs`.
pub fn first_shared<'a>(mine: &'a [String], theirs: &[String]) -> Option<&'a str> {
    mine.iter()
        .find(|id| theirs.contains(*id))
        .map(String::as_str)
}

/// Finds the two-party conversation with a contact, creating it when needed.
#[derive(Debug, Clone)]
pub struct ConversationResolver {
    client: ApiClient,
    directory: DirectoryService,
    my_phone: String,
}

impl ConversationResolver {
    pub fn new(client: ApiClient, directory: DirectoryService, my_phone: impl Into<String>) -> Self {
        Self {
            client,
            directory,
            my_phone: my_phone.into(),
        }
    }

    /// Returns the conversation id, or `None` if any step failed.
    pub async fn resolve(&self, contact: &Contact) -> Option<String> {
        if !self.directory.is_registered(&contact.phone_number).await {
            self.directory.register(contact).await;
            return self.create_conversation(contact).await;
        }

        let theirs = self.conversation_ids(&contact.phone_number).await?;
        let mine = self.conversation_ids(&self.my_phone).await?;
        match first_shared(&mine, &theirs) {
            Some(id) => {
                log::info!("found conversation {} with {}", id, contact.phone_number);
                Some(id.to_string())
            }
            None => self.create_conversation(contact).await,
        }
    }

    async fn conversation_ids(&self, phone_number: &str) -> Option<Vec<String>> {
        match self.client.user_conversations(phone_number).await {
            Ok(convs) => Some(convs.into_iter().map(|c| c.id).collect()),
            Err(e) => {
                log::error!("listing conversations of {} failed: {}", phone_number, e);
                None
            }
        }
    }

    pub async fn create_conversation(&self, contact: &Contact) -> Option<String> {
        let conversation = TwoConversation {
            first: contact.phone_number.clone(),
            second: self.my_phone.clone(),
            title: contact.display_name.clone(),
        };
        log::debug!("creating conversation {:?}", conversation);
        match self.client.create_two_conversation(&conversation).await {
            Ok(created) => {
                log::info!("created conversation {} with {}", created.id, contact.phone_number);
                Some(created.id)
            }
            Err(e) => {
                log::error!("creating conversation with {} failed: {}", contact.phone_number, e);
                None
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ids(v: &[&str]) -> Vec<String> {
        v.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn picks_first_of_mine_present_in_theirs() {
        assert_eq!(first_shared(&ids(&["a", "b"]), &ids(&["b", "c"])), Some("b"));
        assert_eq!(first_shared(&ids(&["c", "b", "a"]), &ids(&["a", "b"])), Some("b"));
    }

    #[test]
    fn no_overlap_means_none() {
        assert_eq!(first_shared(&ids(&["a", "b"]), &ids(&["c", "d"])), None);
        assert_eq!(first_shared(&[], &ids(&["c"])), None);
    }
}
