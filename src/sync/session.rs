use crate::api::models::{Contact, Message};
use crate::api::ApiClient;
use crate::app::AppConfig;
use crate::error::ClientError;
use crate::events::{ChatEvent, EventSink};
use crate::sync::directory::DirectoryService;
use crate::sync::messages::MessageLog;
use crate::sync::resolver::ConversationResolver;
use crate::utils::spawn_with_reply;
use tokio::sync::oneshot;

#[derive(Debug)]
enum Resolution {
    Pending(oneshot::Receiver<Option<String>>),
    Ready(Option<String>),
}

/// One chat screen's worth of state: the contact, the local message list and
/// the conversation id being resolved in the background.
///
/// Operations that need the conversation id wait for the background
/// resolution to finish first.
#[derive(Debug)]
pub struct ChatSession {
    client: ApiClient,
    contact: Contact,
    my_phone: String,
    my_name: String,
    log: MessageLog,
    conversation: Resolution,
    events: EventSink,
}

impl ChatSession {
    /// Starts resolving the conversation with `contact` in the background.
    pub fn open(config: &AppConfig, client: ApiClient, contact: Contact, events: EventSink) -> Self {
        let directory = DirectoryService::new(
            client.clone(),
            events.clone(),
            config.default_password.clone(),
        );
        let resolver = ConversationResolver::new(client.clone(), directory, config.phone_number.clone());
        let who = contact.clone();
        let notify = events.clone();
        let rx = spawn_with_reply(async move {
            let id = resolver.resolve(&who).await;
            notify.emit(ChatEvent::ConversationReady(id.clone()));
            id
        });

        Self {
            client,
            contact,
            my_phone: config.phone_number.clone(),
            my_name: config.display_name.clone(),
            log: MessageLog::new(config.identity_mode),
            conversation: Resolution::Pending(rx),
            events,
        }
    }

    /// A session on an already known conversation.
    pub fn with_conversation(
        config: &AppConfig,
        client: ApiClient,
        contact: Contact,
        conversation_id: impl Into<String>,
        events: EventSink,
    ) -> Self {
        Self {
            client,
            contact,
            my_phone: config.phone_number.clone(),
            my_name: config.display_name.clone(),
            log: MessageLog::new(config.identity_mode),
            conversation: Resolution::Ready(Some(conversation_id.into())),
            events,
        }
    }

    pub fn contact(&self) -> &Contact {
        &self.contact
    }

    pub fn messages(&self) -> &[Message] {
        self.log.as_slice()
    }

    /// How our own messages are labelled: the configured name, or `me`.
    pub fn my_label(&self) -> &str {
        match self.my_name.trim() {
            "" => "me",
            name => name,
        }
    }

    pub fn is_mine(&self, message: &Message) -> bool {
        message.sender == self.my_phone
    }

    /// The id if resolution already finished successfully. Never waits.
    pub fn known_conversation_id(&self) -> Option<&str> {
        match &self.conversation {
            Resolution::Ready(Some(id)) => Some(id),
            _ => None,
        }
    }

    /// Waits for background resolution if it is still running.
    pub async fn conversation_id(&mut self) -> Option<String> {
        if let Resolution::Pending(rx) = &mut self.conversation {
            let id = match rx.await {
                Ok(id) => id,
                Err(_) => {
                    log::error!("conversation resolution ended without an answer");
                    None
                }
            };
            self.conversation = Resolution::Ready(id);
        }
        match &self.conversation {
            Resolution::Ready(id) => id.clone(),
            Resolution::Pending(_) => None,
        }
    }

    /// Echoes `text` into the local list right away and returns the message
    /// that [`deliver`](Self::deliver) should post.
    pub fn stage(&mut self, text: &str) -> Message {
        let message = Message::new(
            self.my_phone.as_str(),
            text,
            self.known_conversation_id().unwrap_or_default(),
        );
        self.log.push(message.clone());
        self.events.emit(ChatEvent::MessagesChanged);
        self.events.emit(ChatEvent::MessageSent);
        message
    }

    /// Posts a staged message once the conversation id is known.
    pub async fn deliver(&mut self, mut message: Message) {
        let Some(id) = self.conversation_id().await else {
            log::warn!("no conversation with {}, message not sent", self.contact.phone_number);
            return;
        };
        message.conversation_id = id;
        if let Err(e) = self.client.send_message(&message).await {
            log::error!("sending message failed: {}", e);
        }
    }

    pub async fn send(&mut self, text: &str) {
        let message = self.stage(text);
        self.deliver(message).await;
    }

    pub async fn fetch_all(&self, conversation_id: &str) -> Result<Vec<Message>, ClientError> {
        self.client.messages(conversation_id).await
    }

    /// Pulls the conversation from the server and merges it into the local
    /// list. Returns how many messages were new.
    pub async fn refresh(&mut self) -> usize {
        let Some(id) = self.conversation_id().await else {
            log::warn!("no conversation with {}, nothing to refresh", self.contact.phone_number);
            return 0;
        };
        let fetched = match self.fetch_all(&id).await {
            Ok(messages) => messages,
            Err(e) => {
                log::error!("fetching messages of {} failed: {}", id, e);
                Vec::new()
            }
        };
        let added = self.log.merge(fetched);
        self.events.emit(ChatEvent::MessagesChanged);
        added
    }
}
