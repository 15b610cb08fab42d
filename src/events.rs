use tokio::sync::mpsc;

/// Notifications from a chat session to whatever renders it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ChatEvent {
    /// The local message list changed and should be redrawn.
    MessagesChanged,
    /// A message was handed off for sending; play the sent cue.
    MessageSent,
    /// Something the user needs to see.
    Alert(String),
    /// Background resolution finished, with or without an id.
    ConversationReady(Option<String>),
}

pub type EventReceiver = mpsc::UnboundedReceiver<ChatEvent>;

/// Sending half of the event channel. Without a subscriber, events are dropped.
#[derive(Debug, Clone, Default)]
pub struct EventSink {
    tx: Option<mpsc::UnboundedSender<ChatEvent>>,
}

impl EventSink {
    pub fn channel() -> (Self, EventReceiver) {
        let (tx, rx) = mpsc::unbounded_channel();
        (Self { tx: Some(tx) }, rx)
    }

    pub fn detached() -> Self {
        Self::default()
    }

    pub fn emit(&self, event: ChatEvent) {
        if let Some(tx) = &self.tx {
            let _ = tx.send(event);
        }
    }
}
