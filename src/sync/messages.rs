//! Local message list and the merge of server-fetched messages into it.

use crate::api::models::Message;
use serde::{Deserialize, Serialize};

/// How two messages are judged to be the same one.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum IdentityMode {
    /// Same sender and same text. Two genuinely different messages with equal
    /// text collapse into one.
    #[default]
    Content,
    /// Server ids decide when both sides carry one; otherwise falls back to
    /// sender and text.
    ServerId,
}

impl IdentityMode {
    pub fn same(self, a: &Message, b: &Message) -> bool {
        match self {
            IdentityMode::Content => a == b,
            IdentityMode::ServerId => match (&a.id, &b.id) {
                (Some(x), Some(y)) => x == y,
                _ => a == b,
            },
        }
    }
}

/// Appends every message of `fetched` that `existing` does not already hold,
/// keeping fetched order. Returns how many were appended.
///
/// Membership is checked against the growing list, so repeats inside
/// `fetched` collapse as well. Merging the same batch twice changes nothing
/// the second time.
pub fn merge_fetched<I>(existing: &mut Vec<Message>, fetched: I, mode: IdentityMode) -> usize
where
    I: IntoIterator<Item = Message>,
{
    let mut added = 0;
    for incoming in fetched {
        match existing.iter().position(|m| mode.same(m, &incoming)) {
            Some(pos) => {
                // A local echo learns its server id so later lookalikes stay distinct.
                if mode == IdentityMode::ServerId && existing[pos].id.is_none() {
                    existing[pos].id = incoming.id;
                }
            }
            None => {
                existing.push(incoming);
                added += 1;
            }
        }
    }
    added
}

/// The ordered message list shown on the chat screen.
#[derive(Debug, Clone, Default)]
pub struct MessageLog {
    messages: Vec<Message>,
    mode: IdentityMode,
}

impl MessageLog {
    pub fn new(mode: IdentityMode) -> Self {
        Self {
            messages: Vec::new(),
            mode,
        }
    }

    pub fn push(&mut self, message: Message) {
        self.messages.push(message);
    }

    pub fn merge(&mut self, fetched: Vec<Message>) -> usize {
        merge_fetched(&mut self.messages, fetched, self.mode)
    }

    pub fn as_slice(&self) -> &[Message] {
        &self.messages
    }

    pub fn len(&self) -> usize {
        self.messages.len()
    }

    pub fn is_empty(&self) -> bool {
        self.messages.is_empty()
    }

    pub fn get(&self, index: usize) -> Option<&Message> {
        self.messages.get(index)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn msg(sender: &str, content: &str) -> Message {
        Message::new(sender, content, "1")
    }

    fn with_id(sender: &str, content: &str, id: &str) -> Message {
        let mut m = msg(sender, content);
        m.id = Some(id.to_string());
        m
    }

    #[test]
    fn appends_only_missing_in_fetched_order() {
        let mut existing = vec![msg("me", "hi")];
        let added = merge_fetched(
            &mut existing,
            vec![msg("you", "hello"), msg("me", "hi"), msg("you", "bye")],
            IdentityMode::Content,
        );
        assert_eq!(added, 2);
        assert_eq!(
            existing,
            vec![msg("me", "hi"), msg("you", "hello"), msg("you", "bye")]
        );
    }

    #[test]
    fn repeats_inside_fetched_collapse() {
        let mut existing = Vec::new();
        let added = merge_fetched(
            &mut existing,
            vec![msg("you", "ok"), msg("you", "ok")],
            IdentityMode::Content,
        );
        assert_eq!(added, 1);
    }

    #[test]
    fn empty_fetch_is_a_no_op() {
        let mut existing = vec![msg("me", "hi")];
        assert_eq!(merge_fetched(&mut existing, Vec::new(), IdentityMode::Content), 0);
        assert_eq!(existing.len(), 1);
    }

    #[test]
    fn server_id_mode_keeps_lookalikes_apart() {
        let mut existing = vec![msg("me", "ok")];
        let fetched = vec![with_id("me", "ok", "1"), with_id("me", "ok", "2")];

        let added = merge_fetched(&mut existing, fetched.clone(), IdentityMode::ServerId);
        assert_eq!(added, 1);
        assert_eq!(existing[0].id.as_deref(), Some("1"));
        assert_eq!(existing[1].id.as_deref(), Some("2"));

        assert_eq!(merge_fetched(&mut existing, fetched, IdentityMode::ServerId), 0);
        assert_eq!(existing.len(), 2);
    }

    #[test]
    fn content_mode_collapses_lookalikes() {
        let mut existing = vec![msg("me", "ok")];
        let fetched = vec![with_id("me", "ok", "1"), with_id("me", "ok", "2")];
        assert_eq!(merge_fetched(&mut existing, fetched, IdentityMode::Content), 0);
        assert_eq!(existing[0].id, None);
    }

    #[test]
    fn log_merges_with_its_mode() {
        let mut log = MessageLog::new(IdentityMode::Content);
        assert!(log.is_empty());
        log.push(msg("me", "hi"));
        assert_eq!(log.merge(vec![msg("me", "hi"), msg("you", "yo")]), 1);
        assert_eq!(log.len(), 2);
        assert_eq!(log.get(1).map(|m| m.content.as_str()), Some("yo"));
    }
}
