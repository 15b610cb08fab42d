use serde::{Deserialize, Deserializer, Serialize};
use std::hash::{Hash, Hasher};

/// The person on the other side of a chat, as picked from the address book.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Contact {
    pub phone_number: String,
    pub display_name: String,
}

impl Contact {
    pub fn new(phone_number: impl Into<String>, display_name: impl Into<String>) -> Self {
        Self {
            phone_number: phone_number.into(),
            display_name: display_name.into(),
        }
    }
}

/// An account as listed by `GET /users.json`.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ApiUser {
    #[serde(default)]
    pub phone_number: Option<String>,
    #[serde(default)]
    pub password: Option<String>,
    #[serde(default)]
    pub name: Option<String>,
}

/// Body of `POST /api/v2/users`.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewUser {
    pub phone_number: String,
    pub name: String,
    pub password: String,
}

/// Body of `POST /api/v2/conversations/create_two_conversation`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TwoConversation {
    pub first: String,
    pub second: String,
    pub title: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ConversationRef {
    #[serde(deserialize_with = "string_or_number")]
    pub id: String,
    #[serde(default)]
    pub group: bool,
}

/// A chat message.
///
/// Two messages are equal when sender and content match. The optional server
/// fields take no part in equality or hashing; see
/// [`crate::sync::messages::IdentityMode`] for the id-aware comparison.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Message {
    #[serde(deserialize_with = "string_or_number")]
    pub sender: String,
    #[serde(default)]
    pub content: String,
    #[serde(default, deserialize_with = "string_or_number")]
    pub conversation_id: String,
    #[serde(default, skip_serializing, deserialize_with = "opt_string_or_number")]
    pub id: Option<String>,
    #[serde(default, skip_serializing)]
    pub created_at: Option<String>,
}

impl Message {
    pub fn new(
        sender: impl Into<String>,
        content: impl Into<String>,
        conversation_id: impl Into<String>,
    ) -> Self {
        Self {
            sender: sender.into(),
            content: content.into(),
            conversation_id: conversation_id.into(),
            id: None,
            created_at: None,
        }
    }
}

impl PartialEq for Message {
    fn eq(&self, other: &Self) -> bool {
        self.sender == other.sender && self.content == other.content
    }
}

impl Eq for Message {}

impl Hash for Message {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.sender.hash(state);
        self.content.hash(state);
    }
}

#[derive(Deserialize)]
#[serde(untagged)]
enum StringOrNumber {
    Str(String),
    Num(serde_json::Number),
}

impl From<StringOrNumber> for String {
    fn from(v: StringOrNumber) -> Self {
        match v {
            StringOrNumber::Str(s) => s,
            StringOrNumber::Num(n) => n.to_string(),
        }
    }
}

// Ids come back as integers from some deployments and as strings from others.
fn string_or_number<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(Option::<StringOrNumber>::deserialize(deserializer)?
        .map(String::from)
        .unwrap_or_default())
}

fn opt_string_or_number<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(Option::<StringOrNumber>::deserialize(deserializer)?.map(String::from))
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn messages_compare_by_sender_and_content_only() {
        let mut a = Message::new("555", "hi", "1");
        let mut b = Message::new("555", "hi", "2");
        a.id = Some("10".into());
        b.id = Some("11".into());
        b.created_at = Some("2016-05-01T10:00:00Z".into());
        assert_eq!(a, b);

        assert_ne!(Message::new("555", "hi", "1"), Message::new("556", "hi", "1"));
        assert_ne!(Message::new("555", "hi", "1"), Message::new("555", "hey", "1"));
    }

    #[test]
    fn conversation_ids_accept_numbers() {
        let conv: ConversationRef = serde_json::from_value(json!({"id": 42, "group": false})).unwrap();
        assert_eq!(conv.id, "42");

        let conv: ConversationRef = serde_json::from_value(json!({"id": "abc"})).unwrap();
        assert_eq!(conv.id, "abc");
        assert!(!conv.group);
    }

    #[test]
    fn message_wire_shape() {
        let m: Message = serde_json::from_value(json!({
            "id": 7,
            "sender": "555",
            "content": "hola",
            "conversation_id": 3,
            "created_at": "2016-05-01T10:00:00Z"
        }))
        .unwrap();
        assert_eq!(m.conversation_id, "3");
        assert_eq!(m.id.as_deref(), Some("7"));

        let out = serde_json::to_value(&m).unwrap();
        assert_eq!(out, json!({"sender": "555", "content": "hola", "conversation_id": "3"}));
    }

    #[test]
    fn new_user_uses_camel_case() {
        let u = NewUser {
            phone_number: "555".into(),
            name: "Ana Diaz".into(),
            password: "123456".into(),
        };
        assert_eq!(
            serde_json::to_value(&u).unwrap(),
            json!({"phoneNumber": "555", "name": "Ana Diaz", "password": "123456"})
        );
    }
}
