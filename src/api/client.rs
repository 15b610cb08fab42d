use crate::api::models::{ApiUser, ConversationRef, Message, NewUser, TwoConversation};
use crate::app::AppConfig;
use crate::error::ClientError;
use reqwest::Client as HttpClient;
use serde::de::DeserializeOwned;
use serde::Serialize;
use std::time::Duration;
use url::Url;

const USERS: &str = "/users.json";
const CREATE_USER: &str = "/api/v2/users";
const CREATE_TWO_CONVERSATION: &str = "/api/v2/conversations/create_two_conversation";
const USER_CONVERSATIONS: &str = "/api/v2/users/get_conversations";
const SEND_MESSAGE: &str = "/api/v2/conversations/send_message";
const GET_MESSAGES: &str = "/api/v2/conversations/get_messages";

/// Thin JSON client for the chat backend. Cloning is cheap and shares the
/// connection pool.
#[derive(Debug, Clone)]
pub struct ApiClient {
    http: HttpClient,
    base_url: String,
    token: String,
}

impl ApiClient {
    pub fn new(base_url: &str, token: &str) -> Result<Self, ClientError> {
        Self::build(base_url, token, HttpClient::new())
    }

    pub fn from_config(config: &AppConfig) -> Result<Self, ClientError> {
        let mut builder = HttpClient::builder();
        if let Some(secs) = config.request_timeout_secs {
            builder = builder.timeout(Duration::from_secs(secs));
        }
        Self::build(&config.base_url, &config.api_token, builder.build()?)
    }

    fn build(base_url: &str, token: &str, http: HttpClient) -> Result<Self, ClientError> {
        Url::parse(base_url)?;
        Ok(Self {
            http,
            base_url: base_url.trim_end_matches('/').to_string(),
            token: token.to_string(),
        })
    }

    fn endpoint(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    fn with_auth(&self, req: reqwest::RequestBuilder) -> reqwest::RequestBuilder {
        req.header("Authorization", format!("Token token={}", self.token))
            .header("Content-Type", "application/json")
    }

    async fn read_body(resp: reqwest::Response) -> Result<String, ClientError> {
        let status = resp.status();
        let body = resp.text().await?;
        if !status.is_success() {
            return Err(ClientError::Status { status, body });
        }
        Ok(body)
    }

    async fn get_json<T: DeserializeOwned>(
        &self,
        path: &str,
        query: &[(&str, &str)],
    ) -> Result<T, ClientError> {
        let url = self.endpoint(path);
        log::debug!("GET {} {:?}", url, query);
        let resp = self.with_auth(self.http.get(&url)).query(query).send().await?;
        let body = Self::read_body(resp).await?;
        Ok(serde_json::from_str(&body)?)
    }

    async fn post_json<B: Serialize + ?Sized>(&self, path: &str, body: &B) -> Result<String, ClientError> {
        let url = self.endpoint(path);
        log::debug!("POST {}", url);
        let resp = self.with_auth(self.http.post(&url)).json(body).send().await?;
        Self::read_body(resp).await
    }

    pub async fn users(&self) -> Result<Vec<ApiUser>, ClientError> {
        self.get_json(USERS, &[]).await
    }

    /// Registers an account. The response body is read and dropped.
    pub async fn create_user(&self, user: &NewUser) -> Result<(), ClientError> {
        self.post_json(CREATE_USER, user).await.map(|_| ())
    }

    pub async fn create_two_conversation(
        &self,
        conversation: &TwoConversation,
    ) -> Result<ConversationRef, ClientError> {
        let body = self.post_json(CREATE_TWO_CONVERSATION, conversation).await?;
        Ok(serde_json::from_str(&body)?)
    }

    pub async fn user_conversations(&self, phone_number: &str) -> Result<Vec<ConversationRef>, ClientError> {
        self.get_json(USER_CONVERSATIONS, &[("phone_number", phone_number)])
            .await
    }

    /// Posts a message. The server's answer is not used to correct the local copy.
    pub async fn send_message(&self, message: &Message) -> Result<(), ClientError> {
        self.post_json(SEND_MESSAGE, message).await.map(|_| ())
    }

    pub async fn messages(&self, conversation_id: &str) -> Result<Vec<Message>, ClientError> {
        self.get_json(GET_MESSAGES, &[("conversation_id", conversation_id)])
            .await
    }
}
