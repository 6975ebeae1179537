use crate::traits::ConversationalAgent;
use crate::AgentError;
use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};

/// Talks to a Rasa server through its REST input channel.
pub struct RasaRestAgent {
    webhook_url: String,
    sender: String,
    client: Client,
}

#[derive(Debug, Serialize)]
struct RasaMessage<'a> {
    sender: &'a str,
    message: &'a str,
}

#[derive(Debug, Deserialize)]
struct RasaReply {
    #[serde(default)]
    text: Option<String>,
}

impl RasaRestAgent {
    pub fn new(webhook_url: impl Into<String>, sender: impl Into<String>) -> Self {
        Self {
            webhook_url: webhook_url.into(),
            sender: sender.into(),
            client: Client::new(),
        }
    }
}

#[async_trait]
impl ConversationalAgent for RasaRestAgent {
    async fn respond(&self, message: &str) -> Result<String, AgentError> {
        let response = self
            .client
            .post(&self.webhook_url)
            .json(&RasaMessage {
                sender: &self.sender,
                message,
            })
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            return Err(AgentError::BackendResponse {
                status: status.as_u16(),
                details: response.text().await.unwrap_or_default(),
            });
        }

        let replies: Vec<RasaReply> = response.json().await.map_err(|error| {
            if error.is_decode() {
                AgentError::MalformedResponse(error.to_string())
            } else {
                AgentError::Http(error)
            }
        })?;
        first_text(replies)
    }
}

fn first_text(replies: Vec<RasaReply>) -> Result<String, AgentError> {
    replies
        .into_iter()
        .find_map(|reply| reply.text)
        .ok_or_else(|| AgentError::MalformedResponse("agent returned no text reply".to_string()))
}
