//! Gmail client for discovering expenses in reservation emails.
//!
//! Searches the inbox for unread reservation confirmations that have not yet
//! been labeled as synced, extracts an expense candidate from each message
//! body, and labels messages once their expense has been recorded. Extracted
//! fields stay raw strings — the ledger service validates them exactly like
//! manually entered input.

use crate::api::auth::Auth;
use crate::libs::config::ConfigModule;
use crate::libs::messages::Message;
use crate::{msg_error_anyhow, msg_print};
use anyhow::Result;
use base64::engine::general_purpose::URL_SAFE_NO_PAD;
use base64::Engine;
use dialoguer::{theme::ColorfulTheme, Input};
use reqwest::{Client, StatusCode};
use serde::{Deserialize, Serialize};
use serde_json::json;

const API_URL: &str = "https://gmail.googleapis.com/gmail/v1/users/me";
const SYNCED_LABEL: &str = "EXPENSE_SYNCED";
const RESERVATION_SENDER: &str = "automated@airbnb.com";
const RESERVATION_SUBJECT: &str = "Reservation confirmed for";
const MAX_RESULTS: u32 = 100;

/// OAuth client credentials for the Gmail API.
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct GmailConfig {
    pub client_id: String,
    pub client_secret: String,
}

impl GmailConfig {
    pub fn module() -> ConfigModule {
        ConfigModule {
            key: "gmail".to_string(),
            name: "Gmail".to_string(),
        }
    }

    /// Interactive setup with existing values as defaults.
    pub fn init(config: &Option<GmailConfig>) -> Result<Self> {
        let config = config.clone().unwrap_or(Self {
            client_id: "".to_string(),
            client_secret: "".to_string(),
        });

        msg_print!(Message::ConfigModuleGmail);

        Ok(Self {
            client_id: Input::with_theme(&ColorfulTheme::default())
                .with_prompt("Enter your OAuth client ID")
                .default(config.client_id)
                .interact_text()?,
            client_secret: Input::with_theme(&ColorfulTheme::default())
                .with_prompt("Enter your OAuth client secret")
                .default(config.client_secret)
                .interact_text()?,
        })
    }
}

#[derive(Debug, Deserialize)]
struct MessageList {
    messages: Option<Vec<MessageRef>>,
}

#[derive(Debug, Deserialize)]
struct MessageRef {
    id: String,
}

#[derive(Debug, Deserialize)]
struct MailMessage {
    payload: Option<Payload>,
}

#[derive(Debug, Deserialize)]
struct Payload {
    headers: Option<Vec<Header>>,
    parts: Option<Vec<Part>>,
}

#[derive(Debug, Deserialize)]
struct Header {
    name: String,
    value: String,
}

#[derive(Debug, Deserialize)]
struct Part {
    body: Option<PartBody>,
}

#[derive(Debug, Deserialize)]
struct PartBody {
    data: Option<String>,
}

#[derive(Debug, Deserialize)]
struct Label {
    id: String,
    name: String,
}

#[derive(Debug, Deserialize)]
struct LabelList {
    labels: Option<Vec<Label>>,
}

/// An expense candidate extracted from one inbox message.
#[derive(Debug)]
pub struct InboxExpense {
    pub message_id: String,
    pub description: String,
    pub amount: Option<String>,
    pub date: Option<String>,
}

pub struct Gmail {
    client: Client,
    auth: Auth,
}

impl Gmail {
    pub fn new(config: &GmailConfig) -> Self {
        Self {
            client: Client::new(),
            auth: Auth::new(config),
        }
    }

    /// Expense candidates from unread reservation emails that are not yet
    /// labeled as synced.
    pub async fn fetch_expenses(&self) -> Result<Vec<InboxExpense>> {
        let token = self.auth.access_token().await?;
        let query = format!(
            "from:{} subject:\"{}\" is:unread -label:{}",
            RESERVATION_SENDER, RESERVATION_SUBJECT, SYNCED_LABEL
        );

        let list: MessageList = self
            .client
            .get(format!("{}/messages", API_URL))
            .bearer_auth(&token)
            .query(&[("maxResults", MAX_RESULTS.to_string()), ("q", query)])
            .send()
            .await?
            .error_for_status()?
            .json()
            .await?;

        let mut expenses = Vec::new();
        for reference in list.messages.unwrap_or_default() {
            let message: MailMessage = self
                .client
                .get(format!("{}/messages/{}", API_URL, reference.id))
                .bearer_auth(&token)
                .send()
                .await?
                .error_for_status()?
                .json()
                .await?;

            if let Some(expense) = Self::extract_expense(reference.id, &message) {
                expenses.push(expense);
            }
        }
        Ok(expenses)
    }

    fn extract_expense(message_id: String, message: &MailMessage) -> Option<InboxExpense> {
        let payload = message.payload.as_ref()?;
        let subject = payload.headers.as_ref()?.iter().find(|header| header.name == "Subject")?;

        // The second body part carries the reservation details
        let body = payload
            .parts
            .as_ref()
            .and_then(|parts| parts.get(1))
            .and_then(|part| part.body.as_ref())
            .and_then(|body| body.data.as_deref())
            .and_then(decode_body)
            .unwrap_or_default();

        let description = subject.value.replace(RESERVATION_SUBJECT, "rent");
        let date = capture(&body, "\"checkinDate\":\"", "\"").map(str::to_string);
        let amount = amount_paid(&body);

        Some(InboxExpense {
            message_id,
            description,
            amount,
            date,
        })
    }

    /// Returns the id of the synced label, creating it on first use.
    pub async fn ensure_label(&self) -> Result<String> {
        let token = self.auth.access_token().await?;
        let response = self
            .client
            .post(format!("{}/labels", API_URL))
            .bearer_auth(&token)
            .json(&json!({
                "name": SYNCED_LABEL,
                "labelListVisibility": "labelShow",
                "messageListVisibility": "show",
            }))
            .send()
            .await?;

        if response.status() == StatusCode::CONFLICT {
            msg_print!(Message::LabelAlreadyExists);
            let labels: LabelList = self
                .client
                .get(format!("{}/labels", API_URL))
                .bearer_auth(&token)
                .send()
                .await?
                .error_for_status()?
                .json()
                .await?;
            let label = labels
                .labels
                .unwrap_or_default()
                .into_iter()
                .find(|label| label.name == SYNCED_LABEL)
                .ok_or_else(|| msg_error_anyhow!(Message::SyncFailed(format!("label {} not found", SYNCED_LABEL))))?;
            return Ok(label.id);
        }

        let label: Label = response.error_for_status()?.json().await?;
        msg_print!(Message::LabelCreated(label.name));
        Ok(label.id)
    }

    /// Adds the synced label to a processed message.
    pub async fn mark_synced(&self, message_id: &str, label_id: &str) -> Result<()> {
        let token = self.auth.access_token().await?;
        self.client
            .post(format!("{}/messages/{}/modify", API_URL, message_id))
            .bearer_auth(&token)
            .json(&json!({ "addLabelIds": [label_id] }))
            .send()
            .await?
            .error_for_status()?;

        msg_print!(Message::MessageMarkedSynced(message_id.to_string()));
        Ok(())
    }
}

fn decode_body(data: &str) -> Option<String> {
    let bytes = URL_SAFE_NO_PAD.decode(data.trim_end_matches('=')).ok()?;
    String::from_utf8(bytes).ok()
}

/// First substring between `prefix` and `terminator`, if present.
fn capture<'a>(haystack: &'a str, prefix: &str, terminator: &str) -> Option<&'a str> {
    let start = haystack.find(prefix)? + prefix.len();
    let rest = &haystack[start..];
    let end = rest.find(terminator)?;
    Some(&rest[..end])
}

/// The dollar figure following the "Amount paid (USD)" marker.
fn amount_paid(body: &str) -> Option<String> {
    let marker = "Amount paid (USD)";
    let after = &body[body.find(marker)? + marker.len()..];
    let dollar = after.find('$')?;
    let digits: String = after[dollar + 1..]
        .chars()
        .take_while(|c| c.is_ascii_digit() || *c == '.')
        .collect();
    (!digits.is_empty()).then_some(digits)
}
