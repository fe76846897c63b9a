use serde::Serialize;

/// Payload accepted by Slack-style incoming webhooks
#[derive(Debug, Serialize)]
pub struct WebhookMessage<'a> {
    pub text: &'a str,
}
