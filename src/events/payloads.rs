//! Inbound webhook payloads from Streamlabs and Twitch EventSub

use serde::{de, Deserialize, Deserializer};

/// Header carrying the EventSub message type
pub const TWITCH_MESSAGE_TYPE_HEADER: &str = "Twitch-Eventsub-Message-Type";

/// Streamlabs donation webhook body
#[derive(Debug, Default, Deserialize)]
pub struct DonationWebhook {
    #[serde(default)]
    pub message: Vec<Donation>,
}

/// A single donation inside a Streamlabs webhook
#[derive(Debug, Deserialize)]
pub struct Donation {
    #[serde(default, deserialize_with = "amount_from_number_or_string")]
    pub amount: f64,
    #[serde(default)]
    pub from: Option<String>,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default = "default_currency")]
    pub currency: String,
    #[serde(default)]
    pub message: Option<String>,
}

impl Donation {
    pub fn donor(&self) -> &str {
        self.from
            .as_deref()
            .or(self.name.as_deref())
            .unwrap_or("Anonymous")
    }
}

fn default_currency() -> String {
    "EUR".to_string()
}

#[derive(Deserialize)]
#[serde(untagged)]
enum Amount {
    Number(f64),
    Text(String),
}

/// Streamlabs sends amounts both as numbers and as decimal strings
fn amount_from_number_or_string<'de, D>(deserializer: D) -> Result<f64, D::Error>
where
    D: Deserializer<'de>,
{
    match Option::<Amount>::deserialize(deserializer)? {
        None => Ok(0.0),
        Some(Amount::Number(n)) => Ok(n),
        Some(Amount::Text(s)) => s.trim().parse().map_err(de::Error::custom),
    }
}

/// EventSub message type taken from the request header
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TwitchMessageType {
    Verification,
    Notification,
    Revocation,
    Unknown(String),
}

impl TwitchMessageType {
    pub fn from_header(value: Option<&str>) -> Self {
        match value {
            Some("webhook_callback_verification") => Self::Verification,
            Some("notification") | None => Self::Notification,
            Some("revocation") => Self::Revocation,
            Some(other) => Self::Unknown(other.to_string()),
        }
    }
}

/// EventSub callback body; every field is optional so that verification,
/// notification and revocation messages share one shape
#[derive(Debug, Default, Deserialize)]
pub struct EventSubMessage {
    #[serde(default)]
    pub challenge: Option<String>,
    #[serde(default)]
    pub subscription: EventSubSubscription,
    #[serde(default)]
    pub event: EventSubEvent,
}

#[derive(Debug, Default, Deserialize)]
pub struct EventSubSubscription {
    #[serde(default, rename = "type")]
    pub kind: String,
}

#[derive(Debug, Default, Deserialize)]
pub struct EventSubEvent {
    #[serde(default)]
    pub broadcaster_user_name: Option<String>,
    #[serde(default)]
    pub user_name: Option<String>,
    #[serde(default)]
    pub bits: u64,
}

/// Timer-relevant classification of an EventSub notification
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TwitchEvent {
    Subscribe,
    Cheer { bits: u64 },
    Other(String),
}

impl TwitchEvent {
    /// Label recorded as the last action
    pub fn action(&self) -> &str {
        match self {
            TwitchEvent::Subscribe => "twitch.subscribe",
            TwitchEvent::Cheer { .. } => "twitch.cheer",
            TwitchEvent::Other(kind) => kind.as_str(),
        }
    }
}

impl EventSubMessage {
    pub fn event_kind(&self) -> TwitchEvent {
        match self.subscription.kind.as_str() {
            "channel.subscribe" => TwitchEvent::Subscribe,
            "channel.cheer" => TwitchEvent::Cheer {
                bits: self.event.bits,
            },
            other => TwitchEvent::Other(other.to_string()),
        }
    }

    pub fn channel(&self) -> String {
        self.event
            .broadcaster_user_name
            .as_deref()
            .unwrap_or_default()
            .to_lowercase()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn donation_amounts_accept_strings_and_numbers() {
        let webhook: DonationWebhook = serde_json::from_value(json!({
            "message": [
                { "amount": "5.50", "from": "alice", "currency": "USD" },
                { "amount": 3, "name": "bob" },
                { "amount": null }
            ]
        }))
        .unwrap();

        assert_eq!(webhook.message.len(), 3);
        assert_eq!(webhook.message[0].amount, 5.5);
        assert_eq!(webhook.message[0].donor(), "alice");
        assert_eq!(webhook.message[0].currency, "USD");
        assert_eq!(webhook.message[1].amount, 3.0);
        assert_eq!(webhook.message[1].donor(), "bob");
        assert_eq!(webhook.message[1].currency, "EUR");
        assert_eq!(webhook.message[2].amount, 0.0);
        assert_eq!(webhook.message[2].donor(), "Anonymous");
    }

    #[test]
    fn both_donor_fields_may_be_present() {
        let donation: Donation = serde_json::from_value(json!({
            "amount": 1, "from": "Alice", "name": "alice"
        }))
        .unwrap();

        assert_eq!(donation.donor(), "Alice");
    }

    #[test]
    fn unparseable_amount_is_rejected() {
        let result: Result<DonationWebhook, _> =
            serde_json::from_value(json!({ "message": [{ "amount": "lots" }] }));
        assert!(result.is_err());
    }

    #[test]
    fn classifies_eventsub_notifications() {
        let cheer: EventSubMessage = serde_json::from_value(json!({
            "subscription": { "type": "channel.cheer" },
            "event": { "broadcaster_user_name": "Streamer", "user_name": null, "bits": 250 }
        }))
        .unwrap();
        assert_eq!(cheer.event_kind(), TwitchEvent::Cheer { bits: 250 });
        assert_eq!(cheer.channel(), "streamer");

        let sub: EventSubMessage = serde_json::from_value(json!({
            "subscription": { "type": "channel.subscribe" },
            "event": {}
        }))
        .unwrap();
        assert_eq!(sub.event_kind(), TwitchEvent::Subscribe);
        assert_eq!(sub.event_kind().action(), "twitch.subscribe");
    }

    #[test]
    fn message_type_header() {
        assert_eq!(
            TwitchMessageType::from_header(Some("webhook_callback_verification")),
            TwitchMessageType::Verification
        );
        assert_eq!(
            TwitchMessageType::from_header(None),
            TwitchMessageType::Notification
        );
        assert_eq!(
            TwitchMessageType::from_header(Some("revocation")),
            TwitchMessageType::Revocation
        );
    }
}
