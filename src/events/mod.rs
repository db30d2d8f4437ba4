//! Stream event handling
//!
//! Webhook payloads from Streamlabs and Twitch, and the rates that turn them
//! into minutes for the timer.

pub mod payloads;
pub mod rates;

pub use payloads::{
    Donation, DonationWebhook, EventSubMessage, TwitchEvent, TwitchMessageType,
    TWITCH_MESSAGE_TYPE_HEADER,
};
pub use rates::MinutesPolicy;
