//! Conversion of donations, subscriptions and bits into minutes

use serde::{Deserialize, Serialize};

use super::payloads::TwitchEvent;

/// Rates used to turn stream events into minutes added to the timer
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct MinutesPolicy {
    pub minutes_per_euro: f64,
    pub usd_to_eur: f64,
    pub sub_minutes: i64,
    pub minutes_per_hundred_bits: i64,
}

impl Default for MinutesPolicy {
    fn default() -> Self {
        Self {
            minutes_per_euro: 10.0,
            usd_to_eur: 0.85,
            sub_minutes: 30,
            minutes_per_hundred_bits: 10,
        }
    }
}

impl MinutesPolicy {
    /// Minutes earned by a donation, rounded down.
    ///
    /// Only USD is converted; EUR and any other currency count at face value.
    pub fn donation_minutes(&self, amount: f64, currency: &str) -> i64 {
        if !amount.is_finite() || amount <= 0.0 {
            return 0;
        }

        let euros = if currency.trim().eq_ignore_ascii_case("USD") {
            amount * self.usd_to_eur
        } else {
            amount
        };

        (euros * self.minutes_per_euro).floor().max(0.0) as i64
    }

    pub fn subscription_minutes(&self) -> i64 {
        self.sub_minutes
    }

    /// Minutes per full hundred bits; partial hundreds earn nothing
    pub fn bits_minutes(&self, bits: u64) -> i64 {
        i64::try_from(bits / 100)
            .unwrap_or(i64::MAX)
            .saturating_mul(self.minutes_per_hundred_bits)
    }

    pub fn twitch_minutes(&self, event: &TwitchEvent) -> i64 {
        match event {
            TwitchEvent::Subscribe => self.subscription_minutes(),
            TwitchEvent::Cheer { bits } => self.bits_minutes(*bits),
            TwitchEvent::Other(_) => 0,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn euros_earn_ten_minutes_each() {
        let policy = MinutesPolicy::default();

        assert_eq!(policy.donation_minutes(5.0, "EUR"), 50);
        assert_eq!(policy.donation_minutes(2.55, "eur"), 25);
        assert_eq!(policy.donation_minutes(0.05, "EUR"), 0);
    }

    #[test]
    fn usd_is_converted_other_currencies_are_not() {
        let policy = MinutesPolicy {
            usd_to_eur: 0.5,
            ..MinutesPolicy::default()
        };

        assert_eq!(policy.donation_minutes(4.0, "USD"), 20);
        assert_eq!(policy.donation_minutes(4.0, "GBP"), 40);
    }

    #[test]
    fn invalid_amounts_earn_nothing() {
        let policy = MinutesPolicy::default();

        assert_eq!(policy.donation_minutes(-3.0, "EUR"), 0);
        assert_eq!(policy.donation_minutes(f64::NAN, "EUR"), 0);
        assert_eq!(policy.donation_minutes(f64::INFINITY, "EUR"), 0);
    }

    #[test]
    fn bits_count_per_full_hundred() {
        let policy = MinutesPolicy::default();

        assert_eq!(policy.bits_minutes(99), 0);
        assert_eq!(policy.bits_minutes(100), 10);
        assert_eq!(policy.bits_minutes(250), 20);
        assert_eq!(policy.twitch_minutes(&TwitchEvent::Cheer { bits: 1000 }), 100);
    }

    #[test]
    fn subscriptions_are_flat() {
        let policy = MinutesPolicy::default();

        assert_eq!(policy.twitch_minutes(&TwitchEvent::Subscribe), 30);
        assert_eq!(
            policy.twitch_minutes(&TwitchEvent::Other("channel.follow".to_string())),
            0
        );
    }
}
