//! Transient outcome banner with a fixed auto-clear timer.
//!
//! Expiry is evaluated lazily against the instant the caller passes in, so
//! the banner needs no background timer: `Hidden` is reported from
//! `shown_at + duration` onwards. Showing a new outcome replaces the current
//! one and restarts the timer.

use booking_domain::NotificationState;
use chrono::{DateTime, Duration, Utc};

pub const DEFAULT_NOTIFICATION_DURATION_MS: u64 = 5_000;
/// Longest auto-clear delay accepted from configuration: one day.
pub const MAX_NOTIFICATION_DURATION_MS: u64 = 86_400_000;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TransientNotification {
    state: NotificationState,
    message: Option<String>,
    shown_at: Option<DateTime<Utc>>,
    duration: Duration,
}

impl Default for TransientNotification {
    fn default() -> Self {
        Self::with_millis(DEFAULT_NOTIFICATION_DURATION_MS)
    }
}

impl TransientNotification {
    pub fn new(duration: Duration) -> Self {
        Self {
            state: NotificationState::Hidden,
            message: None,
            shown_at: None,
            duration,
        }
    }

    /// Builds a banner from a configured delay, capped at
    /// [`MAX_NOTIFICATION_DURATION_MS`].
    pub fn with_millis(millis: u64) -> Self {
        let millis = millis.min(MAX_NOTIFICATION_DURATION_MS) as i64;
        Self::new(Duration::milliseconds(millis))
    }

    pub fn duration(&self) -> Duration {
        self.duration
    }

    pub fn show_success(&mut self, now: DateTime<Utc>, message: impl Into<String>) {
        self.show(NotificationState::ShowingSuccess, now, message.into());
    }

    pub fn show_error(&mut self, now: DateTime<Utc>, message: impl Into<String>) {
        self.show(NotificationState::ShowingError, now, message.into());
    }

    fn show(&mut self, state: NotificationState, now: DateTime<Utc>, message: String) {
        self.state = state;
        self.message = Some(message);
        self.shown_at = Some(now);
    }

    /// Saturates at the latest representable instant.
    pub fn expires_at(&self) -> Option<DateTime<Utc>> {
        self.shown_at.map(|shown| {
            shown
                .checked_add_signed(self.duration)
                .unwrap_or(DateTime::<Utc>::MAX_UTC)
        })
    }

    pub fn state_at(&self, now: DateTime<Utc>) -> NotificationState {
        match self.expires_at() {
            Some(expiry) if now < expiry => self.state,
            _ => NotificationState::Hidden,
        }
    }

    pub fn message_at(&self, now: DateTime<Utc>) -> Option<&str> {
        if self.state_at(now).is_visible() {
            self.message.as_deref()
        } else {
            None
        }
    }

    /// Time left before the banner hides, `None` when nothing is showing.
    pub fn remaining(&self, now: DateTime<Utc>) -> Option<Duration> {
        let expiry = self.expires_at()?;
        if now < expiry {
            Some(expiry - now)
        } else {
            None
        }
    }

    /// Applies the timer: drops an expired banner and returns the state.
    pub fn tick(&mut self, now: DateTime<Utc>) -> NotificationState {
        let state = self.state_at(now);
        if !state.is_visible() {
            self.state = NotificationState::Hidden;
            self.message = None;
            self.shown_at = None;
        }
        state
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn t0() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2024, 1, 1, 10, 0, 0).unwrap()
    }

    #[test]
    fn starts_hidden() {
        let banner = TransientNotification::default();
        assert_eq!(banner.state_at(t0()), NotificationState::Hidden);
        assert_eq!(banner.duration(), Duration::milliseconds(5_000));
    }

    #[test]
    fn hides_exactly_at_duration() {
        let mut banner = TransientNotification::default();
        banner.show_error(t0(), "nope");

        let just_before = t0() + Duration::milliseconds(4_999);
        assert_eq!(banner.state_at(just_before), NotificationState::ShowingError);
        assert_eq!(banner.message_at(just_before), Some("nope"));
        assert_eq!(banner.remaining(just_before), Some(Duration::milliseconds(1)));

        let at_expiry = t0() + Duration::milliseconds(5_000);
        assert_eq!(banner.tick(at_expiry), NotificationState::Hidden);
        assert_eq!(banner.message_at(at_expiry), None);
        assert_eq!(banner.expires_at(), None);
    }

    #[test]
    fn configured_delay_is_capped_at_one_day() {
        let banner = TransientNotification::with_millis(u64::MAX);
        assert_eq!(banner.duration(), Duration::milliseconds(86_400_000));
    }

    #[test]
    fn huge_duration_saturates_instead_of_overflowing() {
        let mut banner = TransientNotification::new(Duration::milliseconds(i64::MAX));
        banner.show_success(t0(), "booked");

        assert_eq!(banner.expires_at(), Some(DateTime::<Utc>::MAX_UTC));
        let much_later = t0() + Duration::days(365 * 1_000);
        assert_eq!(banner.tick(much_later), NotificationState::ShowingSuccess);
        assert!(banner.remaining(much_later).is_some());
    }

    #[test]
    fn new_outcome_replaces_and_restarts_timer() {
        let mut banner = TransientNotification::with_millis(1_000);
        banner.show_error(t0(), "error");
        let later = t0() + Duration::milliseconds(800);
        banner.show_success(later, "ok");

        let check = t0() + Duration::milliseconds(1_500);
        assert_eq!(banner.state_at(check), NotificationState::ShowingSuccess);
        assert_eq!(banner.message_at(check), Some("ok"));
        assert_eq!(
            banner.state_at(later + Duration::milliseconds(1_000)),
            NotificationState::Hidden
        );
    }
}
