//! Session store: at most one signed-in identity per portal

use crate::core::events::{StoreEvent, Subscribers};
use crate::core::fixtures::{demo_roster, RosterEntry};
use crate::core::models::{Identity, ProfileUpdate};
use crate::{debug, info};
use std::time::Duration;

/// Holds the current identity and the roster credentials are checked against
#[derive(Debug)]
pub struct SessionStore {
    roster: Vec<RosterEntry>,
    current: Option<Identity>,
    login_delay: Duration,
    subscribers: Subscribers,
}

impl SessionStore {
    /// Create a session store over an explicit roster
    #[must_use]
    pub fn new(roster: Vec<RosterEntry>, login_delay: Duration) -> Self {
        Self {
            roster,
            current: None,
            login_delay,
            subscribers: Subscribers::new(),
        }
    }

    /// Session store over the demo roster
    #[must_use]
    pub fn with_demo_roster(login_delay: Duration) -> Self {
        Self::new(demo_roster(), login_delay)
    }

    /// Check credentials and sign in on an exact match.
    ///
    /// Always waits the configured login delay first, whatever the outcome.
    /// On a mismatch the current session is left untouched. Wrong email and
    /// wrong password are not distinguished.
    pub fn authenticate(&mut self, email: &str, password: &str) -> bool {
        if !self.login_delay.is_zero() {
            std::thread::sleep(self.login_delay);
        }

        let Some(entry) = self.roster.iter().find(|e| e.matches(email, password)) else {
            debug!("authentication rejected for {email}");
            return false;
        };

        let identity = entry.identity.clone();
        info!("signed in {} as {}", identity.email(), identity.role());
        let id = identity.id().to_string();
        self.current = Some(identity);
        self.subscribers.notify(&StoreEvent::SignedIn(id));
        true
    }

    /// Sign out. Safe to call when nobody is signed in.
    pub fn clear_session(&mut self) {
        if self.current.take().is_some() {
            info!("session cleared");
            self.subscribers.notify(&StoreEvent::SignedOut);
        }
    }

    /// Merge fields into the signed-in identity. No-op when signed out.
    ///
    /// Nothing is validated. The roster is not updated, so signing in
    /// again restores the original profile.
    pub fn update_current_identity(&mut self, update: &ProfileUpdate) {
        let Some(identity) = self.current.as_mut() else {
            debug!("profile update ignored: no active session");
            return;
        };
        identity.apply(update);
        let id = identity.id().to_string();
        self.subscribers.notify(&StoreEvent::ProfileUpdated(id));
    }

    /// The signed-in identity, if any
    #[must_use]
    pub const fn current(&self) -> Option<&Identity> {
        self.current.as_ref()
    }

    /// Whether someone is signed in
    #[must_use]
    pub const fn is_authenticated(&self) -> bool {
        self.current.is_some()
    }

    /// Roster identities, for listing demo accounts. Passwords are not exposed.
    pub fn roster(&self) -> impl Iterator<Item = &Identity> {
        self.roster.iter().map(|e| &e.identity)
    }

    /// Delay applied to every login attempt
    #[must_use]
    pub const fn login_delay(&self) -> Duration {
        self.login_delay
    }

    /// Register a change listener
    pub fn subscribe<F>(&mut self, listener: F)
    where
        F: FnMut(&StoreEvent) + 'static,
    {
        self.subscribers.subscribe(listener);
    }

    /// Number of session changes so far
    #[must_use]
    pub const fn revision(&self) -> u64 {
        self.subscribers.revision()
    }
}

impl Default for SessionStore {
    fn default() -> Self {
        Self::with_demo_roster(Duration::ZERO)
    }
}
