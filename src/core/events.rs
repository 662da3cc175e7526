//! Change notification for the stores

use crate::core::models::RegistrationStatus;
use std::fmt;

/// What changed in a store. Carries the affected record id.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StoreEvent {
    /// A course was appended
    CourseAdded(String),
    /// A course was patched
    CourseUpdated(String),
    /// A course was removed
    CourseDeleted(String),
    /// A result was appended
    ResultAdded(String),
    /// A result was patched
    ResultUpdated(String),
    /// A registration was appended
    RegistrationAdded(String),
    /// A registration moved to a new status
    RegistrationStatusChanged(String, RegistrationStatus),
    /// An announcement was prepended
    AnnouncementPosted(String),
    /// Someone signed in (account id)
    SignedIn(String),
    /// The session was cleared
    SignedOut,
    /// The signed-in identity was edited (account id)
    ProfileUpdated(String),
}

type Listener = Box<dyn FnMut(&StoreEvent)>;

/// Registered change listeners plus a revision counter.
///
/// The revision counts effective mutations; readers can compare it to a
/// value they saw earlier to know whether to re-render.
#[derive(Default)]
pub struct Subscribers {
    listeners: Vec<Listener>,
    revision: u64,
}

impl Subscribers {
    /// Create an empty listener set
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a listener. Listeners live as long as the store.
    pub fn subscribe<F>(&mut self, listener: F)
    where
        F: FnMut(&StoreEvent) + 'static,
    {
        self.listeners.push(Box::new(listener));
    }

    /// Bump the revision and call every listener
    pub fn notify(&mut self, event: &StoreEvent) {
        self.revision += 1;
        crate::debug!("store event #{}: {event:?}", self.revision);
        for listener in &mut self.listeners {
            listener(event);
        }
    }

    /// Number of effective mutations so far
    #[must_use]
    pub const fn revision(&self) -> u64 {
        self.revision
    }
}

impl fmt::Debug for Subscribers {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Subscribers")
            .field("listeners", &self.listeners.len())
            .field("revision", &self.revision)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::RefCell;
    use std::rc::Rc;

    #[test]
    fn test_notify_reaches_all_listeners_and_bumps_revision() {
        let seen = Rc::new(RefCell::new(Vec::new()));
        let mut subs = Subscribers::new();

        let a = Rc::clone(&seen);
        subs.subscribe(move |e| a.borrow_mut().push(format!("a:{e:?}")));
        let b = Rc::clone(&seen);
        subs.subscribe(move |e| b.borrow_mut().push(format!("b:{e:?}")));

        subs.notify(&StoreEvent::SignedOut);

        assert_eq!(subs.revision(), 1);
        assert_eq!(seen.borrow().len(), 2);
    }

    #[test]
    fn test_revision_without_listeners() {
        let mut subs = Subscribers::new();
        subs.notify(&StoreEvent::CourseAdded("1".to_string()));
        subs.notify(&StoreEvent::CourseDeleted("1".to_string()));
        assert_eq!(subs.revision(), 2);
    }
}
