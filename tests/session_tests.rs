//! Integration tests for sign-in and profile edits

use std::cell::RefCell;
use std::rc::Rc;
use std::time::Duration;
use uni_portal::core::events::StoreEvent;
use uni_portal::core::models::{ProfileUpdate, Role};
use uni_portal::core::session::SessionStore;

fn session() -> SessionStore {
    SessionStore::with_demo_roster(Duration::ZERO)
}

#[test]
fn admin_login_succeeds() {
    let mut s = session();
    assert!(s.authenticate("admin@university.edu", "admin123"));
    let current = s.current().unwrap();
    assert_eq!(current.role(), Role::Admin);
    assert_eq!(current.name(), "Admin User");
    assert!(current.student_id().is_none());
}

#[test]
fn wrong_password_leaves_identity_unset() {
    let mut s = session();
    assert!(!s.authenticate("admin@university.edu", "admin124"));
    assert!(s.current().is_none());
    assert!(!s.is_authenticated());
}

#[test]
fn credentials_are_case_sensitive() {
    let mut s = session();
    assert!(!s.authenticate("ADMIN@university.edu", "admin123"));
    assert!(!s.authenticate("admin@university.edu", "ADMIN123"));
}

#[test]
fn logout_is_idempotent() {
    let mut s = session();
    s.clear_session();
    assert_eq!(s.revision(), 0);

    assert!(s.authenticate("john@student.edu", "student123"));
    assert_eq!(s.revision(), 1);
    s.clear_session();
    assert_eq!(s.revision(), 2);
    s.clear_session();
    assert_eq!(s.revision(), 2);
    assert!(s.current().is_none());
}

#[test]
fn profile_update_merges_and_resets_on_relogin() {
    let mut s = session();
    assert!(s.authenticate("john@student.edu", "student123"));
    s.update_current_identity(&ProfileUpdate {
        name: Some("Johnny Doe".to_string()),
        semester: Some(7),
        ..ProfileUpdate::default()
    });

    let student = s.current().unwrap().as_student().unwrap().clone();
    assert_eq!(student.name, "Johnny Doe");
    assert_eq!(student.semester, 7);
    assert_eq!(student.department, "Computer Science");

    assert!(s.authenticate("john@student.edu", "student123"));
    assert_eq!(s.current().unwrap().name(), "John Doe");
}

#[test]
fn admin_profile_ignores_student_fields() {
    let mut s = session();
    assert!(s.authenticate("admin@university.edu", "admin123"));
    s.update_current_identity(&ProfileUpdate {
        department: Some("Physics".to_string()),
        email: Some("root@university.edu".to_string()),
        ..ProfileUpdate::default()
    });
    let current = s.current().unwrap();
    assert_eq!(current.email(), "root@university.edu");
    assert!(current.as_student().is_none());
}

#[test]
fn listeners_see_session_changes() {
    let seen = Rc::new(RefCell::new(Vec::new()));
    let sink = Rc::clone(&seen);
    let mut s = session();
    s.subscribe(move |e| sink.borrow_mut().push(e.clone()));

    assert!(!s.authenticate("jane@student.edu", "nope"));
    assert!(s.authenticate("jane@student.edu", "student123"));
    s.clear_session();

    assert_eq!(
        *seen.borrow(),
        vec![StoreEvent::SignedIn("3".to_string()), StoreEvent::SignedOut]
    );
}
