//! Integration tests for the academic store

use chrono::NaiveDate;
use std::collections::HashSet;
use uni_portal::core::models::{
    CoursePatch, NewAnnouncement, NewCourse, NewRegistration, NewResult, Priority,
    RegistrationStatus, ResultPatch,
};
use uni_portal::core::store::{AcademicStore, NOT_AVAILABLE, UNKNOWN_COURSE};

fn course(code: &str) -> NewCourse {
    NewCourse {
        code: code.to_string(),
        name: "Linear Algebra".to_string(),
        department: "Mathematics".to_string(),
        credits: 3,
        semester: 2,
        instructor: "Dr. Noether".to_string(),
    }
}

#[test]
fn add_course_grows_by_one_with_unique_ids() {
    let mut store = AcademicStore::seeded();
    let mut ids: HashSet<String> = store.courses().iter().map(|c| c.id.clone()).collect();

    for n in 0..25 {
        let before = store.courses().len();
        let added = store.add_course(course(&format!("MATH2{n:02}")));
        assert_eq!(store.courses().len(), before + 1);
        assert!(ids.insert(added.id), "id reused");
    }
}

#[test]
fn deleted_course_resolves_to_placeholders() {
    let mut store = AcademicStore::seeded();
    assert!(store.delete_course("2"));

    let dangling: Vec<_> = store
        .results()
        .iter()
        .filter(|r| r.course_id == "2")
        .collect();
    assert_eq!(dangling.len(), 1);
    assert_eq!(store.course_name_or_unknown("2"), UNKNOWN_COURSE);
    assert_eq!(store.course_code_or_na("2"), NOT_AVAILABLE);
}

#[test]
fn registration_status_can_move_freely() {
    let mut store = AcademicStore::seeded();
    assert!(store.update_registration_status("2", RegistrationStatus::Approved));
    assert!(store.update_registration_status("2", RegistrationStatus::Rejected));
    assert!(store.update_registration_status("2", RegistrationStatus::Pending));
    assert_eq!(
        store.registration("2").unwrap().status,
        RegistrationStatus::Pending
    );
    assert!(!store.update_registration_status("404", RegistrationStatus::Approved));
}

#[test]
fn added_registration_keeps_caller_status() {
    let mut store = AcademicStore::new();
    let reg = store.add_registration(NewRegistration {
        student_id: "STU2024009".to_string(),
        course_id: "3".to_string(),
        semester: "Spring 2025".to_string(),
        status: RegistrationStatus::Rejected,
    });
    assert_eq!(reg.status, RegistrationStatus::Rejected);
    assert_eq!(store.registrations().len(), 1);
}

#[test]
fn newest_announcement_first() {
    let mut store = AcademicStore::seeded();
    for title in ["First", "Second"] {
        store.add_announcement(NewAnnouncement {
            title: title.to_string(),
            content: "Body".to_string(),
            date: NaiveDate::from_ymd_opt(2025, 3, 1).unwrap(),
            author: "Admin".to_string(),
            priority: Priority::default(),
        });
    }
    let titles: Vec<&str> = store
        .announcements()
        .iter()
        .map(|a| a.title.as_str())
        .collect();
    assert_eq!(
        titles,
        vec!["Second", "First", "Course Registration Open", "Exam Schedule Released"]
    );
}

#[test]
fn store_does_not_derive_gpa() {
    let mut store = AcademicStore::new();
    let stored = store.add_result(NewResult {
        student_id: "STU2024001".to_string(),
        course_id: "1".to_string(),
        semester: "Fall 2024".to_string(),
        grade: "C".to_string(),
        score: 72,
        gpa: 3.9,
    });
    assert!((stored.gpa - 3.9).abs() < f64::EPSILON);

    let patch = ResultPatch {
        gpa: Some(1.0),
        ..ResultPatch::default()
    };
    assert!(store.update_result(&stored.id, &patch));
    let updated = store.result(&stored.id).unwrap();
    assert_eq!(updated.grade, "C");
    assert!((updated.gpa - 1.0).abs() < f64::EPSILON);
}

#[test]
fn noop_updates_do_not_bump_revision() {
    let mut store = AcademicStore::seeded();
    let patch = CoursePatch::default();
    assert!(!store.update_course("missing", &patch));
    assert!(!store.delete_course("missing"));
    assert!(!store.update_result("missing", &ResultPatch::default()));
    assert_eq!(store.revision(), 0);

    store.add_course(course("MATH301"));
    assert_eq!(store.revision(), 1);
}
