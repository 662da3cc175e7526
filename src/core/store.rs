//! Academic data store: courses, results, registrations and announcements
//!
//! References between collections are soft. Deleting a course leaves any
//! result or registration pointing at it in place; readers resolve the
//! missing course to a placeholder. Updates and deletes on unknown ids are
//! silent no-ops that report `false`.

use crate::core::events::{StoreEvent, Subscribers};
use crate::core::fixtures;
use crate::core::ids::IdGenerator;
use crate::core::models::{
    Announcement, Course, CoursePatch, CourseResult, NewAnnouncement, NewCourse,
    NewRegistration, NewResult, Registration, RegistrationStatus, ResultPatch,
};
use crate::{debug, info};
use serde::Serialize;

/// Placeholder for a course name whose course no longer exists
pub const UNKNOWN_COURSE: &str = "Unknown Course";

/// Placeholder for a course code or name cell whose course no longer exists
pub const NOT_AVAILABLE: &str = "N/A";

/// Borrowed view of every collection, for serialization
#[derive(Debug, Serialize)]
pub struct StoreSnapshot<'a> {
    /// Course catalog
    pub courses: &'a [Course],
    /// Recorded results
    pub results: &'a [CourseResult],
    /// Registration requests
    pub registrations: &'a [Registration],
    /// Announcements, newest first
    pub announcements: &'a [Announcement],
}

/// The four collections plus id generation and change listeners
#[derive(Debug, Default)]
pub struct AcademicStore {
    courses: Vec<Course>,
    results: Vec<CourseResult>,
    registrations: Vec<Registration>,
    announcements: Vec<Announcement>,
    ids: IdGenerator,
    subscribers: Subscribers,
}

impl AcademicStore {
    /// Empty store
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Store holding the seed fixtures
    #[must_use]
    pub fn seeded() -> Self {
        Self {
            courses: fixtures::seed_courses(),
            results: fixtures::seed_results(),
            registrations: fixtures::seed_registrations(),
            announcements: fixtures::seed_announcements(),
            ..Self::default()
        }
    }

    // --- Courses ---

    /// Append a course under a fresh id and return it. Codes may repeat.
    pub fn add_course(&mut self, fields: NewCourse) -> Course {
        let course = fields.with_id(self.ids.next_id());
        info!("course added: {} ({})", course.code, course.id);
        self.courses.push(course.clone());
        self.subscribers
            .notify(&StoreEvent::CourseAdded(course.id.clone()));
        course
    }

    /// Merge a patch into the course with this id. Returns whether it existed.
    pub fn update_course(&mut self, id: &str, patch: &CoursePatch) -> bool {
        let Some(course) = self.courses.iter_mut().find(|c| c.id == id) else {
            debug!("update_course: no course with id {id}");
            return false;
        };
        course.apply(patch);
        self.subscribers
            .notify(&StoreEvent::CourseUpdated(id.to_string()));
        true
    }

    /// Remove the course with this id. Does not cascade.
    pub fn delete_course(&mut self, id: &str) -> bool {
        let before = self.courses.len();
        self.courses.retain(|c| c.id != id);
        if self.courses.len() == before {
            debug!("delete_course: no course with id {id}");
            return false;
        }
        info!("course deleted: {id}");
        self.subscribers
            .notify(&StoreEvent::CourseDeleted(id.to_string()));
        true
    }

    /// Courses in insertion order
    #[must_use]
    pub fn courses(&self) -> &[Course] {
        &self.courses
    }

    /// Course by id
    #[must_use]
    pub fn course(&self, id: &str) -> Option<&Course> {
        self.courses.iter().find(|c| c.id == id)
    }

    /// Course name, or "Unknown Course" for a dangling id
    #[must_use]
    pub fn course_name_or_unknown(&self, id: &str) -> &str {
        self.course(id).map_or(UNKNOWN_COURSE, |c| c.name.as_str())
    }

    /// Course code, or "N/A" for a dangling id
    #[must_use]
    pub fn course_code_or_na(&self, id: &str) -> &str {
        self.course(id).map_or(NOT_AVAILABLE, |c| c.code.as_str())
    }

    /// Course name, or "N/A" for a dangling id
    #[must_use]
    pub fn course_name_or_na(&self, id: &str) -> &str {
        self.course(id).map_or(NOT_AVAILABLE, |c| c.name.as_str())
    }

    // --- Results ---

    /// Append a result. `gpa` is stored exactly as given.
    pub fn add_result(&mut self, fields: NewResult) -> CourseResult {
        let result = fields.with_id(self.ids.next_id());
        info!(
            "result added: {} in course {} ({})",
            result.student_id, result.course_id, result.grade
        );
        self.results.push(result.clone());
        self.subscribers
            .notify(&StoreEvent::ResultAdded(result.id.clone()));
        result
    }

    /// Merge a patch into the result with this id. A grade change does not
    /// recompute `gpa`.
    pub fn update_result(&mut self, id: &str, patch: &ResultPatch) -> bool {
        let Some(result) = self.results.iter_mut().find(|r| r.id == id) else {
            debug!("update_result: no result with id {id}");
            return false;
        };
        result.apply(patch);
        self.subscribers
            .notify(&StoreEvent::ResultUpdated(id.to_string()));
        true
    }

    /// Results in insertion order
    #[must_use]
    pub fn results(&self) -> &[CourseResult] {
        &self.results
    }

    /// Result by id
    #[must_use]
    pub fn result(&self, id: &str) -> Option<&CourseResult> {
        self.results.iter().find(|r| r.id == id)
    }

    // --- Registrations ---

    /// Append a registration with whatever status the caller chose
    pub fn add_registration(&mut self, fields: NewRegistration) -> Registration {
        let registration = fields.with_id(self.ids.next_id());
        info!(
            "registration added: {} for course {} ({})",
            registration.student_id, registration.course_id, registration.status
        );
        self.registrations.push(registration.clone());
        self.subscribers
            .notify(&StoreEvent::RegistrationAdded(registration.id.clone()));
        registration
    }

    /// Set the status of a registration. Any status may follow any other.
    pub fn update_registration_status(&mut self, id: &str, status: RegistrationStatus) -> bool {
        let Some(registration) = self.registrations.iter_mut().find(|r| r.id == id) else {
            debug!("update_registration_status: no registration with id {id}");
            return false;
        };
        info!(
            "registration {id}: {} -> {status}",
            registration.status
        );
        registration.status = status;
        self.subscribers
            .notify(&StoreEvent::RegistrationStatusChanged(id.to_string(), status));
        true
    }

    /// Registrations in insertion order
    #[must_use]
    pub fn registrations(&self) -> &[Registration] {
        &self.registrations
    }

    /// Registration by id
    #[must_use]
    pub fn registration(&self, id: &str) -> Option<&Registration> {
        self.registrations.iter().find(|r| r.id == id)
    }

    // --- Announcements ---

    /// Prepend an announcement so the newest comes first
    pub fn add_announcement(&mut self, fields: NewAnnouncement) -> Announcement {
        let announcement = fields.with_id(self.ids.next_id());
        info!("announcement posted: {}", announcement.title);
        self.announcements.insert(0, announcement.clone());
        self.subscribers
            .notify(&StoreEvent::AnnouncementPosted(announcement.id.clone()));
        announcement
    }

    /// Announcements, newest first
    #[must_use]
    pub fn announcements(&self) -> &[Announcement] {
        &self.announcements
    }

    /// Borrow every collection at once
    #[must_use]
    pub fn snapshot(&self) -> StoreSnapshot<'_> {
        StoreSnapshot {
            courses: &self.courses,
            results: &self.results,
            registrations: &self.registrations,
            announcements: &self.announcements,
        }
    }

    // --- Change tracking ---

    /// Register a change listener
    pub fn subscribe<F>(&mut self, listener: F)
    where
        F: FnMut(&StoreEvent) + 'static,
    {
        self.subscribers.subscribe(listener);
    }

    /// Number of effective mutations so far
    #[must_use]
    pub const fn revision(&self) -> u64 {
        self.subscribers.revision()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::models::Priority;
    use chrono::NaiveDate;

    fn new_course(code: &str) -> NewCourse {
        NewCourse {
            code: code.to_string(),
            name: format!("{code} name"),
            department: "Physics".to_string(),
            credits: 3,
            semester: 2,
            instructor: "Dr. Curie".to_string(),
        }
    }

    #[test]
    fn test_seeded_counts() {
        let store = AcademicStore::seeded();
        assert_eq!(store.courses().len(), 4);
        assert_eq!(store.results().len(), 3);
        assert_eq!(store.registrations().len(), 2);
        assert_eq!(store.announcements().len(), 2);
        assert_eq!(store.revision(), 0);
    }

    #[test]
    fn test_add_course_appends_with_fresh_id() {
        let mut store = AcademicStore::seeded();
        let added = store.add_course(new_course("PHYS101"));

        assert_eq!(store.courses().last(), Some(&added));
        assert!(store.courses()[..4].iter().all(|c| c.id != added.id));
    }

    #[test]
    fn test_duplicate_codes_allowed() {
        let mut store = AcademicStore::new();
        let a = store.add_course(new_course("CS101"));
        let b = store.add_course(new_course("CS101"));
        assert_ne!(a.id, b.id);
        assert_eq!(store.courses().len(), 2);
    }

    #[test]
    fn test_update_unknown_course_is_noop() {
        let mut store = AcademicStore::seeded();
        let patch = CoursePatch {
            name: Some("Renamed".to_string()),
            ..CoursePatch::default()
        };
        assert!(!store.update_course("missing", &patch));
        assert_eq!(store.revision(), 0);
        assert!(store.courses().iter().all(|c| c.name != "Renamed"));
    }

    #[test]
    fn test_update_course_merges() {
        let mut store = AcademicStore::seeded();
        let patch = CoursePatch {
            instructor: Some("Dr. Turing".to_string()),
            ..CoursePatch::default()
        };
        assert!(store.update_course("2", &patch));

        let course = store.course("2").unwrap();
        assert_eq!(course.instructor, "Dr. Turing");
        assert_eq!(course.code, "CS201");
    }

    #[test]
    fn test_delete_course_leaves_dangling_references() {
        let mut store = AcademicStore::seeded();
        assert!(store.delete_course("1"));
        assert!(!store.delete_course("1"));

        assert_eq!(store.courses().len(), 3);
        assert_eq!(store.results().iter().filter(|r| r.course_id == "1").count(), 1);
        assert_eq!(store.course_name_or_unknown("1"), UNKNOWN_COURSE);
        assert_eq!(store.course_code_or_na("1"), NOT_AVAILABLE);
        assert_eq!(store.course_name_or_na("1"), NOT_AVAILABLE);
    }

    #[test]
    fn test_announcement_prepended() {
        let mut store = AcademicStore::seeded();
        let posted = store.add_announcement(NewAnnouncement {
            title: "Library Hours".to_string(),
            content: "Open until midnight during finals.".to_string(),
            date: NaiveDate::from_ymd_opt(2025, 2, 1).unwrap(),
            author: "Admin User".to_string(),
            priority: Priority::Low,
        });
        assert_eq!(store.announcements()[0], posted);
        assert_eq!(store.announcements().len(), 3);
        assert_eq!(store.announcements()[1].id, "1");
    }

    #[test]
    fn test_update_result_keeps_gpa_unless_given() {
        let mut store = AcademicStore::seeded();
        let patch = ResultPatch {
            grade: Some("F".to_string()),
            ..ResultPatch::default()
        };
        assert!(store.update_result("1", &patch));

        let result = store.result("1").unwrap();
        assert_eq!(result.grade, "F");
        assert!((result.gpa - 4.0).abs() < f64::EPSILON);
    }

    #[test]
    fn test_snapshot_serializes_to_toml() {
        let store = AcademicStore::seeded();
        let text = toml::to_string_pretty(&store.snapshot()).unwrap();

        assert!(text.contains("[[courses]]"));
        assert!(text.contains("code = \"MATH101\""));
        assert!(text.contains("status = \"pending\""));
        assert!(text.contains("date = \"2025-01-15\""));
    }

    #[test]
    fn test_listener_sees_mutations_in_order() {
        use std::cell::RefCell;
        use std::rc::Rc;

        let log = Rc::new(RefCell::new(Vec::new()));
        let mut store = AcademicStore::seeded();
        let sink = Rc::clone(&log);
        store.subscribe(move |e| sink.borrow_mut().push(e.clone()));

        store.update_registration_status("2", RegistrationStatus::Approved);
        store.delete_course("missing");
        store.delete_course("3");

        assert_eq!(
            *log.borrow(),
            vec![
                StoreEvent::RegistrationStatusChanged(
                    "2".to_string(),
                    RegistrationStatus::Approved
                ),
                StoreEvent::CourseDeleted("3".to_string()),
            ]
        );
        assert_eq!(store.revision(), 2);
    }
}
