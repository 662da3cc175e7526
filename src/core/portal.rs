//! Top-level application object
//!
//! A [`Portal`] owns one session store, one academic store and the loaded
//! configuration. Callers hold it and pass it by reference; there is no
//! process-wide instance. The workflows here are the role-aware actions the
//! admin and student screens perform on top of the raw store operations.

use crate::core::config::Config;
use crate::core::metrics::{self, AdminStats, StudentStats};
use crate::core::models::{
    Announcement, Course, CoursePatch, CourseResult, Identity, NewAnnouncement, NewCourse,
    NewRegistration, NewResult, Priority, ProfileUpdate, Registration, RegistrationStatus,
    ResultPatch, Role,
};
use crate::core::session::SessionStore;
use crate::core::store::AcademicStore;
use crate::info;
use chrono::Utc;
use std::fmt;

/// Why a workflow was refused
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PortalError {
    /// Nobody is signed in
    NotSignedIn,
    /// The signed-in identity has the wrong role
    Forbidden {
        /// Role the workflow needs
        required: Role,
        /// Role of the signed-in identity
        actual: Role,
    },
    /// The student already has a registration for this course
    AlreadyRegistered {
        /// Course id
        course_id: String,
        /// Status of the existing registration
        status: RegistrationStatus,
    },
    /// No course with this id exists
    UnknownCourse(String),
}

impl fmt::Display for PortalError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::NotSignedIn => write!(f, "not signed in"),
            Self::Forbidden { required, actual } => {
                write!(f, "this action needs a {required} account (signed in as {actual})")
            }
            Self::AlreadyRegistered { course_id, status } => {
                write!(f, "already registered for course {course_id} ({status})")
            }
            Self::UnknownCourse(id) => write!(f, "unknown course: {id}"),
        }
    }
}

impl std::error::Error for PortalError {}

/// Both stores plus configuration
#[derive(Debug)]
pub struct Portal {
    /// Who is signed in
    pub session: SessionStore,
    /// Courses, results, registrations and announcements
    pub data: AcademicStore,
    config: Config,
}

impl Portal {
    /// Portal seeded with the demo roster and fixtures
    #[must_use]
    pub fn new(config: Config) -> Self {
        let session = SessionStore::with_demo_roster(config.login_delay());
        Self {
            session,
            data: AcademicStore::seeded(),
            config,
        }
    }

    /// Portal over caller-supplied stores
    #[must_use]
    pub const fn with_stores(config: Config, session: SessionStore, data: AcademicStore) -> Self {
        Self {
            session,
            data,
            config,
        }
    }

    /// Configuration this portal was built with
    #[must_use]
    pub const fn config(&self) -> &Config {
        &self.config
    }

    /// Sign in. See [`SessionStore::authenticate`].
    pub fn login(&mut self, email: &str, password: &str) -> bool {
        self.session.authenticate(email, password)
    }

    /// Sign out
    pub fn logout(&mut self) {
        self.session.clear_session();
    }

    /// Edit the signed-in profile. No-op when signed out.
    pub fn update_profile(&mut self, update: &ProfileUpdate) {
        self.session.update_current_identity(update);
    }

    /// The signed-in identity
    ///
    /// # Errors
    /// [`PortalError::NotSignedIn`] when nobody is signed in.
    pub fn current(&self) -> Result<&Identity, PortalError> {
        self.session.current().ok_or(PortalError::NotSignedIn)
    }

    fn require(&self, role: Role) -> Result<&Identity, PortalError> {
        let identity = self.current()?;
        if identity.role() == role {
            Ok(identity)
        } else {
            Err(PortalError::Forbidden {
                required: role,
                actual: identity.role(),
            })
        }
    }

    fn require_student_id(&self) -> Result<String, PortalError> {
        let identity = self.require(Role::Student)?;
        // Student variant always carries a student number
        Ok(identity.student_id().unwrap_or_default().to_string())
    }

    // --- Student workflows ---

    /// Submit a pending registration for the signed-in student, for the
    /// configured registration term.
    ///
    /// # Errors
    /// Not signed in, not a student, unknown course, or the student
    /// already has a registration for this course.
    pub fn register_current_student(&mut self, course_id: &str) -> Result<Registration, PortalError> {
        let student_id = self.require_student_id()?;
        if self.data.course(course_id).is_none() {
            return Err(PortalError::UnknownCourse(course_id.to_string()));
        }
        if let Some(status) =
            metrics::registration_status_for(self.data.registrations(), &student_id, course_id)
        {
            return Err(PortalError::AlreadyRegistered {
                course_id: course_id.to_string(),
                status,
            });
        }

        let term = self.config.portal.registration_term.clone();
        Ok(self.data.add_registration(NewRegistration::pending(
            student_id,
            course_id.to_string(),
            term,
        )))
    }

    /// Results of the signed-in student
    ///
    /// # Errors
    /// Not signed in or not a student.
    pub fn my_results(&self) -> Result<Vec<&CourseResult>, PortalError> {
        let student_id = self.require_student_id()?;
        Ok(metrics::results_for_student(self.data.results(), &student_id))
    }

    /// Registrations of the signed-in student
    ///
    /// # Errors
    /// Not signed in or not a student.
    pub fn my_registrations(&self) -> Result<Vec<&Registration>, PortalError> {
        let student_id = self.require_student_id()?;
        Ok(metrics::registrations_for_student(
            self.data.registrations(),
            &student_id,
        ))
    }

    /// Dashboard numbers for the signed-in student
    ///
    /// # Errors
    /// Not signed in or not a student.
    pub fn student_stats(&self) -> Result<StudentStats, PortalError> {
        let student_id = self.require_student_id()?;
        Ok(StudentStats::for_student(&self.data, &student_id))
    }

    /// Simulated results download: succeeds without producing a file.
    ///
    /// # Errors
    /// Not signed in or not a student.
    pub fn download_results(&self) -> Result<(), PortalError> {
        let student_id = self.require_student_id()?;
        info!("results download requested for {student_id} (simulated)");
        Ok(())
    }

    // --- Admin workflows ---

    /// Add a course to the catalog
    ///
    /// # Errors
    /// Not signed in or not an admin.
    pub fn add_course(&mut self, fields: NewCourse) -> Result<Course, PortalError> {
        self.require(Role::Admin)?;
        Ok(self.data.add_course(fields))
    }

    /// Edit a course. Returns whether it existed.
    ///
    /// # Errors
    /// Not signed in or not an admin.
    pub fn edit_course(&mut self, id: &str, patch: &CoursePatch) -> Result<bool, PortalError> {
        self.require(Role::Admin)?;
        Ok(self.data.update_course(id, patch))
    }

    /// Delete a course without touching results or registrations that
    /// point at it. Returns whether it existed.
    ///
    /// # Errors
    /// Not signed in or not an admin.
    pub fn remove_course(&mut self, id: &str) -> Result<bool, PortalError> {
        self.require(Role::Admin)?;
        Ok(self.data.delete_course(id))
    }

    /// Record a result with `gpa` taken from the grade table
    ///
    /// # Errors
    /// Not signed in or not an admin.
    pub fn record_result(&mut self, draft: NewResult) -> Result<CourseResult, PortalError> {
        self.require(Role::Admin)?;
        let graded = NewResult::graded(
            draft.student_id,
            draft.course_id,
            draft.semester,
            draft.grade,
            draft.score,
        );
        Ok(self.data.add_result(graded))
    }

    /// Replace a result's fields, re-deriving `gpa` from the grade.
    /// Returns whether the result existed.
    ///
    /// # Errors
    /// Not signed in or not an admin.
    pub fn revise_result(&mut self, id: &str, draft: NewResult) -> Result<bool, PortalError> {
        self.require(Role::Admin)?;
        let graded = NewResult::graded(
            draft.student_id,
            draft.course_id,
            draft.semester,
            draft.grade,
            draft.score,
        );
        Ok(self.data.update_result(id, &ResultPatch::from(graded)))
    }

    /// Approve or reject a registration. Returns whether it existed.
    ///
    /// # Errors
    /// Not signed in or not an admin.
    pub fn decide_registration(
        &mut self,
        id: &str,
        status: RegistrationStatus,
    ) -> Result<bool, PortalError> {
        self.require(Role::Admin)?;
        Ok(self.data.update_registration_status(id, status))
    }

    /// Post an announcement dated today and signed by the current admin
    ///
    /// # Errors
    /// Not signed in or not an admin.
    pub fn post_announcement(
        &mut self,
        title: String,
        content: String,
        priority: Priority,
    ) -> Result<Announcement, PortalError> {
        let identity = self.require(Role::Admin)?;
        let author = if identity.name().is_empty() {
            self.config.portal.fallback_author.clone()
        } else {
            identity.name().to_string()
        };
        Ok(self.data.add_announcement(NewAnnouncement {
            title,
            content,
            date: Utc::now().date_naive(),
            author,
            priority,
        }))
    }

    /// Dashboard numbers for admins
    ///
    /// # Errors
    /// Not signed in or not an admin.
    pub fn admin_stats(&self) -> Result<AdminStats, PortalError> {
        self.require(Role::Admin)?;
        Ok(AdminStats::from_store(&self.data))
    }
}

impl Default for Portal {
    fn default() -> Self {
        Self::new(Config::from_defaults())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn portal() -> Portal {
        let mut config = Config::from_defaults();
        config.auth.login_delay_ms = Some(0);
        Portal::new(config)
    }

    #[test]
    fn test_register_requires_student() {
        let mut p = portal();
        assert_eq!(
            p.register_current_student("1").unwrap_err(),
            PortalError::NotSignedIn
        );

        assert!(p.login("admin@university.edu", "admin123"));
        assert_eq!(
            p.register_current_student("1").unwrap_err(),
            PortalError::Forbidden {
                required: Role::Student,
                actual: Role::Admin
            }
        );
    }

    #[test]
    fn test_register_creates_pending_for_term() {
        let mut p = portal();
        assert!(p.login("jane@student.edu", "student123"));

        let reg = p.register_current_student("1").unwrap();
        assert_eq!(reg.student_id, "STU2024002");
        assert_eq!(reg.status, RegistrationStatus::Pending);
        assert_eq!(reg.semester, "Spring 2025");
        assert_eq!(p.data.registrations().len(), 3);
    }

    #[test]
    fn test_register_twice_rejected() {
        let mut p = portal();
        assert!(p.login("john@student.edu", "student123"));

        let err = p.register_current_student("1").unwrap_err();
        assert_eq!(
            err,
            PortalError::AlreadyRegistered {
                course_id: "1".to_string(),
                status: RegistrationStatus::Approved
            }
        );
        assert_eq!(
            p.register_current_student("99").unwrap_err(),
            PortalError::UnknownCourse("99".to_string())
        );
    }

    #[test]
    fn test_record_result_derives_gpa() {
        let mut p = portal();
        assert!(p.login("admin@university.edu", "admin123"));

        let draft = NewResult {
            student_id: "STU2024002".to_string(),
            course_id: "4".to_string(),
            semester: "Spring 2025".to_string(),
            grade: "B-".to_string(),
            score: 80,
            gpa: 99.0,
        };
        let stored = p.record_result(draft).unwrap();
        assert!((stored.gpa - 2.7).abs() < f64::EPSILON);
    }

    #[test]
    fn test_revise_result_rederives_gpa() {
        let mut p = portal();
        assert!(p.login("admin@university.edu", "admin123"));

        let draft = NewResult {
            student_id: "STU2024001".to_string(),
            course_id: "2".to_string(),
            semester: "Fall 2024".to_string(),
            grade: "B+".to_string(),
            score: 87,
            gpa: 0.0,
        };
        assert!(p.revise_result("2", draft.clone()).unwrap());
        assert!(p.data.result("2").unwrap().gpa_matches_grade());
        assert!(!p.revise_result("missing", draft).unwrap());
    }

    #[test]
    fn test_post_announcement_signed_by_admin() {
        let mut p = portal();
        assert!(p.login("admin@university.edu", "admin123"));

        let posted = p
            .post_announcement(
                "Holiday".to_string(),
                "Campus closed Monday.".to_string(),
                Priority::Low,
            )
            .unwrap();
        assert_eq!(posted.author, "Admin User");
        assert_eq!(posted.date, Utc::now().date_naive());
        assert_eq!(p.data.announcements()[0].id, posted.id);
    }

    #[test]
    fn test_student_cannot_manage_courses_through_workflows() {
        let mut p = portal();
        assert!(p.login("john@student.edu", "student123"));
        assert!(p.admin_stats().is_err());
        assert!(p
            .decide_registration("2", RegistrationStatus::Approved)
            .is_err());

        // the raw store stays unguarded
        p.data.add_course(NewCourse {
            code: "ART100".to_string(),
            name: "Drawing".to_string(),
            department: "Arts".to_string(),
            credits: 2,
            semester: 1,
            instructor: "Dr. Vinci".to_string(),
        });
        assert_eq!(p.data.courses().len(), 5);
    }

    #[test]
    fn test_admin_course_workflows() {
        let mut p = portal();
        let art = NewCourse {
            code: "ART100".to_string(),
            name: "Drawing".to_string(),
            department: "Arts".to_string(),
            credits: 2,
            semester: 1,
            instructor: "Dr. Vinci".to_string(),
        };
        assert_eq!(p.add_course(art.clone()).unwrap_err(), PortalError::NotSignedIn);

        assert!(p.login("admin@university.edu", "admin123"));
        let added = p.add_course(art).unwrap();
        let patch = CoursePatch {
            credits: Some(3),
            ..CoursePatch::default()
        };
        assert!(p.edit_course(&added.id, &patch).unwrap());
        assert_eq!(p.data.course(&added.id).unwrap().credits, 3);
        assert!(p.remove_course(&added.id).unwrap());
        assert!(!p.remove_course(&added.id).unwrap());
    }

    #[test]
    fn test_error_messages() {
        assert_eq!(PortalError::NotSignedIn.to_string(), "not signed in");
        assert_eq!(
            PortalError::UnknownCourse("7".to_string()).to_string(),
            "unknown course: 7"
        );
    }
}
