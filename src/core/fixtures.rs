//! Seed data every portal starts from

use crate::core::models::{
    AdminProfile, Announcement, Course, CourseResult, Identity, Priority, Registration,
    RegistrationStatus, StudentProfile,
};
use chrono::NaiveDate;

/// One roster line: credentials plus the identity they unlock
#[derive(Debug, Clone)]
pub struct RosterEntry {
    /// Sign-in email
    pub email: String,
    pub(crate) password: String,
    /// Identity handed to the session on a match
    pub identity: Identity,
}

impl RosterEntry {
    /// Create a roster entry
    #[must_use]
    pub const fn new(email: String, password: String, identity: Identity) -> Self {
        Self {
            email,
            password,
            identity,
        }
    }

    /// Exact, case-sensitive credential match
    #[must_use]
    pub fn matches(&self, email: &str, password: &str) -> bool {
        self.email == email && self.password == password
    }
}

/// The demo roster: one admin and two students
#[must_use]
pub fn demo_roster() -> Vec<RosterEntry> {
    vec![
        RosterEntry::new(
            "admin@university.edu".to_string(),
            "admin123".to_string(),
            Identity::Admin(AdminProfile {
                id: "1".to_string(),
                name: "Admin User".to_string(),
                email: "admin@university.edu".to_string(),
            }),
        ),
        RosterEntry::new(
            "john@student.edu".to_string(),
            "student123".to_string(),
            Identity::Student(StudentProfile {
                id: "2".to_string(),
                name: "John Doe".to_string(),
                email: "john@student.edu".to_string(),
                student_id: "STU2024001".to_string(),
                department: "Computer Science".to_string(),
                semester: 6,
            }),
        ),
        RosterEntry::new(
            "jane@student.edu".to_string(),
            "student123".to_string(),
            Identity::Student(StudentProfile {
                id: "3".to_string(),
                name: "Jane Smith".to_string(),
                email: "jane@student.edu".to_string(),
                student_id: "STU2024002".to_string(),
                department: "Engineering".to_string(),
                semester: 4,
            }),
        ),
    ]
}

fn course(
    id: &str,
    code: &str,
    name: &str,
    department: &str,
    credits: u32,
    semester: u32,
    instructor: &str,
) -> Course {
    Course {
        id: id.to_string(),
        code: code.to_string(),
        name: name.to_string(),
        department: department.to_string(),
        credits,
        semester,
        instructor: instructor.to_string(),
    }
}

/// Seeded course catalog
#[must_use]
pub fn seed_courses() -> Vec<Course> {
    vec![
        course(
            "1",
            "CS101",
            "Introduction to Programming",
            "Computer Science",
            3,
            1,
            "Dr. Smith",
        ),
        course(
            "2",
            "CS201",
            "Data Structures",
            "Computer Science",
            4,
            3,
            "Dr. Johnson",
        ),
        course(
            "3",
            "MATH101",
            "Calculus I",
            "Mathematics",
            3,
            1,
            "Dr. Williams",
        ),
        course(
            "4",
            "ENG101",
            "Thermodynamics",
            "Engineering",
            4,
            4,
            "Dr. Brown",
        ),
    ]
}

fn result(
    id: &str,
    student_id: &str,
    course_id: &str,
    grade: &str,
    score: u32,
    gpa: f64,
) -> CourseResult {
    CourseResult {
        id: id.to_string(),
        student_id: student_id.to_string(),
        course_id: course_id.to_string(),
        semester: "Fall 2024".to_string(),
        grade: grade.to_string(),
        score,
        gpa,
    }
}

/// Seeded results. Stored verbatim: the B+ row carries 3.5, not the table's 3.3.
#[must_use]
pub fn seed_results() -> Vec<CourseResult> {
    vec![
        result("1", "STU2024001", "1", "A", 95, 4.0),
        result("2", "STU2024001", "2", "B+", 87, 3.5),
        result("3", "STU2024002", "3", "A-", 90, 3.7),
    ]
}

/// Seeded registrations
#[must_use]
pub fn seed_registrations() -> Vec<Registration> {
    vec![
        Registration {
            id: "1".to_string(),
            student_id: "STU2024001".to_string(),
            course_id: "1".to_string(),
            semester: "Spring 2025".to_string(),
            status: RegistrationStatus::Approved,
        },
        Registration {
            id: "2".to_string(),
            student_id: "STU2024002".to_string(),
            course_id: "4".to_string(),
            semester: "Spring 2025".to_string(),
            status: RegistrationStatus::Pending,
        },
    ]
}

/// Seeded announcements, newest first
#[must_use]
pub fn seed_announcements() -> Vec<Announcement> {
    vec![
        Announcement {
            id: "1".to_string(),
            title: "Course Registration Open".to_string(),
            content: "Course registration for Spring 2025 semester is now open. Please register before the deadline.".to_string(),
            date: NaiveDate::from_ymd_opt(2025, 1, 15).unwrap_or_default(),
            author: "Academic Office".to_string(),
            priority: Priority::High,
        },
        Announcement {
            id: "2".to_string(),
            title: "Exam Schedule Released".to_string(),
            content: "The examination schedule for Fall 2024 has been published. Check your portal for details.".to_string(),
            date: NaiveDate::from_ymd_opt(2025, 1, 10).unwrap_or_default(),
            author: "Examination Department".to_string(),
            priority: Priority::Medium,
        },
    ]
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::models::Role;

    #[test]
    fn test_roster_shape() {
        let roster = demo_roster();
        assert_eq!(roster.len(), 3);
        assert_eq!(
            roster.iter().filter(|e| e.identity.role() == Role::Admin).count(),
            1
        );
        assert!(roster[0].matches("admin@university.edu", "admin123"));
        assert!(!roster[0].matches("Admin@University.edu", "admin123"));
    }

    #[test]
    fn test_seed_dates_are_valid() {
        let announcements = seed_announcements();
        assert_eq!(announcements[0].date.to_string(), "2025-01-15");
        assert!(announcements[0].date > announcements[1].date);
    }

    #[test]
    fn test_seed_ids_unique_per_collection() {
        let courses = seed_courses();
        let mut ids: Vec<&str> = courses.iter().map(|c| c.id.as_str()).collect();
        ids.dedup();
        assert_eq!(ids.len(), courses.len());
    }
}
