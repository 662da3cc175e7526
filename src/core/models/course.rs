//! Course model

use serde::{Deserialize, Serialize};

/// A course in the catalog
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Course {
    /// Identifier assigned on creation, immutable after
    pub id: String,

    /// Course code (e.g., "CS101"); not required to be unique
    pub code: String,

    /// Course name (e.g., "Introduction to Programming")
    pub name: String,

    /// Offering department, compared as a raw string
    pub department: String,

    /// Credit hours
    pub credits: u32,

    /// Recommended semester number
    pub semester: u32,

    /// Instructor name
    pub instructor: String,
}

/// Fields for a course that has not been assigned an id yet
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewCourse {
    /// Course code
    pub code: String,
    /// Course name
    pub name: String,
    /// Offering department
    pub department: String,
    /// Credit hours
    pub credits: u32,
    /// Recommended semester number
    pub semester: u32,
    /// Instructor name
    pub instructor: String,
}

/// Partial course update. `None` leaves the field as is; the id is never patched.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CoursePatch {
    /// New code
    pub code: Option<String>,
    /// New name
    pub name: Option<String>,
    /// New department
    pub department: Option<String>,
    /// New credit hours
    pub credits: Option<u32>,
    /// New semester number
    pub semester: Option<u32>,
    /// New instructor
    pub instructor: Option<String>,
}

impl NewCourse {
    /// Attach an id and produce the stored record
    #[must_use]
    pub fn with_id(self, id: String) -> Course {
        Course {
            id,
            code: self.code,
            name: self.name,
            department: self.department,
            credits: self.credits,
            semester: self.semester,
            instructor: self.instructor,
        }
    }
}

impl Course {
    /// Merge a patch into this course
    pub fn apply(&mut self, patch: &CoursePatch) {
        if let Some(code) = &patch.code {
            self.code.clone_from(code);
        }
        if let Some(name) = &patch.name {
            self.name.clone_from(name);
        }
        if let Some(department) = &patch.department {
            self.department.clone_from(department);
        }
        if let Some(credits) = patch.credits {
            self.credits = credits;
        }
        if let Some(semester) = patch.semester {
            self.semester = semester;
        }
        if let Some(instructor) = &patch.instructor {
            self.instructor.clone_from(instructor);
        }
    }

    /// Label used in listings, e.g. "CS101 - Introduction to Programming"
    #[must_use]
    pub fn label(&self) -> String {
        format!("{} - {}", self.code, self.name)
    }
}
