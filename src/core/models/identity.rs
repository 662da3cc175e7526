//! Identity model

use serde::{Deserialize, Serialize};
use std::fmt;

/// Closed set of portal roles
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    /// Manages courses, results, registrations and announcements
    Admin,
    /// Registers for courses and views own results
    Student,
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Admin => write!(f, "admin"),
            Self::Student => write!(f, "student"),
        }
    }
}

/// Fields every identity carries
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AdminProfile {
    /// Account identifier
    pub id: String,
    /// Display name
    pub name: String,
    /// Sign-in email
    pub email: String,
}

/// Student account with its academic fields
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StudentProfile {
    /// Account identifier
    pub id: String,
    /// Display name
    pub name: String,
    /// Sign-in email
    pub email: String,
    /// Student number referenced by results and registrations (e.g. "STU2024001")
    pub student_id: String,
    /// Home department
    pub department: String,
    /// Current semester number
    pub semester: u32,
}

/// The authenticated user. Student-only fields exist only on the `Student` variant.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "role", rename_all = "lowercase")]
pub enum Identity {
    /// Administrator account
    Admin(AdminProfile),
    /// Student account
    Student(StudentProfile),
}

/// Partial profile update. `None` leaves the field as is.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ProfileUpdate {
    /// New display name
    pub name: Option<String>,
    /// New email
    pub email: Option<String>,
    /// New department (students only)
    pub department: Option<String>,
    /// New semester (students only)
    pub semester: Option<u32>,
}

impl ProfileUpdate {
    /// True when no field is set
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.name.is_none()
            && self.email.is_none()
            && self.department.is_none()
            && self.semester.is_none()
    }
}

impl Identity {
    /// Account identifier
    #[must_use]
    pub fn id(&self) -> &str {
        match self {
            Self::Admin(p) => &p.id,
            Self::Student(p) => &p.id,
        }
    }

    /// Display name
    #[must_use]
    pub fn name(&self) -> &str {
        match self {
            Self::Admin(p) => &p.name,
            Self::Student(p) => &p.name,
        }
    }

    /// Sign-in email
    #[must_use]
    pub fn email(&self) -> &str {
        match self {
            Self::Admin(p) => &p.email,
            Self::Student(p) => &p.email,
        }
    }

    /// Role tag
    #[must_use]
    pub const fn role(&self) -> Role {
        match self {
            Self::Admin(_) => Role::Admin,
            Self::Student(_) => Role::Student,
        }
    }

    /// Student number, for student identities
    #[must_use]
    pub fn student_id(&self) -> Option<&str> {
        match self {
            Self::Admin(_) => None,
            Self::Student(p) => Some(&p.student_id),
        }
    }

    /// Student profile, for student identities
    #[must_use]
    pub const fn as_student(&self) -> Option<&StudentProfile> {
        match self {
            Self::Admin(_) => None,
            Self::Student(p) => Some(p),
        }
    }

    /// Merge an update into this identity.
    ///
    /// Department and semester are dropped for admins.
    pub fn apply(&mut self, update: &ProfileUpdate) {
        match self {
            Self::Admin(p) => {
                if let Some(name) = &update.name {
                    p.name.clone_from(name);
                }
                if let Some(email) = &update.email {
                    p.email.clone_from(email);
                }
            }
            Self::Student(p) => {
                if let Some(name) = &update.name {
                    p.name.clone_from(name);
                }
                if let Some(email) = &update.email {
                    p.email.clone_from(email);
                }
                if let Some(department) = &update.department {
                    p.department.clone_from(department);
                }
                if let Some(semester) = update.semester {
                    p.semester = semester;
                }
            }
        }
    }
}
