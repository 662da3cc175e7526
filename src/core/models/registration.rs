//! Course registration model

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Registration state. Any state can be set from any state.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RegistrationStatus {
    /// Awaiting an admin decision
    Pending,
    /// Accepted by an admin
    Approved,
    /// Declined by an admin
    Rejected,
}

impl fmt::Display for RegistrationStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Pending => write!(f, "pending"),
            Self::Approved => write!(f, "approved"),
            Self::Rejected => write!(f, "rejected"),
        }
    }
}

impl FromStr for RegistrationStatus {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "pending" => Ok(Self::Pending),
            "approved" | "approve" => Ok(Self::Approved),
            "rejected" | "reject" => Ok(Self::Rejected),
            _ => Err(format!("Unknown registration status: {s}")),
        }
    }
}

/// A student's request to take a course in a given semester
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Registration {
    /// Identifier assigned on creation
    pub id: String,
    /// Student number (soft reference)
    pub student_id: String,
    /// Course id (soft reference)
    pub course_id: String,
    /// Free-text semester label
    pub semester: String,
    /// Current state
    pub status: RegistrationStatus,
}

/// Fields for a registration that has not been assigned an id yet
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewRegistration {
    /// Student number
    pub student_id: String,
    /// Course id
    pub course_id: String,
    /// Semester label
    pub semester: String,
    /// Initial state chosen by the caller
    pub status: RegistrationStatus,
}

impl NewRegistration {
    /// A pending registration, as students submit them
    #[must_use]
    pub const fn pending(student_id: String, course_id: String, semester: String) -> Self {
        Self {
            student_id,
            course_id,
            semester,
            status: RegistrationStatus::Pending,
        }
    }

    /// Attach an id and produce the stored record
    #[must_use]
    pub fn with_id(self, id: String) -> Registration {
        Registration {
            id,
            student_id: self.student_id,
            course_id: self.course_id,
            semester: self.semester,
            status: self.status,
        }
    }
}
