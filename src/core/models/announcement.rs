//! Announcement model

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Announcement urgency
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Priority {
    /// Informational
    Low,
    /// Default for new announcements
    #[default]
    Medium,
    /// Needs attention
    High,
}

impl fmt::Display for Priority {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Low => write!(f, "low"),
            Self::Medium => write!(f, "medium"),
            Self::High => write!(f, "high"),
        }
    }
}

impl FromStr for Priority {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "low" => Ok(Self::Low),
            "medium" | "med" => Ok(Self::Medium),
            "high" => Ok(Self::High),
            _ => Err(format!("Unknown priority: {s}")),
        }
    }
}

/// A notice shown to every user
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Announcement {
    /// Identifier assigned on creation
    pub id: String,
    /// Headline
    pub title: String,
    /// Body text
    pub content: String,
    /// Publication date
    pub date: NaiveDate,
    /// Author display name
    pub author: String,
    /// Urgency
    pub priority: Priority,
}

/// Fields for an announcement that has not been assigned an id yet
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewAnnouncement {
    /// Headline
    pub title: String,
    /// Body text
    pub content: String,
    /// Publication date
    pub date: NaiveDate,
    /// Author display name
    pub author: String,
    /// Urgency
    pub priority: Priority,
}

impl NewAnnouncement {
    /// Attach an id and produce the stored record
    #[must_use]
    pub fn with_id(self, id: String) -> Announcement {
        Announcement {
            id,
            title: self.title,
            content: self.content,
            date: self.date,
            author: self.author,
            priority: self.priority,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_priority_default_is_medium() {
        assert_eq!(Priority::default(), Priority::Medium);
    }

    #[test]
    fn test_priority_parse() {
        assert_eq!("HIGH".parse(), Ok(Priority::High));
        assert_eq!("med".parse(), Ok(Priority::Medium));
        assert!("urgent".parse::<Priority>().is_err());
    }
}
