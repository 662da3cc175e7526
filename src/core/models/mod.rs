//! Data models for `UniPortal`

pub mod announcement;
pub mod course;
pub mod identity;
pub mod registration;
pub mod result;

pub use announcement::{Announcement, NewAnnouncement, Priority};
pub use course::{Course, CoursePatch, NewCourse};
pub use identity::{AdminProfile, Identity, ProfileUpdate, Role, StudentProfile};
pub use registration::{NewRegistration, Registration, RegistrationStatus};
pub use result::{CourseResult, NewResult, ResultPatch};
