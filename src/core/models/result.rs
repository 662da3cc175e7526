//! Course result model

use crate::core::grades::grade_to_gpa;
use serde::{Deserialize, Serialize};

/// A graded result for one student in one course.
///
/// `gpa` is stored, not derived: it is whatever the writer put there.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CourseResult {
    /// Identifier assigned on creation
    pub id: String,
    /// Student number (soft reference)
    pub student_id: String,
    /// Course id (soft reference)
    pub course_id: String,
    /// Free-text semester label (e.g., "Fall 2024")
    pub semester: String,
    /// Letter grade
    pub grade: String,
    /// Numeric score, nominally 0-100
    pub score: u32,
    /// Grade points frozen at write time
    pub gpa: f64,
}

/// Fields for a result that has not been assigned an id yet
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NewResult {
    /// Student number
    pub student_id: String,
    /// Course id
    pub course_id: String,
    /// Semester label
    pub semester: String,
    /// Letter grade
    pub grade: String,
    /// Numeric score
    pub score: u32,
    /// Grade points as supplied by the caller
    pub gpa: f64,
}

/// Partial result update
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ResultPatch {
    /// New student number
    pub student_id: Option<String>,
    /// New course id
    pub course_id: Option<String>,
    /// New semester label
    pub semester: Option<String>,
    /// New letter grade; does not touch `gpa`
    pub grade: Option<String>,
    /// New score
    pub score: Option<u32>,
    /// New grade points
    pub gpa: Option<f64>,
}

impl NewResult {
    /// Build a result whose `gpa` comes from the grade table.
    #[must_use]
    pub fn graded(
        student_id: String,
        course_id: String,
        semester: String,
        grade: String,
        score: u32,
    ) -> Self {
        let gpa = grade_to_gpa(&grade);
        Self {
            student_id,
            course_id,
            semester,
            grade,
            score,
            gpa,
        }
    }

    /// Attach an id and produce the stored record
    #[must_use]
    pub fn with_id(self, id: String) -> CourseResult {
        CourseResult {
            id,
            student_id: self.student_id,
            course_id: self.course_id,
            semester: self.semester,
            grade: self.grade,
            score: self.score,
            gpa: self.gpa,
        }
    }
}

impl From<NewResult> for ResultPatch {
    /// Full replacement patch, used when an edited form is resubmitted
    fn from(draft: NewResult) -> Self {
        Self {
            student_id: Some(draft.student_id),
            course_id: Some(draft.course_id),
            semester: Some(draft.semester),
            grade: Some(draft.grade),
            score: Some(draft.score),
            gpa: Some(draft.gpa),
        }
    }
}

impl CourseResult {
    /// Merge a patch into this result
    pub fn apply(&mut self, patch: &ResultPatch) {
        if let Some(student_id) = &patch.student_id {
            self.student_id.clone_from(student_id);
        }
        if let Some(course_id) = &patch.course_id {
            self.course_id.clone_from(course_id);
        }
        if let Some(semester) = &patch.semester {
            self.semester.clone_from(semester);
        }
        if let Some(grade) = &patch.grade {
            self.grade.clone_from(grade);
        }
        if let Some(score) = patch.score {
            self.score = score;
        }
        if let Some(gpa) = patch.gpa {
            self.gpa = gpa;
        }
    }

    /// Whether the stored `gpa` still matches the grade table
    #[must_use]
    pub fn gpa_matches_grade(&self) -> bool {
        (grade_to_gpa(&self.grade) - self.gpa).abs() < 1e-9
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_graded_derives_gpa() {
        let draft = NewResult::graded(
            "STU2024001".to_string(),
            "1".to_string(),
            "Fall 2024".to_string(),
            "B+".to_string(),
            87,
        );
        assert!((draft.gpa - 3.3).abs() < f64::EPSILON);
    }

    #[test]
    fn test_grade_patch_leaves_gpa_frozen() {
        let mut result = NewResult::graded(
            "STU2024001".to_string(),
            "1".to_string(),
            "Fall 2024".to_string(),
            "A".to_string(),
            95,
        )
        .with_id("9".to_string());

        result.apply(&ResultPatch {
            grade: Some("C".to_string()),
            ..ResultPatch::default()
        });

        assert_eq!(result.grade, "C");
        assert!((result.gpa - 4.0).abs() < f64::EPSILON);
        assert!(!result.gpa_matches_grade());
    }

    #[test]
    fn test_full_patch_from_draft() {
        let mut result = NewResult::graded(
            "STU2024002".to_string(),
            "3".to_string(),
            "Fall 2024".to_string(),
            "A-".to_string(),
            90,
        )
        .with_id("3".to_string());

        let redo = NewResult::graded(
            "STU2024002".to_string(),
            "3".to_string(),
            "Fall 2024".to_string(),
            "B".to_string(),
            82,
        );
        result.apply(&ResultPatch::from(redo));

        assert_eq!(result.id, "3");
        assert_eq!(result.score, 82);
        assert!(result.gpa_matches_grade());
    }
}
