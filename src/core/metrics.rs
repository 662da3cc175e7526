//! Derived metrics over store snapshots
//!
//! Everything here is a pure function of the slices it is given. String
//! comparisons are raw: no trimming or case folding except in the free-text
//! searches, which lower-case both sides.

use crate::core::models::{Course, CourseResult, Registration, RegistrationStatus};
use crate::core::store::AcademicStore;

/// Semester filter value that selects every result
pub const ALL_SEMESTERS: &str = "all";

/// Mean of the stored `gpa` values. Empty input gives exactly 0.0.
pub fn average_gpa<'a, I>(results: I) -> f64
where
    I: IntoIterator<Item = &'a CourseResult>,
{
    let (sum, count) = results
        .into_iter()
        .fold((0.0_f64, 0_u32), |(sum, count), r| (sum + r.gpa, count + 1));
    if count == 0 {
        0.0
    } else {
        sum / f64::from(count)
    }
}

/// Two-decimal rendering used by every GPA display
#[must_use]
pub fn format_gpa(gpa: f64) -> String {
    format!("{gpa:.2}")
}

/// Mean GPA over results whose semester label equals `semester` exactly.
/// [`ALL_SEMESTERS`] selects every result.
#[must_use]
pub fn semester_gpa(results: &[&CourseResult], semester: &str) -> f64 {
    if semester == ALL_SEMESTERS {
        return average_gpa(results.iter().copied());
    }
    average_gpa(results.iter().copied().filter(|r| r.semester == semester))
}

/// Results whose semester equals `semester`, or all of them for [`ALL_SEMESTERS`]
#[must_use]
pub fn filter_by_semester<'a>(
    results: &[&'a CourseResult],
    semester: &str,
) -> Vec<&'a CourseResult> {
    results
        .iter()
        .copied()
        .filter(|r| semester == ALL_SEMESTERS || r.semester == semester)
        .collect()
}

fn contains_folded(haystack: &str, needle_lower: &str) -> bool {
    haystack.to_lowercase().contains(needle_lower)
}

/// Course fields a free-text search can look at
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CourseField {
    /// Course code, e.g. "CS101"
    Code,
    /// Course name
    Name,
    /// Department string
    Department,
    /// Instructor name
    Instructor,
}

impl CourseField {
    fn value(self, course: &Course) -> &str {
        match self {
            Self::Code => &course.code,
            Self::Name => &course.name,
            Self::Department => &course.department,
            Self::Instructor => &course.instructor,
        }
    }
}

/// Fields searched by [`search_courses`]
pub const DEFAULT_COURSE_SEARCH_FIELDS: &[CourseField] = &[CourseField::Code];

/// Wider whitelist: code, name and department
pub const CATALOG_SEARCH_FIELDS: &[CourseField] = &[
    CourseField::Code,
    CourseField::Name,
    CourseField::Department,
];

/// Courses whose code contains `term`, ignoring case.
/// An empty term matches every course.
#[must_use]
pub fn search_courses<'a>(courses: &'a [Course], term: &str) -> Vec<&'a Course> {
    search_courses_by(courses, term, DEFAULT_COURSE_SEARCH_FIELDS)
}

/// Courses where any of `fields` contains `term`, ignoring case.
/// Plain substring containment; no tokenizing or ranking.
#[must_use]
pub fn search_courses_by<'a>(
    courses: &'a [Course],
    term: &str,
    fields: &[CourseField],
) -> Vec<&'a Course> {
    let needle = term.to_lowercase();
    courses
        .iter()
        .filter(|c| fields.iter().any(|f| contains_folded(f.value(c), &needle)))
        .collect()
}

/// Results whose student number or semester contains `term`, ignoring case
#[must_use]
pub fn search_results<'a>(results: &'a [CourseResult], term: &str) -> Vec<&'a CourseResult> {
    let needle = term.to_lowercase();
    results
        .iter()
        .filter(|r| contains_folded(&r.student_id, &needle) || contains_folded(&r.semester, &needle))
        .collect()
}

/// Registrations whose student number or semester contains `term`, ignoring case
#[must_use]
pub fn search_registrations<'a>(
    registrations: &'a [Registration],
    term: &str,
) -> Vec<&'a Registration> {
    let needle = term.to_lowercase();
    registrations
        .iter()
        .filter(|r| contains_folded(&r.student_id, &needle) || contains_folded(&r.semester, &needle))
        .collect()
}

/// Course count for one department
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DepartmentCount {
    /// Department string as stored
    pub department: String,
    /// Number of courses
    pub count: usize,
}

impl DepartmentCount {
    /// Share of `total` courses, in percent
    #[must_use]
    #[allow(clippy::cast_precision_loss)]
    pub fn percent_of(&self, total: usize) -> f64 {
        if total == 0 {
            0.0
        } else {
            self.count as f64 * 100.0 / total as f64
        }
    }
}

/// Courses grouped by raw department string, in first-seen order
#[must_use]
pub fn department_distribution(courses: &[Course]) -> Vec<DepartmentCount> {
    let mut counts: Vec<DepartmentCount> = Vec::new();
    for course in courses {
        if let Some(entry) = counts.iter_mut().find(|d| d.department == course.department) {
            entry.count += 1;
        } else {
            counts.push(DepartmentCount {
                department: course.department.clone(),
                count: 1,
            });
        }
    }
    counts
}

/// Results belonging to one student number
#[must_use]
pub fn results_for_student<'a>(results: &'a [CourseResult], student_id: &str) -> Vec<&'a CourseResult> {
    results.iter().filter(|r| r.student_id == student_id).collect()
}

/// Registrations belonging to one student number
#[must_use]
pub fn registrations_for_student<'a>(
    registrations: &'a [Registration],
    student_id: &str,
) -> Vec<&'a Registration> {
    registrations
        .iter()
        .filter(|r| r.student_id == student_id)
        .collect()
}

/// Distinct semester labels in first-seen order
#[must_use]
pub fn semesters<'a>(results: &[&'a CourseResult]) -> Vec<&'a str> {
    let mut labels: Vec<&'a str> = Vec::new();
    for r in results {
        if !labels.contains(&r.semester.as_str()) {
            labels.push(&r.semester);
        }
    }
    labels
}

/// Sum of credits of the courses the results point at. Dangling ids add 0.
#[must_use]
pub fn total_credits(results: &[&CourseResult], courses: &[Course]) -> u32 {
    results
        .iter()
        .map(|r| {
            courses
                .iter()
                .find(|c| c.id == r.course_id)
                .map_or(0, |c| c.credits)
        })
        .sum()
}

/// Status of the first registration matching this student and course
#[must_use]
pub fn registration_status_for(
    registrations: &[Registration],
    student_id: &str,
    course_id: &str,
) -> Option<RegistrationStatus> {
    registrations
        .iter()
        .find(|r| r.student_id == student_id && r.course_id == course_id)
        .map(|r| r.status)
}

/// Number of registrations in a given status
pub fn count_by_status<'a, I>(registrations: I, status: RegistrationStatus) -> usize
where
    I: IntoIterator<Item = &'a Registration>,
{
    registrations
        .into_iter()
        .filter(|r| r.status == status)
        .count()
}

/// Headline numbers for the admin dashboard
#[derive(Debug, Clone, PartialEq)]
pub struct AdminStats {
    /// Courses in the catalog
    pub total_courses: usize,
    /// Registrations awaiting a decision
    pub pending_registrations: usize,
    /// Results recorded
    pub results_published: usize,
    /// Mean GPA over every result
    pub average_gpa: f64,
}

impl AdminStats {
    /// Compute from the current store snapshot
    #[must_use]
    pub fn from_store(store: &AcademicStore) -> Self {
        Self {
            total_courses: store.courses().len(),
            pending_registrations: count_by_status(
                store.registrations(),
                RegistrationStatus::Pending,
            ),
            results_published: store.results().len(),
            average_gpa: average_gpa(store.results()),
        }
    }
}

/// Headline numbers for a student dashboard
#[derive(Debug, Clone, PartialEq)]
pub struct StudentStats {
    /// Approved registrations
    pub enrolled_courses: usize,
    /// Results recorded for the student
    pub completed_courses: usize,
    /// Registrations awaiting a decision
    pub pending_registrations: usize,
    /// Mean GPA over the student's results
    pub current_gpa: f64,
    /// Credits of the courses the student has results in
    pub total_credits: u32,
}

impl StudentStats {
    /// Compute for one student number from the current store snapshot
    #[must_use]
    pub fn for_student(store: &AcademicStore, student_id: &str) -> Self {
        let results = results_for_student(store.results(), student_id);
        let registrations = registrations_for_student(store.registrations(), student_id);
        Self {
            enrolled_courses: count_by_status(
                registrations.iter().copied(),
                RegistrationStatus::Approved,
            ),
            completed_courses: results.len(),
            pending_registrations: count_by_status(
                registrations.iter().copied(),
                RegistrationStatus::Pending,
            ),
            current_gpa: average_gpa(results.iter().copied()),
            total_credits: total_credits(&results, store.courses()),
        }
    }
}
