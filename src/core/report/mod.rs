//! Plain-text views rendered from store snapshots
//!
//! Each view is an askama template under `templates/`. Rows are formatted
//! here so the templates only lay them out.

use crate::core::metrics::{self, AdminStats, StudentStats, ALL_SEMESTERS};
use crate::core::models::{CourseResult, StudentProfile};
use crate::core::store::AcademicStore;
use askama::Template;

/// How many rows the dashboard activity panels show
pub const RECENT_LIMIT: usize = 5;

/// Admin overview: counters, latest registrations, department spread
#[derive(Template)]
#[template(path = "admin_dashboard.txt")]
pub struct AdminDashboard {
    /// Headline counters
    pub stats: AdminStats,
    /// Average GPA, two decimals
    pub average_gpa: String,
    /// One line per registration, at most [`RECENT_LIMIT`]
    pub recent: Vec<String>,
    /// One line per department
    pub departments: Vec<String>,
}

impl AdminDashboard {
    /// Build the admin view from a store snapshot
    #[must_use]
    pub fn from_store(store: &AcademicStore) -> Self {
        let stats = AdminStats::from_store(store);

        let recent = store
            .registrations()
            .iter()
            .take(RECENT_LIMIT)
            .map(|reg| {
                format!(
                    "{:<32} Student ID: {:<12} [{}]",
                    store.course_name_or_unknown(&reg.course_id),
                    reg.student_id,
                    reg.status
                )
            })
            .collect();

        let total = store.courses().len();
        let departments = metrics::department_distribution(store.courses())
            .iter()
            .map(|d| {
                format!(
                    "{:<24} {} courses ({:.0}%)",
                    d.department,
                    d.count,
                    d.percent_of(total)
                )
            })
            .collect();

        Self {
            average_gpa: metrics::format_gpa(stats.average_gpa),
            stats,
            recent,
            departments,
        }
    }
}

/// Student home: counters, latest results, own registrations
#[derive(Template)]
#[template(path = "student_dashboard.txt")]
pub struct StudentDashboard {
    /// Display name
    pub name: String,
    /// Student number
    pub student_id: String,
    /// Department
    pub department: String,
    /// Current semester
    pub semester: u32,
    /// Headline counters
    pub stats: StudentStats,
    /// GPA across all results, two decimals
    pub current_gpa: String,
    /// Latest results, at most [`RECENT_LIMIT`]
    pub recent_results: Vec<String>,
    /// Every registration of this student
    pub registrations: Vec<String>,
}

impl StudentDashboard {
    /// Build the dashboard for one student
    #[must_use]
    pub fn for_student(store: &AcademicStore, profile: &StudentProfile) -> Self {
        let stats = StudentStats::for_student(store, &profile.student_id);

        let recent_results = metrics::results_for_student(store.results(), &profile.student_id)
            .into_iter()
            .take(RECENT_LIMIT)
            .map(|r| {
                format!(
                    "{:<10} {:<12} {:<3} GPA: {}",
                    store.course_code_or_na(&r.course_id),
                    r.semester,
                    r.grade,
                    r.gpa
                )
            })
            .collect();

        let registrations =
            metrics::registrations_for_student(store.registrations(), &profile.student_id)
                .into_iter()
                .map(|reg| {
                    format!(
                        "{:<10} {:<32} [{}]",
                        store.course_code_or_na(&reg.course_id),
                        store.course_name_or_na(&reg.course_id),
                        reg.status
                    )
                })
                .collect();

        Self {
            name: profile.name.clone(),
            student_id: profile.student_id.clone(),
            department: profile.department.clone(),
            semester: profile.semester,
            current_gpa: metrics::format_gpa(stats.current_gpa),
            stats,
            recent_results,
            registrations,
        }
    }
}

/// A student's results, optionally narrowed to one semester
///
/// The summary figures other than the semester GPA always cover every
/// result of the student.
#[derive(Template)]
#[template(path = "results.txt")]
pub struct ResultsView {
    /// Semester label shown, or "all"
    pub semester: String,
    /// Semester labels the student has results in, first-seen order
    pub semesters: Vec<String>,
    /// One line per shown result
    pub rows: Vec<String>,
    /// Mean GPA across all results, two decimals
    pub overall_gpa: String,
    /// Mean GPA of the shown rows; only set when a semester is picked
    pub semester_gpa: Option<String>,
    /// Credits of the courses behind all results
    pub total_credits: u32,
}

impl ResultsView {
    /// Build the view for `student_id`. Pass [`ALL_SEMESTERS`] for no filter.
    #[must_use]
    pub fn for_student(store: &AcademicStore, student_id: &str, semester: &str) -> Self {
        let semester = if semester.is_empty() {
            ALL_SEMESTERS
        } else {
            semester
        };
        let own = metrics::results_for_student(store.results(), student_id);
        let shown: Vec<&CourseResult> = metrics::filter_by_semester(&own, semester);

        let rows = shown
            .iter()
            .map(|r| {
                format!(
                    "{:<10} {:<32} {:<12} {:<3} {:>3} {:.2}",
                    store.course_code_or_na(&r.course_id),
                    store.course_name_or_na(&r.course_id),
                    r.semester,
                    r.grade,
                    r.score,
                    r.gpa
                )
            })
            .collect();

        let semester_gpa = (semester != ALL_SEMESTERS)
            .then(|| metrics::format_gpa(metrics::semester_gpa(&own, semester)));

        Self {
            semester: semester.to_string(),
            semesters: metrics::semesters(&own)
                .into_iter()
                .map(str::to_string)
                .collect(),
            overall_gpa: metrics::format_gpa(metrics::average_gpa(own.iter().copied())),
            semester_gpa,
            total_credits: metrics::total_credits(&own, store.courses()),
            rows,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::fixtures::demo_roster;
    use crate::core::models::NewResult;

    fn john() -> StudentProfile {
        demo_roster()[1]
            .identity
            .as_student()
            .cloned()
            .unwrap()
    }

    #[test]
    fn test_admin_dashboard_renders_counters() {
        let store = AcademicStore::seeded();
        let text = AdminDashboard::from_store(&store).render().unwrap();

        assert!(text.contains("Total Courses            4"));
        assert!(text.contains("Pending Registrations    1"));
        assert!(text.contains("Average GPA              3.73"));
        assert!(text.contains("Computer Science"));
        assert!(text.contains("2 courses (50%)"));
    }

    #[test]
    fn test_admin_dashboard_unknown_course_placeholder() {
        let mut store = AcademicStore::seeded();
        store.delete_course("4");
        let text = AdminDashboard::from_store(&store).render().unwrap();
        assert!(text.contains("Unknown Course"));
    }

    #[test]
    fn test_student_dashboard() {
        let store = AcademicStore::seeded();
        let text = StudentDashboard::for_student(&store, &john())
            .render()
            .unwrap();

        assert!(text.contains("Welcome back, John Doe!"));
        assert!(text.contains("STU2024001 | Computer Science | Semester 6"));
        assert!(text.contains("Current GPA          3.75"));
        assert!(text.contains("GPA: 3.5"));
        assert!(text.contains("[approved]"));
    }

    #[test]
    fn test_results_view_semester_filter() {
        let store = AcademicStore::seeded();

        let all = ResultsView::for_student(&store, "STU2024001", ALL_SEMESTERS);
        assert_eq!(all.rows.len(), 2);
        assert_eq!(all.overall_gpa, "3.75");
        assert_eq!(all.semester_gpa, None);
        assert_eq!(all.total_credits, 7);
        assert!(!all.render().unwrap().contains("Semester GPA"));

        let none = ResultsView::for_student(&store, "STU2024001", "Spring 2025");
        assert!(none.rows.is_empty());
        assert_eq!(none.semester_gpa.as_deref(), Some("0.00"));
        assert!(none.render().unwrap().contains("No results for this semester"));
    }

    #[test]
    fn test_results_view_totals_cover_every_semester() {
        let mut store = AcademicStore::seeded();
        store.add_result(NewResult::graded(
            "STU2024001".to_string(),
            "3".to_string(),
            "Spring 2025".to_string(),
            "B".to_string(),
            84,
        ));

        let spring = ResultsView::for_student(&store, "STU2024001", "Spring 2025");
        assert_eq!(spring.rows.len(), 1);
        assert_eq!(spring.semester_gpa.as_deref(), Some("3.00"));
        assert_eq!(spring.overall_gpa, "3.50");
        assert_eq!(spring.total_credits, 10);
        assert_eq!(spring.semesters, vec!["Fall 2024", "Spring 2025"]);

        let text = spring.render().unwrap();
        assert!(text.contains("Semesters: Fall 2024, Spring 2025"));
        assert!(text.contains("Semester GPA     3.00"));
        assert!(text.contains("Overall GPA      3.50"));
        assert!(text.contains("Total Credits    10"));
        assert!(text.contains(" 3.00"));
    }
}
