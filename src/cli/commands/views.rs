//! Read-only listings: courses, announcements, results, registrations, snapshot

use std::fmt::Write;
use uni_portal::core::metrics::{self, CATALOG_SEARCH_FIELDS, DEFAULT_COURSE_SEARCH_FIELDS};
use uni_portal::core::models::{Announcement, Course, CourseResult, Registration};
use uni_portal::core::store::AcademicStore;
use uni_portal::verbose;

fn matching_courses<'a>(
    courses: &'a [Course],
    search: Option<&str>,
    all_fields: bool,
) -> Vec<&'a Course> {
    let fields = if all_fields {
        CATALOG_SEARCH_FIELDS
    } else {
        DEFAULT_COURSE_SEARCH_FIELDS
    };
    metrics::search_courses_by(courses, search.unwrap_or_default(), fields)
}

fn course_row(c: &Course) -> String {
    format!(
        "{:<6} {:<10} {:<32} {:<20} {:>7} {:>4}  {:<20}",
        c.id, c.code, c.name, c.department, c.credits, c.semester, c.instructor
    )
}

fn course_header() -> String {
    format!(
        "{:<6} {:<10} {:<32} {:<20} {:>7} {:>4}  {:<20}",
        "ID", "Code", "Name", "Department", "Credits", "Sem", "Instructor"
    )
}

/// Course table, optionally filtered by a search term
pub fn course_table(courses: &[Course], search: Option<&str>, all_fields: bool) -> String {
    let shown = matching_courses(courses, search, all_fields);

    let mut out = format!("{}\n", course_header().trim_end());
    for c in &shown {
        let _ = writeln!(out, "{}", course_row(c).trim_end());
    }
    if shown.is_empty() {
        out.push_str("No courses found\n");
    }
    out
}

/// Course table with the student's registration status per course
pub fn course_status_table(
    store: &AcademicStore,
    student_id: &str,
    search: Option<&str>,
    all_fields: bool,
) -> String {
    let shown = matching_courses(store.courses(), search, all_fields);

    let mut out = format!("{} Status\n", course_header());
    for c in &shown {
        let status = metrics::registration_status_for(store.registrations(), student_id, &c.id)
            .map_or_else(|| "not registered".to_string(), |s| s.to_string());
        let _ = writeln!(out, "{} {status}", course_row(c));
    }
    if shown.is_empty() {
        out.push_str("No courses found\n");
    }
    out
}

/// Announcements in stored order, newest first
pub fn announcement_list(announcements: &[Announcement]) -> String {
    if announcements.is_empty() {
        return "No announcements\n".to_string();
    }
    let mut out = String::new();
    for a in announcements {
        let _ = writeln!(
            out,
            "[{}] {}  ({}, {})\n    {}\n",
            a.priority, a.title, a.date, a.author, a.content
        );
    }
    out
}

/// Every result with course placeholders for dangling ids
pub fn result_table(store: &AcademicStore, results: &[&CourseResult]) -> String {
    let mut out = format!(
        "{:<14} {:<12} {:<10} {:<12} {:<5} {:>5} {:>4}\n",
        "ID", "Student", "Course", "Semester", "Grade", "Score", "GPA"
    );
    for r in results {
        let _ = writeln!(
            out,
            "{:<14} {:<12} {:<10} {:<12} {:<5} {:>5} {:>4.2}",
            r.id,
            r.student_id,
            store.course_code_or_na(&r.course_id),
            r.semester,
            r.grade,
            r.score,
            r.gpa
        );
    }
    if results.is_empty() {
        out.push_str("No results found\n");
    }
    out
}

/// Registration requests with course placeholders for dangling ids
pub fn registration_table(store: &AcademicStore, registrations: &[&Registration]) -> String {
    let mut out = format!(
        "{:<14} {:<12} {:<32} {:<12} {}\n",
        "ID", "Student", "Course", "Semester", "Status"
    );
    for r in registrations {
        let _ = writeln!(
            out,
            "{:<14} {:<12} {:<32} {:<12} {}",
            r.id,
            r.student_id,
            store.course_name_or_unknown(&r.course_id),
            r.semester,
            r.status
        );
    }
    if registrations.is_empty() {
        out.push_str("No registrations found\n");
    }
    out
}

/// Handle `uniportal courses`
pub fn run_courses(store: &AcademicStore, search: Option<&str>, all_fields: bool) {
    verbose!("Searching {} courses", store.courses().len());
    print!("{}", course_table(store.courses(), search, all_fields));
}

/// Handle `uniportal announcements`
pub fn run_announcements(store: &AcademicStore) {
    print!("{}", announcement_list(store.announcements()));
}

/// Handle `uniportal snapshot`
///
/// # Errors
/// The store could not be serialized.
pub fn run_snapshot(store: &AcademicStore) -> Result<(), String> {
    let text = toml::to_string_pretty(&store.snapshot())
        .map_err(|e| format!("Failed to serialize snapshot: {e}"))?;
    print!("{text}");
    Ok(())
}
