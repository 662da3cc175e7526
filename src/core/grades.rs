//! Letter grade to grade-point lookup

/// Letter grades in display order with their grade points.
pub const GRADE_POINTS: [(&str, f64); 10] = [
    ("A", 4.0),
    ("A-", 3.7),
    ("B+", 3.3),
    ("B", 3.0),
    ("B-", 2.7),
    ("C+", 2.3),
    ("C", 2.0),
    ("C-", 1.7),
    ("D", 1.0),
    ("F", 0.0),
];

/// Grade points for a letter grade. Unknown letters map to 0.0.
///
/// Matching is exact: `"a"` and `" A"` are unknown.
#[must_use]
pub fn grade_to_gpa(grade: &str) -> f64 {
    GRADE_POINTS
        .iter()
        .find(|(letter, _)| *letter == grade)
        .map_or(0.0, |(_, points)| *points)
}

/// Whether the letter appears in the table
#[must_use]
pub fn is_known_grade(grade: &str) -> bool {
    GRADE_POINTS.iter().any(|(letter, _)| *letter == grade)
}

/// Letters accepted by the result form, in display order
pub fn grade_letters() -> impl Iterator<Item = &'static str> {
    GRADE_POINTS.iter().map(|(letter, _)| *letter)
}
