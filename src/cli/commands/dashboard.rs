//! Signed-in views: dashboards and the student results page

use crate::args::Credentials;
use askama::Template;
use uni_portal::core::models::Identity;
use uni_portal::core::report::{AdminDashboard, ResultsView, StudentDashboard};
use uni_portal::{verbose, Portal};

/// Sign in with the given credentials
///
/// # Errors
/// The credentials match no roster entry.
pub fn sign_in(portal: &mut Portal, credentials: &Credentials) -> Result<(), String> {
    verbose!("Signing in as {}", credentials.email);
    if portal.login(&credentials.email, &credentials.password) {
        Ok(())
    } else {
        Err("Invalid email or password".to_string())
    }
}

/// Render the dashboard for whoever is signed in
///
/// # Errors
/// Nobody is signed in, or the template failed to render.
pub fn render_dashboard(portal: &Portal) -> Result<String, String> {
    let rendered = match portal.current().map_err(|e| e.to_string())? {
        Identity::Admin(_) => AdminDashboard::from_store(&portal.data).render(),
        Identity::Student(profile) => StudentDashboard::for_student(&portal.data, profile).render(),
    };
    rendered.map_err(|e| format!("Failed to render dashboard: {e}"))
}

/// Render the results page of the signed-in student
///
/// # Errors
/// Not signed in as a student, or the template failed to render.
pub fn render_results(portal: &Portal, semester: &str) -> Result<String, String> {
    let identity = portal.current().map_err(|e| e.to_string())?;
    let Some(student_id) = identity.student_id() else {
        return Err("Results are only available to student accounts".to_string());
    };
    ResultsView::for_student(&portal.data, student_id, semester)
        .render()
        .map_err(|e| format!("Failed to render results: {e}"))
}

/// Handle `uniportal dashboard`
///
/// # Errors
/// Sign-in or rendering failed.
pub fn run_dashboard(portal: &mut Portal, credentials: &Credentials) -> Result<(), String> {
    sign_in(portal, credentials)?;
    println!("{}", render_dashboard(portal)?);
    Ok(())
}

/// Handle `uniportal results`
///
/// # Errors
/// Sign-in or rendering failed, or the account is not a student.
pub fn run_results(
    portal: &mut Portal,
    credentials: &Credentials,
    semester: &str,
) -> Result<(), String> {
    sign_in(portal, credentials)?;
    println!("{}", render_results(portal, semester)?);
    Ok(())
}
