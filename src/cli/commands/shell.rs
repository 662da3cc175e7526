//! Interactive line-oriented session over one portal
//!
//! Each input line is split shell-style (whitespace, with single or double
//! quotes grouping words) and parsed by clap as one [`ShellCommand`].

use super::dashboard::{render_dashboard, render_results};
use super::views::{
    announcement_list, course_status_table, course_table, registration_table, result_table,
};
use clap::error::ErrorKind;
use clap::{CommandFactory, Parser, Subcommand};
use std::fmt::Write as _;
use std::io::{self, BufRead, Write};
use uni_portal::core::grades::{grade_letters, is_known_grade};
use uni_portal::core::metrics::{self, ALL_SEMESTERS};
use uni_portal::core::models::{
    CoursePatch, Identity, NewCourse, NewResult, Priority, ProfileUpdate, RegistrationStatus,
    Role,
};
use uni_portal::{debug, Portal};

#[derive(Parser, Debug)]
#[command(
    name = "shell",
    no_binary_name = true,
    disable_help_subcommand = true,
    disable_version_flag = true
)]
struct ShellLine {
    #[command(subcommand)]
    command: ShellCommand,
}

#[derive(Subcommand, Debug)]
enum ShellCommand {
    /// Sign in
    Login {
        /// Account email
        email: String,
        /// Account password
        password: String,
    },
    /// Sign out
    Logout,
    /// Show who is signed in
    Whoami,
    /// List courses
    Courses {
        /// Filter by code (or by name and department with --all-fields)
        #[arg(short, long)]
        search: Option<String>,
        /// Search name and department too
        #[arg(long)]
        all_fields: bool,
    },
    /// Add a course (admin)
    AddCourse {
        #[arg(long)]
        code: String,
        #[arg(long)]
        name: String,
        #[arg(long)]
        department: String,
        #[arg(long)]
        credits: u32,
        #[arg(long)]
        semester: u32,
        #[arg(long)]
        instructor: String,
    },
    /// Edit a course (admin)
    EditCourse {
        /// Course id
        id: String,
        #[arg(long)]
        code: Option<String>,
        #[arg(long)]
        name: Option<String>,
        #[arg(long)]
        department: Option<String>,
        #[arg(long)]
        credits: Option<u32>,
        #[arg(long)]
        semester: Option<u32>,
        #[arg(long)]
        instructor: Option<String>,
    },
    /// Delete a course (admin)
    DeleteCourse {
        /// Course id
        id: String,
    },
    /// Own results (student) or every result (admin)
    Results {
        /// Semester label, or `all` (student view)
        #[arg(long)]
        semester: Option<String>,
        /// Filter by student number or semester (admin view)
        #[arg(short, long)]
        search: Option<String>,
    },
    /// Record a result (admin)
    AddResult {
        /// Student number
        #[arg(long)]
        student: String,
        /// Course id
        #[arg(long)]
        course: String,
        #[arg(long)]
        semester: String,
        #[arg(long)]
        grade: String,
        #[arg(long)]
        score: u32,
    },
    /// Revise a result (admin); unspecified fields keep their values
    EditResult {
        /// Result id
        id: String,
        #[arg(long)]
        student: Option<String>,
        #[arg(long)]
        course: Option<String>,
        #[arg(long)]
        semester: Option<String>,
        #[arg(long)]
        grade: Option<String>,
        #[arg(long)]
        score: Option<u32>,
    },
    /// Own registrations (student) or every registration (admin)
    Registrations {
        /// Filter by student number or semester (admin view)
        #[arg(short, long)]
        search: Option<String>,
    },
    /// Request registration for a course (student)
    Register {
        /// Course id
        course_id: String,
    },
    /// Approve a registration (admin)
    Approve {
        /// Registration id
        id: String,
    },
    /// Reject a registration (admin)
    Reject {
        /// Registration id
        id: String,
    },
    /// Post an announcement (admin)
    Announce {
        #[arg(long)]
        title: String,
        #[arg(long)]
        content: String,
        /// low, medium or high
        #[arg(long, default_value_t = Priority::Medium)]
        priority: Priority,
    },
    /// List announcements, newest first
    Announcements,
    /// Show the dashboard for the signed-in account
    Dashboard,
    /// Show the profile, or edit it when any field is given
    Profile {
        #[arg(long)]
        name: Option<String>,
        #[arg(long)]
        email: Option<String>,
        #[arg(long)]
        department: Option<String>,
        #[arg(long)]
        semester: Option<u32>,
    },
    /// Download own results (student, simulated)
    Download,
    /// Show this help
    Help,
    /// Leave the shell
    #[command(alias = "exit")]
    Quit,
}

/// What the shell should do after a line
#[derive(Debug, PartialEq, Eq)]
pub enum Step {
    /// Print this and read the next line
    Output(String),
    /// Stop reading
    Quit,
}

/// Split a line into words. Quotes group words and are removed.
///
/// # Errors
/// A quote is left open.
pub fn split_line(line: &str) -> Result<Vec<String>, String> {
    let mut words = Vec::new();
    let mut current = String::new();
    let mut in_word = false;
    let mut quote: Option<char> = None;

    for ch in line.chars() {
        match quote {
            Some(q) if ch == q => quote = None,
            Some(_) => current.push(ch),
            None if ch == '"' || ch == '\'' => {
                quote = Some(ch);
                in_word = true;
            }
            None if ch.is_whitespace() => {
                if in_word {
                    words.push(std::mem::take(&mut current));
                    in_word = false;
                }
            }
            None => {
                current.push(ch);
                in_word = true;
            }
        }
    }

    if quote.is_some() {
        return Err("Unterminated quote".to_string());
    }
    if in_word {
        words.push(current);
    }
    Ok(words)
}

/// One interactive session
pub struct Shell {
    portal: Portal,
}

impl Shell {
    /// Start a session over this portal
    pub const fn new(portal: Portal) -> Self {
        Self { portal }
    }

    /// The portal behind this session
    #[cfg(test)]
    pub const fn portal(&self) -> &Portal {
        &self.portal
    }

    /// Prompt showing who is signed in
    pub fn prompt(&self) -> String {
        self.portal.session.current().map_or_else(
            || "uniportal> ".to_string(),
            |identity| format!("uniportal ({})> ", identity.email()),
        )
    }

    /// Run one input line
    ///
    /// # Errors
    /// The line does not parse, or the action was refused.
    pub fn execute(&mut self, line: &str) -> Result<Step, String> {
        let words = split_line(line)?;
        if words.is_empty() {
            return Ok(Step::Output(String::new()));
        }
        debug!("shell command: {}", words[0]);
        match ShellLine::try_parse_from(&words) {
            Ok(parsed) => self.dispatch(parsed.command),
            Err(e) if e.kind() == ErrorKind::DisplayHelp => Ok(Step::Output(e.to_string())),
            Err(e) => Err(e.to_string()),
        }
    }

    #[allow(clippy::too_many_lines)]
    fn dispatch(&mut self, command: ShellCommand) -> Result<Step, String> {
        let text = match command {
            ShellCommand::Login { email, password } => {
                if !self.portal.login(&email, &password) {
                    return Err("Invalid email or password".to_string());
                }
                let identity = self.portal.current().map_err(|e| e.to_string())?;
                format!("✓ Signed in as {} ({})", identity.name(), identity.role())
            }
            ShellCommand::Logout => {
                self.portal.logout();
                "✓ Signed out".to_string()
            }
            ShellCommand::Whoami => self.portal.session.current().map_or_else(
                || "Not signed in".to_string(),
                |identity| format!("{} <{}> ({})", identity.name(), identity.email(), identity.role()),
            ),
            ShellCommand::Courses { search, all_fields } => {
                match self.portal.session.current().and_then(Identity::student_id) {
                    Some(student_id) => course_status_table(
                        &self.portal.data,
                        student_id,
                        search.as_deref(),
                        all_fields,
                    ),
                    None => course_table(self.portal.data.courses(), search.as_deref(), all_fields),
                }
            }
            ShellCommand::AddCourse {
                code,
                name,
                department,
                credits,
                semester,
                instructor,
            } => {
                let course = self
                    .portal
                    .add_course(NewCourse {
                        code,
                        name,
                        department,
                        credits,
                        semester,
                        instructor,
                    })
                    .map_err(|e| e.to_string())?;
                format!("✓ Added {} (id {})", course.label(), course.id)
            }
            ShellCommand::EditCourse {
                id,
                code,
                name,
                department,
                credits,
                semester,
                instructor,
            } => {
                let patch = CoursePatch {
                    code,
                    name,
                    department,
                    credits,
                    semester,
                    instructor,
                };
                found(
                    self.portal.edit_course(&id, &patch).map_err(|e| e.to_string())?,
                    format!("✓ Updated course {id}"),
                    format!("No course with id {id}"),
                )?
            }
            ShellCommand::DeleteCourse { id } => found(
                self.portal.remove_course(&id).map_err(|e| e.to_string())?,
                format!("✓ Deleted course {id}"),
                format!("No course with id {id}"),
            )?,
            ShellCommand::Results { semester, search } => self.results(semester, search)?,
            ShellCommand::AddResult {
                student,
                course,
                semester,
                grade,
                score,
            } => {
                check_grade(&grade)?;
                let stored = self
                    .portal
                    .record_result(NewResult::graded(student, course, semester, grade, score))
                    .map_err(|e| e.to_string())?;
                format!(
                    "✓ Recorded {} for {} (GPA {:.2}, id {})",
                    stored.grade, stored.student_id, stored.gpa, stored.id
                )
            }
            ShellCommand::EditResult {
                id,
                student,
                course,
                semester,
                grade,
                score,
            } => {
                let Some(base) = self.portal.data.result(&id).cloned() else {
                    return Err(format!("No result with id {id}"));
                };
                if let Some(g) = &grade {
                    check_grade(g)?;
                }
                let draft = NewResult::graded(
                    student.unwrap_or(base.student_id),
                    course.unwrap_or(base.course_id),
                    semester.unwrap_or(base.semester),
                    grade.unwrap_or(base.grade),
                    score.unwrap_or(base.score),
                );
                found(
                    self.portal.revise_result(&id, draft).map_err(|e| e.to_string())?,
                    format!("✓ Updated result {id}"),
                    format!("No result with id {id}"),
                )?
            }
            ShellCommand::Registrations { search } => self.registrations(search)?,
            ShellCommand::Register { course_id } => {
                let reg = self
                    .portal
                    .register_current_student(&course_id)
                    .map_err(|e| e.to_string())?;
                format!(
                    "✓ Requested {} for {} ({})",
                    self.portal.data.course_code_or_na(&reg.course_id),
                    reg.semester,
                    reg.status
                )
            }
            ShellCommand::Approve { id } => self.decide(&id, RegistrationStatus::Approved)?,
            ShellCommand::Reject { id } => self.decide(&id, RegistrationStatus::Rejected)?,
            ShellCommand::Announce {
                title,
                content,
                priority,
            } => {
                let posted = self
                    .portal
                    .post_announcement(title, content, priority)
                    .map_err(|e| e.to_string())?;
                format!("✓ Posted \"{}\" on {}", posted.title, posted.date)
            }
            ShellCommand::Announcements => announcement_list(self.portal.data.announcements()),
            ShellCommand::Dashboard => render_dashboard(&self.portal)?,
            ShellCommand::Profile {
                name,
                email,
                department,
                semester,
            } => {
                let update = ProfileUpdate {
                    name,
                    email,
                    department,
                    semester,
                };
                if !update.is_empty() {
                    self.portal.current().map_err(|e| e.to_string())?;
                    self.portal.update_profile(&update);
                }
                profile_text(self.portal.current().map_err(|e| e.to_string())?)
            }
            ShellCommand::Download => {
                self.portal.download_results().map_err(|e| e.to_string())?;
                "✓ Results downloaded".to_string()
            }
            ShellCommand::Help => self.help(),
            ShellCommand::Quit => return Ok(Step::Quit),
        };
        Ok(Step::Output(text))
    }

    fn help(&self) -> String {
        let mut out = ShellLine::command().render_help().to_string();
        out.push_str("\nDemo accounts:\n");
        for identity in self.portal.session.roster() {
            let _ = writeln!(out, "  {:<24} {}", identity.email(), identity.role());
        }
        out
    }

    fn results(&self, semester: Option<String>, search: Option<String>) -> Result<String, String> {
        let identity = self.portal.current().map_err(|e| e.to_string())?;
        if identity.role() == Role::Student {
            return render_results(
                &self.portal,
                semester.as_deref().unwrap_or(ALL_SEMESTERS),
            );
        }
        let shown = metrics::search_results(
            self.portal.data.results(),
            search.as_deref().unwrap_or_default(),
        );
        Ok(result_table(&self.portal.data, &shown))
    }

    fn registrations(&self, search: Option<String>) -> Result<String, String> {
        let identity = self.portal.current().map_err(|e| e.to_string())?;
        let shown = if identity.role() == Role::Student {
            self.portal.my_registrations().map_err(|e| e.to_string())?
        } else {
            metrics::search_registrations(
                self.portal.data.registrations(),
                search.as_deref().unwrap_or_default(),
            )
        };
        Ok(registration_table(&self.portal.data, &shown))
    }

    fn decide(&mut self, id: &str, status: RegistrationStatus) -> Result<String, String> {
        found(
            self.portal
                .decide_registration(id, status)
                .map_err(|e| e.to_string())?,
            format!("✓ Registration {id} {status}"),
            format!("No registration with id {id}"),
        )
    }
}

fn found(hit: bool, ok: String, missing: String) -> Result<String, String> {
    if hit {
        Ok(ok)
    } else {
        Err(missing)
    }
}

fn check_grade(grade: &str) -> Result<(), String> {
    if is_known_grade(grade) {
        Ok(())
    } else {
        let known: Vec<&str> = grade_letters().collect();
        Err(format!(
            "Unknown grade '{grade}' (expected one of {})",
            known.join(", ")
        ))
    }
}

fn profile_text(identity: &Identity) -> String {
    let mut out = format!(
        "Name:       {}\nEmail:      {}\nRole:       {}\n",
        identity.name(),
        identity.email(),
        identity.role()
    );
    if let Some(student) = identity.as_student() {
        let _ = write!(
            out,
            "Student ID: {}\nDepartment: {}\nSemester:   {}\n",
            student.student_id, student.department, student.semester
        );
    }
    out
}

/// Handle `uniportal shell`: read commands from stdin until `quit` or EOF
pub fn run(portal: Portal) {
    let mut shell = Shell::new(portal);
    let stdin = io::stdin();
    let mut input = stdin.lock();
    println!("Type `help` for commands, `quit` to leave.");

    loop {
        print!("{}", shell.prompt());
        io::stdout().flush().ok();

        let mut line = String::new();
        match input.read_line(&mut line) {
            Ok(0) => break,
            Ok(_) => {}
            Err(e) => {
                eprintln!("✗ Failed to read input: {e}");
                break;
            }
        }

        match shell.execute(&line) {
            Ok(Step::Quit) => break,
            Ok(Step::Output(text)) if text.is_empty() => {}
            Ok(Step::Output(text)) => println!("{}", text.trim_end()),
            Err(e) => eprintln!("✗ {}", e.trim_end()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use uni_portal::config::Config;

    fn shell() -> Shell {
        let mut config = Config::from_defaults();
        config.auth.login_delay_ms = Some(0);
        Shell::new(Portal::new(config))
    }

    fn output(shell: &mut Shell, line: &str) -> String {
        match shell.execute(line) {
            Ok(Step::Output(text)) => text,
            other => panic!("unexpected outcome for {line:?}: {other:?}"),
        }
    }

    #[test]
    fn test_split_line_quotes() {
        assert_eq!(
            split_line(r#"announce --title "Exam week" --content 'No labs'"#).unwrap(),
            vec!["announce", "--title", "Exam week", "--content", "No labs"]
        );
        assert_eq!(split_line("  ").unwrap(), Vec::<String>::new());
        assert_eq!(split_line(r#"x """#).unwrap(), vec!["x", ""]);
        assert!(split_line("say \"oops").is_err());
    }

    #[test]
    fn test_login_and_whoami() {
        let mut sh = shell();
        assert_eq!(output(&mut sh, "whoami"), "Not signed in");
        assert!(sh.execute("login admin@university.edu wrong").is_err());

        output(&mut sh, "login admin@university.edu admin123");
        assert!(output(&mut sh, "whoami").contains("Admin User"));
        assert!(sh.prompt().contains("admin@university.edu"));
    }

    #[test]
    fn test_student_register_then_admin_approves() {
        let mut sh = shell();
        output(&mut sh, "login jane@student.edu student123");
        assert!(output(&mut sh, "register 1").contains("pending"));
        assert!(sh.execute("register 1").is_err());
        assert!(sh.execute("approve 3").is_err());

        output(&mut sh, "logout");
        output(&mut sh, "login admin@university.edu admin123");
        let id = sh.portal().data.registrations()[2].id.clone();
        assert!(output(&mut sh, &format!("approve {id}")).contains("approved"));
        assert!(sh.execute("reject missing").is_err());
    }

    #[test]
    fn test_add_result_rejects_unknown_grade() {
        let mut sh = shell();
        output(&mut sh, "login admin@university.edu admin123");
        assert!(sh
            .execute("add-result --student STU2024002 --course 1 --semester 'Fall 2024' --grade E --score 50")
            .is_err());
        let text = output(
            &mut sh,
            "add-result --student STU2024002 --course 1 --semester 'Fall 2024' --grade B --score 84",
        );
        assert!(text.contains("GPA 3.00"));
    }

    #[test]
    fn test_edit_result_keeps_unspecified_fields() {
        let mut sh = shell();
        output(&mut sh, "login admin@university.edu admin123");
        output(&mut sh, "edit-result 2 --grade A-");

        let result = sh.portal().data.result("2").unwrap();
        assert_eq!(result.grade, "A-");
        assert_eq!(result.score, 87);
        assert!((result.gpa - 3.7).abs() < f64::EPSILON);
    }

    #[test]
    fn test_profile_update_and_quit() {
        let mut sh = shell();
        output(&mut sh, "login john@student.edu student123");
        let text = output(&mut sh, "profile --department Physics --semester 7");
        assert!(text.contains("Department: Physics"));
        assert!(text.contains("Semester:   7"));
        assert_eq!(sh.execute("exit").unwrap(), Step::Quit);
    }

    #[test]
    fn test_help_lists_commands() {
        let mut sh = shell();
        let text = output(&mut sh, "help");
        assert!(text.contains("add-course"));
        assert!(text.contains("announce"));
        assert!(text.contains("Demo accounts:"));
        assert!(text.contains("jane@student.edu"));
        assert!(!text.contains("student123"));
    }

    #[test]
    fn test_subcommand_help_is_output() {
        let mut sh = shell();
        let text = output(&mut sh, "add-course --help");
        assert!(text.contains("--instructor"));
        assert!(sh.execute("add-course --bogus").is_err());
    }

    #[test]
    fn test_student_course_list_shows_status() {
        let mut sh = shell();
        assert!(!output(&mut sh, "courses").contains("not registered"));

        output(&mut sh, "login john@student.edu student123");
        let text = output(&mut sh, "courses");
        assert!(text.contains("approved"));
        assert!(text.contains("not registered"));
    }
}
