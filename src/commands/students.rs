//! Roster command handlers
//!
//! List, add, grade, and delete go through the roster board, so every
//! change is followed by a refetch and reported through the board's
//! notices. Show, enrolled, and health hit the registry directly. All
//! roster commands except `health` sit behind the session gate.

use std::io::{self, Write};

use colored::Colorize;
use prettytable::{cell, row, Table};

use crate::api::{Contact, CourseGrade, Student};
use crate::commands::AppContext;
use crate::error::{Result, RollcallError};
use crate::roster::{Confirmation, CreateStudentForm, GradeEdit, GradeTier};
use crate::session::Gate;

/// Interactive yes/no prompt on stdin. Anything but y/yes declines.
pub struct StdinConfirmation;

impl Confirmation for StdinConfirmation {
    fn confirm(&self, prompt: &str) -> bool {
        print!("{} [y/N] ", prompt);
        if io::stdout().flush().is_err() {
            return false;
        }
        let mut line = String::new();
        match io::stdin().read_line(&mut line) {
            Ok(_) => matches!(line.trim().to_lowercase().as_str(), "y" | "yes"),
            Err(_) => false,
        }
    }
}

/// Confirmation that always answers yes, backing the `--yes` flag.
pub struct AutoConfirm;

impl Confirmation for AutoConfirm {
    fn confirm(&self, _prompt: &str) -> bool {
        true
    }
}

/// Redirect-to-login gate for the roster commands.
///
/// The roster is a protected view, so a missing or corrupt session stops
/// the command before anything reaches the wire.
fn require_session(ctx: &AppContext) -> Result<()> {
    match ctx.session.guard()? {
        Gate::Open(identity) => {
            tracing::debug!("Session open for {}", identity.display_name);
            Ok(())
        }
        Gate::RedirectToLogin => {
            eprintln!("{}", "Not signed in. Run `rollcall login` first.".red());
            Err(RollcallError::Rejected("not signed in".to_string()).into())
        }
    }
}

/// List students, optionally filtered by course code
///
/// # Arguments
///
/// * `ctx` - Shared command context
/// * `course` - Course code to filter by; `None` lists the full roster
pub async fn list(ctx: &AppContext, course: Option<String>) -> Result<()> {
    require_session(ctx)?;
    ctx.board.set_filter(course).await;

    if let Some(error) = ctx.board.error() {
        eprintln!("{}", error.red());
        return Err(RollcallError::Rejected(error).into());
    }

    let students = ctx.board.students();
    let filter = ctx.board.filter();
    print_roster(&students, filter.as_deref());
    Ok(())
}

/// Add a student to the roster
///
/// # Arguments
///
/// * `ctx` - Shared command context
/// * `id`, `name`, `age` - Required fields; missing flags become empty
///   fields and fail validation
/// * `courses` - Enrollment specs, each `CODE` or `CODE:GRADE`
/// * `email`, `phone` - Optional contact details
pub async fn add(
    ctx: &AppContext,
    id: Option<String>,
    name: Option<String>,
    age: Option<String>,
    courses: Vec<String>,
    email: Option<String>,
    phone: Option<String>,
) -> Result<()> {
    require_session(ctx)?;

    let mut form = CreateStudentForm::new();
    form.id = id.unwrap_or_default();
    form.name = name.unwrap_or_default();
    form.age = age.unwrap_or_default();
    form.contact.email = email.unwrap_or_default();
    form.contact.phone = phone.unwrap_or_default();
    apply_course_specs(&mut form, &courses);

    ctx.board.create(&form).await;
    report_board(ctx)
}

/// Update a student's grade in one course
pub async fn grade(
    ctx: &AppContext,
    id: u32,
    course: Option<String>,
    grade: Option<String>,
) -> Result<()> {
    require_session(ctx)?;

    let edit = GradeEdit::new(course.unwrap_or_default(), grade.unwrap_or_default());
    ctx.board.update_grade(id, &edit).await;
    report_board(ctx)
}

/// Remove a student, asking for confirmation unless `--yes` was given
pub async fn delete(ctx: &AppContext, id: u32, yes: bool) -> Result<()> {
    require_session(ctx)?;

    if yes {
        ctx.board.delete(id, &AutoConfirm).await;
    } else {
        ctx.board.delete(id, &StdinConfirmation).await;
    }

    // A declined prompt leaves no notice behind.
    if ctx.board.success().is_none() && ctx.board.error().is_none() {
        println!("Aborted.");
        return Ok(());
    }
    report_board(ctx)
}

/// Show one student's full record
pub async fn show(ctx: &AppContext, id: u32) -> Result<()> {
    require_session(ctx)?;

    let student = ctx.registry.find(id).await?;

    println!("\nStudent Record ({})\n", student.name);
    println!("ID:      {}", student.id);
    println!("Name:    {}", student.name);
    println!("Age:     {}", student.age);
    if !student.contact.email.is_empty() {
        println!("Email:   {}", student.contact.email);
    }
    if !student.contact.phone.is_empty() {
        println!("Phone:   {}", student.contact.phone);
    }

    if student.courses.is_empty() {
        println!("Courses: none");
    } else {
        println!("\nCourses:");
        let mut table = Table::new();
        table.add_row(row!["Code", "Course", "Grade"]);
        for course in &student.courses {
            table.add_row(row![course.code, course.name, colored_grade(&course.grade)]);
        }
        table.printstd();
    }
    println!();
    Ok(())
}

/// List the students enrolled in a course
pub async fn enrolled(ctx: &AppContext, course: &str) -> Result<()> {
    require_session(ctx)?;

    let students = ctx.registry.list_by_course(course).await?;
    print_roster(&students, Some(course));
    Ok(())
}

/// Check that the records server is reachable
pub async fn health(ctx: &AppContext) -> Result<()> {
    let status = ctx.registry.health().await?;
    println!("Server status: {}", status.green());
    Ok(())
}

/// Translate `CODE` / `CODE:GRADE` specs into form selections.
fn apply_course_specs(form: &mut CreateStudentForm, specs: &[String]) {
    for spec in specs {
        match spec.split_once(':') {
            Some((code, grade)) => {
                form.toggle_course(code, true);
                form.set_grade(code, grade);
            }
            None => form.toggle_course(spec, true),
        }
    }
}

/// Surface board notices; an error notice fails the command.
fn report_board(ctx: &AppContext) -> Result<()> {
    if let Some(notice) = ctx.board.success() {
        println!("{}", notice.green());
    }
    if let Some(error) = ctx.board.error() {
        eprintln!("{}", error.red());
        return Err(RollcallError::Rejected(error).into());
    }
    Ok(())
}

fn print_roster(students: &[Student], filter: Option<&str>) {
    if students.is_empty() {
        let hint = match filter {
            Some(code) => format!("No students enrolled in {}", code),
            None => "Add some students to get started!".to_string(),
        };
        println!("No students found. {}", hint);
        return;
    }

    println!("\nTotal Students: {}", students.len());
    if let Some(code) = filter {
        println!("Filtering: {}", code.magenta());
    }

    let mut table = Table::new();
    table.add_row(row!["ID", "Name", "Age", "Courses", "Contact"]);
    for student in students {
        table.add_row(row![
            student.id,
            student.name,
            student.age,
            format_courses(&student.courses, filter),
            format_contact(&student.contact)
        ]);
    }
    table.printstd();
    println!();
}

/// One cell of enrollments: the filtered course is highlighted, the rest
/// are colored by grade tier.
fn format_courses(courses: &[CourseGrade], filter: Option<&str>) -> String {
    if courses.is_empty() {
        return "-".to_string();
    }

    courses
        .iter()
        .map(|course| {
            let label = format!("{}: {}", course.code, course.grade);
            if filter == Some(course.code.as_str()) {
                label.magenta().bold().to_string()
            } else {
                match GradeTier::classify(&course.grade) {
                    GradeTier::Top => label.green().to_string(),
                    GradeTier::Second => label.blue().to_string(),
                    GradeTier::Default => label,
                }
            }
        })
        .collect::<Vec<_>>()
        .join(", ")
}

fn colored_grade(grade: &str) -> String {
    match GradeTier::classify(grade) {
        GradeTier::Top => grade.green().to_string(),
        GradeTier::Second => grade.blue().to_string(),
        GradeTier::Default => grade.to_string(),
    }
}

fn format_contact(contact: &Contact) -> String {
    match (contact.email.is_empty(), contact.phone.is_empty()) {
        (true, true) => "-".to_string(),
        (false, true) => contact.email.clone(),
        (true, false) => contact.phone.clone(),
        (false, false) => format!("{} / {}", contact.email, contact.phone),
    }
}
