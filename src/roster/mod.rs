//! Roster view-model
//!
//! [`RosterBoard`] owns everything the students screen shows: the fetched
//! roster, the active course filter, the loading flag, and the current
//! success and error notices. All mutation goes through `&self` methods
//! over an internal lock, so overlapping operations (a slow fetch racing
//! a filter change, say) stay consistent: every fetch takes a ticket, and
//! only the most recently started fetch is allowed to publish its result.

pub mod form;

pub use form::{CreateStudentForm, GradeEdit};

use std::sync::RwLock;

use crate::api::{RegistryClient, Student};
use crate::catalog::Catalog;
use crate::error::{remote_detail, Result};

/// Prompt shown before a student record is deleted.
pub const DELETE_PROMPT: &str = "Are you sure you want to delete this student?";

/// Answers yes/no questions on behalf of the user.
///
/// The CLI asks on stdin; tests answer programmatically.
pub trait Confirmation {
    fn confirm(&self, prompt: &str) -> bool;
}

/// Visual weight of a grade, by its leading letter.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GradeTier {
    /// A-range grades
    Top,
    /// B-range grades
    Second,
    /// Everything else, including "N/A"
    Default,
}

impl GradeTier {
    /// Classifies a grade string case-insensitively by its first letter.
    pub fn classify(grade: &str) -> Self {
        let upper = grade.to_uppercase();
        if upper.starts_with('A') {
            Self::Top
        } else if upper.starts_with('B') {
            Self::Second
        } else {
            Self::Default
        }
    }
}

#[derive(Default)]
struct BoardState {
    students: Vec<Student>,
    filter: Option<String>,
    loading: bool,
    error: Option<String>,
    success: Option<String>,
    /// Ticket of the most recently started fetch. Completions holding an
    /// older ticket are stale and must not publish.
    fetch_seq: u64,
}

/// View-model for the students screen.
pub struct RosterBoard {
    registry: RegistryClient,
    catalog: Catalog,
    state: RwLock<BoardState>,
}

impl RosterBoard {
    pub fn new(registry: RegistryClient, catalog: Catalog) -> Self {
        Self {
            registry,
            catalog,
            state: RwLock::new(BoardState::default()),
        }
    }

    pub fn catalog(&self) -> &Catalog {
        &self.catalog
    }

    /// The roster as currently shown, already filtered.
    pub fn students(&self) -> Vec<Student> {
        self.state
            .read()
            .map(|s| s.students.clone())
            .unwrap_or_default()
    }

    /// The active course-code filter.
    pub fn filter(&self) -> Option<String> {
        self.state.read().map(|s| s.filter.clone()).unwrap_or_default()
    }

    pub fn is_loading(&self) -> bool {
        self.state.read().map(|s| s.loading).unwrap_or(false)
    }

    pub fn error(&self) -> Option<String> {
        self.state.read().map(|s| s.error.clone()).unwrap_or_default()
    }

    pub fn success(&self) -> Option<String> {
        self.state
            .read()
            .map(|s| s.success.clone())
            .unwrap_or_default()
    }

    pub fn clear_notices(&self) {
        if let Ok(mut state) = self.state.write() {
            state.error = None;
            state.success = None;
        }
    }

    /// Re-fetches the roster and publishes it under the active filter.
    pub async fn refresh(&self) {
        let ticket = self.begin_fetch();
        let result = self.registry.list().await;
        self.apply_fetch(ticket, result);
    }

    /// Changes the course filter and re-fetches.
    ///
    /// The filter narrows the roster to students enrolled in the given
    /// course; `None` shows everyone.
    pub async fn set_filter(&self, filter: Option<String>) {
        if let Ok(mut state) = self.state.write() {
            state.filter = filter;
        }
        self.refresh().await;
    }

    /// Submits the add-student form.
    ///
    /// A form that fails its own checks never reaches the server; the
    /// form's message becomes the error notice instead.
    pub async fn create(&self, form: &CreateStudentForm) {
        let student = match form.build(&self.catalog) {
            Ok(student) => student,
            Err(message) => {
                self.set_error(message.to_string());
                return;
            }
        };

        match self.registry.create(&student).await {
            Ok(_) => {
                self.set_success("Student added successfully!".to_string());
                self.refresh().await;
            }
            Err(e) => {
                self.set_error(format!("Failed to add student: {}", failure_detail(&e)));
            }
        }
    }

    /// Submits the edit-grade dialog for one student.
    pub async fn update_grade(&self, student_id: u32, edit: &GradeEdit) {
        if let Some(message) = edit.validate() {
            self.set_error(message.to_string());
            return;
        }

        match self
            .registry
            .update_grade(student_id, &edit.course_code, &edit.new_grade)
            .await
        {
            Ok(_) => {
                self.set_success("Grade updated successfully!".to_string());
                self.refresh().await;
            }
            Err(e) => {
                self.set_error(format!("Failed to update grade: {}", failure_detail(&e)));
            }
        }
    }

    /// Deletes a student, but only if the user confirms.
    ///
    /// A declined confirmation is a complete no-op: no request goes out
    /// and no notice changes.
    pub async fn delete(&self, student_id: u32, confirm: &dyn Confirmation) {
        if !confirm.confirm(DELETE_PROMPT) {
            tracing::debug!("Delete of student {} cancelled", student_id);
            return;
        }

        match self.registry.delete(student_id).await {
            Ok(_) => {
                self.set_success("Student deleted successfully!".to_string());
                self.refresh().await;
            }
            Err(e) => {
                self.set_error(format!("Failed to delete student: {}", failure_detail(&e)));
            }
        }
    }

    /// Starts a fetch: flips to loading, drops the stale error notice,
    /// and issues the ticket this fetch must present to publish.
    fn begin_fetch(&self) -> u64 {
        match self.state.write() {
            Ok(mut state) => {
                state.fetch_seq += 1;
                state.loading = true;
                state.error = None;
                state.fetch_seq
            }
            Err(_) => 0,
        }
    }

    /// Publishes a fetch result, unless a newer fetch has started since.
    fn apply_fetch(&self, ticket: u64, result: Result<Vec<Student>>) {
        if let Ok(mut state) = self.state.write() {
            if ticket != state.fetch_seq {
                tracing::debug!(ticket, latest = state.fetch_seq, "Discarding stale fetch");
                return;
            }

            match result {
                Ok(all) => {
                    state.students = match &state.filter {
                        Some(code) => all
                            .into_iter()
                            .filter(|student| student.enrolled_in(code))
                            .collect(),
                        None => all,
                    };
                }
                Err(e) => {
                    state.error =
                        Some(format!("Failed to fetch students: {}", failure_detail(&e)));
                    state.students.clear();
                }
            }
            state.loading = false;
        }
    }

    fn set_error(&self, message: String) {
        tracing::debug!("Roster error notice: {}", message);
        if let Ok(mut state) = self.state.write() {
            state.error = Some(message);
        }
    }

    fn set_success(&self, message: String) {
        if let Ok(mut state) = self.state.write() {
            state.success = Some(message);
        }
    }
}

/// The user-facing detail of a failed registry call.
fn failure_detail(err: &anyhow::Error) -> String {
    remote_detail(err)
        .map(str::to_string)
        .unwrap_or_else(|| err.to_string())
}
