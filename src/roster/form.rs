//! Enrollment form state for adding students and editing grades
//!
//! [`CreateStudentForm`] models the add-student dialog: free-text personal
//! fields plus a per-course checkbox and grade box. The checkbox and its
//! grade text are coupled, so unchecking a course also forgets whatever
//! grade was typed for it. [`GradeEdit`] is the much smaller edit-grade
//! dialog.

use std::collections::{HashMap, HashSet};

use crate::api::{Contact, CourseGrade, Student};
use crate::catalog::Catalog;

/// Shown when a required personal field is blank or unusable.
pub const REQUIRED_FIELDS: &str = "Please fill in all required fields";

/// Shown when no offered course ends up selected.
pub const NO_COURSE_SELECTED: &str = "Please select at least one course";

/// Shown when the edit-grade dialog is submitted half-filled.
pub const INCOMPLETE_GRADE_EDIT: &str = "Please select a course and enter a grade";

/// State of the add-student dialog.
///
/// `id` and `age` stay raw text until submission, like the dialog inputs
/// they model.
#[derive(Debug, Default, Clone)]
pub struct CreateStudentForm {
    pub id: String,
    pub name: String,
    pub age: String,
    pub contact: Contact,
    selected: HashSet<String>,
    grades: HashMap<String, String>,
}

impl CreateStudentForm {
    pub fn new() -> Self {
        Self::default()
    }

    /// Checks or unchecks a course.
    ///
    /// Unchecking also discards the grade typed for that course, so a
    /// later re-check starts from a blank grade box.
    pub fn toggle_course(&mut self, code: &str, checked: bool) {
        if checked {
            self.selected.insert(code.to_string());
        } else {
            self.selected.remove(code);
            self.grades.remove(code);
        }
    }

    /// Records the grade text typed for a course.
    pub fn set_grade(&mut self, code: &str, grade: impl Into<String>) {
        self.grades.insert(code.to_string(), grade.into());
    }

    pub fn is_selected(&self, code: &str) -> bool {
        self.selected.contains(code)
    }

    pub fn grade_text(&self, code: &str) -> Option<&str> {
        self.grades.get(code).map(String::as_str)
    }

    /// Builds the student record this form describes.
    ///
    /// Courses are emitted in catalog declaration order regardless of the
    /// order they were checked in, and a selected course with no grade
    /// text is submitted as "N/A". Returns a user-facing message when the
    /// form is not submittable.
    pub fn build(&self, catalog: &Catalog) -> std::result::Result<Student, &'static str> {
        if self.id.is_empty() || self.name.is_empty() || self.age.is_empty() {
            return Err(REQUIRED_FIELDS);
        }

        let id: u32 = self.id.trim().parse().map_err(|_| REQUIRED_FIELDS)?;
        let age: u32 = self.age.trim().parse().map_err(|_| REQUIRED_FIELDS)?;

        let courses: Vec<CourseGrade> = catalog
            .iter()
            .filter(|course| self.selected.contains(&course.code))
            .map(|course| CourseGrade {
                code: course.code.clone(),
                name: course.name.clone(),
                grade: match self.grades.get(&course.code) {
                    Some(grade) if !grade.is_empty() => grade.clone(),
                    _ => "N/A".to_string(),
                },
            })
            .collect();

        if courses.is_empty() {
            return Err(NO_COURSE_SELECTED);
        }

        Ok(Student {
            id,
            name: self.name.clone(),
            age,
            courses,
            contact: self.contact.clone(),
        })
    }

    /// Clears the form back to its pristine state.
    pub fn reset(&mut self) {
        *self = Self::default();
    }
}

/// State of the edit-grade dialog.
#[derive(Debug, Default, Clone)]
pub struct GradeEdit {
    pub course_code: String,
    pub new_grade: String,
}

impl GradeEdit {
    pub fn new(course_code: impl Into<String>, new_grade: impl Into<String>) -> Self {
        Self {
            course_code: course_code.into(),
            new_grade: new_grade.into(),
        }
    }

    /// Returns the user-facing message when the edit is half-filled.
    pub fn validate(&self) -> Option<&'static str> {
        if self.course_code.is_empty() || self.new_grade.is_empty() {
            Some(INCOMPLETE_GRADE_EDIT)
        } else {
            None
        }
    }
}
