//! Student registry gateway for the `/api` route family
//!
//! Wraps the student CRUD endpoints plus the health probe. Unlike the
//! auth family these endpoints speak lowercase JSON, with one camelCase
//! exception: the grade-update body (`courseCode`, `newGrade`).
//!
//! Every request carries the session's bearer token when one is stored;
//! requests still go out without one so the server stays the authority
//! on what actually requires authentication.

use std::sync::Arc;

use reqwest::{Client, RequestBuilder};
use serde::{Deserialize, Serialize};

use crate::api::{decode_error, http_client, join_url, read_error, transport_error};
use crate::config::ServerConfig;
use crate::error::Result;
use crate::session::SessionStore;

/// A student record as the registry stores it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Student {
    pub id: u32,
    pub name: String,
    pub age: u32,
    #[serde(default)]
    pub courses: Vec<CourseGrade>,
    #[serde(default)]
    pub contact: Contact,
}

impl Student {
    /// True when the student has an enrollment with exactly this code.
    pub fn enrolled_in(&self, code: &str) -> bool {
        self.courses.iter().any(|course| course.code == code)
    }
}

/// One course enrollment with its grade.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CourseGrade {
    pub code: String,
    pub name: String,
    pub grade: String,
}

/// Contact details attached to a student record.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Contact {
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub phone: String,
}

/// Envelope around the full roster listing
#[derive(Debug, Deserialize)]
struct StudentsEnvelope {
    #[serde(default)]
    students: Vec<Student>,
}

/// Acknowledgement body for create, update, and delete
#[derive(Debug, Deserialize)]
struct MessageResponse {
    #[serde(default)]
    message: String,
}

/// Request body for PUT /api/students/{id}
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct UpdateGradeRequest<'a> {
    course_code: &'a str,
    new_grade: &'a str,
}

/// Response body for GET /api/healthz
#[derive(Debug, Deserialize)]
struct HealthResponse {
    status: String,
}

/// Client for the student registry endpoints.
#[derive(Clone)]
pub struct RegistryClient {
    client: Client,
    base_url: String,
    session: Arc<SessionStore>,
}

impl RegistryClient {
    /// Create a new registry gateway for the configured server.
    ///
    /// # Errors
    ///
    /// Returns error if HTTP client initialization fails.
    pub fn new(server: &ServerConfig, session: Arc<SessionStore>) -> Result<Self> {
        let client = http_client(server.timeout_seconds)?;
        Ok(Self {
            client,
            base_url: server.base_url.clone(),
            session,
        })
    }

    /// Attaches the stored bearer token, when there is one.
    fn authorized(&self, builder: RequestBuilder) -> Result<RequestBuilder> {
        match self.session.token()? {
            Some(token) => Ok(builder.bearer_auth(token)),
            None => {
                tracing::debug!("No session token, sending unauthenticated request");
                Ok(builder)
            }
        }
    }

    /// Fetches the full roster.
    pub async fn list(&self) -> Result<Vec<Student>> {
        let url = join_url(&self.base_url, "/api/students");
        tracing::debug!("Fetching full roster");

        let request = self.authorized(self.client.get(&url))?;
        let response = request.send().await.map_err(transport_error)?;

        if !response.status().is_success() {
            return Err(read_error(response).await.into());
        }

        let body: StudentsEnvelope = response.json().await.map_err(decode_error)?;
        Ok(body.students)
    }

    /// Fetches a single student by id.
    ///
    /// The server answers this filtered form without the `students`
    /// envelope, as a bare record.
    pub async fn find(&self, student_id: u32) -> Result<Student> {
        let url = join_url(&self.base_url, "/api/students");
        tracing::debug!("Fetching student {}", student_id);

        let request = self
            .authorized(self.client.get(&url))?
            .query(&[("studentId", student_id)]);
        let response = request.send().await.map_err(transport_error)?;

        if !response.status().is_success() {
            return Err(read_error(response).await.into());
        }

        response.json().await.map_err(|e| decode_error(e).into())
    }

    /// Fetches all students enrolled in a course.
    ///
    /// Like [`RegistryClient::find`], the filtered form is un-enveloped:
    /// the body is a bare array.
    pub async fn list_by_course(&self, course_code: &str) -> Result<Vec<Student>> {
        let url = join_url(&self.base_url, "/api/students");
        tracing::debug!("Fetching students enrolled in {}", course_code);

        let request = self
            .authorized(self.client.get(&url))?
            .query(&[("courseCode", course_code)]);
        let response = request.send().await.map_err(transport_error)?;

        if !response.status().is_success() {
            return Err(read_error(response).await.into());
        }

        response.json().await.map_err(|e| decode_error(e).into())
    }

    /// Adds a student record.
    ///
    /// The service acknowledges with a message only, so on success the
    /// submitted record is handed back as the created student.
    pub async fn create(&self, student: &Student) -> Result<Student> {
        let url = join_url(&self.base_url, "/api/students");
        tracing::debug!("Creating student {}", student.id);

        let request = self.authorized(self.client.post(&url))?.json(student);
        let response = request.send().await.map_err(transport_error)?;

        if !response.status().is_success() {
            return Err(read_error(response).await.into());
        }

        let ack: MessageResponse = response.json().await.map_err(decode_error)?;
        tracing::debug!("Registry ack: {}", ack.message);
        Ok(student.clone())
    }

    /// Changes one student's grade in one course.
    pub async fn update_grade(
        &self,
        student_id: u32,
        course_code: &str,
        new_grade: &str,
    ) -> Result<()> {
        let url = join_url(&self.base_url, &format!("/api/students/{}", student_id));
        tracing::debug!(
            "Updating grade for student {} in {}",
            student_id,
            course_code
        );

        let request = self
            .authorized(self.client.put(&url))?
            .json(&UpdateGradeRequest {
                course_code,
                new_grade,
            });
        let response = request.send().await.map_err(transport_error)?;

        if !response.status().is_success() {
            return Err(read_error(response).await.into());
        }

        let ack: MessageResponse = response.json().await.map_err(decode_error)?;
        tracing::debug!("Registry ack: {}", ack.message);
        Ok(())
    }

    /// Removes a student record.
    pub async fn delete(&self, student_id: u32) -> Result<()> {
        let url = join_url(&self.base_url, &format!("/api/students/{}", student_id));
        tracing::debug!("Deleting student {}", student_id);

        let request = self.authorized(self.client.delete(&url))?;
        let response = request.send().await.map_err(transport_error)?;

        if !response.status().is_success() {
            return Err(read_error(response).await.into());
        }

        let ack: MessageResponse = response.json().await.map_err(decode_error)?;
        tracing::debug!("Registry ack: {}", ack.message);
        Ok(())
    }

    /// Probes the server's health endpoint, returning its status string.
    pub async fn health(&self) -> Result<String> {
        let url = join_url(&self.base_url, "/api/healthz");
        tracing::debug!("Probing server health");

        let response = self
            .client
            .get(&url)
            .send()
            .await
            .map_err(transport_error)?;

        if !response.status().is_success() {
            return Err(read_error(response).await.into());
        }

        let body: HealthResponse = response.json().await.map_err(decode_error)?;
        Ok(body.status)
    }
}
