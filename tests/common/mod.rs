use std::fs;
use std::path::PathBuf;
use std::sync::Arc;

use serde_json::{json, Value};
use tempfile::TempDir;

use rollcall::config::ServerConfig;
use rollcall::session::{MemoryScope, SessionStore};

#[allow(dead_code)]
pub fn temp_config_file(contents: &str) -> (TempDir, PathBuf) {
    let temp_dir = TempDir::new().expect("failed to create tempdir");
    let config_path = temp_dir.path().join("config.yaml");
    fs::write(&config_path, contents).expect("failed to write config file");
    (temp_dir, config_path)
}

/// Session store backed by in-memory scopes, never the system keyring.
#[allow(dead_code)]
pub fn memory_session() -> Arc<SessionStore> {
    Arc::new(SessionStore::with_scopes(
        Box::new(MemoryScope::new()),
        Box::new(MemoryScope::new()),
    ))
}

/// Server config aimed at a wiremock server.
#[allow(dead_code)]
pub fn server_config(base_url: &str) -> ServerConfig {
    ServerConfig {
        base_url: base_url.to_string(),
        timeout_seconds: 5,
    }
}

/// One student as the registry serializes it.
#[allow(dead_code)]
pub fn student_json(id: u32, name: &str, courses: &[(&str, &str, &str)]) -> Value {
    let courses: Vec<Value> = courses
        .iter()
        .map(|(code, course_name, grade)| {
            json!({"code": code, "name": course_name, "grade": grade})
        })
        .collect();
    json!({
        "id": id,
        "name": name,
        "age": 20,
        "courses": courses,
        "contact": {"email": "", "phone": ""}
    })
}

/// The roster listing envelope.
#[allow(dead_code)]
pub fn roster_body(students: &[Value]) -> Value {
    json!({ "students": students })
}
