use skillshare_lib::SkillShare;
use tempfile::TempDir;

// Each test gets its own database file under a throwaway directory, so tests
// can run in parallel without sharing state.
pub fn open_test_store() -> (TempDir, SkillShare) {
    let dir = TempDir::new().expect("Failed to create test directory");
    let db_path = dir.path().join("skillshare.db");
    let app = SkillShare::open(db_path.to_str().expect("Non UTF-8 test db path"))
        .expect("Failed to open test store");
    (dir, app)
}

pub fn signup(app: &SkillShare, name: &str) -> skillshare_lib::User {
    let email = format!("{}@example.com", name.to_lowercase());
    app.signup(name, &email, "hunter2")
        .expect("Failed to sign up test user")
}
