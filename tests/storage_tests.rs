use chrono::{Duration, Utc};
use face_enroll::storage::models::{EnrollmentRecord, EnrollmentUpsert, ProfileUpsert};
use face_enroll::storage::Database;

fn test_db() -> (tempfile::TempDir, Database) {
    let dir = tempfile::tempdir().unwrap();
    let db = Database::open(dir.path().join("data")).unwrap();
    (dir, db)
}

fn sample_enrollment(user_id: &str, url: &str) -> EnrollmentUpsert {
    EnrollmentUpsert {
        user_id: user_id.to_string(),
        usn: "1AB23CS045".to_string(),
        student_name: Some("Jane Roe".to_string()),
        student_branch: Some("CSE".to_string()),
        student_section: Some("A".to_string()),
        url_frontal: url.to_string(),
    }
}

fn sample_profile(user_id: &str, name: &str) -> ProfileUpsert {
    ProfileUpsert {
        user_id: user_id.to_string(),
        usn: "1AB23CS045".to_string(),
        student_name: name.to_string(),
        student_branch: "CSE".to_string(),
        student_section: "A".to_string(),
    }
}

#[test]
fn test_upsert_and_get_enrollment() {
    let (_dir, db) = test_db();

    let stored = db
        .upsert_enrollment(sample_enrollment("user-1", "https://img/1.png"))
        .unwrap();
    assert_eq!(stored.created_at, stored.updated_at);

    let record = db.get_enrollment("user-1").unwrap().expect("row should exist");
    assert_eq!(record, stored);
    assert_eq!(record.usn, "1AB23CS045");
    assert_eq!(record.url_frontal.as_deref(), Some("https://img/1.png"));
    assert_eq!(record.url_left, None);
    assert_eq!(record.url_down, None);
}

#[test]
fn test_get_enrollment_not_found() {
    let (_dir, db) = test_db();
    assert!(db.get_enrollment("nonexistent").unwrap().is_none());
}

#[test]
fn test_enrollment_upsert_replaces_row() {
    let (_dir, db) = test_db();
    let mut first = db
        .upsert_enrollment(sample_enrollment("user-1", "https://img/1.png"))
        .unwrap();
    // Backdate the row so the next write must move updated_at forward
    first.created_at = first.created_at - Duration::hours(1);
    first.updated_at = first.created_at;
    db.put_enrollment(&first).unwrap();

    let mut second = sample_enrollment("user-1", "https://img/2.png");
    second.student_name = None;
    second.student_section = None;
    let second = db.upsert_enrollment(second).unwrap();

    let record = db.get_enrollment("user-1").unwrap().unwrap();
    assert_eq!(record.url_frontal.as_deref(), Some("https://img/2.png"));
    assert_eq!(record.student_name, None);
    assert_eq!(record.student_section, None);
    assert_eq!(record.student_branch.as_deref(), Some("CSE"));
    assert_eq!(record.created_at, first.created_at);
    assert!(second.updated_at > first.updated_at);
    assert_eq!(record.updated_at, second.updated_at);
}

#[test]
fn test_enrollment_upsert_clears_directional_urls() {
    let (_dir, db) = test_db();
    let earlier = Utc::now() - Duration::minutes(5);
    db.put_enrollment(&EnrollmentRecord {
        user_id: "user-1".to_string(),
        usn: "1AB23CS045".to_string(),
        student_name: None,
        student_branch: None,
        student_section: None,
        url_frontal: Some("https://img/old-frontal.png".to_string()),
        url_left: Some("https://img/left.png".to_string()),
        url_right: Some("https://img/right.png".to_string()),
        url_up: Some("https://img/up.png".to_string()),
        url_down: Some("https://img/down.png".to_string()),
        created_at: earlier,
        updated_at: earlier,
    })
    .unwrap();

    db.upsert_enrollment(sample_enrollment("user-1", "https://img/new.png"))
        .unwrap();

    let record = db.get_enrollment("user-1").unwrap().unwrap();
    assert_eq!(record.url_frontal.as_deref(), Some("https://img/new.png"));
    assert_eq!(record.url_left, None);
    assert_eq!(record.url_right, None);
    assert_eq!(record.url_up, None);
    assert_eq!(record.url_down, None);
    assert_eq!(record.created_at, earlier);
    assert!(record.updated_at > earlier);
}

#[test]
fn test_upsert_and_get_profile() {
    let (_dir, db) = test_db();
    let stored = db.upsert_profile(sample_profile("user-1", "Jane Roe")).unwrap();

    let record = db.get_profile("user-1").unwrap().expect("row should exist");
    assert_eq!(record, stored);
    assert_eq!(record.student_name, "Jane Roe");

    let updated = db.upsert_profile(sample_profile("user-1", "Jane Q. Roe")).unwrap();
    assert_eq!(updated.created_at, stored.created_at);
    assert_eq!(
        db.get_profile("user-1").unwrap().unwrap().student_name,
        "Jane Q. Roe"
    );
}

#[test]
fn test_tables_are_independent() {
    let (_dir, db) = test_db();
    db.upsert_profile(sample_profile("only-profile", "A")).unwrap();
    db.upsert_enrollment(sample_enrollment("only-enrollment", "https://img/e.png"))
        .unwrap();

    assert!(db.get_enrollment("only-profile").unwrap().is_none());
    assert!(db.get_profile("only-enrollment").unwrap().is_none());
}

#[test]
fn test_rows_survive_reopen() {
    let dir = tempfile::tempdir().unwrap();
    {
        let db = Database::open(dir.path().join("data")).unwrap();
        db.upsert_enrollment(sample_enrollment("user-1", "https://img/1.png"))
            .unwrap();
        db.upsert_profile(sample_profile("user-1", "Jane Roe")).unwrap();
    }

    let db = Database::open(dir.path().join("data")).unwrap();
    assert!(db.get_enrollment("user-1").unwrap().is_some());
    assert!(db.get_profile("user-1").unwrap().is_some());
}

#[test]
fn test_summary_projection() {
    let (_dir, db) = test_db();
    let record = db
        .upsert_enrollment(sample_enrollment("user-1", "https://img/1.png"))
        .unwrap();

    let summary = record.summary();
    assert_eq!(summary.user_id, "user-1");
    assert_eq!(summary.url_frontal.as_deref(), Some("https://img/1.png"));

    let json = serde_json::to_value(&summary).unwrap();
    let keys: Vec<&str> = json.as_object().unwrap().keys().map(|k| k.as_str()).collect();
    assert_eq!(
        keys.len(),
        6,
        "projection should expose exactly six columns: {keys:?}"
    );
    assert!(json.get("url_left").is_none());
    assert!(json.get("created_at").is_none());
}
