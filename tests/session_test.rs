use repair_board::session::{Session, SessionStore};
use repair_board::types::{Role, User};

fn sample_session() -> Session {
    Session {
        token: "token-abc".to_owned(),
        user: User {
            id: "u1".to_owned(),
            name: "Somchai".to_owned(),
            role: Role::Technician,
            phone: "0812345678".to_owned(),
            department: "Maintenance".to_owned(),
            agency_id: Some("a1".to_owned()),
            agency_name: Some("Head Office".to_owned()),
        },
    }
}

#[test]
fn save_then_load_roundtrips() {
    let dir = tempfile::tempdir().unwrap();
    let store = SessionStore::new(dir.path().join("session.json"));

    let session = sample_session();
    store.save(&session).unwrap();

    let loaded = store.load().unwrap().expect("session present");
    assert_eq!(loaded, session);
}

#[test]
fn missing_file_loads_as_logged_out() {
    let dir = tempfile::tempdir().unwrap();
    let store = SessionStore::new(dir.path().join("session.json"));
    assert!(store.load().unwrap().is_none());
}

#[test]
fn corrupt_record_loads_as_logged_out() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("session.json");
    std::fs::write(&path, "{not valid json").unwrap();

    let store = SessionStore::new(&path);
    assert!(store.load().unwrap().is_none());
}

#[test]
fn clear_is_idempotent() {
    let dir = tempfile::tempdir().unwrap();
    let store = SessionStore::new(dir.path().join("session.json"));

    store.save(&sample_session()).unwrap();
    store.clear().unwrap();
    assert!(store.load().unwrap().is_none());

    // Clearing an already-cleared store is fine.
    store.clear().unwrap();
}

#[test]
fn save_creates_parent_directories() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("nested").join("deep").join("session.json");
    let store = SessionStore::new(&path);

    store.save(&sample_session()).unwrap();
    assert!(path.exists());
}

#[test]
fn save_leaves_no_temp_file_behind() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("session.json");
    let store = SessionStore::new(&path);

    store.save(&sample_session()).unwrap();

    let entries: Vec<_> = std::fs::read_dir(dir.path())
        .unwrap()
        .map(|e| e.unwrap().file_name())
        .collect();
    assert_eq!(entries, vec!["session.json"]);
}

#[test]
fn save_overwrites_previous_record_atomically() {
    let dir = tempfile::tempdir().unwrap();
    let store = SessionStore::new(dir.path().join("session.json"));

    store.save(&sample_session()).unwrap();

    let mut updated = sample_session();
    updated.token = "token-def".to_owned();
    store.save(&updated).unwrap();

    let loaded = store.load().unwrap().unwrap();
    assert_eq!(loaded.token, "token-def");
}
