use chrono::NaiveDate;
use fitlog_core::{
    errors::JournalError,
    models::{member::Member, workout::Workout},
};
use fitlog_db::{
    KeyValueStore, MemoryStore,
    mock::MockStore,
    open_store,
    repositories::{
        member::{MEMBERS_KEY, load_members, save_members},
        quarantine,
        workout::{WORKOUTS_KEY, load_workouts, save_workouts},
    },
};
use mockall::predicate::eq;
use pretty_assertions::assert_eq;
use rstest::rstest;

fn sample_member() -> Member {
    Member {
        id: 1,
        nickname: "A".to_string(),
        color: "#FF6B6B".to_string(),
        created_at: "2024-03-01T12:00:00.000Z".to_string(),
    }
}

fn sample_workout() -> Workout {
    Workout {
        id: 10,
        member_id: 1,
        date: NaiveDate::from_ymd_opt(2024, 3, 15).unwrap(),
        photo: "data:image/png;base64,iVBORw0KGgo=".to_string(),
        created_at: "2024-03-15T18:00:00.000Z".to_string(),
    }
}

#[test]
fn file_store_persists_collections_across_reopen() {
    let dir = tempfile::tempdir().expect("Failed to create temp dir");

    {
        let store = open_store(dir.path()).unwrap();
        save_members(&store, &[sample_member()]).unwrap();
        save_workouts(&store, &[sample_workout()]).unwrap();
    }

    let reopened = open_store(dir.path()).unwrap();
    assert_eq!(load_members(&reopened).unwrap(), vec![sample_member()]);
    assert_eq!(load_workouts(&reopened).unwrap(), vec![sample_workout()]);
    assert!(dir.path().join(format!("{}.json", MEMBERS_KEY)).exists());
}

#[test]
fn file_store_creates_nested_data_dir() {
    let dir = tempfile::tempdir().unwrap();
    let nested = dir.path().join("a").join("b");
    let store = open_store(&nested).unwrap();

    assert!(nested.is_dir());
    assert_eq!(store.get("missing").unwrap(), None);
}

#[test]
fn file_store_rejects_path_traversal() {
    let dir = tempfile::tempdir().unwrap();
    let store = open_store(dir.path()).unwrap();
    assert!(store.set("../outside", "x").is_err());
}

#[rstest]
#[case(MEMBERS_KEY)]
#[case(WORKOUTS_KEY)]
fn missing_keys_load_as_empty(#[case] key: &str) {
    let store = MemoryStore::new();
    assert_eq!(store.get(key).unwrap(), None);
    assert!(load_members(&store).unwrap().is_empty());
    assert!(load_workouts(&store).unwrap().is_empty());
}

#[test]
fn saved_json_uses_camel_case_fields() {
    let store = MemoryStore::new();
    save_workouts(&store, &[sample_workout()]).unwrap();

    let raw = store.get(WORKOUTS_KEY).unwrap().unwrap();
    assert!(raw.starts_with('['));
    assert!(raw.contains("\"memberId\":1"));
    assert!(raw.contains("\"date\":\"2024-03-15\""));
}

#[test]
fn load_then_save_keeps_stored_bytes() {
    let members = r##"[{"id":1710489600000,"nickname":"A","color":"#FF6B6B","createdAt":"2024-03-15T08:31:40.000Z"}]"##;
    let workouts = r#"[{"id":1710489700000,"memberId":1710489600000,"date":"2024-03-15","photo":"data:image/png;base64,AAAA","createdAt":"2024-03-15T08:31:40.000Z"}]"#;
    let store = MemoryStore::with_entries([(MEMBERS_KEY, members), (WORKOUTS_KEY, workouts)]);

    save_members(&store, &load_members(&store).unwrap()).unwrap();
    save_workouts(&store, &load_workouts(&store).unwrap()).unwrap();

    assert_eq!(store.get(MEMBERS_KEY).unwrap().as_deref(), Some(members));
    assert_eq!(store.get(WORKOUTS_KEY).unwrap().as_deref(), Some(workouts));
}

#[test]
fn locale_formatted_created_at_is_not_corruption() {
    let members = r##"[{"id":1,"nickname":"A","color":"#FF6B6B","createdAt":"3/15/2024, 8:31:40 AM"}]"##;
    let store = MemoryStore::with_entries([(MEMBERS_KEY, members)]);

    let loaded = load_members(&store).unwrap();
    assert_eq!(loaded[0].created_at, "3/15/2024, 8:31:40 AM");

    save_members(&store, &loaded).unwrap();
    assert_eq!(store.get(MEMBERS_KEY).unwrap().as_deref(), Some(members));
}

#[test]
fn corrupted_blob_is_reported_with_its_key() {
    let store = MemoryStore::with_entries([(MEMBERS_KEY, "[{\"id\": 1,")]);

    match load_members(&store) {
        Err(JournalError::Corrupted { key, .. }) => assert_eq!(key, MEMBERS_KEY),
        other => panic!("expected corruption error, got {:?}", other),
    }
}

#[test]
fn quarantine_copies_raw_blob() {
    let store = MemoryStore::with_entries([(WORKOUTS_KEY, "not json")]);

    let backup = quarantine(&store, WORKOUTS_KEY).unwrap();
    assert_eq!(backup.as_deref(), Some("fitlog-workouts.corrupt"));
    assert_eq!(
        store.get("fitlog-workouts.corrupt").unwrap().as_deref(),
        Some("not json")
    );
    assert_eq!(quarantine(&store, "absent").unwrap(), None);
}

#[test]
fn store_read_failures_surface_as_storage_errors() {
    let mut store = MockStore::new();
    store
        .expect_get()
        .with(eq(MEMBERS_KEY))
        .times(1)
        .returning(|_| Err(eyre::eyre!("disk unavailable")));

    match load_members(&store) {
        Err(JournalError::Storage(report)) => {
            assert!(report.to_string().contains("disk unavailable"))
        }
        other => panic!("expected storage error, got {:?}", other),
    }
}

#[test]
fn save_writes_exactly_one_key() {
    let mut store = MockStore::new();
    store
        .expect_set()
        .withf(|key, value| key == MEMBERS_KEY && value.contains("\"nickname\":\"A\""))
        .times(1)
        .returning(|_, _| Ok(()));

    save_members(&store, &[sample_member()]).unwrap();
}
