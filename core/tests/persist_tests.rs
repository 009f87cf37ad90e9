use articles_core::persist::{load_articles, save_articles};
use articles_core::{ArticleStore, NewArticle};
use std::fs;
use tempfile::tempdir;

fn seeded_store() -> ArticleStore {
    let store = ArticleStore::new();
    store.insert(NewArticle::new(Some("Go Basics".into()), Some("Learn Go".into()), Some(vec!["go".into(), "tutorial".into()])).unwrap());
    store.insert(NewArticle::new(Some("Rust".into()), Some("Ownership".into()), None).unwrap());
    store
}

#[test]
fn flush_then_load_round_trips() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("articles.json");
    let store = seeded_store();
    store.flush(&path).unwrap();

    let reloaded = ArticleStore::load_or_empty(&path);
    assert_eq!(reloaded.snapshot(), store.snapshot());
    assert_eq!(reloaded.next_id(), 3);
}

#[test]
fn counter_follows_max_id_not_count() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("articles.json");
    let store = seeded_store();
    let mut articles = store.snapshot();
    articles[1].id = 10;
    save_articles(&path, &articles).unwrap();

    let reloaded = ArticleStore::load_or_empty(&path);
    assert_eq!(reloaded.next_id(), 11);
    let next = reloaded.insert(NewArticle::new(Some("t".into()), Some("c".into()), None).unwrap());
    assert_eq!(next.id, 11);
}

#[test]
fn missing_file_is_empty() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("absent.json");
    assert!(load_articles(&path).unwrap().is_empty());
    let store = ArticleStore::load_or_empty(&path);
    assert!(store.is_empty());
    assert_eq!(store.next_id(), 1);
}

#[test]
fn corrupt_file_degrades_to_empty() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("articles.json");
    fs::write(&path, "{ not json").unwrap();
    assert!(load_articles(&path).is_err());
    let store = ArticleStore::load_or_empty(&path);
    assert!(store.is_empty());
    assert_eq!(store.next_id(), 1);
    assert!(!path.exists());
    assert!(dir.path().join("articles.json.corrupt").exists());
}

#[test]
fn unloadable_file_survives_the_shutdown_flush() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("articles.json");
    let partial = r#"[
  {
    "id": 1,
    "title": "Go Basics",
    "content": "Learn Go",
    "tags": ["go"],
    "created_at": "2024-05-01T12:30:00.123Z"
  },
  {
    "id": 2,
    "title": "Trunc"#;
    fs::write(&path, partial).unwrap();

    let store = ArticleStore::load_or_empty(&path);
    assert!(store.is_empty());
    store.flush(&path).unwrap();

    let aside = dir.path().join("articles.json.corrupt");
    assert_eq!(fs::read_to_string(&aside).unwrap(), partial);
    assert!(load_articles(&path).unwrap().is_empty());
}

#[test]
fn exhausted_max_id_degrades_to_empty() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("articles.json");
    let max_id = format!(
        r#"[{{"id": {}, "title": "t", "content": "c", "tags": [], "created_at": "2024-05-01T12:30:00Z"}}]"#,
        u64::MAX
    );
    fs::write(&path, &max_id).unwrap();

    let store = ArticleStore::load_or_empty(&path);
    assert!(store.is_empty());
    assert_eq!(store.next_id(), 1);
    assert_eq!(fs::read_to_string(dir.path().join("articles.json.corrupt")).unwrap(), max_id);
}

#[test]
fn reads_the_legacy_layout() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("articles.json");
    fs::write(
        &path,
        r#"[
  {
    "id": 3,
    "title": "Go Basics",
    "content": "Learn Go",
    "tags": ["go"],
    "created_at": "2024-05-01T12:30:00.123Z"
  }
]"#,
    )
    .unwrap();
    let articles = load_articles(&path).unwrap();
    assert_eq!(articles.len(), 1);
    assert_eq!(articles[0].id, 3);
    assert_eq!(articles[0].created_at.millisecond(), 123);
}

#[test]
fn saved_file_is_a_pretty_json_array() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("nested").join("articles.json");
    seeded_store().flush(&path).unwrap();
    let raw = fs::read_to_string(&path).unwrap();
    assert!(raw.starts_with("[\n  {"));
    let value: serde_json::Value = serde_json::from_str(&raw).unwrap();
    let first = &value[0];
    for field in ["id", "title", "content", "tags", "created_at"] {
        assert!(first.get(field).is_some(), "missing {field}");
    }
    assert!(!dir.path().join("nested").join("articles.json.tmp").exists());
}
