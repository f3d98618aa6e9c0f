//! Loading, persisting and backing up class files on disk.

use std::fs;

use sculptor_session::{LoadError, SessionConfig};
use sculptor_tests::prelude::*;
use tempfile::TempDir;

#[test]
fn test_backup_and_successive_saves() {
    // GIVEN
    init_test_logging();
    let dir = TempDir::new().unwrap();
    let source = fixtures::write(dir.path(), "test_class").unwrap();
    let first = dir.path().join("model.php");
    let second = dir.path().join("resource.php");
    let backup = dir.path().join("backup.php");
    let mut sculptor = Sculptor::load(&source).unwrap();

    // WHEN
    sculptor.snapshot_original(&backup).unwrap();
    sculptor
        .add_mixin("HasTeams")
        .add_field("teamId", Some(Value::Int(1)), "protected", Some("int"));
    sculptor.persist(Some(&first)).unwrap();
    sculptor
        .add_mixin("HasPermissions")
        .add_field("role", Some("user".into()), "protected", Some("string"));
    sculptor.persist(Some(&second)).unwrap();

    // THEN
    let backup = fs::read_to_string(&backup).unwrap();
    assert_eq!(backup, fixtures::TEST_CLASS);

    let first = fs::read_to_string(&first).unwrap();
    assert!(first.contains("use HasTeams;"));
    assert!(first.contains("protected int $teamId = 1;"));
    assert!(!first.contains("HasPermissions"));

    let second = fs::read_to_string(&second).unwrap();
    assert!(second.contains("use HasTeams;\n    use HasPermissions;"));
    assert!(second.contains("protected int $teamId = 1;\n    protected string $role = 'user';"));

    assert_eq!(fs::read_to_string(&source).unwrap(), fixtures::TEST_CLASS);
}

#[test]
fn test_persist_defaults_to_loaded_path() {
    // GIVEN
    let dir = TempDir::new().unwrap();
    let path = fixtures::write(dir.path(), "plain_class").unwrap();
    let mut sculptor = Sculptor::load(&path).unwrap();

    // WHEN
    sculptor.implement_interface("JsonSerializable");
    let written = sculptor.persist(None).unwrap();

    // THEN
    assert_eq!(written, path);
    assert!(fs::read_to_string(&path)
        .unwrap()
        .contains("final class Invoice implements JsonSerializable\n"));
}

#[test]
fn test_configured_layout_is_used_for_output() {
    // GIVEN
    let dir = TempDir::new().unwrap();
    let path = fixtures::write(dir.path(), "plain_class").unwrap();
    let config = SessionConfig::default().with_indent("\t");
    let mut sculptor = Sculptor::load_with(&path, config).unwrap();

    // WHEN
    sculptor.add_field("notes", None, "private", Some("?string"));
    let output = sculptor.render().unwrap();

    // THEN
    assert!(output.contains("\tprivate array $lines = [];\n\tprivate ?string $notes;\n"));
}

#[test]
fn test_unreadable_sources() {
    // GIVEN
    let dir = TempDir::new().unwrap();
    let broken = dir.path().join("Broken.php");
    fs::write(&broken, "<?php\nclass Broken\n{\n    public function f(\n}\n").unwrap();

    // THEN
    assert!(matches!(
        Sculptor::load(dir.path().join("Missing.php")),
        Err(SessionError::Load(LoadError::NotFound { .. }))
    ));
    assert!(matches!(
        Sculptor::load(&broken),
        Err(SessionError::Load(LoadError::Unparsable(_)))
    ));
    assert!(matches!(
        Sculptor::load(dir.path()),
        Err(SessionError::Load(LoadError::Unreadable { .. }))
    ));
}

#[test]
fn test_windows_line_endings_survive_persist() {
    // GIVEN
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("Invoice.php");
    fs::write(&path, fixtures::PLAIN_CLASS.replace('\n', "\r\n")).unwrap();
    let mut sculptor = Sculptor::load(&path).unwrap();

    // WHEN
    sculptor.add_mixin("Billable");
    sculptor.persist(None).unwrap();

    // THEN
    let written = fs::read_to_string(&path).unwrap();
    assert!(written.contains("\r\n    use Billable;\r\n"));
    assert_eq!(written.matches('\n').count(), written.matches("\r\n").count());
}
