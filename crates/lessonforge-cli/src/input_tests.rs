//! Tests for file loading.

use std::io::Write;
use std::path::Path;

use lessonforge::{SyncScope, TimetableProblem};
use lessonforge_test::problems::synced_arts;

use crate::input::{load_config, load_problem, CliError, Format};

fn write_file(dir: &tempfile::TempDir, name: &str, contents: &str) -> std::path::PathBuf {
    let path = dir.path().join(name);
    let mut file = std::fs::File::create(&path).unwrap();
    file.write_all(contents.as_bytes()).unwrap();
    path
}

#[test]
fn test_format_from_extension() {
    assert_eq!(Format::from_path(Path::new("a.json")), Some(Format::Json));
    assert_eq!(Format::from_path(Path::new("a.TOML")), Some(Format::Toml));
    assert_eq!(Format::from_path(Path::new("a.yml")), Some(Format::Yaml));
    assert_eq!(Format::from_path(Path::new("a.yaml")), Some(Format::Yaml));
    assert_eq!(Format::from_path(Path::new("a.xlsx")), None);
    assert_eq!(Format::from_path(Path::new("problem")), None);
}

#[test]
fn test_problem_formats_agree() {
    let problem = synced_arts();
    let json = serde_json::to_string(&problem).unwrap();
    let yaml = serde_yaml::to_string(&problem).unwrap();

    let from_json: TimetableProblem = Format::Json.parse(&json).unwrap();
    let from_yaml: TimetableProblem = Format::Yaml.parse(&yaml).unwrap();
    assert_eq!(from_json, problem);
    assert_eq!(from_yaml, problem);
}

#[test]
fn test_problem_from_toml() {
    let toml = r#"
        teacher_blocks = { Ana = [[0, 0], [4, 4]] }

        [classes]
        6A = 25

        [[curriculum]]
        teacher = "Ana"
        subject = "Math"
        class = "6A"
        quantity = 5
    "#;

    let problem: TimetableProblem = Format::Toml.parse(toml).unwrap();
    assert_eq!(problem.curriculum.len(), 1);
    assert_eq!(problem.teacher_blocks["Ana"].len(), 2);
    assert!(problem.validate().is_ok());
}

#[test]
fn test_load_raw_problem() {
    let dir = tempfile::tempdir().unwrap();
    let path = write_file(
        &dir,
        "school.yaml",
        r#"
classes:
  6A: 25
rows:
  - teacher: "Prof. Ana"
    subject: Math
    target_classes: "6A"
    quantity: 4
    unavailability: "seg:1"
"#,
    );

    let problem = load_problem(&path, true).unwrap();
    assert_eq!(problem.curriculum[0].teacher.as_str(), "Ana");
    assert_eq!(problem.teacher_blocks["Ana"].len(), 1);
}

#[test]
fn test_load_errors() {
    let dir = tempfile::tempdir().unwrap();

    let missing = dir.path().join("missing.json");
    assert!(matches!(load_problem(&missing, false), Err(CliError::Io { .. })));

    let broken = write_file(&dir, "broken.json", "{ not json");
    assert!(matches!(load_problem(&broken, false), Err(CliError::Parse { .. })));

    let csv = write_file(&dir, "school.csv", "a,b");
    assert!(matches!(
        load_problem(&csv, false),
        Err(CliError::UnsupportedFormat { .. })
    ));
}

#[test]
fn test_load_config() {
    let dir = tempfile::tempdir().unwrap();
    let path = write_file(&dir, "config.yaml", "sync_scope: school\n");

    assert_eq!(load_config(None).unwrap(), Default::default());
    assert_eq!(load_config(Some(&path)).unwrap().sync_scope, SyncScope::School);
}
