use std::path::PathBuf;

use guidesmith::config::Config;

#[test]
fn load_reads_explicit_file() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("config.toml");
    std::fs::write(
        &path,
        "[import]\nmax_import_bytes = 2048\n\n[database]\npath = \"/tmp/g.db\"\n",
    )
    .unwrap();

    let config = Config::load(Some(&path)).unwrap();
    assert_eq!(config.import.max_import_bytes, 2048);
    assert_eq!(config.database.path, Some(PathBuf::from("/tmp/g.db")));
}

#[test]
fn load_missing_explicit_file_fails() {
    let dir = tempfile::tempdir().unwrap();
    assert!(Config::load(Some(&dir.path().join("absent.toml"))).is_err());
}

#[test]
fn empty_file_means_defaults() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("config.toml");
    std::fs::write(&path, "").unwrap();

    let config = Config::load(Some(&path)).unwrap();
    assert_eq!(config.import.max_import_bytes, 1024 * 1024);
    assert!(config.database.path.is_none());
}
