use tempfile::TempDir;

/// Creates a unique temporary directory for config and log files.
/// The directory is automatically cleaned up when the returned `TempDir` is dropped.
///
/// Keep the returned `TempDir` in scope for as long as you need the files.
pub fn setup_test_config_dir() -> TempDir {
    TempDir::new().expect("failed to create tempdir")
}
