//! Tests for snapshot output.

use tempfile::TempDir;

use crate::output::mock::MockWriter;
use crate::output::{FileOutput, OutputError, SnapshotWriter};

mod file_output {
    use super::*;

    #[tokio::test]
    async fn write_creates_file_with_exact_bytes() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("ip_info.json");
        let output = FileOutput::new(&path);

        output.write(b"[\n\t{}\n]").await.unwrap();

        assert_eq!(std::fs::read(&path).unwrap(), b"[\n\t{}\n]");
    }

    #[tokio::test]
    async fn write_replaces_previous_contents() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("ip_info.json");
        let output = FileOutput::new(&path);

        output.write(b"a much longer first snapshot").await.unwrap();
        output.write(b"[]").await.unwrap();

        assert_eq!(std::fs::read(&path).unwrap(), b"[]");
    }

    #[tokio::test]
    async fn write_creates_parent_directories() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("nested").join("deeper").join("out.json");
        let output = FileOutput::new(&path);

        output.write(b"[]").await.unwrap();

        assert!(path.exists());
    }

    #[tokio::test]
    async fn write_leaves_no_temp_file_behind() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("out.json");
        let output = FileOutput::new(&path);

        output.write(b"[]").await.unwrap();

        assert!(!dir.path().join("out.json.tmp").exists());
    }

    #[tokio::test]
    async fn write_into_a_file_path_parent_fails() {
        let dir = TempDir::new().unwrap();
        let blocker = dir.path().join("not_a_dir");
        std::fs::write(&blocker, b"x").unwrap();
        let output = FileOutput::new(blocker.join("out.json"));

        let result = output.write(b"[]").await;

        assert!(matches!(result, Err(OutputError::Write(_))));
    }

    #[tokio::test]
    async fn failed_rename_removes_temp_file() {
        let dir = TempDir::new().unwrap();
        // A non-empty directory cannot be replaced by a file
        let path = dir.path().join("out.json");
        std::fs::create_dir(&path).unwrap();
        std::fs::write(path.join("keep"), b"x").unwrap();
        let output = FileOutput::new(&path);

        let result = output.write(b"[]").await;

        assert!(matches!(result, Err(OutputError::Write(_))));
        assert!(!dir.path().join("out.json.tmp").exists());
        assert!(path.join("keep").exists());
    }

    #[cfg(target_os = "linux")]
    #[tokio::test]
    async fn non_utf8_file_name_is_kept_byte_for_byte() {
        use std::ffi::OsStr;
        use std::os::unix::ffi::OsStrExt;

        let dir = TempDir::new().unwrap();
        let path = dir.path().join(OsStr::from_bytes(b"snap\xff.json"));
        let output = FileOutput::new(&path);

        output.write(b"[]").await.unwrap();

        assert_eq!(std::fs::read(&path).unwrap(), b"[]");
        let names: Vec<_> = std::fs::read_dir(dir.path())
            .unwrap()
            .map(|entry| entry.unwrap().file_name())
            .collect();
        assert_eq!(names, vec![OsStr::from_bytes(b"snap\xff.json").to_os_string()]);
    }

    #[test]
    fn path_returns_configured_path() {
        let output = FileOutput::new("some/dir/ip_info.json");
        assert_eq!(output.path(), std::path::Path::new("some/dir/ip_info.json"));
    }
}

mod mock_writer {
    use super::*;

    #[tokio::test]
    async fn records_successful_writes() {
        let writer = MockWriter::new();

        writer.write(b"one").await.unwrap();
        writer.write(b"two").await.unwrap();

        assert_eq!(writer.writes(), vec![b"one".to_vec(), b"two".to_vec()]);
        assert_eq!(writer.attempts(), 2);
    }

    #[tokio::test]
    async fn scripted_failure_is_not_recorded() {
        let writer = MockWriter::scripted(&[true]);

        assert!(writer.write(b"one").await.is_err());
        writer.write(b"two").await.unwrap();

        assert_eq!(writer.writes(), vec![b"two".to_vec()]);
        assert_eq!(writer.attempts(), 2);
    }
}

#[test]
fn write_error_displays_source() {
    let error = OutputError::Write(std::io::Error::other("disk full"));
    assert!(error.to_string().contains("disk full"));
}
