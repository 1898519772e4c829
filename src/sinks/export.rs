use std::fs;
use std::io::{Cursor, Write};
use std::panic::{self, AssertUnwindSafe};
use std::path::{Path, PathBuf};
use std::thread;

use zip::write::FileOptions;
use zip::{CompressionMethod, ZipWriter};

use crate::error::{PlaygroundError, Result};
use crate::state::ArchiveEntry;

pub const DEFAULT_ARCHIVE_NAME: &str = "project.zip";

/// Packs every file of the project into a single zip archive.
#[derive(Debug, Clone)]
pub struct ArchiveExporter {
    archive_name: String,
    output_dir: PathBuf,
}

impl ArchiveExporter {
    pub fn new(output_dir: impl Into<PathBuf>) -> Self {
        Self {
            archive_name: DEFAULT_ARCHIVE_NAME.to_string(),
            output_dir: output_dir.into(),
        }
    }

    pub fn with_name(mut self, archive_name: impl Into<String>) -> Self {
        self.archive_name = archive_name.into();
        self
    }

    pub fn destination(&self) -> PathBuf {
        self.output_dir.join(&self.archive_name)
    }

    pub fn build(entries: &[ArchiveEntry]) -> Result<Vec<u8>> {
        let mut zip = ZipWriter::new(Cursor::new(Vec::new()));
        let options = FileOptions::default()
            .compression_method(CompressionMethod::Deflated)
            .unix_permissions(0o644);

        for entry in entries {
            zip.start_file(entry.name.as_str(), options)?;
            zip.write_all(entry.contents.as_bytes())
                .map_err(|e| generation_error(&entry.name, e))?;
        }

        let cursor = zip.finish()?;
        Ok(cursor.into_inner())
    }

    pub fn export(&self, entries: &[ArchiveEntry]) -> Result<PathBuf> {
        let bytes = Self::build(entries)?;
        let path = self.destination();
        write_archive(&path, &bytes)?;
        log::info!("exported {} files to {}", entries.len(), path.display());
        Ok(path)
    }

    /// Exports on a worker thread and hands the outcome to `done` exactly
    /// once.
    pub fn spawn<F>(&self, entries: Vec<ArchiveEntry>, done: F)
    where
        F: FnOnce(Result<PathBuf>) + Send + 'static,
    {
        let exporter = self.clone();
        thread::spawn(move || {
            let outcome = run_guarded(|| exporter.export(&entries));
            if let Err(e) = &outcome {
                log::error!("archive export failed: {}", e);
            }
            done(outcome);
        });
    }
}

/// Runs `job`, turning a panic into an archive error so the caller always
/// hears back.
fn run_guarded<T>(job: impl FnOnce() -> Result<T>) -> Result<T> {
    panic::catch_unwind(AssertUnwindSafe(job)).unwrap_or_else(|payload| {
        let reason = payload
            .downcast_ref::<&str>()
            .map(|s| s.to_string())
            .or_else(|| payload.downcast_ref::<String>().cloned())
            .unwrap_or_else(|| "worker panicked".to_string());
        Err(PlaygroundError::ArchiveGeneration(reason))
    })
}

fn write_archive(path: &Path, bytes: &[u8]) -> Result<()> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent).map_err(|e| generation_error(&parent.display(), e))?;
    }
    fs::write(path, bytes).map_err(|e| generation_error(&path.display(), e))
}

fn generation_error(what: &dyn std::fmt::Display, err: std::io::Error) -> PlaygroundError {
    PlaygroundError::ArchiveGeneration(format!("{}: {}", what, err))
}

#[cfg(test)]
mod tests {
    use std::io::Read;
    use std::sync::mpsc;
    use std::time::Duration;

    use super::*;
    use crate::core::TextEditorFactory;
    use crate::state::FileManager;

    fn read_archive(bytes: Vec<u8>) -> Vec<(String, String)> {
        let mut archive = zip::ZipArchive::new(Cursor::new(bytes)).unwrap();
        (0..archive.len())
            .map(|i| {
                let mut file = archive.by_index(i).unwrap();
                let mut contents = String::new();
                file.read_to_string(&mut contents).unwrap();
                (file.name().to_string(), contents)
            })
            .collect()
    }

    #[test]
    fn test_archive_contains_every_file() {
        let mut files = FileManager::new(TextEditorFactory::default());
        files.import_file("data.json", b"[1, 2]").unwrap();
        files.create_file("notes.txt").unwrap();

        let entries = files.registry().entries();
        let archived = read_archive(ArchiveExporter::build(&entries).unwrap());

        let names: Vec<&str> = archived.iter().map(|(n, _)| n.as_str()).collect();
        assert_eq!(names, files.registry().names());
        for (name, contents) in &archived {
            assert_eq!(contents, &files.registry().get(name).unwrap().text());
        }
    }

    #[test]
    fn test_export_is_repeatable() {
        let files = FileManager::new(TextEditorFactory::default());
        let first = read_archive(ArchiveExporter::build(&files.registry().entries()).unwrap());
        let second = read_archive(ArchiveExporter::build(&files.registry().entries()).unwrap());
        assert_eq!(first, second);
    }

    #[test]
    fn test_export_writes_named_archive() {
        let dir = tempfile::tempdir().unwrap();
        let exporter = ArchiveExporter::new(dir.path()).with_name("site.zip");
        let entries = vec![ArchiveEntry {
            name: "index.html".to_string(),
            contents: "<p>x</p>".to_string(),
        }];

        let path = exporter.export(&entries).unwrap();
        assert_eq!(path, dir.path().join("site.zip"));
        let archived = read_archive(fs::read(&path).unwrap());
        assert_eq!(archived, vec![("index.html".to_string(), "<p>x</p>".to_string())]);
    }

    #[test]
    fn test_export_failure_is_reported() {
        let dir = tempfile::tempdir().unwrap();
        let blocker = dir.path().join("blocker");
        fs::write(&blocker, "not a directory").unwrap();

        let exporter = ArchiveExporter::new(blocker.join("out"));
        let result = exporter.export(&[]);
        assert!(matches!(result, Err(PlaygroundError::ArchiveGeneration(_))));
    }

    #[test]
    fn test_spawn_reports_once() {
        let dir = tempfile::tempdir().unwrap();
        let exporter = ArchiveExporter::new(dir.path());
        let (tx, rx) = mpsc::channel();

        exporter.spawn(Vec::new(), move |outcome| {
            tx.send(outcome).unwrap();
        });

        let outcome = rx.recv_timeout(Duration::from_secs(10)).unwrap();
        assert_eq!(outcome.unwrap(), dir.path().join(DEFAULT_ARCHIVE_NAME));
        assert!(rx.recv_timeout(Duration::from_millis(50)).is_err());
    }

    #[test]
    fn test_panicking_job_becomes_error() {
        let outcome: Result<PathBuf> = run_guarded(|| panic!("zip writer exploded"));
        match outcome {
            Err(PlaygroundError::ArchiveGeneration(reason)) => {
                assert_eq!(reason, "zip writer exploded")
            }
            other => panic!("unexpected {:?}", other),
        }
        assert!(matches!(run_guarded(|| Ok(1)), Ok(1)));
    }
}
