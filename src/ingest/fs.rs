//! ingest::fs
//!
//! Directory-based ingestion.
//!
//! # Steps
//!
//! 1. The line folder `<upload_dir>/<line>` must exist
//! 2. `DocDelim` must contain `Cartografia`, `Taules` and `Fotografies`
//! 3. Take the line lock
//! 4. Remove stale workspaces of the line
//! 5. Every required layer and table must be present
//! 6. Copy the entities into a fresh workspace
//! 7. Load the copies into the typed layer store
//! 8. List the photos
//! 9. Fingerprint the copied entities
//!
//! Any failure aborts with an [`IngestError`]. Once the workspace exists,
//! a failure removes it again before returning.

use std::collections::BTreeSet;
use std::fs;
use std::path::{Path, PathBuf};

use crate::core::ops::lock::LineLock;
use crate::core::paths::{entity_file, SubmissionPaths, WorkPaths, DOC_DIR, REQUIRED_SUBDIRS};
use crate::core::types::{Fingerprint, LineId};
use crate::store::{entity, LayerStore, LoadError, RawLayer, RawLayers};

use super::workspace::{cleanup_stale, Workspace};
use super::{IngestError, Ingest, Submission};

/// Ingests submissions from an upload folder.
#[derive(Debug, Clone)]
pub struct DirectoryIngest {
    upload_dir: PathBuf,
    work: WorkPaths,
    photo_extensions: Vec<String>,
}

impl DirectoryIngest {
    pub fn new(upload_dir: impl Into<PathBuf>, work_dir: impl Into<PathBuf>) -> Self {
        Self {
            upload_dir: upload_dir.into(),
            work: WorkPaths::new(work_dir.into()),
            photo_extensions: vec!["jpg".to_string()],
        }
    }

    /// Photo extensions to list, compared case-insensitively.
    pub fn with_photo_extensions(mut self, extensions: Vec<String>) -> Self {
        self.photo_extensions = extensions.into_iter().map(|e| e.to_lowercase()).collect();
        self
    }

    fn check_tree(&self, paths: &SubmissionPaths) -> Result<(), IngestError> {
        let line_dir = paths.line_dir();
        if !line_dir.is_dir() {
            return Err(IngestError::LineFolderMissing {
                line: paths.line(),
                path: line_dir,
            });
        }

        let doc_dir = paths.doc_dir();
        let missing: Vec<String> = if doc_dir.is_dir() {
            REQUIRED_SUBDIRS
                .iter()
                .filter(|name| !paths.subdir(name).is_dir())
                .map(|name| name.to_string())
                .collect()
        } else {
            vec![DOC_DIR.to_string()]
        };

        if missing.is_empty() {
            Ok(())
        } else {
            Err(IngestError::InvalidTree {
                path: doc_dir,
                missing,
            })
        }
    }

    fn check_entities(&self, paths: &SubmissionPaths) -> Result<(), IngestError> {
        let absent = |names: &[&str]| -> Vec<String> {
            names
                .iter()
                .filter(|name| !paths.entity_path(name).is_file())
                .map(|name| name.to_string())
                .collect()
        };
        let layers = absent(&entity::LAYERS[..]);
        let tables = absent(&entity::TABLES[..]);

        if layers.is_empty() && tables.is_empty() {
            Ok(())
        } else {
            Err(IngestError::MissingEntities { layers, tables })
        }
    }

    /// Copy one entity into the workspace and read the copy back.
    fn copy_entity(
        &self,
        paths: &SubmissionPaths,
        workspace: &Workspace,
        name: &str,
    ) -> Result<String, IngestError> {
        let copy = workspace.dir().join(entity_file(name));
        fs::copy(paths.entity_path(name), &copy).map_err(|e| IngestError::Copy {
            entity: name.to_string(),
            source: e,
        })?;
        let text = fs::read_to_string(&copy).map_err(|e| LoadError::Read {
            entity: name.to_string(),
            path: copy.clone(),
            source: e,
        })?;
        Ok(text)
    }

    /// Copy, load and fingerprint into an existing workspace.
    fn load_into(
        &self,
        paths: &SubmissionPaths,
        workspace: &Workspace,
    ) -> Result<(LayerStore, Fingerprint, BTreeSet<String>), IngestError> {
        let segments = self.copy_entity(paths, workspace, entity::LINE_SEGMENTS)?;
        let points = self.copy_entity(paths, workspace, entity::MARKER_POINTS)?;
        let proposals = self.copy_entity(paths, workspace, entity::PROPOSALS)?;
        let found_markers = self.copy_entity(paths, workspace, entity::FOUND_MARKERS)?;

        let raw = RawLayers {
            segments: RawLayer::from_json(entity::LINE_SEGMENTS, &segments)?,
            points: RawLayer::from_json(entity::MARKER_POINTS, &points)?,
            proposals: RawLayer::from_json(entity::PROPOSALS, &proposals)?,
            found_markers: RawLayer::from_json(entity::FOUND_MARKERS, &found_markers)?,
        };
        let layers = LayerStore::from_raw(&raw)?;

        let fingerprint = Fingerprint::compute(&[
            (entity::LINE_SEGMENTS, segments.as_bytes()),
            (entity::MARKER_POINTS, points.as_bytes()),
            (entity::PROPOSALS, proposals.as_bytes()),
            (entity::FOUND_MARKERS, found_markers.as_bytes()),
        ]);

        let photos = list_photos(&paths.photos_dir(), &self.photo_extensions)?;

        Ok((layers, fingerprint, photos))
    }
}

impl Ingest for DirectoryIngest {
    fn ingest(&self, line: LineId) -> Result<Submission, IngestError> {
        let paths = SubmissionPaths::new(self.upload_dir.clone(), line);

        self.check_tree(&paths)?;

        let lock = LineLock::acquire(&self.work, line)?;

        let cleaned = cleanup_stale(&self.work, line).map_err(IngestError::Cleanup)?;
        if !cleaned.removed.is_empty() {
            tracing::info!(%line, removed = cleaned.removed.len(), "removed stale workspaces");
        }

        self.check_entities(&paths)?;

        let workspace = Workspace::create(&self.work, line).map_err(IngestError::Workspace)?;
        match self.load_into(&paths, &workspace) {
            Ok((layers, fingerprint, photos)) => {
                tracing::debug!(
                    %line,
                    workspace = %workspace.dir().display(),
                    segments = layers.segments().len(),
                    points = layers.points().len(),
                    photos = photos.len(),
                    "submission ingested"
                );
                Ok(Submission::new(line, layers)
                    .with_photos(photos)
                    .with_fingerprint(fingerprint)
                    .with_guard(lock, workspace))
            }
            Err(e) => {
                if let Err(cleanup) = workspace.remove() {
                    tracing::warn!(error = %cleanup, "failed to remove workspace after ingest error");
                }
                Err(e)
            }
        }
    }
}

/// Regular files in `dir` whose extension is in `extensions`.
fn list_photos(dir: &Path, extensions: &[String]) -> Result<BTreeSet<String>, IngestError> {
    let photos_err = |e: std::io::Error| IngestError::Photos {
        path: dir.to_path_buf(),
        source: e,
    };

    let mut photos = BTreeSet::new();
    for entry in fs::read_dir(dir).map_err(photos_err)? {
        let entry = entry.map_err(photos_err)?;
        if !entry.file_type().map_err(photos_err)?.is_file() {
            continue;
        }
        let path = entry.path();
        let matches = path
            .extension()
            .map(|ext| ext.to_string_lossy().to_lowercase())
            .is_some_and(|ext| extensions.contains(&ext));
        if matches {
            photos.insert(entry.file_name().to_string_lossy().into_owned());
        }
    }
    Ok(photos)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::paths::{CARTOGRAPHY_DIR, PHOTOS_DIR, TABLES_DIR};
    use tempfile::TempDir;

    const SEGMENTS: &str = r#"{"fields": ["ID_LINIA", "ID", "DATA", "COMENTARI", "P1", "P2", "P3", "P4", "PF", "ID_FITA1", "ID_FITA2", "geometry"],
        "features": [{"properties": {"ID_LINIA": 12, "ID": 1},
                      "geometry": {"type": "LineString", "coordinates": [[0.0, 0.0], [10.0, 0.0]]}}]}"#;
    const POINTS: &str = r#"{"fields": ["ID_PUNT", "ETIQUETA", "FOTOS", "CONTACTE", "geometry"],
        "features": [{"properties": {"ID_PUNT": "P-1", "ETIQUETA": "F-1"},
                      "geometry": {"type": "Point", "coordinates": [0.0, 0.0]}}]}"#;
    const PROPOSALS: &str = r#"{"fields": ["ID_PUNT", "PFF", "ESFITA", "ORDPF"],
        "features": [{"properties": {"ID_PUNT": "P-1", "PFF": 1, "ESFITA": 1, "ORDPF": 1}}]}"#;
    const FOUND: &str = r#"{"fields": ["ID_PUNT", "ID_FITA", "TROBADA", "AUX"], "features": []}"#;

    struct Fixture {
        _temp: TempDir,
        upload: PathBuf,
        work: PathBuf,
        line: LineId,
    }

    impl Fixture {
        fn new() -> Self {
            let temp = TempDir::new().unwrap();
            let upload = temp.path().join("upload");
            let work = temp.path().join("work");
            let line = LineId::new(12).unwrap();
            let paths = SubmissionPaths::new(upload.clone(), line);
            for dir in [CARTOGRAPHY_DIR, TABLES_DIR, PHOTOS_DIR] {
                fs::create_dir_all(paths.subdir(dir)).unwrap();
            }
            for (name, body) in [
                (entity::LINE_SEGMENTS, SEGMENTS),
                (entity::MARKER_POINTS, POINTS),
                (entity::PROPOSALS, PROPOSALS),
                (entity::FOUND_MARKERS, FOUND),
            ] {
                fs::write(paths.entity_path(name), body).unwrap();
            }
            fs::write(paths.photos_dir().join("F1.JPG"), b"jpeg").unwrap();
            fs::write(paths.photos_dir().join("notes.txt"), b"text").unwrap();
            Self {
                _temp: temp,
                upload,
                work,
                line,
            }
        }

        fn paths(&self) -> SubmissionPaths {
            SubmissionPaths::new(self.upload.clone(), self.line)
        }

        fn ingest(&self) -> DirectoryIngest {
            DirectoryIngest::new(&self.upload, &self.work)
        }
    }

    #[test]
    fn ingests_complete_submission() {
        let fx = Fixture::new();
        let mut submission = fx.ingest().ingest(fx.line).unwrap();

        assert_eq!(submission.layers.segments().len(), 1);
        assert_eq!(submission.layers.points().len(), 1);
        assert_eq!(submission.photos.iter().collect::<Vec<_>>(), ["F1.JPG"]);
        assert!(submission.fingerprint.is_some());

        let workspace = submission.workspace_dir().unwrap().to_path_buf();
        assert!(workspace.join("Punt.json").is_file());

        submission.release().unwrap();
        assert!(!workspace.exists());
    }

    #[test]
    fn fingerprint_is_stable_across_runs() {
        let fx = Fixture::new();
        let mut a = fx.ingest().ingest(fx.line).unwrap();
        a.release().unwrap();
        let mut b = fx.ingest().ingest(fx.line).unwrap();
        b.release().unwrap();
        assert_eq!(a.fingerprint, b.fingerprint);
    }

    #[test]
    fn missing_line_folder() {
        let fx = Fixture::new();
        let err = fx.ingest().ingest(LineId::new(99).unwrap()).unwrap_err();
        assert!(matches!(err, IngestError::LineFolderMissing { .. }));
    }

    #[test]
    fn missing_subfolder_is_invalid_tree() {
        let fx = Fixture::new();
        fs::remove_dir_all(fx.paths().photos_dir()).unwrap();
        let err = fx.ingest().ingest(fx.line).unwrap_err();
        assert!(
            matches!(err, IngestError::InvalidTree { ref missing, .. } if missing == &["Fotografies"])
        );
    }

    #[test]
    fn missing_doc_dir_is_invalid_tree() {
        let fx = Fixture::new();
        fs::remove_dir_all(fx.paths().doc_dir()).unwrap();
        let err = fx.ingest().ingest(fx.line).unwrap_err();
        assert!(err.to_string().contains("DocDelim"));
    }

    #[test]
    fn missing_table_reported_as_table() {
        let fx = Fixture::new();
        fs::remove_file(fx.paths().entity_path(entity::FOUND_MARKERS)).unwrap();
        let err = fx.ingest().ingest(fx.line).unwrap_err();
        assert_eq!(err.to_string(), "missing tables: PUNT_FIT");
    }

    #[test]
    fn second_concurrent_run_is_refused() {
        let fx = Fixture::new();
        let _first = fx.ingest().ingest(fx.line).unwrap();
        let err = fx.ingest().ingest(fx.line).unwrap_err();
        assert!(err.to_string().contains("another run"));
    }

    #[test]
    fn unreleased_workspace_is_cleaned_by_next_run() {
        let fx = Fixture::new();
        let first = fx.ingest().ingest(fx.line).unwrap();
        let stale = first.workspace_dir().unwrap().to_path_buf();
        drop(first);

        let mut second = fx.ingest().ingest(fx.line).unwrap();
        assert!(!stale.exists());
        second.release().unwrap();
    }

    #[test]
    fn load_failure_removes_workspace() {
        let fx = Fixture::new();
        fs::write(fx.paths().entity_path(entity::MARKER_POINTS), "{broken").unwrap();
        let err = fx.ingest().ingest(fx.line).unwrap_err();
        assert!(err.to_string().contains("Punt"));

        let runs = WorkPaths::new(fx.work.clone()).runs_dir();
        assert_eq!(fs::read_dir(runs).unwrap().count(), 0);
    }

    #[test]
    fn photo_extensions_are_configurable() {
        let fx = Fixture::new();
        let mut submission = fx
            .ingest()
            .with_photo_extensions(vec!["TXT".into()])
            .ingest(fx.line)
            .unwrap();
        assert_eq!(submission.photos.iter().collect::<Vec<_>>(), ["notes.txt"]);
        submission.release().unwrap();
    }
}
