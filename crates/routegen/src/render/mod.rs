/// Output renderer for generated route artifacts
///
/// [`render`] is pure; [`write_artifacts`] is the only function in the crate
/// that writes files. Generation only ever rewrites the three artifacts
/// named here and leaves every other file in the output directory alone.

use std::fs;
use std::path::{Path, PathBuf};

use tracing::{debug, info};

use crate::table::RouteManifest;
use crate::{Error, Result};

pub mod typescript;

pub const TYPES_FILE: &str = "types.ts";
pub const ROUTES_FILE: &str = "routes.ts";
pub const INDEX_FILE: &str = "index.ts";

/// Rendered bodies of the artifact trio
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Artifacts {
    /// Route unions and parameter map type
    pub types: String,
    /// Route table and matching/building helpers
    pub routes: String,
    /// Re-exports of both
    pub index: String,
}

impl Artifacts {
    /// File name and body of each artifact, in write order
    pub fn files(&self) -> [(&'static str, &str); 3] {
        [
            (TYPES_FILE, self.types.as_str()),
            (ROUTES_FILE, self.routes.as_str()),
            (INDEX_FILE, self.index.as_str()),
        ]
    }
}

/// Renders all artifacts for a manifest (pure function)
pub fn render<M>(manifest: &RouteManifest<M>) -> Artifacts {
    Artifacts {
        types: typescript::render_types(manifest),
        routes: typescript::render_routes(manifest),
        index: typescript::render_index(),
    }
}

/// What happened to one artifact on disk
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WriteStatus {
    Written,
    /// Existing file already had identical bytes
    Unchanged,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WrittenFile {
    pub path: PathBuf,
    pub status: WriteStatus,
}

/// Writes the artifact trio into `out_dir`, creating directories as needed
///
/// Files whose current content already matches are not rewritten, so an
/// unchanged tree leaves modification times alone. A failure part-way may
/// leave some artifacts updated and others not; the next run regenerates
/// all three.
pub fn write_artifacts(artifacts: &Artifacts, out_dir: &Path) -> Result<Vec<WrittenFile>> {
    fs::create_dir_all(out_dir).map_err(|source| Error::Write {
        path: out_dir.to_path_buf(),
        source,
    })?;

    artifacts
        .files()
        .into_iter()
        .map(|(name, body)| write_if_changed(&out_dir.join(name), body))
        .collect()
}

fn write_if_changed(path: &Path, body: &str) -> Result<WrittenFile> {
    let unchanged = fs::read(path).map_or(false, |existing| existing == body.as_bytes());
    if unchanged {
        debug!(file = %path.display(), "artifact unchanged");
        return Ok(WrittenFile {
            path: path.to_path_buf(),
            status: WriteStatus::Unchanged,
        });
    }

    fs::write(path, body).map_err(|source| Error::Write {
        path: path.to_path_buf(),
        source,
    })?;
    info!(file = %path.display(), "wrote artifact");

    Ok(WrittenFile {
        path: path.to_path_buf(),
        status: WriteStatus::Written,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::RouteRecord;
    use tempfile::TempDir;

    fn artifacts() -> Artifacts {
        render(&RouteManifest::from_records(&[
            RouteRecord::new("page.tsx", "/"),
            RouteRecord::new("page.tsx", "/user/[id]"),
        ]))
    }

    #[test]
    fn test_write_creates_nested_output_dir() {
        let dir = TempDir::new().unwrap();
        let out = dir.path().join("src/generated/routes");

        let written = write_artifacts(&artifacts(), &out).unwrap();

        assert_eq!(written.len(), 3);
        assert!(written.iter().all(|f| f.status == WriteStatus::Written));
        for name in [TYPES_FILE, ROUTES_FILE, INDEX_FILE] {
            assert!(out.join(name).is_file(), "{name} missing");
        }
    }

    #[test]
    fn test_rewrite_is_unchanged_and_keeps_other_files() {
        let dir = TempDir::new().unwrap();
        fs::write(dir.path().join("build-path.ts"), "// mine").unwrap();

        write_artifacts(&artifacts(), dir.path()).unwrap();
        let second = write_artifacts(&artifacts(), dir.path()).unwrap();

        assert!(second.iter().all(|f| f.status == WriteStatus::Unchanged));
        assert_eq!(
            fs::read_to_string(dir.path().join("build-path.ts")).unwrap(),
            "// mine"
        );
    }

    #[test]
    fn test_write_into_file_path_fails_with_destination() {
        let dir = TempDir::new().unwrap();
        let blocker = dir.path().join("out");
        fs::write(&blocker, "not a directory").unwrap();

        let err = write_artifacts(&artifacts(), &blocker).unwrap_err();
        match err {
            Error::Write { path, .. } => assert_eq!(path, blocker),
            other => panic!("unexpected error: {other}"),
        }
    }
}
