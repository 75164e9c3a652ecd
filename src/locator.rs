//! Maps docset names to their directories under the docsets root.

use crate::error::{DocsetError, DocsetResult};
use std::fs;
use std::path::{Path, PathBuf};

/// Index database file inside `Contents/Resources`.
pub const INDEX_FILE: &str = "docSet.dsidx";

const DOCSET_EXT: &str = "docset";

/// Resolves installed docsets under a root directory.
///
/// Nothing is cached: every call looks at the filesystem, so a docset
/// removed mid-session surfaces as `DocsetError::NotFound` the next time
/// it is resolved.
#[derive(Debug, Clone)]
pub struct DocsetLocator {
    root: PathBuf,
}

impl DocsetLocator {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    #[must_use]
    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Resolves the `.docset` directory for `name`.
    ///
    /// First existing directory wins:
    /// 1. `<root>/<name>.docset`
    /// 2. `<root>/<name>/<name>.docset`
    /// 3. the first `*.docset` entry directly inside `<root>/<name>/`
    ///    (archives that extract into an inconsistently named folder)
    ///
    /// # Errors
    ///
    /// Returns `DocsetError::NotFound` if none of the layouts exist.
    pub fn locate(&self, name: &str) -> DocsetResult<PathBuf> {
        let file_name = format!("{name}.{DOCSET_EXT}");

        let direct = self.root.join(&file_name);
        if direct.is_dir() {
            return Ok(direct);
        }

        let folder = self.root.join(name);
        let nested = folder.join(&file_name);
        if nested.is_dir() {
            return Ok(nested);
        }

        first_docset_in(&folder).ok_or_else(|| DocsetError::NotFound {
            name: name.to_string(),
        })
    }

    /// Path of the index database, `<docset>/Contents/Resources/docSet.dsidx`.
    ///
    /// # Errors
    ///
    /// Returns `DocsetError::NotFound` if the docset directory does not resolve.
    pub fn db_path(&self, name: &str) -> DocsetResult<PathBuf> {
        Ok(resources_dir(&self.locate(name)?).join(INDEX_FILE))
    }

    /// Directory holding the docset's HTML payload.
    ///
    /// # Errors
    ///
    /// Returns `DocsetError::NotFound` if the docset directory does not resolve.
    pub fn documents_dir(&self, name: &str) -> DocsetResult<PathBuf> {
        Ok(resources_dir(&self.locate(name)?).join("Documents"))
    }

    /// Lists the names of installed docsets, sorted and deduplicated.
    ///
    /// A name is installed if [`locate`](Self::locate) would resolve it:
    /// either `<root>/<name>.docset` or a `<root>/<name>/` folder holding a
    /// `.docset` directory. An unreadable root yields an empty list.
    #[must_use]
    pub fn installed(&self) -> Vec<String> {
        let Ok(entries) = fs::read_dir(&self.root) else {
            return Vec::new();
        };

        let mut names: Vec<String> = entries
            .filter_map(Result::ok)
            .filter(|entry| entry.path().is_dir())
            .filter_map(|entry| {
                let path = entry.path();
                let name = path.file_name()?.to_str()?.to_string();
                match name.strip_suffix(".docset") {
                    Some(stem) => Some(stem.to_string()),
                    None => first_docset_in(&path).map(|_| name),
                }
            })
            .collect();

        names.sort();
        names.dedup();
        names
    }
}

fn resources_dir(docset: &Path) -> PathBuf {
    docset.join("Contents").join("Resources")
}

/// First `*.docset` directory directly inside `folder`, by sorted file name
/// so the choice is stable across platforms.
fn first_docset_in(folder: &Path) -> Option<PathBuf> {
    let mut candidates: Vec<PathBuf> = fs::read_dir(folder)
        .ok()?
        .filter_map(Result::ok)
        .map(|entry| entry.path())
        .filter(|path| {
            path.is_dir() && path.extension().and_then(|e| e.to_str()) == Some(DOCSET_EXT)
        })
        .collect();
    candidates.sort();
    candidates.into_iter().next()
}
