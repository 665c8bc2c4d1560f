use std::path::{Path, PathBuf};

use walkdir::WalkDir;

use crate::errors::HarnessError;

/// Identity of one test: a display name and the vector file it runs.
///
/// The name is the vector file's stem, which is what the console lines and
/// both report formats key on.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TestCase {
    pub name: String,
    pub vector_path: PathBuf,
}

/// Discovers test-vector files for a run.
///
/// The returned list is sorted by path so that execution order, and with it
/// the order of rows in the reports, is deterministic across runs.
#[derive(Debug)]
pub struct TestDiscoverer;

impl TestDiscoverer {
    /// Scans a directory for `.hex` test vectors.
    ///
    /// An empty directory yields an empty list. A missing directory is a
    /// configuration error, reported before any test executes.
    pub fn discover<P: AsRef<Path>>(test_dir: P) -> Result<Vec<TestCase>, HarnessError> {
        let test_dir = test_dir.as_ref();
        if !test_dir.is_dir() {
            return Err(HarnessError::TestDirNotFound {
                path: test_dir.to_path_buf(),
            });
        }

        let mut vectors = Vec::new();
        for entry in WalkDir::new(test_dir) {
            let entry = entry?;
            if !entry.file_type().is_file() {
                continue;
            }
            let path = entry.path();
            if !Self::is_vector_file(path) {
                continue;
            }
            vectors.push(path.to_path_buf());
        }
        vectors.sort();

        Ok(vectors.into_iter().map(Self::case_for).collect())
    }

    fn case_for(vector_path: PathBuf) -> TestCase {
        let name = vector_path
            .file_stem()
            .map(|stem| stem.to_string_lossy().into_owned())
            .unwrap_or_else(|| vector_path.display().to_string());
        TestCase { name, vector_path }
    }

    /// Returns true if the given path has a .hex extension.
    fn is_vector_file(path: &Path) -> bool {
        path.extension().is_some_and(|ext| ext == "hex")
    }
}
