//! Read access to generated documents.

use std::path::{Path, PathBuf};

use bkb_core::DocumentKey;

use crate::error::FetchError;
use crate::fence::unwrap_fenced;

/// The output tree, opened for reading.
#[derive(Debug, Clone)]
pub struct DocumentStore {
    root: PathBuf,
}

impl DocumentStore {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    #[must_use]
    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Raw document text as generated.
    ///
    /// # Errors
    ///
    /// [`FetchError::NotFound`] when the document was never built,
    /// [`FetchError::Io`] for any other read failure.
    pub fn fetch(&self, key: &DocumentKey) -> Result<String, FetchError> {
        let path = key.path_in(&self.root);
        std::fs::read_to_string(&path).map_err(|source| {
            if source.kind() == std::io::ErrorKind::NotFound {
                FetchError::NotFound { path }
            } else {
                FetchError::Io { path, source }
            }
        })
    }

    /// Document text ready to render: any wrapping document fence removed.
    ///
    /// # Errors
    ///
    /// See [`Self::fetch`].
    pub fn fetch_rendered(&self, key: &DocumentKey) -> Result<String, FetchError> {
        self.fetch(key).map(|text| unwrap_fenced(&text).into_owned())
    }
}

#[cfg(test)]
mod tests {
    use bkb_core::BiomarkerRecord;

    use super::*;

    #[test]
    fn fetches_and_unwraps() {
        let dir = tempfile::tempdir().unwrap();
        let key = BiomarkerRecord::new(1, "Lipids", "LDL", "低密度脂蛋白").key();
        let path = key.path_in(dir.path());
        std::fs::create_dir_all(path.parent().unwrap()).unwrap();
        std::fs::write(&path, "```markdown\nHello\n```").unwrap();

        let store = DocumentStore::new(dir.path());
        assert_eq!(store.fetch(&key).unwrap(), "```markdown\nHello\n```");
        assert_eq!(store.fetch_rendered(&key).unwrap(), "Hello");
    }

    #[test]
    fn missing_document_is_not_found() {
        let dir = tempfile::tempdir().unwrap();
        let key = BiomarkerRecord::new(2, "Liver", "ALT", "谷丙转氨酶").key();
        let err = DocumentStore::new(dir.path()).fetch(&key).unwrap_err();
        assert!(matches!(err, FetchError::NotFound { .. }));
        assert!(err.to_string().contains("002|ALT|谷丙转氨酶.md"));
    }
}
