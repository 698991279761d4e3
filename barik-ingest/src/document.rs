//! Page-text provider boundary.
//!
//! The provider hands out the positioned fragments of one page at a time;
//! this is the only place the pipeline may wait. [`PagedDocument`] is the
//! in-memory provider backed by a JSON dump:
//!
//! ```json
//! [[{"text": "1043", "x": 40.1, "y": 701.0}, ...], ...]
//! ```

use std::future::Future;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::IngestError;
use crate::types::TextFragment;

pub trait PageSource {
    fn page_count(&self) -> usize;

    /// Fragments of page `page`, 1-based.
    fn page_fragments(
        &self,
        page: usize,
    ) -> impl Future<Output = Result<Vec<TextFragment>, IngestError>> + Send;
}

/// A statement already extracted to fragments, one `Vec` per page.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct PagedDocument {
    pub pages: Vec<Vec<TextFragment>>,
}

impl PagedDocument {
    pub fn new(pages: Vec<Vec<TextFragment>>) -> Self {
        Self { pages }
    }

    pub fn from_json_str(s: &str) -> Result<Self, IngestError> {
        Ok(serde_json::from_str(s)?)
    }

    pub async fn load(path: impl AsRef<Path>) -> Result<Self, IngestError> {
        let path = path.as_ref();
        let s = tokio::fs::read_to_string(path)
            .await
            .map_err(|source| IngestError::Io {
                path: path.to_path_buf(),
                source,
            })?;
        Self::from_json_str(&s)
    }
}

impl PageSource for PagedDocument {
    fn page_count(&self) -> usize {
        self.pages.len()
    }

    async fn page_fragments(&self, page: usize) -> Result<Vec<TextFragment>, IngestError> {
        page.checked_sub(1)
            .and_then(|i| self.pages.get(i))
            .cloned()
            .ok_or(IngestError::PageOutOfRange {
                page,
                count: self.pages.len(),
            })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parses_json_dump() {
        let doc = PagedDocument::from_json_str(
            r#"[[{"text": "1043", "x": 40.5, "y": 700}], []]"#,
        )
        .unwrap();
        assert_eq!(doc.page_count(), 2);
        assert_eq!(doc.pages[0][0], TextFragment::new("1043", 40.5, 700.0));
        assert!(doc.pages[1].is_empty());
    }

    #[test]
    fn test_rejects_malformed_dump() {
        let err = PagedDocument::from_json_str(r#"{"pages": 3}"#).unwrap_err();
        assert!(matches!(err, IngestError::Json(_)));
    }

    #[tokio::test]
    async fn test_pages_are_one_based() {
        let doc = PagedDocument::new(vec![vec![TextFragment::new("a", 0.0, 0.0)]]);
        assert_eq!(doc.page_fragments(1).await.unwrap().len(), 1);
        assert!(matches!(
            doc.page_fragments(0).await,
            Err(IngestError::PageOutOfRange { page: 0, count: 1 })
        ));
        assert!(doc.page_fragments(2).await.is_err());
    }

    #[tokio::test]
    async fn test_load_missing_file() {
        let err = PagedDocument::load("/nonexistent/pages.json").await.unwrap_err();
        assert!(matches!(err, IngestError::Io { .. }));
        assert!(err.to_string().contains("/nonexistent/pages.json"));
    }
}
