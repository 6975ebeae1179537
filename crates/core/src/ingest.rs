use crate::extractor::is_pdf;
use crate::models::{DocumentId, DocumentIdentity};
use crate::store::text_checksum;
use crate::traits::Extractor;
use crate::{ExtractError, IngestError};
use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::time::Duration;
use walkdir::WalkDir;

pub fn discover_pdf_files(folder: &Path) -> Vec<PathBuf> {
    let mut files: Vec<PathBuf> = WalkDir::new(folder)
        .into_iter()
        .filter_map(|item| item.ok())
        .filter(|entry| entry.file_type().is_file() && is_pdf(entry.path()))
        .map(|entry| entry.path().to_path_buf())
        .collect();

    files.sort_unstable();
    files
}

#[derive(Debug)]
pub struct SkippedPdf {
    pub path: PathBuf,
    pub reason: String,
}

#[derive(Debug, Default)]
pub struct IngestionReport {
    pub registered: Vec<DocumentId>,
    pub skipped_files: Vec<SkippedPdf>,
}

/// Runs a blocking extractor on the blocking pool, bounded by `timeout`.
///
/// Whitespace-only text counts as a failed extraction whatever the extractor says.
pub async fn extract_with_timeout(
    extractor: Arc<dyn Extractor + Send + Sync>,
    path: PathBuf,
    timeout: Duration,
) -> Result<String, IngestError> {
    let display = path.display().to_string();
    let task = tokio::task::spawn_blocking(move || extractor.extract(&path));

    let text = match tokio::time::timeout(timeout, task).await {
        Ok(joined) => joined??,
        Err(_) => return Err(ExtractError::Timeout(timeout).into()),
    };

    if text.trim().is_empty() {
        return Err(ExtractError::Empty(display).into());
    }

    Ok(text)
}

pub fn document_title(path: &Path) -> Result<String, IngestError> {
    path.file_name()
        .and_then(|name| name.to_str())
        .map(str::to_string)
        .ok_or_else(|| IngestError::MissingFileName(path.display().to_string()))
}

pub fn document_id(path: &Path, text: &str, identity: DocumentIdentity) -> Result<DocumentId, IngestError> {
    match identity {
        DocumentIdentity::ContentHash => Ok(DocumentId::new(text_checksum(text))),
        DocumentIdentity::Path => {
            let absolute = match std::fs::canonicalize(path) {
                Ok(canonical) => canonical,
                Err(_) if path.is_absolute() => path.to_path_buf(),
                Err(_) => std::env::current_dir()?.join(path),
            };
            Ok(DocumentId::new(absolute.to_string_lossy()))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs::{self, File};
    use std::io::Write;
    use tempfile::tempdir;

    struct SleepyExtractor(Duration);

    impl Extractor for SleepyExtractor {
        fn extract(&self, _path: &Path) -> Result<String, ExtractError> {
            std::thread::sleep(self.0);
            Ok("late text".to_string())
        }
    }

    struct BlankExtractor;

    impl Extractor for BlankExtractor {
        fn extract(&self, _path: &Path) -> Result<String, ExtractError> {
            Ok(" \n\t".to_string())
        }
    }

    #[test]
    fn discover_pdf_files_is_recursive_and_sorted() -> Result<(), Box<dyn std::error::Error>> {
        let dir = tempdir()?;
        let base = dir.path();
        let nested = base.join("nested");
        fs::create_dir(&nested)?;

        File::create(base.join("b.PDF")).and_then(|mut file| file.write_all(b"%PDF-1.4\n%fake"))?;
        File::create(nested.join("a.pdf"))
            .and_then(|mut file| file.write_all(b"%PDF-1.4\n%fake"))?;
        File::create(base.join("notes.txt"))?;

        let files = discover_pdf_files(base);
        assert_eq!(files, vec![base.join("b.PDF"), nested.join("a.pdf")]);
        Ok(())
    }

    #[test]
    fn content_hash_identity_ignores_location() -> Result<(), IngestError> {
        let first = document_id(Path::new("/a/x.pdf"), "same text", DocumentIdentity::ContentHash)?;
        let moved = document_id(Path::new("/b/y.pdf"), "same text", DocumentIdentity::ContentHash)?;
        assert_eq!(first, moved);
        Ok(())
    }

    #[test]
    fn path_identity_is_canonical() -> Result<(), Box<dyn std::error::Error>> {
        let dir = tempdir()?;
        let nested = dir.path().join("nested");
        fs::create_dir(&nested)?;
        fs::write(dir.path().join("doc.pdf"), b"x")?;

        let direct = document_id(&dir.path().join("doc.pdf"), "x", DocumentIdentity::Path)?;
        let dotted = document_id(&nested.join("../doc.pdf"), "x", DocumentIdentity::Path)?;
        assert_eq!(direct, dotted);
        Ok(())
    }

    #[test]
    fn title_is_file_name() -> Result<(), IngestError> {
        assert_eq!(document_title(Path::new("/tmp/manual.pdf"))?, "manual.pdf");
        assert!(document_title(Path::new("/")).is_err());
        Ok(())
    }

    #[tokio::test]
    async fn slow_extraction_times_out() {
        let result = extract_with_timeout(
            Arc::new(SleepyExtractor(Duration::from_millis(300))),
            PathBuf::from("slow.pdf"),
            Duration::from_millis(20),
        )
        .await;

        assert!(matches!(result, Err(IngestError::Extract(ExtractError::Timeout(_)))));
    }

    #[tokio::test]
    async fn blank_extraction_is_rejected() {
        let result = extract_with_timeout(
            Arc::new(BlankExtractor),
            PathBuf::from("blank.pdf"),
            Duration::from_secs(1),
        )
        .await;

        assert!(matches!(result, Err(IngestError::Extract(ExtractError::Empty(_)))));
    }
}
