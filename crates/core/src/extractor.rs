use crate::error::ExtractError;
use crate::traits::Extractor;
use lopdf::Document;
use std::path::Path;

#[derive(Debug, Clone)]
pub struct PageText {
    pub number: u32,
    pub text: String,
}

/// Reads PDF text with `lopdf`, page by page.
#[derive(Debug, Default, Clone, Copy)]
pub struct LopdfExtractor;

impl LopdfExtractor {
    pub fn extract_pages(&self, path: &Path) -> Result<Vec<PageText>, ExtractError> {
        if !is_pdf(path) {
            return Err(ExtractError::Unsupported(path.display().to_string()));
        }

        let document =
            Document::load(path).map_err(|error| ExtractError::PdfParse(error.to_string()))?;

        let mut pages = Vec::new();
        for (page_no, _page_id) in document.get_pages() {
            let text = document
                .extract_text(&[page_no])
                .map_err(|error| ExtractError::PdfParse(error.to_string()))?;

            pages.push(PageText {
                number: page_no,
                text,
            });
        }

        if pages.is_empty() {
            return Err(ExtractError::Empty(format!(
                "pdf has no pages: {}",
                path.display()
            )));
        }

        Ok(pages)
    }
}

impl Extractor for LopdfExtractor {
    fn extract(&self, path: &Path) -> Result<String, ExtractError> {
        let text = concat_pages(&self.extract_pages(path)?);

        if text.trim().is_empty() {
            return Err(ExtractError::Empty(format!(
                "pdf had no readable page text: {}",
                path.display()
            )));
        }

        Ok(text)
    }
}

/// Page texts glued together in page order, without a separator.
pub fn concat_pages(pages: &[PageText]) -> String {
    pages.iter().map(|page| page.text.as_str()).collect()
}

pub fn is_pdf(path: &Path) -> bool {
    path.extension()
        .and_then(|ext| ext.to_str())
        .is_some_and(|ext| ext.eq_ignore_ascii_case("pdf"))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::tempdir;

    #[test]
    fn pages_are_concatenated_in_order() {
        let pages = vec![
            PageText {
                number: 1,
                text: "First page. ".to_string(),
            },
            PageText {
                number: 2,
                text: "Second page".to_string(),
            },
        ];
        assert_eq!(concat_pages(&pages), "First page. Second page");
    }

    #[test]
    fn non_pdf_extension_is_unsupported() -> Result<(), Box<dyn std::error::Error>> {
        let dir = tempdir()?;
        let path = dir.path().join("notes.txt");
        fs::write(&path, b"plain text")?;

        let result = LopdfExtractor.extract(&path);
        assert!(matches!(result, Err(ExtractError::Unsupported(_))));
        Ok(())
    }

    #[test]
    fn broken_pdf_fails_to_extract() -> Result<(), Box<dyn std::error::Error>> {
        let dir = tempdir()?;
        let path = dir.path().join("broken.pdf");
        fs::write(&path, b"%PDF-1.4\n%broken")?;

        assert!(LopdfExtractor.extract(&path).is_err());
        Ok(())
    }

    #[test]
    fn missing_file_fails_to_extract() {
        assert!(LopdfExtractor.extract(Path::new("/definitely/not/here.pdf")).is_err());
    }

    #[test]
    fn extension_check_ignores_case() {
        assert!(is_pdf(Path::new("REPORT.PDF")));
        assert!(!is_pdf(Path::new("report.pdfx")));
        assert!(!is_pdf(Path::new("report")));
    }
}
