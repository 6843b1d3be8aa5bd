use crate::error::{CandorError, Result};

/// Résumé file format, detected from the filename extension first and
/// magic bytes as a fallback for extensionless uploads.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ResumeFormat {
    Pdf,
    Docx,
    Text,
}

/// Turns an uploaded résumé document into a flat string.
pub struct ContentExtractor;

impl ContentExtractor {
    /// Extract the text content of a résumé file.
    ///
    /// Plain-text decoding is lossy and never fails; PDF/DOCX parse
    /// failures surface as `Processing` errors.
    pub fn extract(bytes: &[u8], filename: &str) -> Result<String> {
        match Self::detect_format(bytes, filename) {
            ResumeFormat::Pdf => Self::extract_from_pdf(bytes),
            ResumeFormat::Docx => Self::extract_from_docx(bytes),
            ResumeFormat::Text => Ok(String::from_utf8_lossy(bytes).into_owned()),
        }
    }

    pub fn detect_format(bytes: &[u8], filename: &str) -> ResumeFormat {
        let lower = filename.to_lowercase();
        if lower.ends_with(".pdf") {
            return ResumeFormat::Pdf;
        }
        if lower.ends_with(".docx") || lower.ends_with(".doc") {
            return ResumeFormat::Docx;
        }

        // Magic bytes: %PDF- for PDF, PK zip header for OOXML containers
        if bytes.starts_with(b"%PDF-") {
            return ResumeFormat::Pdf;
        }
        if bytes.starts_with(&[0x50, 0x4B, 0x03, 0x04]) {
            return ResumeFormat::Docx;
        }

        ResumeFormat::Text
    }

    pub fn extract_from_pdf(bytes: &[u8]) -> Result<String> {
        pdf_extract::extract_text_from_mem(bytes)
            .map_err(|e| CandorError::Processing(format!("PDF extraction failed: {e}")))
    }

    pub fn extract_from_docx(bytes: &[u8]) -> Result<String> {
        let docx = docx_rs::read_docx(bytes)
            .map_err(|e| CandorError::Processing(format!("DOCX parse error: {e}")))?;

        let mut text = String::new();
        for child in &docx.document.children {
            if let docx_rs::DocumentChild::Paragraph(paragraph) = child {
                let para_text = Self::extract_paragraph(paragraph);
                if !para_text.trim().is_empty() {
                    if !text.is_empty() {
                        text.push('\n');
                    }
                    text.push_str(&para_text);
                }
            }
        }

        Ok(text)
    }

    fn extract_paragraph(paragraph: &docx_rs::Paragraph) -> String {
        let mut content = String::new();
        for para_child in &paragraph.children {
            if let docx_rs::ParagraphChild::Run(run) = para_child {
                for run_child in &run.children {
                    if let docx_rs::RunChild::Text(text) = run_child {
                        content.push_str(&text.text);
                    }
                }
            }
        }
        content
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn detect_format_by_extension() {
        assert_eq!(
            ContentExtractor::detect_format(b"", "resume.PDF"),
            ResumeFormat::Pdf
        );
        assert_eq!(
            ContentExtractor::detect_format(b"", "resume.docx"),
            ResumeFormat::Docx
        );
        assert_eq!(
            ContentExtractor::detect_format(b"", "resume.doc"),
            ResumeFormat::Docx
        );
        assert_eq!(
            ContentExtractor::detect_format(b"", "resume.txt"),
            ResumeFormat::Text
        );
    }

    #[test]
    fn detect_format_by_magic_bytes() {
        assert_eq!(
            ContentExtractor::detect_format(b"%PDF-1.7 rest", "resume"),
            ResumeFormat::Pdf
        );
        assert_eq!(
            ContentExtractor::detect_format(&[0x50, 0x4B, 0x03, 0x04, 0x00], "resume"),
            ResumeFormat::Docx
        );
        assert_eq!(
            ContentExtractor::detect_format(b"Jane Doe\nEngineer", "resume"),
            ResumeFormat::Text
        );
    }

    #[test]
    fn plain_text_extraction_is_lossy_not_fallible() {
        let bytes = [b'J', b'a', b'n', b'e', 0xFF, b'!'];
        let text = ContentExtractor::extract(&bytes, "resume.txt").unwrap();
        assert!(text.starts_with("Jane"));
    }
}
