//! # Document Loader
//!
//! `load(path)` returns the plain text of a document. The format is chosen
//! by file extension (case-insensitive):
//!
//! | Extension | Extraction |
//! |---|---|
//! | `.pdf` | text of every page, in page order |
//! | `.docx` | paragraphs of `word/document.xml`, one per line |
//! | `.txt`, `.csv` | file contents as UTF-8 |
//!
//! Any other extension is [`DocumentError::UnsupportedFormat`]. Failures
//! while reading a supported format are [`DocumentError::Parse`] and carry
//! the underlying cause.

use std::fs::File;
use std::io::Read;
use std::path::{Path, PathBuf};

use cisgap_core::CisgapError;
use quick_xml::events::Event;
use quick_xml::Reader;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Zip entry holding the body of a DOCX document.
const DOCX_BODY: &str = "word/document.xml";

/// Supported input formats.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DocumentFormat {
    Pdf,
    Docx,
    Text,
    Csv,
}

impl DocumentFormat {
    /// Detect the format of `path` from its extension.
    pub fn from_path(path: &Path) -> Result<Self, DocumentError> {
        let extension = path
            .extension()
            .and_then(|e| e.to_str())
            .map(str::to_ascii_lowercase)
            .unwrap_or_default();
        match extension.as_str() {
            "pdf" => Ok(Self::Pdf),
            "docx" => Ok(Self::Docx),
            "txt" => Ok(Self::Text),
            "csv" => Ok(Self::Csv),
            _ => Err(DocumentError::UnsupportedFormat { extension }),
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Pdf => "pdf",
            Self::Docx => "docx",
            Self::Text => "txt",
            Self::Csv => "csv",
        }
    }
}

impl std::fmt::Display for DocumentFormat {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Error loading a document.
#[derive(Error, Debug)]
pub enum DocumentError {
    /// The extension is not one of pdf, docx, txt, csv.
    #[error("unsupported file format: {extension:?}; use PDF, DOCX, TXT, or CSV")]
    UnsupportedFormat { extension: String },

    /// A supported document could not be read or its text extracted.
    #[error("error parsing {format} document {path}: {reason}")]
    Parse {
        path: PathBuf,
        format: DocumentFormat,
        reason: String,
    },
}

impl From<DocumentError> for CisgapError {
    fn from(e: DocumentError) -> Self {
        match e {
            DocumentError::UnsupportedFormat { extension } => {
                CisgapError::UnsupportedFormat { extension }
            }
            DocumentError::Parse { path, reason, .. } => CisgapError::Parse {
                path: path.display().to_string(),
                reason,
            },
        }
    }
}

/// Text extracted from a document.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LoadedDocument {
    pub path: PathBuf,
    pub format: DocumentFormat,
    pub text: String,
}

impl LoadedDocument {
    /// File name for display, falling back to the full path.
    pub fn display_name(&self) -> String {
        display_name(&self.path)
    }
}

/// File name of `path` for display, falling back to the full path.
pub fn display_name(path: &Path) -> String {
    path.file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_else(|| path.display().to_string())
}

/// Load `path` and extract its text.
pub fn load(path: &Path) -> Result<LoadedDocument, DocumentError> {
    let format = DocumentFormat::from_path(path)?;
    let parse_err = |reason: String| DocumentError::Parse {
        path: path.to_path_buf(),
        format,
        reason,
    };

    let text = match format {
        DocumentFormat::Pdf => extract_pdf(path).map_err(parse_err)?,
        DocumentFormat::Docx => extract_docx(path).map_err(parse_err)?,
        DocumentFormat::Text | DocumentFormat::Csv => {
            std::fs::read_to_string(path).map_err(|e| parse_err(e.to_string()))?
        }
    };

    tracing::debug!(
        path = %path.display(),
        %format,
        bytes = text.len(),
        "loaded document"
    );

    Ok(LoadedDocument {
        path: path.to_path_buf(),
        format,
        text,
    })
}

fn extract_pdf(path: &Path) -> Result<String, String> {
    let doc = lopdf::Document::load(path).map_err(|e| e.to_string())?;
    let pages: Vec<u32> = doc.get_pages().keys().copied().collect();
    if pages.is_empty() {
        return Ok(String::new());
    }
    doc.extract_text(&pages).map_err(|e| e.to_string())
}

fn extract_docx(path: &Path) -> Result<String, String> {
    let file = File::open(path).map_err(|e| e.to_string())?;
    let mut archive = zip::ZipArchive::new(file).map_err(|e| e.to_string())?;
    let mut body = String::new();
    archive
        .by_name(DOCX_BODY)
        .map_err(|e| format!("{DOCX_BODY}: {e}"))?
        .read_to_string(&mut body)
        .map_err(|e| format!("{DOCX_BODY}: {e}"))?;
    docx_paragraphs(&body).map_err(|e| format!("{DOCX_BODY}: {e}"))
}

/// Collect the text runs of a WordprocessingML body, one paragraph per line.
fn docx_paragraphs(xml: &str) -> Result<String, quick_xml::Error> {
    let mut reader = Reader::from_str(xml);
    let mut paragraphs: Vec<String> = Vec::new();
    let mut current = String::new();
    let mut in_text = false;

    loop {
        match reader.read_event()? {
            Event::Start(e) if e.name().as_ref() == b"w:t" => in_text = true,
            Event::End(e) => match e.name().as_ref() {
                b"w:t" => in_text = false,
                b"w:p" => paragraphs.push(std::mem::take(&mut current)),
                _ => {}
            },
            Event::Empty(e) => match e.name().as_ref() {
                b"w:tab" => current.push('\t'),
                b"w:br" => current.push(' '),
                b"w:p" => paragraphs.push(String::new()),
                _ => {}
            },
            Event::Text(t) if in_text => current.push_str(&t.unescape()?),
            Event::Eof => break,
            _ => {}
        }
    }
    if !current.is_empty() {
        paragraphs.push(current);
    }
    Ok(paragraphs.join("\n"))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn format_from_extension() {
        assert_eq!(
            DocumentFormat::from_path(Path::new("a/b.PDF")).unwrap(),
            DocumentFormat::Pdf
        );
        assert_eq!(
            DocumentFormat::from_path(Path::new("b.docx")).unwrap(),
            DocumentFormat::Docx
        );
        assert_eq!(
            DocumentFormat::from_path(Path::new("b.txt")).unwrap(),
            DocumentFormat::Text
        );
        assert_eq!(
            DocumentFormat::from_path(Path::new("b.Csv")).unwrap(),
            DocumentFormat::Csv
        );
    }

    #[test]
    fn unsupported_extensions() {
        for name in ["tool.exe", "notes.doc", "README", "archive.tar.gz"] {
            let err = DocumentFormat::from_path(Path::new(name)).unwrap_err();
            assert!(
                matches!(err, DocumentError::UnsupportedFormat { .. }),
                "{name} should be unsupported"
            );
        }
    }

    #[test]
    fn unsupported_converts_to_core_error() {
        let err: CisgapError = load(Path::new("payload.exe")).unwrap_err().into();
        match err {
            CisgapError::UnsupportedFormat { extension } => assert_eq!(extension, "exe"),
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn docx_paragraph_extraction() {
        let xml = r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>
<w:document xmlns:w="http://schemas.openxmlformats.org/wordprocessingml/2006/main">
  <w:body>
    <w:p><w:r><w:t>Error Limit:</w:t></w:r><w:r><w:t xml:space="preserve"> 3</w:t></w:r></w:p>
    <w:p/>
    <w:p><w:r><w:t>Encryption</w:t><w:tab/><w:t>implemented &amp; enforced</w:t></w:r></w:p>
  </w:body>
</w:document>"#;
        let text = docx_paragraphs(xml).unwrap();
        assert_eq!(text, "Error Limit: 3\n\nEncryption\timplemented & enforced");
    }

    #[test]
    fn display_name_is_file_name() {
        let doc = LoadedDocument {
            path: PathBuf::from("/tmp/docs/baseline.txt"),
            format: DocumentFormat::Text,
            text: String::new(),
        };
        assert_eq!(doc.display_name(), "baseline.txt");
        assert_eq!(display_name(Path::new("/")), "/");
    }
}
