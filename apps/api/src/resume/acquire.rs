//! Text acquisition — turns an uploaded file into resume text.
//!
//! Dispatch is on the declared file name and media type. Word documents go
//! through a `DocumentConverter`; plain text is decoded directly; PDFs and
//! anything else are rejected without attempting extraction.

use async_trait::async_trait;
use bytes::Bytes;
use docx_rs::{
    DocumentChild, ParagraphChild, RunChild, TableCellContent, TableChild, TableRowChild,
};
use tracing::debug;

use crate::errors::AppError;

const WORDML_MEDIA_TYPE: &str =
    "application/vnd.openxmlformats-officedocument.wordprocessingml.document";
const PDF_SIGNATURE: &str = "%PDF-";
const SIGNATURE_WINDOW_CHARS: usize = 80;

/// Kind of uploaded document, resolved from its name and media type.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DocumentKind {
    PlainText,
    WordDocument,
    Pdf,
    Unsupported,
}

impl DocumentKind {
    pub fn detect(file_name: Option<&str>, content_type: Option<&str>) -> Self {
        let name = file_name.unwrap_or_default().to_ascii_lowercase();
        let media = content_type
            .unwrap_or_default()
            .split(';')
            .next()
            .unwrap_or_default()
            .trim()
            .to_ascii_lowercase();

        if name.ends_with(".docx") || media == WORDML_MEDIA_TYPE {
            DocumentKind::WordDocument
        } else if name.ends_with(".txt")
            || name.ends_with(".text")
            || name.ends_with(".md")
            || media.starts_with("text/")
        {
            DocumentKind::PlainText
        } else if name.ends_with(".pdf") || media == "application/pdf" {
            DocumentKind::Pdf
        } else {
            DocumentKind::Unsupported
        }
    }
}

/// Resume text produced from one upload. Lives for a single request.
#[derive(Debug, Clone)]
pub struct AcquiredText {
    pub text: String,
    pub kind: DocumentKind,
    /// The content carries a binary document signature despite its declared type.
    pub binary_document: bool,
}

/// Converts a word-processing document into plain text.
///
/// Carried in `AppState` as `Arc<dyn DocumentConverter>`.
#[async_trait]
pub trait DocumentConverter: Send + Sync {
    async fn to_text(&self, bytes: Bytes) -> Result<String, AppError>;
}

/// `.docx` converter backed by `docx-rs`. Parsing runs on the blocking pool.
pub struct DocxConverter;

#[async_trait]
impl DocumentConverter for DocxConverter {
    async fn to_text(&self, bytes: Bytes) -> Result<String, AppError> {
        tokio::task::spawn_blocking(move || docx_to_text(&bytes))
            .await
            .map_err(conversion_join_error)?
    }
}

/// A panic while parsing means the document was malformed, not that the server failed.
fn conversion_join_error(e: tokio::task::JoinError) -> AppError {
    if e.is_panic() {
        AppError::Conversion("the document could not be parsed".to_string())
    } else {
        AppError::Internal(anyhow::anyhow!("spawn_blocking failed in docx conversion: {e}"))
    }
}

/// Reads the text of every paragraph (including table cells) as one line each.
pub fn docx_to_text(bytes: &[u8]) -> Result<String, AppError> {
    let docx = docx_rs::read_docx(bytes).map_err(|e| AppError::Conversion(e.to_string()))?;

    let mut text = String::new();
    for child in &docx.document.children {
        match child {
            DocumentChild::Paragraph(p) => push_paragraph(&mut text, &p.children),
            DocumentChild::Table(table) => push_table(&mut text, table),
            _ => {}
        }
    }
    Ok(text)
}

fn push_table(out: &mut String, table: &docx_rs::Table) {
    for row in &table.rows {
        let TableChild::TableRow(row) = row;
        for cell in &row.cells {
            let TableRowChild::TableCell(cell) = cell;
            for content in &cell.children {
                match content {
                    TableCellContent::Paragraph(p) => push_paragraph(out, &p.children),
                    TableCellContent::Table(nested) => push_table(out, nested),
                    _ => {}
                }
            }
        }
    }
}

fn push_paragraph(out: &mut String, children: &[ParagraphChild]) {
    push_runs(out, children);
    out.push('\n');
}

fn push_runs(out: &mut String, children: &[ParagraphChild]) {
    for child in children {
        match child {
            ParagraphChild::Run(run) => {
                for run_child in &run.children {
                    match run_child {
                        RunChild::Text(t) => out.push_str(&t.text),
                        RunChild::Tab(_) => out.push('\t'),
                        RunChild::Break(_) => out.push('\n'),
                        _ => {}
                    }
                }
            }
            // Email addresses are usually hyperlinks
            ParagraphChild::Hyperlink(link) => push_runs(out, &link.children),
            _ => {}
        }
    }
}

/// Decodes the upload according to its kind.
///
/// Fails for PDFs, unsupported kinds, conversion errors and text that is
/// empty after trimming.
pub async fn acquire_text(
    kind: DocumentKind,
    bytes: Bytes,
    converter: &dyn DocumentConverter,
) -> Result<AcquiredText, AppError> {
    let text = match kind {
        DocumentKind::WordDocument => converter.to_text(bytes).await?,
        DocumentKind::PlainText => decode_plain_text(&bytes),
        DocumentKind::Pdf => return Err(AppError::PdfNotSupported),
        DocumentKind::Unsupported => return Err(AppError::UnsupportedFileType),
    };

    if text.trim().is_empty() {
        return Err(AppError::EmptyDocument);
    }

    let binary_document = has_pdf_signature(&text);
    debug!(
        "Acquired {} chars of {:?} text (binary_document={})",
        text.chars().count(),
        kind,
        binary_document
    );

    Ok(AcquiredText {
        text,
        kind,
        binary_document,
    })
}

/// UTF-8 decode, replacing invalid sequences and dropping a leading BOM.
fn decode_plain_text(bytes: &[u8]) -> String {
    let text = String::from_utf8_lossy(bytes);
    text.strip_prefix('\u{feff}').unwrap_or(&*text).to_string()
}

/// Whether the PDF signature appears within the first 80 characters.
pub fn has_pdf_signature(text: &str) -> bool {
    let head: String = text.chars().take(SIGNATURE_WINDOW_CHARS).collect();
    head.contains(PDF_SIGNATURE)
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;
    use docx_rs::{Docx, Paragraph, Run, Table, TableCell, TableRow};
    use std::io::Cursor;

    /// Builds an in-memory .docx with one paragraph per line.
    pub(crate) fn build_docx(lines: &[&str]) -> Vec<u8> {
        let mut docx = Docx::new();
        for line in lines {
            docx = docx.add_paragraph(Paragraph::new().add_run(Run::new().add_text(*line)));
        }
        let mut cursor = Cursor::new(Vec::new());
        docx.build().pack(&mut cursor).unwrap();
        cursor.into_inner()
    }

    struct FailingConverter;

    #[async_trait]
    impl DocumentConverter for FailingConverter {
        async fn to_text(&self, _bytes: Bytes) -> Result<String, AppError> {
            Err(AppError::Conversion("corrupt archive".to_string()))
        }
    }

    #[test]
    fn test_detect_by_extension() {
        assert_eq!(DocumentKind::detect(Some("cv.DOCX"), None), DocumentKind::WordDocument);
        assert_eq!(DocumentKind::detect(Some("cv.txt"), None), DocumentKind::PlainText);
        assert_eq!(DocumentKind::detect(Some("cv.pdf"), None), DocumentKind::Pdf);
        assert_eq!(DocumentKind::detect(Some("cv.doc"), None), DocumentKind::Unsupported);
        assert_eq!(DocumentKind::detect(None, None), DocumentKind::Unsupported);
    }

    #[test]
    fn test_detect_by_media_type() {
        assert_eq!(
            DocumentKind::detect(Some("upload"), Some(WORDML_MEDIA_TYPE)),
            DocumentKind::WordDocument
        );
        assert_eq!(
            DocumentKind::detect(Some("upload"), Some("text/plain; charset=utf-8")),
            DocumentKind::PlainText
        );
        assert_eq!(
            DocumentKind::detect(Some("upload"), Some("application/pdf")),
            DocumentKind::Pdf
        );
        assert_eq!(
            DocumentKind::detect(Some("upload"), Some("application/octet-stream")),
            DocumentKind::Unsupported
        );
    }

    #[test]
    fn test_docx_extension_wins_over_generic_media_type() {
        assert_eq!(
            DocumentKind::detect(Some("resume.docx"), Some("application/octet-stream")),
            DocumentKind::WordDocument
        );
    }

    #[test]
    fn test_pdf_signature_window() {
        assert!(has_pdf_signature("%PDF-1.7\n..."));
        assert!(has_pdf_signature(&format!("{}%PDF-1.4", " ".repeat(70))));
        assert!(!has_pdf_signature(&format!("{}%PDF-1.4", " ".repeat(80))));
        assert!(!has_pdf_signature("Jordan Lee"));
    }

    #[test]
    fn test_decode_strips_bom_and_replaces_invalid_bytes() {
        let mut bytes = "\u{feff}Jordan".as_bytes().to_vec();
        bytes.push(0xff);
        assert_eq!(decode_plain_text(&bytes), "Jordan\u{fffd}");
    }

    #[test]
    fn test_docx_to_text_paragraphs() {
        let bytes = build_docx(&["Jordan Lee", "Skills", "Rust, Go"]);
        let text = docx_to_text(&bytes).unwrap();
        let lines: Vec<&str> = text.lines().filter(|l| !l.is_empty()).collect();
        assert_eq!(lines, vec!["Jordan Lee", "Skills", "Rust, Go"]);
    }

    #[test]
    fn test_docx_to_text_reads_table_cells() {
        let table = Table::new(vec![TableRow::new(vec![
            TableCell::new().add_paragraph(Paragraph::new().add_run(Run::new().add_text("Email"))),
            TableCell::new()
                .add_paragraph(Paragraph::new().add_run(Run::new().add_text("a@b.io"))),
        ])]);
        let mut cursor = Cursor::new(Vec::new());
        Docx::new()
            .add_paragraph(Paragraph::new().add_run(Run::new().add_text("Jordan Lee")))
            .add_table(table)
            .build()
            .pack(&mut cursor)
            .unwrap();
        let text = docx_to_text(&cursor.into_inner()).unwrap();
        assert!(text.starts_with("Jordan Lee\n"));
        assert!(text.contains("Email\n"));
        assert!(text.contains("a@b.io\n"));
    }

    #[test]
    fn test_docx_to_text_rejects_garbage() {
        let err = docx_to_text(b"not a zip archive").unwrap_err();
        assert!(matches!(err, AppError::Conversion(_)));
    }

    #[tokio::test]
    async fn test_panicking_conversion_is_a_client_error() {
        let join_error = tokio::task::spawn_blocking(|| panic!("malformed docx"))
            .await
            .unwrap_err();
        let err = conversion_join_error(join_error);
        assert!(matches!(err, AppError::Conversion(_)));
    }

    #[tokio::test]
    async fn test_acquire_plain_text() {
        let acquired = acquire_text(
            DocumentKind::PlainText,
            Bytes::from_static(b"Jordan Lee\n"),
            &DocxConverter,
        )
        .await
        .unwrap();
        assert_eq!(acquired.text, "Jordan Lee\n");
        assert!(!acquired.binary_document);
    }

    #[tokio::test]
    async fn test_acquire_flags_pdf_disguised_as_text() {
        let acquired = acquire_text(
            DocumentKind::PlainText,
            Bytes::from_static(b"%PDF-1.7\n1 0 obj\n"),
            &DocxConverter,
        )
        .await
        .unwrap();
        assert!(acquired.binary_document);
    }

    #[tokio::test]
    async fn test_acquire_docx_through_converter() {
        let bytes = Bytes::from(build_docx(&["Name: Jordan Lee"]));
        let acquired = acquire_text(DocumentKind::WordDocument, bytes, &DocxConverter)
            .await
            .unwrap();
        assert_eq!(acquired.text.trim(), "Name: Jordan Lee");
        assert_eq!(acquired.kind, DocumentKind::WordDocument);
    }

    #[tokio::test]
    async fn test_acquire_rejects_pdf_and_unknown() {
        let bytes = Bytes::from_static(b"%PDF-1.7");
        let err = acquire_text(DocumentKind::Pdf, bytes.clone(), &DocxConverter)
            .await
            .unwrap_err();
        assert!(matches!(err, AppError::PdfNotSupported));

        let err = acquire_text(DocumentKind::Unsupported, bytes, &DocxConverter)
            .await
            .unwrap_err();
        assert!(matches!(err, AppError::UnsupportedFileType));
    }

    #[tokio::test]
    async fn test_acquire_rejects_blank_text() {
        let err = acquire_text(
            DocumentKind::PlainText,
            Bytes::from_static(b" \n\t\r\n"),
            &DocxConverter,
        )
        .await
        .unwrap_err();
        assert!(matches!(err, AppError::EmptyDocument));
    }

    #[tokio::test]
    async fn test_acquire_propagates_conversion_failure() {
        let err = acquire_text(
            DocumentKind::WordDocument,
            Bytes::from_static(b"PK"),
            &FailingConverter,
        )
        .await
        .unwrap_err();
        assert!(matches!(err, AppError::Conversion(_)));
    }
}
