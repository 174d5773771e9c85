//! Uploaded document decoding: PDF and DOCX bytes to plain text.
//!
//! PDF text comes from `pdf_extract`. DOCX is a zip archive; its body lives in
//! `word/document.xml`, where visible text sits inside `<w:t>` runs and each
//! `<w:p>` is one paragraph.

use std::io::{Cursor, Read};

use bytes::Bytes;
use quick_xml::events::Event;
use quick_xml::Reader;
use thiserror::Error;

const DOCX_BODY: &str = "word/document.xml";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DocumentKind {
    Pdf,
    Docx,
}

impl DocumentKind {
    /// Classifies an upload by file extension (case-insensitive).
    pub fn from_filename(filename: &str) -> Option<Self> {
        let (_, ext) = filename.rsplit_once('.')?;
        match ext.to_ascii_lowercase().as_str() {
            "pdf" => Some(Self::Pdf),
            "docx" => Some(Self::Docx),
            _ => None,
        }
    }

    pub fn content_type(self) -> &'static str {
        match self {
            Self::Pdf => "application/pdf",
            Self::Docx => {
                "application/vnd.openxmlformats-officedocument.wordprocessingml.document"
            }
        }
    }
}

#[derive(Debug, Error)]
pub enum DecodeError {
    #[error("PDF text extraction failed: {0}")]
    Pdf(String),

    #[error("Not a DOCX archive: {0}")]
    Archive(#[from] zip::result::ZipError),

    #[error("DOCX archive has no word/document.xml")]
    MissingBody,

    #[error("Failed to read DOCX body: {0}")]
    Io(#[from] std::io::Error),

    #[error("Malformed DOCX XML: {0}")]
    Xml(String),
}

/// Decodes an upload off the async runtime; PDF parsing is CPU-bound.
pub async fn decode(kind: DocumentKind, data: Bytes) -> Result<String, DecodeError> {
    tokio::task::spawn_blocking(move || match kind {
        DocumentKind::Pdf => decode_pdf(&data),
        DocumentKind::Docx => decode_docx(&data),
    })
    .await
    .map_err(|e| DecodeError::Pdf(format!("decoder task aborted: {e}")))?
}

pub fn decode_pdf(data: &[u8]) -> Result<String, DecodeError> {
    pdf_extract::extract_text_from_mem(data).map_err(|e| DecodeError::Pdf(e.to_string()))
}

pub fn decode_docx(data: &[u8]) -> Result<String, DecodeError> {
    let mut archive = zip::ZipArchive::new(Cursor::new(data))?;
    let mut xml = String::new();
    archive
        .by_name(DOCX_BODY)
        .map_err(|_| DecodeError::MissingBody)?
        .read_to_string(&mut xml)?;
    docx_xml_to_text(&xml)
}

/// Flattens WordprocessingML into lines: one per paragraph, tabs and breaks kept.
fn docx_xml_to_text(xml: &str) -> Result<String, DecodeError> {
    let mut reader = Reader::from_str(xml);
    let mut buf = Vec::new();
    let mut text = String::new();
    let mut in_run_text = false;

    loop {
        match reader.read_event_into(&mut buf) {
            Ok(Event::Start(e)) => {
                if e.local_name().as_ref() == b"t" {
                    in_run_text = true;
                }
            }
            Ok(Event::Empty(e)) => match e.local_name().as_ref() {
                b"tab" => text.push('\t'),
                b"br" | b"cr" | b"p" => text.push('\n'),
                _ => {}
            },
            Ok(Event::Text(e)) if in_run_text => {
                let unescaped = e.unescape().map_err(|e| DecodeError::Xml(e.to_string()))?;
                text.push_str(&unescaped);
            }
            Ok(Event::End(e)) => match e.local_name().as_ref() {
                b"t" => in_run_text = false,
                b"p" => text.push('\n'),
                _ => {}
            },
            Ok(Event::Eof) => break,
            Err(e) => return Err(DecodeError::Xml(e.to_string())),
            _ => {}
        }
        buf.clear();
    }

    Ok(text)
}
