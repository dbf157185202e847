//! Multi-page PDF output
//!
//! Pages are drawn through [`PdfBackend`] and kept in memory until
//! [`PdfDocument::finish`] writes the file. A document dropped before
//! `finish` still writes the pages it has, so a failure while rendering a
//! later page does not lose the earlier ones.

mod backend;
mod font;

pub use backend::PdfBackend;
pub use font::text_width_em;

use crate::error::{PlotError, Result};
use lopdf::content::{Content, Operation};
use lopdf::{dictionary, Document, Object, Stream};
use serde::Serialize;
use std::path::{Path, PathBuf};
use tracing::{info, warn};

/// Resource name of Helvetica
pub(crate) const REGULAR_FONT: &str = "F1";
/// Resource name of Helvetica-Bold
pub(crate) const BOLD_FONT: &str = "F2";

/// Content-stream operations of one page
#[derive(Debug, Clone, Default)]
pub struct PdfPage {
    operations: Vec<Operation>,
}

impl PdfPage {
    /// Wrap recorded operations
    #[must_use]
    pub fn new(operations: Vec<Operation>) -> Self {
        Self { operations }
    }

    /// Recorded operations in drawing order
    #[must_use]
    pub fn operations(&self) -> &[Operation] {
        &self.operations
    }

    /// Every string shown with `Tj`, decoded from WinAnsi
    #[must_use]
    pub fn texts(&self) -> Vec<String> {
        self.operations
            .iter()
            .filter(|op| op.operator == "Tj")
            .flat_map(|op| op.operands.iter())
            .filter_map(|operand| match operand {
                Object::String(bytes, _) => Some(font::decode_win_ansi(bytes)),
                _ => None,
            })
            .collect()
    }
}

/// Where and how much was written
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct WrittenDocument {
    /// Output path
    pub path: PathBuf,
    /// Page count
    pub pages: usize,
    /// File size in bytes
    pub bytes: u64,
}

/// A PDF file under construction.
#[derive(Debug)]
pub struct PdfDocument {
    path: PathBuf,
    page_size: (f64, f64),
    pages: Vec<PdfPage>,
    closed: bool,
}

impl PdfDocument {
    /// Start a document whose pages measure `page_size` points.
    pub fn new<P: Into<PathBuf>>(path: P, page_size: (f64, f64)) -> Self {
        Self {
            path: path.into(),
            page_size,
            pages: Vec::new(),
            closed: false,
        }
    }

    /// Destination path
    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Page width and height in points
    #[must_use]
    pub fn page_size(&self) -> (f64, f64) {
        self.page_size
    }

    /// Pages added so far
    #[must_use]
    pub fn pages(&self) -> &[PdfPage] {
        &self.pages
    }

    /// Number of pages added so far
    #[must_use]
    pub fn page_count(&self) -> usize {
        self.pages.len()
    }

    /// Append a finished page
    pub fn push_page(&mut self, page: PdfPage) {
        self.pages.push(page);
    }

    /// Backend drawing the next page on a canvas of `size` pixels
    pub fn page_backend(&mut self, size: (u32, u32)) -> PdfBackend<'_> {
        PdfBackend::new(self, size)
    }

    /// Serialize all pages.
    ///
    /// # Errors
    /// Returns [`PlotError::Write`] if a content stream cannot be encoded.
    pub fn to_bytes(&self) -> Result<Vec<u8>> {
        let write_err = |message: String| PlotError::Write {
            path: self.path.display().to_string(),
            message,
        };

        let mut doc = Document::with_version("1.5");
        let pages_id = doc.new_object_id();
        let regular_id = doc.add_object(dictionary! {
            "Type" => "Font",
            "Subtype" => "Type1",
            "BaseFont" => "Helvetica",
            "Encoding" => "WinAnsiEncoding",
        });
        let bold_id = doc.add_object(dictionary! {
            "Type" => "Font",
            "Subtype" => "Type1",
            "BaseFont" => "Helvetica-Bold",
            "Encoding" => "WinAnsiEncoding",
        });
        let resources_id = doc.add_object(dictionary! {
            "Font" => dictionary! {
                REGULAR_FONT => regular_id,
                BOLD_FONT => bold_id,
            },
        });

        let mut kids: Vec<Object> = Vec::with_capacity(self.pages.len());
        for page in &self.pages {
            let content = Content {
                operations: page.operations.clone(),
            };
            let encoded = content
                .encode()
                .map_err(|e| write_err(format!("Failed to encode page: {e}")))?;
            let content_id = doc.add_object(Stream::new(dictionary! {}, encoded));
            let page_id = doc.add_object(dictionary! {
                "Type" => "Page",
                "Parent" => pages_id,
                "Contents" => content_id,
            });
            kids.push(page_id.into());
        }

        let (width, height) = self.page_size;
        let pages = dictionary! {
            "Type" => "Pages",
            "Kids" => kids,
            "Count" => self.pages.len() as i64,
            "Resources" => resources_id,
            "MediaBox" => vec![
                0.into(),
                0.into(),
                Object::Real(width as f32),
                Object::Real(height as f32),
            ],
        };
        doc.objects.insert(pages_id, Object::Dictionary(pages));
        let catalog_id = doc.add_object(dictionary! {
            "Type" => "Catalog",
            "Pages" => pages_id,
        });
        doc.trailer.set("Root", catalog_id);
        doc.compress();

        let mut out = Vec::new();
        doc.save_to(&mut out)
            .map_err(|e| write_err(format!("Failed to serialize PDF: {e}")))?;
        Ok(out)
    }

    fn write(&mut self) -> Result<WrittenDocument> {
        self.closed = true;
        let bytes = self.to_bytes()?;
        std::fs::write(&self.path, &bytes).map_err(|e| PlotError::Write {
            path: self.path.display().to_string(),
            message: e.to_string(),
        })?;
        info!(path = %self.path.display(), pages = self.pages.len(), "wrote document");
        Ok(WrittenDocument {
            path: self.path.clone(),
            pages: self.pages.len(),
            bytes: bytes.len() as u64,
        })
    }

    /// Write the file and close the document.
    ///
    /// # Errors
    /// Returns [`PlotError::Write`] if serialization or the write fails.
    pub fn finish(mut self) -> Result<WrittenDocument> {
        self.write()
    }

    /// Close without writing anything
    pub fn discard(mut self) {
        self.closed = true;
    }
}

impl Drop for PdfDocument {
    fn drop(&mut self) {
        if self.closed || self.pages.is_empty() {
            return;
        }
        match self.write() {
            Ok(written) => warn!(
                path = %written.path.display(),
                pages = written.pages,
                "document closed early; wrote completed pages"
            ),
            Err(e) => warn!(error = %e, "document closed early and could not be written"),
        }
    }
}
