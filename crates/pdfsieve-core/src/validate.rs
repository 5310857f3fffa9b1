use std::fs::File;
use std::io::{self, Read};
use std::path::{Path, PathBuf};

use thiserror::Error;

/// First bytes every well-formed PDF starts with.
pub const PDF_SIGNATURE: &[u8; 5] = b"%PDF-";

#[derive(Error, Debug)]
pub enum ValidationError {
    #[error("file not found: {0}")]
    Missing(PathBuf),
    #[error("not a .pdf file: {0}")]
    WrongExtension(PathBuf),
    #[error("not a valid PDF (missing %PDF- signature): {0}")]
    BadSignature(PathBuf),
    #[error("could not read {path}: {source}")]
    Unreadable {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
}

/// A validated reference to a single PDF source.
///
/// Constructed only through [`PdfDocument::open`], which runs the shallow
/// entry checks; immutable for the duration of an extraction attempt.
#[derive(Debug, Clone)]
pub struct PdfDocument {
    path: PathBuf,
    size_bytes: u64,
}

impl PdfDocument {
    /// Validate `path` and build a document handle.
    ///
    /// Checks, short-circuiting on the first failure: the path exists, it
    /// carries a `.pdf` extension (ASCII case-insensitive), and the first
    /// 5 bytes match the PDF signature. This filters out obviously-wrong
    /// inputs cheaply before any backend library is invoked; it does not
    /// guarantee the file is a well-formed PDF.
    pub fn open(path: &Path) -> Result<Self, ValidationError> {
        if !path.exists() {
            return Err(ValidationError::Missing(path.to_path_buf()));
        }

        let is_pdf = path
            .extension()
            .map(|e| e.eq_ignore_ascii_case("pdf"))
            .unwrap_or(false);
        if !is_pdf {
            return Err(ValidationError::WrongExtension(path.to_path_buf()));
        }

        let mut header = [0u8; 5];
        let mut file = File::open(path).map_err(|source| ValidationError::Unreadable {
            path: path.to_path_buf(),
            source,
        })?;
        file.read_exact(&mut header)
            .map_err(|_| ValidationError::BadSignature(path.to_path_buf()))?;
        if &header != PDF_SIGNATURE {
            return Err(ValidationError::BadSignature(path.to_path_buf()));
        }

        let size_bytes = file
            .metadata()
            .map_err(|source| ValidationError::Unreadable {
                path: path.to_path_buf(),
                source,
            })?
            .len();

        Ok(Self {
            path: path.to_path_buf(),
            size_bytes,
        })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn size_bytes(&self) -> u64 {
        self.size_bytes
    }

    /// File size in megabytes, for the extraction-start log line.
    pub fn size_mb(&self) -> f64 {
        self.size_bytes as f64 / (1024.0 * 1024.0)
    }
}
