//! Validation of picked and dropped upload files

use std::fs::File;
use std::io::Read;
use std::path::{Path, PathBuf};

use thiserror::Error;

use crate::services::notify::Notification;

const PDF_MAGIC: &[u8] = b"%PDF-";
const PDF_MIME: &str = "application/pdf";

#[derive(Debug, Error)]
pub enum IntakeError {
    #[error("{name} is not a PDF file")]
    NotPdf { name: String },

    #[error("{name} is {size} bytes, limit is {max}")]
    TooLarge { name: String, size: u64, max: u64 },

    #[error("no file selected")]
    NoSelection,

    #[error("failed to read {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

impl IntakeError {
    /// User-facing message for the notification sink
    pub fn notification(&self) -> Notification {
        match self {
            Self::NotPdf { .. } => Notification::destructive("Invalid file type", "Please upload a PDF file."),
            Self::TooLarge { max, .. } => Notification::destructive(
                "File too large",
                format!("PDF files must be {} or smaller.", format_size_mb(*max)),
            ),
            Self::NoSelection => {
                Notification::destructive("No file selected", "Please select a file to upload.")
            }
            Self::Io { .. } => Notification::destructive("Could not read file", self.to_string()),
        }
    }
}

/// A file accepted for upload
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SelectedFile {
    /// File name, used as the new document's display name
    pub name: String,
    pub path: Option<PathBuf>,
    pub size_bytes: u64,
}

impl SelectedFile {
    pub fn size_label(&self) -> String {
        format_size_mb(self.size_bytes)
    }
}

/// Validate a file picked from disk
pub fn from_path(path: &Path, max_bytes: u64) -> Result<SelectedFile, IntakeError> {
    let name = file_name(path);

    if !has_pdf_extension(&name) {
        return Err(IntakeError::NotPdf { name });
    }

    let io_err = |source| IntakeError::Io {
        path: path.to_path_buf(),
        source,
    };

    let size = std::fs::metadata(path).map_err(io_err)?.len();
    check_size(&name, size, max_bytes)?;

    let file = File::open(path).map_err(io_err)?;
    if !has_pdf_header(file).map_err(io_err)? {
        return Err(IntakeError::NotPdf { name });
    }

    Ok(SelectedFile {
        name,
        path: Some(path.to_path_buf()),
        size_bytes: size,
    })
}

/// Validate a file dropped onto the window
pub fn from_dropped(
    name: &str,
    mime: &str,
    path: Option<&Path>,
    bytes: Option<&[u8]>,
    max_bytes: u64,
) -> Result<SelectedFile, IntakeError> {
    let name = if name.is_empty() {
        path.map(file_name).unwrap_or_default()
    } else {
        name.to_string()
    };

    if !mime.is_empty() && mime != PDF_MIME {
        return Err(IntakeError::NotPdf { name });
    }

    match (path, bytes) {
        (Some(path), _) => from_path(path, max_bytes),
        (None, Some(bytes)) => {
            if !bytes.starts_with(PDF_MAGIC) {
                return Err(IntakeError::NotPdf { name });
            }
            check_size(&name, bytes.len() as u64, max_bytes)?;
            Ok(SelectedFile {
                name,
                path: None,
                size_bytes: bytes.len() as u64,
            })
        }
        (None, None) => Err(IntakeError::NoSelection),
    }
}

/// Fail when nothing has been chosen yet
pub fn require_selection(selected: Option<&SelectedFile>) -> Result<&SelectedFile, IntakeError> {
    selected.ok_or(IntakeError::NoSelection)
}

/// Size in megabytes with two decimals
pub fn format_size_mb(bytes: u64) -> String {
    format!("{:.2} MB", bytes as f64 / (1024.0 * 1024.0))
}

fn file_name(path: &Path) -> String {
    path.file_name()
        .map(|s| s.to_string_lossy().to_string())
        .unwrap_or_else(|| path.to_string_lossy().to_string())
}

/// Whether `reader` starts with the PDF magic; shorter input is not a PDF
fn has_pdf_header(reader: impl Read) -> std::io::Result<bool> {
    let mut header = Vec::with_capacity(PDF_MAGIC.len());
    reader.take(PDF_MAGIC.len() as u64).read_to_end(&mut header)?;
    Ok(header == PDF_MAGIC)
}

fn has_pdf_extension(name: &str) -> bool {
    Path::new(name)
        .extension()
        .map(|ext| ext.eq_ignore_ascii_case("pdf"))
        .unwrap_or(false)
}

fn check_size(name: &str, size: u64, max: u64) -> Result<(), IntakeError> {
    if size > max {
        return Err(IntakeError::TooLarge {
            name: name.to_string(),
            size,
            max,
        });
    }
    Ok(())
}
