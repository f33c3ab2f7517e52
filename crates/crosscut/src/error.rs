//! Error types for slicing operations.
//!
//! Each error carries a machine-readable code in the format
//! `CUT-XXXX`:
//! - `CUT-1xxx`: I/O errors (reading the mesh, scratch files)
//! - `CUT-2xxx`: Mesh validation errors
//! - `CUT-3xxx`: Render/output errors

use miette::Diagnostic;
use std::path::PathBuf;
use thiserror::Error;

/// Result type alias for slicing operations.
pub type SliceResult<T> = Result<T, SliceError>;

/// Machine-readable error codes for slicing operations.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorCode {
    /// CUT-1001: Failed to read the mesh file
    IoRead = 1001,
    /// CUT-1002: Failed to create or write the scratch file
    ScratchFile = 1002,
    /// CUT-1003: Failed to parse the mesh file
    ParseError = 1003,
    /// CUT-2001: Mesh has no vertices or faces
    EmptyMesh = 2001,
    /// CUT-3001: Failed to write the rendered image
    ImageWrite = 3001,
}

impl ErrorCode {
    /// Returns the error code as a string in the format `CUT-XXXX`.
    pub fn as_str(&self) -> &'static str {
        match self {
            ErrorCode::IoRead => "CUT-1001",
            ErrorCode::ScratchFile => "CUT-1002",
            ErrorCode::ParseError => "CUT-1003",
            ErrorCode::EmptyMesh => "CUT-2001",
            ErrorCode::ImageWrite => "CUT-3001",
        }
    }
}

impl std::fmt::Display for ErrorCode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Errors that can occur while loading, slicing, or rendering.
///
/// A failure here is local to one locator from the batch processor's
/// point of view; it is recorded and the batch continues.
#[derive(Debug, Error, Diagnostic)]
pub enum SliceError {
    /// Error reading the mesh file.
    #[error("failed to read mesh from {path}")]
    #[diagnostic(
        code(crosscut::io::read),
        help("Check that the file exists and is readable")
    )]
    IoRead {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Error creating the scratch copy used to normalize encoding.
    #[error("failed to stage scratch copy of mesh file")]
    #[diagnostic(
        code(crosscut::io::scratch),
        help("Check that the system temp directory is writable")
    )]
    ScratchFile {
        #[source]
        source: std::io::Error,
    },

    /// Error parsing the mesh file.
    #[error("failed to parse mesh from {path}: {details}")]
    #[diagnostic(
        code(crosscut::parse::error),
        help("The file may be corrupted or not a triangulated OBJ. Try re-exporting it.")
    )]
    ParseError { path: PathBuf, details: String },

    /// Mesh with no usable geometry.
    #[error("mesh is empty: {details}")]
    #[diagnostic(
        code(crosscut::validation::empty),
        help("The mesh must have at least one vertex and one face")
    )]
    EmptyMesh { details: String },

    /// Error writing the rendered slice image.
    #[error("failed to write slice image to {path}: {details}")]
    #[diagnostic(
        code(crosscut::render::write),
        help("Check that the output directory exists and is writable")
    )]
    ImageWrite { path: PathBuf, details: String },
}

impl SliceError {
    /// Returns the machine-readable error code.
    pub fn code(&self) -> ErrorCode {
        match self {
            SliceError::IoRead { .. } => ErrorCode::IoRead,
            SliceError::ScratchFile { .. } => ErrorCode::ScratchFile,
            SliceError::ParseError { .. } => ErrorCode::ParseError,
            SliceError::EmptyMesh { .. } => ErrorCode::EmptyMesh,
            SliceError::ImageWrite { .. } => ErrorCode::ImageWrite,
        }
    }
}
