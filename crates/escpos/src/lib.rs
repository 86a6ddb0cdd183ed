//! ESC/POS framing for thermal receipt printers.
//!
//! Wraps packed raster data in device commands, composes simple documents
//! and decodes real-time status responses. Transport is left to the caller.

pub mod command;
pub mod document;
pub mod status;

// Re-exports for convenience
pub use command::{image_raster_command, raster_command};
pub use document::{Document, Section};
pub use status::{StatusKind, StatusReport, StatusRequest};

/// Errors that can occur while building or decoding printer commands.
#[derive(Debug, thiserror::Error)]
pub enum EscPosError {
    #[error("Raster data is empty")]
    EmptyRaster,

    #[error("Invalid raster size: expected {expected} bytes, got {actual}")]
    InvalidRasterSize { expected: usize, actual: usize },

    #[error("{field} value {value} does not fit in two bytes")]
    DimensionOverflow { field: &'static str, value: usize },

    #[error("Invalid status response: got {0} bytes")]
    InvalidStatusResponse(usize),

    #[error("Status request is not supported by this printer")]
    UnsupportedStatusRequest,
}

/// Result type alias for escpos operations.
pub type Result<T> = std::result::Result<T, EscPosError>;
