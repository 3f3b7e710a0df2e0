use thiserror::Error;

// Error
//------------------------------------------------------------------------------

#[derive(Debug, Error)]
pub enum QRError {
    // Generation
    #[error("Enter the text or URL to generate your QR code")]
    InputMissing,
    #[error("QR encoder unavailable: {0}")]
    EncodingUnavailable(String),
    #[error("Invalid color: {0}")]
    InvalidColor(String),

    // Assets
    #[error("Failed to decode image: {0}")]
    Decode(#[from] image::ImageError),

    // Export
    #[error("Please generate a QR code first")]
    NothingToExport,
    #[error("SVG format is not available for this QR code, please try PNG instead")]
    VectorUnavailable,
    #[error("Error downloading QR code: {0}")]
    ExportFailure(#[source] Box<dyn std::error::Error + Send + Sync>),
}

impl QRError {
    pub(crate) fn export<E>(cause: E) -> Self
    where
        E: Into<Box<dyn std::error::Error + Send + Sync>>,
    {
        Self::ExportFailure(cause.into())
    }
}

pub type QRResult<T> = Result<T, QRError>;

#[cfg(test)]
mod error_tests {
    use super::QRError;

    #[test]
    fn test_messages() {
        assert_eq!(
            QRError::InputMissing.to_string(),
            "Enter the text or URL to generate your QR code"
        );
        assert_eq!(
            QRError::VectorUnavailable.to_string(),
            "SVG format is not available for this QR code, please try PNG instead"
        );
        let err = QRError::export("disk full");
        assert_eq!(err.to_string(), "Error downloading QR code: disk full");
        assert!(std::error::Error::source(&err).is_some());
    }
}
