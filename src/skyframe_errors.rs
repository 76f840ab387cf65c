use thiserror::Error;

#[derive(Error, Debug)]
pub enum SkyframeError {
    #[error("Malformed angle string: {0}")]
    Format(String),

    #[error("Invalid angle: {0}")]
    InvalidAngle(String),

    #[error("Value out of range: {0}")]
    OutOfRange(String),

    #[error("Malformed ephemeris response: {0}")]
    EphemerisFormat(String),

    #[error("Invalid frame parameters: {0}")]
    InvalidFrameParams(String),

    #[error("Body is not tracked by the ephemeris service: {0}")]
    UnknownBody(i32),

    #[error("HTTP reqwest error: {0}")]
    ReqwestError(#[from] reqwest::Error),

    #[error("Catalog CSV error: {0}")]
    CsvError(#[from] csv::Error),

    #[error("Catalog JSON error: {0}")]
    JsonError(#[from] serde_json::Error),

    #[error("Unable to perform file operation: {0}")]
    IoError(#[from] std::io::Error),
}

impl PartialEq for SkyframeError {
    fn eq(&self, other: &Self) -> bool {
        use SkyframeError::*;
        match (self, other) {
            (Format(a), Format(b)) => a == b,
            (InvalidAngle(a), InvalidAngle(b)) => a == b,
            (OutOfRange(a), OutOfRange(b)) => a == b,
            (EphemerisFormat(a), EphemerisFormat(b)) => a == b,
            (InvalidFrameParams(a), InvalidFrameParams(b)) => a == b,
            (UnknownBody(a), UnknownBody(b)) => a == b,

            // wrapped foreign errors are not comparable: same variant means equal
            (ReqwestError(_), ReqwestError(_)) => true,
            (CsvError(_), CsvError(_)) => true,
            (JsonError(_), JsonError(_)) => true,
            (IoError(_), IoError(_)) => true,

            _ => false,
        }
    }
}

impl SkyframeError {
    /// Short, stable name of the error kind, handy for log fields.
    pub fn kind(&self) -> &'static str {
        match self {
            SkyframeError::Format(_) => "format",
            SkyframeError::InvalidAngle(_) => "invalid_angle",
            SkyframeError::OutOfRange(_) => "out_of_range",
            SkyframeError::EphemerisFormat(_) => "ephemeris_format",
            SkyframeError::InvalidFrameParams(_) => "invalid_frame_params",
            SkyframeError::UnknownBody(_) => "unknown_body",
            SkyframeError::ReqwestError(_) => "http",
            SkyframeError::CsvError(_) => "csv",
            SkyframeError::JsonError(_) => "json",
            SkyframeError::IoError(_) => "io",
        }
    }
}

#[cfg(test)]
mod skyframe_errors_test {
    use super::*;

    #[test]
    fn test_eq_compares_payload() {
        assert_eq!(
            SkyframeError::Format("a".into()),
            SkyframeError::Format("a".into())
        );
        assert_ne!(
            SkyframeError::Format("a".into()),
            SkyframeError::Format("b".into())
        );
        assert_ne!(
            SkyframeError::Format("a".into()),
            SkyframeError::EphemerisFormat("a".into())
        );
    }

    #[test]
    fn test_io_variant_eq() {
        let a: SkyframeError = std::io::Error::other("x").into();
        let b: SkyframeError = std::io::Error::other("y").into();
        assert_eq!(a, b);
        assert_eq!(a.kind(), "io");
    }
}
