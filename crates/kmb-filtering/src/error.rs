use crate::config::ConfigError;
use crate::telemetry::TelemetryError;
use crate::workflows::approval::ApprovalError;
use crate::workflows::elaborate::ElaborateError;
use crate::workflows::filtering::{ErrorKind, FilteringError};
use crate::workflows::reference::ReferenceDataError;
use std::fmt;

#[derive(Debug)]
pub enum AppError {
    Config(ConfigError),
    Telemetry(TelemetryError),
    Io(std::io::Error),
    Json(serde_json::Error),
    Reference(ReferenceDataError),
    Filtering(FilteringError),
    Elaborate(ElaborateError),
    Approval(ApprovalError),
}

impl AppError {
    /// Coarse classification for exit codes and host-side mapping.
    pub fn kind(&self) -> ErrorKind {
        match self {
            AppError::Filtering(err) => err.kind(),
            AppError::Elaborate(_) | AppError::Approval(_) | AppError::Json(_) => {
                ErrorKind::BadRequest
            }
            AppError::Config(_)
            | AppError::Telemetry(_)
            | AppError::Io(_)
            | AppError::Reference(_) => ErrorKind::Internal,
        }
    }
}

impl fmt::Display for AppError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AppError::Config(err) => write!(f, "configuration error: {}", err),
            AppError::Telemetry(err) => write!(f, "telemetry error: {}", err),
            AppError::Io(err) => write!(f, "io error: {}", err),
            AppError::Json(err) => write!(f, "invalid json payload: {}", err),
            AppError::Reference(err) => write!(f, "reference data error: {}", err),
            AppError::Filtering(err) => write!(f, "filtering error: {}", err),
            AppError::Elaborate(err) => write!(f, "elaborate error: {}", err),
            AppError::Approval(err) => write!(f, "approval error: {}", err),
        }
    }
}

impl std::error::Error for AppError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            AppError::Config(err) => Some(err),
            AppError::Telemetry(err) => Some(err),
            AppError::Io(err) => Some(err),
            AppError::Json(err) => Some(err),
            AppError::Reference(err) => Some(err),
            AppError::Filtering(err) => Some(err),
            AppError::Elaborate(err) => Some(err),
            AppError::Approval(err) => Some(err),
        }
    }
}

impl From<ConfigError> for AppError {
    fn from(value: ConfigError) -> Self {
        Self::Config(value)
    }
}

impl From<TelemetryError> for AppError {
    fn from(value: TelemetryError) -> Self {
        Self::Telemetry(value)
    }
}

impl From<std::io::Error> for AppError {
    fn from(value: std::io::Error) -> Self {
        Self::Io(value)
    }
}

impl From<serde_json::Error> for AppError {
    fn from(value: serde_json::Error) -> Self {
        Self::Json(value)
    }
}

impl From<ReferenceDataError> for AppError {
    fn from(value: ReferenceDataError) -> Self {
        Self::Reference(value)
    }
}

impl From<FilteringError> for AppError {
    fn from(value: FilteringError) -> Self {
        Self::Filtering(value)
    }
}

impl From<ElaborateError> for AppError {
    fn from(value: ElaborateError) -> Self {
        Self::Elaborate(value)
    }
}

impl From<ApprovalError> for AppError {
    fn from(value: ApprovalError) -> Self {
        Self::Approval(value)
    }
}
