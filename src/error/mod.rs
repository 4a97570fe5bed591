mod codes;

pub use codes::ExitCode;

use crate::api::ApiError;
use crate::scanner::ScannerError;
use crate::shell::ShellError;
use std::path::PathBuf;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum AppError {
    #[error("Directory not found: {path}")]
    DirectoryNotFound { path: PathBuf },

    #[error("Path is not a directory: {path}")]
    NotADirectory { path: PathBuf },

    #[error("Permission denied: {path}")]
    PermissionDenied { path: PathBuf },

    #[error("Bangumi API error: {message}")]
    ApiError {
        subject_id: Option<u32>,
        message: String,
    },

    #[error("Invalid input: {0}")]
    InvalidInput(String),

    #[error("{failed} of {total} renames failed")]
    RenameFailed { failed: usize, total: usize },

    #[error("{0}")]
    Other(String),
}

impl AppError {
    pub fn exit_code(&self) -> ExitCode {
        match self {
            AppError::DirectoryNotFound { .. } => ExitCode::DirectoryNotFound,
            AppError::NotADirectory { .. } => ExitCode::DirectoryNotFound,
            AppError::PermissionDenied { .. } => ExitCode::PermissionError,
            AppError::ApiError { .. } => ExitCode::ApiError,
            AppError::InvalidInput(_) => ExitCode::InvalidInput,
            AppError::RenameFailed { .. } => ExitCode::RenameError,
            AppError::Other(_) => ExitCode::GeneralError,
        }
    }

    pub fn detailed_message(&self) -> String {
        match self {
            AppError::DirectoryNotFound { path } => {
                format!(
                    "The specified directory does not exist:\n  {}\n\n\
                     Please verify the path and try again.",
                    path.display()
                )
            }

            AppError::NotADirectory { path } => {
                format!(
                    "The specified path is not a directory:\n  {}\n\n\
                     Please provide a folder containing the episode files.",
                    path.display()
                )
            }

            AppError::PermissionDenied { path } => {
                format!(
                    "Permission denied when accessing:\n  {}\n\n\
                     Please check file permissions or run with appropriate privileges.",
                    path.display()
                )
            }

            AppError::ApiError {
                subject_id,
                message,
            } => {
                let subject = subject_id
                    .map(|id| format!(" for subject {}", id))
                    .unwrap_or_default();
                format!(
                    "Failed to fetch data from Bangumi{}:\n  {}\n\n\
                     This could be due to:\n\
                     - Network connectivity issues\n\
                     - An expired or invalid access token\n\
                     - An invalid subject ID\n\n\
                     Try again later or check your internet connection.",
                    subject, message
                )
            }

            AppError::InvalidInput(message) => message.clone(),

            AppError::RenameFailed { failed, total } => {
                format!(
                    "{} of {} renames failed.\n\n\
                     Files renamed before the failure were kept.\n\
                     Check file permissions, name collisions and path lengths.",
                    failed, total
                )
            }

            AppError::Other(message) => message.clone(),
        }
    }
}

impl From<ScannerError> for AppError {
    fn from(err: ScannerError) -> Self {
        match err {
            ScannerError::PathNotFound(path) => AppError::DirectoryNotFound { path },
            ScannerError::NotADirectory(path) => AppError::NotADirectory { path },
            ScannerError::PermissionDenied(path) => AppError::PermissionDenied { path },
            ScannerError::IoError(e) => AppError::Other(format!("I/O error: {}", e)),
        }
    }
}

impl From<ApiError> for AppError {
    fn from(err: ApiError) -> Self {
        let subject_id = match &err {
            ApiError::NotFound(id) => Some(*id),
            _ => None,
        };
        AppError::ApiError {
            subject_id,
            message: err.to_string(),
        }
    }
}

impl From<ShellError> for AppError {
    fn from(err: ShellError) -> Self {
        match err {
            ShellError::Scanner(e) => e.into(),
            ShellError::Api(e) => e.into(),
            ShellError::InvalidInput(message) => AppError::InvalidInput(message),
            ShellError::RenameFailed { failed, total } => AppError::RenameFailed { failed, total },
            ShellError::InputClosed => AppError::Other("Input closed".to_string()),
            ShellError::Io(e) => AppError::Other(format!("Console I/O error: {}", e)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_exit_codes() {
        let err = AppError::DirectoryNotFound {
            path: PathBuf::from("/test"),
        };
        assert_eq!(err.exit_code(), ExitCode::DirectoryNotFound);

        let err = AppError::RenameFailed {
            failed: 1,
            total: 3,
        };
        assert_eq!(err.exit_code(), ExitCode::RenameError);

        let err = AppError::PermissionDenied {
            path: PathBuf::from("/test"),
        };
        assert_eq!(err.exit_code(), ExitCode::PermissionError);
    }

    #[test]
    fn test_detailed_message_includes_context() {
        let err = AppError::ApiError {
            subject_id: Some(400602),
            message: "Subject not found: 400602".to_string(),
        };

        let msg = err.detailed_message();
        assert!(msg.contains("for subject 400602"));
        assert!(msg.contains("access token"));
    }

    #[test]
    fn test_scanner_error_conversion() {
        let scanner_err = ScannerError::PathNotFound(PathBuf::from("/missing"));
        let app_err: AppError = scanner_err.into();
        assert_eq!(app_err.exit_code(), ExitCode::DirectoryNotFound);
    }

    #[test]
    fn test_api_error_conversion_keeps_subject() {
        let app_err: AppError = ApiError::NotFound(42).into();

        assert_eq!(app_err.exit_code(), ExitCode::ApiError);
        assert!(matches!(
            app_err,
            AppError::ApiError {
                subject_id: Some(42),
                ..
            }
        ));
    }

    #[test]
    fn test_shell_error_conversion() {
        let app_err: AppError = ShellError::InvalidInput("Season must be a number".to_string()).into();
        assert_eq!(app_err.exit_code(), ExitCode::InvalidInput);
        assert_eq!(app_err.detailed_message(), "Season must be a number");
    }
}
