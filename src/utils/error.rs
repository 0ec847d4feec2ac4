use thiserror::Error;

/// 預約時的驗證失敗，依檢查順序：號碼、是否已被預約、姓名、電話
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ReservationError {
    #[error("Invalid slot '{slot}': expected a two-digit number between 00 and 99")]
    InvalidSlot { slot: String },

    #[error("Slot {slot} is already reserved")]
    SlotAlreadyReserved { slot: String },

    #[error("Claimant name is required")]
    MissingName,

    #[error("Claimant phone is required")]
    MissingPhone,
}

impl ReservationError {
    /// 穩定的錯誤代碼，供日誌與呈現層使用
    pub fn kind(&self) -> &'static str {
        match self {
            ReservationError::InvalidSlot { .. } => "invalid_slot",
            ReservationError::SlotAlreadyReserved { .. } => "slot_already_reserved",
            ReservationError::MissingName => "missing_name",
            ReservationError::MissingPhone => "missing_phone",
        }
    }

    pub fn user_friendly_message(&self) -> String {
        match self {
            ReservationError::InvalidSlot { slot } => {
                format!("'{}' is not a raffle number; pick one from 00 to 99", slot)
            }
            ReservationError::SlotAlreadyReserved { slot } => {
                format!("Number {} is no longer available", slot)
            }
            ReservationError::MissingName => "Please enter your full name".to_string(),
            ReservationError::MissingPhone => "Please enter your phone number".to_string(),
        }
    }
}

#[derive(Error, Debug)]
pub enum LedgerError {
    #[error("Reservation rejected: {0}")]
    Reservation(#[from] ReservationError),

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    SerializationError(#[from] serde_json::Error),

    #[error("CSV processing error: {0}")]
    CsvError(#[from] csv::Error),

    #[error("Configuration error: {message}")]
    ConfigError { message: String },

    #[error("Configuration validation failed for '{field}': {message}")]
    ConfigValidationError { field: String, message: String },

    #[error("Invalid value '{value}' for '{field}': {reason}")]
    InvalidConfigValueError {
        field: String,
        value: String,
        reason: String,
    },

    #[error("Corrupt ledger snapshot: {message}")]
    CorruptSnapshot { message: String },

    #[error("Failed to write export file '{path}': {source}")]
    ExportError {
        path: String,
        #[source]
        source: std::io::Error,
    },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCategory {
    Validation,
    Configuration,
    Storage,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum ErrorSeverity {
    Medium,
    High,
    Critical,
}

impl LedgerError {
    pub fn category(&self) -> ErrorCategory {
        match self {
            LedgerError::Reservation(_) => ErrorCategory::Validation,
            LedgerError::ConfigError { .. }
            | LedgerError::ConfigValidationError { .. }
            | LedgerError::InvalidConfigValueError { .. } => ErrorCategory::Configuration,
            LedgerError::IoError(_)
            | LedgerError::SerializationError(_)
            | LedgerError::CsvError(_)
            | LedgerError::CorruptSnapshot { .. }
            | LedgerError::ExportError { .. } => ErrorCategory::Storage,
        }
    }

    pub fn severity(&self) -> ErrorSeverity {
        match self.category() {
            ErrorCategory::Validation => ErrorSeverity::Medium,
            ErrorCategory::Configuration => ErrorSeverity::High,
            ErrorCategory::Storage => ErrorSeverity::Critical,
        }
    }

    pub fn user_friendly_message(&self) -> String {
        match self {
            LedgerError::Reservation(e) => e.user_friendly_message(),
            LedgerError::IoError(e) => format!("Could not access the ledger file: {}", e),
            LedgerError::SerializationError(_) | LedgerError::CorruptSnapshot { .. } => {
                "The saved ledger could not be read".to_string()
            }
            LedgerError::CsvError(e) => format!("Could not write the CSV export: {}", e),
            LedgerError::ExportError { path, source } => {
                format!("Could not write the export file '{}': {}", path, source)
            }
            LedgerError::ConfigError { message } => message.clone(),
            LedgerError::ConfigValidationError { field, .. }
            | LedgerError::InvalidConfigValueError { field, .. } => {
                format!("Configuration setting '{}' is not valid", field)
            }
        }
    }

    pub fn recovery_suggestion(&self) -> String {
        match self {
            LedgerError::Reservation(ReservationError::SlotAlreadyReserved { .. }) => {
                "Run `raffle slots` to see which numbers are still available".to_string()
            }
            LedgerError::Reservation(ReservationError::InvalidSlot { .. }) => {
                "Use a two-digit number such as 07 or 42".to_string()
            }
            LedgerError::Reservation(_) => {
                "Pass both --name and --phone with non-blank values".to_string()
            }
            LedgerError::IoError(_) => {
                "Check that the data directory exists and is writable".to_string()
            }
            LedgerError::SerializationError(_) | LedgerError::CorruptSnapshot { .. } => {
                "Restore the ledger file from a backup or move it aside to start fresh"
                    .to_string()
            }
            LedgerError::CsvError(_) | LedgerError::ExportError { .. } => {
                "Check that the export path's directory exists and is writable".to_string()
            }
            LedgerError::ConfigError { .. }
            | LedgerError::ConfigValidationError { .. }
            | LedgerError::InvalidConfigValueError { .. } => {
                "Review the TOML configuration and command-line flags".to_string()
            }
        }
    }

    /// 若為預約驗證錯誤則回傳其內容
    pub fn as_reservation_error(&self) -> Option<&ReservationError> {
        match self {
            LedgerError::Reservation(e) => Some(e),
            _ => None,
        }
    }
}

pub type Result<T> = std::result::Result<T, LedgerError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_reservation_errors_have_distinct_messages() {
        let errors = [
            ReservationError::InvalidSlot {
                slot: "100".to_string(),
            },
            ReservationError::SlotAlreadyReserved {
                slot: "17".to_string(),
            },
            ReservationError::MissingName,
            ReservationError::MissingPhone,
        ];

        let messages: std::collections::HashSet<String> =
            errors.iter().map(|e| e.user_friendly_message()).collect();
        assert_eq!(messages.len(), errors.len());

        let kinds: std::collections::HashSet<&str> = errors.iter().map(|e| e.kind()).collect();
        assert_eq!(kinds.len(), errors.len());
    }

    #[test]
    fn test_severity_by_category() {
        let validation = LedgerError::from(ReservationError::MissingName);
        assert_eq!(validation.category(), ErrorCategory::Validation);
        assert_eq!(validation.severity(), ErrorSeverity::Medium);

        let corrupt = LedgerError::CorruptSnapshot {
            message: "duplicate slot".to_string(),
        };
        assert_eq!(corrupt.severity(), ErrorSeverity::Critical);

        let config = LedgerError::InvalidConfigValueError {
            field: "storage.ledger_file".to_string(),
            value: "ledger.txt".to_string(),
            reason: "Unsupported file extension".to_string(),
        };
        assert_eq!(config.category(), ErrorCategory::Configuration);
    }

    #[test]
    fn test_export_failure_points_at_export_path() {
        let err = LedgerError::ExportError {
            path: "/missing/out.csv".to_string(),
            source: std::io::Error::new(std::io::ErrorKind::NotFound, "no such directory"),
        };

        assert!(err.user_friendly_message().contains("/missing/out.csv"));
        assert!(!err.user_friendly_message().contains("ledger"));
        assert!(err.recovery_suggestion().contains("export path"));
        assert_eq!(err.category(), ErrorCategory::Storage);
    }

    #[test]
    fn test_already_reserved_message_mentions_availability() {
        let err = LedgerError::from(ReservationError::SlotAlreadyReserved {
            slot: "42".to_string(),
        });
        assert_eq!(err.user_friendly_message(), "Number 42 is no longer available");
        assert!(err.as_reservation_error().is_some());
    }
}
