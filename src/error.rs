//! Error types shared by the controller and its collaborators.

use core::fmt;

/// Failure reported by a hardware driver (strip transmission, power switch).
///
/// Carries the driver's raw error code.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct IoError(pub i32);

impl fmt::Display for IoError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "driver error {}", self.0)
    }
}

/// Persisted settings could not be read or written.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum StorageError {
    /// Nothing stored under the settings key.
    Missing,
    /// Stored blob has a different size than the state record.
    SizeMismatch {
        /// Size of the state record
        expected: usize,
        /// Size of the stored blob
        actual: usize,
    },
    /// Blob has the right size but holds out-of-range values.
    Malformed,
    /// The backing store refused the write.
    WriteFailed,
}

impl fmt::Display for StorageError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            StorageError::Missing => write!(f, "no stored state"),
            StorageError::SizeMismatch { expected, actual } => {
                write!(f, "stored state is {} bytes, expected {}", actual, expected)
            }
            StorageError::Malformed => write!(f, "stored state holds invalid values"),
            StorageError::WriteFailed => write!(f, "settings write failed"),
        }
    }
}

/// Outcome of a failed underglow operation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum UnderglowError {
    /// No LED strip is configured.
    DeviceUnavailable,
    /// Effect index or color component out of range. State is unchanged.
    InvalidArgument,
    /// A driver call failed.
    Io(IoError),
    /// Persisted state could not be used.
    Storage(StorageError),
}

impl fmt::Display for UnderglowError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            UnderglowError::DeviceUnavailable => write!(f, "no LED strip configured"),
            UnderglowError::InvalidArgument => write!(f, "argument out of range"),
            UnderglowError::Io(err) => write!(f, "i/o failure: {}", err),
            UnderglowError::Storage(err) => write!(f, "storage failure: {}", err),
        }
    }
}

impl From<IoError> for UnderglowError {
    fn from(err: IoError) -> Self {
        UnderglowError::Io(err)
    }
}

impl From<StorageError> for UnderglowError {
    fn from(err: StorageError) -> Self {
        UnderglowError::Storage(err)
    }
}
