//! Error types for scheme operations.

use implant_types::ShapeLabel;
use thiserror::Error;

/// Result type alias for scheme operations.
pub type SchemeResult<T> = Result<T, SchemeError>;

/// Precondition violations raised by scheme operations.
///
/// These are programmer errors: every lookup is a total function over the
/// declared label domain, and handing an operation a label outside that
/// domain is a caller bug, not a recoverable runtime condition. The
/// policy-defined cases - no similar size, labels beyond the authored
/// calibration rows, incomplete configurations - never surface here.
#[derive(Debug, Error, Clone, Copy, PartialEq, Eq)]
pub enum SchemeError {
    /// The label does not name a stem of this product line.
    #[error("label {label} is not a stem of this product line")]
    NotAStem {
        /// The offending label.
        label: ShapeLabel,
    },

    /// The label does not name a head of this product line.
    #[error("label {label} is not a head of this product line")]
    NotAHead {
        /// The offending label.
        label: ShapeLabel,
    },

    /// The marker does not name a sub-range of this product line.
    #[error("label {marker} is not a sub-range marker of this product line")]
    UnknownSubRange {
        /// The offending marker label.
        marker: ShapeLabel,
    },
}
