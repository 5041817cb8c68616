use std::fmt;

/// Errors raised by [`Sequence`](super::sequence::Sequence) operations.
///
/// Every operation that can fail validates its arguments before touching the
/// storage, so an `Err` always leaves the sequence exactly as it was.
#[derive(Debug, Clone, PartialEq)]
pub enum SeqError {
    /// The operation would need a length above `2^32 - 1`.
    LengthOverflow { requested: u64 },
    /// A requested length that is negative, fractional, non-finite or too large.
    InvalidLengthValue(f64),
}

impl fmt::Display for SeqError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SeqError::LengthOverflow { requested } => {
                write!(f, "length {} exceeds the maximum array length", requested)
            }
            SeqError::InvalidLengthValue(v) => write!(f, "invalid array length {}", v),
        }
    }
}

impl std::error::Error for SeqError {}

#[derive(Debug)]
pub enum JErrorType {
    ReferenceError(String),
    TypeError(String),
    RangeError(String),
    SyntaxError(String),
}
impl fmt::Display for JErrorType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            JErrorType::ReferenceError(m) => write!(f, "Uncaught reference error: {}.", m),
            JErrorType::TypeError(m) => write!(f, "Uncaught type error: {}.", m),
            JErrorType::RangeError(m) => write!(f, "Uncaught range error: {}.", m),
            JErrorType::SyntaxError(m) => write!(f, "Uncaught syntax error: {}.", m),
        }
    }
}

impl std::error::Error for JErrorType {}

impl From<SeqError> for JErrorType {
    fn from(e: SeqError) -> Self {
        JErrorType::RangeError(e.to_string())
    }
}
