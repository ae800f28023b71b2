//! The single failure type shared by [`crate::encode`] and [`crate::decode`].
//!
//! Per the propagation policy of this codec, failures are never retried and
//! never logged: `Error` is a plain, `Copy`-able discriminant with no
//! backtrace or chained source, the same shape the teacher crate uses for its
//! own `Error` enum.

/// Failure reasons for [`crate::encode`] and [`crate::decode`].
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum Error {
    /// `strategy.match_size_good` was not positive.
    InvalidStrategy,
    /// `src.len()` fell outside `[strategy.min_input_size, strategy.max_input_size]`.
    InvalidInputSize,
    /// Emitted bytes reached the strategy's compression-rate budget before the
    /// whole input was encoded.
    BudgetExceeded,
    /// No match was found before `strategy.first_success_by` bytes were emitted.
    EarlyBailout,
    /// Destination buffer was not large enough to hold the result.
    OutputOverrun,
    /// Compressed input ended in the middle of a control byte, tag, or length
    /// extension byte.
    InputOverrun,
    /// A back-reference offset was zero or pointed before the start of the
    /// decoded output so far.
    BadOffset,
    /// Strict decoding did not consume all input or fill all output.
    IncompleteOutput,
}

impl core::fmt::Display for Error {
    fn fmt(&self, f: &mut core::fmt::Formatter) -> core::fmt::Result {
        match self {
            Error::InvalidStrategy => write!(f, "strategy match_size_good must be positive"),
            Error::InvalidInputSize => write!(f, "input length outside strategy bounds"),
            Error::BudgetExceeded => {
                write!(f, "output did not meet the strategy's required compression rate")
            }
            Error::EarlyBailout => {
                write!(f, "no match found before the first-success-by threshold")
            }
            Error::OutputOverrun => write!(f, "destination buffer too small"),
            Error::InputOverrun => write!(f, "compressed input truncated"),
            Error::BadOffset => {
                write!(f, "back-reference offset is zero or precedes the start of output")
            }
            Error::IncompleteOutput => {
                write!(f, "strict decode did not consume all input or fill all output")
            }
        }
    }
}

impl core::error::Error for Error {}
