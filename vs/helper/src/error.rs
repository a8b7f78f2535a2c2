/*!
    Error types for the helper crate.
*/

use std::fmt;

use thiserror::Error;

/**
    The arithmetic step in which an overflow was detected.

    Purely diagnostic; callers that only care whether an overflow
    happened should use [`Error::is_overflow`].
*/
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum OverflowStep {
    /// Multiplying the numerator or denominator by the scale factor.
    Multiply,
    /// Moving the sign from the denominator to the numerator.
    Negate,
}

impl fmt::Display for OverflowStep {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Multiply => write!(f, "multiply"),
            Self::Negate => write!(f, "negate"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum Error {
    #[error("arithmetic overflow during {step}")]
    Overflow { step: OverflowStep },

    #[error("denominator cannot be zero")]
    ZeroDenominator,

    #[error("scale divisor cannot be zero")]
    ZeroDivisor,

    #[error("alignment must be a non-zero power of two, got {0}")]
    InvalidAlignment(usize),

    #[error("failed to allocate {size} bytes aligned to {alignment}")]
    AllocationFailed { size: usize, alignment: usize },

    #[error("invalid rational {input:?}: {message}")]
    Parse { input: String, message: String },
}

impl Error {
    pub(crate) const fn overflow(step: OverflowStep) -> Self {
        Self::Overflow { step }
    }

    pub(crate) fn parse(input: impl Into<String>, message: impl Into<String>) -> Self {
        Self::Parse {
            input: input.into(),
            message: message.into(),
        }
    }

    /**
        Returns true if this error is an arithmetic overflow,
        regardless of which step produced it.
    */
    pub const fn is_overflow(&self) -> bool {
        matches!(self, Self::Overflow { .. })
    }
}

/**
    Result type alias for the helper crate.
*/
pub type Result<T> = std::result::Result<T, Error>;
