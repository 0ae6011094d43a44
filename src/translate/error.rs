// Thu Oct 15 2026 - Alex

use thiserror::Error;

/// Messages for error codes 1..=16, indexed by `code - 1`.
pub const ERROR_TEXT: [&str; 16] = [
    "ARMAX: value increment too large, multi-writes are limited to an increment of 127",
    "ARMAX: copy bytes is not supported",
    "Pointer write has more offsets than the destination device supports",
    "Pointer write: 32-bit writes cannot carry an offset",
    "Pointer write: offset too large for 16-bit write (max 0xFFFF)",
    "Pointer write: offset too large for 8-bit write (max 0xFFFFFF)",
    "Bitwise operations are not supported by the destination device",
    "Timer codes are not supported by the destination device",
    "Test-all / master test codes are not supported by the destination device",
    "AND tests are only supported by CodeBreaker",
    "Less-than and greater-than tests are not supported by the destination device",
    "Single-line fill is not implemented",
    "Pointer write size is not supported by the destination device",
    "Test size is not supported by the destination device",
    "Multi-write form or size is not supported",
    "Value increments are not supported by the destination device",
];

pub const GENERIC_ERROR_TEXT: &str = "Malformed code or crypt error";

#[derive(Error, Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TranslateError {
    #[error("{}", ERROR_TEXT[0])]
    ValueIncrementTooLarge,
    #[error("{}", ERROR_TEXT[1])]
    CopyBytesUnsupported,
    #[error("{}", ERROR_TEXT[2])]
    ExcessOffsets,
    #[error("{}", ERROR_TEXT[3])]
    OffsetTooLarge32,
    #[error("{}", ERROR_TEXT[4])]
    OffsetTooLarge16,
    #[error("{}", ERROR_TEXT[5])]
    OffsetTooLarge8,
    #[error("{}", ERROR_TEXT[6])]
    BitwiseUnsupported,
    #[error("{}", ERROR_TEXT[7])]
    TimerUnsupported,
    #[error("{}", ERROR_TEXT[8])]
    TestAllUnsupported,
    #[error("{}", ERROR_TEXT[9])]
    TestTypeUnsupported,
    #[error("{}", ERROR_TEXT[10])]
    TestCompareUnsupported,
    #[error("{}", ERROR_TEXT[11])]
    SingleLineFillUnimplemented,
    #[error("{}", ERROR_TEXT[12])]
    PointerSizeUnsupported,
    #[error("{}", ERROR_TEXT[13])]
    TestSizeUnsupported,
    #[error("{}", ERROR_TEXT[14])]
    MultiWriteSizeUnsupported,
    #[error("{}", ERROR_TEXT[15])]
    ValueIncrementUnsupported,
    /// Truncated or nonsensical input. Sits outside the numbered range.
    #[error("{}", GENERIC_ERROR_TEXT)]
    InvalidCode,
}

pub type TranslateResult<T> = Result<T, TranslateError>;

impl TranslateError {
    pub const INVALID_CODE: u32 = 0xFF;

    const NUMBERED: [TranslateError; 16] = [
        TranslateError::ValueIncrementTooLarge,
        TranslateError::CopyBytesUnsupported,
        TranslateError::ExcessOffsets,
        TranslateError::OffsetTooLarge32,
        TranslateError::OffsetTooLarge16,
        TranslateError::OffsetTooLarge8,
        TranslateError::BitwiseUnsupported,
        TranslateError::TimerUnsupported,
        TranslateError::TestAllUnsupported,
        TranslateError::TestTypeUnsupported,
        TranslateError::TestCompareUnsupported,
        TranslateError::SingleLineFillUnimplemented,
        TranslateError::PointerSizeUnsupported,
        TranslateError::TestSizeUnsupported,
        TranslateError::MultiWriteSizeUnsupported,
        TranslateError::ValueIncrementUnsupported,
    ];

    /// 1-based numeric code; `INVALID_CODE` for the sentinel.
    pub fn code(self) -> u32 {
        Self::NUMBERED
            .iter()
            .position(|e| *e == self)
            .map(|i| i as u32 + 1)
            .unwrap_or(Self::INVALID_CODE)
    }

    pub fn from_code(code: u32) -> Option<Self> {
        match code {
            Self::INVALID_CODE => Some(TranslateError::InvalidCode),
            1..=16 => Some(Self::NUMBERED[code as usize - 1]),
            _ => None,
        }
    }

    pub fn all() -> impl Iterator<Item = TranslateError> {
        Self::NUMBERED.into_iter()
    }
}

/// Message for a numeric error code. Anything outside 1..=16, the
/// invalid-code sentinel included, gets the generic text.
pub fn error_text(code: u32) -> &'static str {
    match code {
        1..=16 => ERROR_TEXT[code as usize - 1],
        _ => GENERIC_ERROR_TEXT,
    }
}
