// Thu Oct 15 2026 - Alex

//! Opcode translation between cheat device dialects.
//!
//! The dispatcher picks one of three translators per code: ARMAX to
//! standard, standard to ARMAX, or a quirk translator between two
//! standard-family devices. Each consumes one opcode at a time from a
//! [`WordReader`] and appends to a [`CodeBuffer`].

pub mod bits;
pub mod buffer;
pub mod dispatcher;
pub mod error;
pub mod fill;
pub mod from_armax;
pub mod opcode;
pub mod pointer;
pub mod quirk;
pub mod reader;
pub mod to_armax;

pub use buffer::CodeBuffer;
pub use dispatcher::{translate, translate_all, BatchFailure, BatchReport};
pub use error::{error_text, TranslateError, TranslateResult};
pub use reader::WordReader;

/// Consumes exactly one source opcode, nested bodies included, and appends
/// its translation. On error the reader has still moved past the opcode.
pub trait OpcodeTranslator {
    fn translate_opcode(&mut self, reader: &mut WordReader, out: &mut CodeBuffer) -> TranslateResult<()>;
}
