// Thu Oct 15 2026 - Alex

//! Cheat code translation between PS2 cheat device formats.
//!
//! ```
//! use ps2_code_translator::{translate, CodeEntity, Dialect, TranslationContext};
//!
//! let mut code = CodeEntity::new(0, "Max Money").with_words(vec![0x20AB_CDEF, 0x42]);
//! let ctx = TranslationContext::new(Dialect::Standard, Dialect::ArMax);
//! translate(&mut code, &ctx).unwrap();
//! assert_eq!(code.words, vec![0x04AB_CDEF, 0x42]);
//! ```

pub mod code;
pub mod config;
pub mod translate;
pub mod ui;
pub mod utils;

pub use code::{CodeEntity, CodeFlags, CodeListing, Dialect};
pub use config::{ConfigError, TranslationContext};
pub use translate::{error_text, translate, translate_all, BatchReport, TranslateError, TranslateResult};
