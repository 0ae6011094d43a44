// Thu Oct 15 2026 - Alex

pub mod dialect;
pub mod entity;
pub mod text;

pub use dialect::{Dialect, ParseDialectError, PointerLayout};
pub use entity::{CodeEntity, CodeFlags};
pub use text::{CodeTextError, CodeListing};
