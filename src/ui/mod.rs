// Thu Oct 15 2026 - Alex

pub mod banner;
pub mod cli;
pub mod table;

pub use banner::Banner;
pub use cli::{Args, Command, CommandHandler};
pub use table::TableBuilder;
