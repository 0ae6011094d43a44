// Thu Oct 15 2026 - Alex

use colored::Colorize;
use ps2_code_translator::ui::cli;

fn main() {
    if let Err(e) = cli::run() {
        eprintln!("{} {:#}", "[!]".red(), e);
        std::process::exit(1);
    }
}
