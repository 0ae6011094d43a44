// Thu Oct 15 2026 - Alex

use crate::code::Dialect;
use clap::{Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(name = "ps2-code-translator")]
#[command(author = "Alex")]
#[command(version = "1.0.0")]
#[command(about = "Translates PS2 cheat codes between device formats", long_about = None)]
pub struct Args {
    #[command(subcommand)]
    pub command: Command,

    #[arg(short, long, global = true, default_value = "warn")]
    pub log_level: String,

    /// Append log records to this file instead of stderr
    #[arg(long, global = true)]
    pub log_file: Option<PathBuf>,

    #[arg(short, long, global = true)]
    pub quiet: bool,

    #[arg(long, global = true)]
    pub no_color: bool,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Translate a code listing
    Translate(TranslateArgs),
    /// List translation error codes
    Errors,
    /// List supported devices and what they can express
    Dialects,
}

#[derive(Parser, Debug)]
pub struct TranslateArgs {
    /// Source device (std, armax, ar1, ar2, cb, gs3, xp)
    #[arg(short, long)]
    pub from: Option<Dialect>,

    /// Destination device
    #[arg(short, long)]
    pub to: Option<Dialect>,

    /// Listing to read; stdin when omitted
    #[arg(short, long)]
    pub input: Option<PathBuf>,

    /// Where to write the translated listing; stdout when omitted
    #[arg(short, long)]
    pub output: Option<PathBuf>,

    /// Keep going past unsupported opcodes, dropping them
    #[arg(short, long)]
    pub suppress_errors: bool,

    /// JSON translation context; flags override its fields
    #[arg(short, long)]
    pub config: Option<PathBuf>,

    /// Write the effective translation context as JSON
    #[arg(long)]
    pub save_config: Option<PathBuf>,
}

impl TranslateArgs {
    pub fn validate(&self) -> Result<(), String> {
        if self.config.is_none() && (self.from.is_none() || self.to.is_none()) {
            return Err("--from and --to are required without --config".to_string());
        }

        if let Some(config) = &self.config {
            if !config.exists() {
                return Err(format!("Config file does not exist: {}", config.display()));
            }
        }

        if let Some(input) = &self.input {
            if !input.exists() {
                return Err(format!("Input file does not exist: {}", input.display()));
            }
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_translate() {
        let args = Args::try_parse_from([
            "ps2-code-translator",
            "translate",
            "--from",
            "cb",
            "--to",
            "armax",
            "--suppress-errors",
        ])
        .unwrap();

        match args.command {
            Command::Translate(t) => {
                assert_eq!(t.from, Some(Dialect::CodeBreaker));
                assert_eq!(t.to, Some(Dialect::ArMax));
                assert!(t.suppress_errors);
                assert!(t.validate().is_ok());
            }
            other => panic!("unexpected command {:?}", other),
        }
        assert_eq!(args.log_level, "warn");
    }

    #[test]
    fn test_missing_dialects_rejected() {
        let args = Args::try_parse_from(["ps2-code-translator", "translate", "--from", "gs3"]).unwrap();
        match args.command {
            Command::Translate(t) => assert!(t.validate().is_err()),
            other => panic!("unexpected command {:?}", other),
        }
    }

    #[test]
    fn test_unknown_dialect() {
        assert!(Args::try_parse_from(["ps2-code-translator", "translate", "--from", "nes"]).is_err());
    }
}
