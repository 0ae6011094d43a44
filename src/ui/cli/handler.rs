// Thu Oct 15 2026 - Alex

use super::args::{Args, Command, TranslateArgs};
use crate::code::{CodeListing, Dialect};
use crate::config::TranslationContext;
use crate::translate::{translate_all, BatchReport, TranslateError};
use crate::ui::banner::Banner;
use crate::ui::table::{Alignment, TableBuilder};
use crate::utils::logging::{scoped_timer, LoggingUtils};
use anyhow::Context;
use colored::Colorize;
use std::collections::HashSet;
use std::io::{Read, Write};

pub struct CommandHandler {
    use_color: bool,
}

impl CommandHandler {
    pub fn new() -> Self {
        Self { use_color: true }
    }

    pub fn execute(&mut self, args: Args) -> anyhow::Result<()> {
        if args.no_color {
            self.use_color = false;
            colored::control::set_override(false);
        }

        if !args.quiet {
            Banner::application().with_color(self.use_color).print();
        }

        self.setup_logging(&args)?;

        match args.command {
            Command::Translate(translate_args) => self.handle_translate(translate_args),
            Command::Errors => self.handle_errors(),
            Command::Dialects => self.handle_dialects(),
        }
    }

    fn setup_logging(&self, args: &Args) -> anyhow::Result<()> {
        if LoggingUtils::init_from_env() {
            return Ok(());
        }

        let level = LoggingUtils::level_from_str(&args.log_level);
        match &args.log_file {
            Some(path) => LoggingUtils::init_logger_with_file(level, path)
                .with_context(|| format!("Failed to open log file {}", path.display()))?,
            None => LoggingUtils::init_logger(level, self.use_color),
        }
        Ok(())
    }

    fn load_context(args: &TranslateArgs) -> anyhow::Result<TranslationContext> {
        let mut ctx = match &args.config {
            Some(path) => TranslationContext::load(path)
                .with_context(|| format!("Failed to load config {}", path.display()))?,
            None => TranslationContext::default(),
        };

        if let Some(from) = args.from {
            ctx = ctx.with_source(from);
        }
        if let Some(to) = args.to {
            ctx = ctx.with_destination(to);
        }
        if args.suppress_errors {
            ctx.set_error_suppression(true);
        }
        Ok(ctx)
    }

    fn handle_translate(&self, args: TranslateArgs) -> anyhow::Result<()> {
        args.validate().map_err(|e| anyhow::anyhow!(e))?;
        let ctx = Self::load_context(&args)?;

        if let Some(path) = &args.save_config {
            ctx.save(path)
                .with_context(|| format!("Failed to save config {}", path.display()))?;
        }

        let text = match &args.input {
            Some(path) => std::fs::read_to_string(path)
                .with_context(|| format!("Failed to read {}", path.display()))?,
            None => {
                let mut buf = String::new();
                std::io::stdin().read_to_string(&mut buf).context("Failed to read stdin")?;
                buf
            }
        };

        let mut listing = CodeListing::parse(&text)?;
        eprintln!(
            "{} Translating {} codes: {} -> {}",
            "[*]".blue(),
            listing.len(),
            ctx.source.display_name(),
            ctx.destination.display_name()
        );

        let report = {
            let _timer = scoped_timer("translate_all");
            translate_all(&mut listing.codes, &ctx)
        };

        for failure in &report.failures {
            eprintln!(
                "{} \"{}\": {} (error {})",
                "[!]".red(),
                failure.name,
                failure.error,
                failure.error.code()
            );
        }

        if !ctx.suppress_errors {
            Self::drop_failed(&mut listing, &report);
        }

        let rendered = listing.render();
        match &args.output {
            Some(path) => {
                std::fs::write(path, rendered)
                    .with_context(|| format!("Failed to write {}", path.display()))?;
                eprintln!("{} Output written to: {}", "[+]".green(), path.display());
            }
            None => std::io::stdout().write_all(rendered.as_bytes())?,
        }

        eprintln!(
            "{} {} translated, {} with errors",
            "[+]".green(),
            report.translated,
            report.failed()
        );

        if !report.is_clean() && !ctx.suppress_errors {
            anyhow::bail!("{} codes could not be translated", report.failed());
        }
        Ok(())
    }

    /// Removes codes whose words are still in the source dialect.
    fn drop_failed(listing: &mut CodeListing, report: &BatchReport) {
        let failed: HashSet<u32> = report.failures.iter().map(|f| f.id).collect();
        if failed.is_empty() {
            return;
        }
        listing.codes.retain(|code| !failed.contains(&code.id));
        log::debug!("Dropped {} untranslated codes from output", failed.len());
    }

    fn handle_errors(&self) -> anyhow::Result<()> {
        let mut table = TableBuilder::new()
            .with_headers(&["Code", "Message"])
            .with_alignment(0, Alignment::Right)
            .with_color(self.use_color);

        for error in TranslateError::all() {
            table = table.add_row(&[format!("{}", error.code()), error.to_string()]);
        }
        let invalid = TranslateError::InvalidCode;
        table = table.add_row(&[format!("{}", invalid.code()), invalid.to_string()]);

        println!("{}", table.build());
        Ok(())
    }

    fn handle_dialects(&self) -> anyhow::Result<()> {
        let mark = |supported: bool| if supported { "yes" } else { "-" };
        let mut table = TableBuilder::new()
            .with_headers(&["Id", "Device", "Pointer", "Inc +", "Bitwise", "Byte test", "AND", "< >", "D", "9"])
            .with_color(self.use_color);

        for dialect in Dialect::ALL {
            table = table.add_row(&[
                dialect.short_name().to_string(),
                dialect.display_name().to_string(),
                if dialect.is_armax() {
                    "inline".to_string()
                } else {
                    format!("{:?}", dialect.pointer_layout()).to_lowercase()
                },
                mark(dialect.supports_value_increment()).to_string(),
                mark(dialect.supports_bitwise()).to_string(),
                mark(dialect.supports_byte_tests()).to_string(),
                mark(dialect.supports_and_test()).to_string(),
                mark(dialect.supports_ordered_tests()).to_string(),
                mark(dialect.supports_single_test()).to_string(),
                mark(dialect.supports_conditional_hook()).to_string(),
            ]);
        }

        println!("{}", table.build());
        Ok(())
    }
}

impl Default for CommandHandler {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;

    fn args(from: Option<Dialect>, to: Option<Dialect>, suppress_errors: bool) -> TranslateArgs {
        TranslateArgs {
            from,
            to,
            input: None,
            output: None,
            suppress_errors,
            config: None,
            save_config: None,
        }
    }

    #[test]
    fn test_flags_build_context() {
        let ctx = CommandHandler::load_context(&args(Some(Dialect::GameShark3), Some(Dialect::ArMax), true)).unwrap();
        assert_eq!(ctx, TranslationContext::new(Dialect::GameShark3, Dialect::ArMax).with_error_suppression(true));
    }

    #[test]
    fn test_config_file_with_override() {
        let path: PathBuf = std::env::temp_dir().join(format!("ps2ct-handler-{}.json", std::process::id()));
        TranslationContext::new(Dialect::CodeBreaker, Dialect::Xploder).save(&path).unwrap();

        let mut translate = args(None, Some(Dialect::ArMax), false);
        translate.config = Some(path.clone());
        let ctx = CommandHandler::load_context(&translate).unwrap();
        std::fs::remove_file(&path).ok();

        assert_eq!(ctx.source, Dialect::CodeBreaker);
        assert_eq!(ctx.destination, Dialect::ArMax);
        assert!(!ctx.suppress_errors);
    }

    #[test]
    fn test_failed_codes_left_out_of_output() {
        let mut listing = CodeListing::parse("\"A\"\n20100000 00000042\n\"B\"\nB0000000 00000010\n").unwrap();
        let report = translate_all(&mut listing.codes, &TranslationContext::new(Dialect::Standard, Dialect::ArMax));
        assert_eq!(report.failed(), 1);

        CommandHandler::drop_failed(&mut listing, &report);
        assert_eq!(listing.len(), 1);
        assert_eq!(listing.codes[0].name, "A");

        let rendered = listing.render();
        assert!(rendered.contains("04100000 00000042"));
        assert!(!rendered.contains("B0000000"));
    }
}
