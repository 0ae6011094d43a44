// Thu Oct 15 2026 - Alex

//! Plain-text code listings.
//!
//! ```text
//! "Master Code" [M] [ON]
//! # must be on
//! F0100008 0C04000A
//! "Infinite Health"
//! 2034ABCD 00000063
//! ```
//!
//! A quoted line starts a new code, `#` lines become its comment and every
//! other non-blank line must be one `XXXXXXXX YYYYYYYY` word pair. Pairs that
//! appear before any name go into an unnamed code.

use crate::code::{CodeEntity, CodeFlags};
use once_cell::sync::Lazy;
use regex::Regex;
use std::fmt::Write;
use thiserror::Error;

static NAME_LINE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r#"^"([^"]*)"((?:\s*\[(?i:M|ON)\])*)\s*$"#).expect("valid name pattern")
});

static WORD_LINE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^([0-9A-Fa-f]{8})\s+([0-9A-Fa-f]{8})$").expect("valid word pattern")
});

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum CodeTextError {
    #[error("Line {line}: expected a quoted name, a comment or a word pair, found {text:?}")]
    MalformedLine { line: usize, text: String },
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CodeListing {
    pub codes: Vec<CodeEntity>,
}

impl CodeListing {
    pub fn parse(input: &str) -> Result<Self, CodeTextError> {
        let mut codes: Vec<CodeEntity> = Vec::new();

        for (index, raw) in input.lines().enumerate() {
            let line = raw.trim();
            let line_no = index + 1;

            if line.is_empty() {
                continue;
            }

            if let Some(caps) = NAME_LINE.captures(line) {
                let mut code = CodeEntity::new(codes.len() as u32, &caps[1]);
                let markers = caps[2].to_uppercase();
                if markers.contains("[M]") {
                    code.flags |= CodeFlags::MCODE;
                }
                if markers.contains("[ON]") {
                    code.flags |= CodeFlags::DEFAULT_ON;
                }
                codes.push(code);
                continue;
            }

            if let Some(text) = line.strip_prefix('#') {
                let code = Self::current(&mut codes);
                if !code.comment.is_empty() {
                    code.comment.push('\n');
                }
                code.comment.push_str(text.trim());
                code.flags |= CodeFlags::COMMENTS;
                continue;
            }

            let (first, second) = parse_pair(line).ok_or_else(|| CodeTextError::MalformedLine {
                line: line_no,
                text: line.to_string(),
            })?;
            Self::current(&mut codes).push_line(first, second);
        }

        log::debug!("Parsed {} codes from listing", codes.len());
        Ok(Self { codes })
    }

    fn current(codes: &mut Vec<CodeEntity>) -> &mut CodeEntity {
        if codes.is_empty() {
            codes.push(CodeEntity::new(0, ""));
        }
        let last = codes.len() - 1;
        &mut codes[last]
    }

    /// An odd trailing word is padded with a zero word so the result parses.
    pub fn render(&self) -> String {
        let mut text = String::new();

        for code in &self.codes {
            let _ = write!(text, "\"{}\"", code.name);
            if code.flags.contains(CodeFlags::MCODE) {
                text.push_str(" [M]");
            }
            if code.flags.contains(CodeFlags::DEFAULT_ON) {
                text.push_str(" [ON]");
            }
            text.push('\n');

            for comment in code.comment.lines() {
                let _ = writeln!(text, "# {}", comment);
            }

            for pair in code.words.chunks(2) {
                match pair {
                    [first, second] => {
                        let _ = writeln!(text, "{:08X} {:08X}", first, second);
                    }
                    [single] => {
                        let _ = writeln!(text, "{:08X} 00000000", single);
                    }
                    _ => {}
                }
            }
        }

        text
    }

    pub fn len(&self) -> usize {
        self.codes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.codes.is_empty()
    }
}

fn parse_pair(line: &str) -> Option<(u32, u32)> {
    let caps = WORD_LINE.captures(line)?;
    let first = u32::from_str_radix(&caps[1], 16).ok()?;
    let second = u32::from_str_radix(&caps[2], 16).ok()?;
    Some((first, second))
}
