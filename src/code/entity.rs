// Thu Oct 15 2026 - Alex

use bitflags::bitflags;
use serde::{Deserialize, Serialize};

bitflags! {
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
    pub struct CodeFlags: u8 {
        const DEFAULT_ON = 0b001;
        const MCODE = 0b010;
        const COMMENTS = 0b100;
    }
}

/// One cheat: its metadata and the decrypted instruction words.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CodeEntity {
    pub id: u32,
    pub name: String,
    pub comment: String,
    pub flags: CodeFlags,
    pub words: Vec<u32>,
}

impl CodeEntity {
    pub fn new(id: u32, name: &str) -> Self {
        Self {
            id,
            name: name.to_string(),
            comment: String::new(),
            flags: CodeFlags::empty(),
            words: Vec::new(),
        }
    }

    pub fn with_words(mut self, words: Vec<u32>) -> Self {
        self.words = words;
        self
    }

    pub fn with_comment(mut self, comment: &str) -> Self {
        self.comment = comment.to_string();
        self.flags.set(CodeFlags::COMMENTS, !comment.is_empty());
        self
    }

    pub fn word_count(&self) -> usize {
        self.words.len()
    }

    /// Number of two-word lines, as cheat devices count them.
    pub fn line_count(&self) -> usize {
        (self.words.len() + 1) / 2
    }

    pub fn is_empty(&self) -> bool {
        self.words.is_empty()
    }

    pub fn is_master(&self) -> bool {
        self.flags.contains(CodeFlags::MCODE)
    }

    pub fn push_line(&mut self, first: u32, second: u32) {
        self.words.push(first);
        self.words.push(second);
    }
}
