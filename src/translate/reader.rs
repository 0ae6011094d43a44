// Thu Oct 15 2026 - Alex

use crate::translate::error::{TranslateError, TranslateResult};

/// Cursor over the source word stream.
///
/// A short read moves the cursor to the end so a caller that keeps going
/// after an error still terminates.
#[derive(Debug, Clone)]
pub struct WordReader<'a> {
    words: &'a [u32],
    pos: usize,
}

impl<'a> WordReader<'a> {
    pub fn new(words: &'a [u32]) -> Self {
        Self { words, pos: 0 }
    }

    pub fn position(&self) -> usize {
        self.pos
    }

    pub fn len(&self) -> usize {
        self.words.len()
    }

    pub fn remaining(&self) -> usize {
        self.words.len() - self.pos
    }

    pub fn is_empty(&self) -> bool {
        self.pos >= self.words.len()
    }

    pub fn peek(&self, offset: usize) -> Option<u32> {
        self.words.get(self.pos + offset).copied()
    }

    pub fn peek_pair(&self) -> Option<[u32; 2]> {
        Some([self.peek(0)?, self.peek(1)?])
    }

    /// First word of the next opcode, or `InvalidCode` at end of input.
    pub fn head(&mut self) -> TranslateResult<u32> {
        match self.peek(0) {
            Some(word) => Ok(word),
            None => Err(self.truncated()),
        }
    }

    pub fn take(&mut self, count: usize) -> TranslateResult<&'a [u32]> {
        if count > self.remaining() {
            return Err(self.truncated());
        }
        let start = self.pos;
        self.pos += count;
        Ok(&self.words[start..self.pos])
    }

    pub fn take_pair(&mut self) -> TranslateResult<[u32; 2]> {
        let words = self.take(2)?;
        Ok([words[0], words[1]])
    }

    pub fn skip(&mut self, count: usize) -> TranslateResult<()> {
        self.take(count).map(|_| ())
    }

    /// Words consumed since `start`, for opcodes copied through verbatim.
    pub fn consumed_since(&self, start: usize) -> &'a [u32] {
        &self.words[start.min(self.pos)..self.pos]
    }

    pub fn at_resume(&self) -> bool {
        self.peek_pair() == Some(crate::translate::bits::RESUME)
    }

    fn truncated(&mut self) -> TranslateError {
        log::trace!("Opcode at word {} reads past end of input ({} words)", self.pos, self.words.len());
        self.pos = self.words.len();
        TranslateError::InvalidCode
    }
}
