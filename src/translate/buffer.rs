// Thu Oct 15 2026 - Alex

/// Append-only output for one translation run. Test opcodes whose fields
/// depend on their translated body reserve a slot first and patch it once
/// the body is done.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CodeBuffer {
    words: Vec<u32>,
}

impl CodeBuffer {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            words: Vec::with_capacity(capacity),
        }
    }

    pub fn push(&mut self, word: u32) {
        self.words.push(word);
    }

    pub fn push_pair(&mut self, first: u32, second: u32) {
        self.words.push(first);
        self.words.push(second);
    }

    pub fn extend_from_slice(&mut self, words: &[u32]) {
        self.words.extend_from_slice(words);
    }

    /// Reserves one two-word line and returns its index.
    pub fn reserve_pair(&mut self) -> usize {
        let slot = self.words.len();
        self.push_pair(0, 0);
        slot
    }

    pub fn patch_pair(&mut self, slot: usize, first: u32, second: u32) {
        self.words[slot] = first;
        self.words[slot + 1] = second;
    }

    /// Lines written at or after `index`.
    pub fn lines_since(&self, index: usize) -> usize {
        self.words.len().saturating_sub(index) / 2
    }

    pub fn len(&self) -> usize {
        self.words.len()
    }

    pub fn is_empty(&self) -> bool {
        self.words.is_empty()
    }

    pub fn truncate(&mut self, len: usize) {
        self.words.truncate(len);
    }

    pub fn as_slice(&self) -> &[u32] {
        &self.words
    }

    pub fn into_words(self) -> Vec<u32> {
        self.words
    }
}
