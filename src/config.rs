// Thu Oct 15 2026 - Alex

use crate::code::Dialect;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("Config parse error: {0}")]
    Parse(#[from] serde_json::Error),
}

/// Source and destination device plus the error policy for one batch.
///
/// Passed by reference into every translation call; nothing about a run
/// lives in globals, so independent batches can use different contexts
/// at the same time.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct TranslationContext {
    pub source: Dialect,
    pub destination: Dialect,
    /// Keep going after an unsupported opcode and report the last error
    /// instead of stopping at the first.
    #[serde(default)]
    pub suppress_errors: bool,
}

impl Default for TranslationContext {
    fn default() -> Self {
        Self {
            source: Dialect::Standard,
            destination: Dialect::Standard,
            suppress_errors: false,
        }
    }
}

impl TranslationContext {
    pub fn new(source: Dialect, destination: Dialect) -> Self {
        Self {
            source,
            destination,
            suppress_errors: false,
        }
    }

    pub fn with_source(mut self, source: Dialect) -> Self {
        self.source = source;
        self
    }

    pub fn with_destination(mut self, destination: Dialect) -> Self {
        self.destination = destination;
        self
    }

    pub fn with_error_suppression(mut self, enabled: bool) -> Self {
        self.suppress_errors = enabled;
        self
    }

    pub fn set_error_suppression(&mut self, enabled: bool) {
        self.suppress_errors = enabled;
    }

    /// Flips suppression and returns the new setting.
    pub fn toggle_error_suppression(&mut self) -> bool {
        self.suppress_errors = !self.suppress_errors;
        self.suppress_errors
    }

    pub fn is_identity(&self) -> bool {
        self.source == self.destination
    }

    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let text = fs::read_to_string(path)?;
        let context: Self = serde_json::from_str(&text)?;
        log::debug!("Loaded translation context {} -> {} from {}", context.source, context.destination, path.display());
        Ok(context)
    }

    pub fn save(&self, path: &Path) -> Result<(), ConfigError> {
        let text = serde_json::to_string_pretty(self)?;
        fs::write(path, text)?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_toggle_suppression() {
        let mut ctx = TranslationContext::new(Dialect::CodeBreaker, Dialect::ArMax);
        assert!(!ctx.suppress_errors);
        assert!(ctx.toggle_error_suppression());
        ctx.set_error_suppression(false);
        assert!(ctx.toggle_error_suppression());
        assert!(!ctx.toggle_error_suppression());
    }

    #[test]
    fn test_json_uses_short_names() {
        let ctx = TranslationContext::new(Dialect::GameShark3, Dialect::ArMax).with_error_suppression(true);
        let json = serde_json::to_string(&ctx).unwrap();
        assert_eq!(json, r#"{"source":"gs3","destination":"armax","suppress_errors":true}"#);
        let parsed: TranslationContext = serde_json::from_str(r#"{"source":"cb","destination":"xp"}"#).unwrap();
        assert_eq!(parsed, TranslationContext::new(Dialect::CodeBreaker, Dialect::Xploder));
    }

    #[test]
    fn test_identity() {
        assert!(TranslationContext::default().is_identity());
        assert!(!TranslationContext::new(Dialect::ArMax, Dialect::Standard).is_identity());
    }
}
