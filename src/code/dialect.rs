// Thu Oct 15 2026 - Alex

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

/// A cheat device's opcode encoding.
///
/// `ArMax` is the encrypted two-word scheme; everything else shares the
/// nibble-tagged standard layout and differs only in quirks.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Dialect {
    #[serde(rename = "std")]
    Standard,
    #[serde(rename = "armax")]
    ArMax,
    #[serde(rename = "ar1")]
    ActionReplay1,
    #[serde(rename = "ar2")]
    ActionReplay2,
    #[serde(rename = "cb")]
    CodeBreaker,
    #[serde(rename = "gs3")]
    GameShark3,
    #[serde(rename = "xp")]
    Xploder,
}

/// How a standard-family device lays out the pointer write (`6`) opcode.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PointerLayout {
    /// `6aaaaaaa vvvvvvvv 000snnnn oooooooo [oooooooo ...]`
    Chained,
    /// `6aaaaaaa vvvvvvvv s000nnnn oooooooo`, one offset only
    SingleOffset,
    /// `6aaaaaaa ooooooVV 0000000s 00000000`, offset packed above the value
    Inline,
}

#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("Unknown dialect: {0} (expected one of std, armax, ar1, ar2, cb, gs3, xp)")]
pub struct ParseDialectError(pub String);

impl Dialect {
    pub const ALL: [Dialect; 7] = [
        Dialect::Standard,
        Dialect::ArMax,
        Dialect::ActionReplay1,
        Dialect::ActionReplay2,
        Dialect::CodeBreaker,
        Dialect::GameShark3,
        Dialect::Xploder,
    ];

    pub fn short_name(&self) -> &'static str {
        match self {
            Dialect::Standard => "std",
            Dialect::ArMax => "armax",
            Dialect::ActionReplay1 => "ar1",
            Dialect::ActionReplay2 => "ar2",
            Dialect::CodeBreaker => "cb",
            Dialect::GameShark3 => "gs3",
            Dialect::Xploder => "xp",
        }
    }

    pub fn display_name(&self) -> &'static str {
        match self {
            Dialect::Standard => "Standard (raw)",
            Dialect::ArMax => "Action Replay MAX",
            Dialect::ActionReplay1 => "Action Replay 1",
            Dialect::ActionReplay2 => "Action Replay 2",
            Dialect::CodeBreaker => "CodeBreaker",
            Dialect::GameShark3 => "GameShark 3",
            Dialect::Xploder => "Xploder",
        }
    }

    pub fn is_armax(&self) -> bool {
        matches!(self, Dialect::ArMax)
    }

    /// Increment opcodes store the width one-based and the target address
    /// biased down by 0x10000. The two always travel together.
    pub fn increment_one_based(&self) -> bool {
        matches!(self, Dialect::GameShark3 | Dialect::Xploder)
    }

    pub fn pointer_layout(&self) -> PointerLayout {
        match self {
            Dialect::Standard | Dialect::CodeBreaker | Dialect::ArMax => PointerLayout::Chained,
            Dialect::ActionReplay1 | Dialect::GameShark3 | Dialect::Xploder => PointerLayout::SingleOffset,
            Dialect::ActionReplay2 => PointerLayout::Inline,
        }
    }

    /// GameShark 3 has no byte pointers; a zero size field reads as half.
    pub fn pointer_zero_size_is_half(&self) -> bool {
        matches!(self, Dialect::GameShark3)
    }

    pub fn supports_value_increment(&self) -> bool {
        matches!(self, Dialect::Standard | Dialect::CodeBreaker | Dialect::Xploder)
    }

    pub fn supports_bitwise(&self) -> bool {
        matches!(self, Dialect::Standard | Dialect::CodeBreaker)
    }

    pub fn supports_byte_tests(&self) -> bool {
        matches!(self, Dialect::CodeBreaker)
    }

    pub fn supports_and_test(&self) -> bool {
        matches!(self, Dialect::CodeBreaker)
    }

    /// Less-than / greater-than comparisons. Action Replay 1 only knows
    /// equal and not-equal.
    pub fn supports_ordered_tests(&self) -> bool {
        !matches!(self, Dialect::ActionReplay1)
    }

    /// Whether the implicit one-line `D` test exists. Devices without it
    /// always get the counted `E` form.
    pub fn supports_single_test(&self) -> bool {
        !matches!(
            self,
            Dialect::ActionReplay1 | Dialect::ActionReplay2 | Dialect::Xploder
        )
    }

    /// On Action Replay 1 the `9` opcode is a master-level test, not a
    /// conditional hook.
    pub fn supports_conditional_hook(&self) -> bool {
        !matches!(self, Dialect::ActionReplay1)
    }
}

impl fmt::Display for Dialect {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.short_name())
    }
}

impl FromStr for Dialect {
    type Err = ParseDialectError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "std" | "standard" | "raw" => Ok(Dialect::Standard),
            "armax" | "max" => Ok(Dialect::ArMax),
            "ar1" => Ok(Dialect::ActionReplay1),
            "ar2" => Ok(Dialect::ActionReplay2),
            "cb" | "codebreaker" => Ok(Dialect::CodeBreaker),
            "gs3" | "gameshark3" => Ok(Dialect::GameShark3),
            "xp" | "xploder" => Ok(Dialect::Xploder),
            other => Err(ParseDialectError(other.to_string())),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_round_trip() {
        for dialect in Dialect::ALL {
            assert_eq!(dialect.short_name().parse::<Dialect>(), Ok(dialect));
        }
        assert!("gameboy".parse::<Dialect>().is_err());
    }

    #[test]
    fn test_capabilities() {
        assert!(Dialect::CodeBreaker.supports_and_test());
        assert!(!Dialect::Standard.supports_byte_tests());
        assert!(Dialect::Xploder.increment_one_based());
        assert_eq!(Dialect::ActionReplay2.pointer_layout(), PointerLayout::Inline);
        assert!(!Dialect::ActionReplay1.supports_conditional_hook());
    }
}
