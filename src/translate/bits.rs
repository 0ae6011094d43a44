// Thu Oct 15 2026 - Alex

//! Field extraction and packing for standard and ARMAX command words.
//!
//! Everything here masks rather than validates: callers hand in whatever the
//! word stream contains and get the bits back.

/// Every dialect addresses the low 25 bits.
pub const ADDRESS_MASK: u32 = 0x01FF_FFFF;

/// Closes an ARMAX skip-N block. Also honoured inside standard test bodies.
pub const RESUME: [u32; 2] = [0x0000_0000, 0x4000_0000];

pub const ARMAX_CLASS_FLAG: u32 = 0x8000_0000;

pub fn address(word: u32) -> u32 {
    word & ADDRESS_MASK
}

pub fn low_half(word: u32) -> u32 {
    word & 0xFFFF
}

pub fn high_half(word: u32) -> u32 {
    word >> 16
}

pub fn low_byte(word: u32) -> u32 {
    word & 0xFF
}

pub fn high_byte(word: u32) -> u32 {
    word >> 24
}

/// Standard-format command nibble.
pub fn command(word: u32) -> u32 {
    word >> 28
}

pub fn make_command(nibble: u32, addr: u32) -> u32 {
    ((nibble & 0xF) << 28) | address(addr)
}

pub fn armax_class(word: u32) -> bool {
    word & ARMAX_CLASS_FLAG != 0
}

pub fn armax_subtype(word: u32) -> u32 {
    (word >> 30) & 0x3
}

pub fn armax_type(word: u32) -> u32 {
    (word >> 27) & 0x7
}

pub fn armax_size(word: u32) -> u32 {
    (word >> 25) & 0x3
}

pub fn make_armax(kind: u32, subtype: u32, size: u32, addr: u32) -> u32 {
    ((subtype & 0x3) << 30) | ((kind & 0x7) << 27) | ((size & 0x3) << 25) | address(addr)
}

/// Sign-extends the low `bits` bits of `value` to 32 bits.
pub fn sign_extend(value: u32, bits: u32) -> u32 {
    let shift = 32 - bits;
    (((value << shift) as i32) >> shift) as u32
}

/// Access width shared by writes, tests and pointers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum WriteSize {
    Byte = 0,
    Half = 1,
    Word = 2,
}

impl WriteSize {
    pub fn from_bits(bits: u32) -> Option<Self> {
        match bits {
            0 => Some(WriteSize::Byte),
            1 => Some(WriteSize::Half),
            2 => Some(WriteSize::Word),
            _ => None,
        }
    }

    pub fn bits(self) -> u32 {
        self as u32
    }

    pub fn bytes(self) -> u32 {
        1 << self.bits()
    }

    pub fn mask(self) -> u32 {
        match self {
            WriteSize::Byte => 0xFF,
            WriteSize::Half => 0xFFFF,
            WriteSize::Word => 0xFFFF_FFFF,
        }
    }

    pub fn sign_bit(self) -> u32 {
        match self {
            WriteSize::Byte => 0x80,
            WriteSize::Half => 0x8000,
            WriteSize::Word => 0x8000_0000,
        }
    }
}

/// ARMAX command types (3-bit field).
pub mod armax {
    pub const WRITE: u32 = 0;
    pub const EQUAL: u32 = 1;
    pub const NOT_EQUAL: u32 = 2;
    pub const LESS_SIGNED: u32 = 3;
    pub const GREATER_SIGNED: u32 = 4;
    pub const LESS_UNSIGNED: u32 = 5;
    pub const GREATER_UNSIGNED: u32 = 6;
    pub const AND: u32 = 7;

    pub const DIRECT: u32 = 0;
    pub const POINTER: u32 = 1;
    pub const INCREMENT: u32 = 2;
    pub const HOOK: u32 = 3;

    pub const SKIP_ONE: u32 = 0;
    pub const SKIP_TWO: u32 = 1;
    pub const SKIP_BLOCK: u32 = 2;
    pub const SKIP_DISABLE: u32 = 3;

    pub const SPECIAL_FILL_FIRST: u32 = 0x80;
    pub const SPECIAL_FILL_LAST: u32 = 0x83;
    pub const SPECIAL_MULTI_FIRST: u32 = 0x84;
    pub const SPECIAL_MULTI_LAST: u32 = 0x85;
}

/// Standard test comparison, as stored in `D` and `E` opcodes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Compare {
    Equal = 0,
    NotEqual = 1,
    Less = 2,
    Greater = 3,
    And = 4,
}

impl Compare {
    pub fn from_bits(bits: u32) -> Option<Self> {
        match bits {
            0 => Some(Compare::Equal),
            1 => Some(Compare::NotEqual),
            2 => Some(Compare::Less),
            3 => Some(Compare::Greater),
            4 => Some(Compare::And),
            _ => None,
        }
    }

    pub fn bits(self) -> u32 {
        self as u32
    }

    pub fn is_ordered(self) -> bool {
        matches!(self, Compare::Less | Compare::Greater)
    }

    /// ARMAX has signed and unsigned ordering; standard only unsigned.
    pub fn from_armax(kind: u32) -> Option<Self> {
        match kind {
            armax::EQUAL => Some(Compare::Equal),
            armax::NOT_EQUAL => Some(Compare::NotEqual),
            armax::LESS_SIGNED | armax::LESS_UNSIGNED => Some(Compare::Less),
            armax::GREATER_SIGNED | armax::GREATER_UNSIGNED => Some(Compare::Greater),
            armax::AND => Some(Compare::And),
            _ => None,
        }
    }

    pub fn to_armax(self) -> u32 {
        match self {
            Compare::Equal => armax::EQUAL,
            Compare::NotEqual => armax::NOT_EQUAL,
            Compare::Less => armax::LESS_UNSIGNED,
            Compare::Greater => armax::GREATER_UNSIGNED,
            Compare::And => armax::AND,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_halves_and_bytes() {
        let word = 0x1234_5678;
        assert_eq!(low_half(word), 0x5678);
        assert_eq!(high_half(word), 0x1234);
        assert_eq!(low_byte(word), 0x78);
        assert_eq!(high_byte(word), 0x12);
        assert_eq!(command(0xE123_4567), 0xE);
    }

    #[test]
    fn test_address_mask() {
        assert_eq!(address(0xFFFF_FFFF), 0x01FF_FFFF);
        assert_eq!(make_command(0x2, 0x00AB_CDEF), 0x20AB_CDEF);
        assert_eq!(make_command(0x2, 0xFFAB_CDEF), 0x21AB_CDEF);
    }

    #[test]
    fn test_armax_fields_invert() {
        let word = make_armax(armax::EQUAL, armax::SKIP_BLOCK, WriteSize::Half.bits(), 0x0012_3456);
        assert_eq!(armax_type(word), armax::EQUAL);
        assert_eq!(armax_subtype(word), armax::SKIP_BLOCK);
        assert_eq!(armax_size(word), 1);
        assert_eq!(address(word), 0x0012_3456);
        assert!(armax_class(word));

        let write = make_armax(armax::WRITE, armax::DIRECT, WriteSize::Word.bits(), 0x00AB_CDEF);
        assert_eq!(write, 0x04AB_CDEF);
        assert!(!armax_class(write));
    }

    #[test]
    fn test_special_prefixes() {
        let fill = make_armax(armax::WRITE, 2, WriteSize::Half.bits(), 0x0100_0000);
        assert_eq!(high_byte(fill), 0x83);
        let multi = make_armax(armax::WRITE, 2, WriteSize::Word.bits(), 0);
        assert_eq!(high_byte(multi), armax::SPECIAL_MULTI_FIRST);
    }

    #[test]
    fn test_sign_extend() {
        assert_eq!(sign_extend(0xFF, 8), 0xFFFF_FFFF);
        assert_eq!(sign_extend(0x7F, 8), 0x7F);
        assert_eq!(sign_extend(0x8000, 16), 0xFFFF_8000);
    }

    #[test]
    fn test_compare_signed_folds_to_unsigned() {
        assert_eq!(Compare::from_armax(armax::LESS_SIGNED), Some(Compare::Less));
        assert_eq!(Compare::Less.to_armax(), armax::LESS_UNSIGNED);
        assert_eq!(Compare::from_armax(armax::WRITE), None);
    }
}
