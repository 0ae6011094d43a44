// Thu Oct 15 2026 - Alex

use crate::code::Dialect;
use crate::translate::bits::{address, low_half, make_command, Compare, WriteSize};
use crate::translate::buffer::CodeBuffer;
use crate::translate::error::{TranslateError, TranslateResult};
use crate::translate::reader::WordReader;

/// Increment opcodes on one-based devices store the address this far below
/// the real target.
pub const INCREMENT_ADDRESS_BIAS: u32 = 0x0001_0000;

/// Standard-format command nibbles.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum StdCommand {
    WriteByte,
    WriteHalf,
    WriteWord,
    Increment,
    MultiWrite,
    CopyBytes,
    Pointer,
    Bitwise,
    /// No device assigns `8`; such lines are carried through untouched.
    Unassigned,
    ConditionalHook,
    MasterWrite,
    Timer,
    TestAll,
    TestSingle,
    TestMulti,
    Hook,
}

impl StdCommand {
    pub fn from_word(word: u32) -> Self {
        match word >> 28 {
            0x0 => StdCommand::WriteByte,
            0x1 => StdCommand::WriteHalf,
            0x2 => StdCommand::WriteWord,
            0x3 => StdCommand::Increment,
            0x4 => StdCommand::MultiWrite,
            0x5 => StdCommand::CopyBytes,
            0x6 => StdCommand::Pointer,
            0x7 => StdCommand::Bitwise,
            0x8 => StdCommand::Unassigned,
            0x9 => StdCommand::ConditionalHook,
            0xA => StdCommand::MasterWrite,
            0xB => StdCommand::Timer,
            0xC => StdCommand::TestAll,
            0xD => StdCommand::TestSingle,
            0xE => StdCommand::TestMulti,
            _ => StdCommand::Hook,
        }
    }

    pub fn nibble(self) -> u32 {
        match self {
            StdCommand::WriteByte => 0x0,
            StdCommand::WriteHalf => 0x1,
            StdCommand::WriteWord => 0x2,
            StdCommand::Increment => 0x3,
            StdCommand::MultiWrite => 0x4,
            StdCommand::CopyBytes => 0x5,
            StdCommand::Pointer => 0x6,
            StdCommand::Bitwise => 0x7,
            StdCommand::Unassigned => 0x8,
            StdCommand::ConditionalHook => 0x9,
            StdCommand::MasterWrite => 0xA,
            StdCommand::Timer => 0xB,
            StdCommand::TestAll => 0xC,
            StdCommand::TestSingle => 0xD,
            StdCommand::TestMulti => 0xE,
            StdCommand::Hook => 0xF,
        }
    }

    pub fn write_for(size: WriteSize) -> Self {
        match size {
            WriteSize::Byte => StdCommand::WriteByte,
            WriteSize::Half => StdCommand::WriteHalf,
            WriteSize::Word => StdCommand::WriteWord,
        }
    }
}

/// Decoded `3` opcode with the device's width base and address bias
/// already removed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Increment {
    pub size: WriteSize,
    pub decrement: bool,
    pub address: u32,
    pub value: u32,
}

impl Increment {
    pub fn read(reader: &mut WordReader, dialect: Dialect) -> TranslateResult<Self> {
        let head = reader.head()?;
        let op = (head >> 20) & 0x7;
        let stored = op >> 1;
        let width = if dialect.increment_one_based() {
            stored.checked_sub(1)
        } else {
            Some(stored)
        };

        let size = match width.and_then(WriteSize::from_bits) {
            Some(size) => size,
            None => {
                reader.skip(2)?;
                return Err(TranslateError::InvalidCode);
            }
        };

        let words = reader.take(if size == WriteSize::Word { 4 } else { 2 })?;
        let value = match size {
            WriteSize::Word => words[2],
            _ => low_half(head) & size.mask(),
        };
        let mut target = address(words[1]);
        if dialect.increment_one_based() {
            target = address(target.wrapping_add(INCREMENT_ADDRESS_BIAS));
        }

        Ok(Self {
            size,
            decrement: op & 1 != 0,
            address: target,
            value,
        })
    }

    pub fn write(&self, out: &mut CodeBuffer, dialect: Dialect) {
        let one_based = dialect.increment_one_based();
        let op = ((self.size.bits() + one_based as u32) << 1) | self.decrement as u32;
        let target = if one_based {
            address(self.address.wrapping_sub(INCREMENT_ADDRESS_BIAS))
        } else {
            self.address
        };

        let mut head = (StdCommand::Increment.nibble() << 28) | (op << 20);
        if self.size != WriteSize::Word {
            head |= self.value & self.size.mask();
        }
        out.push_pair(head, target);
        if self.size == WriteSize::Word {
            out.push_pair(self.value, 0);
        }
    }
}

/// Decoded `C`, `D` or `E` test.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StdTest {
    pub compare_bits: u32,
    pub size_field: u32,
    pub address: u32,
    pub value: u32,
    /// Governed lines; `None` for test-all, which governs the rest of the code.
    pub lines: Option<u32>,
}

impl StdTest {
    pub const MAX_LINES: usize = 0xFF;

    pub fn all(pair: [u32; 2]) -> Self {
        Self {
            compare_bits: Compare::Equal.bits(),
            size_field: 0,
            address: address(pair[0]),
            value: pair[1],
            lines: None,
        }
    }

    /// `Daaaaaaa 0ts0vvvv`
    pub fn single(pair: [u32; 2]) -> Self {
        Self {
            compare_bits: (pair[1] >> 24) & 0xF,
            size_field: (pair[1] >> 20) & 0xF,
            address: address(pair[0]),
            value: low_half(pair[1]),
            lines: Some(1),
        }
    }

    /// `Esllvvvv taaaaaaa`
    pub fn multi(pair: [u32; 2]) -> Self {
        Self {
            compare_bits: pair[1] >> 28,
            size_field: (pair[0] >> 24) & 0xF,
            address: address(pair[1]),
            value: low_half(pair[0]),
            lines: Some((pair[0] >> 16) & 0xFF),
        }
    }

    pub fn compare(&self) -> Option<Compare> {
        Compare::from_bits(self.compare_bits)
    }

    /// Width the source device means. The size field only counts on
    /// devices that have byte tests.
    pub fn size(&self, dialect: Dialect) -> WriteSize {
        match self.lines {
            None => WriteSize::Word,
            Some(_) if self.size_field == 1 && dialect.supports_byte_tests() => WriteSize::Byte,
            Some(_) => WriteSize::Half,
        }
    }

    pub fn encode_single(&self) -> [u32; 2] {
        [
            make_command(StdCommand::TestSingle.nibble(), self.address),
            ((self.compare_bits & 0xF) << 24) | ((self.size_field & 0xF) << 20) | low_half(self.value),
        ]
    }

    pub fn encode_multi(&self, lines: u32) -> [u32; 2] {
        [
            (StdCommand::TestMulti.nibble() << 28)
                | ((self.size_field & 0xF) << 24)
                | ((lines & 0xFF) << 16)
                | low_half(self.value),
            ((self.compare_bits & 0xF) << 28) | address(self.address),
        ]
    }
}
