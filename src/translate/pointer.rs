// Thu Oct 15 2026 - Alex

use crate::code::{Dialect, PointerLayout};
use crate::translate::bits::{address, make_command, WriteSize};
use crate::translate::buffer::CodeBuffer;
use crate::translate::error::{TranslateError, TranslateResult};
use crate::translate::opcode::StdCommand;
use crate::translate::reader::WordReader;

/// Pointer write independent of any device layout.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PointerWrite {
    /// Where the base pointer is stored
    pub address: u32,
    pub value: u32,
    pub size: WriteSize,
    /// One offset per indirection level
    pub offsets: Vec<u32>,
}

/// Words taken by a chained or single-offset pointer with `count` offsets.
/// Always even, never under four.
pub fn pointer_width(count: u32) -> usize {
    let words = 3 + count.max(1) as usize;
    words + (words & 1)
}

/// Splits an inline `ooooooVV` / `ooooVVVV` / `VVVVVVVV` word.
pub fn unpack_inline(size: WriteSize, packed: u32) -> (u32, u32) {
    match size {
        WriteSize::Byte => (packed & 0xFF, packed >> 8),
        WriteSize::Half => (packed & 0xFFFF, packed >> 16),
        WriteSize::Word => (packed, 0),
    }
}

/// Packs value and offset into one word, rejecting offsets that don't fit
/// above the value.
pub fn pack_inline(size: WriteSize, value: u32, offset: u32) -> TranslateResult<u32> {
    match size {
        WriteSize::Word if offset != 0 => Err(TranslateError::OffsetTooLarge32),
        WriteSize::Word => Ok(value),
        WriteSize::Half if offset > 0xFFFF => Err(TranslateError::OffsetTooLarge16),
        WriteSize::Half => Ok((offset << 16) | (value & 0xFFFF)),
        WriteSize::Byte if offset > 0x00FF_FFFF => Err(TranslateError::OffsetTooLarge8),
        WriteSize::Byte => Ok((offset << 8) | (value & 0xFF)),
    }
}

impl PointerWrite {
    pub fn offset(&self) -> u32 {
        self.offsets.first().copied().unwrap_or(0)
    }

    /// Width of the pointer opcode at the cursor, without consuming it.
    pub fn width_at(reader: &WordReader, layout: PointerLayout) -> usize {
        match (layout, reader.peek(2)) {
            (PointerLayout::Inline, _) | (_, None) => 4,
            (_, Some(header)) => pointer_width(header & 0xFFFF),
        }
    }

    /// Consumes the whole opcode, extra offset words included, before any
    /// size check can fail.
    pub fn read(reader: &mut WordReader, dialect: Dialect) -> TranslateResult<Self> {
        let layout = dialect.pointer_layout();
        let width = Self::width_at(reader, layout);
        let words = reader.take(width)?;
        let base = address(words[0]);

        match layout {
            PointerLayout::Chained => {
                let count = (words[2] & 0xFFFF) as usize;
                let size = WriteSize::from_bits((words[2] >> 16) & 0xF)
                    .ok_or(TranslateError::PointerSizeUnsupported)?;
                Ok(Self {
                    address: base,
                    value: words[1] & size.mask(),
                    size,
                    offsets: words[3..3 + count].to_vec(),
                })
            }
            PointerLayout::SingleOffset => {
                let count = ((words[2] & 0xFFFF) as usize).max(1);
                let code = words[2] >> 28;
                let size = if code == 0 && dialect.pointer_zero_size_is_half() {
                    WriteSize::Half
                } else {
                    WriteSize::from_bits(code).ok_or(TranslateError::PointerSizeUnsupported)?
                };
                Ok(Self {
                    address: base,
                    value: words[1] & size.mask(),
                    size,
                    offsets: words[3..3 + count].to_vec(),
                })
            }
            PointerLayout::Inline => {
                let size = match words[2] & 0xF {
                    code @ 1..=3 => WriteSize::from_bits(code - 1),
                    _ => None,
                }
                .ok_or(TranslateError::PointerSizeUnsupported)?;
                let (value, offset) = unpack_inline(size, words[1]);
                Ok(Self {
                    address: base,
                    value,
                    size,
                    offsets: vec![offset],
                })
            }
        }
    }

    /// Emits nothing unless the destination can hold the whole pointer.
    pub fn write(&self, out: &mut CodeBuffer, dialect: Dialect) -> TranslateResult<()> {
        let head = make_command(StdCommand::Pointer.nibble(), self.address);
        let value = self.value & self.size.mask();

        match dialect.pointer_layout() {
            PointerLayout::Chained => {
                let count = self.offsets.len() as u32;
                out.push_pair(head, value);
                out.push((self.size.bits() << 16) | (count & 0xFFFF));
                for offset in &self.offsets {
                    out.push(*offset);
                }
                for _ in 3 + self.offsets.len()..pointer_width(count) {
                    out.push(0);
                }
            }
            PointerLayout::SingleOffset => {
                if self.offsets.len() > 1 {
                    return Err(TranslateError::ExcessOffsets);
                }
                if self.size == WriteSize::Byte && dialect.pointer_zero_size_is_half() {
                    return Err(TranslateError::PointerSizeUnsupported);
                }
                out.push_pair(head, value);
                out.push_pair((self.size.bits() << 28) | 1, self.offset());
            }
            PointerLayout::Inline => {
                if self.offsets.len() > 1 {
                    return Err(TranslateError::ExcessOffsets);
                }
                let packed = pack_inline(self.size, value, self.offset())?;
                out.push_pair(head, packed);
                out.push_pair(self.size.bits() + 1, 0);
            }
        }
        Ok(())
    }
}
