// Thu Oct 15 2026 - Alex

use crate::code::Dialect;
use crate::config::TranslationContext;
use crate::translate::bits::{
    address, armax, armax_size, armax_subtype, armax_type, high_byte, high_half, low_byte,
    low_half, make_command, sign_extend, Compare, WriteSize, RESUME,
};
use crate::translate::buffer::CodeBuffer;
use crate::translate::error::{TranslateError, TranslateResult};
use crate::translate::fill::{explode, plain_write, smash};
use crate::translate::opcode::{Increment, StdCommand, StdTest};
use crate::translate::pointer::{unpack_inline, PointerWrite};
use crate::translate::reader::WordReader;
use crate::translate::OpcodeTranslator;

/// An `equal, skip one` test whose placeholder a following hook at the
/// same address may claim.
#[derive(Debug, Clone, Copy)]
struct HookFold {
    address: u32,
    slot: usize,
    value: u32,
}

/// ARMAX source to a standard-family device.
pub struct FromArmax {
    destination: Dialect,
    /// Offered to the next opcode only.
    pending_fold: Option<HookFold>,
    /// Placeholder slot a hook has already filled in.
    folded: Option<usize>,
}

impl FromArmax {
    pub fn new(ctx: &TranslationContext) -> Self {
        Self {
            destination: ctx.destination,
            pending_fold: None,
            folded: None,
        }
    }

    fn translate_block(&mut self, reader: &mut WordReader, out: &mut CodeBuffer, end: usize) -> TranslateResult<()> {
        while reader.position() < end && !reader.is_empty() {
            if reader.at_resume() {
                reader.skip(2)?;
                break;
            }
            self.translate_opcode(reader, out)?;
        }
        Ok(())
    }

    /// Four-word fills and multi-writes, and the resume marker.
    fn translate_special(reader: &mut WordReader, out: &mut CodeBuffer) -> TranslateResult<()> {
        let [_, command] = reader.take_pair()?;
        if command == RESUME[1] {
            return Ok(());
        }

        match high_byte(command) {
            armax::SPECIAL_MULTI_FIRST..=armax::SPECIAL_MULTI_LAST => {
                let [value, packed] = reader.take_pair()?;
                let count = (packed >> 16) & 0xFF;
                out.push_pair(
                    make_command(StdCommand::MultiWrite.nibble(), address(command)),
                    (count << 16) | low_half(packed),
                );
                out.push_pair(value, sign_extend(packed >> 24, 8));
                Ok(())
            }
            armax::SPECIAL_FILL_FIRST..=armax::SPECIAL_FILL_LAST => {
                let [value, packed] = reader.take_pair()?;
                let size = WriteSize::from_bits(armax_size(command)).ok_or(TranslateError::InvalidCode)?;
                explode(
                    out,
                    size,
                    address(command),
                    value,
                    (packed >> 16) & 0xFF,
                    sign_extend(low_half(packed), 16),
                    sign_extend(packed >> 24, 8),
                );
                Ok(())
            }
            _ => Err(TranslateError::MultiWriteSizeUnsupported),
        }
    }

    /// Byte and half direct writes carry a repeat count above the value.
    fn translate_direct(reader: &mut WordReader, out: &mut CodeBuffer) -> TranslateResult<()> {
        let [head, raw] = reader.take_pair()?;
        let size = WriteSize::from_bits(armax_size(head)).ok_or(TranslateError::InvalidCode)?;
        let (value, repeat) = match size {
            WriteSize::Byte => (low_byte(raw), raw >> 8),
            WriteSize::Half => (low_half(raw), high_half(raw)),
            WriteSize::Word => (raw, 0),
        };

        if repeat > 0 {
            smash(out, size, address(head), value, repeat + 1);
        } else {
            plain_write(out, size, address(head), value);
        }
        Ok(())
    }

    fn translate_pointer(&self, reader: &mut WordReader, out: &mut CodeBuffer) -> TranslateResult<()> {
        let [head, packed] = reader.take_pair()?;
        let size = WriteSize::from_bits(armax_size(head)).ok_or(TranslateError::PointerSizeUnsupported)?;
        let (value, offset) = unpack_inline(size, packed);
        PointerWrite {
            address: address(head),
            value,
            size,
            offsets: vec![offset],
        }
        .write(out, self.destination)
    }

    /// ARMAX increments are signed adds; negative ones become decrements.
    fn translate_increment(&self, reader: &mut WordReader, out: &mut CodeBuffer) -> TranslateResult<()> {
        let [head, raw] = reader.take_pair()?;
        let size = WriteSize::from_bits(armax_size(head)).ok_or(TranslateError::InvalidCode)?;
        let value = raw & size.mask();
        let decrement = value & size.sign_bit() != 0;

        Increment {
            size,
            decrement,
            address: address(head),
            value: if decrement { value.wrapping_neg() & size.mask() } else { value },
        }
        .write(out, self.destination);
        Ok(())
    }

    fn translate_hook(&mut self, reader: &mut WordReader, out: &mut CodeBuffer, fold: Option<HookFold>) -> TranslateResult<()> {
        let [head, param] = reader.take_pair()?;
        let addr = address(head);

        match fold {
            Some(fold) if fold.address == addr && fold.slot + 2 == out.len() => {
                out.patch_pair(
                    fold.slot,
                    make_command(StdCommand::ConditionalHook.nibble(), addr),
                    fold.value,
                );
                self.folded = Some(fold.slot);
            }
            _ => out.push_pair(make_command(StdCommand::Hook.nibble(), addr.wrapping_add(3)), param),
        }
        Ok(())
    }

    fn check_test(&self, compare: Compare, size: Option<WriteSize>) -> TranslateResult<WriteSize> {
        if compare == Compare::And && !self.destination.supports_and_test() {
            return Err(TranslateError::TestTypeUnsupported);
        }
        if compare.is_ordered() && !self.destination.supports_ordered_tests() {
            return Err(TranslateError::TestCompareUnsupported);
        }
        match size {
            Some(WriteSize::Byte) if !self.destination.supports_byte_tests() => {
                Err(TranslateError::TestSizeUnsupported)
            }
            Some(size) => Ok(size),
            None => Err(TranslateError::TestSizeUnsupported),
        }
    }

    fn translate_test(&mut self, reader: &mut WordReader, out: &mut CodeBuffer) -> TranslateResult<()> {
        let [head, value] = reader.take_pair()?;
        let addr = address(head);
        let skip = armax_subtype(head);
        if skip == armax::SKIP_DISABLE {
            return Err(TranslateError::TestAllUnsupported);
        }

        let compare = Compare::from_armax(armax_type(head)).ok_or(TranslateError::InvalidCode)?;
        let size = self.check_test(compare, WriteSize::from_bits(armax_size(head)))?;
        let end = match skip {
            armax::SKIP_ONE => reader.position() + 2,
            armax::SKIP_TWO => reader.position() + 4,
            _ => reader.len(),
        };

        if size == WriteSize::Word {
            return self.translate_word_test(reader, out, compare, skip, addr, value, end);
        }

        let value = value & size.mask();
        let slot = out.reserve_pair();
        if compare == Compare::Equal && skip == armax::SKIP_ONE {
            self.pending_fold = Some(HookFold { address: addr, slot, value });
        }
        let body = self.translate_block(reader, out, end);
        self.pending_fold = None;
        body?;

        if self.folded == Some(slot) {
            self.folded = None;
            return Ok(());
        }

        let lines = out.lines_since(slot + 2);
        if lines > StdTest::MAX_LINES {
            return Err(TranslateError::InvalidCode);
        }
        let test = StdTest {
            compare_bits: compare.bits(),
            size_field: (size == WriteSize::Byte) as u32,
            address: addr,
            value,
            lines: Some(lines as u32),
        };
        let [first, second] = if lines == 1 && self.destination.supports_single_test() {
            test.encode_single()
        } else {
            test.encode_multi(lines as u32)
        };
        out.patch_pair(slot, first, second);
        Ok(())
    }

    /// Standard tests are half width, so a word test becomes the low half
    /// governing the high half governing the body.
    #[allow(clippy::too_many_arguments)]
    fn translate_word_test(
        &mut self,
        reader: &mut WordReader,
        out: &mut CodeBuffer,
        compare: Compare,
        skip: u32,
        addr: u32,
        value: u32,
        end: usize,
    ) -> TranslateResult<()> {
        if compare == Compare::Equal && skip == armax::SKIP_ONE && hook_follows(reader, addr) {
            reader.skip(2)?;
            out.push_pair(make_command(StdCommand::ConditionalHook.nibble(), addr), value);
            return Ok(());
        }

        let outer = out.reserve_pair();
        let inner = out.reserve_pair();
        self.translate_block(reader, out, end)?;

        let lines = out.lines_since(inner + 2);
        if lines + 1 > StdTest::MAX_LINES {
            return Err(TranslateError::InvalidCode);
        }
        let half = |address: u32, value: u32, lines: usize| StdTest {
            compare_bits: compare.bits(),
            size_field: 0,
            address,
            value,
            lines: Some(lines as u32),
        };
        let [first, second] = half(addr, low_half(value), lines + 1).encode_multi(lines as u32 + 1);
        out.patch_pair(outer, first, second);
        let [first, second] = half(addr.wrapping_add(2), high_half(value), lines).encode_multi(lines as u32);
        out.patch_pair(inner, first, second);
        Ok(())
    }
}

fn hook_follows(reader: &WordReader, addr: u32) -> bool {
    match reader.peek(0) {
        Some(word) => {
            word != 0
                && armax_type(word) == armax::WRITE
                && armax_subtype(word) == armax::HOOK
                && address(word) == addr
        }
        None => false,
    }
}

impl OpcodeTranslator for FromArmax {
    fn translate_opcode(&mut self, reader: &mut WordReader, out: &mut CodeBuffer) -> TranslateResult<()> {
        let fold = self.pending_fold.take();
        let head = reader.head()?;
        log::trace!("{:08X} (ARMAX -> {})", head, self.destination);

        if head == 0 {
            return Self::translate_special(reader, out);
        }
        if armax_type(head) != armax::WRITE {
            return self.translate_test(reader, out);
        }

        match armax_subtype(head) {
            armax::DIRECT => Self::translate_direct(reader, out),
            armax::POINTER => self.translate_pointer(reader, out),
            armax::INCREMENT => self.translate_increment(reader, out),
            _ => self.translate_hook(reader, out, fold),
        }
    }
}
