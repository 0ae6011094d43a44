// Thu Oct 15 2026 - Alex

use crate::code::Dialect;
use crate::config::TranslationContext;
use crate::translate::bits::{address, make_command, Compare};
use crate::translate::buffer::CodeBuffer;
use crate::translate::error::{TranslateError, TranslateResult};
use crate::translate::opcode::{Increment, StdCommand, StdTest};
use crate::translate::pointer::PointerWrite;
use crate::translate::reader::WordReader;
use crate::translate::OpcodeTranslator;

/// Translates between two devices that both use the standard layout.
/// Most opcodes pass through untouched; the rest are re-encoded or refused
/// according to what each side supports.
pub struct QuirkTranslator {
    source: Dialect,
    destination: Dialect,
}

impl QuirkTranslator {
    pub fn new(ctx: &TranslationContext) -> Self {
        Self {
            source: ctx.source,
            destination: ctx.destination,
        }
    }

    fn copy(reader: &mut WordReader, out: &mut CodeBuffer, count: usize) -> TranslateResult<()> {
        let words = reader.take(count)?;
        out.extend_from_slice(words);
        Ok(())
    }

    fn translate_increment(&self, reader: &mut WordReader, out: &mut CodeBuffer) -> TranslateResult<()> {
        let start = reader.position();
        let increment = Increment::read(reader, self.source)?;

        if self.source.increment_one_based() == self.destination.increment_one_based() {
            out.extend_from_slice(reader.consumed_since(start));
        } else {
            increment.write(out, self.destination);
        }
        Ok(())
    }

    /// Multi-write and copy-bytes share a trailing increment word.
    fn translate_incrementing(&self, reader: &mut WordReader, out: &mut CodeBuffer) -> TranslateResult<()> {
        let words = reader.take(4)?;
        if words[3] != 0 && !self.destination.supports_value_increment() {
            return Err(TranslateError::ValueIncrementUnsupported);
        }
        out.extend_from_slice(words);
        Ok(())
    }

    fn translate_pointer(&self, reader: &mut WordReader, out: &mut CodeBuffer) -> TranslateResult<()> {
        let layout = self.source.pointer_layout();
        let verbatim = layout == self.destination.pointer_layout()
            && self.source.pointer_zero_size_is_half() == self.destination.pointer_zero_size_is_half();

        if verbatim {
            let width = PointerWrite::width_at(reader, layout);
            return Self::copy(reader, out, width);
        }

        let pointer = PointerWrite::read(reader, self.source)?;
        pointer.write(out, self.destination)
    }

    fn translate_bitwise(&self, reader: &mut WordReader, out: &mut CodeBuffer) -> TranslateResult<()> {
        let words = reader.take(2)?;
        if !(self.source.supports_bitwise() && self.destination.supports_bitwise()) {
            return Err(TranslateError::BitwiseUnsupported);
        }
        out.extend_from_slice(words);
        Ok(())
    }

    /// `9` is a conditional hook everywhere except Action Replay 1, where it
    /// is a master-level test over the rest of the code.
    fn translate_master_test(&self, reader: &mut WordReader, out: &mut CodeBuffer) -> TranslateResult<()> {
        let [head, value] = reader.take_pair()?;

        if master_test_verbatim(self.destination) {
            out.push_pair(head, value);
            return Ok(());
        }

        if !self.source.supports_conditional_hook() {
            out.push_pair(make_command(StdCommand::TestAll.nibble(), address(head)), value);
            return Ok(());
        }

        if !self.destination.supports_conditional_hook() {
            // A parameter with a clear top nibble is data, not an opcode,
            // and fits the plain hook form.
            if value >> 28 == 0 {
                out.push_pair(make_command(StdCommand::Hook.nibble(), address(head)), value);
                return Ok(());
            }
            return Err(TranslateError::TestAllUnsupported);
        }

        out.push_pair(head, value);
        Ok(())
    }

    fn check_test(&self, test: &StdTest) -> TranslateResult<()> {
        if test.size_field != 0
            && self.source.supports_byte_tests()
            && !self.destination.supports_byte_tests()
        {
            return Err(TranslateError::TestSizeUnsupported);
        }

        match test.compare() {
            Some(Compare::And) if !self.destination.supports_and_test() => {
                Err(TranslateError::TestTypeUnsupported)
            }
            Some(compare) if compare.is_ordered() && !self.destination.supports_ordered_tests() => {
                Err(TranslateError::TestCompareUnsupported)
            }
            _ => Ok(()),
        }
    }

    fn translate_test(&self, reader: &mut WordReader, out: &mut CodeBuffer, multi: bool) -> TranslateResult<()> {
        let pair = reader.take_pair()?;
        let mut test = if multi { StdTest::multi(pair) } else { StdTest::single(pair) };
        self.check_test(&test)?;

        // The size field is noise on devices without byte tests.
        if !self.source.supports_byte_tests() {
            test.size_field = 0;
        }

        let [first, second] = match test.lines {
            Some(lines) if multi => test.encode_multi(lines),
            _ if self.destination.supports_single_test() => test.encode_single(),
            _ => test.encode_multi(1),
        };
        out.push_pair(first, second);
        Ok(())
    }
}

/// Xploder takes `9` verbatim from any source.
// TODO: both sides of this check name Xploder; confirm against GameShark 3
// hardware whether it was meant to be included.
#[allow(clippy::eq_op)]
fn master_test_verbatim(destination: Dialect) -> bool {
    destination == Dialect::Xploder || destination == Dialect::Xploder
}

impl OpcodeTranslator for QuirkTranslator {
    fn translate_opcode(&mut self, reader: &mut WordReader, out: &mut CodeBuffer) -> TranslateResult<()> {
        let head = reader.head()?;
        let command = StdCommand::from_word(head);
        log::trace!("{:08X} {:?} ({} -> {})", head, command, self.source, self.destination);

        match command {
            StdCommand::WriteByte
            | StdCommand::WriteHalf
            | StdCommand::WriteWord
            | StdCommand::MasterWrite
            | StdCommand::Timer
            | StdCommand::TestAll
            | StdCommand::Hook
            | StdCommand::Unassigned => Self::copy(reader, out, 2),
            StdCommand::Increment => self.translate_increment(reader, out),
            StdCommand::MultiWrite | StdCommand::CopyBytes => self.translate_incrementing(reader, out),
            StdCommand::Pointer => self.translate_pointer(reader, out),
            StdCommand::Bitwise => self.translate_bitwise(reader, out),
            StdCommand::ConditionalHook => self.translate_master_test(reader, out),
            StdCommand::TestSingle => self.translate_test(reader, out, false),
            StdCommand::TestMulti => self.translate_test(reader, out, true),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn run(source: Dialect, destination: Dialect, words: &[u32]) -> TranslateResult<Vec<u32>> {
        let ctx = TranslationContext::new(source, destination);
        let mut translator = QuirkTranslator::new(&ctx);
        let mut reader = WordReader::new(words);
        let mut out = CodeBuffer::new();
        while !reader.is_empty() {
            translator.translate_opcode(&mut reader, &mut out)?;
        }
        Ok(out.into_words())
    }

    #[test]
    fn test_plain_writes_pass_through() {
        let words = [0x0010_0000, 0x12, 0x1010_0002, 0x3456, 0x2010_0004, 0x789A_BCDE];
        assert_eq!(run(Dialect::CodeBreaker, Dialect::GameShark3, &words).unwrap(), words);
    }

    #[test]
    fn test_increment_rebias() {
        // CodeBreaker 16-bit increment -> Xploder width +1, address -0x10000
        let words = [0x3020_0005, 0x0012_0000];
        assert_eq!(
            run(Dialect::CodeBreaker, Dialect::Xploder, &words).unwrap(),
            vec![0x3040_0005, 0x0011_0000]
        );
        assert_eq!(
            run(Dialect::Xploder, Dialect::CodeBreaker, &[0x3040_0005, 0x0011_0000]).unwrap(),
            words.to_vec()
        );
        // Both one-based: untouched.
        assert_eq!(
            run(Dialect::Xploder, Dialect::GameShark3, &[0x3040_0005, 0x0011_0000]).unwrap(),
            vec![0x3040_0005, 0x0011_0000]
        );
    }

    #[test]
    fn test_value_increment_refused() {
        let words = [0x4010_0000, 0x0004_0001, 0x10, 0x01];
        assert_eq!(
            run(Dialect::CodeBreaker, Dialect::ActionReplay2, &words),
            Err(TranslateError::ValueIncrementUnsupported)
        );
        let plain = [0x4010_0000, 0x0004_0001, 0x10, 0x00];
        assert_eq!(run(Dialect::CodeBreaker, Dialect::ActionReplay2, &plain).unwrap(), plain);
    }

    #[test]
    fn test_pointer_layouts() {
        let chained = [0x6010_0000, 0x63, 0x0002_0001, 0x0000_0010];
        assert_eq!(
            run(Dialect::CodeBreaker, Dialect::ActionReplay1, &chained).unwrap(),
            vec![0x6010_0000, 0x63, 0x2000_0001, 0x10]
        );
        assert_eq!(
            run(Dialect::CodeBreaker, Dialect::ActionReplay2, &chained),
            Err(TranslateError::OffsetTooLarge32)
        );
        let two_levels = [0x6010_0000, 0x63, 0x0002_0002, 0x10, 0x20, 0];
        assert_eq!(
            run(Dialect::Standard, Dialect::GameShark3, &two_levels),
            Err(TranslateError::ExcessOffsets)
        );
    }

    #[test]
    fn test_bitwise_needs_both_sides() {
        let words = [0x7010_0000, 0x0010_00FF];
        assert_eq!(run(Dialect::Standard, Dialect::CodeBreaker, &words).unwrap(), words);
        assert_eq!(
            run(Dialect::CodeBreaker, Dialect::Xploder, &words),
            Err(TranslateError::BitwiseUnsupported)
        );
    }

    #[test]
    fn test_master_test_branches() {
        let hook = [0x9010_0000, 0x1C04_0000];
        // Action Replay 1 source: master-level test becomes test-all.
        assert_eq!(
            run(Dialect::ActionReplay1, Dialect::CodeBreaker, &hook).unwrap(),
            vec![0xC010_0000, 0x1C04_0000]
        );
        // Xploder destination always takes it verbatim.
        assert_eq!(run(Dialect::ActionReplay1, Dialect::Xploder, &hook).unwrap(), hook);
        // Action Replay 1 destination: only data parameters survive.
        assert_eq!(
            run(Dialect::CodeBreaker, Dialect::ActionReplay1, &hook),
            Err(TranslateError::TestAllUnsupported)
        );
        assert_eq!(
            run(Dialect::CodeBreaker, Dialect::ActionReplay1, &[0x9010_0000, 0x0000_1234]).unwrap(),
            vec![0xF010_0000, 0x0000_1234]
        );
        assert_eq!(run(Dialect::CodeBreaker, Dialect::GameShark3, &hook).unwrap(), hook);
    }

    #[test]
    fn test_test_capabilities() {
        let byte_test = [0xD010_0000, 0x0010_00FF];
        assert_eq!(
            run(Dialect::CodeBreaker, Dialect::Standard, &byte_test),
            Err(TranslateError::TestSizeUnsupported)
        );
        let and_test = [0xD010_0000, 0x0400_0001];
        assert_eq!(
            run(Dialect::CodeBreaker, Dialect::GameShark3, &and_test),
            Err(TranslateError::TestTypeUnsupported)
        );
        let greater = [0xE002_0010, 0x3010_0000];
        assert_eq!(
            run(Dialect::CodeBreaker, Dialect::ActionReplay1, &greater),
            Err(TranslateError::TestCompareUnsupported)
        );
    }

    #[test]
    fn test_single_test_widens_on_devices_without_it() {
        let words = [0xD010_0000, 0x0100_1234];
        assert_eq!(
            run(Dialect::CodeBreaker, Dialect::ActionReplay2, &words).unwrap(),
            vec![0xE001_1234, 0x1010_0000]
        );
    }

    #[test]
    fn test_unassigned_passes_through() {
        let words = [0x8123_4567, 0x89AB_CDEF];
        assert_eq!(run(Dialect::Standard, Dialect::GameShark3, &words).unwrap(), words);
    }
}
