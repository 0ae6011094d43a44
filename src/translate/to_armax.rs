// Thu Oct 15 2026 - Alex

use crate::code::Dialect;
use crate::config::TranslationContext;
use crate::translate::bits::{
    address, armax, high_half, low_half, make_armax, WriteSize, ARMAX_CLASS_FLAG, RESUME,
};
use crate::translate::buffer::CodeBuffer;
use crate::translate::error::{TranslateError, TranslateResult};
use crate::translate::opcode::{Increment, StdCommand, StdTest};
use crate::translate::pointer::{pack_inline, PointerWrite};
use crate::translate::reader::WordReader;
use crate::translate::OpcodeTranslator;

/// Hook sites that ask the device to pick its own; they get the auto-hook
/// enable value instead of a fixed site.
const AUTO_HOOK_SITES: [u32; 1] = [0x0000_0000];
const AUTO_HOOK_ENABLE: u32 = 0x0000_0001;

/// Entry stubs whose real target is carried in the parameter word.
const ENTRY_STUB_SITES: [u32; 2] = [0x0010_0008, 0x0010_0010];

/// Hook sites are word aligned inside the 25-bit address space.
const HOOK_SITE_MASK: u32 = 0x01FF_FFFC;

/// Signed 8-bit increment field of the ARMAX multi-write.
const MAX_MULTI_INCREMENT: i32 = i8::MAX as i32;
const MIN_MULTI_INCREMENT: i32 = i8::MIN as i32;
const MAX_MULTI_COUNT: u32 = 0xFF;

/// Standard-family source to ARMAX.
pub struct ToArmax {
    source: Dialect,
}

impl ToArmax {
    pub fn new(ctx: &TranslationContext) -> Self {
        Self { source: ctx.source }
    }

    /// Translates opcodes until `end`, end of input, or a resume pair,
    /// which is consumed.
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

    fn translate_write(reader: &mut WordReader, out: &mut CodeBuffer, size: WriteSize) -> TranslateResult<()> {
        let [head, value] = reader.take_pair()?;
        let command = make_armax(armax::WRITE, armax::DIRECT, size.bits(), address(head));
        // A zero head is the ARMAX special prefix, so a byte write to 0 has no encoding.
        if command == 0 {
            return Err(TranslateError::InvalidCode);
        }
        out.push_pair(command, value & size.mask());
        Ok(())
    }

    fn translate_increment(&self, reader: &mut WordReader, out: &mut CodeBuffer) -> TranslateResult<()> {
        let increment = Increment::read(reader, self.source)?;
        let mask = increment.size.mask();
        let value = if increment.decrement {
            increment.value.wrapping_neg() & mask
        } else {
            increment.value & mask
        };
        out.push_pair(
            make_armax(armax::WRITE, armax::INCREMENT, increment.size.bits(), increment.address),
            value,
        );
        Ok(())
    }

    /// `4aaaaaaa nnnnssss vvvvvvvv iiiiiiii` becomes the four-word special
    /// `00000000 84aaaaaa vvvvvvvv iinnssss`.
    fn translate_multi_write(reader: &mut WordReader, out: &mut CodeBuffer) -> TranslateResult<()> {
        let words = reader.take(4)?;
        let count = high_half(words[1]);
        let stride = low_half(words[1]);
        let increment = words[3] as i32;

        if !(MIN_MULTI_INCREMENT..=MAX_MULTI_INCREMENT).contains(&increment) {
            return Err(TranslateError::ValueIncrementTooLarge);
        }
        if count > MAX_MULTI_COUNT {
            return Err(TranslateError::MultiWriteSizeUnsupported);
        }

        let command = ARMAX_CLASS_FLAG | (WriteSize::Word.bits() << 25) | address(words[0]);
        out.push_pair(0, command);
        out.push_pair(words[2], ((words[3] & 0xFF) << 24) | (count << 16) | stride);
        Ok(())
    }

    fn translate_pointer(&self, reader: &mut WordReader, out: &mut CodeBuffer) -> TranslateResult<()> {
        let pointer = PointerWrite::read(reader, self.source)?;
        if pointer.offsets.len() > 1 {
            return Err(TranslateError::ExcessOffsets);
        }
        let packed = pack_inline(pointer.size, pointer.value, pointer.offset())?;
        out.push_pair(
            make_armax(armax::WRITE, armax::POINTER, pointer.size.bits(), pointer.address),
            packed,
        );
        Ok(())
    }

    fn push_hook(out: &mut CodeBuffer, site: u32, expected: u32, enable: u32) {
        out.push_pair(
            make_armax(armax::EQUAL, armax::SKIP_ONE, WriteSize::Word.bits(), site),
            expected,
        );
        out.push_pair(make_armax(armax::WRITE, armax::HOOK, WriteSize::Word.bits(), site), enable);
    }

    fn translate_hook(reader: &mut WordReader, out: &mut CodeBuffer) -> TranslateResult<()> {
        let [head, param] = reader.take_pair()?;
        let (site, enable) = hook_target(address(head), param);
        Self::push_hook(out, site, param, enable);
        Ok(())
    }

    fn translate_conditional_hook(&mut self, reader: &mut WordReader, out: &mut CodeBuffer) -> TranslateResult<()> {
        let pair = reader.take_pair()?;
        if !self.source.supports_conditional_hook() {
            return self.translate_test(reader, out, StdTest::all(pair));
        }
        Self::push_hook(out, address(pair[0]), pair[1], 0);
        Ok(())
    }

    /// Reserves the test pair, translates the governed body, then patches
    /// the skip mode from the number of lines the body actually produced.
    fn translate_test(&mut self, reader: &mut WordReader, out: &mut CodeBuffer, test: StdTest) -> TranslateResult<()> {
        let compare = test.compare().ok_or(TranslateError::InvalidCode)?;
        let size = test.size(self.source);
        let end = match test.lines {
            Some(lines) => reader.position() + lines as usize * 2,
            None => reader.len(),
        };

        let slot = out.reserve_pair();
        self.translate_block(reader, out, end)?;

        let skip = match out.lines_since(slot + 2) {
            1 => armax::SKIP_ONE,
            2 => armax::SKIP_TWO,
            _ => armax::SKIP_BLOCK,
        };
        out.patch_pair(
            slot,
            make_armax(compare.to_armax(), skip, size.bits(), test.address),
            test.value & size.mask(),
        );
        if skip == armax::SKIP_BLOCK {
            out.push_pair(RESUME[0], RESUME[1]);
        }
        Ok(())
    }
}

/// Resolves where an unconditional hook really lands and what enable value
/// the device expects there.
fn hook_target(addr: u32, param: u32) -> (u32, u32) {
    let site = addr & HOOK_SITE_MASK;
    if AUTO_HOOK_SITES.contains(&site) {
        (site, AUTO_HOOK_ENABLE)
    } else if ENTRY_STUB_SITES.contains(&site) {
        (param & HOOK_SITE_MASK, 0)
    } else {
        (site, 0)
    }
}

impl OpcodeTranslator for ToArmax {
    fn translate_opcode(&mut self, reader: &mut WordReader, out: &mut CodeBuffer) -> TranslateResult<()> {
        if reader.at_resume() {
            return reader.skip(2);
        }

        let head = reader.head()?;
        let command = StdCommand::from_word(head);
        log::trace!("{:08X} {:?} ({} -> ARMAX)", head, command, self.source);

        match command {
            StdCommand::WriteByte => Self::translate_write(reader, out, WriteSize::Byte),
            StdCommand::WriteHalf => Self::translate_write(reader, out, WriteSize::Half),
            StdCommand::WriteWord | StdCommand::MasterWrite => {
                Self::translate_write(reader, out, WriteSize::Word)
            }
            StdCommand::Increment => self.translate_increment(reader, out),
            StdCommand::MultiWrite => Self::translate_multi_write(reader, out),
            StdCommand::CopyBytes => {
                reader.skip(4)?;
                Err(TranslateError::CopyBytesUnsupported)
            }
            StdCommand::Pointer => self.translate_pointer(reader, out),
            StdCommand::Bitwise => {
                reader.skip(2)?;
                Err(TranslateError::BitwiseUnsupported)
            }
            StdCommand::Timer => {
                reader.skip(2)?;
                Err(TranslateError::TimerUnsupported)
            }
            // ARMAX reads 0x8 heads as live increments and skips
            StdCommand::Unassigned => reader.skip(2),
            StdCommand::ConditionalHook => self.translate_conditional_hook(reader, out),
            StdCommand::Hook => Self::translate_hook(reader, out),
            StdCommand::TestAll => {
                let pair = reader.take_pair()?;
                self.translate_test(reader, out, StdTest::all(pair))
            }
            StdCommand::TestSingle => {
                let pair = reader.take_pair()?;
                self.translate_test(reader, out, StdTest::single(pair))
            }
            StdCommand::TestMulti => {
                let pair = reader.take_pair()?;
                self.translate_test(reader, out, StdTest::multi(pair))
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn run(source: Dialect, words: &[u32]) -> TranslateResult<Vec<u32>> {
        let ctx = TranslationContext::new(source, Dialect::ArMax);
        let mut translator = ToArmax::new(&ctx);
        let mut reader = WordReader::new(words);
        let mut out = CodeBuffer::new();
        while !reader.is_empty() {
            translator.translate_opcode(&mut reader, &mut out)?;
        }
        Ok(out.into_words())
    }

    #[test]
    fn test_direct_writes() {
        assert_eq!(
            run(Dialect::Standard, &[0x20AB_CDEF, 0x42]).unwrap(),
            vec![0x04AB_CDEF, 0x42]
        );
        assert_eq!(
            run(Dialect::Standard, &[0x0010_0000, 0x1234]).unwrap(),
            vec![0x0010_0000, 0x34]
        );
        assert_eq!(
            run(Dialect::Standard, &[0x1010_0000, 0x1234_5678]).unwrap(),
            vec![0x0210_0000, 0x5678]
        );
    }

    #[test]
    fn test_byte_write_to_zero_rejected() {
        assert_eq!(run(Dialect::Standard, &[0, 0x12]), Err(TranslateError::InvalidCode));
        assert_eq!(run(Dialect::Standard, &[0x1000_0000, 0x12]).unwrap(), vec![0x0200_0000, 0x12]);
    }

    #[test]
    fn test_unassigned_dropped() {
        assert!(run(Dialect::Standard, &[0x8810_0000, 0x1234]).unwrap().is_empty());
        assert_eq!(
            run(Dialect::Standard, &[0x8810_0000, 0x1234, 0x2010_0000, 0x42]).unwrap(),
            vec![0x0410_0000, 0x42]
        );
    }

    #[test]
    fn test_decrement_negates() {
        // 16-bit decrement by 1
        let out = run(Dialect::CodeBreaker, &[0x3030_0001, 0x0010_0000]).unwrap();
        assert_eq!(out, vec![0x8210_0000, 0xFFFF]);
    }

    #[test]
    fn test_one_based_increment() {
        // GameShark 3 half increment, address biased by 0x10000
        let out = run(Dialect::GameShark3, &[0x3040_0005, 0x0011_0000]).unwrap();
        assert_eq!(out, vec![0x8212_0000, 5]);

        let out = run(Dialect::Xploder, &[0x3060_0000, 0x0011_0000, 0x1234_5678, 0]).unwrap();
        assert_eq!(out, vec![0x8412_0000, 0x1234_5678]);
    }

    #[test]
    fn test_multi_write_special() {
        let out = run(Dialect::Standard, &[0x4010_0000, 0x0004_0001, 0x10, 0x02]).unwrap();
        assert_eq!(out, vec![0, 0x8410_0000, 0x10, 0x0204_0001]);

        assert_eq!(
            run(Dialect::Standard, &[0x4010_0000, 0x0004_0001, 0x10, 200]),
            Err(TranslateError::ValueIncrementTooLarge)
        );
        assert_eq!(
            run(Dialect::Standard, &[0x4010_0000, 0x0100_0001, 0x10, 0]),
            Err(TranslateError::MultiWriteSizeUnsupported)
        );
    }

    #[test]
    fn test_pointer_inline() {
        let out = run(Dialect::CodeBreaker, &[0x6010_0000, 0x63, 0x0001_0001, 0x10]).unwrap();
        assert_eq!(out, vec![0x4210_0000, 0x0010_0063]);

        assert_eq!(
            run(Dialect::CodeBreaker, &[0x6010_0000, 0x63, 0x0002_0001, 0x10]),
            Err(TranslateError::OffsetTooLarge32)
        );
    }

    #[test]
    fn test_pointer_excess_offsets_consumed() {
        let words = [0x6010_0000, 0x63, 0x0002_0002, 0x10, 0x20, 0];
        let ctx = TranslationContext::new(Dialect::CodeBreaker, Dialect::ArMax);
        let mut translator = ToArmax::new(&ctx);
        let mut reader = WordReader::new(&words);
        let mut out = CodeBuffer::new();

        let result = translator.translate_opcode(&mut reader, &mut out);
        assert_eq!(result, Err(TranslateError::ExcessOffsets));
        assert!(reader.is_empty());
        assert!(out.is_empty());
    }

    #[test]
    fn test_refused_opcodes() {
        assert_eq!(
            run(Dialect::Standard, &[0x5010_0000, 4, 0x0020_0000, 0]),
            Err(TranslateError::CopyBytesUnsupported)
        );
        assert_eq!(
            run(Dialect::CodeBreaker, &[0x7010_0000, 0]),
            Err(TranslateError::BitwiseUnsupported)
        );
        assert_eq!(
            run(Dialect::Standard, &[0xB000_0000, 0x10]),
            Err(TranslateError::TimerUnsupported)
        );
    }

    #[test]
    fn test_single_test_skips_one() {
        let out = run(Dialect::Standard, &[0xD010_0000, 0x0000_1234, 0x2010_0004, 5]).unwrap();
        assert_eq!(out, vec![0x0A10_0000, 0x1234, 0x0410_0004, 5]);
    }

    #[test]
    fn test_multi_test_block_gets_resume() {
        let words = [
            0xE003_1234, 0x0010_0000,
            0x2010_0004, 1,
            0x2010_0008, 2,
            0x2010_000C, 3,
        ];
        let out = run(Dialect::Standard, &words).unwrap();
        assert_eq!(
            out,
            vec![
                0x8A10_0000, 0x1234,
                0x0410_0004, 1,
                0x0410_0008, 2,
                0x0410_000C, 3,
                RESUME[0], RESUME[1],
            ]
        );
    }

    #[test]
    fn test_skip_follows_emitted_lines() {
        // A one-line multi-write body becomes two ARMAX lines.
        let words = [0xD010_0000, 0x0000_0001, 0x4010_0000, 0x0004_0001, 0x10, 0];
        let out = run(Dialect::Standard, &words).unwrap();
        assert_eq!(out[0], 0x4A10_0000);
        assert_eq!(out.len(), 6);
    }

    #[test]
    fn test_hooks() {
        let out = run(Dialect::Standard, &[0xF010_0003, 0x0C04_0000]).unwrap();
        assert_eq!(out, vec![0x0C10_0000, 0x0C04_0000, 0xC410_0000, 0]);

        let out = run(Dialect::Standard, &[0xF010_000B, 0x0020_1003]).unwrap();
        assert_eq!(out, vec![0x0C20_1000, 0x0020_1003, 0xC420_1000, 0]);

        let out = run(Dialect::Standard, &[0xF000_0003, 0x1234]).unwrap();
        assert_eq!(out[3], AUTO_HOOK_ENABLE);

        let out = run(Dialect::Standard, &[0x9010_0000, 0x0C04_0000]).unwrap();
        assert_eq!(out, vec![0x0C10_0000, 0x0C04_0000, 0xC410_0000, 0]);
    }

    #[test]
    fn test_master_test_from_action_replay1() {
        let out = run(Dialect::ActionReplay1, &[0x9010_0000, 0xDEAD_BEEF, 0x2010_0004, 1]).unwrap();
        assert_eq!(out, vec![0x0C10_0000, 0xDEAD_BEEF, 0x0410_0004, 1]);
    }
}
