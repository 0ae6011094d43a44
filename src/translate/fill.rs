// Thu Oct 15 2026 - Alex

//! Fill expansion into standard write opcodes.
//!
//! `smash` covers a contiguous run with as few opcodes as alignment allows.
//! `explode` is the general strided form and falls back to `smash` when the
//! stride is one element and the value never changes.

use crate::translate::bits::{make_command, WriteSize};
use crate::translate::buffer::CodeBuffer;
use crate::translate::opcode::StdCommand;

/// Count field of the standard multi-write is 16 bits wide.
const MAX_MULTI_COUNT: u32 = 0xFFFF;

/// The bytes a fill lays down, repeating every `size.bytes()` from `start`.
#[derive(Debug, Clone, Copy)]
struct FillPattern {
    size: WriteSize,
    start: u32,
    value: u32,
}

impl FillPattern {
    fn byte_at(&self, addr: u32) -> u32 {
        let lane = addr.wrapping_sub(self.start) % self.size.bytes();
        (self.value >> (lane * 8)) & 0xFF
    }

    /// Little-endian value of `width` at `addr`.
    fn value_at(&self, addr: u32, width: WriteSize) -> u32 {
        (0..width.bytes()).fold(0, |acc, i| acc | (self.byte_at(addr.wrapping_add(i)) << (i * 8)))
    }
}

pub fn plain_write(out: &mut CodeBuffer, size: WriteSize, addr: u32, value: u32) {
    out.push_pair(
        make_command(StdCommand::write_for(size).nibble(), addr),
        value & size.mask(),
    );
}

/// Writes `value` `count` times back to back from `addr`.
pub fn smash(out: &mut CodeBuffer, size: WriteSize, addr: u32, value: u32, count: u32) {
    if count == 1 {
        plain_write(out, size, addr, value);
        return;
    }

    let pattern = FillPattern {
        size,
        start: addr,
        value: value & size.mask(),
    };
    let mut cursor = addr;
    let mut remaining = u64::from(count) << size.bits();

    while remaining > 0 {
        let width = if cursor % 4 == 0 && remaining >= 12 {
            let groups = ((remaining / 4) as u32).min(MAX_MULTI_COUNT);
            out.push_pair(
                make_command(StdCommand::MultiWrite.nibble(), cursor),
                (groups << 16) | 1,
            );
            out.push_pair(pattern.value_at(cursor, WriteSize::Word), 0);
            cursor = cursor.wrapping_add(groups * 4);
            remaining -= u64::from(groups) * 4;
            continue;
        } else if cursor % 4 == 0 && remaining >= 4 {
            WriteSize::Word
        } else if cursor % 2 == 0 && remaining >= 2 {
            WriteSize::Half
        } else {
            WriteSize::Byte
        };

        plain_write(out, width, cursor, pattern.value_at(cursor, width));
        cursor = cursor.wrapping_add(width.bytes());
        remaining -= u64::from(width.bytes());
    }
}

/// One write per repetition, stepping the address by `stride` elements and
/// the value by `increment`. Both steps wrap, so negative steps arrive
/// sign-extended.
pub fn explode(
    out: &mut CodeBuffer,
    size: WriteSize,
    addr: u32,
    value: u32,
    count: u32,
    stride: u32,
    increment: u32,
) {
    if stride == 1 && increment == 0 {
        smash(out, size, addr, value, count);
        return;
    }
    if count == 1 {
        plain_write(out, size, addr, value);
        return;
    }

    let step = stride.wrapping_mul(size.bytes());
    for i in 0..count {
        plain_write(
            out,
            size,
            addr.wrapping_add(step.wrapping_mul(i)),
            value.wrapping_add(increment.wrapping_mul(i)),
        );
    }
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;
    use crate::translate::bits::{address, command};
    use std::collections::BTreeMap;

    /// Replays standard writes and multi-writes into byte memory.
    pub(crate) fn replay(words: &[u32]) -> BTreeMap<u32, u8> {
        let mut memory = BTreeMap::new();
        let mut store = |addr: u32, value: u32, bytes: u32| {
            for i in 0..bytes {
                memory.insert(addr + i, (value >> (i * 8)) as u8);
            }
        };

        let mut i = 0;
        while i < words.len() {
            let addr = address(words[i]);
            match command(words[i]) {
                0 => store(addr, words[i + 1], 1),
                1 => store(addr, words[i + 1], 2),
                2 => store(addr, words[i + 1], 4),
                4 => {
                    let count = words[i + 1] >> 16;
                    let skip = words[i + 1] & 0xFFFF;
                    for n in 0..count {
                        store(addr + n * skip * 4, words[i + 2].wrapping_add(words[i + 3] * n), 4);
                    }
                    i += 2;
                }
                other => panic!("unexpected command {:X}", other),
            }
            i += 2;
        }
        memory
    }

    fn expected(size: WriteSize, addr: u32, value: u32, count: u32) -> BTreeMap<u32, u8> {
        let mut memory = BTreeMap::new();
        for n in 0..count {
            for b in 0..size.bytes() {
                memory.insert(addr + n * size.bytes() + b, (value >> (b * 8)) as u8);
            }
        }
        memory
    }

    #[test]
    fn test_single_count_is_plain_write() {
        let mut out = CodeBuffer::new();
        smash(&mut out, WriteSize::Half, 0x0010_0001, 0xBEEF, 1);
        assert_eq!(out.as_slice(), &[0x1010_0001, 0xBEEF]);
    }

    #[test]
    fn test_aligned_word_fill_uses_multi_write() {
        let mut out = CodeBuffer::new();
        smash(&mut out, WriteSize::Word, 0x0010_0000, 0x1234_5678, 5);
        assert_eq!(out.as_slice(), &[0x4010_0000, 0x0005_0001, 0x1234_5678, 0]);
    }

    #[test]
    fn test_smash_covers_exact_range() {
        let cases = [
            (WriteSize::Byte, 0x0010_0001, 0xAB, 17),
            (WriteSize::Byte, 0x0010_0003, 0x5A, 2),
            (WriteSize::Half, 0x0010_0002, 0xBEEF, 9),
            (WriteSize::Half, 0x0010_0001, 0x1234, 4),
            (WriteSize::Word, 0x0010_0004, 0xDEAD_BEEF, 3),
            (WriteSize::Word, 0x0010_0002, 0xCAFE_F00D, 6),
            (WriteSize::Byte, 0x0020_0000, 0x01, 11),
        ];

        for (size, addr, value, count) in cases {
            let mut out = CodeBuffer::new();
            smash(&mut out, size, addr, value, count);
            assert_eq!(
                replay(out.as_slice()),
                expected(size, addr, value, count),
                "{:?} fill at {:08X} x{}",
                size,
                addr,
                count
            );
        }
    }

    #[test]
    fn test_explode_unit_stride_matches_smash() {
        for (size, addr, count) in [(WriteSize::Byte, 0x0010_0001, 30), (WriteSize::Half, 0x0010_0000, 7)] {
            let mut smashed = CodeBuffer::new();
            let mut exploded = CodeBuffer::new();
            smash(&mut smashed, size, addr, 0x77, count);
            explode(&mut exploded, size, addr, 0x77, count, 1, 0);
            assert_eq!(smashed, exploded);
        }
    }

    #[test]
    fn test_explode_strided() {
        let mut out = CodeBuffer::new();
        explode(&mut out, WriteSize::Half, 0x0010_0000, 0x0010, 3, 2, 5);
        assert_eq!(
            out.as_slice(),
            &[0x1010_0000, 0x0010, 0x1010_0004, 0x0015, 0x1010_0008, 0x001A]
        );
    }

    #[test]
    fn test_explode_negative_steps() {
        let mut out = CodeBuffer::new();
        explode(&mut out, WriteSize::Byte, 0x0010_0010, 0x05, 2, 0xFFFF_FFFF, 0xFFFF_FFFF);
        assert_eq!(out.as_slice(), &[0x0010_0010, 0x05, 0x0010_000F, 0x04]);
    }
}
