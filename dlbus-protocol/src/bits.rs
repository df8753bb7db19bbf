//! MSB-first bit-to-byte packing shared by both decoders.

use heapless::Vec;

use crate::profile::MAX_FRAME_BYTES;

/// Accumulates decoded bits MSB-first into bytes.
///
/// Bits that do not fill a whole byte are discarded on `finish`, which
/// keeps the decoded length deterministic: `floor(bits / 8)` bytes.
pub(crate) struct BitPacker {
    bytes: Vec<u8, MAX_FRAME_BYTES>,
    acc: u8,
    filled: u8,
}

impl BitPacker {
    pub(crate) fn new() -> Self {
        Self {
            bytes: Vec::new(),
            acc: 0,
            filled: 0,
        }
    }

    /// Push one bit. Returns `false` once the byte budget is exhausted;
    /// callers stop decoding at that point.
    pub(crate) fn push(&mut self, bit: bool) -> bool {
        self.acc = (self.acc << 1) | bit as u8;
        self.filled += 1;
        if self.filled == 8 {
            self.filled = 0;
            let byte = self.acc;
            self.acc = 0;
            if self.bytes.push(byte).is_err() {
                return false;
            }
        }
        true
    }

    pub(crate) fn finish(self) -> Vec<u8, MAX_FRAME_BYTES> {
        self.bytes
    }
}
