//! Flag-bit streams interleaved with raw bytes.
//!
//! Control bits are packed LSB-first into flag bytes that live inline in the
//! output. The writer reserves a flag byte the moment the first bit of a new
//! group is written and backfills it once eight bits have accumulated, so raw
//! bytes written in between land after their flag byte. The reader mirrors
//! this by loading a new flag byte only when its bit register runs dry.

use crate::LzssError;

/// Bit writer producing the interleaved flag/byte layout.
#[derive(Debug, Default)]
pub struct BitWriter {
    out: Vec<u8>,
    pending: u32,
    bit_count: u32,
    flag_index: usize,
}

impl BitWriter {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            out: Vec::with_capacity(capacity),
            ..Self::default()
        }
    }

    pub fn write_bit(&mut self, bit: bool) {
        if self.bit_count == 0 {
            self.open_flag_byte();
        }
        self.pending |= (bit as u32) << self.bit_count;
        self.bit_count += 1;
        if self.bit_count > 7 {
            self.out[self.flag_index] = (self.pending & 0xFF) as u8;
            self.pending >>= 8;
            self.bit_count -= 8;
            if self.bit_count > 0 {
                self.open_flag_byte();
            }
        }
    }

    /// Write the low `n` bits of `value`, least significant first.
    pub fn write_bits(&mut self, value: u32, n: u32) {
        for i in 0..n {
            self.write_bit((value >> i) & 1 != 0);
        }
    }

    pub fn write_byte(&mut self, byte: u8) {
        self.out.push(byte);
    }

    /// Backfill the open flag byte with the bits still pending and return the
    /// stream.
    pub fn finish(mut self) -> Vec<u8> {
        if self.bit_count > 0 {
            let mask = (1u32 << self.bit_count) - 1;
            self.out[self.flag_index] = (mask & self.pending) as u8;
        }
        self.out
    }

    fn open_flag_byte(&mut self) {
        self.flag_index = self.out.len();
        self.out.push(0);
    }
}

/// Reader for streams produced by [`BitWriter`].
#[derive(Debug, Clone)]
pub struct BitReader<'a> {
    data: &'a [u8],
    pos: usize,
    flags: u32,
    flag_bits: u32,
}

impl<'a> BitReader<'a> {
    pub fn from_slice(data: &'a [u8]) -> Self {
        Self {
            data,
            pos: 0,
            flags: 0,
            flag_bits: 0,
        }
    }

    pub fn read_bit(&mut self) -> Result<bool, LzssError> {
        if self.flag_bits == 0 {
            self.flags = self.read_byte()? as u32;
            self.flag_bits = 8;
        }
        let bit = self.flags & 1 != 0;
        self.flags >>= 1;
        self.flag_bits -= 1;
        Ok(bit)
    }

    /// Read `n` bits, least significant first.
    pub fn read_bits(&mut self, n: u32) -> Result<u32, LzssError> {
        let mut value = 0;
        for i in 0..n {
            value |= (self.read_bit()? as u32) << i;
        }
        Ok(value)
    }

    pub fn read_byte(&mut self) -> Result<u8, LzssError> {
        let byte = *self
            .data
            .get(self.pos)
            .ok_or(LzssError::UnexpectedEnd { offset: self.pos })?;
        self.pos += 1;
        Ok(byte)
    }

    /// Byte offset of the next unread input byte.
    pub fn position(&self) -> usize {
        self.pos
    }

    /// True once every input byte has been consumed, flag bytes included.
    pub fn is_exhausted(&self) -> bool {
        self.pos >= self.data.len()
    }
}
