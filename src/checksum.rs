//! Checksums the save container computes over compressed blocks.
//!
//! Both are corruption checks only. The Adler-32 variant starts from zero
//! sums instead of `s1 = 1`; the CRC-32 variant uses a non-standard initial
//! register.

const MOD_ADLER: u32 = 65521;
/// Bytes that can be summed before `s2` may overflow a `u32`.
const ADLER_NMAX: usize = 5552;

const CRC_POLY: u32 = 0x04C1_1DB7;
const CRC_INIT: u32 = 0xBAE2_3CD0;
const CRC_XOROUT: u32 = 0xFFFF_FFFF;

/// Adler-32 seeded with `s1 = 0, s2 = 0`.
pub fn adler32_zero(data: &[u8]) -> u32 {
    let mut s1 = 0u32;
    let mut s2 = 0u32;
    for chunk in data.chunks(ADLER_NMAX) {
        for &b in chunk {
            s1 += b as u32;
            s2 += s1;
        }
        s1 %= MOD_ADLER;
        s2 %= MOD_ADLER;
    }
    (s2 << 16) | s1
}

/// CRC-32 with reflected input and output, polynomial `0x04C11DB7` and
/// initial register `0xBAE23CD0`.
pub fn crc32_ps3(data: &[u8]) -> u32 {
    let mut crc = CRC_INIT;
    for &b in data {
        crc ^= (b.reverse_bits() as u32) << 24;
        for _ in 0..8 {
            crc = if crc & 0x8000_0000 != 0 {
                (crc << 1) ^ CRC_POLY
            } else {
                crc << 1
            };
        }
    }
    crc.reverse_bits() ^ CRC_XOROUT
}
