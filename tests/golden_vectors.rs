//! Streams pinned byte for byte to the Python reference compressor's output
//! for the same inputs.
use lzss_save::{adler32_zero, compress, compress_with_stats, decompress};

fn unhex(s: &str) -> Vec<u8> {
    hex::decode(s).expect("valid hex literal")
}

/// 64-bit LCG drawing symbols from `alphabet`.
fn lcg(seed: u64, len: usize, alphabet: &[u8]) -> Vec<u8> {
    let mut x = seed;
    (0..len)
        .map(|_| {
            x = x
                .wrapping_mul(6364136223846793005)
                .wrapping_add(1442695040888963407);
            alphabet[((x >> 33) % alphabet.len() as u64) as usize]
        })
        .collect()
}

#[test]
fn empty_input() {
    assert_eq!(compress(b""), vec![0x03, 0x20, 0x00]);
}

#[test]
fn zero_run_uses_extension_bytes() {
    let data = vec![0u8; 300];
    let packed = compress(&data);
    // literal, long match len 299 dist 1 (0x00 + 35 extension), terminator
    assert_eq!(packed, unhex("1e00010000232000"));
    assert_eq!(decompress(&packed), data);
}

#[test]
fn two_byte_period() {
    let data = b"AB".repeat(50);
    let packed = compress(&data);
    assert_eq!(packed, unhex("3c41420200592000"));
    assert_eq!(decompress(&packed), data);
}

#[test]
fn short_text() {
    assert_eq!(
        compress(b"hello hello hello world"),
        unhex("c068656c6c6f2006000360776f726c642000")
    );
    assert_eq!(compress(b"abcabcxyzabcxyz"), unhex("2861626302783c797a86002000"));
}

#[test]
fn sentence_with_repeats() {
    let data = b"The quick brown fox jumps over the lazy dog. The quick brown fox.";
    let expected = unhex(
        "005468652071756963006b2062726f776e2000666f78206a756d700073206f7665722074051e6c617a79c020646f672e200d010a062e2000",
    );
    assert_eq!(compress(data), expected);
}

/// Size, zero-seeded Adler-32 and token counts of the reference output.
struct Fingerprint {
    len: usize,
    adler: u32,
    scenario1: usize,
    literals: usize,
    short: usize,
    long: usize,
}

fn check(data: &[u8], want: Fingerprint) {
    let out = compress_with_stats(data);
    assert_eq!(out.data.len(), want.len);
    assert_eq!(adler32_zero(&out.data), want.adler);
    assert_eq!(out.stats.scenario1_rewrites, want.scenario1);
    assert_eq!(out.stats.literals, want.literals);
    assert_eq!(out.stats.short_matches, want.short);
    assert_eq!(out.stats.long_matches, want.long);
    assert_eq!(decompress(&out.data), data);
}

#[test]
fn binary_alphabet() {
    check(
        &lcg(1, 500, b"ab"),
        Fingerprint { len: 169, adler: 0x51cd399d, scenario1: 0, literals: 22, short: 12, long: 49 },
    );
}

#[test]
fn four_symbol_alphabet() {
    check(
        &lcg(2, 2000, b"abcd"),
        Fingerprint { len: 844, adler: 0xb5374be8, scenario1: 5, literals: 109, short: 189, long: 193 },
    );
}

#[test]
fn text_alphabet() {
    check(
        &lcg(3, 4000, b"the quick"),
        Fingerprint { len: 2587, adler: 0x49006f9b, scenario1: 89, literals: 502, short: 493, long: 569 },
    );
}

#[test]
fn full_byte_range() {
    let alphabet: Vec<u8> = (0..=255).collect();
    check(
        &lcg(4, 10_000, &alphabet),
        Fingerprint { len: 11220, adler: 0x93ce7c77, scenario1: 0, literals: 9913, short: 42, long: 1 },
    );
}

#[test]
fn zero_heavy_records() {
    check(
        &lcg(5, 20_000, &[0, 0, 0, 1, 2]),
        Fingerprint { len: 6372, adler: 0xfe998b65, scenario1: 2, literals: 866, short: 71, long: 1889 },
    );
}

#[test]
fn chains_deeper_than_search_limit() {
    let data = lcg(6, 30_000, b"ab");
    let out = compress_with_stats(&data);
    assert_eq!(out.data.len(), 7747);
    assert_eq!(adler32_zero(&out.data), 0xde4b5294);
    assert_eq!(decompress(&out.data), data);
}

#[test]
fn long_runs_between_records() {
    let mut record = vec![0u8; 3000];
    record.extend_from_slice(&[1; 5]);
    record.extend(lcg(7, 200, b"xy"));
    let data = record.repeat(3);
    let out = compress_with_stats(&data);
    assert_eq!(out.data.len(), 132);
    assert_eq!(adler32_zero(&out.data), 0x32f82565);
    assert_eq!(out.stats.scenario1_rewrites, 1);
    assert_eq!(decompress(&out.data), data);
}
