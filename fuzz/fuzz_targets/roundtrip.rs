use honggfuzz::fuzz;
use lzss_save::{compress, decompress_with, Config};

fn main() {
    loop {
        fuzz!(|data: &[u8]| {
            let packed = compress(data);
            assert_eq!(decompress_with(&packed, &Config::strict()).as_deref(), Ok(data));
        });
    }
}
