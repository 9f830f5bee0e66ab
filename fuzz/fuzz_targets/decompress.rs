use honggfuzz::fuzz;
use lzss_save::{decompress_with, Config};

fn main() {
    let config = Config::default().with_limit(1 << 24);
    let strict = Config::strict().with_limit(1 << 24);
    loop {
        fuzz!(|data: &[u8]| {
            let lenient = decompress_with(data, &config);
            if let Ok(out) = decompress_with(data, &strict) {
                assert_eq!(lenient, Ok(out));
            }
        });
    }
}
