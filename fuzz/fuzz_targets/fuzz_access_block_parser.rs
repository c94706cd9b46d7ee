//! Fuzz target for public access block parsing.
//!
//! Run with:
//! ```bash
//! cargo +nightly fuzz run fuzz_access_block_parser
//! ```

#![no_main]

use libfuzzer_sys::fuzz_target;

fuzz_target!(|data: &[u8]| {
    if let Ok(text) = std::str::from_utf8(data)
        && let Ok(pab) = bucketguard_source::parse_access_block(text)
    {
        let _ = pab.fully_blocked();
    }
});
