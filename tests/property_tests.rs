//! Property-based tests for the LZW codec
//!
//! Random inputs are biased toward small alphabets so that long matches and
//! dictionary resets come up often.

use proptest::prelude::*;
use slzw::lzw::{compress_slice,expand_slice,STD_OPTIONS};

proptest! {
    #[test]
    fn arbitrary_bytes_round_trip(data in prop::collection::vec(any::<u8>(), 0..2000)) {
        let compressed = compress_slice(&data,&STD_OPTIONS).unwrap();
        let expanded = expand_slice(&compressed,&STD_OPTIONS).unwrap();
        prop_assert_eq!(&data[..], &expanded[..]);
    }
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(24))]
    #[test]
    fn small_alphabet_round_trip(data in prop::collection::vec(0..3u8, 5000..30000)) {
        let compressed = compress_slice(&data,&STD_OPTIONS).unwrap();
        let expanded = expand_slice(&compressed,&STD_OPTIONS).unwrap();
        prop_assert_eq!(&data[..], &expanded[..]);
    }
}

proptest! {
    #[test]
    fn repeated_pattern_round_trip(
        pattern in prop::collection::vec(any::<u8>(), 1..8),
        repeat_count in 2..400usize
    ) {
        let data = pattern.repeat(repeat_count);
        let compressed = compress_slice(&data,&STD_OPTIONS).unwrap();
        let expanded = expand_slice(&compressed,&STD_OPTIONS).unwrap();
        prop_assert_eq!(&data[..], &expanded[..]);
    }
}

proptest! {
    #[test]
    fn expansion_never_panics(data in prop::collection::vec(any::<u8>(), 0..4000)) {
        // garbage may be rejected, but only by returning an error
        let _ = expand_slice(&data,&STD_OPTIONS);
    }
}

proptest! {
    #[test]
    fn compression_is_deterministic(data in prop::collection::vec(any::<u8>(), 0..3000)) {
        let c1 = compress_slice(&data,&STD_OPTIONS).unwrap();
        let c2 = compress_slice(&data,&STD_OPTIONS).unwrap();
        prop_assert_eq!(c1, c2);
    }
}
