use proptest::prelude::*;

use huffpack::bits::{pack_bits, unpack};
use huffpack::{Container, compress, decompress};

/// Non-empty byte strings over a small alphabet, so codes get reused a lot.
fn text_strategy() -> impl Strategy<Value = Vec<u8>> {
    prop::collection::vec(prop::sample::select(b"abcdefgh |\n".to_vec()), 1..400)
}

proptest! {
    #[test]
    fn prop_round_trip(data in text_strategy()) {
        let packed = compress(&data).unwrap().to_bytes().unwrap();
        prop_assert_eq!(decompress(&packed).unwrap(), data);
    }

    #[test]
    fn prop_round_trip_arbitrary_bytes(data in prop::collection::vec(0u8..255, 1..300)) {
        let packed = compress(&data).unwrap().to_bytes().unwrap();
        prop_assert_eq!(decompress(&packed).unwrap(), data);
    }

    #[test]
    fn prop_deterministic(data in text_strategy()) {
        let first = compress(&data).unwrap().to_bytes().unwrap();
        let second = compress(&data).unwrap().to_bytes().unwrap();
        prop_assert_eq!(first, second);
    }

    #[test]
    fn prop_prefix_free(data in text_strategy()) {
        let container = compress(&data).unwrap();
        let codes: Vec<_> = container.table.iter().map(|(_, c)| c.clone()).collect();
        for (i, a) in codes.iter().enumerate() {
            for (j, b) in codes.iter().enumerate() {
                if i != j {
                    prop_assert!(!b.starts_with(a), "{} is a prefix of {}", a, b);
                }
            }
        }
    }

    #[test]
    fn prop_padding_bound(data in text_strategy()) {
        let container = compress(&data).unwrap();
        let payload = &container.payload;
        prop_assert!(payload.padding <= 7);
        prop_assert_eq!((payload.bit_len() + payload.padding as usize) % 8, 0);

        let reparsed = Container::parse(&container.to_bytes().unwrap()).unwrap();
        prop_assert_eq!(reparsed.payload.padding, payload.padding);
    }

    #[test]
    fn prop_single_symbol(symbol in any::<u8>(), count in 1usize..100) {
        let data = vec![symbol; count];
        let container = compress(&data).unwrap();
        prop_assert_eq!(container.table.len(), 1);
        prop_assert_eq!(container.table.get(symbol).map(|c| c.len()), Some(1));
        prop_assert_eq!(container.decode_payload().unwrap(), data);
    }

    #[test]
    fn prop_pack_unpack_bits(bits in prop::collection::vec(any::<bool>(), 0..100)) {
        let packed = pack_bits(&bits).unwrap();
        prop_assert!(packed.padding <= 7);
        prop_assert_eq!(unpack(&packed.bytes, packed.padding).unwrap(), bits);
    }
}
