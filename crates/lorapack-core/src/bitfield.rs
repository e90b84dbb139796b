//! Status byte codec.
//!
//! Bit position 0 is the most significant bit of the byte, in both directions:
//! flag `p` is set when `byte & (0x80 >> p) != 0`.

use rand::Rng;
use rand::RngCore;

use crate::schema::BitfieldDescriptor;
use crate::value::StatusFlags;
use crate::EncodeError;

const fn mask(position: u8) -> u8 {
    0x80 >> position
}

pub fn decode_status(descriptor: &BitfieldDescriptor, byte: u8) -> StatusFlags {
    descriptor
        .flags
        .iter()
        .map(|flag| (flag.name.clone(), byte & mask(flag.position) != 0))
        .collect()
}

/// Packs `flags` into one byte. Flags absent from `flags` encode as cleared.
pub fn encode_status(descriptor: &BitfieldDescriptor, flags: &StatusFlags) -> Result<u8, EncodeError> {
    let mut byte = 0u8;
    for (name, set) in flags.iter() {
        let flag = descriptor
            .get(name)
            .ok_or_else(|| EncodeError::UnknownFlag(name.to_string()))?;
        if set {
            byte |= mask(flag.position);
        }
    }
    Ok(byte)
}

pub fn random_status(descriptor: &BitfieldDescriptor, rng: &mut dyn RngCore) -> StatusFlags {
    descriptor
        .flags
        .iter()
        .map(|flag| (flag.name.clone(), rng.gen_bool(0.5)))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    fn ordered() -> BitfieldDescriptor {
        (0..8u8).fold(BitfieldDescriptor::new("ordered"), |d, p| {
            d.flag(p, &format!("f{p}"))
        })
    }

    #[test]
    fn decodes_msb_first() {
        let flags = decode_status(&ordered(), 0xA5);
        let bits: Vec<bool> = flags.iter().map(|(_, set)| set).collect();
        assert_eq!(bits, [true, false, true, false, false, true, false, true]);
    }

    #[test]
    fn encodes_msb_first() {
        let descriptor = BitfieldDescriptor::new("alarm").flag(0, "high").flag(7, "low");
        let flags = StatusFlags::new().with("high", true).with("low", false);
        assert_eq!(encode_status(&descriptor, &flags).unwrap(), 0x80);
        assert_eq!(encode_status(&descriptor, &StatusFlags::new()).unwrap(), 0);
    }

    #[test]
    fn rejects_undeclared_flags() {
        let descriptor = BitfieldDescriptor::new("alarm").flag(0, "high");
        let flags = StatusFlags::new().with("typo", true);
        assert_eq!(
            encode_status(&descriptor, &flags).unwrap_err(),
            EncodeError::UnknownFlag("typo".into())
        );
    }

    #[test]
    fn random_status_covers_every_flag() {
        let mut rng = StdRng::seed_from_u64(7);
        let flags = random_status(&ordered(), &mut rng);
        assert_eq!(flags.len(), 8);
    }

    proptest! {
        #[test]
        fn byte_round_trip(byte in any::<u8>()) {
            let descriptor = ordered();
            let flags = decode_status(&descriptor, byte);
            prop_assert_eq!(encode_status(&descriptor, &flags).unwrap(), byte);
        }
    }
}
