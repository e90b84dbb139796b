use crate::{DecodeError, EncodeError};

/// Largest value representable in `bits` bits.
pub const fn max_for_bits(bits: usize) -> u64 {
    if bits >= 64 {
        u64::MAX
    } else {
        (1u64 << bits) - 1
    }
}

/// Big-endian unsigned integer of up to 8 bytes.
pub fn be_unsigned(bytes: &[u8]) -> Result<u64, DecodeError> {
    if bytes.is_empty() || bytes.len() > 8 {
        return Err(DecodeError::InvalidWidth {
            expected: 8,
            actual: bytes.len(),
        });
    }
    Ok(bytes.iter().fold(0u64, |acc, &b| (acc << 8) | b as u64))
}

/// `value` as `width` big-endian bytes, zero-padded on the left.
pub fn be_bytes(value: u64, width: usize) -> Result<Vec<u8>, EncodeError> {
    if width == 0 || width > 8 {
        return Err(EncodeError::InvalidWidth {
            expected: 8,
            actual: width,
        });
    }
    if value > max_for_bits(width * 8) {
        return Err(EncodeError::Overflow {
            value: value.to_string(),
            width,
        });
    }
    Ok(value.to_be_bytes()[8 - width..].to_vec())
}

/// Unsigned integer of bits `[bit_index, bit_index + bit_size)`, counting from the
/// most significant bit of `bytes[0]`.
pub fn extract_bits(bytes: &[u8], bit_index: usize, bit_size: usize) -> Result<u64, DecodeError> {
    if bit_size == 0 || bit_size > 64 {
        return Err(DecodeError::Malformed("bit range must be 1 to 64 bits wide"));
    }
    if bit_index + bit_size > bytes.len() * 8 {
        return Err(DecodeError::InvalidWidth {
            expected: (bit_index + bit_size).div_ceil(8),
            actual: bytes.len(),
        });
    }

    let mut value = 0u64;
    for i in bit_index..bit_index + bit_size {
        let bit = (bytes[i / 8] >> (7 - i % 8)) & 1;
        value = (value << 1) | bit as u64;
    }
    Ok(value)
}

/// Writes `value` into bits `[bit_index, bit_index + bit_size)`, leaving the
/// other bits of `bytes` untouched.
pub fn insert_bits(
    bytes: &mut [u8],
    bit_index: usize,
    bit_size: usize,
    value: u64,
) -> Result<(), EncodeError> {
    if bit_size == 0 || bit_size > 64 || bit_index + bit_size > bytes.len() * 8 {
        return Err(EncodeError::InvalidWidth {
            expected: (bit_index + bit_size).div_ceil(8),
            actual: bytes.len(),
        });
    }
    if value > max_for_bits(bit_size) {
        return Err(EncodeError::Overflow {
            value: value.to_string(),
            width: bytes.len(),
        });
    }

    for (k, i) in (bit_index..bit_index + bit_size).enumerate() {
        let bit = (value >> (bit_size - 1 - k)) & 1;
        let mask = 0x80u8 >> (i % 8);
        if bit == 1 {
            bytes[i / 8] |= mask;
        } else {
            bytes[i / 8] &= !mask;
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn be_unsigned_reads_big_endian() {
        assert_eq!(be_unsigned(&[0x02, 0x52]).unwrap(), 594);
        assert_eq!(be_unsigned(&[0xFF; 8]).unwrap(), u64::MAX);
        assert!(be_unsigned(&[0; 9]).is_err());
        assert!(be_unsigned(&[]).is_err());
    }

    #[test]
    fn be_bytes_rejects_overflow() {
        assert_eq!(be_bytes(594, 2).unwrap(), vec![0x02, 0x52]);
        assert_eq!(be_bytes(7, 3).unwrap(), vec![0, 0, 7]);
        assert_eq!(
            be_bytes(256, 1).unwrap_err(),
            EncodeError::Overflow {
                value: "256".into(),
                width: 1
            }
        );
    }

    #[test]
    fn extracts_nibbles_msb_first() {
        assert_eq!(extract_bits(&[0x03], 0, 4).unwrap(), 0);
        assert_eq!(extract_bits(&[0x03], 4, 4).unwrap(), 3);
        assert_eq!(extract_bits(&[0x20], 0, 4).unwrap(), 2);
        assert_eq!(extract_bits(&[0b1010_0101], 0, 1).unwrap(), 1);
    }

    #[test]
    fn extracts_across_byte_boundary() {
        // bits 6..=9 of 0000_0011 1000_0000
        assert_eq!(extract_bits(&[0x03, 0x80], 6, 4).unwrap(), 0b1110);
        assert!(extract_bits(&[0x03], 6, 4).is_err());
    }

    #[test]
    fn insert_preserves_neighbours() {
        let mut bytes = [0xFF, 0xFF];
        insert_bits(&mut bytes, 6, 4, 0).unwrap();
        assert_eq!(bytes, [0xFC, 0x3F]);
        assert!(insert_bits(&mut bytes, 0, 4, 16).is_err());
    }

    proptest! {
        #[test]
        fn insert_then_extract(
            value in any::<u64>(),
            start in 0usize..16,
            size in 1usize..=16,
        ) {
            let value = value & max_for_bits(size);
            let mut bytes = [0u8; 4];
            insert_bits(&mut bytes, start, size, value).unwrap();
            prop_assert_eq!(extract_bits(&bytes, start, size).unwrap(), value);
        }
    }
}
