//! 8-bit vector commands

use super::ValidationError;

/// Number of characters in a bit-vector command
pub const BIT_COUNT: usize = 8;

/// An unsigned 8-bit value parsed from a `'0'`/`'1'` string, MSB first
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct BitVector(u8);

impl BitVector {
    /// Parse exactly eight binary digits
    pub fn parse(raw: &str) -> Result<Self, ValidationError> {
        let bytes = raw.as_bytes();
        if bytes.len() != BIT_COUNT {
            return Err(ValidationError::InvalidBitString);
        }

        let mut value = 0u8;
        for &b in bytes {
            let bit = match b {
                b'0' => 0,
                b'1' => 1,
                _ => return Err(ValidationError::InvalidBitString),
            };
            value = (value << 1) | bit;
        }

        Ok(Self(value))
    }

    /// Decoded integer value (0-255)
    pub fn value(&self) -> u8 {
        self.0
    }
}

impl From<u8> for BitVector {
    fn from(value: u8) -> Self {
        Self(value)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn test_parse_known_values() {
        assert_eq!(BitVector::parse("10110111").unwrap().value(), 183);
        assert_eq!(BitVector::parse("00000000").unwrap().value(), 0);
        assert_eq!(BitVector::parse("11111111").unwrap().value(), 255);
        assert_eq!(BitVector::parse("00000001").unwrap().value(), 1);
        assert_eq!(BitVector::parse("10000000").unwrap().value(), 128);
    }

    #[test]
    fn test_parse_rejects_malformed() {
        for raw in [
            "",
            "0",
            "1011011",
            "101101110",
            "1011011x",
            "2222222 2",
            " 10110111",
            "10110111\n",
            "0b101101",
            "１0110111",
            "1;rm -rf",
            "$(reboo)",
        ] {
            assert_eq!(
                BitVector::parse(raw),
                Err(ValidationError::InvalidBitString),
                "accepted {:?}",
                raw
            );
        }
    }

    proptest! {
        #[test]
        fn prop_binary_strings_decode_big_endian(raw in "[01]{8}") {
            let parsed = BitVector::parse(&raw).unwrap();
            prop_assert_eq!(parsed.value(), u8::from_str_radix(&raw, 2).unwrap());
        }

        #[test]
        fn prop_non_matching_strings_rejected(raw in "\\PC*") {
            let is_valid = raw.len() == 8 && raw.bytes().all(|b| b == b'0' || b == b'1');
            prop_assume!(!is_valid);
            prop_assert_eq!(BitVector::parse(&raw), Err(ValidationError::InvalidBitString));
        }

        #[test]
        fn prop_wrong_length_binary_rejected(raw in "[01]{0,7}|[01]{9,16}") {
            prop_assert_eq!(BitVector::parse(&raw), Err(ValidationError::InvalidBitString));
        }
    }
}
