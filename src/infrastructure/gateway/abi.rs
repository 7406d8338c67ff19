//! Minimal ABI codec for the fixed set of read calls the gateway issues.
//!
//! Covers exactly what those calls need: keccak-derived selectors, 32-byte
//! word arguments, and decoding for strings (dynamic and bytes32-packed,
//! the latter for older ERC20 symbol/name variants) and uint256 words.

use bigdecimal::BigDecimal;
use num_bigint::{BigInt, BigUint, Sign};
use sha3::{Digest, Keccak256};

use crate::domain::gateway::GatewayError;

const WORD_SIZE: usize = 32;

/// 4-byte function selector for a canonical signature
pub fn selector(signature: &str) -> [u8; 4] {
    let digest = Keccak256::digest(signature.as_bytes());
    [digest[0], digest[1], digest[2], digest[3]]
}

/// Hex calldata for a call with fixed-width word arguments
pub fn encode_call(signature: &str, args: &[[u8; WORD_SIZE]]) -> String {
    let mut data = selector(signature).to_vec();
    for word in args {
        data.extend_from_slice(word);
    }
    format!("0x{}", hex::encode(data))
}

pub fn strip_hex(value: &str) -> &str {
    value.strip_prefix("0x").unwrap_or(value)
}

fn left_pad(bytes: &[u8]) -> Result<[u8; WORD_SIZE], GatewayError> {
    if bytes.len() > WORD_SIZE {
        return Err(GatewayError::Decode(format!(
            "value of {} bytes does not fit a word",
            bytes.len()
        )));
    }
    let mut word = [0u8; WORD_SIZE];
    word[WORD_SIZE - bytes.len()..].copy_from_slice(bytes);
    Ok(word)
}

/// Encode a decimal integer string as a uint256 word
pub fn uint_word(decimal: &str) -> Result<[u8; WORD_SIZE], GatewayError> {
    let value = BigUint::parse_bytes(decimal.as_bytes(), 10)
        .ok_or_else(|| GatewayError::Decode(format!("invalid decimal integer: {}", decimal)))?;
    left_pad(&value.to_bytes_be())
}

/// Encode a hex id as a bytes32 word, interpreted as a big-endian integer
pub fn bytes32_word(hex_id: &str) -> Result<[u8; WORD_SIZE], GatewayError> {
    let mut digits = strip_hex(hex_id).to_string();
    if digits.len() % 2 == 1 {
        digits.insert(0, '0');
    }
    let bytes = hex::decode(&digits)
        .map_err(|e| GatewayError::Decode(format!("invalid hex id {}: {}", hex_id, e)))?;
    left_pad(&bytes)
}

fn word_to_usize(word: &[u8]) -> Result<usize, GatewayError> {
    if word[..WORD_SIZE - 8].iter().any(|&b| b != 0) {
        return Err(GatewayError::Decode("oversized length word".to_string()));
    }
    let mut tail = [0u8; 8];
    tail.copy_from_slice(&word[WORD_SIZE - 8..]);
    Ok(u64::from_be_bytes(tail) as usize)
}

/// Decode a returned string, either ABI-dynamic or bytes32-packed
pub fn decode_string(data: &[u8]) -> Result<String, GatewayError> {
    if data.len() == WORD_SIZE {
        // bytes32-packed: content up to the first NUL
        let end = data.iter().position(|&b| b == 0).unwrap_or(WORD_SIZE);
        return String::from_utf8(data[..end].to_vec())
            .map_err(|e| GatewayError::Decode(e.to_string()));
    }
    if data.len() < 2 * WORD_SIZE {
        return Err(GatewayError::Decode(format!(
            "return data of {} bytes is not a string",
            data.len()
        )));
    }
    let offset = word_to_usize(&data[..WORD_SIZE])?;
    if data.len() < offset + WORD_SIZE {
        return Err(GatewayError::Decode("string offset out of range".to_string()));
    }
    let length = word_to_usize(&data[offset..offset + WORD_SIZE])?;
    let start = offset + WORD_SIZE;
    if data.len() < start + length {
        return Err(GatewayError::Decode("string length out of range".to_string()));
    }
    String::from_utf8(data[start..start + length].to_vec())
        .map_err(|e| GatewayError::Decode(e.to_string()))
}

/// Decode the first return word as a u64 (enum codes, small counters)
pub fn decode_u64(data: &[u8]) -> Result<u64, GatewayError> {
    if data.len() < WORD_SIZE {
        return Err(GatewayError::Decode("return data shorter than a word".to_string()));
    }
    if data[..WORD_SIZE - 8].iter().any(|&b| b != 0) {
        return Err(GatewayError::Decode("u64 return value out of range".to_string()));
    }
    let mut tail = [0u8; 8];
    tail.copy_from_slice(&data[WORD_SIZE - 8..WORD_SIZE]);
    Ok(u64::from_be_bytes(tail))
}

/// Decode `count` consecutive uint256 return words
pub fn decode_uint_words(data: &[u8], count: usize) -> Result<Vec<BigDecimal>, GatewayError> {
    if data.len() < count * WORD_SIZE {
        return Err(GatewayError::Decode(format!(
            "expected {} return words, got {} bytes",
            count,
            data.len()
        )));
    }
    Ok(data
        .chunks(WORD_SIZE)
        .take(count)
        .map(|word| BigDecimal::from(BigInt::from_bytes_be(Sign::Plus, word)))
        .collect())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn selector_matches_known_value() {
        // The canonical ERC20 transfer selector
        assert_eq!(selector("transfer(address,uint256)"), [0xa9, 0x05, 0x9c, 0xbb]);
    }

    #[test]
    fn encode_call_without_args_is_the_selector() {
        assert_eq!(encode_call("symbol()", &[]), "0x95d89b41");
        assert_eq!(encode_call("name()", &[]), "0x06fdde03");
    }

    #[test]
    fn uint_word_left_pads() {
        let word = uint_word("5").unwrap();
        assert_eq!(word[31], 5);
        assert!(word[..31].iter().all(|&b| b == 0));
    }

    #[test]
    fn bytes32_word_accepts_odd_length_hex() {
        let word = bytes32_word("0x1").unwrap();
        assert_eq!(word[31], 1);
    }

    #[test]
    fn decodes_dynamic_string() {
        let mut data = vec![0u8; 64];
        data[31] = 0x20; // offset
        data[63] = 3; // length
        data.extend_from_slice(b"DAI");
        data.extend_from_slice(&[0u8; 29]); // padding
        assert_eq!(decode_string(&data).unwrap(), "DAI");
    }

    #[test]
    fn decodes_bytes32_packed_string() {
        let mut word = [0u8; 32];
        word[..4].copy_from_slice(b"WETH");
        assert_eq!(decode_string(&word).unwrap(), "WETH");
    }

    #[test]
    fn decodes_uint_words() {
        let mut data = vec![0u8; 64];
        data[31] = 7;
        data[63] = 9;
        let values = decode_uint_words(&data, 2).unwrap();
        assert_eq!(values, vec![BigDecimal::from(7), BigDecimal::from(9)]);
    }

    #[test]
    fn decode_u64_rejects_oversized_values() {
        let mut data = [0u8; 32];
        data[0] = 1;
        assert!(decode_u64(&data).is_err());
    }
}
