//! Typed encode/decode helpers for the handful of fixed function
//! selectors the tools call.
//!
//! Calldata layout is always `selector (4 bytes) ++ args`, each argument
//! ABI-encoded into a 32-byte big-endian word. Addresses occupy the low
//! 20 bytes of their word, left-padded with zeros. Keeping one typed
//! function pair per selector avoids the silent misalignment that string
//! concatenation invites.

use ethers::abi::{decode, ParamType, Token};
use ethers::types::{Address, Bytes, U256};

/// `name()` (`0x06fdde03`): no arguments, returns an ABI `string`.
pub const SELECTOR_NAME: [u8; 4] = [0x06, 0xfd, 0xde, 0x03];
/// `symbol()` (`0x95d89b41`): no arguments, returns an ABI `string`.
pub const SELECTOR_SYMBOL: [u8; 4] = [0x95, 0xd8, 0x9b, 0x41];
/// `decimals()` (`0x313ce567`): no arguments, returns a `uint8`.
pub const SELECTOR_DECIMALS: [u8; 4] = [0x31, 0x3c, 0xe5, 0x67];
/// `balanceOf(address)` (`0x70a08231`): one address argument, returns a `uint256`.
pub const SELECTOR_BALANCE_OF: [u8; 4] = [0x70, 0xa0, 0x82, 0x31];
/// Faucet claim (`0x6a627842`): one address argument, the recipient.
/// The function name is unknown; the selector matches `mint(address)`.
pub const SELECTOR_FAUCET_CLAIM: [u8; 4] = [0x6a, 0x62, 0x78, 0x42];

/// Calldata for a zero-argument call: the 4 selector bytes, nothing else.
pub fn encode_call(selector: [u8; 4]) -> Bytes {
    Bytes::from(selector.to_vec())
}

/// Calldata for a single-address call: 4 selector bytes followed by one
/// 32-byte word holding the address in its low 20 bytes.
pub fn encode_call_address(selector: [u8; 4], address: Address) -> Bytes {
    let mut data = Vec::with_capacity(36);
    data.extend_from_slice(&selector);
    data.extend_from_slice(&[0u8; 12]);
    data.extend_from_slice(address.as_bytes());
    Bytes::from(data)
}

/// Decode a `uint256` return word. An empty (`0x`) result reads as zero,
/// matching how a missing balance is treated everywhere downstream.
pub fn decode_uint256(data: &[u8]) -> U256 {
    if data.is_empty() {
        return U256::zero();
    }
    let take = data.len().min(32);
    U256::from_big_endian(&data[..take])
}

/// Decode a `uint8` return word (the `decimals()` shape). `None` when the
/// call returned nothing or the value does not fit a u8.
pub fn decode_u8(data: &[u8]) -> Option<u8> {
    if data.is_empty() {
        return None;
    }
    let value = decode_uint256(data);
    if value > U256::from(u8::MAX) {
        return None;
    }
    Some(value.as_u32() as u8)
}

/// Decode a `string` return value. Tries the proper dynamic ABI layout
/// (offset word, length word, UTF-8 bytes) first; some older tokens
/// return a raw `bytes32` instead, so fall back to trimming NULs off the
/// raw bytes. `None` when the result is empty or not printable.
pub fn decode_string(data: &[u8]) -> Option<String> {
    if data.is_empty() {
        return None;
    }

    if let Ok(tokens) = decode(&[ParamType::String], data) {
        if let Some(Token::String(s)) = tokens.into_iter().next() {
            let trimmed = s.trim_matches('\0').trim();
            if !trimmed.is_empty() {
                return Some(trimmed.to_string());
            }
        }
    }

    // bytes32-style: printable ASCII padded with NULs
    let stripped: Vec<u8> = data.iter().copied().filter(|&b| b != 0).collect();
    let text = String::from_utf8(stripped).ok()?;
    let text = text.trim();
    if text.is_empty() || !text.chars().all(|c| c.is_ascii_graphic() || c == ' ') {
        return None;
    }
    Some(text.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn balance_of_layout_is_selector_plus_padded_address() {
        let holder: Address = "0x220511f4fd6d898125f79aa8d4cb91bffe9df6db"
            .parse()
            .unwrap();
        let calldata = encode_call_address(SELECTOR_BALANCE_OF, holder);
        assert_eq!(calldata.len(), 36);
        assert_eq!(
            hex::encode(&calldata),
            "70a08231000000000000000000000000220511f4fd6d898125f79aa8d4cb91bffe9df6db"
        );
    }

    #[test]
    fn faucet_claim_layout() {
        let recipient: Address = "0x3edf60dd017ace33a0220f78741b5581c385a1ba"
            .parse()
            .unwrap();
        let calldata = encode_call_address(SELECTOR_FAUCET_CLAIM, recipient);
        assert_eq!(&calldata[..4], &SELECTOR_FAUCET_CLAIM);
        assert_eq!(&calldata[4..16], &[0u8; 12]);
        assert_eq!(&calldata[16..], recipient.as_bytes());
    }

    #[test]
    fn zero_arg_calls_are_bare_selectors() {
        assert_eq!(encode_call(SELECTOR_NAME).to_vec(), vec![0x06, 0xfd, 0xde, 0x03]);
        assert_eq!(encode_call(SELECTOR_DECIMALS).len(), 4);
    }

    #[test]
    fn empty_result_decodes_to_zero_balance() {
        assert_eq!(decode_uint256(&[]), U256::zero());
    }

    #[test]
    fn uint256_round_trip() {
        let mut word = [0u8; 32];
        U256::from(123_456_789u64).to_big_endian(&mut word);
        assert_eq!(decode_uint256(&word), U256::from(123_456_789u64));
    }

    #[test]
    fn decimals_decode() {
        let mut word = [0u8; 32];
        word[31] = 6;
        assert_eq!(decode_u8(&word), Some(6));
        assert_eq!(decode_u8(&[]), None);

        let mut big = [0u8; 32];
        big[30] = 1; // 256
        assert_eq!(decode_u8(&big), None);
    }

    #[test]
    fn dynamic_string_decode() {
        // offset 0x20, length 4, "USDC"
        let mut data = Vec::new();
        let mut word = [0u8; 32];
        U256::from(0x20u64).to_big_endian(&mut word);
        data.extend_from_slice(&word);
        U256::from(4u64).to_big_endian(&mut word);
        data.extend_from_slice(&word);
        let mut payload = [0u8; 32];
        payload[..4].copy_from_slice(b"USDC");
        data.extend_from_slice(&payload);

        assert_eq!(decode_string(&data), Some("USDC".to_string()));
    }

    #[test]
    fn bytes32_string_fallback() {
        // MKR-style: name packed into a single padded word
        let mut word = [0u8; 32];
        word[..5].copy_from_slice(b"Maker");
        assert_eq!(decode_string(&word), Some("Maker".to_string()));
        assert_eq!(decode_string(&[]), None);
    }
}
