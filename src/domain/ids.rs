//! Canonical identifier construction for all projected entities.
//!
//! Composite ids join their components with an explicit delimiter so that
//! variable-width components can never collide (`0xab:12` and `0xab1:2`
//! stay distinct).

/// Delimiter between the components of a composite id
pub const ID_DELIMITER: char = ':';

/// The 20-byte zero address, used as the sentinel "no party" user
pub const ADDRESS_ZERO: &str = "0x0000000000000000000000000000000000000000";

/// Id of an NFT: lowercase contract address + delimiter + decimal token id
pub fn nft_id(contract_address: &str, token_id: &str) -> String {
    format!(
        "{}{}{}",
        contract_address.to_lowercase(),
        ID_DELIMITER,
        token_id
    )
}

/// Id of a bid: lowercase auction id + delimiter + zero-based ordinal
pub fn bid_id(auction_id: &str, ordinal: u64) -> String {
    format!("{}{}{}", auction_id.to_lowercase(), ID_DELIMITER, ordinal)
}

/// Id of a user: lowercase wallet address
pub fn user_id(address: &str) -> String {
    address.to_lowercase()
}

/// Id of a payment method: lowercase token contract address
pub fn payment_method_id(token_address: &str) -> String {
    token_address.to_lowercase()
}

/// Id of an auction: lowercase event-supplied hex id
pub fn auction_id(raw: &str) -> String {
    raw.to_lowercase()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn nft_id_is_delimited_and_lowercase() {
        assert_eq!(nft_id("0xABCD", "5"), "0xabcd:5");
    }

    #[test]
    fn nft_ids_with_variable_width_components_do_not_collide() {
        assert_ne!(nft_id("0xab", "12"), nft_id("0xab1", "2"));
    }

    #[test]
    fn bid_id_uses_ordinal() {
        assert_eq!(bid_id("0x1", 0), "0x1:0");
        assert_eq!(bid_id("0x1", 1), "0x1:1");
    }

    #[test]
    fn user_id_is_lowercase() {
        assert_eq!(user_id("0xDeAdBeEf"), "0xdeadbeef");
    }
}
