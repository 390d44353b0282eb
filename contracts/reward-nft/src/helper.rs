use commons::{ContractTokenId, TOKEN_METADATA_BASE_URL};
use concordium_cis2::*;
use concordium_std::*;

/// Build a string from TOKEN_METADATA_BASE_URL appended with the token ID
/// encoded as hex.
pub fn build_token_metadata_url(token_id: &ContractTokenId) -> String {
    let mut token_metadata_url = String::from(TOKEN_METADATA_BASE_URL);
    push_token_id(&mut token_metadata_url, token_id);
    token_metadata_url
}

/// Token IDs are serialized little endian, the hex follows the same byte order.
pub fn push_token_id(string: &mut String, token_id: &ContractTokenId) {
    for byte in &token_id.0.to_le_bytes() {
        string.push(bits_to_hex_char(byte >> 4));
        string.push(bits_to_hex_char(byte & 0xF));
    }
}

pub fn bits_to_hex_char(bits: u8) -> char {
    match bits & 0xF {
        0x0..=0x9 => (bits + b'0') as char,
        0xA..=0xF => (bits - 10 + b'A') as char,
        _ => unreachable!(),
    }
}

pub fn token_metadata_url(token_id: &ContractTokenId) -> MetadataUrl {
    MetadataUrl {
        url: build_token_metadata_url(token_id),
        hash: None,
    }
}

#[concordium_cfg_test]
mod tests {
    use super::*;

    #[concordium_test]
    fn token_id_formatting() {
        let mut token_id_string = String::new();
        push_token_id(&mut token_id_string, &TokenIdU64(0));
        claim_eq!(token_id_string, "0000000000000000");

        let mut token_id_string = String::new();
        push_token_id(&mut token_id_string, &TokenIdU64(1));
        claim_eq!(token_id_string, "0100000000000000");

        let mut token_id_string = String::new();
        push_token_id(&mut token_id_string, &TokenIdU64(0xABCD));
        claim_eq!(token_id_string, "CDAB000000000000");
    }

    #[concordium_test]
    fn token_metadata_url_formatting() {
        let url = build_token_metadata_url(&TokenIdU64(2));
        claim!(url.starts_with(TOKEN_METADATA_BASE_URL));
        claim!(url.ends_with("0200000000000000"));
        claim_eq!(url.len(), TOKEN_METADATA_BASE_URL.len() + 16);
    }
}
