/// Zero bytes in front of a 20-byte address in a 32-byte topic.
const ADDRESS_TOPIC_PADDING: &str = "000000000000000000000000";

/// Decodes `0x`-prefixed hex into text, e.g. a block's `extra_data` which builders use to
/// sign their blocks.
///
/// Bytes that are not valid UTF-8 are decoded as Latin-1. `"0x"` decodes to an empty string.
pub fn byte_to_string(hex_string: &str) -> Result<String, hex::FromHexError> {
    let digits = hex_string.strip_prefix("0x").unwrap_or(hex_string);
    let bytes = hex::decode(digits)?;

    Ok(match String::from_utf8(bytes) {
        Ok(text) => text,
        Err(err) => err.into_bytes().iter().map(|&byte| byte as char).collect(),
    })
}

/// Left-pads an address to a 32-byte topic, so logs can be filtered by an indexed address.
pub fn address_to_topic(address: &str) -> String {
    let digits = address.strip_prefix("0x").unwrap_or(address);

    format!("0x{}{}", ADDRESS_TOPIC_PADDING, digits.to_lowercase())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_byte_to_string() {
        assert_eq!(byte_to_string("0x").unwrap(), "");
        assert_eq!(
            byte_to_string("0x6265617665726275696c642e6f7267").unwrap(),
            "beaverbuild.org"
        );
        // 0xe9 alone is not valid UTF-8, Latin-1 maps it to 'é'.
        assert_eq!(byte_to_string("0x636166e9").unwrap(), "caf\u{e9}");
        assert!(byte_to_string("0xzz").is_err());
    }

    #[test]
    fn test_address_to_topic() {
        let topic = address_to_topic("0xE35E9842fceaCA96570B734083f4a58e8F7C5f2A");

        assert_eq!(
            topic,
            "0x000000000000000000000000e35e9842fceaca96570b734083f4a58e8f7c5f2a"
        );
        assert_eq!(topic.len(), 66);
    }
}
