//! Account identifier helpers (pure, stateless)

/// Separator placed between the head and tail of a shortened address.
pub const ELLIPSIS: &str = "...";

const HEAD: usize = 6;
const TAIL: usize = 4;

/// Shorten an address for compact display: `0xABCD...EF12`.
///
/// Works on characters, not bytes, and preserves case. Inputs shorter than
/// ten characters have nothing to elide and are returned unchanged.
pub fn short_address(address: &str) -> String {
    let len = address.chars().count();
    if len < HEAD + TAIL {
        return address.to_string();
    }
    let head: String = address.chars().take(HEAD).collect();
    let tail: String = address.chars().skip(len - TAIL).collect();
    format!("{head}{ELLIPSIS}{tail}")
}

/// `0x` followed by 40 hex characters (20 bytes), any casing.
///
/// Checksum casing is not verified; provider output is trusted.
pub fn is_account_address(value: &str) -> bool {
    match value.strip_prefix("0x") {
        Some(body) if body.len() == 40 => hex::decode(body).is_ok(),
        _ => false,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const ADDRESS: &str = "0xABCDEF1234567890ABCDEF1234567890ABCDEF12";

    #[test]
    fn shortens_full_address() {
        assert_eq!(short_address(ADDRESS), "0xABCD...EF12");
    }

    #[test]
    fn shortening_preserves_case() {
        let lower = ADDRESS.to_lowercase();
        assert_eq!(short_address(&lower), "0xabcd...ef12");
        let mixed = "0xAbCdEf1234567890abcdef1234567890AbCdEf12";
        assert_eq!(short_address(mixed), "0xAbCd...Ef12");
    }

    #[test]
    fn shape_holds_for_many_addresses() {
        for seed in 0u8..=255 {
            let body = hex::encode([seed; 20]);
            let address = format!("0x{body}");
            let short = short_address(&address);
            assert_eq!(short.len(), HEAD + ELLIPSIS.len() + TAIL);
            assert_eq!(&short[..HEAD], &address[..HEAD]);
            assert_eq!(&short[HEAD..HEAD + 3], ELLIPSIS);
            assert_eq!(&short[HEAD + 3..], &address[address.len() - TAIL..]);
        }
    }

    #[test]
    fn exactly_ten_chars_is_shortened() {
        assert_eq!(short_address("0123456789"), "012345...6789");
    }

    #[test]
    fn short_input_is_returned_unchanged() {
        assert_eq!(short_address(""), "");
        assert_eq!(short_address("0x12"), "0x12");
        assert_eq!(short_address("012345678"), "012345678");
    }

    #[test]
    fn counts_characters_not_bytes() {
        // Multi-byte chars must not split on a byte boundary
        assert_eq!(short_address("ééééééééééxy"), "éééééé...ééxy");
    }

    #[test]
    fn recognises_account_identifiers() {
        assert!(is_account_address(ADDRESS));
        assert!(is_account_address(&ADDRESS.to_lowercase()));
        assert!(!is_account_address("0x1234"));
        assert!(!is_account_address("ABCDEF1234567890ABCDEF1234567890ABCDEF1234"));
        assert!(!is_account_address("0xZZCDEF1234567890ABCDEF1234567890ABCDEF12"));
    }
}
