//! Generated external codes.
//!
//! Items, stores and staff created without a code get `<PREFIX>-<8 hex>`,
//! e.g. `ITEM-1a2b3c4d`.

use uuid::Uuid;

pub const ITEM_PREFIX: &str = "ITEM";
pub const STORE_PREFIX: &str = "STORE";
pub const STAFF_PREFIX: &str = "STAFF";

/// First 8 hex characters of a fresh v4 UUID.
pub fn short_suffix() -> String {
    let mut hex = Uuid::new_v4().simple().to_string();
    hex.truncate(8);
    hex
}

/// Returns `PREFIX-xxxxxxxx`.
pub fn generate_code(prefix: &str) -> String {
    format!("{}-{}", prefix, short_suffix())
}

/// Uses the supplied code when it is non-blank, otherwise generates one.
pub fn code_or_generate(supplied: Option<&str>, prefix: &str) -> String {
    match supplied.map(str::trim) {
        Some(code) if !code.is_empty() => code.to_string(),
        _ => generate_code(prefix),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_generate_code_shape() {
        let code = generate_code(ITEM_PREFIX);
        assert!(code.starts_with("ITEM-"));
        let suffix = &code["ITEM-".len()..];
        assert_eq!(suffix.len(), 8);
        assert!(suffix.chars().all(|c| c.is_ascii_hexdigit()));
    }

    #[test]
    fn test_codes_differ() {
        assert_ne!(generate_code(STORE_PREFIX), generate_code(STORE_PREFIX));
    }

    #[test]
    fn test_code_or_generate() {
        assert_eq!(code_or_generate(Some(" 4901 "), ITEM_PREFIX), "4901");
        assert!(code_or_generate(Some(""), STAFF_PREFIX).starts_with("STAFF-"));
        assert!(code_or_generate(None, STAFF_PREFIX).starts_with("STAFF-"));
    }
}
