//! Canonical JSON formatting for exported ABIs

/// Re-emit `raw` as two-space indented JSON with a trailing newline.
///
/// Key order is kept as the tool produced it. Formatting the result again
/// yields the same bytes.
pub fn format_json(raw: &str) -> Result<String, serde_json::Error> {
    let value: serde_json::Value = serde_json::from_str(raw)?;
    let mut formatted = serde_json::to_string_pretty(&value)?;
    formatted.push('\n');
    Ok(formatted)
}

#[cfg(test)]
mod tests {
    use super::*;

    const RAW_ABI: &str = r#"[{"type":"function","name":"transfer","inputs":[{"name":"to","type":"address","internalType":"address"},{"name":"amount","type":"uint256","internalType":"uint256"}],"outputs":[{"name":"","type":"bool","internalType":"bool"}],"stateMutability":"nonpayable"}]"#;

    #[test]
    fn test_pretty_prints_with_trailing_newline() {
        let formatted = format_json("[{\"type\":\"receive\",\"stateMutability\":\"payable\"}]").unwrap();
        assert_eq!(
            formatted,
            "[\n  {\n    \"type\": \"receive\",\n    \"stateMutability\": \"payable\"\n  }\n]\n"
        );
    }

    #[test]
    fn test_preserves_key_order() {
        let formatted = format_json(RAW_ABI).unwrap();
        let type_pos = formatted.find("\"type\": \"function\"").unwrap();
        let name_pos = formatted.find("\"name\": \"transfer\"").unwrap();
        let mutability_pos = formatted.find("\"stateMutability\"").unwrap();
        assert!(type_pos < name_pos);
        assert!(name_pos < mutability_pos);
    }

    #[test]
    fn test_formatting_is_idempotent() {
        let once = format_json(RAW_ABI).unwrap();
        let twice = format_json(&once).unwrap();
        assert_eq!(once, twice);
    }

    #[test]
    fn test_malformed_input_fails() {
        assert!(format_json("Error: contract not found").is_err());
        assert!(format_json("").is_err());
    }

    #[test]
    fn test_surrounding_whitespace_is_accepted() {
        assert_eq!(format_json("\n  []\n\n").unwrap(), "[]\n");
    }
}
