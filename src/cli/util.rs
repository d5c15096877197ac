pub(crate) fn mask_api_key(key: &str) -> String {
    if key.is_empty() {
        return "(not set)".to_string();
    }

    let visible = key.len().min(8);
    format!("{}***", &key[..visible])
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn mask_api_key_truncates_long_keys() {
        assert_eq!(mask_api_key("sk-abcdefghijkl"), "sk-abcde***");
        assert_eq!(mask_api_key("abc"), "abc***");
        assert_eq!(mask_api_key(""), "(not set)");
    }
}
