pub mod pipeline;
pub mod rank;
pub mod state;
pub mod store;

/// Turn a canonical persona key back into a display name:
/// `"ada_lovelace"` becomes `"Ada Lovelace"`.
pub fn display_name(key: &str) -> String {
    key.split('_')
        .filter(|part| !part.is_empty())
        .map(|part| {
            let mut chars = part.chars();
            match chars.next() {
                Some(first) => first.to_uppercase().collect::<String>() + chars.as_str(),
                None => String::new(),
            }
        })
        .collect::<Vec<_>>()
        .join(" ")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn display_name_capitalizes_words() {
        assert_eq!(display_name("ada_lovelace"), "Ada Lovelace");
        assert_eq!(display_name("grace"), "Grace");
    }

    #[test]
    fn display_name_roundtrips_normalization() {
        let key = store::normalize_name("Ada Lovelace");
        assert_eq!(display_name(&key), "Ada Lovelace");
    }
}
