//! Class-name validation
//!
//! Class tokens come from configuration and end up in the document, so
//! only the conservative grammar `[A-Za-z0-9_-]+` is ever let through.

/// Whether `token` is an acceptable CSS class name
pub fn is_valid_class_name(token: &str) -> bool {
    !token.is_empty()
        && token
            .bytes()
            .all(|b| b.is_ascii_alphanumeric() || b == b'-' || b == b'_')
}

/// Split a space-separated option value into tokens, keeping the first
/// occurrence of each. Tokens are not validated here.
pub fn split_tokens(value: &str) -> Vec<String> {
    let mut tokens: Vec<String> = Vec::new();
    for token in value.split(' ') {
        if !tokens.iter().any(|t| t == token) {
            tokens.push(token.to_string());
        }
    }
    tokens
}

/// Keep only valid class names
pub fn valid_tokens<I, S>(tokens: I) -> Vec<String>
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    tokens
        .into_iter()
        .filter_map(|token| {
            let token = token.as_ref();
            if is_valid_class_name(token) {
                Some(token.to_string())
            } else {
                if !token.is_empty() {
                    tracing::trace!("Dropping invalid class token {:?}", token);
                }
                None
            }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn test_grammar() {
        assert!(is_valid_class_name("abc-1_2"));
        assert!(is_valid_class_name("-"));
        assert!(!is_valid_class_name("a b"));
        assert!(!is_valid_class_name("<script>"));
        assert!(!is_valid_class_name(""));
        assert!(!is_valid_class_name("caf\u{e9}"));
    }

    #[test]
    fn test_split_tokens_dedupes() {
        assert_eq!(
            split_tokens("jsn-container jsn-top-center jsn-container"),
            vec!["jsn-container", "jsn-top-center"]
        );
        // Double spaces yield an empty token that validation later drops
        assert_eq!(split_tokens("a  b"), vec!["a", "", "b"]);
    }

    #[test]
    fn test_valid_tokens() {
        assert_eq!(valid_tokens(["abc-1_2", "a b", "<script>", ""]), vec!["abc-1_2"]);
    }

    proptest! {
        #[test]
        fn grammar_tokens_are_accepted(token in "[A-Za-z0-9_-]{1,24}") {
            prop_assert!(is_valid_class_name(&token));
        }

        #[test]
        fn tokens_with_foreign_chars_are_rejected(
            prefix in "[A-Za-z0-9_-]{0,8}",
            bad in "[ <>\"'.#:;(){}]",
            suffix in "[A-Za-z0-9_-]{0,8}",
        ) {
            let token = format!("{prefix}{bad}{suffix}");
            prop_assert!(!is_valid_class_name(&token));
        }

        #[test]
        fn valid_tokens_never_yields_invalid(tokens in proptest::collection::vec(".{0,12}", 0..8)) {
            for token in valid_tokens(&tokens) {
                prop_assert!(is_valid_class_name(&token));
            }
        }
    }
}
