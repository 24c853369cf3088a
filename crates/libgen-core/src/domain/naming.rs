//! Naming engine: one human-supplied name, four identifier casings.
//!
//! | Variant  | Example          | Used for                       |
//! |----------|------------------|--------------------------------|
//! | class    | `UserProfile`    | types, services, layers        |
//! | property | `userProfile`    | values, hooks, atoms           |
//! | file     | `user-profile`   | directories, file names, tags  |
//! | constant | `USER_PROFILE`   | tokens, env keys               |
//!
//! All variants derive from the same word split, so feeding any variant
//! back in yields the same four outputs.

use serde::Serialize;

use crate::domain::{error::DomainError, validation::DomainValidator};

/// Casing variants of a library name.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct NameVariants {
    pub class_name: String,
    pub property_name: String,
    pub file_name: String,
    pub constant_name: String,
}

impl NameVariants {
    /// Validate `name` and derive all four variants.
    pub fn from_name(name: &str) -> Result<Self, DomainError> {
        DomainValidator::validate_name(name)?;
        Ok(Self::derive(name))
    }

    /// Derive variants without validation. Callers must have validated `name`.
    pub(crate) fn derive(name: &str) -> Self {
        let words = split_words(name);
        Self {
            class_name: to_class_case(&words),
            property_name: to_property_case(&words),
            file_name: words.join("-"),
            constant_name: words
                .iter()
                .map(|w| w.to_uppercase())
                .collect::<Vec<_>>()
                .join("_"),
        }
    }
}

fn to_class_case(words: &[String]) -> String {
    words.iter().map(|w| capitalize(w)).collect()
}

fn to_property_case(words: &[String]) -> String {
    let mut out = String::new();
    for (i, word) in words.iter().enumerate() {
        if i == 0 {
            out.push_str(word);
        } else {
            out.push_str(&capitalize(word));
        }
    }
    out
}

/// Uppercase the first character. Digits pass through unchanged.
fn capitalize(word: &str) -> String {
    let mut chars = word.chars();
    match chars.next() {
        Some(first) => {
            let mut out = String::with_capacity(word.len());
            out.extend(first.to_uppercase());
            out.push_str(chars.as_str());
            out
        }
        None => String::new(),
    }
}

/// Split a string into lowercase words.
///
/// ## Word Boundary Detection
///
/// 1. **Explicit separators:** `_`, `-`, whitespace → always split
/// 2. **Case transition:** `aB` or `1B` → split before `B`
/// 3. **Acronym boundary:** `HTTPServer` → split between `P` and `S`
///    (detected by `Upper Upper Lower`)
///
/// Digits never start a new word on their own, so `oauth2` and `2fa` stay
/// intact.
pub fn split_words(input: &str) -> Vec<String> {
    let chars: Vec<char> = input.chars().collect();
    let mut words = Vec::new();
    let mut current = String::new();

    for (i, &c) in chars.iter().enumerate() {
        if c == '_' || c == '-' || c.is_whitespace() {
            if !current.is_empty() {
                words.push(current.to_lowercase());
                current.clear();
            }
            continue;
        }

        if !current.is_empty() && c.is_uppercase() {
            let prev = chars[i - 1];
            let camel = prev.is_lowercase() || prev.is_ascii_digit();
            let acronym_end =
                prev.is_uppercase() && chars.get(i + 1).is_some_and(|n| n.is_lowercase());
            if camel || acronym_end {
                words.push(current.to_lowercase());
                current.clear();
            }
        }

        current.push(c);
    }

    if !current.is_empty() {
        words.push(current.to_lowercase());
    }

    words
}

#[cfg(test)]
mod tests {
    use super::*;

    fn variants(name: &str) -> NameVariants {
        NameVariants::from_name(name).unwrap()
    }

    #[test]
    fn all_input_styles_agree() {
        for input in ["userProfile", "user-profile", "User Profile", "user_profile", "UserProfile"] {
            let v = variants(input);
            assert_eq!(v.class_name, "UserProfile", "input: {input}");
            assert_eq!(v.property_name, "userProfile", "input: {input}");
            assert_eq!(v.file_name, "user-profile", "input: {input}");
            assert_eq!(v.constant_name, "USER_PROFILE", "input: {input}");
        }
    }

    #[test]
    fn target_casing_is_a_no_op() {
        assert_eq!(variants("UserProfile").class_name, "UserProfile");
        assert_eq!(variants("userProfile").property_name, "userProfile");
        assert_eq!(variants("user-profile").file_name, "user-profile");
        assert_eq!(variants("USER_PROFILE").constant_name, "USER_PROFILE");
    }

    #[test]
    fn variants_are_idempotent() {
        let first = variants("paymentMethod");
        for again in [
            &first.class_name,
            &first.property_name,
            &first.file_name,
            &first.constant_name,
        ] {
            assert_eq!(variants(again), first);
        }
    }

    #[test]
    fn acronyms_split_before_next_word() {
        assert_eq!(split_words("HTTPServer"), vec!["http", "server"]);
        assert_eq!(variants("HTTPServer").class_name, "HttpServer");
    }

    #[test]
    fn numeric_leading_tokens_are_preserved() {
        let v = variants("api 2fa-token");
        assert_eq!(v.file_name, "api-2fa-token");
        assert_eq!(v.class_name, "Api2faToken");
        assert_eq!(v.property_name, "api2faToken");
        assert_eq!(v.constant_name, "API_2FA_TOKEN");
    }

    #[test]
    fn digits_stay_attached_to_their_word() {
        assert_eq!(split_words("oauth2Client"), vec!["oauth2", "client"]);
    }

    #[test]
    fn casing_invariants_hold() {
        for input in ["order", "user-profile", "HTTPServer", "v2 api", "a"] {
            let v = variants(input);
            assert!(v.class_name.starts_with(|c: char| c.is_ascii_uppercase()));
            assert!(!v.file_name.chars().any(|c| c.is_uppercase()));
            assert!(!v.constant_name.chars().any(|c| c.is_lowercase()));
        }
    }

    #[test]
    fn empty_name_is_rejected() {
        assert_eq!(NameVariants::from_name(""), Err(DomainError::EmptyName));
        assert_eq!(NameVariants::from_name("   "), Err(DomainError::EmptyName));
    }

    #[test]
    fn separators_collapse() {
        assert_eq!(split_words("--user__profile  "), vec!["user", "profile"]);
    }
}
