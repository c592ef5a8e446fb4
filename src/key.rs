// SPDX-FileCopyrightText: 2025 RAprogramm <andrey.rozanov.vl@gmail.com>
//
// SPDX-License-Identifier: MIT

//! Stable keys derived from human readable catalog names.
//!
//! Keys contain only lowercase ASCII alphanumeric characters separated by
//! single hyphens. They select services on the command line and detect
//! duplicate catalog entries.

/// Derives the key for a display name such as `"Travis CI"`.
///
/// Every run of non-alphanumeric characters collapses into one hyphen and
/// leading or trailing separators are dropped. Returns `None` when nothing
/// key-worthy remains.
///
/// # Examples
///
/// ```
/// use badgegen::service_key;
///
/// assert_eq!(service_key("crates.io version").as_deref(), Some("crates-io-version"));
/// assert_eq!(service_key(" *** "), None);
/// ```
pub fn service_key(name: &str) -> Option<String> {
    let trimmed = name.trim();
    let mut key = String::with_capacity(trimmed.len());
    let mut pending_separator = false;

    for character in trimmed.chars() {
        if character.is_ascii_alphanumeric() {
            if pending_separator && !key.is_empty() {
                key.push('-');
            }
            key.push(character.to_ascii_lowercase());
            pending_separator = false;
        } else {
            pending_separator = true;
        }
    }

    if key.is_empty() { None } else { Some(key) }
}

#[cfg(test)]
mod tests {
    use proptest::prelude::*;

    use super::service_key;

    proptest! {
        #[test]
        fn key_contains_only_allowed_characters(input in "[A-Za-z0-9._/ -]{1,48}") {
            let key = service_key(&input);
            let key_is_well_formed = key.is_none_or(|value| {
                value.chars().all(|ch| matches!(ch, 'a'..='z' | '0'..='9' | '-'))
                    && !value.starts_with('-')
                    && !value.ends_with('-')
                    && !value.contains("--")
            });
            prop_assert!(key_is_well_formed);
        }
    }

    #[test]
    fn spaces_become_hyphens() {
        assert_eq!(service_key("Travis CI").as_deref(), Some("travis-ci"));
    }

    #[test]
    fn dots_and_repeated_separators_collapse() {
        assert_eq!(
            service_key("  Libraries.io -- dependencies ").as_deref(),
            Some("libraries-io-dependencies")
        );
    }

    #[test]
    fn non_ascii_characters_act_as_separators() {
        assert_eq!(service_key("npm→downloads").as_deref(), Some("npm-downloads"));
    }

    #[test]
    fn empty_and_symbol_only_names_have_no_key() {
        assert!(service_key("   ").is_none());
        assert!(service_key("!!!").is_none());
    }
}
