// SPDX-FileCopyrightText: 2025 RAprogramm <andrey.rozanov.vl@gmail.com>
//
// SPDX-License-Identifier: MIT

//! URL template resolution.
//!
//! Catalog templates reference two placeholders, [`REPOSITORY_PLACEHOLDER`]
//! and [`BRANCH_PLACEHOLDER`]. Every catalog entry relies on these exact
//! tokens, so they must stay stable. Resolution is a single left-to-right
//! pass: substituted values are never scanned again, which keeps a
//! repository identifier such as `{branch}` from expanding further.

use std::sync::LazyLock;

use regex::Regex;

use crate::catalog::BadgeStyle;

/// Token replaced with the repository identifier.
pub const REPOSITORY_PLACEHOLDER: &str = "{repository}";
/// Token replaced with the branch name.
pub const BRANCH_PLACEHOLDER: &str = "{branch}";
/// Branch substituted for [`BRANCH_PLACEHOLDER`]. No caller selects another
/// branch.
pub const DEFAULT_BRANCH: &str = "master";

static PLACEHOLDER_PATTERN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\{[^{}]*\}").expect("valid placeholder pattern"));

/// Values substituted into URL templates.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TemplateParams<'a> {
    /// Repository identifier, e.g. `octo/cat` or an npm package name.
    pub repository: &'a str,
    /// Branch name.
    pub branch:     &'a str
}

impl<'a> TemplateParams<'a> {
    /// Parameters for `repository` on [`DEFAULT_BRANCH`].
    pub fn new(repository: &'a str) -> Self {
        Self {
            repository,
            branch: DEFAULT_BRANCH
        }
    }
}

/// Substitutes every placeholder occurrence in `template`.
///
/// Characters outside the two recognized tokens are copied unchanged. An
/// empty repository identifier produces a well-formed but meaningless URL.
///
/// # Examples
///
/// ```
/// use badgegen::{TemplateParams, resolve};
///
/// let url = resolve(
///     "https://ci.example/{repository}?branch={branch}",
///     TemplateParams::new("octo/cat")
/// );
/// assert_eq!(url, "https://ci.example/octo/cat?branch=master");
/// ```
pub fn resolve(template: &str, params: TemplateParams<'_>) -> String {
    let mut resolved = String::with_capacity(template.len() + params.repository.len());
    let mut rest = template;

    while let Some(start) = rest.find('{') {
        resolved.push_str(&rest[..start]);
        let candidate = &rest[start..];

        if let Some(tail) = candidate.strip_prefix(REPOSITORY_PLACEHOLDER) {
            resolved.push_str(params.repository);
            rest = tail;
        } else if let Some(tail) = candidate.strip_prefix(BRANCH_PLACEHOLDER) {
            resolved.push_str(params.branch);
            rest = tail;
        } else {
            resolved.push('{');
            rest = &candidate[1..];
        }
    }

    resolved.push_str(rest);
    resolved
}

/// Appends `style=<style>` to the query string of `image_url`.
///
/// Existing query parameters are kept and the new parameter goes last. A
/// fragment, if any, stays at the end of the URL.
///
/// # Examples
///
/// ```
/// use badgegen::{BadgeStyle, apply_style};
///
/// assert_eq!(
///     apply_style("https://img.example/badge", BadgeStyle::Flat),
///     "https://img.example/badge?style=flat"
/// );
/// assert_eq!(
///     apply_style("https://img.example/badge?branch=main", BadgeStyle::Plastic),
///     "https://img.example/badge?branch=main&style=plastic"
/// );
/// ```
pub fn apply_style(image_url: &str, style: BadgeStyle) -> String {
    let (base, fragment) = match image_url.find('#') {
        Some(index) => image_url.split_at(index),
        None => (image_url, "")
    };

    let separator = if !base.contains('?') {
        "?"
    } else if base.ends_with(['?', '&']) {
        ""
    } else {
        "&"
    };

    let style = style.as_str();
    let mut styled =
        String::with_capacity(image_url.len() + separator.len() + "style=".len() + style.len());
    styled.push_str(base);
    styled.push_str(separator);
    styled.push_str("style=");
    styled.push_str(style);
    styled.push_str(fragment);
    styled
}

/// Lists every `{...}` token in `template`, in order of appearance.
pub fn placeholders(template: &str) -> Vec<&str> {
    PLACEHOLDER_PATTERN
        .find_iter(template)
        .map(|found| found.as_str())
        .collect()
}

/// Lists the tokens in `template` that [`resolve`] does not substitute.
pub fn unrecognized_placeholders(template: &str) -> Vec<&str> {
    placeholders(template)
        .into_iter()
        .filter(|token| *token != REPOSITORY_PLACEHOLDER && *token != BRANCH_PLACEHOLDER)
        .collect()
}
