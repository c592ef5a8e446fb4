// SPDX-FileCopyrightText: 2025 RAprogramm <andrey.rozanov.vl@gmail.com>
//
// SPDX-License-Identifier: MIT

//! HTML preview of resolved badges.
//!
//! The preview mirrors what a documentation page shows once the snippet is
//! pasted: one linked image per badge, in composition order. Image URLs are
//! only referenced, never fetched.

use std::borrow::Cow;

use crate::compose::ResolvedBadge;

/// Renders `badges` as linked `<img>` elements separated by single spaces.
///
/// Attribute values are HTML-escaped. An empty slice yields an empty string.
///
/// # Examples
///
/// ```
/// use badgegen::{ResolvedBadge, render_preview};
///
/// let badge = ResolvedBadge {
///     title:     "Build Status".to_owned(),
///     link_url:  "https://ci.example/octo/cat".to_owned(),
///     image_url: "https://ci.example/octo/cat/badge?style=flat".to_owned()
/// };
/// let html = render_preview(&[badge]);
/// assert!(html.starts_with("<a href=\"https://ci.example/octo/cat\""));
/// ```
pub fn render_preview(badges: &[ResolvedBadge]) -> String {
    badges
        .iter()
        .map(|badge| {
            let title = escape_attribute(&badge.title);
            format!(
                "<a href=\"{}\" title=\"{title}\"><img src=\"{}\" alt=\"{title}\"></a>",
                escape_attribute(&badge.link_url),
                escape_attribute(&badge.image_url)
            )
        })
        .collect::<Vec<_>>()
        .join(" ")
}

/// Escapes characters that are unsafe inside a double-quoted HTML attribute.
pub(crate) fn escape_attribute(value: &str) -> Cow<'_, str> {
    if value
        .chars()
        .any(|character| matches!(character, '&' | '<' | '>' | '\"' | '\''))
    {
        let mut escaped = String::with_capacity(value.len());
        for character in value.chars() {
            match character {
                '&' => escaped.push_str("&amp;"),
                '<' => escaped.push_str("&lt;"),
                '>' => escaped.push_str("&gt;"),
                '\"' => escaped.push_str("&quot;"),
                '\'' => escaped.push_str("&#x27;"),
                other => escaped.push(other)
            }
        }
        Cow::Owned(escaped)
    } else {
        Cow::Borrowed(value)
    }
}
