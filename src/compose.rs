// SPDX-FileCopyrightText: 2025 RAprogramm <andrey.rozanov.vl@gmail.com>
//
// SPDX-License-Identifier: MIT

//! Composition of resolved badges and snippet text.
//!
//! Everything here is a pure function of a [`SelectionState`] and its
//! catalog. Results are recomputed on every call and never cached, so a
//! mutation is visible to the very next composition.

use serde::Serialize;

use crate::{
    catalog::FormatDefinition,
    selection::SelectionState,
    template::{self, TemplateParams}
};

/// Badge with fully substituted URLs.
#[derive(Debug, Serialize, Clone, PartialEq, Eq)]
pub struct ResolvedBadge {
    /// Label used as link title and image alt text.
    pub title:     String,
    /// Link target.
    pub link_url:  String,
    /// Image URL with the active style applied.
    pub image_url: String
}

/// Resolves every enabled service of `selection`, in catalog order.
///
/// Returns an empty vector when no service is enabled; callers treat that as
/// nothing to preview.
///
/// # Examples
///
/// ```
/// use badgegen::{Catalog, SelectionState, compose_enabled};
///
/// let mut selection = SelectionState::new(Catalog::builtin());
/// selection.set_repository("octo/cat");
///
/// let badges = compose_enabled(&selection);
/// assert_eq!(badges[0].link_url, "https://travis-ci.org/octo/cat");
/// ```
pub fn compose_enabled(selection: &SelectionState<'_>) -> Vec<ResolvedBadge> {
    let params = TemplateParams::new(selection.repository());
    let style = selection.style();

    selection
        .catalog()
        .services()
        .iter()
        .zip(selection.enabled_flags())
        .filter(|(_, enabled)| **enabled)
        .map(|(service, _)| {
            let image_url = template::resolve(&service.image_url_template, params);
            ResolvedBadge {
                title:     service.title.clone(),
                link_url:  template::resolve(&service.link_url_template, params),
                image_url: template::apply_style(&image_url, style)
            }
        })
        .collect()
}

/// Renders `badges` with `format`, one entry per line.
///
/// Every entry, including the last, is followed by `\n`. An empty slice
/// yields an empty string.
pub fn render_snippet(badges: &[ResolvedBadge], format: &FormatDefinition) -> String {
    let mut snippet = String::new();
    for badge in badges {
        snippet.push_str(&format.render(&badge.title, &badge.link_url, &badge.image_url));
        snippet.push('\n');
    }
    snippet
}

/// Whether a preview should be shown: the repository identifier is
/// non-empty and at least one badge was composed.
pub fn should_preview(selection: &SelectionState<'_>, badges: &[ResolvedBadge]) -> bool {
    !selection.repository().is_empty() && !badges.is_empty()
}

#[cfg(test)]
mod tests {
    use proptest::prelude::*;

    use super::*;
    use crate::catalog::{BadgeStyle, Catalog, ServiceDefinition};

    fn link_only(title: &str, link_url: &str, _image_url: &str) -> String {
        format!("[{title}]({link_url})")
    }

    const LINK_ONLY: FormatDefinition = FormatDefinition {
        identifier: "link",
        label:      "Link",
        is_default: true,
        render:     link_only
    };

    fn single_service_catalog() -> Catalog {
        Catalog::new(
            vec![ServiceDefinition {
                name:               "build".to_owned(),
                title:              "Build Status".to_owned(),
                link_url_template:  "https://ci.example/{repository}".to_owned(),
                image_url_template: "https://ci.example/{repository}/badge".to_owned(),
                enabled_by_default: true
            }],
            BadgeStyle::ALL.to_vec(),
            vec![LINK_ONLY]
        )
        .expect("valid catalog")
    }

    #[test]
    fn end_to_end_single_service() {
        let catalog = single_service_catalog();
        let mut selection = SelectionState::new(&catalog);
        selection.set_repository("octo/cat");
        selection.set_style("flat").expect("valid style");
        selection.set_format(0).expect("valid format");

        let badges = compose_enabled(&selection);
        assert_eq!(badges, vec![ResolvedBadge {
            title:     "Build Status".to_owned(),
            link_url:  "https://ci.example/octo/cat".to_owned(),
            image_url: "https://ci.example/octo/cat/badge?style=flat".to_owned()
        }]);

        let snippet = render_snippet(&badges, selection.format());
        assert_eq!(snippet, "[Build Status](https://ci.example/octo/cat)\n");
    }

    #[test]
    fn render_snippet_of_nothing_is_empty() {
        assert_eq!(render_snippet(&[], &LINK_ONLY), "");
    }

    #[test]
    fn render_snippet_terminates_every_line() {
        let badges = vec![
            ResolvedBadge {
                title:     "A".to_owned(),
                link_url:  "https://a".to_owned(),
                image_url: "https://a.svg".to_owned()
            },
            ResolvedBadge {
                title:     "B".to_owned(),
                link_url:  "https://b".to_owned(),
                image_url: "https://b.svg".to_owned()
            }
        ];
        assert_eq!(render_snippet(&badges, &LINK_ONLY), "[A](https://a)\n[B](https://b)\n");
    }

    #[test]
    fn builtin_default_snippet_uses_markdown_images() {
        let mut selection = SelectionState::new(Catalog::builtin());
        selection.set_repository("octo/cat");

        let snippet = render_snippet(&compose_enabled(&selection), selection.format());

        assert_eq!(
            snippet,
            "[![Build Status](https://img.shields.io/travis/octo/cat/master.svg?style=flat)](https://travis-ci.org/octo/cat)\n\
             [![Coverage Status](https://img.shields.io/codecov/c/github/octo/cat/master.svg?style=flat)](https://codecov.io/gh/octo/cat)\n"
        );
    }

    #[test]
    fn nothing_enabled_composes_nothing() {
        let catalog = single_service_catalog();
        let mut selection = SelectionState::new(&catalog);
        selection.set_repository("octo/cat");
        selection.toggle_service(0).expect("valid index");

        let badges = compose_enabled(&selection);
        assert!(badges.is_empty());
        assert!(!should_preview(&selection, &badges));
    }

    #[test]
    fn empty_repository_suppresses_preview_but_still_composes() {
        let catalog = single_service_catalog();
        let selection = SelectionState::new(&catalog);

        let badges = compose_enabled(&selection);
        assert_eq!(badges.len(), 1);
        assert_eq!(badges[0].link_url, "https://ci.example/");
        assert!(!should_preview(&selection, &badges));
    }

    #[test]
    fn mutations_are_visible_to_next_composition() {
        let catalog = single_service_catalog();
        let mut selection = SelectionState::new(&catalog);
        selection.set_repository("octo/cat");
        assert!(compose_enabled(&selection)[0].image_url.ends_with("style=flat"));

        selection.set_style("plastic").expect("valid style");
        selection.set_repository("octo/dog");
        let badges = compose_enabled(&selection);
        assert_eq!(badges[0].image_url, "https://ci.example/octo/dog/badge?style=plastic");
        assert!(should_preview(&selection, &badges));
    }

    proptest! {
        #[test]
        fn composition_follows_enabled_flags_in_catalog_order(
            flags in prop::collection::vec(any::<bool>(), 13),
            repository in "[a-z]{1,8}/[a-z]{1,8}"
        ) {
            let catalog = Catalog::builtin();
            prop_assume!(flags.len() == catalog.services().len());
            let mut selection = SelectionState::new(catalog);
            selection.set_repository(repository);
            for (index, enabled) in flags.iter().enumerate() {
                selection.set_service_enabled(index, *enabled).expect("valid index");
            }

            let badges = compose_enabled(&selection);
            let expected: Vec<&str> = catalog
                .services()
                .iter()
                .zip(&flags)
                .filter(|(_, enabled)| **enabled)
                .map(|(service, _)| service.title.as_str())
                .collect();
            let titles: Vec<&str> = badges.iter().map(|badge| badge.title.as_str()).collect();

            prop_assert_eq!(badges.len(), flags.iter().filter(|flag| **flag).count());
            prop_assert_eq!(titles, expected);
            prop_assert_eq!(compose_enabled(&selection), badges);
        }
    }
}
