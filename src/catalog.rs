// SPDX-FileCopyrightText: 2025 RAprogramm <andrey.rozanov.vl@gmail.com>
//
// SPDX-License-Identifier: MIT

//! Static catalogs of badge services, visual styles and snippet formats.
//!
//! Catalogs are immutable once constructed. [`Catalog::builtin`] exposes the
//! process-wide default tables; custom service lists are validated through
//! [`Catalog::new`] or [`Catalog::with_services`] before any selection state
//! can be derived from them.

use std::{collections::HashSet, fmt, str::FromStr, sync::LazyLock};

use serde::Serialize;

use crate::{error::Error, key::service_key, preview::escape_attribute, template};

/// Visual themes supported by the badge image providers.
///
/// The declaration order is the catalog order; the first entry is the
/// default style.
#[derive(Debug, Serialize, Clone, Copy, PartialEq, Eq, Hash)]
#[serde(rename_all = "kebab-case")]
pub enum BadgeStyle {
    /// Flat badges with rounded corners.
    Flat,
    /// Flat badges with square corners.
    FlatSquare,
    /// Glossy badges with a gradient.
    Plastic,
    /// Large badges with uppercase text.
    ForTheBadge,
    /// GitHub-like social badges.
    Social
}

impl BadgeStyle {
    /// Every style in catalog order.
    pub const ALL: [BadgeStyle; 5] = [
        BadgeStyle::Flat,
        BadgeStyle::FlatSquare,
        BadgeStyle::Plastic,
        BadgeStyle::ForTheBadge,
        BadgeStyle::Social
    ];

    /// Identifier used in the `style` query parameter.
    pub const fn as_str(self) -> &'static str {
        match self {
            BadgeStyle::Flat => "flat",
            BadgeStyle::FlatSquare => "flat-square",
            BadgeStyle::Plastic => "plastic",
            BadgeStyle::ForTheBadge => "for-the-badge",
            BadgeStyle::Social => "social"
        }
    }

    /// Human readable label, e.g. `Flat square` for `flat-square`.
    pub fn label(self) -> String {
        let spaced = self.as_str().replace('-', " ");
        let mut characters = spaced.chars();
        match characters.next() {
            Some(first) => first.to_uppercase().chain(characters).collect(),
            None => String::new()
        }
    }
}

impl fmt::Display for BadgeStyle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for BadgeStyle {
    type Err = Error;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        BadgeStyle::ALL
            .into_iter()
            .find(|style| style.as_str() == value)
            .ok_or_else(|| Error::InvalidStyle {
                style: value.to_owned()
            })
    }
}

/// Catalog entry describing one badge provider.
#[derive(Debug, Serialize, Clone, PartialEq, Eq)]
pub struct ServiceDefinition {
    /// Stable display name, also the source of the service key.
    pub name:               String,
    /// Label used as link title and image alt text.
    pub title:              String,
    /// Template of the URL the badge links to.
    pub link_url_template:  String,
    /// Template of the badge image URL.
    pub image_url_template: String,
    /// Whether fresh selections enable the service.
    pub enabled_by_default: bool
}

impl ServiceDefinition {
    /// Key derived from [`name`](Self::name), e.g. `travis-ci`.
    pub fn key(&self) -> Option<String> {
        service_key(&self.name)
    }
}

/// Signature shared by snippet renderers: `(title, link_url, image_url)`.
pub type RenderFn = fn(&str, &str, &str) -> String;

/// Catalog entry describing one snippet syntax.
#[derive(Debug, Clone, Copy)]
pub struct FormatDefinition {
    /// Stable identifier, e.g. `markdown`.
    pub identifier: &'static str,
    /// Human readable label.
    pub label:      &'static str,
    /// Marks the format selected by fresh selections.
    pub is_default: bool,
    /// Renders a single badge.
    pub render:     RenderFn
}

impl FormatDefinition {
    /// Renders one badge with this format.
    pub fn render(&self, title: &str, link_url: &str, image_url: &str) -> String {
        (self.render)(title, link_url, image_url)
    }
}

/// Validated aggregate of the service, style and format catalogs.
#[derive(Debug, Clone)]
pub struct Catalog {
    services:       Vec<ServiceDefinition>,
    styles:         Vec<BadgeStyle>,
    formats:        Vec<FormatDefinition>,
    default_format: usize
}

static BUILTIN: LazyLock<Catalog> = LazyLock::new(|| {
    Catalog::from_parts(builtin_services(), BadgeStyle::ALL.to_vec(), BUILTIN_FORMATS.to_vec())
});

impl Catalog {
    /// Builds a catalog after checking its invariants.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Validation`] when a service has an empty name or
    /// title, a template carries an unrecognized placeholder, two services
    /// share a key, the style list is empty or repeats a style, or the format
    /// list does not contain exactly one default.
    pub fn new(
        services: Vec<ServiceDefinition>,
        styles: Vec<BadgeStyle>,
        formats: Vec<FormatDefinition>
    ) -> Result<Self, Error> {
        validate_services(&services)?;
        validate_styles(&styles)?;
        validate_formats(&formats)?;
        Ok(Self::from_parts(services, styles, formats))
    }

    /// Builds a catalog from custom services and the built-in styles and
    /// formats.
    ///
    /// # Errors
    ///
    /// Same conditions as [`Catalog::new`].
    pub fn with_services(services: Vec<ServiceDefinition>) -> Result<Self, Error> {
        Self::new(services, BadgeStyle::ALL.to_vec(), BUILTIN_FORMATS.to_vec())
    }

    /// Process-wide built-in catalog.
    pub fn builtin() -> &'static Catalog {
        &BUILTIN
    }

    fn from_parts(
        services: Vec<ServiceDefinition>,
        styles: Vec<BadgeStyle>,
        formats: Vec<FormatDefinition>
    ) -> Self {
        let default_format = formats
            .iter()
            .position(|format| format.is_default)
            .unwrap_or(0);
        Self {
            services,
            styles,
            formats,
            default_format
        }
    }

    /// Services in declaration order.
    pub fn services(&self) -> &[ServiceDefinition] {
        &self.services
    }

    /// Styles in declaration order.
    pub fn styles(&self) -> &[BadgeStyle] {
        &self.styles
    }

    /// Formats in declaration order.
    pub fn formats(&self) -> &[FormatDefinition] {
        &self.formats
    }

    /// Style selected by fresh selections.
    pub fn default_style(&self) -> BadgeStyle {
        self.styles.first().copied().unwrap_or(BadgeStyle::Flat)
    }

    /// Index of the format flagged as default.
    pub fn default_format_index(&self) -> usize {
        self.default_format
    }

    /// Format at `index`.
    ///
    /// # Errors
    ///
    /// Returns [`Error::IndexOutOfRange`] when `index` is past the end.
    pub fn format(&self, index: usize) -> Result<&FormatDefinition, Error> {
        self.formats
            .get(index)
            .ok_or_else(|| Error::index_out_of_range("format", index, self.formats.len()))
    }

    /// Parses `value` into a style that belongs to this catalog.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidStyle`] for identifiers outside the catalog.
    pub fn parse_style(&self, value: &str) -> Result<BadgeStyle, Error> {
        let style: BadgeStyle = value.parse()?;
        if self.styles.contains(&style) {
            Ok(style)
        } else {
            Err(Error::InvalidStyle {
                style: value.to_owned()
            })
        }
    }

    /// Index of the service whose key equals `key`.
    ///
    /// # Errors
    ///
    /// Returns [`Error::UnknownService`] when no service matches.
    pub fn find_service(&self, key: &str) -> Result<usize, Error> {
        self.services
            .iter()
            .position(|service| service.key().as_deref() == Some(key))
            .ok_or_else(|| Error::UnknownService {
                key: key.to_owned()
            })
    }

    /// Index of the format whose identifier equals `identifier`.
    ///
    /// # Errors
    ///
    /// Returns [`Error::UnknownFormat`] when no format matches.
    pub fn find_format(&self, identifier: &str) -> Result<usize, Error> {
        self.formats
            .iter()
            .position(|format| format.identifier == identifier)
            .ok_or_else(|| Error::UnknownFormat {
                identifier: identifier.to_owned()
            })
    }
}

fn validate_services(services: &[ServiceDefinition]) -> Result<(), Error> {
    let mut seen_keys = HashSet::with_capacity(services.len());

    for service in services {
        if service.name.trim().is_empty() {
            return Err(Error::validation("service name must not be empty"));
        }
        if service.title.trim().is_empty() {
            return Err(Error::validation(format!(
                "service '{}' must have a title",
                service.name
            )));
        }

        for url_template in [&service.link_url_template, &service.image_url_template] {
            if let Some(token) = template::unrecognized_placeholders(url_template).first() {
                return Err(Error::validation(format!(
                    "service '{}' uses unrecognized placeholder {token}",
                    service.name
                )));
            }
        }

        let key = service.key().ok_or_else(|| {
            Error::validation(format!(
                "unable to derive a key for service '{}'",
                service.name
            ))
        })?;
        if !seen_keys.insert(key.clone()) {
            return Err(Error::validation(format!("duplicate service key '{key}'")));
        }
    }

    Ok(())
}

fn validate_styles(styles: &[BadgeStyle]) -> Result<(), Error> {
    if styles.is_empty() {
        return Err(Error::validation("catalog must include at least one style"));
    }

    let mut seen = HashSet::with_capacity(styles.len());
    for style in styles {
        if !seen.insert(*style) {
            return Err(Error::validation(format!("duplicate style '{style}'")));
        }
    }

    Ok(())
}

fn validate_formats(formats: &[FormatDefinition]) -> Result<(), Error> {
    let defaults = formats.iter().filter(|format| format.is_default).count();
    if defaults != 1 {
        return Err(Error::validation(format!(
            "catalog must flag exactly one default format, found {defaults}"
        )));
    }

    let mut seen = HashSet::with_capacity(formats.len());
    for format in formats {
        if !seen.insert(format.identifier) {
            return Err(Error::validation(format!(
                "duplicate format '{}'",
                format.identifier
            )));
        }
    }

    Ok(())
}

struct ServiceSeed {
    name:    &'static str,
    title:   &'static str,
    link:    &'static str,
    image:   &'static str,
    enabled: bool
}

const BUILTIN_SERVICES: [ServiceSeed; 13] = [
    ServiceSeed {
        name:    "Travis CI",
        title:   "Build Status",
        link:    "https://travis-ci.org/{repository}",
        image:   "https://img.shields.io/travis/{repository}/{branch}.svg",
        enabled: true
    },
    ServiceSeed {
        name:    "AppVeyor",
        title:   "Windows Build Status",
        link:    "https://ci.appveyor.com/project/{repository}",
        image:   "https://img.shields.io/appveyor/ci/{repository}/{branch}.svg",
        enabled: false
    },
    ServiceSeed {
        name:    "Codecov",
        title:   "Coverage Status",
        link:    "https://codecov.io/gh/{repository}",
        image:   "https://img.shields.io/codecov/c/github/{repository}/{branch}.svg",
        enabled: true
    },
    ServiceSeed {
        name:    "Coveralls",
        title:   "Coverage Status",
        link:    "https://coveralls.io/github/{repository}?branch={branch}",
        image:   "https://img.shields.io/coveralls/github/{repository}/{branch}.svg",
        enabled: false
    },
    ServiceSeed {
        name:    "npm version",
        title:   "npm Version",
        link:    "https://www.npmjs.com/package/{repository}",
        image:   "https://img.shields.io/npm/v/{repository}.svg",
        enabled: false
    },
    ServiceSeed {
        name:    "npm downloads",
        title:   "npm Downloads",
        link:    "https://www.npmjs.com/package/{repository}",
        image:   "https://img.shields.io/npm/dm/{repository}.svg",
        enabled: false
    },
    ServiceSeed {
        name:    "crates.io version",
        title:   "Crate Version",
        link:    "https://crates.io/crates/{repository}",
        image:   "https://img.shields.io/crates/v/{repository}.svg",
        enabled: false
    },
    ServiceSeed {
        name:    "docs.rs",
        title:   "Documentation",
        link:    "https://docs.rs/{repository}",
        image:   "https://img.shields.io/docsrs/{repository}.svg",
        enabled: false
    },
    ServiceSeed {
        name:    "GitHub license",
        title:   "License",
        link:    "https://github.com/{repository}/blob/{branch}/LICENSE",
        image:   "https://img.shields.io/github/license/{repository}.svg",
        enabled: false
    },
    ServiceSeed {
        name:    "GitHub release",
        title:   "Latest Release",
        link:    "https://github.com/{repository}/releases/latest",
        image:   "https://img.shields.io/github/release/{repository}.svg",
        enabled: false
    },
    ServiceSeed {
        name:    "GitHub stars",
        title:   "GitHub Stars",
        link:    "https://github.com/{repository}/stargazers",
        image:   "https://img.shields.io/github/stars/{repository}.svg",
        enabled: false
    },
    ServiceSeed {
        name:    "GitHub issues",
        title:   "Open Issues",
        link:    "https://github.com/{repository}/issues",
        image:   "https://img.shields.io/github/issues/{repository}.svg",
        enabled: false
    },
    ServiceSeed {
        name:    "Libraries.io dependencies",
        title:   "Dependency Status",
        link:    "https://libraries.io/github/{repository}",
        image:   "https://img.shields.io/librariesio/github/{repository}.svg",
        enabled: false
    }
];

fn builtin_services() -> Vec<ServiceDefinition> {
    BUILTIN_SERVICES
        .iter()
        .map(|seed| ServiceDefinition {
            name:               seed.name.to_owned(),
            title:              seed.title.to_owned(),
            link_url_template:  seed.link.to_owned(),
            image_url_template: seed.image.to_owned(),
            enabled_by_default: seed.enabled
        })
        .collect()
}

const BUILTIN_FORMATS: [FormatDefinition; 7] = [
    FormatDefinition {
        identifier: "markdown",
        label:      "Markdown",
        is_default: true,
        render:     render_markdown
    },
    FormatDefinition {
        identifier: "html",
        label:      "HTML",
        is_default: false,
        render:     render_html
    },
    FormatDefinition {
        identifier: "rst",
        label:      "reStructuredText",
        is_default: false,
        render:     render_rst
    },
    FormatDefinition {
        identifier: "asciidoc",
        label:      "AsciiDoc",
        is_default: false,
        render:     render_asciidoc
    },
    FormatDefinition {
        identifier: "textile",
        label:      "Textile",
        is_default: false,
        render:     render_textile
    },
    FormatDefinition {
        identifier: "rdoc",
        label:      "RDoc",
        is_default: false,
        render:     render_rdoc
    },
    FormatDefinition {
        identifier: "pod",
        label:      "Perl POD",
        is_default: false,
        render:     render_pod
    }
];

fn render_markdown(title: &str, link_url: &str, image_url: &str) -> String {
    format!("[![{title}]({image_url})]({link_url})")
}

fn render_html(title: &str, link_url: &str, image_url: &str) -> String {
    html_anchor(title, link_url, image_url)
}

fn render_rst(title: &str, link_url: &str, image_url: &str) -> String {
    format!(".. image:: {image_url}\n   :target: {link_url}\n   :alt: {title}")
}

fn render_asciidoc(title: &str, link_url: &str, image_url: &str) -> String {
    format!("image:{image_url}[\"{title}\", link=\"{link_url}\"]")
}

fn render_textile(title: &str, link_url: &str, image_url: &str) -> String {
    format!("!{image_url}({title})!:{link_url}")
}

fn render_rdoc(title: &str, link_url: &str, image_url: &str) -> String {
    format!("{{<img src=\"{image_url}\" alt=\"{title}\" />}}[{link_url}]")
}

fn render_pod(title: &str, link_url: &str, image_url: &str) -> String {
    format!("=for html {}", html_anchor(title, link_url, image_url))
}

fn html_anchor(title: &str, link_url: &str, image_url: &str) -> String {
    format!(
        "<a href=\"{}\"><img src=\"{}\" alt=\"{}\"></a>",
        escape_attribute(link_url),
        escape_attribute(image_url),
        escape_attribute(title)
    )
}
