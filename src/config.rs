// SPDX-FileCopyrightText: 2025 RAprogramm <andrey.rozanov.vl@gmail.com>
//
// SPDX-License-Identifier: MIT

//! YAML documents describing custom service catalogs.
//!
//! The document lists services in the order they should appear. Styles and
//! formats always come from the built-in tables.

use std::{fs, path::Path};

use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use crate::{
    catalog::{Catalog, ServiceDefinition},
    error::{self, Error}
};

/// Root document of a custom service catalog.
///
/// # Examples
///
/// ```
/// use badgegen::CatalogDocument;
///
/// let yaml = r#"
/// services:
///   - name: Build
///     url: https://ci.example/{repository}
///     image_url: https://ci.example/{repository}.svg
/// "#;
/// let document: CatalogDocument = serde_yaml::from_str(yaml).expect("valid document");
/// assert_eq!(document.services.len(), 1);
/// ```
#[derive(Debug, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct CatalogDocument {
    /// Services in display order.
    #[serde(default)]
    pub services: Vec<ServiceEntry>
}

/// Raw service entry before validation.
#[derive(Debug, Deserialize, Serialize, Clone)]
#[serde(deny_unknown_fields)]
pub struct ServiceEntry {
    /// Display name; the service key is derived from it.
    pub name: String,

    /// Optional label, defaults to the name.
    #[serde(default)]
    pub title: Option<String>,

    /// Link target template.
    #[serde(alias = "link", alias = "link_url", alias = "linkUrl")]
    pub url: String,

    /// Badge image template.
    #[serde(alias = "image", alias = "imageUrl")]
    pub image_url: String,

    /// Whether fresh selections enable the service.
    #[serde(default, alias = "default", alias = "enabled_by_default")]
    pub enabled: bool
}

impl ServiceEntry {
    /// Converts the entry into a catalog definition.
    ///
    /// A missing or blank title falls back to the trimmed name.
    pub fn into_definition(self) -> ServiceDefinition {
        let title = match self.title {
            Some(title) if !title.trim().is_empty() => title,
            _ => self.name.trim().to_owned()
        };

        ServiceDefinition {
            name: self.name,
            title,
            link_url_template: self.url,
            image_url_template: self.image_url,
            enabled_by_default: self.enabled
        }
    }
}

/// Loads a service catalog from the YAML file at `path`.
///
/// # Errors
///
/// Returns [`Error::Io`] when the file cannot be read and the errors of
/// [`parse_catalog`] otherwise.
pub fn load_catalog(path: &Path) -> Result<Catalog, Error> {
    info!("Reading service catalog from {}", path.display());
    let contents = fs::read_to_string(path).map_err(|source| error::io_error(path, source))?;
    parse_catalog(&contents)
}

/// Parses and validates a service catalog from a YAML string.
///
/// # Errors
///
/// Returns [`Error::Parse`] when the YAML cannot be decoded,
/// [`Error::Validation`] when the document lists no services or violates a
/// catalog invariant.
pub fn parse_catalog(contents: &str) -> Result<Catalog, Error> {
    let document: CatalogDocument = serde_yaml::from_str(contents)?;
    if document.services.is_empty() {
        return Err(Error::validation("catalog must include at least one service"));
    }

    debug!("Validating {} catalog services", document.services.len());
    let services = document
        .services
        .into_iter()
        .map(ServiceEntry::into_definition)
        .collect();

    Catalog::with_services(services)
}
