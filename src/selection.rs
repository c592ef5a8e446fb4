// SPDX-FileCopyrightText: 2025 RAprogramm <andrey.rozanov.vl@gmail.com>
//
// SPDX-License-Identifier: MIT

//! Mutable selection driving badge composition.
//!
//! A [`SelectionState`] belongs to exactly one session and borrows the
//! catalog it was created from. The enabled flags always have one entry per
//! catalog service; they are toggled in place and never resized.

use crate::{
    catalog::{BadgeStyle, Catalog, FormatDefinition},
    error::Error
};

/// User choices applied to a [`Catalog`].
#[derive(Debug, Clone)]
pub struct SelectionState<'c> {
    catalog:      &'c Catalog,
    repository:   String,
    enabled:      Vec<bool>,
    style:        BadgeStyle,
    format_index: usize
}

impl<'c> SelectionState<'c> {
    /// Fresh selection: empty repository, services enabled per their
    /// defaults, default style and default format.
    pub fn new(catalog: &'c Catalog) -> Self {
        Self {
            catalog,
            repository: String::new(),
            enabled: catalog
                .services()
                .iter()
                .map(|service| service.enabled_by_default)
                .collect(),
            style: catalog.default_style(),
            format_index: catalog.default_format_index()
        }
    }

    /// Catalog this selection indexes into.
    pub fn catalog(&self) -> &'c Catalog {
        self.catalog
    }

    /// Current repository identifier, verbatim.
    pub fn repository(&self) -> &str {
        &self.repository
    }

    /// One flag per catalog service, in catalog order.
    pub fn enabled_flags(&self) -> &[bool] {
        &self.enabled
    }

    /// Active style.
    pub fn style(&self) -> BadgeStyle {
        self.style
    }

    /// Index of the active format in the catalog.
    pub fn format_index(&self) -> usize {
        self.format_index
    }

    /// Active format definition. The index is kept in bounds by
    /// [`set_format`](Self::set_format).
    pub fn format(&self) -> &'c FormatDefinition {
        let formats = self.catalog.formats();
        &formats[self.format_index]
    }

    /// Replaces the repository identifier without trimming or validation.
    pub fn set_repository(&mut self, identifier: impl Into<String>) {
        self.repository = identifier.into();
    }

    /// Flips the flag of the service at `index`.
    ///
    /// # Errors
    ///
    /// Returns [`Error::IndexOutOfRange`] when `index` is not a service
    /// index; the flags are left untouched.
    pub fn toggle_service(&mut self, index: usize) -> Result<(), Error> {
        let flag = self.flag_mut(index)?;
        *flag = !*flag;
        Ok(())
    }

    /// Sets the flag of the service at `index` to `enabled`.
    ///
    /// # Errors
    ///
    /// Returns [`Error::IndexOutOfRange`] when `index` is not a service
    /// index.
    pub fn set_service_enabled(&mut self, index: usize, enabled: bool) -> Result<(), Error> {
        *self.flag_mut(index)? = enabled;
        Ok(())
    }

    /// Replaces the active style.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidStyle`] when `style` is not in the catalog.
    pub fn set_style(&mut self, style: &str) -> Result<(), Error> {
        self.style = self.catalog.parse_style(style)?;
        Ok(())
    }

    /// Replaces the active format.
    ///
    /// # Errors
    ///
    /// Returns [`Error::IndexOutOfRange`] when `index` is not a format
    /// index.
    pub fn set_format(&mut self, index: usize) -> Result<(), Error> {
        self.catalog.format(index)?;
        self.format_index = index;
        Ok(())
    }

    fn flag_mut(&mut self, index: usize) -> Result<&mut bool, Error> {
        let len = self.enabled.len();
        self.enabled
            .get_mut(index)
            .ok_or_else(|| Error::index_out_of_range("service", index, len))
    }
}
