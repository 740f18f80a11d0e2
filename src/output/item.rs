//! Item tooltip builder.
//!
//! Reads an item definition (by default `inventories.<node>`), resolves its
//! title and lore, and hands the host an [`ItemDisplay`] to draw. Decorations
//! the pipeline doesn't interpret are passed through untouched.

use std::collections::HashSet;

use serde::Serialize;
use tracing::warn;

use crate::common::error::ConfigError;
use crate::config::{ConfigSection, INVENTORIES_DOCUMENT};
use crate::output::builder::{OutputBuilder, RenderOptions};
use crate::template::formatting::colorize;
use crate::template::Templates;

/// Material used when none is declared or the declared one is unknown.
pub const DEFAULT_MATERIAL: &str = "STONE";

/// Set of material names the host can draw.
#[derive(Debug, Clone, Default)]
pub struct MaterialCatalog {
    known: Option<HashSet<String>>,
}

impl MaterialCatalog {
    /// Accepts any well-formed material identifier.
    pub fn any() -> Self {
        Self { known: None }
    }

    /// Accepts only the given names (case-insensitive).
    pub fn from_names<S: AsRef<str>>(names: impl IntoIterator<Item = S>) -> Self {
        Self {
            known: Some(names.into_iter().map(|n| n.as_ref().to_uppercase()).collect()),
        }
    }

    /// Normalised name if `name` is a valid material.
    pub fn lookup(&self, name: &str) -> Option<String> {
        let name = name.trim().to_uppercase();
        let well_formed = !name.is_empty()
            && name.chars().all(|c| c.is_ascii_uppercase() || c.is_ascii_digit() || c == '_');
        match &self.known {
            _ if !well_formed => None,
            Some(known) if !known.contains(&name) => None,
            _ => Some(name),
        }
    }
}

/// A resolved item ready for the host to draw.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ItemDisplay {
    pub material: String,
    pub title: String,
    pub lore: Vec<String>,
    pub glowing: bool,
    pub enchantments: Vec<(String, i64)>,
    pub attributes: Vec<(String, f64)>,
    pub item_flags: Vec<String>,
    pub material_meta: Option<serde_yaml::Value>,
}

#[derive(Debug, Clone)]
enum Source {
    Node(String),
    Section(ConfigSection),
}

/// Builder for item tooltips.
#[derive(Debug, Clone)]
pub struct ItemBuilder {
    source: Source,
    options: RenderOptions,
    additional_lore: Vec<String>,
    glowing: Option<bool>,
}

impl ItemBuilder {
    /// Item defined at `node` of the `inventories` document.
    pub fn new(node: impl Into<String>) -> Self {
        Self::from_source(Source::Node(node.into()))
    }

    /// Item defined by an explicit section.
    pub fn from_section(section: ConfigSection) -> Self {
        Self::from_source(Source::Section(section))
    }

    fn from_source(source: Source) -> Self {
        Self {
            source,
            options: RenderOptions::default(),
            additional_lore: Vec::new(),
            glowing: None,
        }
    }

    /// Append lines after the configured lore.
    pub fn with_additional_lore<S: Into<String>>(mut self, lines: impl IntoIterator<Item = S>) -> Self {
        self.additional_lore.extend(lines.into_iter().map(Into::into));
        self
    }

    pub fn with_additional_lore_if<S: Into<String>>(
        self,
        condition: bool,
        lines: impl IntoIterator<Item = S>,
    ) -> Self {
        if condition {
            self.with_additional_lore(lines)
        } else {
            self
        }
    }

    /// Make the item glow, unless its section sets `glowing: false`.
    pub fn glowing_if(mut self, glowing: bool) -> Self {
        self.glowing = Some(glowing);
        self
    }

    /// The item's section, or the inline error title when it is missing.
    fn section(&self, templates: &Templates) -> Result<ConfigSection, String> {
        match &self.source {
            Source::Section(section) => Ok(section.clone()),
            Source::Node(node) => {
                let document = templates.document(INVENTORIES_DOCUMENT);
                document.section(node).ok_or_else(|| {
                    let missing = ConfigError::MissingSection {
                        document: INVENTORIES_DOCUMENT.to_string(),
                        path: node.clone(),
                    };
                    warn!("{}", missing);
                    format!("Error {}", document.qualified(node))
                })
            }
        }
    }

    fn missing(title: String) -> ItemDisplay {
        ItemDisplay {
            material: DEFAULT_MATERIAL.to_string(),
            title,
            lore: Vec::new(),
            glowing: false,
            enchantments: Vec::new(),
            attributes: Vec::new(),
            item_flags: Vec::new(),
            material_meta: None,
        }
    }

    fn resolve(&self, templates: &Templates, raw: &str) -> String {
        let resolved = templates.resolver().resolve(
            raw,
            &self.options.locals,
            self.options.default_value.as_ref(),
        );
        colorize(&resolved)
    }

    /// Build the item display.
    ///
    /// A missing section yields a `STONE` item titled `Error <document>.<node>`.
    pub fn build(&self, templates: &Templates, catalog: &MaterialCatalog) -> ItemDisplay {
        let section = match self.section(templates) {
            Ok(section) => section,
            Err(title) => return Self::missing(title),
        };

        let declared = section.string("material", DEFAULT_MATERIAL);
        let resolved = templates.resolver().resolve(
            &declared,
            &self.options.locals,
            self.options.default_value.as_ref(),
        );
        let material = catalog.lookup(&resolved).unwrap_or_else(|| {
            warn!(
                "Unknown material '{}' at {}, using {}",
                resolved,
                section.qualified("material"),
                DEFAULT_MATERIAL
            );
            DEFAULT_MATERIAL.to_string()
        });

        let mut lore = section.string_list("lore");
        if lore.is_empty() {
            lore = section.string_list("description");
        }
        lore.extend(self.additional_lore.iter().cloned());
        let lore: Vec<String> = lore
            .iter()
            .flat_map(|line| {
                self.resolve(templates, line)
                    .split('\n')
                    .map(str::to_string)
                    .collect::<Vec<_>>()
            })
            .collect();

        let glowing = section.boolean("glowing", false)
            || (section.boolean("glowing", true) && self.glowing.unwrap_or(false));

        let enchantments: Vec<(String, i64)> = section
            .section("enchantments")
            .map(|s| {
                s.keys()
                    .into_iter()
                    .map(|name| {
                        let level = s.int(&name, 1);
                        (name.to_uppercase(), level)
                    })
                    .collect()
            })
            .unwrap_or_default();
        let attributes: Vec<(String, f64)> = section
            .section("attributes")
            .map(|s| {
                s.keys()
                    .into_iter()
                    .map(|name| {
                        let amount = s.float(&name, 0.0);
                        (name.to_uppercase(), amount)
                    })
                    .collect()
            })
            .unwrap_or_default();
        let item_flags: Vec<String> = section
            .string_list("itemflags")
            .into_iter()
            .map(|flag| flag.to_uppercase())
            .collect();
        let material_meta = section.section("material-meta").map(|s| s.value().clone());

        ItemDisplay {
            material,
            title: self.resolve(templates, &section.string("title", "")),
            lore,
            glowing,
            enchantments,
            attributes,
            item_flags,
            material_meta,
        }
    }
}

impl OutputBuilder for ItemBuilder {
    fn options(&self) -> &RenderOptions {
        &self.options
    }

    fn options_mut(&mut self) -> &mut RenderOptions {
        &mut self.options
    }
}
