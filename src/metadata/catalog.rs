//! TOML-backed component catalog
//!
//! ```toml
//! [[component]]
//! name = "http"
//! category = "source"
//!
//! [[component.option]]
//! id = "format.type"
//! description = "Payload format"
//! default = "text"
//! hints = ["text", "json"]
//! ```
//!
//! An option's group defaults to its id without the last segment.

use std::collections::HashMap;
use std::fs;
use std::path::Path;

use serde::Deserialize;
use tracing::debug;

use super::{
    ComponentCategory, ComponentDescriptor, ComponentRegistry, OptionDescriptor, OptionGroup,
    OptionMetadataResolver,
};
use crate::error::{CatalogError, Result};

const BUILTIN_CATALOG: &str = include_str!("builtin_catalog.toml");

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
struct CatalogFile {
    #[serde(default, rename = "component")]
    components: Vec<ComponentEntry>,
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
struct ComponentEntry {
    name: String,
    category: ComponentCategory,
    #[serde(default)]
    metadata: Option<String>,
    #[serde(default, rename = "option")]
    options: Vec<OptionEntry>,
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
struct OptionEntry {
    id: String,
    #[serde(default)]
    group: Option<String>,
    #[serde(default)]
    description: String,
    #[serde(default)]
    deprecated: bool,
    #[serde(default)]
    default: Option<String>,
    #[serde(default)]
    hints: Vec<String>,
}

impl From<OptionEntry> for OptionDescriptor {
    fn from(entry: OptionEntry) -> Self {
        let mut option = OptionDescriptor::new(entry.id, entry.description).with_hints(entry.hints);
        if let Some(group) = entry.group {
            option = option.with_group(group);
        }
        if let Some(default) = entry.default {
            option = option.with_default(default);
        }
        option.deprecated = entry.deprecated;
        option
    }
}

/// In-memory component registry and option resolver
#[derive(Debug, Clone, Default)]
pub struct Catalog {
    components: Vec<ComponentDescriptor>,
    options: HashMap<(String, ComponentCategory), Vec<OptionDescriptor>>,
}

impl Catalog {
    /// Create an empty catalog
    pub fn new() -> Self {
        Self::default()
    }

    /// Catalog of the components shipped with the crate
    pub fn builtin() -> Result<Self> {
        Self::from_toml_str(BUILTIN_CATALOG)
    }

    /// Parse a catalog from TOML text
    ///
    /// # Arguments
    /// * `content` - Catalog document
    ///
    /// # Returns
    /// * `Result<Catalog>` - Loaded catalog, or the first validation error
    pub fn from_toml_str(content: &str) -> Result<Self> {
        let file: CatalogFile =
            toml::from_str(content).map_err(|e| CatalogError::InvalidFormat(e.to_string()))?;

        let mut catalog = Self::new();
        for entry in file.components {
            let mut descriptor = ComponentDescriptor::new(entry.name, entry.category);
            descriptor.metadata = entry.metadata;
            let options = entry.options.into_iter().map(OptionDescriptor::from).collect();
            catalog.add_component(descriptor, options)?;
        }
        Ok(catalog)
    }

    /// Load a catalog file
    ///
    /// # Arguments
    /// * `path` - Path to a TOML catalog
    ///
    /// # Returns
    /// * `Result<Catalog>` - Loaded catalog or error
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        if !path.exists() {
            return Err(CatalogError::FileNotFound(path.display().to_string()).into());
        }

        let content = fs::read_to_string(path)?;
        let catalog = Self::from_toml_str(&content)?;
        debug!(
            "Loaded {} components from catalog {}",
            catalog.len(),
            path.display()
        );
        Ok(catalog)
    }

    /// Register a component together with its options
    ///
    /// # Arguments
    /// * `descriptor` - Component to register
    /// * `options` - Options it accepts, in display order
    ///
    /// # Returns
    /// * `Result<()>` - Error on empty identifiers or a duplicate (name, category)
    pub fn add_component(
        &mut self,
        descriptor: ComponentDescriptor,
        options: Vec<OptionDescriptor>,
    ) -> Result<()> {
        if descriptor.name.trim().is_empty() {
            return Err(CatalogError::EmptyIdentifier {
                component: String::new(),
            }
            .into());
        }
        if options.iter().any(|option| option.id.trim().is_empty()) {
            return Err(CatalogError::EmptyIdentifier {
                component: descriptor.name,
            }
            .into());
        }

        let key = (descriptor.name.clone(), descriptor.category);
        if self.options.contains_key(&key) {
            return Err(CatalogError::DuplicateComponent {
                name: descriptor.name,
                category: descriptor.category.to_string(),
            }
            .into());
        }

        self.options.insert(key, options);
        self.components.push(descriptor);
        Ok(())
    }

    pub fn len(&self) -> usize {
        self.components.len()
    }

    pub fn is_empty(&self) -> bool {
        self.components.is_empty()
    }

    /// Options registered for a component, in declaration order
    pub fn options_of(&self, name: &str, category: ComponentCategory) -> &[OptionDescriptor] {
        self.options
            .get(&(name.to_string(), category))
            .map(Vec::as_slice)
            .unwrap_or_default()
    }
}

impl ComponentRegistry for Catalog {
    fn resolve(&self, name: &str, category: ComponentCategory) -> Option<ComponentDescriptor> {
        self.components
            .iter()
            .find(|c| c.name == name && c.category == category)
            .cloned()
    }

    fn components(&self) -> Vec<ComponentDescriptor> {
        self.components.clone()
    }
}

impl OptionMetadataResolver for Catalog {
    fn list_option_groups(&self, component: &ComponentDescriptor) -> Vec<OptionGroup> {
        let mut groups: Vec<OptionGroup> = Vec::new();

        for option in self.options_of(&component.name, component.category) {
            match groups.iter_mut().find(|g| g.id == option.group) {
                Some(group) => group.options.push(option.clone()),
                None => groups.push(OptionGroup {
                    id: option.group.clone(),
                    options: vec![option.clone()],
                }),
            }
        }
        groups
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::PipelineError;
    use std::io::Write;
    use tempfile::NamedTempFile;

    #[test]
    fn test_builtin_catalog_loads() {
        let catalog = Catalog::builtin().unwrap();
        assert!(!catalog.is_empty());
        assert!(catalog.resolve("http", ComponentCategory::Source).is_some());
        assert!(catalog.resolve("http", ComponentCategory::Sink).is_none());
        assert!(catalog.resolve("file", ComponentCategory::Sink).is_some());
    }

    #[test]
    fn test_groups_follow_dotted_ids() {
        let catalog = Catalog::builtin().unwrap();
        let http = catalog.resolve("http", ComponentCategory::Source).unwrap();
        let groups = catalog.list_option_groups(&http);

        let ids: Vec<&str> = groups.iter().map(|g| g.id.as_str()).collect();
        assert_eq!(ids, vec!["", "format", "server.ssl"]);

        let format = groups.iter().find(|g| g.id == "format").unwrap();
        assert_eq!(format.options.len(), 2);
        assert_eq!(format.options[0].hints, vec!["text", "json"]);
        assert_eq!(format.options[0].default_value.as_deref(), Some("text"));
    }

    #[test]
    fn test_explicit_group_overrides_derived_one() {
        let catalog = Catalog::from_toml_str(
            r#"
            [[component]]
            name = "jdbc"
            category = "sink"

            [[component.option]]
            id = "url"
            group = "datasource"
            "#,
        )
        .unwrap();
        let jdbc = catalog.resolve("jdbc", ComponentCategory::Sink).unwrap();
        let groups = catalog.list_option_groups(&jdbc);
        assert_eq!(groups[0].id, "datasource");
    }

    #[test]
    fn test_duplicate_component_rejected() {
        let result = Catalog::from_toml_str(
            r#"
            [[component]]
            name = "log"
            category = "sink"

            [[component]]
            name = "log"
            category = "sink"
            "#,
        );
        assert!(matches!(
            result,
            Err(PipelineError::Catalog(CatalogError::DuplicateComponent { .. }))
        ));
    }

    #[test]
    fn test_same_name_in_two_categories_allowed() {
        let mut catalog = Catalog::new();
        catalog
            .add_component(ComponentDescriptor::new("file", ComponentCategory::Source), vec![])
            .unwrap();
        catalog
            .add_component(ComponentDescriptor::new("file", ComponentCategory::Sink), vec![])
            .unwrap();
        assert_eq!(catalog.len(), 2);
    }

    #[test]
    fn test_empty_option_id_rejected() {
        let result = Catalog::from_toml_str(
            r#"
            [[component]]
            name = "log"
            category = "sink"

            [[component.option]]
            id = ""
            "#,
        );
        assert!(matches!(
            result,
            Err(PipelineError::Catalog(CatalogError::EmptyIdentifier { .. }))
        ));
    }

    #[test]
    fn test_unknown_category_is_format_error() {
        let result = Catalog::from_toml_str(
            r#"
            [[component]]
            name = "log"
            category = "widget"
            "#,
        );
        assert!(matches!(
            result,
            Err(PipelineError::Catalog(CatalogError::InvalidFormat(_)))
        ));
    }

    #[test]
    fn test_load_from_file() {
        let mut file = NamedTempFile::new().unwrap();
        writeln!(
            file,
            "[[component]]\nname = \"counter\"\ncategory = \"processor\"\nmetadata = \"jar:counter\""
        )
        .unwrap();

        let catalog = Catalog::load(file.path()).unwrap();
        let counter = catalog.resolve("counter", ComponentCategory::Processor).unwrap();
        assert_eq!(counter.metadata.as_deref(), Some("jar:counter"));
    }

    #[test]
    fn test_load_missing_file() {
        let result = Catalog::load("/nonexistent/catalog.toml");
        assert!(matches!(
            result,
            Err(PipelineError::Catalog(CatalogError::FileNotFound(_)))
        ));
    }
}
