//! Component and option metadata consulted by recovery strategies
//!
//! Completion never owns metadata: it asks three collaborators, each behind a
//! trait object so hosts can back them with anything from a static catalog to
//! a live component registry.
//!
//! - [`ComponentRegistry`]: resolves a component name within a category
//! - [`OptionMetadataResolver`]: lists a component's option groups
//! - [`CategoryResolver`]: which categories are valid at a pipeline position
//!
//! [`Lookups`] bundles the three and adds the position-aware helpers the
//! strategies share.

mod catalog;

pub use catalog::Catalog;

use std::fmt;
use std::sync::Arc;

use serde::{Deserialize, Serialize};

use crate::parser::{ComponentUse, PartialDefinition};

/// Kind of component, deciding where it may appear in a pipeline
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ComponentCategory {
    /// Produces messages; first stage only
    Source,
    /// Transforms messages between two stages
    Processor,
    /// Consumes messages; nothing may follow it
    Sink,
    /// Standalone application, valid at any position
    App,
}

impl ComponentCategory {
    pub fn as_str(self) -> &'static str {
        match self {
            ComponentCategory::Source => "source",
            ComponentCategory::Processor => "processor",
            ComponentCategory::Sink => "sink",
            ComponentCategory::App => "app",
        }
    }

    /// Check whether another stage may follow a component of this category
    pub fn accepts_downstream(self) -> bool {
        !matches!(self, ComponentCategory::Sink)
    }
}

impl fmt::Display for ComponentCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A registered component
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ComponentDescriptor {
    pub name: String,
    pub category: ComponentCategory,
    /// Where the component's option metadata comes from, if anywhere
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub metadata: Option<String>,
}

impl ComponentDescriptor {
    pub fn new(name: impl Into<String>, category: ComponentCategory) -> Self {
        Self {
            name: name.into(),
            category,
            metadata: None,
        }
    }

    pub fn with_metadata(mut self, metadata: impl Into<String>) -> Self {
        self.metadata = Some(metadata.into());
        self
    }
}

/// A configuration option a component accepts
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OptionDescriptor {
    /// Fully qualified dotted id, e.g. `format.type`
    pub id: String,
    /// Group id; empty for the root group
    pub group: String,
    pub description: String,
    pub deprecated: bool,
    pub default_value: Option<String>,
    /// Suggested values
    pub hints: Vec<String>,
}

impl OptionDescriptor {
    /// Create an option whose group is derived from its id
    pub fn new(id: impl Into<String>, description: impl Into<String>) -> Self {
        let id = id.into();
        Self {
            group: parent_group(&id).to_string(),
            id,
            description: description.into(),
            deprecated: false,
            default_value: None,
            hints: Vec::new(),
        }
    }

    pub fn with_group(mut self, group: impl Into<String>) -> Self {
        self.group = group.into();
        self
    }

    pub fn with_default(mut self, value: impl Into<String>) -> Self {
        self.default_value = Some(value.into());
        self
    }

    pub fn with_hints<I, S>(mut self, hints: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.hints = hints.into_iter().map(Into::into).collect();
        self
    }

    pub fn deprecated(mut self) -> Self {
        self.deprecated = true;
        self
    }
}

/// Id of the group an option id belongs to: everything before its last dot
///
/// # Examples
///
/// ```
/// use pipeline_complete::metadata::parent_group;
///
/// assert_eq!(parent_group("server.ssl.enabled"), "server.ssl");
/// assert_eq!(parent_group("port"), "");
/// ```
pub fn parent_group(id: &str) -> &str {
    id.rfind('.').map_or("", |dot| &id[..dot])
}

/// Options sharing a dotted id prefix
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OptionGroup {
    /// Group id; empty for the root group
    pub id: String,
    pub options: Vec<OptionDescriptor>,
}

/// Resolves component names against the set of registered components
pub trait ComponentRegistry: Send + Sync {
    /// Look up a component by exact name within one category
    fn resolve(&self, name: &str, category: ComponentCategory) -> Option<ComponentDescriptor>;

    /// Every registered component, in registration order
    fn components(&self) -> Vec<ComponentDescriptor>;
}

/// Extracts option descriptors from a component's metadata
pub trait OptionMetadataResolver: Send + Sync {
    /// Option groups of a component; empty when metadata is unavailable
    fn list_option_groups(&self, component: &ComponentDescriptor) -> Vec<OptionGroup>;
}

/// Decides which component categories may appear next in a definition
pub trait CategoryResolver: Send + Sync {
    /// Candidate categories for the component following `definition`, in
    /// preference order
    fn candidate_categories(&self, definition: &PartialDefinition) -> Vec<ComponentCategory>;
}

/// Position rule of stream definitions: sources and apps start a pipeline,
/// processors, sinks and apps follow a pipe
#[derive(Debug, Clone, Copy, Default)]
pub struct StagePositionCategories;

impl CategoryResolver for StagePositionCategories {
    fn candidate_categories(&self, definition: &PartialDefinition) -> Vec<ComponentCategory> {
        if definition.is_empty() {
            vec![ComponentCategory::Source, ComponentCategory::App]
        } else {
            vec![
                ComponentCategory::Processor,
                ComponentCategory::Sink,
                ComponentCategory::App,
            ]
        }
    }
}

/// The metadata collaborators shared by every strategy
#[derive(Clone)]
pub struct Lookups {
    registry: Arc<dyn ComponentRegistry>,
    options: Arc<dyn OptionMetadataResolver>,
    categories: Arc<dyn CategoryResolver>,
}

impl Lookups {
    pub fn new(
        registry: Arc<dyn ComponentRegistry>,
        options: Arc<dyn OptionMetadataResolver>,
        categories: Arc<dyn CategoryResolver>,
    ) -> Self {
        Self {
            registry,
            options,
            categories,
        }
    }

    /// Use a catalog as both registry and option resolver, with the stage
    /// position rule for categories
    pub fn from_catalog(catalog: Catalog) -> Self {
        let catalog = Arc::new(catalog);
        Self::new(
            catalog.clone(),
            catalog,
            Arc::new(StagePositionCategories),
        )
    }

    pub fn registry(&self) -> &dyn ComponentRegistry {
        self.registry.as_ref()
    }

    /// Categories valid for the component following `definition`
    pub fn candidate_categories(&self, definition: &PartialDefinition) -> Vec<ComponentCategory> {
        self.categories.candidate_categories(definition)
    }

    /// Registered components valid after `definition`, without duplicate names
    ///
    /// A name registered under several valid categories is reported once, in
    /// the first category that accepts it.
    pub fn components_at(&self, definition: &PartialDefinition) -> Vec<ComponentDescriptor> {
        let categories = self.candidate_categories(definition);
        let mut seen = std::collections::HashSet::new();
        let mut found = Vec::new();

        for category in &categories {
            for component in self.registry.components() {
                if component.category == *category && seen.insert(component.name.clone()) {
                    found.push(component);
                }
            }
        }
        found
    }

    /// Resolve a component name as if it followed `definition`
    ///
    /// # Arguments
    /// * `name` - Component name as typed
    /// * `definition` - Components preceding it
    ///
    /// # Returns
    /// * `Option<ComponentDescriptor>` - First match in candidate category order
    pub fn resolve_at(
        &self,
        name: &str,
        definition: &PartialDefinition,
    ) -> Option<ComponentDescriptor> {
        self.candidate_categories(definition)
            .into_iter()
            .find_map(|category| self.registry.resolve(name, category))
    }

    /// Resolve the last component of a definition at its own position
    pub fn resolve_last(&self, definition: &PartialDefinition) -> Option<ComponentDescriptor> {
        let last = definition.last()?;
        self.resolve_at(&last.name, &definition.prefix(definition.len() - 1))
    }

    pub fn option_groups(&self, component: &ComponentDescriptor) -> Vec<OptionGroup> {
        self.options.list_option_groups(component)
    }

    /// Options of a component that have not been supplied yet
    ///
    /// # Arguments
    /// * `descriptor` - Resolved component
    /// * `used` - The component occurrence holding the options typed so far
    /// * `include_deprecated` - Whether deprecated options are offered
    pub fn unused_options(
        &self,
        descriptor: &ComponentDescriptor,
        used: &ComponentUse,
        include_deprecated: bool,
    ) -> Vec<OptionDescriptor> {
        self.option_groups(descriptor)
            .into_iter()
            .flat_map(|group| group.options)
            .filter(|option| include_deprecated || !option.deprecated)
            .filter(|option| !used.has_option(&option.id))
            .collect()
    }
}

impl fmt::Debug for Lookups {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Lookups")
            .field("components", &self.registry.components().len())
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::parser::Parser;

    fn lookups() -> Lookups {
        Lookups::from_catalog(Catalog::builtin().unwrap())
    }

    #[test]
    fn test_stage_position_categories() {
        let rule = StagePositionCategories;
        let empty = PartialDefinition::new();
        assert_eq!(
            rule.candidate_categories(&empty),
            vec![ComponentCategory::Source, ComponentCategory::App]
        );

        let definition = Parser::parse_finished("http").unwrap();
        assert!(
            !rule
                .candidate_categories(&definition)
                .contains(&ComponentCategory::Source)
        );
    }

    #[test]
    fn test_resolve_depends_on_position() {
        let lookups = lookups();
        let first = lookups.resolve_at("file", &PartialDefinition::new()).unwrap();
        assert_eq!(first.category, ComponentCategory::Source);

        let after = Parser::parse_finished("http").unwrap();
        let later = lookups.resolve_at("file", &after).unwrap();
        assert_eq!(later.category, ComponentCategory::Sink);

        assert!(lookups.resolve_at("log", &PartialDefinition::new()).is_none());
    }

    #[test]
    fn test_resolve_last() {
        let lookups = lookups();
        let definition = Parser::parse_finished("http | file").unwrap();
        let last = lookups.resolve_last(&definition).unwrap();
        assert_eq!(last.name, "file");
        assert_eq!(last.category, ComponentCategory::Sink);

        assert!(lookups.resolve_last(&PartialDefinition::new()).is_none());
    }

    #[test]
    fn test_components_at_filters_categories() {
        let lookups = lookups();
        let names: Vec<String> = lookups
            .components_at(&Parser::parse_finished("http").unwrap())
            .into_iter()
            .map(|c| c.name)
            .collect();
        assert!(names.contains(&"filter".to_string()));
        assert!(names.contains(&"log".to_string()));
        assert!(!names.contains(&"http".to_string()));
        assert!(!names.contains(&"fileset".to_string()));
    }

    #[test]
    fn test_unused_options_skip_used_and_deprecated() {
        let lookups = lookups();
        let definition = Parser::parse_finished("http --port=9000").unwrap();
        let descriptor = lookups.resolve_last(&definition).unwrap();
        let used = definition.last().unwrap();

        let ids: Vec<String> = lookups
            .unused_options(&descriptor, used, false)
            .into_iter()
            .map(|o| o.id)
            .collect();
        assert!(!ids.contains(&"port".to_string()));
        assert!(!ids.contains(&"legacy-mode".to_string()));
        assert!(ids.contains(&"format.type".to_string()));

        let with_deprecated = lookups.unused_options(&descriptor, used, true);
        assert!(with_deprecated.iter().any(|o| o.id == "legacy-mode"));
    }

    #[test]
    fn test_parent_group() {
        assert_eq!(parent_group("format.type"), "format");
        assert_eq!(parent_group("a.b.c"), "a.b");
        assert_eq!(parent_group("plain"), "");
    }

    #[test]
    fn test_sink_refuses_downstream() {
        assert!(!ComponentCategory::Sink.accepts_downstream());
        assert!(ComponentCategory::App.accepts_downstream());
    }
}
