//! Partial pipeline definitions built by the checkpointing parser

use std::collections::BTreeMap;

/// One component occurrence in a pipeline, with the options typed so far
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ComponentUse {
    /// Component name as written
    pub name: String,
    /// Option name to raw value
    pub options: BTreeMap<String, String>,
}

impl ComponentUse {
    /// Create a component use without options
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            options: BTreeMap::new(),
        }
    }

    /// Check whether an option was already supplied
    pub fn has_option(&self, option: &str) -> bool {
        self.options.contains_key(option)
    }

    /// Names of the options already supplied
    pub fn option_names(&self) -> impl Iterator<Item = &str> {
        self.options.keys().map(String::as_str)
    }
}

/// Ordered list of the components committed so far
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PartialDefinition {
    components: Vec<ComponentUse>,
}

impl PartialDefinition {
    /// Create an empty definition
    pub fn new() -> Self {
        Self::default()
    }

    /// All committed components, in pipeline order
    pub fn components(&self) -> &[ComponentUse] {
        &self.components
    }

    /// The last committed component, if any
    pub fn last(&self) -> Option<&ComponentUse> {
        self.components.last()
    }

    pub fn len(&self) -> usize {
        self.components.len()
    }

    pub fn is_empty(&self) -> bool {
        self.components.is_empty()
    }

    /// Definition made of the first `count` components
    ///
    /// Used to ask which categories are valid at a given pipeline position.
    pub fn prefix(&self, count: usize) -> PartialDefinition {
        PartialDefinition {
            components: self.components.iter().take(count).cloned().collect(),
        }
    }

    pub(crate) fn push(&mut self, component: ComponentUse) {
        self.components.push(component);
    }

    pub(crate) fn last_mut(&mut self) -> Option<&mut ComponentUse> {
        self.components.last_mut()
    }
}
