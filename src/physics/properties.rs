use std::collections::HashMap;

use crate::utils::errors::FdmError;

/// Opaque handle to a value in a [`PropertyManager`].
///
/// Handles are only minted by the manager that owns the value, and properties
/// are never removed, so a handle stays valid for the manager's lifetime.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct PropertyNode(usize);

/// Named property tree exposed by a flight dynamics exec.
///
/// Paths follow JSBSim's slash-separated naming, e.g. `position/h-sl-ft` or
/// `gear/unit[1]/WOW`.
#[derive(Debug, Clone, Default)]
pub struct PropertyManager {
    index: HashMap<String, usize>,
    names: Vec<String>,
    values: Vec<f64>,
}

impl PropertyManager {
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a property, or return the existing node if the path is taken.
    pub fn tie(&mut self, path: &str, initial: f64) -> PropertyNode {
        if let Some(&i) = self.index.get(path) {
            return PropertyNode(i);
        }
        let i = self.values.len();
        self.index.insert(path.to_string(), i);
        self.names.push(path.to_string());
        self.values.push(initial);
        PropertyNode(i)
    }

    pub fn get_node(&self, path: &str) -> Option<PropertyNode> {
        self.index.get(path).map(|&i| PropertyNode(i))
    }

    /// Like [`PropertyManager::get_node`] but a missing path is an error.
    pub fn resolve(&self, path: &str) -> Result<PropertyNode, FdmError> {
        self.get_node(path)
            .ok_or_else(|| FdmError::PropertyResolution(path.to_string()))
    }

    pub fn has_node(&self, path: &str) -> bool {
        self.index.contains_key(path)
    }

    pub fn get_double(&self, node: PropertyNode) -> f64 {
        self.values[node.0]
    }

    pub fn set_double(&mut self, node: PropertyNode, value: f64) {
        self.values[node.0] = value;
    }

    pub fn path(&self, node: PropertyNode) -> &str {
        &self.names[node.0]
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }
}
