//! In-memory hierarchical store: nested named groups holding datasets.
//!
//! Sibling names are unique, so writing the same subtree twice into one
//! location fails with [`Error::DuplicateGroup`] instead of overwriting.

use std::collections::BTreeMap;
use std::path::Path;

use jp_core::{Error, Result};
use serde::Serialize;
use serde::ser::{SerializeMap, Serializer};

/// A numeric dataset with scalar attributes.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Dataset {
    values: Vec<f64>,
    attributes: BTreeMap<String, f64>,
}

impl Dataset {
    /// Create a dataset without attributes.
    pub fn new(values: Vec<f64>) -> Self {
        Self { values, attributes: BTreeMap::new() }
    }

    /// Builder-style attribute setter.
    pub fn with_attribute(mut self, key: &str, value: f64) -> Self {
        self.attributes.insert(key.to_string(), value);
        self
    }

    /// Dataset values.
    pub fn values(&self) -> &[f64] {
        &self.values
    }

    /// Attribute lookup.
    pub fn attribute(&self, key: &str) -> Option<f64> {
        self.attributes.get(key).copied()
    }
}

#[derive(Debug, Clone, PartialEq)]
enum Node {
    Group(Group),
    Dataset(Dataset),
}

/// A named scope holding child groups and datasets in insertion order.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Group {
    path: String,
    children: Vec<(String, Node)>,
}

impl Group {
    /// Create an empty root group.
    pub fn new() -> Self {
        Self::default()
    }

    /// Absolute path of this group (`""` for the root).
    pub fn path(&self) -> &str {
        &self.path
    }

    fn child_path(&self, name: &str) -> String {
        format!("{}/{}", self.path, name)
    }

    fn check_new_name(&self, name: &str) -> Result<()> {
        if name.is_empty() || name.contains('/') {
            return Err(Error::Validation(format!("invalid child name '{name}'")));
        }
        if self.children.iter().any(|(n, _)| n == name) {
            return Err(Error::DuplicateGroup(self.child_path(name)));
        }
        Ok(())
    }

    /// Create a child group and return it for writing.
    pub fn create_group(&mut self, name: &str) -> Result<&mut Group> {
        self.check_new_name(name)?;
        let group = Group { path: self.child_path(name), children: Vec::new() };
        self.children.push((name.to_string(), Node::Group(group)));
        match self.children.last_mut() {
            Some((_, Node::Group(g))) => Ok(g),
            _ => unreachable!("group was just pushed"),
        }
    }

    /// Add a dataset under this group.
    pub fn create_dataset(&mut self, name: &str, dataset: Dataset) -> Result<()> {
        self.check_new_name(name)?;
        self.children.push((name.to_string(), Node::Dataset(dataset)));
        Ok(())
    }

    /// Names of the direct children, in insertion order.
    pub fn child_names(&self) -> impl Iterator<Item = &str> {
        self.children.iter().map(|(n, _)| n.as_str())
    }

    fn child(&self, name: &str) -> Option<&Node> {
        self.children.iter().find(|(n, _)| n == name).map(|(_, node)| node)
    }

    fn resolve(&self, path: &str) -> Option<&Node> {
        let mut parts = path.split('/').filter(|p| !p.is_empty());
        let mut node = self.child(parts.next()?)?;
        for part in parts {
            match node {
                Node::Group(g) => node = g.child(part)?,
                Node::Dataset(_) => return None,
            }
        }
        Some(node)
    }

    /// Look up a descendant group by slash-separated path.
    pub fn group(&self, path: &str) -> Option<&Group> {
        match self.resolve(path)? {
            Node::Group(g) => Some(g),
            Node::Dataset(_) => None,
        }
    }

    /// Look up a descendant dataset by slash-separated path.
    pub fn dataset(&self, path: &str) -> Option<&Dataset> {
        match self.resolve(path)? {
            Node::Dataset(d) => Some(d),
            Node::Group(_) => None,
        }
    }

    /// Serialize the tree as pretty JSON to `path`.
    pub fn write_json(&self, path: impl AsRef<Path>) -> Result<()> {
        let json = serde_json::to_string_pretty(self)?;
        std::fs::write(path, json)?;
        Ok(())
    }
}

impl Serialize for Group {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.children.len()))?;
        for (name, node) in &self.children {
            match node {
                Node::Group(g) => map.serialize_entry(name, g)?,
                Node::Dataset(d) => map.serialize_entry(name, d)?,
            }
        }
        map.end()
    }
}
