//! Navigable configuration tree.
//!
//! The extractor never touches the markup parser directly. It walks
//! [`ConfigNode`]s through the [`Document`] trait, addressing sections and
//! fields by dotted path. [`ConfigTree`] is the concrete document, built
//! from XML with `roxmltree` and then owned outright so no borrow of the
//! source text outlives loading.

use std::fs;
use std::path::Path;
use std::str::FromStr;

use thiserror::Error;
use tracing::debug;

use crate::error::{ExtractError, ExtractResult};

/// Failure to read a typed field from a node.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum FieldError {
    /// No element at the field path.
    #[error("field not found")]
    Missing,
    /// The element text does not parse as the requested type.
    #[error("cannot convert '{value}' to {expected}")]
    Invalid {
        /// The element text, trimmed.
        value: String,
        /// Name of the requested type.
        expected: &'static str,
    },
}

impl FieldError {
    /// Attaches the port and field the lookup was made for.
    pub fn into_extract_error(self, port: &str, field: &str) -> ExtractError {
        match self {
            FieldError::Missing => ExtractError::missing_field(port, field),
            FieldError::Invalid { value, expected } => ExtractError::InvalidField {
                port: port.to_string(),
                field: field.to_string(),
                value,
                expected,
            },
        }
    }
}

/// An element of the configuration tree.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ConfigNode {
    name: String,
    attributes: Vec<(String, String)>,
    text: String,
    children: Vec<ConfigNode>,
}

impl ConfigNode {
    /// Creates an element with no attributes, text or children.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Default::default()
        }
    }

    /// Adds an attribute.
    pub fn with_attribute(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.attributes.push((name.into(), value.into()));
        self
    }

    /// Sets the element text.
    pub fn with_text(mut self, text: impl Into<String>) -> Self {
        self.text = text.into();
        self
    }

    /// Adds a child element holding only text.
    pub fn with_field(self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.with_child(ConfigNode::new(name).with_text(value))
    }

    /// Adds a child element.
    pub fn with_child(mut self, child: ConfigNode) -> Self {
        self.children.push(child);
        self
    }

    /// Element tag name.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Element text exactly as written, empty when the element has none.
    pub fn text(&self) -> &str {
        &self.text
    }

    /// Child elements in document order.
    pub fn children(&self) -> &[ConfigNode] {
        &self.children
    }

    /// Value of the first attribute called `name`.
    pub fn attribute(&self, name: &str) -> Option<&str> {
        self.attributes
            .iter()
            .find(|(n, _)| n == name)
            .map(|(_, v)| v.as_str())
    }

    /// First child element called `name`.
    pub fn child(&self, name: &str) -> Option<&ConfigNode> {
        self.children.iter().find(|c| c.name == name)
    }

    /// Descendant addressed by a dotted path relative to this node.
    pub fn find(&self, path: &str) -> Option<&ConfigNode> {
        path.split('.')
            .try_fold(self, |node, segment| node.child(segment))
    }

    /// Text of the descendant at `path`.
    pub fn field(&self, path: &str) -> Option<&str> {
        self.find(path).map(ConfigNode::text)
    }

    /// Text of the descendant at `path`, trimmed and parsed as `T`.
    pub fn field_as<T: FromStr>(&self, path: &str) -> Result<T, FieldError> {
        let value = self.field(path).ok_or(FieldError::Missing)?.trim();
        value.parse().map_err(|_| FieldError::Invalid {
            value: value.to_string(),
            expected: std::any::type_name::<T>(),
        })
    }

    fn from_xml(node: roxmltree::Node<'_, '_>) -> Self {
        let text: String = node
            .children()
            .filter(|c| c.is_text())
            .filter_map(|c| c.text())
            .collect();

        Self {
            name: node.tag_name().name().to_string(),
            attributes: node
                .attributes()
                .map(|a| (a.name().to_string(), a.value().to_string()))
                .collect(),
            text,
            children: node
                .children()
                .filter(|c| c.is_element())
                .map(ConfigNode::from_xml)
                .collect(),
        }
    }
}

/// A parsed configuration document addressable by dotted path.
pub trait Document {
    /// The document's root element, if any.
    fn root(&self) -> Option<&ConfigNode>;

    /// Element children of the node at `path`.
    ///
    /// The first path segment must name the root element. Returns `None`
    /// when any segment does not resolve.
    fn children(&self, path: &str) -> Option<&[ConfigNode]> {
        let root = self.root()?;
        let (head, rest) = match path.split_once('.') {
            Some((head, rest)) => (head, Some(rest)),
            None => (path, None),
        };

        if root.name() != head {
            return None;
        }

        let node = match rest {
            Some(rest) => root.find(rest)?,
            None => root,
        };
        Some(node.children())
    }
}

/// Owned configuration tree.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ConfigTree {
    root: Option<ConfigNode>,
}

impl ConfigTree {
    /// The tree of a document that failed to load; every lookup misses.
    pub fn empty() -> Self {
        Self::default()
    }

    /// Wraps an already built root element.
    pub fn from_root(root: ConfigNode) -> Self {
        Self { root: Some(root) }
    }

    /// Parses XML text.
    pub fn parse(text: &str) -> Result<Self, roxmltree::Error> {
        let doc = roxmltree::Document::parse(text)?;
        Ok(Self::from_root(ConfigNode::from_xml(doc.root_element())))
    }

    /// Reads and parses the document at `path`.
    pub fn load(path: impl AsRef<Path>) -> ExtractResult<Self> {
        let path = path.as_ref();

        let text = fs::read_to_string(path).map_err(|source| ExtractError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        debug!("Read {} bytes from {}", text.len(), path.display());

        Self::parse(&text).map_err(|source| ExtractError::Xml {
            path: path.to_path_buf(),
            source,
        })
    }

    /// Returns true if this is the failed-load sentinel.
    pub fn is_empty(&self) -> bool {
        self.root.is_none()
    }
}

impl Document for ConfigTree {
    fn root(&self) -> Option<&ConfigNode> {
        self.root.as_ref()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    const XML: &str = r#"<?xml version="1.0" encoding="UTF-8"?>
<ControlSystem>
    <!-- port table -->
    <Ports>
        <Port ID="0">
            <Up> On </Up>
            <Speed/>
        </Port>
        <Port ID="1">
            <Up>Off</Up>
        </Port>
    </Ports>
    <Vlans>
        <defVlans>
            <defVlan ID="0"><vlan>12</vlan></defVlan>
        </defVlans>
    </Vlans>
</ControlSystem>"#;

    #[test]
    fn test_parse_children() {
        let tree = ConfigTree::parse(XML).unwrap();

        let ports = tree.children("ControlSystem.Ports").unwrap();
        assert_eq!(ports.len(), 2);
        assert_eq!(ports[0].attribute("ID"), Some("0"));
        assert_eq!(ports[1].attribute("ID"), Some("1"));

        let vlans = tree.children("ControlSystem.Vlans.defVlans").unwrap();
        assert_eq!(vlans.len(), 1);
    }

    #[test]
    fn test_text_is_kept_verbatim() {
        let tree = ConfigTree::parse(XML).unwrap();
        let ports = tree.children("ControlSystem.Ports").unwrap();

        assert_eq!(ports[0].field("Up"), Some(" On "));
        assert_eq!(ports[1].field("Up"), Some("Off"));
        assert_eq!(ports[0].field("Speed"), Some(""));
        assert_eq!(ports[1].field("Speed"), None);
    }

    #[test]
    fn test_unresolved_path() {
        let tree = ConfigTree::parse(XML).unwrap();

        assert!(tree.children("ControlSystem.Lags").is_none());
        assert!(tree.children("Other.Ports").is_none());
        assert_eq!(tree.children("ControlSystem").unwrap().len(), 2);
    }

    #[test]
    fn test_field_as() {
        let tree = ConfigTree::parse(XML).unwrap();
        let vlans = tree.children("ControlSystem.Vlans.defVlans").unwrap();

        assert_eq!(vlans[0].field_as::<i32>("vlan"), Ok(12));
        assert_eq!(vlans[0].field_as::<i32>("pvid"), Err(FieldError::Missing));

        let node = ConfigNode::new("defVlan").with_field("vlan", "ten");
        assert!(matches!(
            node.field_as::<i32>("vlan"),
            Err(FieldError::Invalid { ref value, .. }) if value == "ten"
        ));
    }

    #[test]
    fn test_field_as_trims_whitespace() {
        let tree = ConfigTree::parse("<defVlan ID=\"0\"><vlan>\n  42\n</vlan></defVlan>").unwrap();
        let root = tree.root().unwrap();

        assert_eq!(root.field("vlan"), Some("\n  42\n"));
        assert_eq!(root.field_as::<i32>("vlan"), Ok(42));

        let node = ConfigNode::new("defVlan").with_field("vlan", " x ");
        assert_eq!(
            node.field_as::<i32>("vlan"),
            Err(FieldError::Invalid {
                value: "x".to_string(),
                expected: "i32",
            })
        );
    }

    #[test]
    fn test_nested_field_path() {
        let node = ConfigNode::new("Port")
            .with_child(ConfigNode::new("Speed").with_field("Max", "1G"));
        assert_eq!(node.field("Speed.Max"), Some("1G"));
        assert_eq!(node.field("Speed.Min"), None);
    }

    #[test]
    fn test_empty_tree() {
        let tree = ConfigTree::empty();
        assert!(tree.is_empty());
        assert!(tree.children("ControlSystem.Ports").is_none());
    }

    #[test]
    fn test_malformed_xml() {
        assert!(ConfigTree::parse("<ControlSystem><Ports></ControlSystem>").is_err());
    }

    #[test]
    fn test_load_missing_file() {
        let err = ConfigTree::load("/nonexistent/test_config.xml").unwrap_err();
        assert!(matches!(err, ExtractError::Io { .. }));
    }

    #[test]
    fn test_field_error_mapping() {
        let err = FieldError::Missing.into_extract_error("4", "Up");
        assert!(matches!(err, ExtractError::MissingField { .. }));

        let err = FieldError::Invalid {
            value: "x".to_string(),
            expected: "i32",
        }
        .into_extract_error("4", "vlan");
        assert!(matches!(err, ExtractError::InvalidField { .. }));
    }
}
