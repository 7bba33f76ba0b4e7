//! Type definitions for extracted port and VLAN data.

use serde::ser::SerializeSeq;
use serde::{Serialize, Serializer};
use std::borrow::Borrow;
use std::collections::{BTreeMap, HashSet};
use std::fmt;

use crate::tables::fields;

/// Identifier of a switch port, taken verbatim from an entry's `ID`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
#[serde(transparent)]
pub struct PortId(String);

impl PortId {
    /// Creates a port identifier.
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    /// Returns the identifier as a string slice.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for PortId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl Borrow<str> for PortId {
    fn borrow(&self) -> &str {
        &self.0
    }
}

impl From<&str> for PortId {
    fn from(id: &str) -> Self {
        Self::new(id)
    }
}

/// A port setting exactly as written in the document.
///
/// The raw token is what gets reported; [`SettingValue::as_bool`] is only
/// an interpretation of it.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default, Serialize)]
#[serde(transparent)]
pub struct SettingValue(String);

impl SettingValue {
    /// Wraps a raw token.
    pub fn new(raw: impl Into<String>) -> Self {
        Self(raw.into())
    }

    /// The raw token.
    pub fn raw(&self) -> &str {
        &self.0
    }

    /// Interprets the token as a switch flag.
    ///
    /// Returns `None` for tokens that are not a recognised on/off spelling.
    pub fn as_bool(&self) -> Option<bool> {
        match self.0.to_lowercase().as_str() {
            "on" | "true" | "yes" | "enabled" | "1" => Some(true),
            "off" | "false" | "no" | "disabled" | "0" => Some(false),
            _ => None,
        }
    }
}

impl fmt::Display for SettingValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Hardware settings of one port.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize)]
pub struct PortSettings {
    /// Link state.
    pub up: SettingValue,
    /// Auto-negotiation enabled.
    pub auto_negotiation_enabled: SettingValue,
    /// 10 Mbit/s allowed.
    pub allowed_speed_10m: SettingValue,
    /// 100 Mbit/s allowed.
    pub allowed_speed_100m: SettingValue,
    /// 1 Gbit/s allowed.
    pub allowed_speed_1g: SettingValue,
}

impl PortSettings {
    /// Label/value pairs in report order.
    pub fn labeled(&self) -> [(&'static str, &SettingValue); 5] {
        [
            (fields::UP, &self.up),
            (fields::AUTO_NEGOTIATION_ENABLED, &self.auto_negotiation_enabled),
            (fields::ALLOWED_SPEED_10M, &self.allowed_speed_10m),
            (fields::ALLOWED_SPEED_100M, &self.allowed_speed_100m),
            (fields::ALLOWED_SPEED_1G, &self.allowed_speed_1g),
        ]
    }

    /// Link state as a flag, if recognisable.
    pub fn is_up(&self) -> Option<bool> {
        self.up.as_bool()
    }

    /// Speeds whose setting reads as enabled.
    pub fn allowed_speeds(&self) -> Vec<&'static str> {
        [
            ("10M", &self.allowed_speed_10m),
            ("100M", &self.allowed_speed_100m),
            ("1G", &self.allowed_speed_1g),
        ]
        .into_iter()
        .filter(|(_, v)| v.as_bool() == Some(true))
        .map(|(label, _)| label)
        .collect()
    }
}

/// Set of known ports, enumerated in document order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PortSet {
    order: Vec<PortId>,
    members: HashSet<PortId>,
}

impl PortSet {
    /// Creates an empty set.
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a port. Returns false if it was already present.
    pub fn insert(&mut self, id: PortId) -> bool {
        if self.members.contains(&id) {
            return false;
        }
        self.members.insert(id.clone());
        self.order.push(id);
        true
    }

    /// Returns true if the port is a member.
    pub fn contains(&self, id: &str) -> bool {
        self.members.contains(id)
    }

    /// Ports in document order.
    pub fn iter(&self) -> impl Iterator<Item = &PortId> {
        self.order.iter()
    }

    /// Number of ports.
    pub fn len(&self) -> usize {
        self.order.len()
    }

    /// Returns true if no ports are known.
    pub fn is_empty(&self) -> bool {
        self.order.is_empty()
    }
}

impl<'a> FromIterator<&'a str> for PortSet {
    fn from_iter<I: IntoIterator<Item = &'a str>>(iter: I) -> Self {
        let mut set = PortSet::new();
        for id in iter {
            set.insert(PortId::from(id));
        }
        set
    }
}

impl Serialize for PortSet {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut seq = serializer.serialize_seq(Some(self.order.len()))?;
        for id in &self.order {
            seq.serialize_element(id)?;
        }
        seq.end()
    }
}

/// Default VLAN number to port mapping.
///
/// Single-valued: when several ports share a default VLAN, the port
/// inserted last is the one kept.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct VlanMap(BTreeMap<i32, PortId>);

impl VlanMap {
    /// Creates an empty map.
    pub fn new() -> Self {
        Self::default()
    }

    /// Assigns `vlan` to `port`, returning the port it replaced.
    pub fn insert(&mut self, vlan: i32, port: PortId) -> Option<PortId> {
        self.0.insert(vlan, port)
    }

    /// Port holding `vlan`.
    pub fn get(&self, vlan: i32) -> Option<&PortId> {
        self.0.get(&vlan)
    }

    /// Entries in ascending VLAN order.
    pub fn iter(&self) -> impl Iterator<Item = (i32, &PortId)> {
        self.0.iter().map(|(vlan, port)| (*vlan, port))
    }

    /// Ports present as values.
    pub fn ports(&self) -> impl Iterator<Item = &PortId> {
        self.0.values()
    }

    /// Number of distinct VLANs.
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Returns true if the map is empty.
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

/// Result of a complete extraction run.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct Extraction {
    /// Ports found in the Ports section.
    pub ports: PortSet,
    /// Default VLANs of those ports.
    pub vlans: VlanMap,
}
