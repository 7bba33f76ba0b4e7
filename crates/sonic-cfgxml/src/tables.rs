//! Section paths and field names of the switch configuration document.
//!
//! Paths are dotted; the first segment names the document's root element.

/// Default location of the switch configuration document.
pub const DEFAULT_INPUT_PATH: &str = "./test_config.xml";

/// Section holding one entry per switch port.
pub const PORTS_SECTION: &str = "ControlSystem.Ports";

/// Section holding one default VLAN entry per port.
pub const VLANS_SECTION: &str = "ControlSystem.Vlans.defVlans";

/// Attribute naming the port an entry belongs to.
pub const ID_ATTRIBUTE: &str = "ID";

/// Field names used in section entries.
pub mod fields {
    /// Link state (Ports).
    pub const UP: &str = "Up";

    /// Auto-negotiation flag (Ports).
    pub const AUTO_NEGOTIATION_ENABLED: &str = "AutoNegotiationEnabled";

    /// 10 Mbit/s speed allowed (Ports).
    pub const ALLOWED_SPEED_10M: &str = "AllowedSpeed_10M";

    /// 100 Mbit/s speed allowed (Ports).
    pub const ALLOWED_SPEED_100M: &str = "AllowedSpeed_100M";

    /// 1 Gbit/s speed allowed (Ports).
    pub const ALLOWED_SPEED_1G: &str = "AllowedSpeed_1G";

    /// Default VLAN number (defVlans).
    pub const VLAN: &str = "vlan";

    /// Port setting fields in report order.
    pub const PORT_SETTINGS: [&str; 5] = [
        UP,
        AUTO_NEGOTIATION_ENABLED,
        ALLOWED_SPEED_10M,
        ALLOWED_SPEED_100M,
        ALLOWED_SPEED_1G,
    ];
}
