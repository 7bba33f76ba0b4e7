//! Console report blocks.

use std::io::{self, Write};

use crate::tables::fields;
use crate::types::{Extraction, PortId, PortSettings};

/// Width of the label column in port blocks.
fn label_width() -> usize {
    fields::PORT_SETTINGS
        .iter()
        .map(|label| label.len())
        .max()
        .unwrap_or(0)
}

/// Writes the settings block for one port.
pub fn write_port_block<W: Write>(
    out: &mut W,
    id: &PortId,
    settings: &PortSettings,
) -> io::Result<()> {
    let width = label_width();

    writeln!(out)?;
    writeln!(out, "PORT[{}]:", id)?;
    for (label, value) in settings.labeled() {
        writeln!(out, "{:<width$}: {}", label, value, width = width)?;
    }
    Ok(())
}

/// Writes the default VLAN block for one port.
pub fn write_vlan_block<W: Write>(out: &mut W, id: &PortId, vlan: i32) -> io::Result<()> {
    writeln!(out)?;
    writeln!(out, "PORT[{}]:", id)?;
    writeln!(out, "VLAN: {}", vlan)
}

/// Writes the extraction result as pretty JSON.
pub fn write_json_summary<W: Write>(out: &mut W, extraction: &Extraction) -> io::Result<()> {
    serde_json::to_writer_pretty(&mut *out, extraction)?;
    writeln!(out)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::SettingValue;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_port_block_layout() {
        let settings = PortSettings {
            up: SettingValue::new("On"),
            auto_negotiation_enabled: SettingValue::new("Off"),
            allowed_speed_10m: SettingValue::new("Off"),
            allowed_speed_100m: SettingValue::new("Off"),
            allowed_speed_1g: SettingValue::new("Off"),
        };

        let mut out = Vec::new();
        write_port_block(&mut out, &PortId::new("4"), &settings).unwrap();

        assert_eq!(
            String::from_utf8(out).unwrap(),
            "\nPORT[4]:\n\
             Up                    : On\n\
             AutoNegotiationEnabled: Off\n\
             AllowedSpeed_10M      : Off\n\
             AllowedSpeed_100M     : Off\n\
             AllowedSpeed_1G       : Off\n"
        );
    }

    #[test]
    fn test_vlan_block_layout() {
        let mut out = Vec::new();
        write_vlan_block(&mut out, &PortId::new("0"), 1).unwrap();
        assert_eq!(String::from_utf8(out).unwrap(), "\nPORT[0]:\nVLAN: 1\n");
    }

    #[test]
    fn test_json_summary() {
        let mut out = Vec::new();
        write_json_summary(&mut out, &Extraction::default()).unwrap();

        let text = String::from_utf8(out).unwrap();
        assert!(text.contains("\"ports\": []"));
        assert!(text.contains("\"vlans\": {}"));
    }
}
