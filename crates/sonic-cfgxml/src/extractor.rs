//! ConfigExtractor implementation - the port and default VLAN extractor.

use std::io::Write;
use std::path::Path;

use tracing::{debug, error, info, instrument, trace};

use crate::config::SectionConfig;
use crate::document::{ConfigNode, ConfigTree, Document};
use crate::error::{ExtractError, ExtractResult};
use crate::report;
use crate::tables::{fields, ID_ATTRIBUTE};
use crate::types::{Extraction, PortId, PortSet, PortSettings, SettingValue, VlanMap};

/// Switch configuration extractor.
///
/// Walks the Ports and default VLAN sections of a loaded document,
/// writing one report block per extracted entry to the output sink:
/// 1. Ports are collected with their settings
/// 2. Default VLANs are collected for known ports only
///
/// A malformed entry stops the walk of its section. Everything collected
/// before it is kept, and the failure is logged and recorded.
pub struct ConfigExtractor<W: Write> {
    /// Section paths to walk.
    sections: SectionConfig,

    /// Report sink.
    out: W,

    /// Non-fatal failures reported during the run.
    errors: Vec<ExtractError>,
}

impl<W: Write> ConfigExtractor<W> {
    /// Creates an extractor for the default section layout.
    pub fn new(out: W) -> Self {
        Self {
            sections: SectionConfig::default(),
            out,
            errors: Vec::new(),
        }
    }

    /// Overrides the section paths.
    pub fn with_sections(mut self, sections: SectionConfig) -> Self {
        self.sections = sections;
        self
    }

    /// Loads the document at `path`.
    ///
    /// On failure the error is logged and recorded and the empty tree is
    /// returned, so later extraction simply finds nothing.
    #[instrument(skip(self, path), fields(path = %path.as_ref().display()))]
    pub fn load_document(&mut self, path: impl AsRef<Path>) -> ConfigTree {
        match ConfigTree::load(path.as_ref()) {
            Ok(tree) => {
                info!("Loaded {}", path.as_ref().display());
                tree
            }
            Err(e) => {
                error!("{}", e);
                self.errors.push(e);
                ConfigTree::empty()
            }
        }
    }

    /// Extracts the set of ports and reports each port's settings.
    #[instrument(skip_all, fields(section = %self.sections.ports_path))]
    pub fn extract_ports<D: Document + ?Sized>(&mut self, doc: &D) -> PortSet {
        let mut ports = PortSet::new();

        if let Err(e) = self.collect_ports(doc, &mut ports) {
            error!("Get ports failed! Error: {}", e);
            self.errors.push(e);
        }

        info!("Extracted {} ports", ports.len());
        ports
    }

    /// Extracts default VLANs of the given ports and reports each one.
    ///
    /// Entries for ports outside `ports` are skipped without a report.
    #[instrument(skip_all, fields(section = %self.sections.vlans_path))]
    pub fn extract_vlans<D: Document + ?Sized>(&mut self, doc: &D, ports: &PortSet) -> VlanMap {
        let mut vlans = VlanMap::new();

        if let Err(e) = self.collect_vlans(doc, ports, &mut vlans) {
            error!("Get vlans failed! Error: {}", e);
            self.errors.push(e);
        }

        info!("Extracted {} default VLANs", vlans.len());
        vlans
    }

    /// Loads the document and runs both extractions.
    ///
    /// # Errors
    ///
    /// * `PortsNotFound` - no ports were extracted
    /// * `VlansNotFound` - no default VLANs were extracted for the ports
    pub fn run(&mut self, path: impl AsRef<Path>) -> ExtractResult<Extraction> {
        let doc = self.load_document(path);

        let ports = self.extract_ports(&doc);
        if ports.is_empty() {
            return Err(ExtractError::PortsNotFound);
        }

        let vlans = self.extract_vlans(&doc, &ports);
        if vlans.is_empty() {
            return Err(ExtractError::VlansNotFound);
        }

        Ok(Extraction { ports, vlans })
    }

    /// Failures reported so far.
    pub fn errors(&self) -> &[ExtractError] {
        &self.errors
    }

    /// Section paths in use.
    pub fn sections(&self) -> &SectionConfig {
        &self.sections
    }

    /// Consumes the extractor, returning the report sink.
    pub fn into_inner(self) -> W {
        self.out
    }

    fn collect_ports<D: Document + ?Sized>(
        &mut self,
        doc: &D,
        ports: &mut PortSet,
    ) -> ExtractResult<()> {
        let section = &self.sections.ports_path;
        let entries = doc
            .children(section)
            .ok_or_else(|| ExtractError::section_not_found(section.as_str()))?;

        for (index, entry) in entries.iter().enumerate() {
            let id = entry
                .attribute(ID_ATTRIBUTE)
                .ok_or_else(|| ExtractError::missing_attribute(section.as_str(), index, ID_ATTRIBUTE))?;
            let settings = read_port_settings(entry, id)?;
            let id = PortId::new(id);

            if !ports.insert(id.clone()) {
                debug!("Port {} listed more than once", id);
            }

            report::write_port_block(&mut self.out, &id, &settings)?;
            debug!(
                port = %id,
                up = ?settings.is_up(),
                speeds = ?settings.allowed_speeds(),
                "Port extracted"
            );
        }

        Ok(())
    }

    fn collect_vlans<D: Document + ?Sized>(
        &mut self,
        doc: &D,
        ports: &PortSet,
        vlans: &mut VlanMap,
    ) -> ExtractResult<()> {
        let section = &self.sections.vlans_path;
        let entries = doc
            .children(section)
            .ok_or_else(|| ExtractError::section_not_found(section.as_str()))?;

        for (index, entry) in entries.iter().enumerate() {
            let id = entry
                .attribute(ID_ATTRIBUTE)
                .ok_or_else(|| ExtractError::missing_attribute(section.as_str(), index, ID_ATTRIBUTE))?;

            if !ports.contains(id) {
                trace!("Skipping default VLAN of unknown port {}", id);
                continue;
            }

            let vlan: i32 = entry
                .field_as(fields::VLAN)
                .map_err(|e| e.into_extract_error(id, fields::VLAN))?;
            let port = PortId::new(id);

            report::write_vlan_block(&mut self.out, &port, vlan)?;

            // Single-valued map: a shared VLAN keeps only the latest port.
            if let Some(previous) = vlans.insert(vlan, port) {
                debug!("VLAN {} reassigned from port {} to port {}", vlan, previous, id);
            }
        }

        Ok(())
    }
}

fn read_port_settings(entry: &ConfigNode, id: &str) -> ExtractResult<PortSettings> {
    let read = |field: &str| {
        entry
            .field(field)
            .map(SettingValue::new)
            .ok_or_else(|| ExtractError::missing_field(id, field))
    };

    Ok(PortSettings {
        up: read(fields::UP)?,
        auto_negotiation_enabled: read(fields::AUTO_NEGOTIATION_ENABLED)?,
        allowed_speed_10m: read(fields::ALLOWED_SPEED_10M)?,
        allowed_speed_100m: read(fields::ALLOWED_SPEED_100M)?,
        allowed_speed_1g: read(fields::ALLOWED_SPEED_1G)?,
    })
}
