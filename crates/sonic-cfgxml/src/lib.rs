//! Switch configuration extractor for SONiC.
//!
//! This crate reads a switch configuration XML document and extracts two
//! related views of it:
//!
//! - per-port hardware settings (link state, auto-negotiation, allowed
//!   speeds) from the Ports section
//! - the default VLAN of every known port from the defVlans section
//!
//! # Sections
//!
//! | Path | Entry | Fields |
//! |------|-------|--------|
//! | `ControlSystem.Ports` | `@ID` | `Up`, `AutoNegotiationEnabled`, `AllowedSpeed_10M`, `AllowedSpeed_100M`, `AllowedSpeed_1G` |
//! | `ControlSystem.Vlans.defVlans` | `@ID` | `vlan` |
//!
//! # Example
//!
//! ```no_run
//! use sonic_cfgxml::ConfigExtractor;
//!
//! let mut extractor = ConfigExtractor::new(std::io::stdout());
//! let extraction = extractor.run("./test_config.xml")?;
//! println!("{} ports, {} VLANs", extraction.ports.len(), extraction.vlans.len());
//! # Ok::<(), sonic_cfgxml::ExtractError>(())
//! ```

pub mod config;
pub mod document;
pub mod error;
mod extractor;
pub mod report;
pub mod tables;
mod types;

pub use config::ExtractorConfig;
pub use document::{ConfigNode, ConfigTree, Document, FieldError};
pub use error::{ExtractError, ExtractResult};
pub use extractor::ConfigExtractor;
pub use types::{Extraction, PortId, PortSet, PortSettings, SettingValue, VlanMap};
