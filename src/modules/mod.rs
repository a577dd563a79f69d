//! Modules layer - Infrastructure components for external integrations
//!
//! Contains the gateway to the external completion provider.

pub mod oracle;
