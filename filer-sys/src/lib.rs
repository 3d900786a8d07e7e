// SPDX-License-Identifier: GPL-3.0-only

//! Low-level system integration for the check-filer probe
//!
//! This crate provides the pieces that touch the host system:
//! - The net-snmp CLI transport (`snmpget` / `snmpwalk` subprocesses)
//! - Loading the host remapping file
//!
//! Everything here is an external collaborator of the evaluation engine and
//! is reached only through the `DeviceTransport` contract or plain values.

pub mod error;
pub mod hostmap;
pub mod netsnmp;

pub use error::{Result, SysError};
pub use hostmap::HostMap;
pub use netsnmp::{NetSnmpCli, SessionConfig, SnmpVersion, parse_output};
