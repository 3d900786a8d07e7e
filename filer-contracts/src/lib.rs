// SPDX-License-Identifier: GPL-3.0-only

pub mod protocol;
pub mod traits;

pub use protocol::{Oid, OidParseError, TransportError, TransportErrorKind, Value, WalkResult};
pub use traits::DeviceTransport;
