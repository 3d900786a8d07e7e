// SPDX-License-Identifier: GPL-3.0-only

pub mod error;
pub mod oid;
pub mod value;
pub mod walk;

pub use error::{TransportError, TransportErrorKind};
pub use oid::{Oid, OidParseError};
pub use value::Value;
pub use walk::WalkResult;
