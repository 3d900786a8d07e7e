// SPDX-License-Identifier: GPL-3.0-only

pub mod transport;

pub use transport::DeviceTransport;
