// SPDX-License-Identifier: GPL-3.0-only

#![allow(dead_code)]

pub mod assertions;
pub mod fixtures;
