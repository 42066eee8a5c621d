// Copyright 2026, Jeroen van Erp <jeroen@geeko.me>
// SPDX-License-Identifier: Apache-2.0

//! Typed custom resources owned by the metering operator.

pub mod metering_config;

pub use metering_config::{MeteringConfig, MeteringConfigSpec};
