// SPDX-FileCopyrightText: 2025 Hyperpolymath
// SPDX-License-Identifier: Apache-2.0

//! Test harness for contact relay abuse simulation.
//!
//! This module drives the full router with a recording mail transport and
//! provides traffic generators and outcome metrics for simulating floods,
//! form-filling bots and spam campaigns.

#![allow(dead_code)]

pub mod app;
pub mod attacks;
pub mod generators;
pub mod metrics;
