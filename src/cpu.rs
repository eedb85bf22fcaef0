// SPDX-License-Identifier: MIT OR Apache-2.0
//
// Copyright (c) 2020-2022 Andre Richter <andre.o.richter@gmail.com>

//! Processor code.
//! processorのcode

#[cfg(all(target_arch = "arm", target_os = "none"))]
#[path = "_arch/arm/cpu.rs"]
mod arch_cpu;

// hostでtestするときはこちら
#[cfg(not(all(target_arch = "arm", target_os = "none")))]
#[path = "_arch/host/cpu.rs"]
mod arch_cpu;

pub mod boot;

//--------------------------------------------------------------------------------------------------
// Architectural Public Reexports
//--------------------------------------------------------------------------------------------------
pub use arch_cpu::{halt, wait_forever};
