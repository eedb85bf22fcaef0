// SPDX-License-Identifier: MIT OR Apache-2.0
//
// Copyright (c) 2021-2022 Andre Richter <andre.o.richter@gmail.com>

//! Boot code.
//! 起動code

#[cfg(all(target_arch = "arm", target_os = "none"))]
#[path = "../_arch/arm/cpu/boot.rs"]
mod arch_boot;

//--------------------------------------------------------------------------------------------------
// Architectural Public Reexports
//--------------------------------------------------------------------------------------------------
#[cfg(all(target_arch = "arm", target_os = "none"))]
pub use arch_boot::Reset_Handler;
