// SPDX-License-Identifier: MIT OR Apache-2.0
//
// Copyright (c) 2020-2022 Andre Richter <andre.o.richter@gmail.com>

//! BSP exception handling.
//! BSPの例外処理

//--------------------------------------------------------------------------------------------------
// Public Definitions
//--------------------------------------------------------------------------------------------------

/// Number of device interrupt vectors after the sixteen core slots.
/// 16個のcore slotの後ろに続くdevice割り込みvectorの数
///
/// The generic part of the family routes no device interrupt through this table. Derivatives with
/// peripherals raise the count and bind their handlers in `_arch/arm/exception.rs`.
pub const DEVICE_INTERRUPT_COUNT: usize = 0;
