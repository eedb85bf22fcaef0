// SPDX-License-Identifier: MIT OR Apache-2.0
//
// Copyright (c) 2018-2022 Andre Richter <andre.o.richter@gmail.com>

//! The `firmware` binary.
//! 起動codeの上で動く小さなapplicationだよ．
//!
//! A minimal application on top of the startup code. It provides `main()` for the reset sequence
//! and claims the SysTick vector with a strong definition of `SysTick_Handler`. Every other vector
//! keeps the fallback.

#![no_main]
#![no_std]

use core::sync::atomic::{AtomicU32, Ordering};
use libstartup::{bsp, config, info};

static TICKS: AtomicU32 = AtomicU32::new(0); // SysTick割り込みの回数

/// Overrides the `PROVIDE`d alias of the same name.
/// handlers.ldでPROVIDEされた同じ名前の別名を上書きするよ．
///
/// # Safety
///
/// - Only to be entered by the processor through the vector table.
#[no_mangle]
pub unsafe extern "C" fn SysTick_Handler() {
    // Load and store only; ARMv6-M has no atomic read-modify-write.
    TICKS.store(TICKS.load(Ordering::Relaxed).wrapping_add(1), Ordering::Relaxed);
}

/// The application entry point, called by the reset sequence.
/// reset処理から呼ばれるapplicationの入口
#[no_mangle]
pub extern "C" fn main() -> i32 {
    info!("{}", libstartup::version());
    info!("Booting on: {}", bsp::board_name());

    for curve in config::micro_ecc::enabled_curves() {
        info!("micro-ecc curve: {}", curve);
    }

    info!("SysTick interrupts so far: {}", TICKS.load(Ordering::Relaxed));

    0 // reset処理に戻ると終了処理のあと停止する
}
