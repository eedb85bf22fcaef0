// SPDX-License-Identifier: MIT OR Apache-2.0
//
// Copyright (c) 2022 Andre Richter <andre.o.richter@gmail.com>

//! BSP boot hooks.
//! reset処理からboardの処理を呼び出すhooksだよ．

use super::memory;
use crate::{cpu, reset, runtime_init};

//--------------------------------------------------------------------------------------------------
// Private Definitions
//--------------------------------------------------------------------------------------------------

extern "C" {
    /// Provided by the board, or aliased to `DefaultSystemInit()` by `handlers.ld`.
    /// boardが用意しなければhandlers.ldでDefaultSystemInit()になるよ．
    fn SystemInit();

    /// The application.
    fn main() -> i32;
}

//--------------------------------------------------------------------------------------------------
// Public Definitions
//--------------------------------------------------------------------------------------------------

/// Binds the reset sequence to the real hardware.
/// reset処理を本物のhardwareにつなぐよ．
pub struct Board;

//--------------------------------------------------------------------------------------------------
// Public Code
//--------------------------------------------------------------------------------------------------

impl reset::interface::BootHooks for Board {
    fn system_init(&mut self) {
        unsafe { SystemInit() }
    }

    fn pre_main_init(&mut self) {
        unsafe {
            runtime_init::run_init_array(memory::preinit_array()); // 先にpreinit
            runtime_init::run_init_array(memory::init_array());
        }
    }

    fn main(&mut self) -> i32 {
        unsafe { main() }
    }

    fn post_main_fini(&mut self) {
        unsafe { runtime_init::run_fini_array(memory::fini_array()) } // 逆順に呼ぶ
    }

    fn halt(&mut self, exit_code: i32) -> ! {
        cpu::halt(exit_code)
    }
}
