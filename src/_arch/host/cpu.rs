// SPDX-License-Identifier: MIT OR Apache-2.0
//
// Copyright (c) 2022 Andre Richter <andre.o.richter@gmail.com>

//! Processor code for the build machine.
//! build machine上で動かすときのprocessorのcode
//!
//! # Orientation
//!
//! Since arch modules are imported into generic modules using the path attribute, the path of this
//! file is:
//!
//! crate::cpu::arch_cpu

//--------------------------------------------------------------------------------------------------
// Public Code
//--------------------------------------------------------------------------------------------------

/// Pause execution of the calling thread.
#[inline(always)]
pub fn wait_forever() -> ! {
    loop {
        core::hint::spin_loop() // 無限loop
    }
}

/// Terminal state after the application returned.
pub fn halt(_exit_code: i32) -> ! {
    wait_forever()
}
