// SPDX-License-Identifier: MIT OR Apache-2.0
//
// Copyright (c) 2018-2022 Andre Richter <andre.o.richter@gmail.com>

//! Architectural processor code.
//! archに依存するprocessorのcode
//!
//! # Orientation
//!
//! Since arch modules are imported into generic modules using the path attribute, the path of this
//! file is:
//!
//! crate::cpu::arch_cpu

use cortex_m::asm;

//--------------------------------------------------------------------------------------------------
// Public Code
//--------------------------------------------------------------------------------------------------

/// Pause execution on the core.
/// coreの実行を止めるよ．
#[inline(always)]
pub fn wait_forever() -> ! {
    loop {
        asm::wfe() // eventが来るまで待つ
    }
}

/// Terminal state after the application returned.
/// applicationが戻ってきたあとの最後の状態だよ．
#[cfg(not(feature = "test_build"))]
pub fn halt(_exit_code: i32) -> ! {
    wait_forever()
}

//--------------------------------------------------------------------------------------------------
// Testing
//--------------------------------------------------------------------------------------------------

/// Make the host QEMU binary execute `exit(exit_code)` through semihosting.
/// semihostingでQEMUを終了させるよ．
#[cfg(feature = "test_build")]
pub fn halt(exit_code: i32) -> ! {
    use qemu_exit::QEMUExit;

    const QEMU_EXIT_HANDLE: qemu_exit::AArch32 = qemu_exit::AArch32::new();

    if exit_code == 0 {
        QEMU_EXIT_HANDLE.exit_success()
    } else {
        QEMU_EXIT_HANDLE.exit(exit_code as u32)
    }
}
