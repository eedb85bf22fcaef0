// SPDX-License-Identifier: MIT OR Apache-2.0
//
// Copyright (c) 2018-2022 Andre Richter <andre.o.richter@gmail.com>

//! The `startup` library.
//! reset直後からmain()までを受け持つlibraryだよ．
//!
//! Reset and vector-table support for `xmcu` Cortex-M microcontrollers. This is the code that runs
//! between a cold hardware reset and the first instruction of the application's `main()`.
//!
//! # Code organization and architecture
//!
//! The code is divided into different *modules*, each representing a typical **subsystem** of the
//! boot flow. Top-level module files of subsystems reside directly in the `src` folder. For
//! example, `src/memory.rs` contains code that is concerned with the memory layout contract and
//! the bring-up routines that operate on it.
//!
//! ## Visibility of processor architecture code
//!
//! Some subsystems depend on low-level code that is specific to the target processor
//! architecture. For each supported processor architecture, there exists a subfolder in
//! `src/_arch`:
//!
//! - `src/_arch/arm`: bare-metal Cortex-M (`target_arch = "arm"`, `target_os = "none"`).
//! - `src/_arch/host`: the machine the crate is built on. Used to simulate the boot flow in tests.
//!
//! The architecture folders mirror the subsystem modules laid out in `src`. For example, the
//! architectural half of `src/cpu/boot.rs` lives in `src/_arch/arm/cpu/boot.rs` and is loaded as
//! module `arch_boot` using the `path attribute`.
//!
//! ## BSP code
//!
//! `BSP` stands for Board Support Package. `BSP` code is organized under `src/bsp.rs` and contains
//! target board specific definitions: the linker symbols that make up the memory layout contract,
//! the device interrupt count and the hooks that bind the reset sequence to the real hardware.
//!
//! # Boot flow
//!
//! 1. The processor loads the initial stack pointer from vector 0 and jumps to vector 1,
//!    `Reset_Handler()` in `src/_arch/arm/cpu/boot.rs`.
//! 2. `Reset_Handler()` runs `reset::reset()`, which walks the reset stages in fixed order:
//!    `SystemInit()`, `.data` restore, `.bss` zero-fill, init arrays, `main()`, fini arrays.
//! 3. The processor is parked in `cpu::halt()` forever.

#![allow(clippy::upper_case_acronyms)]
#![cfg_attr(not(test), no_std)]

#[cfg(all(target_arch = "arm", target_os = "none"))]
mod panic_wait;
mod synchronization;

pub mod bsp;
pub mod common;
pub mod config;
pub mod console;
pub mod cpu;
pub mod exception;
pub mod memory;
pub mod print;
pub mod reset;
pub mod runtime_init;

//--------------------------------------------------------------------------------------------------
// Public Code
//--------------------------------------------------------------------------------------------------

/// Version string.
pub fn version() -> &'static str {
    concat!(
        env!("CARGO_PKG_NAME"),
        " version ",
        env!("CARGO_PKG_VERSION")
    )
}

//--------------------------------------------------------------------------------------------------
// Testing
//--------------------------------------------------------------------------------------------------

/// The default runner for tests that are executed without the libtest harness.
/// libtestのharnessを使わないtestを順番に実行するよ．
pub fn test_runner(tests: &[&test_types::UnitTest]) {
    // This line will be printed as the test header.
    println!("Running {} tests", tests.len());

    for (i, test) in tests.iter().enumerate() {
        print!("{:>3}. {:.<58}", i + 1, test.name);

        // Run the actual test.
        (test.test_func)(); // 失敗したらpanicする

        // Failed tests call panic!(). Execution reaches here only if the test has passed.
        println!("[ok]")
    }
}
