// SPDX-License-Identifier: MIT OR Apache-2.0
//
// Copyright (c) 2021-2022 Andre Richter <andre.o.richter@gmail.com>

//! Architectural boot code.
//! archに依存するboot code
//!
//! # Orientation
//!
//! Since arch modules are imported into generic modules using the path attribute, the path of this
//! file is:
//!
//! crate::cpu::boot::arch_boot

use crate::{bsp, memory::PhysicalMemory, reset};

//--------------------------------------------------------------------------------------------------
// Public Code
//--------------------------------------------------------------------------------------------------

/// The reset vector.
/// reset vectorだよ．
///
/// The processor has loaded the stack pointer from vector 0 and jumps here with interrupts at
/// their reset priority. Never returns.
/// processorはvector 0からstack pointerを読み込んだあとここに飛んでくるよ．戻ってこないよ．
///
/// # Safety
///
/// - `.data` and `.bss` are not initialized yet. The code must not use or reference them in any
///   way until `reset::reset()` has passed the zero-fill stage.
///   .dataと.bssはまだ初期化されていないよ．0埋めが終わるまで触ってはいけないよ．
#[no_mangle]
pub unsafe extern "C" fn Reset_Handler() -> ! {
    // ここから先は戻ってこない
    reset::reset(
        &mut PhysicalMemory,
        &bsp::memory::layout(),
        &mut bsp::boot::Board,
    )
}
