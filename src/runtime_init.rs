// SPDX-License-Identifier: MIT OR Apache-2.0
//
// Copyright (c) 2018-2022 Andre Richter <andre.o.richter@gmail.com>

//! Runtime initialization and finalization.
//! mainの前後の初期化と終了処理
//!
//! The toolchain collects static constructors into `.preinit_array` and `.init_array`, and static
//! destructors into `.fini_array`. Each array is a list of plain function pointers.

//--------------------------------------------------------------------------------------------------
// Public Definitions
//--------------------------------------------------------------------------------------------------

/// An entry of an init or fini array.
/// init arrayやfini arrayの要素
pub type InitFn = unsafe extern "C" fn();

//--------------------------------------------------------------------------------------------------
// Public Code
//--------------------------------------------------------------------------------------------------

/// Call every entry of an init array, first to last.
/// init arrayの要素を前から順に呼ぶよ．
///
/// # Safety
///
/// - Must only be called from the reset sequence, after `.data` and `.bss` are initialized.
///   .dataと.bssの初期化が終わったあと，reset処理の中からだけ呼ぶこと．
pub unsafe fn run_init_array(array: &[InitFn]) {
    for f in array {
        f();
    }
}

/// Call every entry of a fini array, last to first.
/// fini arrayの要素を後ろから順に呼ぶよ．
///
/// # Safety
///
/// - Must only be called from the reset sequence, after `main()` returned.
///   main()が戻ってきたあと，reset処理の中からだけ呼ぶこと．
pub unsafe fn run_fini_array(array: &[InitFn]) {
    for f in array.iter().rev() { // 逆順
        f();
    }
}

//--------------------------------------------------------------------------------------------------
// Testing
//--------------------------------------------------------------------------------------------------
