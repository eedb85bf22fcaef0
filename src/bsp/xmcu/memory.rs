// SPDX-License-Identifier: MIT OR Apache-2.0
//
// Copyright (c) 2018-2022 Andre Richter <andre.o.richter@gmail.com>

//! BSP Memory Management.
//! BSPのmemory管理
//!
//! The linker script defines the markers below. They are addresses, not variables: only their
//! location is ever used.
//! 以下の目印はlinker scriptで定義されるよ．変数ではなく番地なので，場所だけを使うよ．

use crate::{
    memory::{Address, InitImage, MemoryLayout, Region},
    runtime_init::InitFn,
};
use core::cell::UnsafeCell;

//--------------------------------------------------------------------------------------------------
// Private Definitions
//--------------------------------------------------------------------------------------------------

// Symbols from the linker script.
// linker scriptで定義される記号
extern "Rust" {
    static _sidata: UnsafeCell<u32>;
    static _sdata: UnsafeCell<u32>;
    static _edata: UnsafeCell<u32>;
    static _sbss: UnsafeCell<u32>;
    static _ebss: UnsafeCell<u32>;

    static __preinit_array_start: UnsafeCell<InitFn>;
    static __preinit_array_end: UnsafeCell<InitFn>;
    static __init_array_start: UnsafeCell<InitFn>;
    static __init_array_end: UnsafeCell<InitFn>;
    static __fini_array_start: UnsafeCell<InitFn>;
    static __fini_array_end: UnsafeCell<InitFn>;
}

//--------------------------------------------------------------------------------------------------
// Public Definitions
//--------------------------------------------------------------------------------------------------

extern "C" {
    /// Top of the main stack.
    /// main stackの一番上
    ///
    /// Not code. Declared as a function so that it fits vector slot 0.
    /// codeではないよ．vector slot 0に入れるために関数として宣言しているよ．
    pub fn _estack();
}

//--------------------------------------------------------------------------------------------------
// Private Code
//--------------------------------------------------------------------------------------------------

fn address_of<T>(marker: &UnsafeCell<T>) -> Address {
    Address::new(marker.get() as usize)
}

// 2つの目印に挟まれた関数pointerの配列を返すよ．
unsafe fn array(start: &UnsafeCell<InitFn>, end: &UnsafeCell<InitFn>) -> &'static [InitFn] {
    let start = start.get() as *const InitFn;
    let len = (end.get() as usize - start as usize) / core::mem::size_of::<InitFn>(); // 要素数

    core::slice::from_raw_parts(start, len)
}

//--------------------------------------------------------------------------------------------------
// Public Code
//--------------------------------------------------------------------------------------------------

/// The memory layout as placed by the linker.
/// linkerが配置したmemory layoutだよ．
///
/// # Safety
///
/// - Values are provided by the linker script and must be trusted as-is.
///   値はlinker scriptが与えるものなのでそのまま信じるよ．
/// - The linker-provided addresses must be word aligned.
///   linkerが与える番地はword境界に揃っていること．
pub fn layout() -> MemoryLayout {
    // 範囲の検査はしない．link.ldがALIGN(4)で揃えているよ．
    unsafe {
        let data = Region::new_unchecked(address_of(&_sdata), address_of(&_edata));
        let bss = Region::new_unchecked(address_of(&_sbss), address_of(&_ebss));

        MemoryLayout::new(
            Address::new(_estack as usize),
            InitImage::new(address_of(&_sidata), data),
            bss,
        )
    }
}

/// The `.preinit_array` entries.
/// .preinit_arrayの中身
///
/// # Safety
///
/// - The linker script must keep the array between its two markers.
///   linker scriptが配列を2つの目印の間に置いていること．
pub unsafe fn preinit_array() -> &'static [InitFn] {
    array(&__preinit_array_start, &__preinit_array_end)
}

/// The `.init_array` entries.
/// .init_arrayの中身
///
/// # Safety
///
/// - See `preinit_array()`.
pub unsafe fn init_array() -> &'static [InitFn] {
    array(&__init_array_start, &__init_array_end)
}

/// The `.fini_array` entries.
/// .fini_arrayの中身
///
/// # Safety
///
/// - See `preinit_array()`.
pub unsafe fn fini_array() -> &'static [InitFn] {
    array(&__fini_array_start, &__fini_array_end)
}
