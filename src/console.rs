// SPDX-License-Identifier: MIT OR Apache-2.0
//
// Copyright (c) 2018-2022 Andre Richter <andre.o.richter@gmail.com>

//! System console.
//! system console

mod null_console;

use crate::synchronization::{self, InitStateLock};

//--------------------------------------------------------------------------------------------------
// Public Definitions
//--------------------------------------------------------------------------------------------------

/// Console interfaces.
/// Consoleが実装すべきinterfacesを記述したmodule
pub mod interface {
    use core::fmt; // 書式出力のmodule

    /// Console write functions.
    pub trait Write {
        /// Write a single character.
        fn write_char(&self, c: char);

        /// Write a Rust format string.
        fn write_fmt(&self, args: fmt::Arguments) -> fmt::Result;

        /// Block until the last buffered character has been physically put on the TX wire.
        fn flush(&self);
    }

    /// Console statistics.
    pub trait Statistics {
        /// Return the number of characters written.
        /// 出力した文字数を返すよ．
        fn chars_written(&self) -> usize {
            0
        }
    }

    /// Trait alias for a full-fledged console.
    /// 上の2つのtraitsを合わせたalias
    pub trait All: Write + Statistics {}
}

//--------------------------------------------------------------------------------------------------
// Global instances
//--------------------------------------------------------------------------------------------------

static CUR_CONSOLE: InitStateLock<&'static (dyn interface::All + Sync)> =
    InitStateLock::new(&null_console::NULL_CONSOLE);

//--------------------------------------------------------------------------------------------------
// Public Code
//--------------------------------------------------------------------------------------------------
use synchronization::interface::ReadWriteEx;

/// Register a new console.
/// 新しいconsoleを登録するよ．
///
/// Until a console is registered, everything printed goes to the null console. A driver typically
/// registers its UART from an `.init_array` constructor, so that the startup messages of the
/// pre-main stage already reach the wire.
/// 登録されるまでは何を表示してもnull consoleに捨てられるよ．.init_arrayで登録すればmain前の起動messageも届くよ．
///
/// # Safety
///
/// - Must only be called while execution is single-threaded and no print is in flight, i.e. from
///   the reset sequence or before anything else runs.
///   単一threadで，表示の途中でないときだけ呼ぶこと．
pub unsafe fn register_console(new_console: &'static (dyn interface::All + Sync)) {
    CUR_CONSOLE.write(|con| *con = new_console);
}

/// Return a reference to the currently registered console.
///
/// This is the global console used by all printing macros.
pub fn console() -> &'static dyn interface::All {
    CUR_CONSOLE.read(|con| *con)
}

//--------------------------------------------------------------------------------------------------
// Testing
//--------------------------------------------------------------------------------------------------
