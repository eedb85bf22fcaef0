// SPDX-License-Identifier: MIT OR Apache-2.0
//
// Copyright (c) 2018-2022 Andre Richter <andre.o.richter@gmail.com>

//! Printing.
//! 表示
//!
//! Nothing in here may be used before the reset sequence has restored `.data` and zeroed `.bss`.
//! The console registration lives in `.data`.
//! .dataと.bssの初期化が終わるまではここにあるものを使っちゃだめだよ．

use crate::console;
use core::fmt;

//--------------------------------------------------------------------------------------------------
// Public Code
//--------------------------------------------------------------------------------------------------

#[doc(hidden)]
pub fn _print(args: fmt::Arguments) {
    console::console().write_fmt(args).unwrap();
}

/// Prints without a newline.
/// 改行なしで表示するmacroだよ．
///
/// Carbon copy from <https://doc.rust-lang.org/src/std/macros.rs.html>
#[macro_export]
macro_rules! print {
    ($($arg:tt)*) => ($crate::print::_print(format_args!($($arg)*)));
}

/// Prints with a newline.
/// 改行ありで表示するmacroだよ．
#[macro_export]
macro_rules! println {
    () => ($crate::print!("\n"));
    ($string:expr) => ({
        $crate::print::_print(format_args!(concat!($string, "\n")));
    });
    ($format_string:expr, $($arg:tt)*) => ({
        $crate::print::_print(format_args!(concat!($format_string, "\n"), $($arg)*));
    })
}

/// Prints an info, with a newline.
/// 起動中の情報を表示するよ．
#[macro_export]
macro_rules! info {
    ($string:expr) => ({
        $crate::print::_print(format_args!(concat!("[  boot] ", $string, "\n")));
    });
    ($format_string:expr, $($arg:tt)*) => ({
        $crate::print::_print(format_args!(
            concat!("[  boot] ", $format_string, "\n"),
            $($arg)*
        ));
    })
}

/// Prints a warning, with a newline.
/// 警告を表示するよ．
#[macro_export]
macro_rules! warn {
    ($string:expr) => ({
        $crate::print::_print(format_args!(concat!("[W boot] ", $string, "\n")));
    });
    ($format_string:expr, $($arg:tt)*) => ({
        $crate::print::_print(format_args!(
            concat!("[W boot] ", $format_string, "\n"),
            $($arg)*
        ));
    })
}
