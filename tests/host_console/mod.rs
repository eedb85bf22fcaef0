// SPDX-License-Identifier: MIT OR Apache-2.0
//
// Copyright (c) 2022 Andre Richter <andre.o.richter@gmail.com>

//! A console that writes to the test process' stdout.
//! testのprocessの標準出力に書き込むconsoleだよ．

use libstartup::console::interface;
use std::{
    fmt,
    io::Write as _,
    sync::atomic::{AtomicUsize, Ordering},
};

pub struct StdoutConsole {
    // consoleが今までに出力した文字数
    chars_written: AtomicUsize,
}

pub static STDOUT_CONSOLE: StdoutConsole = StdoutConsole::new();

impl StdoutConsole {
    /// Create an instance that has not written anything yet.
    pub const fn new() -> Self {
        Self {
            chars_written: AtomicUsize::new(0),
        }
    }
}

impl interface::Write for StdoutConsole {
    fn write_char(&self, c: char) {
        std::print!("{}", c);
        self.chars_written.fetch_add(1, Ordering::Relaxed); // 出力文字数を数える
    }

    fn write_fmt(&self, args: fmt::Arguments) -> fmt::Result {
        let s = fmt::format(args);

        std::print!("{}", s);
        self.chars_written
            .fetch_add(s.chars().count(), Ordering::Relaxed);

        Ok(())
    }

    fn flush(&self) {
        let _ = std::io::stdout().flush();
    }
}

impl interface::Statistics for StdoutConsole {
    fn chars_written(&self) -> usize {
        self.chars_written.load(Ordering::Relaxed)
    }
}

impl interface::All for StdoutConsole {}

/// Route the startup code's console to stdout.
/// 起動codeのconsoleを標準出力につなぐよ．
///
/// # Safety
///
/// - Must be called before any test runs, from the main thread.
///   testが走る前にmain threadから呼ぶこと．
pub unsafe fn register() {
    libstartup::console::register_console(&STDOUT_CONSOLE);
}
