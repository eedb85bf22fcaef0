// SPDX-License-Identifier: MIT OR Apache-2.0
//
// Copyright (c) 2022 Andre Richter <andre.o.richter@gmail.com>

//! Reset sequence tests, driven through a simulated memory.
//! 模擬memoryの上でreset処理を走らせるtestだよ．

mod host_console;

use host_console::StdoutConsole;
use libstartup::{
    console::{self, interface::Statistics},
    memory::{
        interface::WordMemory, Address, BackingStore, InitImage, MemoryLayout, Region, Word,
        WORD_SIZE,
    },
    reset::{self, interface::BootHooks, Stage},
};
use std::{
    cell::RefCell,
    panic::{self, AssertUnwindSafe},
    rc::Rc,
};
use test_macros::boot_test;

const SRAM: usize = 0x2000_0000;
const GARBAGE: Word = 0xFFFF_FFFF;

const ROM_IMAGE: [Word; 4] = [0x0102_0304, 0x0506_0708, 0x090A_0B0C, 0x0D0E_0F10];

type Store = BackingStore<64>;

/// Stands in for a UART driver that registers itself from `.init_array`.
/// .init_arrayから自分を登録するUART driverの代わりだよ．
static INIT_ARRAY_CONSOLE: StdoutConsole = StdoutConsole::new();

/// A view of the store that the hooks can look at while the sequence owns the memory.
/// reset処理がmemoryを握っている間もhooksから覗けるようにするよ．
#[derive(Clone)]
struct SharedMemory(Rc<RefCell<Store>>);

impl WordMemory for SharedMemory {
    unsafe fn read_word(&self, addr: Address) -> Word {
        self.0.borrow().read_word(addr)
    }

    unsafe fn write_word(&mut self, addr: Address, value: Word) {
        self.0.borrow_mut().write_word(addr, value)
    }
}

struct Halted(i32);

/// What `main()` saw of memory, and what the console had printed on every stage entry.
/// main()から見えたmemoryと，各段階に入ったときの出力文字数を記録するよ．
struct Witness {
    memory: SharedMemory,
    layout: MemoryLayout,
    exit_code: i32,
    console_from_init: Option<&'static StdoutConsole>,
    data_seen_by_main: Vec<Word>,
    bss_seen_by_main: Vec<Word>,
    printed_before_main: usize,
    printed_on_entry: Vec<(Stage, usize)>,
    finalized: bool,
}

impl BootHooks for Witness {
    fn system_init(&mut self) {}

    fn pre_main_init(&mut self) {
        if let Some(new_console) = self.console_from_init {
            unsafe { console::register_console(new_console) };
        }
    }

    fn main(&mut self) -> i32 {
        let store = self.memory.0.borrow();

        self.data_seen_by_main = store.words(self.layout.data().region()).to_vec();
        self.bss_seen_by_main = store.words(self.layout.bss()).to_vec();
        self.printed_before_main = console::console().chars_written();

        self.exit_code
    }

    fn post_main_fini(&mut self) {
        self.finalized = true;
    }

    fn halt(&mut self, exit_code: i32) -> ! {
        panic::resume_unwind(Box::new(Halted(exit_code)))
    }

    fn stage_entered(&mut self, stage: Stage) {
        self.printed_on_entry
            .push((stage, console::console().chars_written()));
    }
}

fn layout() -> MemoryLayout {
    let region = |start, end| Region::new(Address::new(start), Address::new(end)).unwrap();

    MemoryLayout::new(
        Address::new(SRAM + 0x100),
        InitImage::new(Address::new(SRAM + 0xC0), region(SRAM, SRAM + 16)),
        region(SRAM + 16, SRAM + 48),
    )
}

/// Power-on memory: garbage everywhere, the initializer image in "ROM".
/// 電源投入直後のmemoryだよ．どこもごみだらけで，初期値だけROMにあるよ．
fn witness(exit_code: i32) -> Witness {
    let layout = layout();
    let mut store = Store::new(Address::new(SRAM), GARBAGE);
    store.preload(layout.data().load(), &ROM_IMAGE);

    Witness {
        memory: SharedMemory(Rc::new(RefCell::new(store))),
        layout,
        exit_code,
        console_from_init: None,
        data_seen_by_main: Vec::new(),
        bss_seen_by_main: Vec::new(),
        printed_before_main: 0,
        printed_on_entry: Vec::new(),
        finalized: false,
    }
}

/// Run until the terminal stage and return the exit code handed to it.
fn run(witness: &mut Witness) -> i32 {
    let mut memory = witness.memory.clone();
    let layout = witness.layout;

    // 無限loopの代わりにHaltedが飛んでくる
    let result = panic::catch_unwind(AssertUnwindSafe(|| unsafe {
        reset::reset(&mut memory, &layout, witness)
    }));

    match result {
        Ok(_) => unreachable!("reset() returned"),
        Err(payload) => match payload.downcast::<Halted>() {
            Ok(halted) => halted.0,
            Err(payload) => panic::resume_unwind(payload),
        },
    }
}

/// `main()` finds `.data` restored and `.bss` zeroed.
#[boot_test]
fn main_sees_initialized_memory() {
    let mut p = witness(0);
    run(&mut p);

    assert_eq!(p.data_seen_by_main, ROM_IMAGE);
    assert_eq!(p.bss_seen_by_main, [0_u32; 8]);
}

/// Each word of both regions is written exactly once, nothing else is touched.
#[boot_test]
fn every_word_written_once() {
    let mut p = witness(0);
    run(&mut p);

    let store = p.memory.0.borrow();
    let data = p.layout.data().region();
    let bss = p.layout.bss();

    let mut addr = store.region().start();
    while addr < store.region().end() {
        let expected = if data.contains(addr) || bss.contains(addr) {
            1
        } else {
            0
        };
        assert_eq!(store.write_count(addr), expected, "at {}", addr);

        addr = addr + WORD_SIZE;
    }
}

/// Nothing is printed before the pre-main stage: statics are not valid until then.
#[boot_test]
fn silent_until_memory_is_ready() {
    let mut p = witness(0);
    run(&mut p);

    let count_at = |stage| {
        p.printed_on_entry
            .iter()
            .find(|(s, _)| *s == stage)
            .map(|(_, n)| *n)
            .unwrap()
    };

    assert_eq!(count_at(Stage::SystemInit), count_at(Stage::RestoreData));
    assert_eq!(count_at(Stage::SystemInit), count_at(Stage::ZeroFill));
    assert_eq!(count_at(Stage::SystemInit), count_at(Stage::PreMainInit));
    assert!(count_at(Stage::ApplicationEntry) > count_at(Stage::PreMainInit));
}

/// A console registered by the pre-main initializers receives the memory-ready message.
/// main前の初期化で登録されたconsoleにも起動messageが届くよ．
#[boot_test]
fn console_registered_by_init_array_gets_startup_message() {
    let stdout_before = host_console::STDOUT_CONSOLE.chars_written();

    let mut p = witness(0);
    p.console_from_init = Some(&INIT_ARRAY_CONSOLE);
    run(&mut p);

    // 後のtestのために標準出力のconsoleに戻す
    unsafe { host_console::register() };

    assert!(p.printed_before_main > 0);
    assert_eq!(
        host_console::STDOUT_CONSOLE.chars_written(),
        stdout_before
    );
    assert!(INIT_ARRAY_CONSOLE.chars_written() >= p.printed_before_main);
}

/// A returning `main()` is finalized and its exit code reaches the halt.
#[boot_test]
fn returning_main_is_finalized_then_halted() {
    let mut p = witness(-7);

    assert_eq!(run(&mut p), -7);
    assert!(p.finalized);

    let stages: Vec<Stage> = p.printed_on_entry.iter().map(|(s, _)| *s).collect();
    assert_eq!(stages, Stage::SEQUENCE);
}

fn main() {
    unsafe { host_console::register() };

    libstartup::test_runner(&[
        &MAIN_SEES_INITIALIZED_MEMORY_TEST_CONTAINER,
        &EVERY_WORD_WRITTEN_ONCE_TEST_CONTAINER,
        &SILENT_UNTIL_MEMORY_IS_READY_TEST_CONTAINER,
        &CONSOLE_REGISTERED_BY_INIT_ARRAY_GETS_STARTUP_MESSAGE_TEST_CONTAINER,
        &RETURNING_MAIN_IS_FINALIZED_THEN_HALTED_TEST_CONTAINER,
    ]);
}
