// SPDX-License-Identifier: MIT OR Apache-2.0
//
// Copyright (c) 2018-2022 Andre Richter <andre.o.richter@gmail.com>

//! The reset sequence.
//! reset直後から停止までの処理の流れだよ．
//!
//! Equivalent to `crt0` in the C world. A strictly linear state machine from the first instruction
//! after reset to the terminal halt. There is no branching and no retry: nothing exists yet that
//! could report or recover from an error.
//! C言語のcrt0にあたるよ．分岐もretryもない一本道のstate machineだよ．

use crate::{
    info,
    memory::{self, interface::WordMemory, MemoryLayout},
    warn,
};

//--------------------------------------------------------------------------------------------------
// Public Definitions
//--------------------------------------------------------------------------------------------------

/// Reset interfaces.
/// resetのinterfaces
pub mod interface {
    use super::Stage;

    /// Everything the reset sequence calls out to.
    /// reset処理が外に呼び出すものすべてだよ．
    ///
    /// On the target, `bsp::boot::Board` binds these to `SystemInit()`, the init arrays and the
    /// application's `main()`.
    pub trait BootHooks {
        /// Clock tree and critical early hardware setup. `.data` and `.bss` are not valid yet.
        /// clockなどの初期設定だよ．まだ.dataも.bssも使えないよ．
        fn system_init(&mut self);

        /// Pre-main initializers, e.g. `.preinit_array` and `.init_array`.
        /// main前の初期化関数たち
        fn pre_main_init(&mut self);

        /// The application entry point.
        fn main(&mut self) -> i32;

        /// Finalizers matching `pre_main_init()`. Only reached if `main()` returns.
        /// mainが戻ってきたときだけ呼ばれる終了処理だよ．
        fn post_main_fini(&mut self);

        /// The terminal state.
        /// ここから先には進まないよ．
        fn halt(&mut self, exit_code: i32) -> !;

        /// Called on entry of every stage, before the stage's work is done.
        fn stage_entered(&mut self, _stage: Stage) {}
    }
}

/// The stages of the reset sequence, in execution order.
/// reset処理の各段階を実行順に並べたよ．
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum Stage {
    /// Run `SystemInit()`.
    SystemInit,

    /// Copy the `.data` image from ROM to RAM.
    /// .dataの初期値をROMからRAMに写すよ．
    RestoreData,

    /// Zero the `.bss` region.
    /// .bssを0で埋めるよ．
    ZeroFill,

    /// Run the pre-main initializers.
    PreMainInit,

    /// Call `main()`.
    ApplicationEntry,

    /// Run the finalizers.
    PostMainFini,

    /// Stay here.
    /// 無限loop
    Halt,
}

//--------------------------------------------------------------------------------------------------
// Public Code
//--------------------------------------------------------------------------------------------------

impl Stage {
    /// All stages, in execution order.
    pub const SEQUENCE: [Stage; 7] = [
        Stage::SystemInit,
        Stage::RestoreData,
        Stage::ZeroFill,
        Stage::PreMainInit,
        Stage::ApplicationEntry,
        Stage::PostMainFini,
        Stage::Halt,
    ];

    /// The stage after this one. `Halt` is terminal and follows itself.
    /// 次の段階を返すよ．Haltの次はHaltだよ．
    pub const fn next(self) -> Stage {
        match self {
            Stage::SystemInit => Stage::RestoreData,
            Stage::RestoreData => Stage::ZeroFill,
            Stage::ZeroFill => Stage::PreMainInit,
            Stage::PreMainInit => Stage::ApplicationEntry,
            Stage::ApplicationEntry => Stage::PostMainFini,
            Stage::PostMainFini | Stage::Halt => Stage::Halt,
        }
    }
}

/// Run the reset sequence. Never returns.
/// reset処理を実行するよ．戻ってこないよ．
///
/// # Safety
///
/// - Only a single core must be active and running this function.
///   1つのcoreだけがこの関数を実行していること．
/// - Must be entered from the reset vector only. The sequence is not reentrant: running it twice
///   without an intervening hardware reset re-initializes memory that is already in use.
///   reset vectorからだけ呼ぶこと．2回走ると使用中のmemoryを初期化し直してしまうよ．
/// - `layout` must describe the real memory map. A wrong layout silently corrupts memory.
///   layoutは本物のmemory mapであること．間違っていると黙ってmemoryを壊すよ．
pub unsafe fn reset<M, H>(memory: &mut M, layout: &MemoryLayout, hooks: &mut H) -> !
where
    M: WordMemory,
    H: interface::BootHooks,
{
    let mut stage = Stage::SystemInit;
    let mut exit_code = 0;

    loop {
        hooks.stage_entered(stage);

        match stage {
            Stage::SystemInit => hooks.system_init(),
            Stage::RestoreData => {
                memory::restore_initialized_data(memory, &layout.data());
            }
            Stage::ZeroFill => {
                memory::zero_fill(memory, &layout.bss());
            }
            Stage::PreMainInit => {
                hooks.pre_main_init();

                // Statics are valid, and a console registered by the initializers is in place.
                // ここでやっと表示できるよ．
                info!(
                    "Memory ready: {} bytes of .data restored, {} bytes of .bss zeroed",
                    layout.data().region().size(),
                    layout.bss().size()
                );
            }
            Stage::ApplicationEntry => exit_code = hooks.main(),
            Stage::PostMainFini => {
                warn!("main() returned {}. Halting.", exit_code);
                hooks.post_main_fini();
            }
            Stage::Halt => hooks.halt(exit_code),
        }

        stage = stage.next();
    }
}

//--------------------------------------------------------------------------------------------------
// Testing
//--------------------------------------------------------------------------------------------------
