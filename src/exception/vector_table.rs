// SPDX-License-Identifier: MIT OR Apache-2.0
//
// Copyright (c) 2020-2022 Andre Richter <andre.o.richter@gmail.com>

//! The vector table.
//! 例外vector tableだよ．
//!
//! The processor expects an array of words at the vector base: the initial stack pointer, the
//! reset entry point, the system exceptions in their architectural order and then the device
//! interrupts. Nothing may be reordered, skipped or duplicated. Slots of exceptions that the core
//! variant lacks, and the slots the architecture keeps reserved, hold zero.
//! 並べ替えも抜けも重複も許されないよ．使われないslotには0を入れるよ．
//!
//! The table is assembled at compile time from a set of [`HandlerBindings`]. Placement at the
//! vector base is the job of the linker script; see `src/_arch/arm/exception.rs`.

use super::{CoreVariant, Exception};

//--------------------------------------------------------------------------------------------------
// Public Definitions
//--------------------------------------------------------------------------------------------------

/// Entry point of an exception or interrupt.
/// 例外や割り込みの入口
pub type Handler = unsafe extern "C" fn();

/// Entry point of the reset vector. Never returns.
/// reset vectorの入口だよ．戻ってこないよ．
pub type ResetHandler = unsafe extern "C" fn() -> !;

/// Number of slots before the first device interrupt.
/// device割り込みより前にあるslotの数
pub const CORE_VECTOR_COUNT: usize = 16;

/// One word of the vector table.
/// vector tableの1 word
#[derive(Copy, Clone)]
#[repr(C)]
pub union Vector {
    handler: Handler,
    reset: ResetHandler,
    reserved: usize,
}

/// What a vector table index means.
/// vector tableの各indexの意味だよ．
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum Slot {
    /// Index 0. A data word, loaded into `MSP` on reset.
    /// codeではなくdataだよ．reset時にMSPに読み込まれるよ．
    InitialStackPointer,

    /// Index 1.
    Reset,

    /// A system exception that exists on the core variant.
    Exception(Exception),

    /// Architecturally reserved, or an exception the core variant lacks.
    Reserved,

    /// Device interrupt `n`, at index `16 + n`.
    Interrupt(u16),
}

/// Which handler serves which vector.
/// どのvectorをどのhandlerが受け持つかを記録するよ．
///
/// Starts out with every exception and interrupt bound to the same fallback. Individual bindings
/// are replaced with `bind()` and `bind_interrupt()`, usually in a `const` context. There is no
/// binding for the reset vector or the initial stack pointer; both are fixed by the caller of
/// [`VectorTable::new`].
#[derive(Copy, Clone)]
pub struct HandlerBindings<const IRQS: usize> {
    exceptions: [Handler; CORE_VECTOR_COUNT],
    interrupts: [Handler; IRQS],
}

/// The vector table for a core with `IRQS` device interrupts.
/// IRQS個のdevice割り込みを持つcoreのvector table
#[repr(C)]
pub struct VectorTable<const IRQS: usize> {
    core: [Vector; CORE_VECTOR_COUNT],
    interrupts: [Vector; IRQS],
}

//--------------------------------------------------------------------------------------------------
// Public Code
//--------------------------------------------------------------------------------------------------

impl Vector {
    /// A reserved slot.
    pub const RESERVED: Self = Self { reserved: 0 };

    /// A slot pointing to `handler`.
    pub const fn handler(handler: Handler) -> Self {
        Self { handler }
    }

    /// A slot pointing to the reset entry point.
    pub const fn reset(reset: ResetHandler) -> Self {
        Self { reset }
    }

    /// The raw word as the processor sees it.
    /// processorから見たそのままのwordだよ．
    pub fn address(&self) -> usize {
        // どのfieldも1 wordなのでusizeとして読んでよい
        unsafe { self.reserved }
    }

    /// Whether the slot is a placeholder.
    pub fn is_reserved(&self) -> bool {
        self.address() == 0
    }
}

impl Slot {
    /// The meaning of vector table index `index` on the given core variant.
    /// core variantごとにindexの意味を返すよ．
    pub const fn at(index: usize, variant: CoreVariant) -> Self {
        match index {
            0 => Slot::InitialStackPointer,
            1 => Slot::Reset,
            n if n >= CORE_VECTOR_COUNT => Slot::Interrupt((n - CORE_VECTOR_COUNT) as u16),
            n => match Exception::from_number(n) {
                Some(exception) if exception.is_implemented_on(variant) => {
                    Slot::Exception(exception)
                }
                _ => Slot::Reserved,
            },
        }
    }
}

/// The meaning of the sixteen core slots on the given core variant, in vector order.
pub const fn core_layout(variant: CoreVariant) -> [Slot; CORE_VECTOR_COUNT] {
    let mut layout = [Slot::Reserved; CORE_VECTOR_COUNT];

    // const fnの中ではforが使えないのでwhileで回す
    let mut i = 0;
    while i < CORE_VECTOR_COUNT {
        layout[i] = Slot::at(i, variant);
        i += 1;
    }

    layout
}

impl<const IRQS: usize> HandlerBindings<IRQS> {
    /// Create an instance with every vector bound to `default`.
    /// すべてのvectorをdefaultに結びつけた状態から始めるよ．
    pub const fn new(default: Handler) -> Self {
        Self {
            exceptions: [default; CORE_VECTOR_COUNT],
            interrupts: [default; IRQS],
        }
    }

    /// Bind `handler` to `exception`.
    pub const fn bind(mut self, exception: Exception, handler: Handler) -> Self {
        self.exceptions[exception.number()] = handler;
        self
    }

    /// Bind `handler` to device interrupt `irq`.
    /// 範囲外のirqはcompile時に弾かれるよ．
    pub const fn bind_interrupt(mut self, irq: usize, handler: Handler) -> Self {
        assert!(irq < IRQS, "Device interrupt number out of range");

        self.interrupts[irq] = handler;
        self
    }

    /// The handler bound to `exception`.
    pub const fn exception_handler(&self, exception: Exception) -> Handler {
        self.exceptions[exception.number()]
    }

    /// The handler bound to device interrupt `irq`, if the device has it.
    pub fn interrupt_handler(&self, irq: usize) -> Option<Handler> {
        self.interrupts.get(irq).copied()
    }
}

impl<const IRQS: usize> VectorTable<IRQS> {
    /// Assemble the table.
    /// tableを組み立てるよ．
    ///
    /// `stack_top` is not code. It is a linker marker that is only declared as a function, so
    /// that its address fits the same slot type as the handlers.
    /// stack_topはcodeではないよ．handlerと同じ型に収めるために関数として宣言したlinkerの目印だよ．
    pub const fn new(
        stack_top: Handler,
        reset: ResetHandler,
        bindings: &HandlerBindings<IRQS>,
        variant: CoreVariant,
    ) -> Self {
        let layout = core_layout(variant);
        let mut core = [Vector::RESERVED; CORE_VECTOR_COUNT];

        let mut i = 0;
        while i < CORE_VECTOR_COUNT {
            core[i] = match layout[i] {
                Slot::InitialStackPointer => Vector::handler(stack_top),
                Slot::Reset => Vector::reset(reset),
                Slot::Exception(exception) => {
                    Vector::handler(bindings.exception_handler(exception))
                }
                Slot::Reserved | Slot::Interrupt(_) => Vector::RESERVED,
            };
            i += 1;
        }

        let mut interrupts = [Vector::RESERVED; IRQS];
        let mut irq = 0;
        while irq < IRQS {
            interrupts[irq] = Vector::handler(bindings.interrupts[irq]);
            irq += 1;
        }

        Self { core, interrupts }
    }

    /// Number of slots.
    pub const fn len(&self) -> usize {
        CORE_VECTOR_COUNT + IRQS
    }

    /// Always false; index 0 and 1 exist on every core.
    /// index 0と1はどのcoreにもあるので常にfalseだよ．
    pub const fn is_empty(&self) -> bool {
        false
    }

    /// The word at `index`.
    pub fn entry(&self, index: usize) -> Option<&Vector> {
        if index < CORE_VECTOR_COUNT {
            self.core.get(index)
        } else {
            self.interrupts.get(index - CORE_VECTOR_COUNT)
        }
    }

    /// Iterate over all words in vector order.
    pub fn entries(&self) -> impl Iterator<Item = &Vector> {
        self.core.iter().chain(self.interrupts.iter())
    }
}

//--------------------------------------------------------------------------------------------------
// Testing
//--------------------------------------------------------------------------------------------------
