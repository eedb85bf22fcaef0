// SPDX-License-Identifier: MIT OR Apache-2.0
//
// Copyright (c) 2020-2022 Andre Richter <andre.o.richter@gmail.com>

//! Exception handling.
//! 例外処理
//!
//! The Cortex-M exception model: the system exceptions in vector order, the two core variants that
//! differ in which of them exist, and the fallback that catches every vector nobody claimed.

#[cfg(all(target_arch = "arm", target_os = "none"))]
#[path = "_arch/arm/exception.rs"]
mod arch_exception;

pub mod vector_table;

use crate::cpu;
use core::{
    fmt,
    sync::atomic::{AtomicU32, Ordering},
};
use tock_registers::{register_bitfields, LocalRegisterCopy};

//--------------------------------------------------------------------------------------------------
// Public Definitions
//--------------------------------------------------------------------------------------------------

register_bitfields! {
    u32,

    /// Interrupt Control and State Register
    ICSR [
        /// Exception number of the currently executing vector. Zero in thread mode.
        /// 今実行中のvectorの番号だよ．thread modeなら0だよ．
        VECTACTIVE OFFSET(0) NUMBITS(9) [],

        /// Return to base level: no other exception is active.
        RETTOBASE OFFSET(11) NUMBITS(1) [],

        /// Highest priority pending, enabled exception number.
        VECTPENDING OFFSET(12) NUMBITS(9) []
    ]
}

/// The system exceptions, numbered by their vector index.
/// system例外たち．番号はvector tableのindexと同じだよ．
#[allow(missing_docs)]
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
#[repr(usize)]
pub enum Exception {
    NonMaskableInt = 2,
    HardFault = 3,
    MemoryManagement = 4,
    BusFault = 5,
    UsageFault = 6,
    SVCall = 11,
    DebugMonitor = 12,
    PendSV = 14,
    SysTick = 15,
}

/// Cortex-M core variants, as far as the vector table is concerned.
/// vector tableに関係する範囲でのCortex-Mのcoreの種類
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum CoreVariant {
    /// ARMv6-M: Cortex-M0, M0+ and M1. No MemManage, BusFault, UsageFault or DebugMonitor.
    /// 一部のfault例外とDebugMonitorがないよ．
    Baseline,

    /// ARMv7-M and later: the full set of system exceptions.
    Mainline,
}

/// What the processor was executing, as told by `ICSR.VECTACTIVE`.
/// ICSR.VECTACTIVEから分かる，processorが実行していたもの
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum ActiveVector {
    /// Thread mode, no exception active.
    Thread,

    /// A system exception.
    Exception(Exception),

    /// A system vector number that is reserved on every core.
    Reserved(u16),

    /// A device interrupt, numbered from zero.
    Interrupt(u16),
}

//--------------------------------------------------------------------------------------------------
// Global instances
//--------------------------------------------------------------------------------------------------

/// Raw `ICSR` value captured by the last unhandled exception. Zero if there was none.
/// 最後に処理されなかった例外のICSRの値だよ．なければ0だよ．
///
/// Readable from a debugger as `LAST_UNHANDLED_ICSR` once the core sits in the fallback loop.
/// coreがfallbackの無限loopにいるときdebuggerから読めるよ．
#[no_mangle]
static LAST_UNHANDLED_ICSR: AtomicU32 = AtomicU32::new(0);

//--------------------------------------------------------------------------------------------------
// Public Code
//--------------------------------------------------------------------------------------------------

impl Exception {
    /// All system exceptions, in ascending vector order.
    pub const ALL: [Exception; 9] = [
        Exception::NonMaskableInt,
        Exception::HardFault,
        Exception::MemoryManagement,
        Exception::BusFault,
        Exception::UsageFault,
        Exception::SVCall,
        Exception::DebugMonitor,
        Exception::PendSV,
        Exception::SysTick,
    ];

    /// The vector table index.
    pub const fn number(self) -> usize {
        self as usize
    }

    /// Look up the exception with vector index `number`.
    /// vectorの番号から例外を探すよ．
    pub const fn from_number(number: usize) -> Option<Exception> {
        let mut i = 0;
        while i < Self::ALL.len() {
            if Self::ALL[i].number() == number {
                return Some(Self::ALL[i]);
            }
            i += 1;
        }

        None
    }

    /// Whether the exception has a vector on the given core variant.
    pub const fn is_implemented_on(self, variant: CoreVariant) -> bool {
        match variant {
            CoreVariant::Mainline => true,
            CoreVariant::Baseline => !matches!(
                self,
                Exception::MemoryManagement
                    | Exception::BusFault
                    | Exception::UsageFault
                    | Exception::DebugMonitor
            ),
        }
    }

    /// The link-level name of the overridable handler.
    /// 上書きできるhandlerのlink時の名前
    pub const fn symbol(self) -> &'static str {
        match self {
            Exception::NonMaskableInt => "NMI_Handler",
            Exception::HardFault => "HardFault_Handler",
            Exception::MemoryManagement => "MemManage_Handler",
            Exception::BusFault => "BusFault_Handler",
            Exception::UsageFault => "UsageFault_Handler",
            Exception::SVCall => "SVC_Handler",
            Exception::DebugMonitor => "DebugMon_Handler",
            Exception::PendSV => "PendSV_Handler",
            Exception::SysTick => "SysTick_Handler",
        }
    }
}

impl fmt::Display for Exception {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{} (vector {})", self.symbol(), self.number())
    }
}

impl ActiveVector {
    /// Decode the active vector from a raw `ICSR` value.
    pub fn from_icsr(icsr: u32) -> Self {
        let icsr: LocalRegisterCopy<u32, ICSR::Register> = LocalRegisterCopy::new(icsr);
        let number = icsr.read(ICSR::VECTACTIVE) as usize;

        match number {
            0 => ActiveVector::Thread,
            n if n >= vector_table::CORE_VECTOR_COUNT => {
                ActiveVector::Interrupt((n - vector_table::CORE_VECTOR_COUNT) as u16)
            }
            n => match Exception::from_number(n) {
                Some(exception) => ActiveVector::Exception(exception),
                None => ActiveVector::Reserved(n as u16),
            },
        }
    }
}

/// The vector that last ended up in the fallback handler, if any.
/// 最後にfallback handlerに来たvector
pub fn last_unhandled_vector() -> Option<ActiveVector> {
    match LAST_UNHANDLED_ICSR.load(Ordering::Relaxed) {
        0 => None,
        icsr => Some(ActiveVector::from_icsr(icsr)),
    }
}

/// Fallback for every vector without a dedicated handler.
/// 専用のhandlerがないvectorすべての受け皿だよ．
///
/// Records `icsr` for the debugger and parks the core. Never returns, so an unhandled exception
/// can not fall through into code that was not meant to run.
/// icsrをdebugger用に記録してcoreを止めるよ．戻ってこないよ．
pub fn unhandled(icsr: u32) -> ! {
    LAST_UNHANDLED_ICSR.store(icsr, Ordering::Relaxed); // debuggerから見えるように残す

    cpu::wait_forever() // 無限loop
}

//--------------------------------------------------------------------------------------------------
// Testing
//--------------------------------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use test_macros::boot_test;

    /// Vector numbers round-trip through the lookup.
    #[boot_test]
    fn exception_numbers_are_canonical() {
        let numbers: [usize; 9] = [2, 3, 4, 5, 6, 11, 12, 14, 15];

        for (exception, number) in Exception::ALL.iter().zip(numbers) {
            assert_eq!(exception.number(), number);
            assert_eq!(Exception::from_number(number), Some(*exception));
        }

        for reserved in [0, 1, 7, 8, 9, 10, 13, 16] {
            assert_eq!(Exception::from_number(reserved), None);
        }
    }

    /// Baseline cores lack exactly the configurable faults and the debug monitor.
    #[boot_test]
    fn baseline_lacks_fault_units() {
        let missing: [Exception; 4] = [
            Exception::MemoryManagement,
            Exception::BusFault,
            Exception::UsageFault,
            Exception::DebugMonitor,
        ];

        for exception in Exception::ALL {
            assert!(exception.is_implemented_on(CoreVariant::Mainline));
            assert_eq!(
                exception.is_implemented_on(CoreVariant::Baseline),
                !missing.contains(&exception)
            );
        }
    }

    /// VECTACTIVE is decoded from the low bits only.
    #[boot_test]
    fn active_vector_from_icsr() {
        assert_eq!(ActiveVector::from_icsr(0), ActiveVector::Thread);
        assert_eq!(
            ActiveVector::from_icsr(3),
            ActiveVector::Exception(Exception::HardFault)
        );
        assert_eq!(ActiveVector::from_icsr(7), ActiveVector::Reserved(7));
        assert_eq!(ActiveVector::from_icsr(16), ActiveVector::Interrupt(0));

        // VECTPENDING = 17, RETTOBASE set, VECTACTIVE = 21.
        let icsr = (17 << 12) | (1 << 11) | 21;
        assert_eq!(ActiveVector::from_icsr(icsr), ActiveVector::Interrupt(5));
    }

    /// Every overridable exception has an alias in the link fragment.
    #[boot_test]
    fn link_fragment_provides_every_handler() {
        let fragment = include_str!("bsp/xmcu/handlers.ld");

        for exception in Exception::ALL {
            let line = format!("PROVIDE({} = Default_Handler);", exception.symbol());
            assert!(fragment.contains(&line), "missing: {}", line);
        }
        assert!(fragment.contains("PROVIDE(SystemInit = DefaultSystemInit);"));
    }
}
