// SPDX-License-Identifier: MIT OR Apache-2.0
//
// Copyright (c) 2018-2022 Andre Richter <andre.o.richter@gmail.com>

//! Architectural exception handling.
//! archに依存する例外処理
//!
//! # Orientation
//!
//! Since arch modules are imported into generic modules using the path attribute, the path of this
//! file is:
//!
//! crate::exception::arch_exception

use super::{
    vector_table::{HandlerBindings, VectorTable},
    Exception, ICSR,
};
use crate::{bsp, common::MMIODerefWrapper, config, cpu};
use tock_registers::{
    interfaces::Readable,
    register_structs,
    registers::{ReadOnly, ReadWrite},
};

//--------------------------------------------------------------------------------------------------
// Private Definitions
//--------------------------------------------------------------------------------------------------

register_structs! {
    #[allow(non_snake_case)]
    RegisterBlock {
        (0x00 => CPUID: ReadOnly<u32>),
        (0x04 => ICSR: ReadWrite<u32, ICSR::Register>),
        (0x08 => @END),
    }
}

/// System Control Block, as far as the fallback handler needs it.
/// fallback handlerが使う分だけのSystem Control Block
const SCB: MMIODerefWrapper<RegisterBlock> = unsafe { MMIODerefWrapper::new(0xE000_ED00) };

// Handlers without a strong definition resolve to `Default_Handler` through `handlers.ld`.
// 定義されていないhandlerはhandlers.ldでDefault_Handlerに解決されるよ．
extern "C" {
    fn NMI_Handler();
    fn HardFault_Handler();
    fn MemManage_Handler();
    fn BusFault_Handler();
    fn UsageFault_Handler();
    fn SVC_Handler();
    fn DebugMon_Handler();
    fn PendSV_Handler();
    fn SysTick_Handler();
}

const BINDINGS: HandlerBindings<{ bsp::exception::DEVICE_INTERRUPT_COUNT }> =
    HandlerBindings::new(Default_Handler)
        .bind(Exception::NonMaskableInt, NMI_Handler)
        .bind(Exception::HardFault, HardFault_Handler)
        .bind(Exception::MemoryManagement, MemManage_Handler)
        .bind(Exception::BusFault, BusFault_Handler)
        .bind(Exception::UsageFault, UsageFault_Handler)
        .bind(Exception::SVCall, SVC_Handler)
        .bind(Exception::DebugMonitor, DebugMon_Handler)
        .bind(Exception::PendSV, PendSV_Handler)
        .bind(Exception::SysTick, SysTick_Handler);

//--------------------------------------------------------------------------------------------------
// Global instances
//--------------------------------------------------------------------------------------------------

/// The table the processor fetches its vectors from. The linker script places `.isr_vector` at
/// the vector base.
/// processorがvectorを読み出すtableだよ．linker scriptが.isr_vectorをvector baseに置くよ．
#[link_section = ".isr_vector"]
#[used]
#[no_mangle]
static __ISR_VECTOR: VectorTable<{ bsp::exception::DEVICE_INTERRUPT_COUNT }> = VectorTable::new(
    bsp::memory::_estack,
    cpu::boot::Reset_Handler,
    &BINDINGS,
    config::CORE_VARIANT,
);

//--------------------------------------------------------------------------------------------------
// Public Code
//--------------------------------------------------------------------------------------------------

/// The shared fallback for every exception and interrupt.
/// すべての例外と割り込みに共通のfallbackだよ．
///
/// # Safety
///
/// - Only to be entered by the processor through the vector table.
///   vector tableを通してprocessorからだけ呼ばれること．
#[no_mangle]
pub unsafe extern "C" fn Default_Handler() {
    super::unhandled(SCB.ICSR.get()) // 戻ってこない
}

/// Stands in for `SystemInit()` if the board does not provide one.
/// boardがSystemInit()を用意しないときの代わりだよ．
#[no_mangle]
pub extern "C" fn DefaultSystemInit() {}
