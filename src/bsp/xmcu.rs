// SPDX-License-Identifier: MIT OR Apache-2.0
//
// Copyright (c) 2018-2022 Andre Richter <andre.o.richter@gmail.com>

//! Top-level BSP file for the xmcu family.
//! xmcu familyのBSPの最上位fileだよ．

pub mod exception;

#[cfg(all(target_arch = "arm", target_os = "none"))]
pub mod boot;
#[cfg(all(target_arch = "arm", target_os = "none"))]
pub mod memory;

//--------------------------------------------------------------------------------------------------
// Public Code
//--------------------------------------------------------------------------------------------------

/// Board identification.
/// boardの名前
pub fn board_name() -> &'static str {
    if crate::config::CORTEX_M_BASELINE {
        "xmcu (ARMv6-M)"
    } else {
        "xmcu (ARMv7-M)"
    }
}

//--------------------------------------------------------------------------------------------------
// Testing
//--------------------------------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use test_macros::boot_test;

    const LINK_SCRIPT: &str = include_str!("xmcu/link.ld");

    /// Byte offset of `needle` in the link script.
    fn position(needle: &str) -> usize {
        LINK_SCRIPT
            .find(needle)
            .unwrap_or_else(|| panic!("missing: {}", needle))
    }

    /// Every symbol `memory::layout()` and the init arrays refer to is defined by the link script.
    /// memory::layout()とinit arrayが参照する目印はすべてlink scriptで定義されているよ．
    #[boot_test]
    fn link_script_defines_layout_markers() {
        for marker in [
            "_estack =",
            "_sidata =",
            "_sdata =",
            "_edata =",
            "_sbss =",
            "_ebss =",
            "__preinit_array_start =",
            "__preinit_array_end =",
            "__init_array_start =",
            "__init_array_end =",
            "__fini_array_start =",
            "__fini_array_end =",
        ] {
            position(marker);
        }

        // 始まりの目印は終わりの目印より前にあること
        assert!(position("_sdata =") < position("_edata ="));
        assert!(position("_sbss =") < position("_ebss ="));
        assert!(position("__init_array_start =") < position("__init_array_end ="));
    }

    /// The vector table sits at the start of flash, and the weak handler aliases are pulled in.
    /// vector tableはflashの先頭に置かれ，弱いhandlerの別名も取り込まれるよ．
    #[boot_test]
    fn link_script_places_vector_table_first() {
        assert!(LINK_SCRIPT.contains("ENTRY(Reset_Handler)"));
        assert!(LINK_SCRIPT.contains(".isr_vector ORIGIN(FLASH) :"));
        assert!(LINK_SCRIPT.contains("KEEP(*(.isr_vector))"));
        assert!(LINK_SCRIPT.contains("INCLUDE handlers.ld"));

        // .isr_vectorは他のどのoutput sectionよりも前
        assert!(position(".isr_vector") < position(".text :"));

        // .dataはRAMで動き，初期値はFLASHに置かれる
        assert!(LINK_SCRIPT.contains("} > RAM AT > FLASH"));
        assert!(LINK_SCRIPT.contains("_sidata = LOADADDR(.data);"));
    }
}
