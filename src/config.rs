// SPDX-License-Identifier: MIT OR Apache-2.0
//
// Copyright (c) 2022 Andre Richter <andre.o.richter@gmail.com>

//! Build-time configuration.
//! build時の設定
//!
//! Cargo features are pure presence switches. This module turns them into constants, so that the
//! rest of the code can use ordinary `if` instead of scattering `#[cfg]` attributes around.

use crate::exception::CoreVariant;

//--------------------------------------------------------------------------------------------------
// Public Definitions
//--------------------------------------------------------------------------------------------------

/// Whether the target is an ARMv6-M class core without the configurable fault units.
/// targetがARMv6-Mのcoreかどうか
pub const CORTEX_M_BASELINE: bool = cfg!(any(
    feature = "cortex_m0",
    feature = "cortex_m0plus",
    feature = "cortex_m1"
));

/// The core variant the vector table is built for.
pub const CORE_VARIANT: CoreVariant = if CORTEX_M_BASELINE {
    CoreVariant::Baseline
} else {
    CoreVariant::Mainline
};

/// Capability switches of the micro-ecc library.
/// micro-ecc libraryの機能のswitch
///
/// The startup code does not use these. They are exported for the crypto collaborator, which
/// compiles only the curves enabled here.
pub mod micro_ecc {
    /// secp160r1 is available.
    pub const SUPPORTS_SECP160R1: bool = cfg!(feature = "micro_ecc_secp160r1");

    /// secp192r1 is available.
    pub const SUPPORTS_SECP192R1: bool = cfg!(feature = "micro_ecc_secp192r1");

    /// secp224r1 is available.
    pub const SUPPORTS_SECP224R1: bool = cfg!(feature = "micro_ecc_secp224r1");

    /// secp256r1 is available.
    pub const SUPPORTS_SECP256R1: bool = cfg!(feature = "micro_ecc_secp256r1");

    /// secp256k1 is available.
    pub const SUPPORTS_SECP256K1: bool = cfg!(feature = "micro_ecc_secp256k1");

    /// Points may be passed in compressed form.
    pub const SUPPORT_COMPRESSED_POINT: bool = cfg!(feature = "micro_ecc_compressed_point");

    /// Names of all enabled curves, in the order micro-ecc lists them.
    pub fn enabled_curves() -> impl Iterator<Item = &'static str> {
        [
            ("secp160r1", SUPPORTS_SECP160R1),
            ("secp192r1", SUPPORTS_SECP192R1),
            ("secp224r1", SUPPORTS_SECP224R1),
            ("secp256r1", SUPPORTS_SECP256R1),
            ("secp256k1", SUPPORTS_SECP256K1),
        ]
        .into_iter()
        .filter(|(_, enabled)| *enabled)
        .map(|(name, _)| name)
    }
}

//--------------------------------------------------------------------------------------------------
// Testing
//--------------------------------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use test_macros::boot_test;

    /// The core variant follows the feature selection.
    #[boot_test]
    fn core_variant_matches_features() {
        match CORE_VARIANT {
            CoreVariant::Baseline => assert!(CORTEX_M_BASELINE),
            CoreVariant::Mainline => assert!(!CORTEX_M_BASELINE),
        }
    }

    /// The curve list agrees with the individual switches.
    #[boot_test]
    fn enabled_curves_follow_switches() {
        let expected = [
            micro_ecc::SUPPORTS_SECP160R1,
            micro_ecc::SUPPORTS_SECP192R1,
            micro_ecc::SUPPORTS_SECP224R1,
            micro_ecc::SUPPORTS_SECP256R1,
            micro_ecc::SUPPORTS_SECP256K1,
        ]
        .iter()
        .filter(|enabled| **enabled)
        .count();

        assert_eq!(micro_ecc::enabled_curves().count(), expected);
    }
}
