// SPDX-License-Identifier: MIT OR Apache-2.0
//
// Copyright (c) 2020-2022 Andre Richter <andre.o.richter@gmail.com>

//! Synchronization primitives.
//! 同期の仕組み
//!
//! # Resources
//!
//!   - <https://doc.rust-lang.org/book/ch16-04-extensible-concurrency-sync-and-send.html>
//!   - <https://stackoverflow.com/questions/59428096/understanding-the-send-trait>
//!   - <https://doc.rust-lang.org/std/cell/index.html>

use core::cell::UnsafeCell;

//--------------------------------------------------------------------------------------------------
// Public Definitions
//--------------------------------------------------------------------------------------------------

/// Synchronization interfaces.
/// 同期のinterfaces
pub mod interface {

    /// A reader-writer exclusion type.
    ///
    /// The implementing object allows either a number of readers or at most one writer at any point
    /// in time.
    pub trait ReadWriteEx {
        /// The type of encapsulated data.
        type Data;

        /// Grants temporary mutable access to the encapsulated data.
        /// closure(f)がwrapされたdataに一時的にmutable accessできるようにするよ．
        ///
        /// # Safety
        ///
        /// - No reader may be active at the same time.
        ///   同時に読んでいる人がいないこと．
        unsafe fn write<'a, R>(&'a self, f: impl FnOnce(&'a mut Self::Data) -> R) -> R;

        /// Grants temporary immutable access to the encapsulated data.
        fn read<'a, R>(&'a self, f: impl FnOnce(&'a Self::Data) -> R) -> R;
    }
}

/// A pseudo-lock that is RW during the single-threaded startup phase and RO afterwards.
/// 起動中だけ書けて，そのあとは読むだけの簡易的なlock
///
/// Intended to encapsulate data that is populated before `main()` runs, and read-only
/// afterwards. Writes are only sound while nothing else can observe the data, which is the case
/// during the reset sequence: one core, no interrupts enabled.
pub struct InitStateLock<T>
where
    T: ?Sized, // T型はSized traitを実装していなくてもよい
{
    data: UnsafeCell<T>, // T型をUnsafeCellでwrapしたやつ
}

//--------------------------------------------------------------------------------------------------
// Public Code
//--------------------------------------------------------------------------------------------------

unsafe impl<T> Send for InitStateLock<T> where T: ?Sized + Send {}
unsafe impl<T> Sync for InitStateLock<T> where T: ?Sized + Send + Sync {}

impl<T> InitStateLock<T> {
    /// Create an instance.
    pub const fn new(data: T) -> Self {
        Self {
            data: UnsafeCell::new(data),
        }
    }
}

//------------------------------------------------------------------------------
// OS Interface Code
//------------------------------------------------------------------------------

impl<T> interface::ReadWriteEx for InitStateLock<T> {
    type Data = T;

    unsafe fn write<'a, R>(&'a self, f: impl FnOnce(&'a mut Self::Data) -> R) -> R {
        let data = &mut *self.data.get(); // UnsafeCellの中身に対するmutableな参照

        f(data)
    }

    fn read<'a, R>(&'a self, f: impl FnOnce(&'a Self::Data) -> R) -> R {
        let data = unsafe { &*self.data.get() };

        f(data)
    }
}

//--------------------------------------------------------------------------------------------------
// Testing
//--------------------------------------------------------------------------------------------------
