// SPDX-License-Identifier: MIT OR Apache-2.0
//
// Copyright (c) 2018-2022 Andre Richter <andre.o.richter@gmail.com>

//! Memory Management.
//! memory管理
//!
//! The memory layout contract and the two runtime bring-up routines that operate on it.
//!
//! The linker hands the startup code a handful of address markers. Instead of walking raw pointers
//! between them, the markers are wrapped into range descriptors ([`Region`], [`InitImage`]) and the
//! routines access memory through the [`interface::WordMemory`] trait. On the target this is
//! [`PhysicalMemory`], which performs volatile word accesses. On the host it is a
//! [`BackingStore`].
//!
//! The routines do not check bounds. A wrong layout silently corrupts memory, exactly as it would
//! on the hardware.
//! 範囲の検査はしないよ．layoutが間違っていると黙ってmemoryを壊すよ．

use crate::common;
use core::{
    fmt,
    ops::{Add, Sub},
};

//--------------------------------------------------------------------------------------------------
// Public Definitions
//--------------------------------------------------------------------------------------------------

/// The unit in which memory is copied and cleared.
/// copyと0埋めの単位
pub type Word = u32;

/// Size of a [`Word`] in bytes.
pub const WORD_SIZE: usize = core::mem::size_of::<Word>();

/// An address in the target's address space.
/// targetのaddress空間の番地
#[derive(Copy, Clone, Debug, PartialOrd, Ord, PartialEq, Eq)]
pub struct Address {
    value: usize,
}

/// A half-open range `[start, end)` of writable memory.
/// 書き込めるmemoryの半開区間だよ．endは含まないよ．
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct Region {
    start: Address,
    end: Address,
}

/// A writable region together with the load address of its initializer image.
/// 書き込める領域と，その初期値が置いてある番地の組
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct InitImage {
    load: Address,
    region: Region,
}

/// The memory layout contract, as produced by the linker.
/// linkerが作るmemory layoutの取り決めだよ．
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct MemoryLayout {
    stack_top: Address,
    data: InitImage,
    bss: Region,
}

/// Memory interfaces.
/// memoryのinterfaces
pub mod interface {
    use super::{Address, Word};

    /// Word-granular access to the target's address space.
    /// targetのaddress空間にword単位でaccessするよ．
    pub trait WordMemory {
        /// Read the word at `addr`.
        ///
        /// # Safety
        ///
        /// - `addr` must be word aligned and readable.
        ///   addrはword境界に揃っていて読めること．
        unsafe fn read_word(&self, addr: Address) -> Word;

        /// Write `value` to the word at `addr`.
        ///
        /// # Safety
        ///
        /// - `addr` must be word aligned and writable.
        ///   addrはword境界に揃っていて書けること．
        /// - Nothing else may hold a reference into the written word.
        ///   書き込むwordへの参照を他の誰も持っていないこと．
        unsafe fn write_word(&mut self, addr: Address, value: Word);
    }
}

/// The processor's own address space, accessed with volatile loads and stores.
/// processor自身のaddress空間だよ．volatileで読み書きするよ．
pub struct PhysicalMemory;

/// A simulated, word-addressable stretch of memory.
/// hostでtestするための模擬memoryだよ．
///
/// Starts at `base` and spans `WORDS` words. Every write is counted per word, so that callers can
/// verify which words the bring-up routines touched, and how often. Accesses outside the store
/// panic.
pub struct BackingStore<const WORDS: usize> {
    base: Address,
    words: [Word; WORDS],
    writes: [u32; WORDS], // wordごとの書き込み回数
}

//--------------------------------------------------------------------------------------------------
// Public Code
//--------------------------------------------------------------------------------------------------

impl Address {
    /// Create an instance.
    pub const fn new(value: usize) -> Self {
        Self { value }
    }

    /// Convert to usize.
    pub const fn as_usize(self) -> usize {
        self.value
    }

    /// Checks if the address is word aligned.
    pub const fn is_word_aligned(&self) -> bool {
        common::is_aligned(self.value, WORD_SIZE)
    }
}

impl Add<usize> for Address {
    type Output = Self;

    #[inline(always)]
    fn add(self, rhs: usize) -> Self::Output {
        match self.value.checked_add(rhs) {
            None => panic!("Overflow on Address::add"),
            Some(x) => Self::new(x),
        }
    }
}

impl Sub<Address> for Address {
    type Output = usize;

    #[inline(always)]
    fn sub(self, rhs: Address) -> Self::Output {
        match self.value.checked_sub(rhs.value) {
            None => panic!("Overflow on Address::sub"),
            Some(x) => x,
        }
    }
}

impl fmt::Display for Address {
    // 0x2000_1f00のように4桁ずつ区切って表示するよ．
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        let q2: u16 = ((self.value >> 16) & 0xffff) as u16;
        let q1: u16 = (self.value & 0xffff) as u16;

        write!(f, "0x")?;
        write!(f, "{:04x}_", q2)?;
        write!(f, "{:04x}", q1)
    }
}

impl Region {
    /// Create an instance from two markers that are trusted as-is.
    /// linkerの目印をそのまま信じて作るよ．
    ///
    /// # Safety
    ///
    /// - `start` must not lie above `end`.
    ///   startはendより後ろにないこと．
    /// - Both markers must be word aligned, so the size is a whole number of words.
    ///   両方ともword境界に揃っていて，大きさがwordの整数倍であること．
    pub const unsafe fn new_unchecked(start: Address, end: Address) -> Self {
        Self { start, end }
    }

    /// Create an instance, checking the shape of the range.
    /// 範囲の形を検査してから作るよ．
    pub fn new(start: Address, end: Address) -> Result<Self, &'static str> {
        if end < start {
            return Err("Region end lies below its start");
        }

        if !start.is_word_aligned() {
            return Err("Region start is not word aligned");
        }

        if (end - start) % WORD_SIZE != 0 {
            return Err("Region size is not a multiple of the word size");
        }

        Ok(Self { start, end })
    }

    /// The first address of the region.
    pub const fn start(&self) -> Address {
        self.start
    }

    /// The first address past the region.
    pub const fn end(&self) -> Address {
        self.end
    }

    /// Size in bytes.
    pub const fn size(&self) -> usize {
        self.end.value - self.start.value
    }

    /// Number of whole words in the region.
    pub const fn word_count(&self) -> usize {
        self.size() / WORD_SIZE
    }

    /// Checks if the region holds no bytes.
    pub const fn is_empty(&self) -> bool {
        self.start.value == self.end.value
    }

    /// Checks if `addr` lies inside the region.
    pub const fn contains(&self, addr: Address) -> bool {
        addr.value >= self.start.value && addr.value < self.end.value
    }
}

impl InitImage {
    /// Create an instance.
    ///
    /// The image at `load` must be at least as large as `region`.
    /// loadにある初期値はregion以上の大きさがあること．
    pub const fn new(load: Address, region: Region) -> Self {
        Self { load, region }
    }

    /// Where the initializer image is stored, typically in flash.
    /// 初期値が置いてある番地だよ．普通はflashの中だよ．
    pub const fn load(&self) -> Address {
        self.load
    }

    /// Where the initialized data lives at run time.
    pub const fn region(&self) -> Region {
        self.region
    }
}

impl MemoryLayout {
    /// Create an instance.
    pub const fn new(stack_top: Address, data: InitImage, bss: Region) -> Self {
        Self {
            stack_top,
            data,
            bss,
        }
    }

    /// The initial stack pointer.
    pub const fn stack_top(&self) -> Address {
        self.stack_top
    }

    /// The `.data` section and its initializer image.
    pub const fn data(&self) -> InitImage {
        self.data
    }

    /// The `.bss` section.
    pub const fn bss(&self) -> Region {
        self.bss
    }
}

impl interface::WordMemory for PhysicalMemory {
    #[inline(always)]
    unsafe fn read_word(&self, addr: Address) -> Word {
        core::ptr::read_volatile(addr.as_usize() as *const Word) // 最適化で消されないようにvolatileで読む
    }

    #[inline(always)]
    unsafe fn write_word(&mut self, addr: Address, value: Word) {
        core::ptr::write_volatile(addr.as_usize() as *mut Word, value)
    }
}

impl<const WORDS: usize> BackingStore<WORDS> {
    /// Create an instance where every word holds `pattern`.
    pub const fn new(base: Address, pattern: Word) -> Self {
        assert!(base.is_word_aligned());

        Self {
            base,
            words: [pattern; WORDS],
            writes: [0; WORDS],
        }
    }

    /// The region covered by the store.
    pub const fn region(&self) -> Region {
        Region {
            start: self.base,
            end: Address::new(self.base.value + WORDS * WORD_SIZE),
        }
    }

    /// Place `image` at `addr` without counting it as writes. Models content that exists before
    /// reset, e.g. flash.
    /// 書き込み回数に数えずにimageを置くよ．flashのようにreset前からある内容の代わりだよ．
    pub fn preload(&mut self, addr: Address, image: &[Word]) {
        let first = self.index_of(addr);

        self.words[first..first + image.len()].copy_from_slice(image);
    }

    /// Return the word at `addr`.
    pub fn word(&self, addr: Address) -> Word {
        self.words[self.index_of(addr)]
    }

    /// Return the words of `region`.
    pub fn words(&self, region: Region) -> &[Word] {
        let first = self.index_of(region.start());

        &self.words[first..first + region.word_count()]
    }

    /// How often the word at `addr` has been written.
    pub fn write_count(&self, addr: Address) -> u32 {
        self.writes[self.index_of(addr)]
    }

    /// Total number of word writes.
    pub fn total_writes(&self) -> u32 {
        self.writes.iter().sum()
    }

    fn index_of(&self, addr: Address) -> usize {
        if !addr.is_word_aligned() {
            panic!("Unaligned access to backing store at {}", addr);
        }

        if !self.region().contains(addr) {
            panic!("Access outside of backing store at {}", addr);
        }

        (addr - self.base) / WORD_SIZE
    }
}

impl<const WORDS: usize> interface::WordMemory for BackingStore<WORDS> {
    unsafe fn read_word(&self, addr: Address) -> Word {
        self.word(addr)
    }

    unsafe fn write_word(&mut self, addr: Address, value: Word) {
        let i = self.index_of(addr);

        self.words[i] = value;
        self.writes[i] += 1; // 書き込み回数を数える
    }
}

/// Copy the initializer image into its run-time region, one word at a time.
/// 初期値を1 wordずつ実行時の領域に写すよ．
///
/// Returns the destination cursor after the last write, which equals `image.region().end()` for a
/// well-formed image.
/// 最後に書き込んだ直後の番地を返すよ．
///
/// # Safety
///
/// - The image must be readable for the size of the region, and the region writable.
///   初期値はregionの大きさ分読めて，regionは書けること．
/// - Must only be called from the reset sequence, while nothing else uses the region.
///   他の誰もregionを使っていないreset処理の中からだけ呼ぶこと．
pub unsafe fn restore_initialized_data<M>(memory: &mut M, image: &InitImage) -> Address
where
    M: interface::WordMemory,
{
    let mut src = image.load();
    let mut dst = image.region().start();
    let end = image.region().end();

    // 範囲は検査しない
    while dst < end {
        let value = memory.read_word(src);
        memory.write_word(dst, value);

        src = src + WORD_SIZE; // 読み出し元を進める
        dst = dst + WORD_SIZE; // 書き込み先を進める
    }

    dst
}

/// Zero out a region, one word at a time.
/// 領域を1 wordずつ0で埋めるよ．
///
/// Returns the cursor after the last write, which equals `region.end()` for a well-formed region.
///
/// # Safety
///
/// - The region must be writable.
///   regionは書けること．
/// - Must only be called from the reset sequence, while nothing else uses the region.
///   他の誰もregionを使っていないreset処理の中からだけ呼ぶこと．
pub unsafe fn zero_fill<M>(memory: &mut M, region: &Region) -> Address
where
    M: interface::WordMemory,
{
    let mut dst = region.start();
    let end = region.end();

    while dst < end {
        memory.write_word(dst, 0);

        dst = dst + WORD_SIZE; // 書き込み先を進める
    }

    dst
}

//--------------------------------------------------------------------------------------------------
// Testing
//--------------------------------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use test_macros::boot_test;

    const FLASH: usize = 0x0800_0000;
    const SRAM: usize = 0x2000_0000;
    const GARBAGE: Word = 0xDEAD_BEEF; // 電源投入直後のごみ

    fn region(start: usize, end: usize) -> Region {
        Region::new(Address::new(start), Address::new(end)).unwrap()
    }

    /// Malformed ranges are rejected by the checked constructor.
    #[boot_test]
    fn region_new_rejects_malformed_ranges() {
        let a = Address::new;

        assert!(Region::new(a(SRAM + 8), a(SRAM)).is_err());
        assert!(Region::new(a(SRAM + 2), a(SRAM + 6)).is_err());
        assert!(Region::new(a(SRAM), a(SRAM + 6)).is_err());
        assert!(Region::new(a(SRAM), a(SRAM)).is_ok());

        let r = region(SRAM, SRAM + 16);
        assert_eq!(r.size(), 16);
        assert_eq!(r.word_count(), 4);
        assert!(r.contains(a(SRAM + 12)));
        assert!(!r.contains(a(SRAM + 16)));
    }

    /// The copy writes exactly one word per destination word and stops at the end marker.
    #[boot_test]
    fn restore_copies_every_word_exactly_once() {
        let mut mem: BackingStore<64> = BackingStore::new(Address::new(SRAM), GARBAGE);
        let image = [0x1111_1111, 0x2222_2222, 0x3333_3333, 0x4444_4444, 0x5555_5555];
        let load = Address::new(SRAM + 0x80);
        mem.preload(load, &image);

        let data = region(SRAM + 0x10, SRAM + 0x10 + image.len() * WORD_SIZE);
        let end = unsafe { restore_initialized_data(&mut mem, &InitImage::new(load, data)) };

        assert_eq!(end, data.end());
        assert_eq!(mem.words(data), &image);
        assert_eq!(mem.total_writes() as usize, data.word_count());
        assert_eq!(mem.write_count(data.start()), 1);
        assert_eq!(mem.word(Address::new(SRAM + 0x0c)), GARBAGE);
        assert_eq!(mem.word(data.end()), GARBAGE);
    }

    /// Every word of the region is zero afterwards, neighbours are untouched.
    #[boot_test]
    fn zero_fill_clears_region_and_nothing_else() {
        let mut mem: BackingStore<32> = BackingStore::new(Address::new(SRAM), GARBAGE);
        let bss = region(SRAM + 0x20, SRAM + 0x40);

        let end = unsafe { zero_fill(&mut mem, &bss) };

        assert_eq!(end, bss.end());
        assert!(mem.words(bss).iter().all(|w| *w == 0));
        assert_eq!(mem.total_writes() as usize, bss.word_count());

        let whole = mem.region();
        let mut addr = whole.start();
        while addr < whole.end() {
            if !bss.contains(addr) {
                assert_eq!(mem.word(addr), GARBAGE);
                assert_eq!(mem.write_count(addr), 0);
            }
            addr = addr + WORD_SIZE;
        }
    }

    /// Empty ranges terminate immediately without a single write.
    #[boot_test]
    fn empty_ranges_write_nothing() {
        let mut mem: BackingStore<8> = BackingStore::new(Address::new(SRAM), GARBAGE);
        let empty = region(SRAM + 8, SRAM + 8);

        let copy_end = unsafe {
            restore_initialized_data(&mut mem, &InitImage::new(Address::new(FLASH), empty))
        };
        let zero_end = unsafe { zero_fill(&mut mem, &empty) };

        assert_eq!(copy_end, empty.start());
        assert_eq!(zero_end, empty.start());
        assert_eq!(mem.total_writes(), 0);
    }

    /// Running the routines again after a reset yields the same memory contents.
    #[boot_test]
    fn routines_are_idempotent() {
        let mut mem: BackingStore<16> = BackingStore::new(Address::new(SRAM), GARBAGE);
        let load = Address::new(SRAM + 0x30);
        mem.preload(load, &[7, 8, 9, 10]);
        let image = InitImage::new(load, region(SRAM, SRAM + 0x10));
        let bss = region(SRAM + 0x10, SRAM + 0x20);

        unsafe {
            restore_initialized_data(&mut mem, &image);
            zero_fill(&mut mem, &bss);
        }
        let first: [Word; 8] = mem.words(region(SRAM, SRAM + 0x20)).try_into().unwrap();

        unsafe {
            restore_initialized_data(&mut mem, &image);
            zero_fill(&mut mem, &bss);
        }

        assert_eq!(mem.words(region(SRAM, SRAM + 0x20)), &first);
    }

    /// Addresses print in the grouped hex format.
    #[boot_test]
    fn address_display() {
        assert_eq!(Address::new(0x2000_1f00).to_string(), "0x2000_1f00");
    }
}
