//! The bounded history: a hash table of bucket heads plus a fixed-capacity
//! ring of position records linked into singly-linked hash chains.
//!
//! Grounded on the teacher's `Dict`/`Match3` pairing in `compress.rs`: a
//! `zerocopy`-derived scratch struct that can be zero-allocated with one
//! `Box::new_zeroed()` call, plus a thin view type that borrows it for the
//! duration of one encode call.

#[cfg(all(feature = "alloc", not(feature = "std")))]
extern crate alloc;

#[cfg(all(feature = "alloc", not(feature = "std")))]
use alloc::boxed::Box;
#[cfg(all(feature = "alloc", feature = "std"))]
use std::boxed::Box;

use zerocopy::{FromBytes, Immutable, IntoBytes, KnownLayout};

use crate::hash::hash_index;

/// Number of entries in the history ring (`H` in the wire-format notes).
pub(crate) const HIST_SIZE: usize = 4096;
/// Largest hash table size the encoder ever selects.
pub(crate) const MAX_HASHSZ: usize = 8192;
/// Maximum offset a back-reference can encode.
pub(crate) const MAX_OFFSET: usize = 4095;
/// Chain candidates visited before the match finder gives up regardless of
/// quality.
pub(crate) const MAX_CHAIN: u32 = 256;

/// One recorded position in the source buffer, linked into the hash chain of
/// the 4-byte window starting there.
///
/// `next == 0` and bucket heads of `0` both mean "nothing here", slot `0` of
/// the ring is never written, the same sentinel convention the C history
/// table uses for its `INVALID_ENTRY`.
#[derive(Clone, Copy, FromBytes, IntoBytes, KnownLayout, Immutable)]
#[repr(C)]
struct HistEntry {
    pos: usize,
    next: u16,
    hindex: u16,
}

const EMPTY_ENTRY: HistEntry = HistEntry { pos: 0, next: 0, hindex: 0 };

/// Zero-initializable scratch space for one encode call: the hash table and
/// the history ring it indexes into.
///
/// Large enough (roughly 80 KiB) that it belongs on the heap or in a
/// caller-owned static, never on the stack; callers reuse one `Scratch`
/// across many calls via [`crate::encode::encode_no_alloc`].
#[derive(Clone, FromBytes, IntoBytes, KnownLayout, Immutable)]
pub struct Scratch {
    hist_start: [u16; MAX_HASHSZ],
    entries: [HistEntry; HIST_SIZE + 1],
}

impl Scratch {
    /// A zeroed scratch buffer, boxed without ever materializing it on the
    /// stack first.
    #[cfg(feature = "alloc")]
    pub fn new() -> Box<Scratch> {
        use zerocopy::FromZeros;
        Scratch::new_box_zeroed().expect("zero allocation for Scratch failed")
    }

    /// A zeroed scratch buffer for `static` storage in callers that cannot
    /// allocate at all, e.g. `static mut SCRATCH: Scratch = Scratch::new_const();`.
    pub const fn new_const() -> Self {
        Scratch { hist_start: [0; MAX_HASHSZ], entries: [EMPTY_ENTRY; HIST_SIZE + 1] }
    }
}

impl Default for Scratch {
    fn default() -> Self {
        Scratch::new_const()
    }
}

/// A borrowed, freshly-reset view over a [`Scratch`] for one encode call.
///
/// Construction zeroes the portion of the hash table this call will use
/// (`hashsz` entries) and restarts the ring's write cursor; it does not
/// touch the ring's stale position records, which become unreachable the
/// moment every bucket that could point to them is cleared.
pub(crate) struct HistoryRing<'s> {
    hist_start: &'s mut [u16],
    entries: &'s mut [HistEntry; HIST_SIZE + 1],
    write_cursor: u16,
    wrapped: bool,
    pub(crate) mask: u16,
}

impl<'s> HistoryRing<'s> {
    pub(crate) fn new(scratch: &'s mut Scratch, hashsz: usize) -> Self {
        let hist_start = &mut scratch.hist_start[..hashsz];
        hist_start.iter_mut().for_each(|h| *h = 0);
        HistoryRing {
            hist_start,
            entries: &mut scratch.entries,
            write_cursor: 1,
            wrapped: false,
            mask: (hashsz - 1) as u16,
        }
    }

    pub(crate) fn head_of(&self, hindex: u16) -> u16 {
        self.hist_start[hindex as usize]
    }

    pub(crate) fn entry_pos(&self, idx: u16) -> usize {
        self.entries[idx as usize].pos
    }

    pub(crate) fn entry_next(&self, idx: u16) -> u16 {
        self.entries[idx as usize].next
    }

    /// Records `pos` in the chain for the 4-byte window `src[pos..]`,
    /// recycling the oldest slot once the ring has wrapped.
    pub(crate) fn add(&mut self, src: &[u8], pos: usize) {
        let hindex = hash_index(&src[pos..], self.mask);
        let w = self.write_cursor;
        if self.wrapped {
            self.unlink(w);
        }
        let head = self.hist_start[hindex as usize];
        self.entries[w as usize] = HistEntry { pos, next: head, hindex };
        self.hist_start[hindex as usize] = w;

        self.write_cursor += 1;
        if self.write_cursor as usize >= HIST_SIZE + 1 {
            self.write_cursor = 1;
            self.wrapped = true;
        }
    }

    /// Removes `victim` from whichever chain still references it, before its
    /// slot is overwritten. The scan is unbounded: a chain can be as long as
    /// the whole ring, so there is no shortcut shorter than walking it.
    fn unlink(&mut self, victim: u16) {
        let hindex = self.entries[victim as usize].hindex;
        let head = self.hist_start[hindex as usize];
        if head == victim {
            self.hist_start[hindex as usize] = self.entries[victim as usize].next;
            return;
        }
        let mut cur = head;
        while cur != 0 {
            let next = self.entries[cur as usize].next;
            if next == victim {
                self.entries[cur as usize].next = self.entries[victim as usize].next;
                return;
            }
            cur = next;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fresh_ring_has_empty_buckets() {
        let mut scratch = Scratch::default();
        let ring = HistoryRing::new(&mut scratch, 512);
        for h in 0..512u16 {
            assert_eq!(ring.head_of(h), 0);
        }
    }

    #[test]
    fn add_then_find_head() {
        let src = [1u8, 2, 3, 4, 5, 6, 7, 8];
        let mut scratch = Scratch::default();
        let mut ring = HistoryRing::new(&mut scratch, 512);
        ring.add(&src, 0);
        let h = hash_index(&src[0..], ring.mask);
        let head = ring.head_of(h);
        assert_ne!(head, 0);
        assert_eq!(ring.entry_pos(head), 0);
    }

    #[test]
    fn wrap_recycles_oldest_slot_without_dangling_heads() {
        // Drive the ring past HIST_SIZE additions of distinct windows and
        // confirm every remaining bucket head still resolves to a position
        // that was actually written this round (i.e. unlink kept chains
        // consistent across the wrap).
        let mut src = alloc_vec(HIST_SIZE + 256);
        for (i, b) in src.iter_mut().enumerate() {
            *b = (i % 253) as u8;
        }
        let mut scratch = Scratch::default();
        let mut ring = HistoryRing::new(&mut scratch, 8192);
        for pos in 0..src.len() - 4 {
            ring.add(&src, pos);
        }
        for h in 0..8192u16 {
            let mut cur = ring.head_of(h);
            let mut steps = 0;
            while cur != 0 {
                let p = ring.entry_pos(cur);
                assert!(p < src.len());
                cur = ring.entry_next(cur);
                steps += 1;
                assert!(steps <= HIST_SIZE, "chain longer than the ring itself");
            }
        }
    }

    fn alloc_vec(n: usize) -> std::vec::Vec<u8> {
        std::vec![0u8; n]
    }
}
