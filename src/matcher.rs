//! Match finder: walks one hash chain from the history ring, looking for the
//! longest usable back-reference to the current position.

use crate::hash::hash_index;
use crate::history::{HistoryRing, MAX_CHAIN, MAX_OFFSET};

/// Longest back-reference the wire format can encode in one tag.
pub(crate) const MAX_MATCH: usize = 273;
/// Shortest match worth emitting instead of a literal.
pub(crate) const MIN_MATCH: usize = 3;

/// A candidate back-reference found by [`find_match`].
pub(crate) struct Match {
    pub len: usize,
    pub off: usize,
}

#[inline]
fn eq4(a: &[u8], b: &[u8]) -> bool {
    a[0] == b[0] && a[1] == b[1] && a[2] == b[2] && a[3] == b[3]
}

/// Searches the hash chain for `src[ip..]`, returning the best match found
/// (length `>= MIN_MATCH`) or `None`.
///
/// `end` bounds how far a match may extend (the encoder passes the tail
/// boundary, not the buffer length, so a match can never run into bytes the
/// tail loop still needs to handle byte-by-byte).
pub(crate) fn find_match(
    ring: &HistoryRing,
    src: &[u8],
    ip: usize,
    end: usize,
    good_match_init: u32,
    good_drop: u32,
) -> Option<Match> {
    let hindex = hash_index(&src[ip..], ring.mask);
    let mut cand = ring.head_of(hindex);

    let mut best_len = 0usize;
    let mut best_off = 0usize;
    let mut chain_count = 0u32;
    let mut good_match = good_match_init;

    while cand != 0 {
        let hp = ring.entry_pos(cand);
        let off = ip - hp;
        if off > MAX_OFFSET {
            break;
        }

        if eq4(&src[hp..hp + 4], &src[ip..ip + 4]) {
            let max_ext = core::cmp::min(end - (ip + 4), MAX_MATCH - 4);
            let mut ext = 0;
            while ext < max_ext && src[ip + 4 + ext] == src[hp + 4 + ext] {
                ext += 1;
            }
            let len = 4 + ext;
            if len > best_len {
                best_len = len;
                best_off = off;
            }
        }

        cand = ring.entry_next(cand);
        chain_count += 1;
        if chain_count >= MAX_CHAIN {
            break;
        }
        if cand != 0 {
            if best_len as u32 >= good_match {
                break;
            }
            good_match -= (good_match * good_drop) / 100;
        }
    }

    if best_len >= MIN_MATCH {
        Some(Match { len: best_len, off: best_off })
    } else {
        None
    }
}
