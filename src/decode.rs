//! Decoder: a byte-at-a-time state machine over the control-byte/literal/tag
//! wire format, grounded on `pglz_decompress` from
//! `bench/pg_lzcompress_skip_after_match.c`.

#[cfg(all(feature = "alloc", not(feature = "std")))]
extern crate alloc;

#[cfg(all(feature = "alloc", not(feature = "std")))]
use alloc::{vec, vec::Vec};
#[cfg(all(feature = "alloc", feature = "std"))]
use std::{vec, vec::Vec};

use crate::error::Error;

/// Decompresses `src` into `dst`, where `declared_raw_size` is the length the
/// encoder originally reported for the uncompressed data.
///
/// `dst` must be at least `declared_raw_size` bytes; anything past that is
/// left untouched. When `strict` is true, the whole of `src` must be
/// consumed and the whole of `declared_raw_size` must be filled, or the call
/// fails with [`Error::IncompleteOutput`]; when false, a short decode (fewer
/// bytes than declared) is returned as-is. Returns the number of bytes
/// written to `dst`.
pub fn decode_no_alloc(
    src: &[u8],
    dst: &mut [u8],
    declared_raw_size: usize,
    strict: bool,
) -> Result<usize, Error> {
    if dst.len() < declared_raw_size {
        return Err(Error::OutputOverrun);
    }
    let dst = &mut dst[..declared_raw_size];

    let mut sp = 0usize;
    let mut dp = 0usize;

    while sp < src.len() && dp < declared_raw_size {
        let mut ctrl = src[sp];
        sp += 1;

        for _ in 0..8 {
            if sp >= src.len() || dp >= declared_raw_size {
                break;
            }

            if ctrl & 1 == 0 {
                dst[dp] = src[sp];
                dp += 1;
                sp += 1;
            } else {
                if sp + 2 > src.len() {
                    return Err(Error::InputOverrun);
                }
                let t1 = src[sp];
                let t2 = src[sp + 1];
                sp += 2;

                let mut len = (t1 & 0x0f) as usize + 3;
                let mut off = (((t1 & 0xf0) as usize) << 4) | t2 as usize;

                if len == 18 {
                    let t3 = *src.get(sp).ok_or(Error::InputOverrun)?;
                    sp += 1;
                    len = 18 + t3 as usize;
                }

                if off == 0 || off > dp {
                    return Err(Error::BadOffset);
                }

                let remaining = declared_raw_size - dp;
                let mut len = len.min(remaining);

                while off < len {
                    dst.copy_within(dp - off..dp, dp);
                    dp += off;
                    len -= off;
                    off *= 2;
                }
                if len > 0 {
                    dst.copy_within(dp - off..dp - off + len, dp);
                    dp += len;
                }
            }

            ctrl >>= 1;
        }
    }

    if strict && (dp != declared_raw_size || sp != src.len()) {
        return Err(Error::IncompleteOutput);
    }

    Ok(dp)
}

/// Decompresses `src` into a freshly allocated `Vec<u8>` of
/// `declared_raw_size` bytes.
#[cfg(feature = "alloc")]
pub fn decode(
    src: &[u8],
    declared_raw_size: usize,
    strict: bool,
) -> Result<Vec<u8>, Error> {
    let mut dst = vec![0u8; declared_raw_size];
    let n = decode_no_alloc(src, &mut dst, declared_raw_size, strict)?;
    dst.truncate(n);
    Ok(dst)
}
