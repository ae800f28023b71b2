//! Encoder: turns a byte slice into the control-byte/literal/tag wire format.
//!
//! The top-level loop is grounded on `pglz_compress` from
//! `bench/pg_lzcompress_skip_after_match.c`: a main loop that walks up to
//! `len - 3` looking for matches (falling back byte-by-byte through a tail
//! loop for the last few bytes, where a 4-byte match window can never fit),
//! and a bit emitter grounded on the `pglz_out_ctrl`/`pglz_out_literal`/
//! `pglz_out_tag` macros from the same file.

#[cfg(all(feature = "alloc", not(feature = "std")))]
extern crate alloc;

#[cfg(all(feature = "alloc", not(feature = "std")))]
use alloc::{vec, vec::Vec};
#[cfg(all(feature = "alloc", feature = "std"))]
use std::{vec, vec::Vec};

use crate::error::Error;
use crate::hash::hashsz_for_len;
use crate::history::{HistoryRing, Scratch};
use crate::matcher::find_match;
use crate::strategy::Strategy;

/// Accumulates output bytes plus the control-byte bitstream framing them.
///
/// Grouped into runs of 8 bits the same way the C macros do: a control byte
/// is reserved up front and patched in place as each of its 8 bits is
/// decided, rather than buffered and flushed separately.
struct Emitter<'d> {
    dst: &'d mut [u8],
    pos: usize,
    ctrl_pos: usize,
    ctrl_byte: u8,
    ctrl_bit: u8,
}

impl<'d> Emitter<'d> {
    fn new(dst: &'d mut [u8]) -> Self {
        Emitter { dst, pos: 0, ctrl_pos: 0, ctrl_byte: 0, ctrl_bit: 0 }
    }

    fn push(&mut self, b: u8) -> Result<(), Error> {
        let slot = self.dst.get_mut(self.pos).ok_or(Error::OutputOverrun)?;
        *slot = b;
        self.pos += 1;
        Ok(())
    }

    fn open_group(&mut self) -> Result<(), Error> {
        if self.ctrl_bit == 0 {
            self.ctrl_pos = self.pos;
            self.push(0)?;
            self.ctrl_byte = 0;
            self.ctrl_bit = 1;
        }
        Ok(())
    }

    fn literal(&mut self, byte: u8) -> Result<(), Error> {
        self.open_group()?;
        self.push(byte)?;
        self.ctrl_bit <<= 1;
        Ok(())
    }

    fn tag(&mut self, len: usize, off: usize) -> Result<(), Error> {
        self.open_group()?;
        self.ctrl_byte |= self.ctrl_bit;
        self.dst[self.ctrl_pos] = self.ctrl_byte;
        self.ctrl_bit <<= 1;

        if len > 17 {
            self.push((((off & 0xf00) >> 4) as u8) | 0x0f)?;
            self.push((off & 0xff) as u8)?;
            self.push((len - 18) as u8)?;
        } else {
            self.push((((off & 0xf00) >> 4) as u8) | ((len - 3) as u8))?;
            self.push((off & 0xff) as u8)?;
        }
        Ok(())
    }
}

fn result_max_for(slen: usize, min_comp_rate: i32) -> usize {
    let need_rate = min_comp_rate.clamp(0, 99) as u64;
    ((slen as u64 * (100 - need_rate)) / 100) as usize
}

/// Compresses `src` into `dst` using `scratch` as history working space,
/// without performing any allocation.
///
/// Returns the number of bytes written to `dst`, or an [`Error`] if `src`'s
/// length is out of the strategy's bounds, the strategy is misconfigured, no
/// match appeared by `strategy.first_success_by`, the running output crossed
/// the strategy's compression-rate budget, or `dst` was too small.
pub fn encode_no_alloc(
    src: &[u8],
    dst: &mut [u8],
    scratch: &mut Scratch,
    strategy: &Strategy,
) -> Result<usize, Error> {
    if strategy.match_size_good <= 0 {
        return Err(Error::InvalidStrategy);
    }
    let slen = src.len();
    if slen < strategy.min_input_size || slen > strategy.max_input_size {
        return Err(Error::InvalidInputSize);
    }

    let good_match_init = (strategy.match_size_good as u32).clamp(17, crate::matcher::MAX_MATCH as u32);
    let good_drop = (strategy.match_size_drop as u32).clamp(0, 100);
    let result_max = result_max_for(slen, strategy.min_comp_rate);

    let hashsz = hashsz_for_len(slen);
    let mut ring = HistoryRing::new(scratch, hashsz);
    let mut emitter = Emitter::new(dst);
    let mut found_match = false;

    let dend = slen.saturating_sub(3);
    let mut ip = 0usize;

    while ip < dend {
        if emitter.pos >= result_max {
            return Err(Error::BudgetExceeded);
        }
        if !found_match && emitter.pos >= strategy.first_success_by {
            return Err(Error::EarlyBailout);
        }

        match find_match(&ring, src, ip, slen, good_match_init, good_drop) {
            Some(m) => {
                emitter.tag(m.len, m.off)?;
                found_match = true;
                if strategy.skip_after_match {
                    ring.add(src, ip);
                    ip += m.len;
                } else {
                    let stop = ip + m.len;
                    while ip < stop {
                        ring.add(src, ip);
                        ip += 1;
                    }
                }
            }
            None => {
                emitter.literal(src[ip])?;
                ring.add(src, ip);
                ip += 1;
            }
        }
    }

    while ip < slen {
        if emitter.pos >= result_max {
            return Err(Error::BudgetExceeded);
        }
        emitter.literal(src[ip])?;
        ring.add(src, ip);
        ip += 1;
    }

    let result_size = emitter.pos;
    if result_size >= result_max {
        return Err(Error::BudgetExceeded);
    }
    Ok(result_size)
}

/// Compresses `src` with a freshly zero-allocated [`Scratch`], returning a
/// newly allocated `Vec<u8>` sized to the exact compressed length.
#[cfg(feature = "alloc")]
pub fn encode_with_scratch(
    src: &[u8],
    scratch: &mut Scratch,
    strategy: &Strategy,
) -> Result<Vec<u8>, Error> {
    let mut dst = vec![0u8; crate::size::max_output_size(src.len())];
    let n = encode_no_alloc(src, &mut dst, scratch, strategy)?;
    dst.truncate(n);
    Ok(dst)
}

/// Compresses `src`, allocating both the scratch space and the result.
#[cfg(feature = "alloc")]
pub fn encode(src: &[u8], strategy: &Strategy) -> Result<Vec<u8>, Error> {
    let mut scratch = Scratch::default();
    encode_with_scratch(src, &mut scratch, strategy)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::decode::decode_no_alloc;

    fn round_trip(src: &[u8], strategy: &Strategy) {
        let mut scratch = Scratch::default();
        let mut dst = vec![0u8; crate::size::max_output_size(src.len())];
        match encode_no_alloc(src, &mut dst, &mut scratch, strategy) {
            Ok(n) => {
                let mut out = vec![0u8; src.len()];
                let dn = decode_no_alloc(&dst[..n], &mut out, src.len(), true)
                    .expect("decode of freshly encoded data must succeed");
                assert_eq!(dn, src.len());
                assert_eq!(out.as_slice(), src);
            }
            Err(Error::BudgetExceeded) | Err(Error::EarlyBailout) | Err(Error::InvalidInputSize) => {
                // Legitimate outcomes for incompressible or out-of-range input.
            }
            Err(e) => panic!("unexpected encode error: {e:?}"),
        }
    }

    #[test]
    fn literal_only_run_round_trips_or_reports_budget() {
        let src: Vec<u8> =
            (0..200u32).map(|i| ((i * 2654435761) >> 3) as u8).collect();
        round_trip(&src, &Strategy::ALWAYS);
    }

    #[test]
    fn highly_repetitive_input_compresses() {
        let src = vec![b'x'; 5000];
        let mut scratch = Scratch::default();
        let mut dst = vec![0u8; crate::size::max_output_size(src.len())];
        let n = encode_no_alloc(&src, &mut dst, &mut scratch, &Strategy::DEFAULT).unwrap();
        assert!(n < src.len() / 4);
    }

    #[test]
    fn rejects_input_below_min_size() {
        let src = vec![1u8, 2, 3];
        let mut scratch = Scratch::default();
        let mut dst = vec![0u8; 16];
        let err = encode_no_alloc(&src, &mut dst, &mut scratch, &Strategy::DEFAULT).unwrap_err();
        assert_eq!(err, Error::InvalidInputSize);
    }

    #[test]
    fn rejects_non_positive_good_match() {
        let mut bad = Strategy::DEFAULT;
        bad.match_size_good = 0;
        let src = vec![1u8; 64];
        let mut scratch = Scratch::default();
        let mut dst = vec![0u8; 128];
        let err = encode_no_alloc(&src, &mut dst, &mut scratch, &bad).unwrap_err();
        assert_eq!(err, Error::InvalidStrategy);
    }
}
