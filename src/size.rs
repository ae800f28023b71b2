//! Output sizing helpers: how big a destination buffer must be to guarantee
//! success, independent of any particular [`crate::Strategy`].

/// Upper bound on the compressed size of an `n`-byte input, regardless of
/// strategy. Mirrors `PGLZ_MAX_OUTPUT` from the C header.
pub const fn max_output_size(n: usize) -> usize {
    n + 4
}

/// Caps a raw-size-derived estimate at a known total budget.
///
/// `rawsize` is the declared decompressed length; the estimate assumes the
/// pathological case of one tag byte's worth of overhead per eight output
/// bytes (`ceil(rawsize * 9 / 8) + 2`), then takes the smaller of that and
/// `total_compressed_size`.
pub const fn maximum_compressed_size(rawsize: usize, total_compressed_size: usize) -> usize {
    let estimate = (rawsize as u64 * 9 + 7) / 8 + 2;
    let total = total_compressed_size as u64;
    (if estimate < total { estimate } else { total }) as usize
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn max_output_size_has_slack() {
        assert_eq!(max_output_size(0), 4);
        assert_eq!(max_output_size(100), 104);
    }

    #[test]
    fn maximum_compressed_size_is_capped_by_total() {
        assert_eq!(maximum_compressed_size(8, 1), 1);
        assert_eq!(maximum_compressed_size(8, 1_000_000), 11);
    }
}
