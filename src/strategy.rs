//! Compression strategy knobs, mirroring `PGLZ_Strategy` from the C
//! implementation this crate is modeled on.

/// Tunable knobs that bound how much effort the encoder spends and how good
/// the result must be before it is accepted.
///
/// Fields are public and constructed as plain struct literals, matching the
/// original `PGLZ_Strategy` data record: there is no validating constructor,
/// because [`crate::encode`] is the sole authority on what values are usable
/// and re-derives/clamps everything it needs at call time.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Strategy {
    /// Inputs shorter than this are rejected outright.
    pub min_input_size: usize,
    /// Inputs longer than this are rejected outright.
    pub max_input_size: usize,
    /// Minimum required compression percentage, `0..=99`.
    pub min_comp_rate: i32,
    /// Number of bytes the encoder may emit before giving up if it still has
    /// not produced a single back-reference match.
    pub first_success_by: usize,
    /// Match length, in bytes, considered "good enough" to stop searching a
    /// hash chain early.
    pub match_size_good: i32,
    /// Percentage by which the "good enough" threshold decays per candidate
    /// visited in a hash chain, `0..=100`.
    pub match_size_drop: i32,
    /// When true, history entries for the bytes consumed by a match are not
    /// all added: only the match's first byte is, and the rest are skipped.
    pub skip_after_match: bool,
}

impl Strategy {
    /// General purpose default, matching `PGLZ_strategy_default`.
    pub const DEFAULT: Strategy = Strategy {
        min_input_size: 32,
        max_input_size: usize::MAX,
        min_comp_rate: 25,
        first_success_by: 1024,
        match_size_good: 128,
        match_size_drop: 10,
        skip_after_match: false,
    };

    /// Compresses almost anything, even if the result barely shrinks,
    /// matching `PGLZ_strategy_always`.
    pub const ALWAYS: Strategy = Strategy {
        min_input_size: 0,
        max_input_size: usize::MAX,
        min_comp_rate: 0,
        first_success_by: usize::MAX,
        match_size_good: 128,
        match_size_drop: 6,
        skip_after_match: false,
    };
}

impl Default for Strategy {
    fn default() -> Self {
        Strategy::DEFAULT
    }
}
