#![cfg_attr(not(feature = "std"), no_std)]
//! # pglz
//!
//! A from-scratch Rust port of PostgreSQL's `pglz` in-row compression
//! format: the hash-chain LZ77 variant used to shrink `TOAST`-able column
//! values before they hit disk.
//!
//! ### Features
//!
//! - `encode`: enables [`encode_no_alloc`][encode::encode_no_alloc] and the
//!   allocating encode helpers.
//! - `decode`: enables [`decode_no_alloc`][decode::decode_no_alloc] and the
//!   allocating decode helper.
//! - `alloc`: enables the `Vec`-returning helpers on both sides. Without
//!   `std`, this pulls in `extern crate alloc`.
//! - `std`: enables use of `std`. Implies `alloc`.
//!
//! All features are enabled by default.
//!
//! ### Usage
//!
//! ```
//! use pglz::{encode, decode, Strategy};
//!
//! let data = b"la la la la la la la la la la la la la la la";
//! let compressed = encode(data, &Strategy::DEFAULT).expect("compress");
//! let restored = decode(&compressed, data.len(), true).expect("decompress");
//! assert_eq!(restored, data);
//! ```
//!
//! See [`encode`] and [`decode`] for the zero-allocation entry points used
//! when a caller supplies its own [`Scratch`] and destination buffer.

#[cfg(all(feature = "alloc", not(feature = "std")))]
extern crate alloc;

mod error;
mod hash;
mod history;
mod matcher;
mod size;
mod strategy;

#[cfg(feature = "encode")]
pub mod encode;

#[cfg(feature = "decode")]
pub mod decode;

pub use error::Error;
pub use history::Scratch;
pub use size::{max_output_size, maximum_compressed_size};
pub use strategy::Strategy;

#[cfg(feature = "encode")]
pub use encode::encode_no_alloc;
#[cfg(all(feature = "encode", feature = "alloc"))]
pub use encode::{encode, encode_with_scratch};

#[cfg(feature = "decode")]
pub use decode::decode_no_alloc;
#[cfg(all(feature = "decode", feature = "alloc"))]
pub use decode::decode;
