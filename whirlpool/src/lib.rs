//! An implementation of the [Whirlpool][1] cryptographic hash algorithm
//! (ISO/IEC 10118-3:2004).
//!
//! This is the algorithm recommended by NESSIE (New European Schemes for
//! Signatures, Integrity and Encryption; an European research project).
//!
//! The constants used by Whirlpool were changed twice (2001 and 2003) - this
//! crate only implements the most recent standard. The two older Whirlpool
//! implementations (sometimes called Whirlpool-0 (pre 2001) and Whirlpool-T
//! (pre 2003)) were not used much anyway (both have never been recommended
//! by NESSIE).
//!
//! For details see <http://www.larc.usp.br/~pbarreto/WhirlpoolPage.html>.
//!
//! # Usage
//!
//! ```rust
//! use whirlpool::Whirlpool;
//! use hex_literal::hex;
//!
//! let mut hasher = Whirlpool::new();
//! hasher.write(b"Hello ");
//! hasher.write(b"Whirlpool");
//!
//! // `sum_fixed` works on a copy of the state, so the hasher stays writable
//! let result = hasher.sum_fixed();
//! assert_eq!(result[..], hex!("
//!     8eaccdc136903c458ea0b1376be2a5fc9dc5b8ce8892a3b4f43366e2610c206c
//!     a373816495e63db0fff2ff25f75aa7162f332c9f518c3036456502a8414d300a
//! ")[..]);
//! ```
//!
//! [`Whirlpool`] also implements the traits of the [`digest`] crate, so the
//! usual [`Digest`] API is available as well:
//!
//! ```rust
//! use whirlpool::{Whirlpool, Digest};
//!
//! let mut hasher = <Whirlpool as Digest>::new();
//! Digest::update(&mut hasher, b"Hello Whirlpool");
//! let result = hasher.finalize();
//! assert_eq!(result.len(), 64);
//! ```
//!
//! Also see [RustCrypto/hashes][2] readme.
//!
//! [1]: https://en.wikipedia.org/wiki/Whirlpool_(hash_function)
//! [2]: https://github.com/RustCrypto/hashes

#![no_std]
#![doc(
    html_logo_url = "https://raw.githubusercontent.com/RustCrypto/meta/master/logo.svg",
    html_favicon_url = "https://raw.githubusercontent.com/RustCrypto/meta/master/logo.svg"
)]
#![forbid(unsafe_code)]
#![warn(missing_docs, rust_2018_idioms)]

#[cfg(feature = "alloc")]
extern crate alloc;
#[cfg(feature = "std")]
extern crate std;

pub use digest::{self, Digest};

mod compress;
mod consts;
use compress::compress;

#[cfg(feature = "alloc")]
use alloc::vec::Vec;
use core::{fmt, slice};
use digest::{
    block_buffer::Eager,
    core_api::{
        AlgorithmName, Block, BlockSizeUser, Buffer, BufferKindUser, FixedOutputCore,
        OutputSizeUser, UpdateCore,
    },
    typenum::{Unsigned, U64},
    FixedOutput, FixedOutputReset, HashMarker, Output, Reset, Update,
};

/// Size of an input block in bytes.
pub const BLOCK_SIZE: usize = 64;
/// Size of the digest in bytes.
pub const DIGEST_SIZE: usize = 64;
/// Size of the bit-length field appended during padding.
const LENGTH_SIZE: usize = 32;

/// Core Whirlpool hasher state.
///
/// Holds the chaining value and the 256-bit message length counter, and
/// processes whole blocks only. Buffering of partial input is left to
/// [`Whirlpool`].
#[derive(Clone)]
pub struct WhirlpoolCore {
    /// Hashed bits, most significant limb first.
    bit_len: [u64; 4],
    state: [u64; 8],
}

impl HashMarker for WhirlpoolCore {}

impl BlockSizeUser for WhirlpoolCore {
    type BlockSize = U64;
}

impl BufferKindUser for WhirlpoolCore {
    type BufferKind = Eager;
}

impl OutputSizeUser for WhirlpoolCore {
    type OutputSize = U64;
}

impl UpdateCore for WhirlpoolCore {
    #[inline]
    fn update_blocks(&mut self, blocks: &[Block<Self>]) {
        // number of bits in one block
        let n = 8 * Self::BlockSize::U64;
        self.update_len(n * (blocks.len() as u64));
        compress(&mut self.state, blocks);
    }
}

impl FixedOutputCore for WhirlpoolCore {
    #[inline]
    fn finalize_fixed_core(&mut self, buffer: &mut Buffer<Self>, out: &mut Output<Self>) {
        let pos = buffer.get_pos();
        self.update_len(8 * pos as u64);

        let mut buf = [0u8; LENGTH_SIZE];
        for (chunk, v) in buf.chunks_exact_mut(8).zip(self.bit_len.iter()) {
            chunk.copy_from_slice(&v.to_be_bytes());
        }

        // 0x80 sets the bit right after the message; when fewer than
        // `LENGTH_SIZE` bytes remain after it an extra block is compressed
        let mut state = self.state;
        buffer.digest_pad(0x80, &buf, |block| {
            compress(&mut state, slice::from_ref(block))
        });

        for (chunk, v) in out.chunks_exact_mut(8).zip(state.iter()) {
            chunk.copy_from_slice(&v.to_be_bytes());
        }
    }
}

impl WhirlpoolCore {
    fn update_len(&mut self, len: u64) {
        let mut carry = 0;
        adc(&mut self.bit_len[3], len, &mut carry);
        adc(&mut self.bit_len[2], 0, &mut carry);
        adc(&mut self.bit_len[1], 0, &mut carry);
        adc(&mut self.bit_len[0], 0, &mut carry);
    }
}

impl Default for WhirlpoolCore {
    #[inline]
    fn default() -> Self {
        Self {
            bit_len: Default::default(),
            state: [0u64; 8],
        }
    }
}

impl Reset for WhirlpoolCore {
    #[inline]
    fn reset(&mut self) {
        *self = Default::default();
    }
}

impl AlgorithmName for WhirlpoolCore {
    fn write_alg_name(f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("Whirlpool")
    }
}

opaque_debug::implement!(WhirlpoolCore);

/// Whirlpool hasher state.
///
/// Accepts input in chunks of any size; the digest only depends on the
/// concatenation of everything written since construction or the last
/// [`reset`](Whirlpool::reset).
///
/// Reading the digest with [`sum`](Whirlpool::sum) or
/// [`sum_fixed`](Whirlpool::sum_fixed) finalizes a copy of the state and
/// leaves the hasher untouched, so writing can continue afterwards.
#[derive(Clone, Default)]
pub struct Whirlpool {
    core: WhirlpoolCore,
    buffer: Buffer<WhirlpoolCore>,
}

impl Whirlpool {
    /// Create a hasher with the all-zero initial chaining value.
    #[inline]
    pub fn new() -> Self {
        Self::default()
    }

    /// Absorb `data`. Never fails.
    #[inline]
    pub fn write(&mut self, data: &[u8]) {
        let Self { core, buffer } = self;
        buffer.digest_blocks(data, |blocks| core.update_blocks(blocks));
    }

    /// Return `prefix` followed by the digest of everything written so far.
    #[cfg(feature = "alloc")]
    pub fn sum(&self, prefix: &[u8]) -> Vec<u8> {
        let mut out = Vec::with_capacity(prefix.len() + DIGEST_SIZE);
        out.extend_from_slice(prefix);
        out.extend_from_slice(&self.sum_fixed());
        out
    }

    /// Digest of everything written so far.
    pub fn sum_fixed(&self) -> [u8; DIGEST_SIZE] {
        let mut out = Output::<Self>::default();
        self.clone().finalize_core(&mut out);
        let mut digest = [0u8; DIGEST_SIZE];
        digest.copy_from_slice(&out);
        digest
    }

    /// Restore the state right after construction.
    #[inline]
    pub fn reset(&mut self) {
        Reset::reset(self);
    }

    /// Input block size in bytes, always 64.
    #[inline]
    pub fn block_size(&self) -> usize {
        BLOCK_SIZE
    }

    /// Digest size in bytes, always 64.
    #[inline]
    pub fn digest_size(&self) -> usize {
        DIGEST_SIZE
    }

    fn finalize_core(&mut self, out: &mut Output<Self>) {
        let Self { core, buffer } = self;
        core.finalize_fixed_core(buffer, out);
    }
}

impl HashMarker for Whirlpool {}

impl BlockSizeUser for Whirlpool {
    type BlockSize = U64;
}

impl OutputSizeUser for Whirlpool {
    type OutputSize = U64;
}

impl Update for Whirlpool {
    #[inline]
    fn update(&mut self, data: &[u8]) {
        self.write(data);
    }
}

impl FixedOutput for Whirlpool {
    #[inline]
    fn finalize_into(mut self, out: &mut Output<Self>) {
        self.finalize_core(out);
    }
}

impl FixedOutputReset for Whirlpool {
    #[inline]
    fn finalize_into_reset(&mut self, out: &mut Output<Self>) {
        self.finalize_core(out);
        Reset::reset(self);
    }
}

impl Reset for Whirlpool {
    #[inline]
    fn reset(&mut self) {
        self.core.reset();
        self.buffer.reset();
    }
}

impl AlgorithmName for Whirlpool {
    fn write_alg_name(f: &mut fmt::Formatter<'_>) -> fmt::Result {
        WhirlpoolCore::write_alg_name(f)
    }
}

opaque_debug::implement!(Whirlpool);

/// Writes never fail and always consume the whole buffer.
///
/// The inherent [`Whirlpool::write`] takes precedence over
/// [`std::io::Write::write`] in method call syntax; with this trait in scope
/// use `write_all`, or call it as `io::Write::write(&mut hasher, buf)`.
#[cfg(feature = "std")]
impl std::io::Write for Whirlpool {
    #[inline]
    fn write(&mut self, buf: &[u8]) -> std::io::Result<usize> {
        Update::update(self, buf);
        Ok(buf.len())
    }

    #[inline]
    fn flush(&mut self) -> std::io::Result<()> {
        Ok(())
    }
}

#[inline(always)]
fn adc(a: &mut u64, b: u64, carry: &mut u64) {
    let ret = (*a as u128) + (b as u128) + (*carry as u128);
    *a = ret as u64;
    *carry = (ret >> 64) as u64;
}
