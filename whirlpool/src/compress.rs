use crate::consts::{C, RC};

/// One application of the fused non-linear layer, cyclical permutation and
/// linear diffusion layer: output lane `i` takes byte `t` of lane `i - t`
/// through table `C[t]`.
#[inline(always)]
fn round(s: &[u64; 8]) -> [u64; 8] {
    let mut out = [0u64; 8];
    for (i, lane) in out.iter_mut().enumerate() {
        let mut v = 0;
        for (t, table) in C.iter().enumerate() {
            let b = (s[(i + 8 - t) % 8] >> (56 - 8 * t)) as u8;
            v ^= table[b as usize];
        }
        *lane = v;
    }
    out
}

/// Whirlpool compression function.
///
/// Runs the internal block cipher keyed by the chaining value over each
/// block and applies the Miyaguchi-Preneel feed-forward.
///
/// Each block must be 64 bytes long.
pub(crate) fn compress<B: AsRef<[u8]>>(state: &mut [u64; 8], blocks: &[B]) {
    for block in blocks {
        let block = block.as_ref();
        debug_assert_eq!(block.len(), 64);
        let mut m = [0u64; 8];
        for (v, chunk) in m.iter_mut().zip(block.chunks_exact(8)) {
            let mut buf = [0u8; 8];
            buf.copy_from_slice(chunk);
            *v = u64::from_be_bytes(buf);
        }

        let mut key = *state;
        let mut s = [0u64; 8];
        for ((s, m), k) in s.iter_mut().zip(m.iter()).zip(key.iter()) {
            *s = m ^ k;
        }

        for rc in RC.iter() {
            key = round(&key);
            key[0] ^= rc;
            s = round(&s);
            for (s, k) in s.iter_mut().zip(key.iter()) {
                *s ^= k;
            }
        }

        for ((h, s), m) in state.iter_mut().zip(s.iter()).zip(m.iter()) {
            *h ^= s ^ m;
        }
    }
}
