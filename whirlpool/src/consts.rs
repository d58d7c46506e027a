//! Whirlpool S-box, round constants and the fused substitution/diffusion
//! tables derived from them at compile time.

/// Number of rounds of the internal block cipher.
pub(crate) const ROUNDS: usize = 10;

/// Whirlpool substitution box (2003 revision).
pub(crate) const SBOX: [u8; 256] = [
    0x18, 0x23, 0xc6, 0xe8, 0x87, 0xb8, 0x01, 0x4f, 0x36, 0xa6, 0xd2, 0xf5, 0x79, 0x6f, 0x91, 0x52,
    0x60, 0xbc, 0x9b, 0x8e, 0xa3, 0x0c, 0x7b, 0x35, 0x1d, 0xe0, 0xd7, 0xc2, 0x2e, 0x4b, 0xfe, 0x57,
    0x15, 0x77, 0x37, 0xe5, 0x9f, 0xf0, 0x4a, 0xda, 0x58, 0xc9, 0x29, 0x0a, 0xb1, 0xa0, 0x6b, 0x85,
    0xbd, 0x5d, 0x10, 0xf4, 0xcb, 0x3e, 0x05, 0x67, 0xe4, 0x27, 0x41, 0x8b, 0xa7, 0x7d, 0x95, 0xd8,
    0xfb, 0xee, 0x7c, 0x66, 0xdd, 0x17, 0x47, 0x9e, 0xca, 0x2d, 0xbf, 0x07, 0xad, 0x5a, 0x83, 0x33,
    0x63, 0x02, 0xaa, 0x71, 0xc8, 0x19, 0x49, 0xd9, 0xf2, 0xe3, 0x5b, 0x88, 0x9a, 0x26, 0x32, 0xb0,
    0xe9, 0x0f, 0xd5, 0x80, 0xbe, 0xcd, 0x34, 0x48, 0xff, 0x7a, 0x90, 0x5f, 0x20, 0x68, 0x1a, 0xae,
    0xb4, 0x54, 0x93, 0x22, 0x64, 0xf1, 0x73, 0x12, 0x40, 0x08, 0xc3, 0xec, 0xdb, 0xa1, 0x8d, 0x3d,
    0x97, 0x00, 0xcf, 0x2b, 0x76, 0x82, 0xd6, 0x1b, 0xb5, 0xaf, 0x6a, 0x50, 0x45, 0xf3, 0x30, 0xef,
    0x3f, 0x55, 0xa2, 0xea, 0x65, 0xba, 0x2f, 0xc0, 0xde, 0x1c, 0xfd, 0x4d, 0x92, 0x75, 0x06, 0x8a,
    0xb2, 0xe6, 0x0e, 0x1f, 0x62, 0xd4, 0xa8, 0x96, 0xf9, 0xc5, 0x25, 0x59, 0x84, 0x72, 0x39, 0x4c,
    0x5e, 0x78, 0x38, 0x8c, 0xd1, 0xa5, 0xe2, 0x61, 0xb3, 0x21, 0x9c, 0x1e, 0x43, 0xc7, 0xfc, 0x04,
    0x51, 0x99, 0x6d, 0x0d, 0xfa, 0xdf, 0x7e, 0x24, 0x3b, 0xab, 0xce, 0x11, 0x8f, 0x4e, 0xb7, 0xeb,
    0x3c, 0x81, 0x94, 0xf7, 0xb9, 0x13, 0x2c, 0xd3, 0xe7, 0x6e, 0xc4, 0x03, 0x56, 0x44, 0x7f, 0xa9,
    0x2a, 0xbb, 0xc1, 0x53, 0xdc, 0x0b, 0x9d, 0x6c, 0x31, 0x74, 0xf6, 0x46, 0xac, 0x89, 0x14, 0xe1,
    0x16, 0x3a, 0x69, 0x09, 0x70, 0xb6, 0xd0, 0xed, 0xcc, 0x42, 0x98, 0xa4, 0x28, 0x5c, 0xf8, 0x86,
];

/// First row of the circulant MDS matrix `cir(1, 1, 4, 1, 8, 5, 2, 9)`.
const MDS: [u8; 8] = [0x01, 0x01, 0x04, 0x01, 0x08, 0x05, 0x02, 0x09];

/// Reduction polynomial of GF(2^8): x^8 + x^4 + x^3 + x^2 + 1.
const POLY: u8 = 0x1d;

/// `C[i][x]` is the diffusion vector of `SBOX[x]` (packed big-endian)
/// rotated right by `8 * i` bits, i.e. placed into byte lane `i`.
pub(crate) static C: [[u64; 256]; 8] = build_tables();

/// Round constants, `RC[r - 1]` is mixed into key lane 0 on round `r`.
pub(crate) static RC: [u64; ROUNDS] = build_round_constants();

const fn gf_mul(mut a: u8, mut b: u8) -> u8 {
    let mut p = 0;
    while b != 0 {
        if b & 1 != 0 {
            p ^= a;
        }
        let carry = a & 0x80 != 0;
        a <<= 1;
        if carry {
            a ^= POLY;
        }
        b >>= 1;
    }
    p
}

const fn build_tables() -> [[u64; 256]; 8] {
    let mut tables = [[0u64; 256]; 8];
    let mut x = 0;
    while x < 256 {
        let s = SBOX[x];
        let mut v = 0u64;
        let mut j = 0;
        while j < 8 {
            v = (v << 8) | gf_mul(s, MDS[j]) as u64;
            j += 1;
        }
        let mut i = 0;
        while i < 8 {
            tables[i][x] = v.rotate_right(8 * i as u32);
            i += 1;
        }
        x += 1;
    }
    tables
}

const fn build_round_constants() -> [u64; ROUNDS] {
    let mut rc = [0u64; ROUNDS];
    let mut r = 0;
    while r < ROUNDS {
        let mut v = 0u64;
        let mut j = 0;
        while j < 8 {
            v = (v << 8) | SBOX[8 * r + j] as u64;
            j += 1;
        }
        rc[r] = v;
        r += 1;
    }
    rc
}
