//! Philox counter-based PRNG.
//!
//! Philox4x32-10 from "Parallel Random Numbers: As Easy as 1, 2, 3"
//! (Salmon et al., 2011). The whole state is a 128-bit counter and a 64-bit
//! key, so any position in a stream can be reached in O(1) with [`PhiloxRng::skip`].
//! That is what lets the input arrays be filled in parallel chunks while
//! staying bit-identical to a sequential draw.

/// Philox4x32-10 state.
///
/// The seed is the key. The stream occupies the upper two counter words and
/// the position within the stream the lower two, so every `(seed, stream)`
/// pair draws from its own disjoint counter range.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct PhiloxState {
    /// 128-bit counter, least significant word first.
    pub counter: [u32; 4],
    /// 64-bit key, least significant word first.
    pub key: [u32; 2],
}

impl PhiloxState {
    /// Create the state for a seed and stream at position zero.
    pub fn new(seed: u64, stream: u64) -> Self {
        Self {
            counter: [0, 0, stream as u32, (stream >> 32) as u32],
            key: [seed as u32, (seed >> 32) as u32],
        }
    }

    /// Stream selected by the upper counter words.
    pub fn stream(&self) -> u64 {
        (self.counter[3] as u64) << 32 | self.counter[2] as u64
    }

    /// Position within the stream, in blocks of four outputs.
    pub fn position(&self) -> u64 {
        (self.counter[1] as u64) << 32 | self.counter[0] as u64
    }

    /// Advance the position by `n` blocks of four outputs.
    ///
    /// Wraps within the stream; the stream words never change.
    pub fn advance(&mut self, n: u64) {
        let next = self.position().wrapping_add(n);
        self.counter[0] = next as u32;
        self.counter[1] = (next >> 32) as u32;
    }
}

// Philox round constants
const PHILOX_M4X32_0: u32 = 0xD251_1F53;
const PHILOX_M4X32_1: u32 = 0xCD9E_8D57;
const PHILOX_W32_0: u32 = 0x9E37_79B9;
const PHILOX_W32_1: u32 = 0xBB67_AE85;

/// Outputs produced per counter value.
pub const OUTPUTS_PER_BLOCK: usize = 4;

/// Philox generator with a four-value output buffer.
#[derive(Debug, Clone)]
pub struct PhiloxRng {
    state: PhiloxState,
    buffer: [u32; 4],
    buffer_idx: usize,
}

impl PhiloxRng {
    /// Create a generator for a seed and stream.
    pub fn new(seed: u64, stream: u64) -> Self {
        Self::from_state(PhiloxState::new(seed, stream))
    }

    /// Create from an existing state.
    pub fn from_state(state: PhiloxState) -> Self {
        Self {
            state,
            buffer: [0; 4],
            buffer_idx: OUTPUTS_PER_BLOCK, // refill on first call
        }
    }

    /// Current state.
    pub fn state(&self) -> PhiloxState {
        self.state
    }

    /// Skip `blocks` counter values and drop any buffered outputs.
    pub fn skip(&mut self, blocks: u64) {
        self.state.advance(blocks);
        self.buffer_idx = OUTPUTS_PER_BLOCK;
    }

    /// Next raw 32-bit output.
    pub fn next_u32(&mut self) -> u32 {
        if self.buffer_idx >= OUTPUTS_PER_BLOCK {
            self.buffer = philox4x32_10(&mut self.state);
            self.buffer_idx = 0;
        }
        let val = self.buffer[self.buffer_idx];
        self.buffer_idx += 1;
        val
    }

    /// Next uniform `f32` in `[0, 1)`.
    #[inline]
    pub fn next_f32(&mut self) -> f32 {
        u32_to_unit_f32(self.next_u32())
    }
}

/// Map a raw output to `[0, 1)` using its upper 24 bits.
///
/// 24 bits fit the `f32` mantissa exactly, so the result never rounds up to 1.0.
#[inline]
pub fn u32_to_unit_f32(u: u32) -> f32 {
    (u >> 8) as f32 * (1.0 / (1u32 << 24) as f32)
}

#[inline]
fn philox_round(ctr: &mut [u32; 4], key: &[u32; 2]) {
    let prod0 = ctr[0] as u64 * PHILOX_M4X32_0 as u64;
    let prod1 = ctr[2] as u64 * PHILOX_M4X32_1 as u64;
    let (hi0, lo0) = ((prod0 >> 32) as u32, prod0 as u32);
    let (hi1, lo1) = ((prod1 >> 32) as u32, prod1 as u32);

    *ctr = [hi1 ^ ctr[1] ^ key[0], lo1, hi0 ^ ctr[3] ^ key[1], lo0];
}

/// Ten rounds of Philox4x32; returns four outputs and bumps the counter.
fn philox4x32_10(state: &mut PhiloxState) -> [u32; 4] {
    let mut ctr = state.counter;
    let mut key = state.key;

    for _ in 0..10 {
        philox_round(&mut ctr, &key);
        key[0] = key[0].wrapping_add(PHILOX_W32_0);
        key[1] = key[1].wrapping_add(PHILOX_W32_1);
    }

    state.advance(1);
    ctr
}
