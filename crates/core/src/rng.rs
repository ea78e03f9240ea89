//! RNG module - injectable random sources for piece selection
//!
//! The game never reaches for a global random generator. Every [`GameState`]
//! owns a [`PieceRng`], so play uses a seeded [`SimpleRng`] while tests can
//! hand in a [`SequenceRng`] and know exactly which pieces will spawn.
//!
//! [`GameState`]: crate::GameState

/// Source of uniformly distributed indices
pub trait PieceRng {
    /// Next index in `0..bound`. `bound` is never zero.
    fn next_index(&mut self, bound: usize) -> usize;
}

impl<R: PieceRng + ?Sized> PieceRng for &mut R {
    fn next_index(&mut self, bound: usize) -> usize {
        (**self).next_index(bound)
    }
}

impl<R: PieceRng + ?Sized> PieceRng for Box<R> {
    fn next_index(&mut self, bound: usize) -> usize {
        (**self).next_index(bound)
    }
}

/// Simple LCG (Linear Congruential Generator) RNG
/// Uses constants from Numerical Recipes
#[derive(Debug, Clone)]
pub struct SimpleRng {
    state: u32,
}

impl SimpleRng {
    /// Create a new RNG with the given seed
    pub fn new(seed: u32) -> Self {
        // Avoid 0 seed which would produce all zeros
        let state = if seed == 0 { 1 } else { seed };
        Self { state }
    }

    /// Generate next random u32
    pub fn next_u32(&mut self) -> u32 {
        // a=1664525, c=1013904223, m=2^32
        self.state = self.state.wrapping_mul(1664525).wrapping_add(1013904223);
        self.state
    }

    /// Uniform value in `[0, max)`.
    ///
    /// Draws falling in the incomplete top bucket are rejected so every
    /// result is equally likely.
    pub fn next_range(&mut self, max: u32) -> u32 {
        debug_assert!(max > 0);
        let zone = u32::MAX - (u32::MAX % max);
        loop {
            // High bits of an LCG are far better distributed than the low ones.
            let draw = self.next_u32().rotate_left(16);
            if draw < zone {
                return draw % max;
            }
        }
    }

    /// Current internal state (reseeding with it continues the sequence)
    pub fn state(&self) -> u32 {
        self.state
    }
}

impl Default for SimpleRng {
    fn default() -> Self {
        Self::new(1)
    }
}

impl PieceRng for SimpleRng {
    fn next_index(&mut self, bound: usize) -> usize {
        self.next_range(bound as u32) as usize
    }
}

/// Replays a fixed list of indices, cycling when exhausted.
///
/// Values are reduced modulo the requested bound.
#[derive(Debug, Clone)]
pub struct SequenceRng {
    values: Vec<usize>,
    pos: usize,
}

impl SequenceRng {
    pub fn new(values: Vec<usize>) -> Self {
        Self { values, pos: 0 }
    }

    /// Same index forever
    pub fn constant(value: usize) -> Self {
        Self::new(vec![value])
    }
}

impl PieceRng for SequenceRng {
    fn next_index(&mut self, bound: usize) -> usize {
        if self.values.is_empty() {
            return 0;
        }
        let value = self.values[self.pos % self.values.len()];
        self.pos = self.pos.wrapping_add(1);
        value % bound
    }
}
