//! The deterministic pseudorandom walk driving the enumeration order.

/// Multiplier from Numerical Recipes; together with [`INCREMENT`] it
/// satisfies the Hull-Dobell conditions over a modulus of 2^32.
pub const MULTIPLIER: u32 = 1_664_525;

/// Increment from Numerical Recipes, odd as Hull-Dobell requires.
pub const INCREMENT: u32 = 1_013_904_223;

/// A linear congruential generator over the full 32-bit range.
///
/// Each step computes `current = (MULTIPLIER * current + INCREMENT) mod 2^32`,
/// the modulo being the natural wrap of `u32` arithmetic. With these constants
/// the generator is full-period: it visits every 32-bit value exactly once
/// before repeating. A useful consequence is that the low `k` bits form a
/// full-period generator over `2^k` on their own, so reducing the output
/// modulo a power-of-two address count still yields each index exactly once
/// per `2^k` steps.
///
/// For more information: <https://en.wikipedia.org/wiki/Linear_congruential_generator>
///
/// `current` is the only state; persisting it is enough to resume the walk.
/// No cryptographic property is claimed, only a reproducible non-sequential
/// visit order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Lcg {
    current: u32,
}

impl Lcg {
    /// Seed a fresh generator. Shards derive their seed as
    /// `seed.wrapping_add(shard_index0)` so sibling shards walk
    /// different offsets of the same cycle.
    #[must_use]
    pub const fn new(seed: u32) -> Self {
        Self { current: seed }
    }

    /// Rebuild a generator from a previously persisted `current` value.
    /// The original seed no longer matters once a state is restored.
    #[must_use]
    pub const fn from_state(state: u32) -> Self {
        Self { current: state }
    }

    /// Advance one step and return the new value.
    pub fn next_value(&mut self) -> u32 {
        self.current = MULTIPLIER
            .wrapping_mul(self.current)
            .wrapping_add(INCREMENT);
        self.current
    }

    /// The current internal value, i.e. what a checkpoint stores.
    #[must_use]
    pub const fn state(&self) -> u32 {
        self.current
    }
}
