//! Canonical prime capacities.
//!
//! Every table capacity is drawn from one fixed sequence:
//! `2, 5, 11, 23, 47, 97, 197, 397, 797, 1597, 3203, ...`, where each term is
//! the smallest prime strictly greater than twice its predecessor. Growing by
//! more than 2x per step keeps repeated rehashing amortised O(1) per insert.
//! Terms are generated lazily and cached per sequence.

/// Smallest member of the sequence.
pub const MIN_CAPACITY: usize = 2;
/// Capacity a fresh table starts with.
pub const INITIAL_CAPACITY: usize = 5;
/// No term of the sequence exceeds this. Larger requests are not canonical and
/// growth stops at the last term below it.
pub const MAX_CAPACITY: usize = u32::MAX as usize;

const INITIAL_CURSOR: usize = 1;

/// A cursor over the canonical prime sequence.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PrimeSequence {
    primes: Vec<usize>,
    cursor: usize,
}

impl PrimeSequence {
    /// A sequence positioned at [`INITIAL_CAPACITY`].
    pub fn new() -> Self {
        Self {
            primes: vec![MIN_CAPACITY, INITIAL_CAPACITY],
            cursor: INITIAL_CURSOR,
        }
    }

    /// A sequence positioned at `capacity`, or `None` if `capacity` is not a
    /// member of the canonical sequence.
    pub fn starting_at(capacity: usize) -> Option<Self> {
        if capacity > MAX_CAPACITY {
            return None;
        }
        let mut seq = Self {
            primes: vec![MIN_CAPACITY],
            cursor: 0,
        };
        while seq.current() < capacity {
            seq.primes.push(term_after(seq.current())?);
            seq.cursor += 1;
        }
        (seq.current() == capacity).then_some(seq)
    }

    #[inline]
    pub fn current(&self) -> usize {
        self.primes[self.cursor]
    }

    /// Advance and return the new, strictly larger, capacity.
    ///
    /// At the last term not above [`MAX_CAPACITY`] the cursor stays put and
    /// that term is returned, mirroring [`previous_prime`](Self::previous_prime).
    pub fn next_prime(&mut self) -> usize {
        if self.cursor + 1 == self.primes.len() {
            match term_after(self.current()) {
                Some(p) => self.primes.push(p),
                None => return self.current(),
            }
        }
        self.cursor += 1;
        self.current()
    }

    /// Retreat and return the new, strictly smaller, capacity.
    ///
    /// At [`MIN_CAPACITY`] there is nothing smaller; the cursor stays put and
    /// the minimum is returned. Callers check [`is_at_minimum`](Self::is_at_minimum)
    /// first if they care.
    pub fn previous_prime(&mut self) -> usize {
        self.cursor = self.cursor.saturating_sub(1);
        self.current()
    }

    pub fn is_at_minimum(&self) -> bool {
        self.cursor == 0
    }

    /// Whether [`next_prime`](Self::next_prime) would stay put.
    pub fn is_at_maximum(&self) -> bool {
        self.cursor + 1 == self.primes.len() && term_after(self.current()).is_none()
    }

    /// Return to [`INITIAL_CAPACITY`]. Cached terms are kept.
    pub fn reset(&mut self) {
        self.cursor = INITIAL_CURSOR;
    }

    /// Whether `n` is a member of the canonical sequence.
    pub fn is_canonical(n: usize) -> bool {
        Self::starting_at(n).is_some()
    }
}

impl Default for PrimeSequence {
    fn default() -> Self {
        Self::new()
    }
}

fn is_prime(n: usize) -> bool {
    if n < 2 {
        return false;
    }
    if n % 2 == 0 {
        return n == 2;
    }
    let mut d = 3;
    while d <= n / d {
        if n % d == 0 {
            return false;
        }
        d += 2;
    }
    true
}

fn smallest_prime_above(n: usize) -> Option<usize> {
    let mut candidate = n.checked_add(1)?;
    while !is_prime(candidate) {
        candidate = candidate.checked_add(1)?;
    }
    Some(candidate)
}

/// The term following `p`, or `None` past [`MAX_CAPACITY`].
fn term_after(p: usize) -> Option<usize> {
    p.checked_mul(2)
        .and_then(smallest_prime_above)
        .filter(|&next| next <= MAX_CAPACITY)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn starts_at_five_and_roughly_doubles() {
        let mut seq = PrimeSequence::new();
        assert_eq!(seq.current(), 5);
        let grown: Vec<usize> = (0..9).map(|_| seq.next_prime()).collect();
        assert_eq!(grown, vec![11, 23, 47, 97, 197, 397, 797, 1597, 3203]);
        for p in grown {
            assert!(is_prime(p));
        }
    }

    #[test]
    fn previous_retreats_and_saturates_at_two() {
        let mut seq = PrimeSequence::new();
        seq.next_prime();
        seq.next_prime();
        assert_eq!(seq.current(), 23);
        assert_eq!(seq.previous_prime(), 11);
        assert_eq!(seq.previous_prime(), 5);
        assert_eq!(seq.previous_prime(), 2);
        assert!(seq.is_at_minimum());
        assert_eq!(seq.previous_prime(), 2);
        assert!(seq.is_at_minimum());
        // Growing again from the bottom revisits the same terms.
        assert_eq!(seq.next_prime(), 5);
        assert_eq!(seq.next_prime(), 11);
    }

    #[test]
    fn reset_returns_to_initial_capacity() {
        let mut seq = PrimeSequence::new();
        for _ in 0..4 {
            seq.next_prime();
        }
        seq.reset();
        assert_eq!(seq.current(), INITIAL_CAPACITY);
        assert_eq!(seq.next_prime(), 11);
    }

    #[test]
    fn membership() {
        for p in [2, 5, 11, 23, 47, 97, 197] {
            assert!(PrimeSequence::is_canonical(p), "{p}");
        }
        for n in [0, 1, 3, 4, 7, 13, 24, 101] {
            assert!(!PrimeSequence::is_canonical(n), "{n}");
        }
    }

    #[test]
    fn starting_at_positions_cursor() {
        let mut seq = PrimeSequence::starting_at(47).expect("canonical");
        assert_eq!(seq.current(), 47);
        assert_eq!(seq.previous_prime(), 23);
        assert!(PrimeSequence::starting_at(7).is_none());
        assert!(PrimeSequence::starting_at(0).is_none());
    }

    #[test]
    fn huge_capacities_are_rejected_without_searching() {
        assert!(PrimeSequence::starting_at(usize::MAX).is_none());
        assert!(!PrimeSequence::is_canonical(usize::MAX));
        assert!(!PrimeSequence::is_canonical(MAX_CAPACITY));
        assert_eq!(smallest_prime_above(usize::MAX), None);
    }

    #[test]
    fn growth_saturates_at_the_largest_term() {
        let mut seq = PrimeSequence::new();
        while !seq.is_at_maximum() {
            seq.next_prime();
        }
        let top = seq.current();
        assert!(top <= MAX_CAPACITY);
        assert!(top > MAX_CAPACITY / 4);
        assert!(PrimeSequence::is_canonical(top));
        assert_eq!(seq.next_prime(), top);
        assert!(seq.is_at_maximum());
        assert!(seq.previous_prime() * 2 < top);
    }
}
