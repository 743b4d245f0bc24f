//! Dense permutation storage.

use crate::error::PermutationSetError;

/// All permutations of `{0..length-1}` in one contiguous byte buffer.
///
/// Each permutation occupies `length` consecutive bytes, one per position,
/// matching the on-disk `.perm` encoding.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PermutationSet {
    length: usize,
    count: usize,
    data: Vec<u8>,
}

impl PermutationSet {
    /// Wraps a buffer of `data.len() / length` permutations.
    ///
    /// Checks that every chunk is a permutation of `0..length` and that the
    /// buffer holds each of the `length!` permutations exactly once.
    pub fn from_bytes(length: usize, data: Vec<u8>) -> Result<Self, PermutationSetError> {
        if length > u8::MAX as usize {
            return Err(PermutationSetError::LengthTooLarge { length });
        }
        let expected = factorial(length);
        if length == 0 {
            if !data.is_empty() {
                return Err(PermutationSetError::DataForZeroLength);
            }
            return Ok(Self::empty());
        }
        if !data.len().is_multiple_of(length) {
            return Err(PermutationSetError::Truncated {
                bytes: data.len(),
                length,
            });
        }
        let count = data.len() / length;
        if count != expected {
            return Err(PermutationSetError::WrongCount {
                expected,
                found: count,
            });
        }
        let mut seen = vec![false; expected];
        for (entry, perm) in data.chunks_exact(length).enumerate() {
            let Some(rank) = lehmer_rank(perm) else {
                return Err(PermutationSetError::NotAPermutation { entry, length });
            };
            if std::mem::replace(&mut seen[rank], true) {
                return Err(PermutationSetError::Duplicate { entry });
            }
        }
        Ok(Self {
            length,
            count,
            data,
        })
    }

    pub(crate) fn from_generated(length: usize, data: Vec<u8>) -> Self {
        if length == 0 {
            return Self::empty();
        }
        let count = data.len() / length;
        Self {
            length,
            count,
            data,
        }
    }

    fn empty() -> Self {
        Self {
            length: 0,
            count: 1,
            data: Vec::new(),
        }
    }

    /// Number of positions in each permutation.
    pub fn length(&self) -> usize {
        self.length
    }

    /// Number of permutations (`length!`).
    pub fn len(&self) -> usize {
        self.count
    }

    /// Always `false`: even length 0 has the empty permutation.
    pub fn is_empty(&self) -> bool {
        self.count == 0
    }

    /// The `i`-th permutation.
    ///
    /// # Panics
    ///
    /// Panics if `i >= len()`.
    pub fn get(&self, i: usize) -> &[u8] {
        assert!(i < self.count, "permutation index {i} out of range");
        &self.data[i * self.length..(i + 1) * self.length]
    }

    /// Iterates over the permutations in storage order.
    pub fn iter(&self) -> impl Iterator<Item = &[u8]> + '_ {
        (0..self.count).map(move |i| self.get(i))
    }

    /// The raw `.perm` encoding.
    pub fn as_bytes(&self) -> &[u8] {
        &self.data
    }
}

/// `n!`, saturating at `usize::MAX`.
pub fn factorial(n: usize) -> usize {
    (1..=n).fold(1usize, |acc, k| acc.saturating_mul(k))
}

/// Lexicographic rank of `perm` among permutations of `0..perm.len()`,
/// or `None` if it is not a permutation.
fn lehmer_rank(perm: &[u8]) -> Option<usize> {
    let k = perm.len();
    let mut used = vec![false; k];
    let mut rank = 0usize;
    for (pos, &v) in perm.iter().enumerate() {
        let v = v as usize;
        if v >= k || used[v] {
            return None;
        }
        let smaller_unused = used[..v].iter().filter(|u| !**u).count();
        rank += smaller_unused * factorial(k - pos - 1);
        used[v] = true;
    }
    Some(rank)
}
