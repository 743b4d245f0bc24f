//! Exhaustive permutation generation.
//!
//! # Algorithm
//!
//! Iterative extension: start from the `k` single-element prefixes
//! `[0], [1], …, [k-1]`, then repeatedly extend every prefix by each index
//! it does not yet contain, in ascending order, until prefixes reach
//! length `k`. The enumeration order is stable but carries no meaning.
//!
//! # Complexity
//!
//! O(k! · k²) time, O(k! · k) bytes.

use super::PermutationSet;

/// Generates all `k!` permutations of `{0..k-1}`.
///
/// # Panics
///
/// Panics if `k > 255` (positions are stored as bytes).
///
/// # Examples
///
/// ```
/// use u_tsp::permutation::generate_permutations;
///
/// let set = generate_permutations(3);
/// let all: Vec<Vec<u8>> = set.iter().map(<[u8]>::to_vec).collect();
/// assert_eq!(all, vec![
///     vec![0, 1, 2], vec![0, 2, 1], vec![1, 0, 2],
///     vec![1, 2, 0], vec![2, 0, 1], vec![2, 1, 0],
/// ]);
/// ```
pub fn generate_permutations(k: usize) -> PermutationSet {
    assert!(
        k <= u8::MAX as usize,
        "permutation length {k} exceeds byte encoding"
    );
    if k == 0 {
        return PermutationSet::from_generated(0, Vec::new());
    }

    let alphabet: Vec<u8> = (0..k as u8).collect();
    let mut width = 1;
    let mut level = alphabet.clone();

    while width < k {
        let prefixes = level.len() / width;
        let mut next = Vec::with_capacity(prefixes * (k - width) * (width + 1));
        for prefix in level.chunks_exact(width) {
            for &m in &alphabet {
                if !prefix.contains(&m) {
                    next.extend_from_slice(prefix);
                    next.push(m);
                }
            }
        }
        level = next;
        width += 1;
    }

    PermutationSet::from_generated(k, level)
}
