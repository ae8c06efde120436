// Use of this source code is governed by a BSD-style
// license that can be found in the LICENSE file.

//! Randomised factor search.
//!
//! A candidate divisor s is drawn uniformly from [2, sqrt(n)] and the
//! map s -> 1 / (1/s^p + 1/t^p) with t = n/s is iterated in floating
//! point, re-rolling whenever the iteration collapses to zero or
//! enters a short cycle. The walk stops as soon as s divides n
//! non-trivially. This is a heuristic with no convergence guarantee,
//! so a round budget is mandatory: primes would otherwise loop
//! forever.

use rand::Rng;

use crate::arith;

/// Attempts to factor n with at most max_rounds iterations of the
/// p-norm mean map. Returns None when the budget runs out.
pub fn rand_factorize<R: Rng>(
    n: u64,
    p: u32,
    max_rounds: u64,
    rng: &mut R,
) -> Option<(u64, u64)> {
    debug_assert!(p >= 1);
    if n < 4 {
        return None;
    }
    let root = arith::isqrt(n);
    let mut s = rng.gen_range(2..=root);
    let mut t = n / s;
    let (mut prev_s, mut prev_t) = (0, 0);
    for _ in 0..max_rounds {
        if s * t == n && s != 1 && t != 1 {
            return Some((s, t));
        }
        let sp = (s as f64).powi(p as i32);
        let tp = (t as f64).powi(p as i32);
        let next = (1.0 / (1.0 / sp + 1.0 / tp)) as u64;
        if next == 0 || next == prev_s || n / next == prev_t {
            // Collapsed or cycling, roll a fresh candidate.
            prev_s = 0;
            prev_t = 0;
            s = rng.gen_range(2..=root);
        } else {
            prev_s = s;
            prev_t = t;
            s = next;
        }
        t = n / s;
    }
    None
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    #[test]
    fn test_rand_composites() {
        let mut rng = StdRng::seed_from_u64(42);
        for n in [15_u64, 91, 143, 1001, 10403] {
            let (s, t) = rand_factorize(n, 1, 1_000_000, &mut rng)
                .unwrap_or_else(|| panic!("failed to factor {n}"));
            assert!(s * t == n && s > 1 && t > 1, "{n} => ({s}, {t})");
        }
    }

    #[test]
    fn test_rand_budget() {
        let mut rng = StdRng::seed_from_u64(1);
        // Primes admit no split: the budget must stop the walk.
        assert_eq!(rand_factorize(97, 1, 10_000, &mut rng), None);
        assert_eq!(rand_factorize(2, 1, 100, &mut rng), None);
        assert_eq!(rand_factorize(1, 1, 100, &mut rng), None);
    }
}
