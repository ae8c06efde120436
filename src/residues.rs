// Use of this source code is governed by a BSD-style
// license that can be found in the LICENSE file.

//! Trial division accelerated by a digit residue filter.
//!
//! Solving the 0th digit equation da * db == n (mod base) restricts
//! which digits a factor of n can end in. The admissible residues are
//! turned into a cyclic increment table, and the trial division
//! cursor hops through it, skipping every candidate that cannot
//! divide n. With steps > 1 the residue set is refined through deeper
//! digit equations before the scan: fewer residues per cycle at the
//! price of a larger precomputation.
//!
//! The filter degenerates when base divides n (factors ending in 0
//! cannot be ruled out) and when base is prime (every nonzero digit
//! pair is admissible for some residue), in which case the scan falls
//! back to plain trial division.

use crate::arith::{self, Num};
use crate::search::check_digit_equation;
use crate::{trial, Verbosity};

/// Scan strategy selected once before the trial division loop.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Strategy<T> {
    /// Visit only values matching an admissible residue mod base^steps.
    Filtered {
        residues: Vec<T>,
        increments: Vec<T>,
    },
    /// Visit every candidate from 2 upwards.
    Unfiltered,
}

/// Solves the first `steps` digit equations and collects every
/// admissible low-digit value of either factor.
///
/// The table is a superset filter: the true digit assignment of any
/// factor pair survives each equation and the product bound, so no
/// factor's residue is ever excluded.
pub fn precompute_residues<T: Num>(n: T, base: u64, steps: u32) -> Strategy<T> {
    debug_assert!(base >= 2 && steps >= 1);
    let b = T::from(base);
    if (n % b).is_zero() || trial::is_prime(base) {
        return Strategy::Unfiltered;
    }
    let mut residuals = Vec::new();
    collect_residuals(n, &mut residuals, b, T::zero(), T::zero(), 0, steps, T::zero(), T::one());
    residuals.sort_unstable();
    residuals.dedup();
    if residuals.is_empty() {
        return Strategy::Unfiltered;
    }
    let modulus = arith::pow(b, steps);
    let len = residuals.len();
    let mut increments = Vec::with_capacity(len);
    for i in 0..len {
        let cur = residuals[i];
        let next = residuals[(i + 1) % len];
        let inc = if next > cur {
            next - cur
        } else {
            next + modulus - cur
        };
        increments.push(inc);
    }
    Strategy::Filtered {
        residues: residuals,
        increments,
    }
}

fn collect_residuals<T: Num>(
    n: T,
    residuals: &mut Vec<T>,
    base: T,
    first_so_far: T,
    second_so_far: T,
    depth: u32,
    steps: u32,
    carry: T,
    previous_base: T,
) {
    // A factor of n cannot end in digit 0 when base does not divide
    // n; deeper digits may be anything.
    let start = u64::from(depth == 0);
    let base_u = base.low_u64();
    for first_digit in start..base_u {
        let a = arith::set_digit(first_so_far, T::from(first_digit), previous_base);
        for second_digit in start..base_u {
            let b = arith::set_digit(second_so_far, T::from(second_digit), previous_base);
            if a * b > n {
                break;
            }
            let Some(new_carry) = check_digit_equation(n, a, b, carry, base, previous_base)
            else {
                continue;
            };
            if depth + 1 < steps {
                collect_residuals(
                    n,
                    residuals,
                    base,
                    a,
                    b,
                    depth + 1,
                    steps,
                    new_carry,
                    previous_base * base,
                );
            } else {
                residuals.push(a);
                residuals.push(b);
            }
        }
    }
}

/// Trial division over [2, sqrt(n)], skipping candidates whose
/// residue mod base^steps cannot belong to a factor.
///
/// Returns (1, n) when n has no non-trivial factor.
pub fn factorize<T: Num>(n: T, base: u64, steps: u32, v: Verbosity) -> (T, T) {
    let one = T::one();
    if n.is_zero() {
        return (one, T::zero());
    }
    let (residues, increments) = match precompute_residues(n, base, steps) {
        Strategy::Unfiltered => {
            if v >= Verbosity::Verbose {
                eprintln!("no usable digit filter for base {base}, scanning every candidate");
            }
            return trial::factorize(n);
        }
        Strategy::Filtered {
            residues,
            increments,
        } => (residues, increments),
    };
    if v >= Verbosity::Verbose {
        eprintln!(
            "scanning {} residue classes mod {base}^{steps}",
            residues.len()
        );
    }
    let two = T::from(2);
    let r = arith::isqrt(n);
    let len = increments.len();
    let mut cursor = 0;
    while cursor < len && residues[cursor] < two {
        cursor += 1;
    }
    if cursor == len {
        return trial::factorize(n);
    }
    let mut x = residues[cursor];
    while x <= r {
        if (n % x).is_zero() {
            return (x, n / x);
        }
        x = x + increments[cursor];
        cursor = (cursor + 1) % len;
    }
    (one, n)
}

#[test]
fn test_precompute_91() {
    // 91 ends in 1, so factor digits must multiply to 1 mod 10.
    let s = precompute_residues(91_u64, 10, 1);
    let Strategy::Filtered {
        residues,
        increments,
    } = s
    else {
        panic!("expected a filtered strategy");
    };
    assert_eq!(residues, vec![1, 3, 7, 9]);
    assert_eq!(increments, vec![2, 4, 2, 2]);
}

#[test]
fn test_precompute_degenerate() {
    // Prime base: every nonzero residue is achievable.
    assert_eq!(precompute_residues(91_u64, 5, 1), Strategy::Unfiltered);
    assert_eq!(precompute_residues(91_u64, 13, 2), Strategy::Unfiltered);
    // n divisible by the base.
    assert_eq!(precompute_residues(90_u64, 10, 1), Strategy::Unfiltered);
}

#[test]
fn test_residue_soundness() {
    // No true factor's residue may be excluded from the table.
    let samples: &[u64] = &[21, 91, 143, 1001, 3 * 3 * 7 * 11, 101 * 103, 997 * 7];
    for &n in samples {
        for base in [4_u64, 6, 9, 10, 15] {
            for steps in [1, 2] {
                let Strategy::Filtered { residues, .. } = precompute_residues(n, base, steps)
                else {
                    continue;
                };
                let m = arith::pow(base, steps);
                for x in 2..=arith::isqrt(n) {
                    if n % x == 0 {
                        assert!(
                            residues.contains(&(x % m)),
                            "factor {x} of {n} excluded mod {base}^{steps}"
                        );
                    }
                }
            }
        }
    }
}

#[test]
fn test_skip_scan_basic() {
    let v = Verbosity::Silent;
    assert_eq!(factorize(0_u64, 10, 1, v), (1, 0));
    assert_eq!(factorize(1_u64, 10, 1, v), (1, 1));
    assert_eq!(factorize(91_u64, 10, 1, v), (7, 13));
    assert_eq!(factorize(91_u64, 10, 2, v), (7, 13));
    assert_eq!(factorize(97_u64, 10, 1, v), (1, 97));
    let n = crate::Uint::from(10403_u64); // 101 * 103
    let (x, y) = factorize(n, 10, 2, v);
    assert_eq!(
        (x, y),
        (crate::Uint::from(101_u64), crate::Uint::from(103_u64))
    );
}

#[test]
fn test_agrees_with_trial_division() {
    let v = Verbosity::Silent;
    for (base, steps) in [(10_u64, 1), (10, 2), (6, 1), (15, 2), (2, 1), (9, 3)] {
        for n in 1..=3000_u64 {
            let (a, b) = trial::factorize(n);
            let (x, y) = factorize(n, base, steps, v);
            if a == 1 {
                assert_eq!((x, y), (1, n), "base {base} steps {steps} n {n}");
            } else {
                // Both scans move in ascending order and must agree on
                // the smallest factor.
                assert_eq!((x, y), (a, b), "base {base} steps {steps} n {n}");
            }
        }
    }
}
