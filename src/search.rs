// Use of this source code is governed by a BSD-style
// license that can be found in the LICENSE file.

//! Digit by digit factor search.
//!
//! Two candidate factors of n are built least significant digit first
//! in a chosen base. At depth k the partial factors are exact modulo
//! base^k and the convolution of their digits, carry included, must
//! reproduce the k-th digit of n: schoolbook long multiplication run
//! in reverse. Digit pairs breaking that equation, or pushing the
//! partial product above n, are pruned before recursing.
//!
//! When the low digit of the first partial factor is invertible
//! modulo the base, the matching digit of the second factor is solved
//! directly instead of enumerated, turning the O(base^2) digit pair
//! scan into O(base) work per level. For a prime base this shortcut
//! applies at every digit except when the pivot digit is 0.

use crate::arith::{self, Num};

/// Strategy knobs for the digit search.
#[derive(Clone, Copy, Debug)]
pub struct Params {
    /// Resolve the second factor digit through a modular inverse
    /// whenever the pivot digit is invertible mod base.
    pub use_inverse: bool,
    /// Force both 0th digits odd when factoring an odd n in base 2.
    pub parity_prune: bool,
    /// Give up after visiting this many search nodes.
    pub node_budget: Option<u64>,
}

impl Default for Params {
    fn default() -> Self {
        Params {
            use_inverse: true,
            parity_prune: true,
            node_budget: None,
        }
    }
}

enum Search<T> {
    Found(T, T),
    NotFound,
    Aborted,
}

/// Runs the digit search for n over the given base.
///
/// Returns (1, n) when no non-trivial factor pair exists in the
/// explored tree, meaning n is prime unless a node budget cut the
/// search short. The base must be at least 2 and fit in 32 bits;
/// with the native u64 backend, n * base^2 must also not overflow.
pub fn factorize<T: Num>(n: T, base: u64, params: &Params) -> (T, T) {
    debug_assert!(base >= 2);
    let one = T::one();
    if n.is_zero() {
        return (one, T::zero());
    }
    let b = T::from(base);
    let mut nodes = 0_u64;
    match find_next_digits(n, T::zero(), T::zero(), b, b, one, T::zero(), params, &mut nodes) {
        Search::Found(a, b) => (a, b),
        _ => (one, n),
    }
}

/// Checks whether the digit pair freshly written at weight
/// previous_base solves the digit equation at that position, and
/// returns the new carry when it does.
pub(crate) fn check_digit_equation<T: Num>(
    n: T,
    a: T,
    b: T,
    carry: T,
    base: T,
    previous_base: T,
) -> Option<T> {
    let mut sum = T::zero();
    let mut lower = T::one();
    let mut upper = previous_base;
    loop {
        sum = sum + arith::get_digit(a, lower, base) * arith::get_digit(b, upper, base);
        if upper == T::one() {
            break;
        }
        lower = lower * base;
        upper = upper / base;
    }
    sum = sum + carry;
    if sum % base == arith::get_digit(n, previous_base, base) {
        Some(sum / base)
    } else {
        None
    }
}

fn find_next_digits<T: Num>(
    n: T,
    first_so_far: T,
    second_so_far: T,
    base: T,
    current_base: T,
    previous_base: T,
    carry: T,
    params: &Params,
    nodes: &mut u64,
) -> Search<T> {
    if let Some(max) = params.node_budget {
        *nodes += 1;
        if *nodes > max {
            return Search::Aborted;
        }
    }

    let one = T::one();
    let base_u = base.low_u64();
    let d = n % current_base;
    // At the 0th digit of an odd n in base 2 both factors are odd.
    let first_level = previous_base == one;
    let prune_even = params.parity_prune && first_level && base_u == 2 && n.low_u64() & 1 == 1;
    let digit_start = if prune_even { 1 } else { 0 };
    let digit_step = if prune_even { 2 } else { 1 };

    for first_digit in (digit_start..base_u).step_by(digit_step as usize) {
        let a = arith::set_digit(first_so_far, T::from(first_digit), previous_base);
        let a0 = (a % base).low_u64();

        let inverse = if params.use_inverse && a0 != 0 {
            arith::inv_mod_u64(a0, base_u)
        } else {
            None
        };

        if let Some(inv) = inverse {
            // Cross terms of the convolution not involving the still
            // unknown digit of the second factor.
            let mut tmp = T::zero();
            let mut upper = previous_base;
            let mut lower = one;
            while upper >= base {
                tmp = tmp + arith::get_digit(a, upper, base) * arith::get_digit(second_so_far, lower, base);
                upper = upper / base;
                lower = lower * base;
            }
            tmp = tmp + carry;
            // Solve a0 * db + tmp == digit_k(n) (mod base) for db.
            let nk = arith::get_digit(n, previous_base, base).low_u64();
            let t = (tmp % base).low_u64();
            let second_digit = inv * ((nk + base_u - t) % base_u) % base_u;
            let b = arith::set_digit(second_so_far, T::from(second_digit), previous_base);
            let new_carry = (tmp + T::from(a0 * second_digit)) / base;
            let product = a * b;
            if product > n {
                // b is not monotonic in the first digit on this path,
                // so only this candidate is dropped.
                continue;
            }
            if product == n {
                if a != one && b != one {
                    return Search::Found(a, b);
                }
            } else if d == product % current_base {
                match find_next_digits(
                    n,
                    a,
                    b,
                    base,
                    current_base * base,
                    current_base,
                    new_carry,
                    params,
                    nodes,
                ) {
                    Search::NotFound => {}
                    found => return found,
                }
            }
        } else {
            // Pivot digit 0 or not invertible: enumerate the second
            // factor digit exhaustively.
            for second_digit in (digit_start..base_u).step_by(digit_step as usize) {
                let b = arith::set_digit(second_so_far, T::from(second_digit), previous_base);
                let Some(new_carry) = check_digit_equation(n, a, b, carry, base, previous_base)
                else {
                    continue;
                };
                let product = a * b;
                if product > n {
                    // Larger second digits only grow the product.
                    break;
                }
                if product == n {
                    if a != one && b != one {
                        return Search::Found(a, b);
                    }
                } else if d == product % current_base {
                    match find_next_digits(
                        n,
                        a,
                        b,
                        base,
                        current_base * base,
                        current_base,
                        new_carry,
                        params,
                        nodes,
                    ) {
                        Search::NotFound => {}
                        found => return found,
                    }
                }
            }
        }
    }

    Search::NotFound
}

#[cfg(test)]
fn enumeration_only() -> Params {
    Params {
        use_inverse: false,
        ..Params::default()
    }
}

#[test]
fn test_search_basic() {
    let p = Params::default();
    assert_eq!(factorize(0_u64, 2, &p), (1, 0));
    assert_eq!(factorize(1_u64, 2, &p), (1, 1));
    let (x, y) = factorize(91_u64, 10, &p);
    assert!(x * y == 91 && x > 1 && y > 1);
    assert_eq!(factorize(221_u64, 13, &p), (13, 17));
    // Primes only admit the trivial pair.
    assert_eq!(factorize(97_u64, 10, &p), (1, 97));
    assert_eq!(factorize(2_u64, 2, &p), (1, 2));
    let (x, y) = factorize(15_u64, 2, &p);
    assert!(x * y == 15 && x > 1 && y > 1);
}

#[test]
fn test_search_uint() {
    use crate::Uint;
    let p = Params::default();
    let n = Uint::from(91_u64);
    let (x, y) = factorize(n, 10, &p);
    assert_eq!(x * y, n);
    assert!(x > Uint::ONE && y > Uint::ONE);
    let n = Uint::from(221_u64);
    assert_eq!(factorize(n, 13, &p), (Uint::from(13_u64), Uint::from(17_u64)));
}

#[test]
fn test_carry_invariant() {
    // Digits (7, 3) at weight 1 for n = 91: 7*3 = 21, digit 1, carry 2.
    assert_eq!(check_digit_equation(91_u64, 7, 3, 0, 10, 1), Some(2));
    assert_eq!((7 * 3) % 10, 91 % 10);
    // Digits (0, 1) at weight 10: 7*1 + 0*3 + 2 = 9, carry 0.
    assert_eq!(check_digit_equation(91_u64, 7, 13, 2, 10, 10), Some(0));
    assert_eq!((7 * 13) % 100, 91 % 100);
    // A wrong digit pair is rejected.
    assert_eq!(check_digit_equation(91_u64, 7, 23, 2, 10, 10), None);
}

#[test]
fn test_agrees_with_trial_division() {
    for base in [2_u64, 3, 5, 10] {
        for n in 1..=600_u64 {
            let oracle = crate::trial::factorize(n).0 == 1;
            for params in [Params::default(), enumeration_only()] {
                let (x, y) = factorize(n, base, &params);
                if oracle {
                    assert_eq!((x, y), (1, n), "base {base} n {n} {params:?}");
                } else {
                    assert!(
                        x * y == n && x > 1 && y > 1,
                        "base {base} n {n} {params:?} => ({x}, {y})"
                    );
                }
            }
        }
    }
}

#[test]
fn test_node_budget() {
    let p = Params {
        node_budget: Some(50),
        ..Params::default()
    };
    // Far too small a budget to finish: the search aborts cleanly.
    let n = 2147483647_u64; // 2^31 - 1, prime
    assert_eq!(factorize(n, 2, &p), (1, n));
}
