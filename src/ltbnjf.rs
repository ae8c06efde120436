// Use of this source code is governed by a BSD-style
// license that can be found in the LICENSE file.

//! Factorisation of LTBNJF numbers I_{0,i,b}.
//!
//! An LTBNJF number is determined by an index i and a base b. Its
//! non-trivial divisors are again LTBNJF numbers, obtained from the
//! prime decomposition of the index alone: for the k-th prime power
//! p^e of i, each multiplicity step j yields the divisor
//! I_{0, p, b^(m * p^(e-j))} where m is the product of the earlier
//! prime powers. No arithmetic on the (astronomically large) value of
//! the number itself is needed.

use std::fmt;

use crate::arith::{self, Num};
use crate::trial;

/// The LTBNJF number I_{0,index,base}.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Ltbnjf<T> {
    pub index: u64,
    pub base: T,
}

impl<T: fmt::Display> fmt::Display for Ltbnjf<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "I_{{0,{},{}}}", self.index, self.base)
    }
}

/// Prime factorisation of n as ascending (prime, multiplicity) pairs,
/// by trial division.
pub fn prime_factors(n: u64) -> Vec<(u64, u32)> {
    let mut result = Vec::new();
    let mut m = n;
    let mut p = 2;
    while p <= m {
        if m % p == 0 {
            let mut multiplicity = 0;
            while m % p == 0 {
                m /= p;
                multiplicity += 1;
            }
            result.push((p, multiplicity));
        }
        p += 1;
    }
    result
}

/// Factorises an LTBNJF number with x = 0 into LTBNJF divisors.
///
/// The exponents b^(m * p^(e-j)) must fit the chosen integer type;
/// inputs are expected to be small.
pub fn factorize<T: Num>(x: &Ltbnjf<T>) -> Vec<Ltbnjf<T>> {
    let factors = prime_factors(x.index);
    let mut result = Vec::new();
    for (i, &(p, e)) in factors.iter().enumerate() {
        let mut lower_product: u64 = 1;
        for &(q, f) in &factors[..i] {
            lower_product *= q.pow(f);
        }
        for j in 1..=e {
            let exp = lower_product * p.pow(e - j);
            result.push(Ltbnjf {
                index: p,
                base: arith::pow(x.base, exp as u32),
            });
        }
    }
    result
}

/// True when the index admits no LTBNJF divisors at all.
pub fn is_irreducible<T>(x: &Ltbnjf<T>) -> bool {
    trial::is_prime(x.index) || x.index == 1
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_prime_factors() {
        assert_eq!(prime_factors(1), vec![]);
        assert_eq!(prime_factors(2), vec![(2, 1)]);
        assert_eq!(prime_factors(12), vec![(2, 2), (3, 1)]);
        assert_eq!(prime_factors(360), vec![(2, 3), (3, 2), (5, 1)]);
        assert_eq!(prime_factors(97), vec![(97, 1)]);
    }

    #[test]
    fn test_ltbnjf_factorize() {
        // index 4 = 2^2 over base 3: divisors I_{0,2,3^2}, I_{0,2,3}.
        let x = Ltbnjf { index: 4, base: 3_u64 };
        assert_eq!(
            factorize(&x),
            vec![
                Ltbnjf { index: 2, base: 9 },
                Ltbnjf { index: 2, base: 3 },
            ]
        );
        // index 6 = 2 * 3 over base 2: I_{0,2,2}, then I_{0,3,2^2}.
        let x = Ltbnjf { index: 6, base: 2_u64 };
        assert_eq!(
            factorize(&x),
            vec![
                Ltbnjf { index: 2, base: 2 },
                Ltbnjf { index: 3, base: 4 },
            ]
        );
        // A prime index has no divisors.
        let x = Ltbnjf { index: 7, base: 10_u64 };
        assert!(factorize(&x).is_empty());
        assert!(is_irreducible(&x));
    }

    #[test]
    fn test_ltbnjf_display() {
        let x = Ltbnjf { index: 4, base: 3_u64 };
        assert_eq!(x.to_string(), "I_{0,4,3}");
    }
}
