// Use of this source code is governed by a BSD-style
// license that can be found in the LICENSE file.

//! Plain trial division, used as the correctness oracle for the
//! digit based algorithms, and a small primality test.

use crate::arith::{self, Num};

/// Scans x in [2, sqrt(n)] and returns (x, n/x) for the first divisor
/// found, else (1, n).
pub fn factorize<T: Num>(n: T) -> (T, T) {
    let one = T::one();
    if n <= one {
        return (one, n);
    }
    let r = arith::isqrt(n);
    let mut x = T::from(2);
    while x <= r {
        if (n % x).is_zero() {
            return (x, n / x);
        }
        x = x + one;
    }
    (one, n)
}

/// Trial division primality check, only intended for small inputs
/// such as a user supplied base.
pub fn is_prime(n: u64) -> bool {
    if n < 2 {
        return false;
    }
    let mut i = 2;
    while i * i <= n {
        if n % i == 0 {
            return false;
        }
        i += 1;
    }
    true
}

#[test]
fn test_trial() {
    assert_eq!(factorize(0_u64), (1, 0));
    assert_eq!(factorize(1_u64), (1, 1));
    assert_eq!(factorize(2_u64), (1, 2));
    assert_eq!(factorize(4_u64), (2, 2));
    assert_eq!(factorize(91_u64), (7, 13));
    assert_eq!(factorize(97_u64), (1, 97));
    assert_eq!(factorize(221_u64), (13, 17));
    let n = crate::Uint::from(291_u64);
    assert_eq!(factorize(n), (crate::Uint::from(3_u64), crate::Uint::from(97_u64)));
}

#[test]
fn test_is_prime() {
    let primes: &[u64] = &[2, 3, 5, 7, 11, 13, 97, 101, 7919];
    for &p in primes {
        assert!(is_prime(p), "{p} is prime");
    }
    for n in [0_u64, 1, 4, 9, 15, 91, 221, 7917] {
        assert!(!is_prime(n), "{n} is not prime");
    }
}
