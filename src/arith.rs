// Use of this source code is governed by a BSD-style
// license that can be found in the LICENSE file.

//! Arithmetic primitives and the positional digit accessor.
//!
//! The factoring algorithms are generic over an integer type
//! implementing [`Num`]: the native 64-bit and 128-bit integers for
//! small inputs, and fixed width multiword integers from `bnum`
//! when the input exceeds the native range.

use std::ops::{Add, Div, Mul, Rem, Shl, Shr, Sub};

use num_integer::Integer;
use num_traits::{One, Zero};

pub type U256 = bnum::types::U256;
pub type U512 = bnum::types::U512;
pub type U1024 = bnum::types::U1024;

pub trait Num:
    Zero
    + One
    + From<u64>
    + Add<Self, Output = Self>
    + Sub<Self, Output = Self>
    + Mul<Self, Output = Self>
    + Div<Self, Output = Self>
    + Rem<Self, Output = Self>
    + Shl<u32, Output = Self>
    + Shr<u32, Output = Self>
    + Ord
    + Copy
{
    const BITS: u32;
    fn bits(&self) -> u32;
    fn low_u64(&self) -> u64;
}

impl Num for u64 {
    const BITS: u32 = 64;
    fn bits(&self) -> u32 {
        Self::BITS - self.leading_zeros()
    }
    fn low_u64(&self) -> u64 {
        *self
    }
}

impl Num for u128 {
    const BITS: u32 = 128;
    fn bits(&self) -> u32 {
        Self::BITS - self.leading_zeros()
    }
    fn low_u64(&self) -> u64 {
        *self as u64
    }
}

impl Num for U256 {
    const BITS: u32 = 256;
    fn bits(&self) -> u32 {
        U256::bits(self)
    }
    fn low_u64(&self) -> u64 {
        self.digits()[0]
    }
}

impl Num for U512 {
    const BITS: u32 = 512;
    fn bits(&self) -> u32 {
        U512::bits(self)
    }
    fn low_u64(&self) -> u64 {
        self.digits()[0]
    }
}

impl Num for U1024 {
    const BITS: u32 = 1024;
    fn bits(&self) -> u32 {
        U1024::bits(self)
    }
    fn low_u64(&self) -> u64 {
        self.digits()[0]
    }
}

/// Rounded down integer square root.
pub fn isqrt<T: Num>(n: T) -> T {
    let one = T::one();
    if n <= one {
        return n;
    }
    let two = T::from(2);
    let mut r = one << (n.bits() / 2);
    r = (r + n / r) / two;
    // (r + n/r)^2 = 2n + r^2 + n^2/r^2 > 4n
    while (r - one) * (r - one) > n {
        r = (r + n / r) / two;
    }
    if r * r <= n {
        r
    } else {
        r - one
    }
}

/// Exponentiation by a non-negative exponent.
pub fn pow<T: Num>(x: T, e: u32) -> T {
    let mut r = T::one();
    let mut b = x;
    let mut e = e;
    loop {
        if e & 1 == 1 {
            r = r * b;
        }
        e >>= 1;
        if e == 0 {
            return r;
        }
        b = b * b;
    }
}

/// Modular inverse of x modulo m, if gcd(x, m) == 1.
///
/// Only single digits (less than the numeral base) are ever inverted,
/// so a 64-bit version is enough.
pub fn inv_mod_u64(x: u64, m: u64) -> Option<u64> {
    if x == 0 {
        return None;
    }
    let e = Integer::extended_gcd(&((x % m) as i64), &(m as i64));
    if e.gcd != 1 {
        return None;
    }
    Some(e.x.rem_euclid(m as i64) as u64)
}

/// Returns the digit of x at the position whose weight is digit_base
/// (a power of base).
pub fn get_digit<T: Num>(x: T, digit_base: T, base: T) -> T {
    (x / digit_base) % base
}

/// Writes digit at the position whose weight is digit_base. The slot
/// must currently hold a zero digit, otherwise the result is garbage.
pub fn set_digit<T: Num>(x: T, digit: T, digit_base: T) -> T {
    x + digit * digit_base
}

/// Number of digits of x written in base base.
pub fn num_digits<T: Num>(x: T, base: T) -> u32 {
    let mut x = x;
    let mut digits = 0;
    while x > T::zero() {
        x = x / base;
        digits += 1;
    }
    digits
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_isqrt() {
        for n in 0..=10_000_u64 {
            let r = isqrt(n);
            assert!(r * r <= n && n < (r + 1) * (r + 1), "sqrt({n}) = {r}");
        }
        for k in 1..1000_u64 {
            let n = U256::from(123456789_u64 * k);
            assert_eq!(isqrt(n * n), n);
            assert_eq!(isqrt(n * n + U256::ONE), n);
            assert_eq!(isqrt(n * n - U256::ONE), n - U256::ONE);
        }
    }

    #[test]
    fn test_pow() {
        assert_eq!(pow(1_u64, 0), 1);
        assert_eq!(pow(3_u64, 0), 1);
        assert_eq!(pow(2_u64, 10), 1024);
        assert_eq!(pow(10_u64, 6), 1_000_000);
        assert_eq!(pow(U256::from(7_u64), 20), U256::from(79792266297612001_u64));
    }

    #[test]
    fn test_inv_mod() {
        for m in [2_u64, 3, 5, 7, 13, 97] {
            for x in 1..m {
                let inv = inv_mod_u64(x, m).unwrap();
                assert_eq!(x * inv % m, 1, "inverse of {x} mod {m}");
            }
        }
        // Non-invertible digits of a composite modulus.
        assert_eq!(inv_mod_u64(0, 10), None);
        assert_eq!(inv_mod_u64(2, 10), None);
        assert_eq!(inv_mod_u64(5, 10), None);
        assert_eq!(inv_mod_u64(6, 9), None);
        assert_eq!(inv_mod_u64(3, 10), Some(7));
        assert_eq!(inv_mod_u64(9, 10), Some(9));
    }

    #[test]
    fn test_digit_roundtrip() {
        // get_digit(set_digit(0, d, base^k), base^k, base) == d
        for base in [2_u64, 3, 10, 16] {
            for k in 0..6 {
                let w = pow(base, k);
                for d in 0..base {
                    let x = set_digit(0, d, w);
                    assert_eq!(get_digit(x, w, base), d);
                }
            }
        }
    }

    #[test]
    fn test_get_digit() {
        // 1994 = [4, 9, 9, 1] in base 10
        for (k, d) in [4_u64, 9, 9, 1, 0].into_iter().enumerate() {
            assert_eq!(get_digit(1994_u64, pow(10, k as u32), 10), d);
        }
        // 13 = 1101 in base 2
        for (k, d) in [1_u64, 0, 1, 1].into_iter().enumerate() {
            assert_eq!(get_digit(13_u64, pow(2, k as u32), 2), d);
        }
    }

    #[test]
    fn test_num_digits() {
        assert_eq!(num_digits(0_u64, 10), 0);
        assert_eq!(num_digits(9_u64, 10), 1);
        assert_eq!(num_digits(91_u64, 10), 2);
        assert_eq!(num_digits(1024_u64, 2), 11);
        assert_eq!(num_digits(U256::from(1_000_000_u64), U256::from(10_u64)), 7);
    }
}
