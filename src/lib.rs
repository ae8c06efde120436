// Use of this source code is governed by a BSD-style
// license that can be found in the LICENSE file.

//! Digifact builds factors of an integer digit by digit.
//!
//! Instead of probing divisors one by one, the two factors of n are
//! written out in a positional base, least significant digit first,
//! and each digit pair is constrained by the corresponding digit of n
//! through the carries of schoolbook multiplication. The same digit
//! equations also yield a residue filter that accelerates ordinary
//! trial division.

pub mod arith;
pub mod ltbnjf;
pub mod random;
pub mod residues;
pub mod search;
pub mod trial;

/// Default multiword integer for inputs beyond the native range.
pub type Uint = arith::U256;

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, PartialOrd, Ord)]
pub enum Verbosity {
    #[default]
    Silent,
    Info,
    Verbose,
    Debug,
}

/// Factors n over the given base, dispatching to the strategy the
/// base admits.
///
/// A prime base makes the digit residue filter useless but guarantees
/// the modular inverse shortcut of the digit search, so prime bases
/// run the recursive digit search and composite bases run residue
/// accelerated trial division refined through `steps` digit
/// equations. When base divides n no filtering is possible at all and
/// the scan is plain trial division.
///
/// Returns (1, n) when no non-trivial factor was found, i.e. n is
/// prime. Preconditions (not checked in release builds): base >= 2,
/// steps >= 1.
pub fn factorize<T: arith::Num>(n: T, base: u64, steps: u32, v: Verbosity) -> (T, T) {
    debug_assert!(base >= 2 && steps >= 1);
    let one = T::one();
    if n.is_zero() {
        return (one, T::zero());
    }
    if n == one {
        return (one, one);
    }
    if (n % T::from(base)).is_zero() {
        if v >= Verbosity::Info {
            eprintln!("base {base} divides n, falling back to plain trial division");
        }
        return trial::factorize(n);
    }
    if trial::is_prime(base) {
        if v >= Verbosity::Info {
            eprintln!("digit search over prime base {base}");
        }
        return search::factorize(n, base, &search::Params::default());
    }
    if v >= Verbosity::Info {
        eprintln!("residue filtered trial division over base {base}, {steps} steps");
    }
    residues::factorize(n, base, steps, v)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_dispatch() {
        let v = Verbosity::Silent;
        // Boundary cases.
        assert_eq!(factorize(0_u64, 2, 1, v), (1, 0));
        assert_eq!(factorize(1_u64, 2, 1, v), (1, 1));
        // Prime base: digit search.
        let (x, y) = factorize(91_u64, 2, 1, v);
        assert!(x * y == 91 && x > 1 && y > 1);
        let (x, y) = factorize(221_u64, 13, 1, v);
        assert!(x * y == 221 && x > 1 && y > 1);
        // Composite base: residue filtered scan.
        assert_eq!(factorize(91_u64, 10, 1, v), (7, 13));
        assert_eq!(factorize(91_u64, 10, 2, v), (7, 13));
        // Base divides n: plain scan.
        assert_eq!(factorize(90_u64, 10, 1, v), (2, 45));
        // Primes stay trivial on every route.
        assert_eq!(factorize(97_u64, 2, 1, v), (1, 97));
        assert_eq!(factorize(97_u64, 10, 1, v), (1, 97));
    }

    #[test]
    fn test_dispatch_uint() {
        let v = Verbosity::Silent;
        let n = Uint::from(10403_u64);
        let (x, y) = factorize(n, 10, 2, v);
        assert_eq!((x, y), (Uint::from(101_u64), Uint::from(103_u64)));
    }
}
