//! Random password generation for new volunteers

use rand::Rng;
use rand::rngs::OsRng;
use rand::seq::SliceRandom;

const LOWER: &[u8] = b"abcdefghijklmnopqrstuvwxyz";
const UPPER: &[u8] = b"ABCDEFGHIJKLMNOPQRSTUVWXYZ";
const DIGITS: &[u8] = b"0123456789";
const SYMBOLS: &[u8] = b"~!@#$%^&*()_+`-={}|[]\\:\"<>?,./";

/// Generator for volunteer passwords
///
/// Every password contains exactly `digits` digits and `symbols` symbols; the
/// remaining characters are letters with at least one of each case.
#[derive(Debug, Clone)]
pub struct PasswordGenerator {
    length: usize,
    digits: usize,
    symbols: usize,
}

impl PasswordGenerator {
    /// Create a generator; `length` must leave room for two letters
    pub fn new(length: usize, digits: usize, symbols: usize) -> Self {
        assert!(
            length >= digits + symbols + 2,
            "password length too short for the requested character classes"
        );

        Self {
            length,
            digits,
            symbols,
        }
    }

    /// Generate a new password from the OS random source
    pub fn generate(&self) -> String {
        let mut rng = OsRng;
        let letters = self.length - self.digits - self.symbols;

        let mut chars: Vec<u8> = Vec::with_capacity(self.length);
        chars.push(pick(&mut rng, LOWER));
        chars.push(pick(&mut rng, UPPER));

        for _ in 2..letters {
            let set = if rng.gen_bool(0.5) { LOWER } else { UPPER };
            chars.push(pick(&mut rng, set));
        }

        for _ in 0..self.digits {
            chars.push(pick(&mut rng, DIGITS));
        }

        for _ in 0..self.symbols {
            chars.push(pick(&mut rng, SYMBOLS));
        }

        chars.shuffle(&mut rng);
        chars.into_iter().map(char::from).collect()
    }
}

impl Default for PasswordGenerator {
    fn default() -> Self {
        Self::new(16, 5, 3)
    }
}

fn pick<R: Rng>(rng: &mut R, set: &[u8]) -> u8 {
    set[rng.gen_range(0..set.len())]
}

#[cfg(test)]
mod tests {
    use super::*;

    fn count_in(password: &str, set: &[u8]) -> usize {
        password.bytes().filter(|b| set.contains(b)).count()
    }

    #[test]
    fn test_default_password_shape() {
        let generator = PasswordGenerator::default();

        for _ in 0..200 {
            let password = generator.generate();

            assert_eq!(password.chars().count(), 16);
            assert_eq!(count_in(&password, DIGITS), 5);
            assert_eq!(count_in(&password, SYMBOLS), 3);
            assert!(count_in(&password, LOWER) >= 1);
            assert!(count_in(&password, UPPER) >= 1);
        }
    }

    #[test]
    fn test_passwords_differ() {
        let generator = PasswordGenerator::default();
        assert_ne!(generator.generate(), generator.generate());
    }

    #[test]
    fn test_custom_shape() {
        let password = PasswordGenerator::new(4, 1, 1).generate();

        assert_eq!(password.len(), 4);
        assert_eq!(count_in(&password, DIGITS), 1);
        assert_eq!(count_in(&password, SYMBOLS), 1);
    }

    #[test]
    #[should_panic]
    fn test_too_short() {
        PasswordGenerator::new(3, 1, 1);
    }
}
