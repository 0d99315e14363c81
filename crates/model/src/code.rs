//! Shareable quiz join codes of the shape `AAAAA-BBBBB`.

use alloc::string::String;
use rand::{distributions::Alphanumeric, Rng};

/// Total number of characters in a code, dash included.
pub const LENGTH: usize = 11;

/// Position of the separating dash.
pub const DASH: usize = 5;

/// Generates a fresh code. Every non-dash position is drawn independently and uniformly from
/// `[A-Za-z0-9]`. Uniqueness is not guaranteed here: the store rejects collisions.
pub fn generate<R: Rng + ?Sized>(rng: &mut R) -> String {
    let mut code = String::with_capacity(LENGTH);
    for i in 0..LENGTH {
        let symbol = if i == DASH { '-' } else { char::from(rng.sample(Alphanumeric)) };
        code.push(symbol);
    }
    code
}

/// Checks whether the text has the exact shape of a code. This says nothing about whether a quiz
/// with this code actually exists.
pub fn is_valid(code: &str) -> bool {
    let bytes = code.as_bytes();
    if bytes.len() != LENGTH {
        return false;
    }

    if bytes[DASH] != b'-' {
        return false;
    }

    bytes.iter().enumerate().filter(|&(i, _)| i != DASH).all(|(_, byte)| byte.is_ascii_alphanumeric())
}

/// Cleans up a code as typed by a human. Stray symbols are dropped and the dash is put back
/// after the fifth symbol. Anything past [`LENGTH`] is cut off. The result still has to pass
/// [`is_valid`].
pub fn format_input(input: &str) -> String {
    let mut cleaned: String = input.chars().filter(|c| c.is_ascii_alphanumeric() || *c == '-').collect();

    if cleaned.len() == DASH && !cleaned.contains('-') {
        cleaned.push('-');
    }

    if cleaned.len() > DASH && cleaned.as_bytes()[DASH] != b'-' {
        let symbols: String = cleaned.chars().filter(|&c| c != '-').collect();
        cleaned.clear();
        for (i, symbol) in symbols.chars().take(LENGTH - 1).enumerate() {
            if i == DASH {
                cleaned.push('-');
            }
            cleaned.push(symbol);
        }
    }

    // Only ASCII survives the filter above.
    cleaned.truncate(LENGTH);
    cleaned
}
