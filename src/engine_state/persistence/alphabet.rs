//! The 64-symbol alphabet save codes are written in.
//!
//! `A`-`Z` are 0-25, `a`-`z` are 26-51, `0`-`9` are 52-61, `+` is 62 and `/`
//! is 63. Each symbol carries six bits.

/// Symbols in value order.
pub const ALPHABET: &[u8; 64] = b"ABCDEFGHIJKLMNOPQRSTUVWXYZabcdefghijklmnopqrstuvwxyz0123456789+/";

/// The largest value a single symbol holds.
pub const MAX_SYMBOL_VALUE: u16 = 63;

/// The symbol for the low six bits of `value`.
pub fn encode_symbol(value: u16) -> char {
    ALPHABET[(value & MAX_SYMBOL_VALUE) as usize] as char
}

/// The value of a symbol, or `None` if it is not in the alphabet.
pub fn decode_symbol(symbol: char) -> Option<u16> {
    let value = match symbol {
        'A'..='Z' => symbol as u16 - 'A' as u16,
        'a'..='z' => symbol as u16 - 'a' as u16 + 26,
        '0'..='9' => symbol as u16 - '0' as u16 + 52,
        '+' => 62,
        '/' => 63,
        _ => return None,
    };
    Some(value)
}

/// Writes a 12-bit value as two symbols, high six bits first.
pub fn push_pair(code: &mut String, value: u16) {
    code.push(encode_symbol(value >> 6));
    code.push(encode_symbol(value));
}
