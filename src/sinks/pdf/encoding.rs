//! WinAnsi (Windows-1252) text encoding for the embedded TrueType font.
//!
//! The font is embedded as a simple font, so every shown string is a sequence of one-byte
//! codes. WinAnsi covers Latin-1 plus the typographic punctuation that shows up in
//! scripture text (curly quotes, dashes, ellipsis).

/// The first and last codes given a width in the font dictionary.
pub const FIRST_CHAR: u8 = 32;
pub const LAST_CHAR: u8 = 255;

/// Codes 0x80..=0x9F, which differ from Latin-1. `None` marks unassigned codes.
const HIGH_CODES: [Option<char>; 32] = [
    Some('€'),
    None,
    Some('‚'),
    Some('ƒ'),
    Some('„'),
    Some('…'),
    Some('†'),
    Some('‡'),
    Some('ˆ'),
    Some('‰'),
    Some('Š'),
    Some('‹'),
    Some('Œ'),
    None,
    Some('Ž'),
    None,
    None,
    Some('‘'),
    Some('’'),
    Some('“'),
    Some('”'),
    Some('•'),
    Some('–'),
    Some('—'),
    Some('˜'),
    Some('™'),
    Some('š'),
    Some('›'),
    Some('œ'),
    None,
    Some('ž'),
    Some('Ÿ'),
];

/// The WinAnsi code for a character, if it has one.
pub fn encode_char(c: char) -> Option<u8> {
    match c as u32 {
        0x20..=0x7E | 0xA0..=0xFF => Some(c as u8),
        _ => HIGH_CODES
            .iter()
            .position(|&high| high == Some(c))
            .map(|i| 0x80 + i as u8),
    }
}

/// The character a WinAnsi code stands for.
pub fn decode(code: u8) -> Option<char> {
    match code {
        0x20..=0x7E | 0xA0..=0xFF => Some(char::from(code)),
        0x80..=0x9F => HIGH_CODES[(code - 0x80) as usize],
        _ => None,
    }
}

/// The character that will actually be drawn for `c`.
pub fn printable(c: char) -> char {
    if encode_char(c).is_some() {
        c
    } else {
        '?'
    }
}

/// Encode a string, replacing characters without a code by `?`.
pub fn encode(text: &str) -> Vec<u8> {
    text.chars()
        .map(|c| encode_char(c).unwrap_or(b'?'))
        .collect()
}

/// Count the characters of `text` that have no code. Whitespace is never drawn, so it
/// doesn't count.
pub fn unencodable(text: &str) -> usize {
    text.chars()
        .filter(|&c| !c.is_whitespace() && encode_char(c).is_none())
        .count()
}
