//! Tile and palette indices shared by the presentation driver and backends
//!
//! Background tiles and sprite tiles live in separate index spaces, the way
//! handheld video hardware keeps BG and OBJ character data apart.

/// Logo block: `LOGO_COLS x LOGO_ROWS` tiles starting at index 0, row-major
pub const LOGO_BASE: u16 = 0;
pub const LOGO_COLS: i32 = 8;
pub const LOGO_ROWS: i32 = 4;

/// Digits 0-9
pub const DIGIT_BASE: u16 = 32;

/// Letters A-Z
pub const LETTER_BASE: u16 = 48;

pub const SPRITE_HEAD: u16 = 0;
pub const SPRITE_BODY: u16 = 1;
pub const SPRITE_FOOD: u16 = 2;

pub const PAL_DEFAULT: u8 = 0;
pub const PAL_PROMPT: u8 = 1;
pub const PAL_ALERT: u8 = 2;

pub const PAL_FOOD: u8 = 1;
pub const PAL_HEAD: u8 = 2;
pub const PAL_BODY: u8 = 3;

/// Background tile for a digit. Values above 9 use their last digit.
pub fn digit(value: u32) -> u16 {
    DIGIT_BASE + (value % 10) as u16
}

/// Background tile for an ASCII letter, case-insensitive
pub fn letter(ch: char) -> Option<u16> {
    let upper = ch.to_ascii_uppercase();
    upper
        .is_ascii_uppercase()
        .then(|| LETTER_BASE + (upper as u8 - b'A') as u16)
}

/// Character a background tile stands for, if it is a digit or letter
pub fn glyph(tile: u16) -> Option<char> {
    match tile {
        t if (DIGIT_BASE..DIGIT_BASE + 10).contains(&t) => {
            Some(char::from(b'0' + (t - DIGIT_BASE) as u8))
        }
        t if (LETTER_BASE..LETTER_BASE + 26).contains(&t) => {
            Some(char::from(b'A' + (t - LETTER_BASE) as u8))
        }
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_letter_and_glyph_agree() {
        for ch in 'A'..='Z' {
            let tile = letter(ch).unwrap();
            assert_eq!(glyph(tile), Some(ch));
        }
        assert_eq!(letter('p'), letter('P'));
        assert_eq!(letter(' '), None);
    }

    #[test]
    fn test_digits() {
        assert_eq!(glyph(digit(0)), Some('0'));
        assert_eq!(glyph(digit(7)), Some('7'));
        assert_eq!(digit(12), digit(2));
        assert_eq!(glyph(LOGO_BASE), None);
    }
}
