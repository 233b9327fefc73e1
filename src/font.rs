//! Built-in 5x7 bitmap glyphs for the code symbols.
//!
//! Covers the characters of the default symbol set plus digits. Anything
//! else renders as a hollow box so unknown glyphs stay visible.

/// Glyph cell width in font units (including one unit of spacing).
pub const ADVANCE: f32 = 6.0;
/// Glyph height in font units, baseline to top.
pub const HEIGHT: f32 = 7.0;
/// Font units per em; a glyph drawn at `size` pixels uses `size / EM` pixels per unit.
pub const EM: f32 = 8.0;

const BOX: [u8; 7] = [0b11111, 0b10001, 0b10001, 0b10001, 0b10001, 0b10001, 0b11111];

/// Rows of a glyph, top to bottom; bit 4 is the leftmost column.
pub fn glyph(c: char) -> [u8; 7] {
    match c {
        ' ' => [0; 7],
        '{' => [0b00110, 0b01000, 0b01000, 0b10000, 0b01000, 0b01000, 0b00110],
        '}' => [0b01100, 0b00010, 0b00010, 0b00001, 0b00010, 0b00010, 0b01100],
        '<' => [0b00010, 0b00100, 0b01000, 0b10000, 0b01000, 0b00100, 0b00010],
        '>' => [0b01000, 0b00100, 0b00010, 0b00001, 0b00010, 0b00100, 0b01000],
        '/' => [0b00001, 0b00010, 0b00010, 0b00100, 0b01000, 0b01000, 0b10000],
        ';' => [0b00000, 0b01100, 0b01100, 0b00000, 0b01100, 0b00100, 0b01000],
        '&' => [0b01100, 0b10010, 0b10100, 0b01000, 0b10101, 0b10010, 0b01101],
        '|' => [0b00100; 7],
        '[' => [0b01110, 0b01000, 0b01000, 0b01000, 0b01000, 0b01000, 0b01110],
        ']' => [0b01110, 0b00010, 0b00010, 0b00010, 0b00010, 0b00010, 0b01110],
        '=' => [0b00000, 0b00000, 0b11111, 0b00000, 0b11111, 0b00000, 0b00000],
        '(' => [0b00010, 0b00100, 0b01000, 0b01000, 0b01000, 0b00100, 0b00010],
        ')' => [0b01000, 0b00100, 0b00010, 0b00010, 0b00010, 0b00100, 0b01000],
        '0' => [0b01110, 0b10001, 0b10011, 0b10101, 0b11001, 0b10001, 0b01110],
        '1' => [0b00100, 0b01100, 0b00100, 0b00100, 0b00100, 0b00100, 0b01110],
        '2' => [0b01110, 0b10001, 0b00001, 0b00010, 0b00100, 0b01000, 0b11111],
        '3' => [0b11110, 0b00001, 0b00001, 0b01110, 0b00001, 0b00001, 0b11110],
        '4' => [0b00010, 0b00110, 0b01010, 0b10010, 0b11111, 0b00010, 0b00010],
        '5' => [0b11111, 0b10000, 0b11110, 0b00001, 0b00001, 0b10001, 0b01110],
        '6' => [0b00110, 0b01000, 0b10000, 0b11110, 0b10001, 0b10001, 0b01110],
        '7' => [0b11111, 0b00001, 0b00010, 0b00100, 0b01000, 0b01000, 0b01000],
        '8' => [0b01110, 0b10001, 0b10001, 0b01110, 0b10001, 0b10001, 0b01110],
        '9' => [0b01110, 0b10001, 0b10001, 0b01111, 0b00001, 0b00010, 0b01100],
        _ => BOX,
    }
}

/// Whether `(col, row)` is lit in `rows`. Out-of-range cells are unlit.
#[inline]
pub fn lit(rows: &[u8; 7], col: usize, row: usize) -> bool {
    row < 7 && col < 5 && rows[row] & (0b10000 >> col) != 0
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_symbols_have_glyphs() {
        for symbol in crate::config::DEFAULT_SYMBOLS {
            for c in symbol.chars() {
                if c != ' ' {
                    assert_ne!(glyph(c), BOX, "missing glyph for {:?}", c);
                }
            }
        }
    }

    #[test]
    fn test_lit_bits() {
        let pipe = glyph('|');
        assert!(lit(&pipe, 2, 0));
        assert!(!lit(&pipe, 0, 0));
        assert!(!lit(&pipe, 5, 0));
        assert!(!lit(&pipe, 2, 7));
    }
}
