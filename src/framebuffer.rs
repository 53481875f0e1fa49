//! Monochrome page-organised framebuffer with bitmap text rendering.
//!
//! # Memory Layout
//!
//! The buffer mirrors the SSD1306 RAM in horizontal addressing mode: page 0
//! columns 0..128, then page 1, and so on. Byte `page * SCREEN_WIDTH + x`
//! holds pixels `(x, page * 8)` (bit 0) to `(x, page * 8 + 7)` (bit 7).
//!
//! # Placement Rules
//!
//! Text is placed on page boundaries: `y` is divided by the page height.
//! A glyph whose top-left corner is past `SCREEN_WIDTH - GLYPH_WIDTH` or
//! `SCREEN_HEIGHT - GLYPH_HEIGHT` is skipped. The check runs per character,
//! so a string running off the right edge keeps its leading glyphs and drops
//! the rest. Nothing wraps.

use crate::config::{BUF_LEN, GLYPH_HEIGHT, GLYPH_WIDTH, PAGE_HEIGHT, SCREEN_HEIGHT, SCREEN_WIDTH};
use crate::font;

/// One full frame for the display, cleared on construction.
#[derive(Clone, PartialEq, Eq)]
pub struct Framebuffer {
    bytes: [u8; BUF_LEN],
}

impl Framebuffer {
    /// Create a blank frame.
    pub const fn new() -> Self { Self { bytes: [0; BUF_LEN] } }

    /// Raw page-ordered bytes, ready for the display data transfer.
    #[inline]
    pub const fn as_bytes(&self) -> &[u8] { &self.bytes }

    /// Clear every pixel.
    pub fn clear(&mut self) { self.bytes = [0; BUF_LEN]; }

    /// Whether the pixel at `(x, y)` is lit. Out-of-range coordinates read as off.
    pub fn pixel(
        &self,
        x: usize,
        y: usize,
    ) -> bool {
        if x >= SCREEN_WIDTH || y >= SCREEN_HEIGHT {
            return false;
        }
        let byte = self.bytes[(y / PAGE_HEIGHT) * SCREEN_WIDTH + x];
        byte & (1 << (y % PAGE_HEIGHT)) != 0
    }

    /// Blit one character with its top-left corner at `(x, y)`.
    ///
    /// Returns `false` if the glyph would not fit and nothing was written.
    pub fn write_char(
        &mut self,
        x: u16,
        y: u16,
        ch: char,
    ) -> bool {
        let (x, y) = (x as usize, y as usize);
        if x > SCREEN_WIDTH - GLYPH_WIDTH || y > SCREEN_HEIGHT - GLYPH_HEIGHT {
            return false;
        }

        let offset = (y / PAGE_HEIGHT) * SCREEN_WIDTH + x;
        self.bytes[offset..offset + GLYPH_WIDTH].copy_from_slice(font::glyph(ch));
        true
    }

    /// Render `text` left to right starting at `(x, y)`, one glyph width per character.
    ///
    /// Returns the number of glyphs written.
    pub fn write_string(
        &mut self,
        x: u16,
        y: u16,
        text: &str,
    ) -> usize {
        if x as usize > SCREEN_WIDTH - GLYPH_WIDTH || y as usize > SCREEN_HEIGHT - GLYPH_HEIGHT {
            return 0;
        }

        let mut written = 0;
        let mut x = x as usize;
        for ch in text.chars() {
            // Past the right edge every remaining glyph is rejected too
            if x > SCREEN_WIDTH - GLYPH_WIDTH {
                break;
            }
            if self.write_char(x as u16, y, ch) {
                written += 1;
            }
            x += GLYPH_WIDTH;
        }
        written
    }
}

impl Default for Framebuffer {
    fn default() -> Self { Self::new() }
}

impl AsRef<[u8]> for Framebuffer {
    fn as_ref(&self) -> &[u8] { &self.bytes }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    fn lit_bytes(fb: &Framebuffer) -> Vec<usize> {
        fb.as_bytes()
            .iter()
            .enumerate()
            .filter(|(_, b)| **b != 0)
            .map(|(i, _)| i)
            .collect()
    }

    #[test]
    fn test_new_is_blank() {
        let fb = Framebuffer::new();
        assert_eq!(fb.as_bytes().len(), 512);
        assert!(fb.as_bytes().iter().all(|&b| b == 0));
    }

    #[test]
    fn test_write_char_copies_glyph_at_page_offset() {
        let mut fb = Framebuffer::new();
        assert!(fb.write_char(10, 8, 'T'));
        assert_eq!(&fb.as_bytes()[138..146], font::glyph('T'));
    }

    #[test]
    fn test_write_char_lowercase_uses_uppercase_glyph() {
        let mut upper = Framebuffer::new();
        let mut lower = Framebuffer::new();
        upper.write_char(0, 0, 'E');
        lower.write_char(0, 0, 'e');
        assert!(upper == lower);
    }

    #[test]
    fn test_y_is_truncated_to_page() {
        let mut aligned = Framebuffer::new();
        let mut unaligned = Framebuffer::new();
        aligned.write_char(0, 16, '7');
        unaligned.write_char(0, 19, '7');
        assert!(aligned == unaligned);
    }

    #[test]
    fn test_last_column_that_fits() {
        let mut fb = Framebuffer::new();
        assert!(fb.write_char(120, 24, 'Z'));
        assert_eq!(&fb.as_bytes()[504..512], font::glyph('Z'));
    }

    #[test]
    fn test_write_char_rejects_out_of_bounds() {
        let mut fb = Framebuffer::new();
        assert!(!fb.write_char(121, 0, 'A'));
        assert!(!fb.write_char(0, 25, 'A'));
        assert!(!fb.write_char(u16::MAX, u16::MAX, 'A'));
        assert!(lit_bytes(&fb).is_empty());
    }

    #[test]
    fn test_string_overflow_drops_trailing_glyphs() {
        let mut fb = Framebuffer::new();
        assert_eq!(fb.write_string(120, 0, "AB"), 1);
        assert_eq!(&fb.as_bytes()[120..128], font::glyph('A'));
        assert!(lit_bytes(&fb).iter().all(|&i| (120..128).contains(&i)));
    }

    #[test]
    fn test_string_out_of_bounds_start_writes_nothing() {
        let mut fb = Framebuffer::new();
        assert_eq!(fb.write_string(121, 0, "AB"), 0);
        assert_eq!(fb.write_string(0, 32, "AB"), 0);
        assert!(lit_bytes(&fb).is_empty());
    }

    #[test]
    fn test_string_advances_one_glyph_width() {
        let mut fb = Framebuffer::new();
        assert_eq!(fb.write_string(10, 0, "HI"), 2);
        assert_eq!(&fb.as_bytes()[10..18], font::glyph('H'));
        assert_eq!(&fb.as_bytes()[18..26], font::glyph('I'));
    }

    #[test]
    fn test_blank_glyphs_count_as_written() {
        let mut fb = Framebuffer::new();
        // Punctuation overwrites with the blank glyph
        fb.write_string(0, 0, "88");
        assert_eq!(fb.write_string(0, 0, ".8"), 2);
        assert!(fb.as_bytes()[0..8].iter().all(|&b| b == 0));
    }

    #[test]
    fn test_pixel_bit_order() {
        let mut fb = Framebuffer::new();
        fb.write_char(0, 8, 'T');
        // 'T' has a full-height stem in its fourth column and a top bar
        assert!(fb.pixel(3, 8));
        assert!(fb.pixel(3, 14));
        assert!(fb.pixel(1, 8));
        assert!(!fb.pixel(1, 9));
        assert!(!fb.pixel(3, 7));
        assert!(!fb.pixel(200, 8));
    }

    #[test]
    fn test_clear() {
        let mut fb = Framebuffer::new();
        fb.write_string(0, 0, "TEMP");
        fb.clear();
        assert!(lit_bytes(&fb).is_empty());
    }
}
