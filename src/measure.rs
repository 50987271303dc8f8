use unicode_width::UnicodeWidthStr;

/// Text width estimation without a font rasterizer.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TextMetrics {
    /// Average glyph advance as a fraction of the font size.
    pub char_width_em: f64,
}

impl Default for TextMetrics {
    fn default() -> Self {
        Self {
            // lowercase 'a' in a typical sans-serif face
            char_width_em: 0.56,
        }
    }
}

impl TextMetrics {
    /// Estimated rendered width of `text`. East Asian wide characters count
    /// as two columns.
    pub fn text_width(&self, text: &str, font_size: f64) -> f64 {
        let columns = UnicodeWidthStr::width(text);
        columns as f64 * self.char_width_em * font_size
    }

    /// Width of `chars` average glyphs, used when only a character count is
    /// known (e.g. the longest label of a tree).
    pub fn placeholder_width(&self, chars: usize, font_size: f64) -> f64 {
        chars as f64 * self.char_width_em * font_size
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_ascii_width() {
        let m = TextMetrics::default();
        assert!((m.text_width("Homo", 10.0) - 4.0 * 5.6).abs() < 1e-9);
    }

    #[test]
    fn test_unicode_width() {
        let m = TextMetrics::default();
        // wide characters take two columns
        assert!((m.text_width("ヒト", 10.0) - 4.0 * 5.6).abs() < 1e-9);
    }

    #[test]
    fn test_placeholder_matches_ascii() {
        let m = TextMetrics::default();
        assert_eq!(m.placeholder_width(7, 12.0), m.text_width("Gorilla", 12.0));
    }

    #[test]
    fn test_scales_with_font_size() {
        let m = TextMetrics::default();
        assert_eq!(m.placeholder_width(0, 10.0), 0.0);
        assert!(m.placeholder_width(5, 20.0) > m.placeholder_width(5, 10.0));
    }
}
