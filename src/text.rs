// text: Helvetica metrics and word wrapping
//
// The built-in PDF fonts carry no metrics inside the document, so widths come
// from the standard Adobe AFM tables (units of 1/1000 em).

/// Points to millimetres
const PT_TO_MM: f32 = 25.4 / 72.0;

/// Advance width used for characters outside printable ASCII
const FALLBACK_WIDTH: u16 = 556;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FontStyle {
    Regular,
    Bold,
    Italic,
}

/// Helvetica, code points 32..=126
#[rustfmt::skip]
const HELVETICA: [u16; 95] = [
    278, 278, 355, 556, 556, 889, 667, 191, 333, 333, 389, 584, 278, 333, 278, 278,
    556, 556, 556, 556, 556, 556, 556, 556, 556, 556, 278, 278, 584, 584, 584, 556,
    1015, 667, 667, 722, 722, 667, 611, 778, 722, 278, 500, 667, 556, 833, 722, 778,
    667, 778, 722, 667, 611, 722, 667, 944, 667, 667, 611, 278, 278, 278, 469, 556,
    333, 556, 556, 500, 556, 556, 278, 556, 556, 222, 222, 500, 222, 833, 556, 556,
    556, 556, 333, 500, 278, 556, 500, 722, 500, 500, 500, 334, 260, 334, 584,
];

/// Helvetica-Bold, code points 32..=126
#[rustfmt::skip]
const HELVETICA_BOLD: [u16; 95] = [
    278, 333, 474, 556, 556, 889, 722, 238, 333, 333, 389, 584, 278, 333, 278, 278,
    556, 556, 556, 556, 556, 556, 556, 556, 556, 556, 333, 333, 584, 584, 584, 611,
    975, 722, 722, 722, 722, 667, 611, 778, 722, 278, 556, 722, 611, 833, 722, 778,
    667, 778, 722, 667, 611, 722, 667, 944, 667, 667, 611, 333, 278, 333, 584, 556,
    333, 556, 611, 556, 611, 556, 333, 611, 611, 278, 278, 556, 278, 889, 611, 611,
    611, 611, 389, 556, 333, 611, 556, 778, 556, 556, 500, 389, 280, 389, 584,
];

fn char_width(c: char, style: FontStyle) -> u16 {
    let table = match style {
        // Oblique shares the upright advance widths
        FontStyle::Regular | FontStyle::Italic => &HELVETICA,
        FontStyle::Bold => &HELVETICA_BOLD,
    };
    let code = c as u32;
    if (32..=126).contains(&code) {
        table[(code - 32) as usize]
    } else {
        FALLBACK_WIDTH
    }
}

/// Rendered width of `text` in mm.
pub fn text_width_mm(text: &str, style: FontStyle, size_pt: f32) -> f32 {
    let units: u32 = text.chars().map(|c| u32::from(char_width(c, style))).sum();
    units as f32 / 1000.0 * size_pt * PT_TO_MM
}

/// Greedy word wrap into lines no wider than `max_width_mm`.
///
/// Explicit newlines start a new line (blank lines are kept). A single word
/// wider than the line is split by character, so no text is ever dropped.
pub fn wrap_text(text: &str, style: FontStyle, size_pt: f32, max_width_mm: f32) -> Vec<String> {
    let space = text_width_mm(" ", style, size_pt);
    let mut lines = Vec::new();

    for paragraph in text.lines() {
        let mut current = String::new();
        let mut current_width = 0.0;

        for word in paragraph.split_whitespace() {
            let word_width = text_width_mm(word, style, size_pt);

            if word_width > max_width_mm {
                if !current.is_empty() {
                    lines.push(std::mem::take(&mut current));
                }
                let mut pieces = split_long_word(word, style, size_pt, max_width_mm);
                // The last piece stays open so following words can join it
                if let Some(last) = pieces.pop() {
                    lines.extend(pieces);
                    current_width = text_width_mm(&last, style, size_pt);
                    current = last;
                }
                continue;
            }

            if current.is_empty() {
                current.push_str(word);
                current_width = word_width;
            } else if current_width + space + word_width <= max_width_mm {
                current.push(' ');
                current.push_str(word);
                current_width += space + word_width;
            } else {
                lines.push(std::mem::replace(&mut current, word.to_string()));
                current_width = word_width;
            }
        }

        lines.push(current);
    }

    if lines.is_empty() {
        lines.push(String::new());
    }
    lines
}

fn split_long_word(word: &str, style: FontStyle, size_pt: f32, max_width_mm: f32) -> Vec<String> {
    let mut pieces = Vec::new();
    let mut piece = String::new();
    let mut width = 0.0;

    for c in word.chars() {
        let w = u32::from(char_width(c, style)) as f32 / 1000.0 * size_pt * PT_TO_MM;
        if !piece.is_empty() && width + w > max_width_mm {
            pieces.push(std::mem::take(&mut piece));
            width = 0.0;
        }
        piece.push(c);
        width += w;
    }
    if !piece.is_empty() {
        pieces.push(piece);
    }
    pieces
}

#[cfg(test)]
mod tests {
    use super::*;

    fn words(s: &str) -> Vec<String> {
        s.split_whitespace().map(str::to_string).collect()
    }

    #[test]
    fn width_scales_with_size() {
        let small = text_width_mm("Quote", FontStyle::Regular, 9.0);
        let large = text_width_mm("Quote", FontStyle::Regular, 18.0);
        assert!((large - 2.0 * small).abs() < 1e-4);
    }

    #[test]
    fn bold_is_at_least_as_wide() {
        let text = "TOTAL AMOUNT: $12,345.67";
        assert!(
            text_width_mm(text, FontStyle::Bold, 12.0)
                >= text_width_mm(text, FontStyle::Regular, 12.0)
        );
    }

    #[test]
    fn known_width() {
        // "n" is 556 units: 0.556 * 10pt = 5.56pt
        let w = text_width_mm("n", FontStyle::Regular, 10.0);
        assert!((w - 5.56 * PT_TO_MM).abs() < 1e-4);
    }

    #[test]
    fn short_text_is_one_line() {
        let lines = wrap_text("Remove old tile", FontStyle::Regular, 9.0, 100.0);
        assert_eq!(lines, vec!["Remove old tile".to_string()]);
    }

    #[test]
    fn lines_respect_width_and_keep_every_word() {
        let text = "Demolition of existing shower walls and floor, haul away debris, \
                    install waterproof membrane, set 12x24 porcelain tile on walls, \
                    mosaic floor with linear drain, grout and seal all surfaces.";
        let max = 60.0;
        let lines = wrap_text(text, FontStyle::Regular, 9.0, max);

        assert!(lines.len() > 1);
        for line in &lines {
            assert!(text_width_mm(line, FontStyle::Regular, 9.0) <= max + 1e-3, "{line}");
        }
        assert_eq!(words(&lines.join(" ")), words(text));
    }

    #[test]
    fn overlong_word_is_split_not_truncated() {
        let word = "W".repeat(80);
        let lines = wrap_text(&word, FontStyle::Bold, 9.0, 30.0);
        assert!(lines.len() > 1);
        assert_eq!(lines.concat(), word);
        for line in &lines {
            assert!(text_width_mm(line, FontStyle::Bold, 9.0) <= 30.0 + 1e-3);
        }
    }

    #[test]
    fn words_after_split_word_continue_on_last_piece() {
        let text = format!("{} end", "x".repeat(40));
        let lines = wrap_text(&text, FontStyle::Regular, 9.0, 25.0);
        assert_eq!(lines.last().map(|l| l.ends_with(" end")), Some(true));
        assert_eq!(lines.concat().replace(' ', ""), text.replace(' ', ""));
    }

    #[test]
    fn newlines_are_preserved() {
        let lines = wrap_text("Line one\n\nLine three", FontStyle::Regular, 9.0, 100.0);
        assert_eq!(
            lines,
            vec!["Line one".to_string(), String::new(), "Line three".to_string()]
        );
    }

    #[test]
    fn empty_text_yields_one_empty_line() {
        assert_eq!(wrap_text("", FontStyle::Regular, 9.0, 50.0), vec![String::new()]);
    }
}
