//! Paragraph splitting shared by both analysis pipelines.
//!
//! A paragraph is a maximal run of text between newline runs. Leading and
//! trailing newline runs produce empty boundary paragraphs so that every
//! character offset in the input maps to exactly one paragraph index, and
//! the character pipeline and the spacing pipeline agree on that mapping.

/// One paragraph of the input, with its position in scalar-value offsets.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Paragraph<'a> {
    /// Paragraph text, newline-free.
    pub text: &'a str,
    /// Offset of the first character, counted in scalar values.
    pub start_char: usize,
    /// Length in scalar values.
    pub char_len: usize,
}

/// Split text into paragraphs on runs of line feeds.
pub fn split_paragraphs(text: &str) -> Vec<Paragraph<'_>> {
    let mut paragraphs = Vec::new();
    let mut seg_start_byte = 0;
    let mut seg_start_char = 0;
    let mut char_pos = 0;
    let mut seg_open = true;

    for (byte_pos, ch) in text.char_indices() {
        if ch == '\n' {
            if seg_open {
                paragraphs.push(Paragraph {
                    text: &text[seg_start_byte..byte_pos],
                    start_char: seg_start_char,
                    char_len: char_pos - seg_start_char,
                });
                seg_open = false;
            }
        } else if !seg_open {
            seg_start_byte = byte_pos;
            seg_start_char = char_pos;
            seg_open = true;
        }
        char_pos += 1;
    }

    if seg_open {
        paragraphs.push(Paragraph {
            text: &text[seg_start_byte..],
            start_char: seg_start_char,
            char_len: char_pos - seg_start_char,
        });
    } else {
        paragraphs.push(Paragraph {
            text: "",
            start_char: char_pos,
            char_len: 0,
        });
    }

    paragraphs
}

/// Map a character offset to its paragraph index.
///
/// Offsets inside a newline run belong to the preceding paragraph.
pub fn paragraph_index_at(paragraphs: &[Paragraph<'_>], char_offset: usize) -> usize {
    match paragraphs.binary_search_by(|p| p.start_char.cmp(&char_offset)) {
        Ok(index) => index,
        Err(0) => 0,
        Err(index) => index - 1,
    }
}

/// First `max_chars` characters of a paragraph, with an ellipsis when cut.
pub fn preview(text: &str, max_chars: usize) -> String {
    if text.chars().count() > max_chars {
        let cut: String = text.chars().take(max_chars).collect();
        format!("{}...", cut)
    } else {
        text.to_string()
    }
}
