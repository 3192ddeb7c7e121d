use std::borrow::Cow;

use unicode_width::UnicodeWidthStr;

pub const DEFAULT_WRAP_WIDTH: usize = 75;
pub const DEFAULT_TRUNCATE_LENGTH: usize = 150;
pub const ELLIPSIS: &str = "...";

/// Lazily splits text into lines at most `width` display columns wide, so
/// wide CJK characters count twice.
///
/// Breaks only on whitespace, so a single word longer than `width` ends up
/// alone on an over-long line. Newlines in the input always start a new line.
pub struct WordWrap<'a> {
    rest: Option<&'a str>,
    width: usize,
}

pub fn wordwrap(text: &str, width: usize) -> WordWrap<'_> {
    WordWrap {
        rest: (!text.is_empty()).then_some(text),
        width,
    }
}

impl<'a> WordWrap<'a> {
    /// Joins the remaining lines with `\n`, the form the canvas draws.
    pub fn into_text(self) -> String {
        self.collect::<Vec<_>>().join("\n")
    }
}

fn words(s: &str) -> impl Iterator<Item = (usize, &str)> {
    s.split_whitespace()
        .map(move |w| (w.as_ptr() as usize - s.as_ptr() as usize, w))
}

impl<'a> Iterator for WordWrap<'a> {
    type Item = &'a str;

    fn next(&mut self) -> Option<&'a str> {
        let rest = self.rest.take()?;
        let para_end = rest.find('\n').unwrap_or(rest.len());
        let para = rest[..para_end].trim_start();
        let lead = para_end - para.len();

        let mut end = 0;
        let mut count = 0;
        let mut overflow = None;
        for (start, word) in words(para) {
            let gap = para[end..start].chars().count();
            let len = word.width();
            if end > 0 && count + gap + len > self.width {
                overflow = Some(start);
                break;
            }
            count += gap + len;
            end = start + word.len();
        }

        match overflow {
            Some(start) => self.rest = Some(&rest[lead + start..]),
            None if para_end < rest.len() => self.rest = Some(&rest[para_end + 1..]),
            None => {}
        }
        Some(&para[..end])
    }
}

/// Shortens `text` to at most `max_len` characters plus an ellipsis, cutting on
/// the last word boundary that fits.
pub fn truncate(text: &str, max_len: usize) -> Cow<'_, str> {
    if text.chars().count() <= max_len {
        return Cow::Borrowed(text);
    }
    let cut = text
        .char_indices()
        .nth(max_len)
        .map_or(text.len(), |(i, _)| i);
    let head = &text[..cut];
    let kept = if text[cut..].starts_with(char::is_whitespace) {
        head
    } else {
        head.rfind(char::is_whitespace).map_or(head, |i| &head[..i])
    };
    let kept = match kept.trim_end() {
        "" => head.trim_end(),
        kept => kept,
    };
    Cow::Owned(format!("{kept}{ELLIPSIS}"))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn wraps_on_word_boundaries() {
        let lines: Vec<_> = wordwrap("a very long job title here", 25).collect();
        assert_eq!(lines, vec!["a very long job title", "here"]);

        let lines: Vec<_> = wordwrap("Principal Platform Reliability Engineer for Payments", 25).collect();
        assert!(lines.iter().all(|l| l.chars().count() <= 25));
        assert_eq!(
            lines.join(" ").split_whitespace().collect::<Vec<_>>(),
            "Principal Platform Reliability Engineer for Payments"
                .split_whitespace()
                .collect::<Vec<_>>()
        );
    }

    #[test]
    fn long_word_is_not_split() {
        let lines: Vec<_> = wordwrap("go Supercalifragilisticexpialidocious now", 10).collect();
        assert_eq!(lines, vec!["go", "Supercalifragilisticexpialidocious", "now"]);
    }

    #[test]
    fn keeps_explicit_newlines() {
        let lines: Vec<_> = wordwrap("first line\n\nthird", 75).collect();
        assert_eq!(lines, vec!["first line", "", "third"]);
        assert_eq!(wordwrap("one two three", 7).into_text(), "one two\nthree");
    }

    #[test]
    fn empty_text_yields_nothing() {
        assert_eq!(wordwrap("", 25).count(), 0);
    }

    #[test]
    fn counts_characters_not_bytes() {
        let lines: Vec<_> = wordwrap("ééé ééé", 7).collect();
        assert_eq!(lines, vec!["ééé ééé"]);
    }

    #[test]
    fn wide_characters_take_two_columns() {
        let lines: Vec<_> = wordwrap("漢字 漢字 漢字", 9).collect();
        assert_eq!(lines, vec!["漢字 漢字", "漢字"]);
        assert!(lines.iter().all(|l| l.width() <= 9));
    }

    #[test]
    fn truncate_leaves_short_text_alone() {
        assert!(matches!(truncate("short", 10), Cow::Borrowed("short")));
        assert_eq!(truncate("exactly10!", 10), "exactly10!");
    }

    #[test]
    fn truncate_cuts_at_word_boundary() {
        assert_eq!(truncate("the quick brown fox", 12), "the quick...");
        assert_eq!(truncate("the quick brown fox", 9), "the quick...");
        assert_eq!(truncate("unbreakable", 4), "unbr...");
    }
}
