//! Greedy word wrap.
//!
//! # Algorithm
//!
//! Words are appended one at a time to a line buffer. Each candidate line is
//! measured with a trailing space, matching how the buffer grows. When the
//! candidate is wider than the limit and the buffer already holds a word, the
//! buffer is committed and the word starts the next line.
//!
//! A word wider than the limit on its own is never split. It lands on a line
//! by itself and overflows.

/// Wrap a caption into lines no wider than `max_width`.
///
/// The caption is uppercased first. Words are split on any Unicode whitespace
/// and rejoined with single spaces; committed lines have no trailing space.
///
/// An empty or whitespace-only caption yields a single empty line.
///
/// # Arguments
///
/// * `caption` - Caption text as typed
/// * `max_width` - Line width limit in the measurement's units (pixels)
/// * `measure` - Width of a string in the active font
///
/// # Example
///
/// ```ignore
/// use captionkit_core::layout::wrap;
///
/// let lines = wrap("one two three", 8.0, |s| s.chars().count() as f32);
/// assert_eq!(lines, vec!["ONE TWO", "THREE"]);
/// ```
pub fn wrap<F>(caption: &str, max_width: f32, measure: F) -> Vec<String>
where
    F: Fn(&str) -> f32,
{
    wrap_words(&caption.to_uppercase(), max_width, measure)
}

/// Same as [`wrap`] but keeps the caption's case.
pub fn wrap_words<F>(caption: &str, max_width: f32, measure: F) -> Vec<String>
where
    F: Fn(&str) -> f32,
{
    let mut lines = Vec::new();
    let mut buffer = String::new();

    for word in caption.split_whitespace() {
        let candidate = format!("{buffer}{word} ");
        if measure(&candidate) > max_width && !buffer.is_empty() {
            lines.push(buffer.trim_end().to_string());
            buffer = format!("{word} ");
        } else {
            buffer = candidate;
        }
    }

    lines.push(buffer.trim_end().to_string());
    lines
}


#[cfg(test)]
mod proptests {
    use super::*;
    use proptest::prelude::*;

    fn measure(s: &str) -> f32 {
        // Proportional-ish: narrow and wide glyph classes
        s.chars()
            .map(|c| match c {
                'I' | 'L' | ' ' => 4.0,
                'M' | 'W' => 12.0,
                _ => 8.0,
            })
            .sum()
    }

    fn caption_strategy() -> impl Strategy<Value = String> {
        prop::collection::vec("[a-zA-Z]{1,14}", 0..20)
            .prop_flat_map(|words| {
                let n = words.len();
                (
                    Just(words),
                    prop::collection::vec(prop::sample::select(vec![" ", "  ", "\t", "\n"]), n),
                )
            })
            .prop_map(|(words, seps)| {
                words
                    .iter()
                    .zip(seps.iter())
                    .map(|(w, s)| format!("{w}{s}"))
                    .collect::<String>()
            })
    }

    proptest! {
        /// Property: every line fits, unless it is a single overlong word.
        #[test]
        fn prop_lines_fit_or_are_single_words(
            caption in caption_strategy(),
            max_width in 0.0f32..400.0,
        ) {
            for line in wrap(&caption, max_width, measure) {
                let fits = measure(&line) <= max_width;
                let single_word = !line.contains(' ');
                prop_assert!(fits || single_word, "line {:?} overflows {}", line, max_width);
            }
        }

        /// Property: joining lines reconstructs the normalized caption.
        #[test]
        fn prop_words_preserved(
            caption in caption_strategy(),
            max_width in 0.0f32..400.0,
        ) {
            let lines = wrap(&caption, max_width, measure);
            let rejoined = lines.join(" ").trim().to_string();
            let expected = caption
                .to_uppercase()
                .split_whitespace()
                .collect::<Vec<_>>()
                .join(" ");
            prop_assert_eq!(rejoined, expected);
        }

        /// Property: output is never empty.
        #[test]
        fn prop_never_empty(caption in ".{0,64}", max_width in -10.0f32..400.0) {
            prop_assert!(!wrap(&caption, max_width, measure).is_empty());
        }

        /// Property: no line is empty unless the whole caption is blank.
        #[test]
        fn prop_no_blank_lines(caption in caption_strategy(), max_width in 0.0f32..400.0) {
            let lines = wrap(&caption, max_width, measure);
            if caption.split_whitespace().next().is_some() {
                prop_assert!(lines.iter().all(|l| !l.is_empty()));
            } else {
                prop_assert_eq!(lines, vec![String::new()]);
            }
        }
    }
}
