// Copyright 2026 Phillip Cloud
// Licensed under the Apache License, Version 2.0

use regex::Regex;
use std::sync::LazyLock;

// A dangling `<` swallows the rest of the input, same as an unclosed tag.
static MARKUP: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"<[^>]*>?").expect("markup pattern compiles"));

/// Strips tag-like substrings from free text before it reaches a record or
/// the search box.
pub fn strip_markup(input: &str) -> String {
    MARKUP.replace_all(input, "").into_owned()
}

#[cfg(test)]
mod tests {
    use super::strip_markup;

    #[test]
    fn plain_text_is_untouched() {
        assert_eq!(strip_markup("Rock & Roll 1977"), "Rock & Roll 1977");
        assert_eq!(strip_markup(""), "");
    }

    #[test]
    fn tags_are_removed_and_text_kept() {
        assert_eq!(strip_markup("<b>Álbum</b> 1"), "Álbum 1");
        assert_eq!(
            strip_markup("<script>alert('x')</script>Gira"),
            "alert('x')Gira"
        );
    }

    #[test]
    fn unclosed_tag_is_dropped_to_end_of_input() {
        assert_eq!(strip_markup("Banda <img src=x onerror=y"), "Banda ");
    }

    #[test]
    fn lone_closing_bracket_survives() {
        assert_eq!(strip_markup("a > b"), "a > b");
    }
}
