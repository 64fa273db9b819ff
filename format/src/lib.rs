//! One-line rendering of block definitions for timing log messages.
//!
//! A block's textual definition is flattened to a single line (line breaks
//! and tabs become spaces, space runs are squashed) and cut to a bounded
//! width before being combined with an elapsed time in seconds.

/// Widest a rendered definition gets before it is cut.
pub const MAX_DEFINITION_CHARS: usize = 50;

/// Suffix appended to definitions cut at the width limit.
const ELLIPSIS: &str = " ...";

/// Compose the log line for a timed block.
///
/// `elapsed_ms` is converted to seconds by plain division; fractional
/// seconds are preserved, not rounded.
///
/// # Examples
///
/// ```
/// use blocktime_format::format_block_time;
///
/// assert_eq!(
///     format_block_time("function foo() { return 'foo'; }", 1500.0),
///     "\"function foo() { return 'foo'; }\" ran for 1.5 seconds",
/// );
/// ```
pub fn format_block_time(definition: &str, elapsed_ms: f64) -> String {
    let seconds = elapsed_ms / 1000.0;
    let definition = one_line_definition(MAX_DEFINITION_CHARS, definition);
    format!("\"{definition}\" ran for {seconds} seconds")
}

/// Flatten `definition` to a single line and cut it to `max_chars`.
///
/// Every line break (`\r\n` counts as one) and every tab becomes a space,
/// then runs of spaces collapse to one. A result longer than `max_chars`
/// keeps its first `max_chars - 4` characters followed by `" ..."`; a
/// result at or under the limit is returned unchanged.
pub fn one_line_definition(max_chars: usize, definition: &str) -> String {
    let squashed = squash_spaces(&flatten_line_breaks(definition));
    if squashed.chars().count() <= max_chars {
        return squashed;
    }
    debug_assert!(
        max_chars >= ELLIPSIS.len(),
        "max_chars too small to hold the ellipsis"
    );
    let mut cut: String = squashed.chars().take(max_chars - ELLIPSIS.len()).collect();
    cut.push_str(ELLIPSIS);
    cut
}

/// Replace each line break and tab with a single space. A `\r\n` pair is
/// one break, not two.
fn flatten_line_breaks(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    let mut chars = s.chars().peekable();
    while let Some(ch) = chars.next() {
        match ch {
            '\r' => {
                if chars.peek() == Some(&'\n') {
                    chars.next();
                }
                out.push(' ');
            }
            '\n' | '\t' => out.push(' '),
            other => out.push(other),
        }
    }
    out
}

/// Collapse every run of consecutive spaces into exactly one space.
fn squash_spaces(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    let mut previous_was_space = false;
    for ch in s.chars() {
        if ch == ' ' {
            if !previous_was_space {
                out.push(' ');
            }
            previous_was_space = true;
        } else {
            out.push(ch);
            previous_was_space = false;
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use proptest::prelude::*;

    #[test]
    fn short_definitions_pass_through() {
        assert_eq!(
            format_block_time("function foo() { return 'foo'; }", 0.0),
            "\"function foo() { return 'foo'; }\" ran for 0 seconds"
        );
        assert_eq!(
            format_block_time("function bar() { return 'bar'; }", 0.0),
            "\"function bar() { return 'bar'; }\" ran for 0 seconds"
        );
        assert_eq!(
            format_block_time("|| 'anon'", 0.0),
            "\"|| 'anon'\" ran for 0 seconds"
        );
    }

    #[test]
    fn fractional_seconds_are_not_rounded() {
        assert_eq!(
            format_block_time("|| work()", 1500.0),
            "\"|| work()\" ran for 1.5 seconds"
        );
        assert_eq!(
            format_block_time("|| work()", 2000.0),
            "\"|| work()\" ran for 2 seconds"
        );
        assert_eq!(
            format_block_time("|| work()", 1.5),
            "\"|| work()\" ran for 0.0015 seconds"
        );
    }

    #[test]
    fn line_breaks_and_tabs_become_single_spaces() {
        assert_eq!(one_line_definition(50, "a\nb\tc"), "a b c");
        assert_eq!(one_line_definition(50, "a\r\nb"), "a b");
        assert_eq!(one_line_definition(50, "a\rb"), "a b");
        assert_eq!(one_line_definition(50, "a\r\n\r\nb"), "a b");
        assert_eq!(one_line_definition(50, "a\n\t \nb"), "a b");
    }

    #[test]
    fn space_runs_are_squashed() {
        assert_eq!(one_line_definition(50, "a    b"), "a b");
        assert_eq!(one_line_definition(50, "  a  b  "), " a b ");
    }

    #[test]
    fn whitespace_only_definitions_get_no_special_case() {
        assert_eq!(one_line_definition(50, "\n\t\n"), " ");
        assert_eq!(one_line_definition(50, ""), "");
    }

    #[test]
    fn definition_at_the_limit_is_unchanged() {
        let exactly_fifty = "x".repeat(50);
        assert_eq!(one_line_definition(50, &exactly_fifty), exactly_fifty);
    }

    #[test]
    fn definition_over_the_limit_is_cut_with_ellipsis() {
        let fifty_one = "x".repeat(51);
        let expected = format!("{} ...", "x".repeat(46));
        assert_eq!(one_line_definition(50, &fifty_one), expected);
        assert_eq!(expected.chars().count(), 50);
    }

    #[test]
    fn long_multiline_definition_is_flattened_then_cut() {
        let definition = "function longfunc() {\n\
                          \tlet firststatement = 42;\n\
                          \tlet secondstatment = 'second statement';\n\
                          \tlet thirdstatement = false;\n\
                          \treturn 'longfunc';\n\
                          }";
        assert_eq!(
            one_line_definition(50, definition),
            "function longfunc() { let firststatement = 42; ..."
        );
    }

    #[test]
    fn multibyte_definitions_are_cut_by_characters_not_bytes() {
        let definition = "é".repeat(51);
        let expected = format!("{} ...", "é".repeat(46));
        assert_eq!(one_line_definition(50, &definition), expected);
    }

    proptest! {
        #[test]
        fn already_normalized_definitions_pass_through(
            definition in "[!-~]( ?[!-~]){0,24}",
        ) {
            prop_assert_eq!(one_line_definition(50, &definition), definition);
        }

        #[test]
        fn rendered_definition_never_exceeds_the_limit(definition in ".*") {
            prop_assert!(one_line_definition(50, &definition).chars().count() <= 50);
        }

        #[test]
        fn rendering_is_idempotent_under_the_limit(definition in ".{0,50}") {
            let once = one_line_definition(50, &definition);
            if once.chars().count() <= 50 && !once.ends_with(ELLIPSIS) {
                prop_assert_eq!(one_line_definition(50, &once), once);
            }
        }

        #[test]
        fn message_contains_elapsed_seconds(elapsed_ms in 0u32..10_000_000) {
            let seconds = f64::from(elapsed_ms) / 1000.0;
            let message = format_block_time("|| work()", f64::from(elapsed_ms));
            let needle = format!("{}", seconds);
            prop_assert!(message.contains(&needle));
        }
    }
}
