//! Preview formatter for call script text.
//!
//! Turns the small authoring dialect used in templates into block markup:
//!
//! - `#`, `##`, `###` at the start of a line open a heading of that level;
//! - `**bold**`, `*italic*` and `_italic_` inline;
//! - `- item` and `1. item` lines become list items, nested two spaces (or one
//!   tab) per level;
//! - any other non-blank line is a paragraph, a blank line a `<br>`.
//!
//! `&`, `<` and `>` are escaped before anything else, so the output can be
//! injected into a page as-is. Every input produces output; there is no error path.
//!
//! Passes run in a fixed order: escape, headings (per line), inline emphasis
//! (whole text), then blocks (per line, tracking open lists in a [`ListStack`]).

use regex::Regex;
use std::borrow::Cow;
use std::sync::LazyLock;

static HEADING: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"^\s*(#{1,3})\s+").unwrap());

static HEADING_BLOCK: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"^\s*<h[1-3]>").unwrap());

static STRONG: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\*\*([^\n\r\x{2028}\x{2029}]+?)\*\*").unwrap());

static STAR_EMPHASIS: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\*([^\n\r\x{2028}\x{2029}]+?)\*").unwrap());

static LIST_ITEM: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^(\s*)(-|[0-9]+\.)\s+([^\n\r\x{2028}\x{2029}]*)$").unwrap()
});

/// Kind of list block a `- ` or `1. ` line belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ListKind {
    Unordered,
    Ordered,
}

impl ListKind {
    fn from_marker(marker: &str) -> Self {
        if marker == "-" {
            ListKind::Unordered
        } else {
            ListKind::Ordered
        }
    }

    fn open_tag(self) -> &'static str {
        match self {
            ListKind::Unordered => "<ul>",
            ListKind::Ordered => "<ol>",
        }
    }

    fn close_tag(self) -> &'static str {
        match self {
            ListKind::Unordered => "</ul>",
            ListKind::Ordered => "</ol>",
        }
    }
}

/// Lists currently open, outermost first. `open.len()` is the current depth.
#[derive(Debug, Default)]
pub struct ListStack {
    open: Vec<ListKind>,
}

impl ListStack {
    pub fn depth(&self) -> usize {
        self.open.len()
    }

    /// Closes every list nested deeper than `level`.
    pub fn close_to(&mut self, level: usize, out: &mut String) {
        while self.open.len() > level {
            if let Some(kind) = self.open.pop() {
                out.push_str(kind.close_tag());
            }
        }
    }

    /// Opens `kind` lists until the stack is `level` deep, then makes sure the
    /// list at `level` is of `kind`, closing and reopening it if not.
    ///
    /// Callers close deeper lists first, so the stack is never deeper than `level` here.
    pub fn open_to(&mut self, level: usize, kind: ListKind, out: &mut String) {
        while self.open.len() < level {
            self.open.push(kind);
            out.push_str(kind.open_tag());
        }
        if self.open.len() == level && self.open.last().is_some_and(|top| *top != kind) {
            self.close_to(level - 1, out);
            self.open.push(kind);
            out.push_str(kind.open_tag());
        }
    }
}

/// Formats `text` into block markup.
pub fn format(text: &str) -> String {
    let escaped = escape(text);
    let with_headings = escaped
        .split('\n')
        .map(heading_line)
        .collect::<Vec<_>>()
        .join("\n");
    let inline = apply_inline(&with_headings);

    let mut out = String::with_capacity(inline.len() + 16);
    let mut lists = ListStack::default();

    for line in inline.split('\n') {
        if let Some(caps) = LIST_ITEM.captures(line) {
            let level = nesting_level(&caps[1]);
            let kind = ListKind::from_marker(&caps[2]);
            lists.close_to(level, &mut out);
            lists.open_to(level, kind, &mut out);
            out.push_str("<li>");
            out.push_str(&caps[3]);
            out.push_str("</li>");
            continue;
        }

        lists.close_to(0, &mut out);
        if HEADING_BLOCK.is_match(line) {
            out.push_str(line);
        } else if !line.trim().is_empty() {
            out.push_str("<p>");
            out.push_str(line);
            out.push_str("</p>");
        } else {
            out.push_str("<br>");
        }
    }

    lists.close_to(0, &mut out);
    out
}

fn escape(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            _ => out.push(c),
        }
    }
    out
}

fn heading_line(line: &str) -> Cow<'_, str> {
    let Some(caps) = HEADING.captures(line) else {
        return Cow::Borrowed(line);
    };
    let level = caps[1].len();
    let body = &line[caps[0].len()..];
    Cow::Owned(format!("<h{level}>{body}</h{level}>"))
}

fn apply_inline(text: &str) -> String {
    let strong = STRONG.replace_all(text, "<strong>${1}</strong>");
    let underscored = underscore_emphasis(&strong);
    STAR_EMPHASIS
        .replace_all(&underscored, "<em>${1}</em>")
        .into_owned()
}

/// Level 1 has no indent; every two columns add one, a tab counting as two.
fn nesting_level(indent: &str) -> usize {
    let width: usize = indent
        .chars()
        .map(|c| if c == '\t' { 2 } else { 1 })
        .sum();
    width / 2 + 1
}

fn is_word(c: char) -> bool {
    c.is_ascii_alphanumeric() || c == '_'
}

fn is_line_break(c: char) -> bool {
    matches!(c, '\n' | '\r' | '\u{2028}' | '\u{2029}')
}

/// Wraps `_text_` in `<em>` when the underscores sit on word boundaries.
///
/// The opening underscore must start the text or follow a non-word character,
/// which is kept. The closing one must end the text or precede a non-word
/// character. The shortest such span wins and never crosses a line break.
/// Word characters are ASCII letters, digits and `_`, so `snake_case_names`
/// are left alone.
fn underscore_emphasis(text: &str) -> String {
    if !text.contains('_') {
        return text.to_string();
    }

    let chars: Vec<char> = text.chars().collect();
    let mut out = String::with_capacity(text.len() + 16);
    let mut i = 0;

    while i < chars.len() {
        match underscore_span_at(&chars, i) {
            Some((open, close)) => {
                out.extend(&chars[i..open]);
                out.push_str("<em>");
                out.extend(&chars[open + 1..close]);
                out.push_str("</em>");
                i = close + 1;
            }
            None => {
                out.push(chars[i]);
                i += 1;
            }
        }
    }
    out
}

/// Positions of the opening and closing underscores of a span starting at `i`.
fn underscore_span_at(chars: &[char], i: usize) -> Option<(usize, usize)> {
    let at_start = (i == 0).then_some(i);
    let after_boundary = (!is_word(chars[i])).then_some(i + 1);

    [at_start, after_boundary]
        .into_iter()
        .flatten()
        .find_map(|open| closing_underscore(chars, open).map(|close| (open, close)))
}

fn closing_underscore(chars: &[char], open: usize) -> Option<usize> {
    if chars.get(open) != Some(&'_') {
        return None;
    }
    let first = *chars.get(open + 1)?;
    if is_line_break(first) {
        return None;
    }

    for j in open + 2..chars.len() {
        let c = chars[j];
        if c == '_' && chars.get(j + 1).is_none_or(|next| !is_word(*next)) {
            return Some(j);
        }
        if is_line_break(c) {
            return None;
        }
    }
    None
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn bold_paragraph() {
        assert_eq!(format("**bold**"), "<p><strong>bold</strong></p>");
    }

    #[test]
    fn heading_then_list() {
        assert_eq!(
            format("# Title\n- a\n- b"),
            "<h1>Title</h1><ul><li>a</li><li>b</li></ul>"
        );
    }

    #[test]
    fn nested_list_closes_before_outer_item() {
        assert_eq!(
            format("- a\n  - b\n- c"),
            "<ul><li>a</li><ul><li>b</li></ul><li>c</li></ul>"
        );
    }

    #[test]
    fn switching_marker_at_same_level_reopens_list() {
        assert_eq!(
            format("- a\n1. b\n2. c\n- d"),
            "<ul><li>a</li></ul><ol><li>b</li><li>c</li></ol><ul><li>d</li></ul>"
        );
    }

    #[test]
    fn switching_marker_in_nested_level_keeps_parent() {
        assert_eq!(
            format("1. a\n  - b\n  2. c\n3. d"),
            "<ol><li>a</li><ul><li>b</li></ul><ol><li>c</li></ol><li>d</li></ol>"
        );
    }

    #[test]
    fn deep_jump_opens_intermediate_levels_with_line_kind() {
        assert_eq!(
            format("- a\n    1. b"),
            "<ul><li>a</li><ol><ol><li>b</li></ol></ol></ul>"
        );
    }

    #[test]
    fn tabs_count_as_two_spaces() {
        assert_eq!(
            format("- a\n\t- b"),
            "<ul><li>a</li><ul><li>b</li></ul></ul>"
        );
        assert_eq!(nesting_level(""), 1);
        assert_eq!(nesting_level(" "), 1);
        assert_eq!(nesting_level("  "), 2);
        assert_eq!(nesting_level("\t "), 2);
        assert_eq!(nesting_level("\t\t"), 3);
    }

    #[test]
    fn non_list_line_closes_all_lists() {
        assert_eq!(
            format("- a\n  - b\nafter"),
            "<ul><li>a</li><ul><li>b</li></ul></ul><p>after</p>"
        );
        assert_eq!(
            format("- a\n## Next\n- b"),
            "<ul><li>a</li></ul><h2>Next</h2><ul><li>b</li></ul>"
        );
        assert_eq!(
            format("- a\n\n- b"),
            "<ul><li>a</li></ul><br><ul><li>b</li></ul>"
        );
    }

    #[test]
    fn heading_levels_and_prefixes() {
        assert_eq!(format("### Three"), "<h3>Three</h3>");
        assert_eq!(format("  ## Two"), "<h2>Two</h2>");
        assert_eq!(format("#   One"), "<h1>One</h1>");
        assert_eq!(format("#### Four"), "<p>#### Four</p>");
        assert_eq!(format("#tag"), "<p>#tag</p>");
    }

    #[test]
    fn headings_get_inline_emphasis() {
        assert_eq!(format("## **Hot** lead"), "<h2><strong>Hot</strong> lead</h2>");
    }

    #[test]
    fn inline_emphasis_forms() {
        assert_eq!(
            format("*a* and **b** and _c_"),
            "<p><em>a</em> and <strong>b</strong> and <em>c</em></p>"
        );
        assert_eq!(format("**a** **b**"), "<p><strong>a</strong> <strong>b</strong></p>");
    }

    #[test]
    fn underscore_needs_word_boundaries() {
        assert_eq!(format("snake_case_name"), "<p>snake_case_name</p>");
        assert_eq!(format("_hi_ there"), "<p><em>hi</em> there</p>");
        assert_eq!(format("say _a_b_ now"), "<p>say <em>a_b</em> now</p>");
        assert_eq!(format("(_x_)"), "<p>(<em>x</em>)</p>");
        assert_eq!(format("_open only"), "<p>_open only</p>");
    }

    #[test]
    fn star_ignores_word_boundaries() {
        assert_eq!(format("a*b*c"), "<p>a<em>b</em>c</p>");
        assert_eq!(format("a_b_c"), "<p>a_b_c</p>");
    }

    #[test]
    fn emphasis_does_not_cross_lines() {
        assert_eq!(format("*a\nb*"), "<p>*a</p><p>b*</p>");
        assert_eq!(format("_a\nb_"), "<p>_a</p><p>b_</p>");
        assert_eq!(format("**a\nb**"), "<p>**a</p><p>b**</p>");
    }

    #[test]
    fn underscore_pairs_across_adjacent_lines_boundary() {
        // The newline is the non-word character in front of the second span.
        assert_eq!(format("_a_\n_b_"), "<p><em>a</em></p><p><em>b</em></p>");
    }

    #[test]
    fn list_items_carry_inline_emphasis() {
        assert_eq!(
            format("- **Ask** about _budget_"),
            "<ul><li><strong>Ask</strong> about <em>budget</em></li></ul>"
        );
    }

    #[test]
    fn structural_characters_are_escaped() {
        assert_eq!(
            format("<script>alert('x')</script> & co"),
            "<p>&lt;script&gt;alert('x')&lt;/script&gt; &amp; co</p>"
        );
        assert_eq!(format("<h1>fake</h1>"), "<p>&lt;h1&gt;fake&lt;/h1&gt;</p>");
    }

    #[test]
    fn unicode_passes_through() {
        assert_eq!(format("Olá — café ☎️"), "<p>Olá — café ☎️</p>");
    }

    #[test]
    fn empty_and_blank_input() {
        assert_eq!(format(""), "<br>");
        assert_eq!(format("   "), "<br>");
        assert_eq!(format("a\n\nb"), "<p>a</p><br><p>b</p>");
    }

    #[test]
    fn list_marker_needs_following_space() {
        assert_eq!(format("-a"), "<p>-a</p>");
        assert_eq!(format("1.a"), "<p>1.a</p>");
        assert_eq!(format("- "), "<ul><li></li></ul>");
        assert_eq!(format("10. ten"), "<ol><li>ten</li></ol>");
    }

    #[test]
    fn list_stack_transitions() {
        let mut out = String::new();
        let mut stack = ListStack::default();
        stack.open_to(2, ListKind::Ordered, &mut out);
        assert_eq!(stack.depth(), 2);
        stack.open_to(2, ListKind::Unordered, &mut out);
        stack.close_to(0, &mut out);
        assert_eq!(stack.depth(), 0);
        assert_eq!(out, "<ol><ol></ol><ul></ul></ol>");
    }
}
