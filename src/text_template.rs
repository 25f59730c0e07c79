//! Placeholder scanner and keyword substitutor for status-file templates.

/// Built-in template written to disk the first time a render finds no template file.
pub(crate) const DEFAULT_STATUS_TEMPLATE_LINES: [&str; 4] = [
    "Playing: {songName} {songSubName} - {authorName}",
    "Star: {star}",
    "{gamemode} {difficulty} | BPM: {beatsPerMinute}",
    "{[isNoFail]} {[modifiers]}",
];

#[cfg(windows)]
const LINE_SEPARATOR: &str = "\r\n";
#[cfg(not(windows))]
const LINE_SEPARATOR: &str = "\n";

pub(crate) fn default_status_template() -> String {
    DEFAULT_STATUS_TEMPLATE_LINES.join(LINE_SEPARATOR)
}

/// Byte range `[start, end)` of one `{...}` placeholder, braces included.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(crate) struct PlaceholderSpan {
    pub start: usize,
    pub end: usize,
}

impl PlaceholderSpan {
    /// Content between the braces.
    fn inner<'a>(&self, text: &'a str) -> &'a str {
        &text[self.start + 1..self.end - 1]
    }
}

/// Finds every `{...}` group that holds no braces or line breaks.
///
/// Scans left to right and never returns overlapping spans. An opening brace
/// that runs into another `{`, a line break, or the end of the text is not a
/// placeholder; scanning resumes at the interrupting character.
pub(crate) fn scan_placeholders(text: &str) -> Vec<PlaceholderSpan> {
    let mut spans = Vec::new();
    let mut open: Option<usize> = None;

    for (index, ch) in text.char_indices() {
        match ch {
            '{' => open = Some(index),
            '}' => {
                if let Some(start) = open.take() {
                    spans.push(PlaceholderSpan {
                        start,
                        end: index + 1,
                    });
                }
            }
            '\n' | '\r' => open = None,
            _ => {}
        }
    }
    spans
}

fn is_token_char(ch: char) -> bool {
    ch.is_ascii_alphanumeric() || ch == '_'
}

/// Byte ranges of identifier tokens in `content` that equal `keyword`.
fn keyword_token_ranges(content: &str, keyword: &str) -> Vec<(usize, usize)> {
    let mut ranges = Vec::new();
    let mut token_start: Option<usize> = None;

    for (index, ch) in content.char_indices() {
        if is_token_char(ch) {
            token_start.get_or_insert(index);
            continue;
        }
        if let Some(start) = token_start.take() {
            if &content[start..index] == keyword {
                ranges.push((start, index));
            }
        }
    }
    if let Some(start) = token_start {
        if &content[start..] == keyword {
            ranges.push((start, content.len()));
        }
    }
    ranges
}

fn references_keyword(content: &str, keyword: &str) -> bool {
    !keyword.is_empty() && !keyword_token_ranges(content, keyword).is_empty()
}

fn replace_keyword_tokens(content: &str, keyword: &str, value: &str) -> String {
    let mut rewritten = String::with_capacity(content.len() + value.len());
    let mut cursor = 0;
    for (start, end) in keyword_token_ranges(content, keyword) {
        rewritten.push_str(&content[cursor..start]);
        rewritten.push_str(value);
        cursor = end;
    }
    rewritten.push_str(&content[cursor..]);
    rewritten
}

/// Returns `true` when any placeholder in `text` names `keyword`.
pub(crate) fn template_references(text: &str, keyword: &str) -> bool {
    scan_placeholders(text)
        .iter()
        .any(|span| references_keyword(span.inner(text), keyword))
}

/// Resolves every placeholder that names `keyword`.
///
/// With a non-empty `value` the braces are dropped and each `keyword` token
/// inside is replaced, leaving the decoration around it intact. With an empty
/// `value` the whole placeholder, decoration included, is removed.
pub(crate) fn substitute_keyword(text: &str, keyword: &str, value: &str) -> String {
    let mut relevant: Vec<PlaceholderSpan> = scan_placeholders(text)
        .into_iter()
        .filter(|span| references_keyword(span.inner(text), keyword))
        .collect();
    if relevant.is_empty() {
        return text.to_string();
    }

    // Edits run right to left so the offsets of spans further left stay valid.
    relevant.sort_unstable_by(|left, right| right.start.cmp(&left.start));

    let mut rewritten = text.to_string();
    for span in relevant {
        let replacement = if value.is_empty() {
            String::new()
        } else {
            replace_keyword_tokens(span.inner(text), keyword, value)
        };
        rewritten.replace_range(span.start..span.end, &replacement);
    }
    rewritten
}

/// Applies [`substitute_keyword`] once per pair, in order.
pub(crate) fn render_template<K, V>(template: &str, keywords: &[(K, V)]) -> String
where
    K: AsRef<str>,
    V: AsRef<str>,
{
    keywords
        .iter()
        .fold(template.to_string(), |text, (keyword, value)| {
            substitute_keyword(&text, keyword.as_ref(), value.as_ref())
        })
}
