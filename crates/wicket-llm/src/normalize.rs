//! Cleanup of raw model text before parsing.

const FENCE: &str = "```";

/// Remove a leading markdown code fence from model output.
///
/// When the trimmed text opens with a fence, the fence and its language tag
/// are dropped and everything up to the closing fence (or the end) is kept.
/// A tag is either the whole opening line when that line is a single word, or
/// a leading `json`/`sql`. Text without a leading fence comes back trimmed.
#[must_use]
pub fn strip_markdown_fence(text: &str) -> String {
    let trimmed = text.trim();
    let Some(after_fence) = trimmed.strip_prefix(FENCE) else {
        return trimmed.to_string();
    };

    let body = match after_fence.split_once('\n') {
        Some((first_line, rest)) if is_language_tag(first_line.trim()) => rest,
        _ => strip_known_tag(after_fence),
    };

    let content = body.find(FENCE).map_or(body, |end| &body[..end]);
    content.trim().to_string()
}

fn is_language_tag(line: &str) -> bool {
    !line.is_empty()
        && line
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || matches!(c, '-' | '_' | '+'))
}

fn strip_known_tag(text: &str) -> &str {
    ["json", "sql"]
        .iter()
        .find_map(|tag| {
            text.get(..tag.len())
                .filter(|head| head.eq_ignore_ascii_case(tag))
                .map(|_| &text[tag.len()..])
        })
        .unwrap_or(text)
}
