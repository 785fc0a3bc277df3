//! JSON helpers for model output that wraps payloads in prose or code fences.

/// Strip a markdown code fence (```` ```json ... ``` ````) around a payload.
///
/// Content without a fence is returned trimmed.
#[must_use]
pub fn strip_markdown_json(content: &str) -> &str {
    let trimmed = content.trim();
    let Some(inner) = trimmed.strip_prefix("```").and_then(|rest| rest.strip_suffix("```")) else {
        return trimmed;
    };
    // The first line carries the language tag (possibly empty).
    inner.split_once('\n').map_or_else(|| inner.trim(), |(_, body)| body.trim())
}

/// Locate the outermost JSON object in `content`.
///
/// Models sometimes prefix the object with a sentence; this slices from the
/// first `{` to the last `}` after fence stripping.
#[must_use]
pub fn extract_json_object(content: &str) -> Option<&str> {
    let body = strip_markdown_json(content);
    let start = body.find('{')?;
    let end = body.rfind('}')?;
    if end < start {
        return None;
    }
    body.get(start..=end)
}
