/// Display formatting — one sentence per line.

/// Insert a line break after every sentence-terminating period, trimming
/// each segment. Empty segments (e.g. after a trailing period) are dropped,
/// so a single trailing-period sentence stays a single line. Word content is
/// never altered; only whitespace and line structure change.
pub fn split_sentences(text: &str) -> String {
    let trimmed = text.trim();
    if !trimmed.contains('.') {
        return trimmed.to_string();
    }
    let ends_with_period = trimmed.ends_with('.');
    let segments: Vec<&str> = trimmed
        .split('.')
        .map(str::trim)
        .filter(|segment| !segment.is_empty())
        .collect();
    let mut formatted = segments.join(".\n");
    if ends_with_period {
        formatted.push('.');
    }
    formatted
}
