/// Response extraction — isolates the model's answer from llava log output.
///
/// The tool interleaves its own log lines with the generated text and, after
/// generation, prints timing statistics on lines starting with `main:`. The
/// only known extraction rule: with exactly one such marker line, the answer
/// is the single line two positions above it.
///
/// Known fragility, kept on purpose: multi-line answers or a changed log
/// format silently produce the sentinel (or a wrong single line). The rule
/// lives here as an isolated pure function so it can be swapped wholesale if
/// the tool's format changes; it is not generalized speculatively.
use sightspeak_core::CleanedText;

/// Prefix of the timing-statistics lines emitted after generation completes.
const MARKER_PREFIX: &str = "main:";

/// Isolate the generated answer from raw captured output.
///
/// Soft-fails to [`CleanedText::Ambiguous`] when zero or multiple marker
/// lines are present, or when the marker sits too close to the top for an
/// answer line to exist above it.
pub fn extract_answer(raw: &str) -> CleanedText {
    let lines: Vec<&str> = raw.split('\n').collect();
    let markers: Vec<usize> = lines
        .iter()
        .enumerate()
        .filter(|(_, line)| line.starts_with(MARKER_PREFIX))
        .map(|(i, _)| i)
        .collect();

    match markers.as_slice() {
        [index] if *index >= 2 => CleanedText::Answer(lines[index - 2].trim().to_string()),
        _ => CleanedText::Ambiguous,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn answer_two_lines_above_single_marker() {
        let raw = "l0\nl1\nANSWER\nl3\nmain: stats";
        assert_eq!(extract_answer(raw), CleanedText::Answer("ANSWER".into()));
    }

    #[test]
    fn answer_is_whitespace_trimmed() {
        let raw = "log\n  The Eiffel Tower stands tall.  \n\nmain: total time = 123ms\n";
        assert_eq!(
            extract_answer(raw),
            CleanedText::Answer("The Eiffel Tower stands tall.".into())
        );
    }

    #[test]
    fn no_marker_is_ambiguous() {
        assert_eq!(extract_answer("l0\nl1\nANSWER\nl3"), CleanedText::Ambiguous);
    }

    #[test]
    fn multiple_markers_are_ambiguous() {
        let raw = "l0\nl1\nANSWER\nmain: first\nmain: second";
        assert_eq!(extract_answer(raw), CleanedText::Ambiguous);
    }

    #[test]
    fn marker_too_close_to_top_is_ambiguous() {
        assert_eq!(extract_answer("main: stats\nrest"), CleanedText::Ambiguous);
        assert_eq!(extract_answer("l0\nmain: stats"), CleanedText::Ambiguous);
    }

    #[test]
    fn marker_at_index_two_recovers_first_line() {
        assert_eq!(
            extract_answer("ANSWER\n\nmain: stats"),
            CleanedText::Answer("ANSWER".into())
        );
    }

    #[test]
    fn marker_prefix_must_start_the_line() {
        // "main:" mid-line is not a marker.
        let raw = "l0\nl1\nANSWER\nsee main: below\nmain: stats";
        assert_eq!(extract_answer(raw), CleanedText::Answer("ANSWER".into()));
    }

    #[test]
    fn empty_input_is_ambiguous() {
        assert_eq!(extract_answer(""), CleanedText::Ambiguous);
    }
}
