//! Response normalization ahead of line splitting.

/// Marker after which generators tend to echo a follow-up question.
const FOLLOW_UP_MARKER: &str = "\nQ:";

/// Normalize a raw response.
///
/// - drops everything from the first echoed follow-up question (`\nQ:`)
/// - trims surrounding whitespace
/// - deletes ASCII punctuation
/// - turns em dashes into spaces and deletes Arabic commas
pub fn normalize(response: &str) -> String {
    let kept = response
        .split(FOLLOW_UP_MARKER)
        .next()
        .unwrap_or_default()
        .trim();

    kept.chars()
        .filter(|c| !c.is_ascii_punctuation() && *c != '،')
        .map(|c| if c == '—' { ' ' } else { c })
        .collect()
}

/// Split normalized text into lines, dropping trailing carriage returns.
pub fn split_lines(text: &str) -> Vec<&str> {
    text.split('\n')
        .map(|line| line.trim_end_matches('\r'))
        .collect()
}
