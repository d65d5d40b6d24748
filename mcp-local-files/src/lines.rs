//! Line splitting that keeps terminators
//!
//! Every line keeps its own `\n` (and any `\r` before it), so joining the
//! pieces reproduces the input byte for byte.

/// Split `content` into lines, each carrying its trailing newline if it had one
pub fn split_lines(content: &str) -> Vec<String> {
    content.split_inclusive('\n').map(str::to_string).collect()
}

/// Split caller-supplied replacement text into lines ready for splicing
///
/// A final line without a newline gets one, so it cannot merge with the line
/// that follows it in the file.
pub fn replacement_lines(content: &str) -> Vec<String> {
    let mut lines = split_lines(content);
    if let Some(last) = lines.last_mut() {
        if !last.ends_with('\n') {
            last.push('\n');
        }
    }
    lines
}

/// Strip the line terminator for display and history records
pub fn trim_terminator(line: &str) -> &str {
    line.trim_end_matches(['\n', '\r'])
}

/// Strip terminators from every line
pub fn display_lines(lines: &[String]) -> Vec<String> {
    lines
        .iter()
        .map(|line| trim_terminator(line).to_string())
        .collect()
}
