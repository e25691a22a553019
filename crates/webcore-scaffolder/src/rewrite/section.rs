//! Commenting out blocks of lines in YAML-style config documents

pub const COMMENT_MARKER: &str = "#";

const REGION_BEGIN: &str = "# webcore:begin";
const REGION_END: &str = "# webcore:end";

/// Comment out lines `start..=end` (1-indexed) when `should_comment` is set.
///
/// Empty lines and lines already starting with `#` are kept as they are, so
/// applying the same range twice is a no-op. A range that does not fit the
/// document (`start == 0`, `end` past the last line, `start > end`) leaves the
/// lines unchanged.
pub fn comment_section(
    mut lines: Vec<String>,
    start: usize,
    end: usize,
    should_comment: bool,
) -> Vec<String> {
    if !should_comment {
        return lines;
    }
    if start == 0 || start > end || end > lines.len() {
        return lines;
    }

    for line in &mut lines[start - 1..end] {
        let trimmed = line.trim();
        if !trimmed.is_empty() && !trimmed.starts_with(COMMENT_MARKER) {
            line.insert_str(0, "# ");
        }
    }

    lines
}

/// Locate the lines between `# webcore:begin <name>` and `# webcore:end <name>`.
///
/// Returns the 1-indexed inclusive range of the enclosed lines, `None` when
/// either marker is missing or the region is empty.
pub fn find_region<S: AsRef<str>>(lines: &[S], name: &str) -> Option<(usize, usize)> {
    let is_marker = |line: &str, prefix: &str| {
        line.trim()
            .strip_prefix(prefix)
            .is_some_and(|rest| rest.trim() == name)
    };

    let begin = lines
        .iter()
        .position(|line| is_marker(line.as_ref(), REGION_BEGIN))?;
    let end = begin
        + 1
        + lines[begin + 1..]
            .iter()
            .position(|line| is_marker(line.as_ref(), REGION_END))?;

    // enclosed lines are begin+1..end (0-indexed, exclusive end)
    if end == begin + 1 {
        return None;
    }
    Some((begin + 2, end))
}

/// Whether the document carries any `# webcore:begin` marker
pub fn has_regions<S: AsRef<str>>(lines: &[S]) -> bool {
    lines
        .iter()
        .any(|line| line.as_ref().trim_start().starts_with(REGION_BEGIN))
}

/// Comment out a named region.
///
/// The fixed line range is only used for documents without any region
/// markers; in a marked document a missing region leaves the lines unchanged.
pub fn comment_region(
    lines: Vec<String>,
    name: &str,
    fallback: (usize, usize),
    should_comment: bool,
) -> Vec<String> {
    let (start, end) = match find_region(&lines, name) {
        Some(range) => range,
        None if has_regions(&lines) => return lines,
        None => fallback,
    };
    comment_section(lines, start, end, should_comment)
}
