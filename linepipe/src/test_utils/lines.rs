//! Helpers to build input lines and compare output lines regardless of order.

/// Returns `count` distinct lines, `line-1` to `line-<count>`.
pub fn numbered_lines(count: usize) -> Vec<String> {
    (1..=count).map(|index| format!("line-{index}")).collect()
}

/// Returns `lines` sorted, for comparing the line multiset of an unordered output.
pub fn sorted<I, S>(lines: I) -> Vec<String>
where
    I: IntoIterator<Item = S>,
    S: Into<String>,
{
    let mut lines: Vec<String> = lines.into_iter().map(Into::into).collect();
    lines.sort();
    lines
}

/// Returns the upper cased `lines`, sorted.
pub fn sorted_upper<I, S>(lines: I) -> Vec<String>
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    sorted(lines.into_iter().map(|line| line.as_ref().to_uppercase()))
}

/// Removes the ` [worker-<n>]` tag from a line, returning the untagged text and the worker
/// number.
pub fn split_worker_tag(line: &str) -> Option<(&str, usize)> {
    let (text, tag) = line.rsplit_once(" [worker-")?;
    let worker = tag.strip_suffix(']')?.parse().ok()?;

    Some((text, worker))
}
