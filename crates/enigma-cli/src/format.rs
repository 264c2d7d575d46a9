// Output grouping.

/// Symbols per output group.
pub const GROUP_WIDTH: usize = 5;

/// Split `text` into space-separated groups of `width` symbols. The last
/// group may be shorter.
pub fn group(text: &str, width: usize) -> String {
    let chars: Vec<char> = text.chars().collect();
    chars
        .chunks(width.max(1))
        .map(|chunk| chunk.iter().collect::<String>())
        .collect::<Vec<_>>()
        .join(" ")
}

/// Group every line and join them with newlines, ending with a newline
/// when there is at least one line.
pub fn render(lines: &[String], width: usize) -> String {
    let mut out = String::new();
    for line in lines {
        out.push_str(&group(line, width));
        out.push('\n');
    }
    out
}
