//! Brace-matching boundary scanner shared by the brace-based extractors

/// Find the exclusive end index of a brace-delimited block starting at
/// `start_index`.
///
/// Scans forward line by line, counting every `open_char` and `close_char`
/// occurrence. Returns `i + 1` at the first line where the depth returns to
/// zero or below after having gone positive. Unbalanced input never fails:
/// the block is considered to extend to the end of the input, and a start
/// line that never opens a block scans to the end as well.
pub fn find_block_end(
    lines: &[&str],
    start_index: usize,
    open_char: char,
    close_char: char,
) -> usize {
    let mut depth: i64 = 0;
    let mut started = false;

    for (i, line) in lines.iter().enumerate().skip(start_index) {
        for ch in line.chars() {
            if ch == open_char {
                depth += 1;
                started = true;
            } else if ch == close_char {
                depth -= 1;
            }
        }
        if started && depth <= 0 {
            return i + 1;
        }
    }

    lines.len()
}
