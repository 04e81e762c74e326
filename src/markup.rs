//! Text presentation helpers for the terminal frontend.

/// Key help shown at the bottom of the screen
pub(crate) const HELP_LINE: &str = "space: pause/resume   s: skip   q: quit";

/// Shown in place of the help line while paused
pub(crate) const PAUSED_LINE: &str = "-- paused --";

/// Render a percentage as a fixed-width bar, e.g. `[#####.....]  50%`
pub(crate) fn bar(percent: u8, width: usize) -> String {
    let percent = percent.min(100);
    let filled = width * usize::from(percent) / 100;

    let mut out = String::with_capacity(width + 8);
    out.push('[');
    for index in 0..width {
        out.push(if index < filled { '#' } else { '.' });
    }
    out.push(']');
    out.push_str(&format!(" {:>3}%", percent));
    out
}

/// Wrap text to `width` columns on word boundaries, preserving
/// explicit line breaks.
pub(crate) fn wrap(text: &str, width: usize) -> Vec<String> {
    let mut lines = Vec::new();

    for raw_line in text.lines() {
        let mut line = String::new();
        for word in raw_line.split_whitespace() {
            if !line.is_empty() && line.len() + 1 + word.len() > width {
                lines.push(std::mem::take(&mut line));
            }
            if !line.is_empty() {
                line.push(' ');
            }
            line.push_str(word);
        }
        lines.push(line);
    }

    lines
}
