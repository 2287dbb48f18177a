//! Flat section index over prompt text.
//!
//! Sections never nest, so the text is kept as one ordered slice of
//! lines plus the positions of heading-shaped lines. A section body is
//! the run of lines between its heading and the next heading-shaped line.

use crate::heading::is_heading_shaped;

#[derive(Debug, Clone)]
pub struct SectionIndex<'a> {
    lines: Vec<&'a str>,
    heading_positions: Vec<usize>,
}

impl<'a> SectionIndex<'a> {
    pub fn new(text: &'a str) -> Self {
        let lines: Vec<&'a str> = text.split('\n').collect();
        let heading_positions = lines
            .iter()
            .enumerate()
            .filter(|(_, line)| is_heading_shaped(line.trim()))
            .map(|(index, _)| index)
            .collect();
        Self {
            lines,
            heading_positions,
        }
    }

    /// Trimmed heading-shaped lines, in text order.
    pub fn heading_lines(&self) -> impl Iterator<Item = &'a str> + '_ {
        self.heading_positions
            .iter()
            .map(|&index| self.lines[index])
            .map(str::trim)
    }

    /// Non-empty trimmed lines under the last line equal to `heading`.
    ///
    /// Sections come after the user text they follow, so the last match is
    /// the real heading even when a title repeats it. Empty when the
    /// heading line is absent.
    pub fn section_body(&self, heading: &str) -> Vec<&'a str> {
        let Some(start) = self.lines.iter().rposition(|line| line.trim() == heading) else {
            return Vec::new();
        };
        let end = self
            .heading_positions
            .iter()
            .copied()
            .find(|&index| index > start)
            .unwrap_or(self.lines.len());

        self.lines[start + 1..end]
            .iter()
            .copied()
            .map(str::trim)
            .filter(|line| !line.is_empty())
            .collect()
    }
}
