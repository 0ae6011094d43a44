// Thu Oct 15 2026 - Alex

use colored::*;

pub struct TableBuilder {
    headers: Vec<String>,
    rows: Vec<Vec<String>>,
    column_widths: Vec<usize>,
    alignment: Vec<Alignment>,
    use_color: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Alignment {
    Left,
    Right,
}

impl TableBuilder {
    pub fn new() -> Self {
        Self {
            headers: Vec::new(),
            rows: Vec::new(),
            column_widths: Vec::new(),
            alignment: Vec::new(),
            use_color: true,
        }
    }

    pub fn with_headers(mut self, headers: &[&str]) -> Self {
        self.headers = headers.iter().map(|s| s.to_string()).collect();
        self.column_widths = self.headers.iter().map(|h| h.chars().count()).collect();
        self.alignment = vec![Alignment::Left; self.headers.len()];
        self
    }

    pub fn add_row<T: std::fmt::Display>(mut self, row: &[T]) -> Self {
        let string_row: Vec<String> = row.iter().map(|c| c.to_string()).collect();

        for (i, cell) in string_row.iter().enumerate() {
            let len = cell.chars().count();
            match self.column_widths.get_mut(i) {
                Some(width) => *width = (*width).max(len),
                None => {
                    self.column_widths.push(len);
                    self.alignment.push(Alignment::Left);
                }
            }
        }

        self.rows.push(string_row);
        self
    }

    pub fn with_alignment(mut self, column: usize, alignment: Alignment) -> Self {
        if let Some(a) = self.alignment.get_mut(column) {
            *a = alignment;
        }
        self
    }

    pub fn with_color(mut self, use_color: bool) -> Self {
        self.use_color = use_color;
        self
    }

    fn align_cell(content: &str, width: usize, alignment: Alignment) -> String {
        match alignment {
            Alignment::Left => format!("{:<width$}", content, width = width),
            Alignment::Right => format!("{:>width$}", content, width = width),
        }
    }

    pub fn build(&self) -> String {
        if self.headers.is_empty() && self.rows.is_empty() {
            return String::new();
        }

        let chars = &BORDER;
        let mut output = vec![self.build_horizontal_line(chars, 0)];

        if !self.headers.is_empty() {
            output.push(self.build_row(&self.headers, chars, true));
            output.push(self.build_horizontal_line(chars, 3));
        }
        for row in &self.rows {
            output.push(self.build_row(row, chars, false));
        }

        output.push(self.build_horizontal_line(chars, 6));
        output.join("\n")
    }

    fn build_row(&self, cells: &[String], chars: &BorderChars, is_header: bool) -> String {
        let mut line = chars.vertical.to_string();

        for (i, width) in self.column_widths.iter().enumerate() {
            let cell = cells.get(i).map(String::as_str).unwrap_or("");
            let aligned = Self::align_cell(cell, *width, self.alignment[i]);
            let formatted = if is_header && self.use_color {
                aligned.cyan().bold().to_string()
            } else {
                aligned
            };
            line.push_str(&format!(" {} {}", formatted, chars.vertical));
        }

        line
    }

    /// `row` picks the corner set: 0 top, 3 separator, 6 bottom.
    fn build_horizontal_line(&self, chars: &BorderChars, row: usize) -> String {
        let [left, middle, right] = [chars.corners[row], chars.corners[row + 1], chars.corners[row + 2]];
        let segments: Vec<String> = self
            .column_widths
            .iter()
            .map(|w| chars.horizontal.to_string().repeat(w + 2))
            .collect();
        format!("{}{}{}", left, segments.join(&middle.to_string()), right)
    }
}

impl Default for TableBuilder {
    fn default() -> Self {
        Self::new()
    }
}

struct BorderChars {
    horizontal: char,
    vertical: char,
    corners: [char; 9],
}

const BORDER: BorderChars = BorderChars {
    horizontal: '─',
    vertical: '│',
    corners: ['┌', '┬', '┐', '├', '┼', '┤', '└', '┴', '┘'],
};

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_table_layout() {
        let table = TableBuilder::new()
            .with_headers(&["Code", "Message"])
            .add_row(&["1", "Too large"])
            .with_alignment(0, Alignment::Right)
            .with_color(false)
            .build();

        let lines: Vec<&str> = table.lines().collect();
        assert_eq!(lines[0], "┌──────┬───────────┐");
        assert_eq!(lines[1], "│ Code │ Message   │");
        assert_eq!(lines[2], "├──────┼───────────┤");
        assert_eq!(lines[3], "│    1 │ Too large │");
        assert_eq!(lines[4], "└──────┴───────────┘");
        assert_eq!(lines.len(), 5);
    }

    #[test]
    fn test_empty_table() {
        assert!(TableBuilder::new().build().is_empty());
    }
}
