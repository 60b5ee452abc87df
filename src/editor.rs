/// Line-based text buffer behind the YAML editor.
///
/// The cursor column counts chars, not bytes. `text()` writes back the line
/// ending and final newline the document was loaded with.
#[derive(Debug, Clone, Default, Eq, PartialEq)]
pub struct TextBuffer {
    lines: Vec<String>,
    crlf: bool,
    final_newline: bool,
    row: usize,
    col: usize,
    scroll: usize,
    dirty: bool,
}

impl TextBuffer {
    pub fn from_text(text: &str) -> Self {
        let mut lines = text.lines().map(str::to_string).collect::<Vec<_>>();
        if lines.is_empty() {
            lines.push(String::new());
        }
        Self {
            lines,
            crlf: text.contains("\r\n"),
            final_newline: text.ends_with('\n'),
            ..Self::default()
        }
    }

    pub fn text(&self) -> String {
        let ending = if self.crlf { "\r\n" } else { "\n" };
        let mut text = self.lines.join(ending);
        if self.final_newline {
            text.push_str(ending);
        }
        text
    }

    pub fn lines(&self) -> &[String] {
        &self.lines
    }

    pub fn cursor(&self) -> (usize, usize) {
        (self.row, self.col)
    }

    pub fn scroll(&self) -> usize {
        self.scroll
    }

    pub fn is_dirty(&self) -> bool {
        self.dirty
    }

    pub fn mark_clean(&mut self) {
        self.dirty = false;
    }

    pub fn insert_char(&mut self, ch: char) {
        let at = self.byte_offset();
        self.lines[self.row].insert(at, ch);
        self.col += 1;
        self.dirty = true;
    }

    pub fn insert_str(&mut self, text: &str) {
        for ch in text.chars() {
            if ch == '\n' {
                self.newline();
            } else {
                self.insert_char(ch);
            }
        }
    }

    pub fn newline(&mut self) {
        let at = self.byte_offset();
        let rest = self.lines[self.row].split_off(at);
        let indent = leading_spaces(&self.lines[self.row]);
        self.lines
            .insert(self.row + 1, format!("{}{rest}", " ".repeat(indent)));
        self.row += 1;
        self.col = indent;
        self.dirty = true;
    }

    pub fn backspace(&mut self) {
        if self.col > 0 {
            self.col -= 1;
            let at = self.byte_offset();
            self.lines[self.row].remove(at);
            self.dirty = true;
        } else if self.row > 0 {
            let line = self.lines.remove(self.row);
            self.row -= 1;
            self.col = self.line_len();
            self.lines[self.row].push_str(&line);
            self.dirty = true;
        }
    }

    pub fn delete(&mut self) {
        if self.col < self.line_len() {
            let at = self.byte_offset();
            self.lines[self.row].remove(at);
            self.dirty = true;
        } else if self.row + 1 < self.lines.len() {
            let next = self.lines.remove(self.row + 1);
            self.lines[self.row].push_str(&next);
            self.dirty = true;
        }
    }

    pub fn move_left(&mut self) {
        if self.col > 0 {
            self.col -= 1;
        } else if self.row > 0 {
            self.row -= 1;
            self.col = self.line_len();
        }
    }

    pub fn move_right(&mut self) {
        if self.col < self.line_len() {
            self.col += 1;
        } else if self.row + 1 < self.lines.len() {
            self.row += 1;
            self.col = 0;
        }
    }

    pub fn move_up(&mut self, rows: usize) {
        self.row = self.row.saturating_sub(rows);
        self.col = self.col.min(self.line_len());
    }

    pub fn move_down(&mut self, rows: usize) {
        self.row = (self.row + rows).min(self.lines.len() - 1);
        self.col = self.col.min(self.line_len());
    }

    pub fn home(&mut self) {
        self.col = 0;
    }

    pub fn end(&mut self) {
        self.col = self.line_len();
    }

    /// Keeps the cursor row inside a window of `height` rows.
    pub fn ensure_visible(&mut self, height: usize) {
        if height == 0 {
            return;
        }
        if self.row < self.scroll {
            self.scroll = self.row;
        } else if self.row >= self.scroll + height {
            self.scroll = self.row + 1 - height;
        }
    }

    fn line_len(&self) -> usize {
        self.lines[self.row].chars().count()
    }

    fn byte_offset(&self) -> usize {
        let line = &self.lines[self.row];
        line.char_indices()
            .nth(self.col)
            .map_or(line.len(), |(offset, _)| offset)
    }
}

fn leading_spaces(line: &str) -> usize {
    line.chars().take_while(|ch| *ch == ' ').count()
}

#[cfg(test)]
mod tests {
    use super::TextBuffer;

    #[test]
    fn empty_text_has_one_line() {
        let buffer = TextBuffer::from_text("");
        assert_eq!(buffer.lines(), &[String::new()]);
        assert_eq!(buffer.text(), "");
        assert!(!buffer.is_dirty());
    }

    #[test]
    fn typing_and_newline_keep_indentation() {
        let mut buffer = TextBuffer::from_text("spec:\n  replicas: 1");
        buffer.move_down(1);
        buffer.end();
        buffer.backspace();
        buffer.insert_char('3');
        buffer.newline();
        buffer.insert_str("paused: true");

        assert_eq!(buffer.text(), "spec:\n  replicas: 3\n  paused: true");
        assert_eq!(buffer.cursor(), (2, 14));
        assert!(buffer.is_dirty());
    }

    #[test]
    fn untouched_documents_come_back_unchanged() {
        for text in [
            "kind: Pod\nmetadata:\n  name: web\n",
            "kind: Pod\r\nmetadata:\r\n  name: web\r\n",
            "kind: Pod\nmetadata:\n  name: web",
        ] {
            assert_eq!(TextBuffer::from_text(text).text(), text);
        }
    }

    #[test]
    fn edits_keep_crlf_endings() {
        let mut buffer = TextBuffer::from_text("a: 1\r\nb: 2\r\n");
        buffer.end();
        buffer.newline();
        buffer.insert_str("c: 3");
        assert_eq!(buffer.text(), "a: 1\r\nc: 3\r\nb: 2\r\n");
    }

    #[test]
    fn backspace_at_line_start_joins_lines() {
        let mut buffer = TextBuffer::from_text("a\nb");
        buffer.move_down(1);
        buffer.backspace();
        assert_eq!(buffer.lines(), &["ab".to_string()]);
        assert_eq!(buffer.cursor(), (0, 1));
    }

    #[test]
    fn delete_at_line_end_pulls_next_line_up() {
        let mut buffer = TextBuffer::from_text("a\nb");
        buffer.end();
        buffer.delete();
        assert_eq!(buffer.text(), "ab");
    }

    #[test]
    fn cursor_counts_chars_in_multibyte_lines() {
        let mut buffer = TextBuffer::from_text("név: ü");
        buffer.end();
        buffer.move_left();
        buffer.insert_char('x');
        assert_eq!(buffer.text(), "név: xü");
    }

    #[test]
    fn vertical_moves_clamp_the_column() {
        let mut buffer = TextBuffer::from_text("metadata:\n  x\nlonger line");
        buffer.end();
        buffer.move_down(1);
        assert_eq!(buffer.cursor(), (1, 3));
        buffer.move_down(10);
        assert_eq!(buffer.cursor(), (2, 3));
        buffer.move_up(10);
        assert_eq!(buffer.cursor(), (0, 3));
    }

    #[test]
    fn scroll_follows_the_cursor() {
        let text = (0..20).map(|n| format!("k{n}: v")).collect::<Vec<_>>().join("\n");
        let mut buffer = TextBuffer::from_text(&text);
        buffer.move_down(12);
        buffer.ensure_visible(5);
        assert_eq!(buffer.scroll(), 8);
        buffer.move_up(10);
        buffer.ensure_visible(5);
        assert_eq!(buffer.scroll(), 2);
    }
}
