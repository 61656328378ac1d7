//! Query text editing (pure state transitions).
//!
//! Handles text input on the search screen. All functions take the input
//! by value and return the updated input; no side effects, testable
//! without a terminal. The cursor counts characters, not bytes.

/// Query text with an insertion cursor.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct QueryInput {
    text: String,
    /// Character position in `0..=text.chars().count()`.
    cursor: usize,
}

impl QueryInput {
    /// Input holding `text` with the cursor at the end.
    pub fn new(text: impl Into<String>) -> Self {
        let text = text.into();
        let cursor = text.chars().count();
        Self { text, cursor }
    }

    /// Current text.
    pub fn as_str(&self) -> &str {
        &self.text
    }

    /// Cursor position in characters.
    pub fn cursor(&self) -> usize {
        self.cursor
    }

    /// Whether the text is empty.
    pub fn is_empty(&self) -> bool {
        self.text.is_empty()
    }

    fn char_len(&self) -> usize {
        self.text.chars().count()
    }

    /// Byte offset of a character position.
    fn byte_offset(&self, char_pos: usize) -> usize {
        self.text
            .char_indices()
            .nth(char_pos)
            .map(|(i, _)| i)
            .unwrap_or(self.text.len())
    }
}

/// Insert a character at the cursor and advance it.
pub fn insert_char(input: QueryInput, ch: char) -> QueryInput {
    let at = input.byte_offset(input.cursor);
    let QueryInput { mut text, cursor } = input;
    text.insert(at, ch);
    QueryInput {
        text,
        cursor: cursor + 1,
    }
}

/// Delete the character before the cursor. No-op at position 0.
pub fn backspace(input: QueryInput) -> QueryInput {
    if input.cursor == 0 {
        return input;
    }
    let start = input.byte_offset(input.cursor - 1);
    let end = input.byte_offset(input.cursor);
    let mut text = input.text;
    text.replace_range(start..end, "");
    QueryInput {
        text,
        cursor: input.cursor - 1,
    }
}

/// Delete the character under the cursor. No-op at the end.
pub fn delete(input: QueryInput) -> QueryInput {
    if input.cursor >= input.char_len() {
        return input;
    }
    let start = input.byte_offset(input.cursor);
    let end = input.byte_offset(input.cursor + 1);
    let mut text = input.text;
    text.replace_range(start..end, "");
    QueryInput {
        text,
        cursor: input.cursor,
    }
}

/// Move cursor left by one position. Saturates at 0.
pub fn cursor_left(input: QueryInput) -> QueryInput {
    QueryInput {
        cursor: input.cursor.saturating_sub(1),
        ..input
    }
}

/// Move cursor right by one position. Saturates at the end.
pub fn cursor_right(input: QueryInput) -> QueryInput {
    let max = input.char_len();
    QueryInput {
        cursor: (input.cursor + 1).min(max),
        ..input
    }
}

/// Move the cursor to the start.
pub fn cursor_home(input: QueryInput) -> QueryInput {
    QueryInput { cursor: 0, ..input }
}

/// Move the cursor past the last character.
pub fn cursor_end(input: QueryInput) -> QueryInput {
    let cursor = input.char_len();
    QueryInput { cursor, ..input }
}
