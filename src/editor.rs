use crate::appointments::{notes_from_text, DateKey};
use crate::theme::{
    editor::{CURSOR_STYLE, HINT_STYLE},
    BASE_STYLE,
};
use ratatui::{
    buffer::Buffer,
    layout::{Alignment, Constraint, Flex, Layout, Margin, Rect},
    text::{Line, Span, Text},
    widgets::{Block, Clear, StatefulWidget, Widget},
};
use time::Month;

const OUTER_WIDTH: u16 = 44;
const OUTER_HEIGHT: u16 = 14;

static PROMPT: &str = "Enter appointments:";
static HINT: &str = "^S/F2 Save    Esc Cancel";

/// Modal dialog for editing the appointments of a single day
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub(crate) struct Editor;

impl StatefulWidget for Editor {
    type State = EditorState;

    /*
     * ..........................
     * .┌ Appointments for … ─┐.
     * .│Enter appointments:  │.
     * .│first line           │.
     * .│second line▌         │.
     * .│                     │.
     * .│^S/F2 Save Esc Cancel│.
     * .└─────────────────────┘.
     * ..........................
     */

    fn render(self, area: Rect, buf: &mut Buffer, state: &mut Self::State) {
        let [outer_area] = Layout::horizontal([OUTER_WIDTH.min(area.width)])
            .flex(Flex::Center)
            .areas(area);
        let [outer_area] = Layout::vertical([OUTER_HEIGHT.min(area.height)])
            .flex(Flex::Center)
            .areas(outer_area);
        Clear.render(outer_area, buf);
        Block::new().style(BASE_STYLE).render(outer_area, buf);
        let block_area = outer_area.inner(Margin::new(1, 1));
        Block::bordered()
            .title(format!(" {} ", state.title()))
            .title_alignment(Alignment::Center)
            .render(block_area, buf);
        let inner = block_area.inner(Margin::new(1, 1));
        let [prompt_area, text_area, hint_area] = Layout::vertical([
            Constraint::Length(1),
            Constraint::Min(0),
            Constraint::Length(1),
        ])
        .areas(inner);
        Line::styled(PROMPT, BASE_STYLE).render(prompt_area, buf);
        state.to_text(text_area.height).render(text_area, buf);
        Line::styled(HINT, HINT_STYLE).render(hint_area, buf);
    }
}

/// Text being edited for one day, along with the key it will be saved
/// under
#[derive(Clone, Debug, Eq, PartialEq)]
pub(crate) struct EditorState {
    key: DateKey,
    year: i32,
    month: Month,
    day: u8,
    text: String,
}

impl EditorState {
    pub(crate) fn new(year: i32, month: Month, day: u8, notes: &[String]) -> EditorState {
        EditorState {
            key: DateKey::new(year, month, day),
            year,
            month,
            day,
            text: notes.join("\n"),
        }
    }

    pub(crate) fn key(&self) -> &DateKey {
        &self.key
    }

    pub(crate) fn text(&self) -> &str {
        &self.text
    }

    fn title(&self) -> String {
        format!(
            "Appointments for {}/{}/{}",
            self.day,
            u8::from(self.month),
            self.year
        )
    }

    /// Returns the last `height` lines of the text, with a cursor cell
    /// after the final character
    fn to_text(&self, height: u16) -> Text<'static> {
        let mut lines = self
            .text
            .split('\n')
            .map(|ln| Line::styled(ln.to_owned(), BASE_STYLE))
            .collect::<Vec<_>>();
        if let Some(last) = lines.last_mut() {
            last.push_span(Span::styled(" ", CURSOR_STYLE));
        }
        let skip = lines.len().saturating_sub(usize::from(height));
        Text::from_iter(lines.into_iter().skip(skip))
    }

    pub(crate) fn handle_input(&mut self, input: EditorInput) -> EditorOutput {
        match input {
            EditorInput::Char(c) if !c.is_control() => {
                self.text.push(c);
                EditorOutput::Ok
            }
            EditorInput::Char(_) => EditorOutput::Invalid,
            EditorInput::Newline => {
                self.text.push('\n');
                EditorOutput::Ok
            }
            EditorInput::Backspace => {
                if self.text.pop().is_some() {
                    EditorOutput::Ok
                } else {
                    EditorOutput::Invalid
                }
            }
            EditorInput::Save => EditorOutput::Save(notes_from_text(&self.text)),
            EditorInput::Cancel => EditorOutput::Cancel,
        }
    }
}

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub(crate) enum EditorInput {
    Char(char),
    Newline,
    Backspace,
    Save,
    Cancel,
}

#[derive(Clone, Debug, Eq, PartialEq)]
pub(crate) enum EditorOutput {
    Ok,
    Invalid,
    Save(Vec<String>),
    Cancel,
}
