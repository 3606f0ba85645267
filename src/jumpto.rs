use crate::theme::{
    jumpto::{READY_ENTER_STYLE, UNFILLED_CELL_STYLE},
    BASE_STYLE,
};
use ratatui::{
    buffer::Buffer,
    layout::{Alignment, Flex, Layout, Margin, Rect},
    text::{Line, Span, Text},
    widgets::{Block, Clear, StatefulWidget, Widget},
};
use time::Month;

const OUTER_WIDTH: u16 = 17;
const OUTER_HEIGHT: u16 = 8;
const ENTER_POS: usize = 6;

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub(crate) struct JumpTo;

impl StatefulWidget for JumpTo {
    type State = JumpToState;

    /*
     * .................
     * .┌─ Jump To… ──┐.
     * .│             │.
     * .│  -YYYY-MM   │.
     * .│             │.
     * .│   [ENTER]   │.
     * .└─────────────┘.
     * .................
     */

    fn render(self, area: Rect, buf: &mut Buffer, state: &mut Self::State) {
        let [outer_area] = Layout::horizontal([OUTER_WIDTH])
            .flex(Flex::Center)
            .areas(area);
        let [outer_area] = Layout::vertical([OUTER_HEIGHT])
            .flex(Flex::Center)
            .areas(outer_area);
        Clear.render(outer_area, buf);
        Block::new().style(BASE_STYLE).render(outer_area, buf);
        let block_area = outer_area.inner(Margin::new(1, 1));
        Block::bordered()
            .title(" Jump To… ")
            .title_alignment(Alignment::Center)
            .render(block_area, buf);
        let text_area = block_area.inner(Margin::new(1, 1));
        state.to_text().render(text_area, buf);
    }
}

#[derive(Clone, Copy, Debug, Default, Eq, PartialEq)]
pub(crate) struct JumpToState {
    negative: bool,
    year: [Option<u8>; 4],
    month: [Option<u8>; 2],
    pos: usize,
}

impl JumpToState {
    pub(crate) fn new() -> JumpToState {
        JumpToState::default()
    }

    fn to_text(self) -> Text<'static> {
        Text::from_iter([
            Line::styled("", BASE_STYLE),
            self.to_line(),
            Line::styled("", BASE_STYLE),
            // Style a span and convert it to a line rather than creating a
            // styled line directly so that only the "[ENTER]" text and not any
            // of its centering padding will be underlined:
            Line::from(Span::styled(
                "[ENTER]",
                if self.pos == ENTER_POS {
                    READY_ENTER_STYLE
                } else {
                    BASE_STYLE
                },
            )),
        ])
        .centered()
    }

    fn to_line(self) -> Line<'static> {
        let mut spans = Vec::new();
        spans.push(Span::styled(
            if self.negative { "-" } else { " " },
            BASE_STYLE,
        ));
        let mut first = true;
        for (fallback, digits) in [("Y", self.year.as_slice()), ("M", self.month.as_slice())] {
            if !std::mem::replace(&mut first, false) {
                spans.push(Span::styled("-", BASE_STYLE));
            }
            for dg in digits {
                spans.push(match dg {
                    Some(d) => Span::styled(format!("{d}"), BASE_STYLE),
                    None => Span::styled(fallback, UNFILLED_CELL_STYLE),
                });
            }
        }
        Line::from_iter(spans)
    }

    fn slot(&mut self, pos: usize) -> Option<&mut Option<u8>> {
        match pos {
            0..4 => self.year.get_mut(pos),
            4..6 => self.month.get_mut(pos - 4),
            _ => None,
        }
    }

    pub(crate) fn handle_input(&mut self, input: JumpToInput) -> JumpToOutput {
        match (input, self.pos) {
            (JumpToInput::Negative, 0) => {
                self.negative = !self.negative;
                JumpToOutput::Ok
            }
            (JumpToInput::Positive, 0) => {
                self.negative = false;
                JumpToOutput::Ok
            }
            (JumpToInput::Digit(d), 0..ENTER_POS) if d < 10 => {
                if let Some(slot) = self.slot(self.pos) {
                    *slot = Some(d);
                }
                self.pos += 1;
                JumpToOutput::Ok
            }
            (JumpToInput::Backspace, 1..) => {
                self.pos -= 1;
                if let Some(slot) = self.slot(self.pos) {
                    *slot = None;
                }
                JumpToOutput::Ok
            }
            (JumpToInput::Enter, ENTER_POS) => {
                let Some(year) = digits_value(&self.year).and_then(|y| i32::try_from(y).ok())
                else {
                    return JumpToOutput::Invalid;
                };
                let Some(month) = digits_value(&self.month)
                    .and_then(|m| u8::try_from(m).ok())
                    .and_then(|m| Month::try_from(m).ok())
                else {
                    return JumpToOutput::Invalid;
                };
                let year = if self.negative { -year } else { year };
                JumpToOutput::Jump { year, month }
            }
            _ => JumpToOutput::Invalid,
        }
    }
}

/// Returns the decimal value of a fully-entered run of digits
fn digits_value(digits: &[Option<u8>]) -> Option<u32> {
    digits
        .iter()
        .try_fold(0u32, |acc, d| Some(acc * 10 + u32::from((*d)?)))
}

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub(crate) enum JumpToInput {
    Negative,
    Positive,
    Digit(u8),
    Backspace,
    Enter,
}

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub(crate) enum JumpToOutput {
    Ok,
    Invalid,
    Jump { year: i32, month: Month },
}

#[cfg(test)]
mod tests {
    use super::*;

    fn feed(state: &mut JumpToState, inputs: &[JumpToInput]) -> JumpToOutput {
        let mut output = JumpToOutput::Ok;
        for &input in inputs {
            output = state.handle_input(input);
        }
        output
    }

    fn digits(s: &str) -> Vec<JumpToInput> {
        s.bytes().map(|b| JumpToInput::Digit(b - b'0')).collect()
    }

    #[test]
    fn test_jump() {
        let mut state = JumpToState::new();
        let mut inputs = digits("202403");
        inputs.push(JumpToInput::Enter);
        assert_eq!(
            feed(&mut state, &inputs),
            JumpToOutput::Jump {
                year: 2024,
                month: Month::March
            }
        );
    }

    #[test]
    fn test_negative_year() {
        let mut state = JumpToState::new();
        let mut inputs = vec![JumpToInput::Negative];
        inputs.extend(digits("004412"));
        inputs.push(JumpToInput::Enter);
        assert_eq!(
            feed(&mut state, &inputs),
            JumpToOutput::Jump {
                year: -44,
                month: Month::December
            }
        );
    }

    #[test]
    fn test_enter_too_early() {
        let mut state = JumpToState::new();
        let mut inputs = digits("2024");
        inputs.push(JumpToInput::Enter);
        assert_eq!(feed(&mut state, &inputs), JumpToOutput::Invalid);
    }

    #[test]
    fn test_invalid_month() {
        let mut state = JumpToState::new();
        let mut inputs = digits("202413");
        inputs.push(JumpToInput::Enter);
        assert_eq!(feed(&mut state, &inputs), JumpToOutput::Invalid);
        let mut state = JumpToState::new();
        let mut inputs = digits("202400");
        inputs.push(JumpToInput::Enter);
        assert_eq!(feed(&mut state, &inputs), JumpToOutput::Invalid);
    }

    #[test]
    fn test_backspace() {
        let mut state = JumpToState::new();
        let mut inputs = digits("20249");
        inputs.push(JumpToInput::Backspace);
        inputs.extend(digits("11"));
        inputs.push(JumpToInput::Enter);
        assert_eq!(
            feed(&mut state, &inputs),
            JumpToOutput::Jump {
                year: 2024,
                month: Month::November
            }
        );
    }

    #[test]
    fn test_backspace_at_start() {
        let mut state = JumpToState::new();
        assert_eq!(state.handle_input(JumpToInput::Backspace), JumpToOutput::Invalid);
    }

    #[test]
    fn test_sign_only_at_start() {
        let mut state = JumpToState::new();
        state.handle_input(JumpToInput::Digit(2));
        assert_eq!(state.handle_input(JumpToInput::Negative), JumpToOutput::Invalid);
    }

    #[test]
    fn test_too_many_digits() {
        let mut state = JumpToState::new();
        feed(&mut state, &digits("202401"));
        assert_eq!(state.handle_input(JumpToInput::Digit(5)), JumpToOutput::Invalid);
    }

    #[test]
    fn test_render() {
        let mut state = JumpToState::new();
        feed(&mut state, &digits("2024"));
        let area = Rect::new(0, 0, 17, 8);
        let mut buffer = Buffer::empty(area);
        JumpTo.render(area, &mut buffer, &mut state);
        let lines = (0..8u16)
            .map(|y| {
                (0..17u16)
                    .map(|x| buffer[(x, y)].symbol().to_owned())
                    .collect::<String>()
            })
            .collect::<Vec<_>>();
        assert_eq!(lines[3], " │   2024-MM   │ ");
        assert_eq!(lines[5], " │   [ENTER]   │ ");
    }
}
