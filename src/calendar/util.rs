use ratatui::{style::Style, text::Span};
use time::Weekday;

pub(super) trait WeekdayExt {
    fn index0(&self) -> u8;
}

impl WeekdayExt for Weekday {
    fn index0(&self) -> u8 {
        self.number_days_from_sunday()
    }
}

/// A day of the displayed month together with how it should be drawn
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub(super) struct DayCell {
    pub(super) day: u8,
    pub(super) style: Style,
    pub(super) is_today: bool,
}

impl DayCell {
    pub(super) fn show(&self) -> Span<'static> {
        let s = if self.is_today {
            format!("[{:2}]", self.day)
        } else {
            format!(" {:2} ", self.day)
        };
        Span::styled(s, self.style)
    }
}
