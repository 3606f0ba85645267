use super::grid::MonthGrid;
use super::util::DayCell;
use crate::appointments::AppointmentStore;
use crate::theme::{
    APPOINTMENT_STYLE, BASE_STYLE, NO_NOTES_STYLE, PREVIEW_KEY_STYLE, SELECTED_STYLE, TITLE_STYLE,
    WEEKDAY_STYLE,
};
use ratatui::prelude::*;
use time::Date;

static HEADER: &str = " Su  Mo  Tu  We  Th  Fr  Sa ";

/// Number of columns per day of week
const DAY_WIDTH: u16 = 4;

/// Width of the grid in columns
const GRID_WIDTH: u16 = DAY_WIDTH * 7;

/// Number of lines taken up by the title, the weekday header, and its rule
const HEADER_LINES: u16 = 3;

const ACS_HLINE: char = '─';

/// A single month laid out as a seven-column grid, followed by the notes for
/// the selected day
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub(crate) struct MonthView<'a> {
    grid: &'a MonthGrid,
    store: &'a AppointmentStore,
    selected: u8,
    today: Date,
}

impl<'a> MonthView<'a> {
    pub(crate) fn new(
        grid: &'a MonthGrid,
        store: &'a AppointmentStore,
        selected: u8,
        today: Date,
    ) -> MonthView<'a> {
        MonthView {
            grid,
            store,
            selected,
            today,
        }
    }

    fn cell(&self, day: u8) -> DayCell {
        let style = if self.store.has_appointments(&self.grid.date_key(day)) {
            APPOINTMENT_STYLE
        } else {
            BASE_STYLE
        };
        let style = if day == self.selected {
            style.patch(SELECTED_STYLE)
        } else {
            style
        };
        DayCell {
            day,
            style,
            is_today: self.today.year() == self.grid.year()
                && self.today.month() == self.grid.month()
                && self.today.day() == day,
        }
    }
}

impl Widget for MonthView<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let left = area.width.saturating_sub(GRID_WIDTH) / 2;
        let area = Rect {
            x: area.x + left,
            y: area.y,
            width: area.width - left,
            height: area.height,
        };
        let mut canvas = BufferCanvas::new(area, buf);
        canvas.draw_title(self.grid);
        canvas.draw_header();
        for day in 1..=self.grid.days() {
            if let Some((row, col)) = self.grid.position(day) {
                canvas.draw_day(row, col, self.cell(day).show());
            }
        }
        let rows = u16::try_from(self.grid.weeks().len()).unwrap_or(u16::MAX);
        let mut y = HEADER_LINES.saturating_add(rows).saturating_add(1);
        let key = self.grid.date_key(self.selected);
        canvas.mvprint(y, 0, key.as_str(), PREVIEW_KEY_STYLE);
        let notes = self.store.get(&key);
        if notes.is_empty() {
            canvas.mvprint(y.saturating_add(1), 0, "No appointments", NO_NOTES_STYLE);
        }
        for note in notes {
            y = y.saturating_add(1);
            if y >= area.height {
                break;
            }
            canvas.mvprint(y, 0, format!("- {note}"), BASE_STYLE);
        }
    }
}

#[derive(Debug, Eq, PartialEq)]
struct BufferCanvas<'a> {
    area: Rect,
    buf: &'a mut Buffer,
}

impl<'a> BufferCanvas<'a> {
    fn new(area: Rect, buf: &'a mut Buffer) -> Self {
        Self { area, buf }
    }

    fn draw_title(&mut self, grid: &MonthGrid) {
        let title = format!("{} {}", grid.month(), grid.year());
        let width = u16::try_from(title.chars().count()).unwrap_or(u16::MAX);
        self.mvprint(0, GRID_WIDTH.saturating_sub(width) / 2, title, TITLE_STYLE);
    }

    fn draw_header(&mut self) {
        self.mvprint(1, 0, HEADER, WEEKDAY_STYLE);
        self.hline(2, 0, ACS_HLINE, GRID_WIDTH);
    }

    fn draw_day(&mut self, row: usize, col: usize, s: Span<'_>) {
        let y = u16::try_from(row).unwrap_or(u16::MAX).saturating_add(HEADER_LINES);
        let x = u16::try_from(col).unwrap_or(u16::MAX).saturating_mul(DAY_WIDTH);
        self.mvprint(y, x, s.content, s.style);
    }

    fn mvprint<S: AsRef<str>>(&mut self, y: u16, x: u16, s: S, style: Style) {
        if y < self.area.height && x < self.area.width {
            self.buf.set_stringn(
                x + self.area.x,
                y + self.area.y,
                s,
                usize::from(self.area.width - x),
                style,
            );
        }
    }

    fn hline(&mut self, y: u16, x: u16, ch: char, length: u16) {
        self.mvprint(y, x, String::from(ch).repeat(length.into()), BASE_STYLE);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::appointments::DateKey;
    use time::{macros::date, Month};

    fn render(view: MonthView<'_>, width: u16, height: u16) -> Buffer {
        let area = Rect::new(0, 0, width, height);
        let mut buffer = Buffer::empty(area);
        buffer.set_style(area, BASE_STYLE);
        view.render(area, &mut buffer);
        buffer
    }

    #[test]
    fn test_render_january_2024() {
        let grid = MonthGrid::new(2024, Month::January).unwrap();
        let store = AppointmentStore::new();
        let view = MonthView::new(&grid, &store, 15, date!(2025 - 03 - 01));
        let buffer = render(view, 32, 12);
        let mut expected = Buffer::with_lines([
            "          January 2024          ",
            "   Su  Mo  Tu  We  Th  Fr  Sa   ",
            "  ────────────────────────────  ",
            "        1   2   3   4   5   6   ",
            "    7   8   9  10  11  12  13   ",
            "   14  15  16  17  18  19  20   ",
            "   21  22  23  24  25  26  27   ",
            "   28  29  30  31               ",
            "                                ",
            "  2024-01-15                    ",
            "  No appointments               ",
            "                                ",
        ]);
        expected.set_style(*expected.area(), BASE_STYLE);
        expected.set_style(Rect::new(10, 0, 12, 1), TITLE_STYLE);
        expected.set_style(Rect::new(2, 1, 28, 1), WEEKDAY_STYLE);
        expected.set_style(Rect::new(6, 5, 4, 1), SELECTED_STYLE);
        expected.set_style(Rect::new(2, 9, 10, 1), PREVIEW_KEY_STYLE);
        expected.set_style(Rect::new(2, 10, 15, 1), NO_NOTES_STYLE);
        assert_eq!(buffer, expected);
    }

    #[test]
    fn test_render_appointments_and_today() {
        let grid = MonthGrid::new(2024, Month::January).unwrap();
        let mut store = AppointmentStore::new();
        store.save(DateKey::new(2024, Month::January, 3), &["Standup"]);
        store.save(DateKey::new(2024, Month::January, 15), &["Dentist", "Lunch"]);
        let view = MonthView::new(&grid, &store, 15, date!(2024 - 01 - 22));
        let buffer = render(view, 32, 13);
        let mut expected = Buffer::with_lines([
            "          January 2024          ",
            "   Su  Mo  Tu  We  Th  Fr  Sa   ",
            "  ────────────────────────────  ",
            "        1   2   3   4   5   6   ",
            "    7   8   9  10  11  12  13   ",
            "   14  15  16  17  18  19  20   ",
            "   21 [22] 23  24  25  26  27   ",
            "   28  29  30  31               ",
            "                                ",
            "  2024-01-15                    ",
            "  - Dentist                     ",
            "  - Lunch                       ",
            "                                ",
        ]);
        expected.set_style(*expected.area(), BASE_STYLE);
        expected.set_style(Rect::new(10, 0, 12, 1), TITLE_STYLE);
        expected.set_style(Rect::new(2, 1, 28, 1), WEEKDAY_STYLE);
        expected.set_style(Rect::new(14, 3, 4, 1), APPOINTMENT_STYLE);
        expected.set_style(Rect::new(6, 5, 4, 1), APPOINTMENT_STYLE.patch(SELECTED_STYLE));
        expected.set_style(Rect::new(2, 9, 10, 1), PREVIEW_KEY_STYLE);
        assert_eq!(buffer, expected);
    }

    #[test]
    fn test_render_more_notes_than_rows() {
        let grid = MonthGrid::new(2024, Month::January).unwrap();
        let mut store = AppointmentStore::new();
        store.save(DateKey::new(2024, Month::January, 15), &vec!["x"; 70_000]);
        let view = MonthView::new(&grid, &store, 15, date!(2025 - 03 - 01));
        let buffer = render(view, 32, 12);
        for y in [10u16, 11] {
            let row = (0..32u16)
                .map(|x| buffer[(x, y)].symbol().to_owned())
                .collect::<String>();
            assert_eq!(row, "  - x                           ", "row {y}");
        }
    }

    #[test]
    fn test_render_narrow_area_clips() {
        let grid = MonthGrid::new(2024, Month::January).unwrap();
        let store = AppointmentStore::new();
        let view = MonthView::new(&grid, &store, 1, date!(2025 - 03 - 01));
        let buffer = render(view, 10, 4);
        let expected = ["        Ja", " Su  Mo  T", "──────────", "      1   "];
        for (y, line) in std::iter::zip(0u16.., expected) {
            let row = (0..10u16)
                .map(|x| buffer[(x, y)].symbol().to_owned())
                .collect::<String>();
            assert_eq!(row, line, "row {y}");
        }
    }
}
