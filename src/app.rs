use crate::appointments::AppointmentStore;
use crate::calendar::{GridError, MonthGrid, MonthView};
use crate::editor::{Editor, EditorInput, EditorOutput, EditorState};
use crate::help::Help;
use crate::jumpto::{JumpTo, JumpToInput, JumpToOutput, JumpToState};
use crate::theme::BASE_STYLE;
use crossterm::event::{read, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers};
use ratatui::{
    backend::Backend,
    buffer::Buffer,
    layout::Rect,
    widgets::{StatefulWidget, Widget},
    Terminal,
};
use std::io::{self, Write};
use std::ops::RangeInclusive;
use time::{Date, Month};

#[derive(Clone, Debug, Eq, PartialEq)]
pub(crate) struct App {
    today: Date,
    grid: MonthGrid,
    selected: u8,
    years: RangeInclusive<i32>,
    store: AppointmentStore,
    state: AppState,
}

impl App {
    /// Creates an app showing the month of `start` with that day selected.
    /// Navigation is limited to `year_span` years either side of today's
    /// year, widened to cover `year_span` years around `start` when it lies
    /// outside that window.
    pub(crate) fn new(
        today: Date,
        start: Date,
        year_span: u16,
        store: AppointmentStore,
    ) -> Result<App, GridError> {
        let grid = MonthGrid::new(start.year(), start.month())?;
        let span = i32::from(year_span);
        let low = today.year().min(start.year()).saturating_sub(span);
        let high = today.year().max(start.year()).saturating_add(span);
        Ok(App {
            today,
            grid,
            selected: start.day(),
            years: low..=high,
            store,
            state: AppState::Calendar,
        })
    }

    pub(crate) fn run<B: Backend>(mut self, terminal: &mut Terminal<B>) -> io::Result<()> {
        while !self.quitting() {
            self.draw(terminal)?;
            self.handle_input()?;
        }
        Ok(())
    }

    fn draw<B: Backend>(&mut self, terminal: &mut Terminal<B>) -> io::Result<()> {
        terminal.draw(|frame| frame.render_widget(self, frame.area()))?;
        Ok(())
    }

    fn handle_input(&mut self) -> io::Result<()> {
        if let Event::Key(KeyEvent {
            code,
            modifiers,
            kind: KeyEventKind::Press,
            ..
        }) = read()?
        {
            if !self.handle_event(code, modifiers) {
                self.beep()?;
            }
        }
        // else: Redraw on resize, and we might as well redraw on other stuff
        // too
        Ok(())
    }

    // Returns `false` if the user pressed an invalid key
    fn handle_event(&mut self, code: KeyCode, modifiers: KeyModifiers) -> bool {
        let normal_modifiers = KeyModifiers::NONE | KeyModifiers::SHIFT;
        if modifiers == KeyModifiers::CONTROL {
            match code {
                KeyCode::Char('c') => {
                    self.state = AppState::Quitting;
                    true
                }
                KeyCode::Char('s') if matches!(self.state, AppState::Editing(_)) => {
                    self.handle_key(KeyCode::F(2))
                }
                _ => false,
            }
        } else {
            normal_modifiers.contains(modifiers) && self.handle_key(code)
        }
    }

    // Returns `false` if the user pressed an invalid key
    fn handle_key(&mut self, key: KeyCode) -> bool {
        match &mut self.state {
            AppState::Calendar => match key {
                KeyCode::Char('h') | KeyCode::Left => self.move_day(-1),
                KeyCode::Char('l') | KeyCode::Right => self.move_day(1),
                KeyCode::Char('k') | KeyCode::Up => self.move_day(-7),
                KeyCode::Char('j') | KeyCode::Down => self.move_day(7),
                KeyCode::Char('p') | KeyCode::PageUp => self.previous_month(),
                KeyCode::Char('n') | KeyCode::PageDown => self.next_month(),
                KeyCode::Char('P') => self.previous_year(),
                KeyCode::Char('N') => self.next_year(),
                KeyCode::Char('t') | KeyCode::Home => self.jump_to_today(),
                KeyCode::Char('e') | KeyCode::Enter => {
                    self.open_editor();
                    true
                }
                KeyCode::Char('g') => {
                    self.state = AppState::Jumping(JumpToState::new());
                    true
                }
                KeyCode::Char('q') | KeyCode::Esc => {
                    self.state = AppState::Quitting;
                    true
                }
                KeyCode::Char('?') => {
                    self.state = AppState::Helping;
                    true
                }
                _ => false,
            },
            AppState::Helping => {
                self.state = AppState::Calendar;
                true
            }
            AppState::Jumping(state) => {
                if matches!(key, KeyCode::Char('q' | 'g') | KeyCode::Esc) {
                    self.state = AppState::Calendar;
                    true
                } else {
                    let output = match key {
                        KeyCode::Char('-') => state.handle_input(JumpToInput::Negative),
                        KeyCode::Char('+') => state.handle_input(JumpToInput::Positive),
                        KeyCode::Char(c @ '0'..='9') => {
                            let d = c.to_digit(10).and_then(|d| u8::try_from(d).ok());
                            match d {
                                Some(d) => state.handle_input(JumpToInput::Digit(d)),
                                None => JumpToOutput::Invalid,
                            }
                        }
                        KeyCode::Backspace | KeyCode::Delete => {
                            state.handle_input(JumpToInput::Backspace)
                        }
                        KeyCode::Enter => state.handle_input(JumpToInput::Enter),
                        _ => JumpToOutput::Invalid,
                    };
                    match output {
                        JumpToOutput::Ok => true,
                        JumpToOutput::Invalid => false,
                        JumpToOutput::Jump { year, month } => {
                            if self.set_month(year, month) {
                                self.state = AppState::Calendar;
                                true
                            } else {
                                false
                            }
                        }
                    }
                }
            }
            AppState::Editing(state) => {
                let output = match key {
                    KeyCode::Char(c) => state.handle_input(EditorInput::Char(c)),
                    KeyCode::Enter => state.handle_input(EditorInput::Newline),
                    KeyCode::Backspace => state.handle_input(EditorInput::Backspace),
                    KeyCode::F(2) => state.handle_input(EditorInput::Save),
                    KeyCode::Esc => state.handle_input(EditorInput::Cancel),
                    _ => EditorOutput::Invalid,
                };
                match output {
                    EditorOutput::Ok => true,
                    EditorOutput::Invalid => false,
                    EditorOutput::Save(notes) => {
                        let key = state.key().clone();
                        log::info!("Saving {} appointment(s) for {key}", notes.len());
                        self.store.save(key, &notes);
                        self.state = AppState::Calendar;
                        true
                    }
                    EditorOutput::Cancel => {
                        log::debug!(
                            "Discarded {} byte(s) of edits for {}",
                            state.text().len(),
                            state.key()
                        );
                        self.state = AppState::Calendar;
                        true
                    }
                }
            }
            AppState::Quitting => false,
        }
    }

    fn beep(&self) -> io::Result<()> {
        io::stdout().write_all(b"\x07")
    }

    fn quitting(&self) -> bool {
        self.state == AppState::Quitting
    }

    fn move_day(&mut self, delta: i16) -> bool {
        match u8::try_from(i16::from(self.selected) + delta) {
            Ok(day) if self.grid.contains(day) => {
                self.selected = day;
                true
            }
            _ => false,
        }
    }

    // Returns `false` if the month is outside the navigable years
    fn set_month(&mut self, year: i32, month: Month) -> bool {
        if !self.years.contains(&year) {
            log::debug!("Refusing to navigate to {month} {year}: outside {:?}", self.years);
            return false;
        }
        match MonthGrid::new(year, month) {
            Ok(grid) => {
                log::debug!("Showing {month} {year}");
                self.selected = self.selected.min(grid.days());
                self.grid = grid;
                true
            }
            Err(e) => {
                log::error!("Failed to lay out {month} {year}: {e}");
                false
            }
        }
    }

    fn previous_month(&mut self) -> bool {
        let (year, month) = (self.grid.year(), self.grid.month());
        if month == Month::January {
            year.checked_sub(1)
                .is_some_and(|y| self.set_month(y, Month::December))
        } else {
            self.set_month(year, month.previous())
        }
    }

    fn next_month(&mut self) -> bool {
        let (year, month) = (self.grid.year(), self.grid.month());
        if month == Month::December {
            year.checked_add(1)
                .is_some_and(|y| self.set_month(y, Month::January))
        } else {
            self.set_month(year, month.next())
        }
    }

    fn previous_year(&mut self) -> bool {
        let month = self.grid.month();
        self.grid
            .year()
            .checked_sub(1)
            .is_some_and(|y| self.set_month(y, month))
    }

    fn next_year(&mut self) -> bool {
        let month = self.grid.month();
        self.grid
            .year()
            .checked_add(1)
            .is_some_and(|y| self.set_month(y, month))
    }

    fn jump_to_today(&mut self) -> bool {
        if self.set_month(self.today.year(), self.today.month()) {
            self.selected = self.today.day();
            true
        } else {
            false
        }
    }

    fn open_editor(&mut self) {
        let notes = self.store.get(&self.grid.date_key(self.selected));
        let state = EditorState::new(self.grid.year(), self.grid.month(), self.selected, &notes);
        log::debug!("Editing appointments for {}", state.key());
        self.state = AppState::Editing(state);
    }
}

impl Widget for &mut App {
    fn render(self, area: Rect, buf: &mut Buffer) {
        buf.set_style(area, BASE_STYLE);
        MonthView::new(&self.grid, &self.store, self.selected, self.today).render(area, buf);
        match self.state {
            AppState::Helping => Help.render(area, buf),
            AppState::Jumping(ref mut state) => JumpTo.render(area, buf, state),
            AppState::Editing(ref mut state) => Editor.render(area, buf, state),
            AppState::Calendar | AppState::Quitting => (),
        }
    }
}

#[derive(Clone, Debug, Eq, PartialEq)]
enum AppState {
    Calendar,
    Helping,
    Jumping(JumpToState),
    Editing(EditorState),
    Quitting,
}
