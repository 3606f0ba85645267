mod grid;
mod util;
mod widget;
pub(crate) use self::grid::{GridError, MonthGrid};
pub(crate) use self::widget::MonthView;
