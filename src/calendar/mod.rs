mod grid;
mod period;
mod widget;
pub(crate) use self::grid::{render_month, MonthGrid};
pub(crate) use self::period::{PeriodError, YearMonth, YearWindow};
pub(crate) use self::widget::MonthView;
use time::Month;

pub(crate) fn month_name(month: Month) -> &'static str {
    match month {
        Month::January => "Janeiro",
        Month::February => "Fevereiro",
        Month::March => "Março",
        Month::April => "Abril",
        Month::May => "Maio",
        Month::June => "Junho",
        Month::July => "Julho",
        Month::August => "Agosto",
        Month::September => "Setembro",
        Month::October => "Outubro",
        Month::November => "Novembro",
        Month::December => "Dezembro",
    }
}
