use time::Month;

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub(crate) struct Holiday {
    pub(crate) month: Month,
    pub(crate) day: u8,
    pub(crate) name: &'static str,
}

/// Fixed-date Brazilian national holidays.  Moveable feasts (Carnaval, Good
/// Friday, Corpus Christi) are not listed.
pub(crate) static HOLIDAYS: &[Holiday] = &[
    Holiday {
        month: Month::January,
        day: 1,
        name: "Confraternização Universal",
    },
    Holiday {
        month: Month::April,
        day: 21,
        name: "Tiradentes",
    },
    Holiday {
        month: Month::May,
        day: 1,
        name: "Dia do Trabalho",
    },
    Holiday {
        month: Month::September,
        day: 7,
        name: "Independência do Brasil",
    },
    Holiday {
        month: Month::October,
        day: 12,
        name: "Nossa Senhora Aparecida",
    },
    Holiday {
        month: Month::November,
        day: 2,
        name: "Finados",
    },
    Holiday {
        month: Month::November,
        day: 15,
        name: "Proclamação da República",
    },
    Holiday {
        month: Month::December,
        day: 25,
        name: "Natal",
    },
];

pub(crate) fn holiday_on(month: Month, day: u8) -> Option<&'static str> {
    HOLIDAYS
        .iter()
        .find(|h| h.month == month && h.day == day)
        .map(|h| h.name)
}
