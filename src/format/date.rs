//! French date formatting.

use time::{Date, Month, OffsetDateTime};

/// Abbreviated month name as written in French dates, e.g. "15 oct.".
fn short_month_name(month: Month) -> &'static str {
    match month {
        Month::January => "janv.",
        Month::February => "févr.",
        Month::March => "mars",
        Month::April => "avr.",
        Month::May => "mai",
        Month::June => "juin",
        Month::July => "juil.",
        Month::August => "août",
        Month::September => "sept.",
        Month::October => "oct.",
        Month::November => "nov.",
        Month::December => "déc.",
    }
}

fn month_name(month: Month) -> &'static str {
    match month {
        Month::January => "janvier",
        Month::February => "février",
        Month::March => "mars",
        Month::April => "avril",
        Month::May => "mai",
        Month::June => "juin",
        Month::July => "juillet",
        Month::August => "août",
        Month::September => "septembre",
        Month::October => "octobre",
        Month::November => "novembre",
        Month::December => "décembre",
    }
}

/// Format `date` as "dd/MM/yyyy".
pub fn format_date(date: Date) -> String {
    format!(
        "{:02}/{:02}/{}",
        date.day(),
        u8::from(date.month()),
        date.year()
    )
}

/// Format `date` as two-digit day and abbreviated month, e.g. "05 oct.".
pub fn format_day_month(date: Date) -> String {
    format!("{:02} {}", date.day(), short_month_name(date.month()))
}

/// Format the month of `date` with its year, e.g. "octobre 2024".
pub fn format_month_year(date: Date) -> String {
    format!("{} {}", month_name(date.month()), date.year())
}

/// Describe `date` relative to `today`.
///
/// The last week reads "Aujourd'hui", "Hier" or "Il y a N jours". Older
/// dates in the current year show the day and month, anything else the
/// full date.
pub fn format_relative_date(date: Date, today: Date) -> String {
    let days_ago = (today - date).whole_days();

    match days_ago {
        0 => "Aujourd'hui".to_owned(),
        1 => "Hier".to_owned(),
        2..=6 => format!("Il y a {days_ago} jours"),
        _ if date.year() == today.year() => format_day_month(date),
        _ => format_date(date),
    }
}

/// Describe how long ago `then` was, e.g. "il y a 3 heures".
///
/// Months are counted as 30 days and years as 12 months.
pub fn format_time_ago(then: OffsetDateTime, now: OffsetDateTime) -> String {
    let plural = |count: i64| if count > 1 { "s" } else { "" };

    let seconds = (now - then).whole_seconds();
    if seconds < 60 {
        return "il y a quelques secondes".to_owned();
    }

    let minutes = seconds / 60;
    if minutes < 60 {
        return format!("il y a {minutes} minute{}", plural(minutes));
    }

    let hours = minutes / 60;
    if hours < 24 {
        return format!("il y a {hours} heure{}", plural(hours));
    }

    let days = hours / 24;
    if days < 30 {
        return format!("il y a {days} jour{}", plural(days));
    }

    let months = days / 30;
    if months < 12 {
        return format!("il y a {months} mois");
    }

    let years = months / 12;
    format!("il y a {years} an{}", plural(years))
}
