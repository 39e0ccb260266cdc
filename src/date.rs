use chrono::NaiveDate;

/// Abbreviated weekday, unpadded day of month, abbreviated month: `Mon 3 Jun`.
///
/// chrono's names are English and do not depend on the process locale.
pub const DATE_LINE_FORMAT: &str = "%a %-d %b";

/// Render the date line for a UTC calendar date.
///
/// The date always follows UTC, never a zone offset: a zone that has already
/// rolled over to the next day still shows the UTC date.
pub fn format_date_line(date: NaiveDate) -> String {
    date.format(DATE_LINE_FORMAT).to_string()
}
