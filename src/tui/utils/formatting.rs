//! Display formatting for the account views (fr-FR conventions, MAD currency)

use chrono::{DateTime, Local, NaiveDate, Utc};

use crate::account::AccountType;

/// Label shown when an account has no type
pub const UNDEFINED_TYPE_LABEL: &str = "Non defini";

/// Group thousands with a space and use a decimal comma, e.g. `1 234,56`
pub fn format_number_fr(value: f64) -> String {
    let value = if value.is_finite() { value } else { 0.0 };
    let cents = (value.abs() * 100.0).round() as u64;
    let units = (cents / 100).to_string();
    let fraction = cents % 100;

    let mut grouped = String::with_capacity(units.len() + units.len() / 3);
    for (i, digit) in units.chars().enumerate() {
        if i > 0 && (units.len() - i) % 3 == 0 {
            grouped.push(' ');
        }
        grouped.push(digit);
    }

    let sign = if value < 0.0 && cents > 0 { "-" } else { "" };
    format!("{}{},{:02}", sign, grouped, fraction)
}

/// Format a balance, e.g. `1 234,56 MAD`
pub fn format_mad(value: f64) -> String {
    format!("{} MAD", format_number_fr(value))
}

/// Short French date, e.g. `05/01/2024`
pub fn format_date_fr(date: NaiveDate) -> String {
    date.format("%d/%m/%Y").to_string()
}

pub fn format_optional_date(date: Option<NaiveDate>) -> String {
    date.map(format_date_fr).unwrap_or_else(|| "-".to_string())
}

/// Last refresh time in local time, or "En attente" before the first load
pub fn format_last_update(timestamp: Option<DateTime<Utc>>) -> String {
    match timestamp {
        Some(ts) => ts.with_timezone(&Local).format("%d/%m/%Y %H:%M").to_string(),
        None => "En attente".to_string(),
    }
}

pub fn format_account_type(kind: Option<AccountType>) -> &'static str {
    kind.map(|k| k.as_str()).unwrap_or(UNDEFINED_TYPE_LABEL)
}

/// "1 compte" / "N comptes"
pub fn format_account_count(count: usize) -> String {
    if count == 1 {
        "1 compte".to_string()
    } else {
        format!("{} comptes", count)
    }
}
