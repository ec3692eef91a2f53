use chrono::{DateTime, FixedOffset, Local};

fn currency_symbol(code: &str) -> String {
    match code.to_uppercase().as_str() {
        "BRL" => "R$".to_string(),
        "USD" => "$".to_string(),
        "EUR" => "€".to_string(),
        "GBP" => "£".to_string(),
        other => format!("{other} "),
    }
}

/// Format a float as money with thousands separators: R$1,234.56
pub fn money(val: f64, currency: &str) -> String {
    let symbol = currency_symbol(currency);
    let negative = val < 0.0;
    let cents = format!("{:.2}", val.abs());
    let (int_part, dec_part) = cents.split_once('.').unwrap_or((cents.as_str(), "00"));

    let mut with_commas = String::new();
    for (i, c) in int_part.chars().rev().enumerate() {
        if i > 0 && i % 3 == 0 {
            with_commas.push(',');
        }
        with_commas.push(c);
    }
    let with_commas: String = with_commas.chars().rev().collect();

    if negative {
        format!("-{symbol}{with_commas}.{dec_part}")
    } else {
        format!("{symbol}{with_commas}.{dec_part}")
    }
}

/// Stored timestamps shown in local time; unreadable ones are shown as-is.
pub fn local_date(parsed: Option<DateTime<FixedOffset>>, raw: &str) -> String {
    match parsed {
        Some(d) => d.with_timezone(&Local).format("%Y-%m-%d %H:%M").to_string(),
        None => raw.to_string(),
    }
}

pub fn format_bytes(bytes: u64) -> String {
    const UNITS: [&str; 4] = ["B", "KB", "MB", "GB"];
    let mut size = bytes as f64;
    let mut unit = 0;
    while size >= 1024.0 && unit < UNITS.len() - 1 {
        size /= 1024.0;
        unit += 1;
    }
    if unit == 0 {
        format!("{bytes} B")
    } else {
        format!("{size:.1} {}", UNITS[unit])
    }
}

/// Horizontal bar for a percentage, `width` cells at 100%.
pub fn share_bar(pct: f64, width: usize) -> String {
    let filled = ((pct.clamp(0.0, 100.0) / 100.0) * width as f64).round() as usize;
    "█".repeat(filled)
}
