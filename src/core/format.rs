//! Number presentation shared by the response layer.
//!
//! Rounding follows the browser conventions the calculators were built
//! against. Currency strings use Indian digit grouping with at most two
//! fraction digits.

/// `Math.round`: nearest integer, halves toward positive infinity.
pub fn round_half_up(value: f64) -> f64 {
    let floor = value.floor();
    if value - floor >= 0.5 { floor + 1.0 } else { floor }
}

/// `toFixed` rounding: halves go away from zero on either side.
pub fn round_to(value: f64, digits: u32) -> f64 {
    let scale = 10_f64.powi(digits as i32);
    let rounded = round_half_up(value.abs() * scale) / scale;
    if value < 0.0 && rounded != 0.0 {
        -rounded
    } else {
        rounded
    }
}

pub fn to_fixed(value: f64, digits: u32) -> String {
    format!("{:.*}", digits as usize, round_to(value, digits))
}

/// en-IN grouping without a currency symbol, e.g. `12,34,567.8`.
pub fn format_inr(value: f64) -> String {
    if !value.is_finite() {
        return value.to_string();
    }

    let paise = (value.abs() * 100.0).round();
    let whole = (paise / 100.0).trunc();
    let fraction = (paise - whole * 100.0) as u32;

    let mut out = String::new();
    if value < 0.0 && paise > 0.0 {
        out.push('-');
    }
    out.push_str(&group_indian(&format!("{whole:.0}")));
    if fraction > 0 {
        let digits = format!("{fraction:02}");
        out.push('.');
        out.push_str(digits.trim_end_matches('0'));
    }
    out
}

fn group_indian(digits: &str) -> String {
    if digits.len() <= 3 {
        return digits.to_string();
    }

    let (head, tail) = digits.split_at(digits.len() - 3);
    let mut groups: Vec<&str> = Vec::new();
    let mut end = head.len();
    while end > 0 {
        let start = end.saturating_sub(2);
        groups.push(&head[start..end]);
        end = start;
    }
    groups.reverse();

    let mut out = groups.join(",");
    out.push(',');
    out.push_str(tail);
    out
}
