// src/duration.rs
//
// Free-text duration parsing. Operators type effort in mixed human and
// short-unit conventions ("8", "1.5h", "2小时30分", "30min"), so this
// favors recall over strict grammar: extract whatever time values the
// text carries, sum them, and degrade to 0 when nothing matches.
// Never errors; 0 doubles as "no data".

const HOUR_MARKERS: &[&str] = &["hours", "hour", "h", "小时", "时"];
const MINUTE_MARKERS: &[&str] = &["minutes", "minute", "mins", "min", "m", "分钟", "分"];

/// Parse a duration expression into fractional hours. `"2h30m"` → 2.5,
/// `"30分钟"` → 0.5, bare numbers are hours, garbage is 0.
pub fn parse(text: &str) -> f64 {
    let t = text.trim();
    if t.is_empty() {
        return 0.0;
    }
    // Fast path: a plain numeric cell is already hours.
    if is_bare_number(t) {
        return t.parse::<f64>().unwrap_or(0.0);
    }
    scan(t)
}

/// One left-to-right pass: each numeric token pairs with the longest
/// unit marker following it (whitespace allowed in between) and both are
/// consumed, so compound forms like "2h30m" count exactly once. Numbers
/// without a unit contribute nothing here. A string may carry several
/// values of the same unit; all of them sum.
fn scan(text: &str) -> f64 {
    let chars: Vec<char> = text.chars().collect();
    let mut total = 0.0f64;
    let mut i = 0usize;

    while i < chars.len() {
        if !chars[i].is_ascii_digit() {
            i += 1;
            continue;
        }

        let start = i;
        while i < chars.len() && chars[i].is_ascii_digit() {
            i += 1;
        }
        if i + 1 < chars.len() && chars[i] == '.' && chars[i + 1].is_ascii_digit() {
            i += 1;
            while i < chars.len() && chars[i].is_ascii_digit() {
                i += 1;
            }
        }
        let num: f64 = chars[start..i]
            .iter()
            .collect::<String>()
            .parse()
            .unwrap_or(0.0);

        let mut j = i;
        while j < chars.len() && chars[j].is_whitespace() {
            j += 1;
        }
        if let Some((len, minutes)) = match_marker(&chars[j..]) {
            total += if minutes { num / 60.0 } else { num };
            i = j + len;
        }
    }

    total
}

/// Longest marker at the head of `rest`, if any. Longest-first keeps
/// "30min" in minutes instead of stopping at the bare "m", and "2小时"
/// on "小时" instead of "时".
fn match_marker(rest: &[char]) -> Option<(usize, bool)> {
    let mut best: Option<(usize, bool)> = None;
    for (markers, minutes) in [(HOUR_MARKERS, false), (MINUTE_MARKERS, true)] {
        for m in markers {
            let mc: Vec<char> = m.chars().collect();
            let hit = rest.len() >= mc.len()
                && rest[..mc.len()]
                    .iter()
                    .zip(&mc)
                    .all(|(a, b)| a.eq_ignore_ascii_case(b));
            if hit {
                match best {
                    Some((l, _)) if l >= mc.len() => {}
                    _ => best = Some((mc.len(), minutes)),
                }
            }
        }
    }
    best
}

/// Strictly `digits`, optionally `.digits` — the same shape the source
/// page renders for plain numeric cells.
fn is_bare_number(t: &str) -> bool {
    let b = t.as_bytes();
    if b.is_empty() || !b[0].is_ascii_digit() {
        return false;
    }
    let mut seen_dot = false;
    for (i, &c) in b.iter().enumerate() {
        match c {
            b'0'..=b'9' => {}
            b'.' if !seen_dot && i + 1 < b.len() && b[i + 1].is_ascii_digit() => seen_dot = true,
            _ => return false,
        }
    }
    true
}

#[cfg(test)]
mod tests {
    use super::*;

    fn close(a: f64, b: f64) -> bool {
        (a - b).abs() < 1e-9
    }

    #[test]
    fn bare_numbers_are_hours() {
        assert!(close(parse("8"), 8.0));
        assert!(close(parse("1.5"), 1.5));
        assert!(close(parse(" 0.25 "), 0.25));
        assert!(close(parse("0"), 0.0));
    }

    #[test]
    fn garbage_and_empty_are_zero() {
        assert!(close(parse(""), 0.0));
        assert!(close(parse("abc"), 0.0));
        assert!(close(parse("--"), 0.0));
        assert!(close(parse("8."), 0.0)); // trailing dot is not the plain-cell shape
    }

    #[test]
    fn unit_suffixes() {
        assert!(close(parse("2h"), 2.0));
        assert!(close(parse("1.5h"), 1.5));
        assert!(close(parse("2hour"), 2.0));
        assert!(close(parse("2 hours"), 2.0));
        assert!(close(parse("2小时"), 2.0));
        assert!(close(parse("2时"), 2.0));
        assert!(close(parse("30m"), 0.5));
        assert!(close(parse("30min"), 0.5));
        assert!(close(parse("45 minutes"), 0.75));
        assert!(close(parse("30分钟"), 0.5));
        assert!(close(parse("30分"), 0.5));
    }

    #[test]
    fn compound_counts_once() {
        assert!(close(parse("2h30m"), 2.5));
        assert!(close(parse("2h 30m"), 2.5));
        assert!(close(parse("2小时30分"), 2.5));
        assert!(close(parse("1 h 15 min"), 1.25));
    }

    #[test]
    fn repeated_units_sum() {
        assert!(close(parse("1h 2h"), 3.0));
        assert!(close(parse("30m, 30m"), 1.0));
    }

    #[test]
    fn unitless_numbers_outside_fast_path_are_ignored() {
        assert!(close(parse("task 42"), 0.0));
        assert!(close(parse("2024-01-01"), 0.0));
    }

    #[test]
    fn marker_case_insensitive() {
        assert!(close(parse("2H30M"), 2.5));
        assert!(close(parse("3 Hours"), 3.0));
    }
}
