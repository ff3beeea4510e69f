//! Display formatting for stats, odds and prop lines.
//!
//! Every numeric value shown by the dashboard goes through this module so
//! that the same stat renders identically in the matchup pane, the
//! leaderboards and the standings. Rules are data: one table maps a
//! category key to its [`FormatRule`].

use serde_json::Value;

use crate::types::{parse_timestamp, StatRecord};

// ---------------------------------------------------------------------------
// Parsed stat values
// ---------------------------------------------------------------------------

/// A raw stat value after the explicit parse step.
#[derive(Debug, Clone, PartialEq)]
pub enum StatValue {
    /// null, missing, blank, or a structure that cannot be a stat.
    Absent,
    Number(f64),
    /// Non-numeric text, shown verbatim (pre-formatted server strings).
    Text(String),
}

impl StatValue {
    pub fn parse(raw: &Value) -> Self {
        match raw {
            Value::Null => StatValue::Absent,
            Value::Number(n) => match n.as_f64() {
                Some(f) if f.is_finite() => StatValue::Number(f),
                _ => StatValue::Text(n.to_string()),
            },
            Value::String(s) => Self::parse_str(s),
            Value::Bool(b) => StatValue::Text(b.to_string()),
            Value::Array(_) | Value::Object(_) => StatValue::Absent,
        }
    }

    pub fn parse_str(s: &str) -> Self {
        let trimmed = s.trim();
        if trimmed.is_empty() {
            return StatValue::Absent;
        }
        match trimmed.parse::<f64>() {
            Ok(f) if f.is_finite() => StatValue::Number(f),
            _ => StatValue::Text(s.to_string()),
        }
    }
}

// ---------------------------------------------------------------------------
// Rule table
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LeadingZero {
    Keep,
    /// `0.290` → `.290` for values in [0.1, 1.0).
    SuppressBelowOne,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Rounding {
    /// Round to `precision` decimals, halves away from zero.
    Fixed,
    /// Precision picked from the value's magnitude; `precision` is ignored.
    MagnitudeTiered,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FormatRule {
    pub precision: usize,
    pub leading_zero: LeadingZero,
    pub rounding: Rounding,
}

pub const COUNT: FormatRule = FormatRule {
    precision: 0,
    leading_zero: LeadingZero::Keep,
    rounding: Rounding::Fixed,
};

pub const RATE: FormatRule = FormatRule {
    precision: 3,
    leading_zero: LeadingZero::SuppressBelowOne,
    rounding: Rounding::Fixed,
};

pub const RATIO: FormatRule = FormatRule {
    precision: 2,
    leading_zero: LeadingZero::Keep,
    rounding: Rounding::Fixed,
};

pub const OPS: FormatRule = FormatRule {
    precision: 3,
    leading_zero: LeadingZero::Keep,
    rounding: Rounding::Fixed,
};

pub const FALLBACK: FormatRule = FormatRule {
    precision: 2,
    leading_zero: LeadingZero::SuppressBelowOne,
    rounding: Rounding::MagnitudeTiered,
};

/// Category key → rule. Keys are compared ASCII-case-insensitively and cover
/// both the short stat-record vocabulary and the leaderboard category names.
const RULES: &[(&str, FormatRule)] = &[
    // counting
    ("hits", COUNT),
    ("h", COUNT),
    ("homeRuns", COUNT),
    ("hr", COUNT),
    ("rbi", COUNT),
    ("rbis", COUNT),
    ("wins", COUNT),
    ("w", COUNT),
    ("losses", COUNT),
    ("l", COUNT),
    ("saves", COUNT),
    ("sv", COUNT),
    ("games", COUNT),
    ("g", COUNT),
    ("gamesPlayed", COUNT),
    ("gp", COUNT),
    ("gamesStarted", COUNT),
    ("gs", COUNT),
    ("runs", COUNT),
    ("r", COUNT),
    ("doubles", COUNT),
    ("2b", COUNT),
    ("triples", COUNT),
    ("3b", COUNT),
    ("stolenBases", COUNT),
    ("sb", COUNT),
    ("strikeouts", COUNT),
    ("so", COUNT),
    ("k", COUNT),
    ("baseOnBalls", COUNT),
    ("walks", COUNT),
    ("bb", COUNT),
    ("holds", COUNT),
    ("qualityStarts", COUNT),
    ("qs", COUNT),
    ("atBats", COUNT),
    ("ab", COUNT),
    ("teamHits", COUNT),
    ("teamHomeRuns", COUNT),
    ("teamRbi", COUNT),
    ("teamRuns", COUNT),
    ("teamWins", COUNT),
    ("teamLosses", COUNT),
    ("teamSaves", COUNT),
    ("teamGames", COUNT),
    ("teamStolenBases", COUNT),
    ("teamStrikeouts", COUNT),
    // rate, leading zero suppressed
    ("battingAverage", RATE),
    ("avg", RATE),
    ("onBasePercentage", RATE),
    ("obp", RATE),
    ("sluggingPercentage", RATE),
    ("slg", RATE),
    ("teamBattingAverage", RATE),
    ("teamOnBasePercentage", RATE),
    ("teamSluggingPercentage", RATE),
    ("winningPercentage", RATE),
    ("winning_pct", RATE),
    ("pct", RATE),
    // ERA / WHIP-like ratios
    ("era", RATIO),
    ("earnedRunAverage", RATIO),
    ("whip", RATIO),
    ("teamEra", RATIO),
    ("teamWhip", RATIO),
    // on-base plus slugging
    ("onBasePlusSlugging", OPS),
    ("ops", OPS),
    ("teamOnBasePlusSlugging", OPS),
    ("teamOps", OPS),
];

/// The rule registered for `category`, if any.
pub fn rule_for(category: &str) -> Option<FormatRule> {
    RULES
        .iter()
        .find(|(key, _)| key.eq_ignore_ascii_case(category))
        .map(|&(_, rule)| rule)
}

// ---------------------------------------------------------------------------
// Stat formatting
// ---------------------------------------------------------------------------

/// Format a raw stat value for `category`.
pub fn format_stat(category: &str, raw: &Value) -> String {
    format_stat_value(category, &StatValue::parse(raw))
}

pub fn format_stat_value(category: &str, value: &StatValue) -> String {
    match value {
        StatValue::Absent => "-".to_string(),
        StatValue::Text(s) => s.clone(),
        StatValue::Number(v) => format_number(rule_for(category).unwrap_or(FALLBACK), *v),
    }
}

pub fn format_number(rule: FormatRule, v: f64) -> String {
    match rule.rounding {
        Rounding::MagnitudeTiered => {
            if (0.0..1.0).contains(&v) {
                return format_number(RATE, v);
            }
            let magnitude = v.abs();
            if magnitude < 10.0 {
                to_fixed(v, 2)
            } else if magnitude < 100.0 {
                to_fixed(v, 1)
            } else {
                to_fixed(v, 0)
            }
        }
        Rounding::Fixed => {
            let s = to_fixed(v, rule.precision);
            match rule.leading_zero {
                LeadingZero::SuppressBelowOne if (0.1..1.0).contains(&v) => {
                    s.strip_prefix('0').map(str::to_string).unwrap_or(s)
                }
                _ => s,
            }
        }
    }
}

/// `AVG: .290 | HR: 12` for a whole record, keys upper-cased.
pub fn format_stat_line(record: &StatRecord) -> String {
    record
        .iter()
        .map(|(key, raw)| format!("{}: {}", key.to_uppercase(), format_stat(key, raw)))
        .collect::<Vec<_>>()
        .join(" | ")
}

/// Extra digits requested from the float formatter so the digits past the
/// rounding position come out exact for any double in stat range.
const EXACT_EXTRA_DIGITS: usize = 80;

/// Fixed-point rendering with halves rounded away from zero.
///
/// `format!("{:.2}", 1.125)` rounds the tie to even (`1.12`); scoreboards
/// have always shown `1.13`, so the rounding is done on the exact decimal
/// expansion instead.
pub fn to_fixed(value: f64, digits: usize) -> String {
    if !value.is_finite() {
        return value.to_string();
    }
    let exact = format!("{:.*}", digits + EXACT_EXTRA_DIGITS, value.abs());
    let (kept, rest) = exact.split_at(exact.len() - EXACT_EXTRA_DIGITS);

    let mut out: Vec<u8> = kept.as_bytes().to_vec();
    if rest.as_bytes().first().is_some_and(|&b| b >= b'5') {
        let mut i = out.len();
        loop {
            if i == 0 {
                out.insert(0, b'1');
                break;
            }
            i -= 1;
            match out[i] {
                b'.' => continue,
                b'9' => out[i] = b'0',
                d => {
                    out[i] = d + 1;
                    break;
                }
            }
        }
    }
    if digits == 0 {
        out.pop(); // trailing '.'
    }

    let body: String = out.into_iter().map(char::from).collect();
    if value < 0.0 {
        format!("-{body}")
    } else {
        body
    }
}

// ---------------------------------------------------------------------------
// Odds, lines, labels
// ---------------------------------------------------------------------------

/// American odds: `+` on positive prices, negatives as-is.
pub fn format_odds(raw: &Value) -> String {
    match StatValue::parse(raw) {
        StatValue::Absent => "N/A".to_string(),
        StatValue::Text(s) => s,
        StatValue::Number(n) if n > 0.0 => format!("+{n}"),
        StatValue::Number(n) if n == 0.0 => "0".to_string(),
        StatValue::Number(n) => format!("{n}"),
    }
}

/// Line shown for a prop, falling back to the prop type's default.
pub fn resolve_line(prop_type: &str, line: Option<f64>) -> String {
    match line.or_else(|| default_line(prop_type)) {
        Some(v) => format!("{v}"),
        None => "N/A".to_string(),
    }
}

/// Threshold implied by yes/no occurrence props.
pub fn default_line(prop_type: &str) -> Option<f64> {
    match prop_type {
        "To Record A Hit" | "To Record An RBI" | "To Hit A Home Run" => Some(0.5),
        "To Record 2+ RBIs" => Some(1.5),
        _ => None,
    }
}

/// Short label for the prop table.
pub fn prop_label(prop_type: &str) -> &str {
    match prop_type {
        "To Record A Hit" => "Hit",
        "To Record An RBI" => "RBI",
        "To Hit A Home Run" => "Home Run",
        "To Record 2+ RBIs" => "2+ RBIs",
        other => other,
    }
}

/// Games behind: the leader shows `-`, everyone else one decimal.
pub fn format_games_behind(raw: &Value) -> String {
    match StatValue::parse(raw) {
        StatValue::Absent => "-".to_string(),
        StatValue::Text(s) => s,
        StatValue::Number(n) if n == 0.0 => "-".to_string(),
        StatValue::Number(n) => to_fixed(n, 1),
    }
}

/// `05/02 19:05` in UTC, or the raw text when it does not parse.
pub fn format_timestamp(raw: Option<&str>) -> String {
    match raw {
        None => "-".to_string(),
        Some(s) => match parse_timestamp(s) {
            Some(ts) => ts.format("%m/%d %H:%M").to_string(),
            None if s.trim().is_empty() => "-".to_string(),
            None => s.to_string(),
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn absent_values_render_dash() {
        assert_eq!(format_stat("avg", &Value::Null), "-");
        assert_eq!(format_stat("avg", &json!("")), "-");
        assert_eq!(format_stat("avg", &json!("   ")), "-");
        assert_eq!(format_stat("hr", &json!({ "nested": 1 })), "-");
        assert_eq!(format_stat("hr", &json!([1, 2])), "-");
    }

    #[test]
    fn non_numeric_text_passes_through() {
        assert_eq!(format_stat("avg", &json!("--")), "--");
        assert_eq!(format_stat("era", &json!("INF")), "INF");
        assert_eq!(format_stat("streak", &json!("W3")), "W3");
    }

    #[test]
    fn rate_stats_suppress_leading_zero() {
        assert_eq!(format_stat("battingAverage", &json!(0.290)), ".290");
        assert_eq!(format_stat("avg", &json!(".301")), ".301");
        assert_eq!(format_stat("obp", &json!(0.4)), ".400");
        assert_eq!(format_stat("slg", &json!(1.0)), "1.000");
        assert_eq!(format_stat("slg", &json!(1.25)), "1.250");
        assert_eq!(format_stat("avg", &json!(0.095)), "0.095");
        assert_eq!(format_stat("AVG", &json!("0.288")), ".288");
    }

    #[test]
    fn ops_keeps_leading_digit() {
        assert_eq!(format_stat("onBasePlusSlugging", &json!(1.023)), "1.023");
        assert_eq!(format_stat("ops", &json!(0.85)), "0.850");
    }

    #[test]
    fn ratios_use_two_decimals() {
        assert_eq!(format_stat("era", &json!(3.5)), "3.50");
        assert_eq!(format_stat("whip", &json!("1.1")), "1.10");
        assert_eq!(format_stat("teamEra", &json!(4.125)), "4.13");
    }

    #[test]
    fn counting_stats_round_to_integers() {
        assert_eq!(format_stat("homeRuns", &json!(142)), "142");
        assert_eq!(format_stat("hr", &json!("37")), "37");
        assert_eq!(format_stat("hits", &json!(12.5)), "13");
        assert_eq!(format_stat("wins", &json!(9.49)), "9");
        assert_eq!(format_stat("gs", &json!(0)), "0");
    }

    #[test]
    fn unknown_categories_use_magnitude_tiers() {
        assert_eq!(format_stat("war", &json!(4.567)), "4.57");
        assert_eq!(format_stat("war", &json!(12.34)), "12.3");
        assert_eq!(format_stat("pitches", &json!(1523.6)), "1524");
        assert_eq!(format_stat("babip", &json!(0.312)), ".312");
        assert_eq!(format_stat("babip", &json!(0.05)), "0.050");
        assert_eq!(format_stat("war", &json!(-1.234)), "-1.23");
    }

    #[test]
    fn to_fixed_rounds_exact_halves_up() {
        assert_eq!(to_fixed(1.125, 2), "1.13");
        assert_eq!(to_fixed(2.5, 0), "3");
        assert_eq!(to_fixed(0.0625, 3), "0.063");
        assert_eq!(to_fixed(9.995, 2), "9.99"); // 9.99499999... in binary
        assert_eq!(to_fixed(9.9999, 2), "10.00");
        assert_eq!(to_fixed(99.96, 0), "100");
        assert_eq!(to_fixed(-2.5, 0), "-3");
        assert_eq!(to_fixed(0.0, 2), "0.00");
    }

    #[test]
    fn rule_table_lookup_is_case_insensitive() {
        assert_eq!(rule_for("ERA"), Some(RATIO));
        assert_eq!(rule_for("HomeRuns"), Some(COUNT));
        assert_eq!(rule_for("teamops"), Some(OPS));
        assert_eq!(rule_for("xwoba"), None);
    }

    #[test]
    fn every_rule_key_is_unique() {
        for (i, (a, _)) in RULES.iter().enumerate() {
            for (b, _) in &RULES[i + 1..] {
                assert!(!a.eq_ignore_ascii_case(b), "duplicate rule key {a}");
            }
        }
    }

    #[test]
    fn stat_line_uppercases_keys_and_formats_each_field() {
        let mut record = StatRecord::new();
        record.insert("avg".to_string(), json!(0.301));
        record.insert("hr".to_string(), json!(22.0));
        record.insert("ops".to_string(), json!({ "bad": true }));
        assert_eq!(format_stat_line(&record), "AVG: .301 | HR: 22 | OPS: -");
    }

    #[test]
    fn odds_get_explicit_sign() {
        assert_eq!(format_odds(&json!(-150)), "-150");
        assert_eq!(format_odds(&json!(120)), "+120");
        assert_eq!(format_odds(&json!("+250")), "+250");
        assert_eq!(format_odds(&json!("120")), "+120");
        assert_eq!(format_odds(&json!(0)), "0");
        assert_eq!(format_odds(&json!("EVEN")), "EVEN");
        assert_eq!(format_odds(&Value::Null), "N/A");
        assert_eq!(format_odds(&json!("")), "N/A");
    }

    #[test]
    fn lines_fall_back_to_prop_type_defaults() {
        assert_eq!(resolve_line("To Record 2+ RBIs", None), "1.5");
        assert_eq!(resolve_line("To Record A Hit", None), "0.5");
        assert_eq!(resolve_line("To Record An RBI", None), "0.5");
        assert_eq!(resolve_line("To Hit A Home Run", None), "0.5");
        assert_eq!(resolve_line("Total Bases", None), "N/A");
        assert_eq!(resolve_line("Total Bases", Some(1.5)), "1.5");
        assert_eq!(resolve_line("To Record A Hit", Some(2.0)), "2");
    }

    #[test]
    fn prop_labels_shorten_known_types() {
        assert_eq!(prop_label("To Hit A Home Run"), "Home Run");
        assert_eq!(prop_label("Total Bases"), "Total Bases");
    }

    #[test]
    fn games_behind_shows_dash_for_leader() {
        assert_eq!(format_games_behind(&json!(0.0)), "-");
        assert_eq!(format_games_behind(&json!(7.5)), "7.5");
        assert_eq!(format_games_behind(&json!("11")), "11.0");
        assert_eq!(format_games_behind(&Value::Null), "-");
    }

    #[test]
    fn timestamps_render_month_day_time() {
        assert_eq!(format_timestamp(Some("2024-05-02T19:05:00Z")), "05/02 19:05");
        assert_eq!(format_timestamp(Some("2024-05-02")), "05/02 00:00");
        assert_eq!(format_timestamp(Some("tbd")), "tbd");
        assert_eq!(format_timestamp(None), "-");
    }
}
