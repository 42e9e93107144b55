//! Declarative field rules and the engine that applies them.
//!
//! A template's mapping is a static slice of [`FieldRule`]s. Field names may
//! contain placeholders: `{n}` (a number or size), `{row}` and `{col}` (grid
//! coordinates).

use jiff::civil::Date;
use jobsheet_core::models::form_data::FormData;
use serde::Serialize;
use tracing::warn;

use crate::dates::DateStyle;
use crate::error::RenderError;
use crate::form::{FieldKind, Form};

#[derive(Debug, Clone, Copy)]
pub enum FieldRule {
    /// Value, or empty text.
    Text {
        key: &'static str,
        field: &'static str,
    },
    /// Value, only when non-empty.
    TextIfPresent {
        key: &'static str,
        field: &'static str,
    },
    /// Value, or today's date.
    TextOrToday {
        key: &'static str,
        field: &'static str,
        style: DateStyle,
    },
    Today {
        field: &'static str,
        style: DateStyle,
    },
    /// Value, or the detail value when the value is `"Other"`.
    OtherDetail {
        key: &'static str,
        detail: &'static str,
        field: &'static str,
    },
    /// Values joined by a space.
    Joined {
        keys: &'static [&'static str],
        field: &'static str,
    },
    /// `yes`/`no` answer marking one of two text fields. With `letters`,
    /// `y`/`n` are accepted too. Anything else marks nothing.
    YesNo {
        key: &'static str,
        yes: Option<&'static str>,
        no: Option<&'static str>,
        mark: &'static str,
        letters: bool,
    },
    /// `Y` marks `yes`, anything else marks `no`.
    YesElseNo {
        key: &'static str,
        yes: &'static str,
        no: &'static str,
        mark: &'static str,
    },
    /// Integer 1..=10 marks `pattern` with `{n}` replaced.
    Rating {
        key: &'static str,
        pattern: &'static str,
        mark: &'static str,
    },
    /// Every option field is written: the mark for the matching option,
    /// empty text for the others.
    Exclusive {
        key: &'static str,
        lowercase: bool,
        options: &'static [(&'static str, &'static str)],
        mark: &'static str,
    },
    /// One field per size; the matching size (`150` or `150L`) is marked.
    Sizes {
        key: &'static str,
        pattern: &'static str,
        sizes: &'static [&'static str],
        mark: &'static str,
    },
    /// `Y`/`YES`, `N`/`NO` or anything else marks `{prefix}YES`,
    /// `{prefix}NO` or `{prefix}NA`.
    TriState {
        key: &'static str,
        prefix: &'static str,
        mark: &'static str,
    },
    /// Mark when the value is truthy.
    Flag {
        key: &'static str,
        field: &'static str,
        mark: &'static str,
    },
    RadioYesElse {
        key: &'static str,
        group: &'static str,
        yes: &'static str,
        otherwise: &'static str,
    },
    /// Check the checkbox paired with the exact value.
    CheckOption {
        key: &'static str,
        options: &'static [(&'static str, &'static str)],
    },
    /// For row `i` in `1..=rows`, an integer `v > 0` at `key` (with `{n}` =
    /// `i`) checks `field` at `{row}` = `i + 1`, `{col}` = `v - 1`.
    Grid {
        key: &'static str,
        rows: u32,
        field: &'static str,
    },
    /// For each 0-based index listed at `key`, check the first candidate
    /// (with `{n}` = index + 1) that exists as a checkbox.
    ProbeCheckBoxes {
        key: &'static str,
        candidates: &'static [&'static str],
    },
    /// Row objects at `key`; row `i` writes each `(column key, field
    /// pattern)` with `{n}` = `i + 1`. Rows past `max` are dropped.
    Rows {
        key: &'static str,
        max: usize,
        columns: &'static [(&'static str, &'static str)],
    },
}

/// A field a rule always writes, for template audits.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FieldTarget {
    pub name: String,
    pub kind: FieldKind,
    /// Radio options the rule may select.
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub options: Vec<String>,
}

impl FieldTarget {
    fn new(name: impl Into<String>, kind: FieldKind) -> Self {
        Self {
            name: name.into(),
            kind,
            options: Vec::new(),
        }
    }
}

impl FieldRule {
    /// Fields this rule may write. Grid cells and searched checkboxes depend
    /// on the data and are not listed.
    pub fn targets(&self) -> Vec<FieldTarget> {
        let text = |name: &str| FieldTarget::new(name, FieldKind::Text);
        match *self {
            FieldRule::Text { field, .. }
            | FieldRule::TextIfPresent { field, .. }
            | FieldRule::TextOrToday { field, .. }
            | FieldRule::Today { field, .. }
            | FieldRule::OtherDetail { field, .. }
            | FieldRule::Joined { field, .. }
            | FieldRule::Flag { field, .. } => vec![text(field)],
            FieldRule::YesNo { yes, no, .. } => yes.into_iter().chain(no).map(text).collect(),
            FieldRule::YesElseNo { yes, no, .. } => vec![text(yes), text(no)],
            FieldRule::Rating { pattern, .. } => (1..=10)
                .map(|n| text(&fill(pattern, &n.to_string())))
                .collect(),
            FieldRule::Exclusive { options, .. } => {
                options.iter().map(|(_, field)| text(field)).collect()
            }
            FieldRule::Sizes { pattern, sizes, .. } => {
                sizes.iter().map(|size| text(&fill(pattern, size))).collect()
            }
            FieldRule::TriState { prefix, .. } => ["YES", "NO", "NA"]
                .iter()
                .map(|suffix| text(&format!("{prefix}{suffix}")))
                .collect(),
            FieldRule::RadioYesElse {
                group,
                yes,
                otherwise,
                ..
            } => vec![FieldTarget {
                name: group.to_string(),
                kind: FieldKind::RadioGroup,
                options: vec![yes.to_string(), otherwise.to_string()],
            }],
            FieldRule::CheckOption { options, .. } => options
                .iter()
                .map(|(_, field)| FieldTarget::new(*field, FieldKind::CheckBox))
                .collect(),
            FieldRule::Rows { max, columns, .. } => (1..=max)
                .flat_map(|n| {
                    columns
                        .iter()
                        .map(move |(_, pattern)| text(&fill(pattern, &n.to_string())))
                })
                .collect(),
            FieldRule::Grid { .. } | FieldRule::ProbeCheckBoxes { .. } => Vec::new(),
        }
    }

    fn apply<F: Form + ?Sized>(&self, out: &mut Writer<'_, F>, data: &FormData, today: Date) {
        match *self {
            FieldRule::Text { key, field } => {
                out.text(field, &data.text(key).unwrap_or_default());
            }
            FieldRule::TextIfPresent { key, field } => {
                if let Some(value) = data.text(key) {
                    out.text(field, &value);
                }
            }
            FieldRule::TextOrToday { key, field, style } => {
                let value = data.text(key).unwrap_or_else(|| style.format(today));
                out.text(field, &value);
            }
            FieldRule::Today { field, style } => out.text(field, &style.format(today)),
            FieldRule::OtherDetail { key, detail, field } => {
                let value = match data.text(key) {
                    Some(v) if v == "Other" => data.text(detail).unwrap_or_default(),
                    other => other.unwrap_or_default(),
                };
                out.text(field, &value);
            }
            FieldRule::Joined { keys, field } => {
                let joined = keys
                    .iter()
                    .map(|key| data.text(key).unwrap_or_default())
                    .collect::<Vec<_>>()
                    .join(" ");
                out.text(field, joined.trim());
            }
            FieldRule::YesNo {
                key,
                yes,
                no,
                mark,
                letters,
            } => {
                let answer = data.text(key).unwrap_or_default().to_lowercase();
                let target = match answer.as_str() {
                    "yes" => yes,
                    "y" if letters => yes,
                    "no" => no,
                    "n" if letters => no,
                    _ => None,
                };
                if let Some(field) = target {
                    out.text(field, mark);
                }
            }
            FieldRule::YesElseNo { key, yes, no, mark } => {
                let answer = data.text(key).unwrap_or_default().to_uppercase();
                out.text(if answer == "Y" { yes } else { no }, mark);
            }
            FieldRule::Rating { key, pattern, mark } => {
                if let Some(n) = data.text(key).as_deref().and_then(parse_int)
                    && (1..=10).contains(&n)
                {
                    out.text(&fill(pattern, &n.to_string()), mark);
                }
            }
            FieldRule::Exclusive {
                key,
                lowercase,
                options,
                mark,
            } => {
                let mut value = data.text(key).unwrap_or_default();
                if lowercase {
                    value = value.to_lowercase();
                }
                for (option, field) in options {
                    out.text(field, if value == *option { mark } else { "" });
                }
            }
            FieldRule::Sizes {
                key,
                pattern,
                sizes,
                mark,
            } => {
                let value = data.text(key).unwrap_or_default();
                for size in sizes {
                    let matches = value == *size || value == format!("{size}L");
                    out.text(&fill(pattern, size), if matches { mark } else { "" });
                }
            }
            FieldRule::TriState { key, prefix, mark } => {
                let answer = data.text(key).unwrap_or_default().to_uppercase();
                let suffix = match answer.as_str() {
                    "Y" | "YES" => "YES",
                    "N" | "NO" => "NO",
                    _ => "NA",
                };
                out.text(&format!("{prefix}{suffix}"), mark);
            }
            FieldRule::Flag { key, field, mark } => {
                if data.flag(key) {
                    out.text(field, mark);
                }
            }
            FieldRule::RadioYesElse {
                key,
                group,
                yes,
                otherwise,
            } => {
                let answer = data.text(key).unwrap_or_default().to_lowercase();
                out.select(group, if answer == "yes" { yes } else { otherwise });
            }
            FieldRule::CheckOption { key, options } => {
                let value = data.text(key).unwrap_or_default();
                if let Some((_, field)) = options.iter().find(|(option, _)| *option == value) {
                    out.check(field);
                }
            }
            FieldRule::Grid { key, rows, field } => {
                for row in 1..=rows {
                    let cell = data
                        .text(&fill(key, &row.to_string()))
                        .as_deref()
                        .and_then(parse_int);
                    if let Some(v) = cell
                        && v > 0
                    {
                        let name = field
                            .replace("{row}", &(row + 1).to_string())
                            .replace("{col}", &(v - 1).to_string());
                        out.check(&name);
                    }
                }
            }
            FieldRule::ProbeCheckBoxes { key, candidates } => {
                for index in data.indices(key) {
                    let found = index.checked_add(1).and_then(|n| {
                        let n = n.to_string();
                        candidates
                            .iter()
                            .map(|pattern| fill(pattern, &n))
                            .find(|name| out.form.field_kind(name) == Some(FieldKind::CheckBox))
                    });
                    match found {
                        Some(name) => out.check(&name),
                        None => {
                            warn!(key, index, "no checkbox found for selected item");
                            out.report.skipped.push(format!("{key}[{index}]"));
                        }
                    }
                }
            }
            FieldRule::Rows { key, max, columns } => {
                for (i, row) in data.rows(key).iter().take(max).enumerate() {
                    let n = (i + 1).to_string();
                    for (column, pattern) in columns {
                        out.text(&fill(pattern, &n), &row.text(column).unwrap_or_default());
                    }
                }
            }
        }
    }
}

/// Outcome of applying a rule table.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MappingReport {
    pub written: usize,
    /// Fields (or selected items) that could not be written.
    pub skipped: Vec<String>,
}

/// Apply every rule in order. Field errors are logged and skipped.
pub fn apply_rules<F: Form + ?Sized>(
    form: &mut F,
    rules: &[FieldRule],
    data: &FormData,
    today: Date,
) -> MappingReport {
    let mut writer = Writer {
        form,
        report: MappingReport::default(),
    };
    for rule in rules {
        rule.apply(&mut writer, data, today);
    }
    writer.report
}

struct Writer<'f, F: Form + ?Sized> {
    form: &'f mut F,
    report: MappingReport,
}

impl<F: Form + ?Sized> Writer<'_, F> {
    fn text(&mut self, field: &str, value: &str) {
        let result = self.form.set_text(field, value);
        self.record(field, result);
    }

    fn check(&mut self, field: &str) {
        let result = self.form.check(field);
        self.record(field, result);
    }

    fn select(&mut self, group: &str, option: &str) {
        let result = self.form.select(group, option);
        self.record(group, result);
    }

    fn record(&mut self, field: &str, result: Result<(), RenderError>) {
        match result {
            Ok(()) => self.report.written += 1,
            Err(e) => {
                warn!(field, error = %e, "skipping field");
                self.report.skipped.push(field.to_string());
            }
        }
    }
}

/// Replace the `{n}` placeholder.
pub fn fill(pattern: &str, n: &str) -> String {
    pattern.replace("{n}", n)
}

/// Forgiving leading-integer parse: leading whitespace and sign, then
/// digits up to the first non-digit. `None` when no digits are found.
pub fn parse_int(s: &str) -> Option<i64> {
    let s = s.trim_start();
    let (negative, rest) = match s.as_bytes().first() {
        Some(b'-') => (true, &s[1..]),
        Some(b'+') => (false, &s[1..]),
        _ => (false, s),
    };
    let digits: &str = &rest[..rest
        .find(|c: char| !c.is_ascii_digit())
        .unwrap_or(rest.len())];
    if digits.is_empty() {
        return None;
    }
    let value: i64 = digits.parse().ok()?;
    Some(if negative { -value } else { value })
}
