//! Input validation for band and album documents
//!
//! Each document type is described by a static schema ([`BAND_SCHEMA`],
//! [`ALBUM_SCHEMA`]) listing its fields and the rule each one must satisfy.
//! [`Validator`] walks a schema once over the raw JSON body, trimming every
//! string it accepts, and either produces the typed field set or a
//! [`ValidationError`] listing every violation in schema order.

use std::collections::HashMap;
use std::fmt;

use chrono::{Datelike, Local, NaiveDate};
use once_cell::sync::Lazy;
use regex::Regex;
use serde_json::{Number, Value};

use crate::models::{AlbumFields, BandFields, RELEASE_DATE_FORMAT};

/// Earliest year accepted for band formation and album release
pub const EARLIEST_YEAR: i32 = 1900;

/// Minimum number of tracks on an album
pub const MIN_TRACKS: usize = 3;

static WEBSITE_PATTERN: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^http://www\.\w{5,}\.com$").expect("website pattern is a valid regex")
});

/// Constraint applied to a single field
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Rule {
    /// Non-empty string after trimming
    Text,
    /// Array of non-empty strings with at least `min_items` entries
    TextList { min_items: usize },
    /// `http://www.<host>.com` with a host of at least five word characters
    Website,
    /// Integer year in `[EARLIEST_YEAR, current year + years_ahead]`
    Year { years_ahead: i32 },
    /// Canonical `MM/DD/YYYY` date, year in `[EARLIEST_YEAR, current year + years_ahead]`
    Date { years_ahead: i32 },
    /// Number in `[min, max]` with at most one fractional digit
    Rating { min: f64, max: f64 },
}

/// Schema entry: field name as it appears on the wire, plus its rule
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FieldSpec {
    pub name: &'static str,
    pub rule: Rule,
    pub required: bool,
}

impl FieldSpec {
    const fn required(name: &'static str, rule: Rule) -> Self {
        Self { name, rule, required: true }
    }

    const fn optional(name: &'static str, rule: Rule) -> Self {
        Self { name, rule, required: false }
    }
}

/// Fields accepted when creating or replacing a band
pub const BAND_SCHEMA: &[FieldSpec] = &[
    FieldSpec::required("name", Rule::Text),
    FieldSpec::required("genre", Rule::TextList { min_items: 1 }),
    FieldSpec::required("website", Rule::Website),
    FieldSpec::required("recordCompany", Rule::Text),
    FieldSpec::required("groupMembers", Rule::TextList { min_items: 1 }),
    FieldSpec::required("yearBandWasFormed", Rule::Year { years_ahead: 0 }),
];

/// Fields accepted when adding an album to a band
pub const ALBUM_SCHEMA: &[FieldSpec] = &[
    FieldSpec::required("title", Rule::Text),
    FieldSpec::required("releaseDate", Rule::Date { years_ahead: 1 }),
    FieldSpec::required("tracks", Rule::TextList { min_items: MIN_TRACKS }),
    FieldSpec::optional("rating", Rule::Rating { min: 1.0, max: 5.0 }),
];

/// A single failed rule
#[derive(Debug, Clone, PartialEq)]
pub struct Violation {
    pub field: &'static str,
    pub message: String,
}

/// Every violation found in one validation pass, in schema order
#[derive(Debug, Clone, PartialEq)]
pub struct ValidationError {
    violations: Vec<Violation>,
}

impl ValidationError {
    fn single(field: &'static str, message: impl Into<String>) -> Self {
        Self {
            violations: vec![Violation { field, message: message.into() }],
        }
    }

    fn missing(field: &'static str) -> Self {
        Self::single(field, format!("The '{}' field is required", field))
    }

    /// All violations
    pub fn violations(&self) -> &[Violation] {
        &self.violations
    }

    /// Message of the first violated rule
    pub fn message(&self) -> &str {
        self.violations
            .first()
            .map(|v| v.message.as_str())
            .unwrap_or("Invalid input")
    }

    /// Field of the first violated rule
    pub fn field(&self) -> Option<&'static str> {
        self.violations.first().map(|v| v.field)
    }
}

impl fmt::Display for ValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.message())
    }
}

impl std::error::Error for ValidationError {}

/// Trimmed, typed value of an accepted field
#[derive(Debug, Clone, PartialEq)]
enum Normalized {
    Text(String),
    List(Vec<String>),
    Year(i32),
    Date(NaiveDate),
    Number(f64),
}

/// Output of a successful pass, keyed by field name
struct Record {
    values: HashMap<&'static str, Normalized>,
}

impl Record {
    fn text(&mut self, field: &'static str) -> Result<String, ValidationError> {
        match self.values.remove(field) {
            Some(Normalized::Text(s)) => Ok(s),
            _ => Err(ValidationError::missing(field)),
        }
    }

    fn list(&mut self, field: &'static str) -> Result<Vec<String>, ValidationError> {
        match self.values.remove(field) {
            Some(Normalized::List(items)) => Ok(items),
            _ => Err(ValidationError::missing(field)),
        }
    }

    fn year(&mut self, field: &'static str) -> Result<i32, ValidationError> {
        match self.values.remove(field) {
            Some(Normalized::Year(year)) => Ok(year),
            _ => Err(ValidationError::missing(field)),
        }
    }

    fn date(&mut self, field: &'static str) -> Result<NaiveDate, ValidationError> {
        match self.values.remove(field) {
            Some(Normalized::Date(date)) => Ok(date),
            _ => Err(ValidationError::missing(field)),
        }
    }

    fn optional_number(&mut self, field: &'static str) -> Option<f64> {
        match self.values.remove(field) {
            Some(Normalized::Number(n)) => Some(n),
            _ => None,
        }
    }
}

/// Schema-driven validator
///
/// Year limits are relative to `today`, which defaults to the local date.
#[derive(Debug, Clone, Copy)]
pub struct Validator {
    today: NaiveDate,
}

impl Default for Validator {
    fn default() -> Self {
        Self::new()
    }
}

impl Validator {
    /// Validator anchored at the current local date
    pub fn new() -> Self {
        Self::as_of(Local::now().date_naive())
    }

    /// Validator anchored at a fixed date
    pub fn as_of(today: NaiveDate) -> Self {
        Self { today }
    }

    /// Validate and normalize a band body
    pub fn band(&self, input: &Value) -> Result<BandFields, ValidationError> {
        let mut record = self.check(BAND_SCHEMA, input)?;

        Ok(BandFields {
            name: record.text("name")?,
            genre: record.list("genre")?,
            website: record.text("website")?,
            record_company: record.text("recordCompany")?,
            group_members: record.list("groupMembers")?,
            year_formed: record.year("yearBandWasFormed")?,
        })
    }

    /// Validate and normalize an album body
    pub fn album(&self, input: &Value) -> Result<AlbumFields, ValidationError> {
        let mut record = self.check(ALBUM_SCHEMA, input)?;

        Ok(AlbumFields {
            title: record.text("title")?,
            release_date: record.date("releaseDate")?,
            tracks: record.list("tracks")?,
            rating: record.optional_number("rating"),
        })
    }

    fn check(&self, schema: &[FieldSpec], input: &Value) -> Result<Record, ValidationError> {
        let object = input
            .as_object()
            .ok_or_else(|| ValidationError::single("body", "Request body must be a JSON object"))?;

        let mut values = HashMap::new();
        let mut violations = Vec::new();

        for spec in schema {
            match object.get(spec.name) {
                None | Some(Value::Null) => {
                    if spec.required {
                        violations.extend(ValidationError::missing(spec.name).violations);
                    }
                }
                Some(raw) => match self.apply(spec, raw) {
                    Ok(value) => {
                        values.insert(spec.name, value);
                    }
                    Err(message) => violations.push(Violation { field: spec.name, message }),
                },
            }
        }

        if violations.is_empty() {
            Ok(Record { values })
        } else {
            Err(ValidationError { violations })
        }
    }

    fn apply(&self, spec: &FieldSpec, raw: &Value) -> Result<Normalized, String> {
        let name = spec.name;
        match spec.rule {
            Rule::Text => non_empty_str(raw)
                .map(|s| Normalized::Text(s.to_string()))
                .ok_or_else(|| format!("The '{}' field should be a non-empty string", name)),

            Rule::TextList { min_items } => text_list(raw, min_items)
                .map(Normalized::List)
                .ok_or_else(|| {
                    if min_items <= 1 {
                        format!("The '{}' field should be a non-empty array of non-empty strings", name)
                    } else {
                        format!(
                            "The '{}' field should be an array of at least {} non-empty strings",
                            name, min_items
                        )
                    }
                }),

            Rule::Website => non_empty_str(raw)
                .filter(|s| WEBSITE_PATTERN.is_match(s))
                .map(|s| Normalized::Text(s.to_string()))
                .ok_or_else(|| {
                    format!(
                        "The '{}' field should start with http://www. and end in .com with at least 5 characters in between",
                        name
                    )
                }),

            Rule::Year { years_ahead } => {
                let latest = self.today.year() + years_ahead;
                integer(raw)
                    .filter(|year| (i64::from(EARLIEST_YEAR)..=i64::from(latest)).contains(year))
                    .map(|year| Normalized::Year(year as i32))
                    .ok_or_else(|| {
                        format!(
                            "The '{}' field should be an integer between {} and {}",
                            name, EARLIEST_YEAR, latest
                        )
                    })
            }

            Rule::Date { years_ahead } => self.date(name, raw, years_ahead).map(Normalized::Date),

            Rule::Rating { min, max } => {
                let Value::Number(number) = raw else {
                    return Err(format!("The '{}' field should be a number from {} to {}", name, min, max));
                };
                let value = number
                    .as_f64()
                    .filter(|v| (min..=max).contains(v))
                    .ok_or_else(|| format!("The '{}' field should be a number from {} to {}", name, min, max))?;
                if fractional_digits(number) > 1 {
                    return Err(format!(
                        "The '{}' field should have at most one digit after the decimal point",
                        name
                    ));
                }
                Ok(Normalized::Number(value))
            }
        }
    }

    fn date(&self, name: &str, raw: &Value, years_ahead: i32) -> Result<NaiveDate, String> {
        let text = non_empty_str(raw)
            .ok_or_else(|| format!("The '{}' field should be a non-empty string", name))?;

        let latest = self.today.year() + years_ahead;
        let date = NaiveDate::parse_from_str(text, RELEASE_DATE_FORMAT)
            .map_err(|_| format!("The '{}' field should be a valid date in the format MM/DD/YYYY", name))?;

        if date.year() < EARLIEST_YEAR || date.year() > latest {
            return Err(format!(
                "The '{}' field should be a date between {} and {}",
                name, EARLIEST_YEAR, latest
            ));
        }

        // "1/2/2020" parses but is not the canonical rendering
        if date.format(RELEASE_DATE_FORMAT).to_string() != text {
            return Err(format!("The '{}' field should be in the format MM/DD/YYYY", name));
        }

        Ok(date)
    }
}

/// Trimmed string content, if `raw` is a string with non-whitespace content
fn non_empty_str(raw: &Value) -> Option<&str> {
    raw.as_str().map(str::trim).filter(|s| !s.is_empty())
}

fn text_list(raw: &Value, min_items: usize) -> Option<Vec<String>> {
    let items = raw.as_array()?;
    if items.len() < min_items.max(1) {
        return None;
    }
    items
        .iter()
        .map(|item| non_empty_str(item).map(str::to_string))
        .collect()
}

/// Integral value of a JSON number, accepting `2001.0` but not `2001.5`
fn integer(raw: &Value) -> Option<i64> {
    if let Some(i) = raw.as_i64() {
        return Some(i);
    }
    raw.as_f64()
        .filter(|f| f.fract() == 0.0 && f.abs() < i64::MAX as f64)
        .map(|f| f as i64)
}

fn fractional_digits(number: &Number) -> usize {
    let text = number.to_string();
    match text.split_once('.') {
        Some((_, fraction)) => fraction.trim_end_matches('0').len(),
        None => 0,
    }
}
