//! Locale-aware date layout and free-text parsing.
//!
//! ## Usage
//!
//! Resolve a [`Locale`] from a tag such as `"en-US"`, then use
//! [`parse_date`] on whatever the user typed and [`format_date`] to show a
//! committed value back in the input.
use std::{fmt, str::FromStr};

use smallvec::SmallVec;
use tracing::{debug, trace};

use crate::{
    calendar::{CalendarDate, Weekday},
    error::LocaleError,
};

/// Order of the day, month and year fields in a locale's short date.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DateOrder {
    /// Year, month, day (`2024-03-15`).
    Ymd,
    /// Month, day, year (`03/15/2024`).
    Mdy,
    /// Day, month, year (`15.03.2024`).
    Dmy,
}

/// Date layout conventions for one locale.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Locale {
    tag: String,
    order: DateOrder,
    separator: char,
    first_day_of_week: Weekday,
}

impl Locale {
    /// ISO 8601 layout with Monday-first weeks.
    pub fn iso() -> Self {
        Self::custom("und", DateOrder::Ymd, '-', Weekday::Monday)
    }

    /// United States English.
    pub fn en_us() -> Self {
        Self::custom("en-US", DateOrder::Mdy, '/', Weekday::Sunday)
    }

    /// British English.
    pub fn en_gb() -> Self {
        Self::custom("en-GB", DateOrder::Dmy, '/', Weekday::Monday)
    }

    /// German (Germany).
    pub fn de_de() -> Self {
        Self::custom("de-DE", DateOrder::Dmy, '.', Weekday::Monday)
    }

    /// French (France).
    pub fn fr_fr() -> Self {
        Self::custom("fr-FR", DateOrder::Dmy, '/', Weekday::Monday)
    }

    /// Japanese (Japan).
    pub fn ja_jp() -> Self {
        Self::custom("ja-JP", DateOrder::Ymd, '/', Weekday::Sunday)
    }

    /// Chinese (China).
    pub fn zh_cn() -> Self {
        Self::custom("zh-CN", DateOrder::Ymd, '-', Weekday::Monday)
    }

    /// Builds a locale from explicit conventions.
    pub fn custom(
        tag: impl Into<String>,
        order: DateOrder,
        separator: char,
        first_day_of_week: Weekday,
    ) -> Self {
        Self {
            tag: tag.into(),
            order,
            separator,
            first_day_of_week,
        }
    }

    /// The tag this locale was resolved from.
    pub fn tag(&self) -> &str {
        &self.tag
    }

    /// Field order of the short date.
    pub fn order(&self) -> DateOrder {
        self.order
    }

    /// Separator used when formatting.
    pub fn separator(&self) -> char {
        self.separator
    }

    /// Weekday shown in the first grid column.
    pub fn first_day_of_week(&self) -> Weekday {
        self.first_day_of_week
    }

    fn with_tag(mut self, tag: String) -> Self {
        self.tag = tag;
        self
    }
}

impl Default for Locale {
    fn default() -> Self {
        Locale::en_us()
    }
}

impl fmt::Display for Locale {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.tag)
    }
}

impl FromStr for Locale {
    type Err = LocaleError;

    /// Resolves `ll`, `ll-RR`, `ll_RR` or `ll-Script-RR`.
    ///
    /// Unknown languages fall back to the ISO layout.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let tag = s.trim();
        if tag.is_empty() {
            return Err(LocaleError::Empty);
        }
        let subtags: SmallVec<[&str; 3]> = tag.split(['-', '_']).collect();
        let language = subtags[0];
        if !(2..=3).contains(&language.len()) || !language.bytes().all(|b| b.is_ascii_alphabetic())
        {
            return Err(LocaleError::Malformed(s.to_string()));
        }
        let mut region = None;
        for subtag in &subtags[1..] {
            let is_script = subtag.len() == 4 && subtag.bytes().all(|b| b.is_ascii_alphabetic());
            let is_region = (subtag.len() == 2 && subtag.bytes().all(|b| b.is_ascii_alphabetic()))
                || (subtag.len() == 3 && subtag.bytes().all(|b| b.is_ascii_digit()));
            if is_region && region.is_none() {
                region = Some(subtag.to_ascii_uppercase());
            } else if !is_script {
                return Err(LocaleError::Malformed(s.to_string()));
            }
        }
        let language = language.to_ascii_lowercase();
        let canonical = match &region {
            Some(region) => format!("{language}-{region}"),
            None => language.clone(),
        };
        Ok(resolve(&language, region.as_deref()).with_tag(canonical))
    }
}

fn resolve(language: &str, region: Option<&str>) -> Locale {
    match (language, region) {
        ("en", Some("GB" | "IE" | "AU" | "NZ" | "IN" | "ZA")) => Locale::en_gb(),
        ("en", Some("CA")) => Locale::custom("en-CA", DateOrder::Ymd, '-', Weekday::Sunday),
        ("en", _) => Locale::en_us(),
        ("de", _) => Locale::de_de(),
        ("fr", Some("CA")) => Locale::custom("fr-CA", DateOrder::Ymd, '-', Weekday::Sunday),
        ("fr", _) => Locale::fr_fr(),
        ("ja", _) => Locale::ja_jp(),
        ("zh", _) => Locale::zh_cn(),
        ("es" | "it" | "pt" | "nl", _) => {
            Locale::custom(language, DateOrder::Dmy, '/', Weekday::Monday)
        }
        ("sv" | "lt", _) => Locale::custom(language, DateOrder::Ymd, '-', Weekday::Monday),
        _ => {
            debug!(language, ?region, "no date conventions for locale; using ISO layout");
            Locale::iso()
        }
    }
}

/// Result of reading typed text as a date.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ParsedDate {
    /// The text is blank.
    Empty,
    /// The text names a real day.
    Date(CalendarDate),
    /// The text is non-blank but does not name a real day.
    Unparseable,
}

impl ParsedDate {
    /// The parsed day, if any.
    pub fn date(self) -> Option<CalendarDate> {
        match self {
            ParsedDate::Date(date) => Some(date),
            ParsedDate::Empty | ParsedDate::Unparseable => None,
        }
    }
}

/// Reads typed text as a date in the locale's field order.
///
/// Fields may be separated by any run of `-`, `/`, `.`, `,` or spaces. Text
/// whose first field has four digits is always read year-first, so the
/// canonical `YYYY-MM-DD` form parses in every locale. A two-digit year is
/// taken as `20yy`.
pub fn parse_date(text: &str, locale: &Locale) -> ParsedDate {
    let text = text.trim();
    if text.is_empty() {
        return ParsedDate::Empty;
    }
    let parsed = parse_fields(text, locale.order).map_or(ParsedDate::Unparseable, ParsedDate::Date);
    trace!(text, locale = %locale, ?parsed, "parsed date text");
    parsed
}

fn parse_fields(text: &str, order: DateOrder) -> Option<CalendarDate> {
    let is_separator = |c: char| matches!(c, '-' | '/' | '.' | ',' | ' ');
    if !text.chars().all(|c| c.is_ascii_digit() || is_separator(c)) {
        return None;
    }
    let fields: SmallVec<[&str; 3]> = text
        .split(is_separator)
        .filter(|field| !field.is_empty())
        .collect();
    let [first, second, third] = fields.as_slice() else {
        return None;
    };
    let (year, month, day) = if first.len() == 4 {
        (first, second, third)
    } else {
        match order {
            DateOrder::Ymd => (first, second, third),
            DateOrder::Mdy => (third, first, second),
            DateOrder::Dmy => (third, second, first),
        }
    };
    if month.len() > 2 || day.len() > 2 {
        return None;
    }
    let year: i32 = match year.len() {
        4 => year.parse().ok()?,
        2 => 2000 + year.parse::<i32>().ok()?,
        _ => return None,
    };
    CalendarDate::new(year, month.parse().ok()?, day.parse().ok()?)
}

/// Formats `date` the way the locale writes short dates.
pub fn format_date(date: CalendarDate, locale: &Locale) -> String {
    let sep = locale.separator;
    let (year, month, day) = (date.year(), date.month(), date.day());
    match locale.order {
        DateOrder::Ymd => format!("{year:04}{sep}{month:02}{sep}{day:02}"),
        DateOrder::Mdy => format!("{month:02}{sep}{day:02}{sep}{year:04}"),
        DateOrder::Dmy => format!("{day:02}{sep}{month:02}{sep}{year:04}"),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(year: i32, month: u8, day: u8) -> CalendarDate {
        CalendarDate::new(year, month, day).unwrap()
    }

    fn presets() -> Vec<Locale> {
        vec![
            Locale::iso(),
            Locale::en_us(),
            Locale::en_gb(),
            Locale::de_de(),
            Locale::fr_fr(),
            Locale::ja_jp(),
            Locale::zh_cn(),
        ]
    }

    #[test]
    fn test_blank_text_is_empty() {
        assert_eq!(parse_date("", &Locale::en_us()), ParsedDate::Empty);
        assert_eq!(parse_date("   ", &Locale::de_de()), ParsedDate::Empty);
    }

    #[test]
    fn test_canonical_form_parses_everywhere() {
        let value = date(2024, 3, 15);
        for locale in presets() {
            assert_eq!(
                parse_date(&value.to_string(), &locale),
                ParsedDate::Date(value),
                "locale {locale}"
            );
            for bound in [date(0, 1, 1), date(9999, 12, 31)] {
                assert_eq!(parse_date(&bound.to_string(), &locale), ParsedDate::Date(bound));
            }
        }
    }

    #[test]
    fn test_formatted_dates_round_trip() {
        let days = [
            date(2024, 3, 5),
            date(1999, 12, 31),
            date(2024, 2, 29),
            date(987, 1, 1),
            date(0, 1, 1),
            date(9999, 12, 31),
        ];
        for locale in presets() {
            for day in days {
                let text = format_date(day, &locale);
                assert_eq!(parse_date(&text, &locale), ParsedDate::Date(day), "{text}");
            }
        }
    }

    #[test]
    fn test_locale_field_order() {
        assert_eq!(parse_date("03/04/2024", &Locale::en_us()).date(), Some(date(2024, 3, 4)));
        assert_eq!(parse_date("03/04/2024", &Locale::en_gb()).date(), Some(date(2024, 4, 3)));
        assert_eq!(parse_date("4.3.2024", &Locale::de_de()).date(), Some(date(2024, 3, 4)));
        assert_eq!(format_date(date(2024, 3, 4), &Locale::de_de()), "04.03.2024");
        assert_eq!(format_date(date(2024, 3, 4), &Locale::en_us()), "03/04/2024");
        assert_eq!(format_date(date(2024, 3, 4), &Locale::ja_jp()), "2024/03/04");
    }

    #[test]
    fn test_alternate_separators_and_short_years() {
        let locale = Locale::en_us();
        assert_eq!(parse_date("3-15-2024", &locale).date(), Some(date(2024, 3, 15)));
        assert_eq!(parse_date(" 3 15 2024 ", &locale).date(), Some(date(2024, 3, 15)));
        assert_eq!(parse_date("3/15/24", &locale).date(), Some(date(2024, 3, 15)));
        assert_eq!(parse_date("2024.03.15", &locale).date(), Some(date(2024, 3, 15)));
    }

    #[test]
    fn test_malformed_text_is_unparseable() {
        let locale = Locale::en_us();
        for text in ["03/15", "2024-02-30", "13/01/2024", "abc", "2024-03-15x", "1/2/3/4", "3/15/202"] {
            assert_eq!(parse_date(text, &locale), ParsedDate::Unparseable, "{text}");
        }
    }

    #[test]
    fn test_locale_tags() {
        let locale: Locale = "en_gb".parse().unwrap();
        assert_eq!(locale.tag(), "en-GB");
        assert_eq!(locale.order(), DateOrder::Dmy);
        let locale: Locale = "zh-Hans-CN".parse().unwrap();
        assert_eq!(locale.order(), DateOrder::Ymd);
        assert_eq!(locale.tag(), "zh-CN");
        let locale: Locale = "tlh".parse().unwrap();
        assert_eq!(locale.order(), DateOrder::Ymd);
        assert_eq!(locale.first_day_of_week(), Weekday::Monday);
        assert_eq!("".parse::<Locale>(), Err(LocaleError::Empty));
        assert!(matches!("e1-US".parse::<Locale>(), Err(LocaleError::Malformed(_))));
        assert!(matches!("en-US-x".parse::<Locale>(), Err(LocaleError::Malformed(_))));
    }
}
