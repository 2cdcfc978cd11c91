#![cfg_attr(feature = "fail-on-warnings", deny(warnings))]
#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
#![allow(clippy::multiple_crate_versions, clippy::cargo_common_metadata)]

//! Incident record and victim category types.
//!
//! An [`IncidentRecord`] is one row of the massacre dataset after parsing.
//! Records are read-only value objects: every filter or aggregation builds a
//! new collection or a derived value instead of mutating a record.

use chrono::{Datelike as _, NaiveDate};
use serde::{Deserialize, Serialize};
use strum_macros::{AsRefStr, Display, EnumString};

/// Victim category tracked per incident.
///
/// Used as the category key for tooltips and as the stack key of the yearly
/// timeline.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    PartialOrd,
    Ord,
    Hash,
    Serialize,
    Deserialize,
    Display,
    EnumString,
    AsRefStr,
)]
#[serde(rename_all = "camelCase")]
#[strum(serialize_all = "camelCase")]
pub enum VictimCategory {
    /// Victims of state or police action
    StateAction,
    /// Victims of faction or militia conflict
    Militia,
    /// Police officers killed
    Police,
    /// Enforced disappearances
    Disappearances,
    /// Victims under 18 (overlaps the other categories)
    Minors,
}

impl VictimCategory {
    /// Categories that partition the victim total and are stacked in the
    /// timeline. [`Self::Minors`] is excluded because it overlaps them.
    pub const STACKED: &'static [Self] = &[
        Self::StateAction,
        Self::Militia,
        Self::Police,
        Self::Disappearances,
    ];

    /// Returns all variants of this enum.
    #[must_use]
    pub const fn all() -> &'static [Self] {
        &[
            Self::StateAction,
            Self::Militia,
            Self::Police,
            Self::Disappearances,
            Self::Minors,
        ]
    }

    /// Human-readable label shown in the legend and tooltips.
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::StateAction => "State/Police Action",
            Self::Militia => "Faction/Militia Conflict",
            Self::Police => "Police Officers",
            Self::Disappearances => "Enforced Disappearances",
            Self::Minors => "Minors (Under 18)",
        }
    }
}

/// One parsed row of the source dataset.
///
/// Coordinates that could not be parsed are `None` rather than `0.0`, so an
/// unparsable row is never plotted at the origin. Victim counts are always
/// present; malformed source cells resolve to `0`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct IncidentRecord {
    /// Name of the massacre. May be empty.
    pub name: String,
    /// Free-text location as written in the source.
    pub location: String,
    /// Latitude (WGS84), `None` if unparsable.
    pub lat: Option<f64>,
    /// Longitude (WGS84), `None` if unparsable.
    pub lon: Option<f64>,
    /// Date as written in the source. See [`parse_incident_date`].
    pub date: String,
    /// State governor at the time of the incident.
    pub governor: String,
    /// Victims under 18.
    pub minors: u32,
    /// Enforced disappearances.
    pub disappearances: u32,
    /// Victims of state or police action.
    pub state_action: u32,
    /// Victims of faction or militia conflict.
    pub militia: u32,
    /// Police officers killed.
    pub police: u32,
    /// Victim names, free text.
    pub names: String,
    /// Additional notes, free text.
    pub notes: String,
    /// Source link (`WikiFavelas`). May be empty.
    pub link: String,
}

impl IncidentRecord {
    /// Returns `(lat, lon)` when both coordinates are valid.
    #[must_use]
    pub fn position(&self) -> Option<(f64, f64)> {
        Some((self.lat?, self.lon?))
    }

    /// Returns the count for a single victim category.
    #[must_use]
    pub const fn count(&self, category: VictimCategory) -> u32 {
        match category {
            VictimCategory::StateAction => self.state_action,
            VictimCategory::Militia => self.militia,
            VictimCategory::Police => self.police,
            VictimCategory::Disappearances => self.disappearances,
            VictimCategory::Minors => self.minors,
        }
    }

    /// Sum of the four stacked categories (state action, militia, police,
    /// disappearances).
    #[must_use]
    pub fn total_victims(&self) -> u64 {
        VictimCategory::STACKED
            .iter()
            .map(|c| u64::from(self.count(*c)))
            .sum()
    }

    /// Parses [`Self::date`] into a calendar date.
    #[must_use]
    pub fn parsed_date(&self) -> Option<NaiveDate> {
        parse_incident_date(&self.date)
    }

    /// Calendar year of the incident, if the date is parsable.
    #[must_use]
    pub fn year(&self) -> Option<i32> {
        self.parsed_date().map(|d| d.year())
    }
}

/// Full-date formats accepted in the `Date` column, tried in order.
///
/// Day-first numeric formats come before anything else because the dataset
/// is authored in Brazil.
const DATE_FORMATS: &[&str] = &[
    "%Y-%m-%d",
    "%d/%m/%Y",
    "%d-%m-%Y",
    "%d.%m.%Y",
    "%B %d, %Y",
    "%b %d, %Y",
    "%d %B %Y",
    "%d %b %Y",
    "%Y/%m/%d",
];

/// Parses a source date string into a calendar date.
///
/// Besides the formats in [`DATE_FORMATS`], accepts `YYYY-MM` (first day of
/// the month) and a bare `YYYY` (January 1st). Returns `None` for anything
/// else.
#[must_use]
pub fn parse_incident_date(s: &str) -> Option<NaiveDate> {
    let s = s.trim();
    if s.is_empty() {
        return None;
    }

    for format in DATE_FORMATS {
        if let Ok(date) = NaiveDate::parse_from_str(s, format) {
            return Some(date);
        }
    }

    if let Some((year, month)) = s.split_once('-')
        && year.len() == 4
        && let (Ok(year), Ok(month)) = (year.parse::<i32>(), month.parse::<u32>())
    {
        return NaiveDate::from_ymd_opt(year, month, 1);
    }

    if s.len() == 4 && s.bytes().all(|b| b.is_ascii_digit()) {
        return s
            .parse::<i32>()
            .ok()
            .and_then(|year| NaiveDate::from_ymd_opt(year, 1, 1));
    }

    None
}
