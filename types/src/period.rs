//! Date presets and ranges shared by the dashboard and reporting filters.

use jiff::ToSpan;
use jiff::civil::Date;
use serde::{Deserialize, Serialize};

/// Format of the `date` column in the fixtures, e.g. `Feb 04, 2026`.
const ROW_DATE_FORMAT: &str = "%b %d, %Y";

/// Year used to order chart labels that carry no year (`Feb 04`).
pub const CHART_YEAR: i16 = 2026;

/// Parse a row date. Accepts the display format and ISO `YYYY-MM-DD`.
pub fn parse_row_date(text: &str) -> Option<Date> {
    let text = text.trim();
    Date::strptime(ROW_DATE_FORMAT, text)
        .ok()
        .or_else(|| text.parse().ok())
}

/// Parse the value of an `<input type="date">`. Empty means unset.
pub fn parse_input_date(text: &str) -> Option<Date> {
    let text = text.trim();
    if text.is_empty() {
        return None;
    }
    text.parse().ok().or_else(|| parse_row_date(text))
}

/// The day label used to group chart points: the text before the first comma.
pub fn day_label(date: &str) -> &str {
    date.split(',').next().unwrap_or(date).trim()
}

fn label_date(label: &str) -> Option<Date> {
    parse_row_date(&format!("{label}, {CHART_YEAR}"))
}

/// One point on a daily line chart.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChartPoint {
    pub label: String,
    pub value: f64,
}

/// Sum `value` per day label, round to cents and order chronologically.
/// Labels that do not parse as dates keep their first-seen order after the
/// dated ones.
pub fn daily_totals<'a, I>(rows: I) -> Vec<ChartPoint>
where
    I: IntoIterator<Item = (&'a str, f64)>,
{
    let mut points: Vec<ChartPoint> = Vec::new();
    for (date, value) in rows {
        let label = day_label(date);
        match points.iter_mut().find(|p| p.label == label) {
            Some(point) => point.value += value,
            None => points.push(ChartPoint {
                label: label.to_string(),
                value,
            }),
        }
    }

    for point in &mut points {
        point.value = round2(point.value);
    }
    points.sort_by_key(|p| match label_date(&p.label) {
        Some(date) => (0, Some(date)),
        None => (1, None),
    });
    points
}

pub fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum DateFilter {
    Today,
    Week,
    #[default]
    Month,
}

impl DateFilter {
    pub const ALL: [DateFilter; 3] = [DateFilter::Today, DateFilter::Week, DateFilter::Month];

    pub fn label(&self) -> &'static str {
        match self {
            DateFilter::Today => "Today",
            DateFilter::Week => "Last 7 Days",
            DateFilter::Month => "This Month",
        }
    }

    pub fn matches(&self, date: Date, today: Date) -> bool {
        match self {
            DateFilter::Today => date == today,
            DateFilter::Week => {
                let week_start = today.checked_sub(6.days()).unwrap_or(Date::MIN);
                date >= week_start && date <= today
            }
            DateFilter::Month => date.year() == today.year() && date.month() == today.month(),
        }
    }
}

/// Subtitle choice above the chart. It does not change the data.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum ChartRange {
    #[default]
    Last7Days,
    Last14Days,
    ThisMonth,
}

impl ChartRange {
    pub const ALL: [ChartRange; 3] = [
        ChartRange::Last7Days,
        ChartRange::Last14Days,
        ChartRange::ThisMonth,
    ];

    pub fn label(&self) -> &'static str {
        match self {
            ChartRange::Last7Days => "Last 7 Days",
            ChartRange::Last14Days => "Last 14 Days",
            ChartRange::ThisMonth => "This Month",
        }
    }

    pub fn from_label(label: &str) -> Self {
        Self::ALL
            .into_iter()
            .find(|r| r.label() == label)
            .unwrap_or_default()
    }
}

/// Date constraint on table rows: an applied start/end range, or the preset
/// when no range bound has been applied.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Period {
    pub preset: DateFilter,
    pub start: Option<Date>,
    pub end: Option<Date>,
}

impl Period {
    pub fn has_range(&self) -> bool {
        self.start.is_some() || self.end.is_some()
    }

    /// Rows with an unparseable date only pass when nothing constrains them.
    pub fn matches(&self, row_date: &str, today: Date) -> bool {
        let date = parse_row_date(row_date);

        if !self.has_range() {
            return date.is_some_and(|d| self.preset.matches(d, today));
        }

        let Some(date) = date else {
            return false;
        };
        self.start.is_none_or(|start| date >= start) && self.end.is_none_or(|end| date <= end)
    }
}
