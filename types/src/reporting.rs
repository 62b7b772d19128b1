use jiff::civil::Date;
use serde::{Deserialize, Serialize};
use std::collections::HashSet;

use crate::SiteRow;
use crate::pagination::Pagination;
use crate::period::{ChartPoint, ChartRange, DateFilter, Period, daily_totals, parse_input_date};

pub const DEFAULT_START: &str = "2025-03-01";
pub const DEFAULT_END: &str = "2025-05-03";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ReportRow {
    pub date: String,
    pub app_id: String,
    pub site: String,
    pub revenue: f64,
    pub impression: u64,
    #[serde(rename = "eCTR")]
    pub ectr: f64,
    pub ctr: f64,
    pub ad_exchange_match: f64,
    pub total_fill: f64,
}

impl SiteRow for ReportRow {
    fn site(&self) -> &str {
        &self.site
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SummaryIcon {
    Revenue,
    Domain,
    Records,
    /// Any other key. Shown with the revenue icon and the template's value.
    #[serde(other)]
    Other,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SummaryTemplate {
    pub title: String,
    pub value: String,
    pub icon_key: Option<SummaryIcon>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SummaryCard {
    pub title: String,
    pub value: String,
    pub icon: SummaryIcon,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ReportingData {
    pub summary_cards: Vec<SummaryTemplate>,
    pub table_data: Vec<ReportRow>,
}

/// The totals row under the report table.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct ReportTotals {
    pub revenue: f64,
    pub impression: u64,
    pub avg_ectr: f64,
    pub avg_ctr: f64,
    pub avg_ad_exchange_match: f64,
    pub avg_total_fill: f64,
}

pub fn totals(rows: &[ReportRow]) -> ReportTotals {
    if rows.is_empty() {
        return ReportTotals::default();
    }

    let n = rows.len() as f64;
    let avg = |f: fn(&ReportRow) -> f64| rows.iter().map(f).sum::<f64>() / n;

    ReportTotals {
        revenue: rows.iter().map(|r| r.revenue).sum(),
        impression: rows.iter().map(|r| r.impression).sum(),
        avg_ectr: avg(|r| r.ectr),
        avg_ctr: avg(|r| r.ctr),
        avg_ad_exchange_match: avg(|r| r.ad_exchange_match),
        avg_total_fill: avg(|r| r.total_fill),
    }
}

pub fn summary_cards(templates: &[SummaryTemplate], rows: &[ReportRow]) -> Vec<SummaryCard> {
    templates
        .iter()
        .map(|t| {
            let icon = match t.icon_key {
                Some(SummaryIcon::Other) | None => SummaryIcon::Revenue,
                Some(icon) => icon,
            };
            let value = match t.icon_key {
                Some(SummaryIcon::Revenue) => {
                    format!("${}", format_thousands(totals(rows).revenue))
                }
                Some(SummaryIcon::Domain) => {
                    let sites: HashSet<_> = rows.iter().map(|r| r.site.trim().to_lowercase()).collect();
                    sites.len().to_string()
                }
                Some(SummaryIcon::Records) => rows.len().to_string(),
                Some(SummaryIcon::Other) | None => t.value.clone(),
            };
            SummaryCard {
                title: t.title.clone(),
                value,
                icon,
            }
        })
        .collect()
}

pub fn earning_points(rows: &[ReportRow]) -> Vec<ChartPoint> {
    daily_totals(rows.iter().map(|r| (r.date.as_str(), r.revenue)))
}

/// Format with thousands separators and at most two decimals: `12,345.5`.
pub fn format_thousands(value: f64) -> String {
    let negative = value < 0.0;
    let cents = (value.abs() * 100.0).round() as u64;
    let whole = group_digits(cents / 100);
    let frac = cents % 100;

    let mut out = String::new();
    if negative && cents != 0 {
        out.push('-');
    }
    out.push_str(&whole);
    if frac != 0 {
        let frac = format!("{frac:02}");
        out.push('.');
        out.push_str(frac.trim_end_matches('0'));
    }
    out
}

pub fn group_digits(n: u64) -> String {
    let digits = n.to_string();
    let mut out = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, c) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            out.push(',');
        }
        out.push(c);
    }
    out
}

pub fn format_percent(value: f64, decimals: usize) -> String {
    format!("{value:.decimals$}%")
}

const CSV_HEADER: [&str; 9] = [
    "Date",
    "App ID",
    "Site",
    "Revenue",
    "Impression",
    "eCTR",
    "CTR",
    "Ad Exchange Match Rate",
    "Total Fill Rate",
];

fn csv_field(field: &str) -> String {
    if field.contains([',', '"', '\n', '\r']) {
        format!("\"{}\"", field.replace('"', "\"\""))
    } else {
        field.to_string()
    }
}

/// Render the report rows for the "Download CSV" button.
pub fn to_csv(rows: &[ReportRow]) -> String {
    let mut out = CSV_HEADER.join(",");
    out.push('\n');

    for row in rows {
        let fields = [
            csv_field(&row.date),
            csv_field(&row.app_id),
            csv_field(&row.site),
            format!("{:.2}", row.revenue),
            row.impression.to_string(),
            format!("{:.1}", row.ectr),
            format!("{:.1}", row.ctr),
            format!("{:.0}", row.ad_exchange_match),
            format!("{:.0}", row.total_fill),
        ];
        out.push_str(&fields.join(","));
        out.push('\n');
    }
    out
}

/// State of the reporting page's filter panel.
#[derive(Debug, Clone, PartialEq)]
pub struct ReportFilters {
    pub filter_open: bool,
    pub date_filter: DateFilter,
    pub start_date: String,
    pub end_date: String,
    applied_start: Option<Date>,
    applied_end: Option<Date>,
    pub chart_range: ChartRange,
    current_page: usize,
}

impl Default for ReportFilters {
    fn default() -> Self {
        Self {
            filter_open: true,
            date_filter: DateFilter::default(),
            start_date: DEFAULT_START.to_string(),
            end_date: DEFAULT_END.to_string(),
            applied_start: None,
            applied_end: None,
            chart_range: ChartRange::default(),
            current_page: 1,
        }
    }
}

impl ReportFilters {
    pub fn period(&self) -> Period {
        Period {
            preset: self.date_filter,
            start: self.applied_start,
            end: self.applied_end,
        }
    }

    /// Whether "Generate Report" has applied a range. Until then the preset
    /// decides which rows are shown.
    pub fn is_generated(&self) -> bool {
        self.period().has_range()
    }

    pub fn filter(&self, rows: &[ReportRow], today: Date) -> Vec<ReportRow> {
        let period = self.period();
        rows.iter()
            .filter(|r| period.matches(&r.date, today))
            .cloned()
            .collect()
    }

    pub fn set_date_filter(&mut self, preset: DateFilter) {
        self.date_filter = preset;
        self.current_page = 1;
    }

    /// "Generate Report": apply the start/end inputs.
    pub fn generate(&mut self) {
        self.applied_start = parse_input_date(&self.start_date);
        self.applied_end = parse_input_date(&self.end_date);
        self.current_page = 1;
    }

    pub fn reset(&mut self) {
        *self = Self {
            filter_open: self.filter_open,
            ..Self::default()
        };
    }

    pub fn current_page(&self) -> usize {
        self.current_page
    }

    pub fn set_page(&mut self, page: usize) {
        self.current_page = page.max(1);
    }

    pub fn pagination(&self, len: usize) -> Pagination {
        Pagination::new(len, self.current_page)
    }
}
