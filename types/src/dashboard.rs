use jiff::civil::Date;
use serde::{Deserialize, Serialize};
use std::collections::HashSet;

use crate::SiteRow;
use crate::pagination::Pagination;
use crate::period::{ChartPoint, ChartRange, DateFilter, Period, daily_totals, parse_input_date, round2};

pub const DEFAULT_START: &str = "2026-01-22";
pub const DEFAULT_END: &str = "2026-02-20";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DashboardRow {
    pub date: String,
    pub app_id: String,
    pub site: String,
    pub revenue: f64,
    pub impressions: u64,
    pub clicks: u64,
    pub ectr: f64,
    pub ctr: f64,
    pub ad_exchange_match_rate: f64,
    pub total_fill_rate: f64,
}

impl SiteRow for DashboardRow {
    fn site(&self) -> &str {
        &self.site
    }
}

/// A stat value as written in the fixture: usually a number, sometimes text.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum StatValue {
    Number(f64),
    Text(String),
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StatTemplate {
    pub title: String,
    pub value: StatValue,
    #[serde(default)]
    pub change: f64,
    #[serde(default)]
    pub icon: Option<String>,
    #[serde(default)]
    pub bg_class: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StatCard {
    pub title: String,
    pub value: StatValue,
    pub is_currency: bool,
    pub change: f64,
    pub icon: Option<String>,
    pub bg_class: Option<String>,
}

impl StatCard {
    pub fn display_value(&self) -> String {
        match &self.value {
            StatValue::Number(n) if self.is_currency => format!("${n}"),
            StatValue::Number(n) => n.to_string(),
            StatValue::Text(s) => s.clone(),
        }
    }

    pub fn display_change(&self) -> String {
        if self.change > 0.0 {
            format!("+{}%", self.change)
        } else {
            format!("{}%", self.change)
        }
    }

    /// Caption rendered under the value.
    pub fn caption(&self) -> Option<&'static str> {
        match self.title.as_str() {
            "Total Earnings" => Some("Overall"),
            "Select Range" => Some("Current Filter Period"),
            "Last & Next 7 Days" => Some("Recent week performance"),
            "Page Views" => Some("Total visitor views"),
            "Impressions" => Some("Ad display count"),
            "Clicks" => Some("Ad interaction count"),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DashboardData {
    pub table_data: Vec<DashboardRow>,
    pub stats: Vec<StatTemplate>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum DashboardColumn {
    Date,
    AppId,
    Site,
    Revenue,
    Impressions,
    Clicks,
    Ectr,
    Ctr,
    AdExchangeMatchRate,
    TotalFillRate,
}

impl DashboardColumn {
    pub const ALL: [DashboardColumn; 10] = [
        DashboardColumn::Date,
        DashboardColumn::AppId,
        DashboardColumn::Site,
        DashboardColumn::Revenue,
        DashboardColumn::Impressions,
        DashboardColumn::Clicks,
        DashboardColumn::Ectr,
        DashboardColumn::Ctr,
        DashboardColumn::AdExchangeMatchRate,
        DashboardColumn::TotalFillRate,
    ];

    pub fn key(&self) -> &'static str {
        match self {
            DashboardColumn::Date => "date",
            DashboardColumn::AppId => "appId",
            DashboardColumn::Site => "site",
            DashboardColumn::Revenue => "revenue",
            DashboardColumn::Impressions => "impressions",
            DashboardColumn::Clicks => "clicks",
            DashboardColumn::Ectr => "ectr",
            DashboardColumn::Ctr => "ctr",
            DashboardColumn::AdExchangeMatchRate => "adExchangeMatchRate",
            DashboardColumn::TotalFillRate => "totalFillRate",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            DashboardColumn::Date => "Date",
            DashboardColumn::AppId => "App ID",
            DashboardColumn::Site => "Site",
            DashboardColumn::Revenue => "Revenue",
            DashboardColumn::Impressions => "Impressions",
            DashboardColumn::Clicks => "Clicks",
            DashboardColumn::Ectr => "eCTR",
            DashboardColumn::Ctr => "CTR",
            DashboardColumn::AdExchangeMatchRate => "Ad Exchange Match Rate",
            DashboardColumn::TotalFillRate => "Total Fill Rate",
        }
    }

    pub fn render(&self, row: &DashboardRow) -> String {
        match self {
            DashboardColumn::Date => row.date.clone(),
            DashboardColumn::AppId => row.app_id.clone(),
            DashboardColumn::Site => row.site.clone(),
            DashboardColumn::Revenue => format!("${:.2}", row.revenue),
            DashboardColumn::Impressions => row.impressions.to_string(),
            DashboardColumn::Clicks => row.clicks.to_string(),
            DashboardColumn::Ectr => row.ectr.to_string(),
            DashboardColumn::Ctr => format!("{:.2}%", row.ctr),
            DashboardColumn::AdExchangeMatchRate => row.ad_exchange_match_rate.to_string(),
            DashboardColumn::TotalFillRate => row.total_fill_rate.to_string(),
        }
    }

    pub fn is_emphasized(&self) -> bool {
        matches!(self, DashboardColumn::Revenue)
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct Aggregates {
    pub total_revenue: f64,
    pub avg_revenue: f64,
    pub total_impressions: u64,
    pub total_clicks: u64,
}

pub fn aggregate(rows: &[DashboardRow]) -> Aggregates {
    if rows.is_empty() {
        return Aggregates::default();
    }

    let total_revenue: f64 = rows.iter().map(|r| r.revenue).sum();
    Aggregates {
        total_revenue,
        avg_revenue: total_revenue / rows.len() as f64,
        total_impressions: rows.iter().map(|r| r.impressions).sum(),
        total_clicks: rows.iter().map(|r| r.clicks).sum(),
    }
}

/// Fill the stat templates with values computed from the filtered rows.
pub fn stat_cards(templates: &[StatTemplate], agg: &Aggregates) -> Vec<StatCard> {
    templates
        .iter()
        .map(|t| {
            let computed = match t.title.as_str() {
                "Total Earnings" | "Last & Next 7 Days" => Some((round2(agg.total_revenue), true)),
                "Select Range" => Some((round2(agg.avg_revenue), true)),
                "Page Views" | "Impressions" => Some((agg.total_impressions as f64, false)),
                "Clicks" => Some((agg.total_clicks as f64, false)),
                _ => None,
            };

            let (value, is_currency) = match computed {
                Some((n, currency)) => (StatValue::Number(n), currency),
                None => (t.value.clone(), false),
            };

            StatCard {
                title: t.title.clone(),
                value,
                is_currency,
                change: t.change,
                icon: t.icon.clone(),
                bg_class: t.bg_class.clone(),
            }
        })
        .collect()
}

/// Daily revenue for the line chart.
pub fn chart_points(rows: &[DashboardRow]) -> Vec<ChartPoint> {
    daily_totals(rows.iter().map(|r| (r.date.as_str(), r.revenue)))
}

/// Distinct sites, in first-seen order, matching the typed domain text.
pub fn domain_suggestions<R: SiteRow>(rows: &[R], query: &str) -> Vec<String> {
    let query = query.trim().to_lowercase();
    let mut seen = HashSet::new();

    rows.iter()
        .map(|r| r.site())
        .filter(|site| seen.insert(*site))
        .filter(|site| site.to_lowercase().contains(&query))
        .map(String::from)
        .collect()
}

/// All interactive state of the dashboard's filter panel and table.
#[derive(Debug, Clone, PartialEq)]
pub struct DashboardFilters {
    pub filter_open: bool,
    pub date_filter: DateFilter,
    pub start_date: String,
    pub end_date: String,
    applied_start: Option<Date>,
    applied_end: Option<Date>,
    pub domain: String,
    pub domain_dropdown_open: bool,
    pub chart_range: ChartRange,
    search: String,
    current_page: usize,
    pub column_picker_open: bool,
    visible_columns: Vec<DashboardColumn>,
    draft_columns: Vec<DashboardColumn>,
}

impl Default for DashboardFilters {
    fn default() -> Self {
        Self {
            filter_open: true,
            date_filter: DateFilter::default(),
            start_date: DEFAULT_START.to_string(),
            end_date: DEFAULT_END.to_string(),
            applied_start: None,
            applied_end: None,
            domain: String::new(),
            domain_dropdown_open: false,
            chart_range: ChartRange::default(),
            search: String::new(),
            current_page: 1,
            column_picker_open: false,
            visible_columns: DashboardColumn::ALL.to_vec(),
            draft_columns: DashboardColumn::ALL.to_vec(),
        }
    }
}

impl DashboardFilters {
    pub fn period(&self) -> Period {
        Period {
            preset: self.date_filter,
            start: self.applied_start,
            end: self.applied_end,
        }
    }

    pub fn search(&self) -> &str {
        &self.search
    }

    pub fn current_page(&self) -> usize {
        self.current_page
    }

    pub fn matches(&self, row: &DashboardRow, today: Date) -> bool {
        let query = self.search.trim().to_lowercase();
        let matches_search = query.is_empty()
            || format!("{} {} {}", row.date, row.app_id, row.site)
                .to_lowercase()
                .contains(&query);

        let matches_domain =
            self.domain.is_empty() || row.site.to_lowercase().contains(&self.domain.to_lowercase());

        matches_search && matches_domain && self.period().matches(&row.date, today)
    }

    pub fn filter(&self, rows: &[DashboardRow], today: Date) -> Vec<DashboardRow> {
        rows.iter()
            .filter(|row| self.matches(row, today))
            .cloned()
            .collect()
    }

    pub fn pagination(&self, len: usize) -> Pagination {
        Pagination::new(len, self.current_page)
    }

    pub fn set_page(&mut self, page: usize) {
        self.current_page = page.max(1);
    }

    pub fn set_date_filter(&mut self, preset: DateFilter) {
        self.date_filter = preset;
        self.current_page = 1;
    }

    pub fn set_search(&mut self, query: impl Into<String>) {
        self.search = query.into();
        self.current_page = 1;
    }

    pub fn set_domain(&mut self, domain: impl Into<String>) {
        self.domain = domain.into();
        self.current_page = 1;
    }

    /// "Apply Filter": the start/end inputs become the active range.
    pub fn apply_filter(&mut self) {
        self.applied_start = parse_input_date(&self.start_date);
        self.applied_end = parse_input_date(&self.end_date);
        self.current_page = 1;
    }

    pub fn reset_all(&mut self) {
        *self = Self {
            filter_open: self.filter_open,
            chart_range: self.chart_range,
            ..Self::default()
        };
    }

    /// Same as [`Self::reset_all`]; bound to the table's reset button.
    pub fn reset_table_filters(&mut self) {
        self.reset_all();
    }

    pub fn visible_columns(&self) -> Vec<DashboardColumn> {
        DashboardColumn::ALL
            .into_iter()
            .filter(|c| self.visible_columns.contains(c))
            .collect()
    }

    pub fn is_draft_selected(&self, column: DashboardColumn) -> bool {
        self.draft_columns.contains(&column)
    }

    pub fn draft_is_empty(&self) -> bool {
        self.draft_columns.is_empty()
    }

    pub fn open_column_picker(&mut self) {
        self.draft_columns = self.visible_columns.clone();
        self.column_picker_open = true;
    }

    pub fn toggle_draft_column(&mut self, column: DashboardColumn) {
        if let Some(idx) = self.draft_columns.iter().position(|c| *c == column) {
            self.draft_columns.remove(idx);
        } else {
            self.draft_columns.push(column);
        }
    }

    pub fn select_all_draft_columns(&mut self) {
        self.draft_columns = DashboardColumn::ALL.to_vec();
    }

    pub fn clear_draft_columns(&mut self) {
        self.draft_columns.clear();
    }

    /// Commit the draft selection. Refused while nothing is selected.
    pub fn apply_column_picker(&mut self) {
        if self.draft_columns.is_empty() {
            return;
        }
        self.visible_columns = self.draft_columns.clone();
        self.applied_start = parse_input_date(&self.start_date);
        self.applied_end = parse_input_date(&self.end_date);
        self.current_page = 1;
        self.column_picker_open = false;
    }

    pub fn close_column_picker(&mut self) {
        self.column_picker_open = false;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use jiff::civil::date;

    fn row(day: &str, app: &str, site: &str, revenue: f64) -> DashboardRow {
        DashboardRow {
            date: day.to_string(),
            app_id: app.to_string(),
            site: site.to_string(),
            revenue,
            impressions: 1000,
            clicks: 10,
            ectr: 1.0,
            ctr: 1.0,
            ad_exchange_match_rate: 90.0,
            total_fill_rate: 80.0,
        }
    }

    fn rows() -> Vec<DashboardRow> {
        vec![
            row("Feb 20, 2026", "app-1", "finrezo.com", 10.0),
            row("Feb 14, 2026", "app-2", "newsbay.net", 20.0),
            row("Feb 02, 2026", "app-1", "finrezo.com", 30.0),
            row("Jan 25, 2026", "app-3", "techpulse.io", 40.0),
        ]
    }

    const TODAY: Date = date(2026, 2, 20);

    #[test]
    fn default_preset_is_this_month() {
        let filters = DashboardFilters::default();
        let visible = filters.filter(&rows(), TODAY);
        assert_eq!(visible.len(), 3);
    }

    #[test]
    fn week_and_today_presets() {
        let mut filters = DashboardFilters::default();

        filters.date_filter = DateFilter::Week;
        assert_eq!(filters.filter(&rows(), TODAY).len(), 2);

        filters.date_filter = DateFilter::Today;
        assert_eq!(filters.filter(&rows(), TODAY).len(), 1);
    }

    #[test]
    fn applied_range_replaces_preset() {
        let mut filters = DashboardFilters::default();
        filters.date_filter = DateFilter::Today;
        filters.start_date = "2026-01-22".into();
        filters.end_date = "2026-02-10".into();
        filters.set_page(3);

        filters.apply_filter();

        assert_eq!(filters.current_page(), 1);
        let dates: Vec<_> = filters
            .filter(&rows(), TODAY)
            .into_iter()
            .map(|r| r.date)
            .collect();
        assert_eq!(dates, vec!["Feb 02, 2026", "Jan 25, 2026"]);
    }

    #[test]
    fn changing_preset_returns_to_first_page() {
        let mut filters = DashboardFilters::default();
        filters.set_page(3);

        filters.set_date_filter(DateFilter::Today);

        assert_eq!(filters.date_filter, DateFilter::Today);
        assert_eq!(filters.current_page(), 1);
        let visible = filters.filter(&rows(), TODAY);
        assert_eq!(filters.pagination(visible.len()).slice(&visible).len(), 1);
    }

    #[test]
    fn search_and_domain_filters() {
        let mut filters = DashboardFilters::default();
        filters.start_date = "2026-01-01".into();
        filters.apply_filter();

        filters.set_search("  APP-1 ");
        assert_eq!(filters.filter(&rows(), TODAY).len(), 2);

        filters.set_search("");
        filters.set_domain("Bay");
        let visible = filters.filter(&rows(), TODAY);
        assert_eq!(visible.len(), 1);
        assert_eq!(visible[0].site, "newsbay.net");
    }

    #[test]
    fn reset_restores_defaults() {
        let mut filters = DashboardFilters::default();
        filters.set_search("x");
        filters.set_domain("y");
        filters.date_filter = DateFilter::Today;
        filters.start_date = "2025-01-01".into();
        filters.apply_filter();
        filters.open_column_picker();
        filters.clear_draft_columns();
        filters.toggle_draft_column(DashboardColumn::Site);
        filters.apply_column_picker();

        filters.reset_table_filters();

        let defaults = DashboardFilters::default();
        assert_eq!(filters, defaults);
    }

    #[test]
    fn column_picker_refuses_empty_selection() {
        let mut filters = DashboardFilters::default();
        filters.open_column_picker();
        filters.clear_draft_columns();
        filters.apply_column_picker();

        assert!(filters.column_picker_open);
        assert_eq!(filters.visible_columns().len(), DashboardColumn::ALL.len());
    }

    #[test]
    fn column_picker_keeps_canonical_order_and_applies_range() {
        let mut filters = DashboardFilters::default();
        filters.set_page(2);
        filters.open_column_picker();
        filters.clear_draft_columns();
        filters.toggle_draft_column(DashboardColumn::Revenue);
        filters.toggle_draft_column(DashboardColumn::Date);
        filters.apply_column_picker();

        assert!(!filters.column_picker_open);
        assert_eq!(filters.current_page(), 1);
        assert_eq!(
            filters.visible_columns(),
            vec![DashboardColumn::Date, DashboardColumn::Revenue]
        );
        assert!(filters.period().has_range());
    }

    #[test]
    fn toggling_a_draft_column_twice_restores_it() {
        let mut filters = DashboardFilters::default();
        filters.open_column_picker();
        filters.toggle_draft_column(DashboardColumn::Ctr);
        assert!(!filters.is_draft_selected(DashboardColumn::Ctr));
        filters.toggle_draft_column(DashboardColumn::Ctr);
        assert!(filters.is_draft_selected(DashboardColumn::Ctr));
    }

    #[test]
    fn aggregates_and_stats() {
        let rows = rows();
        let agg = aggregate(&rows);
        assert_eq!(agg.total_revenue, 100.0);
        assert_eq!(agg.avg_revenue, 25.0);
        assert_eq!(agg.total_impressions, 4000);
        assert_eq!(agg.total_clicks, 40);

        let templates: Vec<StatTemplate> = serde_json::from_str(
            r#"[
                {"title": "Total Earnings", "value": 0, "change": 2.5},
                {"title": "Select Range", "value": 0, "change": -1},
                {"title": "Clicks", "value": 0, "change": 0},
                {"title": "Visitors", "value": "n/a", "change": 0}
            ]"#,
        )
        .unwrap();
        let cards = stat_cards(&templates, &agg);

        assert_eq!(cards[0].display_value(), "$100");
        assert_eq!(cards[0].display_change(), "+2.5%");
        assert_eq!(cards[1].display_value(), "$25");
        assert_eq!(cards[1].display_change(), "-1%");
        assert_eq!(cards[2].display_value(), "40");
        assert_eq!(cards[3].display_value(), "n/a");
        assert_eq!(cards[3].caption(), None);
    }

    #[test]
    fn empty_rows_aggregate_to_zero() {
        assert_eq!(aggregate(&[]), Aggregates::default());
        assert!(chart_points(&[]).is_empty());
    }

    #[test]
    fn chart_is_chronological() {
        let points = chart_points(&rows());
        let labels: Vec<_> = points.iter().map(|p| p.label.as_str()).collect();
        assert_eq!(labels, vec!["Jan 25", "Feb 02", "Feb 14", "Feb 20"]);
    }

    #[test]
    fn suggestions_are_distinct() {
        assert_eq!(
            domain_suggestions(&rows(), " FIN"),
            vec!["finrezo.com".to_string()]
        );
        assert_eq!(domain_suggestions(&rows(), "").len(), 3);
    }

    #[test]
    fn column_rendering() {
        let r = row("Feb 20, 2026", "app-1", "finrezo.com", 12.3);
        assert_eq!(DashboardColumn::Revenue.render(&r), "$12.30");
        assert_eq!(DashboardColumn::Ctr.render(&r), "1.00%");
        assert_eq!(DashboardColumn::Impressions.render(&r), "1000");
    }
}
