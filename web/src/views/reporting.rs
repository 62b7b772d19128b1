use super::components::{ChartRangeSelect, DateRangeInputs, PresetButtons};
use crate::use_error;
use dioxus::document::eval;
use dioxus::prelude::*;
use types::reporting::{
    ReportFilters, ReportRow, ReportTotals, ReportingData, earning_points, format_percent,
    format_thousands, group_digits, summary_cards, to_csv, totals,
};
use ui::{Cell, DataTableCard, LineChartCard, SummaryCardView};

const HEADERS: [&str; 9] = [
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

fn report_cells(row: &ReportRow) -> Vec<Cell> {
    vec![
        row.date.as_str().into(),
        row.app_id.as_str().into(),
        row.site.as_str().into(),
        Cell::emphasized(format!("${}", format_thousands(row.revenue))),
        group_digits(row.impression).into(),
        format_percent(row.ectr, 1).into(),
        format_percent(row.ctr, 1).into(),
        format_percent(row.ad_exchange_match, 0).into(),
        format_percent(row.total_fill, 0).into(),
    ]
}

fn total_cells(t: &ReportTotals) -> Vec<Cell> {
    vec![
        Cell::emphasized("Total"),
        "".into(),
        "".into(),
        Cell::emphasized(format!("${}", format_thousands(t.revenue))),
        Cell::emphasized(group_digits(t.impression)),
        Cell::emphasized(format_percent(t.avg_ectr, 1)),
        Cell::emphasized(format_percent(t.avg_ctr, 1)),
        Cell::emphasized(format_percent(t.avg_ad_exchange_match, 0)),
        Cell::emphasized(format_percent(t.avg_total_fill, 0)),
    ]
}

/// Hand the CSV to the browser as a file download.
async fn download_csv(csv: String) -> Result<(), String> {
    let csv = serde_json::to_string(&csv).map_err(|e| e.to_string())?;
    let script = format!(
        r#"
        const blob = new Blob([{csv}], {{ type: "text/csv;charset=utf-8" }});
        const url = URL.createObjectURL(blob);
        const a = document.createElement("a");
        a.href = url;
        a.download = "report.csv";
        document.body.appendChild(a);
        a.click();
        a.remove();
        URL.revokeObjectURL(url);
        dioxus.send(true);
        "#
    );
    eval(&script)
        .recv::<bool>()
        .await
        .map(|_| ())
        .map_err(|e| e.to_string())
}

#[component]
pub fn Reporting() -> Element {
    let mut error_state = use_error();
    let mut data = use_signal(ReportingData::default);
    let mut loading = use_signal(|| true);
    let mut filters = use_signal(ReportFilters::default);

    use_effect(move || {
        spawn(async move {
            match api::reporting_data().await {
                Ok(d) => data.set(d),
                Err(e) => error_state.set_server_error(&e),
            }
            loading.set(false);
        });
    });

    let today = jiff::Zoned::now().date();
    let state = filters.read().clone();
    let (filtered, cards) = {
        let data = data.read();
        let filtered = state.filter(&data.table_data, today);
        let cards = summary_cards(&data.summary_cards, &filtered);
        (filtered, cards)
    };
    let points = earning_points(&filtered);
    let pagination = state.pagination(filtered.len());
    let rows: Vec<Vec<Cell>> = pagination.slice(&filtered).iter().map(report_cells).collect();
    let total_row = (!filtered.is_empty()).then(|| total_cells(&totals(&filtered)));
    let csv = to_csv(&filtered);

    rsx! {
        div {
            div { class: "page-header",
                h1 { class: "page-title", "Reporting" }
                p { class: "page-subtitle", "Offers real-time and historical reporting for ad campaigns" }
            }

            div { class: "card filter-card",
                div { class: "card-header",
                    h2 { class: "card-title", "Filter Option" }
                    div { class: "card-header-actions",
                        button {
                            class: "btn btn-primary btn-sm",
                            onclick: move |_| filters.write().generate(),
                            "Generate Report"
                        }
                        button {
                            class: "btn btn-secondary btn-sm",
                            onclick: move |_| {
                                let csv = csv.clone();
                                spawn(async move {
                                    if let Err(error) = download_csv(csv).await {
                                        tracing::warn!(%error, "csv download failed");
                                        error_state.set(format!("CSV download failed: {error}"));
                                    }
                                });
                            },
                            "Download CSV"
                        }
                        button {
                            class: "btn btn-secondary btn-sm",
                            onclick: move |_| filters.write().reset(),
                            "Reset"
                        }
                        button {
                            class: "btn btn-link",
                            aria_label: if state.filter_open { "Collapse filter" } else { "Expand filter" },
                            onclick: move |_| {
                                let mut f = filters.write();
                                f.filter_open = !f.filter_open;
                            },
                            if state.filter_open { "▴" } else { "▾" }
                        }
                    }
                }
                if state.filter_open {
                    div { class: "filter-grid",
                        div { class: "form-group",
                            span { class: "form-label", "Date Filter" }
                            PresetButtons {
                                selected: state.date_filter,
                                on_select: move |preset| filters.write().set_date_filter(preset),
                            }
                        }
                        DateRangeInputs {
                            start: state.start_date.clone(),
                            end: state.end_date.clone(),
                            on_start: move |v| filters.write().start_date = v,
                            on_end: move |v| filters.write().end_date = v,
                        }
                    }
                }
            }

            if loading() {
                div { class: "loading", "Loading..." }
            } else {
                div { class: "stat-grid",
                    for card in cards {
                        SummaryCardView { key: "{card.title}", card }
                    }
                }

                DataTableCard {
                    title: "Report Data",
                    headers: HEADERS.iter().map(|h| h.to_string()).collect::<Vec<_>>(),
                    rows,
                    total_row,
                    pagination,
                    on_page_change: move |page| filters.write().set_page(page),
                    empty_message: "No report rows for this period".to_string(),
                }

                LineChartCard {
                    title: "Daily Performance",
                    subtitle: state.chart_range.label().to_string(),
                    value_label: "Estimated Earning ($)".to_string(),
                    points,
                    ChartRangeSelect {
                        selected: state.chart_range,
                        on_select: move |range| filters.write().chart_range = range,
                    }
                }
            }
        }
    }
}
