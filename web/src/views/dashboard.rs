use super::components::{ChartRangeSelect, DateRangeInputs, Modal, PresetButtons};
use crate::use_error;
use dioxus::prelude::*;
use types::dashboard::{
    DashboardColumn, DashboardData, DashboardFilters, aggregate, chart_points, domain_suggestions,
    stat_cards,
};
use ui::{Cell, DataTableCard, LineChartCard, StatCardView};

#[component]
pub fn Dashboard() -> Element {
    let mut error_state = use_error();
    let mut data = use_signal(DashboardData::default);
    let mut loading = use_signal(|| true);
    let mut filters = use_signal(DashboardFilters::default);

    use_effect(move || {
        spawn(async move {
            match api::dashboard_data().await {
                Ok(d) => data.set(d),
                Err(e) => error_state.set_server_error(&e),
            }
            loading.set(false);
        });
    });

    let today = jiff::Zoned::now().date();
    let state = filters.read().clone();
    let (filtered, stats, suggestions) = {
        let data = data.read();
        let filtered = state.filter(&data.table_data, today);
        let stats = stat_cards(&data.stats, &aggregate(&filtered));
        let suggestions = domain_suggestions(&data.table_data, &state.domain);
        (filtered, stats, suggestions)
    };
    let no_suggestions = suggestions.is_empty();
    let points = chart_points(&filtered);
    let columns = state.visible_columns();
    let pagination = state.pagination(filtered.len());
    let rows: Vec<Vec<Cell>> = pagination
        .slice(&filtered)
        .iter()
        .map(|row| {
            columns
                .iter()
                .map(|c| {
                    let text = c.render(row);
                    if c.is_emphasized() {
                        Cell::emphasized(text)
                    } else {
                        Cell::from(text)
                    }
                })
                .collect()
        })
        .collect();
    let headers: Vec<String> = columns.iter().map(|c| c.label().to_string()).collect();

    rsx! {
        div {
            div { class: "page-header",
                h1 { class: "page-title", "Dashboard" }
                p { class: "page-subtitle", "Earnings and traffic for your domains." }
            }

            div { class: "card filter-card",
                div { class: "card-header",
                    h2 { class: "card-title", "Filter Option" }
                    div { class: "card-header-actions",
                        button {
                            class: "btn btn-primary btn-sm",
                            onclick: move |_| filters.write().apply_filter(),
                            "Apply Filter"
                        }
                        button {
                            class: "btn btn-secondary btn-sm",
                            onclick: move |_| filters.write().reset_all(),
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
                        div { class: "form-group domain-picker",
                            label { class: "form-label", r#for: "domain", "Domain" }
                            input {
                                id: "domain",
                                class: "form-input",
                                r#type: "text",
                                placeholder: "Search or select domain (e.g. finrezo.com)",
                                value: "{state.domain}",
                                oninput: move |e| {
                                    let mut f = filters.write();
                                    f.set_domain(e.value());
                                    f.domain_dropdown_open = true;
                                },
                                onfocus: move |_| filters.write().domain_dropdown_open = true,
                            }
                            if state.domain_dropdown_open {
                                div {
                                    class: "dropdown-backdrop",
                                    onclick: move |_| filters.write().domain_dropdown_open = false,
                                }
                                div { class: "dropdown-menu",
                                    for site in suggestions {
                                        button {
                                            key: "{site}",
                                            class: "dropdown-item",
                                            onclick: {
                                                let site = site.clone();
                                                move |_| {
                                                    let mut f = filters.write();
                                                    f.set_domain(site.clone());
                                                    f.domain_dropdown_open = false;
                                                }
                                            },
                                            "{site}"
                                        }
                                    }
                                    if no_suggestions {
                                        div { class: "dropdown-empty text-muted", "No matching domains" }
                                    }
                                }
                            }
                        }
                        div { class: "form-group",
                            span { class: "form-label", "Date" }
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
                    for card in stats {
                        StatCardView { key: "{card.title}", card }
                    }
                }

                LineChartCard {
                    title: "Daily Performance",
                    subtitle: state.chart_range.label().to_string(),
                    value_label: "Daily Earning ($)".to_string(),
                    height: 280.0,
                    points,
                    ChartRangeSelect {
                        selected: state.chart_range,
                        on_select: move |range| filters.write().chart_range = range,
                    }
                }

                DataTableCard {
                    title: "Detailed Report",
                    headers,
                    rows,
                    pagination,
                    on_page_change: move |page| filters.write().set_page(page),
                    empty_message: "No rows match the current filters".to_string(),
                    div { class: "card-header-actions",
                        input {
                            class: "form-input form-input-sm",
                            r#type: "search",
                            placeholder: "Search...",
                            value: "{state.search()}",
                            oninput: move |e| filters.write().set_search(e.value()),
                        }
                        button {
                            class: "btn btn-primary btn-sm",
                            onclick: move |_| filters.write().open_column_picker(),
                            "+ Apply Filter"
                        }
                        button {
                            class: "btn btn-secondary btn-sm",
                            onclick: move |_| filters.write().reset_table_filters(),
                            "Reset"
                        }
                    }
                }
            }

            if state.column_picker_open {
                ColumnPicker { filters }
            }
        }
    }
}

#[component]
fn ColumnPicker(filters: Signal<DashboardFilters>) -> Element {
    let state = filters.read().clone();

    rsx! {
        Modal {
            title: "Table Columns",
            subtitle: "Choose which column headers you want to show in the table.".to_string(),
            on_close: move |_| filters.write().close_column_picker(),
            footer: rsx! {
                button {
                    class: "btn btn-secondary",
                    onclick: move |_| filters.write().close_column_picker(),
                    "Cancel"
                }
                button {
                    class: "btn btn-primary",
                    disabled: state.draft_is_empty(),
                    onclick: move |_| filters.write().apply_column_picker(),
                    "Apply"
                }
            },
            ul { class: "group-checklist",
                for column in DashboardColumn::ALL {
                    li { key: "{column.key()}", class: "group-checklist-item",
                        label { class: "checkbox-label",
                            input {
                                r#type: "checkbox",
                                checked: state.is_draft_selected(column),
                                onchange: move |_| filters.write().toggle_draft_column(column),
                            }
                            span { "{column.label()}" }
                        }
                    }
                }
            }
            div { class: "button-row",
                button {
                    class: "btn btn-link",
                    onclick: move |_| filters.write().select_all_draft_columns(),
                    "Select all"
                }
                button {
                    class: "btn btn-link",
                    onclick: move |_| filters.write().clear_draft_columns(),
                    "Clear"
                }
            }
        }
    }
}
