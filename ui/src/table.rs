use dioxus::prelude::*;
use types::pagination::Pagination;

/// One table cell: text plus an optional class overriding the default.
#[derive(Debug, Clone, PartialEq)]
pub struct Cell {
    pub text: String,
    pub class: Option<&'static str>,
}

impl Cell {
    pub fn emphasized(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            class: Some("cell-strong"),
        }
    }
}

impl From<String> for Cell {
    fn from(text: String) -> Self {
        Self { text, class: None }
    }
}

impl From<&str> for Cell {
    fn from(text: &str) -> Self {
        Self::from(text.to_string())
    }
}

/// White card with a title, a table, an optional totals row and pagination.
/// `children` render on the right of the title.
#[component]
pub fn DataTableCard(
    #[props(into)] title: String,
    headers: Vec<String>,
    rows: Vec<Vec<Cell>>,
    #[props(default)] total_row: Option<Vec<Cell>>,
    #[props(default)] pagination: Option<Pagination>,
    #[props(default)] on_page_change: EventHandler<usize>,
    #[props(default)] empty_message: Option<String>,
    children: Element,
) -> Element {
    let show_empty = rows.is_empty() && total_row.is_none();

    rsx! {
        div { class: "card",
            div { class: "card-header",
                h2 { class: "card-title", "{title}" }
                {children}
            }
            div { class: "table-container",
                table {
                    thead {
                        tr {
                            for header in headers.iter() {
                                th { key: "{header}", "{header}" }
                            }
                        }
                    }
                    tbody {
                        for (i, row) in rows.iter().enumerate() {
                            tr { key: "{i}",
                                for (j, cell) in row.iter().enumerate() {
                                    td { key: "{j}", class: cell.class, "{cell.text}" }
                                }
                            }
                        }
                        if show_empty {
                            tr {
                                td {
                                    class: "table-empty",
                                    colspan: "{headers.len()}",
                                    {empty_message.clone().unwrap_or_else(|| "No data".to_string())}
                                }
                            }
                        }
                        if let Some(total) = total_row {
                            tr { class: "table-total",
                                for (j, cell) in total.iter().enumerate() {
                                    td { key: "{j}", class: cell.class, "{cell.text}" }
                                }
                            }
                        }
                    }
                }
            }
            if let Some(p) = pagination.filter(|p| p.is_visible()) {
                PaginationBar { pagination: p, on_page_change }
            }
        }
    }
}

#[component]
pub fn PaginationBar(pagination: Pagination, on_page_change: EventHandler<usize>) -> Element {
    let current = pagination.current_page;

    rsx! {
        div { class: "pagination",
            span { class: "text-muted", "Page {current} of {pagination.total_pages}" }
            div { class: "pagination-buttons",
                button {
                    class: "btn btn-link",
                    disabled: !pagination.has_prev(),
                    onclick: move |_| on_page_change.call(current - 1),
                    "←"
                }
                for page in pagination.page_numbers() {
                    button {
                        key: "{page}",
                        class: if page == current { "page-btn active" } else { "page-btn" },
                        onclick: move |_| on_page_change.call(page),
                        "{page}"
                    }
                }
                button {
                    class: "btn btn-link",
                    disabled: !pagination.has_next(),
                    onclick: move |_| on_page_change.call(current + 1),
                    "→"
                }
            }
        }
    }
}
