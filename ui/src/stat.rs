use dioxus::prelude::*;
use types::dashboard::StatCard;
use types::reporting::{SummaryCard, SummaryIcon};

#[component]
pub fn StatCardView(card: StatCard) -> Element {
    let change_class = if card.change < 0.0 {
        "stat-change negative"
    } else {
        "stat-change positive"
    };

    let bg = card.bg_class.as_deref().unwrap_or("bg-blue");
    let icon = card.icon.as_deref().unwrap_or("$");

    rsx! {
        div { class: "stat-card",
            div { class: "stat-icon {bg}", "{icon}" }
            div { class: "stat-body",
                span { class: "stat-title", "{card.title}" }
                span { class: "stat-value", "{card.display_value()}" }
                span { class: "{change_class}",
                    "{card.display_change()} "
                    if let Some(caption) = card.caption() {
                        span { class: "text-muted", "{caption}" }
                    }
                }
            }
        }
    }
}

#[component]
pub fn SummaryCardView(card: SummaryCard) -> Element {
    let glyph = match card.icon {
        SummaryIcon::Revenue | SummaryIcon::Other => "$",
        SummaryIcon::Domain => "◎",
        SummaryIcon::Records => "≡",
    };

    rsx! {
        div { class: "stat-card",
            div { class: "stat-icon", "{glyph}" }
            div { class: "stat-body",
                span { class: "stat-title", "{card.title}" }
                span { class: "stat-value", "{card.value}" }
            }
        }
    }
}
