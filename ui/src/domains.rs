use std::collections::HashSet;

use dioxus::prelude::*;

/// Domains whose name contains `query`, case-insensitively.
pub fn filter_domains<'a>(domains: &'a [String], query: &str) -> Vec<&'a String> {
    let query = query.trim().to_lowercase();
    domains
        .iter()
        .filter(|d| query.is_empty() || d.to_lowercase().contains(&query))
        .collect()
}

/// The known domains followed by any assigned ones missing from that list.
pub fn with_assigned(known: &[String], assigned: &[String]) -> Vec<String> {
    let mut out = known.to_vec();
    for domain in assigned {
        if !out.contains(domain) {
            out.push(domain.clone());
        }
    }
    out
}

/// The selected domains in list order.
pub fn selected_in_order(domains: &[String], selected: &HashSet<String>) -> Vec<String> {
    domains
        .iter()
        .filter(|d| selected.contains(*d))
        .cloned()
        .collect()
}

/// Select every visible domain, or deselect them all if they are already selected.
/// Selections outside `visible` are left alone.
pub fn toggle_all(selected: &HashSet<String>, visible: &[&String]) -> HashSet<String> {
    let mut next = selected.clone();
    if visible.iter().all(|d| selected.contains(*d)) {
        for domain in visible {
            next.remove(*domain);
        }
    } else {
        next.extend(visible.iter().map(|d| d.to_string()));
    }
    next
}

/// Searchable list of domains with checkboxes and a select-all toggle.
#[component]
pub fn DomainChecklist(
    domains: Vec<String>,
    selected: HashSet<String>,
    on_change: EventHandler<HashSet<String>>,
    #[props(default)] disabled: bool,
) -> Element {
    let mut query = use_signal(String::new);

    let visible = filter_domains(&domains, &query.read());
    let none_visible = visible.is_empty();
    let all_checked = !visible.is_empty() && visible.iter().all(|d| selected.contains(*d));
    let select_all = {
        let selected = selected.clone();
        let visible: Vec<String> = visible.iter().map(|d| d.to_string()).collect();
        move |_| {
            let refs: Vec<&String> = visible.iter().collect();
            on_change.call(toggle_all(&selected, &refs));
        }
    };

    rsx! {
        div { class: "domain-checklist",
            input {
                class: "form-input",
                r#type: "search",
                placeholder: "Search domains...",
                value: "{query}",
                oninput: move |e| query.set(e.value()),
            }
            label { class: "checkbox-label domain-checklist-all",
                input {
                    r#type: "checkbox",
                    checked: all_checked,
                    disabled: disabled || none_visible,
                    onchange: select_all,
                }
                span { "Select all" }
                span { class: "text-muted", "({selected.len()} selected)" }
            }
            if none_visible {
                p { class: "text-muted", "No domains match \"{query}\"" }
            }
            ul { class: "group-checklist",
                for domain in visible {
                    {
                        let is_checked = selected.contains(domain);
                        let name = domain.clone();
                        let selected = selected.clone();

                        rsx! {
                            li { key: "{domain}", class: "group-checklist-item",
                                label { class: "checkbox-label",
                                    input {
                                        r#type: "checkbox",
                                        checked: is_checked,
                                        disabled,
                                        onchange: move |_| {
                                            let mut next = selected.clone();
                                            if !next.remove(&name) {
                                                next.insert(name.clone());
                                            }
                                            on_change.call(next);
                                        },
                                    }
                                    span { "{domain}" }
                                }
                            }
                        }
                    }
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn domains() -> Vec<String> {
        ["finrezo.com", "newsbay.net", "techpulse.io"]
            .iter()
            .map(|d| d.to_string())
            .collect()
    }

    #[test]
    fn search_is_case_insensitive() {
        let domains = domains();
        assert_eq!(filter_domains(&domains, "").len(), 3);
        assert_eq!(filter_domains(&domains, " NEWS "), vec!["newsbay.net"]);
        assert!(filter_domains(&domains, "zzz").is_empty());
    }

    #[test]
    fn assigned_domains_outside_the_list_survive() {
        let known = domains();
        let assigned = vec!["extra.org".to_string(), "newsbay.net".to_string()];

        let options = with_assigned(&known, &assigned);
        assert_eq!(options.len(), 4);
        assert_eq!(options[3], "extra.org");

        let selected: HashSet<String> = assigned.into_iter().collect();
        assert_eq!(
            selected_in_order(&options, &selected),
            vec!["newsbay.net", "extra.org"]
        );
    }

    #[test]
    fn select_all_only_touches_visible_domains() {
        let domains = domains();
        let selected: HashSet<String> = ["techpulse.io".to_string()].into();

        let visible = filter_domains(&domains, ".n");
        let next = toggle_all(&selected, &visible);
        assert_eq!(next.len(), 2);
        assert!(next.contains("newsbay.net"));
        assert!(next.contains("techpulse.io"));

        let cleared = toggle_all(&next, &visible);
        assert_eq!(cleared, selected);
    }
}
