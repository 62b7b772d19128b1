use dioxus::prelude::*;
use types::Role;
use types::period::{ChartRange, DateFilter};

/// Overlay + dialog shell shared by the admin modals.
#[component]
pub fn Modal(
    #[props(into)] title: String,
    #[props(default)] subtitle: Option<String>,
    on_close: EventHandler<()>,
    footer: Element,
    children: Element,
) -> Element {
    rsx! {
        div { class: "modal-overlay",
            onclick: move |_| on_close.call(()),
            div { class: "modal",
                onclick: move |e| e.stop_propagation(),
                div { class: "modal-header",
                    div {
                        h2 { class: "modal-title", "{title}" }
                        if let Some(subtitle) = subtitle {
                            p { class: "modal-subtitle", "{subtitle}" }
                        }
                    }
                    button {
                        class: "modal-close",
                        onclick: move |_| on_close.call(()),
                        "×"
                    }
                }
                div { class: "modal-body", {children} }
                div { class: "modal-footer", {footer} }
            }
        }
    }
}

/// Username, password and role inputs for the user creation forms.
#[component]
pub fn UserForm(
    username: Signal<String>,
    password: Signal<String>,
    role: Signal<Role>,
    #[props(default)] disabled: bool,
) -> Element {
    rsx! {
        div { class: "form-group",
            label { class: "form-label", r#for: "username", "Username" }
            input {
                id: "username",
                class: "form-input",
                r#type: "text",
                placeholder: "Enter username",
                disabled,
                value: "{username}",
                oninput: move |e| username.set(e.value()),
            }
        }
        div { class: "form-group",
            label { class: "form-label", r#for: "password", "Password" }
            input {
                id: "password",
                class: "form-input",
                r#type: "password",
                placeholder: "Enter password",
                disabled,
                value: "{password}",
                oninput: move |e| password.set(e.value()),
            }
        }
        div { class: "form-group",
            label { class: "form-label", r#for: "role", "Role" }
            RoleSelect { role, disabled }
        }
    }
}

#[component]
pub fn RoleSelect(role: Signal<Role>, #[props(default)] disabled: bool) -> Element {
    rsx! {
        select {
            id: "role",
            class: "form-input",
            disabled,
            onchange: move |e| role.set(Role::from(e.value())),
            for option_role in Role::ALL {
                option {
                    key: "{option_role}",
                    value: option_role.as_str(),
                    selected: role() == option_role,
                    "{option_role}"
                }
            }
        }
    }
}

/// Today / Last 7 Days / This Month buttons.
#[component]
pub fn PresetButtons(selected: DateFilter, on_select: EventHandler<DateFilter>) -> Element {
    rsx! {
        div { class: "preset-buttons",
            for preset in DateFilter::ALL {
                button {
                    key: "{preset.label()}",
                    class: if preset == selected { "btn btn-primary btn-sm" } else { "btn btn-secondary btn-sm" },
                    onclick: move |_| on_select.call(preset),
                    "{preset.label()}"
                }
            }
        }
    }
}

/// Start and end `<input type="date">` pair.
#[component]
pub fn DateRangeInputs(
    start: String,
    end: String,
    on_start: EventHandler<String>,
    on_end: EventHandler<String>,
) -> Element {
    rsx! {
        div { class: "form-group",
            label { class: "form-label", r#for: "start-date", "Start Date" }
            input {
                id: "start-date",
                class: "form-input",
                r#type: "date",
                value: "{start}",
                oninput: move |e| on_start.call(e.value()),
            }
        }
        div { class: "form-group",
            label { class: "form-label", r#for: "end-date", "End Date" }
            input {
                id: "end-date",
                class: "form-input",
                r#type: "date",
                value: "{end}",
                oninput: move |e| on_end.call(e.value()),
            }
        }
    }
}

/// Subtitle dropdown for the chart cards.
#[component]
pub fn ChartRangeSelect(selected: ChartRange, on_select: EventHandler<ChartRange>) -> Element {
    rsx! {
        select {
            class: "form-input form-input-sm",
            onchange: move |e| on_select.call(ChartRange::from_label(&e.value())),
            for range in ChartRange::ALL {
                option {
                    key: "{range.label()}",
                    selected: range == selected,
                    "{range.label()}"
                }
            }
        }
    }
}
