use std::collections::HashSet;

use super::components::{Modal, RoleSelect, UserForm};
use crate::{AccessDenied, use_current_user, use_error};
use dioxus::prelude::*;
use secrecy::SecretString;
use types::{NewUser, Role, UserSummary};
use ui::{DomainChecklist, selected_in_order, with_assigned};

#[derive(Debug, Clone, Copy, PartialEq)]
enum Tab {
    Users,
    DomainPermissions,
}

/// For each domain, the users allowed to see it. Admins and users without
/// assigned domains see every domain.
fn domain_access(domains: &[String], users: &[UserSummary]) -> Vec<(String, Vec<String>)> {
    domains
        .iter()
        .map(|domain| {
            let names = users
                .iter()
                .filter(|u| {
                    u.role == Role::Admin
                        || u.domains.is_empty()
                        || u.domains.iter().any(|d| d.eq_ignore_ascii_case(domain))
                })
                .map(|u| u.username.clone())
                .collect();
            (domain.clone(), names)
        })
        .collect()
}

fn access_label(names: &[String]) -> String {
    if names.is_empty() {
        "No users".to_string()
    } else {
        names.join(", ")
    }
}

#[component]
pub fn Admin() -> Element {
    if !use_current_user().is_admin() {
        return rsx! { AccessDenied {} };
    }
    rsx! { AdminPanel {} }
}

#[component]
fn AdminPanel() -> Element {
    let mut error_state = use_error();
    let mut users = use_signal(Vec::<UserSummary>::new);
    let mut domains = use_signal(Vec::<String>::new);
    let mut loading = use_signal(|| true);
    let mut tab = use_signal(|| Tab::Users);
    let mut show_add = use_signal(|| false);
    let mut editing_role = use_signal(|| None::<UserSummary>);
    let mut editing_domains = use_signal(|| None::<UserSummary>);

    use_effect(move || {
        spawn(async move {
            loading.set(true);
            match (api::list_users().await, api::list_domains().await) {
                (Ok(u), Ok(d)) => {
                    users.set(u);
                    domains.set(d);
                }
                (Err(e), _) | (_, Err(e)) => error_state.set_server_error(&e),
            }
            loading.set(false);
        });
    });

    let refresh_users = move || {
        spawn(async move {
            match api::list_users().await {
                Ok(u) => users.set(u),
                Err(e) => error_state.set_server_error(&e),
            }
        });
    };

    rsx! {
        div {
            div { class: "page-header",
                div { class: "page-header-content",
                    h1 { class: "page-title", "Admin User Management" }
                    p { class: "page-subtitle",
                        "Admin dashboard to manage users, roles, permissions efficiently"
                    }
                }
            }

            div { class: "card",
                div { class: "tabs",
                    button {
                        class: if tab() == Tab::Users { "tab active" } else { "tab" },
                        onclick: move |_| tab.set(Tab::Users),
                        "User"
                    }
                    button {
                        class: if tab() == Tab::DomainPermissions { "tab active" } else { "tab" },
                        onclick: move |_| tab.set(Tab::DomainPermissions),
                        "Domain Permissions"
                    }
                }

                div { class: "card-header",
                    if tab() == Tab::Users {
                        h2 { class: "card-title", "User List" }
                    } else {
                        div {
                            h2 { class: "card-title", "Domain Permissions" }
                            p { class: "text-muted", "Manage which users have access to specific domains." }
                        }
                    }
                    button {
                        class: "btn btn-primary",
                        onclick: move |_| show_add.set(true),
                        "+ Add User"
                    }
                }

                if loading() {
                    div { class: "loading", "Loading users..." }
                } else if tab() == Tab::Users {
                    div { class: "table-container",
                        table {
                            thead {
                                tr {
                                    th { "ID No." }
                                    th { "User Name" }
                                    th { "Domain" }
                                    th { "Roles" }
                                    th { "Actions" }
                                }
                            }
                            tbody {
                                for user in users.read().iter().cloned() {
                                    tr { key: "{user.username}",
                                        td { "{user.id}" }
                                        td { class: "cell-strong", "{user.username}" }
                                        td { "{user.domain_label()}" }
                                        td { "{user.role}" }
                                        td {
                                            div { class: "button-row",
                                                button {
                                                    class: "btn btn-primary btn-sm",
                                                    onclick: {
                                                        let user = user.clone();
                                                        move |_| editing_role.set(Some(user.clone()))
                                                    },
                                                    "Edit User"
                                                }
                                                button {
                                                    class: "btn btn-success btn-sm",
                                                    onclick: move |_| editing_domains.set(Some(user.clone())),
                                                    "Edit Channels"
                                                }
                                            }
                                        }
                                    }
                                }
                            }
                        }
                    }
                } else {
                    ul { class: "domain-access-list",
                        for (domain, names) in domain_access(&domains.read(), &users.read()) {
                            li { key: "{domain}", class: "domain-access-item",
                                span { class: "cell-strong", "{domain}" }
                                span { class: "text-muted", {access_label(&names)} }
                            }
                        }
                    }
                }
            }

            if show_add() {
                AddUserModal {
                    domains: domains(),
                    on_close: move |_| show_add.set(false),
                    on_created: move |_| {
                        show_add.set(false);
                        refresh_users();
                    },
                }
            }

            if let Some(user) = editing_role() {
                EditUserRolesModal {
                    user,
                    on_close: move |_| editing_role.set(None),
                    on_saved: move |_| {
                        editing_role.set(None);
                        refresh_users();
                    },
                }
            }

            if let Some(user) = editing_domains() {
                EditChannelPermissionsModal {
                    user,
                    domains: domains(),
                    on_close: move |_| editing_domains.set(None),
                    on_saved: move |_| {
                        editing_domains.set(None);
                        refresh_users();
                    },
                }
            }
        }
    }
}

#[component]
fn AddUserModal(
    domains: Vec<String>,
    on_close: EventHandler<()>,
    on_created: EventHandler<()>,
) -> Element {
    let mut error_state = use_error();
    let username = use_signal(String::new);
    let password = use_signal(String::new);
    let role = use_signal(|| Role::Admin);
    let mut selected = use_signal(HashSet::<String>::new);
    let mut form_error = use_signal(|| None::<&'static str>);
    let mut creating = use_signal(|| false);
    let order = domains.clone();

    rsx! {
        Modal {
            title: "Add New User",
            on_close,
            footer: rsx! {
                button {
                    class: "btn btn-secondary",
                    onclick: move |_| on_close.call(()),
                    "Cancel"
                }
                button {
                    class: "btn btn-primary",
                    disabled: creating(),
                    onclick: move |_| {
                        let new_user = NewUser {
                            username: username(),
                            password: SecretString::from(password()),
                            role: role(),
                            domains: selected_in_order(&order, &selected.read()),
                        };
                        if let Err(message) = new_user.validate() {
                            form_error.set(Some(message));
                            return;
                        }
                        form_error.set(None);
                        let NewUser { username, role, domains, .. } = new_user;
                        let password = password();
                        spawn(async move {
                            creating.set(true);
                            match api::create_user(username, password, role, domains).await {
                                Ok(()) => on_created.call(()),
                                Err(e) => error_state.set_server_error(&e),
                            }
                            creating.set(false);
                        });
                    },
                    if creating() { "Saving..." } else { "Save" }
                }
            },
            if let Some(message) = form_error() {
                div { class: "alert alert-error", "{message}" }
            }
            UserForm { username, password, role, disabled: creating() }
            div { class: "form-group",
                span { class: "form-label", "Domain Access" }
                DomainChecklist {
                    domains,
                    selected: selected(),
                    on_change: move |next| selected.set(next),
                    disabled: creating(),
                }
            }
        }
    }
}

#[component]
fn EditUserRolesModal(
    user: UserSummary,
    on_close: EventHandler<()>,
    on_saved: EventHandler<()>,
) -> Element {
    let mut error_state = use_error();
    let mut role = use_signal(|| user.role);
    let mut saving = use_signal(|| false);

    rsx! {
        Modal {
            title: "Edit User Roles",
            subtitle: format!("Choose the access level for {}.", user.username),
            on_close,
            footer: rsx! {
                button {
                    class: "btn btn-secondary",
                    onclick: move |_| on_close.call(()),
                    "Close"
                }
                button {
                    class: "btn btn-primary",
                    disabled: saving(),
                    onclick: {
                        let username = user.username.clone();
                        move |_| {
                            let username = username.clone();
                            spawn(async move {
                                saving.set(true);
                                match api::update_user_role(username, role()).await {
                                    Ok(()) => on_saved.call(()),
                                    Err(e) => error_state.set_server_error(&e),
                                }
                                saving.set(false);
                            });
                        }
                    },
                    if saving() { "Saving..." } else { "Save Changes" }
                }
            },
            ul { class: "group-checklist",
                for option_role in Role::ALL {
                    li { key: "{option_role}", class: "group-checklist-item",
                        label { class: "checkbox-label",
                            input {
                                r#type: "checkbox",
                                checked: role() == option_role,
                                onchange: move |_| role.set(option_role),
                            }
                            span { class: "cell-strong", "{option_role}" }
                            span { class: "text-muted", "{option_role.description()}" }
                        }
                    }
                }
            }
        }
    }
}

#[component]
fn EditChannelPermissionsModal(
    user: UserSummary,
    domains: Vec<String>,
    on_close: EventHandler<()>,
    on_saved: EventHandler<()>,
) -> Element {
    let mut error_state = use_error();
    let mut selected = use_signal(|| user.domains.iter().cloned().collect::<HashSet<_>>());
    let mut saving = use_signal(|| false);
    let has_any = !selected.read().is_empty();
    // Domains assigned outside the channel list stay visible and checked.
    let options = with_assigned(&domains, &user.domains);
    let order = options.clone();

    rsx! {
        Modal {
            title: "Edit Channel Permissions",
            subtitle: format!("Domains {} can see in the dashboard.", user.username),
            on_close,
            footer: rsx! {
                button {
                    class: "btn btn-secondary",
                    onclick: move |_| on_close.call(()),
                    "Close"
                }
                button {
                    class: "btn btn-primary",
                    disabled: !has_any || saving(),
                    onclick: {
                        let username = user.username.clone();
                        move |_| {
                            let username = username.clone();
                            let chosen = selected_in_order(&order, &selected.read());
                            spawn(async move {
                                saving.set(true);
                                match api::update_user_domains(username, chosen).await {
                                    Ok(()) => on_saved.call(()),
                                    Err(e) => error_state.set_server_error(&e),
                                }
                                saving.set(false);
                            });
                        }
                    },
                    if saving() { "Saving..." } else { "Save Changes" }
                }
            },
            span { class: "form-label", "Domain Access" }
            DomainChecklist {
                domains: options,
                selected: selected(),
                on_change: move |next| selected.set(next),
                disabled: saving(),
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn summary(username: &str, role: Role, domains: &[&str]) -> UserSummary {
        UserSummary {
            id: "01".into(),
            username: username.into(),
            role,
            domains: domains.iter().map(|d| d.to_string()).collect(),
        }
    }

    #[test]
    fn domain_access_lists_allowed_users() {
        let domains = vec!["finrezo.com".to_string(), "newsbay.net".to_string()];
        let users = vec![
            summary("admin", Role::Admin, &[]),
            summary("pub", Role::Publisher, &["FinRezo.com"]),
            summary("open", Role::Publisher, &[]),
        ];

        let access = domain_access(&domains, &users);
        assert_eq!(access[0].1, vec!["admin", "pub", "open"]);
        assert_eq!(access[1].1, vec!["admin", "open"]);
    }
}
