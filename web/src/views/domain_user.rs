use std::collections::HashSet;

use super::components::UserForm;
use crate::{AccessDenied, Route, use_current_user, use_error};
use dioxus::prelude::*;
use secrecy::SecretString;
use types::{NewUser, Role, user::parse_domain_lines};
use ui::{DomainChecklist, selected_in_order};

/// Checked domains in list order, then any typed ones.
fn collect_domains(known: &[String], checked: &HashSet<String>, typed: &str) -> Vec<String> {
    let mut domains = selected_in_order(known, checked);
    domains.extend(parse_domain_lines(typed));
    domains
}

#[component]
pub fn DomainUser() -> Element {
    if !use_current_user().is_admin() {
        return rsx! { AccessDenied {} };
    }
    rsx! { DomainUserForm {} }
}

#[component]
fn DomainUserForm() -> Element {
    let mut error_state = use_error();
    let mut domains = use_signal(Vec::<String>::new);
    let mut username = use_signal(String::new);
    let mut password = use_signal(String::new);
    let mut role = use_signal(|| Role::Admin);
    let mut checked = use_signal(HashSet::<String>::new);
    let mut extra = use_signal(String::new);
    let mut form_error = use_signal(|| None::<&'static str>);
    let mut created = use_signal(|| None::<String>);
    let mut submitting = use_signal(|| false);

    use_effect(move || {
        spawn(async move {
            match api::list_domains().await {
                Ok(d) => domains.set(d),
                Err(e) => error_state.set_server_error(&e),
            }
        });
    });

    let on_submit = move |e: FormEvent| {
        e.prevent_default();
        let new_user = NewUser {
            username: username(),
            password: SecretString::from(password()),
            role: role(),
            domains: collect_domains(&domains.read(), &checked.read(), &extra.read()),
        };
        if let Err(message) = new_user.validate() {
            form_error.set(Some(message));
            return;
        }
        form_error.set(None);
        created.set(None);

        let NewUser { username: name, role: chosen, domains: assigned, .. } = new_user;
        let secret = password();
        spawn(async move {
            submitting.set(true);
            match api::create_user(name.clone(), secret, chosen, assigned).await {
                Ok(()) => {
                    created.set(Some(name.trim().to_string()));
                    username.set(String::new());
                    password.set(String::new());
                    role.set(Role::Admin);
                    checked.set(HashSet::new());
                    extra.set(String::new());
                }
                Err(e) => error_state.set_server_error(&e),
            }
            submitting.set(false);
        });
    };

    rsx! {
        div {
            div { class: "page-header",
                h1 { class: "page-title", "Domain User" }
                p { class: "page-subtitle",
                    "Manages assigned domain resources with limited user-level permissions"
                }
            }

            div { class: "card",
                div { class: "card-header",
                    h2 { class: "card-title", "Add New User with Domain Access" }
                }
                form { class: "card-body", onsubmit: on_submit,
                    if let Some(message) = form_error() {
                        div { class: "alert alert-error", "{message}" }
                    }
                    if let Some(name) = created() {
                        div { class: "alert alert-success", "User {name} created." }
                    }
                    UserForm { username, password, role, disabled: submitting() }
                    div { class: "form-group",
                        span { class: "form-label", "Domain Access" }
                        DomainChecklist {
                            domains: domains(),
                            selected: checked(),
                            on_change: move |next| checked.set(next),
                            disabled: submitting(),
                        }
                    }
                    div { class: "form-group",
                        label { class: "form-label", r#for: "extra-domains", "Other domains" }
                        textarea {
                            id: "extra-domains",
                            class: "form-input",
                            rows: "3",
                            placeholder: "One domain per line",
                            disabled: submitting(),
                            value: "{extra}",
                            oninput: move |e| extra.set(e.value()),
                        }
                    }
                    div { class: "form-actions",
                        button {
                            r#type: "submit",
                            class: "btn btn-primary btn-lg",
                            disabled: submitting(),
                            if submitting() { "Creating..." } else { "Create User" }
                        }
                    }
                }
            }

            div { class: "instructions",
                h3 { "Instructions:" }
                p { class: "text-muted",
                    "This page allows you to create new users with specific domain access permissions."
                }
                ul {
                    li { strong { "Username: " } "Unique identifier for the user." }
                    li { strong { "Password: " } "Must be at least 6 characters." }
                    li { strong { "Role: " } "Determines the user's permissions level." }
                    li { strong { "Domain Access: " } "Select which domains this user can access in the dashboard." }
                }
                p { class: "text-muted",
                    "Users created here will only be able to view data for the domains you select. To manage existing users, please use the "
                    Link { to: Route::Admin {}, "Admin Dashboard" }
                    "."
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn checked_domains_keep_list_order_before_typed_ones() {
        let known = vec![
            "finrezo.com".to_string(),
            "newsbay.net".to_string(),
            "techpulse.io".to_string(),
        ];
        let checked: HashSet<String> = ["techpulse.io".to_string(), "finrezo.com".to_string()].into();

        assert_eq!(
            collect_domains(&known, &checked, "\n  extra.org \n\n"),
            vec!["finrezo.com", "techpulse.io", "extra.org"]
        );
        assert!(collect_domains(&known, &HashSet::new(), "").is_empty());
    }
}
