use crate::SESSION_EXPIRED;
use dioxus::prelude::*;
use types::INVALID_CREDENTIALS;

fn error_message(code: Option<&str>) -> Option<&'static str> {
    match code? {
        INVALID_CREDENTIALS => Some("Invalid username or password"),
        SESSION_EXPIRED => Some("Your session has ended. Please sign in again."),
        _ => Some("Sign in failed. Please try again."),
    }
}

#[component]
pub fn Login(error: Option<String>) -> Element {
    let mut show_password = use_signal(|| false);
    let message = error_message(error.as_deref());

    rsx! {
        div { class: "login-page",
            div { class: "login-card",
                div { class: "login-header",
                    h1 { class: "login-title", "AdDesk" }
                    p { class: "login-subtitle", "Admin Login" }
                }
                if let Some(message) = message {
                    div { class: "alert alert-error", "{message}" }
                }
                form {
                    id: "login-form",
                    action: "/auth/login",
                    method: "post",
                    div { class: "form-group",
                        label { class: "form-label", r#for: "username", "Email" }
                        input {
                            id: "username",
                            name: "username",
                            class: "form-input",
                            r#type: "text",
                            placeholder: "admin@gmail.com",
                            autocomplete: "username",
                            required: true,
                        }
                    }
                    div { class: "form-group",
                        label { class: "form-label", r#for: "password", "Password" }
                        div { class: "password-field",
                            input {
                                id: "password",
                                name: "password",
                                class: "form-input",
                                r#type: if show_password() { "text" } else { "password" },
                                placeholder: "Password",
                                autocomplete: "current-password",
                                required: true,
                            }
                            button {
                                r#type: "button",
                                class: "password-toggle",
                                aria_label: if show_password() { "Hide password" } else { "Show password" },
                                onclick: move |_| show_password.toggle(),
                                if show_password() { "Hide" } else { "Show" }
                            }
                        }
                    }
                    button {
                        r#type: "submit",
                        class: "btn btn-primary login-btn",
                        "Log in"
                    }
                }
            }
        }
    }
}
