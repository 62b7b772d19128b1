use dioxus::prelude::*;
use types::CurrentUser;

mod views;

use views::{Admin, Dashboard, DomainUser, Login, Reporting};

#[derive(Debug, Clone, Routable, PartialEq)]
#[rustfmt::skip]
pub enum Route {
    #[route("/login?:error")]
    Login { error: Option<String> },
    #[layout(AuthenticatedLayout)]
        #[route("/")]
        Dashboard {},
        #[route("/reporting")]
        Reporting {},
        #[route("/admin")]
        Admin {},
        #[route("/domain-user")]
        DomainUser {},
}

/// Query value the login page shows as an expired-session notice.
pub const SESSION_EXPIRED: &str = "expired";

fn main() {
    #[cfg(feature = "server")]
    {
        server::init_tracing();
        dioxus::serve(|| async move {
            let routes = server::init().await?;

            Ok(dioxus::server::router(App).merge(routes))
        });
    }

    #[cfg(all(feature = "web", not(feature = "server")))]
    dioxus::launch(App);
}

#[component]
fn App() -> Element {
    rsx! {
        document::Title { "AdDesk" }
        document::Link { rel: "icon", href: asset!("/assets/favicon.svg") }
        document::Link { rel: "stylesheet", href: asset!("/assets/main.css") }

        Router::<Route> {}
    }
}

#[component]
fn NavLink(to: Route, children: Element) -> Element {
    let current_route: Route = use_route();
    let is_active = current_route == to;

    rsx! {
        Link {
            to,
            class: if is_active { "active" },
            {children}
        }
    }
}

/// Text shown in the error banner for a failed server call.
fn server_error_message(err: &ServerFnError) -> String {
    match err {
        ServerFnError::ServerError { message, .. } => message.clone(),
        other => other.to_string(),
    }
}

/// Global error state - use `use_error()` to access
#[derive(Clone, Copy)]
pub struct ErrorState(Signal<Option<String>>);

impl ErrorState {
    pub fn set(&mut self, error: impl Into<String>) {
        self.0.set(Some(error.into()));
    }

    pub fn set_server_error(&mut self, err: &ServerFnError) {
        // Session gone: back to the login page
        if let ServerFnError::ServerError { code: 401, .. } = err {
            navigator().push(Route::Login {
                error: Some(SESSION_EXPIRED.to_string()),
            });
            return;
        }
        self.0.set(Some(server_error_message(err)));
    }

    pub fn clear(&mut self) {
        self.0.set(None);
    }
}

pub fn use_error() -> ErrorState {
    use_context::<ErrorState>()
}

/// The signed-in user, provided by the authenticated layout.
pub fn use_current_user() -> CurrentUser {
    use_context::<CurrentUser>()
}

#[component]
fn ErrorBanner() -> Element {
    let mut error_state = use_error();
    let error = error_state.0.read();

    let Some(err) = error.as_ref() else {
        return rsx! {};
    };

    rsx! {
        div { class: "error-banner",
            div { class: "error-banner-content",
                div { class: "error-banner-header",
                    span { class: "error-banner-message", "{err}" }
                    div { class: "error-banner-actions",
                        button {
                            class: "error-banner-close",
                            onclick: move |_| error_state.clear(),
                            "×"
                        }
                    }
                }
            }
        }
    }
}

#[component]
fn AuthenticatedLayout() -> Element {
    let user = use_server_future(api::get_current_user)?;

    match &*user.read() {
        Some(Ok(Some(person))) => rsx! {
            SignedInShell { user: person.clone() }
        },
        Some(Ok(None)) | Some(Err(_)) => {
            navigator().push(Route::Login { error: None });
            rsx! {
                div { class: "loading", "Redirecting to login..." }
            }
        }
        None => rsx! {
            div { class: "loading", "Loading..." }
        },
    }
}

#[component]
fn SignedInShell(user: CurrentUser) -> Element {
    use_context_provider(|| ErrorState(Signal::new(None)));
    let session = use_context_provider(|| user.clone());
    let initial = session.initial();

    rsx! {
        div { class: "app-layout",
            aside { class: "sidebar",
                div { class: "sidebar-header",
                    span { class: "sidebar-logo", "AdDesk" }
                }
                nav { class: "sidebar-nav",
                    NavLink { to: Route::Dashboard {}, "Dashboard" }
                    NavLink { to: Route::Reporting {}, "Reporting" }
                    if session.is_admin() {
                        NavLink { to: Route::Admin {}, "Admin" }
                        NavLink { to: Route::DomainUser {}, "Domain User" }
                    }
                }
                div { class: "sidebar-footer",
                    div { class: "sidebar-user",
                        div { class: "sidebar-avatar", "{initial}" }
                        div { class: "sidebar-user-info",
                            div { class: "sidebar-user-name", "{session.username}" }
                            div { class: "sidebar-user-role", "{session.role}" }
                        }
                    }
                    a { href: "/auth/logout", rel: "external", class: "sidebar-logout", "Sign out" }
                }
            }
            main { class: "main-content",
                ErrorBanner {}
                Outlet::<Route> {}
            }
        }
    }
}

/// Shown on admin pages to non-admins.
#[component]
pub fn AccessDenied() -> Element {
    rsx! {
        div { class: "empty-state",
            h2 { "Access denied" }
            p { class: "text-muted", "Only administrators can open this page." }
            Link { to: Route::Dashboard {}, class: "btn btn-primary", "Back to dashboard" }
        }
    }
}
