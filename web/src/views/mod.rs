mod components;

mod login;
pub use login::Login;

mod dashboard;
pub use dashboard::Dashboard;

mod reporting;
pub use reporting::Reporting;

mod admin;
pub use admin::Admin;

mod domain_user;
pub use domain_user::DomainUser;
