pub mod backend_client;
pub mod consent_panel;
pub mod dashboard_shell;
pub mod data_access;
pub mod fallback;
pub mod interaction;
