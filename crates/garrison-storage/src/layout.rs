//! Fixed key layout of the console store.
//!
//! ```text
//! {namespace}\0users                 JSON array of users
//! {namespace}\0reports               JSON array of reports, newest first
//! {namespace}\0logs                  JSON array of audit entries, newest first
//! {namespace}\0current_session_user  JSON snapshot of the logged-in user
//! ```

/// Default namespace for all console keys.
pub const DEFAULT_NAMESPACE: &str = "garrison";

/// Key holding the user directory.
pub const USERS: &str = "users";

/// Key holding the report catalog.
pub const REPORTS: &str = "reports";

/// Key holding the audit log.
pub const LOGS: &str = "logs";

/// Key holding the logged-in user.
pub const CURRENT_SESSION_USER: &str = "current_session_user";

/// Every key the console writes, in export order.
pub const ALL_KEYS: [&str; 4] = [USERS, REPORTS, LOGS, CURRENT_SESSION_USER];
