//! User-facing prompt texts and route paths.

/// Landing route, navigated to after logout.
pub const ROUTE_HOME: &str = "/";

/// E-mail verification prompt route, navigated to after signup.
pub const ROUTE_EMAIL_VERIFICATION: &str = "/email-verification";

/// Patient-profile setup route, linked from the own-account 404 failure.
pub const ROUTE_PATIENT_NEW: &str = "/patients/new";

/// Prompt shown with the setup link when the logged-in user's own
/// account has no patient profile yet.
pub const YOUR_ACCOUNT_DATA_SETUP: &str =
    "It looks like you haven't finished setting up data storage for your account. Let's do that now.";

/// Header carrying the session token on platform responses and
/// authenticated requests.
pub const SESSION_TOKEN_HEADER: &str = "x-careflow-session-token";
