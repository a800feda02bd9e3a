//! The API endpoint URIs.

/// The route to list and create the current user's transactions.
pub const TRANSACTIONS: &str = "/transactions";
/// The route to list, create and delete the current user's categories.
pub const CATEGORIES: &str = "/categories";
/// The route for the current user's dashboard summary.
pub const SUMMARY: &str = "/summary";
/// The route for checking that the server is up.
pub const HEALTH: &str = "/health";
