//! The API endpoints URIs.

/// The route for checking that the server is up.
pub const HEALTH: &str = "/health";
/// The route for creating transactions.
pub const TRANSACTIONS: &str = "/transactions";
/// The route for a single ID under transactions.
///
/// `GET` treats `{id}` as a user ID and lists that user's transactions, while
/// `DELETE` treats it as a transaction ID. The two share a path so the router
/// sees a single parameter name.
pub const TRANSACTION: &str = "/transactions/{id}";
/// The route for the summary of a user's transactions.
pub const SUMMARY: &str = "/transactions/summary/{user_id}";

/// Replace the parameter in `endpoint_path` with `id`.
///
/// A parameter is a string that starts with a left brace, followed by
/// lowercase letters or underscores, and ends with a right brace.
/// For example, in the endpoint path '/transactions/{id}', '{id}' is the parameter.
///
/// This function assumes that an endpoint path only contains ASCII characters
/// and a single parameter.
///
/// If no parameter is found in `endpoint_path`, the function returns the
/// original `endpoint_path`.
pub fn format_endpoint(endpoint_path: &str, id: impl std::fmt::Display) -> String {
    let Some(param_start) = endpoint_path.find('{') else {
        return endpoint_path.to_string();
    };

    let param_end = endpoint_path[param_start..]
        .find('}')
        .map(|end| param_start + end + 1)
        .unwrap_or(endpoint_path.len());

    format!(
        "{}{}{}",
        &endpoint_path[..param_start],
        id,
        &endpoint_path[param_end..]
    )
}
