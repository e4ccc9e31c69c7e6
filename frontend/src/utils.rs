use shared::ApiClientConfig;
use web_sys::window;

/// Get the base HTTP URL (e.g., "http://localhost:8000" or "https://admin.example.com")
pub fn get_base_url() -> String {
    let window = window().expect("no global window");
    let location = window.location();

    let protocol = location.protocol().unwrap_or_else(|_| "http:".to_string());
    let host = location
        .host()
        .unwrap_or_else(|_| "localhost:8000".to_string());

    format!("{}//{}", protocol, host)
}

/// Resolve the backend base URL. A build-time `CATALOG_API_BASE` wins over
/// the page origin.
pub fn resolve_base_url(configured: Option<&str>, origin: impl FnOnce() -> String) -> String {
    match configured.map(str::trim).filter(|s| !s.is_empty()) {
        Some(base) => base.to_string(),
        None => origin(),
    }
}

pub fn api_config() -> ApiClientConfig {
    ApiClientConfig::new(resolve_base_url(
        option_env!("CATALOG_API_BASE"),
        get_base_url,
    ))
}

/// Format a price for the product table (e.g., 1234.5 -> "$1,234.50")
pub fn format_price(amount: f64) -> String {
    let formatted = format!("{:.2}", amount.abs());
    let (integer, decimal) = formatted.split_once('.').unwrap_or((&formatted, "00"));
    let with_commas: String = integer
        .as_bytes()
        .rchunks(3)
        .rev()
        .filter_map(|chunk| std::str::from_utf8(chunk).ok())
        .collect::<Vec<_>>()
        .join(",");
    let sign = if amount < 0.0 { "-" } else { "" };
    format!("{}${}.{}", sign, with_commas, decimal)
}
