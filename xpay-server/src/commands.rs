//! Console subcommands: `test` and `payment-methods`.

use std::process::ExitCode;

use comfy_table::Table;
use comfy_table::presets::ASCII_FULL_CONDENSED;
use time::format_description::well_known::Rfc3339;
use xpay_sdk::objects::{PaymentMethodInfo, PaymentMethods};
use xpay_sdk::{XPay, XPayError};

use crate::config::LoadedConfig;

/// Check connectivity and credentials, then list payment methods.
pub async fn test_api(xpay: &XPay, config: &LoadedConfig) -> ExitCode {
    println!("Testing X-Pay API connection...");
    let merchant_prefix: String = xpay.merchant_id().chars().take(8).collect();
    println!("Using Merchant ID: {merchant_prefix}...");
    println!("Environment: {}", config.sdk.environment());
    println!("Base URL: {}", config.sdk.base_url());
    println!();

    let pong = match xpay.ping().await {
        Ok(pong) => pong,
        Err(e) => return report_error(&e),
    };
    if !pong.success {
        eprintln!("API connection failed");
        return ExitCode::FAILURE;
    }

    let timestamp = pong
        .timestamp
        .format(&Rfc3339)
        .unwrap_or_else(|_| pong.timestamp.to_string());
    println!("API connection successful!");
    println!("Timestamp: {timestamp}");

    println!("Testing payment methods endpoint...");
    let methods = match xpay.payment_methods().await {
        Ok(methods) => methods,
        Err(e) => return report_error(&e),
    };
    println!("Payment methods retrieved successfully!");
    print!(
        "{}",
        render_table(
            &["Type", "Name", "Enabled", "Currencies"],
            &rows(&methods.payment_methods, false)
        )
    );

    ExitCode::SUCCESS
}

/// Print the merchant's payment methods as a table with totals.
pub async fn list_payment_methods(xpay: &XPay) -> ExitCode {
    println!("Fetching available payment methods...");

    let methods = match xpay.payment_methods().await {
        Ok(methods) => methods,
        Err(e) => return report_error(&e),
    };
    print!("{}", summarize(&methods));
    ExitCode::SUCCESS
}

fn summarize(methods: &PaymentMethods) -> String {
    let mut out = format!(
        "Environment: {}\nMerchant ID: {}\n\n",
        methods.environment.as_deref().unwrap_or("unknown"),
        methods.merchant_id.as_deref().unwrap_or("unknown"),
    );

    if methods.payment_methods.is_empty() {
        out.push_str("No payment methods available\n");
        return out;
    }

    out.push_str(&render_table(
        &["Type", "Name", "Description", "Enabled", "Currencies"],
        &rows(&methods.payment_methods, true),
    ));
    out.push_str(&format!(
        "Total: {} methods\nEnabled: {} methods\n",
        methods.payment_methods.len(),
        methods.enabled().count()
    ));
    out
}

fn rows(methods: &[PaymentMethodInfo], with_description: bool) -> Vec<Vec<String>> {
    methods
        .iter()
        .map(|method| {
            let mut row = vec![
                or_na(Some(method.method_type.as_str())),
                or_na(method.name.as_deref()),
            ];
            if with_description {
                row.push(or_na(method.description.as_deref()));
            }
            row.push(if method.enabled { "Yes" } else { "No" }.to_owned());
            row.push(method.currencies.join(", "));
            row
        })
        .collect()
}

fn or_na(value: Option<&str>) -> String {
    match value {
        Some(value) if !value.is_empty() => value.to_owned(),
        _ => "N/A".to_owned(),
    }
}

fn report_error(err: &XPayError) -> ExitCode {
    tracing::debug!(kind = %err.kind(), code = err.code(), "X-Pay command failed");
    eprintln!("X-Pay API Error: {err}");
    eprintln!("Error Code: {}", err.code());
    if let Some(status) = err.status() {
        eprintln!("HTTP Status: {status}");
    }
    if let Some(pretty) = err
        .details()
        .and_then(|details| serde_json::to_string_pretty(details).ok())
    {
        eprintln!("Details: {pretty}");
    }
    ExitCode::FAILURE
}

/// Render an ASCII table with columns sized to their widest cell.
fn render_table(headers: &[&str], rows: &[Vec<String>]) -> String {
    let mut table = Table::new();
    table
        .load_preset(ASCII_FULL_CONDENSED)
        .set_header(headers.iter().copied());
    for row in rows {
        table.add_row(row.iter().map(String::as_str));
    }
    format!("{table}\n")
}
