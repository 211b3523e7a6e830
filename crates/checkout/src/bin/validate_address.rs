//! Validate one order address document.
//!
//! Usage: `validate-address [FILE]` (reads stdin without FILE). Prints a JSON
//! report `{ "valid", "errors", "messages" }` on stdout.
//!
//! Exit status:
//! - `0`: the address is valid;
//! - `1`: the tool failed (unreadable input, malformed JSON, bad config);
//! - `2`: the address was read and is invalid.

use std::io::Read;
use std::process::ExitCode;

use anyhow::Context;
use serde_json::json;

use furima_checkout::{CheckoutConfig, OrderAddress};

const EXIT_INVALID_ADDRESS: u8 = 2;

fn read_input() -> anyhow::Result<String> {
    match std::env::args_os().nth(1) {
        Some(path) => std::fs::read_to_string(&path)
            .with_context(|| format!("failed to read {}", path.to_string_lossy())),
        None => {
            let mut buf = String::new();
            std::io::stdin()
                .read_to_string(&mut buf)
                .context("failed to read stdin")?;
            Ok(buf)
        }
    }
}

fn main() -> anyhow::Result<ExitCode> {
    furima_observability::init();

    let config = CheckoutConfig::from_env().context("failed to load checkout config")?;
    let validator = config.validator()?;
    let messages = config.message_catalog();

    let input = read_input()?;
    let address: OrderAddress =
        serde_json::from_str(&input).context("input is not an order address document")?;

    let result = validator.validate(&address);
    let report = json!({
        "valid": result.is_valid(),
        "errors": result.errors(),
        "messages": messages.full_messages(&result),
    });
    println!("{}", serde_json::to_string_pretty(&report)?);

    if !result.is_valid() {
        tracing::info!(error_count = result.errors().len(), "address rejected");
        return Ok(ExitCode::from(EXIT_INVALID_ADDRESS));
    }
    Ok(ExitCode::SUCCESS)
}
