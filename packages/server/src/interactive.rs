//! Interactive mode for the server.
//!
//! Prompts the user for bind address and port before starting the server.

use dialoguer::{Confirm, Input};

use crate::ServerConfig;

/// Runs the server in interactive mode, prompting for configuration.
///
/// Asks for a bind address and port, offering the values already in
/// `config` as defaults, then delegates to [`super::run_server`].
///
/// # Errors
///
/// Returns an `std::io::Result` error if the underlying server fails to
/// start.
#[allow(clippy::future_not_send)]
pub async fn run(config: ServerConfig) -> std::io::Result<()> {
    println!("Football API Server");
    println!();

    let bind_addr: String = Input::new()
        .with_prompt("Bind address")
        .default(config.bind_addr.clone())
        .interact_text()
        .unwrap_or_else(|_| config.bind_addr.clone());

    let port: u16 = Input::new()
        .with_prompt("Port")
        .default(config.port)
        .interact_text()
        .unwrap_or(config.port);

    if !Confirm::new()
        .with_prompt(format!("Start server on {bind_addr}:{port}?"))
        .default(true)
        .interact()
        .unwrap_or(true)
    {
        println!("Cancelled.");
        return Ok(());
    }

    super::run_server(config.with_bind_addr(&bind_addr).with_port(port)).await
}
