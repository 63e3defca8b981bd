//! Watch-together sync server example
//!
//! Run with: cargo run --example sync_server [BIND_ADDR]
//!
//! Examples:
//!   cargo run --example sync_server                    # binds to 0.0.0.0:5000
//!   cargo run --example sync_server localhost          # binds to 127.0.0.1:5000
//!   cargo run --example sync_server 127.0.0.1:5050     # binds to 127.0.0.1:5050
//!
//! Clients connect to ws://HOST:PORT/ws and exchange JSON envelopes of the
//! form `{"event": "join-room", "data": {"roomId": "R1", "name": "Alice"}}`.
//! Liveness: GET http://HOST:PORT/healthz

use std::net::SocketAddr;

use roomsync::{ServerConfig, SyncServer};

/// Parse bind address from command line argument.
///
/// Accepts formats:
/// - "localhost" -> 127.0.0.1:5000
/// - "localhost:5050" -> 127.0.0.1:5050
/// - "127.0.0.1" -> 127.0.0.1:5000
/// - "0.0.0.0:5000" -> 0.0.0.0:5000
fn parse_bind_addr(arg: &str) -> Result<SocketAddr, String> {
    const DEFAULT_PORT: u16 = 5000;

    let normalized = arg.replace("localhost", "127.0.0.1");

    if let Ok(addr) = normalized.parse::<SocketAddr>() {
        return Ok(addr);
    }

    if let Ok(ip) = normalized.parse::<std::net::IpAddr>() {
        return Ok(SocketAddr::new(ip, DEFAULT_PORT));
    }

    Err(format!(
        "Invalid bind address: '{}'. Expected format: IP:PORT or IP or 'localhost'",
        arg
    ))
}

fn print_usage() {
    eprintln!("Usage: sync_server [BIND_ADDR]");
    eprintln!();
    eprintln!("Arguments:");
    eprintln!("  BIND_ADDR    Address to bind to (default: 0.0.0.0:5000)");
    eprintln!();
    eprintln!("Examples:");
    eprintln!("  sync_server                     # binds to 0.0.0.0:5000");
    eprintln!("  sync_server localhost           # binds to 127.0.0.1:5000");
    eprintln!("  sync_server 127.0.0.1:5050      # binds to 127.0.0.1:5050");
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let args: Vec<String> = std::env::args().collect();

    if args.iter().any(|a| a == "--help" || a == "-h") {
        print_usage();
        return Ok(());
    }

    let bind_addr = match args.get(1) {
        Some(addr_str) => match parse_bind_addr(addr_str) {
            Ok(addr) => addr,
            Err(e) => {
                eprintln!("Error: {}", e);
                eprintln!();
                print_usage();
                std::process::exit(1);
            }
        },
        None => "0.0.0.0:5000".parse().unwrap(),
    };

    // Initialize logging
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive("roomsync=debug".parse()?)
                .add_directive("sync_server=debug".parse()?),
        )
        .init();

    let config = ServerConfig::default().bind(bind_addr);

    println!("Starting sync server on {}", config.bind_addr);
    println!();
    println!("WebSocket endpoint: ws://{}/ws", config.bind_addr);
    println!("Liveness check:     http://{}/healthz", config.bind_addr);
    println!();

    let server = SyncServer::new(config);

    tokio::select! {
        result = server.run() => {
            if let Err(e) = result {
                eprintln!("Server error: {}", e);
            }
        }
        _ = tokio::signal::ctrl_c() => {
            println!("\nShutting down...");
        }
    }

    Ok(())
}
