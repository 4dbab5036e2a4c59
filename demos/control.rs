// SPDX-License-Identifier: MPL-2.0

//! Demo program: read a fan's status, dim its light and arm a sleep timer.
//!
//! # Usage
//!
//! ```bash
//! cargo run --example control -- <host>
//! ```
//!
//! # Example
//!
//! ```bash
//! RUST_LOG=fanlight_lib=debug cargo run --example control -- 192.168.1.100
//! ```

use std::env;
use std::time::Duration;

use fanlight_lib::{Device, LightCommand};
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let args: Vec<String> = env::args().collect();

    if args.len() != 2 {
        eprintln!("Usage: {} <host>", args[0]);
        eprintln!();
        eprintln!("Example:");
        eprintln!("  cargo run --example control -- 192.168.1.100");
        std::process::exit(1);
    }

    let host = &args[1];

    println!("Connecting to {host}...");

    let (device, initial) = Device::http(host)
        .with_timeout(Duration::from_secs(5))
        .connect()
        .await?;

    println!("Connected!");
    println!(
        "Fan: {} at speed {} ({})",
        if initial.fan_on() { "on" } else { "off" },
        initial.fan_speed(),
        initial.fan_direction()
    );
    println!(
        "Light: {} at {}",
        if initial.light_on() { "on" } else { "off" },
        initial.light_brightness()
    );

    if let Ok(info) = device.update_info().await {
        println!("Device: {} (firmware {})", info.display_name(), info.firmware_version);
    }

    println!("Turning light on at 50% for 2 minutes...");
    let status = device
        .light(
            LightCommand::new()
                .on(true)
                .brightness(50)
                .sleep(Duration::from_secs(120)),
        )
        .await?;

    println!("Light is now at {}", status.light_brightness());
    if let Some(at) = status.light_sleep_timer() {
        println!("Light switches off at {at}");
    }

    device.close();
    println!("Done!");

    Ok(())
}
