//! Send one light change to a bridge.
//!
//! ```bash
//! MILIGHT_HOST=192.168.1.30 ZONE=2 cargo run --example change_light -p milight-rs-client -- color=265 intensity=70
//! MILIGHT_HOST=192.168.1.30 cargo run --example change_light -p milight-rs-client -- special=off
//! ```

use milight_rs_client::{ClientConfig, LightChange, MilightClient, Zone};

fn env_or(name: &str, default: &str) -> String {
    std::env::var(name).unwrap_or_else(|_| default.to_owned())
}

#[tokio::main]
async fn main() -> milight_rs_client::Result<()> {
    let host = env_or("MILIGHT_HOST", "192.168.1.30");
    let zone = Zone::new(env_or("ZONE", "0").parse().unwrap_or(0))?;

    let args: Vec<String> = std::env::args().skip(1).collect();
    let change = LightChange::from_pairs(args.iter().filter_map(|arg| arg.split_once('=')));
    if change.is_empty() {
        eprintln!("usage: change_light axis=value ... (color, saturation, intensity, special, disco)");
        return Ok(());
    }

    let mut client = MilightClient::new(ClientConfig {
        host,
        ..ClientConfig::default()
    });
    let report = client.change_light(&change, zone).await?;

    println!(
        "zone {zone}: {} frame(s) sent, {} acknowledged",
        report.frames_sent, report.acknowledged
    );
    for failure in &report.failures {
        println!("  #{} {}: {}", failure.index, failure.command.name(), failure.error);
    }
    Ok(())
}
