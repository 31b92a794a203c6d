//! Print the unified joystick list and the enumeration report.
//!
//! `RUST_LOG=hybridstick=trace cargo run --example diagnose` also dumps every
//! device identifier the registry scan saw.

use tracing_subscriber::EnvFilter;

#[cfg(all(windows, feature = "hid"))]
fn run() -> Result<(), Box<dyn std::error::Error>> {
    use hybridstick::backends::windows::discover;
    use hybridstick::{InputDevice, ModuleOptions};

    let options = ModuleOptions::load(&ModuleOptions::default_path())?;
    let (devices, report) = discover(&options)?;

    println!("Devices ({}):", devices.len());
    for entry in devices.iter() {
        let d = &entry.device;
        let hw = d
            .hardware_id()
            .map(|id| id.to_string())
            .unwrap_or_else(|| "-".into());
        println!("- [{}] {} ({}) hw={hw} via {:?}", entry.class, d.name(), d.id(), d.origin());
    }
    println!("{}", report.to_json()?);
    Ok(())
}

#[cfg(not(all(windows, feature = "hid")))]
fn run() -> Result<(), Box<dyn std::error::Error>> {
    Err("the diagnose demo needs Windows with the `hid` feature".into())
}

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    if let Err(e) = run() {
        eprintln!("diagnose failed: {e}");
        std::process::exit(1);
    }
}
