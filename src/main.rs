// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

use anyhow::{bail, Context, Result};
use std::env;
use std::time::Instant;
use voxel_build::build::build_objects;
use voxel_build::config::{
    load_build_group_and_validate, load_instrument_config_and_validate, Registry,
};
use voxel_build::instrument::Instrument;
use voxel_build::observability::init_tracing;

enum Mode {
    Instrument(String),
    Group(String),
}

fn parse_args(args: &[String]) -> Option<Mode> {
    match args {
        [_, flag, path] if flag == "--group" => Some(Mode::Group(path.clone())),
        [_, path] if !path.starts_with("--") => Some(Mode::Instrument(path.clone())),
        _ => None,
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    init_tracing();

    let args: Vec<String> = env::args().collect();
    let Some(mode) = parse_args(&args) else {
        eprintln!("Usage: {} <instrument.yaml>", args[0]);
        eprintln!("       {} --group <components.yaml>", args[0]);
        eprintln!("Example: {} configs/simulated-instrument.yaml", args[0]);
        std::process::exit(1);
    };

    match mode {
        Mode::Instrument(path) => run_instrument(&path).await,
        Mode::Group(path) => run_group(&path).await,
    }
}

async fn run_instrument(path: &str) -> Result<()> {
    println!("🔬 Instrument bring-up");
    println!("═══════════════════════");
    println!("Config: {}", path);
    println!();

    let config = load_instrument_config_and_validate(path)
        .with_context(|| format!("failed to load instrument config {}", path))?;
    let registry = Registry::with_simulated_devices();

    let start = Instant::now();
    // Constructors may block on hardware I/O.
    let mut instrument = tokio::task::spawn_blocking(move || Instrument::new(config, &registry))
        .await
        .context("build task panicked")??;
    let elapsed = start.elapsed();

    println!("✅ {} ready in {:?}", instrument.uid(), elapsed);
    println!("📷 Camera: {}", instrument.camera().uid());
    println!("📟 DAQ:    {}", instrument.daq().uid());
    for (id, laser) in instrument.lasers() {
        println!("🔦 Laser:  {} ({} nm)", id, laser.wavelength_nm());
    }
    for (id, wheel) in instrument.filter_wheels() {
        println!("🎡 Filter wheel: {} {:?}", id, wheel.labels());
    }
    for (axis, stage) in instrument.stage() {
        println!("📐 Stage {}: {:.3} mm", axis, stage.position_mm());
    }
    for (id, _) in instrument.focusing_axes() {
        println!("🔍 Focusing axis: {}", id);
    }

    if let Some(profile) = instrument.active_profile().map(str::to_string) {
        instrument.set_active_profile(&profile)?;
        println!("🎨 Active profile: {}", profile);
    }

    instrument.shutdown();
    println!("\n🎉 Done!");
    Ok(())
}

async fn run_group(path: &str) -> Result<()> {
    println!("🧱 Component build");
    println!("═══════════════════");
    println!("Config: {}", path);
    println!();

    let specs = load_build_group_and_validate(path)
        .with_context(|| format!("failed to load component group {}", path))?;
    let registry = Registry::with_simulated_devices();

    let start = Instant::now();
    let (built, errors) = tokio::task::spawn_blocking(move || build_objects(&specs, &registry))
        .await
        .context("build task panicked")?;
    let elapsed = start.elapsed();

    for id in built.keys() {
        println!("✅ {}", id);
    }
    for error in errors.values() {
        println!("❌ {}", error);
    }
    println!();
    println!(
        "📊 {} built, {} failed in {:?}",
        built.len(),
        errors.len(),
        elapsed
    );

    if !errors.is_empty() {
        bail!("{} components failed to build", errors.len());
    }
    Ok(())
}
