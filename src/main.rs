// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

use anyhow::Context;
use std::env;
use std::time::Instant;
use the_chainwork::chain::Payload;
use the_chainwork::config::{load_and_validate_config, RuntimeBuilder};
use the_chainwork::engine::ChainOutcome;
use tracing_subscriber::EnvFilter;

const DEFAULT_LOG_FILTER: &str = "warn";

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(DEFAULT_LOG_FILTER)),
        )
        .with_writer(std::io::stderr)
        .init();

    let args: Vec<String> = env::args().collect();
    if args.len() != 4 {
        eprintln!("Usage: {} <config.yaml> <chain-address> <input_text>", args[0]);
        eprintln!("Example: {} configs/chainwork.yaml /pipeline/upper/echo/hello \"\"", args[0]);
        eprintln!("Example: {} configs/chainwork.yaml /circuit/upper/reverse \"hello world\"", args[0]);
        eprintln!("Debug:   {} configs/chainwork.yaml \"/circuit/upper.txt/reverse?debug=true\" \"hello\"", args[0]);
        std::process::exit(1);
    }

    let (config_file, address, input_text) = (&args[1], &args[2], &args[3]);
    let start_time = Instant::now();

    let config = load_and_validate_config(config_file)
        .with_context(|| format!("failed to load configuration from {}", config_file))?;
    let runner = RuntimeBuilder::from_config(&config)
        .with_context(|| format!("failed to build a runner from {}", config_file))?;

    println!("🔗 Chainwork");
    println!("═══════════════════════════════════");
    println!("📋 Configuration: {} ({} units, {} aliases)", config_file, config.units.len(), config.aliases.len());
    println!("🧭 Address: {}", address);
    println!("Input: \"{}\"", input_text);

    let execution_start = Instant::now();
    let outcome = runner.run(address, Payload::new(input_text.as_bytes())).await;
    let execution_time = execution_start.elapsed();

    match outcome {
        ChainOutcome::Completed(result) => {
            println!("\n🎯 Result:");
            println!("   Status: {}", result.status);
            if let Some(content_type) = &result.content_type {
                println!("   Content-Type: {}", content_type);
            }
            println!("   Output: \"{}\"", result.text());
        }
        ChainOutcome::Debug(debug) => {
            let rendered = debug.render().context("failed to render debug trace")?;
            println!("\n🔍 Debug trace ({}):", rendered.content_type);
            println!("{}", String::from_utf8_lossy(&rendered.body));
        }
        ChainOutcome::Failed(error) => {
            eprintln!("\n❌ Chain failed [{}]: {}", error.kind(), error);
            if let Some(position) = error.position() {
                eprintln!("   at segment {}", position);
            }
            std::process::exit(2);
        }
    }

    println!("\n⏱️  Execution Time: {:?}", execution_time);
    println!("⏱️  Total Time (including config load): {:?}", start_time.elapsed());
    Ok(())
}
