mod cli;
mod dga;
mod dns;
mod domains;
mod engine;
mod event;
mod output;
mod profile;
mod sampler;
mod stats;

use std::time::{Duration, Instant};

use anyhow::Context;
use clap::Parser;

use crate::cli::Cli;
use crate::dns::UdpSink;
use crate::engine::{RunContext, RunLimits};
use crate::sampler::Sampler;
use crate::stats::RunStats;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
	let cli = Cli::parse();

	// Resolve the profile: a named preset, or one derived from the
	// client identifier
	let profile = match cli.profile.as_str() {
		"auto" => {
			let client_id = cli.client_ip.clone()
				.or_else(dns::outbound_ip)
				.unwrap_or_else(|| "127.0.0.1".to_string());
			profile::derive(&client_id)
		}
		name => profile::preset(name)?,
	};

	output::print_profile(&profile);
	if cli.show_profile {
		return Ok(());
	}

	let server = dns::parse_server(&cli.server)
		.with_context(|| format!("invalid server address '{}'", cli.server))?;
	let sink = UdpSink::new(server, Duration::from_millis(cli.timeout));

	let mut sampler = Sampler::new(profile.clone(), cli.seed)
		.context("invalid traffic profile")?;
	let mut stats = RunStats::new();

	// Ctrl-C flips the stop flag; the loop drains cooperatively
	let ctx = RunContext::new();
	let signal_ctx = ctx.clone();
	tokio::spawn(async move {
		if tokio::signal::ctrl_c().await.is_ok() {
			println!("\nInterrupt received, stopping...");
			signal_ctx.request_stop();
		}
	});

	let limits = RunLimits {
		count: (cli.count > 0).then_some(cli.count),
		deadline: (cli.duration > 0)
			.then(|| Instant::now() + Duration::from_secs(cli.duration)),
	};

	println!("Sending queries to {} (profile: {})", server, profile.name);
	println!("--------------------------------------------------");

	engine::run(&mut sampler, &sink, &ctx, &mut stats, limits).await;

	output::print_summary(&profile, &stats);
	if let Some(path) = &cli.output {
		output::write_csv(path, &profile, &stats)?;
	}

	Ok(())
}
