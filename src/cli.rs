use clap::Parser;

/// Synthetic DNS traffic generator
#[derive(Parser, Debug)]
#[command(name = "dns-traffic-sim")]
#[command(about = "Generate synthetic DNS query traffic across tagged domain categories")]
pub struct Cli {
	/// Target DNS server (IP or IP:port, port 53 when omitted)
	#[arg(short = 's', long = "server", default_value = "10.50.0.30")]
	pub server: String,

	/// Traffic profile; auto derives one from the client identifier
	#[arg(short = 'p', long = "profile", default_value = "auto",
		value_parser = ["auto", "enterprise", "infected", "developer", "mixed"])]
	pub profile: String,

	/// Number of queries to send (0 = continuous)
	#[arg(short = 'c', long = "count", default_value = "0")]
	pub count: u64,

	/// Stop after this many seconds (0 = unlimited)
	#[arg(short = 'd', long = "duration", default_value = "0")]
	pub duration: u64,

	/// Client identifier for auto profile derivation
	/// (defaults to the host's outbound address)
	#[arg(long = "client-ip")]
	pub client_ip: Option<String>,

	/// Print the resolved profile and exit without sending queries
	#[arg(long = "show-profile")]
	pub show_profile: bool,

	/// Per-query timeout in milliseconds
	#[arg(short = 't', long = "timeout", default_value = "2000")]
	pub timeout: u64,

	/// Random seed for reproducible sampling
	#[arg(long = "seed")]
	pub seed: Option<u64>,

	/// Output CSV file path for final statistics
	#[arg(short = 'o', long = "output")]
	pub output: Option<String>,
}
