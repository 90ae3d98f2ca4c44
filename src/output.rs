use anyhow::Result;
use comfy_table::{presets::UTF8_FULL, ContentArrangement, Table};

use crate::domains::Category;
use crate::profile::TrafficProfile;
use crate::stats::RunStats;

/// Print the resolved profile before the run starts (also the whole of
/// --show-profile).
pub fn print_profile(profile: &TrafficProfile) {
	println!("Traffic Profile: {}", profile.name);
	println!("=================");
	if let Some(client_id) = &profile.client_id {
		println!("Client id:      {}", client_id);
	}
	println!("Interval:       {:.2}-{:.2} s", profile.interval.0, profile.interval.1);
	println!("Burst prob:     {:.2}", profile.burst_probability);
	println!("Burst size:     {}-{}", profile.burst_size.0, profile.burst_size.1);
	println!("DGA complexity: {}", profile.dga_complexity);

	let mut table = Table::new();
	table.load_preset(UTF8_FULL);
	table.set_content_arrangement(ContentArrangement::Dynamic);
	table.set_header(vec!["Category", "Weight", "Role"]);
	for category in Category::ALL {
		table.add_row(vec![
			category.to_string(),
			format!("{:.1}", profile.weight(category)),
			role(profile, category).to_string(),
		]);
	}
	println!("{table}");
}

fn role(profile: &TrafficProfile, category: Category) -> &'static str {
	if profile.dominant == Some(category) {
		"dominant"
	} else if profile.secondary == Some(category) {
		"secondary"
	} else if profile.suppressed.contains(&category) {
		"suppressed"
	} else {
		""
	}
}

/// Print the final statistics table after the run ends.
pub fn print_summary(profile: &TrafficProfile, stats: &RunStats) {
	println!("\nSimulation Summary");
	println!("==================");
	println!("Profile:        {}", profile.name);
	println!("Duration:       {:.1} s", stats.elapsed_secs());
	println!("Total queries:  {}", stats.total());
	println!("Failed:         {}", stats.failed());
	println!("Queries/sec:    {:.2}", stats.queries_per_second());

	let mut table = Table::new();
	table.load_preset(UTF8_FULL);
	table.set_content_arrangement(ContentArrangement::Dynamic);
	table.set_header(vec!["Category", "Queries", "Share"]);
	for category in Category::ALL {
		let count = stats.count(category);
		if count == 0 {
			continue;
		}
		table.add_row(vec![
			category.to_string(),
			count.to_string(),
			format!("{:.1}%", stats.percentage(category)),
		]);
	}
	println!("{table}");
}

/// Write final per-category statistics to a CSV file.
pub fn write_csv(path: &str, profile: &TrafficProfile, stats: &RunStats) -> Result<()> {
	let mut writer = csv::Writer::from_path(path)?;

	writer.write_record(["profile", "category", "queries", "share_pct"])?;
	for category in Category::ALL {
		writer.write_record([
			profile.name.clone(),
			category.to_string(),
			stats.count(category).to_string(),
			format!("{:.1}", stats.percentage(category)),
		])?;
	}

	writer.flush()?;
	println!("\nStatistics written to: {}", path);
	Ok(())
}
