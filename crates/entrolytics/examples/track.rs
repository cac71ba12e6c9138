// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! Example: Report analytics events using the entrolytics SDK.
//!
//! Run with:
//!   cargo run --example track -p entrolytics

use entrolytics::{Client, Event, Identify, PageView, Properties};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
	// Configure from environment or use defaults for testing
	let api_key = std::env::var("ENTROLYTICS_API_KEY")
		.expect("ENTROLYTICS_API_KEY environment variable required");
	let host = std::env::var("ENTROLYTICS_HOST")
		.unwrap_or_else(|_| "https://entrolytics.click".to_string());
	let website_id = std::env::var("ENTROLYTICS_WEBSITE_ID")
		.expect("ENTROLYTICS_WEBSITE_ID environment variable required");

	println!("Initializing Entrolytics client...");
	println!("  Host: {}", host);
	println!("  Website ID: {}", website_id);

	// Build the client
	let client = Client::builder().api_key(&api_key).host(&host).build()?;

	// Report a page view
	println!("\nReporting page view...");
	client
		.page_view(PageView {
			title: Some("Pricing".to_string()),
			referrer: Some("https://google.com".to_string()),
			..PageView::new(&website_id, "https://example.com/pricing")
		})
		.await?;

	// Report a custom event
	println!("Reporting purchase event...");
	client
		.track(Event {
			data: Properties::new()
				.insert("revenue", 99.99)
				.insert("currency", "USD")
				.insert("plan", "growth"),
			user_id: Some("user_456".to_string()),
			..Event::new(&website_id, "purchase")
		})
		.await?;

	// Identify the purchasing user
	println!("Identifying user...");
	client
		.identify(Identify {
			traits: Properties::new()
				.insert("email", "user@example.com")
				.insert("plan", "pro"),
			..Identify::new(&website_id, "user_456")
		})
		.await?;

	println!("\nAll events reported.");

	Ok(())
}
