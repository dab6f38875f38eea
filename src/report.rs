// src/report.rs
// =============================================================================
// Prints a crawl summary either as a table or as JSON.
//
// JSON goes to stdout untouched so it can be piped into other tools; all
// logging goes to stderr.
// =============================================================================

use anyhow::Result;

use crate::crawl::CrawlSummary;

pub fn print_summary(summary: &CrawlSummary, json: bool) -> Result<()> {
    if json {
        let json_output = serde_json::to_string_pretty(summary)?;
        println!("{}", json_output);
    } else {
        print_table(summary);
    }
    Ok(())
}

fn print_table(summary: &CrawlSummary) {
    if !summary.failures.is_empty() {
        println!("\n{:<60} {:<40}", "URL", "ERROR");
        println!("{}", "=".repeat(100));

        for failure in &summary.failures {
            println!("{:<60} {:<40}", truncate(&failure.url, 57), failure.error);
        }
    }

    println!();
    println!("📊 Summary:");
    println!("   ✅ Saved: {}", summary.pages_saved);
    if summary.fetched > 0 {
        println!("   📥 Fetched (not saved): {}", summary.fetched);
    }
    println!("   ❌ Failed: {}", summary.errors);
    println!("   📋 Dispatched: {}", summary.visited);
}

// Shortens long URLs for the table, on a char boundary
fn truncate(text: &str, max: usize) -> String {
    if text.chars().count() > max {
        let head: String = text.chars().take(max).collect();
        format!("{}...", head)
    } else {
        text.to_string()
    }
}
