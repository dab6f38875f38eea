// src/extract/mod.rs
// =============================================================================
// Everything we pull out of fetched documents.
//
// Submodules:
// - links: same-origin hyperlinks from HTML pages
// - filename: page URL -> Markdown file name
// - sitemap: page URLs from sitemap.xml
// - robots: robots.txt lookup (displayed, never enforced)
// =============================================================================

mod filename;
mod links;
mod robots;
mod sitemap;

pub use filename::url_to_filename;
pub use links::same_origin_links;
pub use robots::{fetch_robots, print_robots, RobotsStatus};
pub use sitemap::fetch_sitemap;
