// src/extract/filename.rs
// =============================================================================
// Maps a page URL to the Markdown file it is saved as.
//
//   /                -> index.md
//   /guide/intro     -> guide_intro.md
//   /guide/intro/    -> guide_intro.md
//   /notes.md        -> notes.md
//
// The mapping is idempotent: feeding a produced name back in returns it
// unchanged. Two different URLs can map to the same name ("/a/b" and "/a_b");
// the later page simply overwrites the earlier file.
// =============================================================================

use url::Url;

// Characters that are not allowed (or not wise) in file names
const ILLEGAL: [char; 9] = ['\\', '/', '*', '?', ':', '"', '<', '>', '|'];

// Converts a URL path into a Markdown file name
pub fn page_filename(path: &str) -> String {
    let trimmed = path.trim_matches('/');

    if trimmed.is_empty() {
        return "index.md".to_string();
    }

    let mut name: String = trimmed
        .chars()
        .map(|c| if ILLEGAL.contains(&c) { '_' } else { c })
        .collect();

    if !name.ends_with(".md") {
        name.push_str(".md");
    }

    name
}

// Converts a full page URL into a Markdown file name (query and host ignored)
pub fn url_to_filename(url: &Url) -> String {
    page_filename(url.path())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_root_maps_to_index() {
        assert_eq!(page_filename("/"), "index.md");
        assert_eq!(page_filename(""), "index.md");
        assert_eq!(page_filename("///"), "index.md");
    }

    #[test]
    fn test_nested_path() {
        assert_eq!(page_filename("/guide/intro"), "guide_intro.md");
        assert_eq!(page_filename("/guide/intro/"), "guide_intro.md");
    }

    #[test]
    fn test_illegal_characters_replaced() {
        assert_eq!(page_filename("/a:b*c|d\"e<f>g\\h"), "a_b_c_d_e_f_g_h.md");
    }

    #[test]
    fn test_existing_md_suffix_kept() {
        assert_eq!(page_filename("/docs/readme.md"), "docs_readme.md");
    }

    #[test]
    fn test_mapping_is_idempotent() {
        for path in ["/", "", "/guide/intro", "/a/b/", "/x:y", "/readme.md", "/v1.2/api"] {
            let once = page_filename(path);
            assert_eq!(page_filename(&once), once, "not idempotent for {path}");
        }
    }

    #[test]
    fn test_url_ignores_query_and_host() {
        let url = Url::parse("https://example.com/guide/intro?lang=fr").unwrap();
        assert_eq!(url_to_filename(&url), "guide_intro.md");

        let root = Url::parse("https://example.com").unwrap();
        assert_eq!(url_to_filename(&root), "index.md");
    }

    #[test]
    fn test_collisions_are_not_resolved() {
        assert_eq!(page_filename("/a/b"), page_filename("/a_b"));
    }
}
