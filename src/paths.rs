//! URL path helpers shared by link resolution and navigation.
//!
//! The upstream repository publishes directory-style URLs whose canonical
//! page is a default page (`index.html` by convention). Navigation matching
//! and link post-processing both normalize around that convention.

/// Default page name published for directory-style URLs.
pub const DEFAULT_PAGE_NAME: &str = "index";

/// Extension carried by published page URLs.
pub const DEFAULT_PAGE_EXTENSION: &str = ".html";

/// The default page file name, `index.html`.
pub fn default_page_link() -> String {
    format!("{DEFAULT_PAGE_NAME}{DEFAULT_PAGE_EXTENSION}")
}

/// Strip the default page extension from a URL, leaving other extensions
/// untouched: `about.html` becomes `about`, `logo.png` stays as is.
pub fn strip_default_extension(url: &str) -> &str {
    url.strip_suffix(DEFAULT_PAGE_EXTENSION).unwrap_or(url)
}

/// True if the URL points at a default page, either `.../index` or
/// `.../index.html`, or is exactly the default page name.
pub fn is_index_path(url: &str) -> bool {
    let stripped = strip_default_extension(url);
    stripped == DEFAULT_PAGE_NAME || stripped.ends_with(&format!("/{DEFAULT_PAGE_NAME}"))
}

/// Strip a trailing default-page segment, turning a canonical index URL back
/// into its directory form: `hello/index.html` becomes `hello/`.
pub fn strip_index_path(url: &str) -> &str {
    let stripped = strip_default_extension(url);
    if stripped == DEFAULT_PAGE_NAME {
        ""
    } else if let Some(dir) = stripped.strip_suffix(DEFAULT_PAGE_NAME) {
        if dir.ends_with('/') {
            &url[..dir.len()]
        } else {
            url
        }
    } else {
        url
    }
}

/// Compare two URLs for navigation matching. Comparison is case-sensitive on
/// the extension-stripped forms, so a request path of `child_2` matches the
/// sitemap URL `child_2.html`.
pub fn urls_match(a: &str, b: &str) -> bool {
    strip_default_extension(a) == strip_default_extension(b)
}
