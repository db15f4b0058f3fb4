use std::{
    fs,
    path::{Path, PathBuf},
};

use eyre::Context;

/// Page bodies live in the content directory as `<name>.md` or `<name>.html`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Source {
    Markdown(PathBuf),
    Html(PathBuf),
}

/// Find the body for a page segment such as `agreements.html`. Markdown wins
/// over HTML when both exist.
pub fn find_content(content_dir: &Path, segment: &str) -> Option<Source> {
    let name = segment.strip_suffix(".html")?;
    if name.is_empty() || name.contains(['/', '\\']) || name.contains("..") {
        return None;
    }

    let markdown = content_dir.join(format!("{name}.md"));
    if markdown.is_file() {
        return Some(Source::Markdown(markdown));
    }
    let html = content_dir.join(format!("{name}.html"));
    if html.is_file() {
        return Some(Source::Html(html));
    }
    None
}

pub fn load_content(source: &Source) -> eyre::Result<String> {
    match source {
        Source::Markdown(path) => {
            let contents = fs::read_to_string(path).context(format!(
                "Failed to read the entirety of {path:?} into a string"
            ))?;
            Ok(markdown_to_html(&contents))
        }
        Source::Html(path) => fs::read_to_string(path).context(format!(
            "Failed to read the entirety of {path:?} into a string"
        )),
    }
}

fn markdown_to_html(contents: &str) -> String {
    use pulldown_cmark::{Options, Parser};

    let mut options = Options::empty();
    options.insert(Options::ENABLE_GFM);
    options.insert(Options::ENABLE_TABLES);

    let parser = Parser::new_ext(contents, options);
    let mut html = String::new();
    pulldown_cmark::html::push_html(&mut html, parser);
    html
}

#[cfg(test)]
mod tests {
    use super::*;

    fn scratch_dir(name: &str) -> PathBuf {
        let dir = std::env::temp_dir().join(format!("warehouse-nav-{name}-{}", std::process::id()));
        let _ = fs::remove_dir_all(&dir);
        fs::create_dir_all(&dir).unwrap();
        dir
    }

    #[test]
    fn prefers_markdown() {
        let dir = scratch_dir("prefers-markdown");
        fs::write(dir.join("users.md"), "# Users\n").unwrap();
        fs::write(dir.join("users.html"), "<p>users</p>").unwrap();

        let source = find_content(&dir, "users.html").unwrap();
        assert_eq!(source, Source::Markdown(dir.join("users.md")));
        assert_eq!(load_content(&source).unwrap(), "<h1>Users</h1>\n");
        fs::remove_dir_all(&dir).unwrap();
    }

    #[test]
    fn falls_back_to_html() {
        let dir = scratch_dir("falls-back");
        fs::write(dir.join("groups.html"), "<p>groups</p>").unwrap();

        let source = find_content(&dir, "groups.html").unwrap();
        assert_eq!(load_content(&source).unwrap(), "<p>groups</p>");
        assert_eq!(find_content(&dir, "usage.html"), None);
        fs::remove_dir_all(&dir).unwrap();
    }

    #[test]
    fn rejects_odd_names() {
        let dir = scratch_dir("odd-names");
        assert_eq!(find_content(&dir, "agreements"), None);
        assert_eq!(find_content(&dir, ".html"), None);
        assert_eq!(find_content(&dir, "..html"), None);
        assert_eq!(find_content(&dir, "a\\b.html"), None);
        fs::remove_dir_all(&dir).unwrap();
    }
}
