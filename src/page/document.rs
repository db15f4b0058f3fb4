use std::fmt::Write;

use crate::{
    CSS_PATH,
    error::NavError,
    macros::Escaped,
    page::{
        nav::{NavState, compute_nav_state, render_tab_strip},
        pagination::{Page, render_pagination},
    },
};

/// An admin page: navigation state, the pagination placeholder and the page's own markup.
#[derive(Debug, Clone)]
pub struct Document {
    pub nav:    NavState,
    pagination: Option<String>,
    body:       String,
}

/// Set up the document for `path`: title and tab strip. The body starts empty.
pub fn init(path: &str) -> Result<Document, NavError> {
    let nav = compute_nav_state(path)?;
    Ok(Document {
        nav,
        pagination: None,
        body: String::new(),
    })
}

impl Document {
    pub fn title(&self) -> String {
        self.nav.display_title()
    }

    /// Fill the pagination placeholder, replacing whatever an earlier call put there.
    pub fn pagination(&mut self, url: &str, page: Page) -> &mut Self {
        self.pagination = Some(render_pagination(url, page));
        self
    }

    pub fn pagination_html(&self) -> &str {
        self.pagination.as_deref().unwrap_or_default()
    }

    pub fn push_body(&mut self, html: &str) -> &mut Self {
        self.body.push_str(html);
        self
    }

    /// The `<body>` contents: tab strip first, then the page markup.
    pub fn render_body(&self) -> String {
        let mut out = render_tab_strip(&self.nav, self.pagination_html());
        out.push('\n');
        out.push_str(&self.body);
        out
    }

    pub fn render(&self) -> String {
        let title = Escaped(self.title());
        let mut out = String::new();

        writeln!(out, "<!DOCTYPE html>").unwrap();
        writeln!(out, r#"<html lang="en-US">"#).unwrap();
        writeln!(out, "<head>").unwrap();
        {
            writeln!(out, r#"<meta charset="utf-8" />"#).unwrap();
            writeln!(
                out,
                r#"<meta name="viewport" content="width=device-width, initial-scale=1">"#
            )
            .unwrap();
            writeln!(out, r#"<title>{title}</title>"#).unwrap();
            writeln!(out, r#"<link rel="stylesheet" href="{CSS_PATH}" />"#).unwrap();
        }
        writeln!(out, "</head>").unwrap();

        writeln!(out, "<body>").unwrap();
        writeln!(out, "{}", self.render_body()).unwrap();
        writeln!(out, "</body>").unwrap();
        writeln!(out, "</html>").unwrap();
        out
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn title_and_tab_strip_come_from_the_path() {
        let doc = init("/agreements.html").unwrap();
        let html = doc.render();
        assert!(html.contains("<title>Agreements</title>"));
        assert!(html.contains(r#"<li class="active">"#));
    }

    #[test]
    fn unknown_page_keeps_its_title() {
        let doc = init("/home.html").unwrap();
        assert_eq!(doc.title(), "Home");
        assert!(!doc.render().contains(r#"<li class="active">"#));
    }

    #[test]
    fn tab_strip_precedes_page_content() {
        let mut doc = init("/users.html").unwrap();
        doc.push_body("<table id=\"users\"></table>");
        let html = doc.render();
        let body = html.find("<body>").unwrap();
        let strip = html.find(r#"<ul class="nav nav-tabs""#).unwrap();
        let content = html.find(r#"<table id="users">"#).unwrap();
        assert!(body < strip && strip < content);
    }

    #[test]
    fn placeholder_starts_empty() {
        let doc = init("/usage.html").unwrap();
        assert_eq!(doc.pagination_html(), "");
        assert!(doc.render_body().contains(r#"right: 2;"></div>"#));
    }

    #[test]
    fn second_pagination_call_replaces_the_first() {
        let mut doc = init("/agreements.html").unwrap();
        doc.pagination("list?x=1", Page::from(3));
        doc.pagination("list?x=1", Page::from(0));

        let body = doc.render_body();
        assert_eq!(body.matches(r#"<ul class="pagination""#).count(), 1);
        assert!(body.contains("list?x=1&amp;page=1"));
        assert!(!body.contains("&laquo;"));
        assert_eq!(doc.pagination_html(), render_pagination("list?x=1", Page::from(0)));
    }

    #[test]
    fn malformed_path_is_reported() {
        assert!(matches!(init("nope"), Err(NavError::NotAbsolute(_))));
    }
}
