use ahash::AHashMap;

use crate::{error::NavError, group_nodes, macros::Escaped, node};

/// Where the current page belongs in the tab strip.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Route {
    Agreements,
    Deliverables,
    Users,
    Groups,
    Usage,
    None,
}

/// Length of the page name prefix that selects a route.
const KEY_LEN: usize = 5;

lazy_static::lazy_static! {
    static ref ROUTE_KEYS: AHashMap<&'static str, Route> = AHashMap::from_iter([
        ("agree", Route::Agreements),
        ("deliv", Route::Deliverables),
        ("users", Route::Users),
        ("group", Route::Groups),
        ("usage", Route::Usage),
    ]);
}

impl Route {
    /// Match a page segment such as `agreements.html` against the route keys.
    pub fn from_segment(segment: &str) -> Route {
        segment
            .get(..KEY_LEN)
            .and_then(|key| ROUTE_KEYS.get(key))
            .copied()
            .unwrap_or(Route::None)
    }

    /// Deliverables live under the agreements tab.
    pub fn tab(self) -> Option<Tab> {
        match self {
            Route::Agreements | Route::Deliverables => Some(Tab::Agreements),
            Route::Users => Some(Tab::Users),
            Route::Groups => Some(Tab::Groups),
            Route::Usage => Some(Tab::Usage),
            Route::None => None,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Tab {
    Agreements,
    Users,
    Groups,
    Usage,
}

impl Tab {
    pub const ALL: [Tab; 4] = [Tab::Agreements, Tab::Users, Tab::Groups, Tab::Usage];

    pub fn label(self) -> &'static str {
        match self {
            Tab::Agreements => "Agreements",
            Tab::Users => "Users",
            Tab::Groups => "Groups",
            Tab::Usage => "Usage",
        }
    }

    pub fn href(self) -> &'static str {
        match self {
            Tab::Agreements => "agreements.html",
            Tab::Users => "users.html",
            Tab::Groups => "groups.html",
            Tab::Usage => "usage.html",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NavState {
    /// Page name with the extension dropped and `_` shown as ` / `.
    pub title: String,
    pub route: Route,
}

impl NavState {
    pub fn active_tab(&self) -> Option<Tab> {
        self.route.tab()
    }

    /// The title with every word capitalised, as shown in `<title>` and on the active tab.
    pub fn display_title(&self) -> String {
        let mut out = String::with_capacity(self.title.len());
        let mut word_start = true;
        for c in self.title.chars() {
            if word_start {
                out.extend(c.to_uppercase());
            } else {
                out.push(c);
            }
            word_start = c.is_whitespace();
        }
        out
    }
}

/// Derive the title and active route from a request path like `/agreements.html`.
pub fn compute_nav_state(path: &str) -> Result<NavState, NavError> {
    let Some(rest) = path.strip_prefix('/') else {
        return Err(NavError::NotAbsolute(path.to_string()));
    };
    let segment = rest.split('/').next().unwrap_or_default();
    if segment.is_empty() {
        return Err(NavError::EmptySegment(path.to_string()));
    }

    let stem = segment.split('.').next().unwrap_or_default();
    Ok(NavState {
        title: stem.replace('_', " / "),
        route: Route::from_segment(segment),
    })
}

pub const PAGINATION_ID: &str = "pagination";

/// Render the tab strip. `pagination` is placed inside the placeholder and may be empty.
pub fn render_tab_strip(state: &NavState, pagination: &str) -> String {
    let active = state.active_tab();
    let title = state.display_title();
    let tabs = Tab::ALL.map(|tab| {
        let is_active = active == Some(tab);
        let label = if is_active { title.as_str() } else { tab.label() };
        node! { li, class = if is_active { "active" } else { "" } =>
            node! { a, class = "text-capitalize", href = tab.href() => Escaped(label) },
        }
        .to_string()
    });

    node! { ul, class = "nav nav-tabs", style = "font-size: 16pt;" =>
        group_nodes!(tabs[0], tabs[1], tabs[2], tabs[3]),
        node! { div, id = PAGINATION_ID, style = "position: fixed; top: 0; right: 2;" => pagination },
    }
    .to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn state(path: &str) -> NavState {
        compute_nav_state(path).unwrap()
    }

    #[test]
    fn agreements_page() {
        let nav = state("/agreements.html");
        assert_eq!(nav.title, "agreements");
        assert_eq!(nav.display_title(), "Agreements");
        assert_eq!(nav.route, Route::Agreements);
        assert_eq!(nav.active_tab(), Some(Tab::Agreements));

        let html = render_tab_strip(&nav, "");
        assert!(html.contains(r#"<li class="active"><a class="text-capitalize" href="agreements.html">Agreements</a></li>"#));
        assert!(html.contains(r#"<li class=""><a class="text-capitalize" href="users.html">Users</a></li>"#));
        assert!(html.contains(r#"<li class=""><a class="text-capitalize" href="groups.html">Groups</a></li>"#));
        assert!(html.contains(r#"<li class=""><a class="text-capitalize" href="usage.html">Usage</a></li>"#));
        assert_eq!(html.matches(r#"class="active""#).count(), 1);
    }

    #[test]
    fn deliverables_share_the_agreements_tab() {
        let nav = state("/deliv_something.html");
        assert_eq!(nav.title, "deliv / something");
        assert_eq!(nav.route, Route::Deliverables);
        assert_eq!(nav.active_tab(), Some(Tab::Agreements));

        let html = render_tab_strip(&nav, "");
        assert!(html.contains(r#"<li class="active"><a class="text-capitalize" href="agreements.html">Deliv / Something</a></li>"#));
    }

    #[test]
    fn unknown_page_has_no_active_tab() {
        let nav = state("/home.html");
        assert_eq!(nav.title, "home");
        assert_eq!(nav.route, Route::None);
        assert_eq!(nav.active_tab(), None);

        let html = render_tab_strip(&nav, "");
        assert!(!html.contains(r#"class="active""#));
        assert!(html.contains(">Agreements</a>"));
    }

    #[test]
    fn every_key_selects_its_route() {
        assert_eq!(state("/users.html").route, Route::Users);
        assert_eq!(state("/groups.html").route, Route::Groups);
        assert_eq!(state("/usage.html").route, Route::Usage);
        assert_eq!(state("/deliverables.html").route, Route::Deliverables);
        // shorter than a key
        assert_eq!(state("/use").route, Route::None);
        assert_eq!(state("/usag/x.html").route, Route::None);
    }

    #[test]
    fn title_uses_second_segment_only() {
        let nav = state("/group_members.old.html/extra");
        assert_eq!(nav.title, "group / members");
        assert_eq!(nav.route, Route::Groups);
    }

    #[test]
    fn malformed_paths_are_errors() {
        assert_eq!(
            compute_nav_state("agreements.html"),
            Err(NavError::NotAbsolute("agreements.html".into()))
        );
        assert_eq!(compute_nav_state("/"), Err(NavError::EmptySegment("/".into())));
        assert_eq!(compute_nav_state("//x"), Err(NavError::EmptySegment("//x".into())));
    }

    #[test]
    fn placeholder_holds_given_markup() {
        let html = render_tab_strip(&state("/usage.html"), "<ul>x</ul>");
        assert!(html.ends_with(
            r#"<div id="pagination" style="position: fixed; top: 0; right: 2;"><ul>x</ul></div></ul>"#
        ));
    }

    #[test]
    fn labels_are_escaped() {
        let html = render_tab_strip(&state("/usage<b>.html"), "");
        assert!(html.contains(">Usage&lt;b&gt;</a>"));
    }
}
