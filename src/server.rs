use std::path::PathBuf;

use log::{error, info, warn};
use tiny_http::{Header, Response, ResponseBox, Server};
use uri_rs::{QueryParameters, Uri};

use crate::{
    CSS, CSS_PATH,
    config::Config,
    error::{NavError, PageError},
    page::{
        content::{find_content, load_content},
        document,
        pagination::{Page, render_pagination},
    },
    query::query_without,
};

pub const FRAGMENT_PATH: &str = "/fragment/pagination";

/// What a request resolves to, before it becomes an HTTP response.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Reply {
    Html(String),
    Css,
    Redirect(String),
    Status(u16),
}

impl Reply {
    pub fn status(&self) -> u16 {
        match self {
            Reply::Html(_) | Reply::Css => 200,
            Reply::Redirect(_) => 302,
            Reply::Status(code) => *code,
        }
    }

    pub fn into_response(self) -> ResponseBox {
        match self {
            Reply::Html(html) => Response::from_string(html)
                .with_header(content_type("text/html; charset=utf-8"))
                .boxed(),
            Reply::Css => Response::from_string(CSS)
                .with_header(content_type("text/css"))
                .with_header(
                    "Cache-Control: public, max-age=900"
                        .parse::<Header>()
                        .expect("valid header"),
                )
                .boxed(),
            Reply::Redirect(location) => match Header::from_bytes(b"Location", location.as_bytes())
            {
                Ok(header) => Response::empty(302).with_header(header).boxed(),
                Err(()) => Response::empty(500).boxed(),
            },
            Reply::Status(code) => Response::empty(code).boxed(),
        }
    }
}

fn content_type(value: &str) -> Header {
    Header::from_bytes(b"Content-Type", value.as_bytes()).expect("valid header")
}

/// Everything a request needs, resolved once at startup.
#[derive(Debug, Clone)]
pub struct Site {
    pub content_dir:  PathBuf,
    pub default_page: String,
}

impl Site {
    pub fn from_config(config: &Config) -> eyre::Result<Self> {
        Ok(Site {
            content_dir:  config.content_dir()?,
            default_page: config.default_page().to_string(),
        })
    }

    /// Resolve a request target such as `/agreements.html?date=2018-01-01&page=2`.
    pub fn handle(&self, url: &str) -> Reply {
        // `//x` would parse as an authority; as a request target it is a path with no page segment
        if url.starts_with("//") {
            return nav_error(NavError::EmptySegment(url.to_string()));
        }
        let Ok(uri) = Uri::new(url) else {
            return Reply::Status(404);
        };
        let Some(path) = uri.path else {
            return Reply::Status(404);
        };
        let query = uri.get_query_parameters().unwrap_or_default();

        match path {
            "/" => Reply::Redirect(format!("/{}", self.default_page)),
            CSS_PATH => Reply::Css,
            FRAGMENT_PATH => pagination_fragment(&query),
            _ => self.page(url, path, &query),
        }
    }

    fn page(&self, url: &str, path: &str, query: &QueryParameters) -> Reply {
        let mut doc = match document::init(path) {
            Ok(doc) => doc,
            Err(e) => return nav_error(e),
        };

        // Pages are only served from the top level of the content directory
        let segment = &path[1..];
        let Some(source) = find_content(&self.content_dir, segment) else {
            return Reply::Status(404);
        };
        match load_content(&source) {
            Ok(body) => {
                doc.push_body(&body);
            }
            Err(e) => {
                error!("Failed to load page {path:?}: {e:?}");
                return Reply::Status(500);
            }
        }

        if let Some(value) = query.get("page") {
            let page = match value {
                Some(v) => Page::parse(v.as_str()),
                None => Err(PageError::Empty),
            };
            let page = match page {
                Ok(page) => page,
                Err(e) => {
                    warn!("{path}: {e}");
                    return Reply::Status(400);
                }
            };
            let base = format!("{segment}?{}", query_without(url, "page"));
            doc.pagination(&base, page);
        }

        Reply::Html(doc.render())
    }
}

fn nav_error(e: NavError) -> Reply {
    warn!("{e}");
    Reply::Status(400)
}

fn pagination_fragment(query: &QueryParameters) -> Reply {
    let Some(Some(url)) = query.get("url") else {
        return Reply::Status(400);
    };
    let page = match query.get("page") {
        None => Ok(Page::default()),
        Some(Some(v)) => Page::parse(v.as_str()),
        Some(None) => Err(PageError::Empty),
    };
    match page {
        Ok(page) => Reply::Html(render_pagination(url.as_str(), page)),
        Err(e) => {
            warn!("{FRAGMENT_PATH}: {e}");
            Reply::Status(400)
        }
    }
}

/// Serve requests one at a time until the listener fails.
pub fn serve(bind: &str, site: &Site) -> eyre::Result<()> {
    let server = Server::http(bind).map_err(|e| eyre::eyre!("Failed to bind {bind}: {e}"))?;
    info!("Listening on {bind}, pages from {:?}", site.content_dir);

    loop {
        // blocks until the next request is received
        let request = match server.recv() {
            Ok(rq) => rq,
            Err(e) => {
                error!("error: {e}");
                break;
            }
        };
        let url = request.url().to_string();
        let reply = site.handle(&url);
        info!("{} {url} -> {}", request.method(), reply.status());
        if let Err(e) = request.respond(reply.into_response()) {
            error!("Failed to respond: {e}");
        }
    }

    Ok(())
}
