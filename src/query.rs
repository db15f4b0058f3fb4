use url::{Url, form_urlencoded};

lazy_static::lazy_static! {
    /// Request targets are origin-form, so they are resolved against a fixed origin.
    static ref ORIGIN: Url = Url::parse("http://localhost/").expect("valid origin");
}

/// The query string of `target` without `key`, other pairs kept in request order.
pub fn query_without(target: &str, key: &str) -> String {
    let Ok(url) = ORIGIN.join(target) else {
        return String::new();
    };
    form_urlencoded::Serializer::new(String::new())
        .extend_pairs(url.query_pairs().filter(|(k, _)| *k != key))
        .finish()
}
