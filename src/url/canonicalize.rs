use url::{form_urlencoded, Url};

/// Tracking and referral query parameters dropped during canonicalization
pub const TRACKING_PARAMS: &[&str] = &[
    "_r",
    "emc",
    "partner",
    "referer",
    "smid",
    "smprod",
    "smtyp",
    "utm_campaign",
    "utm_content",
    "utm_medium",
    "utm_source",
    "utm_term",
];

/// Canonicalizes a URL into the key used by the article cache
///
/// # Canonicalization Steps
///
/// 1. Split the URL into scheme, host, path, query and fragment
/// 2. Decode the query string into key/value pairs
/// 3. Drop pairs with an empty value and pairs whose key is a tracking parameter
/// 4. Sort the remaining pairs by key, then value
/// 5. Re-encode the query (omitted entirely when nothing is left) and reassemble
///
/// Scheme, host, path and fragment are kept. Input that does not parse as an
/// absolute URL is split textually and canonicalized the same way, so this
/// function never fails.
///
/// # Examples
///
/// ```
/// use automobile::url::canonicalize;
///
/// let url = canonicalize("https://example.com/story?utm_source=feed&b=2&a=1");
/// assert_eq!(url, "https://example.com/story?a=1&b=2");
/// ```
pub fn canonicalize(url_str: &str) -> String {
    match Url::parse(url_str) {
        Ok(mut url) => {
            let query = url.query().map(canonical_query).unwrap_or_default();
            if query.is_empty() {
                url.set_query(None);
            } else {
                url.set_query(Some(&query));
            }
            url.to_string()
        }
        Err(e) => {
            tracing::debug!("Canonicalizing unparseable URL {:?} textually: {}", url_str, e);
            canonicalize_text(url_str)
        }
    }
}

/// Checks if a query parameter is a tracking parameter
pub fn is_tracking_param(key: &str) -> bool {
    TRACKING_PARAMS.contains(&key)
}

/// Filters, sorts and re-encodes a raw query string
fn canonical_query(query: &str) -> String {
    let mut pairs: Vec<(String, String)> = form_urlencoded::parse(query.as_bytes())
        .filter(|(key, value)| !value.is_empty() && !is_tracking_param(key))
        .map(|(key, value)| (key.into_owned(), value.into_owned()))
        .collect();

    pairs.sort();

    form_urlencoded::Serializer::new(String::new())
        .extend_pairs(pairs)
        .finish()
}

/// Best-effort canonicalization for strings the URL parser rejects
fn canonicalize_text(url_str: &str) -> String {
    let (rest, fragment) = match url_str.split_once('#') {
        Some((rest, fragment)) => (rest, Some(fragment)),
        None => (url_str, None),
    };
    let (base, query) = match rest.split_once('?') {
        Some((base, query)) => (base, canonical_query(query)),
        None => (rest, String::new()),
    };

    let mut result = base.to_string();
    if !query.is_empty() {
        result.push('?');
        result.push_str(&query);
    }
    if let Some(fragment) = fragment.filter(|f| !f.is_empty()) {
        result.push('#');
        result.push_str(fragment);
    }
    result
}
