//! Shareable search state carried in a URL query string.
//!
//! Two parameters are meaningful: `search` (the committed search text) and
//! `filter` (a named special filter). Any other parameters are kept as-is so
//! that round-tripping a URL never loses information.

use crate::filter::SpecialFilter;
use crate::Result;

pub const SEARCH_PARAM: &str = "search";
pub const FILTER_PARAM: &str = "filter";

/// Ordered query-string parameters.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct UrlState {
    params: Vec<(String, String)>,
}

impl UrlState {
    /// Parse a query string, with or without the leading `?`.
    ///
    /// Malformed percent escapes are kept literally.
    pub fn parse(query: &str) -> Self {
        let query = query.strip_prefix('?').unwrap_or(query);
        let params = query
            .split('&')
            .filter(|pair| !pair.is_empty())
            .map(|pair| {
                let (key, value) = pair.split_once('=').unwrap_or((pair, ""));
                (decode(key), decode(value))
            })
            .collect();
        Self { params }
    }

    pub fn get(&self, key: &str) -> Option<&str> {
        self.params
            .iter()
            .find(|(k, _)| k == key)
            .map(|(_, v)| v.as_str())
    }

    /// Set a parameter, replacing an existing value in place.
    pub fn set(&mut self, key: &str, value: &str) {
        match self.params.iter_mut().find(|(k, _)| k == key) {
            Some((_, v)) => *v = value.to_string(),
            None => self.params.push((key.to_string(), value.to_string())),
        }
    }

    pub fn remove(&mut self, key: &str) {
        self.params.retain(|(k, _)| k != key);
    }

    /// Current search text, empty when absent.
    pub fn search(&self) -> &str {
        self.get(SEARCH_PARAM).unwrap_or("")
    }

    /// Mirror search text; blank text removes the parameter.
    pub fn set_search(&mut self, term: &str) {
        if term.trim().is_empty() {
            self.remove(SEARCH_PARAM);
        } else {
            self.set(SEARCH_PARAM, term);
        }
    }

    /// The named special filter, if any. Unknown names are an error.
    pub fn filter(&self) -> Result<Option<SpecialFilter>> {
        match self.get(FILTER_PARAM) {
            None | Some("") => Ok(None),
            Some(name) => name.parse().map(Some),
        }
    }

    pub fn set_filter(&mut self, filter: Option<SpecialFilter>) {
        match filter {
            Some(f) => self.set(FILTER_PARAM, f.as_str()),
            None => self.remove(FILTER_PARAM),
        }
    }

    /// Encode as a query string without the leading `?`.
    pub fn to_query_string(&self) -> String {
        self.params
            .iter()
            .map(|(k, v)| format!("{}={}", urlencoding::encode(k), urlencoding::encode(v)))
            .collect::<Vec<_>>()
            .join("&")
    }
}

fn decode(raw: &str) -> String {
    let spaced = raw.replace('+', " ");
    match urlencoding::decode(&spaced) {
        Ok(decoded) => decoded.into_owned(),
        Err(_) => spaced,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_and_get() {
        let state = UrlState::parse("?search=pumps%20in%20Plant%20A&filter=no-parts-activity");
        assert_eq!(state.search(), "pumps in Plant A");
        assert_eq!(state.filter().unwrap(), Some(SpecialFilter::NoPartsActivity));
    }

    #[test]
    fn test_plus_decodes_as_space() {
        let state = UrlState::parse("search=offline+valves");
        assert_eq!(state.search(), "offline valves");
    }

    #[test]
    fn test_set_search_roundtrip() {
        let mut state = UrlState::parse("tab=orders");
        state.set_search("not in use or unknown");
        let encoded = state.to_query_string();
        assert_eq!(encoded, "tab=orders&search=not%20in%20use%20or%20unknown");
        assert_eq!(UrlState::parse(&encoded), state);
    }

    #[test]
    fn test_blank_search_removes_param() {
        let mut state = UrlState::parse("search=pumps&tab=orders");
        state.set_search("   ");
        assert_eq!(state.get(SEARCH_PARAM), None);
        assert_eq!(state.to_query_string(), "tab=orders");
    }

    #[test]
    fn test_set_replaces_in_place() {
        let mut state = UrlState::parse("search=a&tab=orders");
        state.set_search("b");
        assert_eq!(state.to_query_string(), "search=b&tab=orders");
    }

    #[test]
    fn test_unknown_filter_is_error() {
        let state = UrlState::parse("filter=cheapest");
        assert!(state.filter().is_err());
        assert_eq!(UrlState::parse("filter=").filter().unwrap(), None);
    }

    #[test]
    fn test_set_filter() {
        let mut state = UrlState::default();
        state.set_filter(Some(SpecialFilter::NoPartsActivity));
        assert_eq!(state.to_query_string(), "filter=no-parts-activity");
        state.set_filter(None);
        assert_eq!(state.to_query_string(), "");
    }

    #[test]
    fn test_malformed_escape_kept() {
        let state = UrlState::parse("search=100%");
        assert_eq!(state.search(), "100%");
    }
}
