// services/translator.rs
use axum::http::Method;
use serde_json::{json, Map, Value};
use url::form_urlencoded;

/// Resolved target for one inbound request: where to send it, how, and with
/// what body. `get_fallback` carries the original GET URL for the one route
/// that gets rewritten to a POST.
#[derive(Debug, Clone, PartialEq)]
pub struct ForwardPlan {
    pub target_url: String,
    pub method: Method,
    pub body: Option<Value>,
    pub get_fallback: Option<String>,
}

impl ForwardPlan {
    pub fn get(target_url: String) -> Self {
        ForwardPlan {
            target_url,
            method: Method::GET,
            body: None,
            get_fallback: None,
        }
    }

    pub fn post(target_url: String, body: Value) -> Self {
        ForwardPlan {
            target_url,
            method: Method::POST,
            body: Some(body),
            get_fallback: None,
        }
    }
}

/// Maps an inbound gateway path + query onto one upstream URL.
///
/// Stateless and purely data-driven: the same input always resolves to the
/// same plan.
pub struct RouteTranslator {
    base_url: String,
}

/// `type` values the news data endpoints understand. Only the list/lookup
/// endpoints take extra query parameters.
const NEWS_TYPES_WITH_QUERY: [&str; 3] = ["categories", "states", "districts"];
const NEWS_TYPES_BARE: [&str; 3] = ["languages", "category-keywords", "urgency-patterns"];

impl RouteTranslator {
    pub fn new(base_url: impl Into<String>) -> Self {
        RouteTranslator {
            base_url: base_url.into().trim_end_matches('/').to_string(),
        }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    pub fn auth_url(&self, operation: &str) -> String {
        format!("{}/auth/{}", self.base_url, operation)
    }

    /// Resolve `(method, pathname, query)` to a forwarding plan. `pathname`
    /// is the inbound path with the local `/api` prefix already stripped;
    /// `query` is the raw query string without the leading `?`.
    pub fn resolve(
        &self,
        method: Method,
        pathname: &str,
        query: &str,
        body: Option<Value>,
    ) -> ForwardPlan {
        let pairs: Vec<(String, String)> = form_urlencoded::parse(query.as_bytes())
            .into_owned()
            .collect();

        // /data?type=... and the legacy /api?type=... (or bare root) shape.
        if is_data_path(pathname) {
            if let Some(target) = param(&pairs, "type")
                .and_then(|news_type| self.news_target(news_type, &pairs))
            {
                return ForwardPlan {
                    target_url: target,
                    method,
                    body,
                    get_fallback: None,
                };
            }
        }

        if pathname == "/news/filter-advanced" && method == Method::GET {
            return self.filter_advanced_plan(&pairs, pathname, query);
        }

        // Passthrough: upstream base + original path + query string. Known
        // prefixes (/local-mandi-categories, /e-newspapers, /news, /auth)
        // and everything else resolve identically.
        let search = search_suffix(query);
        let target_url = format!("{}{}{}", self.base_url, pathname, search);
        let body = if method == Method::GET { None } else { body };
        ForwardPlan {
            target_url,
            method,
            body,
            get_fallback: None,
        }
    }

    fn news_target(&self, news_type: &str, pairs: &[(String, String)]) -> Option<String> {
        if NEWS_TYPES_BARE.contains(&news_type) {
            return Some(format!("{}/news/{}", self.base_url, news_type));
        }
        if NEWS_TYPES_WITH_QUERY.contains(&news_type) {
            let rest = query_without(pairs, "type");
            return Some(format!(
                "{}/news/{}{}",
                self.base_url,
                news_type,
                search_suffix(&rest)
            ));
        }
        // Unknown type falls through to passthrough.
        None
    }

    /// The advanced news filter only works as a POST upstream, but the
    /// frontend issues GETs. Rebuild the query parameters as a JSON body,
    /// carrying the category filter in the three key shapes the upstream has
    /// accepted at different points.
    fn filter_advanced_plan(
        &self,
        pairs: &[(String, String)],
        pathname: &str,
        query: &str,
    ) -> ForwardPlan {
        let category_raw = ["categoryId", "category_id", "category_ids"]
            .iter()
            .find_map(|key| param(pairs, key).filter(|v| !v.trim().is_empty()));

        let category_ids: Vec<String> = category_raw
            .map(|raw| {
                raw.split(',')
                    .map(str::trim)
                    .filter(|id| !id.is_empty())
                    .map(str::to_owned)
                    .collect()
            })
            .unwrap_or_default();

        let mut body = Map::new();
        if let Some(first) = category_ids.first() {
            body.insert("category_id".to_string(), json!(first));
            body.insert("category_ids".to_string(), json!(category_ids));
            body.insert("categoryIds".to_string(), json!(category_ids));
        }
        for key in ["language_id", "state_id", "district_id"] {
            if let Some(value) = param(pairs, key).filter(|v| !v.is_empty()) {
                body.insert(key.to_string(), json!(value));
            }
        }
        let page = param(pairs, "page")
            .and_then(|p| p.parse::<i64>().ok())
            .unwrap_or(1);
        body.insert("page".to_string(), json!(page));
        if let Some(limit) = param(pairs, "limit").and_then(|l| l.parse::<i64>().ok()) {
            body.insert("limit".to_string(), json!(limit));
        }

        ForwardPlan {
            target_url: format!("{}/news/filter-advanced", self.base_url),
            method: Method::POST,
            body: Some(Value::Object(body)),
            // Retried verbatim if the upstream rejects the rewritten POST.
            get_fallback: Some(format!(
                "{}{}{}",
                self.base_url,
                pathname,
                search_suffix(query)
            )),
        }
    }
}

fn is_data_path(pathname: &str) -> bool {
    pathname.is_empty()
        || pathname == "/"
        || pathname.starts_with("/data")
        || pathname.starts_with("/api")
}

fn param<'a>(pairs: &'a [(String, String)], name: &str) -> Option<&'a str> {
    pairs
        .iter()
        .find(|(key, _)| key == name)
        .map(|(_, value)| value.as_str())
}

fn query_without(pairs: &[(String, String)], name: &str) -> String {
    let mut serializer = form_urlencoded::Serializer::new(String::new());
    for (key, value) in pairs {
        if key != name {
            serializer.append_pair(key, value);
        }
    }
    serializer.finish()
}

fn search_suffix(query: &str) -> String {
    if query.is_empty() {
        String::new()
    } else {
        format!("?{query}")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const BASE: &str = "https://backend.example.com/api/v1";

    fn translator() -> RouteTranslator {
        RouteTranslator::new(BASE)
    }

    #[test]
    fn maps_every_news_type() {
        let t = translator();
        for news_type in [
            "languages",
            "categories",
            "states",
            "districts",
            "category-keywords",
            "urgency-patterns",
        ] {
            let plan = t.resolve(Method::GET, "/data", &format!("type={news_type}"), None);
            assert_eq!(plan.target_url, format!("{BASE}/news/{news_type}"));
            assert_eq!(plan.method, Method::GET);
        }
    }

    #[test]
    fn strips_type_but_keeps_other_params() {
        let t = translator();
        let plan = t.resolve(Method::GET, "/data", "type=categories&page=3", None);
        assert_eq!(plan.target_url, format!("{BASE}/news/categories?page=3"));

        // Order of parameters must not matter.
        let plan = t.resolve(Method::GET, "/data", "page=3&type=states", None);
        assert_eq!(plan.target_url, format!("{BASE}/news/states?page=3"));
    }

    #[test]
    fn legacy_api_and_root_paths_map_types_too() {
        let t = translator();
        let plan = t.resolve(Method::GET, "/api", "type=languages", None);
        assert_eq!(plan.target_url, format!("{BASE}/news/languages"));

        let plan = t.resolve(Method::GET, "", "type=districts&stateId=7", None);
        assert_eq!(plan.target_url, format!("{BASE}/news/districts?stateId=7"));
    }

    #[test]
    fn empty_or_unknown_type_passes_through() {
        let t = translator();
        let plan = t.resolve(Method::GET, "/data", "type=", None);
        assert_eq!(plan.target_url, format!("{BASE}/data?type="));

        let plan = t.resolve(Method::GET, "/data", "type=weather", None);
        assert_eq!(plan.target_url, format!("{BASE}/data?type=weather"));

        let plan = t.resolve(Method::GET, "/data", "", None);
        assert_eq!(plan.target_url, format!("{BASE}/data"));
    }

    #[test]
    fn passthrough_keeps_path_and_query() {
        let t = translator();
        let plan = t.resolve(Method::GET, "/e-newspapers", "page=2", None);
        assert_eq!(plan.target_url, format!("{BASE}/e-newspapers?page=2"));
        assert!(plan.body.is_none());
        assert!(plan.get_fallback.is_none());

        let plan = t.resolve(Method::GET, "/local-mandi-categories", "", None);
        assert_eq!(plan.target_url, format!("{BASE}/local-mandi-categories"));

        let plan = t.resolve(Method::GET, "/news/languages", "", None);
        assert_eq!(plan.target_url, format!("{BASE}/news/languages"));
    }

    #[test]
    fn passthrough_carries_body_for_non_get() {
        let t = translator();
        let body = json!({"emailOrPhone": "a@b.com", "password": "pw"});
        let plan = t.resolve(Method::POST, "/auth/userLogin", "", Some(body.clone()));
        assert_eq!(plan.target_url, format!("{BASE}/auth/userLogin"));
        assert_eq!(plan.method, Method::POST);
        assert_eq!(plan.body, Some(body));
    }

    #[test]
    fn filter_advanced_get_is_rewritten_to_post() {
        let t = translator();
        let plan = t.resolve(
            Method::GET,
            "/news/filter-advanced",
            "categoryId=A,B&language_id=L&page=2",
            None,
        );

        assert_eq!(plan.method, Method::POST);
        assert_eq!(plan.target_url, format!("{BASE}/news/filter-advanced"));

        let body = plan.body.expect("rewritten plan must carry a body");
        assert_eq!(body["category_id"], "A");
        assert_eq!(body["category_ids"], json!(["A", "B"]));
        assert_eq!(body["categoryIds"], json!(["A", "B"]));
        assert_eq!(body["language_id"], "L");
        assert_eq!(body["page"], 2);

        assert_eq!(
            plan.get_fallback.as_deref(),
            Some(format!("{BASE}/news/filter-advanced?categoryId=A,B&language_id=L&page=2").as_str())
        );
    }

    #[test]
    fn filter_advanced_accepts_snake_case_category_params() {
        let t = translator();
        let plan = t.resolve(
            Method::GET,
            "/news/filter-advanced",
            "category_ids=9&state_id=S&limit=20",
            None,
        );
        let body = plan.body.expect("body");
        assert_eq!(body["category_id"], "9");
        assert_eq!(body["category_ids"], json!(["9"]));
        assert_eq!(body["state_id"], "S");
        assert_eq!(body["page"], 1);
        assert_eq!(body["limit"], 20);
    }

    #[test]
    fn filter_advanced_without_categories_defaults_page_only() {
        let t = translator();
        let plan = t.resolve(Method::GET, "/news/filter-advanced", "", None);
        let body = plan.body.expect("body");
        assert_eq!(body, json!({"page": 1}));
    }

    #[test]
    fn filter_advanced_post_is_not_rewritten() {
        let t = translator();
        let body = json!({"category_ids": ["X"]});
        let plan = t.resolve(Method::POST, "/news/filter-advanced", "", Some(body.clone()));
        assert_eq!(plan.method, Method::POST);
        assert_eq!(plan.body, Some(body));
        assert!(plan.get_fallback.is_none());
    }

    #[test]
    fn resolution_is_pure() {
        let t = translator();
        let first = t.resolve(Method::GET, "/news/languages", "", None);
        let second = t.resolve(Method::GET, "/news/languages", "", None);
        assert_eq!(first, second);
    }
}
