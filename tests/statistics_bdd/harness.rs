//! Mock builders for the provider endpoints the statistics run touches.

use serde_json::Value;
use wiremock::matchers::{method, path, query_param};
use wiremock::{Mock, ResponseTemplate};

/// HEAD probes hit during validation, answering the repository page with
/// `page_status` and the credential and branch probes with 200.
pub(crate) fn validation_probes(slug: &str, branch: String, page_status: u16) -> Vec<Mock> {
    vec![
        Mock::given(method("HEAD"))
            .and(path(format!("/{slug}")))
            .respond_with(ResponseTemplate::new(page_status)),
        Mock::given(method("HEAD"))
            .and(path("/api/v3/rate_limit"))
            .respond_with(ResponseTemplate::new(200)),
        Mock::given(method("HEAD"))
            .and(path(format!("/api/v3/repos/{slug}/branches/{branch}")))
            .respond_with(ResponseTemplate::new(200)),
    ]
}

/// API path of a repository collection, such as `pulls` or `issues`.
pub(crate) fn collection_path(slug: &str, collection: &str) -> String {
    format!("/api/v3/repos/{slug}/{collection}")
}

/// Page of records filtered by `state` and, when given, the `base` branch.
///
/// A `next` URL is advertised through the `Link` header.
pub(crate) fn state_page(
    collection_path: &str,
    state: &str,
    base: Option<String>,
    records: &[Value],
    next: Option<&str>,
) -> Mock {
    let response = next.map_or_else(
        || ResponseTemplate::new(200).set_body_json(records),
        |link| {
            ResponseTemplate::new(200)
                .set_body_json(records)
                .insert_header("Link", format!("<{link}>; rel=\"next\"").as_str())
        },
    );
    let builder = Mock::given(method("GET"))
        .and(path(collection_path.to_owned()))
        .and(query_param("state", state));
    match base {
        Some(branch) => builder.and(query_param("base", branch)).respond_with(response),
        None => builder.respond_with(response),
    }
}

/// Follow-up page addressed only by its `page` query parameter.
pub(crate) fn numbered_page(collection_path: &str, page: u32, records: &[Value]) -> Mock {
    Mock::given(method("GET"))
        .and(path(collection_path.to_owned()))
        .and(query_param("page", page.to_string()))
        .respond_with(ResponseTemplate::new(200).set_body_json(records))
}
