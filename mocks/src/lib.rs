use httptest::{matchers::*, responders::*, Expectation, Server};
use serde_json::json;

/// Create an empty mock server for Photos API endpoints.
pub fn photos_server() -> Server {
    Server::run()
}

/// Base URL of the mock server, without a trailing slash, suitable for
/// `ApiClient::with_base_url`.
pub fn base_url(server: &Server) -> String {
    format!("http://{}", server.addr())
}

/// Build one media item in the wire shape the search endpoint returns.
pub fn media_item(id: &str) -> serde_json::Value {
    json!({
        "id": id,
        "productUrl": format!("https://example.com/photo/{}", id),
        "baseUrl": format!("https://example.com/base/{}", id),
        "mimeType": "image/jpeg",
        "mediaMetadata": {
            "creationTime": "2022-01-01T00:00:00Z",
            "width": "4000",
            "height": "3000"
        },
        "filename": format!("{}.jpg", id)
    })
}

/// Build a `mediaItems:search` response page.
pub fn search_page(ids: &[&str], next_page_token: Option<&str>) -> serde_json::Value {
    let items: Vec<_> = ids.iter().map(|id| media_item(id)).collect();
    match next_page_token {
        Some(token) => json!({"mediaItems": items, "nextPageToken": token}),
        None => json!({"mediaItems": items}),
    }
}

/// Expect one POST to `/v1/mediaItems:search` carrying the given bearer
/// token and answer with `body`.
pub fn expect_search(server: &Server, access_token: &str, body: serde_json::Value) {
    server.expect(
        Expectation::matching(all_of![
            request::method_path("POST", "/v1/mediaItems:search"),
            request::headers(contains((
                "authorization",
                eq(format!("Bearer {}", access_token))
            ))),
        ])
        .respond_with(json_encoded(body)),
    );
}

/// Like [`expect_search`], additionally matching the exact JSON request
/// body the client must send.
pub fn expect_search_body(
    server: &Server,
    access_token: &str,
    expected_body: serde_json::Value,
    response: serde_json::Value,
) {
    server.expect(
        Expectation::matching(all_of![
            request::method_path("POST", "/v1/mediaItems:search"),
            request::headers(contains((
                "authorization",
                eq(format!("Bearer {}", access_token))
            ))),
            request::body(json_decoded(eq(expected_body))),
        ])
        .respond_with(json_encoded(response)),
    );
}

/// Expect one search call and fail it with the given HTTP status.
pub fn expect_search_status(server: &Server, status: u16) {
    server.expect(
        Expectation::matching(request::method_path("POST", "/v1/mediaItems:search"))
            .respond_with(status_code(status)),
    );
}

/// Expect one search call and answer with a body that is not JSON.
pub fn expect_search_garbage(server: &Server) {
    server.expect(
        Expectation::matching(request::method_path("POST", "/v1/mediaItems:search"))
            .respond_with(status_code(200).body("not json")),
    );
}

fn album(id: &str, title: &str, count: u32) -> serde_json::Value {
    json!({
        "id": id,
        "title": title,
        "productUrl": format!("https://example.com/album/{}", id),
        "mediaItemsCount": count.to_string(),
        "coverPhotoBaseUrl": format!("https://example.com/cover/{}", id)
    })
}

/// Expect a GET to `/v1/albums` and answer with two albums.
pub fn expect_albums(server: &Server) {
    server.expect(
        Expectation::matching(request::method_path("GET", "/v1/albums")).respond_with(
            json_encoded(json!({
                "albums": [album("1", "Holidays", 10), album("2", "Family", 4)]
            })),
        ),
    );
}

/// Expect a GET to `/v1/sharedAlbums` and answer with one shared album.
pub fn expect_shared_albums(server: &Server) {
    server.expect(
        Expectation::matching(request::method_path("GET", "/v1/sharedAlbums")).respond_with(
            json_encoded(json!({
                "sharedAlbums": [album("3", "Trip", 7)]
            })),
        ),
    );
}
