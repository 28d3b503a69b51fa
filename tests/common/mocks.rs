//! Mock portal API fixtures.

pub use campus_portal::adapters::mock::{MockHttpClient, MockResponse};
pub use campus_portal::traits::{HttpError, Response};

use serde_json::{json, Value};

use super::url;

fn ok(data: Value) -> MockResponse {
    MockResponse::json(json!({ "success": true, "data": data }))
}

/// A portal where every endpoint answers successfully.
pub fn mock_portal() -> MockHttpClient {
    let mock = MockHttpClient::new();
    mock.set_response(
        &url("/about"),
        ok(json!([
            { "id": "history", "title": "History", "content": "Founded in 1960." },
            { "id": "vision", "title": "Vision", "content": "Excellence." }
        ])),
    );
    mock.set_response(
        &url("/programs"),
        ok(json!([{ "id": "cs", "name": "Computer Science", "faculty": "Engineering", "degree": "S1" }])),
    );
    mock.set_response(
        &url("/events"),
        ok(json!([{ "id": "e1", "title": "Open House", "date": "2026-11-02", "location": "Main Hall" }])),
    );
    mock.set_response(
        &url("/news"),
        ok(json!([
            { "id": "n1", "title": "Scholarship open", "summary": "Apply now" },
            { "id": "n2", "title": "New library", "summary": "Opening soon" },
            { "id": "n3", "title": "Exam schedule", "summary": "Published" }
        ])),
    );
    mock.set_response(
        &url("/institutions"),
        ok(json!([{ "id": "i1", "name": "Faculty of Law", "description": "Est. 1972" }])),
    );
    for role in ["student", "parent", "lecturer"] {
        mock.set_response(
            &url(&format!("/dashboard/{}", role)),
            ok(json!({ "greeting": "Hello", "items": [{ "label": "GPA", "value": "3.8" }] })),
        );
    }
    mock
}
