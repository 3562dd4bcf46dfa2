use std::borrow::Cow;
use std::sync::Arc;

use tracing::warn;
use wry::http::{header::CONTENT_TYPE, Response, StatusCode};
use wry::WebViewBuilder;

use crate::content::{ContentProvider, PROTOCOL_NAME};

pub(super) fn attach_custom_protocol<'a>(
    builder: WebViewBuilder<'a>,
    content: Arc<ContentProvider>,
) -> WebViewBuilder<'a> {
    builder.with_custom_protocol(PROTOCOL_NAME.to_string(), move |_wv_id, request| {
        respond(&content, request.uri().path())
    })
}

/// Build the response for one custom-protocol request path.
pub fn respond(content: &ContentProvider, path: &str) -> Response<Cow<'static, [u8]>> {
    let (status, mime, body) = match content.resolve(path) {
        Some((mime, data)) => (StatusCode::OK, mime.into_owned(), data.into_owned()),
        None => {
            warn!(path = %path, "custom protocol: asset not found");
            (
                StatusCode::NOT_FOUND,
                "text/plain".to_string(),
                b"Not Found".to_vec(),
            )
        }
    };

    let mut response = Response::new(Cow::Owned(body));
    *response.status_mut() = status;
    if let Ok(value) = mime.parse() {
        response.headers_mut().insert(CONTENT_TYPE, value);
    }
    response
}

#[cfg(test)]
mod tests {
    use super::*;

    fn provider() -> (tempfile::TempDir, ContentProvider) {
        let dir = tempfile::tempdir().unwrap();
        std::fs::create_dir_all(dir.path().join("shell")).unwrap();
        std::fs::write(dir.path().join("shell/index.html"), "<html></html>").unwrap();
        let content = ContentProvider::new(dir.path());
        (dir, content)
    }

    #[test]
    fn serves_existing_asset() {
        let (_dir, content) = provider();
        let response = respond(&content, "/shell/index.html");
        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(response.headers()[CONTENT_TYPE], "text/html");
        assert_eq!(response.body().as_ref(), b"<html></html>");
    }

    #[test]
    fn missing_asset_is_404() {
        let (_dir, content) = provider();
        let response = respond(&content, "/shell/missing.js");
        assert_eq!(response.status(), StatusCode::NOT_FOUND);
    }

    #[test]
    fn file_outside_root_is_404() {
        let (dir, content) = provider();
        let outside = dir.path().parent().unwrap().join("omni-outside-secret.txt");
        std::fs::write(&outside, "secret").ok();
        let response = respond(&content, "/../omni-outside-secret.txt");
        assert_eq!(response.status(), StatusCode::NOT_FOUND);
        std::fs::remove_file(outside).ok();
    }
}
