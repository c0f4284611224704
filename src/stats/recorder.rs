use axum::http::{HeaderMap, StatusCode};

// ─── Response sink abstraction ───────────────────────────────────

/// Where response output ultimately goes. Implemented by whatever
/// transport the embedding server writes responses through.
pub trait ResponseSink {
    fn put_status(&mut self, status: StatusCode);
    fn put_headers(&mut self, headers: &HeaderMap);
    fn put_body(&mut self, chunk: &[u8]);
}

// ─── Status recorder ─────────────────────────────────────────────

/// Decorator around the real response sink. Forwards every write
/// unchanged and remembers the status code that was set, so the
/// recording pipeline can read it after the handler has finished.
///
/// A handler that never sets a status is an implicit 200.
pub struct StatusRecorder<S> {
    sink: S,
    status: StatusCode,
    bytes_written: usize,
}

impl<S: ResponseSink> StatusRecorder<S> {
    pub fn new(sink: S) -> Self {
        Self {
            sink,
            status: StatusCode::OK,
            bytes_written: 0,
        }
    }

    /// The status code the handler actually sent (200 if it never
    /// set one explicitly).
    pub fn status(&self) -> StatusCode {
        self.status
    }

    /// Body bytes forwarded to the real sink so far.
    pub fn bytes_written(&self) -> usize {
        self.bytes_written
    }

    /// Hand the wrapped sink back once recording is done.
    pub fn into_inner(self) -> S {
        self.sink
    }
}

impl<S: ResponseSink> ResponseSink for StatusRecorder<S> {
    fn put_status(&mut self, status: StatusCode) {
        self.status = status;
        self.sink.put_status(status);
    }

    fn put_headers(&mut self, headers: &HeaderMap) {
        self.sink.put_headers(headers);
    }

    fn put_body(&mut self, chunk: &[u8]) {
        self.bytes_written += chunk.len();
        self.sink.put_body(chunk);
    }
}

// ─── Tests ───────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::header::CONTENT_TYPE;

    /// Minimal in-memory sink so tests can see what was forwarded.
    #[derive(Default)]
    struct VecSink {
        status: Option<StatusCode>,
        headers: HeaderMap,
        body: Vec<u8>,
    }

    impl ResponseSink for VecSink {
        fn put_status(&mut self, status: StatusCode) {
            self.status = Some(status);
        }
        fn put_headers(&mut self, headers: &HeaderMap) {
            self.headers = headers.clone();
        }
        fn put_body(&mut self, chunk: &[u8]) {
            self.body.extend_from_slice(chunk);
        }
    }

    #[test]
    fn defaults_to_200_when_status_never_set() {
        let rec = StatusRecorder::new(VecSink::default());
        assert_eq!(rec.status(), StatusCode::OK);
    }

    #[test]
    fn remembers_explicit_status() {
        let mut rec = StatusRecorder::new(VecSink::default());
        rec.put_status(StatusCode::NOT_FOUND);
        assert_eq!(rec.status(), StatusCode::NOT_FOUND);

        // The write reached the real sink too.
        assert_eq!(rec.into_inner().status, Some(StatusCode::NOT_FOUND));
    }

    #[test]
    fn last_status_wins() {
        let mut rec = StatusRecorder::new(VecSink::default());
        rec.put_status(StatusCode::INTERNAL_SERVER_ERROR);
        rec.put_status(StatusCode::BAD_GATEWAY);
        assert_eq!(rec.status(), StatusCode::BAD_GATEWAY);
    }

    #[test]
    fn body_and_headers_pass_through_unmodified() {
        let mut rec = StatusRecorder::new(VecSink::default());

        let mut headers = HeaderMap::new();
        headers.insert(CONTENT_TYPE, "text/plain".parse().unwrap());
        rec.put_headers(&headers);

        rec.put_body(b"hello ");
        rec.put_body(b"world");
        assert_eq!(rec.bytes_written(), 11);

        let sink = rec.into_inner();
        assert_eq!(sink.body, b"hello world");
        assert_eq!(sink.headers.get(CONTENT_TYPE).unwrap(), "text/plain");
    }
}
