use crate::error::{Error, Result};
use alloc::string::String;
use http_body_util::Full;
use hyper::{
    body::Bytes,
    header::{HeaderValue, CONTENT_TYPE},
    Response, StatusCode,
};
use serde::Serialize;

pub type Reply = Response<Full<Bytes>>;

fn with_body(status: StatusCode, body: Bytes, mime: &'static str) -> Reply {
    let mut res = Response::new(Full::new(body));
    *res.status_mut() = status;
    assert!(res.headers_mut().insert(CONTENT_TYPE, HeaderValue::from_static(mime)).is_none());
    res
}

pub fn json<T: Serialize + ?Sized>(status: StatusCode, value: &T) -> Result<Reply> {
    let bytes = serde_json::to_vec(value).map_err(|err| {
        log::error!("failed to serialize response: {err}");
        Error::Fatal
    })?;
    Ok(with_body(status, bytes.into(), "application/json"))
}

pub fn text(status: StatusCode, message: String) -> Reply {
    with_body(status, message.into(), "text/plain; charset=utf-8")
}

pub fn empty(status: StatusCode) -> Reply {
    let mut res = Response::new(Full::default());
    *res.status_mut() = status;
    res
}
