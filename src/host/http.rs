use std::io::Read as _;
use std::time::Duration;

use embedded_io::{ErrorKind, ErrorType};
use reqwest::blocking::Client;

use super::io_kind;
use crate::fetch::{Response, Transport};

/// Seconds before a request is abandoned
const REQUEST_TIMEOUT_SECS: u64 = 15;

/// Blocking HTTP [`Transport`] using `reqwest`
#[derive(Debug, Clone)]
pub struct HttpTransport {
    client: Client,
}

impl HttpTransport {
    pub fn new() -> Result<Self, reqwest::Error> {
        let client = Client::builder()
            .timeout(Duration::from_secs(REQUEST_TIMEOUT_SECS))
            .build()?;
        Ok(Self { client })
    }
}

/// Response body of an [`HttpTransport`] request
pub struct HttpBody {
    response: reqwest::blocking::Response,
}

impl ErrorType for HttpBody {
    type Error = ErrorKind;
}

impl embedded_io::Read for HttpBody {
    fn read(&mut self, buf: &mut [u8]) -> Result<usize, Self::Error> {
        self.response.read(buf).map_err(|e| io_kind(&e))
    }
}

impl Transport for HttpTransport {
    type Error = reqwest::Error;
    type Body<'a> = HttpBody;

    fn get(&mut self, url: &str) -> Result<Response<Self::Body<'_>>, Self::Error> {
        let response = self.client.get(url).send()?;
        Ok(Response {
            status: response.status().as_u16(),
            body: HttpBody { response },
        })
    }
}
