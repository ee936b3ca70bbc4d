use serde::de::DeserializeOwned;

use crate::error::{FetchError, FetchResult};

use super::transport::HttpResponse;

/// Anything but a 200 is treated as a transport failure.
pub fn check_status(response: &HttpResponse) -> FetchResult<()> {
    if response.status == 200 {
        Ok(())
    } else {
        Err(FetchError::transport(format!(
            "unexpected status {}",
            response.status
        )))
    }
}

/// Decode a JSON body into `T`, keeping the serde message as diagnostic text.
pub fn decode_body<T: DeserializeOwned>(body: &str) -> FetchResult<T> {
    serde_json::from_str(body).map_err(|err| FetchError::Decode {
        detail: err.to_string(),
    })
}
