// 3rd party crates
use thiserror::Error;

#[derive(Debug, Error)]
pub enum DiscoverError {
    #[error("no discovery source configured")]
    NoSource,

    #[error("request to {service} failed: {error}")]
    Request {
        service: String,
        #[source]
        error: reqwest::Error,
    },

    #[error("{service} answered with HTTP {status}")]
    Status {
        service: String,
        status: reqwest::StatusCode,
    },

    #[error("invalid JSON body from {service}: {error}")]
    Body {
        service: String,
        #[source]
        error: reqwest::Error,
    },

    #[error("field {key} missing in response from {service}")]
    MissingField { service: String, key: String },

    #[error("cannot parse {value:?} from {service} as an IPv4 address")]
    ParseIp { service: String, value: String },
}
