use thiserror::Error;

#[derive(Error, Debug)]
pub enum ClientError {
    #[error("invalid service address {0:?}")]
    InvalidAddress(String),

    #[error("failed to connect to sentiment service: {0}")]
    Connection(#[from] tonic::transport::Error),

    #[error("remote call {method} failed: {status}")]
    RemoteCall {
        method: &'static str,
        status: tonic::Status,
    },

    #[error("remote call {method} returned an empty reply")]
    EmptyReply { method: &'static str },

    #[error("failed to write reply: {0}")]
    Output(#[from] std::io::Error),
}

impl ClientError {
    pub(crate) fn remote(method: &'static str) -> impl FnOnce(tonic::Status) -> Self {
        move |status| Self::RemoteCall { method, status }
    }
}
