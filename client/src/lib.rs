mod pb {
    include!("pb/mod.rs");
}

mod client;
mod error;
mod pipeline;
mod service;

pub use client::Client;
pub use error::ClientError;
pub use pipeline::run;
pub use service::{
    ClassificationReply, ClusterReply, RemoteSentimentService, TextBatch, Triplet, TripletReply,
};

/// Endpoint the demo sentiment service listens on.
pub const DEFAULT_ADDRESS: &str = "127.0.0.1:8089";
