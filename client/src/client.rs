use crate::pb::sa_protoc::sentiment_analysis_client::SentimentAnalysisClient;
use crate::{
    ClassificationReply, ClientError, ClusterReply, RemoteSentimentService, TextBatch,
    TripletReply,
};

use tonic::transport::Channel;
use tracing::instrument;

/// gRPC client for the sentiment analysis service over a plaintext channel.
#[derive(Debug, Clone)]
pub struct Client {
    stub: SentimentAnalysisClient<Channel>,
}

impl Client {
    /// Connects to `address` (`host:port`) without TLS or authentication.
    pub async fn connect(address: &str) -> Result<Self, ClientError> {
        let endpoint = Channel::from_shared(format!("http://{address}"))
            .map_err(|_| ClientError::InvalidAddress(address.to_string()))?;
        let channel = endpoint.connect().await?;

        tracing::info!("Connected to sentiment service at {}", address);
        Ok(Self {
            stub: SentimentAnalysisClient::new(channel),
        })
    }
}

#[tonic::async_trait]
impl RemoteSentimentService for Client {
    #[instrument(skip_all, fields(batch_size = batch.len(), reply_size))]
    async fn classify(&mut self, batch: &TextBatch) -> Result<ClassificationReply, ClientError> {
        let response = self
            .stub
            .senti_cls(batch.to_grpc_request())
            .await
            .map_err(ClientError::remote("SentiCLS"))?;

        let reply = ClassificationReply::from(response.into_inner());
        tracing::Span::current().record("reply_size", reply.labels.len());
        tracing::info!("Received reply");
        Ok(reply)
    }

    #[instrument(skip_all, fields(batch_size = batch.len(), reply_size))]
    async fn extract_triplets(&mut self, batch: &TextBatch) -> Result<TripletReply, ClientError> {
        let response = self
            .stub
            .trip_extract(batch.to_grpc_request())
            .await
            .map_err(ClientError::remote("TripExtract"))?;

        let reply = TripletReply::from(response.into_inner());
        tracing::Span::current().record("reply_size", reply.triplets.len());
        tracing::info!("Received reply");
        Ok(reply)
    }

    #[instrument(skip_all, fields(batch_size = batch.len(), reply_size))]
    async fn cluster(&mut self, batch: &TextBatch) -> Result<ClusterReply, ClientError> {
        let response = self
            .stub
            .cluster(batch.to_grpc_request())
            .await
            .map_err(ClientError::remote("Cluster"))?;

        let reply = ClusterReply::from(response.into_inner());
        tracing::Span::current().record("reply_size", reply.labels.len());
        tracing::info!("Received reply");
        Ok(reply)
    }
}
