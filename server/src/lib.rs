pub mod pb {
    include!("pb/mod.rs");
    pub const FILE_DESCRIPTOR_SET: &[u8] = tonic::include_file_descriptor_set!("sa_descriptor");
}

use pb::sa_protoc::sentiment_analysis_server::{SentimentAnalysis, SentimentAnalysisServer};
use pb::sa_protoc::{InTextArray, OutLabelArray, OutTripletArray, Triplet};

use std::future::Future;
use std::time::Instant;
use tonic::{Request, Response, Status};
use tracing::instrument;

/// Placeholder model: every text gets the same fixed answer.
///
/// Sentiment label `0`, triplet `("asp", "opi", 1)` and cluster `2`.
#[derive(Debug, Default, Clone)]
pub struct PlaceholderModel;

impl PlaceholderModel {
    pub fn into_service(self) -> SentimentAnalysisServer<Self> {
        SentimentAnalysisServer::new(self)
    }
}

/// Resolves once `signal` fires. If the signal handler cannot be installed
/// this never resolves and the server keeps serving.
pub async fn shutdown_on<F>(signal: F)
where
    F: Future<Output = std::io::Result<()>>,
{
    match signal.await {
        Ok(()) => tracing::info!("Received Ctrl-C, shutting down"),
        Err(e) => {
            tracing::error!("Unable to listen for Ctrl-C: {}", e);
            std::future::pending::<()>().await
        }
    }
}

fn record_batch(texts: &[String], start_time: Instant) {
    let span = tracing::Span::current();
    span.record("batch_size", texts.len());
    span.record("elapsed_time", start_time.elapsed().as_secs_f32());
    tracing::info!(?texts, "SUCCESS");
}

#[tonic::async_trait]
impl SentimentAnalysis for PlaceholderModel {
    #[instrument(skip_all, fields(elapsed_time, batch_size))]
    async fn senti_cls(
        &self,
        request: Request<InTextArray>,
    ) -> Result<Response<OutLabelArray>, Status> {
        let start_time = Instant::now();
        tracing::info!("Running sentiment classification");
        let texts = request.into_inner().texts;

        let labels = vec![0; texts.len()];

        record_batch(&texts, start_time);
        Ok(Response::new(OutLabelArray { labels }))
    }

    #[instrument(skip_all, fields(elapsed_time, batch_size))]
    async fn trip_extract(
        &self,
        request: Request<InTextArray>,
    ) -> Result<Response<OutTripletArray>, Status> {
        let start_time = Instant::now();
        tracing::info!("Running triplet extraction");
        let texts = request.into_inner().texts;

        let triplets = texts
            .iter()
            .map(|_| Triplet {
                aspect: "asp".to_string(),
                opinion: "opi".to_string(),
                label: 1,
            })
            .collect();

        record_batch(&texts, start_time);
        Ok(Response::new(OutTripletArray { triplets }))
    }

    #[instrument(skip_all, fields(elapsed_time, batch_size))]
    async fn cluster(
        &self,
        request: Request<InTextArray>,
    ) -> Result<Response<OutLabelArray>, Status> {
        let start_time = Instant::now();
        tracing::info!("Running clustering");
        let texts = request.into_inner().texts;

        let labels = vec![2; texts.len()];

        record_batch(&texts, start_time);
        Ok(Response::new(OutLabelArray { labels }))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io;
    use std::sync::{Arc, Mutex};

    #[derive(Clone, Default)]
    struct LogBuffer(Arc<Mutex<Vec<u8>>>);

    impl io::Write for LogBuffer {
        fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
            self.0.lock().unwrap().extend_from_slice(buf);
            Ok(buf.len())
        }

        fn flush(&mut self) -> io::Result<()> {
            Ok(())
        }
    }

    impl LogBuffer {
        fn contents(&self) -> String {
            String::from_utf8(self.0.lock().unwrap().clone()).unwrap()
        }
    }

    fn texts(n: usize) -> Request<InTextArray> {
        Request::new(InTextArray {
            texts: vec!["test1".to_string(); n],
        })
    }

    #[tokio::test]
    async fn one_label_per_text() {
        let reply = PlaceholderModel.senti_cls(texts(3)).await.unwrap();
        assert_eq!(reply.into_inner().labels, vec![0, 0, 0]);

        let reply = PlaceholderModel.cluster(texts(2)).await.unwrap();
        assert_eq!(reply.into_inner().labels, vec![2, 2]);
    }

    #[tokio::test]
    async fn one_triplet_per_text() {
        let reply = PlaceholderModel.trip_extract(texts(4)).await.unwrap();
        let triplets = reply.into_inner().triplets;
        assert_eq!(triplets.len(), 4);
        assert!(triplets
            .iter()
            .all(|t| t.aspect == "asp" && t.opinion == "opi" && t.label == 1));
    }

    #[tokio::test]
    async fn empty_batch_gets_empty_replies() {
        let reply = PlaceholderModel.trip_extract(texts(0)).await.unwrap();
        assert!(reply.into_inner().triplets.is_empty());
    }

    #[tokio::test]
    async fn handlers_log_batch_size_and_texts() {
        let logs = LogBuffer::default();
        let writer = logs.clone();
        let subscriber = tracing_subscriber::fmt()
            .with_max_level(tracing::Level::INFO)
            .with_ansi(false)
            .with_writer(move || writer.clone())
            .finish();
        let _guard = tracing::subscriber::set_default(subscriber);

        PlaceholderModel.senti_cls(texts(3)).await.unwrap();
        PlaceholderModel.cluster(texts(2)).await.unwrap();

        let output = logs.contents();
        assert!(output.contains("senti_cls{batch_size=3"), "{output}");
        assert!(output.contains("cluster{batch_size=2"), "{output}");
        assert!(output.contains("elapsed_time="), "{output}");
        assert!(output.contains("SUCCESS"), "{output}");
        assert!(output.contains(r#"texts=["test1", "test1", "test1"]"#), "{output}");
    }

    #[tokio::test]
    async fn shutdown_waits_for_signal() {
        shutdown_on(async { Ok(()) }).await;

        let failed = shutdown_on(async {
            Err(io::Error::new(io::ErrorKind::Other, "no signal handler"))
        });
        let outcome = tokio::time::timeout(std::time::Duration::from_millis(50), failed).await;
        assert!(outcome.is_err());
    }
}
