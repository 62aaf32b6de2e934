use crate::{ClientError, RemoteSentimentService, TextBatch};

use std::io::Write;
use tracing::instrument;

/// Runs classify, triplet extraction and clustering in that order, writing
/// one line per reply to `out`.
///
/// Each line is flushed as soon as its call returns. The first failing call
/// ends the run; later calls are never issued.
#[instrument(skip_all, fields(batch_size = batch.len()))]
pub async fn run<S, W>(service: &mut S, batch: &TextBatch, out: &mut W) -> Result<(), ClientError>
where
    S: RemoteSentimentService + ?Sized,
    W: Write,
{
    let labels = service.classify(batch).await?;
    writeln!(out, "{labels}")?;
    out.flush()?;

    let triplets = service.extract_triplets(batch).await?;
    writeln!(out, "{}", triplets.first_aspect()?)?;
    out.flush()?;

    let clusters = service.cluster(batch).await?;
    writeln!(out, "{clusters}")?;
    out.flush()?;

    tracing::info!("SUCCESS");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{ClassificationReply, ClusterReply, Triplet, TripletReply};

    #[derive(Debug, Clone, Copy, PartialEq, Eq)]
    enum Call {
        Classify,
        ExtractTriplets,
        Cluster,
    }

    /// Answers from fixed replies and records every call it receives.
    #[derive(Default)]
    struct ScriptedService {
        labels: Vec<String>,
        triplets: Vec<Triplet>,
        clusters: Vec<i32>,
        fail_on: Option<Call>,
        calls: Vec<Call>,
    }

    impl ScriptedService {
        fn echoing(batch: &TextBatch) -> Self {
            Self {
                labels: vec!["pos".to_string(); batch.len()],
                triplets: batch
                    .texts()
                    .iter()
                    .map(|text| Triplet {
                        aspect: text.clone(),
                        opinion: "fine".to_string(),
                        sentiment: 1,
                    })
                    .collect(),
                clusters: vec![7; batch.len()],
                ..Default::default()
            }
        }

        fn answer(&mut self, call: Call, method: &'static str) -> Result<(), ClientError> {
            self.calls.push(call);
            if self.fail_on == Some(call) {
                return Err(ClientError::RemoteCall {
                    method,
                    status: tonic::Status::unavailable("scripted failure"),
                });
            }
            Ok(())
        }
    }

    #[tonic::async_trait]
    impl RemoteSentimentService for ScriptedService {
        async fn classify(&mut self, _: &TextBatch) -> Result<ClassificationReply, ClientError> {
            self.answer(Call::Classify, "SentiCLS")?;
            Ok(ClassificationReply {
                labels: self.labels.clone(),
            })
        }

        async fn extract_triplets(&mut self, _: &TextBatch) -> Result<TripletReply, ClientError> {
            self.answer(Call::ExtractTriplets, "TripExtract")?;
            Ok(TripletReply {
                triplets: self.triplets.clone(),
            })
        }

        async fn cluster(&mut self, _: &TextBatch) -> Result<ClusterReply, ClientError> {
            self.answer(Call::Cluster, "Cluster")?;
            Ok(ClusterReply {
                labels: self.clusters.clone(),
            })
        }
    }

    #[tokio::test]
    async fn prints_one_line_per_call() {
        let batch = TextBatch::demo();
        let mut service = ScriptedService::echoing(&batch);
        let mut out = Vec::new();

        run(&mut service, &batch, &mut out).await.unwrap();

        assert_eq!(
            String::from_utf8(out).unwrap(),
            "[pos pos pos]\ntest1\n[7 7 7]\n"
        );
        assert_eq!(
            service.calls,
            vec![Call::Classify, Call::ExtractTriplets, Call::Cluster]
        );
    }

    #[tokio::test]
    async fn classify_reply_matches_batch_length() {
        let batch: TextBatch = ["a", "b", "c", "d"].into_iter().collect();
        let mut service = ScriptedService::echoing(&batch);

        let reply = service.classify(&batch).await.unwrap();
        assert_eq!(reply.labels.len(), batch.len());
    }

    #[tokio::test]
    async fn failed_extraction_skips_cluster() {
        let batch = TextBatch::demo();
        let mut service = ScriptedService {
            fail_on: Some(Call::ExtractTriplets),
            ..ScriptedService::echoing(&batch)
        };
        let mut out = Vec::new();

        let err = run(&mut service, &batch, &mut out).await.unwrap_err();

        assert!(matches!(
            err,
            ClientError::RemoteCall {
                method: "TripExtract",
                ..
            }
        ));
        assert_eq!(service.calls, vec![Call::Classify, Call::ExtractTriplets]);
        assert_eq!(String::from_utf8(out).unwrap(), "[pos pos pos]\n");
    }

    #[tokio::test]
    async fn failed_classify_prints_nothing() {
        let batch = TextBatch::demo();
        let mut service = ScriptedService {
            fail_on: Some(Call::Classify),
            ..ScriptedService::echoing(&batch)
        };
        let mut out = Vec::new();

        assert!(run(&mut service, &batch, &mut out).await.is_err());
        assert_eq!(service.calls, vec![Call::Classify]);
        assert!(out.is_empty());
    }

    #[tokio::test]
    async fn empty_triplets_stop_the_run() {
        let batch = TextBatch::demo();
        let mut service = ScriptedService {
            triplets: Vec::new(),
            ..ScriptedService::echoing(&batch)
        };
        let mut out = Vec::new();

        let err = run(&mut service, &batch, &mut out).await.unwrap_err();

        assert!(matches!(err, ClientError::EmptyReply { .. }));
        assert_eq!(service.calls, vec![Call::Classify, Call::ExtractTriplets]);
    }

    #[tokio::test]
    async fn repeated_runs_are_identical() {
        let batch = TextBatch::demo();
        let mut service = ScriptedService::echoing(&batch);

        let mut first = Vec::new();
        run(&mut service, &batch, &mut first).await.unwrap();
        let mut second = Vec::new();
        run(&mut service, &batch, &mut second).await.unwrap();

        assert_eq!(first, second);
        assert_eq!(service.calls.len(), 6);
    }
}
