use crate::{pb::sa_protoc, ClientError};
use std::fmt;

/// Ordered texts sent to every remote method.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct TextBatch {
    texts: Vec<String>,
}

impl TextBatch {
    pub fn new(texts: Vec<String>) -> Self {
        Self { texts }
    }

    /// The fixed batch the demo client sends.
    pub fn demo() -> Self {
        Self::new(vec!["test1".to_string(); 3])
    }

    pub fn texts(&self) -> &[String] {
        &self.texts
    }

    pub fn len(&self) -> usize {
        self.texts.len()
    }

    pub fn is_empty(&self) -> bool {
        self.texts.is_empty()
    }

    pub(crate) fn to_grpc_request(&self) -> sa_protoc::InTextArray {
        sa_protoc::InTextArray {
            texts: self.texts.clone(),
        }
    }
}

impl<S: Into<String>> FromIterator<S> for TextBatch {
    fn from_iter<I: IntoIterator<Item = S>>(iter: I) -> Self {
        Self::new(iter.into_iter().map(Into::into).collect())
    }
}

impl From<Vec<String>> for TextBatch {
    fn from(texts: Vec<String>) -> Self {
        Self::new(texts)
    }
}

/// One sentiment label per input text, index-aligned with the batch.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct ClassificationReply {
    pub labels: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Triplet {
    pub aspect: String,
    pub opinion: String,
    pub sentiment: i32,
}

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct TripletReply {
    pub triplets: Vec<Triplet>,
}

impl TripletReply {
    /// Aspect of the first extracted triplet.
    ///
    /// An empty reply is reported as [`ClientError::EmptyReply`] instead of
    /// being indexed blindly.
    pub fn first_aspect(&self) -> Result<&str, ClientError> {
        self.triplets
            .first()
            .map(|triplet| triplet.aspect.as_str())
            .ok_or(ClientError::EmptyReply {
                method: "TripExtract",
            })
    }
}

/// One cluster id per input text, index-aligned with the batch.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct ClusterReply {
    pub labels: Vec<i32>,
}

fn fmt_labels<T: fmt::Display>(f: &mut fmt::Formatter<'_>, labels: &[T]) -> fmt::Result {
    f.write_str("[")?;
    for (i, label) in labels.iter().enumerate() {
        if i > 0 {
            f.write_str(" ")?;
        }
        write!(f, "{label}")?;
    }
    f.write_str("]")
}

impl fmt::Display for ClassificationReply {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt_labels(f, &self.labels)
    }
}

impl fmt::Display for ClusterReply {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt_labels(f, &self.labels)
    }
}

impl From<sa_protoc::OutLabelArray> for ClassificationReply {
    fn from(reply: sa_protoc::OutLabelArray) -> Self {
        Self {
            labels: reply.labels.iter().map(i32::to_string).collect(),
        }
    }
}

impl From<sa_protoc::OutTripletArray> for TripletReply {
    fn from(reply: sa_protoc::OutTripletArray) -> Self {
        let triplets = reply
            .triplets
            .into_iter()
            .map(|t| Triplet {
                aspect: t.aspect,
                opinion: t.opinion,
                sentiment: t.label,
            })
            .collect();
        Self { triplets }
    }
}

impl From<sa_protoc::OutLabelArray> for ClusterReply {
    fn from(reply: sa_protoc::OutLabelArray) -> Self {
        Self {
            labels: reply.labels,
        }
    }
}

/// The three unary methods of the remote sentiment analysis service.
///
/// [`crate::Client`] talks to the real service over gRPC; tests substitute
/// scripted implementations.
#[tonic::async_trait]
pub trait RemoteSentimentService: Send {
    async fn classify(&mut self, batch: &TextBatch) -> Result<ClassificationReply, ClientError>;

    async fn extract_triplets(&mut self, batch: &TextBatch) -> Result<TripletReply, ClientError>;

    async fn cluster(&mut self, batch: &TextBatch) -> Result<ClusterReply, ClientError>;
}
