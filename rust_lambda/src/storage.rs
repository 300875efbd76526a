use crate::config::RESIZED_PREFIX;
use crate::error::ResizeError;
use aws_sdk_s3::primitives::{ByteStream, ByteStreamError};
use aws_sdk_s3::Client as S3Client;
use bytes::{Bytes, BytesMut};
use futures::{stream, TryStream, TryStreamExt};
use lambda_runtime::tracing;
use std::fmt;

/// A bucket and key pair, displayed as `bucket/key`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct ObjectLocation {
    pub(crate) bucket: String,
    pub(crate) key: String,
}

impl ObjectLocation {
    pub(crate) fn new(bucket: impl Into<String>, key: impl Into<String>) -> Self {
        Self {
            bucket: bucket.into(),
            key: key.into(),
        }
    }

    /// Where the resized copy of this object is written. Same bucket, prefixed key.
    pub(crate) fn resized(&self) -> Self {
        Self::new(self.bucket.clone(), format!("{RESIZED_PREFIX}{}", self.key))
    }
}

impl fmt::Display for ObjectLocation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}", self.bucket, self.key)
    }
}

/// Concatenates every chunk of `chunks` in arrival order.
///
/// Chunks may be anything convertible to [`Bytes`], so text chunks are taken
/// as their UTF-8 bytes. The first error ends the drain.
pub(crate) async fn drain<S>(chunks: S) -> Result<Bytes, S::Error>
where
    S: TryStream,
    S::Ok: Into<Bytes>,
{
    let buffer = chunks
        .try_fold(BytesMut::new(), |mut buffer, chunk| async move {
            let chunk: Bytes = chunk.into();
            buffer.extend_from_slice(&chunk);
            Ok(buffer)
        })
        .await?;
    Ok(buffer.freeze())
}

fn byte_chunks(body: ByteStream) -> impl TryStream<Ok = Bytes, Error = ByteStreamError> {
    stream::try_unfold(body, |mut body| async move {
        let chunk = body.try_next().await?;
        Ok::<_, ByteStreamError>(chunk.map(|chunk| (chunk, body)))
    })
}

/// Downloads an object and returns its full body.
pub(crate) async fn fetch_object(
    s3_client: &S3Client,
    location: &ObjectLocation,
) -> Result<Bytes, ResizeError> {
    let output = s3_client
        .get_object()
        .bucket(&location.bucket)
        .key(&location.key)
        .send()
        .await
        .map_err(|source| ResizeError::Fetch {
            bucket: location.bucket.clone(),
            key: location.key.clone(),
            source,
        })?;
    let body = drain(byte_chunks(output.body))
        .await
        .map_err(|source| ResizeError::ReadBody {
            bucket: location.bucket.clone(),
            key: location.key.clone(),
            source,
        })?;
    tracing::debug!(location = %location, size = body.len(), "Fetched object");
    Ok(body)
}

/// Writes `body` to `location`, overwriting whatever is there.
pub(crate) async fn publish_object(
    s3_client: &S3Client,
    location: &ObjectLocation,
    body: Bytes,
    content_type: &str,
) -> Result<(), ResizeError> {
    s3_client
        .put_object()
        .bucket(&location.bucket)
        .key(&location.key)
        .body(ByteStream::from(body))
        .content_type(content_type)
        .send()
        .await
        .map_err(|source| ResizeError::Publish {
            bucket: location.bucket.clone(),
            key: location.key.clone(),
            source,
        })?;
    Ok(())
}
