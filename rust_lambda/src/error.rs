use aws_sdk_s3::error::SdkError;
use aws_sdk_s3::operation::get_object::GetObjectError;
use aws_sdk_s3::operation::put_object::PutObjectError;
use aws_sdk_s3::primitives::ByteStreamError;
use std::str::Utf8Error;
use thiserror::Error;

/// Every way a single resize invocation can stop short of publishing.
#[derive(Debug, Error)]
pub(crate) enum ResizeError {
    #[error("no {0} found in S3 event record")]
    MissingField(&'static str),

    #[error("object key {key:?} does not decode to UTF-8")]
    KeyEncoding {
        key: String,
        #[source]
        source: Utf8Error,
    },

    #[error("failed to fetch {bucket}/{key}")]
    Fetch {
        bucket: String,
        key: String,
        #[source]
        source: SdkError<GetObjectError>,
    },

    #[error("failed to read body of {bucket}/{key}")]
    ReadBody {
        bucket: String,
        key: String,
        #[source]
        source: ByteStreamError,
    },

    #[error("failed to decode image")]
    Decode(#[source] image::ImageError),

    #[error("failed to encode resized image")]
    Encode(#[source] image::ImageError),

    #[error("failed to upload {bucket}/{key}")]
    Publish {
        bucket: String,
        key: String,
        #[source]
        source: SdkError<PutObjectError>,
    },
}
