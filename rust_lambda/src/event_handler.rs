use crate::config::TARGET_WIDTH;
use crate::error::ResizeError;
use crate::image_type::ImageType;
use crate::resize::resize_square;
use crate::storage::{fetch_object, publish_object, ObjectLocation};
use aws_lambda_events::event::s3::S3Event;
use aws_sdk_s3::error::DisplayErrorContext;
use aws_sdk_s3::Client as S3Client;
use lambda_runtime::{tracing, Error, LambdaEvent};
use percent_encoding::percent_decode_str;

/// How a record that did not fail was handled.
#[derive(Debug, PartialEq, Eq)]
pub(crate) enum Outcome {
    Resized {
        source: ObjectLocation,
        destination: ObjectLocation,
    },
    /// The key does not name a supported image type.
    Skipped { key: String },
}

/// Decodes an S3 event key: `+` is a space, everything else is percent-encoded.
fn decode_key(raw: &str) -> Result<String, ResizeError> {
    let spaced = raw.replace('+', " ");
    percent_decode_str(&spaced)
        .decode_utf8()
        .map(|key| key.into_owned())
        .map_err(|source| ResizeError::KeyEncoding {
            key: raw.to_string(),
            source,
        })
}

fn get_source_location(event: &S3Event) -> Result<ObjectLocation, ResizeError> {
    let record = event
        .records
        .first()
        .ok_or(ResizeError::MissingField("record"))?;
    let bucket = record
        .s3
        .bucket
        .name
        .as_ref()
        .ok_or(ResizeError::MissingField("bucket name"))?;
    let raw_key = record
        .s3
        .object
        .key
        .as_deref()
        .ok_or(ResizeError::MissingField("object key"))?;
    Ok(ObjectLocation::new(bucket.clone(), decode_key(raw_key)?))
}

async fn resize_s3_object(
    s3_client: &S3Client,
    event: &S3Event,
) -> Result<Outcome, ResizeError> {
    let source = get_source_location(event)?;
    let Some(image_type) = ImageType::from_key(&source.key) else {
        return Ok(Outcome::Skipped { key: source.key });
    };

    let original = fetch_object(s3_client, &source).await?;
    let resized = resize_square(&original, TARGET_WIDTH, image_type)?;

    let destination = source.resized();
    publish_object(s3_client, &destination, resized, &image_type.content_type()).await?;
    Ok(Outcome::Resized {
        source,
        destination,
    })
}

pub(crate) async fn function_handler(
    event: LambdaEvent<S3Event>,
    s3_client: &S3Client,
) -> Result<(), Error> {
    let payload = event.payload;
    if payload.records.is_empty() {
        tracing::warn!("No records found in S3 event");
        return Ok(());
    }
    match resize_s3_object(s3_client, &payload).await {
        Ok(Outcome::Resized {
            source,
            destination,
        }) => {
            tracing::info!("Resized {} and uploaded it to {}", source, destination);
        }
        Ok(Outcome::Skipped { key }) => {
            tracing::info!("Could not determine a supported image type for {}", key);
        }
        Err(err) => {
            tracing::error!(error = %DisplayErrorContext(&err), "Image resize aborted");
        }
    }
    Ok(())
}
