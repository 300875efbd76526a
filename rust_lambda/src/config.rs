use aws_config::meta::region::RegionProviderChain;
use aws_config::{BehaviorVersion, SdkConfig};

/// Width, and height, of every resized image in pixels.
pub(crate) const TARGET_WIDTH: u32 = 200;

/// Prepended to the source key to form the destination key.
pub(crate) const RESIZED_PREFIX: &str = "resized/";

/// Used when neither the environment nor a profile names a region.
pub(crate) const FALLBACK_REGION: &str = "ap-northeast-2";

/// Loads the shared AWS configuration used to build the S3 client.
pub(crate) async fn load_aws_config() -> SdkConfig {
    let region = RegionProviderChain::default_provider().or_else(FALLBACK_REGION);
    aws_config::defaults(BehaviorVersion::v2025_01_17())
        .region(region)
        .load()
        .await
}
