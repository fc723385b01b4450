#[cfg(feature = "s3-backend")]
pub mod s3;

#[cfg(feature = "s3-backend")]
pub use s3::S3Backend;
