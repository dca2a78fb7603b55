mod bucket_name;
mod continuation_token;
mod object_key;

pub use bucket_name::{BucketName, MAX_BUCKET_NAME_LEN};
pub use continuation_token::ContinuationToken;
pub use object_key::{MAX_OBJECT_KEY_LEN, ObjectKey};
