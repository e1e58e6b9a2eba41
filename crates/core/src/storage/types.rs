/// Image bytes held by a [`BlobStore`](super::BlobStore).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StoredBlob {
    pub content_type: String,
    pub data: Vec<u8>,
}
