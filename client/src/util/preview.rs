//! Preview URLs for staged images.
//!
//! In the browser a staged `File` is previewed through an object URL, which
//! must be revoked when the slot lets go of it. In-memory payloads are
//! previewed as `data:` URLs, which need no release.

#[cfg(test)]
#[path = "preview_test.rs"]
mod preview_test;

use base64::Engine as _;

use crate::state::upload::{ImagePayload, MediaType, PreviewProvider, StagedImage};

/// Default preview provider for the analyze page.
#[derive(Clone, Copy, Debug, Default)]
pub struct ObjectUrlPreviews;

impl PreviewProvider for ObjectUrlPreviews {
    fn acquire(&self, image: &StagedImage) -> Option<String> {
        match &image.payload {
            ImagePayload::Bytes(bytes) => Some(data_url(image.media_type, bytes)),
            #[cfg(feature = "hydrate")]
            ImagePayload::File(file) => match web_sys::Url::create_object_url_with_blob(file) {
                Ok(url) => Some(url),
                Err(e) => {
                    log::warn!("preview: createObjectURL failed for {}: {e:?}", image.name);
                    None
                }
            },
        }
    }

    fn release(&self, url: &str) {
        #[cfg(feature = "hydrate")]
        if url.starts_with("blob:") {
            if let Err(e) = web_sys::Url::revoke_object_url(url) {
                log::warn!("preview: revokeObjectURL failed: {e:?}");
            }
        }
        #[cfg(not(feature = "hydrate"))]
        let _ = url;
    }
}

/// `data:` URL for an in-memory image.
pub fn data_url(media_type: MediaType, bytes: &[u8]) -> String {
    format!("data:{};base64,{}", media_type.mime(), base64::engine::general_purpose::STANDARD.encode(bytes))
}
