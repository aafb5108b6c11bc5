//! Image staging for the analysis workflow.
//!
//! SYSTEM CONTEXT
//! ==============
//! The analyze page owns one `UploadStagingArea` holding the reference and the
//! current image. Each filled slot owns a `PreviewRef`: the displayable URL is
//! acquired when the slot is filled and released by `Drop`, so replacing a
//! file, resetting the workflow, or tearing down the page all release it
//! exactly once.
//!
//! The staging area does not touch the analysis state itself; the workflow in
//! `state::analysis` resets to `Idle` whenever a slot mutation is accepted.

#[cfg(test)]
#[path = "upload_test.rs"]
mod upload_test;

use std::sync::Arc;

/// Which of the two inputs a file is staged into.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum SlotId {
    /// Reference allotment / base map.
    Reference,
    /// Current satellite or drone image.
    Current,
}

impl SlotId {
    /// Multipart field name expected by `POST /api/analyze`.
    pub fn field_name(self) -> &'static str {
        match self {
            Self::Reference => "reference",
            Self::Current => "current",
        }
    }
}

/// Accepted image media types.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum MediaType {
    Jpeg,
    Png,
}

impl MediaType {
    /// Map a MIME string to an accepted media type. `image/jpg` is a common
    /// browser alias for JPEG.
    pub fn from_mime(mime: &str) -> Option<Self> {
        match mime.trim().to_ascii_lowercase().as_str() {
            "image/jpeg" | "image/jpg" => Some(Self::Jpeg),
            "image/png" => Some(Self::Png),
            _ => None,
        }
    }

    pub fn mime(self) -> &'static str {
        match self {
            Self::Jpeg => "image/jpeg",
            Self::Png => "image/png",
        }
    }
}

/// `accept` attribute for file inputs.
pub const ACCEPTED_MIME_TYPES: &str = "image/jpeg,image/png";

/// Raw file contents as handed over by the environment.
#[derive(Clone, Debug, PartialEq)]
pub enum ImagePayload {
    /// In-memory bytes (tests, native callers).
    Bytes(Arc<[u8]>),
    /// Browser `File` handle; bytes are read by the browser at upload time.
    #[cfg(feature = "hydrate")]
    File(web_sys::File),
}

/// A file the user picked or dropped, before validation.
#[derive(Clone, Debug, PartialEq)]
pub struct SelectedFile {
    pub name: String,
    pub mime: String,
    pub size_bytes: u64,
    pub payload: ImagePayload,
}

impl SelectedFile {
    pub fn from_bytes(name: &str, mime: &str, bytes: &[u8]) -> Self {
        Self {
            name: name.to_owned(),
            mime: mime.to_owned(),
            size_bytes: bytes.len() as u64,
            payload: ImagePayload::Bytes(Arc::from(bytes)),
        }
    }

    #[cfg(feature = "hydrate")]
    pub fn from_web_file(file: web_sys::File) -> Self {
        #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
        let size_bytes = file.size().max(0.0) as u64;
        Self { name: file.name(), mime: file.type_(), size_bytes, payload: ImagePayload::File(file) }
    }
}

/// A validated image ready for submission.
#[derive(Clone, Debug, PartialEq)]
pub struct StagedImage {
    pub name: String,
    pub media_type: MediaType,
    pub size_bytes: u64,
    pub payload: ImagePayload,
}

impl StagedImage {
    /// Validate a selected file. Returns `None` for unsupported media types.
    pub fn accept(file: SelectedFile) -> Option<Self> {
        let media_type = MediaType::from_mime(&file.mime)?;
        Some(Self { name: file.name, media_type, size_bytes: file.size_bytes, payload: file.payload })
    }
}

// =============================================================================
// PREVIEW OWNERSHIP
// =============================================================================

/// Creates and revokes displayable preview URLs for staged images.
pub trait PreviewProvider: Clone {
    /// Acquire a preview URL. `None` when the environment cannot produce one.
    fn acquire(&self, image: &StagedImage) -> Option<String>;
    /// Release a URL previously returned by `acquire`.
    fn release(&self, url: &str);
}

/// Owned preview URL, released when dropped.
#[derive(Debug)]
pub struct PreviewRef<P: PreviewProvider> {
    url: String,
    provider: P,
}

impl<P: PreviewProvider> PreviewRef<P> {
    fn acquire(provider: &P, image: &StagedImage) -> Option<Self> {
        let url = provider.acquire(image)?;
        Some(Self { url, provider: provider.clone() })
    }

    pub fn url(&self) -> &str {
        &self.url
    }
}

impl<P: PreviewProvider> Drop for PreviewRef<P> {
    fn drop(&mut self) {
        self.provider.release(&self.url);
    }
}

/// One filled input: the image plus its owned preview.
#[derive(Debug)]
pub struct ImageSlot<P: PreviewProvider> {
    image: StagedImage,
    preview: Option<PreviewRef<P>>,
}

impl<P: PreviewProvider> ImageSlot<P> {
    pub fn image(&self) -> &StagedImage {
        &self.image
    }

    pub fn preview_url(&self) -> Option<&str> {
        self.preview.as_ref().map(PreviewRef::url)
    }
}

// =============================================================================
// STAGING AREA
// =============================================================================

/// Immutable pair of images for one submission.
#[derive(Clone, Debug, PartialEq)]
pub struct AnalysisRequest {
    pub reference: StagedImage,
    pub current: StagedImage,
}

/// Owns both image slots and their previews.
#[derive(Debug)]
pub struct UploadStagingArea<P: PreviewProvider> {
    provider: P,
    reference: Option<ImageSlot<P>>,
    current: Option<ImageSlot<P>>,
}

impl<P: PreviewProvider> UploadStagingArea<P> {
    pub fn new(provider: P) -> Self {
        Self { provider, reference: None, current: None }
    }

    /// Stage `file` into `slot`.
    ///
    /// Returns `false` without touching the slot when the media type is not
    /// JPEG or PNG. On success the previous preview is released before the new
    /// one is acquired.
    pub fn set_slot(&mut self, slot: SlotId, file: SelectedFile) -> bool {
        let Some(image) = StagedImage::accept(file) else {
            return false;
        };
        let entry = self.slot_mut(slot);
        drop(entry.take());
        let preview = PreviewRef::acquire(&self.provider, &image);
        *self.slot_mut(slot) = Some(ImageSlot { image, preview });
        true
    }

    /// Stage a picker/drop selection. Exactly one file is accepted per slot;
    /// empty or multi-file selections are rejected like an invalid type.
    pub fn set_slot_from_selection(&mut self, slot: SlotId, mut files: Vec<SelectedFile>) -> bool {
        if files.len() != 1 {
            return false;
        }
        match files.pop() {
            Some(file) => self.set_slot(slot, file),
            None => false,
        }
    }

    /// Clear both slots, releasing their previews.
    pub fn reset(&mut self) {
        self.reference = None;
        self.current = None;
    }

    pub fn slot(&self, slot: SlotId) -> Option<&ImageSlot<P>> {
        match slot {
            SlotId::Reference => self.reference.as_ref(),
            SlotId::Current => self.current.as_ref(),
        }
    }

    fn slot_mut(&mut self, slot: SlotId) -> &mut Option<ImageSlot<P>> {
        match slot {
            SlotId::Reference => &mut self.reference,
            SlotId::Current => &mut self.current,
        }
    }

    /// True iff both slots hold an accepted image.
    pub fn can_submit(&self) -> bool {
        self.reference.is_some() && self.current.is_some()
    }

    /// Snapshot both images into a request. `None` unless `can_submit`.
    pub fn request(&self) -> Option<AnalysisRequest> {
        let reference = self.reference.as_ref()?.image.clone();
        let current = self.current.as_ref()?.image.clone();
        Some(AnalysisRequest { reference, current })
    }
}
