//! Caption session state.
//!
//! A session moves through three stages:
//!
//! ```text
//! Idle --load--> Loaded --apply--> Captioned
//!                  ^                   |
//!                  +--- image or caption text changes
//! ```
//!
//! The caption text lives alongside the stage, so it can be typed before an
//! image arrives, but "applied" only exists together with an image.
//!
//! Loading is split into [`CaptionSession::begin_load`] and
//! [`CaptionSession::complete_load`] because the page reads and decodes files
//! asynchronously. Each `begin_load` issues a [`LoadTicket`] for a new
//! generation; completions carrying an older ticket are dropped, so a slow
//! decode can never overwrite a newer image.

use serde::{Deserialize, Serialize};

use crate::composite::{composite, CaptionOverlay};
use crate::decode::{decode_image, is_image_media_type, DecodeError, Raster};
use crate::encode::{encode_bounded, EncodeError, EncodedArtifact};
use crate::layout::CaptionLayout;
use crate::style::{CaptionStyle, ExportSettings};
use crate::surface::{CaptionFont, RasterSurface, Surface};

/// Freshness token for an in-flight load.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct LoadTicket(u64);

impl LoadTicket {
    pub fn generation(self) -> u64 {
        self.0
    }
}

/// Observable stage of a session.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum StageKind {
    /// No image yet
    Idle,
    /// Image present, caption not applied
    Loaded,
    /// Image present and caption applied
    Captioned,
}

#[derive(Debug, Clone)]
enum Stage {
    Idle,
    Loaded(Raster),
    Captioned(Raster),
}

impl Stage {
    fn image(&self) -> Option<&Raster> {
        match self {
            Stage::Idle => None,
            Stage::Loaded(image) | Stage::Captioned(image) => Some(image),
        }
    }
}

/// An exported file ready to offer for download.
#[derive(Debug, Clone, PartialEq)]
pub struct ExportedFile {
    pub file_name: String,
    pub artifact: EncodedArtifact,
}

/// The single-image captioning workflow.
#[derive(Debug)]
pub struct CaptionSession {
    caption: String,
    stage: Stage,
    generation: u64,
    style: CaptionStyle,
    export: ExportSettings,
    surface: RasterSurface,
}

impl CaptionSession {
    /// Create an idle session with default style and export settings.
    pub fn new(font: CaptionFont) -> Self {
        Self::with_settings(font, CaptionStyle::default(), ExportSettings::default())
    }

    pub fn with_settings(font: CaptionFont, style: CaptionStyle, export: ExportSettings) -> Self {
        Self {
            caption: String::new(),
            stage: Stage::Idle,
            generation: 0,
            style,
            export,
            surface: RasterSurface::new(font),
        }
    }

    pub fn caption(&self) -> &str {
        &self.caption
    }

    pub fn stage(&self) -> StageKind {
        match self.stage {
            Stage::Idle => StageKind::Idle,
            Stage::Loaded(_) => StageKind::Loaded,
            Stage::Captioned(_) => StageKind::Captioned,
        }
    }

    pub fn is_caption_applied(&self) -> bool {
        matches!(self.stage, Stage::Captioned(_))
    }

    /// The current source image, if any.
    pub fn image(&self) -> Option<&Raster> {
        self.stage.image()
    }

    pub fn style(&self) -> &CaptionStyle {
        &self.style
    }

    pub fn set_style(&mut self, style: CaptionStyle) {
        self.style = style;
    }

    pub fn export_settings(&self) -> &ExportSettings {
        &self.export
    }

    pub fn set_export_settings(&mut self, export: ExportSettings) {
        self.export = export;
    }

    /// Start loading a dropped file.
    ///
    /// Returns `None` (and changes nothing) when the declared media type is
    /// not an image type. Otherwise the returned ticket supersedes every
    /// earlier one.
    pub fn begin_load(&mut self, media_type: &str) -> Option<LoadTicket> {
        if !is_image_media_type(media_type) {
            log::debug!("ignoring drop of non-image type {media_type:?}");
            return None;
        }
        self.generation += 1;
        Some(LoadTicket(self.generation))
    }

    /// True if `ticket` belongs to the most recent load.
    pub fn is_current(&self, ticket: LoadTicket) -> bool {
        ticket.0 == self.generation
    }

    /// Finish a load by decoding `bytes`.
    ///
    /// Returns `Ok(false)` without decoding when the ticket is stale. On a
    /// decode error the session is left as it was.
    pub fn complete_load(&mut self, ticket: LoadTicket, bytes: &[u8]) -> Result<bool, DecodeError> {
        if !self.is_current(ticket) {
            log::debug!(
                "dropping stale load {} (current {})",
                ticket.0,
                self.generation
            );
            return Ok(false);
        }
        let image = decode_image(bytes)?;
        Ok(self.accept_image(ticket, image))
    }

    /// Finish a load with an already decoded raster.
    ///
    /// Returns `false` and discards `image` when the ticket is stale or the
    /// raster is empty.
    pub fn accept_image(&mut self, ticket: LoadTicket, image: Raster) -> bool {
        if !self.is_current(ticket) {
            log::debug!(
                "dropping stale image {} (current {})",
                ticket.0,
                self.generation
            );
            return false;
        }
        if image.is_empty() {
            log::debug!("dropping empty image for load {}", ticket.0);
            return false;
        }
        log::debug!(
            "loaded {}x{} image for load {}",
            image.width,
            image.height,
            ticket.0
        );
        self.stage = Stage::Loaded(image);
        true
    }

    /// Replace the caption text.
    ///
    /// Any change un-applies the caption. Returns whether the text changed.
    pub fn set_caption(&mut self, text: &str) -> bool {
        if self.caption == text {
            return false;
        }
        self.caption.clear();
        self.caption.push_str(text);

        let stage = std::mem::replace(&mut self.stage, Stage::Idle);
        self.stage = match stage {
            Stage::Captioned(image) => Stage::Loaded(image),
            other => other,
        };
        true
    }

    /// Confirm the caption for rendering.
    ///
    /// Returns `false` when there is no image to caption.
    pub fn apply_caption(&mut self) -> bool {
        let stage = std::mem::replace(&mut self.stage, Stage::Idle);
        let (stage, applied) = match stage {
            Stage::Idle => (Stage::Idle, false),
            Stage::Loaded(image) | Stage::Captioned(image) => (Stage::Captioned(image), true),
        };
        self.stage = stage;
        applied
    }

    /// Layout of the applied caption for the current image.
    pub fn caption_layout(&self) -> Option<CaptionLayout> {
        let Stage::Captioned(image) = &self.stage else {
            return None;
        };
        if self.caption.split_whitespace().next().is_none() {
            return None;
        }
        let font = self.surface.font();
        Some(CaptionLayout::new(
            &self.caption,
            image.width,
            image.height,
            &self.style,
            |text, size| font.measure(text, size),
        ))
    }

    /// Repaint the composite from the current state.
    ///
    /// Returns `None` when there is no image or the repaint was aborted.
    pub fn render(&mut self) -> Option<Raster> {
        let (image, overlay) = match &self.stage {
            Stage::Idle => return None,
            Stage::Loaded(image) => (image, None),
            Stage::Captioned(image) => (image, Some(CaptionOverlay::new(&self.caption))),
        };

        match composite(&mut self.surface, image, overlay, &self.style) {
            Ok(_) => {
                debug_assert_eq!(self.surface.dimensions(), (image.width, image.height));
                Some(self.surface.snapshot())
            }
            Err(e) => {
                log::debug!("render aborted: {e}");
                None
            }
        }
    }

    /// Render and encode the composite for download.
    ///
    /// Returns `None` when there is nothing to export.
    pub fn export(&mut self) -> Option<Result<ExportedFile, EncodeError>> {
        let max_bytes = self.export.max_bytes;
        let search = self.export.search;
        let file_name = self.export.file_name.clone();

        let raster = self.render()?;
        let result = encode_bounded(&raster, max_bytes, search).map(|artifact| {
            log::info!(
                "exported {file_name}: {} bytes at quality {:.2} after {} attempt(s)",
                artifact.len(),
                artifact.quality,
                artifact.attempts
            );
            ExportedFile {
                file_name,
                artifact,
            }
        });
        Some(result)
    }
}
