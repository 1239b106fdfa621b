//! Session WASM bindings.
//!
//! [`JsCaptionSession`] keeps the image and caption state in WASM so the page
//! only forwards events (file dropped, text typed, apply clicked, export
//! clicked) and paints what `render()` returns.
//!
//! # Example
//!
//! ```typescript
//! const session = new JsCaptionSession();
//!
//! dropZone.ondrop = async (e) => {
//!   const file = e.dataTransfer.files[0];
//!   const ticket = session.begin_load(file.type);
//!   if (!ticket) return;
//!   const bytes = new Uint8Array(await file.arrayBuffer());
//!   if (session.complete_load(ticket, bytes)) repaint();
//! };
//! ```

use crate::types::{bundled_font, export_settings_from_js, style_from_js, JsExportedFile, JsRaster};
use captionkit_core::session::{CaptionSession, LoadTicket, StageKind};
use wasm_bindgen::prelude::*;

/// Freshness token returned by [`JsCaptionSession::begin_load`].
#[wasm_bindgen]
#[derive(Clone, Copy)]
pub struct JsLoadTicket {
    inner: LoadTicket,
}

#[wasm_bindgen]
impl JsLoadTicket {
    #[wasm_bindgen(getter)]
    pub fn generation(&self) -> f64 {
        self.inner.generation() as f64
    }
}

/// The caption workflow for one page.
#[wasm_bindgen]
pub struct JsCaptionSession {
    inner: CaptionSession,
}

#[wasm_bindgen]
impl JsCaptionSession {
    /// Create an idle session with the bundled font and default settings.
    #[wasm_bindgen(constructor)]
    pub fn new() -> Result<JsCaptionSession, JsValue> {
        Ok(Self {
            inner: CaptionSession::new(bundled_font()?),
        })
    }

    /// Override caption style (partial `CaptionStyle` object, or undefined
    /// for defaults).
    pub fn set_style(&mut self, style: JsValue) -> Result<(), JsValue> {
        self.inner.set_style(style_from_js(style)?);
        Ok(())
    }

    /// Override export settings (partial `ExportSettings` object).
    pub fn set_export_settings(&mut self, settings: JsValue) -> Result<(), JsValue> {
        self.inner.set_export_settings(export_settings_from_js(settings)?);
        Ok(())
    }

    /// Start a load. Returns `undefined` for non-image media types.
    pub fn begin_load(&mut self, media_type: &str) -> Option<JsLoadTicket> {
        self.inner
            .begin_load(media_type)
            .map(|inner| JsLoadTicket { inner })
    }

    /// Decode and install the image for `ticket`.
    ///
    /// Returns false if a newer load has started since.
    pub fn complete_load(&mut self, ticket: &JsLoadTicket, bytes: &[u8]) -> Result<bool, JsValue> {
        self.inner
            .complete_load(ticket.inner, bytes)
            .map_err(|e| JsValue::from_str(&e.to_string()))
    }

    /// Install an already decoded image for `ticket`.
    pub fn accept_image(&mut self, ticket: &JsLoadTicket, image: &JsRaster) -> bool {
        self.inner.accept_image(ticket.inner, image.to_raster())
    }

    /// Returns true if the text changed (which un-applies the caption).
    pub fn set_caption(&mut self, text: &str) -> bool {
        self.inner.set_caption(text)
    }

    #[wasm_bindgen(getter)]
    pub fn caption(&self) -> String {
        self.inner.caption().to_string()
    }

    /// Returns false when there is no image yet.
    pub fn apply_caption(&mut self) -> bool {
        self.inner.apply_caption()
    }

    #[wasm_bindgen(getter)]
    pub fn caption_applied(&self) -> bool {
        self.inner.is_caption_applied()
    }

    /// `"idle"`, `"loaded"` or `"captioned"`
    #[wasm_bindgen(getter)]
    pub fn stage(&self) -> String {
        stage_name(self.inner.stage()).to_string()
    }

    /// The composite for the current state, or `undefined` when idle.
    pub fn render(&mut self) -> Option<JsRaster> {
        self.inner.render().map(JsRaster::from_raster)
    }

    /// Render and encode for download, or `undefined` when idle.
    pub fn export(&mut self) -> Result<Option<JsExportedFile>, JsValue> {
        match self.inner.export() {
            None => Ok(None),
            Some(Ok(file)) => Ok(Some(JsExportedFile::from_exported(file))),
            Some(Err(e)) => Err(JsValue::from_str(&e.to_string())),
        }
    }
}

fn stage_name(stage: StageKind) -> &'static str {
    match stage {
        StageKind::Idle => "idle",
        StageKind::Loaded => "loaded",
        StageKind::Captioned => "captioned",
    }
}
