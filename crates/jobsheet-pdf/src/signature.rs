//! Signature image embedding.
//!
//! Signatures arrive as `data:image/png;base64,...` URLs or as links to a
//! PNG. Embedding is best effort: every failure is logged and the document
//! is returned unsigned.

use base64::Engine;
use base64::alphabet;
use base64::engine::{DecodePaddingMode, GeneralPurpose, GeneralPurposeConfig};
use image::ImageFormat;
use jobsheet_core::models::form_data::FormData;
use tracing::{debug, warn};

use crate::document::{FillableDocument, RasterImage};
use crate::error::RenderError;

/// Standard alphabet with optional padding.
const DATA_URL: GeneralPurpose = GeneralPurpose::new(
    &alphabet::STANDARD,
    GeneralPurposeConfig::new().with_decode_padding_mode(DecodePaddingMode::Indifferent),
);

/// How a signature image is sized before drawing.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Scaling {
    /// Fit within `max_width` × `max_height`, never above `cap`.
    Bounded {
        max_width: f32,
        max_height: f32,
        cap: f32,
    },
    /// Fixed scale factor.
    Flat(f32),
}

impl Scaling {
    pub const BOUNDED: Scaling = Scaling::Bounded {
        max_width: 150.0,
        max_height: 60.0,
        cap: 0.5,
    };

    /// Drawn size in points of a `width` × `height` pixel image.
    pub fn apply(self, width: u32, height: u32) -> (f32, f32) {
        let (w, h) = (width as f32, height as f32);
        let scale = match self {
            Scaling::Bounded {
                max_width,
                max_height,
                cap,
            } => (max_width / w).min(max_height / h).min(cap),
            Scaling::Flat(scale) => scale,
        };
        (w * scale, h * scale)
    }
}

/// Where a template takes its signature from and where it is drawn.
#[derive(Debug, Clone, Copy)]
pub struct SignatureSpec {
    /// Data keys checked in order; the first non-empty value wins.
    pub keys: &'static [&'static str],
    pub x: f32,
    pub y: f32,
    pub scaling: Scaling,
}

impl SignatureSpec {
    pub fn payload(&self, data: &FormData) -> Option<String> {
        self.keys.iter().find_map(|key| data.text(key))
    }
}

/// Transport for signatures given as URLs.
pub trait SignatureFetcher: Send + Sync {
    fn fetch(&self, url: &str) -> Result<Vec<u8>, RenderError>;
}

/// Blocking HTTP fetcher.
#[derive(Debug, Clone, Copy, Default)]
pub struct HttpFetcher;

impl SignatureFetcher for HttpFetcher {
    fn fetch(&self, url: &str) -> Result<Vec<u8>, RenderError> {
        let mut response = ureq::get(url)
            .call()
            .map_err(|e| RenderError::SignatureProcessing(format!("request failed: {e}")))?;
        response
            .body_mut()
            .read_to_vec()
            .map_err(|e| RenderError::SignatureProcessing(format!("read failed: {e}")))
    }
}

/// Raw image bytes of a signature payload.
pub fn signature_bytes(
    payload: &str,
    fetcher: &dyn SignatureFetcher,
) -> Result<Vec<u8>, RenderError> {
    if payload.starts_with("data:image/") {
        let (_, encoded) = payload.split_once(',').ok_or_else(|| {
            RenderError::SignatureProcessing("data URL has no payload".to_string())
        })?;
        return DATA_URL
            .decode(encoded.trim())
            .map_err(|e| RenderError::SignatureProcessing(format!("base64 decode failed: {e}")));
    }
    if payload.starts_with("http://") || payload.starts_with("https://") {
        return fetcher.fetch(payload);
    }
    Err(RenderError::SignatureProcessing(
        "signature is neither a data URL nor an HTTP URL".to_string(),
    ))
}

/// Decode PNG bytes into RGB samples and an alpha plane.
pub fn decode_png(bytes: &[u8]) -> Result<RasterImage, RenderError> {
    let img = image::load_from_memory_with_format(bytes, ImageFormat::Png)
        .map_err(|e| RenderError::SignatureProcessing(format!("not a PNG image: {e}")))?
        .to_rgba8();
    let (width, height) = img.dimensions();
    if width == 0 || height == 0 {
        return Err(RenderError::SignatureProcessing("empty image".to_string()));
    }
    let mut rgb = Vec::with_capacity((width * height * 3) as usize);
    let mut alpha = Vec::with_capacity((width * height) as usize);
    for pixel in img.pixels() {
        rgb.extend_from_slice(&pixel.0[..3]);
        alpha.push(pixel.0[3]);
    }
    Ok(RasterImage {
        width,
        height,
        rgb,
        alpha,
    })
}

/// Draw the template's signature on page 1. Returns whether a signature
/// was embedded.
pub fn embed_signature(
    document: &mut FillableDocument,
    spec: &SignatureSpec,
    data: &FormData,
    fetcher: &dyn SignatureFetcher,
) -> bool {
    let Some(payload) = spec.payload(data) else {
        debug!("no signature in form data");
        return false;
    };
    let result = signature_bytes(&payload, fetcher)
        .and_then(|bytes| decode_png(&bytes))
        .and_then(|image| {
            let (width, height) = spec.scaling.apply(image.width, image.height);
            document.draw_image(1, &image, spec.x, spec.y, width, height)
        });
    match result {
        Ok(()) => {
            debug!(x = spec.x, y = spec.y, "embedded signature");
            true
        }
        Err(e) => {
            warn!(error = %e, "could not embed signature, continuing unsigned");
            false
        }
    }
}
