//! Lossless raster-to-SVG container wrap.
//!
//! The raster bytes are embedded as a base64 data URI inside a vector
//! document sized to the decoded pixel dimensions. No tracing happens;
//! the output renders identically to the input.

use base64::Engine as _;
use base64::engine::general_purpose::STANDARD;
use image::GenericImageView;

use crate::error::FaroError;

/// Wrap raster image bytes in an SVG document of the same pixel size.
pub fn wrap_raster(bytes: &[u8]) -> Result<String, FaroError> {
    let decoded = image::load_from_memory(bytes)
        .map_err(|e| FaroError::Conversion(format!("could not decode image: {e}")))?;
    let (width, height) = decoded.dimensions();
    let data = STANDARD.encode(bytes);

    Ok(format!(
        concat!(
            r#"<svg xmlns="http://www.w3.org/2000/svg" "#,
            r#"xmlns:xlink="http://www.w3.org/1999/xlink" "#,
            r#"width="{w}" height="{h}" viewBox="0 0 {w} {h}">"#,
            r#"<image width="{w}" height="{h}" xlink:href="data:image/png;base64,{data}"/>"#,
            "</svg>"
        ),
        w = width,
        h = height,
        data = data,
    ))
}
