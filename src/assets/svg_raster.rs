use crate::foundation::error::{ShowError, ShowResult};

/// Refuse rasters larger than this on either axis.
const MAX_DIM: u32 = 16_384;

/// Pixel size an SVG occupies at 1:1 scale.
pub fn natural_raster_size(tree: &usvg::Tree) -> ShowResult<(u32, u32)> {
    fn to_px(v: f32) -> ShowResult<u32> {
        if !v.is_finite() || v <= 0.0 {
            return Err(ShowError::asset("svg has invalid width/height"));
        }
        Ok((v.ceil() as u32).max(1))
    }

    let size = tree.size();
    let w = to_px(size.width())?;
    let h = to_px(size.height())?;
    if w > MAX_DIM || h > MAX_DIM {
        return Err(ShowError::asset(format!(
            "svg raster size too large: {w}x{h} (max {MAX_DIM}x{MAX_DIM})"
        )));
    }
    Ok((w, h))
}

pub fn rasterize_svg_to_premul_rgba8(
    tree: &usvg::Tree,
    width: u32,
    height: u32,
) -> ShowResult<Vec<u8>> {
    let mut pixmap = resvg::tiny_skia::Pixmap::new(width, height)
        .ok_or_else(|| ShowError::asset("failed to allocate svg pixmap"))?;

    let sx = (width as f32) / tree.size().width();
    let sy = (height as f32) / tree.size().height();
    let xform = resvg::tiny_skia::Transform::from_scale(sx, sy);

    resvg::render(tree, xform, &mut pixmap.as_mut());
    Ok(pixmap.data().to_vec())
}
