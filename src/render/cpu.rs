//! Software backend rasterising with `vello_cpu`.

use std::{collections::HashMap, path::Path, path::PathBuf, sync::Arc};

use crate::{
    assets::{
        decode::{load_image_file, unpremultiply_rgba8_in_place},
        text_engine::TextLayoutEngine,
    },
    compose::text::TextBlock,
    foundation::{
        core::{Rect, Rgba8, Size},
        error::{ShowError, ShowResult},
    },
    render::backend::{DrawableBackend, FontId, Texture, TextureId},
};

#[derive(Clone, Debug)]
pub struct CpuBackendOpts {
    /// Colour every frame starts from.
    pub clear_rgba: Rgba8,
    /// Write each presented frame to this PNG.
    pub output: Option<PathBuf>,
}

impl Default for CpuBackendOpts {
    fn default() -> Self {
        Self {
            clear_rgba: Rgba8::WHITE,
            output: None,
        }
    }
}

struct CpuTexture {
    width: u32,
    height: u32,
    rgba8_premul: Arc<Vec<u8>>,
    tinted: HashMap<Rgba8, vello_cpu::Image>,
}

struct CpuFont {
    family: String,
    size_px: u32,
    data: vello_cpu::peniko::FontData,
}

pub struct CpuBackend {
    opts: CpuBackendOpts,
    width: u16,
    height: u16,
    ctx: vello_cpu::RenderContext,
    frame: vello_cpu::Pixmap,
    text_engine: TextLayoutEngine,
    textures: Vec<Option<CpuTexture>>,
    fonts: Vec<Option<CpuFont>>,
}

impl CpuBackend {
    pub fn new(surface: Size, opts: CpuBackendOpts) -> ShowResult<Self> {
        let width = surface_dim(surface.w, "width")?;
        let height = surface_dim(surface.h, "height")?;
        tracing::debug!(width, height, output = ?opts.output, "cpu backend ready");
        Ok(Self {
            opts,
            width,
            height,
            ctx: vello_cpu::RenderContext::new(width, height),
            frame: vello_cpu::Pixmap::new(width, height),
            text_engine: TextLayoutEngine::new(),
            textures: Vec::new(),
            fonts: Vec::new(),
        })
    }

    /// Straight-alpha RGBA8 copy of the last presented frame.
    pub fn frame_rgba8(&self) -> Vec<u8> {
        let mut out = self.frame.data_as_u8_slice().to_vec();
        unpremultiply_rgba8_in_place(&mut out);
        out
    }

    fn font(&self, font: FontId) -> ShowResult<&CpuFont> {
        self.fonts
            .get(font.0 as usize)
            .and_then(Option::as_ref)
            .ok_or_else(|| ShowError::backend(format!("unknown font {font:?}")))
    }

    fn insert_texture(&mut self, width: u32, height: u32, rgba8_premul: Vec<u8>) -> Texture {
        let id = TextureId(self.textures.len() as u32);
        self.textures.push(Some(CpuTexture {
            width,
            height,
            rgba8_premul: Arc::new(rgba8_premul),
            tinted: HashMap::new(),
        }));
        Texture {
            id,
            size: Size::new(width as i32, height as i32),
        }
    }

    fn write_output(&self, path: &Path) -> ShowResult<()> {
        let img = image::RgbaImage::from_raw(
            u32::from(self.width),
            u32::from(self.height),
            self.frame_rgba8(),
        )
        .ok_or_else(|| ShowError::backend("frame buffer size mismatch"))?;
        img.save(path)
            .map_err(|e| ShowError::backend(format!("write '{}': {e}", path.display())))
    }
}

fn surface_dim(v: i32, what: &str) -> ShowResult<u16> {
    u16::try_from(v)
        .ok()
        .filter(|&v| v > 0)
        .ok_or_else(|| ShowError::backend(format!("surface {what} must be in 1..=65535, got {v}")))
}

impl CpuTexture {
    fn paint(&mut self, tint: Rgba8) -> ShowResult<vello_cpu::Image> {
        if let Some(img) = self.tinted.get(&tint).cloned() {
            return Ok(img);
        }
        let bytes = if tint.is_identity() {
            self.rgba8_premul.as_ref().clone()
        } else {
            modulate_premul(&self.rgba8_premul, tint)
        };
        let img = rgba_premul_to_image(&bytes, self.width, self.height)?;
        self.tinted.insert(tint, img.clone());
        Ok(img)
    }
}

/// Multiply every channel by the tint, keeping the result premultiplied.
fn modulate_premul(src: &[u8], tint: Rgba8) -> Vec<u8> {
    let m = [tint.r, tint.g, tint.b, tint.a];
    src.chunks_exact(4)
        .flat_map(|px| {
            let mut out = [0u8; 4];
            for (i, c) in out.iter_mut().enumerate() {
                let mut v = u16::from(px[i]) * u16::from(m[i]);
                if i < 3 {
                    v = (v + 127) / 255 * u16::from(m[3]);
                }
                *c = ((v + 127) / 255) as u8;
            }
            out
        })
        .collect()
}

fn pixmap_from_premul_bytes(bytes: &[u8], width: u32, height: u32) -> ShowResult<vello_cpu::Pixmap> {
    let w: u16 = width
        .try_into()
        .map_err(|_| ShowError::backend("pixmap width exceeds u16"))?;
    let h: u16 = height
        .try_into()
        .map_err(|_| ShowError::backend("pixmap height exceeds u16"))?;
    if bytes.len()
        != (width as usize)
            .saturating_mul(height as usize)
            .saturating_mul(4)
    {
        return Err(ShowError::backend("pixmap byte len mismatch"));
    }
    let pixels = bytes
        .chunks_exact(4)
        .map(|px| vello_cpu::peniko::color::PremulRgba8::from_u8_array([px[0], px[1], px[2], px[3]]))
        .collect::<Vec<_>>();
    Ok(vello_cpu::Pixmap::from_parts_with_opacity(pixels, w, h, true))
}

fn rgba_premul_to_image(bytes_premul: &[u8], width: u32, height: u32) -> ShowResult<vello_cpu::Image> {
    let pixmap = pixmap_from_premul_bytes(bytes_premul, width, height)?;
    Ok(vello_cpu::Image {
        image: vello_cpu::ImageSource::Pixmap(Arc::new(pixmap)),
        sampler: vello_cpu::peniko::ImageSampler::default(),
    })
}

impl DrawableBackend for CpuBackend {
    fn surface_size(&self) -> Size {
        Size::new(i32::from(self.width), i32::from(self.height))
    }

    fn load_image(&mut self, path: &Path) -> ShowResult<Texture> {
        let prepared = load_image_file(path)?;
        if prepared.width == 0 || prepared.height == 0 {
            return Err(ShowError::asset(format!(
                "image '{}' has zero size",
                path.display()
            )));
        }
        tracing::debug!(path = %path.display(), w = prepared.width, h = prepared.height, "image decoded");
        let bytes = Arc::try_unwrap(prepared.rgba8_premul).unwrap_or_else(|a| a.as_ref().clone());
        Ok(self.insert_texture(prepared.width, prepared.height, bytes))
    }

    fn load_font(&mut self, path: &Path, size_px: u32) -> ShowResult<FontId> {
        if size_px == 0 {
            return Err(ShowError::backend("font size must be > 0"));
        }
        let bytes = std::fs::read(path).map_err(|e| ShowError::io(path, e))?;
        let family = self.text_engine.register_font(bytes.clone())?;
        let data = vello_cpu::peniko::FontData::new(vello_cpu::peniko::Blob::from(bytes), 0);
        let id = FontId(self.fonts.len() as u32);
        self.fonts.push(Some(CpuFont {
            family,
            size_px,
            data,
        }));
        Ok(id)
    }

    fn measure_text(&mut self, font: FontId, line: &str) -> ShowResult<Size> {
        let (family, size_px) = {
            let f = self.font(font)?;
            (f.family.clone(), f.size_px)
        };
        let layout = self.text_engine.layout_line(line, &family, size_px as f32)?;
        Ok(Size::new(
            layout.width().ceil() as i32,
            layout.height().ceil() as i32,
        ))
    }

    fn line_skip(&mut self, font: FontId) -> ShowResult<i32> {
        let (family, size_px) = {
            let f = self.font(font)?;
            (f.family.clone(), f.size_px)
        };
        let layout = self.text_engine.layout_line("Ag", &family, size_px as f32)?;
        Ok(layout.height().ceil() as i32)
    }

    fn render_text(&mut self, font: FontId, block: &TextBlock) -> ShowResult<Texture> {
        let (family, size_px, data) = {
            let f = self.font(font)?;
            (f.family.clone(), f.size_px, f.data.clone())
        };
        let w = surface_dim(block.size.w.max(1), "text width")?;
        let h = surface_dim(block.size.h.max(1), "text height")?;

        let mut ctx = vello_cpu::RenderContext::new(w, h);
        ctx.set_paint(vello_cpu::peniko::Color::from_rgba8(255, 255, 255, 255));
        for line in &block.lines {
            let layout = self
                .text_engine
                .layout_line(&line.text, &family, size_px as f32)?;
            ctx.set_transform(vello_cpu::kurbo::Affine::translate((
                f64::from(line.x),
                f64::from(line.y),
            )));
            for l in layout.lines() {
                for item in l.items() {
                    let parley::layout::PositionedLayoutItem::GlyphRun(run) = item else {
                        continue;
                    };
                    let glyphs = run.positioned_glyphs().map(|g| vello_cpu::Glyph {
                        id: g.id,
                        x: g.x,
                        y: g.y,
                    });
                    ctx.glyph_run(&data)
                        .font_size(run.run().font_size())
                        .fill_glyphs(glyphs);
                }
            }
        }
        ctx.flush();
        let mut pixmap = vello_cpu::Pixmap::new(w, h);
        ctx.render_to_pixmap(&mut pixmap);

        let bytes = pixmap.data_as_u8_slice().to_vec();
        Ok(self.insert_texture(u32::from(w), u32::from(h), bytes))
    }

    fn begin_frame(&mut self) {
        self.ctx.reset();
        let c = self.opts.clear_rgba;
        self.ctx.set_transform(vello_cpu::kurbo::Affine::IDENTITY);
        self.ctx.set_paint_transform(vello_cpu::kurbo::Affine::IDENTITY);
        self.ctx
            .set_paint(vello_cpu::peniko::Color::from_rgba8(c.r, c.g, c.b, c.a));
        self.ctx.fill_rect(&vello_cpu::kurbo::Rect::new(
            0.0,
            0.0,
            f64::from(self.width),
            f64::from(self.height),
        ));
    }

    fn draw(&mut self, texture: TextureId, rect: Rect, tint: Rgba8) {
        if rect.w <= 0 || rect.h <= 0 {
            return;
        }
        let Some(Some(t)) = self.textures.get_mut(texture.0 as usize) else {
            tracing::warn!(?texture, "draw of unknown texture");
            return;
        };
        let (tw, th) = (f64::from(t.width), f64::from(t.height));
        let paint = match t.paint(tint) {
            Ok(p) => p,
            Err(e) => {
                tracing::warn!(?texture, error = %e, "texture paint failed");
                return;
            }
        };
        let xform = vello_cpu::kurbo::Affine::translate((f64::from(rect.x), f64::from(rect.y)))
            * vello_cpu::kurbo::Affine::scale_non_uniform(
                f64::from(rect.w) / tw,
                f64::from(rect.h) / th,
            );
        self.ctx.set_transform(xform);
        self.ctx.set_paint_transform(vello_cpu::kurbo::Affine::IDENTITY);
        self.ctx.set_paint(paint);
        self.ctx
            .fill_rect(&vello_cpu::kurbo::Rect::new(0.0, 0.0, tw, th));
    }

    fn present(&mut self) -> ShowResult<()> {
        self.ctx.flush();
        self.ctx.render_to_pixmap(&mut self.frame);
        if let Some(path) = self.opts.output.clone() {
            self.write_output(&path)?;
        }
        Ok(())
    }

    fn release_texture(&mut self, texture: TextureId) {
        match self.textures.get_mut(texture.0 as usize) {
            Some(slot) if slot.is_some() => *slot = None,
            _ => tracing::warn!(?texture, "release of unknown texture"),
        }
    }

    fn release_font(&mut self, font: FontId) {
        match self.fonts.get_mut(font.0 as usize) {
            Some(slot) if slot.is_some() => *slot = None,
            _ => tracing::warn!(?font, "release of unknown font"),
        }
    }
}

#[cfg(test)]
#[path = "../../tests/unit/render/cpu.rs"]
mod tests;
