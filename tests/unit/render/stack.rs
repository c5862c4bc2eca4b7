use std::path::Path;

use super::*;
use crate::{
    compose::text::TextBlock,
    foundation::{
        core::Size,
        error::{ShowError, ShowResult},
    },
    render::backend::{FontId, Texture},
};

#[derive(Default)]
struct Recorder {
    draws: Vec<(TextureId, Rect, Rgba8)>,
    released: Vec<TextureId>,
}

impl DrawableBackend for Recorder {
    fn surface_size(&self) -> Size {
        Size::new(640, 480)
    }
    fn load_image(&mut self, _path: &Path) -> ShowResult<Texture> {
        Err(ShowError::backend("unused"))
    }
    fn load_font(&mut self, _path: &Path, _size_px: u32) -> ShowResult<FontId> {
        Err(ShowError::backend("unused"))
    }
    fn measure_text(&mut self, _font: FontId, _line: &str) -> ShowResult<Size> {
        Err(ShowError::backend("unused"))
    }
    fn line_skip(&mut self, _font: FontId) -> ShowResult<i32> {
        Err(ShowError::backend("unused"))
    }
    fn render_text(&mut self, _font: FontId, _block: &TextBlock) -> ShowResult<Texture> {
        Err(ShowError::backend("unused"))
    }
    fn begin_frame(&mut self) {}
    fn draw(&mut self, texture: TextureId, rect: Rect, tint: Rgba8) {
        self.draws.push((texture, rect, tint));
    }
    fn present(&mut self) -> ShowResult<()> {
        Ok(())
    }
    fn release_texture(&mut self, texture: TextureId) {
        self.released.push(texture);
    }
    fn release_font(&mut self, _font: FontId) {}
}

fn abc() -> RenderStack {
    let mut stack = RenderStack::new();
    for (i, tint) in [Rgba8::WHITE, Rgba8::rgb(1, 2, 3), Rgba8::BLACK]
        .into_iter()
        .enumerate()
    {
        stack.push(Element::new(
            TextureRef::Owned(TextureId(i as u32)),
            Rect::new(i as i32, 0, 10, 10),
            tint,
        ));
    }
    stack
}

#[test]
fn draw_all_visits_in_insertion_order_every_frame() {
    let stack = abc();
    let mut backend = Recorder::default();
    for _ in 0..3 {
        backend.draws.clear();
        stack.draw_all(&mut backend);
        let ids: Vec<u32> = backend.draws.iter().map(|d| d.0.0).collect();
        assert_eq!(ids, vec![0, 1, 2]);
        assert_eq!(backend.draws[1].2, Rgba8::rgb(1, 2, 3));
    }
}

#[test]
fn template_clone_shares_textures_but_not_geometry() {
    let original = abc();
    let mut clone = original.clone_as_template();

    assert_eq!(clone.len(), original.len());
    for (a, b) in original.iter().zip(&clone) {
        assert_eq!(a.texture.id(), b.texture.id());
        assert!(a.texture.is_owned());
        assert!(!b.texture.is_owned());
    }

    let (rect, tint) = clone.element_mut(0).unwrap();
    rect.x = 999;
    *tint = Rgba8::BLACK;
    assert_eq!(original.elements()[0].rect.x, 0);
    assert_eq!(original.elements()[0].tint, Rgba8::WHITE);
}

#[test]
fn release_frees_only_owned_textures() {
    let original = abc();
    let clone = original.clone_as_template();
    let mut backend = Recorder::default();

    assert_eq!(clone.release(&mut backend), 0);
    assert!(backend.released.is_empty());

    assert_eq!(original.release(&mut backend), 3);
    assert_eq!(
        backend.released,
        vec![TextureId(0), TextureId(1), TextureId(2)]
    );
}

#[test]
fn element_mut_out_of_range_is_none() {
    let mut stack = RenderStack::new();
    assert!(stack.element_mut(0).is_none());
    assert!(stack.is_empty());
}
