//! Ordered drawable elements.

use crate::{
    foundation::core::{Rect, Rgba8},
    render::backend::{DrawableBackend, TextureId},
};

/// How an element refers to its backend texture.
///
/// Only `Owned` references release the texture on teardown; `Shared` ones were cloned from a
/// template (or share a texture with a sibling, like a drop shadow) and never free it.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, serde::Serialize)]
#[serde(tag = "ownership", content = "texture", rename_all = "lowercase")]
pub enum TextureRef {
    Owned(TextureId),
    Shared(TextureId),
}

impl TextureRef {
    pub fn id(self) -> TextureId {
        match self {
            Self::Owned(id) | Self::Shared(id) => id,
        }
    }

    pub fn is_owned(self) -> bool {
        matches!(self, Self::Owned(_))
    }

    /// Non-owning view of the same texture.
    pub fn share(self) -> Self {
        Self::Shared(self.id())
    }
}

/// One positioned, tinted texture.
#[derive(Clone, Copy, Debug, PartialEq, Eq, serde::Serialize)]
pub struct Element {
    pub texture: TextureRef,
    pub rect: Rect,
    pub tint: Rgba8,
}

impl Element {
    pub fn new(texture: TextureRef, rect: Rect, tint: Rgba8) -> Self {
        Self {
            texture,
            rect,
            tint,
        }
    }
}

/// Append-only sequence of elements, drawn in insertion order (later on top).
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct RenderStack {
    elements: Vec<Element>,
}

impl RenderStack {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, element: Element) {
        self.elements.push(element);
    }

    pub fn len(&self) -> usize {
        self.elements.len()
    }

    pub fn is_empty(&self) -> bool {
        self.elements.is_empty()
    }

    pub fn elements(&self) -> &[Element] {
        &self.elements
    }

    /// Geometry and tint are editable; ownership is not.
    pub fn element_mut(&mut self, index: usize) -> Option<(&mut Rect, &mut Rgba8)> {
        self.elements
            .get_mut(index)
            .map(|e| (&mut e.rect, &mut e.tint))
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Element> {
        self.elements.iter()
    }

    /// Copy every element, in order, as a non-owning reference to the same texture.
    pub fn clone_as_template(&self) -> Self {
        Self {
            elements: self
                .elements
                .iter()
                .map(|e| Element {
                    texture: e.texture.share(),
                    ..*e
                })
                .collect(),
        }
    }

    /// Issue one draw per element in insertion order. Safe to call every frame.
    pub fn draw_all<B: DrawableBackend + ?Sized>(&self, backend: &mut B) {
        for e in &self.elements {
            backend.draw(e.texture.id(), e.rect, e.tint);
        }
    }

    /// Release every texture this stack owns. Shared references are dropped silently.
    pub fn release<B: DrawableBackend + ?Sized>(self, backend: &mut B) -> usize {
        let mut released = 0;
        for e in self.elements {
            if let TextureRef::Owned(id) = e.texture {
                backend.release_texture(id);
                released += 1;
            }
        }
        released
    }
}

impl<'a> IntoIterator for &'a RenderStack {
    type Item = &'a Element;
    type IntoIter = std::slice::Iter<'a, Element>;

    fn into_iter(self) -> Self::IntoIter {
        self.elements.iter()
    }
}

#[cfg(test)]
#[path = "../../tests/unit/render/stack.rs"]
mod tests;
