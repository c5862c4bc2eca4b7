//! Circular list of named, independently composed scenes.

use crate::render::{backend::DrawableBackend, stack::RenderStack};

/// One selectable scene.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct CarouselOption {
    pub id: String,
    pub stack: RenderStack,
}

/// Options in insertion order with a wrapping selection cursor.
///
/// Invariant: `selected` is `Some` and in bounds whenever `options` is non-empty.
#[derive(Clone, Debug, Default)]
pub struct Carousel {
    options: Vec<CarouselOption>,
    selected: Option<usize>,
}

impl Carousel {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.options.len()
    }

    pub fn is_empty(&self) -> bool {
        self.options.is_empty()
    }

    pub fn options(&self) -> &[CarouselOption] {
        &self.options
    }

    /// Append at the tail and leave the cursor on the new option.
    pub fn push(&mut self, id: impl Into<String>, stack: RenderStack) {
        self.options.push(CarouselOption {
            id: id.into(),
            stack,
        });
        self.selected = Some(self.options.len() - 1);
    }

    pub fn selected_index(&self) -> Option<usize> {
        self.selected
    }

    pub fn selected(&self) -> Option<&CarouselOption> {
        self.selected.and_then(|i| self.options.get(i))
    }

    pub fn selected_id(&self) -> Option<&str> {
        self.selected().map(|o| o.id.as_str())
    }

    pub fn selected_stack(&self) -> Option<&RenderStack> {
        self.selected().map(|o| &o.stack)
    }

    pub fn select_next(&mut self) {
        if let Some(i) = self.selected {
            self.selected = Some((i + 1) % self.options.len());
        }
    }

    pub fn select_previous(&mut self) {
        if let Some(i) = self.selected {
            let n = self.options.len();
            self.selected = Some((i + n - 1) % n);
        }
    }

    /// Startup policy: the option one hop after the most recently inserted one.
    ///
    /// Since [`Carousel::push`] leaves the cursor on the tail, this lands on the first option
    /// in insertion order.
    pub fn select_after_last_inserted(&mut self) {
        self.select_next();
    }

    /// Walk one full lap from the cursor looking for `id` (case-insensitive).
    ///
    /// Returns `false` and leaves the cursor alone on a miss.
    pub fn select_id(&mut self, id: &str) -> bool {
        let Some(start) = self.selected else {
            return false;
        };
        let n = self.options.len();
        let hit = (0..n)
            .map(|hop| (start + hop) % n)
            .find(|&i| self.options[i].id.eq_ignore_ascii_case(id));
        match hit {
            Some(i) => {
                self.selected = Some(i);
                true
            }
            None => false,
        }
    }

    /// Release every texture owned by any option's stack.
    pub fn release<B: DrawableBackend + ?Sized>(self, backend: &mut B) -> usize {
        self.options
            .into_iter()
            .map(|o| o.stack.release(backend))
            .sum()
    }
}

#[cfg(test)]
#[path = "../../tests/unit/compose/carousel.rs"]
mod tests;
