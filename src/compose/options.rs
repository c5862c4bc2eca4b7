//! Option files and carousel construction.

use std::path::Path;

use crate::{
    compose::composer::Composer,
    config::ini::{DirectiveLine, parse_directives},
    foundation::error::{ShowError, ShowResult},
    render::backend::DrawableBackend,
};

/// Separates variable assignments inside one option entry.
pub const ALIAS_SEPARATOR: &str = ";;";

/// One `id = name=value;;name=value` line of an option file.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct OptionEntry {
    pub id: String,
    pub aliases: String,
}

/// Split on [`ALIAS_SEPARATOR`], dropping empty pieces.
pub fn split_aliases(aliases: &str) -> impl Iterator<Item = &str> {
    aliases.split(ALIAS_SEPARATOR).filter(|p| !p.is_empty())
}

/// Option files share the directive file syntax: the key is the option id.
pub fn parse_options(src: &str) -> Vec<OptionEntry> {
    parse_directives(src)
        .into_iter()
        .map(|l| OptionEntry {
            id: l.key,
            aliases: l.value,
        })
        .collect()
}

pub fn read_options(path: &Path) -> ShowResult<Vec<OptionEntry>> {
    let src = std::fs::read_to_string(path).map_err(|e| ShowError::io(path, e))?;
    Ok(parse_options(&src))
}

/// Build one carousel option per entry, in order.
///
/// Zero entries is a configuration error: there would be nothing to select.
pub fn build_options<B: DrawableBackend>(
    composer: &mut Composer<B>,
    entries: &[OptionEntry],
    template: &[DirectiveLine],
) -> ShowResult<usize> {
    if entries.is_empty() {
        return Err(ShowError::config("option file yielded no options"));
    }
    for entry in entries {
        composer.add_option(&entry.id, &entry.aliases, template);
    }
    Ok(composer.carousel().len())
}

/// Pick the option shown first.
///
/// With `select`, the first id match (case-insensitive) walking from the last inserted option;
/// a miss leaves the cursor there. Without it, one hop after the last inserted option.
pub fn select_startup<B: DrawableBackend>(composer: &mut Composer<B>, select: Option<&str>) {
    let carousel = composer.carousel_mut();
    match select {
        Some(id) => {
            if !carousel.select_id(id) {
                tracing::info!(id, "requested option not found");
            }
        }
        None => carousel.select_after_last_inserted(),
    }
    if let Some(id) = composer.carousel().selected_id() {
        tracing::info!(id, "option selected");
    }
}

#[cfg(test)]
#[path = "../../tests/unit/compose/options.rs"]
mod tests;
