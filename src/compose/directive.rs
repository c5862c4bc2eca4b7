//! The fixed directive table.

/// Every configuration key the dispatcher understands.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, serde::Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Directive {
    Image,
    ImageFallback,
    ImagePosition,
    ImageStretch,
    Text,
    TextPosition,
    TextColor,
    TextAlign,
    Font,
    FontFallback,
    FontSize,
    ScreenMargin,
    ShadowColor,
    ShadowOffset,
    Shadow,
    Quiet,
    Quit,
    WaitQuit,
    KeypressQuit,
    DisableFontScale,
    Set,
    SetStrict,
}

impl Directive {
    pub const ALL: [Self; 22] = [
        Self::Image,
        Self::ImageFallback,
        Self::ImagePosition,
        Self::ImageStretch,
        Self::Text,
        Self::TextPosition,
        Self::TextColor,
        Self::TextAlign,
        Self::Font,
        Self::FontFallback,
        Self::FontSize,
        Self::ScreenMargin,
        Self::ShadowColor,
        Self::ShadowOffset,
        Self::Shadow,
        Self::Quiet,
        Self::Quit,
        Self::WaitQuit,
        Self::KeypressQuit,
        Self::DisableFontScale,
        Self::Set,
        Self::SetStrict,
    ];

    /// Key as written in directive files.
    pub const fn key(self) -> &'static str {
        match self {
            Self::Image => "image",
            Self::ImageFallback => "image_fallback",
            Self::ImagePosition => "image_position",
            Self::ImageStretch => "image_stretch",
            Self::Text => "text",
            Self::TextPosition => "text_position",
            Self::TextColor => "text_color",
            Self::TextAlign => "text_align",
            Self::Font => "font",
            Self::FontFallback => "font_fallback",
            Self::FontSize => "font_size",
            Self::ScreenMargin => "screen_margin",
            Self::ShadowColor => "shadow_color",
            Self::ShadowOffset => "shadow_offset",
            Self::Shadow => "shadow",
            Self::Quiet => "quiet",
            Self::Quit => "quit",
            Self::WaitQuit => "wait_quit",
            Self::KeypressQuit => "keypress_quit",
            Self::DisableFontScale => "disable_font_scale",
            Self::Set => "set",
            Self::SetStrict => "set_strict",
        }
    }

    /// Value placeholder used in help output.
    pub const fn value_hint(self) -> &'static str {
        match self {
            Self::Image | Self::ImageFallback => "<image_file>",
            Self::Font | Self::FontFallback => "<font_file>",
            Self::ImagePosition | Self::TextPosition => "<position>",
            Self::ImageStretch => "<stretch>",
            Self::Text => "<text>",
            Self::TextAlign => "<alignment>",
            Self::FontSize => "<size>",
            Self::TextColor | Self::ShadowColor => "<r>,<g>,<b>",
            Self::ScreenMargin => "<x>,<y>,<w>,<h>",
            Self::ShadowOffset => "<x>,<y>",
            Self::Shadow
            | Self::Quiet
            | Self::Quit
            | Self::WaitQuit
            | Self::KeypressQuit
            | Self::DisableFontScale => "<bool>",
            Self::Set | Self::SetStrict => "<key>=<value>",
        }
    }

    pub const fn help(self) -> &'static str {
        match self {
            Self::Image => "Load an image.",
            Self::ImageFallback => {
                "Load an image if the previous image or image_fallback failed to load."
            }
            Self::ImagePosition => "Sets the position of images loaded from now on.",
            Self::ImageStretch => {
                "Sets the size mode of images loaded: fit, vertical, horizontal, original, stretch."
            }
            Self::Text => {
                "Renders text using the current font, font size, text colour and shadow settings. \
                 Lines are separated by ||."
            }
            Self::TextPosition => "Sets the position of text rendered from now on.",
            Self::TextColor => "Sets the text colour to r,g,b.",
            Self::TextAlign => "Sets line alignment within a text block: left, center, right.",
            Self::Font => "Load a font file.",
            Self::FontFallback => {
                "Load a font if the previous font or font_fallback failed to load."
            }
            Self::FontSize => {
                "Sets the font size; a loaded font is reloaded at this size."
            }
            Self::ScreenMargin => "Sets the margin for anything loaded from now on.",
            Self::ShadowColor => "Sets the drop shadow colour to r,g,b. Enables drop shadows.",
            Self::ShadowOffset => "Sets the drop shadow offset by x/y. Enables drop shadows.",
            Self::Shadow => "Enable/disable drop shadows for rendered text.",
            Self::Quiet => "Draw once, then stop redrawing.",
            Self::Quit => "Quit after the first frame.",
            Self::WaitQuit => "Quit when a button is released.",
            Self::KeypressQuit => "Quit after more than 30 button presses.",
            Self::DisableFontScale => {
                "Disable scaling font sizes to the screen height. true = disable."
            }
            Self::Set => "Sets a variable; the value allows variable substitution.",
            Self::SetStrict => "Sets a variable; the value is taken literally.",
        }
    }

    /// Single-letter command-line flag, if the directive has one.
    pub const fn short_flag(self) -> Option<char> {
        match self {
            Self::Image => Some('i'),
            Self::TextAlign => Some('a'),
            Self::Font => Some('f'),
            Self::Text => Some('t'),
            Self::TextColor => Some('c'),
            Self::ImagePosition => Some('P'),
            Self::ImageStretch => Some('S'),
            Self::FontSize => Some('s'),
            Self::TextPosition => Some('p'),
            Self::ShadowColor => Some('d'),
            Self::ShadowOffset => Some('o'),
            Self::Shadow => Some('D'),
            Self::Quit => Some('q'),
            Self::KeypressQuit => Some('k'),
            Self::WaitQuit => Some('w'),
            Self::Quiet => Some('W'),
            Self::DisableFontScale => Some('O'),
            Self::Set => Some('x'),
            Self::SetStrict => Some('X'),
            Self::ImageFallback | Self::FontFallback | Self::ScreenMargin => None,
        }
    }

    /// Fixed value applied when the directive is given as a bare command-line switch.
    pub const fn switch_value(self) -> Option<&'static str> {
        match self {
            Self::Shadow => Some("n"),
            Self::Quiet
            | Self::Quit
            | Self::WaitQuit
            | Self::KeypressQuit
            | Self::DisableFontScale => Some("y"),
            _ => None,
        }
    }

    /// Long command-line flag name.
    pub const fn long_flag(self) -> &'static str {
        match self {
            Self::Image => "image",
            Self::ImageFallback => "image-fallback",
            Self::ImagePosition => "image-position",
            Self::ImageStretch => "image-stretch",
            Self::Text => "text",
            Self::TextPosition => "text-position",
            Self::TextColor => "text-color",
            Self::TextAlign => "text-align",
            Self::Font => "font",
            Self::FontFallback => "font-fallback",
            Self::FontSize => "font-size",
            Self::ScreenMargin => "screen-margin",
            Self::ShadowColor => "shadow-color",
            Self::ShadowOffset => "shadow-offset",
            Self::Shadow => "no-shadow",
            Self::Quiet => "quiet",
            Self::Quit => "quit",
            Self::WaitQuit => "wait-quit",
            Self::KeypressQuit => "keypress-quit",
            Self::DisableFontScale => "disable-font-scale",
            Self::Set => "set",
            Self::SetStrict => "set-strict",
        }
    }

    /// Case-insensitive key lookup.
    pub fn lookup(key: &str) -> Option<Self> {
        let key = key.trim();
        Self::ALL
            .into_iter()
            .find(|d| d.key().eq_ignore_ascii_case(key))
    }
}

/// `key=<value>: description` for every directive, one per line.
pub fn reference() -> String {
    let mut out = String::new();
    for d in Directive::ALL {
        out.push_str(d.key());
        out.push('=');
        out.push_str(d.value_hint());
        out.push_str(": ");
        out.push_str(d.help());
        out.push('\n');
    }
    out
}

#[cfg(test)]
#[path = "../../tests/unit/compose/directive.rs"]
mod tests;
