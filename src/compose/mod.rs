pub mod ambient;
pub mod carousel;
pub mod composer;
pub mod directive;
pub mod options;
pub mod text;
pub mod vars;
