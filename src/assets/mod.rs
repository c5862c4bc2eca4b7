pub mod decode;
pub mod svg_raster;
pub(crate) mod text_engine;
