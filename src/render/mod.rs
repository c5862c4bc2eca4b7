pub mod backend;
pub mod cpu;
pub mod geometry;
pub mod headless;
pub mod stack;
