// MIT/Apache2 License

pub mod visual;
mod x11context;
mod x11drawable;
mod x11runtime;

pub use visual::X11Visual;
pub use x11context::*;
pub use x11drawable::*;
pub use x11runtime::*;
