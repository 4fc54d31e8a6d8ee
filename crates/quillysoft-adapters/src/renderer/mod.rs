//! Template renderer adapters.

mod simple;

pub use simple::{SimpleRenderer, render_content};
