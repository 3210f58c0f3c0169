//! Rendering of text art
//!
//! - [`color`]: hex colors, luminance and the contrast rule for foregrounds
//! - [`html`]: standalone HTML document for an [`ArtGrid`](crate::art::ArtGrid)

pub mod color;
pub mod html;

pub use color::{contrasting_text_color, Rgb};
pub use html::{render_html, save_html, HtmlOptions};
