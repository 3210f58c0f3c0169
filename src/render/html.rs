//! HTML rendering of an [`ArtGrid`]
//!
//! The document is a single monospace `div`. Each row is a sequence of
//! `<span>`s, one per run of cells sharing a background color, followed by
//! `<br>`.

use crate::art::ArtGrid;
use crate::render::color::{
    contrasting_text_color, Rgb, DEFAULT_DARKEN_FACTOR, DEFAULT_LIGHTEN_FACTOR,
};
use rustc_hash::FxHashMap;
use std::fs;
use std::io;
use std::path::Path;
use tracing::debug;

/// Presentation settings for [`render_html`]
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct HtmlOptions {
    /// Font size in pixels
    pub font_size: u32,
    /// Line height as a multiple of the font size
    pub line_height_ratio: f64,
    pub darken_factor: f64,
    pub lighten_factor: f64,
}

impl Default for HtmlOptions {
    fn default() -> Self {
        HtmlOptions {
            font_size: 10,
            line_height_ratio: 1.0,
            darken_factor: DEFAULT_DARKEN_FACTOR,
            lighten_factor: DEFAULT_LIGHTEN_FACTOR,
        }
    }
}

/// Render `grid` as a standalone HTML document
pub fn render_html(grid: &ArtGrid, options: &HtmlOptions) -> String {
    let mut html = String::new();
    html.push_str("<!DOCTYPE html>");
    html.push_str("<html lang='en'>");
    html.push_str("<head>");
    html.push_str("<meta charset='UTF-8'>");
    html.push_str("<meta name='viewport' content='width=device-width, initial-scale=1.0'>");
    html.push_str("<title>Text and Color Matrix</title>");
    html.push_str("<style>");
    html.push_str(&format!(
        ".matrix {{ font-family: monospace; font-size: {}px; line-height: {}; white-space: pre; }}",
        options.font_size, options.line_height_ratio
    ));
    html.push_str("</style>");
    html.push_str("</head>");
    html.push_str("<body>");
    html.push_str("<div class='matrix'>");

    // Backgrounds repeat heavily across art, so compute each foreground once
    let mut foregrounds: FxHashMap<Rgb, Rgb> = FxHashMap::default();
    let mut run = String::new();

    for row in 0..grid.height() {
        let mut current: Option<Rgb> = None;

        for (glyph, background) in grid.row(row) {
            if current != Some(background) {
                if let Some(previous) = current {
                    push_span(&mut html, &run, previous, &mut foregrounds, options);
                    run.clear();
                }
                current = Some(background);
            }
            push_escaped(&mut run, glyph);
        }

        if let Some(previous) = current {
            push_span(&mut html, &run, previous, &mut foregrounds, options);
            run.clear();
        }
        html.push_str("<br>");
    }

    html.push_str("</div>");
    html.push_str("</body>");
    html.push_str("</html>");

    debug!(
        rows = grid.height(),
        distinct_colors = foregrounds.len(),
        "rendered html"
    );
    html
}

/// Render `grid` and write it to `path`
pub fn save_html(grid: &ArtGrid, path: &Path, options: &HtmlOptions) -> io::Result<()> {
    fs::write(path, render_html(grid, options))
}

fn push_span(
    html: &mut String,
    text: &str,
    background: Rgb,
    foregrounds: &mut FxHashMap<Rgb, Rgb>,
    options: &HtmlOptions,
) {
    let foreground = *foregrounds.entry(background).or_insert_with(|| {
        contrasting_text_color(background, options.darken_factor, options.lighten_factor)
    });
    html.push_str(&format!(
        "<span style='color:{}; background-color:{}'>{}</span>",
        foreground, background, text
    ));
}

fn push_escaped(out: &mut String, c: char) {
    match c {
        '<' => out.push_str("&lt;"),
        '>' => out.push_str("&gt;"),
        '&' => out.push_str("&amp;"),
        '\'' => out.push_str("&#39;"),
        '"' => out.push_str("&quot;"),
        _ => out.push(c),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::art::ColorGrid;
    use pretty_assertions::assert_eq;

    fn grid(text: &str, colors: &str) -> ArtGrid {
        ArtGrid::from_text(text, ColorGrid::parse(colors).unwrap()).unwrap()
    }

    #[test]
    fn runs_of_one_color_share_a_span() {
        let art = grid("abc", "#ffffff #ffffff #000000");
        let html = render_html(&art, &HtmlOptions::default());
        assert!(html.contains(
            "<div class='matrix'>\
             <span style='color:#b2b2b2; background-color:#ffffff'>ab</span>\
             <span style='color:#4c4c4c; background-color:#000000'>c</span>\
             <br></div>"
        ));
    }

    #[test]
    fn each_row_ends_with_break() {
        let art = grid("xy", "#101010\n#101010\n#101010");
        let html = render_html(&art, &HtmlOptions::default());
        assert_eq!(html.matches("<br>").count(), 3);
        assert_eq!(html.matches("<span").count(), 3);
    }

    #[test]
    fn options_reach_the_stylesheet() {
        let art = grid("x", "#101010");
        let options = HtmlOptions {
            font_size: 14,
            line_height_ratio: 0.6,
            ..HtmlOptions::default()
        };
        let html = render_html(&art, &options);
        assert!(html.contains("font-size: 14px; line-height: 0.6;"));
    }

    #[test]
    fn markup_characters_are_escaped() {
        let art = grid("<&>", "#ffffff #ffffff #ffffff");
        let html = render_html(&art, &HtmlOptions::default());
        assert!(html.contains(">&lt;&amp;&gt;</span>"));
    }

    #[test]
    fn document_is_complete() {
        let art = grid("x", "#101010");
        let html = render_html(&art, &HtmlOptions::default());
        assert!(html.starts_with("<!DOCTYPE html><html lang='en'><head>"));
        assert!(html.ends_with("</div></body></html>"));
    }
}
