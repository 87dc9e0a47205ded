//! Server-side HTML for the search page.

use crate::image::data_uri;
use crate::results::card::{IMAGE_FAILED, NO_IMAGE};
use crate::results::filter::ALL;
use crate::results::{Card, FilterSelection, ImageSlot, ResultsView, CRAVING_MESSAGE};
use crate::search::MAX_QUERY_CHARS;
use crate::types::{ChoiceField, TagField};

const STYLE: &str = r#"
body { font-family: sans-serif; margin: 0; }
.title { font-size: 30px; font-weight: bold; color: #FF4B4B; text-align: center; }
.search-bar { display: flex; justify-content: center; margin-bottom: 10px; }
.search-bar input[type=text] { width: 70%; padding: 8px; }
.layout { display: flex; gap: 16px; padding: 0 16px; }
.sidebar { width: 260px; flex-shrink: 0; }
.sidebar label { display: block; margin-top: 8px; font-weight: bold; }
.sidebar select, .sidebar input { width: 100%; }
.main { flex-grow: 1; }
.grid-row { display: grid; gap: 12px; margin-bottom: 12px; }
.card { border: 1px solid #ddd; border-radius: 6px; padding: 8px; }
.error { color: #b00020; }
.banner { background: #fdecea; color: #b00020; padding: 10px; margin: 0 16px 10px; }
.muted { color: #777; }
"#;

pub enum Body<'a> {
    /// No query yet.
    Landing,
    /// The whole request failed.
    Error(&'a str),
    Craving,
    Results(&'a ResultsView),
}

pub struct Page<'a> {
    pub query: Option<&'a str>,
    pub selection: &'a FilterSelection,
    pub body: Body<'a>,
    pub columns: usize,
    pub image_width: u32,
}

pub fn render(page: &Page<'_>) -> String {
    let mut out = String::with_capacity(16 * 1024);
    out.push_str("<!DOCTYPE html>\n<html><head><meta charset=\"utf-8\">");
    out.push_str("<title>Crispy Vector Search</title>");
    out.push_str(&format!("<style>{STYLE}</style></head><body>"));
    out.push_str("<p class=\"title\">Crispy Vector Search</p>");

    out.push_str(&format!(
        "<form class=\"search-bar\" method=\"get\" action=\"/\">\
         <input type=\"text\" name=\"q\" maxlength=\"{}\" placeholder=\"Pick a dish you love!\" value=\"{}\" autofocus>\
         </form>",
        MAX_QUERY_CHARS,
        escape(page.query.unwrap_or_default())
    ));

    match &page.body {
        Body::Landing => {}
        Body::Error(message) => {
            out.push_str(&format!("<div class=\"banner\">{}</div>", escape(message)));
        }
        Body::Craving => {
            out.push_str(&format!("<p class=\"muted\" style=\"text-align:center\">{CRAVING_MESSAGE}</p>"));
        }
        Body::Results(view) => {
            out.push_str("<div class=\"layout\">");
            render_sidebar(&mut out, page, view);
            out.push_str("<div class=\"main\">");
            render_grid(&mut out, view, page.columns, page.image_width);
            out.push_str("</div></div>");
        }
    }

    out.push_str("</body></html>");
    out
}

fn render_sidebar(out: &mut String, page: &Page<'_>, view: &ResultsView) {
    out.push_str("<form class=\"sidebar\" method=\"get\" action=\"/\"><h3>Filters</h3>");
    out.push_str(&format!(
        "<input type=\"hidden\" name=\"q\" value=\"{}\">",
        escape(page.query.unwrap_or_default())
    ));

    if let Some(r) = view.rating {
        let min = page.selection.min_rating.unwrap_or(r.min);
        let max = page.selection.max_rating.unwrap_or(r.max);
        out.push_str("<label>Restaurant Rating</label>");
        out.push_str(&format!(
            "<input type=\"number\" name=\"min_rating\" step=\"any\" min=\"{}\" max=\"{}\" value=\"{}\">\
             <input type=\"number\" name=\"max_rating\" step=\"any\" min=\"{}\" max=\"{}\" value=\"{}\">",
            r.min, r.max, min, r.min, r.max, max
        ));
    }

    for field in TagField::ALL {
        let options = view.options.tags.get(&field).map(Vec::as_slice).unwrap_or(&[]);
        let selected = page.selection.tag_values(field);
        out.push_str(&format!(
            "<label>Select {}</label><select multiple name=\"{}\">",
            field.label(),
            field.param()
        ));
        for value in options {
            let mark = if selected.contains(value) { " selected" } else { "" };
            out.push_str(&format!(
                "<option value=\"{0}\"{1}>{0}</option>",
                escape(value),
                mark
            ));
        }
        out.push_str("</select>");
    }

    for field in ChoiceField::ALL {
        let options = view.options.choices.get(&field).map(Vec::as_slice).unwrap_or(&[]);
        let current = page.selection.choice_value(field);
        out.push_str(&format!(
            "<label>{}</label><select name=\"{}\"><option value=\"{ALL}\">{ALL}</option>",
            field.label(),
            field.param()
        ));
        for value in options {
            let mark = if value == current { " selected" } else { "" };
            out.push_str(&format!(
                "<option value=\"{0}\"{1}>{0}</option>",
                escape(value),
                mark
            ));
        }
        out.push_str("</select>");
    }

    out.push_str("<p><button type=\"submit\">Apply filters</button></p></form>");
}

fn render_grid(out: &mut String, view: &ResultsView, columns: usize, image_width: u32) {
    out.push_str(&format!(
        "<p class=\"muted\">Showing {} of {} results</p>",
        view.count, view.total
    ));
    for row in &view.rows {
        out.push_str(&format!(
            "<div class=\"grid-row\" style=\"grid-template-columns: repeat({}, 1fr)\">",
            columns.max(1)
        ));
        for card in row {
            render_card(out, card, image_width);
        }
        out.push_str("</div>");
    }
}

fn render_card(out: &mut String, card: &Card, image_width: u32) {
    out.push_str(&format!(
        "<details class=\"card\"><summary>{}</summary>",
        escape(&card.summary)
    ));

    match &card.link {
        Some(link) => out.push_str(&format!(
            "<p><a href=\"{}\" target=\"_blank\" rel=\"noopener\">{}</a></p>",
            escape(&link.url),
            escape(&card.title)
        )),
        None => out.push_str(&format!("<p>{}</p>", escape(&card.title))),
    }

    match &card.image {
        ImageSlot::Loaded { format, data, .. } => out.push_str(&format!(
            "<img src=\"{}\" width=\"{}\" alt=\"{}\">",
            data_uri(*format, data),
            image_width,
            escape(&card.title)
        )),
        ImageSlot::Pending { url } => out.push_str(&format!(
            "<img src=\"{}\" width=\"{}\" alt=\"{}\">",
            escape(url),
            image_width,
            escape(&card.title)
        )),
        ImageSlot::Failed { reason, .. } => out.push_str(&format!(
            "<p class=\"error\">{} ({})</p>",
            IMAGE_FAILED,
            escape(reason)
        )),
        ImageSlot::Unavailable => out.push_str(&format!("<p class=\"muted\">{NO_IMAGE}</p>")),
    }

    for detail in &card.details {
        out.push_str(&format!(
            "<p>{}: {}</p>",
            detail.label,
            escape(&detail.value)
        ));
    }
    out.push_str("</details>");
}

/// Escape text for HTML element content and quoted attributes.
pub fn escape(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    for c in s.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            _ => out.push(c),
        }
    }
    out
}
