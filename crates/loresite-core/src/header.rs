//! Shared navigation header
//!
//! Every page renders the same header at parse time, differing only in which
//! entry is highlighted:
//!
//! ```text
//! ┌──────────────────────────────────────────────────────────────┐
//! │ [logo]  ▼marker   파티원  주요인물  세력  몬스터      [play] │
//! └──────────────────────────────────────────────────────────────┘
//! ```
//!
//! The logo and entries navigate in the same tab; play opens the external
//! game link in a new one.

use serde::{Deserialize, Serialize};

use crate::error::{SiteError, SiteResult};
use crate::page::ActivePage;

/// One navigation entry in the header
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NavEntry {
    pub page: ActivePage,
    pub label: String,
    pub href: String,
}

impl NavEntry {
    fn new(page: ActivePage, label: &str, href: &str) -> Self {
        Self {
            page,
            label: label.to_string(),
            href: href.to_string(),
        }
    }
}

/// Fixed data the header is rendered from.
///
/// `Default` is the live site; the CLI can load an alternative from JSON.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct HeaderTemplate {
    pub logo_src: String,
    pub home_href: String,
    pub play_src: String,
    pub play_url: String,
    pub entries: Vec<NavEntry>,
}

impl Default for HeaderTemplate {
    fn default() -> Self {
        Self {
            logo_src: "img/로고.png".to_string(),
            home_href: "index.html".to_string(),
            play_src: "img/플레이.png".to_string(),
            play_url: "https://share.crack.wrtn.ai/v3snwy".to_string(),
            entries: vec![
                NavEntry::new(ActivePage::Job, "파티원", "party.html"),
                NavEntry::new(ActivePage::Character, "주요인물", "key figures.html"),
                NavEntry::new(ActivePage::Faction, "세력", "faction.html"),
                NavEntry::new(ActivePage::Monster, "몬스터", "monster.html"),
            ],
        }
    }
}

impl HeaderTemplate {
    /// Render the header fragment for `active`.
    pub fn render(&self, active: ActivePage) -> String {
        let mut html = String::from("<div class=\"header\">\n");

        html.push_str(&format!(
            "    <img class=\"logo\" src=\"{}\" alt=\"Logo\" onclick=\"{}\" />\n",
            escape_html(&self.logo_src),
            escape_html(&navigate_script(&self.home_href)),
        ));

        if let Some(marker) = active.marker_class() {
            html.push_str(&format!("    <div class=\"{}\"></div>\n", marker));
        }

        for entry in &self.entries {
            let class = if entry.page.is_nav_page() && entry.page == active {
                format!("nav-item {} active", entry.page.tag())
            } else {
                format!("nav-item {}", entry.page.tag())
            };
            html.push_str(&format!(
                "    <div class=\"{}\" onclick=\"{}\">{}</div>\n",
                class,
                escape_html(&navigate_script(&entry.href)),
                escape_html(&entry.label),
            ));
        }

        html.push_str(&format!(
            "    <img class=\"play-btn-img\" src=\"{}\" alt=\"Play\" onclick=\"{}\" />\n",
            escape_html(&self.play_src),
            escape_html(&format!(
                "window.open('{}', '_blank')",
                escape_js(&self.play_url)
            )),
        ));

        html.push_str("</div>\n");
        html
    }
}

/// Render the live site's header for `active`.
pub fn render_header(active: ActivePage) -> String {
    HeaderTemplate::default().render(active)
}

/// Marker a static page uses where the header should be pre-rendered
pub const HEADER_PLACEHOLDER: &str = "<!-- loresite:header -->";

/// Replace every header placeholder in `page` with `fragment`.
pub fn inject_header(page: &str, fragment: &str) -> SiteResult<String> {
    if !page.contains(HEADER_PLACEHOLDER) {
        return Err(SiteError::MissingPlaceholder(HEADER_PLACEHOLDER.to_string()));
    }
    Ok(page.replace(HEADER_PLACEHOLDER, fragment.trim_end()))
}

fn navigate_script(href: &str) -> String {
    format!("window.location.href='{}'", escape_js(href))
}

fn escape_js(value: &str) -> String {
    value.replace('\\', "\\\\").replace('\'', "\\'")
}

/// Escape text for use in element content or a double-quoted attribute.
pub fn escape_html(value: &str) -> String {
    let mut out = String::with_capacity(value.len());
    for c in value.chars() {
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
