//! Page identity for the shared navigation header

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::SiteError;

/// Which page of the site is currently showing.
///
/// Supplied by each page when it renders the header and fixed for the
/// page's lifetime. `None` renders the header without any active entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ActivePage {
    Job,
    Character,
    Faction,
    Monster,
    #[default]
    None,
}

impl ActivePage {
    /// The four pages that have a navigation entry, in header order
    pub const NAV_ORDER: [ActivePage; 4] = [
        ActivePage::Job,
        ActivePage::Character,
        ActivePage::Faction,
        ActivePage::Monster,
    ];

    /// Lenient lookup used by the renderer: anything unrecognized is `None`.
    pub fn from_tag(tag: &str) -> Self {
        tag.parse().unwrap_or(ActivePage::None)
    }

    /// Tag as used in markup classes and on the command line
    pub fn tag(&self) -> &'static str {
        match self {
            ActivePage::Job => "job",
            ActivePage::Character => "character",
            ActivePage::Faction => "faction",
            ActivePage::Monster => "monster",
            ActivePage::None => "none",
        }
    }

    /// Whether this page owns a navigation entry and marker
    pub fn is_nav_page(&self) -> bool {
        !matches!(self, ActivePage::None)
    }

    /// Marker style variant, `None` when no marker should be drawn
    pub fn marker_class(&self) -> Option<String> {
        self.is_nav_page()
            .then(|| format!("nav-active-marker marker-{}", self.tag()))
    }
}

impl fmt::Display for ActivePage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.tag())
    }
}

impl FromStr for ActivePage {
    type Err = SiteError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "job" => Ok(ActivePage::Job),
            "character" => Ok(ActivePage::Character),
            "faction" => Ok(ActivePage::Faction),
            "monster" => Ok(ActivePage::Monster),
            "none" | "" => Ok(ActivePage::None),
            other => Err(SiteError::UnknownPage(other.to_string())),
        }
    }
}
