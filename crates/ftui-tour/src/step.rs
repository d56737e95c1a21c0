#![forbid(unsafe_code)]

//! Author-facing step definitions and their display enums.
//!
//! # Trust boundary
//!
//! Step titles and descriptions are [`TrustedMarkup`]: rich text written by
//! the application author. It is handed to the renderer verbatim. The author
//! already controls everything the application does for its users, so the
//! tour neither escapes nor sanitizes it, and a renderer must not expect it
//! to have been.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Author-controlled rich-text markup, passed through verbatim.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TrustedMarkup(String);

impl TrustedMarkup {
    /// Wrap author markup.
    #[must_use]
    pub fn new(markup: impl Into<String>) -> Self {
        Self(markup.into())
    }

    /// The raw markup.
    #[must_use]
    pub fn as_markup(&self) -> &str {
        &self.0
    }

    /// Whether there is no markup at all.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl From<&str> for TrustedMarkup {
    fn from(markup: &str) -> Self {
        Self::new(markup)
    }
}

impl From<String> for TrustedMarkup {
    fn from(markup: String) -> Self {
        Self(markup)
    }
}

/// Tooltip position relative to the target.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Placement {
    /// Centered on screen (or on the target).
    Center,
    /// Left of the target.
    Left,
    /// Left, aligned to the target's top.
    LeftTop,
    /// Left, aligned to the target's bottom.
    LeftBottom,
    /// Right of the target.
    Right,
    /// Right, aligned to the target's top.
    RightTop,
    /// Right, aligned to the target's bottom.
    RightBottom,
    /// Above the target.
    Top,
    /// Above, aligned to the target's left.
    TopLeft,
    /// Above, aligned to the target's right.
    TopRight,
    /// Below the target.
    Bottom,
    /// Below, aligned to the target's left.
    BottomLeft,
    /// Below, aligned to the target's right.
    BottomRight,
}

impl Placement {
    /// Every placement, in property-panel order.
    pub const ALL: [Self; 13] = [
        Self::Center,
        Self::Left,
        Self::LeftTop,
        Self::LeftBottom,
        Self::Right,
        Self::RightTop,
        Self::RightBottom,
        Self::Top,
        Self::TopLeft,
        Self::TopRight,
        Self::Bottom,
        Self::BottomLeft,
        Self::BottomRight,
    ];

    /// Parse an author string. Empty and unrecognized strings mean "unset".
    #[must_use]
    pub fn parse(raw: &str) -> Option<Self> {
        if raw.is_empty() {
            return None;
        }
        let parsed = Self::ALL.into_iter().find(|p| p.as_str() == raw);
        if parsed.is_none() {
            tracing::debug!(message = "tour.option.unknown", option = "placement", value = raw);
        }
        parsed
    }

    /// Author-facing name.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Center => "center",
            Self::Left => "left",
            Self::LeftTop => "leftTop",
            Self::LeftBottom => "leftBottom",
            Self::Right => "right",
            Self::RightTop => "rightTop",
            Self::RightBottom => "rightBottom",
            Self::Top => "top",
            Self::TopLeft => "topLeft",
            Self::TopRight => "topRight",
            Self::Bottom => "bottom",
            Self::BottomLeft => "bottomLeft",
            Self::BottomRight => "bottomRight",
        }
    }
}

impl fmt::Display for Placement {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Visual variant of the tour panel.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TourType {
    /// Neutral panel.
    Default,
    /// Accent-colored panel.
    Primary,
}

impl TourType {
    /// Parse an author string. Empty and unrecognized strings mean "unset".
    #[must_use]
    pub fn parse(raw: &str) -> Option<Self> {
        match raw {
            "" => None,
            "default" => Some(Self::Default),
            "primary" => Some(Self::Primary),
            other => {
                tracing::debug!(message = "tour.option.unknown", option = "type", value = other);
                None
            }
        }
    }

    /// Author-facing name.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Default => "default",
            Self::Primary => "primary",
        }
    }
}

impl fmt::Display for TourType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Cover image shown above a step's description.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CoverImage {
    /// Image URL, as written by the author.
    pub src: String,
}

impl CoverImage {
    /// Image for a non-empty URL; an empty URL means no cover.
    #[must_use]
    pub fn from_url(url: Option<&str>) -> Option<Self> {
        url.filter(|u| !u.is_empty())
            .map(|u| Self { src: u.to_owned() })
    }
}

/// One authored tour step, as edited in the property panel.
///
/// `placement` and `step_type` hold the raw author strings; an empty string
/// is the "unset" sentinel.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct StepConfig {
    /// Name of the element to highlight. May be empty or dangling.
    pub target: String,
    /// Step title markup.
    pub title: TrustedMarkup,
    /// Step body markup.
    pub description: TrustedMarkup,
    /// Show the directional pointer.
    pub arrow: bool,
    /// Tooltip placement, or "" for the renderer default.
    pub placement: String,
    /// Dim the background.
    pub mask: bool,
    /// Optional cover image URL.
    pub cover: Option<String>,
    /// Visual variant, or "" for the renderer default.
    #[serde(rename = "type")]
    pub step_type: String,
}

impl Default for StepConfig {
    fn default() -> Self {
        Self {
            target: String::new(),
            title: TrustedMarkup::default(),
            description: TrustedMarkup::default(),
            arrow: true,
            placement: String::new(),
            mask: true,
            cover: None,
            step_type: String::new(),
        }
    }
}

impl StepConfig {
    /// Step pointing at the named element.
    #[must_use]
    pub fn new(target: impl Into<String>) -> Self {
        Self {
            target: target.into(),
            ..Self::default()
        }
    }

    /// Set the title markup.
    #[must_use]
    pub fn title(mut self, title: impl Into<TrustedMarkup>) -> Self {
        self.title = title.into();
        self
    }

    /// Set the description markup.
    #[must_use]
    pub fn description(mut self, description: impl Into<TrustedMarkup>) -> Self {
        self.description = description.into();
        self
    }

    /// Set the raw placement string.
    #[must_use]
    pub fn placement(mut self, placement: impl Into<String>) -> Self {
        self.placement = placement.into();
        self
    }

    /// Set the raw type string.
    #[must_use]
    pub fn step_type(mut self, step_type: impl Into<String>) -> Self {
        self.step_type = step_type.into();
        self
    }

    /// Set whether the arrow is shown.
    #[must_use]
    pub fn arrow(mut self, arrow: bool) -> Self {
        self.arrow = arrow;
        self
    }

    /// Set whether the background is dimmed.
    #[must_use]
    pub fn mask(mut self, mask: bool) -> Self {
        self.mask = mask;
        self
    }

    /// Set the cover image URL.
    #[must_use]
    pub fn cover(mut self, url: impl Into<String>) -> Self {
        self.cover = Some(url.into());
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn placement_parse_round_trips_names() {
        for p in Placement::ALL {
            assert_eq!(Placement::parse(p.as_str()), Some(p));
        }
    }

    #[test]
    fn placement_empty_and_unknown_are_unset() {
        assert_eq!(Placement::parse(""), None);
        assert_eq!(Placement::parse("sideways"), None);
        assert_eq!(Placement::parse("Top"), None);
    }

    #[test]
    fn tour_type_parse() {
        assert_eq!(TourType::parse("primary"), Some(TourType::Primary));
        assert_eq!(TourType::parse("default"), Some(TourType::Default));
        assert_eq!(TourType::parse(""), None);
        assert_eq!(TourType::parse("loud"), None);
        assert_eq!(TourType::Primary.to_string(), "primary");
    }

    #[test]
    fn cover_requires_non_empty_url() {
        assert_eq!(CoverImage::from_url(None), None);
        assert_eq!(CoverImage::from_url(Some("")), None);
        assert_eq!(
            CoverImage::from_url(Some("https://img.example/a.png")),
            Some(CoverImage {
                src: "https://img.example/a.png".into()
            })
        );
    }

    #[test]
    fn markup_is_kept_verbatim() {
        let raw = "<b onmouseover=\"alert(1)\">Hi</b>";
        assert_eq!(TrustedMarkup::from(raw).as_markup(), raw);
    }

    #[test]
    fn step_defaults_show_arrow_and_mask() {
        let step = StepConfig::new("btn1");
        assert!(step.arrow);
        assert!(step.mask);
        assert!(step.placement.is_empty());
        assert!(step.cover.is_none());
    }

    #[test]
    fn step_deserializes_author_json() {
        let step: StepConfig = serde_json::from_str(
            r#"{"target":"btn1","title":"<b>Hi</b>","placement":"","type":"primary","arrow":false}"#,
        )
        .expect("valid step json");
        assert_eq!(step.target, "btn1");
        assert_eq!(step.title.as_markup(), "<b>Hi</b>");
        assert_eq!(step.step_type, "primary");
        assert!(!step.arrow);
        assert!(step.mask);
    }
}
