//! Core data types shared by generators, the writer and the reader.

use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, NaiveDate, NaiveDateTime, SecondsFormat, Utc};
use serde::{Deserialize, Serialize};

use crate::{Error, Result};

/// Hreflang tag marking the fallback alternate of an entry.
pub const X_DEFAULT_HREFLANG: &str = "x-default";

/// Identifier of a store view in the host platform.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct StoreId(pub u32);

impl fmt::Display for StoreId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl FromStr for StoreId {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        s.trim()
            .parse::<u32>()
            .map(Self)
            .map_err(|_| Error::Parse(format!("Invalid store id: {s}")))
    }
}

/// Change frequency hints from sitemap.
///
/// These values indicate how frequently a page is likely to change,
/// though search engines may not follow these hints strictly.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ChangeFrequency {
    /// The page changes every time it is accessed.
    Always,
    /// The page changes hourly.
    Hourly,
    /// The page changes daily.
    Daily,
    /// The page changes weekly.
    #[default]
    Weekly,
    /// The page changes monthly.
    Monthly,
    /// The page changes yearly.
    Yearly,
    /// The page is archived and will not change.
    Never,
}

impl ChangeFrequency {
    /// Every value in protocol order.
    pub const ALL: [Self; 7] = [
        Self::Always,
        Self::Hourly,
        Self::Daily,
        Self::Weekly,
        Self::Monthly,
        Self::Yearly,
        Self::Never,
    ];

    /// The value as written into `<changefreq>`.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Always => "always",
            Self::Hourly => "hourly",
            Self::Daily => "daily",
            Self::Weekly => "weekly",
            Self::Monthly => "monthly",
            Self::Yearly => "yearly",
            Self::Never => "never",
        }
    }
}

impl fmt::Display for ChangeFrequency {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ChangeFrequency {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_lowercase().as_str() {
            "always" => Ok(Self::Always),
            "hourly" => Ok(Self::Hourly),
            "daily" => Ok(Self::Daily),
            "weekly" => Ok(Self::Weekly),
            "monthly" => Ok(Self::Monthly),
            "yearly" => Ok(Self::Yearly),
            "never" => Ok(Self::Never),
            _ => Err(Error::Parse(format!("Invalid changefreq value: {s}"))),
        }
    }
}

/// Sitemap priority: a decimal string in `0.0..=1.0`.
///
/// The configured text is kept verbatim (after trimming) so `"0.50"` is
/// written back as `0.50`.
///
/// ```rust
/// use seomap_core::Priority;
///
/// let p: Priority = "0.8".parse()?;
/// assert_eq!(p.as_str(), "0.8");
/// assert!("1.5".parse::<Priority>().is_err());
/// # Ok::<(), seomap_core::Error>(())
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Priority(String);

impl Priority {
    /// Priority used for the store home page.
    #[must_use]
    pub fn highest() -> Self {
        Self("1.0".to_string())
    }

    /// The priority text.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl Default for Priority {
    fn default() -> Self {
        Self("0.5".to_string())
    }
}

impl FromStr for Priority {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        let trimmed = s.trim();
        let not_decimal = || Error::Config(format!("Invalid priority '{s}': not a decimal"));
        if !is_plain_decimal(trimmed) {
            return Err(not_decimal());
        }
        let value: f64 = trimmed.parse().map_err(|_| not_decimal())?;
        if !(0.0..=1.0).contains(&value) {
            return Err(Error::Config(format!(
                "Invalid priority '{s}': must be between 0.0 and 1.0"
            )));
        }
        Ok(Self(trimmed.to_string()))
    }
}

/// Unsigned `xsd:decimal` text: `1`, `0.5` or `.5`. No sign, no exponent.
fn is_plain_decimal(text: &str) -> bool {
    let (whole, fraction) = text.split_once('.').unwrap_or((text, ""));
    let all_digits = |part: &str| part.bytes().all(|b| b.is_ascii_digit());
    let has_fraction = text.contains('.');
    all_digits(whole)
        && all_digits(fraction)
        && !(whole.is_empty() && fraction.is_empty())
        && !(has_fraction && fraction.is_empty())
}

impl TryFrom<String> for Priority {
    type Error = Error;

    fn try_from(value: String) -> Result<Self> {
        value.parse()
    }
}

impl From<Priority> for String {
    fn from(value: Priority) -> Self {
        value.0
    }
}

impl fmt::Display for Priority {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// An image attached to a sitemap entry (`<image:image>`).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ImageLink {
    /// Absolute image URL.
    pub url: String,
    /// Image title, usually the entity name.
    pub title: Option<String>,
}

/// A video attached to a sitemap entry (`<video:video>`).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct VideoLink {
    /// Thumbnail image URL.
    pub thumbnail_url: String,
    /// Video title.
    pub title: String,
    /// Video description.
    pub description: String,
    /// Embeddable player URL.
    #[serde(default)]
    pub player_url: Option<String>,
}

/// A per-locale equivalent of an entry (`<xhtml:link rel="alternate">`).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AlternateLink {
    /// Hreflang tag such as `en-us` or `x-default`.
    pub hreflang: String,
    /// Equivalent URL in that locale's store.
    pub href: String,
}

/// One discoverable URL in a leaf sitemap.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SitemapEntry {
    /// Absolute URL of the page. Never empty for generated entries.
    pub location: String,
    /// Last modification time.
    pub last_modified: Option<DateTime<Utc>>,
    /// How frequently the page changes.
    pub change_frequency: Option<ChangeFrequency>,
    /// Priority relative to other URLs of the site.
    pub priority: Option<Priority>,
    /// Attached images, in order.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub images: Vec<ImageLink>,
    /// Attached videos, in order.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub videos: Vec<VideoLink>,
    /// Hreflang alternates, in order.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub alternate_links: Vec<AlternateLink>,
}

impl SitemapEntry {
    /// Create an entry with only a location.
    #[must_use]
    pub const fn new(location: String) -> Self {
        Self {
            location,
            last_modified: None,
            change_frequency: None,
            priority: None,
            images: Vec::new(),
            videos: Vec::new(),
            alternate_links: Vec::new(),
        }
    }

    /// Set the last modification time.
    #[must_use]
    pub const fn with_last_modified(mut self, last_modified: DateTime<Utc>) -> Self {
        self.last_modified = Some(last_modified);
        self
    }

    /// Set the change frequency.
    #[must_use]
    pub const fn with_change_frequency(mut self, change_frequency: ChangeFrequency) -> Self {
        self.change_frequency = Some(change_frequency);
        self
    }

    /// Set the priority.
    #[must_use]
    pub fn with_priority(mut self, priority: Priority) -> Self {
        self.priority = Some(priority);
        self
    }

    /// Attach images.
    #[must_use]
    pub fn with_images(mut self, images: Vec<ImageLink>) -> Self {
        self.images = images;
        self
    }

    /// Attach videos.
    #[must_use]
    pub fn with_videos(mut self, videos: Vec<VideoLink>) -> Self {
        self.videos = videos;
        self
    }

    /// Attach hreflang alternates.
    #[must_use]
    pub fn with_alternate_links(mut self, alternate_links: Vec<AlternateLink>) -> Self {
        self.alternate_links = alternate_links;
        self
    }
}

/// A written leaf sitemap and how many entries it holds.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LeafFile {
    /// File name relative to the public directory.
    pub filename: String,
    /// Number of `<url>` elements in the file.
    pub entry_count: usize,
}

/// Files produced for one store by one generation run.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SitemapFileSet {
    /// The sitemap index, absent when no leaf was written.
    pub index_file: Option<String>,
    /// Leaf sitemaps in generation order.
    pub leaf_files: Vec<LeafFile>,
}

impl SitemapFileSet {
    /// All file names: leaves in order, then the index.
    #[must_use]
    pub fn filenames(&self) -> Vec<String> {
        self.leaf_files
            .iter()
            .map(|leaf| leaf.filename.clone())
            .chain(self.index_file.iter().cloned())
            .collect()
    }

    /// Whether the run produced nothing.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.leaf_files.is_empty() && self.index_file.is_none()
    }

    /// Total number of entries across all leaves.
    #[must_use]
    pub fn total_entries(&self) -> usize {
        self.leaf_files.iter().map(|leaf| leaf.entry_count).sum()
    }
}

/// Convert a locale code to an hreflang tag (`en_US` becomes `en-us`).
#[must_use]
pub fn locale_to_hreflang(locale: &str) -> String {
    locale.trim().to_lowercase().replace('_', "-")
}

/// Format a timestamp the way `<lastmod>` carries it (`2024-01-15T10:30:00+00:00`).
#[must_use]
pub fn format_timestamp(ts: &DateTime<Utc>) -> String {
    ts.to_rfc3339_opts(SecondsFormat::Secs, false)
}

/// Parse a timestamp from a catalog or sitemap.
///
/// Supports multiple formats:
/// - `2024-01-15 10:30:00` (database datetime, taken as UTC)
/// - `2024-01-15` (date only)
/// - `2024-01-15T10:30:00Z` / `2024-01-15T10:30:00+02:00`
/// - `2024-01-15T10:30:00` and `2024-01-15T10:30:00.000` (taken as UTC)
#[must_use]
pub fn parse_timestamp(s: &str) -> Option<DateTime<Utc>> {
    let s = s.trim();
    if s.is_empty() {
        return None;
    }

    if let Ok(dt) = DateTime::parse_from_rfc3339(s) {
        return Some(dt.with_timezone(&Utc));
    }

    for format in [
        "%Y-%m-%d %H:%M:%S",
        "%Y-%m-%dT%H:%M:%S",
        "%Y-%m-%dT%H:%M:%S%.f",
    ] {
        if let Ok(dt) = NaiveDateTime::parse_from_str(s, format) {
            return Some(dt.and_utc());
        }
    }

    if let Ok(date) = NaiveDate::parse_from_str(s, "%Y-%m-%d") {
        return Some(date.and_hms_opt(0, 0, 0)?.and_utc());
    }

    tracing::debug!(date_str = %s, "Could not parse timestamp");
    None
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_changefreq_round_trips_through_str() {
        for freq in ChangeFrequency::ALL {
            assert_eq!(freq.as_str().parse::<ChangeFrequency>().unwrap(), freq);
        }
        assert_eq!(
            "DAILY".parse::<ChangeFrequency>().unwrap(),
            ChangeFrequency::Daily
        );
        assert!("fortnightly".parse::<ChangeFrequency>().is_err());
    }

    #[test]
    fn test_priority_bounds() {
        assert_eq!("0.0".parse::<Priority>().unwrap().as_str(), "0.0");
        assert_eq!(" 1 ".parse::<Priority>().unwrap().as_str(), "1");
        assert!("-0.1".parse::<Priority>().is_err());
        assert!("1.01".parse::<Priority>().is_err());
        assert!("high".parse::<Priority>().is_err());
        assert_eq!(".5".parse::<Priority>().unwrap().as_str(), ".5");
        for text in ["1e-1", "5E-1", "+0.5", "0.", "inf", ""] {
            assert!(text.parse::<Priority>().is_err(), "accepted {text:?}");
        }
        assert_eq!(Priority::default().as_str(), "0.5");
    }

    #[test]
    fn test_priority_deserialize_validates() {
        #[derive(Deserialize)]
        struct Holder {
            priority: Priority,
        }

        let ok: Holder = toml::from_str("priority = \"0.7\"").unwrap();
        assert_eq!(ok.priority.as_str(), "0.7");
        assert!(toml::from_str::<Holder>("priority = \"2\"").is_err());
        assert!(toml::from_str::<Holder>("priority = \"1e-1\"").is_err());
    }

    #[test]
    fn test_locale_to_hreflang() {
        assert_eq!(locale_to_hreflang("en_US"), "en-us");
        assert_eq!(locale_to_hreflang("de_DE"), "de-de");
        assert_eq!(locale_to_hreflang("fr"), "fr");
    }

    #[test]
    fn test_parse_timestamp_formats() {
        let db = parse_timestamp("2024-01-15 10:30:00").unwrap();
        assert_eq!(format_timestamp(&db), "2024-01-15T10:30:00+00:00");

        let offset = parse_timestamp("2024-01-15T12:30:00+02:00").unwrap();
        assert_eq!(format_timestamp(&offset), "2024-01-15T10:30:00+00:00");

        let date = parse_timestamp("2024-01-15").unwrap();
        assert_eq!(format_timestamp(&date), "2024-01-15T00:00:00+00:00");

        assert!(parse_timestamp("2024-01-15T10:30:00.123Z").is_some());
        assert!(parse_timestamp("").is_none());
        assert!(parse_timestamp("yesterday").is_none());
    }

    #[test]
    fn test_file_set_filenames_put_index_last() {
        let set = SitemapFileSet {
            index_file: Some("default-sitemap.xml".into()),
            leaf_files: vec![
                LeafFile {
                    filename: "default-sitemap-products.xml".into(),
                    entry_count: 3,
                },
                LeafFile {
                    filename: "default-sitemap-cms.xml".into(),
                    entry_count: 2,
                },
            ],
        };

        assert_eq!(
            set.filenames(),
            vec![
                "default-sitemap-products.xml",
                "default-sitemap-cms.xml",
                "default-sitemap.xml"
            ]
        );
        assert_eq!(set.total_entries(), 5);
        assert!(!set.is_empty());
        assert!(SitemapFileSet::default().is_empty());
    }
}
