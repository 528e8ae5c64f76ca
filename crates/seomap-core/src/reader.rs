//! Sitemap XML parsing.
//!
//! Reads generated documents back: a `urlset` becomes a list of
//! [`SitemapEntry`] values (including images, videos and hreflang
//! alternates), a `sitemapindex` becomes a list of [`IndexRef`] values.
//!
//! ```
//! use seomap_core::reader::{SitemapDocument, parse_sitemap};
//!
//! let xml = r#"<?xml version="1.0" encoding="UTF-8"?>
//! <urlset xmlns="http://www.sitemaps.org/schemas/sitemap/0.9">
//!   <url>
//!     <loc>https://example.com/page1</loc>
//!     <lastmod>2024-01-15</lastmod>
//!   </url>
//! </urlset>"#;
//!
//! let SitemapDocument::UrlSet(entries) = parse_sitemap(xml)? else {
//!     unreachable!()
//! };
//! assert_eq!(entries[0].location, "https://example.com/page1");
//! # Ok::<(), seomap_core::Error>(())
//! ```

use std::fs;
use std::path::Path;

use chrono::{DateTime, Utc};
use quick_xml::Reader;
use quick_xml::events::{BytesStart, Event};
use serde::{Deserialize, Serialize};
use tracing::instrument;

use crate::types::{AlternateLink, ImageLink, SitemapEntry, VideoLink, parse_timestamp};
use crate::{Error, Result};

/// One `<sitemap>` reference in a sitemap index.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct IndexRef {
    /// URL of the leaf sitemap.
    pub location: String,
    /// Last modification date.
    pub last_modified: Option<DateTime<Utc>>,
}

/// A parsed sitemap document.
#[derive(Debug, Clone, PartialEq)]
pub enum SitemapDocument {
    /// `<urlset>` with its entries.
    UrlSet(Vec<SitemapEntry>),
    /// `<sitemapindex>` with its references.
    Index(Vec<IndexRef>),
}

impl SitemapDocument {
    /// Number of `<url>` or `<sitemap>` elements.
    #[must_use]
    pub fn len(&self) -> usize {
        match self {
            Self::UrlSet(entries) => entries.len(),
            Self::Index(refs) => refs.len(),
        }
    }

    /// Whether the document lists nothing.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// Read and parse a sitemap file.
///
/// # Errors
///
/// Returns an error if the file cannot be read or is not sitemap XML.
pub fn read_sitemap(path: &Path) -> Result<SitemapDocument> {
    let xml = fs::read_to_string(path)?;
    parse_sitemap(&xml)
}

/// Parse a sitemap or sitemap index document.
///
/// # Errors
///
/// Returns [`Error::Parse`] if the XML is malformed or the root element is
/// neither `urlset` nor `sitemapindex`.
#[instrument(skip(xml), fields(xml_len = xml.len()))]
pub fn parse_sitemap(xml: &str) -> Result<SitemapDocument> {
    let mut reader = Reader::from_str(xml);
    reader.config_mut().trim_text(true);
    let mut buf = Vec::new();

    loop {
        match reader.read_event_into(&mut buf) {
            Ok(Event::Start(e)) => {
                return match e.local_name().as_ref() {
                    b"urlset" => parse_urlset(&mut reader),
                    b"sitemapindex" => parse_index(&mut reader),
                    other => Err(Error::Parse(format!(
                        "Unexpected root element <{}>",
                        String::from_utf8_lossy(other)
                    ))),
                };
            },
            Ok(Event::Eof) => return Err(Error::Parse("Empty sitemap document".to_string())),
            Err(e) => return Err(Error::Parse(format!("XML parse error: {e}"))),
            _ => {},
        }
        buf.clear();
    }
}

/// Field currently collecting text.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Field {
    Loc,
    LastMod,
    ChangeFreq,
    Priority,
    ImageLoc,
    ImageTitle,
    VideoThumbnail,
    VideoTitle,
    VideoDescription,
    VideoPlayer,
}

impl Field {
    fn from_name(name: &[u8]) -> Option<Self> {
        Some(match name {
            b"loc" => Self::Loc,
            b"lastmod" => Self::LastMod,
            b"changefreq" => Self::ChangeFreq,
            b"priority" => Self::Priority,
            b"image:loc" => Self::ImageLoc,
            b"image:title" => Self::ImageTitle,
            b"video:thumbnail_loc" => Self::VideoThumbnail,
            b"video:title" => Self::VideoTitle,
            b"video:description" => Self::VideoDescription,
            b"video:player_loc" => Self::VideoPlayer,
            _ => return None,
        })
    }
}

fn empty_video() -> VideoLink {
    VideoLink {
        thumbnail_url: String::new(),
        title: String::new(),
        description: String::new(),
        player_url: None,
    }
}

fn alternate_link(e: &BytesStart<'_>) -> Result<Option<AlternateLink>> {
    let mut hreflang = None;
    let mut href = None;
    for attr in e.attributes() {
        let attr = attr.map_err(|e| Error::Parse(e.to_string()))?;
        let value = attr
            .unescape_value()
            .map_err(|e| Error::Parse(e.to_string()))?
            .into_owned();
        match attr.key.as_ref() {
            b"hreflang" => hreflang = Some(value),
            b"href" => href = Some(value),
            _ => {},
        }
    }
    Ok(hreflang.zip(href).map(|(hreflang, href)| AlternateLink { hreflang, href }))
}

fn parse_urlset(reader: &mut Reader<&[u8]>) -> Result<SitemapDocument> {
    let mut entries = Vec::new();
    let mut buf = Vec::new();

    let mut current: Option<SitemapEntry> = None;
    let mut image: Option<ImageLink> = None;
    let mut video: Option<VideoLink> = None;
    let mut field: Option<Field> = None;

    loop {
        match reader.read_event_into(&mut buf) {
            Ok(Event::Start(e)) => match e.name().as_ref() {
                b"url" => current = Some(SitemapEntry::new(String::new())),
                b"image:image" => {
                    image = Some(ImageLink {
                        url: String::new(),
                        title: None,
                    });
                },
                b"video:video" => video = Some(empty_video()),
                name => field = Field::from_name(name),
            },
            Ok(Event::Empty(e)) => {
                if e.name().as_ref() == b"xhtml:link" {
                    if let (Some(entry), Some(link)) = (current.as_mut(), alternate_link(&e)?) {
                        entry.alternate_links.push(link);
                    }
                }
            },
            Ok(Event::End(e)) => {
                match e.name().as_ref() {
                    b"url" => {
                        if let Some(entry) = current.take().filter(|e| !e.location.is_empty()) {
                            entries.push(entry);
                        }
                    },
                    b"image:image" => {
                        if let (Some(entry), Some(image)) = (current.as_mut(), image.take()) {
                            entry.images.push(image);
                        }
                    },
                    b"video:video" => {
                        if let (Some(entry), Some(video)) = (current.as_mut(), video.take()) {
                            entry.videos.push(video);
                        }
                    },
                    _ => {},
                }
                field = None;
            },
            Ok(Event::Text(e)) => {
                if let (Some(entry), Some(f)) = (current.as_mut(), field) {
                    let text = e.unescape().map_err(|e| Error::Parse(e.to_string()))?;
                    let text = text.trim().to_string();
                    match f {
                        Field::Loc => entry.location = text,
                        Field::LastMod => entry.last_modified = parse_timestamp(&text),
                        Field::ChangeFreq => entry.change_frequency = text.parse().ok(),
                        Field::Priority => entry.priority = text.parse().ok(),
                        Field::ImageLoc => {
                            if let Some(image) = image.as_mut() {
                                image.url = text;
                            }
                        },
                        Field::ImageTitle => {
                            if let Some(image) = image.as_mut() {
                                image.title = Some(text);
                            }
                        },
                        Field::VideoThumbnail => {
                            if let Some(video) = video.as_mut() {
                                video.thumbnail_url = text;
                            }
                        },
                        Field::VideoTitle => {
                            if let Some(video) = video.as_mut() {
                                video.title = text;
                            }
                        },
                        Field::VideoDescription => {
                            if let Some(video) = video.as_mut() {
                                video.description = text;
                            }
                        },
                        Field::VideoPlayer => {
                            if let Some(video) = video.as_mut() {
                                video.player_url = Some(text);
                            }
                        },
                    }
                }
            },
            Ok(Event::Eof) => break,
            Err(e) => return Err(Error::Parse(format!("XML parse error: {e}"))),
            _ => {},
        }
        buf.clear();
    }

    Ok(SitemapDocument::UrlSet(entries))
}

fn parse_index(reader: &mut Reader<&[u8]>) -> Result<SitemapDocument> {
    let mut refs = Vec::new();
    let mut buf = Vec::new();

    let mut current: Option<IndexRef> = None;
    let mut field: Option<Field> = None;

    loop {
        match reader.read_event_into(&mut buf) {
            Ok(Event::Start(e)) => match e.local_name().as_ref() {
                b"sitemap" => {
                    current = Some(IndexRef {
                        location: String::new(),
                        last_modified: None,
                    });
                },
                name => field = Field::from_name(name),
            },
            Ok(Event::End(e)) => {
                if e.local_name().as_ref() == b"sitemap" {
                    if let Some(reference) = current.take().filter(|r| !r.location.is_empty()) {
                        refs.push(reference);
                    }
                }
                field = None;
            },
            Ok(Event::Text(e)) => {
                if let Some(reference) = current.as_mut() {
                    let text = e.unescape().map_err(|e| Error::Parse(e.to_string()))?;
                    let text = text.trim();
                    match field {
                        Some(Field::Loc) => reference.location = text.to_string(),
                        Some(Field::LastMod) => reference.last_modified = parse_timestamp(text),
                        _ => {},
                    }
                }
            },
            Ok(Event::Eof) => break,
            Err(e) => return Err(Error::Parse(format!("XML parse error: {e}"))),
            _ => {},
        }
        buf.clear();
    }

    Ok(SitemapDocument::Index(refs))
}
