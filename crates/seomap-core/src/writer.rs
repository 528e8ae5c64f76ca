//! Sitemap XML writer.
//!
//! Serializes entries into leaf `urlset` documents bounded by
//! `max_urls_per_sitemap`, and a `sitemapindex` document referencing every
//! leaf written for a store.
//!
//! Chunk boundaries are positional: entries keep their input order, and
//! reading the leaves back in part order reproduces the input sequence. A
//! single chunk is written without a part suffix; multiple chunks are
//! numbered from 1.
//!
//! Files are overwritten in place.

use std::fs;
use std::path::{Path, PathBuf};

use chrono::{DateTime, Utc};
use quick_xml::Writer;
use quick_xml::escape::escape;
use quick_xml::events::{BytesDecl, BytesEnd, BytesPI, BytesStart, BytesText, Event};
use tracing::{debug, info};

use crate::context::GenerationContext;
use crate::types::{LeafFile, SitemapEntry, format_timestamp};
use crate::{Error, Result};

/// sitemaps.org namespace.
pub const SITEMAP_NS: &str = "http://www.sitemaps.org/schemas/sitemap/0.9";
/// Google image extension namespace.
pub const IMAGE_NS: &str = "http://www.google.com/schemas/sitemap-image/1.1";
/// Google video extension namespace.
pub const VIDEO_NS: &str = "http://www.google.com/schemas/sitemap-video/1.1";
/// XHTML namespace carrying hreflang alternates.
pub const XHTML_NS: &str = "http://www.w3.org/1999/xhtml";

const INDENT_SIZE: usize = 4;

type XmlWriter = Writer<Vec<u8>>;

/// Writes sitemap files into a public directory.
#[derive(Debug, Clone)]
pub struct SitemapWriter {
    public_dir: PathBuf,
}

impl SitemapWriter {
    /// Create a writer targeting `public_dir`.
    #[must_use]
    pub fn new(public_dir: impl Into<PathBuf>) -> Self {
        Self {
            public_dir: public_dir.into(),
        }
    }

    /// Directory files are written to.
    #[must_use]
    pub fn public_dir(&self) -> &Path {
        &self.public_dir
    }

    /// Write `entries` as one or more `{code}-sitemap-{kind}[-N].xml` files.
    ///
    /// Returns the written leaves in part order. An empty slice writes nothing.
    ///
    /// # Errors
    ///
    /// Returns an error if a document cannot be rendered or written.
    pub fn write_entries(
        &self,
        ctx: &GenerationContext,
        kind: &str,
        entries: &[SitemapEntry],
    ) -> Result<Vec<LeafFile>> {
        if entries.is_empty() {
            return Ok(Vec::new());
        }

        let max = ctx.settings.effective_max_urls();
        let chunk_count = entries.len().div_ceil(max);
        fs::create_dir_all(&self.public_dir)?;

        let mut leaves = Vec::with_capacity(chunk_count);
        for (index, chunk) in entries.chunks(max).enumerate() {
            let part = (chunk_count > 1).then_some(index + 1);
            let filename = ctx.leaf_filename(kind, part);
            let xml = render_urlset(chunk, ctx.xsl_url.as_deref())?;
            fs::write(self.public_dir.join(&filename), xml)?;

            debug!(file = %filename, entries = chunk.len(), "Wrote sitemap");
            leaves.push(LeafFile {
                filename,
                entry_count: chunk.len(),
            });
        }
        Ok(leaves)
    }

    /// Write the sitemap index referencing `leaves`.
    ///
    /// Each leaf is listed as `{base_url}/{filename}` with the run timestamp
    /// as `<lastmod>`.
    ///
    /// # Errors
    ///
    /// Returns an error if the document cannot be rendered or written.
    pub fn write_index(
        &self,
        ctx: &GenerationContext,
        leaves: &[LeafFile],
        index_filename: &str,
    ) -> Result<()> {
        let locations: Vec<String> = leaves
            .iter()
            .map(|leaf| format!("{}/{}", ctx.base_url(), leaf.filename))
            .collect();
        let xml = render_index(&locations, ctx.generated_at, ctx.xsl_url.as_deref())?;

        fs::create_dir_all(&self.public_dir)?;
        fs::write(self.public_dir.join(index_filename), xml)?;
        info!(file = %index_filename, sitemaps = leaves.len(), "Wrote sitemap index");
        Ok(())
    }
}

fn new_document(xsl_url: Option<&str>) -> Result<XmlWriter> {
    let mut writer = Writer::new_with_indent(Vec::new(), b' ', INDENT_SIZE);
    writer
        .write_event(Event::Decl(BytesDecl::new("1.0", Some("UTF-8"), None)))
        .map_err(Error::xml)?;
    if let Some(xsl_url) = xsl_url {
        let instruction = format!("xml-stylesheet type=\"text/xsl\" href=\"{}\"", escape(xsl_url));
        writer
            .write_event(Event::PI(BytesPI::new(instruction)))
            .map_err(Error::xml)?;
    }
    Ok(writer)
}

fn finish_document(writer: XmlWriter) -> Vec<u8> {
    let mut bytes = writer.into_inner();
    bytes.push(b'\n');
    bytes
}

fn start(writer: &mut XmlWriter, element: BytesStart<'_>) -> Result<()> {
    writer.write_event(Event::Start(element)).map_err(Error::xml)
}

fn end(writer: &mut XmlWriter, name: &str) -> Result<()> {
    writer
        .write_event(Event::End(BytesEnd::new(name)))
        .map_err(Error::xml)
}

fn text_element(writer: &mut XmlWriter, name: &str, text: &str) -> Result<()> {
    start(writer, BytesStart::new(name))?;
    writer
        .write_event(Event::Text(BytesText::new(text)))
        .map_err(Error::xml)?;
    end(writer, name)
}

/// Render a leaf `urlset` document.
///
/// # Errors
///
/// Returns [`Error::Xml`] if the document cannot be serialized.
pub fn render_urlset(entries: &[SitemapEntry], xsl_url: Option<&str>) -> Result<Vec<u8>> {
    let mut writer = new_document(xsl_url)?;

    start(
        &mut writer,
        BytesStart::new("urlset").with_attributes([
            ("xmlns", SITEMAP_NS),
            ("xmlns:image", IMAGE_NS),
            ("xmlns:video", VIDEO_NS),
            ("xmlns:xhtml", XHTML_NS),
        ]),
    )?;
    for entry in entries {
        write_url(&mut writer, entry)?;
    }
    end(&mut writer, "urlset")?;

    Ok(finish_document(writer))
}

fn write_url(writer: &mut XmlWriter, entry: &SitemapEntry) -> Result<()> {
    start(writer, BytesStart::new("url"))?;
    text_element(writer, "loc", &entry.location)?;
    if let Some(last_modified) = &entry.last_modified {
        text_element(writer, "lastmod", &format_timestamp(last_modified))?;
    }
    if let Some(change_frequency) = entry.change_frequency {
        text_element(writer, "changefreq", change_frequency.as_str())?;
    }
    if let Some(priority) = &entry.priority {
        text_element(writer, "priority", priority.as_str())?;
    }

    for image in &entry.images {
        start(writer, BytesStart::new("image:image"))?;
        text_element(writer, "image:loc", &image.url)?;
        if let Some(title) = image.title.as_deref().filter(|t| !t.is_empty()) {
            text_element(writer, "image:title", title)?;
        }
        end(writer, "image:image")?;
    }

    for video in &entry.videos {
        start(writer, BytesStart::new("video:video"))?;
        text_element(writer, "video:thumbnail_loc", &video.thumbnail_url)?;
        text_element(writer, "video:title", &video.title)?;
        text_element(writer, "video:description", &video.description)?;
        if let Some(player_url) = video.player_url.as_deref().filter(|u| !u.is_empty()) {
            start(
                writer,
                BytesStart::new("video:player_loc").with_attributes([("allow_embed", "yes")]),
            )?;
            writer
                .write_event(Event::Text(BytesText::new(player_url)))
                .map_err(Error::xml)?;
            end(writer, "video:player_loc")?;
        }
        end(writer, "video:video")?;
    }

    for link in &entry.alternate_links {
        writer
            .write_event(Event::Empty(BytesStart::new("xhtml:link").with_attributes([
                ("rel", "alternate"),
                ("hreflang", link.hreflang.as_str()),
                ("href", link.href.as_str()),
            ])))
            .map_err(Error::xml)?;
    }

    end(writer, "url")
}

/// Render a `sitemapindex` document listing `locations`.
///
/// # Errors
///
/// Returns [`Error::Xml`] if the document cannot be serialized.
pub fn render_index(
    locations: &[String],
    generated_at: DateTime<Utc>,
    xsl_url: Option<&str>,
) -> Result<Vec<u8>> {
    let mut writer = new_document(xsl_url)?;
    let lastmod = format_timestamp(&generated_at);

    start(
        &mut writer,
        BytesStart::new("sitemapindex").with_attributes([("xmlns", SITEMAP_NS)]),
    )?;
    for location in locations {
        start(&mut writer, BytesStart::new("sitemap"))?;
        text_element(&mut writer, "loc", location)?;
        text_element(&mut writer, "lastmod", &lastmod)?;
        end(&mut writer, "sitemap")?;
    }
    end(&mut writer, "sitemapindex")?;

    Ok(finish_document(writer))
}
