//! Browser stylesheet for generated sitemaps.
//!
//! Sitemaps reference `sitemap.xsl` through an `xml-stylesheet` processing
//! instruction so they render as a table when opened in a browser. The
//! stylesheet is shared by all stores and written once.

use std::fs;
use std::path::Path;

use tracing::info;

use crate::Result;

/// Stylesheet filename inside the public directory.
pub const XSL_FILENAME: &str = "sitemap.xsl";

/// Stylesheet rendering both `urlset` and `sitemapindex` documents.
pub const SITEMAP_XSL: &str = r#"<?xml version="1.0" encoding="UTF-8"?>
<xsl:stylesheet version="1.0"
                xmlns:xsl="http://www.w3.org/1999/XSL/Transform"
                xmlns:sitemap="http://www.sitemaps.org/schemas/sitemap/0.9"
                xmlns:image="http://www.google.com/schemas/sitemap-image/1.1"
                xmlns:video="http://www.google.com/schemas/sitemap-video/1.1"
                xmlns:xhtml="http://www.w3.org/1999/xhtml">
    <xsl:output method="html" encoding="UTF-8" indent="yes"/>
    <xsl:template match="/">
        <html>
            <head>
                <title>XML Sitemap</title>
                <style type="text/css">
                    body{font-family:system-ui,sans-serif;font-size:14px;color:#222;margin:0;background:#f6f6f6}
                    header{background:#1f2a44;color:#fff;padding:24px}
                    main{max-width:1100px;margin:0 auto;padding:20px}
                    table{width:100%;border-collapse:collapse;background:#fff}
                    th{background:#2d3b5e;color:#fff;text-align:left;padding:10px}
                    td{padding:8px 10px;border-bottom:1px solid #e3e3e3;word-break:break-all}
                    .alt{font-size:12px;color:#666}
                </style>
            </head>
            <body>
                <header>
                    <h1>XML Sitemap</h1>
                    <p>This document lists pages for search engine discovery.</p>
                </header>
                <main><xsl:apply-templates/></main>
            </body>
        </html>
    </xsl:template>
    <xsl:template match="sitemap:sitemapindex">
        <p><xsl:value-of select="count(sitemap:sitemap)"/> sitemaps</p>
        <table>
            <tr><th>Sitemap</th><th>Last modified</th></tr>
            <xsl:for-each select="sitemap:sitemap">
                <tr>
                    <td><a href="{sitemap:loc}"><xsl:value-of select="sitemap:loc"/></a></td>
                    <td><xsl:value-of select="sitemap:lastmod"/></td>
                </tr>
            </xsl:for-each>
        </table>
    </xsl:template>
    <xsl:template match="sitemap:urlset">
        <p><xsl:value-of select="count(sitemap:url)"/> URLs</p>
        <table>
            <tr><th>URL</th><th>Images</th><th>Videos</th><th>Priority</th><th>Change freq.</th><th>Last modified</th></tr>
            <xsl:for-each select="sitemap:url">
                <tr>
                    <td>
                        <a href="{sitemap:loc}"><xsl:value-of select="sitemap:loc"/></a>
                        <xsl:if test="xhtml:link">
                            <div class="alt">
                                <xsl:for-each select="xhtml:link">
                                    <xsl:value-of select="@hreflang"/><xsl:text> </xsl:text>
                                </xsl:for-each>
                            </div>
                        </xsl:if>
                    </td>
                    <td><xsl:value-of select="count(image:image)"/></td>
                    <td><xsl:value-of select="count(video:video)"/></td>
                    <td><xsl:value-of select="sitemap:priority"/></td>
                    <td><xsl:value-of select="sitemap:changefreq"/></td>
                    <td><xsl:value-of select="sitemap:lastmod"/></td>
                </tr>
            </xsl:for-each>
        </table>
    </xsl:template>
</xsl:stylesheet>
"#;

/// Write the stylesheet into `public_dir` unless it already exists.
///
/// Returns `true` when the file was written.
///
/// # Errors
///
/// Returns an error if the directory or file cannot be created.
pub fn deploy(public_dir: &Path) -> Result<bool> {
    let path = public_dir.join(XSL_FILENAME);
    if path.exists() {
        return Ok(false);
    }
    fs::create_dir_all(public_dir)?;
    fs::write(&path, SITEMAP_XSL)?;
    info!(path = %path.display(), "Deployed sitemap stylesheet");
    Ok(true)
}

/// Public URL of the stylesheet for a store base URL.
#[must_use]
pub fn stylesheet_url(base_url: &str) -> String {
    format!("{}/{XSL_FILENAME}", base_url.trim_end_matches('/'))
}
