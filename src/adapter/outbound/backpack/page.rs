//! Scraping for backpack.tf item stats pages.
//!
//! A stats page lists classifieds in two sections, each opened by an `<h4>`
//! header (`Buy Orders`, `Sell Orders`). Every classified is an
//! `<li class="listing">` whose first `div.item` carries the asking price in
//! `data-listing_price` and one attribute per applied modification.

use std::sync::OnceLock;

use regex::Regex;

use crate::domain::MarketListing;

/// Which classifieds section of a stats page to read.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Section {
    BuyOrders,
    SellOrders,
}

impl Section {
    pub const fn heading(self) -> &'static str {
        match self {
            Self::BuyOrders => "Buy Orders",
            Self::SellOrders => "Sell Orders",
        }
    }
}

struct Patterns {
    heading: Regex,
    listing: Regex,
    div: Regex,
    attribute: Regex,
}

fn patterns() -> Option<&'static Patterns> {
    static COMPILED: OnceLock<Option<Patterns>> = OnceLock::new();
    COMPILED
        .get_or_init(|| {
            Some(Patterns {
                heading: Regex::new(r"(?is)<h4[^>]*>\s*(.*?)\s*</h4>").ok()?,
                listing: Regex::new(r#"(?is)<li\s[^>]*class\s*=\s*["']([^"']*)["'][^>]*>"#).ok()?,
                div: Regex::new(r"(?is)<div(\s[^>]*)?>").ok()?,
                attribute: Regex::new(
                    r#"(?s)([A-Za-z_:][-A-Za-z0-9_:.]*)(?:\s*=\s*(?:"([^"]*)"|'([^']*)'|([^\s"'>]+)))?"#,
                )
                .ok()?,
            })
        })
        .as_ref()
}

/// Listings in `section`, in page order.
///
/// Returns `None` when the section header is absent, which is how a
/// challenge or error page looks. A present section with no listings yields
/// an empty list.
pub fn listings(page: &str, section: Section) -> Option<Vec<MarketListing>> {
    let patterns = patterns()?;
    let body = section_body(patterns, page, section)?;

    let starts: Vec<(usize, usize)> = patterns
        .listing
        .captures_iter(body)
        .filter(|captures| has_class(&captures[1], "listing"))
        .filter_map(|captures| captures.get(0).map(|m| (m.start(), m.end())))
        .collect();

    let listings = starts
        .iter()
        .enumerate()
        .filter_map(|(index, &(_, open_end))| {
            let end = starts.get(index + 1).map_or(body.len(), |&(next, _)| next);
            parse_listing(patterns, &body[open_end..end])
        })
        .collect();

    Some(listings)
}

/// Text from the section header up to the next `<h4>` header.
fn section_body<'a>(patterns: &Patterns, page: &'a str, section: Section) -> Option<&'a str> {
    let mut headings = patterns.heading.captures_iter(page);
    let found = headings.find(|captures| captures[1].eq_ignore_ascii_case(section.heading()))?;
    let start = found.get(0)?.end();
    let end = headings
        .next()
        .and_then(|captures| captures.get(0))
        .map_or(page.len(), |m| m.start());
    Some(&page[start..end])
}

fn parse_listing(patterns: &Patterns, block: &str) -> Option<MarketListing> {
    let attributes = patterns
        .div
        .captures_iter(block)
        .filter_map(|captures| captures.get(1).map(|m| m.as_str()))
        .map(|raw| parse_attributes(patterns, raw))
        .find(|attributes| {
            attributes
                .iter()
                .any(|(name, value)| name.eq_ignore_ascii_case("class") && has_class(value, "item"))
        })?;

    let price = attributes
        .iter()
        .find(|(name, _)| name.eq_ignore_ascii_case("data-listing_price"))
        .map(|(_, value)| value.clone())
        .unwrap_or_default();

    Some(
        attributes
            .into_iter()
            .map(|(name, _)| name)
            .fold(MarketListing::new(price), MarketListing::with_marker),
    )
}

fn parse_attributes(patterns: &Patterns, raw: &str) -> Vec<(String, String)> {
    patterns
        .attribute
        .captures_iter(raw)
        .map(|captures| {
            let value = captures
                .get(2)
                .or_else(|| captures.get(3))
                .or_else(|| captures.get(4))
                .map_or("", |m| m.as_str());
            (captures[1].to_string(), decode_entities(value))
        })
        .collect()
}

fn has_class(class_attr: &str, class: &str) -> bool {
    class_attr.split_whitespace().any(|token| token == class)
}

fn decode_entities(value: &str) -> String {
    value
        .replace("&quot;", "\"")
        .replace("&#39;", "'")
        .replace("&lt;", "<")
        .replace("&gt;", ">")
        .replace("&amp;", "&")
}
