//! Raw markup and the element views computed from it

use once_cell::sync::Lazy;
use scraper::{ElementRef, Html, Selector};

static SCRIPT_SELECTOR: Lazy<Selector> = Lazy::new(|| selector("script"));
static TITLE_SELECTOR: Lazy<Selector> = Lazy::new(|| selector("title"));
static META_SELECTOR: Lazy<Selector> = Lazy::new(|| selector("meta"));
static LINK_SELECTOR: Lazy<Selector> = Lazy::new(|| selector("link"));
static IMG_SELECTOR: Lazy<Selector> = Lazy::new(|| selector("img"));
static H1_SELECTOR: Lazy<Selector> = Lazy::new(|| selector("h1"));
static DIV_SELECTOR: Lazy<Selector> = Lazy::new(|| selector("div"));

fn selector(css: &str) -> Selector {
    Selector::parse(css).expect("static selector is valid")
}

/// Markup text as returned by the fetcher
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RawDocument {
    markup: String,
}

impl RawDocument {
    /// Wrap markup text
    pub fn new<S: Into<String>>(markup: S) -> Self {
        Self {
            markup: markup.into(),
        }
    }

    /// The markup text
    pub fn markup(&self) -> &str {
        &self.markup
    }

    /// Markup length in bytes
    pub fn len(&self) -> usize {
        self.markup.len()
    }

    /// Whether the document has no markup at all
    pub fn is_empty(&self) -> bool {
        self.markup.is_empty()
    }

    /// Parse the markup. html5ever never fails; broken markup just yields a
    /// sparser tree.
    pub fn parse(&self) -> ParsedDocument {
        ParsedDocument {
            html: Html::parse_document(&self.markup),
        }
    }
}

impl From<String> for RawDocument {
    fn from(markup: String) -> Self {
        Self::new(markup)
    }
}

impl From<&str> for RawDocument {
    fn from(markup: &str) -> Self {
        Self::new(markup)
    }
}

/// Parsed tree with the element queries the extraction tiers need.
///
/// Attribute values are compared exactly, except `rel` and `class`, which
/// match when any whitespace-separated token matches.
pub struct ParsedDocument {
    html: Html,
}

impl ParsedDocument {
    /// Text content of every `<script>` element, in document order
    pub fn script_texts(&self) -> impl Iterator<Item = String> + '_ {
        self.html
            .select(&SCRIPT_SELECTOR)
            .map(|el| el.text().collect::<String>())
    }

    /// Text of the first `<title>` element, untrimmed
    pub fn title_text(&self) -> Option<String> {
        self.html
            .select(&TITLE_SELECTOR)
            .next()
            .map(|el| el.text().collect())
    }

    /// `<meta>` elements whose `attr` equals `value`
    pub fn meta_tags<'a>(
        &'a self,
        attr: &'a str,
        value: &'a str,
    ) -> impl Iterator<Item = ElementRef<'a>> + 'a {
        self.html
            .select(&META_SELECTOR)
            .filter(move |el| el.value().attr(attr) == Some(value))
    }

    /// `<link>` elements with a `rel` token `rel` and an `as` attribute `kind`
    pub fn link_tags<'a>(
        &'a self,
        rel: &'a str,
        kind: &'a str,
    ) -> impl Iterator<Item = ElementRef<'a>> + 'a {
        self.html.select(&LINK_SELECTOR).filter(move |el| {
            let attrs = el.value();
            has_token(attrs.attr("rel"), rel) && attrs.attr("as") == Some(kind)
        })
    }

    /// Every `<img>` element
    pub fn image_tags(&self) -> impl Iterator<Item = ElementRef<'_>> + '_ {
        self.html.select(&IMG_SELECTOR)
    }

    /// First `<h1>` element
    pub fn first_heading(&self) -> Option<ElementRef<'_>> {
        self.html.select(&H1_SELECTOR).next()
    }

    /// `<div>` elements having at least one class token accepted by `pred`
    pub fn divs_with_class<'a, F>(&'a self, pred: F) -> impl Iterator<Item = ElementRef<'a>> + 'a
    where
        F: Fn(&str) -> bool + 'a,
    {
        self.html
            .select(&DIV_SELECTOR)
            .filter(move |el| el.value().classes().any(|class| pred(class)))
    }
}

fn has_token(value: Option<&str>, token: &str) -> bool {
    value.is_some_and(|v| v.split_ascii_whitespace().any(|t| t == token))
}
