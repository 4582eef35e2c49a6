use async_trait::async_trait;
use once_cell::sync::Lazy;
use reqwest::header::CONTENT_TYPE;
use reqwest::Client;
use scraper::{ElementRef, Html, Selector};
use tracing::debug;
use url::Url;

use crate::error::{AppError, Result};

/// One block of text extracted from a page.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Fragment {
    pub text: String,
}

impl Fragment {
    pub fn new(text: impl Into<String>) -> Self {
        Fragment { text: text.into() }
    }
}

/// Retrieves a page and turns it into ordered text fragments.
#[async_trait]
pub trait ContentFetcher: Send + Sync {
    async fn fetch(&self, url: &Url) -> Result<Vec<Fragment>>;
}

// Create static selectors to avoid recompiling them each time
static TITLE_SELECTOR: Lazy<Selector> = Lazy::new(|| {
    Selector::parse("head > title").expect("Failed to parse title selector")
});

static BODY_SELECTOR: Lazy<Selector> = Lazy::new(|| {
    Selector::parse("body").expect("Failed to parse body selector")
});

/// Elements whose whole text, nested blocks included, is one fragment.
const BLOCK_TAGS: &[&str] = &[
    "h1", "h2", "h3", "h4", "h5", "h6", "p", "li", "pre", "blockquote", "td", "th", "dt", "dd",
    "figcaption",
];

/// Elements that flow inside a line. Every other element breaks the text.
const INLINE_TAGS: &[&str] = &[
    "a", "abbr", "b", "bdi", "bdo", "cite", "code", "data", "del", "dfn", "em", "font", "i", "img",
    "ins", "kbd", "label", "mark", "q", "s", "samp", "small", "span", "strong", "sub", "sup", "time",
    "u", "var", "wbr",
];

const SKIPPED_TAGS: &[&str] = &[
    "script", "style", "noscript", "aside", "form", "template", "svg", "iframe",
];

/// Page chrome, unless it sits inside one of `CONTENT_TAGS`.
const CHROME_TAGS: &[&str] = &["nav", "header", "footer"];

const CONTENT_TAGS: &[&str] = &["article", "main"];

const USER_AGENT: &str = concat!("url-summarizer/", env!("CARGO_PKG_VERSION"));

/// Fetches pages over HTTP and extracts their text with `scraper`.
#[derive(Clone)]
pub struct HttpFetcher {
    client: Client,
}

impl HttpFetcher {
    pub fn new() -> Result<Self> {
        let client = Client::builder()
            .user_agent(USER_AGENT)
            .build()
            .map_err(|e| AppError::ConfigError(format!("Failed to build HTTP client: {}", e)))?;

        Ok(HttpFetcher { client })
    }
}

#[async_trait]
impl ContentFetcher for HttpFetcher {
    async fn fetch(&self, url: &Url) -> Result<Vec<Fragment>> {
        if !matches!(url.scheme(), "http" | "https") {
            return Err(AppError::FetchError(format!("Unsupported URL scheme: {}", url.scheme())));
        }

        let response = self.client.get(url.clone()).send().await?;

        let status = response.status();
        if !status.is_success() {
            return Err(AppError::FetchError(format!("{} returned HTTP {}", url, status)));
        }

        let content_type = response
            .headers()
            .get(CONTENT_TYPE)
            .and_then(|value| value.to_str().ok())
            .map(|value| value.to_ascii_lowercase());

        if let Some(content_type) = content_type.as_deref() {
            if !is_textual(content_type) {
                return Err(AppError::ParseError(format!("Unsupported content type: {}", content_type)));
            }
        }
        let is_plain_text = content_type.as_deref().is_some_and(|value| value.starts_with("text/plain"));

        let body = response.text().await?;
        debug!(bytes = body.len(), plain_text = is_plain_text, "fetched page body");

        let fragments = if is_plain_text {
            split_plain_text(&body)
        } else {
            extract_fragments(&body)
        };
        debug!(fragments = fragments.len(), "extracted fragments");

        Ok(fragments)
    }
}

fn is_textual(content_type: &str) -> bool {
    content_type.starts_with("text/") || content_type.contains("html") || content_type.contains("xml")
}

/// Extracts the readable text of an HTML document as ordered fragments.
///
/// The title comes first. Each element in `BLOCK_TAGS` is one fragment, and
/// so is each run of text sitting directly in another container such as a
/// `div`. Scripts, forms and page chrome are skipped.
pub fn extract_fragments(html: &str) -> Vec<Fragment> {
    let document = Html::parse_document(html);
    let mut extractor = Extractor::default();

    if let Some(title) = document.select(&TITLE_SELECTOR).next() {
        extractor.buffer.extend(title.text());
        extractor.flush();
    }

    if let Some(body) = document.select(&BODY_SELECTOR).next() {
        extractor.walk(body, Scope::default());
        extractor.flush();
    }

    extractor.fragments
}

#[derive(Clone, Copy, Default)]
struct Scope {
    in_content: bool,
    in_block: bool,
}

#[derive(Default)]
struct Extractor {
    fragments: Vec<Fragment>,
    buffer: String,
}

impl Extractor {
    fn walk(&mut self, element: ElementRef<'_>, scope: Scope) {
        for child in element.children() {
            if let Some(text) = child.value().as_text() {
                self.buffer.push_str(text);
            } else if let Some(child) = ElementRef::wrap(child) {
                self.visit(child, scope);
            }
        }
    }

    fn visit(&mut self, element: ElementRef<'_>, scope: Scope) {
        let name = element.value().name();

        if SKIPPED_TAGS.contains(&name) || (!scope.in_content && CHROME_TAGS.contains(&name)) {
            return;
        }
        if name == "br" {
            self.buffer.push(' ');
            return;
        }
        if INLINE_TAGS.contains(&name) {
            self.walk(element, scope);
            return;
        }

        let scope = Scope {
            in_content: scope.in_content || CONTENT_TAGS.contains(&name),
            ..scope
        };

        // Inside a fragment a nested block only separates words.
        if scope.in_block {
            self.buffer.push(' ');
            self.walk(element, scope);
            self.buffer.push(' ');
            return;
        }

        self.flush();
        self.walk(element, Scope { in_block: BLOCK_TAGS.contains(&name), ..scope });
        self.flush();
    }

    fn flush(&mut self) {
        let text = normalize_whitespace(&self.buffer);
        if !text.is_empty() {
            self.fragments.push(Fragment { text });
        }
        self.buffer.clear();
    }
}

fn normalize_whitespace(text: &str) -> String {
    text.split_whitespace().collect::<Vec<_>>().join(" ")
}

/// Splits a plain-text body into paragraphs on blank lines.
pub fn split_plain_text(text: &str) -> Vec<Fragment> {
    let mut fragments = Vec::new();
    let mut paragraph: Vec<&str> = Vec::new();

    for line in text.lines() {
        let trimmed = line.trim();
        if trimmed.is_empty() {
            if !paragraph.is_empty() {
                fragments.push(Fragment::new(paragraph.join("\n")));
                paragraph.clear();
            }
        } else {
            paragraph.push(trimmed);
        }
    }
    if !paragraph.is_empty() {
        fragments.push(Fragment::new(paragraph.join("\n")));
    }

    fragments
}
