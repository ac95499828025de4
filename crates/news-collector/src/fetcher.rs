use anyhow::Context;
use async_trait::async_trait;
use collector_core::{ContentFetcher, FetchError};
use regex::Regex;
use reqwest::Client;
use std::time::Duration;

const USER_AGENT: &str =
    "Mozilla/5.0 (X11; Linux x86_64) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/124.0 Safari/537.36";

/// Elements whose whole content is boilerplate, not article text.
const DROPPED_ELEMENTS: &[&str] = &[
    "script", "style", "noscript", "template", "nav", "header", "footer", "aside", "figure",
    "form", "iframe", "svg", "button",
];

/// Candidate containers for the article body, most specific first.
const CONTENT_CONTAINERS: &[&str] = &["article", "main", "body"];

/// Compiled patterns that reduce an HTML document to readable text
#[derive(Debug, Clone)]
pub struct TextExtractor {
    comment: Regex,
    dropped: Vec<Regex>,
    containers: Vec<Regex>,
    block_break: Regex,
    tag: Regex,
    entity: Regex,
}

impl TextExtractor {
    pub fn new() -> Result<Self, regex::Error> {
        let dropped = DROPPED_ELEMENTS
            .iter()
            .map(|tag| Regex::new(&format!(r"(?is)<{tag}\b[^>]*>.*?</{tag}\s*>")))
            .collect::<Result<Vec<_>, _>>()?;
        let containers = CONTENT_CONTAINERS
            .iter()
            .map(|tag| Regex::new(&format!(r"(?is)<{tag}\b[^>]*>(.*)</{tag}\s*>")))
            .collect::<Result<Vec<_>, _>>()?;

        Ok(Self {
            comment: Regex::new(r"(?s)<!--.*?-->")?,
            dropped,
            containers,
            block_break: Regex::new(r"(?i)<br\s*/?>|</(p|div|li|h[1-6]|blockquote|tr|section)\s*>")?,
            tag: Regex::new(r"(?s)<[^>]*>")?,
            entity: Regex::new(r"&(#[0-9]{1,7}|#[xX][0-9a-fA-F]{1,6}|[a-zA-Z]{2,8});")?,
        })
    }

    /// Reduce an HTML document to its readable article text.
    ///
    /// Boilerplate elements (navigation, scripts, images, forms) are removed,
    /// the most specific content container is kept, tags are stripped and
    /// entities decoded. Link targets and image sources never reach the output.
    pub fn extract(&self, html: &str) -> String {
        let mut doc = self.comment.replace_all(html, " ").into_owned();
        for re in &self.dropped {
            doc = re.replace_all(&doc, " ").into_owned();
        }

        let region = self
            .containers
            .iter()
            .find_map(|re| re.captures(&doc).and_then(|c| c.get(1)).map(|m| m.as_str().to_string()))
            .unwrap_or(doc);

        let broken = self.block_break.replace_all(&region, "\n");
        let stripped = self.tag.replace_all(&broken, " ");
        collapse_whitespace(&self.decode_entities(&stripped))
    }

    fn decode_entities(&self, text: &str) -> String {
        self.entity
            .replace_all(text, |caps: &regex::Captures| {
                let entity = &caps[1];
                let decoded = if let Some(hex) = entity.strip_prefix("#x").or_else(|| entity.strip_prefix("#X")) {
                    u32::from_str_radix(hex, 16).ok().and_then(char::from_u32)
                } else if let Some(dec) = entity.strip_prefix('#') {
                    dec.parse::<u32>().ok().and_then(char::from_u32)
                } else {
                    named_entity(entity)
                };
                decoded.map_or_else(|| caps[0].to_string(), |c| c.to_string())
            })
            .into_owned()
    }
}

/// Fetches article pages over HTTP and reduces them to readable text
#[derive(Clone)]
pub struct HttpContentFetcher {
    client: Client,
    extractor: TextExtractor,
}

impl HttpContentFetcher {
    pub fn new(timeout: Duration) -> anyhow::Result<Self> {
        let client = Client::builder()
            .timeout(timeout)
            .user_agent(USER_AGENT)
            .build()
            .context("Failed to build article HTTP client")?;
        let extractor = TextExtractor::new().context("Failed to compile text extraction patterns")?;

        Ok(Self { client, extractor })
    }
}

#[async_trait]
impl ContentFetcher for HttpContentFetcher {
    async fn fetch(&self, url: &str) -> Result<String, FetchError> {
        let request_error = |e: reqwest::Error| FetchError::Request {
            url: url.to_string(),
            message: e.to_string(),
        };

        let response = self.client.get(url).send().await.map_err(request_error)?;

        if !response.status().is_success() {
            return Err(FetchError::Status {
                url: url.to_string(),
                status: response.status().as_u16(),
            });
        }

        let is_html = response
            .headers()
            .get(reqwest::header::CONTENT_TYPE)
            .and_then(|v| v.to_str().ok())
            .map_or(true, |ct| ct.contains("html"));

        let body = response.text().await.map_err(request_error)?;

        let text = if is_html || body.trim_start().starts_with('<') {
            self.extractor.extract(&body)
        } else {
            collapse_whitespace(&body)
        };

        if text.is_empty() {
            return Err(FetchError::EmptyContent(url.to_string()));
        }
        Ok(text)
    }
}

fn named_entity(name: &str) -> Option<char> {
    match name {
        "amp" => Some('&'),
        "lt" => Some('<'),
        "gt" => Some('>'),
        "quot" | "rdquo" | "ldquo" => Some('"'),
        "apos" | "rsquo" | "lsquo" => Some('\''),
        "nbsp" => Some(' '),
        "ndash" | "mdash" => Some('-'),
        "hellip" => Some('…'),
        _ => None,
    }
}

fn collapse_whitespace(text: &str) -> String {
    text.split_whitespace().collect::<Vec<_>>().join(" ")
}
