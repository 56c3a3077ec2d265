use quick_xml::events::Event;
use quick_xml::Reader;
use thiserror::Error;

pub const NO_TITLE: &str = "No title";
pub const NO_DESCRIPTION: &str = "No description";
pub const NO_LINK: &str = "No link";
pub const NO_DATE: &str = "No date";

/// Errors that can occur while parsing the feed document.
#[derive(Debug, Error)]
pub enum ParseError {
    /// The byte stream is not well-formed XML.
    #[error("XML parse error at byte {position}: {message}")]
    Xml { position: u64, message: String },

    /// The document root is some other element (e.g. an HTML error page).
    #[error("Expected <rss> root element, found <{0}>")]
    NotRss(String),

    /// The document contains no elements at all.
    #[error("Feed document is empty")]
    Empty,

    /// The document ended while elements were still open.
    #[error("Feed document ended inside <{0}>")]
    Truncated(String),
}

/// One `<item>` of the feed, with placeholders substituted for missing fields.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RawFeedItem {
    pub title: String,
    pub description: String,
    pub link: String,
    pub pub_date: String,
    /// True when `pubDate` carried text, false when `pub_date` is the placeholder.
    pub has_pub_date: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Field {
    Title,
    Description,
    Link,
    PubDate,
}

impl Field {
    fn from_name(name: &[u8]) -> Option<Self> {
        match name {
            b"title" => Some(Field::Title),
            b"description" => Some(Field::Description),
            b"link" => Some(Field::Link),
            b"pubDate" => Some(Field::PubDate),
            _ => None,
        }
    }
}

#[derive(Default)]
struct ItemBuilder {
    title: Option<String>,
    description: Option<String>,
    link: Option<String>,
    pub_date: Option<String>,
}

impl ItemBuilder {
    fn slot(&mut self, field: Field) -> &mut Option<String> {
        match field {
            Field::Title => &mut self.title,
            Field::Description => &mut self.description,
            Field::Link => &mut self.link,
            Field::PubDate => &mut self.pub_date,
        }
    }

    /// Stores the trimmed text of a finished child element. The first
    /// non-empty occurrence wins.
    fn set(&mut self, field: Field, text: &str) {
        let text = text.trim();
        let slot = self.slot(field);
        if slot.is_none() && !text.is_empty() {
            *slot = Some(text.to_string());
        }
    }

    fn build(self) -> RawFeedItem {
        let has_pub_date = self.pub_date.is_some();
        RawFeedItem {
            title: self.title.unwrap_or_else(|| NO_TITLE.to_string()),
            description: self.description.unwrap_or_else(|| NO_DESCRIPTION.to_string()),
            link: self.link.unwrap_or_else(|| NO_LINK.to_string()),
            pub_date: self.pub_date.unwrap_or_else(|| NO_DATE.to_string()),
            has_pub_date,
        }
    }
}

/// Parses an RSS document into its items, in document order.
///
/// Only `rss/channel/item/{title,description,link,pubDate}` is read. Names
/// are compared as written, so namespaced children such as `atom:link` are
/// ignored. Text and CDATA sections are both accepted; nested markup inside a
/// field contributes nothing.
///
/// # Errors
///
/// Returns a [`ParseError`] if the bytes are not well-formed XML, the root
/// element is not `<rss>`, there is no root element, or the document is cut
/// off before its elements are closed.
///
/// # Security
///
/// `quick-xml` (0.37) never expands `<!ENTITY>` declarations; only the five
/// predefined XML entities are unescaped. Custom entities produce a parse
/// error instead of being resolved.
pub fn parse_feed(bytes: &[u8]) -> Result<Vec<RawFeedItem>, ParseError> {
    // Whitespace is kept per event and trimmed once per finished field, so
    // text that meets a CDATA section keeps its separating spaces.
    let mut reader = Reader::from_reader(bytes);

    let mut items = Vec::new();
    let mut buf = Vec::new();
    let mut path: Vec<Vec<u8>> = Vec::new();
    let mut seen_root = false;

    let mut current: Option<ItemBuilder> = None;
    // Field being read and its accumulated text
    let mut field: Option<(Field, String)> = None;

    loop {
        let event = reader.read_event_into(&mut buf).map_err(|e| ParseError::Xml {
            position: reader.error_position(),
            message: e.to_string(),
        })?;

        match event {
            Event::Start(e) => {
                let name = e.name().as_ref().to_vec();
                if !seen_root {
                    seen_root = true;
                    if name != b"rss" {
                        return Err(ParseError::NotRss(
                            String::from_utf8_lossy(&name).into_owned(),
                        ));
                    }
                }
                path.push(name);

                if is_item_path(&path) {
                    current = Some(ItemBuilder::default());
                } else if path.len() == 4 && is_item_path(&path[..3]) {
                    field = Field::from_name(&path[3]).map(|f| (f, String::new()));
                }
            }
            Event::Empty(e) => {
                // Self-closing children leave the field unset
                let name = e.name();
                if !seen_root {
                    seen_root = true;
                    if name.as_ref() != b"rss" {
                        return Err(ParseError::NotRss(
                            String::from_utf8_lossy(name.as_ref()).into_owned(),
                        ));
                    }
                } else if name.as_ref() == b"item" && is_channel_path(&path) {
                    items.push(ItemBuilder::default().build());
                }
            }
            Event::Text(e) => {
                if let Some((_, text)) = field.as_mut() {
                    if path.len() == 4 {
                        let unescaped = e.unescape().map_err(|err| ParseError::Xml {
                            position: reader.buffer_position(),
                            message: err.to_string(),
                        })?;
                        text.push_str(&unescaped);
                    }
                }
            }
            Event::CData(e) => {
                if let Some((_, text)) = field.as_mut() {
                    if path.len() == 4 {
                        text.push_str(&String::from_utf8_lossy(&e));
                    }
                }
            }
            Event::End(_) => {
                if path.len() == 4 {
                    if let (Some((f, text)), Some(item)) = (field.take(), current.as_mut()) {
                        item.set(f, &text);
                    }
                } else if is_item_path(&path) {
                    if let Some(item) = current.take() {
                        items.push(item.build());
                    }
                }
                path.pop();
            }
            Event::Eof => break,
            _ => {}
        }
        buf.clear();
    }

    if !seen_root {
        return Err(ParseError::Empty);
    }
    if let Some(open) = path.last() {
        return Err(ParseError::Truncated(
            String::from_utf8_lossy(open).into_owned(),
        ));
    }

    tracing::debug!(items = items.len(), "Parsed feed document");
    Ok(items)
}

fn is_channel_path(path: &[Vec<u8>]) -> bool {
    path.len() == 2 && path[0] == b"rss" && path[1] == b"channel"
}

fn is_item_path<T: AsRef<[u8]>>(path: &[T]) -> bool {
    path.len() == 3
        && path[0].as_ref() == b"rss"
        && path[1].as_ref() == b"channel"
        && path[2].as_ref() == b"item"
}

/// Strips the weekday and timezone offset from an RFC 2822 style date.
///
/// Keeps the segment after the first comma (up to any further comma), then
/// the part of it before the first `+`, with trailing whitespace removed.
/// The leading space after the comma is kept. A string lacking either a
/// comma or a `+` is returned unchanged.
///
/// ```
/// use alarmfeed::feed::normalize_pub_date;
///
/// assert_eq!(normalize_pub_date("Sat, 10 Feb 2022 14:05:00 +0100"), " 10 Feb 2022 14:05:00");
/// assert_eq!(normalize_pub_date("No date"), "No date");
/// ```
pub fn normalize_pub_date(raw: &str) -> String {
    if !raw.contains(',') || !raw.contains('+') {
        return raw.to_string();
    }
    let segment = raw.split(',').nth(1).unwrap_or(raw);
    let date = segment.split('+').next().unwrap_or(segment);
    date.trim_end().to_string()
}
