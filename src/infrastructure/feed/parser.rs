use crate::domain::news::text::strip_html;
use crate::domain::news::{Enclosure, FeedError, MediaRef, RawEntry};
use quick_xml::escape::escape;
use quick_xml::events::{BytesStart, Event};
use quick_xml::Reader;

/// Fields whose text is HTML; raw markup nested inside them is kept as text
const HTML_FIELDS: [&str; 3] = ["description", "content", "content:encoded"];

/// Parse RSS 2.0, RSS 1.0 (RDF) or Atom into raw entries.
///
/// Unknown elements are ignored, so vendor extensions never fail a feed.
/// Mismatched or unterminated markup, an empty document and a root that is
/// not a feed all yield `FeedError::Parse`.
pub fn parse(xml: &str) -> Result<Vec<RawEntry>, FeedError> {
    let mut reader = Reader::from_str(xml);

    let mut stack: Vec<String> = Vec::new();
    let mut seen_root = false;
    let mut current: Option<EntryBuilder> = None;
    let mut entries = Vec::new();

    loop {
        let event = reader.read_event().map_err(|e| {
            FeedError::Parse(format!("{} (at byte {})", e, reader.buffer_position()))
        })?;

        match event {
            Event::Start(e) => {
                let name = element_name(&e);
                if !seen_root {
                    check_root(&name)?;
                    seen_root = true;
                }
                let depth = stack.len() + 1;
                match current.as_mut() {
                    Some(builder) => builder.open(&name, &e, depth, false),
                    None if is_entry(&name) => current = Some(EntryBuilder::new(depth)),
                    None => {}
                }
                stack.push(name);
            }
            Event::Empty(e) => {
                let name = element_name(&e);
                if !seen_root {
                    check_root(&name)?;
                    seen_root = true;
                }
                if let Some(builder) = current.as_mut() {
                    builder.open(&name, &e, stack.len() + 1, true);
                }
            }
            Event::End(_) => {
                let depth = stack.len();
                let name = stack.pop().unwrap_or_default();
                if let Some(builder) = current.as_mut() {
                    if depth == builder.depth {
                        if let Some(done) = current.take() {
                            entries.push(done.finish());
                        }
                    } else {
                        builder.close(&name, depth);
                    }
                }
            }
            Event::Text(e) => {
                if let Some(builder) = current.as_mut() {
                    let text = e
                        .unescape()
                        .map_err(|err| FeedError::Parse(err.to_string()))?;
                    let element = stack.last().map(String::as_str).unwrap_or_default();
                    builder.text(&text, element, stack.len());
                }
            }
            Event::CData(e) => {
                if let Some(builder) = current.as_mut() {
                    let text = String::from_utf8_lossy(&e.into_inner()).into_owned();
                    let element = stack.last().map(String::as_str).unwrap_or_default();
                    builder.text(&text, element, stack.len());
                }
            }
            Event::Eof => break,
            _ => {}
        }
    }

    if !seen_root {
        return Err(FeedError::Parse("empty document".to_string()));
    }
    if let Some(open) = stack.last() {
        return Err(FeedError::Parse(format!(
            "unexpected end of document inside <{}>",
            open
        )));
    }

    Ok(entries)
}

fn element_name(e: &BytesStart<'_>) -> String {
    String::from_utf8_lossy(e.name().as_ref()).into_owned()
}

fn check_root(name: &str) -> Result<(), FeedError> {
    match name {
        "rss" | "feed" | "rdf:RDF" => Ok(()),
        other if other.ends_with(":RDF") => Ok(()),
        other => Err(FeedError::Parse(format!(
            "unrecognized root element <{}>",
            other
        ))),
    }
}

fn is_entry(name: &str) -> bool {
    name == "item" || name == "entry"
}

fn attr(e: &BytesStart<'_>, key: &str) -> Option<String> {
    e.attributes()
        .flatten()
        .find(|a| a.key.as_ref() == key.as_bytes())
        .and_then(|a| a.unescape_value().ok().map(|v| v.trim().to_string()))
        .filter(|v| !v.is_empty())
}

fn media_ref(e: &BytesStart<'_>) -> Option<MediaRef> {
    attr(e, "url").map(|url| MediaRef {
        url,
        medium: attr(e, "medium"),
        mime_type: attr(e, "type"),
    })
}

fn markup(e: &BytesStart<'_>, name: &str, empty: bool) -> String {
    let mut out = format!("<{}", name);
    for a in e.attributes().flatten() {
        out.push_str(&format!(
            " {}=\"{}\"",
            String::from_utf8_lossy(a.key.as_ref()),
            String::from_utf8_lossy(&a.value)
        ));
    }
    out.push_str(if empty { "/>" } else { ">" });
    out
}

/// The direct child of an entry currently being read
struct Field {
    name: String,
    text: String,
}

struct EntryBuilder {
    depth: usize,
    entry: RawEntry,
    field: Option<Field>,
}

impl EntryBuilder {
    fn new(depth: usize) -> Self {
        Self {
            depth,
            entry: RawEntry::default(),
            field: None,
        }
    }

    fn field_depth(&self) -> usize {
        self.depth + 1
    }

    fn in_html_field(&self) -> bool {
        self.field
            .as_ref()
            .is_some_and(|f| HTML_FIELDS.contains(&f.name.as_str()))
    }

    fn open(&mut self, name: &str, e: &BytesStart<'_>, depth: usize, empty: bool) {
        self.collect_attributes(name, e, depth);

        if depth == self.field_depth() {
            if !empty {
                self.field = Some(Field {
                    name: name.to_string(),
                    text: String::new(),
                });
            }
        } else if self.in_html_field() {
            if let Some(field) = self.field.as_mut() {
                field.text.push_str(&markup(e, name, empty));
            }
        }
    }

    fn close(&mut self, name: &str, depth: usize) {
        if depth == self.field_depth() {
            if let Some(field) = self.field.take() {
                self.commit(field);
            }
        } else if self.in_html_field() {
            if let Some(field) = self.field.as_mut() {
                field.text.push_str(&format!("</{}>", name));
            }
        }
    }

    fn text(&mut self, text: &str, element: &str, depth: usize) {
        let direct = depth == self.field_depth();
        let html = self.in_html_field();
        if let Some(field) = self.field.as_mut() {
            if direct {
                field.text.push_str(text);
            } else if html {
                field.text.push_str(&escape(text));
            } else if element == "name" {
                // Atom <author><name>
                field.text.push_str(text);
            }
        }
    }

    /// Attribute-carrying elements are read wherever they appear in the entry
    fn collect_attributes(&mut self, name: &str, e: &BytesStart<'_>, depth: usize) {
        let in_group = self
            .field
            .as_ref()
            .is_some_and(|f| f.name == "media:group");

        match name {
            "media:content" => {
                if let Some(media) = media_ref(e) {
                    if in_group {
                        self.entry.media_group.push(media);
                    } else {
                        self.entry.media_content.push(media);
                    }
                }
            }
            "media:thumbnail" => {
                if let Some(media) = media_ref(e) {
                    self.entry.media_thumbnail.push(media);
                }
            }
            "enclosure" => {
                if self.entry.enclosure.is_none() {
                    self.entry.enclosure = attr(e, "url").map(|url| Enclosure {
                        url,
                        mime_type: attr(e, "type"),
                        length: attr(e, "length").and_then(|l| l.parse().ok()),
                    });
                }
            }
            "link" if depth == self.field_depth() => {
                if let Some(href) = attr(e, "href") {
                    match attr(e, "rel").as_deref() {
                        None | Some("alternate") => {
                            if self.entry.link.is_none() {
                                self.entry.link = Some(href);
                            }
                        }
                        Some("enclosure") if self.entry.enclosure.is_none() => {
                            self.entry.enclosure = Some(Enclosure {
                                url: href,
                                mime_type: attr(e, "type"),
                                length: attr(e, "length").and_then(|l| l.parse().ok()),
                            });
                        }
                        _ => {}
                    }
                }
            }
            "category" if depth == self.field_depth() => {
                if let Some(term) = attr(e, "term") {
                    self.entry.categories.push(term);
                }
            }
            _ => {}
        }
    }

    fn commit(&mut self, field: Field) {
        let text = field.text.trim();
        if text.is_empty() {
            return;
        }
        let value = Some(text.to_string());
        let entry = &mut self.entry;

        match field.name.as_str() {
            "title" => set_once(&mut entry.title, value),
            "link" => set_once(&mut entry.link, value),
            "guid" | "id" => set_once(&mut entry.guid, value),
            "description" => set_once(&mut entry.description, value),
            "summary" => {
                let snippet = strip_html(text);
                if !snippet.is_empty() {
                    set_once(&mut entry.content_snippet, Some(snippet));
                }
            }
            "content" => set_once(&mut entry.content, value),
            "content:encoded" => set_once(&mut entry.content_encoded, value),
            "creator" | "itunes:author" => set_once(&mut entry.creator, value),
            "author" => set_once(&mut entry.author, value),
            "dc:creator" => set_once(&mut entry.dc_creator, value),
            "pubDate" => set_once(&mut entry.pub_date, value),
            "published" => entry.iso_date = value,
            "updated" | "dc:date" => set_once(&mut entry.iso_date, value),
            "category" | "dc:subject" => entry.categories.push(text.to_string()),
            _ => {}
        }
    }

    fn finish(self) -> RawEntry {
        self.entry
    }
}

fn set_once(slot: &mut Option<String>, value: Option<String>) {
    if slot.is_none() {
        *slot = value;
    }
}
