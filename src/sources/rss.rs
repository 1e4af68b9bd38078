//! RSS 2.0 decoding: a root element wrapping one `<channel>`, which holds
//! the channel metadata and an ordered list of `<item>`s.

use quick_xml::events::Event;
use quick_xml::reader::Reader;

use crate::domain::{ParsedDocument, ParsedEntry};
use crate::errors::{GatorError, GatorResult};

#[derive(Debug, Clone, Copy, PartialEq)]
enum Field {
    ChannelTitle,
    ChannelLink,
    ChannelDescription,
    EntryTitle,
    EntryLink,
    EntryDescription,
    EntryPubDate,
}

/// Which field, if any, text at `path` belongs to. `path[0]` is the root
/// element, whatever its name.
fn field_at(path: &[String]) -> Option<Field> {
    match path {
        [_, channel, leaf] if channel == "channel" => match leaf.as_str() {
            "title" => Some(Field::ChannelTitle),
            "link" => Some(Field::ChannelLink),
            "description" => Some(Field::ChannelDescription),
            _ => None,
        },
        [_, channel, item, leaf] if channel == "channel" && item == "item" => {
            match leaf.as_str() {
                "title" => Some(Field::EntryTitle),
                "link" => Some(Field::EntryLink),
                "description" => Some(Field::EntryDescription),
                "pubDate" => Some(Field::EntryPubDate),
                _ => None,
            }
        }
        _ => None,
    }
}

fn is_channel(path: &[String]) -> bool {
    matches!(path, [_, channel] if channel == "channel")
}

fn is_item(path: &[String]) -> bool {
    matches!(path, [_, channel, item] if channel == "channel" && item == "item")
}

/// Decode `bytes` as an RSS document.
///
/// Text and CDATA sections are concatenated per element and trimmed. Titles
/// and descriptions are then HTML-unescaped once; links and dates are left
/// as written.
pub fn parse(bytes: &[u8]) -> GatorResult<ParsedDocument> {
    let mut reader = Reader::from_reader(bytes);

    let mut document = ParsedDocument::default();
    let mut path: Vec<String> = Vec::new();
    let mut current_entry: Option<ParsedEntry> = None;
    let mut saw_root = false;
    let mut saw_channel = false;
    let mut buf = Vec::new();

    loop {
        match reader.read_event_into(&mut buf) {
            Ok(Event::Start(e)) => {
                let name = String::from_utf8_lossy(e.name().as_ref()).to_string();
                saw_root = true;
                path.push(name);

                if is_channel(&path) {
                    saw_channel = true;
                } else if is_item(&path) {
                    current_entry = Some(ParsedEntry::default());
                }
            }
            Ok(Event::Empty(e)) => {
                let name = String::from_utf8_lossy(e.name().as_ref()).to_string();
                saw_root = true;

                // `<channel/>` and `<item/>` still count, just with no content.
                path.push(name);
                if is_channel(&path) {
                    saw_channel = true;
                } else if is_item(&path) {
                    document.entries.push(ParsedEntry::default());
                }
                path.pop();
            }
            Ok(Event::End(_)) => {
                if is_item(&path) {
                    if let Some(entry) = current_entry.take() {
                        document.entries.push(entry);
                    }
                }
                path.pop();
            }
            Ok(Event::Text(e)) => {
                if let Some(field) = field_at(&path) {
                    let text = e
                        .unescape()
                        .map_err(|err| GatorError::FeedFormat(format!("XML parse error: {}", err)))?;
                    append(&mut document, current_entry.as_mut(), field, &text);
                }
            }
            Ok(Event::CData(e)) => {
                if let Some(field) = field_at(&path) {
                    let raw = e.into_inner();
                    let text = String::from_utf8_lossy(&raw);
                    append(&mut document, current_entry.as_mut(), field, &text);
                }
            }
            Ok(Event::Eof) => break,
            Err(e) => return Err(GatorError::FeedFormat(format!("XML parse error: {}", e))),
            _ => {}
        }
        buf.clear();
    }

    if !saw_root {
        return Err(GatorError::FeedFormat("document has no root element".to_string()));
    }
    if let Some(open) = path.last() {
        return Err(GatorError::FeedFormat(format!(
            "document ended inside <{}>",
            open
        )));
    }
    if !saw_channel {
        return Err(GatorError::FeedFormat("no <channel> element".to_string()));
    }

    Ok(normalize(document))
}

fn append(document: &mut ParsedDocument, entry: Option<&mut ParsedEntry>, field: Field, text: &str) {
    let target = match (field, entry) {
        (Field::ChannelTitle, _) => &mut document.title,
        (Field::ChannelLink, _) => &mut document.link,
        (Field::ChannelDescription, _) => &mut document.description,
        (Field::EntryTitle, Some(entry)) => &mut entry.title,
        (Field::EntryLink, Some(entry)) => &mut entry.link,
        (Field::EntryDescription, Some(entry)) => &mut entry.description,
        (Field::EntryPubDate, Some(entry)) => &mut entry.pub_date,
        (_, None) => return,
    };
    target.push_str(text);
}

fn normalize(document: ParsedDocument) -> ParsedDocument {
    ParsedDocument {
        title: unescape_html(document.title.trim()),
        link: document.link.trim().to_string(),
        description: unescape_html(document.description.trim()),
        entries: document
            .entries
            .into_iter()
            .map(|entry| ParsedEntry {
                title: unescape_html(entry.title.trim()),
                link: entry.link.trim().to_string(),
                description: unescape_html(entry.description.trim()),
                pub_date: entry.pub_date.trim().to_string(),
            })
            .collect(),
    }
}

/// Longest `&...;` run treated as an entity candidate.
const MAX_ENTITY_LEN: usize = 32;

/// Decode HTML entities (`&amp;`, `&#39;`, `&rsquo;`, ...). Each `&...;` run
/// is decoded on its own; anything that is not a valid entity, such as a bare
/// `&`, is copied through unchanged.
pub fn unescape_html(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    let mut rest = text;

    while let Some(amp) = rest.find('&') {
        out.push_str(&rest[..amp]);
        rest = &rest[amp..];

        match entity_len(rest).and_then(|len| {
            htmlescape::decode_html(&rest[..len])
                .ok()
                .map(|decoded| (len, decoded))
        }) {
            Some((len, decoded)) => {
                out.push_str(&decoded);
                rest = &rest[len..];
            }
            None => {
                out.push('&');
                rest = &rest[1..];
            }
        }
    }
    out.push_str(rest);

    out
}

/// Byte length of the `&name;` run at the start of `text`, if it looks like one.
fn entity_len(text: &str) -> Option<usize> {
    let body = &text[1..];
    let end = body.find(|c: char| c == ';' || c == '&' || c.is_whitespace())?;
    if end == 0 || end > MAX_ENTITY_LEN || !body[end..].starts_with(';') {
        return None;
    }
    Some(end + 2)
}
