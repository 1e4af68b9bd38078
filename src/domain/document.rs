/// A feed document as decoded by the parser. Lives for a single poll cycle
/// and is never persisted.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ParsedDocument {
    pub title: String,
    pub link: String,
    pub description: String,
    pub entries: Vec<ParsedEntry>,
}

/// One `<item>` of a channel. The publication date is kept verbatim so that
/// a bad value can be attributed to this entry during ingestion.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ParsedEntry {
    pub title: String,
    pub link: String,
    pub description: String,
    pub pub_date: String,
}

impl ParsedEntry {
    pub fn new(title: &str, link: &str, description: &str, pub_date: &str) -> Self {
        Self {
            title: title.to_string(),
            link: link.to_string(),
            description: description.to_string(),
            pub_date: pub_date.to_string(),
        }
    }
}
