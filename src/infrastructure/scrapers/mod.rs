use crate::error::{ProxyError, Result};
use scraper::{CaseSensitivity, ElementRef, Html};

pub(crate) mod match_detail;
pub(crate) mod match_list;
pub(crate) mod profile;
pub(crate) mod records;

/// The navigation a document extractor needs from an HTML tree.
pub trait DomNode: Copy {
    fn tag_name(&self) -> &str;
    fn has_class(&self, class: &str) -> bool;
    fn attribute(&self, name: &str) -> Option<&str>;
    /// Concatenated text of the node and all its descendants.
    fn text_content(&self) -> String;
    fn element_children(&self) -> Vec<Self>;
    /// Descendant elements in document order, excluding the node itself.
    /// The walk is lazy, so `find_first` stops at the first match.
    fn element_descendants(&self) -> impl Iterator<Item = Self> + '_;

    fn find_first(&self, query: Query) -> Option<Self> {
        self.element_descendants().find(|node| query.matches(node))
    }

    fn find_all(&self, query: Query) -> Vec<Self> {
        self.element_descendants()
            .filter(|node| query.matches(node))
            .collect()
    }

    fn trimmed_text(&self) -> String {
        self.text_content().trim().to_string()
    }
}

impl DomNode for ElementRef<'_> {
    fn tag_name(&self) -> &str {
        self.value().name()
    }

    fn has_class(&self, class: &str) -> bool {
        self.value()
            .has_class(class, CaseSensitivity::AsciiCaseInsensitive)
    }

    fn attribute(&self, name: &str) -> Option<&str> {
        self.value().attr(name)
    }

    fn text_content(&self) -> String {
        self.text().collect()
    }

    fn element_children(&self) -> Vec<Self> {
        (**self).children().filter_map(ElementRef::wrap).collect()
    }

    fn element_descendants(&self) -> impl Iterator<Item = Self> + '_ {
        (**self).descendants().skip(1).filter_map(ElementRef::wrap)
    }
}

/// Tag name with an optional class, the only predicate the extractors use.
#[derive(Debug, Clone, Copy)]
pub struct Query {
    tag: &'static str,
    class: Option<&'static str>,
}

impl Query {
    pub const fn tag(tag: &'static str) -> Self {
        Self { tag, class: None }
    }

    pub const fn with_class(self, class: &'static str) -> Self {
        Self {
            tag: self.tag,
            class: Some(class),
        }
    }

    pub fn matches<N: DomNode>(&self, node: &N) -> bool {
        node.tag_name().eq_ignore_ascii_case(self.tag)
            && self.class.map_or(true, |class| node.has_class(class))
    }
}

/// One extraction procedure per kind of upstream document.
pub trait DocumentExtractor {
    type Output;

    fn extract<N: DomNode>(&self, root: N) -> Result<Self::Output>;
}

/// Parses raw markup and runs `extractor` over the document root.
pub fn parse_document<E: DocumentExtractor>(extractor: &E, body: &str) -> Result<E::Output> {
    let document = Html::parse_document(body);
    extractor.extract(document.root_element())
}

pub(crate) fn required<N: DomNode>(node: Option<N>, context: impl Into<String>) -> Result<N> {
    node.ok_or_else(|| ProxyError::missing(context))
}

pub(crate) fn nth<N: DomNode>(nodes: &[N], index: usize, context: &str) -> Result<N> {
    nodes
        .get(index)
        .copied()
        .ok_or_else(|| ProxyError::missing(format!("{context} (index {index})")))
}

pub(crate) fn link_href<'n, N: DomNode>(node: &'n N, context: &str) -> Result<&'n str> {
    node.attribute("href")
        .ok_or_else(|| ProxyError::missing(format!("{context}: href attribute")))
}

pub(crate) fn parse_timestamp<N: DomNode>(
    container: N,
    context: &str,
) -> Result<chrono::DateTime<chrono::FixedOffset>> {
    let time = required(
        container.find_first(Query::tag("time")),
        format!("{context}: time element"),
    )?;
    let raw = time
        .attribute("datetime")
        .ok_or_else(|| ProxyError::missing(format!("{context}: datetime attribute")))?;
    chrono::DateTime::parse_from_rfc3339(raw.trim())
        .map_err(|e| ProxyError::malformed(format!("{context}: datetime attribute"), e))
}
