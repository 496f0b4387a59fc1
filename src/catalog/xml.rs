//! Minimal element tree over `quick-xml` for definition documents.
//!
//! Definition documents are small and attribute-driven, so the loader reads
//! the whole document into an `XmlElement` tree and then walks it. Attribute
//! access is lenient: a missing attribute yields the caller's default and an
//! unparseable one yields the default with a warning.

use quick_xml::events::{BytesStart, Event};
use quick_xml::Reader;
use rustc_hash::FxHashMap;
use tracing::warn;

/// One element with its attributes and child elements. Text is ignored.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct XmlElement {
    pub name: String,
    pub attributes: FxHashMap<String, String>,
    pub children: Vec<XmlElement>,
}

/// Values that can be read from an attribute string.
pub trait FromAttribute: Sized {
    fn from_attribute(value: &str) -> Option<Self>;
}

impl FromAttribute for i32 {
    fn from_attribute(value: &str) -> Option<Self> {
        value.trim().parse().ok()
    }
}

impl FromAttribute for u8 {
    fn from_attribute(value: &str) -> Option<Self> {
        value.trim().parse().ok()
    }
}

impl FromAttribute for f32 {
    fn from_attribute(value: &str) -> Option<Self> {
        value.trim().parse().ok()
    }
}

impl FromAttribute for bool {
    fn from_attribute(value: &str) -> Option<Self> {
        match value.trim().to_ascii_lowercase().as_str() {
            "true" | "1" => Some(true),
            "false" | "0" => Some(false),
            _ => None,
        }
    }
}

impl XmlElement {
    /// Raw attribute value.
    #[must_use]
    pub fn attr(&self, key: &str) -> Option<&str> {
        self.attributes.get(key).map(String::as_str)
    }

    /// String attribute, or `default` when absent.
    #[must_use]
    pub fn text_or(&self, key: &str, default: &str) -> String {
        self.attr(key).unwrap_or(default).to_string()
    }

    /// Typed attribute, or `default` when absent or unparseable.
    pub fn parse_or<T: FromAttribute>(&self, key: &str, default: T) -> T {
        match self.attr(key) {
            None => default,
            Some(raw) => T::from_attribute(raw).unwrap_or_else(|| {
                warn!(element = %self.name, key, raw, "Unparseable attribute, using default");
                default
            }),
        }
    }

    /// Four comma separated floats, or `default`.
    pub fn rect_or(&self, key: &str, default: [f32; 4]) -> [f32; 4] {
        let Some(raw) = self.attr(key) else {
            return default;
        };
        let parts: Vec<f32> = raw.split(',').filter_map(f32::from_attribute).collect();
        match <[f32; 4]>::try_from(parts) {
            Ok(rect) => rect,
            Err(_) => {
                warn!(element = %self.name, key, raw, "Unparseable rectangle, using default");
                default
            }
        }
    }

    fn from_start(start: &BytesStart<'_>) -> Result<Self, quick_xml::Error> {
        let mut element = Self {
            name: String::from_utf8_lossy(start.name().as_ref()).into_owned(),
            ..Self::default()
        };
        for attr in start.attributes() {
            let attr = attr?;
            let key = String::from_utf8_lossy(attr.key.as_ref()).into_owned();
            let value = attr.unescape_value()?.into_owned();
            element.attributes.insert(key, value);
        }
        Ok(element)
    }
}

/// Parse a whole document and return its root element.
pub fn parse_document(text: &str) -> Result<XmlElement, String> {
    let mut reader = Reader::from_str(text);
    reader.trim_text(true);

    let mut open: Vec<XmlElement> = Vec::new();
    let mut root: Option<XmlElement> = None;

    loop {
        let event = reader
            .read_event()
            .map_err(|e| format!("at byte {}: {e}", reader.buffer_position()))?;
        match event {
            Event::Start(ref e) => {
                open.push(XmlElement::from_start(e).map_err(|e| e.to_string())?);
            }
            Event::Empty(ref e) => {
                let element = XmlElement::from_start(e).map_err(|e| e.to_string())?;
                attach(&mut open, &mut root, element)?;
            }
            Event::End(_) => {
                if let Some(element) = open.pop() {
                    attach(&mut open, &mut root, element)?;
                }
            }
            Event::Eof => break,
            _ => {}
        }
    }

    if let Some(unclosed) = open.last() {
        return Err(format!("element <{}> is never closed", unclosed.name));
    }
    root.ok_or_else(|| "document has no root element".to_string())
}

fn attach(
    open: &mut [XmlElement],
    root: &mut Option<XmlElement>,
    element: XmlElement,
) -> Result<(), String> {
    match open.last_mut() {
        Some(parent) => parent.children.push(element),
        None if root.is_none() => *root = Some(element),
        None => return Err(format!("second root element <{}>", element.name)),
    }
    Ok(())
}
