//! Pull tokenizer over `quick-xml`.
//!
//! Yields open/close/text events in document order. Self-closing elements are expanded into an
//! open event followed by a close event. Declarations, processing instructions, comments and
//! doctypes are skipped.

use crate::element::{AttrValue, Attributes, ElementEvent, XmlEvent};
use crate::error::{Error, Result};
use quick_xml::Reader;
use quick_xml::events::{BytesStart, Event};
use std::fmt::Display;

pub struct Tokenizer<'a> {
    reader: Reader<&'a [u8]>,
    pending_close: Option<String>,
    depth: usize,
    finished: bool,
}

impl<'a> Tokenizer<'a> {
    pub fn new(text: &'a str) -> Self {
        Self {
            reader: Reader::from_str(text),
            pending_close: None,
            depth: 0,
            finished: false,
        }
    }

    /// Byte offset of the reader inside the source text.
    pub fn position(&self) -> u64 {
        self.reader.buffer_position() as u64
    }

    fn parse_error(&self, message: impl Display) -> Error {
        Error::Parse {
            position: self.position(),
            message: message.to_string(),
        }
    }

    fn element(&self, start: &BytesStart<'_>) -> Result<ElementEvent> {
        let name = String::from_utf8_lossy(start.name().as_ref()).into_owned();
        let mut attributes = Attributes::new();
        for attr in start.attributes() {
            let attr = attr.map_err(|e| self.parse_error(e))?;
            let key = String::from_utf8_lossy(attr.key.as_ref()).into_owned();
            let value = attr
                .unescape_value()
                .map_err(|e| self.parse_error(e))?
                .into_owned();
            attributes.insert(key, AttrValue::Text(value));
        }
        Ok(ElementEvent { name, attributes })
    }

    fn next_event(&mut self) -> Option<Result<XmlEvent>> {
        loop {
            let event = match self.reader.read_event() {
                Ok(event) => event,
                Err(e) => return Some(Err(self.parse_error(e))),
            };
            return match event {
                Event::Start(start) => {
                    self.depth += 1;
                    Some(self.element(&start).map(XmlEvent::Open))
                }
                Event::Empty(start) => Some(self.element(&start).map(|element| {
                    self.pending_close = Some(element.name.clone());
                    XmlEvent::Open(element)
                })),
                Event::End(end) => {
                    if self.depth == 0 {
                        return Some(Err(self.parse_error("unexpected closing tag")));
                    }
                    self.depth -= 1;
                    let name = String::from_utf8_lossy(end.name().as_ref()).into_owned();
                    Some(Ok(XmlEvent::Close(name)))
                }
                Event::Text(text) => {
                    let text = match text.unescape() {
                        Ok(text) => text,
                        Err(e) => return Some(Err(self.parse_error(e))),
                    };
                    if self.depth == 0 {
                        if text.trim().is_empty() {
                            continue;
                        }
                        return Some(Err(self.parse_error("text outside of the root element")));
                    }
                    Some(Ok(XmlEvent::Text(text.into_owned())))
                }
                Event::CData(data) => Some(Ok(XmlEvent::CData(
                    String::from_utf8_lossy(&data).into_owned(),
                ))),
                Event::Eof => {
                    if self.depth > 0 {
                        Some(Err(self.parse_error("unclosed element at end of document")))
                    } else {
                        None
                    }
                }
                Event::Decl(_) | Event::PI(_) | Event::Comment(_) | Event::DocType(_) => continue,
            };
        }
    }
}

impl Iterator for Tokenizer<'_> {
    type Item = Result<XmlEvent>;

    fn next(&mut self) -> Option<Self::Item> {
        if let Some(name) = self.pending_close.take() {
            return Some(Ok(XmlEvent::Close(name)));
        }
        if self.finished {
            return None;
        }
        let item = self.next_event();
        if !matches!(item, Some(Ok(_))) {
            self.finished = true;
        }
        item
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn events(text: &str) -> Vec<XmlEvent> {
        Tokenizer::new(text).collect::<Result<Vec<_>>>().unwrap()
    }

    #[test]
    fn expands_self_closing_elements() {
        let got = events(r#"<svg><rect x="1"/></svg>"#);
        assert_eq!(
            got,
            vec![
                XmlEvent::Open(ElementEvent::new("svg")),
                XmlEvent::Open(ElementEvent::new("rect").with_attr("x", "1")),
                XmlEvent::Close("rect".to_string()),
                XmlEvent::Close("svg".to_string()),
            ]
        );
    }

    #[test]
    fn keeps_attribute_order_and_decodes_entities() {
        let got = events(r##"<svg b="2" a="x &amp; y" xlink:href="#i"></svg>"##);
        let XmlEvent::Open(svg) = &got[0] else {
            panic!("expected open event, got {:?}", got[0]);
        };
        let keys: Vec<_> = svg.attributes.keys().map(String::as_str).collect();
        assert_eq!(keys, ["b", "a", "xlink:href"]);
        assert_eq!(svg.attr("a"), Some(&AttrValue::from("x & y")));
    }

    #[test]
    fn skips_prolog_comments_and_doctype() {
        let got = events(
            "<?xml version=\"1.0\"?>\n<!DOCTYPE svg>\n<!-- icon -->\n<svg><!-- inner --></svg>\n",
        );
        assert_eq!(
            got,
            vec![
                XmlEvent::Open(ElementEvent::new("svg")),
                XmlEvent::Close("svg".to_string()),
            ]
        );
    }

    #[test]
    fn text_and_cdata_are_reported() {
        let got = events("<svg><title>a &lt; b</title><style><![CDATA[.x{}]]></style></svg>");
        assert!(got.contains(&XmlEvent::Text("a < b".to_string())));
        assert!(got.contains(&XmlEvent::CData(".x{}".to_string())));
    }

    #[test]
    fn mismatched_end_tag_is_an_error() {
        let err = Tokenizer::new("<svg><g></svg>")
            .collect::<Result<Vec<_>>>()
            .unwrap_err();
        assert!(matches!(err, Error::Parse { .. }), "{err:?}");
    }

    #[test]
    fn unclosed_element_is_an_error() {
        let err = Tokenizer::new("<svg><g>")
            .collect::<Result<Vec<_>>>()
            .unwrap_err();
        assert!(
            err.to_string().contains("unclosed element"),
            "unexpected error: {err}"
        );
    }

    #[test]
    fn duplicate_attribute_is_an_error() {
        let err = Tokenizer::new(r#"<svg a="1" a="2"></svg>"#)
            .collect::<Result<Vec<_>>>()
            .unwrap_err();
        assert!(matches!(err, Error::Parse { .. }), "{err:?}");
    }

    #[test]
    fn stops_after_first_error() {
        let mut tokenizer = Tokenizer::new("<svg></g>");
        assert!(matches!(tokenizer.next(), Some(Ok(XmlEvent::Open(_)))));
        assert!(matches!(tokenizer.next(), Some(Err(_))));
        assert!(tokenizer.next().is_none());
    }
}
