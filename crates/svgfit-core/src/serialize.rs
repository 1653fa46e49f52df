use crate::element::ElementEvent;
use crate::options::QuoteEscape;
use std::borrow::Cow;

pub fn write_open_tag(out: &mut String, element: &ElementEvent, escape: QuoteEscape) {
    out.push('<');
    out.push_str(&element.name);
    for (key, value) in &element.attributes {
        out.push(' ');
        out.push_str(key);
        out.push_str("=\"");
        out.push_str(&escape_attr_value(&value.as_text(), escape));
        out.push('"');
    }
    out.push('>');
}

pub fn write_close_tag(out: &mut String, name: &str) {
    out.push_str("</");
    out.push_str(name);
    out.push('>');
}

pub fn write_text(out: &mut String, text: &str) {
    for ch in text.chars() {
        match ch {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            _ => out.push(ch),
        }
    }
}

pub fn write_cdata(out: &mut String, data: &str) {
    out.push_str("<![CDATA[");
    out.push_str(data);
    out.push_str("]]>");
}

pub fn escape_attr_value(value: &str, escape: QuoteEscape) -> Cow<'_, str> {
    match escape {
        QuoteEscape::FirstOnly => {
            if value.contains('"') {
                Cow::Owned(value.replacen('"', "&quot;", 1))
            } else {
                Cow::Borrowed(value)
            }
        }
        QuoteEscape::All => {
            if !value.contains(['&', '<', '"']) {
                return Cow::Borrowed(value);
            }
            let mut out = String::with_capacity(value.len() + 8);
            for ch in value.chars() {
                match ch {
                    '&' => out.push_str("&amp;"),
                    '<' => out.push_str("&lt;"),
                    '"' => out.push_str("&quot;"),
                    _ => out.push(ch),
                }
            }
            Cow::Owned(out)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn first_only_escapes_a_single_quote() {
        assert_eq!(
            escape_attr_value(r#"say "hi""#, QuoteEscape::FirstOnly),
            r#"say &quot;hi""#
        );
        assert_eq!(escape_attr_value("a & b", QuoteEscape::FirstOnly), "a & b");
    }

    #[test]
    fn all_escapes_every_special_character() {
        assert_eq!(
            escape_attr_value(r#"say "hi" & <go>"#, QuoteEscape::All),
            "say &quot;hi&quot; &amp; &lt;go>"
        );
    }

    #[test]
    fn writes_attributes_in_order() {
        let element = ElementEvent::new("rect")
            .with_attr("y", 2.5)
            .with_attr("x", "1")
            .with_attr("fill", "red");
        let mut out = String::new();
        write_open_tag(&mut out, &element, QuoteEscape::FirstOnly);
        write_close_tag(&mut out, "rect");
        assert_eq!(out, r#"<rect y="2.5" x="1" fill="red"></rect>"#);
    }
}
