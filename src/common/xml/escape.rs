use aho_corasick::AhoCorasick;
use once_cell::sync::Lazy;

// Static initialization: automaton is built only once, thread-safe
static XML_ESCAPER: Lazy<AhoCorasick> = Lazy::new(|| {
    AhoCorasick::builder()
        .build(["&", "<", ">", "\"", "'"])
        .expect("Failed to build XML escaper")
});

const REPLACEMENTS: [&str; 5] = ["&amp;", "&lt;", "&gt;", "&quot;", "&apos;"];

/// Escape XML special characters.
///
/// # Examples
///
/// ```
/// use litchi_render::common::xml::escape_xml;
/// assert_eq!(escape_xml("a & b"), "a &amp; b");
/// assert_eq!(escape_xml("<tspan>\"hi\""), "&lt;tspan&gt;&quot;hi&quot;");
/// ```
#[inline]
pub fn escape_xml(s: &str) -> String {
    XML_ESCAPER.replace_all(s, &REPLACEMENTS)
}

/// Escape XML special characters directly into an output buffer.
#[inline]
pub fn write_xml_escaped(buf: &mut String, s: &str) {
    if !s.bytes().any(|b| matches!(b, b'&' | b'<' | b'>' | b'"' | b'\'')) {
        buf.push_str(s);
        return;
    }
    XML_ESCAPER.replace_all_with(s, buf, |mat, _, dst| {
        dst.push_str(REPLACEMENTS[mat.pattern().as_usize()]);
        true
    });
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_write_xml_escaped() {
        let mut buf = String::new();
        write_xml_escaped(&mut buf, "Hello <world> & \"friends\"");
        assert_eq!(buf, "Hello &lt;world&gt; &amp; &quot;friends&quot;");

        buf.clear();
        write_xml_escaped(&mut buf, "plain");
        assert_eq!(buf, "plain");
    }
}
