/// Escapes the characters that would let text be interpreted as markup.
///
/// Matches what a browser produces when text is assigned as text content and
/// read back as HTML: only `&`, `<` and `>` are rewritten.
pub fn escape_html(input: &str) -> String {
    let mut out = String::with_capacity(input.len());
    for ch in input.chars() {
        match ch {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            _ => out.push(ch),
        }
    }
    out
}

/// Trims and escapes user input before it reaches a URL or the page.
pub fn sanitize_input(input: &str) -> String {
    escape_html(input.trim())
}

pub(crate) fn sanitize_optional(input: Option<&str>) -> Option<String> {
    input
        .map(sanitize_input)
        .filter(|value| !value.is_empty())
}
