//! Built-in default style sheet.
//!
//! [WHATWG HTML § 15 Rendering](https://html.spec.whatwg.org/multipage/rendering.html)
//!
//! "User agents are expected to have a default style sheet that presents
//! elements of HTML documents in ways consistent with general user
//! expectations."
//!
//! This is the sheet callers normally pass to
//! [`StyleResolver::new`](crate::resolver::StyleResolver::new) as the
//! default; document sheets appended afterwards override it, since append
//! order is the only cascade precedence. It is restricted to the properties
//! the resolver recognizes.

/// Default rules for common document elements.
///
/// [§ 15.3.1 Hidden elements](https://html.spec.whatwg.org/multipage/rendering.html#hidden-elements)
/// [§ 15.3.3 Flow content](https://html.spec.whatwg.org/multipage/rendering.html#flow-content-3)
pub const DEFAULT_SHEET: &str = r"
/* Elements that never generate boxes. */
head, style, script, title, meta, link {
    display: none;
}

/* Phrasing content participates in the parent's inline flow. */
span, a, b, i, em, strong, code, u, small {
    display: inline;
}

li {
    display: list-item;
}

/* Heading sizes as percentages of the base font size. */
h1 { font-size: 200%; font-weight: bold; }
h2 { font-size: 150%; font-weight: bold; }
h3 { font-size: 117%; font-weight: bold; }

b, strong { font-weight: bold; }
i, em { font-style: italic; }
u { text-decoration: underline; }

a {
    color: blue;
    text-decoration: underline;
}

code { font-family: monospace; }
";
