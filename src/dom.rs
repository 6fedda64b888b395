use crate::error::ScrapeError;
use scraper::{ElementRef, Html, Selector};
use std::fmt::Write;

/// Parsed HTML page. Read-only after construction; all lookups go
/// through the locator functions below.
pub struct Document {
    html: Html,
}

impl Document {
    pub fn parse(text: &str) -> Self {
        Self {
            html: Html::parse_document(text),
        }
    }

    pub fn root(&self) -> ElementRef<'_> {
        self.html.root_element()
    }
}

/// First descendant of `scope` matching the tag name and every attribute
/// filter. Absence is a hard error carrying the lookup context; callers
/// rely on the page shape being stable and treat a miss as fatal.
pub fn find_tag<'a>(
    scope: ElementRef<'a>,
    tag: &str,
    attrs: &[(&str, &str)],
) -> Result<ElementRef<'a>, ScrapeError> {
    let selector = tag_selector(tag, attrs)?;
    scope
        .select(&selector)
        .next()
        .ok_or_else(|| ScrapeError::TagNotFound {
            tag: tag.to_string(),
            filters: describe_filters(attrs),
        })
}

/// Same hard-failure contract as `find_tag`, for lookups that need raw
/// CSS (attribute suffix matches and the like).
pub fn find_css<'a>(scope: ElementRef<'a>, css: &str) -> Result<ElementRef<'a>, ScrapeError> {
    let selector = parse_selector(css)?;
    scope
        .select(&selector)
        .next()
        .ok_or_else(|| ScrapeError::TagNotFound {
            tag: css.to_string(),
            filters: String::new(),
        })
}

/// All descendants matching a CSS selector, in document order. An empty
/// result is not an error here; callers decide what emptiness means.
pub fn select_all<'a>(
    scope: ElementRef<'a>,
    css: &str,
) -> Result<Vec<ElementRef<'a>>, ScrapeError> {
    let selector = parse_selector(css)?;
    Ok(scope.select(&selector).collect())
}

pub fn required_attr<'a>(element: ElementRef<'a>, name: &str) -> Result<&'a str, ScrapeError> {
    element
        .value()
        .attr(name)
        .ok_or_else(|| ScrapeError::MissingAttribute {
            tag: element.value().name().to_string(),
            attr: name.to_string(),
        })
}

/// Concatenated text of all descendant text nodes.
pub fn text_of(element: ElementRef<'_>) -> String {
    element.text().collect()
}

/// Next sibling that is an element, skipping text and comment nodes.
pub fn next_sibling_element<'a>(element: ElementRef<'a>) -> Option<ElementRef<'a>> {
    element.next_siblings().find_map(ElementRef::wrap)
}

fn tag_selector(tag: &str, attrs: &[(&str, &str)]) -> Result<Selector, ScrapeError> {
    let mut css = String::from(tag);
    for (name, value) in attrs {
        // id/class keep CSS semantics (class matches one token of the
        // attribute), everything else is an exact attribute match.
        match *name {
            "id" => {
                let _ = write!(css, "#{}", value);
            }
            "class" => {
                let _ = write!(css, ".{}", value);
            }
            _ => {
                let _ = write!(css, "[{}=\"{}\"]", name, value);
            }
        }
    }
    parse_selector(&css)
}

fn parse_selector(css: &str) -> Result<Selector, ScrapeError> {
    Selector::parse(css).map_err(|e| ScrapeError::Selector(e.to_string()))
}

fn describe_filters(attrs: &[(&str, &str)]) -> String {
    let mut out = String::new();
    for (name, value) in attrs {
        let _ = write!(out, " [{}={}]", name, value);
    }
    out
}
