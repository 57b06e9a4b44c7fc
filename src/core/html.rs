// src/core/html.rs
//
// Small helpers over `scraper` so page specs read like the markup they scan.
use scraper::{ElementRef, Html, Node};

use super::sanitize::normalize_ws;

/// Never fails: html5ever repairs whatever it is given.
pub fn parse_doc(html: &str) -> Html {
    Html::parse_document(html)
}

/// Collapsed visible text of an element (all descendants).
pub fn text_of(el: ElementRef<'_>) -> String {
    normalize_ws(&el.text().collect::<String>())
}

/// Like [`text_of`] but text nodes are joined with a space, so
/// `A<br>95` reads "A 95" rather than "A95".
pub fn spaced_text_of(el: ElementRef<'_>) -> String {
    normalize_ws(&el.text().collect::<Vec<_>>().join(" "))
}

/// Raw text with line breaks intact (for `<pre>`).
pub fn raw_text_of(el: ElementRef<'_>) -> String {
    el.text().collect::<String>()
}

/// Visible text, skipping every subtree for which `skip` returns true.
/// Used where a hidden detail block sits inside the cell we read.
///
/// Walks with an explicit stack: page nesting depth is not ours to bound.
pub fn text_excluding<F>(el: ElementRef<'_>, skip: &F) -> String
where
    F: Fn(ElementRef<'_>) -> bool,
{
    let mut out = String::new();
    let mut stack: Vec<_> = el.children().rev().collect();
    while let Some(node) = stack.pop() {
        match node.value() {
            Node::Text(t) => out.push_str(t),
            Node::Element(_) => {
                if let Some(child_el) = ElementRef::wrap(node) {
                    if !skip(child_el) {
                        stack.extend(child_el.children().rev());
                    }
                }
            }
            _ => {}
        }
    }
    normalize_ws(&out)
}

/// Lowercased class tokens of one element.
pub fn classes_lc(el: ElementRef<'_>) -> Vec<String> {
    el.value().classes().map(|c| c.to_ascii_lowercase()).collect()
}

/// Whole `class` attribute, lowercased ("" when absent).
pub fn class_attr_lc(el: ElementRef<'_>) -> String {
    el.value().attr("class").unwrap_or("").to_ascii_lowercase()
}

/// True if any class token contains any of `hints` (case-insensitive).
pub fn class_contains_any(el: ElementRef<'_>, hints: &[&str]) -> bool {
    el.value()
        .classes()
        .any(|c| {
            let c = c.to_ascii_lowercase();
            hints.iter().any(|h| c.contains(h))
        })
}

/// Exact class token test (case-insensitive).
pub fn has_class(el: ElementRef<'_>, class: &str) -> bool {
    el.value().classes().any(|c| c.eq_ignore_ascii_case(class))
}

pub fn attr<'a>(el: ElementRef<'a>, name: &str) -> Option<&'a str> {
    el.value().attr(name)
}

/// Direct element children.
pub fn child_elements<'a>(el: ElementRef<'a>) -> impl Iterator<Item = ElementRef<'a>> + 'a {
    el.children().filter_map(ElementRef::wrap)
}

/// Element descendants (excluding `el` itself), document order.
pub fn descendant_elements<'a>(el: ElementRef<'a>) -> impl Iterator<Item = ElementRef<'a>> + 'a {
    el.descendants().skip(1).filter_map(ElementRef::wrap)
}

/// First descendant (not `el`) whose class tokens include `class`.
pub fn find_by_class<'a>(el: ElementRef<'a>, class: &str) -> Option<ElementRef<'a>> {
    descendant_elements(el).find(|d| has_class(*d, class))
}

/// Text of the first descendant carrying `class`, if any.
pub fn text_by_class(el: ElementRef<'_>, class: &str) -> Option<String> {
    find_by_class(el, class).map(text_of)
}
