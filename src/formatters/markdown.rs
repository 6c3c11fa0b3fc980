// ABOUTME: Markdown to HTML conversion for stored prompts and responses
// ABOUTME: Escapes embedded raw HTML and turns highlight markers into <mark> elements
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

use super::highlight::{strip_markers, MARK_CLOSE, MARK_OPEN};
use pulldown_cmark::{html, CodeBlockKind, CowStr, Event, Options, Parser, Tag, TagEnd};

const MARK_OPEN_HTML: &str = "<mark>";
const MARK_CLOSE_HTML: &str = "</mark>";

/// CommonMark renderer shared by every request
#[derive(Debug, Clone, Copy)]
pub struct MarkdownRenderer {
    options: Options,
}

impl Default for MarkdownRenderer {
    fn default() -> Self {
        Self::new()
    }
}

impl MarkdownRenderer {
    /// Renderer with tables, strikethrough and task lists enabled
    #[must_use]
    pub fn new() -> Self {
        Self {
            options: Options::ENABLE_TABLES
                | Options::ENABLE_STRIKETHROUGH
                | Options::ENABLE_TASKLISTS,
        }
    }

    /// Convert markdown to an HTML fragment
    ///
    /// Raw HTML in the source is shown as text. Highlight markers become
    /// `<mark>` elements in text and code, and are removed from link targets
    /// and image alt text.
    #[must_use]
    pub fn render(&self, source: &str) -> String {
        let mut rewriter = EventRewriter::default();
        for event in Parser::new_ext(source, self.options) {
            rewriter.push(event);
        }

        let mut output = String::with_capacity(source.len() + source.len() / 2);
        html::push_html(&mut output, rewriter.finish().into_iter());
        output
    }
}

/// Rewrites parser events before they reach the HTML writer
///
/// A highlight is never left open across an element boundary. Marks open
/// when a tag starts or ends are closed before it and reopened before the
/// next piece of text, so a term spanning `**` or a paragraph break still
/// yields well-nested HTML.
#[derive(Default)]
struct EventRewriter<'a> {
    events: Vec<Event<'a>>,
    image_depth: usize,
    open_marks: usize,
    suspended_marks: usize,
}

impl<'a> EventRewriter<'a> {
    fn push(&mut self, event: Event<'a>) {
        match event {
            Event::Text(text) | Event::Html(text) | Event::InlineHtml(text) => {
                self.push_text(text);
            }
            Event::Code(code) => {
                if self.image_depth > 0 {
                    self.push_text(code);
                } else {
                    self.suspend_marks();
                    self.events.push(Event::InlineHtml("<code>".into()));
                    self.push_text(code);
                    self.suspend_marks();
                    self.events.push(Event::InlineHtml("</code>".into()));
                }
            }
            Event::Start(tag) => {
                if matches!(tag, Tag::Image { .. }) {
                    self.image_depth += 1;
                }
                self.suspend_marks();
                self.events.push(Event::Start(clean_tag(tag)));
            }
            Event::End(tag_end) => {
                if matches!(tag_end, TagEnd::Image) {
                    self.image_depth = self.image_depth.saturating_sub(1);
                }
                self.suspend_marks();
                self.events.push(Event::End(tag_end));
            }
            other => self.events.push(other),
        }
    }

    /// Emit text, splitting it at highlight markers
    fn push_text(&mut self, text: CowStr<'a>) {
        if !text.contains([MARK_OPEN, MARK_CLOSE]) {
            if !text.is_empty() && self.image_depth == 0 {
                self.resume_marks();
            }
            self.events.push(Event::Text(text));
            return;
        }

        // Alt text is written as an attribute; markup there would show up literally
        if self.image_depth > 0 {
            self.events
                .push(Event::Text(strip_markers(&text).into_owned().into()));
            return;
        }

        let mut pending = String::new();
        for ch in text.chars() {
            match ch {
                MARK_OPEN => {
                    self.flush(&mut pending);
                    self.suspended_marks += 1;
                }
                MARK_CLOSE => {
                    self.flush(&mut pending);
                    if self.suspended_marks > 0 {
                        self.suspended_marks -= 1;
                    } else if self.open_marks > 0 {
                        self.events.push(Event::InlineHtml(MARK_CLOSE_HTML.into()));
                        self.open_marks -= 1;
                    }
                }
                _ => pending.push(ch),
            }
        }
        self.flush(&mut pending);
    }

    fn flush(&mut self, pending: &mut String) {
        if !pending.is_empty() {
            self.resume_marks();
            self.events
                .push(Event::Text(std::mem::take(pending).into()));
        }
    }

    /// Close every emitted mark, remembering to reopen it before more text
    fn suspend_marks(&mut self) {
        for _ in 0..self.open_marks {
            self.events.push(Event::InlineHtml(MARK_CLOSE_HTML.into()));
        }
        self.suspended_marks += self.open_marks;
        self.open_marks = 0;
    }

    fn resume_marks(&mut self) {
        for _ in 0..self.suspended_marks {
            self.events.push(Event::InlineHtml(MARK_OPEN_HTML.into()));
        }
        self.open_marks += self.suspended_marks;
        self.suspended_marks = 0;
    }

    /// Close any span whose end marker was swallowed by a link target
    fn finish(mut self) -> Vec<Event<'a>> {
        for _ in 0..self.open_marks {
            self.events.push(Event::InlineHtml(MARK_CLOSE_HTML.into()));
        }
        self.events
    }
}

/// Remove highlight markers from tag attributes
fn clean_tag(tag: Tag<'_>) -> Tag<'_> {
    match tag {
        Tag::Link {
            link_type,
            dest_url,
            title,
            id,
        } => Tag::Link {
            link_type,
            dest_url: clean_attr(dest_url),
            title: clean_attr(title),
            id,
        },
        Tag::Image {
            link_type,
            dest_url,
            title,
            id,
        } => Tag::Image {
            link_type,
            dest_url: clean_attr(dest_url),
            title: clean_attr(title),
            id,
        },
        Tag::CodeBlock(CodeBlockKind::Fenced(info)) => {
            Tag::CodeBlock(CodeBlockKind::Fenced(clean_attr(info)))
        }
        other => other,
    }
}

fn clean_attr(value: CowStr<'_>) -> CowStr<'_> {
    if value.contains([MARK_OPEN, MARK_CLOSE]) {
        strip_markers(&value).into_owned().into()
    } else {
        value
    }
}
