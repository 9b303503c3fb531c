//! Comments collected by the parser, in source order.

use serde::Serialize;
use swc_common::comments::{Comment, CommentKind as SwcCommentKind};

use crate::parser::{Location, ParsedSource};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum CommentKind {
    CommentLine,
    CommentBlock,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CommentEntry {
    pub kind: CommentKind,
    /// Comment text without the `//` or `/* */` delimiters.
    pub value: String,
    pub location: Location,
}

impl CommentEntry {
    fn new(comment: &Comment, file: &ParsedSource) -> Self {
        Self {
            kind: match comment.kind {
                SwcCommentKind::Line => CommentKind::CommentLine,
                SwcCommentKind::Block => CommentKind::CommentBlock,
            },
            value: comment.text.to_string(),
            location: file.location(comment.span),
        }
    }
}

pub fn collect_comments(file: &ParsedSource) -> Vec<CommentEntry> {
    file.comments()
        .iter()
        .map(|comment| CommentEntry::new(comment, file))
        .collect()
}
