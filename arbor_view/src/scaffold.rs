// Copyright 2025 the Arbor Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Guide scaffolding: the connector cells drawn left of each row.

use alloc::string::String;
use alloc::vec::Vec;

use arbor_tree::Row;

/// One guide cell left of a row's content.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ScaffoldPiece {
    /// Ancestor level whose sibling list is exhausted.
    Blank,
    /// Ancestor level with further siblings below: a vertical line passes
    /// through.
    Line,
    /// The row's own branch, with siblings following.
    Tee,
    /// The row's own branch, last of its list.
    Elbow,
}

/// The guide cells of one row, outermost level first.
///
/// The result has `depth + 1` cells and always ends in
/// [`Tee`](ScaffoldPiece::Tee) or [`Elbow`](ScaffoldPiece::Elbow). Cells
/// derive from [`Row::lower_siblings`], so no tree access is needed.
pub fn scaffold(row: &Row) -> Vec<ScaffoldPiece> {
    let mut out = Vec::with_capacity(row.depth + 1);
    for (level, &below) in row.lower_siblings.iter().enumerate() {
        out.push(match (level == row.depth, below) {
            (true, 0) => ScaffoldPiece::Elbow,
            (true, _) => ScaffoldPiece::Tee,
            (false, 0) => ScaffoldPiece::Blank,
            (false, _) => ScaffoldPiece::Line,
        });
    }
    out
}

/// Text glyphs for scaffold pieces, one fixed-width cell each.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct GuideSet {
    /// Glyph for [`ScaffoldPiece::Blank`].
    pub blank: &'static str,
    /// Glyph for [`ScaffoldPiece::Line`].
    pub line: &'static str,
    /// Glyph for [`ScaffoldPiece::Tee`].
    pub tee: &'static str,
    /// Glyph for [`ScaffoldPiece::Elbow`].
    pub elbow: &'static str,
}

impl GuideSet {
    /// Plain ASCII guides.
    pub const ASCII: Self = Self {
        blank: "    ",
        line: "|   ",
        tee: "+-- ",
        elbow: "`-- ",
    };

    /// Box-drawing guides.
    pub const UNICODE: Self = Self {
        blank: "    ",
        line: "\u{2502}   ",
        tee: "\u{251c}\u{2500}\u{2500} ",
        elbow: "\u{2514}\u{2500}\u{2500} ",
    };

    /// Render a row's cells into one string.
    pub fn render(&self, pieces: &[ScaffoldPiece]) -> String {
        let mut out = String::new();
        for piece in pieces {
            out.push_str(match piece {
                ScaffoldPiece::Blank => self.blank,
                ScaffoldPiece::Line => self.line,
                ScaffoldPiece::Tee => self.tee,
                ScaffoldPiece::Elbow => self.elbow,
            });
        }
        out
    }
}
