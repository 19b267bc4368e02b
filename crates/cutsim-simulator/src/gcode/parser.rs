//! G-code parser with modal state tracking
//!
//! Converts G-code text into an ordered sequence of absolute sampled
//! points, one per linear motion, with arcs expanded into many points.
//! An axis omitted on a line reuses its last known value; the first
//! value ever seen for an axis back-fills every point emitted before it,
//! modeling a machine that starts at the first coordinate encountered.

use std::sync::OnceLock;

use glam::Vec3;
use regex::Regex;
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use cutsim_core::constants::{DEFAULT_ARC_PRECISION, DEFAULT_FEED_RATE};
use cutsim_core::error::ParseError;

use super::arc::{convert_r_to_ij, sample_arc, ArcDirection};

/// One sampled toolpath point: absolute position plus feed rate
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PathPoint {
    pub x: f32,
    pub y: f32,
    pub z: f32,
    /// Feed rate in units per minute
    pub feed: f32,
}

impl PathPoint {
    pub fn new(x: f32, y: f32, z: f32, feed: f32) -> Self {
        Self { x, y, z, feed }
    }

    pub fn position(&self) -> Vec3 {
        Vec3::new(self.x, self.y, self.z)
    }
}

impl From<[f32; 4]> for PathPoint {
    fn from(value: [f32; 4]) -> Self {
        Self::new(value[0], value[1], value[2], value[3])
    }
}

/// Last known value per modal word; `None` until first seen
#[derive(Debug, Default, Clone, Copy)]
struct ModalState {
    x: Option<f32>,
    y: Option<f32>,
    z: Option<f32>,
    feed: Option<f32>,
}

/// Words collected from one command line
#[derive(Debug, Default, Clone, Copy)]
struct Words {
    g: Option<f32>,
    x: Option<f32>,
    y: Option<f32>,
    z: Option<f32>,
    f: Option<f32>,
    i: Option<f32>,
    j: Option<f32>,
    k: Option<f32>,
    r: Option<f32>,
}

/// G-code parser producing a sampled toolpath
pub struct GcodeParser {
    arc_precision: f32,
}

impl Default for GcodeParser {
    fn default() -> Self {
        Self::new()
    }
}

impl GcodeParser {
    /// Create a parser with the default arc precision
    pub fn new() -> Self {
        Self {
            arc_precision: DEFAULT_ARC_PRECISION,
        }
    }

    /// Create a parser with a custom arc sampling precision
    pub fn with_arc_precision(arc_precision: f32) -> Self {
        Self { arc_precision }
    }

    /// Parse G-code text into sampled path points.
    ///
    /// Recognized motion commands are G0/G1/G2/G3 with X/Y/Z/F/I/J/R
    /// parameters; `;` and `(` start a comment running to the end of the
    /// line. A degenerate R-format arc aborts the parse.
    pub fn parse(&self, text: &str) -> Result<Vec<PathPoint>, ParseError> {
        let mut points: Vec<PathPoint> = Vec::new();
        let mut modal = ModalState::default();
        let mut linear_count = 0usize;
        let mut arc_count = 0usize;

        for (index, raw_line) in text.split(['\n', '\r']).enumerate() {
            let line_no = index + 1;
            let line = strip_comment(raw_line);
            let words = scan_words(line, line_no);
            let Some(g) = words.g else {
                continue;
            };

            if g == 0.0 || g == 1.0 {
                self.linear_move(&words, &mut modal, &mut points);
                linear_count += 1;
            } else if g == 2.0 {
                self.arc_move(&words, ArcDirection::Clockwise, &mut modal, &mut points, line_no)?;
                arc_count += 1;
            } else if g == 3.0 {
                self.arc_move(
                    &words,
                    ArcDirection::CounterClockwise,
                    &mut modal,
                    &mut points,
                    line_no,
                )?;
                arc_count += 1;
            }
        }

        debug!(
            points = points.len(),
            linear = linear_count,
            arcs = arc_count,
            "G-code parse complete"
        );
        Ok(points)
    }

    fn linear_move(&self, words: &Words, modal: &mut ModalState, points: &mut Vec<PathPoint>) {
        if let Some(x) = words.x {
            if modal.x.is_none() {
                for point in points.iter_mut() {
                    point.x = x;
                }
            }
            modal.x = Some(x);
        }
        if let Some(y) = words.y {
            if modal.y.is_none() {
                for point in points.iter_mut() {
                    point.y = y;
                }
            }
            modal.y = Some(y);
        }
        if let Some(z) = words.z {
            if modal.z.is_none() {
                for point in points.iter_mut() {
                    point.z = z;
                }
            }
            modal.z = Some(z);
        }
        if let Some(f) = words.f {
            if modal.feed.is_none() {
                for point in points.iter_mut() {
                    point.feed = f;
                }
            }
            modal.feed = Some(f);
        }

        points.push(PathPoint::new(
            modal.x.unwrap_or(0.0),
            modal.y.unwrap_or(0.0),
            modal.z.unwrap_or(0.0),
            modal.feed.unwrap_or(DEFAULT_FEED_RATE),
        ));
    }

    fn arc_move(
        &self,
        words: &Words,
        direction: ArcDirection,
        modal: &mut ModalState,
        points: &mut Vec<PathPoint>,
        line_no: usize,
    ) -> Result<(), ParseError> {
        if words.k.is_some() {
            warn!(line = line_no, "G2/G3 K parameter is not supported; ignoring");
        }

        let start_x = modal.x.unwrap_or(0.0);
        let start_y = modal.y.unwrap_or(0.0);
        let start_z = modal.z.unwrap_or(0.0);
        let feed = modal.feed.unwrap_or(DEFAULT_FEED_RATE);

        let end_x = words.x.unwrap_or(start_x);
        let end_y = words.y.unwrap_or(start_y);
        let target_z = words.z.unwrap_or(start_z);

        let (i, j) = match (words.i, words.j, words.r) {
            (None, None, Some(r)) => {
                convert_r_to_ij((start_x, start_y), (end_x, end_y), r, direction, line_no)?
            }
            (None, None, None) => {
                warn!(line = line_no, "arc without I/J or R center; skipping");
                modal.x = Some(end_x);
                modal.y = Some(end_y);
                if words.z.is_some() {
                    modal.z = Some(target_z);
                }
                return Ok(());
            }
            (i, j, r) => {
                if r.is_some() {
                    warn!(
                        line = line_no,
                        "G2/G3 R together with I/J is not supported; using I/J"
                    );
                }
                (i.unwrap_or(0.0), j.unwrap_or(0.0))
            }
        };

        let center = (start_x + i, start_y + j);
        let samples = sample_arc(
            (start_x, start_y, start_z),
            (end_x, end_y, target_z),
            center,
            direction,
            self.arc_precision,
        );
        for (x, y, z) in samples {
            points.push(PathPoint::new(x, y, z, feed));
        }

        modal.x = Some(end_x);
        modal.y = Some(end_y);
        if words.z.is_some() {
            modal.z = Some(target_z);
        }
        Ok(())
    }
}

/// Remove `;` and `(` comments running to the end of the line
fn strip_comment(line: &str) -> &str {
    static COMMENT_REGEX: OnceLock<Regex> = OnceLock::new();
    let regex = COMMENT_REGEX.get_or_init(|| Regex::new(r"[;(].*").expect("invalid regex pattern"));
    match regex.find(line) {
        Some(found) => &line[..found.start()],
        None => line,
    }
}

/// Collect the G/X/Y/Z/F/I/J/K/R words of one command line
fn scan_words(line: &str, line_no: usize) -> Words {
    let bytes = line.as_bytes();
    let mut words = Words::default();
    let mut i = 0;
    while i < bytes.len() {
        let letter = bytes[i].to_ascii_uppercase();
        match letter {
            b'G' | b'X' | b'Y' | b'Z' | b'F' | b'I' | b'J' | b'K' | b'R' => {
                let (value, next) = scan_number(bytes, i + 1);
                i = next;
                let Some(value) = value else {
                    warn!(
                        line = line_no,
                        word = %(letter as char),
                        "unparseable number; ignoring word"
                    );
                    continue;
                };
                let slot = match letter {
                    b'G' => &mut words.g,
                    b'X' => &mut words.x,
                    b'Y' => &mut words.y,
                    b'Z' => &mut words.z,
                    b'F' => &mut words.f,
                    b'I' => &mut words.i,
                    b'J' => &mut words.j,
                    b'K' => &mut words.k,
                    _ => &mut words.r,
                };
                *slot = Some(value);
            }
            _ => i += 1,
        }
    }
    words
}

/// Read the number following a word letter: optional blanks, then
/// `[+-.0-9]*`. A bare letter reads as zero.
fn scan_number(bytes: &[u8], mut i: usize) -> (Option<f32>, usize) {
    while i < bytes.len() && (bytes[i] == b' ' || bytes[i] == b'\t') {
        i += 1;
    }
    let begin = i;
    while i < bytes.len() && matches!(bytes[i], b'0'..=b'9' | b'+' | b'-' | b'.') {
        i += 1;
    }
    if begin == i {
        return (Some(0.0), i);
    }
    let parsed = std::str::from_utf8(&bytes[begin..i])
        .ok()
        .and_then(|text| text.parse::<f32>().ok());
    (parsed, i)
}
