//! Tokenizer and per-record parsing
//!
//! The grammar is whitespace separated; line numbers are kept only so that
//! a malformed record can be skipped up to the end of its line.

use std::str::FromStr;

use glam::DVec2;

use crate::error::{LoadError, RecordError};
use crate::sim::state::{CoralStatus, DevPhase, RotationDir, ScavengerStatus};

/// Raw alga record
#[derive(Debug, Clone, PartialEq)]
pub struct AlgaeRecord {
    pub pos: DVec2,
    pub age: i64,
}

/// Raw coral record; segments as (angle, length) in chain order
#[derive(Debug, Clone, PartialEq)]
pub struct CoralRecord {
    pub pos: DVec2,
    pub age: i64,
    pub id: u32,
    pub status: CoralStatus,
    pub rotation: RotationDir,
    pub phase: DevPhase,
    pub segments: Vec<(f64, f64)>,
}

/// Raw scavenger record
#[derive(Debug, Clone, PartialEq)]
pub struct ScavengerRecord {
    pub pos: DVec2,
    pub age: i64,
    pub radius: f64,
    pub status: ScavengerStatus,
    pub target: Option<u32>,
}

/// Every record that parsed, section by section
#[derive(Debug, Default)]
pub struct ParsedFile {
    pub algae: Vec<AlgaeRecord>,
    pub corals: Vec<CoralRecord>,
    pub scavengers: Vec<ScavengerRecord>,
    /// Records dropped because they could not be parsed
    pub skipped: usize,
}

/// Token stream over the data lines of a file
pub struct Tokens<'a> {
    tokens: Vec<(usize, &'a str)>,
    pos: usize,
}

impl<'a> Tokens<'a> {
    /// Split `text` into tokens, ignoring blank lines and `#` comments
    pub fn new(text: &'a str) -> Self {
        let tokens = text
            .lines()
            .enumerate()
            .filter(|(_, line)| !line.trim_start().starts_with('#'))
            .flat_map(|(idx, line)| line.split_whitespace().map(move |tok| (idx + 1, tok)))
            .collect();
        Self { tokens, pos: 0 }
    }

    pub fn is_empty(&self) -> bool {
        self.pos >= self.tokens.len()
    }

    fn next(&mut self, field: &'static str) -> Result<(usize, &'a str), RecordError> {
        let tok = self
            .tokens
            .get(self.pos)
            .copied()
            .ok_or(RecordError::MissingToken { field })?;
        self.pos += 1;
        Ok(tok)
    }

    fn parse<T: FromStr>(&mut self, field: &'static str) -> Result<T, RecordError> {
        let (line, tok) = self.next(field)?;
        tok.parse().map_err(|_| RecordError::BadToken {
            line,
            field,
            token: tok.to_string(),
        })
    }

    fn code<T>(
        &mut self,
        field: &'static str,
        decode: impl Fn(i64) -> Option<T>,
    ) -> Result<T, RecordError> {
        let (line, _) = self.tokens.get(self.pos).copied().unwrap_or((0, ""));
        let value: i64 = self.parse(field)?;
        decode(value).ok_or(RecordError::BadCode { line, field, value })
    }

    fn point(&mut self) -> Result<DVec2, RecordError> {
        let x = self.parse("x")?;
        let y = self.parse("y")?;
        Ok(DVec2::new(x, y))
    }

    /// Drop the remaining tokens of `line`
    fn skip_line(&mut self, line: usize) {
        while self.tokens.get(self.pos).is_some_and(|&(l, _)| l == line) {
            self.pos += 1;
        }
    }

    /// Line of the most recently consumed token
    fn current_line(&self) -> Option<usize> {
        self.pos.checked_sub(1).and_then(|i| self.tokens.get(i)).map(|&(l, _)| l)
    }

    fn count(&mut self, section: &'static str) -> Result<usize, LoadError> {
        let (line, tok) = self
            .next(section)
            .map_err(|_| LoadError::MissingCount { section })?;
        tok.parse().map_err(|_| LoadError::BadCount {
            section,
            line,
            token: tok.to_string(),
        })
    }
}

pub fn parse_algae(tokens: &mut Tokens) -> Result<AlgaeRecord, RecordError> {
    let pos = tokens.point()?;
    let age = tokens.parse("age")?;
    Ok(AlgaeRecord { pos, age })
}

pub fn parse_coral(tokens: &mut Tokens) -> Result<CoralRecord, RecordError> {
    let pos = tokens.point()?;
    let age = tokens.parse("age")?;
    let id = tokens.parse("coral id")?;
    let status = tokens.code("coral status", CoralStatus::from_code)?;
    let rotation = tokens.code("rotation direction", RotationDir::from_code)?;
    let phase = tokens.code("development phase", DevPhase::from_code)?;
    let nb_seg: usize = tokens.parse("segment count")?;
    if nb_seg == 0 {
        return Err(RecordError::NoSegments {
            line: tokens.current_line().unwrap_or(0),
        });
    }

    // Counts come from the file: grow as tokens are actually read
    let mut segments = Vec::new();
    for _ in 0..nb_seg {
        let angle = tokens.parse("segment angle")?;
        let length = tokens.parse("segment length")?;
        segments.push((angle, length));
    }

    Ok(CoralRecord {
        pos,
        age,
        id,
        status,
        rotation,
        phase,
        segments,
    })
}

pub fn parse_scavenger(tokens: &mut Tokens) -> Result<ScavengerRecord, RecordError> {
    let pos = tokens.point()?;
    let age = tokens.parse("age")?;
    let radius = tokens.parse("radius")?;
    let status = tokens.code("scavenger status", ScavengerStatus::from_code)?;
    let target = match status {
        ScavengerStatus::Feeding => Some(tokens.parse("target coral id")?),
        ScavengerStatus::Seeking => None,
    };
    Ok(ScavengerRecord {
        pos,
        age,
        radius,
        status,
        target,
    })
}

/// Read `count` records with `parse`, skipping the ones that fail
fn read_section<T>(
    tokens: &mut Tokens,
    section: &'static str,
    count: usize,
    skipped: &mut usize,
    parse: impl Fn(&mut Tokens) -> Result<T, RecordError>,
) -> Vec<T> {
    let mut records = Vec::new();
    for index in 0..count {
        match parse(tokens) {
            Ok(record) => records.push(record),
            Err(err) => {
                log::warn!("Skipping {section} record {index}: {err}");
                *skipped += 1;
                if let RecordError::MissingToken { .. } = err {
                    // Nothing left to read
                    *skipped += count - index - 1;
                    break;
                }
                if let Some(line) = tokens.current_line() {
                    tokens.skip_line(line);
                }
            }
        }
    }
    records
}

/// Parse the three sections of a simulation file
///
/// Malformed records are skipped; an unreadable section count aborts.
pub fn parse_file(text: &str) -> Result<ParsedFile, LoadError> {
    let mut tokens = Tokens::new(text);
    let mut parsed = ParsedFile::default();

    let count = tokens.count("algae")?;
    parsed.algae = read_section(&mut tokens, "algae", count, &mut parsed.skipped, parse_algae);

    let count = tokens.count("coral")?;
    parsed.corals = read_section(&mut tokens, "coral", count, &mut parsed.skipped, parse_coral);

    let count = tokens.count("scavenger")?;
    parsed.scavengers = read_section(
        &mut tokens,
        "scavenger",
        count,
        &mut parsed.skipped,
        parse_scavenger,
    );

    if !tokens.is_empty() {
        log::warn!("Ignoring trailing data after the scavenger section");
    }
    Ok(parsed)
}
