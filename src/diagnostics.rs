//! Fancy diagnostics support using `ariadne`.
//!
//! This module converts warnings and errors carrying [`SourceRangeMixin`](crate::command::mixin::SourceRangeMixin)
//! (such as [`ParseWarningWithRange`], [`LexErrorWithRange`], [`ParseErrorWithRange`], and the
//! aggregated [`SusWarning`]/[`SusError`]) into `ariadne::Report`.
//!
//! The byte ranges are handed to ariadne as they are, and ariadne calculates rows and columns
//! for display.
//!
//! # Usage Example
//!
//! ```rust
//! use sus_rs::{diagnostics::emit_sus_warnings, parse_sus};
//!
//! let source = "#BPM01:120\n#00008:01\n#000311:2200\n";
//! let output = parse_sus(source).expect("the chart must be valid");
//!
//! // Outputs "slide end on channel 1 ... has no start"
//! emit_sus_warnings("test.sus", source, &output.warnings);
//! ```

use std::ops::Range;

use ariadne::{Color, Label, Report, ReportKind, Source};

use crate::{
    SusError, SusWarning,
    lex::LexErrorWithRange,
    parse::{ParseErrorWithRange, ParseWarning, ParseWarningWithRange},
};

/// Simple source container that holds the filename and source text.
///
/// ```rust
/// use sus_rs::diagnostics::SimpleSource;
///
/// let source_text = "#TITLE test\n#BPM01:120\n";
/// let source = SimpleSource::new("test.sus", source_text);
/// assert_eq!(source.text(), source_text);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SimpleSource<'a> {
    /// Name of the source file.
    name: &'a str,
    /// Source text content.
    text: &'a str,
}

impl<'a> SimpleSource<'a> {
    /// Create a new source container instance.
    #[must_use]
    pub const fn new(name: &'a str, text: &'a str) -> Self {
        Self { name, text }
    }

    /// Get source text content.
    #[must_use]
    pub const fn text(&self) -> &'a str {
        self.text
    }

    /// Get source file name.
    #[must_use]
    pub const fn name(&self) -> &'a str {
        self.name
    }
}

/// Trait for converting positioned errors to `ariadne::Report`.
pub trait ToAriadne {
    /// Convert error to ariadne Report.
    ///
    /// `src` provides the file name. Ariadne handles row/column calculation.
    fn to_report<'a>(&self, src: &SimpleSource<'a>) -> Report<'a, (String, Range<usize>)>;
}

/// Helper to build a styled ariadne `Report` consistently.
#[must_use]
pub fn build_report<'a>(
    src: &SimpleSource<'a>,
    kind: ReportKind<'a>,
    range: Range<usize>,
    title: &str,
    label_message: impl ToString,
    color: Color,
) -> Report<'a, (String, Range<usize>)> {
    let filename = src.name().to_string();
    Report::build(kind, (filename.clone(), range.clone()))
        .with_message(title)
        .with_label(
            Label::new((filename, range))
                .with_message(label_message.to_string())
                .with_color(color),
        )
        .finish()
}

impl ToAriadne for ParseWarningWithRange {
    fn to_report<'a>(&self, src: &SimpleSource<'a>) -> Report<'a, (String, Range<usize>)> {
        let (start, end) = self.as_span();
        let label = match self.content() {
            ParseWarning::UnclosedSlide { .. } => "this slide is dropped",
            ParseWarning::UnmatchedSlideEnd { .. } => "this end is ignored",
            ParseWarning::UnplacedBpm(_) => "this BPM is not used",
            ParseWarning::ImplicitInitialBpm(_) => "this BPM is used from the beat 0",
            ParseWarning::DuplicatingBpmDef(_)
            | ParseWarning::DuplicatingBpmPlacement(_)
            | ParseWarning::DuplicatingMeasureDef(_) => "duplicated here",
        };
        build_report(
            src,
            ReportKind::Warning,
            start..end,
            &format!("parse: {}", self.content()),
            label,
            Color::Blue,
        )
    }
}

impl ToAriadne for LexErrorWithRange {
    fn to_report<'a>(&self, src: &SimpleSource<'a>) -> Report<'a, (String, Range<usize>)> {
        let (start, end) = self.as_span();
        build_report(
            src,
            ReportKind::Error,
            start..end,
            &format!("lex: {}", self.content()),
            "malformed value",
            Color::Red,
        )
    }
}

impl ToAriadne for ParseErrorWithRange {
    fn to_report<'a>(&self, src: &SimpleSource<'a>) -> Report<'a, (String, Range<usize>)> {
        let (start, end) = self.as_span();
        build_report(
            src,
            ReportKind::Error,
            start..end,
            &format!("parse: {}", self.content()),
            self.content(),
            Color::Red,
        )
    }
}

impl ToAriadne for SusWarning {
    fn to_report<'a>(&self, src: &SimpleSource<'a>) -> Report<'a, (String, Range<usize>)> {
        match self {
            Self::Parse(warning) => warning.to_report(src),
        }
    }
}

impl ToAriadne for SusError {
    fn to_report<'a>(&self, src: &SimpleSource<'a>) -> Report<'a, (String, Range<usize>)> {
        match self {
            Self::Lex(err) => err.to_report(src),
            Self::Parse(err) => err.to_report(src),
        }
    }
}

/// Convenience method: batch render a list of [`SusWarning`] to stderr.
pub fn emit_sus_warnings<'a>(
    name: &'a str,
    source: &'a str,
    warnings: impl IntoIterator<Item = &'a SusWarning>,
) {
    let simple = SimpleSource::new(name, source);
    let ariadne_source = Source::from(source);
    for w in warnings {
        let report = w.to_report(&simple);
        let _ = report.eprint((name.to_string(), ariadne_source.clone()));
    }
}

/// Renders a [`SusError`] to stderr.
pub fn emit_sus_error(name: &str, source: &str, error: &SusError) {
    let simple = SimpleSource::new(name, source);
    let report = error.to_report(&simple);
    let _ = report.eprint((name.to_string(), Source::from(source)));
}

/// Collect `ariadne::Report` instances for a list of [`SusWarning`] without printing.
#[must_use]
pub fn collect_sus_reports<'a>(
    name: &'a str,
    source: &'a str,
    warnings: impl IntoIterator<Item = &'a SusWarning>,
) -> Vec<Report<'a, (String, Range<usize>)>> {
    let simple = SimpleSource::new(name, source);
    warnings.into_iter().map(|w| w.to_report(&simple)).collect()
}
