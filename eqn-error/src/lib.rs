//! Contains the common [`ErrorKind`] trait used by all errors to display user-facing error
//! messages.
//!
//! Every stage of the solver (parsing, the symbolic engine, the request pipeline) describes its
//! failures as small structs implementing [`ErrorKind`], usually through
//! `#[derive(ErrorKind)]` from `eqn-attrs`. An [`Error`] pairs one of those kinds with the
//! regions of source code it points at, and can be rendered two ways:
//!
//! - [`Error::message`] produces the single human-readable line that ends up in a JSON
//! response.
//! - [`Error::build_report`] produces an [`ariadne`] report for terminals.

#[cfg(test)]
extern crate self as eqn_error;

use ariadne::{Color, Report, Source};
use std::{any::Any, fmt::{self, Debug, Display}, ops::Range};

/// The color to use to highlight expressions.
pub const EXPR: Color = Color::RGB(52, 235, 152);

/// Represents any kind of error that can occur during some operation.
pub trait ErrorKind: Debug + Send {
    /// Returns the error as an [`Any`], so that callers can downcast to a concrete kind.
    fn as_any(&self) -> &dyn Any;

    /// The one-line message describing the error.
    fn message(&self) -> String;

    /// Builds the report for this error.
    fn build_report<'a>(
        &self,
        src_id: &'a str,
        spans: &[Range<usize>],
    ) -> Report<(&'a str, Range<usize>)>;
}

/// An error associated with regions of source code that can be highlighted.
#[derive(Debug)]
pub struct Error {
    /// The regions of the source code that this error originated from.
    pub spans: Vec<Range<usize>>,

    /// The kind of error that occurred.
    pub kind: Box<dyn ErrorKind>,
}

impl Error {
    /// Creates a new error with the given spans and kind.
    pub fn new(spans: Vec<Range<usize>>, kind: impl ErrorKind + 'static) -> Self {
        Self { spans, kind: Box::new(kind) }
    }

    /// Creates a new error that does not point at any source code.
    pub fn spanless(kind: impl ErrorKind + 'static) -> Self {
        Self::new(Vec::new(), kind)
    }

    /// Returns the one-line message describing the error.
    pub fn message(&self) -> String {
        self.kind.message()
    }

    /// Returns true if the error is of the given kind.
    pub fn is<K: ErrorKind + 'static>(&self) -> bool {
        self.kind.as_any().is::<K>()
    }

    /// Returns a reference to the kind of error, if it is of the given kind.
    pub fn downcast_ref<K: ErrorKind + 'static>(&self) -> Option<&K> {
        self.kind.as_any().downcast_ref::<K>()
    }

    /// Shifts every span of this error by the given offset.
    ///
    /// Used when a fragment of a larger source was parsed on its own.
    pub fn offset_spans(mut self, offset: usize) -> Self {
        for span in &mut self.spans {
            *span = span.start + offset..span.end + offset;
        }
        self
    }

    /// Build a report from this error kind.
    pub fn build_report<'a>(&self, src_id: &'a str) -> Report<(&'a str, Range<usize>)> {
        self.kind.build_report(src_id, &self.spans)
    }

    /// Report the error to stderr, highlighting the spans in the given source.
    ///
    /// The `ariadne` crate's [`Report`] type does not have a `Display` implementation, so we can
    /// only use its `eprint` method to print to stderr.
    pub fn report_to_stderr(&self, src_id: &str, src: &str) {
        if let Err(err) = self.build_report(src_id).eprint((src_id, Source::from(src))) {
            eprintln!("{}: {}", self.message(), err);
        }
    }

    /// Renders the report into a string, including any ANSI color codes emitted by
    /// [`ariadne`].
    pub fn report_to_string(&self, src_id: &str, src: &str) -> String {
        let mut buf = Vec::new();
        match self.build_report(src_id).write((src_id, Source::from(src)), &mut buf) {
            Ok(()) => String::from_utf8_lossy(&buf).into_owned(),
            Err(_) => self.message(),
        }
    }
}

impl Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.message())
    }
}

impl std::error::Error for Error {}

#[cfg(test)]
mod tests {
    use super::*;
    use eqn_attrs::ErrorKind;

    #[derive(Debug, Clone, ErrorKind, PartialEq)]
    #[error(
        message = format!("unknown thing `{}`", name),
        labels = ["this thing"],
        help = "remove it",
    )]
    struct UnknownThing {
        name: String,
    }

    #[derive(Debug, Clone, ErrorKind, PartialEq)]
    #[error(message = "nothing to see here")]
    struct Nothing;

    #[test]
    fn message_uses_fields() {
        let err = Error::new(vec![0..3], UnknownThing { name: "foo".to_string() });
        assert_eq!(err.message(), "unknown thing `foo`");
        assert_eq!(err.to_string(), "unknown thing `foo`");
    }

    #[test]
    fn downcast_to_kind() {
        let err = Error::spanless(Nothing);
        assert!(err.is::<Nothing>());
        assert!(!err.is::<UnknownThing>());
        assert_eq!(err.downcast_ref::<Nothing>(), Some(&Nothing));
    }

    #[test]
    fn offset_moves_spans() {
        let err = Error::new(vec![0..3, 5..6], Nothing).offset_spans(4);
        assert_eq!(err.spans, vec![4..7, 9..10]);
    }

    #[test]
    fn report_mentions_message_and_help() {
        let src = "foo + 1";
        let err = Error::new(vec![0..3], UnknownThing { name: "foo".to_string() });
        let report = err.report_to_string("input", src);
        let plain = String::from_utf8(strip_ansi_escapes::strip(report)).unwrap();

        assert!(plain.contains("unknown thing `foo`"));
        assert!(plain.contains("this thing"));
        assert!(plain.contains("remove it"));
    }

    #[test]
    fn spanless_report_does_not_panic() {
        let err = Error::spanless(Nothing);
        let report = err.report_to_string("input", "");
        assert!(report.contains("nothing to see here"));
    }
}
