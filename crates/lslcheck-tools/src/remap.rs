//! Mapping expanded-stream line numbers back to original sources.
//!
//! Best effort by construction: a stream whose markers lie about their
//! origin maps wrong, but never panics.

use crate::Diagnostic;
use crate::preprocess::{Checkpoint, scan_directives};
use std::path::Path;

/// Ordered checkpoints for one expanded stream.
#[derive(Debug, Clone, Default)]
pub struct LineMap {
    checkpoints: Vec<Checkpoint>,
}

impl LineMap {
    pub fn new(checkpoints: Vec<Checkpoint>) -> Self {
        Self { checkpoints }
    }

    pub fn from_stream(stream: &str) -> Self {
        Self::new(scan_directives(stream))
    }

    pub fn is_empty(&self) -> bool {
        self.checkpoints.is_empty()
    }

    /// Translate a 1-based stream line into (file, line) of the original
    /// numbering.
    ///
    /// The governing marker is the nearest one strictly above the stream
    /// line; the marker line itself is not source text, so line `N` starts
    /// one past it. Returns `None` when no marker precedes the line, i.e.
    /// the stream line already is an original line.
    pub fn resolve(&self, stream_line: usize) -> Option<(&Path, usize)> {
        let cp = self
            .checkpoints
            .iter()
            .rev()
            .find(|c| c.stream_line < stream_line)?;
        let line = cp.source_line + (stream_line - cp.stream_line - 1);
        Some((cp.file.as_path(), line))
    }

    /// Rewrite a diagnostic from stream numbering to original numbering.
    ///
    /// Diagnostics that land inside an included file get that file in their
    /// location and an "in file X" note, so flat output still carries the
    /// context.
    pub fn remap(&self, diag: &mut Diagnostic, top_level: &Path) {
        let Some((file, line)) = self.resolve(diag.location.line) else {
            return;
        };
        diag.location.line = line;
        if file != top_level {
            diag.note = Some(format!("in file {}", file.display()));
            diag.location.file = file.to_path_buf();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{Location, Severity};
    use std::path::PathBuf;

    fn diag(line: usize) -> Diagnostic {
        Diagnostic {
            tool: "lslint".to_string(),
            message: "m".to_string(),
            severity: Severity::Error,
            location: Location::new("main.lsl", line, 1),
            note: None,
        }
    }

    // Stream layout used below (1-based stream lines):
    //
    //   1  #line 1 "main.lsl"
    //   2  integer a;          <- main.lsl:1
    //   3  #line 1 "lib.lsl"
    //   4  f() {}              <- lib.lsl:1
    //   5  g() {}              <- lib.lsl:2
    //   6  #line 4 "main.lsl"
    //   7  default {}          <- main.lsl:4
    fn sample_map() -> LineMap {
        LineMap::from_stream(
            "#line 1 \"main.lsl\"\n\
             integer a;\n\
             #line 1 \"lib.lsl\"\n\
             f() {}\n\
             g() {}\n\
             #line 4 \"main.lsl\"\n\
             default {}\n",
        )
    }

    #[test]
    fn resolves_top_level_lines() {
        let map = sample_map();
        assert_eq!(map.resolve(2), Some((Path::new("main.lsl"), 1)));
        assert_eq!(map.resolve(7), Some((Path::new("main.lsl"), 4)));
    }

    #[test]
    fn resolves_included_lines() {
        let map = sample_map();
        assert_eq!(map.resolve(4), Some((Path::new("lib.lsl"), 1)));
        assert_eq!(map.resolve(5), Some((Path::new("lib.lsl"), 2)));
    }

    #[test]
    fn no_marker_means_identity() {
        let map = LineMap::from_stream("integer a;\ninteger b;\n");
        assert!(map.is_empty());
        assert_eq!(map.resolve(2), None);

        let mut d = diag(2);
        map.remap(&mut d, Path::new("main.lsl"));
        assert_eq!(d.location.line, 2);
        assert_eq!(d.note, None);
    }

    #[test]
    fn line_before_first_marker_is_identity() {
        let map = LineMap::from_stream("code\n#line 1 \"main.lsl\"\ncode\n");
        assert_eq!(map.resolve(1), None);
    }

    #[test]
    fn remap_keeps_top_level_plain() {
        let map = sample_map();
        let mut d = diag(7);
        map.remap(&mut d, Path::new("main.lsl"));
        assert_eq!(d.location.line, 4);
        assert_eq!(d.location.file, PathBuf::from("main.lsl"));
        assert_eq!(d.note, None);
    }

    #[test]
    fn remap_annotates_included_file() {
        let map = sample_map();
        let mut d = diag(5);
        map.remap(&mut d, Path::new("main.lsl"));
        assert_eq!(d.location.line, 2);
        assert_eq!(d.location.file, PathBuf::from("lib.lsl"));
        assert_eq!(d.note.as_deref(), Some("in file lib.lsl"));
    }

    #[test]
    fn offsets_accumulate_within_a_block() {
        // Marker at stream line 1 names line 10, so stream line 2 is line 10,
        // stream line 5 is line 13.
        let map = LineMap::from_stream("#line 10 \"main.lsl\"\na\nb\nc\nd\n");
        assert_eq!(map.resolve(5), Some((Path::new("main.lsl"), 13)));
    }
}
