//! Drivers for the external LSL toolchain.
//!
//! Wraps two binaries behind a uniform interface:
//!
//! - **lslint**: the Linden Scripting Language linter. Invoked per file, its
//!   textual output is parsed into [`Diagnostic`]s.
//! - **mcpp**: a C preprocessor, optionally run over the source first so
//!   scripts using `#include`/`#define` lint as their expanded form. The
//!   `#line` markers mcpp leaves in the expanded stream are used to map
//!   reported line numbers back to the original sources.
//!
//! # Example
//!
//! ```ignore
//! use lslcheck_tools::{Linter, ToolSpec};
//! use std::path::Path;
//!
//! let lslint = ToolSpec::lslint().resolve(None)?;
//! let outcome = Linter::new(lslint).lint_file(Path::new("script.lsl"))?;
//! for diag in &outcome.diagnostics {
//!     println!("{}:{}: {}", diag.location.line, diag.location.column, diag.message);
//! }
//! ```

mod diagnostic;
mod parse;
pub mod preprocess;
mod remap;
mod runner;
mod sarif;
mod tool;

pub use diagnostic::{Diagnostic, Location, Severity};
pub use parse::parse_output;
pub use preprocess::{PreprocessMode, Preprocessor};
pub use remap::LineMap;
pub use runner::{LintOutcome, Linter};
pub use sarif::SarifReport;
pub use tool::{LSLINT_MIN_VERSION, ResolvedTool, ToolError, ToolSpec, version_cmp};
