//! Common types and utilities for the asjx compiler backend.
//!
//! This crate provides foundational types used across all asjx crates:
//! - Source spans (`Span`)
//! - Diagnostics (`Diagnostic`, `DiagnosticBag`, `DiagnosticSeverity`, codes)
//! - The emitter token vocabulary (`Token`)
//! - The indenting output buffer (`SourceWriter`)

// Span - Source location tracking (byte offsets)
pub mod span;
pub use span::Span;

// Diagnostics collected while building the reference graph and emitting JS
pub mod diagnostics;
pub use diagnostics::{Diagnostic, DiagnosticBag, DiagnosticSeverity, diagnostic_codes};

// Keyword/operator vocabulary shared by the emitters
pub mod tokens;
pub use tokens::Token;

// SourceWriter - indenting output buffer used by every writer
pub mod source_writer;
pub use source_writer::SourceWriter;
