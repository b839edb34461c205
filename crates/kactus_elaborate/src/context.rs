//! Read-only state shared by every elaboration step of one run.

use kactus_config::GeneratorConfig;
use kactus_diagnostics::DiagnosticSink;
use kactus_model::Library;

use crate::const_eval::{ExpressionEvaluator, IntegerEvaluator};

/// The collaborators of one elaboration run.
///
/// Nothing reachable through the context is mutated by elaboration, apart
/// from diagnostics pushed into the sink.
pub struct ElaborationContext<'a> {
    /// Document lookup.
    pub library: &'a dyn Library,
    /// Receives user-facing diagnostics.
    pub sink: &'a DiagnosticSink,
    /// Generator configuration.
    pub config: &'a GeneratorConfig,
    /// Evaluates expressions when a numeric decision is needed.
    pub evaluator: &'a dyn ExpressionEvaluator,
}

impl<'a> ElaborationContext<'a> {
    /// Creates a context using the built-in [`IntegerEvaluator`].
    pub fn new(
        library: &'a dyn Library,
        sink: &'a DiagnosticSink,
        config: &'a GeneratorConfig,
    ) -> Self {
        Self {
            library,
            sink,
            config,
            evaluator: &IntegerEvaluator,
        }
    }

    /// Replaces the expression evaluator.
    pub fn with_evaluator(mut self, evaluator: &'a dyn ExpressionEvaluator) -> Self {
        self.evaluator = evaluator;
        self
    }

    /// Returns `true` if the token looks like a parameter reference id.
    pub fn is_reference_id(&self, token: &str) -> bool {
        let prefix = &self.config.expressions.reference_prefix;
        !prefix.is_empty() && token.starts_with(prefix.as_str())
    }

    /// Evaluates an expression, returning `None` if it is not constant.
    pub fn evaluate(&self, expr: &str) -> Option<i64> {
        self.evaluator.evaluate(expr)
    }
}
