//! Per-call resolution state.

use std::collections::HashMap;
use std::mem;

use super::diagnostic::{Diagnostic, DiagnosticKind};
use crate::types::Value;

/// Maximum depth of non-cyclic reference chains. Cycles are caught by the
/// resolution stack; this guard bounds pathological acyclic chains.
const MAX_DEPTH: usize = 64;

/// State carried through one top-level resolve call.
///
/// Tracks the argument map, the resolution stack for cycle detection, and
/// the accumulated diagnostics. A fresh scope is created per call and never
/// shared, so concurrent resolution of different messages never interleaves
/// state.
pub(crate) struct Scope<'a> {
    /// Arguments provided by the caller.
    args: &'a HashMap<String, Value>,
    /// Arguments bound by a parameterized term reference. While set, they
    /// are the only variables visible; a term never sees its caller's
    /// arguments.
    local_args: Option<HashMap<String, Value>>,
    /// Resolution stack of `id`, `id.attribute`, and `-id` keys currently
    /// being resolved.
    stack: Vec<String>,
    /// Diagnostics accumulated so far, in resolution order.
    diagnostics: Vec<Diagnostic>,
}

impl<'a> Scope<'a> {
    pub fn new(args: &'a HashMap<String, Value>) -> Self {
        Self {
            args,
            local_args: None,
            stack: Vec::new(),
            diagnostics: Vec::new(),
        }
    }

    /// Look up a variable in the currently visible argument map.
    pub fn arg(&self, name: &str) -> Option<&Value> {
        match &self.local_args {
            Some(local) => local.get(name),
            None => self.args.get(name),
        }
    }

    /// The currently visible argument names, sorted.
    pub fn arg_names(&self) -> Vec<String> {
        let mut names: Vec<String> = match &self.local_args {
            Some(local) => local.keys().cloned().collect(),
            None => self.args.keys().cloned().collect(),
        };
        names.sort_unstable();
        names
    }

    /// Replace the term-local argument map, returning the previous one so
    /// the caller can restore it after the term resolves.
    pub fn swap_local_args(
        &mut self,
        local: Option<HashMap<String, Value>>,
    ) -> Option<HashMap<String, Value>> {
        mem::replace(&mut self.local_args, local)
    }

    /// Push a resolution key, detecting cycles and runaway depth.
    ///
    /// On success the caller must call `exit_call` on every path out,
    /// including early returns.
    pub fn enter_call(&mut self, key: &str) -> Result<(), DiagnosticKind> {
        if self.stack.len() >= MAX_DEPTH {
            return Err(DiagnosticKind::MaxDepthExceeded);
        }
        if self.stack.iter().any(|entry| entry == key) {
            let mut chain = self.stack.clone();
            chain.push(key.to_string());
            return Err(DiagnosticKind::CyclicReference { chain });
        }
        self.stack.push(key.to_string());
        Ok(())
    }

    /// Pop the most recent resolution key.
    pub fn exit_call(&mut self) {
        self.stack.pop();
    }

    /// Record a diagnostic.
    pub fn report(&mut self, diagnostic: Diagnostic) {
        self.diagnostics.push(diagnostic);
    }

    /// Drain the accumulated diagnostics.
    pub fn take_diagnostics(&mut self) -> Vec<Diagnostic> {
        mem::take(&mut self.diagnostics)
    }
}
