// # Variable Resolver
//
// Folds the variables of a target host into a literal where the
// configuration fixes their value.

use resolvelint_core::Directive;
use resolvelint_core::script::{ScriptVar, compile_script, is_builtin};
use tracing::debug;

/// Host after static variable folding
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ResolvedHost {
    /// Every segment is known at load time
    Resolved(String),
    /// Some segment depends on the request
    Unresolvable,
}

impl ResolvedHost {
    /// Append one compiled segment
    fn append(self, var: &ScriptVar) -> Self {
        let ResolvedHost::Resolved(mut host) = self else {
            return ResolvedHost::Unresolvable;
        };

        if var.name.as_deref().is_some_and(is_builtin) {
            return ResolvedHost::Unresolvable;
        }

        match var.final_value.as_literal() {
            Some(value) => {
                host.push_str(value);
                ResolvedHost::Resolved(host)
            }
            None => ResolvedHost::Unresolvable,
        }
    }

    /// The resolved host, if any
    pub fn as_resolved(&self) -> Option<&str> {
        match self {
            ResolvedHost::Resolved(host) => Some(host),
            ResolvedHost::Unresolvable => None,
        }
    }
}

/// Resolve the variables of `host` as seen from `scope`
///
/// A host that fails to compile is `Unresolvable`, never an error.
pub fn resolve_host(host: &str, scope: Directive<'_>) -> ResolvedHost {
    match compile_script(host, scope) {
        Ok(vars) => vars
            .iter()
            .fold(ResolvedHost::Resolved(String::new()), ResolvedHost::append),
        Err(e) => {
            debug!("Cannot compile host '{}' on line {:?}: {}", host, scope.line(), e);
            ResolvedHost::Unresolvable
        }
    }
}
