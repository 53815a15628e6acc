// # Scope Resolver
//
// Answers questions about the configuration surrounding a proxy directive:
// which `upstream` block a host names, which of its servers are resolved
// only at startup, and whether a `resolver` is in effect.

use resolvelint_core::Directive;
use tracing::{debug, warn};

use crate::taxonomy::classify_host;
use crate::target;

/// An upstream `server` whose address is fixed at startup
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UpstreamServerFinding<'a> {
    /// The `server` directive
    pub server: Directive<'a>,
    /// Host part of its address
    pub hostname: String,
    /// Provider name when the host is a cloud endpoint
    pub cloud_provider: Option<&'static str>,
}

/// Result of inspecting the upstream a proxy target refers to
#[derive(Debug, Clone)]
pub struct UpstreamInspection<'a> {
    /// Upstream name
    pub name: String,
    /// Whether the upstream declares a shared memory `zone`
    pub has_zone: bool,
    /// Servers that need the `resolve` parameter, in document order
    pub problematic: Vec<UpstreamServerFinding<'a>>,
}

impl<'a> UpstreamInspection<'a> {
    /// Problematic servers that are cloud endpoints
    pub fn cloud_servers(&self) -> impl Iterator<Item = &UpstreamServerFinding<'a>> {
        self.problematic.iter().filter(|s| s.cloud_provider.is_some())
    }

    /// Problematic servers that are plain hostnames
    pub fn plain_servers(&self) -> impl Iterator<Item = &UpstreamServerFinding<'a>> {
        self.problematic.iter().filter(|s| s.cloud_provider.is_none())
    }
}

/// Look up the upstream named `host` visible from `directive`
///
/// Returns `None` when no such upstream exists, meaning `host` is a real
/// hostname. Several upstreams with the same name are all inspected.
pub fn inspect_upstream<'a>(directive: Directive<'a>, host: &str) -> Option<UpstreamInspection<'a>> {
    let upstreams: Vec<_> = directive
        .find_imperative_directives_in_scope("upstream", true)
        .into_iter()
        .filter(|upstream| upstream.args().len() == 1 && upstream.args()[0] == host)
        .collect();

    if upstreams.is_empty() {
        return None;
    }
    if upstreams.len() > 1 {
        warn!(
            "{} upstream blocks named '{}' are visible from line {:?}, inspecting all of them",
            upstreams.len(),
            host,
            directive.line()
        );
    }

    let has_zone = upstreams
        .iter()
        .any(|upstream| upstream.some("zone", true).is_some());

    let problematic = upstreams
        .iter()
        .flat_map(|upstream| upstream.children())
        .filter(|child| child.name() == "server")
        .filter_map(inspect_server)
        .collect();

    Some(UpstreamInspection {
        name: host.to_string(),
        has_zone,
        problematic,
    })
}

/// Problem record for one `server`, `None` when it is safe
fn inspect_server(server: Directive<'_>) -> Option<UpstreamServerFinding<'_>> {
    if server.args().iter().any(|arg| arg == "resolve") {
        return None;
    }

    let address = server.first_arg().unwrap_or_default();
    let target = match target::extract(address) {
        Ok(target) => target,
        Err(reason) => {
            debug!("Skipping upstream server '{}': {}", address, reason);
            return None;
        }
    };

    let class = classify_host(target.host);
    if !class.needs_dynamic_resolution() {
        return None;
    }

    Some(UpstreamServerFinding {
        server,
        hostname: target.host.to_string(),
        cloud_provider: class.cloud_provider(),
    })
}

/// Whether a `resolver` is declared in any block enclosing `directive`
pub fn has_resolver_in_scope(directive: Directive<'_>) -> bool {
    !directive
        .find_imperative_directives_in_scope("resolver", true)
        .is_empty()
}
