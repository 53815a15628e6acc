//! Reachability analyzer
//!
//! Decides, for one proxy-type directive, whether its backend is resolved
//! only once at startup.
//!
//! ## Decision Order
//!
//! ```text
//! target ──▶ extract ──▶ resolve vars ──▶ IP literal? ──▶ upstream? ──▶ `$` in target? ──▶ classify
//!              │              │               │              │               │                │
//!           skipped       skipped          no finding    per-server     resolver in      Internal: none
//!        (unix, parse)  (request vars)                   findings        scope?          Cloud: HIGH
//!                                                                       MEDIUM if not    other: MEDIUM
//! ```
//!
//! Every step that cannot judge the directive ends the analysis without a
//! finding; nothing here returns an error.

use resolvelint_core::{Directive, Finding, Severity};
use tracing::debug;

use crate::scope::{UpstreamInspection, has_resolver_in_scope, inspect_upstream};
use crate::target::{self, ProxyTarget};
use crate::taxonomy::{HostClass, classify_host};
use crate::variables::{ResolvedHost, resolve_host};
use crate::{RULE_NAME, SUMMARY};

/// Analyze one directive occurrence
pub fn analyze(directive: Directive<'_>) -> Vec<Finding> {
    let Some(raw) = directive.first_arg() else {
        return Vec::new();
    };

    let target = match target::extract(raw) {
        Ok(target) => target,
        Err(reason) => {
            debug!("Skipping '{}' on line {:?}: {}", directive, directive.line(), reason);
            return Vec::new();
        }
    };

    let host = match resolve_host(target.host, directive) {
        ResolvedHost::Resolved(host) if !host.is_empty() => host,
        ResolvedHost::Resolved(_) => return Vec::new(),
        ResolvedHost::Unresolvable => {
            debug!(
                "Skipping '{}' on line {:?}: host depends on request data",
                directive,
                directive.line()
            );
            return Vec::new();
        }
    };

    let class = classify_host(&host);
    if class == HostClass::IpLiteral {
        return Vec::new();
    }

    if let Some(inspection) = inspect_upstream(directive, &host) {
        return upstream_findings(directive, &inspection);
    }

    if raw.contains('$') {
        if has_resolver_in_scope(directive) {
            return Vec::new();
        }
        return vec![finding(
            directive,
            Severity::Medium,
            missing_resolver_message(directive.name(), &host),
        )];
    }

    match class {
        HostClass::Cloud(provider) => vec![finding(
            directive,
            Severity::High,
            cloud_message(directive.name(), &host, provider, &target),
        )],
        HostClass::Public | HostClass::Unknown => vec![finding(
            directive,
            Severity::Medium,
            static_message(directive.name(), &host, &target),
        )],
        HostClass::Internal | HostClass::IpLiteral => Vec::new(),
    }
}

fn finding(directive: Directive<'_>, severity: Severity, message: String) -> Finding {
    Finding::new(RULE_NAME, severity, SUMMARY, message, directive)
}

/// One HIGH finding for cloud servers, one MEDIUM finding for the rest
fn upstream_findings(directive: Directive<'_>, inspection: &UpstreamInspection<'_>) -> Vec<Finding> {
    let mut findings = Vec::new();
    let remediation = upstream_remediation(inspection.has_zone);

    let cloud: Vec<_> = inspection.cloud_servers().collect();
    if !cloud.is_empty() {
        let hosts = cloud
            .iter()
            .map(|s| format!("{} ({})", s.hostname, s.cloud_provider.unwrap_or_default()))
            .collect::<Vec<_>>()
            .join(", ");
        let message = format!(
            "Upstream '{}' contains cloud provider endpoints without the 'resolve' parameter: {}. \
             Their addresses change frequently. {}",
            inspection.name, hosts, remediation
        );
        findings.push(
            finding(directive, Severity::High, message).with_evidence(cloud.iter().map(|s| s.server)),
        );
    }

    let plain: Vec<_> = inspection.plain_servers().collect();
    if !plain.is_empty() {
        let hosts = plain
            .iter()
            .map(|s| s.hostname.as_str())
            .collect::<Vec<_>>()
            .join(", ");
        let message = format!(
            "Upstream '{}' has server(s) without the 'resolve' parameter: {}. {}",
            inspection.name, hosts, remediation
        );
        findings.push(
            finding(directive, Severity::Medium, message)
                .with_evidence(plain.iter().map(|s| s.server)),
        );
    }

    findings
}

fn upstream_remediation(has_zone: bool) -> &'static str {
    if has_zone {
        "Add 'resolve' to each server and configure a 'resolver' directive (nginx 1.27.3+)."
    } else {
        "Declare a shared memory 'zone' in the upstream, add 'resolve' to each server \
         and configure a 'resolver' directive (nginx 1.27.3+)."
    }
}

/// `proxy_pass http://$backend:8080;` keeping the original scheme and port
fn variable_target(name: &str, target: &ProxyTarget<'_>) -> String {
    let scheme = target.scheme.map(|s| format!("{}://", s)).unwrap_or_default();
    let port = target.port.map(|p| format!(":{}", p)).unwrap_or_default();
    format!("{} {}$backend{};", name, scheme, port)
}

fn cloud_message(name: &str, host: &str, provider: &str, target: &ProxyTarget<'_>) -> String {
    format!(
        "'{}' targets {} endpoint '{}'. Cloud provider addresses change frequently and \
         a name resolved once at startup keeps sending traffic to old addresses. \
         Resolve it per request: set $backend {}; resolver 8.8.8.8 valid=10s; {}",
        name,
        provider,
        host,
        host,
        variable_target(name, target)
    )
}

fn static_message(name: &str, host: &str, target: &ProxyTarget<'_>) -> String {
    format!(
        "'{}' uses static hostname '{}'. It is resolved once at startup; if its address \
         changes, traffic goes to the stale address until nginx is restarted. \
         Consider: resolver 8.8.8.8 valid=30s; set $backend {}; {}",
        name,
        host,
        host,
        variable_target(name, target)
    )
}

fn missing_resolver_message(name: &str, host: &str) -> String {
    format!(
        "'{}' uses a variable but no 'resolver' directive is in scope, so '{}' is never \
         re-resolved. Add: resolver 8.8.8.8 valid=30s; (or your internal DNS server)",
        name, host
    )
}
