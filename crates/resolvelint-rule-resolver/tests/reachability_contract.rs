//! Architectural Contract Test: Backend Reachability
//!
//! This test verifies, on parsed configurations, which proxy targets are
//! reported as resolved only at startup.
//!
//! Constraints verified:
//! - IP literals, unix sockets and internal names never produce a finding
//! - Static public hostnames produce exactly one MEDIUM finding
//! - Cloud endpoints produce exactly one HIGH finding naming the provider
//! - Upstream servers are batched into one finding per category with the
//!   offending `server` directives as evidence
//! - Variable targets are reported only when no `resolver` is in scope
//!
//! If this test fails, the rule either misses volatile backends or reports
//! backends that nginx already re-resolves.

mod common;

use common::*;
use resolvelint_core::Severity;

#[test]
fn ip_literal_targets_are_never_reported() {
    for target in [
        "http://127.0.0.1",
        "http://10.1.2.3:8080/api",
        "http://[2001:db8::1]",
        "http://[::1]:9000",
        "192.168.0.10:9000",
    ] {
        assert!(lint_proxy_pass(target).is_empty(), "{}", target);
    }
}

#[test]
fn internal_names_are_never_reported() {
    for target in [
        "http://backend.svc.cluster.local",
        "http://db.internal:5432",
        "http://web.service.consul",
        "http://app",
        "http://host.docker.internal:3000",
    ] {
        assert!(lint_proxy_pass(target).is_empty(), "{}", target);
    }
}

#[test]
fn unix_socket_targets_are_never_reported() {
    assert!(lint_proxy_pass("unix:/tmp/app.sock").is_empty());
    assert!(lint_proxy_pass("http://unix:/tmp/app.sock:/").is_empty());
}

#[test]
fn public_hostname_is_reported_once_as_medium() {
    let findings = lint_proxy_pass("http://api.example.com");
    assert_eq!(severities(&findings), vec![Severity::Medium]);
    assert_eq!(findings[0].primary.text, "proxy_pass http://api.example.com;");
    assert_eq!(findings[0].primary.line, Some(1));
}

#[test]
fn compound_tld_hostname_is_reported() {
    let findings = lint_proxy_pass("http://shop.example.co.uk");
    assert_eq!(severities(&findings), vec![Severity::Medium]);
}

#[test]
fn cloud_endpoint_is_reported_once_as_high() {
    let findings = lint_proxy_pass("https://x.run.app");
    assert_eq!(severities(&findings), vec![Severity::High]);
    assert!(findings[0].message.contains("Google Cloud Run"));

    let findings = lint_proxy_pass("https://mybucket.s3.amazonaws.com");
    assert_eq!(severities(&findings), vec![Severity::High]);
    assert!(findings[0].message.contains("AWS S3"));
}

#[test]
fn every_proxy_type_directive_is_audited() {
    let findings = lint(
        r#"
server {
    location /a { fastcgi_pass php.example.com:9000; }
    location /b { uwsgi_pass py.example.com:3031; }
    location /c { scgi_pass scgi.example.com:4000; }
    location /d { grpc_pass grpc://rpc.example.com:50051; }
    location /e { proxy_pass http://api.example.com; }
}
"#,
    );
    let lines: Vec<_> = findings.iter().map(|f| f.primary.line).collect();
    assert_eq!(lines, vec![Some(3), Some(4), Some(5), Some(6), Some(7)]);
}

#[test]
fn upstream_with_cloud_server_yields_one_high_finding() {
    let findings = lint(
        r#"
http {
    upstream backend {
        server foo.elb.amazonaws.com;
    }
    server {
        location / {
            proxy_pass http://backend;
        }
    }
}
"#,
    );
    assert_eq!(severities(&findings), vec![Severity::High]);
    assert_eq!(findings[0].primary.line, Some(8));
    assert_eq!(findings[0].evidence.len(), 1);
    assert_eq!(findings[0].evidence[0].text, "server foo.elb.amazonaws.com;");
    assert_eq!(findings[0].evidence[0].line, Some(4));
}

#[test]
fn upstream_with_resolve_on_every_server_is_silent() {
    let findings = lint(
        r#"
http {
    resolver 10.0.0.2;
    upstream backend {
        zone backend 64k;
        server foo.elb.amazonaws.com resolve;
        server api.example.com:8080 resolve;
    }
    server {
        location / { proxy_pass http://backend; }
    }
}
"#,
    );
    assert!(findings.is_empty());
}

#[test]
fn upstream_with_mixed_servers_yields_one_finding_per_category() {
    let findings = lint(
        r#"
http {
    upstream backend {
        zone backend 64k;
        server a.elb.amazonaws.com;
        server api.example.com;
        server app.herokuapp.com;
        server 10.0.0.1;
        server static.example.org;
    }
    server {
        location / { proxy_pass http://backend; }
    }
}
"#,
    );
    assert_eq!(severities(&findings), vec![Severity::High, Severity::Medium]);

    let cloud: Vec<_> = findings[0].evidence.iter().map(|e| e.text.as_str()).collect();
    assert_eq!(
        cloud,
        vec!["server a.elb.amazonaws.com;", "server app.herokuapp.com;"]
    );
    assert!(findings[0].message.contains("app.herokuapp.com (Heroku)"));
    assert!(!findings[0].message.contains("Declare a shared memory 'zone'"));

    let plain: Vec<_> = findings[1].evidence.iter().map(|e| e.text.as_str()).collect();
    assert_eq!(plain, vec!["server api.example.com;", "server static.example.org;"]);
}

#[test]
fn upstream_name_shadows_public_hostname() {
    let findings = lint(
        r#"
upstream api.example.com {
    server 10.0.0.1:8080;
}
server {
    location / { proxy_pass http://api.example.com; }
}
"#,
    );
    assert!(findings.is_empty());
}

#[test]
fn variable_with_resolver_is_silent() {
    let findings = lint(
        r#"
http {
    resolver 8.8.8.8;
    server {
        set $backend host.example.com;
        location / { proxy_pass http://$backend; }
    }
}
"#,
    );
    assert!(findings.is_empty());
}

#[test]
fn variable_without_resolver_is_reported_once_as_medium() {
    let findings = lint(
        r#"
http {
    server {
        set $backend host.example.com;
        location / { proxy_pass http://$backend; }
    }
}
"#,
    );
    assert_eq!(severities(&findings), vec![Severity::Medium]);
    assert!(findings[0].message.contains("no 'resolver'"));
}

#[test]
fn resolver_in_sibling_server_does_not_count() {
    let findings = lint(
        r#"
http {
    server {
        resolver 8.8.8.8;
    }
    server {
        set $backend host.example.com;
        location / { proxy_pass http://$backend; }
    }
}
"#,
    );
    assert_eq!(severities(&findings), vec![Severity::Medium]);
}

#[test]
fn request_dependent_targets_are_skipped() {
    assert!(lint_proxy_pass("http://$host").is_empty());
    assert!(lint_proxy_pass("http://$http_x_backend").is_empty());
    assert!(lint_proxy_pass("http://$1.example.com").is_empty());
    assert!(lint_proxy_pass("http://${undefined}").is_empty());
}

#[test]
fn malformed_directive_does_not_hide_later_findings() {
    let findings = lint(
        r#"
server {
    location /a { proxy_pass; }
    location /b { proxy_pass "http://${broken"; }
    location /c { proxy_pass http://api.example.com; }
}
"#,
    );
    assert_eq!(findings.len(), 1);
    assert_eq!(findings[0].primary.line, Some(5));
}

#[test]
fn configured_directives_limit_the_audit() {
    use resolvelint_core::{LintConfig, LintEngine, MemoryReporter, RuleConfig, RuleRegistry};

    let registry = RuleRegistry::new();
    resolvelint_rule_resolver::register(&registry);
    let config = LintConfig::new(vec![RuleConfig::MissingResolver {
        directives: vec!["fastcgi_pass".into()],
    }]);
    let engine = LintEngine::from_config(&registry, &config).unwrap();

    let tree = resolvelint_conf::parse_str(
        "location / { proxy_pass http://api.example.com; fastcgi_pass php.example.com:9000; }",
    )
    .unwrap();
    let mut reporter = MemoryReporter::new();
    engine.lint(&tree, &mut reporter);

    assert_eq!(reporter.len(), 1);
    assert_eq!(
        reporter.findings()[0].primary.text,
        "fastcgi_pass php.example.com:9000;"
    );
}
