//! Host taxonomy
//!
//! Read-only tables and the classification function deciding whether a host
//! needs dynamic DNS resolution.
//!
//! ## Rule Order
//!
//! Classification runs [`CLASSIFICATION_RULES`] in order and the first rule
//! that matches decides:
//!
//! ```text
//! local suffix ─▶ single label ─▶ cloud pattern ─▶ compound TLD ─▶ TLD ─▶ Unknown
//!  (Internal)      (Internal)     (Cloud)          (Public)        (Public)
//! ```
//!
//! Cloud patterns run before the TLD rules so that `*.elb.amazonaws.com` is
//! reported as a cloud endpoint rather than as a plain `.com` host.
//!
//! IP literals are not classified here; callers check them first with
//! [`classify_host`].

use once_cell::sync::Lazy;
use regex::{Regex, RegexBuilder};
use resolvelint_core::net::is_ip_literal;
use std::collections::HashSet;
use tracing::warn;

/// Class of a resolved backend host
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum HostClass {
    /// IPv4 or IPv6 address, never resolved through DNS
    IpLiteral,
    /// Intranet, container or reserved name
    Internal,
    /// Hostname under a known public suffix
    Public,
    /// Endpoint of a cloud provider whose addresses change frequently
    Cloud(&'static str),
    /// Unrecognized suffix, treated like `Public`
    Unknown,
}

impl HostClass {
    /// Whether a static reference to such a host goes stale
    pub fn needs_dynamic_resolution(&self) -> bool {
        matches!(
            self,
            HostClass::Public | HostClass::Cloud(_) | HostClass::Unknown
        )
    }

    /// Provider name for cloud endpoints
    pub fn cloud_provider(&self) -> Option<&'static str> {
        match *self {
            HostClass::Cloud(provider) => Some(provider),
            _ => None,
        }
    }
}

/// Generic, country-code and infrastructure top-level domains
const PUBLIC_TLDS: &[&str] = &[
    // generic
    "com", "net", "org", "info", "biz", "io", "co", "app", "dev", "cloud", "online", "site",
    "website", "tech", "store", "shop", "blog", "xyz", "me", "tv", "cc", "ws", "mobi", "name",
    "pro", "aero", "asia", "cat", "coop", "jobs", "museum", "travel", "xxx", "post", "tel",
    // popular new gTLDs
    "agency", "consulting", "digital", "email", "global", "group", "guru", "host", "link",
    "live", "media", "network", "news", "plus", "press", "services", "social", "solutions",
    "space", "studio", "support", "systems", "today", "tools", "video", "world", "zone",
    // country codes
    "uk", "de", "fr", "nl", "ru", "cn", "jp", "br", "au", "ca", "in", "it", "es", "pl", "se",
    "no", "fi", "dk", "at", "ch", "be", "cz", "hu", "ro", "ua", "kr", "tw", "hk", "sg", "my",
    "th", "ph", "id", "vn", "nz", "za", "mx", "ar", "cl", "pe", "ve", "ec", "pt", "gr", "tr",
    "il", "ae", "sa", "eg", "ng", "ke", "ie", "is", "ee", "lv", "lt", "sk", "si", "hr", "bg",
    "rs", "by", "kz", "uz", "az", "ge", "am", "md", "pk", "bd", "lk", "us", "eu",
    // infrastructure
    "edu", "gov", "mil", "int",
];

/// Two-label public suffixes
const COMPOUND_TLDS: &[&str] = &[
    "co.uk", "org.uk", "me.uk", "ltd.uk", "plc.uk", "net.uk", "sch.uk",
    "com.au", "net.au", "org.au", "edu.au", "gov.au", "asn.au", "id.au",
    "com.br", "net.br", "org.br", "gov.br", "edu.br",
    "co.nz", "net.nz", "org.nz", "govt.nz", "ac.nz",
    "co.jp", "or.jp", "ne.jp", "ac.jp", "go.jp",
    "com.cn", "net.cn", "org.cn", "gov.cn", "edu.cn",
    "co.kr", "or.kr", "ne.kr", "go.kr", "ac.kr",
    "com.mx", "net.mx", "org.mx", "gob.mx", "edu.mx",
    "com.ar", "net.ar", "org.ar", "gov.ar", "edu.ar",
    "com.tw", "net.tw", "org.tw", "gov.tw", "edu.tw",
    "com.hk", "net.hk", "org.hk", "gov.hk", "edu.hk",
    "com.sg", "net.sg", "org.sg", "gov.sg", "edu.sg",
    "co.in", "net.in", "org.in", "gov.in", "ac.in",
    "co.za", "net.za", "org.za", "gov.za", "ac.za",
    "com.tr", "net.tr", "org.tr", "gov.tr", "edu.tr",
    "co.il", "net.il", "org.il", "gov.il", "ac.il",
    "com.ua", "net.ua", "org.ua", "gov.ua", "edu.ua",
    "com.pl", "net.pl", "org.pl", "gov.pl", "edu.pl",
];

/// Suffixes of intranet, reserved and service-discovery names
pub const LOCAL_SUFFIXES: &[&str] = &[
    // local networks
    ".intranet", ".internal", ".private", ".corp", ".home", ".lan", ".local", ".localhost",
    ".localdomain",
    // reserved (RFC 2606, RFC 6761)
    ".test", ".example", ".invalid", ".onion",
    // Kubernetes
    ".svc", ".svc.cluster", ".svc.cluster.local", ".pod", ".pod.cluster.local", ".default",
    ".default.svc", ".default.svc.cluster.local",
    // Consul, Mesos, Rancher, Docker, ECS
    ".consul", ".service.consul", ".node.consul", ".marathon.mesos", ".mesos",
    ".rancher.internal", ".docker", ".docker.internal", ".ecs.internal",
];

/// Cloud endpoint patterns and provider names, first match wins
const CLOUD_PROVIDER_PATTERNS: &[(&str, &str)] = &[
    (r"\.elb\.amazonaws\.com$", "AWS ELB"),
    (r"\.elb\.[a-z]+-[a-z]+-\d+\.amazonaws\.com$", "AWS ELB"),
    (r"\.elasticbeanstalk\.com$", "AWS Elastic Beanstalk"),
    (r"\.cloudfront\.net$", "AWS CloudFront"),
    (r"\.execute-api\.[a-z]+-[a-z]+-\d+\.amazonaws\.com$", "AWS API Gateway"),
    (r"\.lambda-url\.[a-z]+-[a-z]+-\d+\.on\.aws$", "AWS Lambda URL"),
    (r"\.s3\.amazonaws\.com$", "AWS S3"),
    (r"\.s3\.[a-z]+-[a-z]+-\d+\.amazonaws\.com$", "AWS S3"),
    (r"\.run\.app$", "Google Cloud Run"),
    (r"\.cloudfunctions\.net$", "Google Cloud Functions"),
    (r"\.appspot\.com$", "Google App Engine"),
    (r"\.googleapis\.com$", "Google APIs"),
    (r"\.azurewebsites\.net$", "Azure App Service"),
    (r"\.azure-api\.net$", "Azure API Management"),
    (r"\.cloudapp\.azure\.com$", "Azure Cloud Service"),
    (r"\.blob\.core\.windows\.net$", "Azure Blob Storage"),
    (r"\.azureedge\.net$", "Azure CDN"),
    (r"\.trafficmanager\.net$", "Azure Traffic Manager"),
    (r"\.workers\.dev$", "Cloudflare Workers"),
    (r"\.pages\.dev$", "Cloudflare Pages"),
    (r"\.herokuapp\.com$", "Heroku"),
    (r"\.vercel\.app$", "Vercel"),
    (r"\.now\.sh$", "Vercel (legacy)"),
    (r"\.netlify\.app$", "Netlify"),
    (r"\.netlify\.com$", "Netlify"),
    (r"\.railway\.app$", "Railway"),
    (r"\.onrender\.com$", "Render"),
    (r"\.ondigitalocean\.app$", "DigitalOcean App Platform"),
    (r"\.fly\.dev$", "Fly.io"),
    // generic CDN and load balancer naming
    (r"\.cdn\.", "CDN endpoint"),
    (r"\.lb\.", "Load balancer"),
    (r"\.loadbalancer\.", "Load balancer"),
];

static PUBLIC_TLD_SET: Lazy<HashSet<&'static str>> =
    Lazy::new(|| PUBLIC_TLDS.iter().copied().collect());

static COMPOUND_TLD_SET: Lazy<HashSet<&'static str>> =
    Lazy::new(|| COMPOUND_TLDS.iter().copied().collect());

static CLOUD_PATTERNS: Lazy<Vec<(Regex, &'static str)>> = Lazy::new(|| {
    CLOUD_PROVIDER_PATTERNS
        .iter()
        .filter_map(|(pattern, provider)| {
            match RegexBuilder::new(pattern).case_insensitive(true).build() {
                Ok(regex) => Some((regex, *provider)),
                Err(e) => {
                    warn!("Skipping cloud pattern for {}: {}", provider, e);
                    None
                }
            }
        })
        .collect()
});

/// One step of host classification
pub struct ClassificationRule {
    /// Rule name, for diagnostics and tests
    pub name: &'static str,
    /// Returns a class when the rule decides, `None` to fall through.
    /// Receives the lowercased host.
    pub apply: fn(&str) -> Option<HostClass>,
}

/// Classification rules in precedence order
pub const CLASSIFICATION_RULES: &[ClassificationRule] = &[
    ClassificationRule {
        name: "local-suffix",
        apply: local_suffix,
    },
    ClassificationRule {
        name: "single-label",
        apply: single_label,
    },
    ClassificationRule {
        name: "cloud-pattern",
        apply: cloud_pattern,
    },
    ClassificationRule {
        name: "compound-tld",
        apply: compound_tld,
    },
    ClassificationRule {
        name: "public-tld",
        apply: public_tld,
    },
];

/// Classify a hostname that is known not to be an IP literal
///
/// Never fails: anything no rule recognizes is [`HostClass::Unknown`].
pub fn classify(host: &str) -> HostClass {
    let host = host.to_ascii_lowercase();
    CLASSIFICATION_RULES
        .iter()
        .find_map(|rule| (rule.apply)(&host))
        .unwrap_or(HostClass::Unknown)
}

/// Classify any host, IP literals included
pub fn classify_host(host: &str) -> HostClass {
    if is_ip_literal(host) {
        HostClass::IpLiteral
    } else {
        classify(host)
    }
}

fn local_suffix(host: &str) -> Option<HostClass> {
    LOCAL_SUFFIXES
        .iter()
        .any(|suffix| host.ends_with(suffix))
        .then_some(HostClass::Internal)
}

fn single_label(host: &str) -> Option<HostClass> {
    (!host.contains('.')).then_some(HostClass::Internal)
}

fn cloud_pattern(host: &str) -> Option<HostClass> {
    CLOUD_PATTERNS
        .iter()
        .find(|(regex, _)| regex.is_match(host))
        .map(|(_, provider)| HostClass::Cloud(*provider))
}

fn compound_tld(host: &str) -> Option<HostClass> {
    // needs a label in front of the suffix: `co.uk` alone is not a host
    let mut labels = host.rsplitn(3, '.');
    let last = labels.next()?;
    let second = labels.next()?;
    labels.next()?;

    COMPOUND_TLD_SET
        .contains(format!("{}.{}", second, last).as_str())
        .then_some(HostClass::Public)
}

fn public_tld(host: &str) -> Option<HostClass> {
    let (_, tld) = host.rsplit_once('.')?;
    PUBLIC_TLD_SET.contains(tld).then_some(HostClass::Public)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn rule(name: &str) -> &'static ClassificationRule {
        CLASSIFICATION_RULES
            .iter()
            .find(|rule| rule.name == name)
            .unwrap()
    }

    #[test]
    fn test_rule_order() {
        let names: Vec<_> = CLASSIFICATION_RULES.iter().map(|r| r.name).collect();
        assert_eq!(
            names,
            vec!["local-suffix", "single-label", "cloud-pattern", "compound-tld", "public-tld"]
        );
    }

    #[test]
    fn test_local_suffix_rule() {
        let apply = rule("local-suffix").apply;
        assert_eq!(apply("backend.svc.cluster.local"), Some(HostClass::Internal));
        assert_eq!(apply("db.internal"), Some(HostClass::Internal));
        assert_eq!(apply("web.service.consul"), Some(HostClass::Internal));
        assert_eq!(apply("api.example.com"), None);
        // suffix, not substring
        assert_eq!(apply("internal.example.com"), None);
    }

    #[test]
    fn test_single_label_rule() {
        let apply = rule("single-label").apply;
        assert_eq!(apply("backend"), Some(HostClass::Internal));
        assert_eq!(apply("api.example.com"), None);
    }

    #[test]
    fn test_cloud_pattern_rule() {
        let apply = rule("cloud-pattern").apply;
        assert_eq!(
            apply("my-lb-123.us-east-1.elb.amazonaws.com"),
            Some(HostClass::Cloud("AWS ELB"))
        );
        assert_eq!(
            apply("abc.execute-api.eu-west-1.amazonaws.com"),
            Some(HostClass::Cloud("AWS API Gateway"))
        );
        assert_eq!(apply("x.run.app"), Some(HostClass::Cloud("Google Cloud Run")));
        assert_eq!(apply("site.now.sh"), Some(HostClass::Cloud("Vercel (legacy)")));
        assert_eq!(apply("assets.cdn.example.com"), Some(HostClass::Cloud("CDN endpoint")));
        assert_eq!(apply("api.example.com"), None);
    }

    #[test]
    fn test_compound_tld_rule() {
        let apply = rule("compound-tld").apply;
        assert_eq!(apply("shop.example.co.uk"), Some(HostClass::Public));
        assert_eq!(apply("example.com.au"), Some(HostClass::Public));
        assert_eq!(apply("co.uk"), None);
        assert_eq!(apply("example.com"), None);
    }

    #[test]
    fn test_public_tld_rule() {
        let apply = rule("public-tld").apply;
        assert_eq!(apply("api.example.com"), Some(HostClass::Public));
        assert_eq!(apply("example.de"), Some(HostClass::Public));
        assert_eq!(apply("example.unknowntld"), None);
    }

    #[test]
    fn test_classify_precedence() {
        // cloud before TLD
        assert_eq!(classify("mybucket.s3.amazonaws.com"), HostClass::Cloud("AWS S3"));
        // compound TLD
        assert_eq!(classify("shop.example.co.uk"), HostClass::Public);
        // local suffix before cloud pattern
        assert_eq!(classify("assets.cdn.internal"), HostClass::Internal);
        assert_eq!(classify("app.example.zzz"), HostClass::Unknown);
        assert_eq!(classify(""), HostClass::Internal);
    }

    #[test]
    fn test_classify_is_case_insensitive() {
        assert_eq!(classify("API.EXAMPLE.COM"), HostClass::Public);
        assert_eq!(classify("X.RUN.APP"), HostClass::Cloud("Google Cloud Run"));
        assert_eq!(classify("DB.Internal"), HostClass::Internal);
    }

    #[test]
    fn test_classify_host_ip_literals() {
        assert_eq!(classify_host("10.0.0.1"), HostClass::IpLiteral);
        assert_eq!(classify_host("10.0.0.1:8080"), HostClass::IpLiteral);
        assert_eq!(classify_host("[2001:db8::1]"), HostClass::IpLiteral);
        assert_eq!(classify_host("api.example.com"), HostClass::Public);
    }

    #[test]
    fn test_tables_compile() {
        assert_eq!(CLOUD_PATTERNS.len(), CLOUD_PROVIDER_PATTERNS.len());
        assert!(PUBLIC_TLD_SET.contains("com"));
        assert!(COMPOUND_TLD_SET.contains("co.uk"));
    }

    #[test]
    fn test_needs_dynamic_resolution() {
        assert!(!HostClass::IpLiteral.needs_dynamic_resolution());
        assert!(!HostClass::Internal.needs_dynamic_resolution());
        assert!(HostClass::Public.needs_dynamic_resolution());
        assert!(HostClass::Cloud("Heroku").needs_dynamic_resolution());
        assert!(HostClass::Unknown.needs_dynamic_resolution());
        assert_eq!(HostClass::Cloud("Heroku").cloud_provider(), Some("Heroku"));
        assert_eq!(HostClass::Public.cloud_provider(), None);
    }
}
