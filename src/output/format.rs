//! Record construction and rendering.

use std::net::IpAddr;

use serde::Serialize;

use crate::config::{Config, OutputFormat};
use crate::lookup::LookupResult;
use crate::target::Target;

/// One emitted line (plain) or object (JSON): a target, one surviving port,
/// and the annotations enabled in configuration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct OutputRecord {
    /// Target host as given (address text for CIDR members)
    pub host: String,
    /// One open port
    pub port: u16,
    /// Queried address (`--ip`)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub ip: Option<IpAddr>,
    /// Autonomous system (`--asn`)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub asn: Option<String>,
    /// Organization (`--asn`)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub org: Option<String>,
    /// Hostnames reported by the API (`--hostnames`)
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub hostnames: Vec<String>,
}

/// Which optional fields end up in records.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Annotations {
    /// Include ASN and organization
    pub asn: bool,
    /// Include the queried address
    pub ip: bool,
    /// Include hostnames
    pub hostnames: bool,
}

impl From<&Config> for Annotations {
    fn from(config: &Config) -> Self {
        Self {
            asn: config.show_asn,
            ip: config.show_ip,
            hostnames: config.show_hostnames,
        }
    }
}

/// Builds one record per port, in port order.
pub fn build_records(
    target: &Target,
    result: &LookupResult,
    ports: &[u16],
    annotations: Annotations,
) -> Vec<OutputRecord> {
    ports
        .iter()
        .map(|&port| OutputRecord {
            host: target.host().to_string(),
            port,
            ip: annotations.ip.then_some(result.address),
            asn: result.asn.clone().filter(|_| annotations.asn),
            org: result.org.clone().filter(|_| annotations.asn),
            hostnames: if annotations.hostnames {
                result.hostnames.clone()
            } else {
                Vec::new()
            },
        })
        .collect()
}

/// `host:port [asn] [org] [ip] [hostnames]`, with absent fields omitted.
pub fn render_plain(record: &OutputRecord) -> String {
    let mut line = match record.host.parse::<IpAddr>() {
        Ok(IpAddr::V6(_)) => format!("[{}]:{}", record.host, record.port),
        _ => format!("{}:{}", record.host, record.port),
    };
    if let Some(ref asn) = record.asn {
        line.push_str(&format!(" [{asn}]"));
    }
    if let Some(ref org) = record.org {
        line.push_str(&format!(" [{org}]"));
    }
    if let Some(ip) = record.ip {
        line.push_str(&format!(" [{ip}]"));
    }
    if !record.hostnames.is_empty() {
        line.push_str(&format!(" [{}]", record.hostnames.join(",")));
    }
    line
}

/// Renders a record without a trailing newline.
pub fn render(record: &OutputRecord, format: OutputFormat) -> Result<String, serde_json::Error> {
    match format {
        OutputFormat::Plain => Ok(render_plain(record)),
        OutputFormat::Json => serde_json::to_string_pretty(record),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::target::parse_line;

    fn sample_result() -> LookupResult {
        LookupResult {
            address: "1.2.3.4".parse().unwrap(),
            ports: vec![80, 443],
            asn: Some("AS13335".to_string()),
            org: Some("Cloudflare, Inc.".to_string()),
            hostnames: vec!["one.example".to_string(), "two.example".to_string()],
        }
    }

    #[test]
    fn test_plain_without_annotations() {
        let target = parse_line("1.2.3.4").unwrap().remove(0);
        let records = build_records(&target, &sample_result(), &[80, 443], Annotations::default());
        let lines: Vec<String> = records.iter().map(render_plain).collect();
        assert_eq!(lines, vec!["1.2.3.4:80", "1.2.3.4:443"]);
    }

    #[test]
    fn test_plain_with_all_annotations() {
        let target = parse_line("https://example.com").unwrap().remove(0);
        let annotations = Annotations {
            asn: true,
            ip: true,
            hostnames: true,
        };
        let records = build_records(&target, &sample_result(), &[8080], annotations);
        assert_eq!(
            render_plain(&records[0]),
            "example.com:8080 [AS13335] [Cloudflare, Inc.] [1.2.3.4] [one.example,two.example]"
        );
    }

    #[test]
    fn test_plain_missing_asn_is_omitted() {
        let target = parse_line("example.com").unwrap().remove(0);
        let mut result = sample_result();
        result.asn = None;
        result.org = None;
        let annotations = Annotations {
            asn: true,
            ..Default::default()
        };
        let records = build_records(&target, &result, &[22], annotations);
        assert_eq!(render_plain(&records[0]), "example.com:22");
    }

    #[test]
    fn test_plain_ipv6_host_is_bracketed() {
        let target = parse_line("2001:db8::1").unwrap().remove(0);
        let records = build_records(&target, &sample_result(), &[443], Annotations::default());
        assert_eq!(render_plain(&records[0]), "[2001:db8::1]:443");
    }

    #[test]
    fn test_json_skips_absent_fields() {
        let target = parse_line("1.2.3.4").unwrap().remove(0);
        let annotations = Annotations {
            ip: true,
            ..Default::default()
        };
        let records = build_records(&target, &sample_result(), &[80], annotations);
        let json = render(&records[0], OutputFormat::Json).unwrap();
        let value: serde_json::Value = serde_json::from_str(&json).unwrap();
        assert_eq!(value["host"], "1.2.3.4");
        assert_eq!(value["port"], 80);
        assert_eq!(value["ip"], "1.2.3.4");
        assert!(value.get("asn").is_none());
        assert!(value.get("hostnames").is_none());
        assert!(json.contains('\n'), "JSON output is pretty-printed");
    }
}
