//! Response schemas of the two host APIs.

use std::net::IpAddr;

use serde::de::DeserializeOwned;
use serde::Deserialize;

use super::LookupResult;

/// A decodable API response that can be turned into a [`LookupResult`].
pub(crate) trait HostSchema: DeserializeOwned {
    fn into_result(self, address: IpAddr) -> LookupResult;
}

/// `https://internetdb.shodan.io/<ip>`
#[derive(Debug, Deserialize)]
pub(crate) struct InternetDbResponse {
    #[allow(dead_code)]
    pub ip: String,
    #[serde(default)]
    pub ports: Vec<u16>,
    #[serde(default)]
    pub hostnames: Vec<String>,
}

impl HostSchema for InternetDbResponse {
    fn into_result(self, address: IpAddr) -> LookupResult {
        LookupResult {
            address,
            ports: self.ports,
            asn: None,
            org: None,
            hostnames: self.hostnames,
        }
    }
}

/// `https://api.shodan.io/shodan/host/<ip>`
#[derive(Debug, Deserialize)]
pub(crate) struct ShodanHostResponse {
    #[allow(dead_code)]
    pub ip_str: String,
    #[serde(default)]
    pub ports: Vec<u16>,
    #[serde(default)]
    pub asn: Option<String>,
    #[serde(default)]
    pub org: Option<String>,
    #[serde(default)]
    pub domains: Vec<String>,
    #[serde(default)]
    pub hostnames: Vec<String>,
}

impl HostSchema for ShodanHostResponse {
    fn into_result(self, address: IpAddr) -> LookupResult {
        let mut hostnames = self.hostnames;
        for domain in self.domains {
            if !hostnames.contains(&domain) {
                hostnames.push(domain);
            }
        }
        LookupResult {
            address,
            ports: self.ports,
            asn: self.asn.filter(|a| !a.is_empty()),
            org: self.org.filter(|o| !o.is_empty()),
            hostnames,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn addr() -> IpAddr {
        "1.2.3.4".parse().unwrap()
    }

    #[test]
    fn test_internetdb_decode() {
        let body = r#"{"cpes":[],"hostnames":["one.one.one.one"],"ip":"1.2.3.4","ports":[80,443,80],"tags":[],"vulns":[]}"#;
        let result = serde_json::from_str::<InternetDbResponse>(body)
            .unwrap()
            .into_result(addr());
        assert_eq!(result.ports, vec![80, 443, 80]);
        assert_eq!(result.hostnames, vec!["one.one.one.one"]);
        assert_eq!(result.asn, None);
    }

    #[test]
    fn test_internetdb_requires_ip() {
        assert!(serde_json::from_str::<InternetDbResponse>(r#"{"ports":[80]}"#).is_err());
    }

    #[test]
    fn test_shodan_host_decode_merges_domains() {
        let body = r#"{"ip_str":"1.2.3.4","ports":[22],"asn":"AS13335","org":"Cloudflare","domains":["example.com","a.example.com"],"hostnames":["a.example.com"]}"#;
        let result = serde_json::from_str::<ShodanHostResponse>(body)
            .unwrap()
            .into_result(addr());
        assert_eq!(result.asn.as_deref(), Some("AS13335"));
        assert_eq!(result.org.as_deref(), Some("Cloudflare"));
        assert_eq!(result.hostnames, vec!["a.example.com", "example.com"]);
    }

    #[test]
    fn test_shodan_host_empty_annotations_are_none() {
        let body = r#"{"ip_str":"1.2.3.4","ports":[],"asn":"","org":null}"#;
        let result = serde_json::from_str::<ShodanHostResponse>(body)
            .unwrap()
            .into_result(addr());
        assert!(result.ports.is_empty());
        assert_eq!(result.asn, None);
        assert_eq!(result.org, None);
    }

    #[test]
    fn test_port_out_of_range_fails_decode() {
        let body = r#"{"ip":"1.2.3.4","ports":[70000]}"#;
        assert!(serde_json::from_str::<InternetDbResponse>(body).is_err());
    }
}
