// Runtime configuration, read from the environment.
//
// RELAY_BIND     bind address            (default 127.0.0.1)
// RELAY_PORT     listen port             (default 8080)
// EXTRACTOR_URL  extraction endpoint     (default public instance)

use std::env;
use std::net::{IpAddr, Ipv4Addr};

use anyhow::Context;
use url::Url;

const DEFAULT_PORT: u16 = 8080;
const DEFAULT_EXTRACTOR_URL: &str = "https://api.cobalt.tools/";

#[derive(Debug, Clone)]
pub struct Config {
    pub bind_addr: IpAddr,
    pub port: u16,
    pub extractor_url: Url,
}

impl Config {
    /// Load configuration. A set-but-malformed variable is a startup error,
    /// not a silent fallback.
    pub fn from_env() -> anyhow::Result<Self> {
        let bind_addr = match env::var("RELAY_BIND") {
            Ok(value) => value
                .parse()
                .with_context(|| format!("RELAY_BIND is not a valid address: {value}"))?,
            Err(_) => IpAddr::V4(Ipv4Addr::LOCALHOST),
        };

        let port = match env::var("RELAY_PORT") {
            Ok(value) => value
                .parse()
                .with_context(|| format!("RELAY_PORT is not a valid port: {value}"))?,
            Err(_) => DEFAULT_PORT,
        };

        let extractor_url = match env::var("EXTRACTOR_URL") {
            Ok(value) => Url::parse(&value)
                .with_context(|| format!("EXTRACTOR_URL is not a valid URL: {value}"))?,
            Err(_) => Url::parse(DEFAULT_EXTRACTOR_URL).unwrap(),
        };

        Ok(Self {
            bind_addr,
            port,
            extractor_url,
        })
    }
}
