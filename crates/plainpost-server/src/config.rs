//! Command line and environment configuration

use std::net::SocketAddr;

use clap::Parser;
use plainpost::{BoldMarker, Options, Rendering};

/// Normalize rich-text editor HTML into social-post plain text
#[derive(Debug, Parser)]
#[command(name = "plainpost-server", version, about)]
pub struct ServerConfig {
    /// Address to listen on
    #[arg(long, env = "PLAINPOST_BIND", default_value = "0.0.0.0:5000")]
    pub bind: SocketAddr,

    /// Default bold marker: double (**) or single (*)
    #[arg(long, env = "PLAINPOST_BOLD", default_value = "double")]
    pub bold: BoldMarker,

    /// Default rendering: markers or unicode
    #[arg(long, env = "PLAINPOST_RENDERING", default_value = "markers")]
    pub rendering: Rendering,

    /// Log filter used when RUST_LOG is unset
    #[arg(long, env = "PLAINPOST_LOG", default_value = "info")]
    pub log_level: String,
}

impl ServerConfig {
    /// Normalizer defaults; requests may override them
    pub fn options(&self) -> Options {
        Options {
            bold_marker: self.bold,
            rendering: self.rendering,
            ..Default::default()
        }
    }
}
