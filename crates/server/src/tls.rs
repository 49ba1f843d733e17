//! TLS listener configuration from PEM files.
//!
//! Key + certificate switch the listener to TLS; a root-certificate list
//! additionally turns on client-certificate verification; the protocol
//! version can be pinned to TLS 1.2 or 1.3.

use std::{
    fs::File,
    io::BufReader,
    path::{Path, PathBuf},
    sync::Arc,
};

use anyhow::Context;

use rustls::{
    RootCertStore, ServerConfig, SupportedProtocolVersion,
    pki_types::{CertificateDer, PrivateKeyDer},
    server::WebPkiClientVerifier,
    version::{TLS12, TLS13},
};

/// TLS material, all optional. The listener stays plain TCP until both key
/// and certificate are present.
#[derive(Debug, Clone, Default)]
pub struct TlsOptions {
    pub keyfile: Option<PathBuf>,
    pub certfile: Option<PathBuf>,
    /// Root certificates for client verification (mutual TLS).
    pub ca_certs: Option<PathBuf>,
    /// Accepted protocol version (`tls12` or `tls13`); absent means both.
    pub ssl_version: Option<String>,
}

impl TlsOptions {
    pub fn is_configured(&self) -> bool {
        self.keyfile.is_some() || self.certfile.is_some()
    }
}

/// Build a rustls server config from the given options.
///
/// Fails when only one of key/cert is present, or when any of the PEM files
/// cannot be read or parsed.
pub fn build_server_config(opts: &TlsOptions) -> anyhow::Result<ServerConfig> {
    let (Some(keyfile), Some(certfile)) = (&opts.keyfile, &opts.certfile) else {
        anyhow::bail!("tls requires both --keyfile and --certfile");
    };

    let certs = load_certs(certfile)?;
    let key = load_private_key(keyfile)?;
    let versions = protocol_versions(opts.ssl_version.as_deref())?;

    let provider = Arc::new(rustls::crypto::ring::default_provider());
    let builder = ServerConfig::builder_with_provider(Arc::clone(&provider))
        .with_protocol_versions(versions)
        .context("protocol version selection rejected by rustls")?;

    let config = match &opts.ca_certs {
        Some(ca_path) => {
            let mut roots = RootCertStore::empty();
            for cert in load_certs(ca_path)? {
                roots
                    .add(cert)
                    .with_context(|| format!("invalid root certificate in {}", ca_path.display()))?;
            }
            let verifier = WebPkiClientVerifier::builder_with_provider(Arc::new(roots), provider)
                .build()
                .context("failed to build client certificate verifier")?;
            builder
                .with_client_cert_verifier(verifier)
                .with_single_cert(certs, key)
                .context("invalid certificate/key pair")?
        },
        None => builder
            .with_no_client_auth()
            .with_single_cert(certs, key)
            .context("invalid certificate/key pair")?,
    };

    Ok(config)
}

fn load_certs(path: &Path) -> anyhow::Result<Vec<CertificateDer<'static>>> {
    let file =
        File::open(path).with_context(|| format!("failed to open {}", path.display()))?;
    let certs = rustls_pemfile::certs(&mut BufReader::new(file))
        .collect::<Result<Vec<_>, _>>()
        .with_context(|| format!("invalid certificate in {}", path.display()))?;
    if certs.is_empty() {
        anyhow::bail!("no certificates found in {}", path.display());
    }
    Ok(certs)
}

fn load_private_key(path: &Path) -> anyhow::Result<PrivateKeyDer<'static>> {
    let file =
        File::open(path).with_context(|| format!("failed to open {}", path.display()))?;
    rustls_pemfile::private_key(&mut BufReader::new(file))
        .with_context(|| format!("invalid private key in {}", path.display()))?
        .ok_or_else(|| anyhow::anyhow!("no private key found in {}", path.display()))
}

fn protocol_versions(
    requested: Option<&str>,
) -> anyhow::Result<&'static [&'static SupportedProtocolVersion]> {
    static TLS12_ONLY: &[&SupportedProtocolVersion] = &[&TLS12];
    static TLS13_ONLY: &[&SupportedProtocolVersion] = &[&TLS13];
    match requested {
        None => Ok(rustls::ALL_VERSIONS),
        Some("tls12") => Ok(TLS12_ONLY),
        Some("tls13") => Ok(TLS13_ONLY),
        Some(other) => {
            anyhow::bail!("unsupported ssl version {other:?} (expected tls12 or tls13)")
        },
    }
}
