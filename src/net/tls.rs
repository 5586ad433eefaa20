//! TLS configuration and certificate loading.

use std::fs::File;
use std::io::BufReader;
use std::path::Path;

use axum_server::tls_rustls::RustlsConfig;

/// Load TLS configuration from certificate and key files.
///
/// The PEM contents are checked up front so a bad file pair fails at
/// startup instead of at the first handshake.
pub async fn load_tls_config(
    cert_path: &Path,
    key_path: &Path,
) -> Result<RustlsConfig, std::io::Error> {
    validate_pem_files(cert_path, key_path)?;
    RustlsConfig::from_pem_file(cert_path, key_path).await
}

/// Check that the certificate file holds at least one certificate and the
/// key file holds a parseable private key.
fn validate_pem_files(cert_path: &Path, key_path: &Path) -> Result<(), std::io::Error> {
    if !cert_path.exists() {
        return Err(std::io::Error::new(
            std::io::ErrorKind::NotFound,
            format!("Certificate file not found: {:?}", cert_path),
        ));
    }
    if !key_path.exists() {
        return Err(std::io::Error::new(
            std::io::ErrorKind::NotFound,
            format!("Private key file not found: {:?}", key_path),
        ));
    }

    let mut cert_reader = BufReader::new(File::open(cert_path)?);
    let certs = rustls_pemfile::certs(&mut cert_reader).collect::<Result<Vec<_>, _>>()?;
    if certs.is_empty() {
        return Err(std::io::Error::new(
            std::io::ErrorKind::InvalidData,
            format!("No certificates in: {:?}", cert_path),
        ));
    }

    let mut key_reader = BufReader::new(File::open(key_path)?);
    if rustls_pemfile::private_key(&mut key_reader)?.is_none() {
        return Err(std::io::Error::new(
            std::io::ErrorKind::InvalidData,
            format!("No private key in: {:?}", key_path),
        ));
    }

    Ok(())
}
