//! Where background image bytes come from.

use super::types::ImageLoadError;
use base64::Engine;
use reqwest::blocking::Client;
use std::path::Path;
use std::time::Duration;
use url::Url;

const HTTP_TIMEOUT: Duration = Duration::from_secs(30);

/// Abstraction over fetching the encoded bytes of a background image.
///
/// Hosts with their own caching or authentication inject an implementation.
pub trait ImageSource {
    fn fetch(&self, url: &Url) -> Result<Vec<u8>, ImageLoadError>;
}

/// Reads `file://` URLs from disk, decodes base64 `data:` URLs and
/// downloads `http(s)` URLs.
///
/// Downloads carry a `time=<millis>` query parameter so caches always
/// return the current image.
#[derive(Debug, Default, Clone, Copy)]
pub struct DefaultImageSource;

impl ImageSource for DefaultImageSource {
    fn fetch(&self, url: &Url) -> Result<Vec<u8>, ImageLoadError> {
        match url.scheme() {
            "file" => {
                let path = url
                    .to_file_path()
                    .map_err(|_| ImageLoadError::InvalidUrl(url.to_string()))?;
                log::debug!("Reading background from {}", path.display());
                Ok(std::fs::read(&path)?)
            }
            "data" => decode_data_url(url.as_str()),
            "http" | "https" => download(url),
            other => Err(ImageLoadError::UnsupportedScheme(other.to_string())),
        }
    }
}

fn download(url: &Url) -> Result<Vec<u8>, ImageLoadError> {
    let mut url = url.clone();
    url.query_pairs_mut()
        .append_pair("time", &chrono::Utc::now().timestamp_millis().to_string());
    log::debug!("Downloading background from {}", url);

    let client = Client::builder()
        .timeout(HTTP_TIMEOUT)
        .user_agent(concat!("graffiti/", env!("CARGO_PKG_VERSION")))
        .build()?;
    let response = client.get(url).send()?.error_for_status()?;
    Ok(response.bytes()?.to_vec())
}

/// Parses a background location. Bare filesystem paths are accepted as files.
pub fn parse_location(location: &str) -> Result<Url, ImageLoadError> {
    let location = location.trim();
    if location.is_empty() {
        return Err(ImageLoadError::InvalidUrl(String::new()));
    }

    match Url::parse(location) {
        // Single-letter schemes are Windows drive letters, not URLs
        Ok(url) if url.scheme().len() > 1 => Ok(url),
        Ok(_) | Err(url::ParseError::RelativeUrlWithoutBase) => path_to_url(Path::new(location)),
        Err(err) => Err(ImageLoadError::InvalidUrl(format!("{location}: {err}"))),
    }
}

fn path_to_url(path: &Path) -> Result<Url, ImageLoadError> {
    let absolute = if path.is_absolute() {
        path.to_path_buf()
    } else {
        std::env::current_dir()?.join(path)
    };
    Url::from_file_path(&absolute)
        .map_err(|_| ImageLoadError::InvalidUrl(absolute.display().to_string()))
}

/// Decodes `data:[<mime>];base64,<payload>`.
fn decode_data_url(url: &str) -> Result<Vec<u8>, ImageLoadError> {
    let rest = url
        .strip_prefix("data:")
        .ok_or_else(|| ImageLoadError::InvalidUrl(url.to_string()))?;
    let (header, payload) = rest
        .split_once(',')
        .ok_or_else(|| ImageLoadError::InvalidUrl("data URL without payload".to_string()))?;

    if !header.ends_with(";base64") {
        return Err(ImageLoadError::InvalidUrl(
            "only base64 data URLs are supported".to_string(),
        ));
    }

    base64::engine::general_purpose::STANDARD
        .decode(payload)
        .map_err(|e| ImageLoadError::InvalidUrl(format!("invalid base64 payload: {e}")))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::{BufRead, BufReader, Write};
    use std::net::TcpListener;
    use std::thread;

    #[test]
    fn bare_paths_become_file_urls() {
        let url = parse_location("/tmp/photo.png").unwrap();
        assert_eq!(url.scheme(), "file");
        assert_eq!(url.to_file_path().unwrap(), Path::new("/tmp/photo.png"));

        let relative = parse_location("photo.png").unwrap();
        assert_eq!(relative.scheme(), "file");
        assert!(relative.path().ends_with("/photo.png"));
    }

    #[test]
    fn empty_location_is_invalid() {
        assert!(matches!(
            parse_location("   "),
            Err(ImageLoadError::InvalidUrl(_))
        ));
    }

    #[test]
    fn other_schemes_are_unsupported() {
        let url = parse_location("ftp://example.com/a.png").unwrap();
        let err = DefaultImageSource.fetch(&url).unwrap_err();
        assert!(matches!(err, ImageLoadError::UnsupportedScheme(ref s) if s == "ftp"));
    }

    /// Answers one HTTP request with `status` and `body`, handing back the request line.
    fn serve_once(status: &str, body: &'static [u8]) -> (Url, thread::JoinHandle<String>) {
        let listener = TcpListener::bind("127.0.0.1:0").unwrap();
        let url = Url::parse(&format!(
            "http://{}/bg.png?v=2",
            listener.local_addr().unwrap()
        ))
        .unwrap();
        let status = status.to_string();
        let handle = thread::spawn(move || {
            let (stream, _) = listener.accept().unwrap();
            let mut reader = BufReader::new(stream.try_clone().unwrap());
            let mut request_line = String::new();
            reader.read_line(&mut request_line).unwrap();
            let mut line = String::new();
            while reader.read_line(&mut line).unwrap() > 2 {
                line.clear();
            }
            let mut stream = stream;
            write!(
                stream,
                "HTTP/1.1 {status}\r\nContent-Length: {}\r\nConnection: close\r\n\r\n",
                body.len()
            )
            .unwrap();
            stream.write_all(body).unwrap();
            request_line
        });
        (url, handle)
    }

    #[test]
    fn downloads_http_urls_with_cache_buster() {
        let (url, server) = serve_once("200 OK", b"image bytes");

        assert_eq!(DefaultImageSource.fetch(&url).unwrap(), b"image bytes");

        let request_line = server.join().unwrap();
        assert!(request_line.starts_with("GET /bg.png?v=2&time="), "{request_line}");
    }

    #[test]
    fn http_error_status_is_a_network_error() {
        let (url, server) = serve_once("404 Not Found", b"");

        let err = DefaultImageSource.fetch(&url).unwrap_err();
        let ImageLoadError::Network(err) = err else {
            panic!("expected a network error, got {err:?}");
        };
        assert_eq!(err.status().map(|status| status.as_u16()), Some(404));
        server.join().unwrap();
    }

    #[test]
    fn unreachable_host_is_a_network_error() {
        let port = TcpListener::bind("127.0.0.1:0")
            .unwrap()
            .local_addr()
            .unwrap()
            .port();
        let url = Url::parse(&format!("http://127.0.0.1:{port}/bg.png")).unwrap();

        assert!(matches!(
            DefaultImageSource.fetch(&url),
            Err(ImageLoadError::Network(_))
        ));
    }

    #[test]
    fn reads_file_urls() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(b"bytes").unwrap();
        let url = Url::from_file_path(file.path()).unwrap();
        assert_eq!(DefaultImageSource.fetch(&url).unwrap(), b"bytes");
    }

    #[test]
    fn missing_file_is_a_fetch_error() {
        let dir = tempfile::tempdir().unwrap();
        let url = Url::from_file_path(dir.path().join("missing.png")).unwrap();
        assert!(matches!(
            DefaultImageSource.fetch(&url),
            Err(ImageLoadError::Fetch(_))
        ));
    }

    #[test]
    fn decodes_base64_data_urls() {
        let url = parse_location("data:image/png;base64,aGVsbG8=").unwrap();
        assert_eq!(DefaultImageSource.fetch(&url).unwrap(), b"hello");

        let plain = parse_location("data:text/plain,hello").unwrap();
        assert!(DefaultImageSource.fetch(&plain).is_err());
    }
}
