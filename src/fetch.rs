/// Background I/O: reachability checks, remote thumbnails and gallery files
///
/// Everything here is a plain async function so it can be handed to
/// `Task::perform`. Nothing retries and nothing times out: one attempt,
/// and the caller decides what a failure means.
use reqwest::{Client, Url};
use std::path::{Path, PathBuf};

use crate::error::{Error, Result};
use crate::state::data::Image;

/// Where an image location actually points
#[derive(Debug, Clone, PartialEq)]
pub enum ImageSource {
    Local(PathBuf),
    Remote(Url),
}

impl ImageSource {
    /// Classify an image location.
    ///
    /// Absolute URLs are used as-is, existing or absolute file paths are
    /// local, anything else is a server-relative path.
    pub fn locate(server_url: &str, location: &str) -> Result<Self> {
        if location.starts_with("http://") || location.starts_with("https://") {
            return Url::parse(location)
                .map(ImageSource::Remote)
                .map_err(|_| Error::InvalidUrl(location.to_string()));
        }

        let path = Path::new(location);
        if path.is_absolute() || path.exists() {
            return Ok(ImageSource::Local(path.to_path_buf()));
        }

        resolve_url(server_url, location).map(ImageSource::Remote)
    }
}

/// Resolve a server-relative path against the server base URL
pub fn resolve_url(server_url: &str, location: &str) -> Result<Url> {
    if let Ok(url) = Url::parse(location) {
        return Ok(url);
    }
    Url::parse(server_url)
        .and_then(|base| base.join(location))
        .map_err(|_| Error::InvalidUrl(location.to_string()))
}

/// Single GET; Ok if the server answers with a 2xx status. The body is
/// never read.
pub async fn check_reachable(client: Client, url: Url) -> Result<()> {
    tracing::debug!("🔍 Checking {url}");
    let response = client.get(url).send().await?;
    let status = response.status();
    if status.is_success() {
        Ok(())
    } else {
        Err(Error::Status(status.as_u16()))
    }
}

/// Download image bytes for display
pub async fn fetch_bytes(client: Client, url: Url) -> Result<Vec<u8>> {
    let response = client.get(url).send().await?;
    let status = response.status();
    if !status.is_success() {
        return Err(Error::Status(status.as_u16()));
    }
    Ok(response.bytes().await?.to_vec())
}

/// Read a gallery file (JSON array of image records)
pub async fn load_gallery(path: PathBuf) -> Result<Vec<Image>> {
    tracing::info!("📁 Loading gallery from {}", path.display());
    let json = tokio::fs::read_to_string(&path).await?;
    let images: Vec<Image> = serde_json::from_str(&json)?;
    tracing::info!("✅ Loaded {} images", images.len());
    Ok(images)
}

#[cfg(test)]
mod tests {
    use super::*;
    use tokio::io::{AsyncReadExt, AsyncWriteExt};
    use tokio::net::TcpListener;

    /// Serve exactly one request with the given status line, return its URL
    async fn serve_once(status_line: &'static str) -> Url {
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();

        tokio::spawn(async move {
            let (mut socket, _) = listener.accept().await.unwrap();
            let mut buf = [0u8; 1024];
            let _ = socket.read(&mut buf).await;
            let response = format!(
                "HTTP/1.1 {status_line}\r\nContent-Length: 0\r\nConnection: close\r\n\r\n"
            );
            socket.write_all(response.as_bytes()).await.unwrap();
        });

        Url::parse(&format!("http://{addr}/outputs/init-images/a.png")).unwrap()
    }

    #[tokio::test]
    async fn test_reachable_on_200() {
        let url = serve_once("200 OK").await;
        assert!(check_reachable(Client::new(), url).await.is_ok());
    }

    #[tokio::test]
    async fn test_unreachable_on_404() {
        let url = serve_once("404 Not Found").await;
        let result = check_reachable(Client::new(), url).await;
        assert!(matches!(result, Err(Error::Status(404))));
    }

    #[tokio::test]
    async fn test_connection_refused_is_an_error() {
        // Bind and immediately drop to get a port nobody listens on
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        drop(listener);

        let url = Url::parse(&format!("http://{addr}/x.png")).unwrap();
        assert!(matches!(
            check_reachable(Client::new(), url).await,
            Err(Error::Http(_))
        ));
    }

    #[tokio::test]
    async fn test_load_gallery_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("gallery.json");
        std::fs::write(
            &path,
            r#"[{"uuid": "a", "url": "outputs/a.png"}, {"uuid": "b", "url": "outputs/b.png"}]"#,
        )
        .unwrap();

        let images = load_gallery(path).await.unwrap();
        assert_eq!(images.len(), 2);
        assert_eq!(images[1].uuid, "b");

        let missing = load_gallery(dir.path().join("missing.json")).await;
        assert!(matches!(missing, Err(Error::Io(_))));
    }

    #[test]
    fn test_resolve_relative_path() {
        let url = resolve_url("http://127.0.0.1:9090/", "outputs/init-images/a.png").unwrap();
        assert_eq!(url.as_str(), "http://127.0.0.1:9090/outputs/init-images/a.png");

        let absolute =
            resolve_url("http://127.0.0.1:9090/", "https://cdn.example.com/a.png").unwrap();
        assert_eq!(absolute.host_str(), Some("cdn.example.com"));

        assert!(matches!(
            resolve_url("not a url", "a.png"),
            Err(Error::InvalidUrl(_))
        ));
    }

    #[test]
    fn test_locate_sources() {
        let dir = tempfile::tempdir().unwrap();
        let file = dir.path().join("thumb.png");
        std::fs::write(&file, b"").unwrap();
        let local = file.to_string_lossy().to_string();

        assert_eq!(
            ImageSource::locate("http://h/", &local).unwrap(),
            ImageSource::Local(file)
        );
        assert!(matches!(
            ImageSource::locate("http://h/", "outputs/a.png").unwrap(),
            ImageSource::Remote(url) if url.as_str() == "http://h/outputs/a.png"
        ));
    }
}
