use super::source::TileSource;
use crate::core::{config::TileLoadingConfig, geo::TileCoord};
use crate::{MapError, Result};
use crossbeam_channel::{Receiver, Sender};
use once_cell::sync::Lazy;
use reqwest::blocking::Client;
use std::thread;

/// Shared blocking HTTP client. Building it once avoids TLS and connection
/// pool setup for every tile.
pub(crate) static HTTP_CLIENT: Lazy<Client> = Lazy::new(|| {
    Client::builder()
        .user_agent(concat!("estate-map/", env!("CARGO_PKG_VERSION")))
        .build()
        .unwrap_or_else(|e| {
            log::error!("falling back to default HTTP client: {}", e);
            Client::new()
        })
});

/// Identifies a tile of a particular style
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct TileKey {
    pub style_url: String,
    pub coord: TileCoord,
}

impl TileKey {
    pub fn new(style_url: impl Into<String>, coord: TileCoord) -> Self {
        Self {
            style_url: style_url.into(),
            coord,
        }
    }
}

/// Outcome of one download, reported back over the loader's channel
#[derive(Debug)]
pub struct TileResult {
    pub key: TileKey,
    pub outcome: Result<Vec<u8>>,
}

/// Tile loader that fetches tiles on background threads and sends the
/// results back over a channel.
pub struct TileLoader {
    tx: Sender<TileResult>,
    config: TileLoadingConfig,
}

impl TileLoader {
    /// Create a new tile loader given a sender to report completed downloads.
    pub fn new(tx: Sender<TileResult>, config: TileLoadingConfig) -> Self {
        Self { tx, config }
    }

    /// A loader together with the receiving end of its channel
    pub fn channel(config: TileLoadingConfig) -> (Self, Receiver<TileResult>) {
        let (tx, rx) = crossbeam_channel::unbounded();
        (Self::new(tx, config), rx)
    }

    pub fn config(&self) -> &TileLoadingConfig {
        &self.config
    }

    /// Start downloading `key`. The download runs on a detached thread; the
    /// sender receives exactly one result once all attempts are spent.
    pub fn start_download(&self, source: &dyn TileSource, key: TileKey) {
        let url = source.url(key.coord);
        let tx = self.tx.clone();
        let config = self.config.clone();

        thread::spawn(move || {
            let max_attempts = config.max_attempts();
            let mut attempt = 1;
            let outcome = loop {
                log::debug!("fetch tile {:?} attempt {}", key.coord, attempt);
                match fetch(&url) {
                    Ok(data) => {
                        log::debug!("downloaded tile {:?} ({} bytes)", key.coord, data.len());
                        break Ok(data);
                    }
                    Err(e) if attempt < max_attempts => {
                        log::warn!(
                            "tile {:?} download failed on attempt {}: {}",
                            key.coord,
                            attempt,
                            e
                        );
                        thread::sleep(config.retry_delay(attempt));
                        attempt += 1;
                    }
                    Err(e) => {
                        log::error!("giving up on tile {:?}: {}", key.coord, e);
                        break Err(e);
                    }
                }
            };

            // The surface may have been dropped meanwhile
            let _ = tx.send(TileResult { key, outcome });
        });
    }
}

fn fetch(url: &str) -> Result<Vec<u8>> {
    let resp = HTTP_CLIENT.get(url).send()?;
    let status = resp.status();
    if !status.is_success() {
        return Err(MapError::Http(status.as_u16()));
    }
    Ok(resp.bytes()?.to_vec())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;

    struct Unroutable;

    impl TileSource for Unroutable {
        fn url(&self, coord: TileCoord) -> String {
            format!("http://127.0.0.1:9/{}/{}/{}.png", coord.z, coord.x, coord.y)
        }
    }

    #[test]
    fn test_failed_download_reports_once() {
        let config = TileLoadingConfig {
            max_retries: 1,
            retry_delay_ms: 1,
            ..TileLoadingConfig::default()
        };
        let (loader, rx) = TileLoader::channel(config);
        let key = TileKey::new("mapbox://styles/mapbox/streets-v11", TileCoord::new(0, 0, 0));

        loader.start_download(&Unroutable, key.clone());

        let result = rx
            .recv_timeout(Duration::from_secs(30))
            .expect("loader reports a result");
        assert_eq!(result.key, key);
        assert!(result.outcome.is_err());
        assert!(rx.recv_timeout(Duration::from_millis(200)).is_err());
    }
}
