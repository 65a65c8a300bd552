//! HTTP-backed image loader.

use reqwest::Client;
use tokio::runtime::Handle;
use tracing::{debug, warn};
use url::Url;

use super::{ImageLoadCallback, ImageLoadError, ImageLoader};

/// [`ImageLoader`] that requests each image over HTTP and reports whether it
/// could be retrieved.
///
/// Loads run as tasks on the current tokio runtime; `on_complete` is called
/// from that task.
#[derive(Clone)]
pub struct HttpImageLoader {
    client: Client,
}

impl HttpImageLoader {
    #[must_use]
    pub const fn new(client: Client) -> Self {
        Self { client }
    }
}

impl ImageLoader for HttpImageLoader {
    fn load(&self, url: &Url, on_complete: ImageLoadCallback) {
        let Ok(runtime) = Handle::try_current() else {
            on_complete(Err(ImageLoadError::Failed(
                "no async runtime to load images on".to_string(),
            )));
            return;
        };

        let request = self.client.get(url.clone());
        let url = url.clone();
        runtime.spawn(async move {
            let result = match request.send().await {
                Ok(response) if response.status().is_success() => {
                    debug!(%url, "Image loaded");
                    Ok(())
                }
                Ok(response) => {
                    let status = response.status();
                    warn!(%url, %status, "Image request rejected");
                    Err(ImageLoadError::Failed(format!("status {}", status.as_u16())))
                }
                Err(e) => {
                    warn!(%url, error = %e, "Image request failed");
                    Err(ImageLoadError::Failed(e.to_string()))
                }
            };
            on_complete(result);
        });
    }
}
