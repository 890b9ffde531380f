//! Photo selection, retrieval and the overlay pipeline
//!
//! Telegram describes one logical photo as several size variants. The
//! pipeline always works on the widest variant: resolve its file path via
//! getFile, download the bytes into memory, decode to RGBA, blend the
//! overlay on top and hand back PNG bytes ready for sendPhoto.

use image::RgbaImage;
use reqwest::Client;
use teloxide::prelude::*;
use teloxide::types::PhotoSize;
use url::Url;

use crate::core::config;
use crate::core::error::{AppError, AppResult};
use crate::filter::overlay;
use crate::filter::{composite, decode_rgba, encode_png};

/// Picks the highest-resolution variant of a photo
///
/// Ties on width are resolved arbitrarily. Returns `None` only for an empty
/// slice; callers treat that as "no photo" before reaching the pipeline.
pub fn select_largest(sizes: &[PhotoSize]) -> Option<&PhotoSize> {
    sizes.iter().max_by_key(|photo| photo.width)
}

fn api_base() -> AppResult<Url> {
    let base = config::BOT_API_URL.as_deref().unwrap_or("https://api.telegram.org");
    Ok(Url::parse(base)?)
}

/// Builds the file-download URL: `{base}/file/bot{token}/{file_path}`
fn build_file_url(base: &Url, token: &str, file_path: &str) -> AppResult<Url> {
    let mut url = base.clone();

    {
        let mut segments = url
            .path_segments_mut()
            .map_err(|_| AppError::ApiBase(format!("{} cannot carry a path", base)))?;
        segments.push("file");
        segments.push(&format!("bot{token}"));
        for seg in file_path.split('/') {
            if !seg.is_empty() {
                segments.push(seg);
            }
        }
    }

    Ok(url)
}

/// Downloads a Telegram-served file into memory
///
/// # Returns
/// The raw file bytes, `AppError::HttpStatus` on a non-success answer, or
/// `AppError::Fetch` on transport failure. No retries happen here.
pub async fn download_file_bytes(http: &Client, base: &Url, token: &str, file_path: &str) -> AppResult<Vec<u8>> {
    let file_url = build_file_url(base, token, file_path)?;

    let response = http.get(file_url).send().await?;
    let status = response.status();
    if !status.is_success() {
        return Err(AppError::HttpStatus(status));
    }

    Ok(response.bytes().await?.to_vec())
}

/// Resolves a photo variant to a freshly decoded RGBA bitmap
pub async fn fetch_and_decode(bot: &Bot, http: &Client, photo: &PhotoSize) -> AppResult<RgbaImage> {
    let file = bot.get_file(photo.file.id.clone()).await?;
    log::debug!("Fetching photo file: path={}, size={} bytes", file.path, file.size);

    let base = api_base()?;
    let bytes = download_file_bytes(http, &base, bot.token(), &file.path).await?;
    decode_rgba(&bytes)
}

/// Runs the full pipeline for one photo
///
/// Picks the largest variant, fetches and decodes it, blends the overlay
/// (resized to the photo's own dimensions) on top and serializes the result
/// to PNG.
pub async fn process_photo_request(bot: &Bot, http: &Client, sizes: &[PhotoSize]) -> AppResult<Vec<u8>> {
    let largest = select_largest(sizes).ok_or(AppError::MalformedUpdate("photo without any size variants"))?;

    let photo = fetch_and_decode(bot, http, largest).await?;
    let badge = overlay::get(photo.width(), photo.height())?;
    let stamped = composite(&photo, &badge)?;
    encode_png(&stamped)
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use teloxide::types::{FileId, FileMeta, FileUniqueId};

    fn variant(id: &str, width: u32, height: u32) -> PhotoSize {
        PhotoSize {
            file: FileMeta {
                id: FileId(id.to_string()),
                unique_id: FileUniqueId(format!("u-{id}")),
                size: 0,
            },
            width,
            height,
        }
    }

    #[test]
    fn test_select_largest_picks_widest_variant() {
        let sizes = vec![variant("A", 100, 100), variant("B", 800, 800), variant("C", 400, 400)];

        let largest = select_largest(&sizes).unwrap();
        assert_eq!(largest.file.id.0, "B");
    }

    #[test]
    fn test_select_largest_is_maximal() {
        let sizes = vec![variant("a", 90, 60), variant("b", 1280, 853), variant("c", 320, 213)];

        let largest = select_largest(&sizes).unwrap();
        assert!(sizes.iter().all(|s| s.width <= largest.width));
    }

    #[test]
    fn test_select_largest_on_empty_slice() {
        assert!(select_largest(&[]).is_none());
    }

    #[test]
    fn test_build_file_url_layout() {
        let base = Url::parse("https://api.telegram.org").unwrap();

        let url = build_file_url(&base, "123:abc", "photos/file_0.jpg").unwrap();
        assert_eq!(url.as_str(), "https://api.telegram.org/file/bot123:abc/photos/file_0.jpg");
    }

    #[test]
    fn test_build_file_url_skips_empty_segments() {
        let base = Url::parse("http://localhost:8081").unwrap();

        let url = build_file_url(&base, "42:token", "/photos//file_1.jpg").unwrap();
        assert_eq!(url.as_str(), "http://localhost:8081/file/bot42:token/photos/file_1.jpg");
    }
}
