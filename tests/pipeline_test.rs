//! Integration tests for the photo pipeline against a mocked file endpoint
//!
//! The Bot API getFile step needs a live bot, so these tests exercise the
//! layers below it: the HTTP download, decode normalization, overlay cache,
//! compositing and PNG encoding, wired together the way
//! `process_photo_request` wires them.

use std::sync::Arc;

use image::{Rgba, RgbaImage};
use url::Url;
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

use filtro_do_lula::core::AppError;
use filtro_do_lula::filter::overlay;
use filtro_do_lula::filter::{composite, decode_rgba, encode_png};
use filtro_do_lula::telegram::photos::download_file_bytes;

const TOKEN: &str = "1234567890:TEST";

#[tokio::test]
async fn missing_file_yields_fetch_error_not_a_panic() {
    let server = MockServer::start().await;
    // Nothing mounted: every path answers 404
    let http = reqwest::Client::new();
    let base = Url::parse(&server.uri()).unwrap();

    let err = download_file_bytes(&http, &base, TOKEN, "photos/file_0.jpg")
        .await
        .unwrap_err();

    assert!(matches!(err, AppError::HttpStatus(status) if status.as_u16() == 404));
}

#[tokio::test]
async fn garbage_bytes_yield_decode_error() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path(format!("/file/bot{TOKEN}/photos/file_3.jpg")))
        .respond_with(ResponseTemplate::new(200).set_body_bytes(b"not an image at all".to_vec()))
        .mount(&server)
        .await;

    let http = reqwest::Client::new();
    let base = Url::parse(&server.uri()).unwrap();

    let bytes = download_file_bytes(&http, &base, TOKEN, "photos/file_3.jpg")
        .await
        .unwrap();
    let err = decode_rgba(&bytes).unwrap_err();

    assert!(matches!(err, AppError::Decode(_)));
}

#[tokio::test]
async fn downloaded_photo_flows_through_the_whole_pipeline() {
    let server = MockServer::start().await;

    let photo = RgbaImage::from_pixel(320, 240, Rgba([15, 90, 170, 255]));
    let body = encode_png(&photo).unwrap();

    Mock::given(method("GET"))
        .and(path(format!("/file/bot{TOKEN}/photos/file_7.png")))
        .respond_with(ResponseTemplate::new(200).set_body_bytes(body))
        .mount(&server)
        .await;

    let http = reqwest::Client::new();
    let base = Url::parse(&server.uri()).unwrap();

    let bytes = download_file_bytes(&http, &base, TOKEN, "photos/file_7.png")
        .await
        .unwrap();
    let fetched = decode_rgba(&bytes).unwrap();
    assert_eq!(fetched.dimensions(), (320, 240));

    let badge = overlay::get(fetched.width(), fetched.height()).unwrap();
    assert_eq!(badge.dimensions(), fetched.dimensions());

    let stamped = composite(&fetched, &badge).unwrap();
    let encoded = encode_png(&stamped).unwrap();

    let round_trip = decode_rgba(&encoded).unwrap();
    assert_eq!(round_trip.dimensions(), (320, 240));
    assert_eq!(round_trip.as_raw(), stamped.as_raw());
}

#[test]
fn overlay_for_one_size_is_stable_across_requests() {
    let first = overlay::get(222, 111).unwrap();
    let second = overlay::get(222, 111).unwrap();

    assert_eq!(first.dimensions(), (222, 111));
    assert!(Arc::ptr_eq(&first, &second));
    assert_eq!(first.as_raw(), second.as_raw());
}
