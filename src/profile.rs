use base64ct::{Base64, Encoding};
use bytes::Bytes;

use crate::state::AppState;

/// Detect the image format from the upload's leading magic bytes.
fn image_ext(data: &[u8]) -> Option<&'static str> {
    if data.starts_with(&[0x89, b'P', b'N', b'G', 0x0D, 0x0A, 0x1A, 0x0A]) {
        Some("png")
    } else if data.starts_with(&[0xFF, 0xD8, 0xFF]) {
        Some("jpg")
    } else if data.starts_with(b"GIF87a") || data.starts_with(b"GIF89a") {
        Some("gif")
    } else if data.len() >= 12 && &data[0..4] == b"RIFF" && &data[8..12] == b"WEBP" {
        Some("webp")
    } else {
        None
    }
}

fn content_type_for(ext: &str) -> &'static str {
    match ext {
        "png" => "image/png",
        "jpg" => "image/jpeg",
        "gif" => "image/gif",
        "webp" => "image/webp",
        _ => "application/octet-stream",
    }
}

/// Store the uploaded image under the user's key and hand the bytes back
/// base64-encoded, the same shape the client receives on login.
pub async fn store_profile_image(
    state: &AppState,
    user_id: i64,
    data: Bytes,
) -> anyhow::Result<String> {
    let ext = image_ext(&data)
        .ok_or_else(|| anyhow::anyhow!("unable to determine image format from bytes"))?;
    let key = format!("{user_id}/{user_id}.{ext}");
    state
        .storage
        .put_object(&key, data.clone(), content_type_for(ext))
        .await?;
    Ok(Base64::encode_string(&data))
}

/// Fetch the user's profile image, if any. A user without an image is an
/// expected condition, not an error.
pub async fn load_profile_image(
    state: &AppState,
    user_id: i64,
) -> anyhow::Result<Option<String>> {
    let keys = state.storage.list_keys(&format!("{user_id}/")).await?;
    let Some(key) = keys.first() else {
        return Ok(None);
    };
    let Some(data) = state.storage.get_object(key).await? else {
        return Ok(None);
    };
    Ok(Some(Base64::encode_string(&data)))
}

#[cfg(test)]
mod tests {
    use super::*;

    const PNG_HEADER: &[u8] = &[0x89, b'P', b'N', b'G', 0x0D, 0x0A, 0x1A, 0x0A, 0, 0];

    #[test]
    fn sniffs_known_image_formats() {
        assert_eq!(image_ext(PNG_HEADER), Some("png"));
        assert_eq!(image_ext(&[0xFF, 0xD8, 0xFF, 0xE0]), Some("jpg"));
        assert_eq!(image_ext(b"GIF89a......"), Some("gif"));
        assert_eq!(image_ext(b"RIFF\x00\x00\x00\x00WEBPVP8 "), Some("webp"));
    }

    #[test]
    fn rejects_unknown_bytes() {
        assert_eq!(image_ext(b"plain text"), None);
        assert_eq!(image_ext(&[]), None);
    }

    #[tokio::test]
    async fn store_then_load_roundtrip() {
        let state = AppState::fake("http://127.0.0.1:1");

        let encoded = store_profile_image(&state, 42, Bytes::from_static(PNG_HEADER))
            .await
            .expect("store should succeed");
        assert!(!encoded.is_empty());

        let loaded = load_profile_image(&state, 42)
            .await
            .expect("load should succeed");
        assert_eq!(loaded, Some(encoded));
    }

    #[tokio::test]
    async fn load_without_image_is_none() {
        let state = AppState::fake("http://127.0.0.1:1");
        let loaded = load_profile_image(&state, 7).await.expect("load");
        assert_eq!(loaded, None);
    }

    #[tokio::test]
    async fn store_rejects_undetectable_format() {
        let state = AppState::fake("http://127.0.0.1:1");
        let err = store_profile_image(&state, 42, Bytes::from_static(b"not an image"))
            .await
            .unwrap_err();
        assert!(err.to_string().contains("image format"));
    }
}
