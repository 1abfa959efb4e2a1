use base64::Engine as _;
use base64::engine::general_purpose::URL_SAFE_NO_PAD;

const STATE_BYTES: usize = 32;

/// Random, URL-safe value binding a provider redirect to the browser that began it.
pub fn generate_state() -> String {
    let bytes: [u8; STATE_BYTES] = rand::random();
    URL_SAFE_NO_PAD.encode(bytes)
}
