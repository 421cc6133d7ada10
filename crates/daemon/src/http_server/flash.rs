//! One-shot notices carried from a redirecting handler to the next rendered page.
//!
//! Messages are queued in a signed cookie as a base64-encoded JSON array.
//! Handlers that redirect [`push`] onto the queue; handlers that render a page
//! [`take`] the queue, which also clears the cookie.

use axum_extra::extract::cookie::{Cookie, SignedCookieJar};
use base64::engine::general_purpose::URL_SAFE_NO_PAD;
use base64::Engine;

pub const FLASH_COOKIE: &str = "_flashes";

/// Longest encoded queue kept. Leaves room for the signature and cookie
///  attributes under the 4096 byte limit browsers enforce per cookie.
pub const MAX_ENCODED_LEN: usize = 3800;

/// Append `messages` to the queue carried by `jar`
pub fn push<I, S>(jar: SignedCookieJar, messages: I) -> SignedCookieJar
where
    I: IntoIterator<Item = S>,
    S: Into<String>,
{
    let mut queued = read(&jar);
    queued.extend(messages.into_iter().map(Into::into));
    if queued.is_empty() {
        return jar;
    }

    let queued = fit(queued);
    let cookie = Cookie::build((FLASH_COOKIE, encode(&queued)))
        .path("/")
        .http_only(true);
    jar.add(cookie)
}

/// Drain the queue, returning the jar with the cookie removed
pub fn take(jar: SignedCookieJar) -> (SignedCookieJar, Vec<String>) {
    if jar.get(FLASH_COOKIE).is_none() {
        return (jar, Vec::new());
    }

    let messages = read(&jar);
    let jar = jar.remove(Cookie::build(FLASH_COOKIE).path("/"));
    (jar, messages)
}

/// Drop the oldest messages until the queue fits in a cookie. A single
///  message that is still too large gets cut short.
fn fit(mut queued: Vec<String>) -> Vec<String> {
    while queued.len() > 1 && encode(&queued).len() > MAX_ENCODED_LEN {
        queued.remove(0);
    }
    if let Some(last) = queued.last_mut() {
        while encode(std::slice::from_ref(last)).len() > MAX_ENCODED_LEN {
            let keep = last.chars().count() / 2;
            *last = last.chars().take(keep).collect();
        }
    }
    queued
}

fn read(jar: &SignedCookieJar) -> Vec<String> {
    jar.get(FLASH_COOKIE)
        .and_then(|cookie| decode(cookie.value()))
        .unwrap_or_default()
}

fn encode(messages: &[String]) -> String {
    // serializing a slice of strings cannot fail
    let json = serde_json::to_vec(messages).unwrap_or_default();
    URL_SAFE_NO_PAD.encode(json)
}

fn decode(value: &str) -> Option<Vec<String>> {
    let json = URL_SAFE_NO_PAD.decode(value).ok()?;
    serde_json::from_slice(&json).ok()
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum_extra::extract::cookie::Key;

    #[test]
    fn test_push_then_take() {
        let jar = SignedCookieJar::new(Key::generate());
        let jar = push(jar, ["first"]);
        let jar = push(jar, vec!["second; with, punctuation".to_string()]);

        let (jar, messages) = take(jar);
        assert_eq!(messages, vec!["first", "second; with, punctuation"]);

        let (_, again) = take(jar);
        assert!(again.is_empty());
    }

    #[test]
    fn test_push_nothing_leaves_jar_untouched() {
        let jar = push(SignedCookieJar::new(Key::generate()), Vec::<String>::new());
        assert!(jar.get(FLASH_COOKIE).is_none());
    }

    #[test]
    fn test_oversized_queue_keeps_newest() {
        let jar = SignedCookieJar::new(Key::generate());
        let rejected: Vec<String> = (0..50)
            .map(|i| format!("Rejected holiday_photos_{:02}.zip: unsupported file type", i))
            .collect();
        let jar = push(jar, rejected);
        let jar = push(jar, ["Uploaded 0 file(s) successfully!"]);

        let value = jar.get(FLASH_COOKIE).unwrap().value().to_string();
        assert!(value.len() <= MAX_ENCODED_LEN);

        let (_, messages) = take(jar);
        assert_eq!(
            messages.last().map(String::as_str),
            Some("Uploaded 0 file(s) successfully!")
        );
        assert!(messages.len() < 51);
    }

    #[test]
    fn test_single_huge_message_is_cut() {
        let queued = fit(vec!["x".repeat(10_000)]);
        assert_eq!(queued.len(), 1);
        assert!(encode(&queued).len() <= MAX_ENCODED_LEN);
        assert!(!queued[0].is_empty());
    }

    #[test]
    fn test_garbage_value_decodes_to_nothing() {
        assert_eq!(decode("not base64 at all!"), None);
        assert_eq!(decode(&URL_SAFE_NO_PAD.encode(b"{\"no\":1}")), None);
    }
}
