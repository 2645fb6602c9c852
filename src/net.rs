use std::collections::HashMap;
use std::fs;
use std::path::PathBuf;
use std::sync::Mutex;
use std::time::{Duration, SystemTime, UNIX_EPOCH};

use anyhow::{Context, Result};
use once_cell::sync::OnceCell;
use reqwest::StatusCode;
use reqwest::blocking::Client;
use reqwest::header::{ETAG, IF_MODIFIED_SINCE, IF_NONE_MATCH, LAST_MODIFIED, USER_AGENT};
use serde::{Deserialize, Serialize};

const REQUEST_TIMEOUT_SECS: u64 = 15;
const CACHE_DIR: &str = "scoutrank";
const CACHE_FILE: &str = "http_bodies.json";
const CACHE_VERSION: u32 = 1;

static CLIENT: OnceCell<Client> = OnceCell::new();
static BODIES: Mutex<Option<BodyCache>> = Mutex::new(None);

/// Shared blocking client. The timeout keeps a hanging collaborator from
/// stalling the whole serial pipeline.
pub fn http_client() -> Result<&'static Client> {
    CLIENT.get_or_try_init(|| {
        Client::builder()
            .timeout(Duration::from_secs(REQUEST_TIMEOUT_SECS))
            .build()
            .context("failed to build http client")
    })
}

#[derive(Debug, Clone, Serialize, Deserialize, Default)]
struct BodyCache {
    version: u32,
    entries: HashMap<String, BodyEntry>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
struct BodyEntry {
    body: String,
    etag: Option<String>,
    last_modified: Option<String>,
    fetched_at: u64,
}

/// GET a JSON body with conditional-request revalidation.
///
/// Known URLs are sent with If-None-Match / If-Modified-Since; a 304 serves
/// the cached body. Anything non-success is an error the caller treats as a
/// fetch failure for that page or profile only.
pub fn fetch_json_cached(client: &Client, url: &str) -> Result<String> {
    let known = lookup_entry(url);

    let mut req = client.get(url).header(USER_AGENT, "Mozilla/5.0");
    if let Some(entry) = known.as_ref() {
        if let Some(etag) = entry.etag.as_deref() {
            req = req.header(IF_NONE_MATCH, etag);
        }
        if let Some(stamp) = entry.last_modified.as_deref() {
            req = req.header(IF_MODIFIED_SINCE, stamp);
        }
    }

    let resp = req.send().context("request failed")?;
    let status = resp.status();

    if status == StatusCode::NOT_MODIFIED {
        let entry = known.context("received 304 without a cached body")?;
        store_entry(url, entry.clone());
        return Ok(entry.body);
    }

    let etag = header_string(&resp, ETAG);
    let last_modified = header_string(&resp, LAST_MODIFIED);
    let body = resp.text().context("failed reading body")?;
    if !status.is_success() {
        anyhow::bail!("http {status}: {body}");
    }

    store_entry(
        url,
        BodyEntry {
            body: body.clone(),
            etag,
            last_modified,
            fetched_at: unix_now(),
        },
    );
    Ok(body)
}

pub fn app_cache_dir() -> Option<PathBuf> {
    if let Ok(base) = std::env::var("XDG_CACHE_HOME") {
        if !base.trim().is_empty() {
            return Some(PathBuf::from(base).join(CACHE_DIR));
        }
    }
    let home = std::env::var("HOME").ok()?;
    if home.trim().is_empty() {
        return None;
    }
    Some(PathBuf::from(home).join(".cache").join(CACHE_DIR))
}

fn lookup_entry(url: &str) -> Option<BodyEntry> {
    let mut guard = BODIES.lock().expect("http body cache lock poisoned");
    let cache = guard.get_or_insert_with(load_cache);
    cache.entries.get(url).cloned()
}

fn store_entry(url: &str, entry: BodyEntry) {
    let mut guard = BODIES.lock().expect("http body cache lock poisoned");
    let cache = guard.get_or_insert_with(load_cache);
    cache.version = CACHE_VERSION;
    cache.entries.insert(url.to_string(), entry);
    if let Err(err) = save_cache(cache) {
        log::debug!("http cache not persisted: {err:#}");
    }
}

fn load_cache() -> BodyCache {
    let Some(path) = cache_file_path() else {
        return BodyCache::default();
    };
    let Ok(raw) = fs::read_to_string(path) else {
        return BodyCache::default();
    };
    let cache = serde_json::from_str::<BodyCache>(&raw).unwrap_or_default();
    if cache.version != CACHE_VERSION {
        return BodyCache::default();
    }
    cache
}

fn save_cache(cache: &BodyCache) -> Result<()> {
    let Some(path) = cache_file_path() else {
        return Ok(());
    };
    if let Some(dir) = path.parent() {
        fs::create_dir_all(dir).ok();
    }
    let tmp = path.with_extension("json.tmp");
    let json = serde_json::to_string(cache).context("serialize http cache")?;
    fs::write(&tmp, json).context("write http cache")?;
    fs::rename(&tmp, &path).context("swap http cache")?;
    Ok(())
}

fn cache_file_path() -> Option<PathBuf> {
    app_cache_dir().map(|dir| dir.join(CACHE_FILE))
}

fn header_string(resp: &reqwest::blocking::Response, name: reqwest::header::HeaderName) -> Option<String> {
    resp.headers()
        .get(name)
        .and_then(|v| v.to_str().ok())
        .map(|v| v.to_string())
}

fn unix_now() -> u64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_secs())
        .unwrap_or_default()
}
