//! Background photo loader.
//!
//! Each photo reference is either an `http(s)` URL, fetched with a blocking
//! reqwest client, or a path on disk. Work runs on one thread per request
//! and reports back over an mpsc channel; the viewer calls `poll` once per
//! frame and uploads whatever has finished as a texture.
//!
//! A photo that cannot be fetched or decoded is remembered as failed and
//! never retried. The viewer keeps drawing a blank frame for it.

use std::collections::{HashMap, HashSet};
use std::path::PathBuf;
use std::sync::mpsc;
use std::time::Duration;

use url::Url;

/// Longest edge of a decoded photo, pixels
pub const MAX_EDGE: u32 = 512;

const FETCH_TIMEOUT: Duration = Duration::from_secs(10);

/// Decoded photo data (RGBA).
pub struct PhotoData {
    pub width: u32,
    pub height: u32,
    pub rgba: Vec<u8>,
}

/// Where a load failed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoadPhase {
    Fetch,
    Read,
    Decode,
}

impl std::fmt::Display for LoadPhase {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            LoadPhase::Fetch => write!(f, "fetch"),
            LoadPhase::Read => write!(f, "read"),
            LoadPhase::Decode => write!(f, "decode"),
        }
    }
}

/// Error while loading one photo
#[derive(Debug, Clone)]
pub struct PhotoLoadError {
    pub message: String,
    pub phase: LoadPhase,
}

impl std::fmt::Display for PhotoLoadError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "[{}] {}", self.phase, self.message)
    }
}

impl std::error::Error for PhotoLoadError {}

/// Resolved photo reference.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PhotoSource {
    Remote(Url),
    Local(PathBuf),
}

impl PhotoSource {
    /// `http`/`https` URLs are remote; `file://` URLs and anything else are
    /// paths on disk.
    pub fn parse(image_ref: &str) -> Self {
        match Url::parse(image_ref) {
            Ok(url) if matches!(url.scheme(), "http" | "https") => PhotoSource::Remote(url),
            Ok(url) if url.scheme() == "file" => match url.to_file_path() {
                Ok(path) => PhotoSource::Local(path),
                Err(()) => PhotoSource::Local(PathBuf::from(image_ref)),
            },
            _ => PhotoSource::Local(PathBuf::from(image_ref)),
        }
    }
}

/// Manages background photo loading and decoding.
#[derive(Default)]
pub struct PhotoLoader {
    pending: HashMap<String, mpsc::Receiver<Result<PhotoData, PhotoLoadError>>>,
    loaded: HashMap<String, PhotoData>,
    failed: HashSet<String>,
}

impl PhotoLoader {
    pub fn new() -> Self {
        Self::default()
    }

    /// Start loading `image_ref` unless it is already known.
    pub fn request(&mut self, image_ref: &str) {
        if self.loaded.contains_key(image_ref)
            || self.pending.contains_key(image_ref)
            || self.failed.contains(image_ref)
        {
            return;
        }

        let (tx, rx) = mpsc::channel();
        let source = PhotoSource::parse(image_ref);
        std::thread::spawn(move || {
            let _ = tx.send(load(&source));
        });
        self.pending.insert(image_ref.to_string(), rx);
    }

    /// Collect finished loads. Returns the refs that became available.
    pub fn poll(&mut self) -> Vec<String> {
        let mut done = Vec::new();
        let mut ready = Vec::new();
        for (image_ref, rx) in &self.pending {
            let result = match rx.try_recv() {
                Ok(result) => result,
                Err(mpsc::TryRecvError::Empty) => continue,
                Err(mpsc::TryRecvError::Disconnected) => Err(PhotoLoadError {
                    message: "loader thread exited".into(),
                    phase: LoadPhase::Fetch,
                }),
            };
            match result {
                Ok(data) => {
                    log::debug!("photo {} loaded ({}x{})", image_ref, data.width, data.height);
                    self.loaded.insert(image_ref.clone(), data);
                    ready.push(image_ref.clone());
                }
                Err(e) => {
                    log::debug!("photo {} failed: {}", image_ref, e);
                    self.failed.insert(image_ref.clone());
                }
            }
            done.push(image_ref.clone());
        }
        for image_ref in done {
            self.pending.remove(&image_ref);
        }
        ready
    }

    pub fn get(&self, image_ref: &str) -> Option<&PhotoData> {
        self.loaded.get(image_ref)
    }

    /// Drop the decoded pixels once the viewer has its own copy.
    pub fn take(&mut self, image_ref: &str) -> Option<PhotoData> {
        self.loaded.remove(image_ref)
    }

    pub fn has_failed(&self, image_ref: &str) -> bool {
        self.failed.contains(image_ref)
    }

    pub fn pending_count(&self) -> usize {
        self.pending.len()
    }
}

/// Fetch or read, then decode.
pub fn load(source: &PhotoSource) -> Result<PhotoData, PhotoLoadError> {
    let bytes = match source {
        PhotoSource::Remote(url) => fetch(url)?,
        PhotoSource::Local(path) => std::fs::read(path).map_err(|e| PhotoLoadError {
            message: format!("{}: {}", path.display(), e),
            phase: LoadPhase::Read,
        })?,
    };
    decode(&bytes)
}

fn fetch(url: &Url) -> Result<Vec<u8>, PhotoLoadError> {
    let fetch_err = |e: reqwest::Error| PhotoLoadError {
        message: e.to_string(),
        phase: LoadPhase::Fetch,
    };
    let resp = reqwest::blocking::Client::builder()
        .timeout(FETCH_TIMEOUT)
        .build()
        .map_err(fetch_err)?
        .get(url.as_str())
        .send()
        .map_err(fetch_err)?;

    if !resp.status().is_success() {
        return Err(PhotoLoadError {
            message: format!("HTTP {}", resp.status()),
            phase: LoadPhase::Fetch,
        });
    }
    Ok(resp.bytes().map_err(fetch_err)?.to_vec())
}

/// Decode to RGBA, shrinking so the longest edge is at most [`MAX_EDGE`].
pub fn decode(bytes: &[u8]) -> Result<PhotoData, PhotoLoadError> {
    let img = image::load_from_memory(bytes).map_err(|e| PhotoLoadError {
        message: e.to_string(),
        phase: LoadPhase::Decode,
    })?;
    let rgba = img.to_rgba8();
    let (w, h) = rgba.dimensions();
    let (tw, th) = fit_within(w, h, MAX_EDGE);

    let rgba = if (tw, th) == (w, h) {
        rgba
    } else {
        image::imageops::resize(&rgba, tw, th, image::imageops::FilterType::Triangle)
    };
    Ok(PhotoData {
        width: tw,
        height: th,
        rgba: rgba.into_raw(),
    })
}

/// Scale `(w, h)` down to fit a `max`×`max` box, keeping aspect.
pub fn fit_within(w: u32, h: u32, max: u32) -> (u32, u32) {
    let longest = w.max(h);
    if longest <= max || longest == 0 {
        return (w, h);
    }
    let ratio = max as f32 / longest as f32;
    let scale = |v: u32| ((v as f32 * ratio).round() as u32).max(1);
    (scale(w), scale(h))
}
