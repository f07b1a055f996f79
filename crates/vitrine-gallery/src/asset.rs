use thiserror::Error;
use vitrine_grid::Orientation;

/// Stable identifier of a loaded asset within one [`AssetPool`].
#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash, Ord, PartialOrd)]
pub struct AssetHandle(pub u32);

/// Asset description supplied by the host before loading.
#[derive(Debug, Clone, PartialEq)]
pub struct AssetRecord {
    pub project_id: String,
    pub project_slug: Option<String>,
    pub image_url: String,
    /// Overrides orientation derived from pixel dimensions.
    pub orientation: Option<Orientation>,
}

/// A loaded image. Cards reference assets by handle.
#[derive(Debug, Clone, PartialEq)]
pub struct Asset {
    pub handle: AssetHandle,
    pub source_url: String,
    pub natural_width: u32,
    pub natural_height: u32,
    pub project_id: String,
    pub project_slug: Option<String>,
    pub orientation: Orientation,
}

#[derive(Debug, Error)]
pub enum AssetError {
    #[error("asset not found: {0}")]
    NotFound(String),
    #[error("failed to decode {url}: {reason}")]
    Decode { url: String, reason: String },
    #[error("{url} has zero size")]
    Empty { url: String },
    #[error("{url} is {width}x{height}, larger than the {limit}px limit")]
    TooLarge { url: String, width: u32, height: u32, limit: u32 },
}

/// Resolves a record to pixel data owned by the host.
///
/// Implementations return natural `(width, height)`; where the pixels go
/// (GPU upload, cache) is up to the host, keyed by `handle`.
pub trait AssetLoader {
    fn load(&mut self, handle: AssetHandle, record: &AssetRecord) -> Result<(u32, u32), AssetError>;
}

/// Ordered set of successfully loaded assets.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct AssetPool {
    assets: Vec<Asset>,
}

impl AssetPool {
    /// Loads `records` in order. Failures are logged and skipped; handles are
    /// assigned by record position, so they stay stable across partial failure.
    pub fn load(records: &[AssetRecord], loader: &mut impl AssetLoader) -> Self {
        let mut assets = Vec::with_capacity(records.len());
        for (i, record) in records.iter().enumerate() {
            let handle = AssetHandle(i as u32);
            match loader.load(handle, record) {
                Ok((w, h)) if w > 0 && h > 0 => assets.push(Asset {
                    handle,
                    source_url: record.image_url.clone(),
                    natural_width: w,
                    natural_height: h,
                    project_id: record.project_id.clone(),
                    project_slug: record.project_slug.clone(),
                    orientation: record
                        .orientation
                        .unwrap_or_else(|| Orientation::from_dimensions(w, h)),
                }),
                Ok(_) => log::warn!("skipping {}: zero size", record.image_url),
                Err(e) => log::warn!("skipping asset: {e}"),
            }
        }
        log::info!("asset pool: {} of {} loaded", assets.len(), records.len());
        Self { assets }
    }

    pub fn from_assets(assets: Vec<Asset>) -> Self {
        Self { assets }
    }

    pub fn len(&self) -> usize {
        self.assets.len()
    }

    pub fn is_empty(&self) -> bool {
        self.assets.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Asset> {
        self.assets.iter()
    }

    pub fn get(&self, handle: AssetHandle) -> Option<&Asset> {
        // Handles are usually positional; fall back to a scan after skipped loads.
        match self.assets.get(handle.0 as usize) {
            Some(a) if a.handle == handle => Some(a),
            _ => self.assets.iter().find(|a| a.handle == handle),
        }
    }

    /// Handles of one orientation, in pool order.
    pub fn handles(&self, orientation: Orientation) -> Vec<AssetHandle> {
        self.assets
            .iter()
            .filter(|a| a.orientation == orientation)
            .map(|a| a.handle)
            .collect()
    }

    /// Handles for frames of `orientation`; the whole pool when that pool is empty.
    pub fn pool_for(&self, orientation: Orientation) -> Vec<AssetHandle> {
        let own = self.handles(orientation);
        if own.is_empty() {
            self.assets.iter().map(|a| a.handle).collect()
        } else {
            own
        }
    }
}

#[cfg(test)]
pub(crate) fn test_asset(handle: u32, w: u32, h: u32, slug: Option<&str>) -> Asset {
    Asset {
        handle: AssetHandle(handle),
        source_url: format!("img/{handle}.jpg"),
        natural_width: w,
        natural_height: h,
        project_id: format!("p{handle}"),
        project_slug: slug.map(str::to_string),
        orientation: Orientation::from_dimensions(w, h),
    }
}
