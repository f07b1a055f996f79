use std::collections::HashMap;

/// A linkable detail page for a project.
#[derive(Debug, Clone, PartialEq)]
pub struct DetailRecord {
    pub project_id: String,
    pub slug: String,
    pub title: String,
    /// Address shown while the detail is open, e.g. `/work/harbour`.
    pub url: String,
}

/// Looks up the detail target of a card's project.
///
/// A miss is not an error: the card simply cannot be opened to `cover`.
pub trait DetailResolver {
    fn resolve(&self, project_id: &str, slug: Option<&str>) -> Option<DetailRecord>;
}

/// Never resolves; every second tap zooms out.
#[derive(Debug, Default, Clone, Copy)]
pub struct NoDetails;

impl DetailResolver for NoDetails {
    fn resolve(&self, _: &str, _: Option<&str>) -> Option<DetailRecord> {
        None
    }
}

/// In-memory resolver keyed by slug.
#[derive(Debug, Default, Clone)]
pub struct DetailCatalog {
    by_slug: HashMap<String, DetailRecord>,
}

impl DetailCatalog {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, record: DetailRecord) {
        self.by_slug.insert(record.slug.clone(), record);
    }

    pub fn len(&self) -> usize {
        self.by_slug.len()
    }

    pub fn is_empty(&self) -> bool {
        self.by_slug.is_empty()
    }
}

impl FromIterator<DetailRecord> for DetailCatalog {
    fn from_iter<I: IntoIterator<Item = DetailRecord>>(iter: I) -> Self {
        let mut catalog = Self::new();
        for record in iter {
            catalog.insert(record);
        }
        catalog
    }
}

impl DetailResolver for DetailCatalog {
    fn resolve(&self, project_id: &str, slug: Option<&str>) -> Option<DetailRecord> {
        let record = self.by_slug.get(slug?)?;
        (record.project_id == project_id).then(|| record.clone())
    }
}

#[cfg(test)]
pub(crate) fn test_record(slug: &str) -> DetailRecord {
    DetailRecord {
        project_id: format!("id-{slug}"),
        slug: slug.to_string(),
        title: slug.to_uppercase(),
        url: format!("/work/{slug}"),
    }
}
