use serde::{Deserialize, Serialize};

use crate::text::slugify;

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct TaxonomyTerm {
    pub id: i64,
    pub name: String,
    pub slug: String,
}

impl TaxonomyTerm {
    /// Categories and tags created in this session have not been persisted
    /// yet and carry a non-positive id.
    pub fn is_provisional(&self) -> bool {
        self.id <= 0
    }

    pub fn slug_or_derived(&self) -> String {
        match self.slug.trim() {
            "" => slugify(&self.name),
            slug => slug.to_string(),
        }
    }
}

/// Reference lists loaded once at session start.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Taxonomy {
    pub categories: Vec<TaxonomyTerm>,
    pub tags: Vec<TaxonomyTerm>,
}

impl Taxonomy {
    pub fn category(&self, id: i64) -> Option<&TaxonomyTerm> {
        self.categories.iter().find(|term| term.id == id)
    }

    pub fn has_tag(&self, name: &str) -> bool {
        let name = name.trim();
        self.tags.iter().any(|tag| tag.name.eq_ignore_ascii_case(name))
    }
}

/// The author's category and tag choices.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct TaxonomySelection {
    /// Selected ids; provisional categories appear with their negative id.
    pub category_ids: Vec<i64>,
    /// Categories created during this session.
    pub new_categories: Vec<TaxonomyTerm>,
    pub primary_category_id: Option<i64>,
    pub tag_names: Vec<String>,
}

impl TaxonomySelection {
    /// Add a provisional category and select it. Ids count down from -1.
    pub fn create_category(&mut self, name: &str) -> i64 {
        let name = name.trim();
        if let Some(existing) = self
            .new_categories
            .iter()
            .find(|term| term.name.eq_ignore_ascii_case(name))
        {
            let id = existing.id;
            self.select_category(id);
            return id;
        }

        let id = self
            .new_categories
            .iter()
            .map(|term| term.id)
            .min()
            .map_or(-1, |lowest| lowest.min(0) - 1);
        self.new_categories.push(TaxonomyTerm {
            id,
            name: name.to_string(),
            slug: slugify(name),
        });
        self.select_category(id);
        id
    }

    fn select_category(&mut self, id: i64) {
        if !self.category_ids.contains(&id) {
            self.category_ids.push(id);
        }
    }

    /// Selected categories in selection order, persisted or provisional.
    /// Ids that match nothing are skipped.
    pub fn categories<'a>(&'a self, taxonomy: &'a Taxonomy) -> Vec<&'a TaxonomyTerm> {
        self.category_ids
            .iter()
            .filter_map(|id| self.lookup(*id, taxonomy))
            .collect()
    }

    pub fn primary_category<'a>(&'a self, taxonomy: &'a Taxonomy) -> Option<&'a TaxonomyTerm> {
        self.primary_category_id
            .and_then(|id| self.lookup(id, taxonomy))
    }

    fn lookup<'a>(&'a self, id: i64, taxonomy: &'a Taxonomy) -> Option<&'a TaxonomyTerm> {
        if id <= 0 {
            self.new_categories.iter().find(|term| term.id == id)
        } else {
            taxonomy.category(id)
        }
    }

    /// Tag names with blanks and case-insensitive duplicates removed.
    pub fn tags(&self) -> Vec<&str> {
        let mut seen: Vec<String> = Vec::new();
        self.tag_names
            .iter()
            .map(|name| name.trim())
            .filter(|name| !name.is_empty())
            .filter(|name| {
                let key = name.to_lowercase();
                if seen.contains(&key) {
                    return false;
                }
                seen.push(key);
                true
            })
            .collect()
    }

    /// Split tags into those already known to the site and new ones.
    pub fn partition_tags(&self, taxonomy: &Taxonomy) -> (Vec<String>, Vec<String>) {
        let (existing, new): (Vec<&str>, Vec<&str>) =
            self.tags().into_iter().partition(|name| taxonomy.has_tag(name));
        (
            existing.into_iter().map(str::to_string).collect(),
            new.into_iter().map(str::to_string).collect(),
        )
    }
}
