//! Saved-recipe storage.
//!
//! The whole saved list is one JSON array in a single file, written as one
//! blob on every change. The recipe name is the primary key: saving an
//! existing name overwrites in place, lookups and deletes are exact and
//! case-sensitive.

use std::path::PathBuf;

use crate::error::StoreError;
use crate::recipe::Recipe;
use crate::storage::data_dir;

pub struct RecipeStore {
    path: PathBuf,
}

impl RecipeStore {
    /// Open the recipe store at the default data directory.
    pub fn open() -> Result<Self, StoreError> {
        let data_dir = data_dir().map_err(|e| StoreError::DataDir(e.to_string()))?;
        Ok(Self {
            path: data_dir.join("recipes.json"),
        })
    }

    /// Create a recipe store with a custom path (for testing).
    pub fn with_path(path: PathBuf) -> Self {
        Self { path }
    }

    /// Load all saved recipes.
    ///
    /// A missing or garbled file degrades to an empty list rather than
    /// failing app startup.
    pub fn load_all(&self) -> Result<Vec<Recipe>, StoreError> {
        if !self.path.exists() {
            return Ok(Vec::new());
        }
        let content = std::fs::read_to_string(&self.path)?;
        let recipes = serde_json::from_str(&content).unwrap_or_default();
        Ok(recipes)
    }

    /// Write the full list as one blob.
    pub fn save_all(&self, recipes: &[Recipe]) -> Result<(), StoreError> {
        let content = serde_json::to_string_pretty(recipes)?;
        std::fs::write(&self.path, content)?;
        Ok(())
    }

    /// Insert or replace by exact name match; returns the updated list.
    pub fn upsert(&self, recipe: Recipe) -> Result<Vec<Recipe>, StoreError> {
        let mut recipes = self.load_all()?;
        match recipes.iter_mut().find(|r| r.name == recipe.name) {
            Some(existing) => *existing = recipe,
            None => recipes.push(recipe),
        }
        self.save_all(&recipes)?;
        Ok(recipes)
    }

    /// Exact lookup by name.
    pub fn find(&self, name: &str) -> Result<Recipe, StoreError> {
        self.load_all()?
            .into_iter()
            .find(|r| r.name == name)
            .ok_or_else(|| StoreError::NotFound(name.to_string()))
    }

    /// Remove by exact name match; returns the updated list.
    pub fn delete(&self, name: &str) -> Result<Vec<Recipe>, StoreError> {
        let mut recipes = self.load_all()?;
        let original_len = recipes.len();
        recipes.retain(|r| r.name != name);
        if recipes.len() == original_len {
            return Err(StoreError::NotFound(name.to_string()));
        }
        self.save_all(&recipes)?;
        Ok(recipes)
    }

    pub fn path(&self) -> &PathBuf {
        &self.path
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    fn store_in(dir: &tempfile::TempDir) -> RecipeStore {
        RecipeStore::with_path(dir.path().join("recipes.json"))
    }

    fn named(name: &str, mash_temp: f64) -> Recipe {
        Recipe {
            name: name.into(),
            mash_temp,
            ..Recipe::default()
        }
    }

    #[test]
    fn missing_file_loads_as_empty_list() {
        let dir = tempdir().unwrap();
        let store = store_in(&dir);
        assert!(store.load_all().unwrap().is_empty());
    }

    #[test]
    fn garbled_file_degrades_to_empty_list() {
        let dir = tempdir().unwrap();
        let store = store_in(&dir);
        std::fs::write(store.path(), "{not json at all").unwrap();
        assert!(store.load_all().unwrap().is_empty());
    }

    #[test]
    fn upsert_by_name_overwrites_in_place() {
        let dir = tempdir().unwrap();
        let store = store_in(&dir);

        store.upsert(named("IPA", 67.0)).unwrap();
        store.upsert(named("Stout", 68.0)).unwrap();
        let updated = store.upsert(named("IPA", 65.0)).unwrap();

        assert_eq!(updated.len(), 2);
        assert_eq!(updated[0].name, "IPA");
        assert_eq!(updated[0].mash_temp, 65.0);
        assert_eq!(store.find("IPA").unwrap().mash_temp, 65.0);
    }

    #[test]
    fn name_matching_is_case_sensitive() {
        let dir = tempdir().unwrap();
        let store = store_in(&dir);
        store.upsert(named("IPA", 67.0)).unwrap();
        assert!(matches!(store.find("ipa"), Err(StoreError::NotFound(_))));
        let list = store.upsert(named("ipa", 66.0)).unwrap();
        assert_eq!(list.len(), 2);
    }

    #[test]
    fn delete_removes_exact_name() {
        let dir = tempdir().unwrap();
        let store = store_in(&dir);
        store.upsert(named("IPA", 67.0)).unwrap();
        let remaining = store.delete("IPA").unwrap();
        assert!(remaining.is_empty());
        assert!(matches!(store.delete("IPA"), Err(StoreError::NotFound(_))));
    }
}
