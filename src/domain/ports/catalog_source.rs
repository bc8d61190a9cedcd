use crate::domain::entities::competitor_catalog::CompetitorProfile;
use crate::domain::entities::menu_entry::MenuEntry;
use crate::domain::error::DomainError;

/// Read access to menus, ours and competitors'.
///
/// An owner with no entries yields an empty list, never an error.
pub trait CatalogSource: Send + Sync {
    fn get_entries(&self, owner_id: &str) -> Result<Vec<MenuEntry>, DomainError>;
    /// Entry ids are only unique within one owner's menu.
    fn get_entry(&self, owner_id: &str, entry_id: &str) -> Result<Option<MenuEntry>, DomainError>;
    fn list_competitors(&self, business_id: &str) -> Result<Vec<CompetitorProfile>, DomainError>;
    /// Monotonic counter bumped whenever the owner's menu is replaced.
    fn catalog_version(&self, owner_id: &str) -> Result<u64, DomainError>;
}

/// Write access used when importing menus.
pub trait CatalogStore: Send + Sync {
    /// Replace the owner's whole menu.
    fn replace_entries(&self, owner_id: &str, entries: &[MenuEntry]) -> Result<(), DomainError>;
    fn upsert_competitor(&self, business_id: &str, profile: &CompetitorProfile) -> Result<(), DomainError>;
}
