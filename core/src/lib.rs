pub mod identity;
pub mod locale;
pub mod matcher;
pub mod sort;
pub mod specifier;

// Re-export commonly used items at crate root
pub use identity::{Identity, RequirementKind};
pub use locale::Collator;
pub use matcher::matches_package;
pub use sort::{sort_key, sort_lines, SortMode};
pub use specifier::{normalize_specifier, SpecifierError};
