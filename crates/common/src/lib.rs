/**
 * Categories and validated category names.
 */
pub mod category;
/**
 * Rendering post bodies into the small HTML
 *  subset the public pages allow.
 */
pub mod content;
/**
 * Posts, drafts submitted by admins and the
 *  cover image descriptor.
 */
pub mod post;
/**
 * Helper for setting build version information
 *  at compile time.
 */
pub mod version;

pub mod prelude {
    pub use crate::category::{Category, CategoryName, CategoryNameError, CategoryRef};
    pub use crate::content::{escape_html, sanitize_content};
    pub use crate::post::{CoverImage, Post, PostDraft, PostDraftError};
    pub use crate::version::{build_info, BuildInfo};
}
