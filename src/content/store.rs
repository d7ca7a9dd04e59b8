//! Post store - the query surface over the loaded collection

use std::sync::Arc;
use std::time::Duration;

use super::loader::ContentLoader;
use super::{AdjacentPosts, Post, PostKind};
use crate::cache::TimedCache;
use crate::error::ContentError;
use crate::Folio;

/// Memoized access to the post collection
#[derive(Debug)]
pub struct PostStore {
    loader: ContentLoader,
    cache: TimedCache<Vec<Post>>,
}

impl PostStore {
    /// Create a store that reuses a loaded collection for `window`
    pub fn new(loader: ContentLoader, window: Option<Duration>) -> Self {
        Self {
            loader,
            cache: TimedCache::new(window),
        }
    }

    /// Create a store from the site configuration
    pub fn for_site(folio: &Folio) -> Self {
        Self::new(
            ContentLoader::for_site(folio),
            folio.config.revalidate_window(),
        )
    }

    /// Every post, drafts included, newest first
    pub fn load_all(&self) -> Result<Arc<Vec<Post>>, ContentError> {
        self.cache.get_or_try_load(|| self.loader.load_all())
    }

    /// Posts that are not drafts, newest first
    pub fn list_published(&self) -> Result<Vec<Post>, ContentError> {
        Ok(self
            .load_all()?
            .iter()
            .filter(|p| p.is_published())
            .cloned()
            .collect())
    }

    /// Published posts of one kind, newest first
    pub fn list_by_kind(&self, kind: PostKind) -> Result<Vec<Post>, ContentError> {
        let mut posts = self.list_published()?;
        posts.retain(|p| p.kind == kind);
        Ok(posts)
    }

    /// Look up a published post. Drafts never match.
    pub fn find_by_slug(&self, slug: &str) -> Result<Option<Post>, ContentError> {
        Ok(self
            .load_all()?
            .iter()
            .find(|p| p.is_published() && p.slug == slug)
            .cloned())
    }

    /// Newer and older neighbours of `slug` among published posts
    pub fn find_adjacent(&self, slug: &str) -> Result<AdjacentPosts, ContentError> {
        let published = self.list_published()?;
        Ok(AdjacentPosts::locate(&published, slug))
    }

    /// Forget the cached collection
    pub fn invalidate(&self) {
        tracing::debug!("Post cache invalidated");
        self.cache.invalidate();
    }

    pub fn loader(&self) -> &ContentLoader {
        &self.loader
    }
}
