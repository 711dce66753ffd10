//! Image dimension interface for layout.
//!
//! [§ 4.8.3 The img element](https://html.spec.whatwg.org/multipage/embedded-content.html#the-img-element)
//!
//! Fetching and decoding are external concerns. Layout only asks the cache
//! whether a source's intrinsic size is known yet; if not, it triggers a
//! fire-and-forget load and proceeds with a placeholder size. The updated
//! dimensions are picked up on a later, externally-triggered layout pass.
//! The engine never re-enters itself.

use crate::geometry::Size;

/// Placeholder size used while an image's intrinsic size is unknown.
pub const IMAGE_PLACEHOLDER_SIZE: Size = Size { w: 50.0, h: 50.0 };

/// Image dimension provider.
pub trait ImageCache {
    /// Whether the intrinsic size of `src` is already known.
    fn is_loaded(&self, src: &str) -> bool;

    /// The intrinsic size of `src`, once loaded.
    fn size(&self, src: &str) -> Option<Size>;

    /// Begin loading `src` out of band. Idempotent; calling it again for a
    /// source already loading or loaded is a no-op.
    fn load(&self, src: &str);
}

/// A cache that never has any images. Useful for text-only embedders and
/// tests.
pub struct NoImages;

impl ImageCache for NoImages {
    fn is_loaded(&self, _src: &str) -> bool {
        false
    }

    fn size(&self, _src: &str) -> Option<Size> {
        None
    }

    fn load(&self, _src: &str) {}
}
