//! Preview and smooth scrolling module for markup-editor
//!
//! This module provides the preview surface abstraction and the animator that
//! scrolls the preview to keep the cursor marker in view.

mod smooth_scroll;
mod surface;

pub use smooth_scroll::{
    AnimationHandle, ScrollAnimation, ScrollAnimator, ScrollConfig, ScrollContainer, TickOutcome,
};
pub use surface::{HeadlessPreview, PreviewSurface};
