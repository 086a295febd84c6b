use crate::shared::draw::{draw_image, DrawOptions};
use crate::shared::geometry::Rect;
use crate::shared::surface::Surface;

use super::censorship_compositor::RegionCensorshipCompositor;

/// Which output layers the presentation host should show.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct LayerVisibility {
    /// Only frames with blur-out occurrences show the full censored frame.
    pub base_visible: bool,
    /// Hidden until the first full composite completes.
    pub display_visible: bool,
}

impl LayerVisibility {
    pub fn for_frame(compositor: &RegionCensorshipCompositor, has_blur_out: bool) -> Self {
        Self {
            base_visible: has_blur_out && compositor.is_ready(),
            display_visible: compositor.is_ready(),
        }
    }
}

/// Stacks the source frame, then the visible output layers, into the
/// frame a viewer would see.
pub fn flatten(
    source: &Surface,
    compositor: &RegionCensorshipCompositor,
    visibility: LayerVisibility,
) -> Surface {
    let mut presented = source.clone();
    let full = Rect::covering(source.width(), source.height());
    let options = DrawOptions {
        smoothing: false,
        ..DrawOptions::default()
    };

    if visibility.base_visible {
        draw_image(&mut presented, compositor.base_layer(), full, full, &options);
    }
    if visibility.display_visible {
        draw_image(&mut presented, compositor.display(), full, full, &options);
    }
    presented
}
