//! Math behind the cosmetic page effects.
//!
//! The web layer measures the page (scroll offsets, bounding rects, pointer
//! positions) and feeds the numbers in; nothing here touches the DOM. All
//! lengths are CSS pixels.

/// Extra offset below the sticky header when scrolling to an anchor.
pub const ANCHOR_GAP_PX: f64 = 10.0;
/// Look-ahead below the header when deciding the active nav section.
pub const ACTIVE_SECTION_LOOKAHEAD_PX: f64 = 40.0;
/// Snap assist only engages within this distance of a section top.
pub const SNAP_THRESHOLD_PX: f64 = 220.0;
/// Idle time after the last scroll event before snap assist runs.
pub const SNAP_DELAY_MS: u32 = 120;
/// Viewport width at which snap assist is enabled.
pub const SNAP_MIN_VIEWPORT_PX: f64 = 900.0;

pub const MAGNETIC_STRENGTH_PRIMARY: f64 = 10.0;
pub const MAGNETIC_STRENGTH_DEFAULT: f64 = 7.0;

/// Full tilt range in degrees across the card.
pub const TILT_RANGE_DEG: f64 = 10.0;

/// Per-frame interpolation factor of the cursor glow.
pub const GLOW_FOLLOW_FACTOR: f64 = 0.18;
pub const GLOW_SIZE_PX: f64 = 22.0;

/// Elements that fade in as they scroll into view.
pub const REVEAL_TARGETS: [&str; 8] = [
    ".hero-text",
    ".hero-card",
    ".cards .card",
    ".panel",
    ".resume-actions",
    ".resume-viewer",
    ".social-links a",
    ".section-head",
];
/// Visible fraction at which a reveal target is shown.
pub const REVEAL_THRESHOLD: f64 = 0.15;

#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    #[must_use]
    pub const fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }
}

/// A bounding client rect.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct Rect {
    pub left: f64,
    pub top: f64,
    pub width: f64,
    pub height: f64,
}

impl Rect {
    #[must_use]
    pub const fn new(left: f64, top: f64, width: f64, height: f64) -> Self {
        Self {
            left,
            top,
            width,
            height,
        }
    }

    #[must_use]
    pub fn center(&self) -> Point {
        Point::new(
            self.left + self.width / 2.0,
            self.top + self.height / 2.0,
        )
    }
}

/// Percentage of the document scrolled, in `[0, 100]`.
#[must_use]
pub fn scroll_progress(scroll_top: f64, scroll_height: f64, client_height: f64) -> f64 {
    let scrollable = scroll_height - client_height;
    if scrollable <= 0.0 || !scrollable.is_finite() {
        return 0.0;
    }
    (scroll_top / scrollable * 100.0).clamp(0.0, 100.0)
}

/// Index of the nav section the reader is in.
///
/// `section_tops` are document offsets in nav order. The last section whose
/// top is at or above the look-ahead line wins; the first section is active
/// until any other qualifies.
#[must_use]
pub fn active_section(scroll_y: f64, header_height: f64, section_tops: &[f64]) -> Option<usize> {
    if section_tops.is_empty() {
        return None;
    }
    let line = scroll_y + header_height + ACTIVE_SECTION_LOOKAHEAD_PX;
    let active = section_tops
        .iter()
        .rposition(|&top| line >= top)
        .unwrap_or(0);
    Some(active)
}

/// Scroll position that puts an element just below the sticky header.
///
/// `element_top` is the element's viewport-relative top.
#[must_use]
pub fn smooth_scroll_target(element_top: f64, scroll_y: f64, header_height: f64) -> f64 {
    element_top + scroll_y - header_height - ANCHOR_GAP_PX
}

/// Scroll position to snap to, if a section top is close enough.
#[must_use]
pub fn snap_target(scroll_y: f64, header_height: f64, section_tops: &[f64]) -> Option<f64> {
    let offset = header_height + ANCHOR_GAP_PX;
    let current = scroll_y + offset;
    let (nearest, distance) = section_tops
        .iter()
        .map(|&top| (top, (top - current).abs()))
        .min_by(|a, b| a.1.total_cmp(&b.1))?;
    (distance < SNAP_THRESHOLD_PX).then_some(nearest - offset)
}

/// Translation of a magnetic button towards the pointer.
///
/// Each axis is the pointer's offset from the centre as a fraction of the
/// half-extent, clamped to `[-1, 1]`, times `strength`.
#[must_use]
pub fn magnetic_offset(pointer: Point, rect: Rect, strength: f64) -> Point {
    let center = rect.center();
    let axis = |delta: f64, extent: f64| {
        let half = extent / 2.0;
        if half <= 0.0 {
            return 0.0;
        }
        (delta / half).clamp(-1.0, 1.0) * strength
    };
    Point::new(
        axis(pointer.x - center.x, rect.width),
        axis(pointer.y - center.y, rect.height),
    )
}

#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct Tilt {
    pub rotate_x_deg: f64,
    pub rotate_y_deg: f64,
}

impl Tilt {
    #[must_use]
    pub fn css_transform(&self) -> String {
        format!(
            "perspective(900px) rotateX({}deg) rotateY({}deg) translateY(-2px)",
            self.rotate_x_deg, self.rotate_y_deg
        )
    }
}

/// Parallax tilt of a card for a pointer over it.
#[must_use]
pub fn tilt(pointer: Point, rect: Rect) -> Tilt {
    if rect.width <= 0.0 || rect.height <= 0.0 {
        return Tilt::default();
    }
    let px = (pointer.x - rect.left) / rect.width;
    let py = (pointer.y - rect.top) / rect.height;
    Tilt {
        rotate_x_deg: (0.5 - py) * TILT_RANGE_DEG,
        rotate_y_deg: (px - 0.5) * TILT_RANGE_DEG,
    }
}

/// Glow that eases towards the pointer once per animation frame.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GlowFollower {
    position: Point,
    target: Point,
    visible: bool,
}

impl GlowFollower {
    /// Start centred in a viewport of the given size, hidden.
    #[must_use]
    pub fn centered(viewport_width: f64, viewport_height: f64) -> Self {
        let center = Point::new(viewport_width / 2.0, viewport_height / 2.0);
        Self {
            position: center,
            target: center,
            visible: false,
        }
    }

    pub fn pointer_moved(&mut self, to: Point) {
        self.target = to;
        self.visible = true;
    }

    pub fn pointer_left(&mut self) {
        self.visible = false;
    }

    /// Advance one frame and return the new position.
    pub fn tick(&mut self) -> Point {
        self.position.x += (self.target.x - self.position.x) * GLOW_FOLLOW_FACTOR;
        self.position.y += (self.target.y - self.position.y) * GLOW_FOLLOW_FACTOR;
        self.position
    }

    #[must_use]
    pub const fn position(&self) -> Point {
        self.position
    }

    #[must_use]
    pub const fn is_visible(&self) -> bool {
        self.visible
    }

    /// CSS transform placing the glow's centre on the current position.
    #[must_use]
    pub fn css_transform(&self) -> String {
        let half = GLOW_SIZE_PX / 2.0;
        format!(
            "translate3d({}px, {}px, 0)",
            self.position.x - half,
            self.position.y - half
        )
    }
}

/// Coalesces bursts of scroll events into a single animation frame.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct FrameThrottle {
    pending: bool,
}

impl FrameThrottle {
    /// Returns `true` if the caller should request an animation frame.
    pub fn request(&mut self) -> bool {
        if self.pending {
            return false;
        }
        self.pending = true;
        true
    }

    pub fn frame_done(&mut self) {
        self.pending = false;
    }
}
