//! The bar: widget registry plus the per-frame compositing pass.
//!
//! # Frame Pipeline
//!
//! ```text
//! push root ─▶ clear ─▶ for group in [left, right, center]:
//!                         running scratch (L→R, no padding)
//!                         for each enabled widget:
//!                           widget scratch ◀─ fill bg, draw, header line
//!                           running ◀─ composite, advance (spacing between)
//!                         group context on root ◀─ composite running
//!              ─▶ pop root ─▶ flush to display
//! ```
//!
//! Widgets always lay out left to right inside their scratch. The group's
//! direction only decides where the finished group lands on the bar, and that
//! is computed from the group's *measured* width after every widget has drawn,
//! so a clock whose text changes width stays centered.
//!
//! # Ownership
//!
//! The root surface is the only state kept across frames. Each frame borrows
//! it through a [`RootFrame`](crate::layout::RootFrame) guard; scratch surfaces
//! live only as long as the group or widget they hold.

use embedded_graphics::mono_font::MonoFont;
use embedded_graphics::pixelcolor::Rgb565;
use embedded_graphics::prelude::*;
use tracing::trace;

use crate::colors::{BAR_BG, WIDGET_BG};
use crate::config::{DEFAULT_PADDING, DEFAULT_WIDGET_SPACING, HEADER_LINE_WIDTH, MAX_WIDGETS};
use crate::layout::{Direction, LayoutContext, RootContext};
use crate::registry::WidgetRegistry;
use crate::styles::DEFAULT_FONT;
use crate::surface::Surface;

// =============================================================================
// Style
// =============================================================================

/// Everything the compositor needs to know about how the bar looks.
#[derive(Clone, Copy, Debug)]
pub struct BarStyle {
    /// Bar background, visible between and around groups.
    pub background: Rgb565,
    /// Painted under each widget before it draws.
    pub widget_background: Rgb565,
    /// Inset from the bar edges, and inside each widget on all sides.
    pub padding: u32,
    /// Gap between two visible widgets of a group.
    pub spacing: u32,
    /// Thickness of each widget's header line.
    pub header_line_width: u32,
    pub font: &'static MonoFont<'static>,
}

impl Default for BarStyle {
    fn default() -> Self {
        Self {
            background: BAR_BG,
            widget_background: WIDGET_BG,
            padding: DEFAULT_PADDING,
            spacing: DEFAULT_WIDGET_SPACING,
            header_line_width: HEADER_LINE_WIDTH,
            font: DEFAULT_FONT,
        }
    }
}

// =============================================================================
// Frame Layout
// =============================================================================

/// Where one visible widget ended up within its group.
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub struct WidgetPlacement {
    /// Position in the group's registration list.
    pub index: usize,
    /// Left edge relative to the group's anchor.
    pub x: i32,
    /// Rendered width, padding included.
    pub width: u32,
}

/// What one group drew this frame.
#[derive(Clone, PartialEq, Eq, Debug)]
pub struct GroupLayout {
    pub direction: Direction,
    /// Left edge of the group on the bar.
    pub anchor_x: i32,
    /// Measured width of the whole group.
    pub width: u32,
    /// Visible widgets, in draw order.
    pub widgets: Vec<WidgetPlacement>,
}

impl GroupLayout {
    fn empty(direction: Direction) -> Self {
        Self {
            direction,
            anchor_x: 0,
            width: 0,
            widgets: Vec::new(),
        }
    }

    /// Bar x of a visible widget's left edge, by list index.
    pub fn widget_x(
        &self,
        index: usize,
    ) -> Option<i32> {
        self.widgets.iter().find(|p| p.index == index).map(|p| self.anchor_x + p.x)
    }
}

/// Result of one [`Bar::render`].
#[derive(Clone, PartialEq, Eq, Debug)]
pub struct FrameLayout {
    /// Frame sequence number, starting at 0.
    pub frame: u64,
    /// One entry per group, in [`Direction::ALL`] order.
    pub groups: [GroupLayout; 3],
}

impl FrameLayout {
    pub fn group(
        &self,
        direction: Direction,
    ) -> &GroupLayout {
        match direction {
            Direction::LeftToRight => &self.groups[0],
            Direction::RightToLeft => &self.groups[1],
            Direction::Centered => &self.groups[2],
        }
    }

    /// Visible widgets across all groups.
    pub fn visible(&self) -> usize { self.groups.iter().map(|g| g.widgets.len()).sum() }
}

// =============================================================================
// Bar
// =============================================================================

/// A status bar: a persistent root surface and the widgets drawn onto it.
pub struct Bar<S, const N: usize = MAX_WIDGETS> {
    root: RootContext,
    registry: WidgetRegistry<S, N>,
    style: BarStyle,
}

impl<S, const N: usize> Bar<S, N> {
    pub fn new(
        size: Size,
        style: BarStyle,
        registry: WidgetRegistry<S, N>,
    ) -> Self {
        tracing::debug!(
            width = size.width,
            height = size.height,
            widgets = registry.len(),
            "bar created"
        );
        Self {
            root: RootContext::new(size),
            registry,
            style,
        }
    }

    #[inline]
    pub const fn style(&self) -> &BarStyle { &self.style }

    #[inline]
    pub fn registry(&self) -> &WidgetRegistry<S, N> { &self.registry }

    #[inline]
    pub fn registry_mut(&mut self) -> &mut WidgetRegistry<S, N> { &mut self.registry }

    /// Pixels of the last rendered frame.
    #[inline]
    pub fn surface(&self) -> &Surface { self.root.surface() }

    #[inline]
    pub fn size(&self) -> Size { self.root.surface().size() }

    /// Frames rendered so far.
    #[inline]
    pub const fn frames(&self) -> u64 { self.root.frames() }

    /// Rebuild the whole bar from `state`.
    pub fn render(
        &mut self,
        state: &S,
    ) -> FrameLayout {
        let style = self.style;
        let size = self.root.surface().size();
        let mut frame = self.root.push();
        frame.clear(style.background);

        let mut groups = Direction::ALL.map(GroupLayout::empty);

        for (slot, direction) in Direction::ALL.into_iter().enumerate() {
            let mut running = LayoutContext::scratch(Direction::LeftToRight, 0, size, style.font);
            let mut placements = Vec::new();

            for (index, widget) in self.registry.group_mut(direction).iter_mut().enumerate() {
                if !widget.is_enabled(state) {
                    trace!(widget = widget.name(), %direction, "widget disabled");
                    continue;
                }
                if !placements.is_empty() {
                    running.advance(style.spacing, 0);
                }

                let mut scratch = LayoutContext::scratch(Direction::LeftToRight, style.padding, size, style.font);
                scratch.fill(style.widget_background);
                widget.draw(&mut scratch, state);
                let extent = scratch.extent();
                scratch.hline(widget.header_color(), style.header_line_width, 0, extent);

                let x = running.composite(&scratch);
                running.advance(extent, 0);
                trace!(widget = widget.name(), %direction, x, width = extent, "widget composited");
                placements.push(WidgetPlacement { index, x, width: extent });
            }

            let width = running.extent();
            let mut group_ctx = frame.context(direction, style.padding, style.font);
            let anchor_x = group_ctx.composite(&running);

            groups[slot] = GroupLayout {
                direction,
                anchor_x,
                width,
                widgets: placements,
            };
        }

        let number = frame.pop();
        FrameLayout { frame: number, groups }
    }

    /// Copy the last rendered frame onto `target` with its top-left at `origin`.
    pub fn flush<D>(
        &self,
        target: &mut D,
        origin: Point,
    ) -> Result<(), D::Error>
    where
        D: DrawTarget<Color = Rgb565>,
    {
        self.root.surface().flush(target, origin)
    }

    /// Render a frame and flush it in one step.
    pub fn draw_frame<D>(
        &mut self,
        state: &S,
        target: &mut D,
        origin: Point,
    ) -> Result<FrameLayout, D::Error>
    where
        D: DrawTarget<Color = Rgb565>,
    {
        let layout = self.render(state);
        self.flush(target, origin)?;
        Ok(layout)
    }
}

// =============================================================================
// Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use std::cell::RefCell;
    use std::rc::Rc;

    use embedded_graphics::mono_font::ascii::FONT_6X10;

    use super::*;
    use crate::colors::{BLACK, BLUE, CHART_GRAY, CYAN, GREEN, MAGENTA, RED, YELLOW};
    use crate::error::ConfigError;
    use crate::histogram::HistogramBuffer;
    use crate::widget::Widget;

    const BAR_WIDTH: u32 = 100;
    const BAR_HEIGHT: u32 = 10;
    const PAD: u32 = 2;
    const SPACING: u32 = 3;

    type Log = Rc<RefCell<Vec<&'static str>>>;

    /// Frame input for the test widgets: names of widgets to hide.
    #[derive(Default)]
    struct Hidden(Vec<&'static str>);

    /// Paints a solid block `width` wide and records that it drew.
    struct Block {
        name: &'static str,
        width: u32,
        color: Rgb565,
        header: Rgb565,
        log: Log,
    }

    impl Widget<Hidden> for Block {
        fn name(&self) -> &str { self.name }

        fn is_enabled(
            &self,
            state: &Hidden,
        ) -> bool {
            !state.0.contains(&self.name)
        }

        fn header_color(&self) -> Rgb565 { self.header }

        fn draw(
            &mut self,
            ctx: &mut LayoutContext<'_>,
            _state: &Hidden,
        ) {
            assert!(!ctx.is_root(), "widgets draw into scratch");
            assert_eq!(ctx.direction(), Direction::LeftToRight);
            ctx.vertical_stack(self.width, &[self.color], &[100.0]);
            self.log.borrow_mut().push(self.name);
        }
    }

    fn style() -> BarStyle {
        BarStyle {
            background: BLACK,
            widget_background: CHART_GRAY,
            padding: PAD,
            spacing: SPACING,
            header_line_width: 1,
            font: &FONT_6X10,
        }
    }

    fn block(
        log: &Log,
        name: &'static str,
        width: u32,
        color: Rgb565,
        header: Rgb565,
    ) -> Box<dyn Widget<Hidden>> {
        Box::new(Block { name, width, color, header, log: Rc::clone(log) })
    }

    fn bar<const N: usize>(registry: WidgetRegistry<Hidden, N>) -> Bar<Hidden, N> {
        Bar::new(Size::new(BAR_WIDTH, BAR_HEIGHT), style(), registry)
    }

    fn px<const N: usize>(
        bar: &Bar<Hidden, N>,
        x: i32,
        y: i32,
    ) -> Option<Rgb565> {
        bar.surface().pixel(Point::new(x, y))
    }

    // -------------------------------------------------------------------------
    // Disabled Widgets and Spacing
    // -------------------------------------------------------------------------

    #[test]
    fn test_disabled_widget_is_absent() {
        let log = Log::default();
        let mut registry = WidgetRegistry::<Hidden, 3>::new();
        registry.register(Direction::LeftToRight, block(&log, "a", 4, RED, YELLOW)).unwrap();
        registry.register(Direction::LeftToRight, block(&log, "b", 5, GREEN, MAGENTA)).unwrap();
        registry.register(Direction::LeftToRight, block(&log, "c", 6, BLUE, CYAN)).unwrap();
        let mut bar = bar(registry);

        let layout = bar.render(&Hidden(vec!["b"]));

        assert_eq!(*log.borrow(), ["a", "c"], "disabled widgets are never drawn");

        let left = layout.group(Direction::LeftToRight);
        // a: extent 4 + 2 * PAD = 8; c follows after one spacing gap.
        assert_eq!(
            left.widgets,
            vec![
                WidgetPlacement { index: 0, x: 0, width: 8 },
                WidgetPlacement { index: 2, x: 11, width: 10 },
            ]
        );
        assert_eq!(left.width, 21, "no spacing after the last visible widget");
        assert_eq!(left.anchor_x, PAD as i32);

        // Header lines over each widget, bar background in the gap and after.
        assert_eq!(px(&bar, 2, 0), Some(YELLOW));
        assert_eq!(px(&bar, 9, 0), Some(YELLOW));
        assert_eq!(px(&bar, 10, 0), Some(BLACK));
        assert_eq!(px(&bar, 12, 0), Some(BLACK));
        assert_eq!(px(&bar, 13, 0), Some(CYAN));
        assert_eq!(px(&bar, 22, 0), Some(CYAN));
        assert_eq!(px(&bar, 23, 0), Some(BLACK));
        assert!(
            (0..BAR_WIDTH as i32).all(|x| px(&bar, x, 0) != Some(MAGENTA)),
            "disabled widget must not leave a header line"
        );

        // Content sits inside the widget padding, on the widget background.
        assert_eq!(px(&bar, 3, 5), Some(CHART_GRAY));
        assert_eq!(px(&bar, 4, 5), Some(RED));
        assert_eq!(px(&bar, 7, 5), Some(RED));
        assert_eq!(px(&bar, 8, 5), Some(CHART_GRAY));
        assert_eq!(px(&bar, 15, 5), Some(BLUE));
    }

    #[test]
    fn test_all_disabled_group_draws_nothing() {
        let log = Log::default();
        let mut registry = WidgetRegistry::<Hidden, 2>::new();
        registry.register(Direction::Centered, block(&log, "a", 4, RED, YELLOW)).unwrap();
        let mut bar = bar(registry);

        let layout = bar.render(&Hidden(vec!["a"]));

        assert_eq!(layout.visible(), 0);
        assert_eq!(layout.group(Direction::Centered).width, 0);
        assert!(bar.surface().painted() as u32 == BAR_WIDTH * BAR_HEIGHT);
        assert!((0..BAR_WIDTH as i32).all(|x| px(&bar, x, 4) == Some(BLACK)));
    }

    #[test]
    fn test_visibility_is_decided_per_frame() {
        let log = Log::default();
        let mut registry = WidgetRegistry::<Hidden, 2>::new();
        registry.register(Direction::LeftToRight, block(&log, "a", 4, RED, YELLOW)).unwrap();
        registry.register(Direction::LeftToRight, block(&log, "b", 4, GREEN, MAGENTA)).unwrap();
        let mut bar = bar(registry);

        let first = bar.render(&Hidden::default());
        assert_eq!(first.group(Direction::LeftToRight).widget_x(1), Some(13));

        let second = bar.render(&Hidden(vec!["a"]));
        assert_eq!(second.group(Direction::LeftToRight).widget_x(1), Some(2), "b moves into a's place");
        assert_eq!(px(&bar, 15, 0), Some(BLACK), "previous frame is cleared");
        assert_eq!((first.frame, second.frame), (0, 1));
        assert_eq!(bar.frames(), 2);
    }

    // -------------------------------------------------------------------------
    // Group Anchoring
    // -------------------------------------------------------------------------

    #[test]
    fn test_right_group_anchors_to_right_edge() {
        let log = Log::default();
        let mut registry = WidgetRegistry::<Hidden, 2>::new();
        registry.register(Direction::RightToLeft, block(&log, "net", 6, BLUE, CYAN)).unwrap();
        let mut bar = bar(registry);

        let layout = bar.render(&Hidden::default());
        let right = layout.group(Direction::RightToLeft);

        assert_eq!(right.width, 10);
        assert_eq!(right.anchor_x, (BAR_WIDTH - PAD - 10) as i32);
        assert_eq!(px(&bar, 88, 0), Some(CYAN));
        assert_eq!(px(&bar, 97, 0), Some(CYAN));
        assert_eq!(px(&bar, 98, 0), Some(BLACK), "right padding stays bar background");
    }

    #[test]
    fn test_right_group_keeps_registration_order() {
        let log = Log::default();
        let mut registry = WidgetRegistry::<Hidden, 2>::new();
        registry.register(Direction::RightToLeft, block(&log, "first", 2, RED, YELLOW)).unwrap();
        registry.register(Direction::RightToLeft, block(&log, "second", 2, GREEN, MAGENTA)).unwrap();
        let mut bar = bar(registry);

        let layout = bar.render(&Hidden::default());
        let right = layout.group(Direction::RightToLeft);

        assert_eq!(*log.borrow(), ["first", "second"]);
        let first_x = right.widget_x(0).unwrap();
        let second_x = right.widget_x(1).unwrap();
        assert!(first_x < second_x, "right group reads left to right in registration order");
        assert_eq!(right.anchor_x + right.width as i32, (BAR_WIDTH - PAD) as i32);
    }

    #[test]
    fn test_centered_group_uses_measured_width() {
        let log = Log::default();
        let mut registry = WidgetRegistry::<Hidden, 2>::new();
        registry.register(Direction::Centered, block(&log, "clock", 5, GREEN, GREEN)).unwrap();
        let mut bar = bar(registry);

        let layout = bar.render(&Hidden::default());
        let center = layout.group(Direction::Centered);

        // Measured width 5 + 2 * PAD = 9, floor((100 - 9) / 2) = 45.
        assert_eq!(center.width, 9);
        assert_eq!(center.anchor_x, 45);
        assert_eq!(px(&bar, 44, 0), Some(BLACK));
        assert_eq!(px(&bar, 45, 0), Some(GREEN));
        assert_eq!(px(&bar, 53, 0), Some(GREEN));
        assert_eq!(px(&bar, 54, 0), Some(BLACK));
    }

    #[test]
    fn test_groups_processed_in_fixed_order() {
        let log = Log::default();
        let mut registry = WidgetRegistry::<Hidden, 2>::new();
        registry.register(Direction::Centered, block(&log, "center", 2, RED, RED)).unwrap();
        registry.register(Direction::RightToLeft, block(&log, "right", 2, RED, RED)).unwrap();
        registry.register(Direction::LeftToRight, block(&log, "left", 2, RED, RED)).unwrap();
        let mut bar = bar(registry);

        bar.render(&Hidden::default());

        assert_eq!(*log.borrow(), ["left", "right", "center"]);
    }

    // -------------------------------------------------------------------------
    // Capacity
    // -------------------------------------------------------------------------

    #[test]
    fn test_overfull_group_fails_before_any_draw() {
        let log = Log::default();
        let mut registry = WidgetRegistry::<Hidden, 2>::new();
        let result = ["a", "b", "c"]
            .into_iter()
            .try_for_each(|name| registry.register(Direction::LeftToRight, block(&log, name, 2, RED, RED)));

        assert!(matches!(result, Err(ConfigError::TooManyWidgets { capacity: 2, .. })));
        assert!(log.borrow().is_empty());
    }

    // -------------------------------------------------------------------------
    // Widget-Owned History
    // -------------------------------------------------------------------------

    /// Owns a histogram and feeds it one sample per draw.
    struct Spark {
        hist: HistogramBuffer,
        tick: f32,
    }

    impl Widget for Spark {
        fn name(&self) -> &str { "spark" }

        fn header_color(&self) -> Rgb565 { RED }

        fn draw(
            &mut self,
            ctx: &mut LayoutContext<'_>,
            _state: &(),
        ) {
            self.tick += 25.0;
            self.hist.update(&[self.tick, 100.0 - self.tick]);
            ctx.histogram(&self.hist, &[GREEN, BLUE]);
        }
    }

    #[test]
    fn test_histogram_widget_keeps_history_across_frames() {
        let mut registry = WidgetRegistry::<(), 1>::new();
        registry
            .register(Direction::LeftToRight, Box::new(Spark { hist: HistogramBuffer::new(8, 2), tick: 0.0 }))
            .unwrap();
        let mut bar = Bar::new(Size::new(BAR_WIDTH, BAR_HEIGHT), style(), registry);

        let mut layout = bar.render(&());
        for _ in 0..2 {
            layout = bar.render(&());
        }

        let left = layout.group(Direction::LeftToRight);
        assert_eq!(left.width, 8 + 2 * PAD, "chart is always capacity columns wide");

        // Columns are drawn oldest first: the last three are the three samples.
        let chart_x = left.anchor_x + PAD as i32;
        assert_eq!(bar.surface().pixel(Point::new(chart_x, PAD as i32)), Some(CHART_GRAY));
        assert_eq!(bar.surface().pixel(Point::new(chart_x + 7, PAD as i32)), Some(GREEN));
        assert_eq!(bar.surface().pixel(Point::new(chart_x + 5, PAD as i32 + 5)), Some(BLUE));
    }

    // -------------------------------------------------------------------------
    // Flushing
    // -------------------------------------------------------------------------

    #[test]
    fn test_draw_frame_flushes_at_origin() {
        let log = Log::default();
        let mut registry = WidgetRegistry::<Hidden, 1>::new();
        registry.register(Direction::LeftToRight, block(&log, "a", 4, RED, YELLOW)).unwrap();
        let mut bar = bar(registry);

        let mut display = Surface::new(Size::new(BAR_WIDTH, 50));
        let layout = bar.draw_frame(&Hidden::default(), &mut display, Point::new(0, 40)).unwrap();

        assert_eq!(layout.frame, 0);
        assert_eq!(display.pixel(Point::new(0, 39)), None);
        assert_eq!(display.pixel(Point::new(0, 40)), Some(BLACK));
        assert_eq!(display.pixel(Point::new(2, 40)), Some(YELLOW));
        assert_eq!(display.pixel(Point::new(4, 45)), Some(RED));
    }
}
