//! Stateful chart: owns the inputs, caches the layout and drives the tooltip.

use crate::charts::{ChartInput, ChartKind, ChartLayout, ChartOptions};
use crate::data::{Dataset, XAxisOptions, YAxisOptions};
use crate::resize::ResizeDebouncer;
use crate::tooltip::{TooltipContent, TooltipController, TooltipPosition, TooltipState};
use chartkit_core::{stagger_delay, ChartTheme, Event, Size, Transition};

/// One mounted chart.
///
/// Layout is recomputed lazily: setters only mark the cached layout dirty.
/// Resize requests go through a [`ResizeDebouncer`] and are applied by
/// [`ChartInstance::tick`].
#[derive(Debug, Clone)]
pub struct ChartInstance {
    kind: ChartKind,
    dataset: Dataset,
    theme: ChartTheme,
    x_axis: XAxisOptions,
    y_axis: YAxisOptions,
    options: ChartOptions,
    size: Size,
    animate: bool,
    active_series: Option<usize>,
    tooltip: TooltipController,
    resize: ResizeDebouncer,
    layout: ChartLayout,
    dirty: bool,
}

impl ChartInstance {
    #[must_use]
    pub fn new(kind: ChartKind, dataset: Dataset, size: Size) -> Self {
        Self {
            kind,
            dataset,
            theme: ChartTheme::default(),
            x_axis: XAxisOptions::default(),
            y_axis: YAxisOptions::default(),
            options: ChartOptions::default(),
            size,
            animate: true,
            active_series: None,
            tooltip: TooltipController::default(),
            resize: ResizeDebouncer::new(),
            layout: ChartLayout::default(),
            dirty: true,
        }
    }

    #[must_use]
    pub fn with_theme(mut self, theme: ChartTheme) -> Self {
        self.set_theme(theme);
        self
    }

    #[must_use]
    pub fn with_x_axis(mut self, x_axis: XAxisOptions) -> Self {
        self.x_axis = x_axis;
        self.dirty = true;
        self
    }

    #[must_use]
    pub fn with_y_axis(mut self, y_axis: YAxisOptions) -> Self {
        self.y_axis = y_axis;
        self.dirty = true;
        self
    }

    #[must_use]
    pub fn with_options(mut self, options: ChartOptions) -> Self {
        self.options = options;
        self.dirty = true;
        self
    }

    #[must_use]
    pub const fn with_animation(mut self, animate: bool) -> Self {
        self.animate = animate;
        self
    }

    /// Resize debounce delay in milliseconds.
    #[must_use]
    pub fn with_resize_debounce(mut self, ms: u32) -> Self {
        self.resize = self.resize.with_debounce(ms);
        self
    }

    #[must_use]
    pub const fn kind(&self) -> ChartKind {
        self.kind
    }

    #[must_use]
    pub const fn dataset(&self) -> &Dataset {
        &self.dataset
    }

    #[must_use]
    pub const fn theme(&self) -> &ChartTheme {
        &self.theme
    }

    #[must_use]
    pub const fn size(&self) -> Size {
        self.size
    }

    #[must_use]
    pub const fn is_dirty(&self) -> bool {
        self.dirty
    }

    pub fn set_dataset(&mut self, dataset: Dataset) {
        self.dataset = dataset;
        self.dirty = true;
    }

    pub fn set_theme(&mut self, theme: ChartTheme) {
        self.theme = theme;
        self.dirty = true;
    }

    /// Apply a size immediately, bypassing the debouncer.
    pub fn set_size(&mut self, size: Size) {
        if size != self.size {
            self.size = size;
            self.dirty = true;
        }
    }

    /// Queue a size; applied by [`ChartInstance::tick`] after the debounce
    /// delay. The last request wins.
    pub fn request_resize(&mut self, size: Size, now_ms: u64) {
        if !self.tooltip.is_detached() {
            self.resize.request(size, now_ms);
        }
    }

    /// Advance the clock. Returns whether a pending resize was applied.
    pub fn tick(&mut self, now_ms: u64) -> bool {
        match self.resize.poll(now_ms) {
            Some(size) => {
                self.set_size(size);
                true
            }
            None => false,
        }
    }

    /// Current layout, recomputed if any input changed.
    pub fn layout(&mut self) -> &ChartLayout {
        if self.dirty {
            self.refresh();
        }
        &self.layout
    }

    fn refresh(&mut self) {
        let before = self.tooltip.active_index();
        self.layout = self.compute();
        self.tooltip.set_count(self.layout.index_count);
        if self.tooltip.active_index() != before {
            self.layout = self.compute();
        }
        self.dirty = false;
    }

    fn compute(&self) -> ChartLayout {
        let (active, active_series) = self.highlighted();
        self.kind.layout(&ChartInput {
            dataset: &self.dataset,
            size: self.size,
            theme: &self.theme,
            x_axis: &self.x_axis,
            y_axis: &self.y_axis,
            options: &self.options,
            active,
            active_series,
        })
    }

    /// Active index and selected series for the layout pass. Donut and
    /// normalized charts index by series, so the selection takes the active
    /// slot there and wins over the tooltip's index.
    fn highlighted(&self) -> (Option<usize>, Option<usize>) {
        let tooltip = self.tooltip.active_index();
        if self.kind.indexes_series() {
            (self.active_series.or(tooltip), None)
        } else {
            (tooltip, self.active_series)
        }
    }

    /// Route an input event. Returns whether the tooltip state changed.
    pub fn handle_event(&mut self, event: &Event, now_ms: u64) -> bool {
        if self.tooltip.is_detached() {
            return false;
        }
        match event {
            Event::Resize { size } => {
                self.request_resize(*size, now_ms);
                false
            }
            Event::Unmount => {
                self.resize.cancel();
                self.tooltip.handle(event, None)
            }
            _ => {
                let resolver = self.layout().pointer;
                let changed = self.tooltip.handle(event, resolver.as_ref());
                if changed {
                    self.dirty = true;
                }
                changed
            }
        }
    }

    #[must_use]
    pub const fn tooltip_state(&self) -> TooltipState {
        self.tooltip.state()
    }

    #[must_use]
    pub const fn active_index(&self) -> Option<usize> {
        self.tooltip.active_index()
    }

    #[must_use]
    pub const fn active_series(&self) -> Option<usize> {
        self.active_series
    }

    /// Highlight a series (donut and normalized charts), e.g. from a legend.
    pub fn set_active_series(&mut self, series: Option<usize>) {
        let series = series.filter(|s| *s < self.dataset.len());
        if series != self.active_series {
            self.active_series = series;
            self.dirty = true;
        }
    }

    #[must_use]
    pub const fn is_detached(&self) -> bool {
        self.tooltip.is_detached()
    }

    /// Where the tooltip for the active index goes, if one is shown.
    pub fn tooltip_position(&mut self) -> Option<TooltipPosition> {
        let index = self.tooltip.active_index()?;
        let pointer = self.tooltip.pointer();
        self.layout().tooltip_position(index, pointer)
    }

    /// Build the tooltip payload for `index` and hand it to `render`.
    pub fn render_tooltip<R>(&self, index: usize, render: impl FnOnce(&TooltipContent) -> R) -> Option<R> {
        TooltipContent::build(&self.dataset, index, &self.theme, &self.x_axis, &self.y_axis)
            .map(|content| render(&content))
    }

    /// Payload for the active index.
    #[must_use]
    pub fn active_tooltip(&self) -> Option<TooltipContent> {
        let index = self.tooltip.active_index()?;
        self.render_tooltip(index, Clone::clone)
    }

    /// Staggered grow-in transition (0 to 1) for element `index`; `None`
    /// when animation is off.
    pub fn entrance(&mut self, index: usize) -> Option<Transition<f32>> {
        if !self.animate {
            return None;
        }
        let count = self.layout().index_count.max(self.dataset.category_count());
        Some(Transition::new(0.0, 1.0).with_delay(stagger_delay(index, count)))
    }
}
