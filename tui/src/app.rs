//! Application State and Event Loop
//!
//! The [`App`] owns everything: the palette store, the rendered
//! gradient, the sampled colors, and the in-flight randomize animation.
//! The event loop multiplexes terminal input against a frame tick with
//! `tokio::select!`, advances animation and persistence state once per
//! frame, and redraws.

use std::cell::Cell;
use std::io;
use std::path::PathBuf;
use std::rc::Rc;
use std::time::{Duration, Instant};

use cospal_core::{
    AppConfig, ColorFormat, Debouncer, GradientRaster, Palette, PaletteStore, RandomizeTransition,
    SampleList,
};
use crossterm::event::{
    self, Event, EventStream, KeyCode, KeyEventKind, KeyModifiers, MouseButton, MouseEventKind,
};
use futures::StreamExt;
use rand::rngs::StdRng;
use rand::SeedableRng;
use ratatui::backend::CrosstermBackend;
use ratatui::layout::Rect;
use ratatui::Terminal;

use crate::clipboard;
use crate::view;

/// How long a transient notice stays on screen
const NOTICE_DURATION: Duration = Duration::from_millis(2500);

/// Coarse step for `-`/`=` parameter edits
const STEP_COARSE: f64 = 0.05;

/// Fine step for `_`/`+` parameter edits
const STEP_FINE: f64 = 0.005;

/// Editable range per parameter row (offset, amplitude, frequency, shift).
///
/// Wider than the randomize ranges: the user may push offset and
/// amplitude past what randomize would pick, while frequency stays
/// non-negative and shift stays inside its period.
const EDIT_RANGES: [(f64, f64); 4] = [(-2.0, 2.0), (-2.0, 2.0), (0.0, 4.0), (0.0, 1.0)];

/// Frame period for a target frame rate, never zero.
///
/// Config validation bounds the rate, but the division here must not
/// truncate to a zero-length sleep even for out-of-band values.
fn frame_period(frame_rate: u32) -> Duration {
    Duration::from_secs_f64(1.0 / f64::from(frame_rate.max(1)))
}

/// A transient status-bar message with its creation time
struct Notice {
    text: String,
    since: Instant,
}

/// Top-level application state
pub struct App {
    config: AppConfig,
    store: PaletteStore,
    /// Set by the render subscriber whenever the palette changes
    raster_dirty: Rc<Cell<bool>>,
    /// Set by the persist subscriber whenever the palette changes
    persist_pending: Rc<Cell<bool>>,
    pub(crate) raster: GradientRaster,
    pub(crate) samples: SampleList,
    transition: Option<RandomizeTransition>,
    debouncer: Debouncer,
    state_path: Option<PathBuf>,
    /// Selected parameter table cell: (row in a/b/c/d, channel in r/g/b)
    pub(crate) selection: (usize, usize),
    pub(crate) selected_sample: Option<usize>,
    pub(crate) color_format: ColorFormat,
    notice: Option<Notice>,
    /// Gradient strip area from the last draw, for mouse hit testing
    pub(crate) gradient_area: Rect,
    running: bool,
    rng: StdRng,
}

impl App {
    /// Create the application.
    ///
    /// `initial` is a restored or CLI-supplied palette; when `None` the
    /// first frame starts an animated randomize from the zero palette.
    #[must_use]
    pub fn new(config: AppConfig, initial: Option<Palette>, state_path: Option<PathBuf>) -> Self {
        Self::with_rng(config, initial, state_path, StdRng::from_entropy())
    }

    /// Create the application with an explicit RNG (used by tests).
    pub(crate) fn with_rng(
        config: AppConfig,
        initial: Option<Palette>,
        state_path: Option<PathBuf>,
        mut rng: StdRng,
    ) -> Self {
        let raster_dirty = Rc::new(Cell::new(true));
        let persist_pending = Rc::new(Cell::new(false));

        let mut store = PaletteStore::new(initial.unwrap_or_else(Palette::zero));
        // Registration order matters: the renderer must observe a
        // change before persistence schedules a save for it.
        let render_flag = Rc::clone(&raster_dirty);
        store.subscribe(move |_| render_flag.set(true));
        let persist_flag = Rc::clone(&persist_pending);
        store.subscribe(move |_| persist_flag.set(true));

        // Fresh session: animate from black into a random palette
        let transition = if initial.is_none() {
            Some(
                RandomizeTransition::new(store.palette(), &mut rng, Instant::now())
                    .with_timing(config.randomize_duration, config.easing),
            )
        } else {
            None
        };

        let debouncer = Debouncer::new(config.persist_debounce);
        let samples = SampleList::with_capacity(config.sample_capacity);
        let color_format = config.color_format;

        Self {
            config,
            store,
            raster_dirty,
            persist_pending,
            raster: GradientRaster::default(),
            samples,
            transition,
            debouncer,
            state_path,
            selection: (0, 0),
            selected_sample: None,
            color_format,
            notice: None,
            gradient_area: Rect::default(),
            running: true,
            rng,
        }
    }

    /// Main event loop
    pub async fn run(
        &mut self,
        terminal: &mut Terminal<CrosstermBackend<io::Stdout>>,
    ) -> anyhow::Result<()> {
        let frame_duration = frame_period(self.config.frame_rate);
        let mut event_stream = EventStream::new();

        // Render initial frame immediately so the user sees UI
        self.render(terminal)?;

        while self.running {
            let frame_start = Instant::now();

            tokio::select! {
                biased;

                // Terminal events - highest priority
                maybe_event = event_stream.next() => {
                    if let Some(Ok(event)) = maybe_event {
                        match event {
                            // Only handle Press events (not Release or Repeat)
                            Event::Key(key) if key.kind == KeyEventKind::Press => {
                                self.handle_key(key);
                            }
                            Event::Mouse(mouse) => self.handle_mouse(mouse),
                            Event::Resize(_, _) => self.raster_dirty.set(true),
                            _ => {}
                        }
                    }
                }

                // Frame tick
                () = tokio::time::sleep(frame_duration) => {}
            }

            self.update(Instant::now());
            self.render(terminal)?;

            // Frame rate limiting
            let elapsed = frame_start.elapsed();
            if elapsed < frame_duration {
                tokio::time::sleep(frame_duration - elapsed).await;
            }
        }

        // Don't lose an edit made inside the debounce window
        self.flush_pending_save();
        Ok(())
    }

    /// Advance animation, persistence, and notice state to `now`.
    pub(crate) fn update(&mut self, now: Instant) {
        if let Some(transition) = self.transition.clone() {
            self.store.replace(transition.palette_at(now));
            if transition.is_complete(now) {
                self.transition = None;
            }
        }

        if self.persist_pending.replace(false) {
            self.debouncer.poke(now);
        }
        if self.debouncer.fire(now) {
            self.save_state();
        }

        if let Some(notice) = &self.notice {
            if now.saturating_duration_since(notice.since) >= NOTICE_DURATION {
                self.notice = None;
            }
        }
    }

    fn render(
        &mut self,
        terminal: &mut Terminal<CrosstermBackend<io::Stdout>>,
    ) -> io::Result<()> {
        let width = terminal.size()?.width as usize;
        if self.raster_dirty.replace(false) || self.raster.width() != width {
            self.raster = GradientRaster::render(self.store.palette(), width);
        }
        terminal.draw(|frame| view::draw(self, frame))?;
        Ok(())
    }

    /// Handle keyboard input
    fn handle_key(&mut self, key: event::KeyEvent) {
        match key.code {
            KeyCode::Char('c') if key.modifiers.contains(KeyModifiers::CONTROL) => {
                self.running = false;
            }
            KeyCode::Char('q') | KeyCode::Esc => self.running = false,

            KeyCode::Char('r') => self.randomize_animated(),
            KeyCode::Char('R') => self.randomize_immediate(),

            KeyCode::Up => self.move_selection(-1, 0),
            KeyCode::Down => self.move_selection(1, 0),
            KeyCode::Left => self.move_selection(0, -1),
            KeyCode::Right => self.move_selection(0, 1),

            KeyCode::Char('-') => self.step_value(-STEP_COARSE),
            KeyCode::Char('=') => self.step_value(STEP_COARSE),
            KeyCode::Char('_') => self.step_value(-STEP_FINE),
            KeyCode::Char('+') => self.step_value(STEP_FINE),

            KeyCode::Char('[') => self.select_sample(-1),
            KeyCode::Char(']') => self.select_sample(1),
            KeyCode::Char('d') | KeyCode::Delete => self.remove_selected_sample(),
            KeyCode::Char('f') => {
                self.color_format = self.color_format.next();
            }

            KeyCode::Char('y') => self.copy_selected_color(),
            KeyCode::Char('Y') => self.copy_share_code(),

            _ => {}
        }
    }

    /// Handle mouse input: a left click inside the gradient strip
    /// samples the rendered buffer at the clicked column.
    fn handle_mouse(&mut self, mouse: event::MouseEvent) {
        if mouse.kind != MouseEventKind::Down(MouseButton::Left) {
            return;
        }
        let area = self.gradient_area;
        let inside = area.width > 0
            && mouse.column >= area.x
            && mouse.column < area.x + area.width
            && mouse.row >= area.y
            && mouse.row < area.y + area.height;
        if !inside {
            return;
        }

        let u = f64::from(mouse.column - area.x) / f64::from(area.width);
        if let Some(color) = self.raster.sample(u) {
            self.samples.push(color);
            self.selected_sample = Some(self.samples.len() - 1);
            tracing::debug!(color = %color.to_hex(), "Sampled color from gradient");
        }
    }

    /// Start an animated randomize, unless one is already running.
    fn randomize_animated(&mut self) {
        if self.transition.is_some() {
            return;
        }
        let transition =
            RandomizeTransition::new(self.store.palette(), &mut self.rng, Instant::now())
                .with_timing(self.config.randomize_duration, self.config.easing);
        self.transition = Some(transition);
    }

    /// Randomize in place with no animation, cancelling any running one.
    fn randomize_immediate(&mut self) {
        self.transition = None;
        let rng = &mut self.rng;
        self.store.update(|p| p.randomize(rng));
    }

    /// Move the parameter-table selection, wrapping at the edges.
    fn move_selection(&mut self, rows: i32, cols: i32) {
        let (row, col) = self.selection;
        let row = (row as i32 + rows).rem_euclid(4) as usize;
        let col = (col as i32 + cols).rem_euclid(3) as usize;
        self.selection = (row, col);
    }

    /// Nudge the selected coefficient, clamped to its role's range.
    fn step_value(&mut self, delta: f64) {
        // an in-flight animation would overwrite the edit next frame
        if self.transition.is_some() {
            return;
        }
        let (row, col) = self.selection;
        let (lo, hi) = EDIT_RANGES[row];
        self.store.update(|p| {
            let param = match row {
                0 => &mut p.a,
                1 => &mut p.b,
                2 => &mut p.c,
                _ => &mut p.d,
            };
            let channel = match col {
                0 => &mut param.r,
                1 => &mut param.g,
                _ => &mut param.b,
            };
            *channel = (*channel + delta).clamp(lo, hi);
        });
    }

    /// Move the sampled-color selection by `delta`, clamped.
    fn select_sample(&mut self, delta: i32) {
        if self.samples.is_empty() {
            self.selected_sample = None;
            return;
        }
        let last = (self.samples.len() - 1) as i32;
        let current = self.selected_sample.unwrap_or(0) as i32;
        self.selected_sample = Some((current + delta).clamp(0, last) as usize);
    }

    fn remove_selected_sample(&mut self) {
        let Some(index) = self.selected_sample else {
            return;
        };
        self.samples.remove(index);
        self.selected_sample = if self.samples.is_empty() {
            None
        } else {
            Some(index.min(self.samples.len() - 1))
        };
    }

    fn copy_selected_color(&mut self) {
        let Some(color) = self.selected_sample.and_then(|i| self.samples.get(i)) else {
            self.set_notice("Nothing sampled yet".to_string());
            return;
        };
        let text = color.format(self.color_format);
        clipboard::copy(&text);
        self.set_notice(format!("Copied {text}"));
    }

    fn copy_share_code(&mut self) {
        let code = self.store.palette().to_share();
        clipboard::copy(&code);
        self.set_notice("Copied palette code".to_string());
    }

    fn set_notice(&mut self, text: String) {
        self.notice = Some(Notice {
            text,
            since: Instant::now(),
        });
    }

    fn save_state(&mut self) {
        if !self.config.persist_enabled {
            return;
        }
        let Some(path) = &self.state_path else {
            return;
        };
        if let Err(e) = cospal_core::save_palette(path, self.store.palette()) {
            tracing::warn!("Failed to save palette state: {e}");
        }
    }

    fn flush_pending_save(&mut self) {
        if self.debouncer.is_armed() || self.persist_pending.replace(false) {
            self.debouncer.cancel();
            self.save_state();
        }
    }

    /// The current palette.
    pub(crate) fn palette(&self) -> &Palette {
        self.store.palette()
    }

    /// The active notice text, if one is showing.
    pub(crate) fn notice(&self) -> Option<&str> {
        self.notice.as_ref().map(|n| n.text.as_str())
    }

    /// Whether a randomize animation is running.
    pub(crate) fn is_animating(&self) -> bool {
        self.transition.is_some()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use cospal_core::Color;

    fn test_app(initial: Option<Palette>) -> App {
        App::with_rng(AppConfig::default(), initial, None, StdRng::seed_from_u64(1))
    }

    fn press(code: KeyCode) -> event::KeyEvent {
        event::KeyEvent::new(code, KeyModifiers::NONE)
    }

    #[test]
    fn test_selection_wraps_both_axes() {
        let mut app = test_app(Some(Palette::zero()));
        app.handle_key(press(KeyCode::Up));
        assert_eq!(app.selection, (3, 0));
        app.handle_key(press(KeyCode::Down));
        assert_eq!(app.selection, (0, 0));
        app.handle_key(press(KeyCode::Left));
        assert_eq!(app.selection, (0, 2));
        app.handle_key(press(KeyCode::Right));
        assert_eq!(app.selection, (0, 0));
    }

    #[test]
    fn test_step_edits_selected_coefficient() {
        let mut app = test_app(Some(Palette::zero()));
        app.handle_key(press(KeyCode::Char('=')));
        assert!((app.palette().a.r - 0.05).abs() < 1e-12);
        app.handle_key(press(KeyCode::Char('_')));
        assert!((app.palette().a.r - 0.045).abs() < 1e-12);
    }

    #[test]
    fn test_step_clamps_to_role_range() {
        let mut app = test_app(Some(Palette::zero()));
        // shift row (d) is clamped to [0, 1]
        app.selection = (3, 0);
        for _ in 0..50 {
            app.handle_key(press(KeyCode::Char('=')));
        }
        assert!((app.palette().d.r - 1.0).abs() < 1e-12);
        app.handle_key(press(KeyCode::Char('-')));
        assert!((app.palette().d.r - 0.95).abs() < 1e-12);
    }

    #[test]
    fn test_animated_randomize_is_not_reentrant() {
        let mut app = test_app(Some(Palette::zero()));
        app.handle_key(press(KeyCode::Char('r')));
        let first_target = *app.transition.as_ref().unwrap().target();
        app.handle_key(press(KeyCode::Char('r')));
        assert_eq!(*app.transition.as_ref().unwrap().target(), first_target);
    }

    #[test]
    fn test_animation_completes_and_clears() {
        let mut app = test_app(None);
        assert!(app.is_animating());
        let target = *app.transition.as_ref().unwrap().target();
        app.update(Instant::now() + Duration::from_secs(1));
        assert!(!app.is_animating());
        assert_eq!(*app.palette(), target);
    }

    #[test]
    fn test_edits_are_ignored_while_animating() {
        let mut app = test_app(None);
        assert!(app.is_animating());
        let before = *app.palette();
        app.handle_key(press(KeyCode::Char('=')));
        assert_eq!(*app.palette(), before);
    }

    #[test]
    fn test_sample_removal_keeps_selection_valid() {
        let mut app = test_app(Some(Palette::zero()));
        for i in 0..3 {
            app.samples.push(Color::rgb(i, i, i));
        }
        app.selected_sample = Some(2);
        app.handle_key(press(KeyCode::Char('d')));
        assert_eq!(app.selected_sample, Some(1));
        app.handle_key(press(KeyCode::Char('d')));
        app.handle_key(press(KeyCode::Char('d')));
        assert_eq!(app.selected_sample, None);
        assert!(app.samples.is_empty());
    }

    #[test]
    fn test_sample_selection_clamps() {
        let mut app = test_app(Some(Palette::zero()));
        for i in 0..3 {
            app.samples.push(Color::rgb(i, i, i));
        }
        app.selected_sample = Some(0);
        app.handle_key(press(KeyCode::Char('[')));
        assert_eq!(app.selected_sample, Some(0));
        for _ in 0..5 {
            app.handle_key(press(KeyCode::Char(']')));
        }
        assert_eq!(app.selected_sample, Some(2));
    }

    #[test]
    fn test_format_cycles() {
        let mut app = test_app(Some(Palette::zero()));
        assert_eq!(app.color_format, ColorFormat::Hex);
        app.handle_key(press(KeyCode::Char('f')));
        assert_eq!(app.color_format, ColorFormat::Rgb);
    }

    #[test]
    fn test_quit_keys() {
        for code in [KeyCode::Char('q'), KeyCode::Esc] {
            let mut app = test_app(Some(Palette::zero()));
            app.handle_key(press(code));
            assert!(!app.running);
        }
        let mut app = test_app(Some(Palette::zero()));
        app.handle_key(event::KeyEvent::new(
            KeyCode::Char('c'),
            KeyModifiers::CONTROL,
        ));
        assert!(!app.running);
    }

    #[test]
    fn test_frame_period_never_zero() {
        assert_eq!(frame_period(30), Duration::from_secs_f64(1.0 / 30.0));
        assert!(frame_period(100_000) > Duration::ZERO);
        assert!(frame_period(0) > Duration::ZERO);
    }

    #[test]
    fn test_notice_expires() {
        let mut app = test_app(Some(Palette::zero()));
        app.set_notice("Copied #000000".to_string());
        assert_eq!(app.notice(), Some("Copied #000000"));
        app.update(Instant::now() + Duration::from_secs(3));
        assert_eq!(app.notice(), None);
    }
}
