use std::io::{Write, stdout};
use std::time::{Duration, Instant};

use anyhow::{Context, Result};
use crossterm::event::{self, DisableMouseCapture, EnableMouseCapture};
use crossterm::execute;
use crossterm::terminal::SetTitle;
use ratatui::DefaultTerminal;

use crate::app::{App, Message, Model, update};

/// Milliseconds between smooth-scroll frames.
const ANIMATION_FRAME_MS: u64 = 16;

pub(super) struct ResizeDebouncer {
    delay_ms: u64,
    pending: Option<(u16, u16, u64)>,
}

impl ResizeDebouncer {
    pub(super) const fn new(delay_ms: u64) -> Self {
        Self {
            delay_ms,
            pending: None,
        }
    }

    pub(super) const fn queue(&mut self, width: u16, height: u16, now_ms: u64) {
        self.pending = Some((width, height, now_ms));
    }

    pub(super) fn take_ready(&mut self, now_ms: u64) -> Option<(u16, u16)> {
        let (width, height, queued_at) = self.pending?;
        if now_ms.saturating_sub(queued_at) >= self.delay_ms {
            self.pending = None;
            Some((width, height))
        } else {
            None
        }
    }

    pub(super) const fn is_pending(&self) -> bool {
        self.pending.is_some()
    }
}

impl App {
    /// Run the main event loop.
    ///
    /// # Errors
    ///
    /// Returns an error if terminal initialization or the event loop hits
    /// an I/O failure.
    pub fn run(&mut self) -> Result<()> {
        let _run_scope = crate::perf::scope("app.run.total");

        let init_scope = crate::perf::scope("app.ratatui_init");
        let mut terminal = ratatui::try_init()
            .context("Failed to initialize terminal: contextsite requires an interactive terminal")?;
        let size = terminal.size()?;
        drop(init_scope);

        let layout_scope = crate::perf::scope("app.initial_layout");
        let mut model = Model::new(self.route, (size.width, size.height))
            .with_toc_enabled(self.toc_enabled);
        model.preference_path.clone_from(&self.preference_path);
        model
            .config_global_path
            .clone_from(&self.config_global_path);
        model.config_local_path.clone_from(&self.config_local_path);
        drop(layout_scope);
        crate::perf::log_event(
            "init.layout",
            format!(
                "terminal={}x{} route={} lines={}",
                size.width,
                size.height,
                model.route,
                model.layout.line_count()
            ),
        );

        let result = self.event_loop(&mut terminal, &mut model);

        let _ = execute!(stdout(), DisableMouseCapture);
        ratatui::restore();

        result
    }

    fn dispatch(&self, model: &mut Model, msg: Message) {
        let lang_before = model.route.lang;
        let side_msg = msg.clone();
        *model = update(std::mem::take(model), msg);
        self.handle_message_side_effects(model, &side_msg, lang_before);
    }

    fn event_loop(&self, terminal: &mut DefaultTerminal, model: &mut Model) -> Result<()> {
        let start = Instant::now();
        let mut resize_debouncer = ResizeDebouncer::new(100);
        let mut frame_idx: u64 = 0;
        let mut needs_render = true;
        let mut last_title = String::new();
        let mut last_tick_ms = 0_u64;

        execute!(stdout(), EnableMouseCapture)?;
        set_mouse_motion_tracking(true)?;

        loop {
            let title = model.document_title();
            if title != last_title {
                execute!(stdout(), SetTitle(&title))?;
                crate::perf::log_event("title.set", &title);
                last_title = title;
            }

            if model.expire_toast(Instant::now()) {
                needs_render = true;
            }

            let now_ms = u64::try_from(start.elapsed().as_millis()).unwrap_or(u64::MAX);

            if let Some((width, height)) = resize_debouncer.take_ready(now_ms) {
                crate::perf::log_event(
                    "event.resize.apply",
                    format!("frame={frame_idx} width={width} height={height}"),
                );
                self.dispatch(model, Message::Resize(width, height));
                needs_render = true;
            }

            if model.is_animating() && now_ms.saturating_sub(last_tick_ms) >= ANIMATION_FRAME_MS {
                last_tick_ms = now_ms;
                self.dispatch(model, Message::AnimationTick);
                needs_render = true;
            }

            let poll_ms = if needs_render {
                0
            } else if model.is_animating() {
                ANIMATION_FRAME_MS
            } else if resize_debouncer.is_pending() {
                10
            } else {
                250
            };
            if event::poll(Duration::from_millis(poll_ms))? {
                let event_ms = u64::try_from(start.elapsed().as_millis()).unwrap_or(u64::MAX);
                let msg = self.handle_event(&event::read()?, model, event_ms, &mut resize_debouncer);
                if let Some(msg) = msg {
                    crate::perf::log_event(
                        "event.message",
                        format!("frame={frame_idx} msg={msg:?}"),
                    );
                    self.dispatch(model, msg);
                    needs_render = true;
                }

                // Coalesce key repeat bursts into a single render.
                let mut drained = 0_u32;
                while event::poll(Duration::from_millis(0))? {
                    let drain_ms = u64::try_from(start.elapsed().as_millis()).unwrap_or(u64::MAX);
                    let msg =
                        self.handle_event(&event::read()?, model, drain_ms, &mut resize_debouncer);
                    if let Some(msg) = msg {
                        drained += 1;
                        self.dispatch(model, msg);
                        needs_render = true;
                    }
                }
                if drained > 0 {
                    crate::perf::log_event(
                        "event.drain",
                        format!("frame={frame_idx} drained={drained}"),
                    );
                }
            }

            if needs_render {
                frame_idx += 1;
                let draw_start = Instant::now();
                terminal.draw(|frame| Self::view(model, frame))?;
                crate::perf::log_event(
                    "frame.draw",
                    format!(
                        "frame={} draw_ms={:.3} offset={} scroll_y={}",
                        frame_idx,
                        draw_start.elapsed().as_secs_f64() * 1000.0,
                        model.viewport.offset(),
                        model.scroll_y_px()
                    ),
                );
                needs_render = false;
            }

            if model.should_quit {
                break;
            }
        }
        let _ = set_mouse_motion_tracking(false);
        let _ = execute!(stdout(), DisableMouseCapture);
        Ok(())
    }
}

fn set_mouse_motion_tracking(enable: bool) -> std::io::Result<()> {
    // SGR extended mouse coordinates (1006) so wide terminals report
    // columns past 223.
    let mut out = stdout();
    if enable {
        out.write_all(b"\x1b[?1006h")?;
    } else {
        out.write_all(b"\x1b[?1006l")?;
    }
    out.flush()
}
