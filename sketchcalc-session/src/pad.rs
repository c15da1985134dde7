//! The sketchpad: wires the tool state machine, the raster surface, the
//! recognition client, and the result overlay together.
//!
//! Pointer events drive painting synchronously; `run` is the one
//! suspending operation. Bindings from a response are applied before any
//! formula from that response is scheduled.

use std::time::Duration;

use sketchcalc_core::{
    FormulaEntry, GestureTracker, Point, PointerEvent, PointerPhase, Rgb, SessionState, Tool,
};
use sketchcalc_raster::{bounds, encode, paint, InkBounds, RasterSurface};

use crate::config::PadConfig;
use crate::error::SessionResult;
use crate::recognition::{Recognized, RecognitionClient};
use crate::render::{FormulaRenderer, LogRenderer};
use crate::schedule::{Reveal, RevealScheduler};

/// Result of one recognition run.
#[derive(Debug, Clone)]
pub struct RunOutcome {
    /// Records returned by the service, in response order.
    pub records: Vec<Recognized>,
    /// Ink bounds scanned after the response (degenerate when the canvas
    /// was blank).
    pub bounds: InkBounds,
}

/// The interactive drawing surface plus its recognition pipeline.
pub struct Sketchpad {
    surface: RasterSurface,
    session: SessionState,
    gesture: GestureTracker,
    client: RecognitionClient,
    scheduler: RevealScheduler,
    renderer: Box<dyn FormulaRenderer + Send>,
    reveal_delay: Duration,
    background_filled: bool,
}

impl Sketchpad {
    /// Create a sketchpad from configuration.
    ///
    /// # Errors
    ///
    /// Returns an error if the canvas dimensions or the service URL are
    /// invalid.
    pub fn new(config: &PadConfig) -> SessionResult<Self> {
        Ok(Self {
            surface: RasterSurface::new(config.width, config.height)?,
            session: SessionState::new(),
            gesture: GestureTracker::new(),
            client: RecognitionClient::new(&config.api_url)?,
            scheduler: RevealScheduler::new(),
            renderer: Box::new(LogRenderer),
            reveal_delay: config.reveal_delay,
            background_filled: false,
        })
    }

    /// Attach a host formula renderer, replacing the logging default.
    pub fn set_renderer(&mut self, renderer: Box<dyn FormulaRenderer + Send>) {
        self.renderer = renderer;
    }

    /// The session state (tool, stroke, bindings, formulas, anchor).
    #[must_use]
    pub fn session(&self) -> &SessionState {
        &self.session
    }

    /// The raster surface (read-only).
    #[must_use]
    pub fn surface(&self) -> &RasterSurface {
        &self.surface
    }

    // --- Toolbar events ---

    /// Select a tool. Pure transition; nothing is painted.
    pub fn select_tool(&mut self, tool: Tool) {
        self.session.select_tool(tool);
    }

    /// Set the configured stroke color.
    pub fn set_color(&mut self, color: Rgb) {
        self.session.set_color(color);
    }

    /// Set the configured stroke width.
    ///
    /// # Errors
    ///
    /// Rejects a zero width.
    pub fn set_stroke_width(&mut self, width: u32) -> SessionResult<()> {
        self.session.set_stroke_width(width)?;
        Ok(())
    }

    // --- Pointer events ---

    /// Route a pointer event to the gesture machine.
    ///
    /// # Errors
    ///
    /// Propagates a `Down` arriving while a gesture is already active.
    pub fn handle_pointer(&mut self, event: PointerEvent) -> SessionResult<()> {
        match event.phase {
            PointerPhase::Down => self.pointer_down(event.position()),
            PointerPhase::Move => {
                self.pointer_move(event.position());
                Ok(())
            }
            PointerPhase::Up | PointerPhase::Out => {
                self.pointer_up();
                Ok(())
            }
        }
    }

    /// Begin a gesture at `point`.
    ///
    /// The first pointer-down also fills in the conceptual background:
    /// from here on the canvas reads as black behind the ink.
    ///
    /// # Errors
    ///
    /// Propagates [`sketchcalc_core::CoreError::GestureActive`] if a
    /// gesture is already in progress.
    pub fn pointer_down(&mut self, point: Point) -> SessionResult<()> {
        if !self.background_filled {
            self.background_filled = true;
            tracing::debug!("background filled on first pointer-down");
        }
        self.gesture.begin(point)?;
        Ok(())
    }

    /// Advance the active gesture, painting according to the selected
    /// tool. A no-op while idle (moves may arrive after release).
    pub fn pointer_move(&mut self, point: Point) {
        let Some(step) = self.gesture.update(point) else {
            return;
        };
        let style = self.session.tool.effective_style(self.session.stroke);
        if self.session.tool.is_shape() {
            paint::paint_preview(&mut self.surface, self.session.tool, step.anchor, step.to, style);
        } else {
            paint::paint_stroke(&mut self.surface, step.from, step.to, style);
        }
    }

    /// End the gesture. No-op while idle (up and out may both fire).
    pub fn pointer_up(&mut self) {
        self.gesture.end();
    }

    // --- Recognition pipeline ---

    /// Submit the current drawing for recognition.
    ///
    /// Assignment records update the variable bindings immediately and in
    /// response order, before any formula is scheduled. The ink bounds
    /// are then scanned and, when ink exists, the overlay anchor moves to
    /// their center. Finally every record is scheduled for reveal after
    /// the flat delay; call [`Sketchpad::poll_reveals`] to apply reveals
    /// whose delay has elapsed.
    ///
    /// # Errors
    ///
    /// Network, service, and snapshot-encoding failures propagate; no
    /// retry is attempted.
    pub async fn run(&mut self) -> SessionResult<RunOutcome> {
        let image = encode::to_data_uri(&self.surface)?;
        let records = self
            .client
            .calculate(&image, self.session.bindings())
            .await?;

        for record in &records {
            if record.assign {
                self.session.bind(record.expr.clone(), record.result.clone());
            }
        }

        let bounds = bounds::scan(&self.surface);
        if bounds.is_empty() {
            tracing::debug!("no ink on canvas; overlay anchor unchanged");
        } else {
            self.session.set_overlay_anchor(bounds.center());
        }

        for record in &records {
            self.scheduler.schedule(
                Reveal {
                    expr: record.expr.clone(),
                    answer: record.result.clone(),
                },
                self.reveal_delay,
            );
        }

        Ok(RunOutcome { records, bounds })
    }

    /// Apply every reveal whose delay has elapsed. Returns the number of
    /// formula entries created.
    pub fn poll_reveals(&mut self) -> usize {
        let ready = self.scheduler.drain_ready();
        let applied = ready.len();
        for reveal in ready {
            self.add_formula(&reveal.expr, &reveal.answer);
        }
        applied
    }

    /// Append a formula entry. The drawn ink is considered consumed once
    /// recognized: the raster is cleared and the renderer re-typesets.
    pub fn add_formula(&mut self, expression: &str, answer: &str) {
        self.session.push_formula(FormulaEntry::new(expression, answer));
        self.surface.clear();
        self.renderer.typeset(self.session.formulas());
    }

    /// Authoritative overlay position reported by the host's drag widget.
    pub fn set_overlay_anchor(&mut self, point: Point) {
        self.session.set_overlay_anchor(point);
    }

    /// Return to the initial state: pending reveals cancelled, formulas
    /// and bindings destroyed, raster cleared. Idempotent.
    pub fn reset(&mut self) {
        self.scheduler.cancel_all();
        self.session.reset();
        self.surface.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use sketchcalc_core::{BACKGROUND, ERASER_WIDTH};
    use tokio::time::sleep;
    use wiremock::matchers::{method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    const TEST_DELAY: Duration = Duration::from_millis(10);

    /// Renderer that counts typeset calls and remembers the last size.
    #[derive(Debug, Default)]
    struct RecordingRenderer {
        calls: std::sync::Arc<std::sync::Mutex<Vec<usize>>>,
    }

    impl FormulaRenderer for RecordingRenderer {
        fn typeset(&mut self, entries: &[FormulaEntry]) {
            self.calls.lock().expect("lock").push(entries.len());
        }
    }

    fn config_for(server: &MockServer) -> PadConfig {
        PadConfig {
            api_url: server.uri(),
            width: 64,
            height: 64,
            reveal_delay: TEST_DELAY,
        }
    }

    fn offline_pad() -> Sketchpad {
        let config = PadConfig {
            api_url: "http://127.0.0.1:9".to_string(),
            width: 64,
            height: 64,
            reveal_delay: TEST_DELAY,
        };
        Sketchpad::new(&config).expect("pad")
    }

    fn draw_stroke(pad: &mut Sketchpad, from: Point, to: Point) {
        pad.pointer_down(from).expect("down");
        pad.pointer_move(to);
        pad.pointer_up();
    }

    async fn mount_response(server: &MockServer, data: serde_json::Value) {
        Mock::given(method("POST"))
            .and(path("/calculate"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "data": data })))
            .mount(server)
            .await;
    }

    #[test]
    fn test_eraser_paints_background_at_fixed_width() {
        let mut pad = offline_pad();
        pad.set_color(Rgb::new(255, 0, 0));
        pad.set_stroke_width(3).expect("width");

        // A red pen stroke across the middle.
        draw_stroke(&mut pad, Point::new(10.0, 32.0), Point::new(50.0, 32.0));
        assert_eq!(pad.surface().pixel(30, 32), Some([255, 0, 0, 255]));

        // Erase over it: background color, width 20 regardless of the
        // configured 3.
        pad.select_tool(Tool::Eraser);
        draw_stroke(&mut pad, Point::new(10.0, 32.0), Point::new(50.0, 32.0));
        let expected = [BACKGROUND.r, BACKGROUND.g, BACKGROUND.b, 255];
        assert_eq!(pad.surface().pixel(30, 32), Some(expected));
        // 8px off the path center is still inside the eraser's 10px
        // radius, far outside the configured width of 3.
        assert_eq!(pad.surface().pixel(30, 32 + ERASER_WIDTH / 2 - 2), Some(expected));
    }

    #[test]
    fn test_shape_gesture_keeps_only_latest_preview() {
        let mut pad = offline_pad();
        pad.select_tool(Tool::Rectangle);

        pad.pointer_down(Point::new(8.0, 8.0)).expect("down");
        pad.pointer_move(Point::new(20.0, 20.0));
        pad.pointer_move(Point::new(40.0, 40.0));
        pad.pointer_up();

        // The first preview's far corner is gone; the second's remains.
        assert!(!pad.surface().is_ink(20, 12));
        assert!(pad.surface().is_ink(40, 40));
    }

    #[test]
    fn test_pointer_events_while_idle_are_noops() {
        let mut pad = offline_pad();
        pad.pointer_move(Point::new(10.0, 10.0));
        pad.pointer_up();
        assert!(sketchcalc_raster::scan(pad.surface()).is_empty());
    }

    #[test]
    fn test_pointer_out_ends_gesture_like_up() {
        let mut pad = offline_pad();
        pad.handle_pointer(PointerEvent::new(PointerPhase::Down, 10.0, 10.0))
            .expect("down");
        pad.handle_pointer(PointerEvent::new(PointerPhase::Move, 20.0, 10.0))
            .expect("move");
        pad.handle_pointer(PointerEvent::new(PointerPhase::Out, 20.0, 10.0))
            .expect("out");
        // Up after out is a silent no-op; both may fire for one gesture.
        pad.handle_pointer(PointerEvent::new(PointerPhase::Up, 20.0, 10.0))
            .expect("up");
        assert!(pad.surface().is_ink(15, 10));
        // A fresh gesture can begin afterwards.
        pad.pointer_down(Point::new(30.0, 30.0)).expect("down again");
    }

    #[tokio::test]
    async fn run_without_assignment_leaves_bindings_and_reveals_formula() {
        let server = MockServer::start().await;
        mount_response(
            &server,
            json!([{ "expr": "2+2", "result": "4", "assign": false }]),
        )
        .await;

        let mut pad = Sketchpad::new(&config_for(&server)).expect("pad");
        let renderer = RecordingRenderer::default();
        let calls = renderer.calls.clone();
        pad.set_renderer(Box::new(renderer));

        draw_stroke(&mut pad, Point::new(10.0, 10.0), Point::new(30.0, 30.0));
        let outcome = pad.run().await.expect("run");

        assert_eq!(outcome.records.len(), 1);
        assert!(pad.session().bindings().is_empty());
        assert!(!outcome.bounds.is_empty());

        // Nothing reveals before the flat delay elapses.
        assert_eq!(pad.poll_reveals(), 0);
        sleep(TEST_DELAY * 5).await;
        assert_eq!(pad.poll_reveals(), 1);

        let formulas = pad.session().formulas();
        assert_eq!(formulas.len(), 1);
        assert!(formulas[0].markup.contains("2+2 = 4"));
        // The ink was consumed by the reveal.
        assert!(sketchcalc_raster::scan(pad.surface()).is_empty());
        assert_eq!(*calls.lock().expect("lock"), vec![1]);
    }

    #[tokio::test]
    async fn run_applies_assignments_before_any_reveal() {
        let server = MockServer::start().await;
        mount_response(
            &server,
            json!([{ "expr": "x", "result": "5", "assign": true }]),
        )
        .await;

        let mut pad = Sketchpad::new(&config_for(&server)).expect("pad");
        draw_stroke(&mut pad, Point::new(5.0, 5.0), Point::new(20.0, 20.0));
        pad.run().await.expect("run");

        // Binding applied immediately, independent of the reveal delay.
        assert_eq!(pad.session().bindings().get("x"), Some("5"));
        assert!(pad.session().formulas().is_empty());
    }

    #[tokio::test]
    async fn run_anchors_overlay_at_ink_center() {
        let server = MockServer::start().await;
        mount_response(&server, json!([])).await;

        let mut pad = Sketchpad::new(&config_for(&server)).expect("pad");
        pad.set_stroke_width(1).expect("width");
        draw_stroke(&mut pad, Point::new(10.0, 20.0), Point::new(30.0, 40.0));
        let outcome = pad.run().await.expect("run");

        assert_eq!(pad.session().overlay_anchor, outcome.bounds.center());
    }

    #[tokio::test]
    async fn run_on_blank_canvas_keeps_overlay_anchor() {
        let server = MockServer::start().await;
        mount_response(&server, json!([])).await;

        let mut pad = Sketchpad::new(&config_for(&server)).expect("pad");
        let before = pad.session().overlay_anchor;
        let outcome = pad.run().await.expect("run");

        assert!(outcome.bounds.is_empty());
        assert_eq!(pad.session().overlay_anchor, before);
    }

    #[tokio::test]
    async fn reset_cancels_reveals_scheduled_but_not_yet_applied() {
        let server = MockServer::start().await;
        mount_response(
            &server,
            json!([{ "expr": "2+2", "result": "4", "assign": false }]),
        )
        .await;

        let mut pad = Sketchpad::new(&config_for(&server)).expect("pad");
        draw_stroke(&mut pad, Point::new(5.0, 5.0), Point::new(20.0, 20.0));
        pad.run().await.expect("run");
        pad.reset();

        sleep(TEST_DELAY * 5).await;
        assert_eq!(pad.poll_reveals(), 0);
        assert!(pad.session().formulas().is_empty());
        assert!(pad.session().bindings().is_empty());
        assert!(sketchcalc_raster::scan(pad.surface()).is_empty());

        // Idempotent.
        pad.reset();
        assert!(pad.session().formulas().is_empty());
    }

    #[tokio::test]
    async fn run_failure_propagates_without_state_changes() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/calculate"))
            .respond_with(ResponseTemplate::new(502).set_body_string("bad gateway"))
            .mount(&server)
            .await;

        let mut pad = Sketchpad::new(&config_for(&server)).expect("pad");
        draw_stroke(&mut pad, Point::new(5.0, 5.0), Point::new(20.0, 20.0));
        let err = pad.run().await.unwrap_err();
        assert!(matches!(err, crate::SessionError::Recognition(_)));
        assert!(pad.session().bindings().is_empty());
        assert!(pad.session().formulas().is_empty());
        // The drawing survives a failed run.
        assert!(!sketchcalc_raster::scan(pad.surface()).is_empty());
    }
}
