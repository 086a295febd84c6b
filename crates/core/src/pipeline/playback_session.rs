use std::time::Instant;

use crate::annotations::domain::annotation_provider::AnnotationProvider;
use crate::compositing::censorship_compositor::{PassOutcome, RegionCensorshipCompositor};
use crate::compositing::presentation::{flatten, LayerVisibility};
use crate::shared::censure::{BlurIntensity, CensorSettings, CensureMode};
use crate::shared::surface::Surface;
use crate::timeline::frame_index_resolver::resolve_frame_index;
use crate::timeline::timeline_info::TimelineInfo;

use super::pipeline_logger::{PipelineLogger, STAGE_COMPOSITE, STAGE_RESOLVE, STAGE_SYNTHESIZE};

/// What a render request did.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum RenderStatus {
    /// A full resolve → synthesize → composite pass ran.
    Rendered(PassOutcome),
    /// Same timestamp, frame and settings as the previous pass.
    Unchanged,
    /// `tick` while paused.
    Paused,
    /// The source frame has no pixels yet.
    SourceUnavailable,
}

#[derive(Clone, Copy, Debug, PartialEq)]
struct PassKey {
    timestamp_bits: u64,
    frame_index: Option<usize>,
}

/// Single-threaded driver for one annotated video.
///
/// Each render is one serialized pass: resolve the frame index for the
/// timestamp, fetch that frame's occurrences, rebuild the base layer, then
/// composite the regions. Changing the mode, intensity or annotation table
/// forces the next render to run even for an unchanged timestamp.
pub struct PlaybackSession {
    timeline: TimelineInfo,
    annotations: Box<dyn AnnotationProvider>,
    settings: CensorSettings,
    compositor: RegionCensorshipCompositor,
    logger: Box<dyn PipelineLogger>,
    playing: bool,
    dirty: bool,
    last_key: Option<PassKey>,
    current_frame: Option<usize>,
    frame_has_blur_out: bool,
}

impl PlaybackSession {
    pub fn new(
        timeline: TimelineInfo,
        annotations: Box<dyn AnnotationProvider>,
        settings: CensorSettings,
        logger: Box<dyn PipelineLogger>,
    ) -> Self {
        Self {
            timeline,
            annotations,
            compositor: RegionCensorshipCompositor::new(settings.mode),
            settings,
            logger,
            playing: false,
            dirty: true,
            last_key: None,
            current_frame: None,
            frame_has_blur_out: false,
        }
    }

    pub fn play(&mut self) {
        if !self.playing {
            self.playing = true;
            self.logger.info("Playback started");
        }
    }

    /// Stops ticking. The next `render` re-processes the current frame.
    pub fn pause(&mut self) {
        if self.playing {
            self.playing = false;
            self.dirty = true;
            self.logger.info("Playback paused");
        }
    }

    pub fn is_playing(&self) -> bool {
        self.playing
    }

    pub fn settings(&self) -> CensorSettings {
        self.settings
    }

    pub fn set_mode(&mut self, mode: CensureMode) {
        if self.settings.mode != mode {
            self.settings.mode = mode;
            self.compositor.set_mode(mode);
            self.dirty = true;
            self.logger.info(&format!("Censure mode set to {mode}"));
        }
    }

    pub fn set_intensity(&mut self, intensity: BlurIntensity) {
        if self.settings.intensity != intensity {
            self.settings.intensity = intensity;
            self.dirty = true;
            self.logger
                .info(&format!("Blur intensity set to {}", intensity.value()));
        }
    }

    pub fn set_annotations(&mut self, annotations: Box<dyn AnnotationProvider>) {
        self.annotations = annotations;
        self.dirty = true;
        self.logger.info("Annotation table replaced");
    }

    /// Frame index of the most recent pass; `None` before the first pass or
    /// when the timeline has no frames.
    pub fn current_frame(&self) -> Option<usize> {
        self.current_frame
    }

    /// Animation-callback entry point: renders only while playing.
    pub fn tick(&mut self, source: &Surface, timestamp_seconds: f64) -> RenderStatus {
        if !self.playing {
            return RenderStatus::Paused;
        }
        self.render(source, timestamp_seconds)
    }

    /// Runs a pass for `source` shown at `timestamp_seconds`.
    pub fn render(&mut self, source: &Surface, timestamp_seconds: f64) -> RenderStatus {
        if source.is_empty() {
            return RenderStatus::SourceUnavailable;
        }

        let started = Instant::now();
        let frame_index = resolve_frame_index(&self.timeline, timestamp_seconds);
        self.logger.timing(STAGE_RESOLVE, elapsed_ms(started));

        let key = PassKey {
            timestamp_bits: timestamp_seconds.to_bits(),
            frame_index,
        };
        if !self.dirty && self.last_key == Some(key) {
            return RenderStatus::Unchanged;
        }

        let occurrences = frame_index
            .map(|index| self.annotations.occurrences(index))
            .unwrap_or_default();
        let has_blur_out = frame_index.is_some_and(|index| self.annotations.has_blur_out(index));

        let started = Instant::now();
        let Some(pass) = self
            .compositor
            .synthesize(source, self.settings.intensity, has_blur_out)
        else {
            return RenderStatus::SourceUnavailable;
        };
        self.logger.timing(STAGE_SYNTHESIZE, elapsed_ms(started));

        let started = Instant::now();
        let report = self.compositor.composite(source, &occurrences, &pass);
        self.logger.timing(STAGE_COMPOSITE, elapsed_ms(started));
        self.logger.metric("regions_drawn", report.drawn as f64);
        self.logger.metric("regions_skipped", report.skipped as f64);

        log::debug!(
            "Rendered t={timestamp_seconds:.4}s frame={frame_index:?} mode={} regions={}/{}",
            self.settings.mode,
            report.drawn,
            occurrences.len()
        );

        self.current_frame = frame_index;
        self.frame_has_blur_out = has_blur_out;
        self.last_key = Some(key);
        self.dirty = false;
        RenderStatus::Rendered(PassOutcome { pass, report })
    }

    pub fn visibility(&self) -> LayerVisibility {
        LayerVisibility::for_frame(&self.compositor, self.frame_has_blur_out)
    }

    /// The frame a viewer sees for `source` after the latest pass.
    pub fn present(&self, source: &Surface) -> Surface {
        flatten(source, &self.compositor, self.visibility())
    }

    pub fn compositor(&self) -> &RegionCensorshipCompositor {
        &self.compositor
    }

    /// Forwards sequence-level progress to the session's logger.
    pub fn report_progress(&mut self, current: usize, total: usize) {
        self.logger.progress(current, total);
    }

    pub fn finish(&self) {
        self.logger.summary();
    }
}

fn elapsed_ms(started: Instant) -> f64 {
    started.elapsed().as_secs_f64() * 1000.0
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::shared::occurrence::Occurrence;
    use std::sync::{Arc, Mutex};

    // --- Stubs ---

    struct StubAnnotations {
        frames: Vec<(usize, Vec<Occurrence>)>,
        lookups: Arc<Mutex<Vec<usize>>>,
    }

    impl AnnotationProvider for StubAnnotations {
        fn occurrences(&self, frame_index: usize) -> Vec<Occurrence> {
            self.lookups.lock().unwrap().push(frame_index);
            self.frames
                .iter()
                .find(|(i, _)| *i == frame_index)
                .map(|(_, o)| o.clone())
                .unwrap_or_default()
        }
    }

    struct RecordingLogger {
        events: Arc<Mutex<Vec<String>>>,
    }

    impl PipelineLogger for RecordingLogger {
        fn progress(&mut self, _current: usize, _total: usize) {}
        fn timing(&mut self, stage: &str, _duration_ms: f64) {
            self.events.lock().unwrap().push(format!("timing:{stage}"));
        }
        fn metric(&mut self, name: &str, value: f64) {
            self.events.lock().unwrap().push(format!("metric:{name}={value}"));
        }
        fn info(&mut self, message: &str) {
            self.events.lock().unwrap().push(format!("info:{message}"));
        }
    }

    /// Flags a frame as blur-out without listing any occurrence for it.
    struct FlagOnlyAnnotations {
        blur_out_frame: usize,
    }

    impl AnnotationProvider for FlagOnlyAnnotations {
        fn occurrences(&self, _frame_index: usize) -> Vec<Occurrence> {
            Vec::new()
        }

        fn has_blur_out(&self, frame_index: usize) -> bool {
            frame_index == self.blur_out_frame
        }
    }

    // --- Helpers ---

    fn timeline() -> TimelineInfo {
        // Frames start at 0, 10, 20, 30 units; 10 units per second.
        TimelineInfo::constant(4, 10, 10)
    }

    fn source() -> Surface {
        Surface::filled(40, 40, [100, 150, 200, 255])
    }

    struct Harness {
        session: PlaybackSession,
        lookups: Arc<Mutex<Vec<usize>>>,
        events: Arc<Mutex<Vec<String>>>,
    }

    fn harness(frames: Vec<(usize, Vec<Occurrence>)>, timeline: TimelineInfo) -> Harness {
        let lookups = Arc::new(Mutex::new(Vec::new()));
        let events = Arc::new(Mutex::new(Vec::new()));
        let session = PlaybackSession::new(
            timeline,
            Box::new(StubAnnotations {
                frames,
                lookups: Arc::clone(&lookups),
            }),
            CensorSettings::default(),
            Box::new(RecordingLogger {
                events: Arc::clone(&events),
            }),
        );
        Harness {
            session,
            lookups,
            events,
        }
    }

    fn region(is_blur_out: bool) -> Occurrence {
        Occurrence::new(5.0, 5.0, 20.0, 20.0, is_blur_out)
    }

    // --- Tests ---

    #[test]
    fn test_render_fetches_occurrences_for_resolved_frame() {
        let mut h = harness(vec![(2, vec![region(false)])], timeline());

        // 2.5s -> 25 units -> frame 2
        let status = h.session.render(&source(), 2.5);

        assert_eq!(h.session.current_frame(), Some(2));
        let lookups = h.lookups.lock().unwrap();
        assert!(!lookups.is_empty());
        assert!(lookups.iter().all(|&i| i == 2));
        match status {
            RenderStatus::Rendered(outcome) => assert_eq!(outcome.report.drawn, 1),
            other => panic!("expected a pass, got {other:?}"),
        }
    }

    #[test]
    fn test_repeat_render_is_unchanged() {
        let mut h = harness(vec![], timeline());
        h.session.render(&source(), 1.0);
        assert_eq!(h.session.render(&source(), 1.0), RenderStatus::Unchanged);
    }

    #[test]
    fn test_settings_change_forces_new_pass() {
        let mut h = harness(vec![], timeline());
        h.session.render(&source(), 1.0);

        h.session.set_intensity(BlurIntensity::new(60));
        assert!(matches!(h.session.render(&source(), 1.0), RenderStatus::Rendered(_)));

        h.session.set_mode(CensureMode::PixelateCss);
        let RenderStatus::Rendered(outcome) = h.session.render(&source(), 1.0) else {
            panic!("expected a pass after mode change");
        };
        assert_eq!(outcome.pass.mode, CensureMode::PixelateCss);
        assert_eq!(outcome.pass.intensity.value(), 60);
    }

    #[test]
    fn test_setting_same_value_does_not_dirty() {
        let mut h = harness(vec![], timeline());
        h.session.render(&source(), 1.0);
        h.session.set_mode(CensureMode::Gauss);
        h.session.set_intensity(BlurIntensity::default());
        assert_eq!(h.session.render(&source(), 1.0), RenderStatus::Unchanged);
    }

    #[test]
    fn test_tick_only_while_playing() {
        let mut h = harness(vec![], timeline());
        assert_eq!(h.session.tick(&source(), 0.5), RenderStatus::Paused);

        h.session.play();
        assert!(h.session.is_playing());
        assert!(matches!(h.session.tick(&source(), 0.5), RenderStatus::Rendered(_)));
    }

    #[test]
    fn test_pause_reprocesses_current_frame() {
        let mut h = harness(vec![], timeline());
        h.session.play();
        h.session.tick(&source(), 0.5);
        h.session.pause();
        assert!(!h.session.is_playing());
        assert!(matches!(h.session.render(&source(), 0.5), RenderStatus::Rendered(_)));
    }

    #[test]
    fn test_empty_source_is_unavailable() {
        let mut h = harness(vec![], timeline());
        assert_eq!(
            h.session.render(&Surface::blank(0, 0), 1.0),
            RenderStatus::SourceUnavailable
        );
        assert!(!h.session.compositor().is_ready());
    }

    #[test]
    fn test_empty_timeline_renders_without_regions() {
        let mut h = harness(vec![(1, vec![region(false)])], TimelineInfo::default());
        let RenderStatus::Rendered(outcome) = h.session.render(&source(), 1.0) else {
            panic!("expected a pass");
        };
        assert_eq!(outcome.report.drawn, 0);
        assert_eq!(h.session.current_frame(), None);
        assert!(h.lookups.lock().unwrap().is_empty());
    }

    #[test]
    fn test_visibility_follows_blur_out_frames() {
        let mut h = harness(
            vec![(1, vec![region(false)]), (2, vec![region(false), region(true)])],
            timeline(),
        );
        assert_eq!(h.session.visibility(), LayerVisibility::default());

        h.session.render(&source(), 0.5); // frame 1
        let v = h.session.visibility();
        assert!(v.display_visible);
        assert!(!v.base_visible);

        h.session.render(&source(), 2.5); // frame 2
        assert!(h.session.visibility().base_visible);
    }

    #[test]
    fn test_blur_out_flag_comes_from_provider() {
        let mut h = harness(vec![], timeline());
        h.session
            .set_annotations(Box::new(FlagOnlyAnnotations { blur_out_frame: 2 }));

        let RenderStatus::Rendered(outcome) = h.session.render(&source(), 2.5) else {
            panic!("expected a pass");
        };
        assert!(outcome.pass.has_blur_out);
        assert!(h.session.visibility().base_visible);

        h.session.render(&source(), 0.5); // frame 1
        assert!(!h.session.visibility().base_visible);
    }

    #[test]
    fn test_logs_stage_timings_and_metrics() {
        let mut h = harness(vec![(1, vec![region(false)])], timeline());
        h.session.render(&source(), 0.5);

        let events = h.events.lock().unwrap();
        assert!(events.contains(&"timing:resolve".to_string()));
        assert!(events.contains(&"timing:synthesize".to_string()));
        assert!(events.contains(&"timing:composite".to_string()));
        assert!(events.contains(&"metric:regions_drawn=1".to_string()));
        assert!(events.contains(&"metric:regions_skipped=0".to_string()));
    }

    #[test]
    fn test_present_shows_censored_region_over_source() {
        let mut h = harness(vec![(1, vec![region(false)])], timeline());
        h.session.set_intensity(BlurIntensity::new(75)); // brightness 50%
        let src = source();
        h.session.render(&src, 0.5);

        let out = h.session.present(&src);
        assert_eq!(out.pixel(0, 0), src.pixel(0, 0));
        assert_eq!(out.pixel(15, 15), [50, 75, 100, 255]);
    }
}
