use crate::blurring::domain::base_layer_synthesizer::{synthesize_base_layer, SynthesisPass};
use crate::blurring::domain::censure_strategy::CensureStrategy;
use crate::blurring::infrastructure::strategy_factory::create_strategy;
use crate::shared::censure::{BlurIntensity, CensureMode};
use crate::shared::occurrence::Occurrence;
use crate::shared::surface::{Surface, TRANSPARENT};

use super::region_compositor::{composite_regions, CompositeReport};

/// Result of one synthesize → composite pass.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct PassOutcome {
    pub pass: SynthesisPass,
    pub report: CompositeReport,
}

/// Owns the base layer and display surfaces and rebuilds both per pass.
///
/// The display surface starts transparent each pass and only holds the
/// elliptical region composites; it is not meant to be shown until the
/// first pass has completed (`is_ready`).
pub struct RegionCensorshipCompositor {
    strategy: Box<dyn CensureStrategy>,
    base_layer: Surface,
    display: Surface,
    ready: bool,
}

impl RegionCensorshipCompositor {
    pub fn new(mode: CensureMode) -> Self {
        Self {
            strategy: create_strategy(mode),
            base_layer: Surface::blank(0, 0),
            display: Surface::blank(0, 0),
            ready: false,
        }
    }

    pub fn mode(&self) -> CensureMode {
        self.strategy.mode()
    }

    pub fn set_mode(&mut self, mode: CensureMode) {
        if self.strategy.mode() != mode {
            self.strategy = create_strategy(mode);
        }
    }

    /// Builds the base layer from `source`. Returns `None` without touching
    /// any surface when the source has no pixels yet.
    pub fn synthesize(
        &mut self,
        source: &Surface,
        intensity: BlurIntensity,
        has_blur_out: bool,
    ) -> Option<SynthesisPass> {
        if source.is_empty() {
            log::debug!("Source surface not available yet, skipping synthesis");
            return None;
        }
        let pass = synthesize_base_layer(
            &mut self.base_layer,
            source,
            intensity,
            self.strategy.as_ref(),
            has_blur_out,
        );
        Some(pass)
    }

    /// Redraws the display surface for the pass just synthesized.
    pub fn composite(
        &mut self,
        source: &Surface,
        occurrences: &[Occurrence],
        pass: &SynthesisPass,
    ) -> CompositeReport {
        self.display
            .reset(source.width(), source.height(), TRANSPARENT);
        let report = composite_regions(
            &mut self.display,
            &self.base_layer,
            source,
            occurrences,
            pass,
        );
        if !self.ready {
            log::debug!("First composite complete, display layer ready");
        }
        self.ready = true;
        report
    }

    /// One full pass over a frame's occurrences.
    pub fn render(
        &mut self,
        source: &Surface,
        occurrences: &[Occurrence],
        intensity: BlurIntensity,
    ) -> Option<PassOutcome> {
        let has_blur_out = Occurrence::any_blur_out(occurrences);
        let pass = self.synthesize(source, intensity, has_blur_out)?;
        let report = self.composite(source, occurrences, &pass);
        Some(PassOutcome { pass, report })
    }

    pub fn base_layer(&self) -> &Surface {
        &self.base_layer
    }

    pub fn display(&self) -> &Surface {
        &self.display
    }

    pub fn is_ready(&self) -> bool {
        self.ready
    }
}
