//! Form state and key handling, independent of the terminal.

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use std::sync::Arc;
use tracing::{info, warn};

use crate::metrics::PredictionMetrics;
use crate::models::{InferenceEngine, LoadError};
use crate::types::prediction::PredictionResult;
use crate::types::record::{InputRecord, FEATURE_COUNT};
use crate::ui::form::{default_record, SliderSpec, FINE_STEP, SLIDERS};

/// What the event loop should do after a key press
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Action {
    None,
    Quit,
}

/// Focusable items, top to bottom
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Focus {
    Slider(usize),
    PredictButton,
}

impl Focus {
    fn index(self) -> usize {
        match self {
            Focus::Slider(i) => i,
            Focus::PredictButton => FEATURE_COUNT,
        }
    }

    fn from_index(idx: usize) -> Self {
        if idx < FEATURE_COUNT {
            Focus::Slider(idx)
        } else {
            Focus::PredictButton
        }
    }

    fn next(self) -> Self {
        Self::from_index((self.index() + 1) % (FEATURE_COUNT + 1))
    }

    fn prev(self) -> Self {
        Self::from_index((self.index() + FEATURE_COUNT) % (FEATURE_COUNT + 1))
    }
}

/// Last thing shown in the result area
#[derive(Debug, Clone, PartialEq)]
pub enum Outcome {
    Success(PredictionResult),
    Failure(String),
}

/// Whole form state
pub struct App {
    engine: Result<InferenceEngine, LoadError>,
    metrics: Arc<PredictionMetrics>,
    values: [f64; FEATURE_COUNT],
    pub focus: Focus,
    pub outcome: Option<Outcome>,
    pub show_about: bool,
}

impl App {
    pub fn new(engine: Result<InferenceEngine, LoadError>, metrics: Arc<PredictionMetrics>) -> Self {
        Self {
            engine,
            metrics,
            values: default_record().values(),
            focus: Focus::Slider(0),
            outcome: None,
            show_about: false,
        }
    }

    /// Whether the predict action is available
    pub fn can_predict(&self) -> bool {
        self.engine.is_ok()
    }

    pub fn load_error(&self) -> Option<&LoadError> {
        self.engine.as_ref().err()
    }

    pub fn metrics(&self) -> &PredictionMetrics {
        &self.metrics
    }

    pub fn value(&self, idx: usize) -> f64 {
        self.values[idx]
    }

    /// Current inputs, clamped to the slider ranges
    pub fn record(&self) -> InputRecord {
        let [amina_flow, air_flow, iron_concentrate] = self.values;
        InputRecord::new(amina_flow, air_flow, iron_concentrate).clamped()
    }

    /// Set a slider directly; the value is clamped into its range
    pub fn set_value(&mut self, idx: usize, value: f64) {
        if let Some(slot) = self.values.get_mut(idx) {
            *slot = SLIDERS[idx].bounds.clamp(value);
        }
    }

    pub fn handle_key(&mut self, key: KeyEvent) -> Action {
        let fine = key.modifiers.contains(KeyModifiers::SHIFT);

        match key.code {
            KeyCode::Char('q') | KeyCode::Esc => return Action::Quit,
            KeyCode::Down | KeyCode::Tab | KeyCode::Char('j') => self.focus = self.focus.next(),
            KeyCode::Up | KeyCode::BackTab | KeyCode::Char('k') => self.focus = self.focus.prev(),
            KeyCode::Left | KeyCode::Char('h') => self.adjust(-1.0, fine),
            KeyCode::Right | KeyCode::Char('l') => self.adjust(1.0, fine),
            KeyCode::Home => self.jump(|spec| spec.bounds.min),
            KeyCode::End => self.jump(|spec| spec.bounds.max),
            KeyCode::Char('r') => self.values = default_record().values(),
            KeyCode::Char('i') | KeyCode::Char('?') => self.show_about = !self.show_about,
            KeyCode::Char('p') => self.predict(),
            KeyCode::Enter if self.focus == Focus::PredictButton => self.predict(),
            KeyCode::Enter => self.focus = self.focus.next(),
            _ => {}
        }

        Action::None
    }

    fn adjust(&mut self, direction: f64, fine: bool) {
        if let Focus::Slider(idx) = self.focus {
            let spec = &SLIDERS[idx];
            let step = if fine { FINE_STEP } else { spec.step };
            self.values[idx] = spec.nudge(self.values[idx], direction * step);
        }
    }

    fn jump(&mut self, to: impl Fn(&SliderSpec) -> f64) {
        if let Focus::Slider(idx) = self.focus {
            self.values[idx] = to(&SLIDERS[idx]);
        }
    }

    /// Run one prediction with the current inputs
    pub fn predict(&mut self) {
        let Ok(engine) = &self.engine else {
            warn!("Predict requested while the model is unavailable");
            return;
        };

        let record = self.record();
        let outcome = match engine.predict(&record) {
            Ok(result) => {
                self.metrics.record_prediction(result.latency);
                info!(
                    amina_flow = record.amina_flow,
                    air_flow = record.air_flow,
                    iron_concentrate = record.iron_concentrate,
                    silica = result.value,
                    "Prediction displayed"
                );
                Outcome::Success(result)
            }
            Err(e) => {
                self.metrics.record_failure();
                Outcome::Failure(e.to_string())
            }
        };

        self.outcome = Some(outcome);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::feature_extractor::{FeatureExtractor, FeatureRow};
    use crate::models::Regressor;
    use std::path::PathBuf;

    struct Constant(f64);

    impl Regressor for Constant {
        fn predict(&self, _row: &FeatureRow) -> anyhow::Result<Vec<f64>> {
            Ok(vec![self.0])
        }
    }

    fn app_with(value: f64) -> App {
        let engine = InferenceEngine::new(Arc::new(Constant(value)), FeatureExtractor::new());
        App::new(Ok(engine), Arc::new(PredictionMetrics::new()))
    }

    fn press(app: &mut App, code: KeyCode) -> Action {
        app.handle_key(KeyEvent::new(code, KeyModifiers::NONE))
    }

    #[test]
    fn test_focus_cycles() {
        let mut app = app_with(1.0);
        assert_eq!(app.focus, Focus::Slider(0));
        for _ in 0..FEATURE_COUNT {
            press(&mut app, KeyCode::Down);
        }
        assert_eq!(app.focus, Focus::PredictButton);
        press(&mut app, KeyCode::Down);
        assert_eq!(app.focus, Focus::Slider(0));
        press(&mut app, KeyCode::Up);
        assert_eq!(app.focus, Focus::PredictButton);
    }

    #[test]
    fn test_sliders_stay_in_range() {
        let mut app = app_with(1.0);
        for _ in 0..1000 {
            press(&mut app, KeyCode::Right);
        }
        assert_eq!(app.value(0), 739.3);

        press(&mut app, KeyCode::Home);
        assert_eq!(app.value(0), 241.7);
        press(&mut app, KeyCode::Left);
        assert_eq!(app.value(0), 241.7);

        app.set_value(2, 99.0);
        assert_eq!(app.value(2), 68.01);
        assert!(app.record().is_within_bounds());
    }

    #[test]
    fn test_fine_step() {
        let mut app = app_with(1.0);
        app.handle_key(KeyEvent::new(KeyCode::Right, KeyModifiers::SHIFT));
        assert_eq!(app.value(0), 488.44);
    }

    #[test]
    fn test_predict_from_button() {
        let mut app = app_with(1.67);
        app.focus = Focus::PredictButton;
        press(&mut app, KeyCode::Enter);

        match &app.outcome {
            Some(Outcome::Success(result)) => assert_eq!(result.display_value(), "1.67%"),
            other => panic!("unexpected outcome: {other:?}"),
        }
        assert_eq!(app.metrics().prediction_count(), 1);
    }

    #[test]
    fn test_predict_disabled_without_model() {
        let mut app = App::new(
            Err(LoadError::ModelNotFound {
                path: PathBuf::from("modelo.onnx"),
            }),
            Arc::new(PredictionMetrics::new()),
        );
        assert!(!app.can_predict());
        press(&mut app, KeyCode::Char('p'));
        assert!(app.outcome.is_none());
        assert!(app.load_error().is_some());
    }

    #[test]
    fn test_reset_and_quit() {
        let mut app = app_with(1.0);
        press(&mut app, KeyCode::End);
        press(&mut app, KeyCode::Char('r'));
        assert_eq!(app.record(), InputRecord::default());
        assert_eq!(press(&mut app, KeyCode::Char('q')), Action::Quit);
    }
}
