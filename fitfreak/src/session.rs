use crate::config::SessionConfig;
use crate::source::PoseSource;
use bincode::de::Decoder;
use bincode::enc::Encoder;
use bincode::error::{DecodeError, EncodeError};
use bincode::{Decode, Encode};
use ff_pose_payloads::{ExerciseKind, PoseFrame, RepCount, Verdict};
use ff_posecheck::validate;
use ff_repcount::{rule_for, update, CounterState};
use fitfreak_traits::{FfResult, Freezable};
use log::{debug, info};
use std::collections::BTreeMap;
use std::fmt::{Display, Formatter};

/// What a session hands back to the presentation layer after a frame.
#[derive(Debug, Clone, PartialEq)]
pub enum Feedback {
    Reps(RepCount),
    Verdict(Verdict),
}

impl Display for Feedback {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Feedback::Reps(reps) => Display::fmt(reps, f),
            Feedback::Verdict(verdict) => Display::fmt(verdict, f),
        }
    }
}

/// Routes pose frames to the selected exercise.
///
/// Every counted exercise keeps its own [`CounterState`], created on its first
/// frame. Switching exercises leaves the other counters alone so coming back
/// to an exercise resumes its count.
#[derive(Debug, Clone, Default)]
pub struct Session {
    config: SessionConfig,
    active: Option<ExerciseKind>,
    counters: BTreeMap<ExerciseKind, CounterState>,
    latest: Option<Feedback>,
}

impl Session {
    pub fn new(config: SessionConfig) -> Self {
        let mut session = Session {
            config,
            ..Default::default()
        };
        if let Some(kind) = session.config.exercise {
            session.select_exercise(kind);
        }
        session
    }

    pub fn config(&self) -> &SessionConfig {
        &self.config
    }

    pub fn active(&self) -> Option<ExerciseKind> {
        self.active
    }

    pub fn select_exercise(&mut self, kind: ExerciseKind) {
        if self.config.reset_on_switch && self.active != Some(kind) {
            self.counters.remove(&kind);
        }
        self.active = Some(kind);
        self.latest = None;
        info!("Exercise selected: {}", kind);
    }

    /// Select an exercise from a user facing name such as "Push-ups".
    pub fn select_by_name(&mut self, name: &str) -> FfResult<ExerciseKind> {
        let kind: ExerciseKind = name.parse()?;
        self.select_exercise(kind);
        Ok(kind)
    }

    /// Process one frame. `None` until an exercise is selected.
    pub fn on_pose_frame(&mut self, frame: &PoseFrame) -> Option<Feedback> {
        let Some(kind) = self.active else {
            debug!("No exercise selected, frame dropped");
            return None;
        };
        let frame = frame.visible(self.config.min_confidence);

        let feedback = match rule_for(kind) {
            Some(rule) => {
                let state = self
                    .counters
                    .entry(kind)
                    .or_insert_with(|| CounterState::new(rule));
                update(rule, state, &frame);
                Feedback::Reps(state.rep_count(kind))
            }
            None => Feedback::Verdict(validate(&frame, kind)),
        };
        self.latest = Some(feedback.clone());
        Some(feedback)
    }

    pub fn latest(&self) -> Option<&Feedback> {
        self.latest.as_ref()
    }

    pub fn counter(&self, kind: ExerciseKind) -> Option<&CounterState> {
        self.counters.get(&kind)
    }

    pub fn count(&self, kind: ExerciseKind) -> u32 {
        self.counter(kind).map_or(0, CounterState::count)
    }

    /// Start the count of one exercise over.
    pub fn reset(&mut self, kind: ExerciseKind) {
        self.counters.remove(&kind);
        if matches!(&self.latest, Some(Feedback::Reps(reps)) if reps.kind == kind) {
            self.latest = None;
        }
        info!("{}: counter reset", kind);
    }

    /// Forget every counter. The selected exercise is kept.
    pub fn restart(&mut self) {
        self.counters.clear();
        self.latest = None;
        info!("Session restarted");
    }

    pub fn status(&self) -> String {
        match (&self.latest, self.active) {
            (Some(feedback), _) => feedback.to_string(),
            (None, Some(kind)) => format!("{}: waiting for a pose", kind),
            (None, None) => "No exercise selected".to_string(),
        }
    }

    /// Drain `source`, handing every feedback to `sink`.
    /// Returns the number of frames consumed.
    pub fn run<S, F>(&mut self, source: &mut S, mut sink: F) -> FfResult<usize>
    where
        S: PoseSource + ?Sized,
        F: FnMut(&Feedback),
    {
        let mut frames = 0;
        while let Some(frame) = source.next_frame()? {
            frames += 1;
            if let Some(feedback) = self.on_pose_frame(&frame) {
                sink(&feedback);
            }
        }
        debug!("Pose source exhausted after {} frames", frames);
        Ok(frames)
    }
}

impl Freezable for Session {
    fn freeze<E: Encoder>(&self, encoder: &mut E) -> Result<(), EncodeError> {
        Encode::encode(&self.active, encoder)?;
        Encode::encode(&self.counters, encoder)
    }

    fn thaw<D: Decoder>(&mut self, decoder: &mut D) -> Result<(), DecodeError> {
        let active: Option<ExerciseKind> = Decode::decode(decoder)?;
        let counters: BTreeMap<ExerciseKind, CounterState> = Decode::decode(decoder)?;
        for (kind, state) in counters.iter() {
            match rule_for(*kind) {
                Some(rule) if state.fits(rule) => {}
                Some(_) => {
                    return Err(DecodeError::OtherString(format!(
                        "{}: phase {} is not one of this counter",
                        kind,
                        state.phase()
                    )))
                }
                None => {
                    return Err(DecodeError::OtherString(format!(
                        "{} is not a counted exercise",
                        kind
                    )))
                }
            }
        }
        self.active = active;
        self.counters = counters;
        self.latest = None;
        Ok(())
    }
}
