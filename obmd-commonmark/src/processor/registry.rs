//! Ordered registry of preprocessing stages.
use super::types::Preprocessor;

struct RegisteredStage {
  priority: i32,
  stage:    Box<dyn Preprocessor>,
}

/// Preprocessing stages sorted by descending priority.
///
/// Stages with equal priority run in registration order.
#[derive(Default)]
pub struct PreprocessorRegistry {
  stages: Vec<RegisteredStage>,
}

impl PreprocessorRegistry {
  /// Create an empty registry.
  #[must_use]
  pub fn new() -> Self {
    Self::default()
  }

  /// Register `stage` at `priority`. Higher priorities run first. A stage
  /// already registered under the same name is replaced.
  pub fn register(&mut self, stage: Box<dyn Preprocessor>, priority: i32) {
    if self.deregister(stage.name()) {
      log::debug!("Replacing preprocessor '{}'", stage.name());
    }

    let index = self
      .stages
      .iter()
      .position(|registered| registered.priority < priority)
      .unwrap_or(self.stages.len());
    self
      .stages
      .insert(index, RegisteredStage { priority, stage });
  }

  /// Remove the stage registered under `name`. Returns whether one was
  /// removed.
  pub fn deregister(&mut self, name: &str) -> bool {
    let before = self.stages.len();
    self.stages.retain(|registered| registered.stage.name() != name);
    self.stages.len() != before
  }

  /// Stage names in execution order.
  #[must_use]
  pub fn names(&self) -> Vec<&'static str> {
    self
      .stages
      .iter()
      .map(|registered| registered.stage.name())
      .collect()
  }

  /// Priority of the stage registered under `name`.
  #[must_use]
  pub fn priority_of(&self, name: &str) -> Option<i32> {
    self
      .stages
      .iter()
      .find(|registered| registered.stage.name() == name)
      .map(|registered| registered.priority)
  }

  #[must_use]
  pub fn len(&self) -> usize {
    self.stages.len()
  }

  #[must_use]
  pub fn is_empty(&self) -> bool {
    self.stages.is_empty()
  }

  /// Run every stage over `lines` in priority order.
  #[must_use]
  pub fn run(&self, lines: Vec<String>) -> Vec<String> {
    self.stages.iter().fold(lines, |lines, registered| {
      log::trace!(
        "Running preprocessor '{}' over {} line(s)",
        registered.stage.name(),
        lines.len()
      );
      registered.stage.run(lines)
    })
  }
}
