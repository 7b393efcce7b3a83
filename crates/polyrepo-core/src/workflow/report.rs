//! Outcome of a scaffolding run

use crate::error::ScaffoldError;
use crate::variants::{Stage, Variant};
use std::fmt;

/// Whether repositories are created and published
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Mode {
    Local,
    Remote,
}

impl fmt::Display for Mode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Mode::Local => write!(f, "local"),
            Mode::Remote => write!(f, "remote"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VariantReport {
    pub variant: Variant,
    pub stage: Stage,
    /// Set on the variant whose step failed
    pub error: Option<String>,
}

/// Per-variant status plus the first failure, if any.
/// The run stops at the first failure; later variants stay `Pending`.
#[derive(Debug)]
pub struct RunReport {
    pub mode: Mode,
    pub variants: Vec<VariantReport>,
    pub umbrella_published: bool,
    pub failure: Option<ScaffoldError>,
}

impl RunReport {
    pub fn new(mode: Mode, variants: impl IntoIterator<Item = Variant>) -> Self {
        Self {
            mode,
            variants: variants
                .into_iter()
                .map(|variant| VariantReport {
                    variant,
                    stage: Stage::Pending,
                    error: None,
                })
                .collect(),
            umbrella_published: false,
            failure: None,
        }
    }

    pub fn is_success(&self) -> bool {
        self.failure.is_none()
    }

    pub fn variant(&self, variant: Variant) -> Option<&VariantReport> {
        self.variants.iter().find(|r| r.variant == variant)
    }

    pub(crate) fn variant_mut(&mut self, variant: Variant) -> Option<&mut VariantReport> {
        self.variants.iter_mut().find(|r| r.variant == variant)
    }

    /// Record the run-stopping failure, attributing it to `variant` if given
    pub(crate) fn fail(&mut self, variant: Option<Variant>, error: ScaffoldError) {
        if let Some(report) = variant.and_then(|v| self.variant_mut(v)) {
            report.error = Some(error.to_string());
        }
        self.failure = Some(error);
    }

    /// Human-readable status lines, one per variant
    pub fn summary_lines(&self) -> Vec<String> {
        self.variants
            .iter()
            .map(|r| match &r.error {
                Some(error) => format!("{}: failed after {} ({})", r.variant, r.stage, error),
                None => format!("{}: {}", r.variant, r.stage),
            })
            .collect()
    }
}
